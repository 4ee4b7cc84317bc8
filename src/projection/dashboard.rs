// src/projection/dashboard.rs
use crate::api::types::{AnalysisResult, Case, Classification};
use crate::utils::{format_percentage, humanize};

use super::comparison::{self, ComparisonView};
use super::{Projection, Tone};

#[derive(Debug, Clone, PartialEq)]
pub struct PredictionBar {
    /// 1-based position in the service ranking.
    pub rank: usize,
    pub category: String,
    pub probability: f64,
    pub tone: Tone,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ClassificationSummary {
    pub principal: String,
    /// First prediction, in the order the service listed them, that differs
    /// from the principal category.
    pub alternative: Option<String>,
    pub confidence: String,
    pub tone: Tone,
    pub predictions: Vec<PredictionBar>,
}

impl ClassificationSummary {
    pub fn from_classification(classification: &Classification) -> Self {
        let alternative = classification
            .predictions
            .iter()
            .find(|p| p.category != classification.principal)
            .map(|p| humanize(&p.category));

        Self {
            principal: humanize(&classification.principal),
            alternative,
            confidence: format_percentage(classification.confidence),
            tone: Tone::for_probability(classification.confidence),
            predictions: classification
                .predictions
                .iter()
                .enumerate()
                .map(|(index, p)| PredictionBar {
                    rank: index + 1,
                    category: humanize(&p.category),
                    probability: p.probability.clamp(0.0, 1.0),
                    tone: Tone::for_probability(p.probability),
                })
                .collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ComplexitySlot {
    pub case: Case,
    pub class: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RecurrenceCard {
    pub case: Case,
    pub formula: String,
    pub solution: Option<String>,
    pub steps: Vec<String>,
    pub method: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CorrectionView {
    pub explanation: Option<String>,
    /// Errors found before the correction ran.
    pub error_count: Option<u32>,
    pub corrected_source: Option<String>,
    pub edits: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DashboardView {
    pub success: bool,
    pub phase: Option<String>,
    pub algorithm: Option<String>,
    pub algorithm_type: Option<String>,
    pub classification: Option<ClassificationSummary>,
    pub slots: Vec<ComplexitySlot>,
    pub recurrences: Vec<RecurrenceCard>,
    pub observation: Option<String>,
    pub correction: Option<CorrectionView>,
    pub comparison: Option<ComparisonView>,
    pub errors: Vec<String>,
    pub has_report: bool,
}

fn recurrence(result: &AnalysisResult, case: Case) -> Option<RecurrenceCard> {
    let entry = result.equation_for(case);
    let resolution = result
        .complexities
        .as_ref()
        .and_then(|c| c.resolution_for(case));

    let formula = entry
        .and_then(|e| e.formula())
        .map(str::to_string)
        .or_else(|| resolution.and_then(|r| r.formula.clone()))
        .filter(|f| !f.trim().is_empty())?;

    let steps = match entry.map(|e| e.steps()) {
        Some(steps) if !steps.is_empty() => steps.to_vec(),
        _ => resolution.map(|r| r.steps.clone()).unwrap_or_default(),
    };

    Some(RecurrenceCard {
        case,
        formula,
        solution: entry
            .and_then(|e| e.solution())
            .map(str::to_string)
            .or_else(|| resolution.and_then(|r| r.solution.clone())),
        steps,
        method: entry
            .and_then(|e| e.method())
            .map(str::to_string)
            .or_else(|| resolution.and_then(|r| r.method.clone())),
    })
}

fn correction(result: &AnalysisResult) -> Option<CorrectionView> {
    let correction = result.correction.as_ref().filter(|c| c.corrected)?;
    Some(CorrectionView {
        explanation: correction.explanation.clone(),
        error_count: result
            .initial_validation
            .as_ref()
            .map(|v| v.summary.total_errors),
        corrected_source: correction
            .source
            .clone()
            .or_else(|| result.validated_source.clone()),
        edits: correction.edits.iter().map(|edit| edit.to_string()).collect(),
    })
}

pub fn project(result: Option<&AnalysisResult>) -> Projection<DashboardView> {
    Projection::from(result).map(dashboard)
}

fn dashboard(result: &AnalysisResult) -> DashboardView {
    let complexities = result.complexities.as_ref();
    let classification = result
        .classification
        .as_ref()
        .or_else(|| result.validation.as_ref().and_then(|v| v.classification.as_ref()));

    DashboardView {
        success: result.success,
        phase: result.current_phase.clone(),
        algorithm: result.algorithm_name().map(str::to_string),
        algorithm_type: result
            .validation
            .as_ref()
            .and_then(|v| v.algorithm_type.clone()),
        classification: classification.map(ClassificationSummary::from_classification),
        slots: Case::ALL
            .iter()
            .map(|&case| ComplexitySlot {
                case,
                class: complexities
                    .and_then(|c| c.classes.get(case))
                    .map(str::to_string),
            })
            .collect(),
        recurrences: Case::ALL
            .iter()
            .filter_map(|&case| recurrence(result, case))
            .collect(),
        observation: complexities.and_then(|c| c.observation.clone()),
        correction: correction(result),
        comparison: comparison::project(result),
        errors: result.errors.clone(),
        has_report: result.markdown_report.is_some(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::mock;
    use serde_json::json;

    fn linear_search() -> AnalysisResult {
        serde_json::from_value(mock::linear_search_result()).unwrap()
    }

    #[test]
    fn test_slots_show_service_classes_verbatim() {
        let result = linear_search();
        let view = project(Some(&result));
        let view = view.ready().unwrap();

        let slots: Vec<_> = view
            .slots
            .iter()
            .map(|s| (s.case, s.class.as_deref()))
            .collect();
        assert_eq!(
            slots,
            [
                (Case::Best, Some("Ω(1)")),
                (Case::Average, Some("Θ(n)")),
                (Case::Worst, Some("O(n)")),
            ]
        );
    }

    #[test]
    fn test_classification_summary() {
        let result = linear_search();
        let view = project(Some(&result));
        let summary = view.ready().unwrap().classification.clone().unwrap();

        assert_eq!(summary.principal, "busqueda lineal");
        assert_eq!(summary.alternative.as_deref(), Some("recorrido arreglo"));
        assert_eq!(summary.confidence, "87.0%");
        assert_eq!(summary.tone, Tone::Success);
        assert_eq!(summary.predictions.len(), 3);
    }

    #[test]
    fn test_predictions_are_ranked_from_one() {
        let result = linear_search();
        let view = project(Some(&result));
        let summary = view.ready().unwrap().classification.clone().unwrap();

        let ranked: Vec<_> = summary
            .predictions
            .iter()
            .map(|p| (p.rank, p.category.as_str()))
            .collect();
        assert_eq!(ranked[0], (1, "busqueda lineal"));
        assert_eq!(ranked.last().map(|r| r.0), Some(3));
    }

    #[test]
    fn test_alternative_keeps_insertion_order() {
        let classification: Classification = serde_json::from_value(json!({
            "categoria_principal": "ordenamiento",
            "confianza": 0.5,
            "top_predicciones": [
                { "categoria": "ordenamiento", "probabilidad": 0.5 },
                { "categoria": "divide_y_venceras", "probabilidad": 0.1 },
                { "categoria": "dp", "probabilidad": 0.4 }
            ]
        }))
        .unwrap();

        let summary = ClassificationSummary::from_classification(&classification);
        assert_eq!(summary.alternative.as_deref(), Some("divide y venceras"));
    }

    #[test]
    fn test_recurrence_cards_omit_absent_cases() {
        let result: AnalysisResult = serde_json::from_value(json!({
            "ecuaciones": {
                "peor_caso": { "ecuacion": "T(n) = 2T(n/2) + n", "solucion": "O(n log n)", "pasos": ["a = 2, b = 2", "caso 2"] },
                "mejor_caso": null
            }
        }))
        .unwrap();

        let view = project(Some(&result));
        let cards = &view.ready().unwrap().recurrences;

        assert_eq!(cards.len(), 1);
        assert_eq!(cards[0].case, Case::Worst);
        assert_eq!(cards[0].solution.as_deref(), Some("O(n log n)"));
        assert_eq!(cards[0].steps, vec!["a = 2, b = 2", "caso 2"]);
    }

    #[test]
    fn test_plain_equations_borrow_solution_from_resolution() {
        let result = linear_search();
        let view = project(Some(&result));
        let cards = &view.ready().unwrap().recurrences;

        assert_eq!(cards.len(), 3);
        let worst = &cards[2];
        assert_eq!(worst.formula, "T(n) = n");
        assert_eq!(worst.solution.as_deref(), Some("O(n)"));
        assert_eq!(worst.steps.len(), 2);
        assert!(cards[0].solution.is_none());
    }

    #[test]
    fn test_partial_result_reduces_panels() {
        let result: AnalysisResult = serde_json::from_value(json!({
            "exito": false,
            "fase_actual": "validacion_completada",
            "errores": ["Pseudocódigo inválido"]
        }))
        .unwrap();

        let view = project(Some(&result));
        let view = view.ready().unwrap();
        assert!(view.classification.is_none());
        assert!(view.recurrences.is_empty());
        assert!(view.slots.iter().all(|s| s.class.is_none()));
        assert_eq!(view.errors, vec!["Pseudocódigo inválido"]);
        assert!(view.comparison.is_none());
    }

    #[test]
    fn test_second_opinion_reaches_the_dashboard() {
        let result: AnalysisResult = serde_json::from_value(json!({
            "exito": true,
            "validacion_complejidades": {
                "concordancia": true,
                "confianza": 0.95,
                "complejidades_sistema": { "mejor_caso": "Ω(1)", "caso_promedio": "Θ(n)", "peor_caso": "O(n)" },
                "complejidades_llm": { "mejor_caso": "Ω(1)", "caso_promedio": "Θ(n)", "peor_caso": "O(n)" }
            }
        }))
        .unwrap();

        let view = project(Some(&result));
        let comparison = view.ready().unwrap().comparison.clone().unwrap();
        assert!(comparison.agrees);
        assert_eq!(comparison.confidence, "95.0%");
        assert_eq!(comparison.rows.len(), 3);
    }

    #[test]
    fn test_correction_feedback() {
        let result: AnalysisResult = serde_json::from_value(json!({
            "pseudocodigo_validado": "begin\n  x ← 1\nend",
            "validacion_inicial": { "valido_general": false, "resumen": { "errores_totales": 2 } },
            "correccion": {
                "corregido": true,
                "explicacion": "Se agregó el 'end' faltante",
                "cambios": [{ "linea": 3, "antes": "", "despues": "end" }]
            }
        }))
        .unwrap();

        let view = project(Some(&result));
        let correction = view.ready().unwrap().correction.clone().unwrap();
        assert_eq!(correction.error_count, Some(2));
        assert_eq!(correction.corrected_source.as_deref(), Some("begin\n  x ← 1\nend"));
        assert_eq!(correction.edits, vec!["Línea 3:  → end"]);
    }

    #[test]
    fn test_uncorrected_source_has_no_feedback() {
        let result: AnalysisResult = serde_json::from_value(json!({
            "correccion": { "corregido": false }
        }))
        .unwrap();
        let view = project(Some(&result));
        assert!(view.ready().unwrap().correction.is_none());
    }
}
