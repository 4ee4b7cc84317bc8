// src/projection/bounds.rs
use crate::api::types::{AnalysisResult, Case, Complexities};

use super::Projection;

pub const MISSING_CLASS: &str = "N/A";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoundKind {
    Lower,
    Tight,
    Upper,
}

impl BoundKind {
    pub const ALL: [BoundKind; 3] = [BoundKind::Lower, BoundKind::Tight, BoundKind::Upper];

    pub fn case(&self) -> Case {
        match self {
            BoundKind::Lower => Case::Best,
            BoundKind::Tight => Case::Average,
            BoundKind::Upper => Case::Worst,
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            BoundKind::Lower => "Ω",
            BoundKind::Tight => "Θ",
            BoundKind::Upper => "O",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            BoundKind::Lower => "Inferior (Ω)",
            BoundKind::Tight => "Promedio (Θ)",
            BoundKind::Upper => "Superior (O)",
        }
    }

    /// Formal definition with `g(n)` bound to `class`.
    pub fn template(&self, class: &str) -> String {
        match self {
            BoundKind::Lower => format!(
                "∃ c, n₀ > 0 tal que T(n) ≥ c·g(n) para todo n ≥ n₀, con g(n) = {}",
                class
            ),
            BoundKind::Tight => format!(
                "∃ c₁, c₂, n₀ > 0 tal que c₁·g(n) ≤ T(n) ≤ c₂·g(n) para todo n ≥ n₀, con g(n) = {}",
                class
            ),
            BoundKind::Upper => format!(
                "∃ c, n₀ > 0 tal que T(n) ≤ c·g(n) para todo n ≥ n₀, con g(n) = {}",
                class
            ),
        }
    }

    fn default_analysis(&self, class: &str) -> String {
        match self {
            BoundKind::Lower => format!(
                "En el mejor caso el algoritmo no puede hacer menos trabajo que {}.",
                class
            ),
            BoundKind::Tight => format!(
                "Promediando sobre todas las entradas de tamaño n, el costo crece como {}.",
                class
            ),
            BoundKind::Upper => format!(
                "En el peor caso el costo nunca crece más rápido que {}.",
                class
            ),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BoundRow {
    pub kind: BoundKind,
    pub case: Case,
    pub class: String,
    pub analysis: String,
    pub template: String,
    /// Equation derived by the service for this case, shown next to the
    /// template.
    pub equation: Option<String>,
    pub steps: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BoundsView {
    pub rows: Vec<BoundRow>,
    pub method: Option<String>,
    pub observation: Option<String>,
}

fn analysis_for(kind: BoundKind, complexities: Option<&Complexities>, class: &str) -> String {
    let case = kind.case();
    complexities
        .and_then(|c| c.resolution_for(case))
        .and_then(|r| r.explanation.clone())
        .or_else(|| {
            (case == Case::Average)
                .then(|| complexities.and_then(|c| c.average_derivation.clone()))
                .flatten()
        })
        .unwrap_or_else(|| kind.default_analysis(class))
}

fn row(kind: BoundKind, result: &AnalysisResult) -> BoundRow {
    let case = kind.case();
    let complexities = result.complexities.as_ref();
    let class = complexities
        .and_then(|c| c.classes.get(case))
        .filter(|class| !class.trim().is_empty())
        .unwrap_or(MISSING_CLASS)
        .to_string();

    let equation = complexities
        .and_then(|c| c.equation_for(case))
        .map(str::to_string)
        .or_else(|| {
            result
                .equation_for(case)
                .and_then(|entry| entry.formula())
                .map(str::to_string)
        });

    let steps = complexities
        .and_then(|c| c.resolution_for(case))
        .map(|r| r.steps.clone())
        .unwrap_or_default();

    BoundRow {
        kind,
        case,
        analysis: analysis_for(kind, complexities, &class),
        template: kind.template(&class),
        class,
        equation,
        steps,
    }
}

pub fn project(result: Option<&AnalysisResult>) -> Projection<BoundsView> {
    let Some(result) = result else {
        return Projection::NoData;
    };

    let complexities = result.complexities.as_ref();
    Projection::Ready(BoundsView {
        rows: BoundKind::ALL.iter().map(|&kind| row(kind, result)).collect(),
        method: complexities.and_then(|c| c.method.clone()),
        observation: complexities.and_then(|c| c.observation.clone()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::mock;
    use serde_json::json;

    #[test]
    fn test_upper_bound_template_substitutes_worst_case() {
        let result: AnalysisResult = serde_json::from_value(json!({
            "complejidades": { "complejidades": { "peor_caso": "O(n)" } }
        }))
        .unwrap();

        let view = project(Some(&result));
        let upper = &view.ready().unwrap().rows[2];

        assert_eq!(upper.kind, BoundKind::Upper);
        assert!(upper.template.contains("g(n) = O(n)"), "{}", upper.template);
        assert!(upper.template.contains("T(n) ≤ c·g(n)"));
    }

    #[test]
    fn test_rows_are_lower_tight_upper() {
        let result: AnalysisResult = serde_json::from_value(mock::linear_search_result()).unwrap();
        let view = project(Some(&result));
        let view = view.ready().unwrap();

        let classes: Vec<_> = view.rows.iter().map(|r| r.class.as_str()).collect();
        assert_eq!(classes, ["Ω(1)", "Θ(n)", "O(n)"]);
        assert_eq!(view.rows[0].equation.as_deref(), Some("T(n) = 1"));
        assert_eq!(view.rows[2].analysis, "Lineal en n");
        assert_eq!(view.rows[2].steps.len(), 2);
        assert_eq!(view.method.as_deref(), Some("Sumatoria directa"));
    }

    #[test]
    fn test_missing_complexities_fall_back() {
        let result = AnalysisResult::default();
        let view = project(Some(&result));
        let view = view.ready().unwrap();

        for row in &view.rows {
            assert_eq!(row.class, MISSING_CLASS);
            assert!(row.template.ends_with("g(n) = N/A"));
            assert!(row.equation.is_none());
            assert!(!row.analysis.is_empty());
        }
    }

    #[test]
    fn test_equation_falls_back_to_top_level_equations() {
        let result: AnalysisResult = serde_json::from_value(json!({
            "ecuaciones": { "peor_caso": { "ecuacion": "T(n) = T(n-1) + 1", "solucion": "O(n)" } }
        }))
        .unwrap();

        let view = project(Some(&result));
        let upper = &view.ready().unwrap().rows[2];
        assert_eq!(upper.equation.as_deref(), Some("T(n) = T(n-1) + 1"));
    }
}
