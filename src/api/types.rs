// src/api/types.rs
use std::collections::BTreeMap;
use std::fmt;

use serde::de::{DeserializeOwned, Deserializer};
use serde::{Deserialize, Serialize};

/// The service sends `null` for sections it never reached; treat that the same
/// as a missing key.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + DeserializeOwned,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InputType {
    Pseudocodigo,
    LenguajeNatural,
    #[default]
    Auto,
}

impl InputType {
    pub const ALL: [InputType; 3] = [
        InputType::Pseudocodigo,
        InputType::LenguajeNatural,
        InputType::Auto,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            InputType::Pseudocodigo => "Pseudocódigo",
            InputType::LenguajeNatural => "Lenguaje natural",
            InputType::Auto => "Auto",
        }
    }
}

/// Body of `POST /validador/validar`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationRequest {
    pub pseudocodigo: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub return_suggestions: Option<bool>,
}

impl ValidationRequest {
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            pseudocodigo: source.into(),
            return_suggestions: None,
        }
    }

    pub fn with_suggestions(mut self, enabled: bool) -> Self {
        self.return_suggestions = Some(enabled);
        self
    }
}

/// Body of `POST /analisis/analizar` and `/analisis/analizar-con-reporte`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisRequest {
    pub entrada: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tipo_entrada: Option<InputType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auto_corregir: Option<bool>,
}

impl AnalysisRequest {
    pub fn new(input: impl Into<String>) -> Self {
        Self {
            entrada: input.into(),
            tipo_entrada: None,
            auto_corregir: None,
        }
    }

    pub fn with_input_type(mut self, input_type: InputType) -> Self {
        self.tipo_entrada = Some(input_type);
        self
    }

    pub fn with_auto_correct(mut self, enabled: bool) -> Self {
        self.auto_corregir = Some(enabled);
        self
    }
}

/// The three analysis cases, keyed the way the service keys them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Case {
    Best,
    Average,
    Worst,
}

impl Case {
    pub const ALL: [Case; 3] = [Case::Best, Case::Average, Case::Worst];

    pub fn wire_key(&self) -> &'static str {
        match self {
            Case::Best => "mejor_caso",
            Case::Average => "caso_promedio",
            Case::Worst => "peor_caso",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Case::Best => "Mejor caso",
            Case::Average => "Caso promedio",
            Case::Worst => "Peor caso",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LayerResult {
    #[serde(rename = "valido", default)]
    pub valid: bool,
    #[serde(rename = "errores", default, deserialize_with = "null_as_default")]
    pub errors: Vec<String>,
    #[serde(rename = "detalles", default, deserialize_with = "null_as_default")]
    pub details: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationSummary {
    #[serde(rename = "total_lineas")]
    pub total_lines: u32,
    #[serde(rename = "clases_encontradas")]
    pub classes_found: u32,
    #[serde(rename = "subrutinas_encontradas")]
    pub subroutines_found: u32,
    #[serde(rename = "errores_totales")]
    pub total_errors: u32,
}

/// Layered validation outcome. Returned on its own by the validator endpoint
/// and embedded in every analysis result.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ValidationReport {
    #[serde(rename = "valido_general", default)]
    pub valid: bool,
    #[serde(rename = "tipo_algoritmo", default)]
    pub algorithm_type: Option<String>,
    #[serde(rename = "algorithm_name", default)]
    pub algorithm_name: Option<String>,
    #[serde(rename = "capas", default, deserialize_with = "null_as_default")]
    pub layers: BTreeMap<String, LayerResult>,
    #[serde(rename = "resumen", default, deserialize_with = "null_as_default")]
    pub summary: ValidationSummary,
    #[serde(rename = "clasificacion", default)]
    pub classification: Option<Classification>,
    #[serde(rename = "sugerencias", default, deserialize_with = "null_as_default")]
    pub suggestions: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LineEdit {
    Note(String),
    Line {
        #[serde(rename = "linea", default)]
        line: Option<u32>,
        #[serde(rename = "antes", default)]
        before: String,
        #[serde(rename = "despues", default)]
        after: String,
    },
}

impl fmt::Display for LineEdit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LineEdit::Note(text) => f.write_str(text),
            LineEdit::Line { line: Some(line), before, after } => {
                write!(f, "Línea {}: {} → {}", line, before, after)
            }
            LineEdit::Line { line: None, before, after } => write!(f, "{} → {}", before, after),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Correction {
    #[serde(rename = "corregido", default)]
    pub corrected: bool,
    #[serde(rename = "pseudocodigo", default)]
    pub source: Option<String>,
    #[serde(rename = "explicacion", default)]
    pub explanation: Option<String>,
    #[serde(rename = "cambios", default, deserialize_with = "null_as_default")]
    pub edits: Vec<LineEdit>,
}

/// Table cell that the service may send either as a number or as an expression.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Cell {
    Int(i64),
    Float(f64),
    Text(String),
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Int(value) => write!(f, "{}", value),
            Cell::Float(value) => write!(f, "{}", value),
            Cell::Text(value) => f.write_str(value),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LineCost {
    #[serde(alias = "line", default)]
    pub line_number: Option<u32>,
    #[serde(default)]
    pub code: String,
    #[serde(rename = "C_op", alias = "cost", default)]
    pub operations: Option<Cell>,
    #[serde(rename = "Freq", alias = "frequency", default)]
    pub frequency: Option<Cell>,
    #[serde(rename = "Total", alias = "total", default)]
    pub total: Option<Cell>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub condition: Option<String>,
    #[serde(alias = "global_state", default)]
    pub state: Option<String>,
    #[serde(rename = "cost_T", alias = "local_cost_expression", default)]
    pub cost: Option<Cell>,
    #[serde(rename = "probability_P", alias = "probability_expression", default)]
    pub probability: Option<Cell>,
    #[serde(
        rename = "line_costs",
        alias = "justification_subtable",
        default,
        deserialize_with = "null_as_default"
    )]
    pub line_costs: Vec<LineCost>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LineCosts {
    #[serde(rename = "algorithm_name", alias = "algoritmo", default)]
    pub algorithm: Option<String>,
    #[serde(
        rename = "scenarios",
        alias = "escenarios",
        default,
        deserialize_with = "null_as_default"
    )]
    pub scenarios: Vec<Scenario>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EquationDetail {
    #[serde(rename = "ecuacion", alias = "formula", default)]
    pub formula: Option<String>,
    #[serde(rename = "solucion", alias = "solution", default)]
    pub solution: Option<String>,
    #[serde(rename = "pasos", alias = "steps", default, deserialize_with = "null_as_default")]
    pub steps: Vec<String>,
    #[serde(rename = "metodo", alias = "metodo_usado", default)]
    pub method: Option<String>,
}

/// One entry of `ecuaciones`: the service sends either the bare formula or a
/// record with its solution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EquationEntry {
    Empty,
    Formula(String),
    Detailed(EquationDetail),
}

impl EquationEntry {
    pub fn formula(&self) -> Option<&str> {
        match self {
            EquationEntry::Empty => None,
            EquationEntry::Formula(formula) => Some(formula.as_str()),
            EquationEntry::Detailed(detail) => detail.formula.as_deref(),
        }
    }

    pub fn solution(&self) -> Option<&str> {
        match self {
            EquationEntry::Detailed(detail) => detail.solution.as_deref(),
            _ => None,
        }
    }

    pub fn steps(&self) -> &[String] {
        match self {
            EquationEntry::Detailed(detail) => &detail.steps,
            _ => &[],
        }
    }

    pub fn method(&self) -> Option<&str> {
        match self {
            EquationEntry::Detailed(detail) => detail.method.as_deref(),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CaseTriple {
    #[serde(rename = "mejor_caso")]
    pub best: Option<String>,
    #[serde(rename = "caso_promedio")]
    pub average: Option<String>,
    #[serde(rename = "peor_caso")]
    pub worst: Option<String>,
}

impl CaseTriple {
    pub fn get(&self, case: Case) -> Option<&str> {
        match case {
            Case::Best => self.best.as_deref(),
            Case::Average => self.average.as_deref(),
            Case::Worst => self.worst.as_deref(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResolutionDetail {
    #[serde(rename = "ecuacion", default)]
    pub formula: Option<String>,
    #[serde(rename = "metodo", default)]
    pub method: Option<String>,
    #[serde(rename = "pasos", default, deserialize_with = "null_as_default")]
    pub steps: Vec<String>,
    #[serde(rename = "explicacion", default)]
    pub explanation: Option<String>,
    #[serde(rename = "solucion", default)]
    pub solution: Option<String>,
    #[serde(rename = "diagrama_mermaid", default)]
    pub diagram: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Complexities {
    #[serde(rename = "complejidades", default, deserialize_with = "null_as_default")]
    pub classes: CaseTriple,
    #[serde(rename = "metodo_usado", default)]
    pub method: Option<String>,
    #[serde(rename = "ecuaciones", default, deserialize_with = "null_as_default")]
    pub equations: BTreeMap<String, String>,
    #[serde(rename = "pasos_resolucion", default, deserialize_with = "null_as_default")]
    pub resolution: BTreeMap<String, ResolutionDetail>,
    #[serde(rename = "derivacion_caso_promedio", alias = "derivacion_promedio", default)]
    pub average_derivation: Option<String>,
    #[serde(rename = "observacion", default)]
    pub observation: Option<String>,
}

impl Complexities {
    pub fn resolution_for(&self, case: Case) -> Option<&ResolutionDetail> {
        self.resolution.get(case.wire_key())
    }

    pub fn equation_for(&self, case: Case) -> Option<&str> {
        self.equations.get(case.wire_key()).map(String::as_str)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    #[serde(rename = "categoria", default)]
    pub category: String,
    #[serde(rename = "probabilidad", default)]
    pub probability: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Classification {
    #[serde(rename = "categoria_principal", default)]
    pub principal: String,
    #[serde(rename = "confianza", default)]
    pub confidence: f64,
    #[serde(rename = "top_predicciones", default, deserialize_with = "null_as_default")]
    pub predictions: Vec<Prediction>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Divergence {
    #[serde(rename = "caso")]
    pub case: String,
    #[serde(rename = "sistema")]
    pub system: String,
    pub llm: String,
    #[serde(rename = "tipo")]
    pub kind: String,
    #[serde(rename = "severidad")]
    pub severity: String,
}

/// Second-opinion check of the derived complexities.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LlmValidation {
    #[serde(rename = "concordancia", default)]
    pub agreement: bool,
    #[serde(rename = "confianza", default)]
    pub confidence: f64,
    #[serde(rename = "complejidades_sistema", default, deserialize_with = "null_as_default")]
    pub system: CaseTriple,
    #[serde(rename = "complejidades_llm", default, deserialize_with = "null_as_default")]
    pub llm: CaseTriple,
    #[serde(rename = "analisis_divergencias", default, deserialize_with = "null_as_default")]
    pub divergences: Vec<Divergence>,
    #[serde(rename = "recomendacion", default)]
    pub recommendation: Option<String>,
}

/// Everything a full analysis run returns. Any section may be missing,
/// depending on how far the pipeline got.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    #[serde(rename = "exito", default)]
    pub success: bool,
    #[serde(rename = "fase_actual", default)]
    pub current_phase: Option<String>,
    #[serde(rename = "pseudocodigo_original", default)]
    pub original_source: Option<String>,
    #[serde(rename = "pseudocodigo_validado", default)]
    pub validated_source: Option<String>,
    #[serde(rename = "validacion", default)]
    pub validation: Option<ValidationReport>,
    #[serde(rename = "validacion_inicial", default)]
    pub initial_validation: Option<ValidationReport>,
    #[serde(rename = "correccion", default)]
    pub correction: Option<Correction>,
    #[serde(rename = "costos_por_linea", default)]
    pub line_costs: Option<LineCosts>,
    #[serde(rename = "ecuaciones", default, deserialize_with = "null_as_default")]
    pub equations: BTreeMap<String, EquationEntry>,
    #[serde(rename = "complejidades", default)]
    pub complexities: Option<Complexities>,
    #[serde(rename = "clasificacion", default)]
    pub classification: Option<Classification>,
    #[serde(rename = "errores", default, deserialize_with = "null_as_default")]
    pub errors: Vec<String>,
    #[serde(rename = "validacion_complejidades", default)]
    pub llm_validation: Option<LlmValidation>,
    #[serde(default)]
    pub flowchart: Option<String>,
    #[serde(rename = "reporte_markdown", default)]
    pub markdown_report: Option<String>,
    #[serde(rename = "diagramas", default, deserialize_with = "null_as_default")]
    pub diagrams: BTreeMap<String, String>,
}

impl AnalysisResult {
    pub fn equation_for(&self, case: Case) -> Option<&EquationEntry> {
        self.equations.get(case.wire_key())
    }

    /// Algorithm name as reported by whichever section carries it.
    pub fn algorithm_name(&self) -> Option<&str> {
        self.line_costs
            .as_ref()
            .and_then(|costs| costs.algorithm.as_deref())
            .or_else(|| {
                self.validation
                    .as_ref()
                    .and_then(|validation| validation.algorithm_name.as_deref())
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_analysis_request_omits_unset_flags() {
        let body = serde_json::to_value(AnalysisRequest::new("x ← 1")).unwrap();
        assert_eq!(body, json!({ "entrada": "x ← 1" }));

        let body = serde_json::to_value(
            AnalysisRequest::new("x ← 1")
                .with_input_type(InputType::LenguajeNatural)
                .with_auto_correct(true),
        )
        .unwrap();
        assert_eq!(
            body,
            json!({ "entrada": "x ← 1", "tipo_entrada": "lenguaje_natural", "auto_corregir": true })
        );
    }

    #[test]
    fn test_null_sections_deserialize_as_absent() {
        let result: AnalysisResult = serde_json::from_value(json!({
            "exito": false,
            "fase_actual": "validacion_completada",
            "pseudocodigo_original": "begin end",
            "pseudocodigo_validado": null,
            "validacion": null,
            "costos_por_linea": null,
            "ecuaciones": null,
            "complejidades": null,
            "errores": ["Pseudocódigo inválido: 2 errores"]
        }))
        .unwrap();

        assert!(!result.success);
        assert_eq!(result.current_phase.as_deref(), Some("validacion_completada"));
        assert!(result.validation.is_none());
        assert!(result.equations.is_empty());
        assert!(result.complexities.is_none());
        assert_eq!(result.errors.len(), 1);
    }

    #[test]
    fn test_equation_entries_accept_both_shapes() {
        let result: AnalysisResult = serde_json::from_value(json!({
            "ecuaciones": {
                "mejor_caso": "T(n) = 1",
                "peor_caso": { "ecuacion": "T(n) = T(n-1) + 1", "solucion": "O(n)", "pasos": ["expandir", "sumar"] },
                "caso_promedio": null
            }
        }))
        .unwrap();

        assert_eq!(result.equation_for(Case::Best).and_then(|e| e.formula()), Some("T(n) = 1"));
        let worst = result.equation_for(Case::Worst).unwrap();
        assert_eq!(worst.solution(), Some("O(n)"));
        assert_eq!(worst.steps().len(), 2);
        assert_eq!(result.equation_for(Case::Average), Some(&EquationEntry::Empty));
    }

    #[test]
    fn test_line_cost_cells_accept_numbers_and_expressions() {
        let costs: LineCosts = serde_json::from_value(json!({
            "algorithm_name": "busquedaLineal",
            "scenarios": [{
                "id": "S_1",
                "condition": "A[0] = x",
                "state": "Éxito",
                "cost_T": "3",
                "probability_P": "1/n",
                "line_costs": [
                    { "line_number": 2, "code": "FOR i ← 0 TO n-1", "C_op": 1, "Freq": "n+1", "Total": "n+1" },
                    { "line": 3, "cost": 1.5, "frequency": "n" }
                ]
            }]
        }))
        .unwrap();

        let lines = &costs.scenarios[0].line_costs;
        assert_eq!(lines[0].operations, Some(Cell::Int(1)));
        assert_eq!(lines[0].frequency.as_ref().map(|c| c.to_string()).as_deref(), Some("n+1"));
        assert_eq!(lines[1].line_number, Some(3));
        assert_eq!(lines[1].operations, Some(Cell::Float(1.5)));
    }

    #[test]
    fn test_correction_edits_accept_records_and_notes() {
        let correction: Correction = serde_json::from_value(json!({
            "corregido": true,
            "cambios": [
                "Se agregó 'end' faltante",
                { "linea": 4, "antes": "for i <- 0 to n", "despues": "for i ← 0 to n do" }
            ]
        }))
        .unwrap();

        assert_eq!(correction.edits[0].to_string(), "Se agregó 'end' faltante");
        assert_eq!(
            correction.edits[1].to_string(),
            "Línea 4: for i <- 0 to n → for i ← 0 to n do"
        );
    }
}
