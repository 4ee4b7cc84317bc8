// src/projection/validation.rs
use crate::api::types::{AnalysisResult, Classification, LayerResult, ValidationReport, ValidationSummary};

use super::Projection;

/// The seven validation layers, in the order the service runs them.
pub const LAYERS: [(&str, &str); 7] = [
    ("1_LEXICA", "Léxica"),
    ("2_DECLARACIONES", "Declaraciones"),
    ("3_ESTRUCTURA", "Estructura"),
    ("4_EXPRESIONES", "Expresiones"),
    ("5_SENTENCIAS", "Sentencias"),
    ("6_SUBRUTINAS", "Subrutinas"),
    ("7_SEMANTICA", "Semántica"),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayerStatus {
    Valid,
    Invalid,
    /// The layer has not run (or did not report).
    Pending,
}

impl LayerStatus {
    pub fn label(&self) -> &'static str {
        match self {
            LayerStatus::Valid => "Válida",
            LayerStatus::Invalid => "Con errores",
            LayerStatus::Pending => "Pendiente",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LayerView {
    pub key: &'static str,
    pub label: &'static str,
    pub status: LayerStatus,
    pub errors: Vec<String>,
    pub details: Vec<String>,
}

impl LayerView {
    fn from_entry(key: &'static str, label: &'static str, entry: Option<&LayerResult>) -> Self {
        match entry {
            Some(layer) => Self {
                key,
                label,
                status: if layer.valid {
                    LayerStatus::Valid
                } else {
                    LayerStatus::Invalid
                },
                errors: layer.errors.clone(),
                details: layer.details.clone(),
            },
            None => Self {
                key,
                label,
                status: LayerStatus::Pending,
                errors: Vec::new(),
                details: Vec::new(),
            },
        }
    }

    /// Title and full error list for the layer-errors modal. Only failed
    /// layers open one.
    pub fn errors_dialog(&self) -> Option<(String, Vec<String>)> {
        (self.status == LayerStatus::Invalid).then(|| {
            (
                format!("Capa {}: errores", self.label),
                self.errors.clone(),
            )
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ValidationView {
    /// `None` when the result carries no validation section at all.
    pub valid: Option<bool>,
    pub algorithm_type: Option<String>,
    pub layers: Vec<LayerView>,
    pub summary: Option<ValidationSummary>,
    pub suggestions: Vec<String>,
    pub classification: Option<Classification>,
}

/// Always seven layers, in service order. Absent report or absent key gives
/// `Pending`, never `Invalid`.
pub fn project_layers(report: Option<&ValidationReport>) -> Vec<LayerView> {
    LAYERS
        .iter()
        .map(|&(key, label)| {
            LayerView::from_entry(key, label, report.and_then(|r| r.layers.get(key)))
        })
        .collect()
}

pub fn report_view(report: &ValidationReport) -> ValidationView {
    ValidationView {
        valid: Some(report.valid),
        algorithm_type: report.algorithm_type.clone(),
        layers: project_layers(Some(report)),
        summary: Some(report.summary.clone()),
        suggestions: report.suggestions.clone(),
        classification: report.classification.clone(),
    }
}

pub fn project(result: Option<&AnalysisResult>) -> Projection<ValidationView> {
    let Some(result) = result else {
        return Projection::NoData;
    };

    Projection::Ready(match result.validation.as_ref() {
        Some(report) => report_view(report),
        None => ValidationView {
            valid: None,
            algorithm_type: None,
            layers: project_layers(None),
            summary: None,
            suggestions: Vec::new(),
            classification: None,
        },
    })
}
