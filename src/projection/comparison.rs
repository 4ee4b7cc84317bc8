// src/projection/comparison.rs
use crate::api::types::{AnalysisResult, Case, LlmValidation};
use crate::utils::{format_percentage, strip_notation};

use super::Tone;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Agreement {
    /// Identical strings.
    Same,
    /// Same growth once the notation symbol and spacing are ignored.
    Equivalent,
    Different,
}

impl Agreement {
    pub fn between(system: &str, llm: &str) -> Agreement {
        if system == llm {
            Agreement::Same
        } else if strip_notation(system) == strip_notation(llm) {
            Agreement::Equivalent
        } else {
            Agreement::Different
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Agreement::Same => "Igual",
            Agreement::Equivalent => "Equivalente",
            Agreement::Different => "Diferente",
        }
    }

    pub fn tone(&self) -> Tone {
        match self {
            Agreement::Same => Tone::Success,
            Agreement::Equivalent => Tone::Warning,
            Agreement::Different => Tone::Danger,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ComparisonRow {
    pub case: Case,
    pub system: String,
    pub llm: String,
    pub agreement: Agreement,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DivergenceRow {
    pub case: String,
    pub system: String,
    pub llm: String,
    pub kind: String,
    pub severity: String,
    pub tone: Tone,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ComparisonView {
    pub agrees: bool,
    pub confidence: String,
    pub confidence_tone: Tone,
    pub rows: Vec<ComparisonRow>,
    pub divergences: Vec<DivergenceRow>,
    pub recommendation: Option<String>,
}

fn severity_tone(severity: &str) -> Tone {
    match severity {
        "alta" => Tone::Danger,
        "media" => Tone::Warning,
        _ => Tone::Neutral,
    }
}

pub fn compare(validation: &LlmValidation) -> ComparisonView {
    let rows = Case::ALL
        .iter()
        .map(|&case| {
            let system = validation.system.get(case).unwrap_or("N/A").to_string();
            let llm = validation.llm.get(case).unwrap_or("N/A").to_string();
            ComparisonRow {
                case,
                agreement: Agreement::between(&system, &llm),
                system,
                llm,
            }
        })
        .collect();

    ComparisonView {
        agrees: validation.agreement,
        confidence: format_percentage(validation.confidence),
        confidence_tone: Tone::for_confidence(validation.confidence),
        rows,
        divergences: validation
            .divergences
            .iter()
            .map(|d| DivergenceRow {
                case: d.case.clone(),
                system: d.system.clone(),
                llm: d.llm.clone(),
                kind: d.kind.replace('_', " "),
                severity: d.severity.clone(),
                tone: severity_tone(&d.severity),
            })
            .collect(),
        recommendation: validation.recommendation.clone(),
    }
}

/// `None` when the run had no second-opinion check.
pub fn project(result: &AnalysisResult) -> Option<ComparisonView> {
    result.llm_validation.as_ref().map(compare)
}
