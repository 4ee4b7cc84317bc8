// src/projection/costs.rs
use crate::api::types::{AnalysisResult, Scenario};

use super::Projection;

pub const PLACEHOLDER_CODE: &str = "Sin desglose línea por línea para este escenario";

/// Whether a row's line list came from the service or was filled in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Breakdown {
    Real,
    Placeholder,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LineRow {
    pub line: String,
    pub code: String,
    pub operations: String,
    pub frequency: String,
    pub total: String,
}

impl LineRow {
    fn placeholder() -> Self {
        Self {
            line: "-".to_string(),
            code: PLACEHOLDER_CODE.to_string(),
            operations: "-".to_string(),
            frequency: "-".to_string(),
            total: "-".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScenarioRow {
    pub id: String,
    pub description: String,
    pub cost: String,
    pub probability: String,
    pub lines: Vec<LineRow>,
    pub breakdown: Breakdown,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CostTableView {
    pub algorithm: Option<String>,
    pub rows: Vec<ScenarioRow>,
}

fn cell_text(cell: Option<&crate::api::types::Cell>) -> String {
    cell.map(|c| c.to_string()).unwrap_or_else(|| "-".to_string())
}

fn describe(scenario: &Scenario) -> String {
    match (scenario.condition.as_deref(), scenario.state.as_deref()) {
        (Some(condition), Some(state)) => format!("{} ({})", condition, state),
        (Some(text), None) | (None, Some(text)) => text.to_string(),
        (None, None) => "Sin descripción".to_string(),
    }
}

fn project_scenario(scenario: &Scenario) -> ScenarioRow {
    let (lines, breakdown) = if scenario.line_costs.is_empty() {
        (vec![LineRow::placeholder()], Breakdown::Placeholder)
    } else {
        let lines = scenario
            .line_costs
            .iter()
            .map(|cost| LineRow {
                line: cost
                    .line_number
                    .map(|n| n.to_string())
                    .unwrap_or_else(|| "-".to_string()),
                code: cost.code.clone(),
                operations: cell_text(cost.operations.as_ref()),
                frequency: cell_text(cost.frequency.as_ref()),
                total: cell_text(cost.total.as_ref()),
            })
            .collect();
        (lines, Breakdown::Real)
    };

    ScenarioRow {
        id: scenario.id.clone(),
        description: describe(scenario),
        cost: cell_text(scenario.cost.as_ref()),
        probability: cell_text(scenario.probability.as_ref()),
        lines,
        breakdown,
    }
}

pub fn project(result: Option<&AnalysisResult>) -> Projection<CostTableView> {
    let Some(result) = result else {
        return Projection::NoData;
    };

    let rows = result
        .line_costs
        .as_ref()
        .map(|costs| costs.scenarios.iter().map(project_scenario).collect())
        .unwrap_or_default();

    Projection::Ready(CostTableView {
        algorithm: result.algorithm_name().map(str::to_string),
        rows,
    })
}
