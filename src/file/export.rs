// src/file/export.rs
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use chrono::Local;
use csv::Writer;
use rfd::FileDialog;
use tracing::info;

use crate::api::AnalysisResult;
use crate::projection::costs::CostTableView;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportKind {
    Json,
    CostTable,
    Markdown,
}

impl ExportKind {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportKind::Json => "json",
            ExportKind::CostTable => "csv",
            ExportKind::Markdown => "md",
        }
    }

    fn filter_name(&self) -> &'static str {
        match self {
            ExportKind::Json => "JSON",
            ExportKind::CostTable => "CSV",
            ExportKind::Markdown => "Markdown",
        }
    }

    fn stem(&self) -> &'static str {
        match self {
            ExportKind::Json => "analisis",
            ExportKind::CostTable => "costos",
            ExportKind::Markdown => "reporte",
        }
    }
}

/// `costos_busquedaLineal_20240101_120000.csv`
pub fn default_file_name(kind: ExportKind, algorithm: Option<&str>) -> String {
    let timestamp = Local::now().format("%Y%m%d_%H%M%S");
    let algorithm: String = algorithm
        .unwrap_or("algoritmo")
        .chars()
        .map(|c| if c.is_alphanumeric() || c == '_' || c == '-' { c } else { '_' })
        .collect();
    format!("{}_{}_{}.{}", kind.stem(), algorithm, timestamp, kind.extension())
}

pub fn pick_save_path(kind: ExportKind, algorithm: Option<&str>) -> Option<PathBuf> {
    FileDialog::new()
        .add_filter(kind.filter_name(), &[kind.extension()])
        .set_file_name(default_file_name(kind, algorithm))
        .set_title("Exportar")
        .save_file()
}

pub fn export_json(result: &AnalysisResult, path: &Path) -> Result<()> {
    let content = serde_json::to_string_pretty(result).context("Failed to serialize result")?;
    fs::write(path, content)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    info!(path = %path.display(), "exported result as JSON");
    Ok(())
}

/// One CSV row per line of each scenario; placeholder rows are kept so that
/// every scenario appears in the file.
pub fn export_cost_table(view: &CostTableView, path: &Path) -> Result<()> {
    if view.rows.is_empty() {
        return Err(anyhow!("No hay costos por línea para exportar"));
    }

    let mut writer = Writer::from_path(path)
        .with_context(|| format!("Failed to create {}", path.display()))?;
    writer.write_record([
        "escenario",
        "descripcion",
        "costo",
        "probabilidad",
        "linea",
        "codigo",
        "c_op",
        "frecuencia",
        "total",
    ])?;

    for row in &view.rows {
        for line in &row.lines {
            writer.write_record([
                row.id.as_str(),
                row.description.as_str(),
                row.cost.as_str(),
                row.probability.as_str(),
                line.line.as_str(),
                line.code.as_str(),
                line.operations.as_str(),
                line.frequency.as_str(),
                line.total.as_str(),
            ])?;
        }
    }

    writer.flush()?;
    info!(path = %path.display(), scenarios = view.rows.len(), "exported cost table");
    Ok(())
}

pub fn export_markdown(result: &AnalysisResult, path: &Path) -> Result<()> {
    let report = result
        .markdown_report
        .as_deref()
        .ok_or_else(|| anyhow!("El análisis no incluye reporte; activa \"con reporte\" y vuelve a analizar"))?;
    fs::write(path, report).with_context(|| format!("Failed to write {}", path.display()))?;
    info!(path = %path.display(), "exported markdown report");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::mock;
    use crate::projection::costs;

    fn linear_search() -> AnalysisResult {
        serde_json::from_value(mock::linear_search_result()).unwrap()
    }

    #[test]
    fn test_json_export_round_trips_wire_names() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("analisis.json");

        export_json(&linear_search(), &path).unwrap();

        let written: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(written["complejidades"]["complejidades"]["peor_caso"], "O(n)");
        assert_eq!(written["exito"], true);
    }

    #[test]
    fn test_cost_table_export_has_a_row_per_line() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("costos.csv");
        let result = linear_search();
        let view = costs::project(Some(&result));

        export_cost_table(view.ready().unwrap(), &path).unwrap();

        let mut reader = csv::Reader::from_path(&path).unwrap();
        let records: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
        // two real lines for S_best, one placeholder for S_fail
        assert_eq!(records.len(), 3);
        assert_eq!(&records[0][0], "S_best");
        assert_eq!(&records[0][5], "n ← length(A)");
        assert_eq!(&records[2][0], "S_fail");
        assert_eq!(&records[2][5], costs::PLACEHOLDER_CODE);
    }

    #[test]
    fn test_empty_cost_table_is_refused() {
        let dir = tempfile::tempdir().unwrap();
        let result = AnalysisResult::default();
        let view = costs::project(Some(&result));

        assert!(export_cost_table(view.ready().unwrap(), &dir.path().join("x.csv")).is_err());
    }

    #[test]
    fn test_markdown_requires_report() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("reporte.md");

        assert!(export_markdown(&linear_search(), &path).is_err());
        assert!(!path.exists());

        let mut result = linear_search();
        result.markdown_report = Some("# Reporte".to_string());
        export_markdown(&result, &path).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "# Reporte");
    }

    #[test]
    fn test_default_file_name() {
        let name = default_file_name(ExportKind::CostTable, Some("busqueda lineal"));
        assert!(name.starts_with("costos_busqueda_lineal_"));
        assert!(name.ends_with(".csv"));
        assert!(default_file_name(ExportKind::Json, None).starts_with("analisis_algoritmo_"));
    }
}
