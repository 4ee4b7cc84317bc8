// src/ui/costs.rs
use eframe::egui;

use crate::projection::costs::{self, Breakdown, ScenarioRow};
use crate::projection::{Projection, Tone};
use crate::state::AppState;
use crate::ui::widgets;

pub fn show_costs_view(ui: &mut egui::Ui, state: &mut AppState) {
    let snapshot = state.session.result();
    let view = match costs::project(snapshot.as_deref()) {
        Projection::NoData => {
            widgets::guidance(ui);
            return;
        }
        Projection::Ready(view) => view,
    };

    ui.heading("Costos por línea");
    if let Some(algorithm) = &view.algorithm {
        ui.label(format!("Algoritmo: {}", algorithm));
    }
    ui.add_space(8.0);

    if view.rows.is_empty() {
        ui.label(
            egui::RichText::new("El análisis no produjo escenarios de costo para este algoritmo.")
                .weak(),
        );
        return;
    }

    let expanded = &mut state.costs.expanded;
    egui::ScrollArea::vertical()
        .id_source("costs_scroll")
        .show(ui, |ui| {
            egui::Grid::new("scenario_table")
                .num_columns(5)
                .striped(true)
                .spacing([16.0, 6.0])
                .show(ui, |ui| {
                    ui.label("");
                    ui.strong("Escenario");
                    ui.strong("Condición / estado");
                    ui.strong("Costo T");
                    ui.strong("Probabilidad P");
                    ui.end_row();

                    for row in &view.rows {
                        let is_open = expanded.contains(&row.id);
                        let arrow = if is_open { "▼" } else { "▶" };
                        if ui.selectable_label(is_open, arrow).clicked() {
                            if is_open {
                                expanded.remove(&row.id);
                            } else {
                                expanded.insert(row.id.clone());
                            }
                        }
                        ui.monospace(&row.id);
                        ui.label(&row.description);
                        ui.monospace(&row.cost);
                        ui.monospace(&row.probability);
                        ui.end_row();

                        if is_open {
                            ui.label("");
                            ui.scope(|ui| show_line_breakdown(ui, row));
                            ui.end_row();
                        }
                    }
                });
        });
}

fn show_line_breakdown(ui: &mut egui::Ui, row: &ScenarioRow) {
    ui.vertical(|ui| {
        if row.breakdown == Breakdown::Placeholder {
            widgets::badge(ui, "Sin desglose", Tone::Neutral);
        }
        egui::Grid::new(format!("lines_{}", row.id))
            .num_columns(5)
            .spacing([12.0, 2.0])
            .show(ui, |ui| {
                ui.strong("Línea");
                ui.strong("Código");
                ui.strong("C_op");
                ui.strong("Freq");
                ui.strong("Total");
                ui.end_row();

                for line in &row.lines {
                    ui.label(&line.line);
                    if row.breakdown == Breakdown::Placeholder {
                        ui.label(egui::RichText::new(&line.code).italics().weak());
                    } else {
                        ui.monospace(&line.code);
                    }
                    ui.monospace(&line.operations);
                    ui.monospace(&line.frequency);
                    ui.monospace(&line.total);
                    ui.end_row();
                }
            });
    });
}
