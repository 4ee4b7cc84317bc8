// src/ui/bounds.rs
use eframe::egui;

use crate::projection::bounds::{self, BoundKind, BoundRow};
use crate::projection::{Projection, Tone};
use crate::state::AppState;
use crate::ui::widgets;

fn kind_tone(kind: BoundKind) -> Tone {
    match kind {
        BoundKind::Lower => Tone::Success,
        BoundKind::Tight => Tone::Warning,
        BoundKind::Upper => Tone::Danger,
    }
}

pub fn show_bounds_view(ui: &mut egui::Ui, state: &mut AppState) {
    let snapshot = state.session.result();
    let view = match bounds::project(snapshot.as_deref()) {
        Projection::NoData => {
            widgets::guidance(ui);
            return;
        }
        Projection::Ready(view) => view,
    };

    ui.heading("Cotas asintóticas");
    if let Some(method) = &view.method {
        ui.label(format!("Método: {}", method));
    }
    ui.add_space(8.0);

    egui::ScrollArea::vertical()
        .id_source("bounds_scroll")
        .show(ui, |ui| {
            for (index, row) in view.rows.iter().enumerate() {
                let open = &mut state.bounds.expanded[index];
                show_bound_row(ui, row, open);
                ui.add_space(6.0);
            }

            if let Some(observation) = &view.observation {
                ui.add_space(6.0);
                widgets::card(ui, "Observación", |ui| ui.label(observation));
            }
        });
}

fn show_bound_row(ui: &mut egui::Ui, row: &BoundRow, open: &mut bool) {
    egui::Frame::group(ui.style()).show(ui, |ui| {
        ui.set_width(ui.available_width());
        ui.horizontal(|ui| {
            if ui.selectable_label(*open, if *open { "▼" } else { "▶" }).clicked() {
                *open = !*open;
            }
            widgets::badge(ui, row.kind.symbol(), kind_tone(row.kind));
            ui.strong(row.kind.label());
            ui.label(row.case.label());
            ui.separator();
            ui.monospace(&row.class);
        });

        if *open {
            ui.add_space(6.0);
            widgets::field(ui, "Análisis", &row.analysis);
            ui.label(egui::RichText::new("Definición").small().weak());
            widgets::code(ui, &row.template);
            ui.add_space(4.0);
            if let Some(equation) = &row.equation {
                ui.label(egui::RichText::new("Ecuación del sistema").small().weak());
                widgets::code(ui, equation);
                ui.add_space(4.0);
            }
            if !row.steps.is_empty() {
                ui.label(egui::RichText::new("Pasos").small().weak());
                widgets::numbered_list(ui, &row.steps);
            }
        }
    });
}
