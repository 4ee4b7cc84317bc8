// src/ui/validator.rs
use eframe::egui;

use crate::api::InputType;
use crate::file::pick_text_file;
use crate::projection::validation::{self, ValidationView};
use crate::projection::{Projection, Tone};
use crate::state::AppState;
use crate::ui::widgets;
use crate::utils::{format_percentage, humanize};

pub fn show_validator_view(ui: &mut egui::Ui, state: &mut AppState) {
    ui.heading("Validador de pseudocódigo");
    ui.add_space(8.0);

    show_options(ui, state);
    ui.add_space(8.0);

    ui.horizontal(|ui| {
        if ui.button("📂 Cargar .txt").clicked() {
            if let Some(path) = pick_text_file() {
                state.validator.form.load_file(&path);
            }
        }
        if let Some(notice) = &state.validator.form.upload_notice {
            widgets::notice(ui, notice);
        }
    });
    ui.add_space(4.0);

    ui.add_sized(
        [ui.available_width(), 240.0],
        egui::TextEdit::multiline(&mut state.validator.form.source)
            .code_editor()
            .hint_text("Escribe tu pseudocódigo o descríbelo en lenguaje natural"),
    );
    ui.add_space(8.0);

    show_actions(ui, state);
    ui.add_space(12.0);
    ui.separator();

    egui::ScrollArea::vertical()
        .id_source("validator_scroll")
        .show(ui, |ui| show_layers(ui, state));
}

fn show_options(ui: &mut egui::Ui, state: &mut AppState) {
    let form = &mut state.validator.form;
    let input_types: Vec<(InputType, &str)> =
        InputType::ALL.iter().map(|t| (*t, t.label())).collect();

    egui::Grid::new("validator_options")
        .num_columns(2)
        .spacing([24.0, 6.0])
        .show(ui, |ui| {
            widgets::toggle_group(ui, "Tipo de entrada:", &mut form.input_type, &input_types);
            widgets::toggle_group(
                ui,
                "Auto-corrección:",
                &mut form.auto_correct,
                &[(true, "Sí"), (false, "No")],
            );
            ui.end_row();
            widgets::toggle_group(
                ui,
                "Con reporte:",
                &mut form.with_report,
                &[(true, "Sí"), (false, "No")],
            );
            widgets::toggle_group(
                ui,
                "Sugerencias:",
                &mut form.suggestions,
                &[(true, "Sí"), (false, "No")],
            );
            ui.end_row();
        });
}

fn show_actions(ui: &mut egui::Ui, state: &mut AppState) {
    let validating = state.validator.pending_validation.is_some();
    let loading = state.session.is_loading();

    ui.horizontal(|ui| {
        let validate_label = if validating { "VALIDANDO…" } else { "VALIDAR" };
        if ui
            .add_enabled(state.can_validate(), egui::Button::new(validate_label))
            .clicked()
        {
            state.start_validation();
        }

        let analyze_label = if loading { "ANALIZANDO…" } else { "ANALIZAR" };
        if ui
            .add_enabled(
                state.can_analyze(),
                egui::Button::new(egui::RichText::new(analyze_label).strong()),
            )
            .clicked()
        {
            state.start_analysis();
        }

        if loading || validating {
            ui.spinner();
        }
        if let Some(at) = state.session.completed_at() {
            ui.label(
                egui::RichText::new(format!("Último análisis: {}", at.format("%H:%M:%S"))).weak(),
            );
        }
    });
}

fn show_layers(ui: &mut egui::Ui, state: &mut AppState) {
    let (view, source) = match state.quick_validation() {
        Some(report) => (Some(validation::report_view(report)), "validación rápida"),
        None => {
            let snapshot = state.session.result();
            match validation::project(snapshot.as_deref()) {
                Projection::Ready(view) => (Some(view), "último análisis"),
                Projection::NoData => (None, ""),
            }
        }
    };

    ui.heading("Capas de validación");
    let layers = match &view {
        Some(view) => {
            ui.label(egui::RichText::new(format!("Según la {}", source)).small().weak());
            view.layers.clone()
        }
        None => validation::project_layers(None),
    };
    ui.add_space(6.0);

    let mut clicked = None;
    ui.horizontal_wrapped(|ui| {
        for layer in &layers {
            if widgets::status_indicator(ui, layer).clicked() {
                clicked = Some(layer.clone());
            }
            ui.add_space(12.0);
        }
    });
    if let Some(layer) = clicked {
        state.open_layer_errors(&layer);
    }

    match view {
        Some(view) => show_report_details(ui, &view),
        None => {
            ui.add_space(8.0);
            ui.label(
                egui::RichText::new(
                    "Pulsa VALIDAR para revisar las capas o ANALIZAR para el análisis completo.",
                )
                .weak(),
            );
        }
    }

    if let Some(result) = state.session.result() {
        if !result.errors.is_empty() {
            ui.add_space(8.0);
            widgets::card(ui, "Errores del análisis", |ui| {
                widgets::numbered_list(ui, &result.errors)
            });
        }
    }
}

fn show_report_details(ui: &mut egui::Ui, view: &ValidationView) {
    ui.add_space(8.0);
    ui.horizontal(|ui| {
        match view.valid {
            Some(true) => widgets::badge(ui, "Válido", Tone::Success),
            Some(false) => widgets::badge(ui, "Inválido", Tone::Danger),
            None => widgets::badge(ui, "Sin validación", Tone::Neutral),
        };
        if let Some(kind) = &view.algorithm_type {
            ui.label(format!("Tipo: {}", kind));
        }
    });

    if let Some(summary) = &view.summary {
        ui.add_space(6.0);
        egui::Grid::new("validation_summary")
            .num_columns(4)
            .spacing([24.0, 4.0])
            .show(ui, |ui| {
                ui.label(format!("Líneas: {}", summary.total_lines));
                ui.label(format!("Clases: {}", summary.classes_found));
                ui.label(format!("Subrutinas: {}", summary.subroutines_found));
                ui.label(format!("Errores: {}", summary.total_errors));
                ui.end_row();
            });
    }

    if let Some(classification) = &view.classification {
        ui.add_space(6.0);
        ui.horizontal(|ui| {
            ui.label("Clasificación preliminar:");
            ui.label(egui::RichText::new(humanize(&classification.principal)).strong());
            widgets::badge(
                ui,
                &format_percentage(classification.confidence),
                Tone::for_probability(classification.confidence),
            );
        });
    }

    if !view.suggestions.is_empty() {
        ui.add_space(6.0);
        widgets::card(ui, "Sugerencias", |ui| {
            widgets::numbered_list(ui, &view.suggestions)
        });
    }
}
