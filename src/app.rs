// src/app.rs
use std::sync::Arc;
use std::time::Duration;

use anyhow::anyhow;
use eframe::egui;
use tracing::warn;

use crate::file::{self, ExportKind};
use crate::projection::costs;
use crate::state::{AppState, Screen};
use crate::ui;

pub struct AnalyzerApp {
    state: AppState,
}

impl AnalyzerApp {
    pub fn new(cc: &eframe::CreationContext<'_>, mut state: AppState) -> Self {
        let ctx = cc.egui_ctx.clone();
        state
            .dispatcher
            .set_waker(Arc::new(move || ctx.request_repaint()));
        Self { state }
    }

    fn show_menu(&mut self, ui: &mut egui::Ui) {
        egui::menu::bar(ui, |ui| {
            ui.menu_button("Archivo", |ui| {
                if ui.button("Nuevo análisis").clicked() {
                    self.state.reset();
                    ui.close_menu();
                }
                ui.separator();

                let has_result = self.state.session.has_result();
                if ui
                    .add_enabled(has_result, egui::Button::new("Exportar resultado (JSON)…"))
                    .clicked()
                {
                    self.export(ExportKind::Json);
                    ui.close_menu();
                }
                if ui
                    .add_enabled(has_result, egui::Button::new("Exportar costos (CSV)…"))
                    .clicked()
                {
                    self.export(ExportKind::CostTable);
                    ui.close_menu();
                }
                let has_report = self
                    .state
                    .session
                    .result()
                    .is_some_and(|r| r.markdown_report.is_some());
                if ui
                    .add_enabled(has_report, egui::Button::new("Exportar reporte (Markdown)…"))
                    .clicked()
                {
                    self.export(ExportKind::Markdown);
                    ui.close_menu();
                }
            });

            ui.separator();

            for screen in Screen::ALL {
                if ui
                    .selectable_label(self.state.current_screen == screen, screen.label())
                    .clicked()
                {
                    self.state.navigate(screen);
                }
            }

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                ui.label(
                    egui::RichText::new(self.state.dispatcher.client().base_url())
                        .small()
                        .weak(),
                );
                if self.state.session.is_loading() {
                    ui.spinner();
                }
            });
        });
    }

    fn export(&mut self, kind: ExportKind) {
        let Some(result) = self.state.session.result() else {
            return;
        };
        let Some(path) = file::pick_save_path(kind, result.algorithm_name()) else {
            return;
        };

        let outcome = match kind {
            ExportKind::Json => file::export_json(&result, &path),
            ExportKind::CostTable => match costs::project(Some(&*result)).ready() {
                Some(view) => file::export_cost_table(view, &path),
                None => Err(anyhow!("No hay resultado que exportar")),
            },
            ExportKind::Markdown => file::export_markdown(&result, &path),
        };

        if let Err(e) = outcome {
            warn!(error = %e, ?kind, "export failed");
            self.state.error_message = Some(format!("Error al exportar: {:#}", e));
        }
    }
}

impl eframe::App for AnalyzerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.state.pump();
        self.state.validator.form.expire_notices();

        if let Some(notice) = &self.state.validator.form.upload_notice {
            ctx.request_repaint_after(notice.remaining());
        }
        if self.state.session.is_loading() || self.state.validator.pending_validation.is_some() {
            ctx.request_repaint_after(Duration::from_millis(250));
        }

        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            self.show_menu(ui);
        });

        egui::CentralPanel::default().show(ctx, |ui| match self.state.current_screen {
            Screen::Validator => ui::validator::show_validator_view(ui, &mut self.state),
            Screen::Costs => ui::costs::show_costs_view(ui, &mut self.state),
            Screen::Bounds => ui::bounds::show_bounds_view(ui, &mut self.state),
            Screen::Results => ui::results::show_results_view(ui, &mut self.state),
        });

        // Show error modal if needed
        let error_msg = self.state.error_message.clone();
        if let Some(error) = error_msg {
            egui::Window::new("Error")
                .collapsible(false)
                .resizable(false)
                .show(ctx, |ui| {
                    ui.label(&error);
                    if ui.button("OK").clicked() {
                        self.state.error_message = None;
                    }
                });
        }

        ui::dialog::show_dialog(ctx, &mut self.state);
    }
}
