// src/ui/results.rs
use eframe::egui;
use egui_plot::{Bar, BarChart, Plot};

use crate::api::Case;
use crate::projection::comparison::ComparisonView;
use crate::projection::dashboard::{
    self, ClassificationSummary, ComplexitySlot, CorrectionView, DashboardView, RecurrenceCard,
};
use crate::projection::{Projection, Tone};
use crate::state::{AppState, ResultsPage};
use crate::ui::widgets;
use crate::utils::format_percentage;

fn case_tone(case: Case) -> Tone {
    match case {
        Case::Best => Tone::Success,
        Case::Average => Tone::Warning,
        Case::Worst => Tone::Danger,
    }
}

pub fn show_results_view(ui: &mut egui::Ui, state: &mut AppState) {
    let snapshot = state.session.result();
    let view = match dashboard::project(snapshot.as_deref()) {
        Projection::NoData => {
            widgets::guidance(ui);
            return;
        }
        Projection::Ready(view) => view,
    };
    let completed_at = state.session.completed_at();
    let page = &mut state.results;

    ui.heading("Analizador de complejidad de un algoritmo");
    ui.horizontal(|ui| {
        if view.success {
            widgets::badge(ui, "Éxito", Tone::Success);
        } else {
            widgets::badge(ui, "Análisis incompleto", Tone::Warning);
        }
        if let Some(phase) = &view.phase {
            ui.label(format!("Fase: {}", phase));
        }
        if let Some(at) = completed_at {
            ui.label(egui::RichText::new(format!("Último análisis: {}", at.format("%Y-%m-%d %H:%M:%S"))).weak());
        }
    });
    ui.add_space(8.0);

    egui::ScrollArea::vertical()
        .id_source("results_scroll")
        .show(ui, |ui| {
            ui.columns(2, |columns| {
                show_sidebar(&mut columns[0], &view);
                show_solution(&mut columns[1], &view, page);
            });
        });
}

fn show_sidebar(ui: &mut egui::Ui, view: &DashboardView) {
    widgets::card(ui, "Clasificación del algoritmo", |ui| match &view.classification {
        Some(summary) => show_classification(ui, summary),
        None => {
            ui.label(egui::RichText::new("El servicio no clasificó este algoritmo.").weak());
        }
    });
    ui.add_space(8.0);

    if view.recurrences.is_empty() {
        widgets::card(ui, "Resolver T(n)", |ui| {
            ui.label(egui::RichText::new("No hay ecuaciones de recurrencia para mostrar.").weak());
        });
    }
    for card in &view.recurrences {
        show_recurrence(ui, card);
        ui.add_space(8.0);
    }
}

fn show_classification(ui: &mut egui::Ui, summary: &ClassificationSummary) {
    widgets::field(ui, "Categoría", &summary.principal);
    if let Some(alternative) = &summary.alternative {
        widgets::field(ui, "Alternativa", alternative);
    }
    ui.label(egui::RichText::new("Confianza").small().weak());
    widgets::badge(ui, &summary.confidence, summary.tone);

    if summary.predictions.is_empty() {
        return;
    }
    ui.add_space(8.0);

    let bars: Vec<Bar> = summary
        .predictions
        .iter()
        .map(|prediction| {
            Bar::new(prediction.rank as f64, prediction.probability)
                .name(&prediction.category)
                .width(0.6)
                .fill(widgets::tone_color(prediction.tone))
        })
        .collect();

    Plot::new("classification_chart")
        .height(140.0)
        .allow_zoom(false)
        .allow_drag(false)
        .allow_scroll(false)
        .show_background(false)
        .show_axes([false, true])
        .include_y(0.0)
        .include_y(1.0)
        .show(ui, |plot_ui| plot_ui.bar_chart(BarChart::new(bars)));

    for prediction in &summary.predictions {
        ui.horizontal(|ui| {
            ui.label(format!("#{} {}", prediction.rank, prediction.category));
            ui.label(
                egui::RichText::new(format_percentage(prediction.probability))
                    .color(widgets::tone_color(prediction.tone)),
            );
        });
    }
}

fn show_recurrence(ui: &mut egui::Ui, card: &RecurrenceCard) {
    widgets::card(ui, &format!("Resolver T(n): {}", card.case.label()), |ui| {
        ui.label(egui::RichText::new("Fórmula").small().weak());
        widgets::code(ui, &card.formula);
        if let Some(solution) = &card.solution {
            ui.label(egui::RichText::new("Resultado").small().weak());
            ui.label(
                egui::RichText::new(solution)
                    .monospace()
                    .strong()
                    .color(widgets::tone_color(Tone::Success)),
            );
        }
        if let Some(method) = &card.method {
            widgets::field(ui, "Método", method);
        }
        if !card.steps.is_empty() {
            ui.label(egui::RichText::new("Pasos").small().weak());
            widgets::numbered_list(ui, &card.steps);
        }
    });
}

fn show_slot(ui: &mut egui::Ui, slot: &ComplexitySlot) {
    let tone = case_tone(slot.case);
    egui::Frame::group(ui.style())
        .stroke(egui::Stroke::new(2.0, widgets::tone_color(tone)))
        .show(ui, |ui| {
            ui.vertical_centered(|ui| {
                ui.label(egui::RichText::new(slot.case.label()).small());
                ui.label(
                    egui::RichText::new(slot.class.as_deref().unwrap_or("—"))
                        .monospace()
                        .size(18.0)
                        .strong()
                        .color(widgets::tone_color(tone)),
                );
            });
        });
}

fn show_solution(ui: &mut egui::Ui, view: &DashboardView, page: &mut ResultsPage) {
    widgets::card(ui, "Solución", |ui| {
        widgets::field(ui, "Algoritmo", view.algorithm.as_deref().unwrap_or("Sin nombre"));
        if let Some(kind) = &view.algorithm_type {
            widgets::field(ui, "Tipo", kind);
        }

        ui.label(egui::RichText::new("Complejidad temporal").small().weak());
        ui.columns(view.slots.len().max(1), |columns| {
            for (column, slot) in columns.iter_mut().zip(&view.slots) {
                show_slot(column, slot);
            }
        });

        if let Some(observation) = &view.observation {
            ui.add_space(6.0);
            widgets::field(ui, "Observación", observation);
        }
    });

    if let Some(correction) = &view.correction {
        ui.add_space(8.0);
        show_correction(ui, correction, &mut page.show_corrected_source);
    }

    if let Some(comparison) = &view.comparison {
        ui.add_space(8.0);
        show_comparison(ui, comparison, &mut page.show_divergences);
    }

    if !view.errors.is_empty() {
        ui.add_space(8.0);
        widgets::card(ui, "Errores", |ui| widgets::numbered_list(ui, &view.errors));
    }

    if view.has_report {
        ui.add_space(8.0);
        ui.label(
            egui::RichText::new("Reporte en markdown disponible en Archivo → Exportar reporte.")
                .weak(),
        );
    }
}

fn show_correction(ui: &mut egui::Ui, correction: &CorrectionView, show_source: &mut bool) {
    widgets::card(ui, "Pseudocódigo corregido automáticamente", |ui| {
        if let Some(count) = correction.error_count {
            ui.horizontal(|ui| {
                widgets::badge(ui, &format!("{} error(es) corregidos", count), Tone::Warning);
            });
        }
        if let Some(explanation) = &correction.explanation {
            ui.label(explanation);
        }
        if !correction.edits.is_empty() {
            ui.add_space(4.0);
            widgets::numbered_list(ui, &correction.edits);
        }
        if let Some(source) = &correction.corrected_source {
            ui.add_space(4.0);
            ui.checkbox(show_source, "Ver pseudocódigo corregido");
            if *show_source {
                widgets::code(ui, source);
            }
        }
    });
}

fn show_comparison(ui: &mut egui::Ui, comparison: &ComparisonView, show_divergences: &mut bool) {
    widgets::card(ui, "Validación de complejidades", |ui| {
        ui.horizontal(|ui| {
            if comparison.agrees {
                widgets::badge(ui, "Concordancia", Tone::Success);
            } else {
                widgets::badge(ui, "Divergencia", Tone::Danger);
            }
            ui.label("Confianza:");
            widgets::badge(ui, &comparison.confidence, comparison.confidence_tone);
        });
        ui.add_space(6.0);

        egui::Grid::new("comparison_table")
            .num_columns(4)
            .striped(true)
            .spacing([16.0, 4.0])
            .show(ui, |ui| {
                ui.strong("Caso");
                ui.strong("Sistema");
                ui.strong("LLM");
                ui.strong("Estado");
                ui.end_row();
                for row in &comparison.rows {
                    ui.label(row.case.label());
                    ui.monospace(&row.system);
                    ui.monospace(&row.llm);
                    widgets::badge(ui, row.agreement.label(), row.agreement.tone());
                    ui.end_row();
                }
            });

        if !comparison.divergences.is_empty() {
            ui.add_space(6.0);
            ui.checkbox(
                show_divergences,
                format!("Ver divergencias ({})", comparison.divergences.len()),
            );
            if *show_divergences {
                for divergence in &comparison.divergences {
                    ui.horizontal_wrapped(|ui| {
                        widgets::badge(ui, &divergence.severity, divergence.tone);
                        ui.label(format!(
                            "{}: sistema {} / LLM {} ({})",
                            divergence.case, divergence.system, divergence.llm, divergence.kind
                        ));
                    });
                }
            }
        }

        if let Some(recommendation) = &comparison.recommendation {
            ui.add_space(6.0);
            widgets::field(ui, "Recomendación", recommendation);
        }
    });
}
