// src/ui/dialog.rs
use eframe::egui;

use crate::state::{AppState, DialogState};
use crate::ui::widgets;

pub fn show_dialog(ctx: &egui::Context, state: &mut AppState) {
    let mut close = false;

    match &state.current_dialog {
        DialogState::None => {}
        DialogState::LayerErrors { title, errors } => {
            egui::Window::new(title.as_str())
                .collapsible(false)
                .resizable(true)
                .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
                .show(ctx, |ui| {
                    egui::ScrollArea::vertical()
                        .max_height(320.0)
                        .show(ui, |ui| widgets::numbered_list(ui, errors));
                    ui.add_space(8.0);
                    if ui.button("Cerrar").clicked() {
                        close = true;
                    }
                });
        }
    }

    if close {
        state.current_dialog = DialogState::None;
    }
}
