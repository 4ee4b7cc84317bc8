// src/ui/widgets.rs
use eframe::egui;

use crate::projection::validation::{LayerStatus, LayerView};
use crate::projection::{Tone, NO_DATA_MESSAGE};
use crate::state::notice::{Notice, NoticeLevel};

pub fn tone_color(tone: Tone) -> egui::Color32 {
    match tone {
        Tone::Success => egui::Color32::from_rgb(46, 160, 67),
        Tone::Warning => egui::Color32::from_rgb(210, 153, 34),
        Tone::Danger => egui::Color32::from_rgb(207, 34, 46),
        Tone::Neutral => egui::Color32::from_rgb(110, 118, 129),
    }
}

pub fn badge(ui: &mut egui::Ui, text: &str, tone: Tone) -> egui::Response {
    ui.label(
        egui::RichText::new(format!(" {} ", text))
            .color(egui::Color32::WHITE)
            .background_color(tone_color(tone))
            .strong(),
    )
}

/// Clickable layer indicator. Only failed layers react to clicks.
pub fn status_indicator(ui: &mut egui::Ui, layer: &LayerView) -> egui::Response {
    let (icon, tone) = match layer.status {
        LayerStatus::Valid => ("✔", Tone::Success),
        LayerStatus::Invalid => ("✖", Tone::Danger),
        LayerStatus::Pending => ("○", Tone::Neutral),
    };

    let text = egui::RichText::new(format!("{} {}", icon, layer.label)).color(tone_color(tone));
    let sense = if layer.status == LayerStatus::Invalid {
        egui::Sense::click()
    } else {
        egui::Sense::hover()
    };

    let response = ui.add(egui::Label::new(text).sense(sense));
    let hover = match layer.status {
        LayerStatus::Invalid => format!(
            "{}: {} error(es). Clic para ver el detalle.",
            layer.status.label(),
            layer.errors.len()
        ),
        _ if layer.details.is_empty() => layer.status.label().to_string(),
        _ => format!("{}\n{}", layer.status.label(), layer.details.join("\n")),
    };
    response.on_hover_text(hover)
}

pub fn toggle_group<T: PartialEq + Copy>(
    ui: &mut egui::Ui,
    label: &str,
    value: &mut T,
    options: &[(T, &str)],
) {
    ui.horizontal(|ui| {
        ui.label(label);
        for (option, text) in options {
            ui.selectable_value(value, *option, *text);
        }
    });
}

pub fn card<R>(
    ui: &mut egui::Ui,
    title: &str,
    add_contents: impl FnOnce(&mut egui::Ui) -> R,
) -> R {
    egui::Frame::group(ui.style())
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.heading(title);
            ui.add_space(6.0);
            add_contents(ui)
        })
        .inner
}

/// Small caption followed by a value, the way the dashboard lists fields.
pub fn field(ui: &mut egui::Ui, caption: &str, value: &str) {
    ui.label(egui::RichText::new(caption).small().weak());
    ui.label(value);
    ui.add_space(4.0);
}

pub fn code(ui: &mut egui::Ui, text: &str) {
    ui.label(egui::RichText::new(text).monospace());
}

pub fn guidance(ui: &mut egui::Ui) {
    ui.centered_and_justified(|ui| {
        ui.label(egui::RichText::new(NO_DATA_MESSAGE).size(16.0).weak());
    });
}

pub fn notice(ui: &mut egui::Ui, notice: &Notice) {
    let tone = match notice.level {
        NoticeLevel::Info => Tone::Success,
        NoticeLevel::Error => Tone::Danger,
    };
    ui.label(egui::RichText::new(&notice.text).color(tone_color(tone)));
}

pub fn numbered_list(ui: &mut egui::Ui, items: &[String]) {
    for (index, item) in items.iter().enumerate() {
        ui.horizontal_wrapped(|ui| {
            ui.label(egui::RichText::new(format!("{}.", index + 1)).strong());
            ui.label(item);
        });
    }
}
