// src/main.rs
use anyhow::{Context, Result};
use eframe::egui;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod api;
mod app;
mod config;
mod file;
mod projection;
mod state;
mod ui;
mod utils;

use crate::api::ApiClient;
use crate::app::AnalyzerApp;
use crate::config::Settings;
use crate::state::AppState;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let settings = Settings::load()?;
    info!(api = %settings.api_base_url, "starting");

    let state = AppState::new(ApiClient::new(settings.api_base_url.clone()))
        .context("Failed to start the request runtime")?;

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([settings.window_width as f32, settings.window_height as f32])
            .with_title("Analizador de Complejidad"),
        ..Default::default()
    };

    eframe::run_native(
        "Analizador de Complejidad",
        options,
        Box::new(move |cc| Box::new(AnalyzerApp::new(cc, state))),
    )
    .map_err(|e| anyhow::anyhow!("Failed to run application: {}", e))
}
