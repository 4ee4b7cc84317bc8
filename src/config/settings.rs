// src/config/settings.rs
use anyhow::{anyhow, Context, Result};
use config::{Config, File};
use serde::Deserialize;
use std::path::{Path, PathBuf};

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8000";
pub const API_URL_ENV: &str = "ANALYZER_API_URL";

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Settings {
    pub api_base_url: String,
    pub window_width: f64,
    pub window_height: f64,
}

impl Settings {
    /// Defaults, then `config.toml` from the user config directory, then the
    /// `ANALYZER_API_URL` environment variable.
    pub fn load() -> Result<Self> {
        let api_url = std::env::var(API_URL_ENV)
            .ok()
            .filter(|value| !value.trim().is_empty());
        Self::load_from(config_file_path().as_deref(), api_url)
    }

    pub fn load_from(file: Option<&Path>, api_url_override: Option<String>) -> Result<Self> {
        let mut builder = Config::builder()
            .set_default("api_base_url", DEFAULT_API_BASE_URL)?
            .set_default("window_width", 1280.0)?
            .set_default("window_height", 860.0)?;

        if let Some(path) = file {
            builder = builder.add_source(File::from(path).required(false));
        }

        let mut settings: Settings = builder
            .set_override_option("api_base_url", api_url_override)?
            .build()
            .context("Failed to read settings")?
            .try_deserialize()
            .context("Invalid settings")?;

        settings.api_base_url = normalize_base_url(&settings.api_base_url)?;
        Ok(settings)
    }
}

pub fn config_file_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("complexity-analyzer").join("config.toml"))
}

fn normalize_base_url(raw: &str) -> Result<String> {
    let trimmed = raw.trim().trim_end_matches('/');
    if !(trimmed.starts_with("http://") || trimmed.starts_with("https://")) {
        return Err(anyhow!("API base URL must start with http:// or https://: {}", raw));
    }
    Ok(trimmed.to_string())
}
