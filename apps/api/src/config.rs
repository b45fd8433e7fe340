use std::path::PathBuf;

use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
/// Every variable has a local-first default — a bare `cargo run` in a
/// directory containing `cv_data.yaml` is a working setup.
#[derive(Debug, Clone)]
pub struct Config {
    /// The single on-disk YAML document holding the CV data.
    pub data_file: PathBuf,
    /// Directory holding bundled assets (the default photo).
    pub assets_dir: PathBuf,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            data_file: env_or("DATA_FILE", "cv_data.yaml").into(),
            assets_dir: env_or("ASSETS_DIR", "assets").into(),
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: env_or("RUST_LOG", "info"),
        })
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
