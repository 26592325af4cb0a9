use std::path::PathBuf;

use anyhow::{bail, Context, Result};

const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Where the resume document lives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    File,
    Memory,
}

/// Application configuration loaded from environment variables.
/// Every variable has a default; startup fails only on unparseable values.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    pub data_dir: PathBuf,
    pub store_backend: StoreBackend,
    pub max_upload_bytes: usize,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            data_dir: std::env::var("DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("data")),
            store_backend: parse_store_backend(
                &std::env::var("RESUME_STORE").unwrap_or_else(|_| "file".to_string()),
            )?,
            max_upload_bytes: match std::env::var("MAX_UPLOAD_BYTES") {
                Ok(v) => v
                    .parse::<usize>()
                    .context("MAX_UPLOAD_BYTES must be a positive integer")?,
                Err(_) => DEFAULT_MAX_UPLOAD_BYTES,
            },
        })
    }
}

fn parse_store_backend(value: &str) -> Result<StoreBackend> {
    match value.trim().to_ascii_lowercase().as_str() {
        "file" => Ok(StoreBackend::File),
        "memory" => Ok(StoreBackend::Memory),
        other => bail!("RESUME_STORE must be 'file' or 'memory', got '{other}'"),
    }
}
