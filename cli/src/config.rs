//! Settings for the `mural` binary.
//!
//! Precedence, lowest first: built-in defaults, `mural.toml`, then
//! `MURAL_API_URL` / `MURAL_ORDER` or the matching flags (clap resolves
//! those two).

use std::fs;
use std::path::Path;

use anyhow::Context;
use mural_core::OrderMode;
use serde::Deserialize;

pub const DEFAULT_API_URL: &str = "https://api-mural.onrender.com";
pub const DEFAULT_CONFIG_FILE: &str = "mural.toml";

#[derive(Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub api_url: Option<String>,
    pub order: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub api_url: String,
    pub order: OrderMode,
}

/// Read a config file. A missing file is an empty config.
pub fn load_file(path: &Path) -> anyhow::Result<FileConfig> {
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!(path = %path.display(), "no config file");
            return Ok(FileConfig::default());
        }
        Err(e) => {
            return Err(e).with_context(|| format!("failed to read config file '{}'", path.display()))
        }
    };
    toml::from_str(&raw).with_context(|| format!("invalid config file '{}'", path.display()))
}

/// Merge file values with flag/env overrides.
pub fn resolve(
    file: FileConfig,
    api_url: Option<String>,
    order: Option<OrderMode>,
) -> anyhow::Result<Settings> {
    let api_url = api_url
        .or(file.api_url)
        .unwrap_or_else(|| DEFAULT_API_URL.to_string());
    let api_url = api_url.trim().to_string();
    if api_url.is_empty() {
        anyhow::bail!("api_url must not be empty");
    }

    let order = match (order, file.order) {
        (Some(mode), _) => mode,
        (None, Some(name)) => name
            .parse::<OrderMode>()
            .context("invalid `order` in config file")?,
        (None, None) => OrderMode::default(),
    };

    Ok(Settings { api_url, order })
}
