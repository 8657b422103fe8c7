use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

pub const CONFIG_ENV: &str = "GREENPATH_CONFIG";
pub const DATASET_ENV: &str = "GREENPATH_DATASET";
const CONFIG_FILE: &str = "greenpath.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// CSV resource backing the Analytics page.
    pub dataset_path: PathBuf,
    pub window_width: f32,
    pub window_height: f32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            dataset_path: PathBuf::from("data/dataset.csv"),
            window_width: 1100.0,
            window_height: 760.0,
        }
    }
}

pub fn config_path() -> PathBuf {
    env::var_os(CONFIG_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(CONFIG_FILE))
}

/// Read the config file, falling back to defaults when it does not exist.
pub fn load_config_from(path: &Path) -> Result<AppConfig> {
    if !path.exists() {
        return Ok(AppConfig::default());
    }
    let s = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    parse_config(&s).with_context(|| format!("parse {}", path.display()))
}

pub fn parse_config(s: &str) -> Result<AppConfig> {
    Ok(serde_json::from_str(s)?)
}

/// Resolve the effective config: file (or defaults), then env overrides.
/// A broken file is reported and replaced by defaults.
pub fn load_config() -> AppConfig {
    let path = config_path();
    let mut cfg = match load_config_from(&path) {
        Ok(cfg) => cfg,
        Err(e) => {
            log::warn!("Ignoring config: {e:#}");
            AppConfig::default()
        }
    };
    apply_overrides(&mut cfg, env::var_os(DATASET_ENV).map(PathBuf::from));
    cfg
}

fn apply_overrides(cfg: &mut AppConfig, dataset: Option<PathBuf>) {
    if let Some(p) = dataset {
        cfg.dataset_path = p;
    }
}
