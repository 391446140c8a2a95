// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Application settings.
//!
//! Settings are read from a YAML file, `settings.yaml` in the platform
//! config directory, or from the file named by `DUALCROP_CONFIG`. A missing
//! file gives the defaults. A broken file is logged and ignored.

use crate::crop::overlay::OverlaySettings;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const APP_DIR: &str = "dualcrop";
const CONFIG_FILE: &str = "settings.yaml";
const LIBRARY_FILE: &str = "library.json";

/// Environment variable overriding the settings file location.
pub const CONFIG_ENV: &str = "DUALCROP_CONFIG";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Library file; `.json`, `.yaml` or `.yml`.
    pub library_path: PathBuf,
    pub overlay: OverlaySettings,
    /// Longest side of gallery thumbnails, in pixels.
    pub thumbnail_size: u32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            library_path: default_library_path(),
            overlay: OverlaySettings::default(),
            thumbnail_size: 72,
        }
    }
}

fn default_library_path() -> PathBuf {
    dirs::data_dir()
        .or_else(dirs::home_dir)
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR)
        .join(LIBRARY_FILE)
}

/// Where the settings file is looked up.
pub fn config_path() -> Option<PathBuf> {
    if let Some(path) = std::env::var_os(CONFIG_ENV) {
        return Some(PathBuf::from(path));
    }
    dirs::config_dir().map(|dir| dir.join(APP_DIR).join(CONFIG_FILE))
}

/// Read settings from an explicit file.
pub fn load_from_path(path: &Path) -> Result<AppConfig> {
    if !path.exists() {
        return Ok(AppConfig::default());
    }
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let config = serde_yaml::from_str(&text)
        .with_context(|| format!("Failed to parse {}", path.display()))?;
    Ok(config)
}

/// Read settings from the usual location, falling back to defaults.
pub fn load() -> AppConfig {
    let Some(path) = config_path() else {
        log::warn!("No config directory available, using default settings");
        return AppConfig::default();
    };

    match load_from_path(&path) {
        Ok(config) => {
            log::info!("Settings loaded from {}", path.display());
            config
        }
        Err(e) => {
            log::warn!("Ignoring settings: {:#}", e);
            AppConfig::default()
        }
    }
}
