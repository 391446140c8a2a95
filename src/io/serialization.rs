// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Photo library serialization and deserialization.
//!
//! This module reads and writes the photo library in YAML and JSON formats.
//! The format is picked from the file extension.

use crate::models::photo::PhotoLibrary;
use anyhow::{Context, Result};
use std::path::Path;

/// On-disk format of a library file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LibraryFormat {
    Json,
    Yaml,
}

impl LibraryFormat {
    /// Pick the format from a path's extension.
    pub fn from_path(path: &Path) -> Result<Self> {
        let extension = path.extension().and_then(|s| s.to_str());
        match extension {
            Some("json") => Ok(LibraryFormat::Json),
            Some("yaml") | Some("yml") => Ok(LibraryFormat::Yaml),
            _ => anyhow::bail!("Unsupported library file extension: {:?}", extension),
        }
    }
}

/// Encode a library to a string.
pub fn encode(data: &PhotoLibrary, format: LibraryFormat) -> Result<String> {
    let text = match format {
        LibraryFormat::Json => serde_json::to_string_pretty(data)?,
        LibraryFormat::Yaml => serde_yaml::to_string(data)?,
    };
    Ok(text)
}

/// Decode a library from a string.
pub fn decode(text: &str, format: LibraryFormat) -> Result<PhotoLibrary> {
    let data = match format {
        LibraryFormat::Json => serde_json::from_str(text)?,
        LibraryFormat::Yaml => serde_yaml::from_str(text)?,
    };
    Ok(data)
}

/// Write a library file, replacing any previous one.
///
/// The data is written to a sibling temporary file first and then renamed
/// over the target, so readers never see a half-written library.
pub fn write_library(data: &PhotoLibrary, path: &Path) -> Result<()> {
    let format = LibraryFormat::from_path(path)?;
    let text = encode(data, format)?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }

    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    let tmp = std::path::PathBuf::from(tmp);

    std::fs::write(&tmp, text).with_context(|| format!("Failed to write {}", tmp.display()))?;
    std::fs::rename(&tmp, path)
        .with_context(|| format!("Failed to replace {}", path.display()))?;
    Ok(())
}

/// Read a library file. A missing file is an empty library.
pub fn read_library(path: &Path) -> Result<PhotoLibrary> {
    let format = LibraryFormat::from_path(path)?;
    if !path.exists() {
        return Ok(PhotoLibrary::new());
    }

    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    decode(&text, format).with_context(|| format!("Failed to parse {}", path.display()))
}
