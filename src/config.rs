// SPDX-License-Identifier: GPL-3.0-or-later
// src/config.rs
//
// User-tunable configuration for crop sessions, persisted as JSON.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::constant::{CONFIG_DIR, CONFIG_FILE};

/// Global configuration for crop sessions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CropConfig {
    /// Maximum preview width; larger images are scaled down to fit.
    pub display_max_width: f32,
    /// Maximum preview height; larger images are scaled down to fit.
    pub display_max_height: f32,
    /// Quality factor for the exported crop (0.0 - 1.0).
    pub export_quality: f32,
    /// Quality factor used when optimizing an oversized crop (0.0 - 1.0).
    pub optimize_quality: f32,
    /// Upload size limit in MiB above which optimization is offered.
    pub max_upload_mib: f32,
}

impl Default for CropConfig {
    fn default() -> Self {
        Self {
            display_max_width: 800.0,
            display_max_height: 600.0,
            export_quality: 0.95,
            optimize_quality: 0.85,
            max_upload_mib: 2.0,
        }
    }
}

impl CropConfig {
    /// Default location: `<config_dir>/upload-crop/config.json`.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(CONFIG_DIR).join(CONFIG_FILE))
    }

    /// Load configuration from `path`.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = fs::read_to_string(path)?;
        let config = serde_json::from_str(&raw)?;
        Ok(config)
    }

    /// Load from the default location, falling back to defaults when the
    /// file is missing or unreadable.
    pub fn load_or_default() -> Self {
        let Some(path) = Self::default_path() else {
            return Self::default();
        };
        if !path.exists() {
            return Self::default();
        }
        match Self::load(&path) {
            Ok(config) => config,
            Err(e) => {
                log::warn!("Ignoring invalid config {}: {e}", path.display());
                Self::default()
            }
        }
    }

    /// Persist configuration to `path`, creating parent directories.
    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_file_keeps_defaults_for_missing_keys() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{ "max_upload_mib": 5.0 }"#).unwrap();

        let config = CropConfig::load(&path).unwrap();
        assert_eq!(config.max_upload_mib, 5.0);
        assert_eq!(config.display_max_width, 800.0);
        assert_eq!(config.export_quality, 0.95);
    }

    #[test]
    fn save_then_load_preserves_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.json");
        let config = CropConfig {
            display_max_width: 1024.0,
            ..CropConfig::default()
        };
        config.save(&path).unwrap();
        assert_eq!(CropConfig::load(&path).unwrap(), config);
    }

    #[test]
    fn malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, "not json").unwrap();
        assert!(CropConfig::load(&path).is_err());
    }
}
