use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::curve_type::CurveType;
use crate::error::ConfigError;

/// User settings carried by the editor. Every field has a default, so a
/// partial file is valid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Curve type selected when the editor starts.
    pub curve_type: CurveType,
    /// Increment of the small +/- buttons.
    pub fine_step: f64,
    /// Increment of the large +/- buttons.
    pub coarse_step: f64,
    /// Curve store used when none is given explicitly.
    pub store_path: Option<PathBuf>,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            curve_type: CurveType::default(),
            fine_step: 1.0,
            coarse_step: 10.0,
            store_path: None,
        }
    }
}

impl EditorConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path)?;
        let config = serde_json::from_str(&raw)?;
        Ok(config)
    }

    /// Loads `path` when given, otherwise the per-user file if it exists,
    /// otherwise defaults.
    pub fn discover(path: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = path {
            return Self::load(path);
        }
        match Self::default_path() {
            Ok(path) if path.exists() => Self::load(&path),
            _ => Ok(Self::default()),
        }
    }

    pub fn default_path() -> Result<PathBuf, ConfigError> {
        let mut path = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
        path.push("Attenuator");
        path.push("config.json");
        Ok(path)
    }
}
