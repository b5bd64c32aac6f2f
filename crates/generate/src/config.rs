use std::path::Path;

use glam::IVec3;
use levelgen_search::SearchConfig;
use serde::{Deserialize, Serialize};

/// Errors from loading a generator configuration file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Everything a generation run depends on.
///
/// Missing fields in a config file fall back to the defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    pub seed: u32,
    /// Fixed target cell. When unset, one is drawn around `target_center`.
    pub target: Option<IVec3>,
    pub target_center: IVec3,
    /// Maximum horizontal distance of a drawn target from `target_center`.
    pub target_spread: i32,
    pub search: SearchConfig,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            target: None,
            target_center: IVec3::new(128, 128, 0),
            target_spread: 16,
            search: SearchConfig::default(),
        }
    }
}

impl GeneratorConfig {
    pub fn with_seed(seed: u32) -> Self {
        Self {
            seed,
            ..Default::default()
        }
    }

    pub fn from_yaml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(text)?)
    }

    pub fn to_yaml_string(&self) -> Result<String, ConfigError> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Load a YAML configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&text)
    }
}
