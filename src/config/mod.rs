//! Project configuration loading and defaults.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::catalog::{CatalogOverrides, CatalogSource};
use crate::mode::SelectionMode;
use crate::selection::{SelectionPolicy, WeightRounding};

/// Default config file name, looked up in the working directory
pub const CONFIG_FILE: &str = ".siting.config.json";

fn default_config_schema() -> String {
    "https://stp-siting.dev/schemas/v1/config.schema.json".to_string()
}

fn default_version() -> String {
    "1.0.0".to_string()
}

/// Main configuration structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// JSON Schema URL for validation
    #[serde(rename = "$schema", default = "default_config_schema")]
    pub schema: String,

    #[serde(default = "default_version")]
    pub version: String,

    /// How unknown criterion keys are treated
    #[serde(default)]
    pub error_handling: ErrorHandling,

    /// Weight precision and rounding remainder policy
    #[serde(default)]
    pub weights: WeightRounding,

    /// Catalog source per mode
    #[serde(default)]
    pub catalogs: CatalogsConfig,

    /// Catalog adjustments per mode
    #[serde(default, skip_serializing_if = "OverridesConfig::is_empty")]
    pub overrides: OverridesConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            schema: default_config_schema(),
            version: default_version(),
            error_handling: ErrorHandling::default(),
            weights: WeightRounding::default(),
            catalogs: CatalogsConfig::default(),
            overrides: OverridesConfig::default(),
        }
    }
}

impl Config {
    /// Load config from a JSON file
    pub fn load<P: AsRef<Path>>(path: P) -> crate::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Check values serde cannot constrain
    pub fn validate(&self) -> crate::Result<()> {
        self.weights.validate()
    }

    /// Save config to a file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> crate::Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Load `path` if it exists, otherwise fall back to defaults
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> crate::Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            Self::load(path)
        } else {
            tracing::debug!("No config at {}, using defaults", path.display());
            Ok(Self::default())
        }
    }

    /// Store policy derived from this config
    pub fn selection_policy(&self) -> SelectionPolicy {
        SelectionPolicy {
            unknown_keys: self.error_handling.strictness,
            rounding: self.weights,
        }
    }

    pub fn catalog_source(&self, mode: SelectionMode) -> &CatalogSource {
        match mode {
            SelectionMode::Region => &self.catalogs.region,
            SelectionMode::Drain => &self.catalogs.drain,
        }
    }

    pub fn catalog_overrides(&self, mode: SelectionMode) -> &CatalogOverrides {
        match mode {
            SelectionMode::Region => &self.overrides.region,
            SelectionMode::Drain => &self.overrides.drain,
        }
    }
}

/// Error handling configuration
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorHandling {
    #[serde(default)]
    pub strictness: Strictness,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strictness {
    /// Unknown keys are logged and ignored
    #[default]
    Permissive,
    /// Unknown keys are reported as errors
    Strict,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogsConfig {
    #[serde(default)]
    pub region: CatalogSource,

    #[serde(default)]
    pub drain: CatalogSource,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OverridesConfig {
    #[serde(default, skip_serializing_if = "CatalogOverrides::is_empty")]
    pub region: CatalogOverrides,

    #[serde(default, skip_serializing_if = "CatalogOverrides::is_empty")]
    pub drain: CatalogOverrides,
}

impl OverridesConfig {
    pub fn is_empty(&self) -> bool {
        self.region.is_empty() && self.drain.is_empty()
    }
}
