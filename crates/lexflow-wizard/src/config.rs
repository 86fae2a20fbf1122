//! Wizard configuration
//!
//! Decides how edits that leave dangling references are resolved. Loaded
//! from TOML by embedders, defaults otherwise.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// What happens to tasks and documents of a removed stage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StageRemovalPolicy {
    /// Move them to the general bucket
    #[default]
    ReassignToGeneral,
    /// Remove them with the stage
    CascadeDelete,
    /// Leave the stale stage id in place
    KeepDangling,
}

/// Wizard configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WizardConfig {
    /// Policy for items of a removed stage
    pub stage_removal: StageRemovalPolicy,
    /// Renumber remaining stages `1..=n` after a removal
    pub renumber_stages_on_remove: bool,
    /// Reject dependencies that would close a cycle
    pub enforce_acyclic_dependencies: bool,
}

impl WizardConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Configuration that keeps stale stage ids and orders untouched
    #[inline]
    #[must_use]
    pub fn legacy() -> Self {
        Self {
            stage_removal: StageRemovalPolicy::KeepDangling,
            renumber_stages_on_remove: false,
            enforce_acyclic_dependencies: false,
        }
    }

    /// With stage removal policy
    #[inline]
    #[must_use]
    pub fn with_stage_removal(mut self, policy: StageRemovalPolicy) -> Self {
        self.stage_removal = policy;
        self
    }

    /// With stage renumbering on removal
    #[inline]
    #[must_use]
    pub fn with_renumbering(mut self, renumber: bool) -> Self {
        self.renumber_stages_on_remove = renumber;
        self
    }

    /// With dependency cycle enforcement
    #[inline]
    #[must_use]
    pub fn with_acyclic_dependencies(mut self, enforce: bool) -> Self {
        self.enforce_acyclic_dependencies = enforce;
        self
    }

    /// Parse configuration from TOML; missing keys take their defaults
    ///
    /// # Errors
    /// `ConfigError::Parse` on malformed TOML or unknown policy names.
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(source)?)
    }

    /// Load configuration from a TOML file
    ///
    /// # Errors
    /// `ConfigError::Io` if the file cannot be read, `ConfigError::Parse`
    /// if it is not valid.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&source)?;
        tracing::debug!("Loaded wizard config from {}: {:?}", path.display(), config);
        Ok(config)
    }
}

impl Default for WizardConfig {
    fn default() -> Self {
        Self {
            stage_removal: StageRemovalPolicy::default(),
            renumber_stages_on_remove: true,
            enforce_acyclic_dependencies: true,
        }
    }
}
