use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::localization::severity::DEFAULT_SEVERITY_KEYWORDS;
use crate::localization::syndromes::SyndromeMatchMode;
use crate::localization::types::LocalizerError;

/// Application-level constants
pub const APP_NAME: &str = "neuroloc";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Environment variable naming an engine config file.
pub const CONFIG_ENV_VAR: &str = "NEUROLOC_CONFIG";

/// Log filter used when `RUST_LOG` is unset.
pub fn default_log_filter() -> &'static str {
    "warn,neuroloc_lib=info,neuroloc=info"
}

/// Tunables for one localizer instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Lower-case substrings that request the severity questionnaire.
    pub severity_keywords: Vec<String>,
    pub syndrome_match: SyndromeMatchMode,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            severity_keywords: DEFAULT_SEVERITY_KEYWORDS
                .iter()
                .map(|k| k.to_string())
                .collect(),
            syndrome_match: SyndromeMatchMode::default(),
        }
    }
}

impl EngineConfig {
    /// Load from a JSON file. Missing fields take their defaults.
    pub fn load(path: &Path) -> Result<Self, LocalizerError> {
        let json = std::fs::read_to_string(path).map_err(|e| {
            LocalizerError::ConfigLoad(path.display().to_string(), e.to_string())
        })?;
        let config: Self = serde_json::from_str(&json).map_err(|e| {
            LocalizerError::ConfigParse(path.display().to_string(), e.to_string())
        })?;
        Ok(config.normalized())
    }

    /// Load from the file named by [`CONFIG_ENV_VAR`], falling back to defaults.
    pub fn from_env() -> Self {
        let Ok(path) = std::env::var(CONFIG_ENV_VAR) else {
            return Self::default();
        };

        match Self::load(Path::new(&path)) {
            Ok(config) => {
                tracing::info!(path = %path, "Engine config loaded");
                config
            }
            Err(e) => {
                tracing::warn!(error = %e, "Falling back to default engine config");
                Self::default()
            }
        }
    }

    /// Keywords are matched against lower-cased text; blanks would match anything.
    fn normalized(mut self) -> Self {
        self.severity_keywords = self
            .severity_keywords
            .into_iter()
            .map(|k| k.trim().to_lowercase())
            .filter(|k| !k.is_empty())
            .collect();
        self
    }
}
