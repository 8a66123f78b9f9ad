use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{MnemonicError, PhraseKitError, PhraseKitResult};
use crate::types::{Language, VALID_ENTROPY_BITS};

/// Top-level configuration (loaded from phrasekit.toml)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PhraseKitConfig {
    pub defaults: DefaultsConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DefaultsConfig {
    /// Word list language used when none is given (default: english)
    pub language: Language,
    /// Entropy size for `generate` (default: 256 = 24 words)
    pub entropy_bits: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level / EnvFilter directive (default: warn)
    pub level: String,
    /// Log format: "json" or "text"
    pub format: String,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            language: Language::English,
            entropy_bits: 256,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".into(),
            format: "text".into(),
        }
    }
}

impl PhraseKitConfig {
    /// Load configuration from `path`, falling back to defaults when the file
    /// does not exist.
    pub fn load(path: &Path) -> PhraseKitResult<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "config file not found (using defaults)");
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .map_err(|e| PhraseKitError::Config(format!("reading {}: {e}", path.display())))?;
        let config: Self = toml::from_str(&content)
            .map_err(|e| PhraseKitError::Config(format!("parsing {}: {e}", path.display())))?;
        config.validate()?;

        tracing::debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Reject values the codec cannot honour.
    pub fn validate(&self) -> PhraseKitResult<()> {
        if !VALID_ENTROPY_BITS.contains(&self.defaults.entropy_bits) {
            return Err(MnemonicError::InvalidEntropyLengthOrLanguage(format!(
                "defaults.entropy_bits = {}",
                self.defaults.entropy_bits
            ))
            .into());
        }
        if !matches!(self.logging.format.to_ascii_lowercase().as_str(), "json" | "text") {
            return Err(PhraseKitError::Config(format!(
                "logging.format = {:?} (expected \"json\" or \"text\")",
                self.logging.format
            )));
        }
        Ok(())
    }
}
