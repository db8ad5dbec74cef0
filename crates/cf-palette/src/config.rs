//! Palette configuration — construction-time settings, optionally from TOML.
//!
//! ```toml
//! interactive = false
//! color_count = 16
//! seed = 1234
//!
//! [parameters]
//! brightness = { x = 0.5, y = 0.5, z = 0.5 }
//! ```
//!
//! Every key is optional. When `seed` is present the parameters are derived
//! from it and any `[parameters]` table is ignored.

use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use crate::formula::MAX_COLOR_COUNT;
use crate::history::NO_SEED;
use crate::params::GenerationParameters;

/// Default palette length.
pub const DEFAULT_COLOR_COUNT: i64 = 100;

/// A configuration could not be loaded.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Construction-time settings for a palette resource.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PaletteConfig {
    /// Regenerate (and notify) on every mutation instead of on the next
    /// query.
    pub interactive: bool,
    /// Number of colors to generate.
    pub color_count: i64,
    /// Seed to derive the initial parameters from.
    pub seed: Option<i64>,
    /// Initial parameters when no seed is given.
    pub parameters: GenerationParameters,
}

impl Default for PaletteConfig {
    fn default() -> Self {
        Self {
            interactive: true,
            color_count: DEFAULT_COLOR_COUNT,
            seed: None,
            parameters: GenerationParameters::default(),
        }
    }
}

impl PaletteConfig {
    /// Parse and validate a TOML document.
    ///
    /// # Errors
    ///
    /// [`ConfigError::Toml`] on malformed input or unknown keys,
    /// [`ConfigError::Invalid`] when validation fails.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML file.
    ///
    /// # Errors
    ///
    /// As [`Self::from_toml_str`], plus [`ConfigError::Io`] when the file
    /// cannot be read.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    /// Check the settings for values no palette can use.
    ///
    /// # Errors
    ///
    /// [`ConfigError::Invalid`] naming the first offending key.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.color_count < 0 {
            return Err(ConfigError::Invalid(format!(
                "color_count must not be negative (got {})",
                self.color_count
            )));
        }
        if self.color_count > MAX_COLOR_COUNT {
            return Err(ConfigError::Invalid(format!(
                "color_count must be at most {MAX_COLOR_COUNT} (got {})",
                self.color_count
            )));
        }
        if self.seed == Some(NO_SEED) {
            return Err(ConfigError::Invalid(format!("seed {NO_SEED} is reserved")));
        }
        let p = &self.parameters;
        let components = [
            ("brightness", p.brightness),
            ("contrast", p.contrast),
            ("frequency", p.frequency),
            ("range", p.range),
        ];
        for (name, v) in components {
            if !v.to_array().iter().all(|c| c.is_finite()) {
                return Err(ConfigError::Invalid(format!("parameters.{name} must be finite")));
            }
        }
        Ok(())
    }
}
