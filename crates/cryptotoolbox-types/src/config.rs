//! Toolbox configuration with sensible defaults.
//!
//! Values can come from a JSON file; any field missing from the file
//! keeps its built-in default. Command-line flags override both.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{Result, ToolboxError};

/// Thirty days, in seconds.
pub const DEFAULT_CLIFF_SECONDS: i64 = 60 * 60 * 24 * 30;

/// 365 days, in seconds.
pub const DEFAULT_DURATION_SECONDS: i64 = 60 * 60 * 24 * 365;

/// Default token amount for vesting queries.
pub const DEFAULT_VESTING_AMOUNT: f64 = 1000.0;

/// Global toolbox configuration.
///
/// Example `cryptotoolbox.json`:
/// ```json
/// {
///   "vesting_amount": 250000.0,
///   "vesting_cliff_seconds": 31536000,
///   "vesting_duration_seconds": 126144000
/// }
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ToolboxConfig {
    /// Default total amount for `vesting` queries.
    pub vesting_amount: f64,

    /// Default cliff offset for `vesting` queries, in seconds.
    pub vesting_cliff_seconds: i64,

    /// Default full-vesting duration (cliff included), in seconds.
    pub vesting_duration_seconds: i64,

    /// Passphrase used for wallet export/import when none is given.
    pub default_passphrase: String,
}

impl Default for ToolboxConfig {
    fn default() -> Self {
        Self {
            vesting_amount: DEFAULT_VESTING_AMOUNT,
            vesting_cliff_seconds: DEFAULT_CLIFF_SECONDS,
            vesting_duration_seconds: DEFAULT_DURATION_SECONDS,
            default_passphrase: String::new(),
        }
    }
}

impl ToolboxConfig {
    /// Loads and validates a config from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns [`ToolboxError::ConfigError`] if the file cannot be read,
    /// is not valid JSON for this schema, or fails [`validate`](Self::validate).
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| ToolboxError::ConfigError {
            reason: format!("failed to read config file {}: {e}", path.display()),
        })?;
        Self::from_json(&text)
    }

    /// Parses and validates a config from JSON text.
    pub fn from_json(text: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(text).map_err(|e| ToolboxError::ConfigError {
            reason: format!("invalid config JSON: {e}"),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Validates all configuration values.
    pub fn validate(&self) -> Result<()> {
        if !self.vesting_amount.is_finite() || self.vesting_amount < 0.0 {
            return Err(ToolboxError::ConfigError {
                reason: format!(
                    "vesting_amount must be a finite, non-negative number, got {}",
                    self.vesting_amount
                ),
            });
        }

        if self.vesting_cliff_seconds < 0 {
            return Err(ToolboxError::ConfigError {
                reason: "vesting_cliff_seconds must not be negative".into(),
            });
        }

        if self.vesting_duration_seconds < self.vesting_cliff_seconds {
            return Err(ToolboxError::ConfigError {
                reason: format!(
                    "vesting_duration_seconds ({}) must be >= vesting_cliff_seconds ({})",
                    self.vesting_duration_seconds, self.vesting_cliff_seconds
                ),
            });
        }

        Ok(())
    }
}
