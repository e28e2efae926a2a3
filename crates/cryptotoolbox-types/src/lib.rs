//! Core shared types for the cryptotoolbox workspace.
//!
//! Every crate reports failures through [`ToolboxError`] so callers can
//! match on a single enum regardless of which component failed.

pub mod config;

use thiserror::Error;

// ---------------------------------------------------------------------------
// Result alias
// ---------------------------------------------------------------------------

/// Workspace-wide result type.
pub type Result<T> = std::result::Result<T, ToolboxError>;

// ---------------------------------------------------------------------------
// ToolboxError
// ---------------------------------------------------------------------------

/// Errors produced by cryptotoolbox components.
#[derive(Debug, Error)]
pub enum ToolboxError {
    /// The recomputed HMAC tag of a wallet envelope does not match the
    /// stored one: wrong passphrase, or the envelope was altered.
    #[error("integrity check failed: {reason}")]
    Integrity {
        /// Human-readable description of the mismatch.
        reason: String,
    },

    /// Input could not be parsed, or an expected field is missing or has
    /// the wrong type.
    #[error("malformed input: {reason}")]
    MalformedInput {
        /// Human-readable description of what was wrong with the input.
        reason: String,
    },

    /// A vesting schedule violates `duration >= cliff >= 0` or carries a
    /// negative / non-finite amount.
    #[error("invalid vesting schedule: {reason}")]
    InvalidSchedule {
        /// Human-readable description of the violated constraint.
        reason: String,
    },

    /// A cryptographic primitive failed to initialise or run.
    #[error("crypto error: {reason}")]
    CryptoError {
        /// Human-readable description of the cryptographic failure.
        reason: String,
    },

    /// A configuration value is invalid or the config file is unreadable.
    #[error("config error: {reason}")]
    ConfigError {
        /// Human-readable description of the configuration problem.
        reason: String,
    },

    /// Reading or writing an envelope file failed.
    #[error("io error: {reason}")]
    Io {
        /// Human-readable description including the affected path.
        reason: String,
    },
}

impl ToolboxError {
    /// Returns `true` for [`ToolboxError::Integrity`].
    pub fn is_integrity(&self) -> bool {
        matches!(self, Self::Integrity { .. })
    }

    /// Returns `true` for [`ToolboxError::MalformedInput`].
    pub fn is_malformed(&self) -> bool {
        matches!(self, Self::MalformedInput { .. })
    }
}
