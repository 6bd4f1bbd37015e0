//! Error taxonomy for the matching engine and manifest ledger.
//!
//! Every failure is returned to the caller as a typed [`SymbiosisError`];
//! nothing is retried or swallowed inside the core.

use std::io;

use thiserror::Error;

use crate::types::ManifestStatus;

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, SymbiosisError>;

/// All errors raised by the core and its persistence/config layer.
#[derive(Error, Debug)]
pub enum SymbiosisError {
    /// Malformed or out-of-range arguments. A caller bug; retrying won't help.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// A referenced id does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// The acting party may not perform the requested transition
    #[error("Party '{actor}' is not permitted to move manifest {manifest_id} to {target}")]
    Unauthorized {
        actor: String,
        manifest_id: String,
        target: ManifestStatus,
    },

    /// The requested status is not the next state in the manifest lifecycle
    #[error("Manifest {manifest_id} cannot move from {from} to {to}")]
    InvalidTransition {
        manifest_id: String,
        from: ManifestStatus,
        to: ManifestStatus,
    },

    /// I/O errors while reading or writing snapshots, configs or exports
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Snapshot encoding/decoding failures
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Unreadable or inconsistent configuration
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<serde_json::Error> for SymbiosisError {
    fn from(err: serde_json::Error) -> Self {
        SymbiosisError::Serialization(err.to_string())
    }
}

impl From<toml::de::Error> for SymbiosisError {
    fn from(err: toml::de::Error) -> Self {
        SymbiosisError::Config(err.to_string())
    }
}

impl SymbiosisError {
    /// `true` for errors caused by the caller's arguments or permissions,
    /// as opposed to the environment (disk, encoding).
    pub fn is_caller_error(&self) -> bool {
        matches!(
            self,
            SymbiosisError::InvalidInput(_)
                | SymbiosisError::NotFound(_)
                | SymbiosisError::Unauthorized { .. }
                | SymbiosisError::InvalidTransition { .. }
        )
    }
}
