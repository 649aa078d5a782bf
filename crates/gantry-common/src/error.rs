//! Unified error types for the Gantry workspace.
//!
//! Every fallible operation in the executor core returns one of these
//! variants; the phase-run entry points decide whether an error aborts the
//! remaining hooks or is logged and skipped.

use thiserror::Error;

/// Top-level error type shared across the workspace.
#[derive(Debug, Error)]
pub enum GantryError {
    /// A configuration value is missing or invalid.
    #[error("invalid configuration: {message}")]
    Config {
        /// Description of the invalid configuration.
        message: String,
    },

    /// Task metadata failed validation (malformed label, bad port index,
    /// unparseable address).
    #[error("validation failed: {message}")]
    Validation {
        /// Description of the rejected input.
        message: String,
    },

    /// A container backend operation failed.
    #[error("runtime error: {message}")]
    Runtime {
        /// Description of the failed operation.
        message: String,
    },

    /// A required resource was not found.
    #[error("{kind} not found: {id}")]
    NotFound {
        /// Type of the missing resource.
        kind: &'static str,
        /// Identifier of the missing resource.
        id: String,
    },

    /// The configured packet-filter chain is absent from the rule table.
    #[error("chain {chain} does not exist in the filter table")]
    ChainNotFound {
        /// Name of the missing chain.
        chain: String,
    },

    /// An I/O operation failed.
    #[error("I/O error while {context}: {source}")]
    Io {
        /// What was being attempted when the error occurred.
        context: String,
        /// Underlying I/O error.
        source: std::io::Error,
    },
}

/// Convenience alias used throughout the workspace.
pub type Result<T> = std::result::Result<T, GantryError>;
