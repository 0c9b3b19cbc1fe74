//! # Store Error Types
//!
//! Error types for remote store operations.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  HTTP Error (reqwest::Error / non-2xx status)                          │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  StoreError (this module) ← Adds the failing operation and context     │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  CLI maps to a user-facing message and a non-zero exit                 │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Fatal vs Non-Fatal
//! Not every StoreError aborts a mutation. The service layer decides:
//! image-upload and image-cleanup failures are logged and swallowed there,
//! while insert/select/row-delete failures propagate to the caller. This
//! module only describes WHAT failed; the service decides what it costs.

use thiserror::Error;

/// Remote store operation errors.
///
/// Every remote call is attempted exactly once; there is no retry logic.
/// The `operation` field names the call that failed (e.g. `"insert product"`,
/// `"list objects"`) so a surfaced message identifies the failing step.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The request never produced a response (connect failure, timeout,
    /// TLS error, ...).
    #[error("{operation}: request failed: {source}")]
    Transport {
        operation: &'static str,
        #[source]
        source: reqwest::Error,
    },

    /// The remote answered with a non-success status.
    ///
    /// The body text is carried verbatim; hosted services put their
    /// diagnostic message there.
    #[error("{operation}: remote rejected with HTTP {status}: {message}")]
    Rejected {
        operation: &'static str,
        status: u16,
        message: String,
    },

    /// The response arrived but could not be decoded into the expected shape.
    #[error("{operation}: could not decode response: {message}")]
    Decode {
        operation: &'static str,
        message: String,
    },

    /// Configuration was unusable (bad base URL, client build failure).
    #[error("invalid store configuration: {0}")]
    Config(String),
}

impl StoreError {
    /// Wraps a transport-level failure with the operation that issued it.
    pub fn transport(operation: &'static str, source: reqwest::Error) -> Self {
        StoreError::Transport { operation, source }
    }

    /// Wraps a decode failure with the operation that issued it.
    pub fn decode(operation: &'static str, source: impl std::fmt::Display) -> Self {
        StoreError::Decode {
            operation,
            message: source.to_string(),
        }
    }
}

/// Result type for remote store operations.
pub type StoreResult<T> = Result<T, StoreError>;
