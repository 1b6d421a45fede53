//! Unified error types and result handling for farmsync.

use thiserror::Error;

/// All errors the sync core can surface.
#[derive(Debug, Error)]
pub enum Error {
    /// A required field was missing or malformed. Always raised at the boundary
    /// of an operation, before any write is attempted.
    #[error("{message}")]
    Validation {
        /// Human-readable description of the failed constraint
        message: String,
    },

    /// A directly-managed product could not be found.
    #[error("Product '{id}' not found")]
    ProductNotFound {
        /// The product identifier that failed to resolve
        id: String,
    },

    /// Reserved for strict optimistic concurrency; reconciliation currently
    /// resolves conflicts with last-write-wins and never raises this.
    #[error("Conflict: {message}")]
    Conflict {
        /// Description of the conflicting write
        message: String,
    },

    /// Invalid or missing runtime configuration.
    #[error("Configuration error: {message}")]
    Config {
        /// Description of the configuration problem
        message: String,
    },

    /// The durable store failed to execute a read, write, or transaction.
    #[error("Storage error: {0}")]
    Storage(#[from] sea_orm::DbErr),

    /// I/O failure outside the store (e.g., binding the listen socket).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience `Result` type used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
