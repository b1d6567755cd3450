//! Common error types for Fyyur

use std::fmt;
use thiserror::Error;

/// Common result type for Fyyur operations
pub type Result<T> = std::result::Result<T, Error>;

/// The three record kinds held by the store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Venue,
    Artist,
    Show,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EntityKind::Venue => "Venue",
            EntityKind::Artist => "Artist",
            EntityKind::Show => "Show",
        };
        f.write_str(name)
    }
}

/// Error taxonomy shared by the store, the catalog and the web layer
#[derive(Error, Debug)]
pub enum Error {
    /// Missing or malformed input, detected before any write
    #[error("Invalid input: {0}")]
    Validation(String),

    /// Requested record does not exist
    #[error("{kind} {id} not found")]
    NotFound { kind: EntityKind, id: i64 },

    /// Storage engine rejected or failed an operation (wraps sqlx::Error)
    #[error("Persistence error: {0}")]
    Persistence(#[from] sqlx::Error),

    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O operation error (wraps std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    pub fn not_found(kind: EntityKind, id: i64) -> Self {
        Self::NotFound { kind, id }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }
}
