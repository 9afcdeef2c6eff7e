//! Error types for the storefront session layer.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A shared error type for the storefront workspace.
///
/// The first three variants are the session taxonomy: read failures are
/// absorbed by the store, write failures and invalid records are returned
/// to the caller.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum StorefrontError {
    /// Durable read failed or returned data that could not be decoded.
    #[error("Storage read error: {0}")]
    StorageRead(String),

    /// Durable write or removal failed.
    #[error("Storage write error: {0}")]
    StorageWrite(String),

    /// The record handed to `save` was rejected before any I/O.
    #[error("Invalid session record: {0}")]
    InvalidRecord(String),

    /// An edit was requested but there is no current session record.
    #[error("No active session")]
    NoSession,

    /// Serialization/deserialization error
    #[error("Serialization error: {format} - {message}")]
    Serialization { format: String, message: String },

    /// IO error (file system operations)
    #[error("IO error: {message}")]
    Io { message: String },

    /// Schema migration error
    #[error("Migration error: {0}")]
    Migration(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Internal error (should not happen in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl StorefrontError {
    // ============================================================================
    // Constructor helpers
    // ============================================================================

    pub fn storage_read(message: impl Into<String>) -> Self {
        Self::StorageRead(message.into())
    }

    pub fn storage_write(message: impl Into<String>) -> Self {
        Self::StorageWrite(message.into())
    }

    pub fn invalid_record(message: impl Into<String>) -> Self {
        Self::InvalidRecord(message.into())
    }

    pub fn io(message: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
        }
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    // ============================================================================
    // Type checking methods
    // ============================================================================

    pub fn is_storage_read(&self) -> bool {
        matches!(self, Self::StorageRead(_))
    }

    pub fn is_storage_write(&self) -> bool {
        matches!(self, Self::StorageWrite(_))
    }

    pub fn is_invalid_record(&self) -> bool {
        matches!(self, Self::InvalidRecord(_))
    }

    pub fn is_no_session(&self) -> bool {
        matches!(self, Self::NoSession)
    }

    /// Maps I/O and decoding failures into the read side of the taxonomy.
    ///
    /// Errors that already carry a session meaning are returned unchanged.
    pub fn into_read_error(self) -> Self {
        match self {
            Self::Io { message } => Self::StorageRead(message),
            Self::Serialization { format, message } => {
                Self::StorageRead(format!("{} decode failed: {}", format, message))
            }
            Self::Migration(message) => Self::StorageRead(message),
            other => other,
        }
    }

    /// Maps I/O and encoding failures into the write side of the taxonomy.
    pub fn into_write_error(self) -> Self {
        match self {
            Self::Io { message } => Self::StorageWrite(message),
            Self::Serialization { format, message } => {
                Self::StorageWrite(format!("{} encode failed: {}", format, message))
            }
            Self::Migration(message) => Self::StorageWrite(message),
            other => other,
        }
    }
}

// ============================================================================
// From implementations for automatic conversion
// ============================================================================

impl From<std::io::Error> for StorefrontError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: format!("{} (kind: {:?})", err, err.kind()),
        }
    }
}

impl From<serde_json::Error> for StorefrontError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            format: "JSON".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for StorefrontError {
    fn from(err: toml::de::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<version_migrate::MigrationError> for StorefrontError {
    fn from(err: version_migrate::MigrationError) -> Self {
        use version_migrate::MigrationError;

        match err {
            MigrationError::DeserializationError(_) | MigrationError::SerializationError(_) => {
                Self::Serialization {
                    format: "migration".to_string(),
                    message: err.to_string(),
                }
            }
            MigrationError::TomlParseError(_) | MigrationError::TomlSerializeError(_) => {
                Self::Serialization {
                    format: "TOML".to_string(),
                    message: err.to_string(),
                }
            }
            MigrationError::IoError { .. } | MigrationError::LockError { .. } => Self::Io {
                message: err.to_string(),
            },
            _ => Self::Migration(err.to_string()),
        }
    }
}

/// A type alias for `Result<T, StorefrontError>`.
pub type Result<T> = std::result::Result<T, StorefrontError>;
