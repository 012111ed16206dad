//! Error types for the peer-habit core

use crate::robot::attributes::CodecKind;
use thiserror::Error;

/// Main error type for registry operations
#[derive(Debug, Error)]
pub enum PeerHabitError {
    /// A storage primitive failed
    #[error("Storage unavailable: {0}")]
    StorageUnavailable(String),

    /// A stored value could not be parsed into the attribute's type
    #[error("Failed to decode '{raw}' at key '{key}' as {expected}")]
    DecodeFailure {
        /// Storage key that held the value
        key: String,
        /// Codec the attribute expects
        expected: CodecKind,
        /// Raw stored value
        raw: String,
    },

    /// Every primary key candidate collided with an issued key
    #[error("Primary key generation exhausted after {attempts} attempts")]
    GenerationExhausted {
        /// Number of candidates tried
        attempts: usize,
    },

    /// Validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// Template rendering error
    #[error("Template error: {0}")]
    Template(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Partner context could not be parsed or serialized
    #[error("Context error: {0}")]
    Context(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Convenient Result type using PeerHabitError
pub type Result<T> = std::result::Result<T, PeerHabitError>;

impl PeerHabitError {
    /// Create a storage error
    pub fn storage(msg: impl Into<String>) -> Self {
        PeerHabitError::StorageUnavailable(msg.into())
    }

    /// Create a decode error
    pub fn decode(key: impl Into<String>, expected: CodecKind, raw: impl Into<String>) -> Self {
        PeerHabitError::DecodeFailure {
            key: key.into(),
            expected,
            raw: raw.into(),
        }
    }

    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        PeerHabitError::Validation(msg.into())
    }

    /// Create a template error
    pub fn template(msg: impl Into<String>) -> Self {
        PeerHabitError::Template(msg.into())
    }

    /// Create a config error
    pub fn config(msg: impl Into<String>) -> Self {
        PeerHabitError::Config(msg.into())
    }

    /// Create a context error
    pub fn context(msg: impl Into<String>) -> Self {
        PeerHabitError::Context(msg.into())
    }

    /// Whether this error came from the storage collaborator
    pub fn is_storage(&self) -> bool {
        matches!(self, PeerHabitError::StorageUnavailable(_))
    }
}
