//! Error types for the Rostra application.

use thiserror::Error;

/// A shared error type for the entire Rostra application.
///
/// This provides typed, structured error variants with automatic conversion
/// from common error types via the `From` trait. The variants mirror the
/// propagation policy of the session core: validation and credential errors
/// are resolved at the call site, provider errors are absorbed into the
/// conversation, and storage faults are the only class escalated to the
/// user as retryable.
#[derive(Error, Debug, Clone)]
pub enum RostraError {
    /// Input rejected before any state transition (empty fields,
    /// wrong-phase operations, a turn already in flight).
    #[error("Validation error: {0}")]
    Validation(String),

    /// A session operation was attempted with no signed-in account.
    #[error("No account is signed in")]
    Unauthenticated,

    /// Sign-up with an email that is already registered (case-insensitive).
    #[error("An account already exists for '{email}'")]
    DuplicateAccount { email: String },

    /// Sign-in mismatch. Does not reveal whether the email exists.
    #[error("Invalid email or password")]
    InvalidCredential,

    /// Entity not found error with type information
    #[error("Entity not found: {entity_type} '{id}'")]
    NotFound {
        entity_type: &'static str,
        id: String,
    },

    /// AI debate partner failure (network/timeout/malformed response).
    #[error("Debate partner error: {0}")]
    Provider(String),

    /// A stored collection exists but cannot be parsed. Surfaced to the
    /// caller instead of being swallowed as an empty collection.
    #[error("Corrupt data in collection '{collection}': {message}")]
    CorruptData {
        collection: String,
        message: String,
    },

    /// Storage medium fault (file system operations).
    #[error("Storage error: {message}")]
    Storage { message: String },

    /// Internal error (should not happen in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl RostraError {
    /// Creates a Validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Creates a DuplicateAccount error
    pub fn duplicate_account(email: impl Into<String>) -> Self {
        Self::DuplicateAccount {
            email: email.into(),
        }
    }

    /// Creates a NotFound error
    pub fn not_found(entity_type: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type,
            id: id.into(),
        }
    }

    /// Creates a CorruptData error
    pub fn corrupt_data(collection: impl Into<String>, message: impl Into<String>) -> Self {
        Self::CorruptData {
            collection: collection.into(),
            message: message.into(),
        }
    }

    /// Creates a Storage error
    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage {
            message: message.into(),
        }
    }

    /// Creates an Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// Check if this is a Validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Check if this is a NotFound error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is a Provider error
    pub fn is_provider(&self) -> bool {
        matches!(self, Self::Provider(_))
    }

    /// Check if this error should be surfaced as a retryable storage fault.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Storage { .. })
    }
}

impl From<std::io::Error> for RostraError {
    fn from(err: std::io::Error) -> Self {
        Self::Storage {
            message: format!("{} (kind: {:?})", err, err.kind()),
        }
    }
}

impl From<serde_json::Error> for RostraError {
    fn from(err: serde_json::Error) -> Self {
        Self::Internal(format!("JSON serialization failed: {}", err))
    }
}

/// A type alias for `Result<T, RostraError>`.
pub type Result<T> = std::result::Result<T, RostraError>;
