//! Error types for st-core
//!
//! Provides a unified error type covering the failure classes the storage
//! provider can surface, plus local validation and decoding failures.

use thiserror::Error;

/// Result type alias for st-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for st-core operations
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Invalid operation argument (rejected before any provider call)
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Credential acquisition failure
    #[error("Authentication failed: {0}")]
    Auth(String),

    /// Caller lacks permission on the bucket or object
    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    /// Bucket or object does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// Bucket name collision on creation
    #[error("Already exists: {0}")]
    AlreadyExists(String),

    /// Provider precondition failure (e.g. deleting a non-empty bucket)
    #[error("Precondition failed: {0}")]
    PreconditionFailed(String),

    /// Network or transport failure to the provider
    #[error("Network error: {0}")]
    Network(String),

    /// Object content is not valid text
    #[error("Decode error: {0}")]
    Decode(String),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Get the stable taxonomy label for this error
    ///
    /// Surfaced in tool error payloads so callers can branch without parsing
    /// the human-readable message.
    pub const fn kind(&self) -> &'static str {
        match self {
            Error::Config(_) => "config",
            Error::InvalidArgument(_) => "invalid_argument",
            Error::Auth(_) => "auth",
            Error::PermissionDenied(_) => "permission_denied",
            Error::NotFound(_) => "not_found",
            Error::AlreadyExists(_) => "already_exists",
            Error::PreconditionFailed(_) => "precondition_failed",
            Error::Network(_) => "network",
            Error::Decode(_) => "decode",
            Error::Json(_) => "json",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kinds() {
        assert_eq!(Error::Config("test".into()).kind(), "config");
        assert_eq!(Error::InvalidArgument("test".into()).kind(), "invalid_argument");
        assert_eq!(Error::Auth("test".into()).kind(), "auth");
        assert_eq!(Error::PermissionDenied("test".into()).kind(), "permission_denied");
        assert_eq!(Error::NotFound("test".into()).kind(), "not_found");
        assert_eq!(Error::AlreadyExists("test".into()).kind(), "already_exists");
        assert_eq!(
            Error::PreconditionFailed("test".into()).kind(),
            "precondition_failed"
        );
        assert_eq!(Error::Network("test".into()).kind(), "network");
        assert_eq!(Error::Decode("test".into()).kind(), "decode");
    }

    #[test]
    fn test_error_display() {
        let err = Error::NotFound("bucket 'missing'".into());
        assert_eq!(err.to_string(), "Not found: bucket 'missing'");

        let err = Error::PreconditionFailed("bucket 'full' is not empty".into());
        assert_eq!(
            err.to_string(),
            "Precondition failed: bucket 'full' is not empty"
        );
    }
}
