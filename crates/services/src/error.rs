//! Shared error types for the services crate.

use thiserror::Error;

use course_core::model::{MemberError, ProgressError, SettingsError};
use storage::repository::StorageError;
use storage::sqlite::SqliteInitError;

/// Errors emitted by `SessionStore`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SessionStoreError {
    #[error("session could not be encoded: {0}")]
    Encode(#[from] serde_json::Error),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted by `ProgressStore` and `ProgressTracker`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ProgressServiceError {
    #[error(transparent)]
    Progress(#[from] ProgressError),
    #[error("progress could not be encoded: {0}")]
    Encode(#[from] serde_json::Error),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted by `AuthGate` and the authentication backends.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AuthError {
    #[error("invalid email or password")]
    InvalidCredentials,
    #[error(transparent)]
    Validation(MemberError),
    #[error("member lookup failed: {0}")]
    Lookup(#[from] StorageError),
    #[error("identity provider returned status {0}")]
    HttpStatus(reqwest::StatusCode),
    #[error(transparent)]
    Network(#[from] reqwest::Error),
    #[error("identity provider returned an unexpected response: {0}")]
    UnexpectedResponse(String),
    #[error("password reset is not available for this sign-in method")]
    ResetUnavailable,
    #[error(transparent)]
    Session(#[from] SessionStoreError),
}

impl AuthError {
    /// Whether the failure means the member typed the wrong email or password.
    #[must_use]
    pub fn is_invalid_credentials(&self) -> bool {
        matches!(self, Self::InvalidCredentials)
    }

    /// Whether the failure came from an unreachable or misbehaving backend.
    #[must_use]
    pub fn is_backend_failure(&self) -> bool {
        matches!(
            self,
            Self::Lookup(_) | Self::HttpStatus(_) | Self::Network(_) | Self::UnexpectedResponse(_)
        )
    }
}

impl From<MemberError> for AuthError {
    fn from(err: MemberError) -> Self {
        match err {
            MemberError::EmptyPassword | MemberError::PasswordTooShort { .. } => {
                Self::InvalidCredentials
            }
            other => Self::Validation(other),
        }
    }
}

/// Errors emitted while bootstrapping app services.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppServicesError {
    #[error(transparent)]
    Sqlite(#[from] SqliteInitError),
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error(transparent)]
    Settings(#[from] SettingsError),
    #[error(transparent)]
    Session(#[from] SessionStoreError),
    #[error(transparent)]
    Progress(#[from] ProgressServiceError),
    #[error("http client could not be built: {0}")]
    HttpClient(#[from] reqwest::Error),
}
