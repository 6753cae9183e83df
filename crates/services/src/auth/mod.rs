//! Sign-in strategies and the gate that owns the member session.

mod client;
mod directory;
mod gate;
mod hosted;
mod local;

use std::sync::Arc;

use async_trait::async_trait;
use course_core::model::{AuthStrategy, BackendSettings, Credentials, Email, MemberProfile};
use storage::repository::MemberRepository;
use url::Url;

use crate::Clock;
use crate::error::AuthError;

pub use client::BackendClient;
pub use directory::{DirectoryBackend, RestMemberDirectory};
pub use gate::AuthGate;
pub use hosted::HostedIdentityBackend;
pub use local::LocalPolicyBackend;

/// Verifies credentials for one sign-in strategy.
#[async_trait]
pub trait AuthBackend: Send + Sync {
    fn strategy(&self) -> AuthStrategy;

    /// Verify credentials and return the member's profile.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidCredentials` when the pair is rejected, or a
    /// lookup/network error when verification could not complete.
    async fn authenticate(&self, credentials: &Credentials) -> Result<MemberProfile, AuthError>;

    /// Start the password reset flow for `email`.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::ResetUnavailable` for strategies without a backend.
    async fn request_password_reset(
        &self,
        email: &Email,
        redirect_to: Option<&Url>,
    ) -> Result<(), AuthError>;
}

/// Notified whenever a member session starts, by sign-in or by restore.
#[async_trait]
pub trait SessionListener: Send + Sync {
    async fn session_started(&self, profile: &MemberProfile);
}

/// Select the backend named by `settings`.
///
/// `members` backs the directory strategy unless the REST directory is selected.
///
/// # Errors
///
/// Returns `reqwest::Error` if the HTTP client cannot be built.
pub fn backend_for(
    settings: &BackendSettings,
    clock: Clock,
    members: Arc<dyn MemberRepository>,
) -> Result<Arc<dyn AuthBackend>, reqwest::Error> {
    let client = BackendClient::from_settings(settings)?;
    let backend: Arc<dyn AuthBackend> = match (settings.strategy(), client) {
        (AuthStrategy::Hosted, Some(client)) => Arc::new(HostedIdentityBackend::new(client)),
        (AuthStrategy::Directory, client) => {
            let members: Arc<dyn MemberRepository> = match (&client, settings.remote_directory()) {
                (Some(client), true) => Arc::new(RestMemberDirectory::new(client.clone())),
                _ => members,
            };
            Arc::new(DirectoryBackend::new(members, client))
        }
        _ => Arc::new(LocalPolicyBackend::new(clock)),
    };
    tracing::info!(strategy = %backend.strategy(), "sign-in backend selected");
    Ok(backend)
}
