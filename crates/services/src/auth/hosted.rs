use async_trait::async_trait;
use course_core::model::{AuthStrategy, Credentials, Email, MemberProfile};
use url::Url;

use super::{AuthBackend, BackendClient};
use crate::error::AuthError;

/// Delegates verification to the hosted identity provider.
#[derive(Clone)]
pub struct HostedIdentityBackend {
    client: BackendClient,
}

impl HostedIdentityBackend {
    #[must_use]
    pub fn new(client: BackendClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl AuthBackend for HostedIdentityBackend {
    fn strategy(&self) -> AuthStrategy {
        AuthStrategy::Hosted
    }

    async fn authenticate(&self, credentials: &Credentials) -> Result<MemberProfile, AuthError> {
        self.client.password_grant(credentials).await
    }

    async fn request_password_reset(
        &self,
        email: &Email,
        redirect_to: Option<&Url>,
    ) -> Result<(), AuthError> {
        self.client.recover(email, redirect_to).await
    }
}
