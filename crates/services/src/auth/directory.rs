use std::sync::Arc;

use async_trait::async_trait;
use course_core::model::{AuthStrategy, Credentials, Email, MemberProfile};
use storage::repository::{MemberRecord, MemberRepository, StorageError};
use url::Url;

use super::{AuthBackend, BackendClient};
use crate::error::AuthError;

/// Checks credentials against active member records.
pub struct DirectoryBackend {
    members: Arc<dyn MemberRepository>,
    recovery: Option<BackendClient>,
}

impl DirectoryBackend {
    /// `recovery` sends reset emails; without it reset is unavailable.
    #[must_use]
    pub fn new(members: Arc<dyn MemberRepository>, recovery: Option<BackendClient>) -> Self {
        Self { members, recovery }
    }
}

#[async_trait]
impl AuthBackend for DirectoryBackend {
    fn strategy(&self) -> AuthStrategy {
        AuthStrategy::Directory
    }

    async fn authenticate(&self, credentials: &Credentials) -> Result<MemberProfile, AuthError> {
        let record = self
            .members
            .find_active_by_email(credentials.email())
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        if record.password != credentials.password() {
            return Err(AuthError::InvalidCredentials);
        }
        Ok(record.to_profile())
    }

    async fn request_password_reset(
        &self,
        email: &Email,
        redirect_to: Option<&Url>,
    ) -> Result<(), AuthError> {
        let client = self.recovery.as_ref().ok_or(AuthError::ResetUnavailable)?;
        client.recover(email, redirect_to).await
    }
}

/// Member lookup through the hosted REST table.
#[derive(Clone)]
pub struct RestMemberDirectory {
    client: BackendClient,
}

impl RestMemberDirectory {
    #[must_use]
    pub fn new(client: BackendClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl MemberRepository for RestMemberDirectory {
    async fn find_active_by_email(
        &self,
        email: &Email,
    ) -> Result<Option<MemberRecord>, StorageError> {
        self.client
            .find_active_member(email)
            .await
            .map_err(|err| match err {
                AuthError::Network(inner) if inner.is_decode() => {
                    StorageError::Serialization(inner.to_string())
                }
                other => StorageError::Connection(other.to_string()),
            })
    }
}
