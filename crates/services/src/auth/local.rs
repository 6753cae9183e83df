use async_trait::async_trait;
use course_core::model::{AuthStrategy, Credentials, Email, MemberId, MemberProfile};
use url::Url;

use super::AuthBackend;
use crate::Clock;
use crate::error::AuthError;

/// Accepts any credentials that pass the password policy.
///
/// There is no member directory: every sign-in creates a fresh profile.
#[derive(Debug, Clone, Copy)]
pub struct LocalPolicyBackend {
    clock: Clock,
}

impl LocalPolicyBackend {
    #[must_use]
    pub fn new(clock: Clock) -> Self {
        Self { clock }
    }
}

#[async_trait]
impl AuthBackend for LocalPolicyBackend {
    fn strategy(&self) -> AuthStrategy {
        AuthStrategy::Local
    }

    async fn authenticate(&self, credentials: &Credentials) -> Result<MemberProfile, AuthError> {
        Ok(MemberProfile::new(
            MemberId::generate(),
            credentials.email().clone(),
            Some(self.clock.now()),
        ))
    }

    async fn request_password_reset(
        &self,
        _email: &Email,
        _redirect_to: Option<&Url>,
    ) -> Result<(), AuthError> {
        Err(AuthError::ResetUnavailable)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use course_core::model::{CredentialsDraft, PasswordPolicy};
    use course_core::time::{fixed_clock, fixed_now};

    #[tokio::test]
    async fn any_valid_credentials_produce_a_fresh_profile() {
        let backend = LocalPolicyBackend::new(fixed_clock());
        let credentials = CredentialsDraft::new("ana@example.com", "secret1")
            .validate(PasswordPolicy::default())
            .unwrap();

        let first = backend.authenticate(&credentials).await.unwrap();
        let second = backend.authenticate(&credentials).await.unwrap();

        assert_eq!(first.email().as_str(), "ana@example.com");
        assert_eq!(first.created_at(), Some(fixed_now()));
        assert_ne!(first.id(), second.id());
    }

    #[tokio::test]
    async fn reset_is_unavailable() {
        let backend = LocalPolicyBackend::new(fixed_clock());
        let email = Email::parse("ana@example.com").unwrap();

        let err = backend.request_password_reset(&email, None).await.unwrap_err();

        assert!(matches!(err, AuthError::ResetUnavailable));
    }
}
