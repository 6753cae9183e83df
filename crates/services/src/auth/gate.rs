use std::sync::{Arc, PoisonError, RwLock};

use course_core::model::{AuthStrategy, CredentialsDraft, Email, MemberProfile, PasswordPolicy};
use url::Url;

use super::{AuthBackend, SessionListener};
use crate::error::{AuthError, SessionStoreError};
use crate::session_store::SessionStore;

/// Owns the signed-in member and keeps the session store in step with it.
pub struct AuthGate {
    backend: Arc<dyn AuthBackend>,
    policy: PasswordPolicy,
    sessions: SessionStore,
    reset_redirect: Option<Url>,
    listeners: Vec<Arc<dyn SessionListener>>,
    current: RwLock<Option<MemberProfile>>,
}

impl AuthGate {
    #[must_use]
    pub fn new(
        backend: Arc<dyn AuthBackend>,
        policy: PasswordPolicy,
        sessions: SessionStore,
        reset_redirect: Option<Url>,
    ) -> Self {
        Self {
            backend,
            policy,
            sessions,
            reset_redirect,
            listeners: Vec::new(),
            current: RwLock::new(None),
        }
    }

    /// Register `listener` for session starts.
    #[must_use]
    pub fn with_listener(mut self, listener: Arc<dyn SessionListener>) -> Self {
        self.listeners.push(listener);
        self
    }

    /// Restore a previously stored session, if any.
    ///
    /// # Errors
    ///
    /// Returns `SessionStoreError` if the session store cannot be read.
    pub async fn restore(&self) -> Result<Option<MemberProfile>, SessionStoreError> {
        let restored = self.sessions.load().await?;
        self.set_current(restored.clone());
        if let Some(profile) = &restored {
            tracing::info!(member = %profile.id(), "session restored");
            self.notify(profile).await;
        }
        Ok(restored)
    }

    /// Verify credentials and start a session.
    ///
    /// On failure the stored session is left untouched.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidCredentials` for rejected credentials
    /// (including passwords shorter than the policy allows), a lookup or
    /// network error when the backend fails, or `AuthError::Session` if the
    /// session cannot be stored.
    pub async fn login(&self, email: &str, password: &str) -> Result<MemberProfile, AuthError> {
        let strategy = self.backend.strategy();
        let result = self.authenticate(email, password).await;

        match &result {
            Ok(profile) => {
                tracing::info!(%strategy, member = %profile.id(), "sign-in succeeded");
            }
            Err(err) if err.is_invalid_credentials() => {
                tracing::info!(%strategy, "sign-in rejected");
            }
            Err(err) => {
                tracing::warn!(%strategy, error = %err, "sign-in failed");
            }
        }
        result
    }

    async fn authenticate(&self, email: &str, password: &str) -> Result<MemberProfile, AuthError> {
        let credentials = CredentialsDraft::new(email, password).validate(self.policy)?;
        let profile = self.backend.authenticate(&credentials).await?;
        self.sessions.save(&profile).await?;
        self.set_current(Some(profile.clone()));
        self.notify(&profile).await;
        Ok(profile)
    }

    async fn notify(&self, profile: &MemberProfile) {
        for listener in &self.listeners {
            listener.session_started(profile).await;
        }
    }

    /// End the session. Safe to call when nobody is signed in.
    pub async fn logout(&self) {
        self.set_current(None);
        if let Err(err) = self.sessions.clear().await {
            tracing::warn!(error = %err, "stored session could not be cleared");
        }
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }

    #[must_use]
    pub fn current_profile(&self) -> Option<MemberProfile> {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    #[must_use]
    pub fn strategy(&self) -> AuthStrategy {
        self.backend.strategy()
    }

    #[must_use]
    pub fn password_policy(&self) -> PasswordPolicy {
        self.policy
    }

    /// Ask the backend to send a password reset link.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Validation` for a malformed email,
    /// `AuthError::ResetUnavailable` when the strategy has no backend, or a
    /// network error.
    pub async fn request_password_reset(&self, email: &str) -> Result<(), AuthError> {
        let email = Email::parse(email)?;
        let result = self
            .backend
            .request_password_reset(&email, self.reset_redirect.as_ref())
            .await;
        if let Err(err) = &result {
            tracing::warn!(strategy = %self.backend.strategy(), error = %err, "password reset request failed");
        }
        result
    }

    fn set_current(&self, profile: Option<MemberProfile>) {
        *self.current.write().unwrap_or_else(PoisonError::into_inner) = profile;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::Duration;
    use course_core::model::MemberId;
    use course_core::time::{fixed_clock, fixed_now};
    use storage::repository::{InMemoryRepository, KeyValueRepository, MemberRecord};

    use crate::auth::{DirectoryBackend, LocalPolicyBackend};
    use crate::session_store::SESSION_KEY;

    fn directory_gate(repo: &InMemoryRepository) -> AuthGate {
        AuthGate::new(
            Arc::new(DirectoryBackend::new(Arc::new(repo.clone()), None)),
            PasswordPolicy::default(),
            SessionStore::new(Arc::new(repo.clone())),
            None,
        )
    }

    fn seed_member(repo: &InMemoryRepository) -> MemberRecord {
        let record = MemberRecord {
            id: MemberId::generate(),
            email: Email::parse("a@b.com").unwrap(),
            password: "segredo".into(),
            display_name: None,
            is_active: true,
            purchase_date: None,
            created_at: fixed_now() - Duration::days(2),
        };
        repo.upsert_member(record.clone()).unwrap();
        record
    }

    #[tokio::test]
    async fn short_password_is_invalid_credentials_and_stores_nothing() {
        let repo = InMemoryRepository::new();
        seed_member(&repo);
        let gate = directory_gate(&repo);

        let err = gate.login("a@b.com", "1234").await.unwrap_err();

        assert!(err.is_invalid_credentials());
        assert!(!gate.is_authenticated());
        assert_eq!(repo.get_value(SESSION_KEY).await.unwrap(), None);
    }

    #[tokio::test]
    async fn successful_login_persists_session() {
        let repo = InMemoryRepository::new();
        let member = seed_member(&repo);
        let gate = directory_gate(&repo);

        let profile = gate.login("a@b.com", "segredo").await.unwrap();

        assert_eq!(profile.id(), member.id);
        assert!(gate.is_authenticated());
        assert_eq!(gate.current_profile(), Some(profile.clone()));

        let restored = directory_gate(&repo);
        assert!(!restored.is_authenticated());
        assert_eq!(restored.restore().await.unwrap(), Some(profile));
        assert!(restored.is_authenticated());
    }

    #[derive(Default)]
    struct StartedSessions(RwLock<Vec<MemberId>>);

    #[async_trait]
    impl SessionListener for StartedSessions {
        async fn session_started(&self, profile: &MemberProfile) {
            self.0.write().unwrap().push(profile.id());
        }
    }

    #[tokio::test]
    async fn listeners_hear_sign_in_and_restore_but_not_failures() {
        let repo = InMemoryRepository::new();
        let member = seed_member(&repo);
        let started = Arc::new(StartedSessions::default());
        let listener: Arc<dyn SessionListener> = started.clone();
        let gate = directory_gate(&repo).with_listener(Arc::clone(&listener));

        gate.login("a@b.com", "errado!").await.unwrap_err();
        assert!(started.0.read().unwrap().is_empty());

        gate.login("a@b.com", "segredo").await.unwrap();
        let restored = directory_gate(&repo).with_listener(listener);
        restored.restore().await.unwrap();

        assert_eq!(*started.0.read().unwrap(), vec![member.id, member.id]);
    }

    #[tokio::test]
    async fn failed_login_keeps_existing_session() {
        let repo = InMemoryRepository::new();
        seed_member(&repo);
        let gate = directory_gate(&repo);
        let profile = gate.login("a@b.com", "segredo").await.unwrap();

        let err = gate.login("a@b.com", "errado!").await.unwrap_err();

        assert!(err.is_invalid_credentials());
        assert_eq!(gate.current_profile(), Some(profile.clone()));
        let stored = SessionStore::new(Arc::new(repo.clone())).load().await.unwrap();
        assert_eq!(stored, Some(profile));
    }

    #[tokio::test]
    async fn logout_clears_state_and_is_idempotent() {
        let repo = InMemoryRepository::new();
        seed_member(&repo);
        let gate = directory_gate(&repo);
        gate.login("a@b.com", "segredo").await.unwrap();

        gate.logout().await;
        gate.logout().await;

        assert!(!gate.is_authenticated());
        assert_eq!(gate.current_profile(), None);
        assert_eq!(repo.get_value(SESSION_KEY).await.unwrap(), None);
    }

    #[tokio::test]
    async fn malformed_email_is_a_validation_error() {
        let repo = InMemoryRepository::new();
        let gate = AuthGate::new(
            Arc::new(LocalPolicyBackend::new(fixed_clock())),
            PasswordPolicy::default(),
            SessionStore::new(Arc::new(repo)),
            None,
        );

        let err = gate.login("not-an-email", "segredo").await.unwrap_err();

        assert!(matches!(err, AuthError::Validation(_)));
        assert!(!err.is_invalid_credentials());
    }

    #[tokio::test]
    async fn local_strategy_reports_reset_unavailable() {
        let gate = AuthGate::new(
            Arc::new(LocalPolicyBackend::new(fixed_clock())),
            PasswordPolicy::default(),
            SessionStore::new(Arc::new(InMemoryRepository::new())),
            None,
        );

        let err = gate.request_password_reset("a@b.com").await.unwrap_err();

        assert!(matches!(err, AuthError::ResetUnavailable));
        assert_eq!(gate.strategy(), AuthStrategy::Local);
    }
}
