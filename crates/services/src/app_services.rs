use std::sync::Arc;

use course_core::model::BackendSettings;
use storage::repository::Storage;

use crate::Clock;
use crate::auth::{self, AuthGate, SessionListener};
use crate::error::AppServicesError;
use crate::progress::{ProgressStore, ProgressTracker};
use crate::session_store::SessionStore;

/// Assembles app-facing services and runs the one-time startup step.
#[derive(Clone)]
pub struct AppServices {
    auth: Arc<AuthGate>,
    progress: Arc<ProgressTracker>,
}

impl AppServices {
    /// Build services backed by `SQLite` storage.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if storage initialization or startup fails.
    pub async fn new_sqlite(
        db_url: &str,
        clock: Clock,
        settings: &BackendSettings,
    ) -> Result<Self, AppServicesError> {
        let storage = Storage::sqlite(db_url).await?;
        Self::from_storage(&storage, clock, settings).await
    }

    /// Build services over an existing storage bundle.
    ///
    /// Loads progress, then restores any stored session. The progress tracker
    /// listens for session starts so the enrollment date comes from the member.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if the backend client cannot be built or the
    /// stored state cannot be read.
    pub async fn from_storage(
        storage: &Storage,
        clock: Clock,
        settings: &BackendSettings,
    ) -> Result<Self, AppServicesError> {
        let progress = Arc::new(
            ProgressTracker::initialize(clock, ProgressStore::new(Arc::clone(&storage.kv)))
                .await?,
        );

        let backend = auth::backend_for(settings, clock, Arc::clone(&storage.members))?;
        let auth = AuthGate::new(
            backend,
            settings.password_policy(),
            SessionStore::new(Arc::clone(&storage.kv)),
            settings.reset_redirect_url().cloned(),
        )
        .with_listener(Arc::clone(&progress) as Arc<dyn SessionListener>);
        auth.restore().await?;

        Ok(Self {
            auth: Arc::new(auth),
            progress,
        })
    }

    #[must_use]
    pub fn auth_gate(&self) -> Arc<AuthGate> {
        Arc::clone(&self.auth)
    }

    #[must_use]
    pub fn progress(&self) -> Arc<ProgressTracker> {
        Arc::clone(&self.progress)
    }
}
