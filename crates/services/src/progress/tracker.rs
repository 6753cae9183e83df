use std::sync::{PoisonError, RwLock, RwLockReadGuard};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use course_core::model::{MemberProfile, ModuleId, ProgressState};

use crate::Clock;
use crate::auth::SessionListener;
use crate::error::ProgressServiceError;
use crate::progress::store::ProgressStore;

/// Tracks completed modules and the bonus countdown for this installation.
pub struct ProgressTracker {
    clock: Clock,
    store: ProgressStore,
    state: RwLock<ProgressState>,
}

impl ProgressTracker {
    /// Load persisted progress.
    ///
    /// The enrollment date stays unset until a member session starts.
    ///
    /// # Errors
    ///
    /// Returns `ProgressServiceError::Storage` if the stored keys cannot be read.
    pub async fn initialize(
        clock: Clock,
        store: ProgressStore,
    ) -> Result<Self, ProgressServiceError> {
        let state = store.load().await?;
        Ok(Self {
            clock,
            store,
            state: RwLock::new(state),
        })
    }

    /// Record the enrollment date for `profile` if none is stored yet.
    ///
    /// The date is the profile's `created_at`, or now when the profile has
    /// none. A stored date is never replaced. Returns `true` if a date was recorded.
    ///
    /// # Errors
    ///
    /// Returns `ProgressServiceError::Storage` if the date cannot be persisted.
    pub async fn record_enrollment(
        &self,
        profile: &MemberProfile,
    ) -> Result<bool, ProgressServiceError> {
        let origin = profile.created_at().unwrap_or_else(|| self.clock.now());
        let recorded = self
            .state
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .ensure_enrollment(origin);
        if recorded {
            self.store.save_enrollment(origin).await?;
            tracing::info!(member = %profile.id(), enrollment = %origin, "enrollment date recorded");
        }
        Ok(recorded)
    }

    /// Mark a module as completed and persist the full set.
    ///
    /// Returns `true` if the module was newly completed. Repeat calls do not write.
    ///
    /// # Errors
    ///
    /// Returns `ProgressServiceError::Progress` for ids outside the catalog and
    /// `ProgressServiceError::Storage` if the write fails.
    pub async fn mark_complete(&self, id: ModuleId) -> Result<bool, ProgressServiceError> {
        let snapshot = {
            let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
            if !state.mark_complete(id)? {
                return Ok(false);
            }
            state.clone()
        };

        self.store.save_completed(&snapshot).await?;
        tracing::info!(module = %id, "module completed");
        Ok(true)
    }

    #[must_use]
    pub fn is_complete(&self, id: ModuleId) -> bool {
        self.read().is_complete(id)
    }

    /// Share of core modules completed, `0..=100`.
    #[must_use]
    pub fn completion_percentage(&self) -> u8 {
        self.read().completion_percentage()
    }

    /// Number of core modules completed.
    #[must_use]
    pub fn completed_count(&self) -> u32 {
        self.read().completed_core_count()
    }

    #[must_use]
    pub fn can_access_bonus(&self) -> bool {
        self.read().can_access_bonus(self.clock.now())
    }

    #[must_use]
    pub fn days_until_bonus(&self) -> u32 {
        self.read().days_until_bonus(self.clock.now())
    }

    #[must_use]
    pub fn enrollment_date(&self) -> Option<DateTime<Utc>> {
        self.read().enrollment_date()
    }

    /// Copy of the current state.
    #[must_use]
    pub fn snapshot(&self) -> ProgressState {
        self.read().clone()
    }

    fn read(&self) -> RwLockReadGuard<'_, ProgressState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl SessionListener for ProgressTracker {
    async fn session_started(&self, profile: &MemberProfile) {
        if let Err(err) = self.record_enrollment(profile).await {
            tracing::warn!(error = %err, "enrollment date could not be recorded");
        }
    }
}
