use std::sync::Arc;

use chrono::{DateTime, Utc};
use course_core::model::{ModuleId, ProgressState};
use storage::repository::KeyValueRepository;

use crate::error::ProgressServiceError;

/// Storage key holding the JSON array of completed module ids.
pub const PROGRESS_KEY: &str = "course_progress";
/// Storage key holding the RFC 3339 enrollment timestamp.
pub const ENROLLMENT_KEY: &str = "course_enrollment";

/// Reads and writes the two progress keys.
#[derive(Clone)]
pub struct ProgressStore {
    kv: Arc<dyn KeyValueRepository>,
}

impl ProgressStore {
    #[must_use]
    pub fn new(kv: Arc<dyn KeyValueRepository>) -> Self {
        Self { kv }
    }

    /// Load the persisted progress.
    ///
    /// Unreadable values are cleared and treated as absent; ids outside the
    /// catalog are dropped.
    ///
    /// # Errors
    ///
    /// Returns `ProgressServiceError::Storage` if the keys cannot be read or cleared.
    pub async fn load(&self) -> Result<ProgressState, ProgressServiceError> {
        let completed = match self.kv.get_value(PROGRESS_KEY).await? {
            None => Vec::new(),
            Some(raw) => match serde_json::from_str::<Vec<ModuleId>>(&raw) {
                Ok(ids) => ids,
                Err(err) => {
                    tracing::warn!(key = PROGRESS_KEY, error = %err, "discarding unreadable progress");
                    self.kv.remove_value(PROGRESS_KEY).await?;
                    Vec::new()
                }
            },
        };

        let enrollment = match self.kv.get_value(ENROLLMENT_KEY).await? {
            None => None,
            Some(raw) => match DateTime::parse_from_rfc3339(raw.trim()) {
                Ok(at) => Some(at.with_timezone(&Utc)),
                Err(err) => {
                    tracing::warn!(key = ENROLLMENT_KEY, error = %err, "discarding unreadable enrollment date");
                    self.kv.remove_value(ENROLLMENT_KEY).await?;
                    None
                }
            },
        };

        Ok(ProgressState::from_persisted(completed, enrollment))
    }

    /// Overwrite the completed set with the ids in `state`.
    ///
    /// # Errors
    ///
    /// Returns `ProgressServiceError` if encoding or the write fails.
    pub async fn save_completed(&self, state: &ProgressState) -> Result<(), ProgressServiceError> {
        let raw = serde_json::to_string(&state.completed_ids())?;
        self.kv.put_value(PROGRESS_KEY, &raw).await?;
        Ok(())
    }

    /// Persist the enrollment date.
    ///
    /// # Errors
    ///
    /// Returns `ProgressServiceError::Storage` if the write fails.
    pub async fn save_enrollment(&self, at: DateTime<Utc>) -> Result<(), ProgressServiceError> {
        self.kv.put_value(ENROLLMENT_KEY, &at.to_rfc3339()).await?;
        Ok(())
    }
}
