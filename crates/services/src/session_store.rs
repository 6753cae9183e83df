use std::sync::Arc;

use course_core::model::MemberProfile;
use storage::repository::KeyValueRepository;

use crate::error::SessionStoreError;

/// Storage key holding the serialized member profile.
pub const SESSION_KEY: &str = "user_session";

/// Persists the signed-in member's profile under a single key.
#[derive(Clone)]
pub struct SessionStore {
    kv: Arc<dyn KeyValueRepository>,
}

impl SessionStore {
    #[must_use]
    pub fn new(kv: Arc<dyn KeyValueRepository>) -> Self {
        Self { kv }
    }

    /// Read the stored profile.
    ///
    /// A value that no longer parses is removed and reported as absent.
    ///
    /// # Errors
    ///
    /// Returns `SessionStoreError::Storage` if the key cannot be read or cleared.
    pub async fn load(&self) -> Result<Option<MemberProfile>, SessionStoreError> {
        let Some(raw) = self.kv.get_value(SESSION_KEY).await? else {
            return Ok(None);
        };

        match serde_json::from_str::<MemberProfile>(&raw) {
            Ok(profile) => Ok(Some(profile)),
            Err(err) => {
                tracing::warn!(key = SESSION_KEY, error = %err, "discarding unreadable session");
                self.kv.remove_value(SESSION_KEY).await?;
                Ok(None)
            }
        }
    }

    /// Replace the stored profile.
    ///
    /// # Errors
    ///
    /// Returns `SessionStoreError` if encoding or the write fails.
    pub async fn save(&self, profile: &MemberProfile) -> Result<(), SessionStoreError> {
        let raw = serde_json::to_string(profile)?;
        self.kv.put_value(SESSION_KEY, &raw).await?;
        Ok(())
    }

    /// Remove the stored profile. Clearing an empty store succeeds.
    ///
    /// # Errors
    ///
    /// Returns `SessionStoreError::Storage` if the key cannot be removed.
    pub async fn clear(&self) -> Result<(), SessionStoreError> {
        self.kv.remove_value(SESSION_KEY).await?;
        Ok(())
    }
}
