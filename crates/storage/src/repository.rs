use async_trait::async_trait;
use chrono::{DateTime, Utc};
use course_core::model::{Email, MemberId, MemberProfile};
use serde::Deserialize;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use thiserror::Error;

/// Errors surfaced by storage adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("conflict")]
    Conflict,

    #[error("connection error: {0}")]
    Connection(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

/// A member row as the backend stores it.
///
/// Field aliases accept the column names used by the hosted `members` table,
/// so REST responses deserialize straight into this shape.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MemberRecord {
    pub id: MemberId,
    pub email: Email,
    #[serde(alias = "password_hash")]
    pub password: String,
    #[serde(default, alias = "nome_exibicao")]
    pub display_name: Option<String>,
    pub is_active: bool,
    #[serde(default)]
    pub purchase_date: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl MemberRecord {
    /// Session profile derived from the record. The password never leaves storage.
    #[must_use]
    pub fn to_profile(&self) -> MemberProfile {
        MemberProfile::new(self.id, self.email.clone(), Some(self.created_at))
            .with_display_name(self.display_name.clone())
            .with_purchase_date(self.purchase_date)
    }
}

/// Persistent string key-value storage owned by the local installation.
#[async_trait]
pub trait KeyValueRepository: Send + Sync {
    /// Fetch the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backing store cannot be read.
    async fn get_value(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Store `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the value cannot be stored.
    async fn put_value(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Remove `key`. Removing a missing key succeeds.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backing store cannot be written.
    async fn remove_value(&self, key: &str) -> Result<(), StorageError>;
}

/// Lookup contract for member records.
#[async_trait]
pub trait MemberRepository: Send + Sync {
    /// Find the active member with this email.
    ///
    /// Returns `Ok(None)` when no active record matches.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the lookup itself fails.
    async fn find_active_by_email(
        &self,
        email: &Email,
    ) -> Result<Option<MemberRecord>, StorageError>;
}

/// Simple in-memory repository implementation for testing and prototyping.
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    values: Arc<Mutex<HashMap<String, String>>>,
    members: Arc<Mutex<HashMap<Email, MemberRecord>>>,
}

impl InMemoryRepository {
    #[must_use]
    pub fn new() -> Self {
        Self {
            values: Arc::new(Mutex::new(HashMap::new())),
            members: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Insert or replace a member record keyed by email.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Connection` if the lock is poisoned.
    pub fn upsert_member(&self, record: MemberRecord) -> Result<(), StorageError> {
        let mut guard = self
            .members
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        guard.insert(record.email.clone(), record);
        Ok(())
    }
}

#[async_trait]
impl KeyValueRepository for InMemoryRepository {
    async fn get_value(&self, key: &str) -> Result<Option<String>, StorageError> {
        let guard = self
            .values
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(guard.get(key).cloned())
    }

    async fn put_value(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut guard = self
            .values
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        guard.insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    async fn remove_value(&self, key: &str) -> Result<(), StorageError> {
        let mut guard = self
            .values
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        guard.remove(key);
        Ok(())
    }
}

#[async_trait]
impl MemberRepository for InMemoryRepository {
    async fn find_active_by_email(
        &self,
        email: &Email,
    ) -> Result<Option<MemberRecord>, StorageError> {
        let guard = self
            .members
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(guard.get(email).filter(|record| record.is_active).cloned())
    }
}

/// Aggregates repositories behind trait objects for easy backend swapping.
#[derive(Clone)]
pub struct Storage {
    pub kv: Arc<dyn KeyValueRepository>,
    pub members: Arc<dyn MemberRepository>,
}

impl Storage {
    #[must_use]
    pub fn in_memory() -> Self {
        Self::from_in_memory(InMemoryRepository::new())
    }

    /// Wrap an existing in-memory repository so callers can keep a handle for seeding.
    #[must_use]
    pub fn from_in_memory(repo: InMemoryRepository) -> Self {
        let kv: Arc<dyn KeyValueRepository> = Arc::new(repo.clone());
        let members: Arc<dyn MemberRepository> = Arc::new(repo);
        Self { kv, members }
    }
}
