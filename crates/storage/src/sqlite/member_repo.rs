use async_trait::async_trait;
use chrono::Utc;
use course_core::model::Email;

use super::SqliteRepository;
use super::mapping::map_member_row;
use crate::repository::{MemberRecord, MemberRepository, StorageError};

#[async_trait]
impl MemberRepository for SqliteRepository {
    async fn find_active_by_email(
        &self,
        email: &Email,
    ) -> Result<Option<MemberRecord>, StorageError> {
        let row = sqlx::query(
            r"
            SELECT id, email, password, display_name, is_active, purchase_date, created_at
            FROM members
            WHERE email = ?1 AND is_active = 1
            LIMIT 1
            ",
        )
        .bind(email.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| StorageError::Connection(e.to_string()))?;

        row.as_ref().map(map_member_row).transpose()
    }
}

impl SqliteRepository {
    /// Insert or update a member keyed by email.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Conflict` if the id belongs to another email,
    /// or `StorageError::Connection` on other database failures.
    pub async fn upsert_member(&self, record: &MemberRecord) -> Result<(), StorageError> {
        sqlx::query(
            r"
            INSERT INTO members (
                id, email, password, display_name, is_active, purchase_date, created_at, updated_at
            )
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
            ON CONFLICT(email) DO UPDATE SET
                password = excluded.password,
                display_name = excluded.display_name,
                is_active = excluded.is_active,
                purchase_date = excluded.purchase_date,
                updated_at = excluded.updated_at
            ",
        )
        .bind(record.id.to_string())
        .bind(record.email.as_str())
        .bind(&record.password)
        .bind(record.display_name.as_deref())
        .bind(record.is_active)
        .bind(record.purchase_date)
        .bind(record.created_at)
        .bind(Utc::now())
        .execute(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(db) if db.is_unique_violation() => StorageError::Conflict,
            other => StorageError::Connection(other.to_string()),
        })?;

        Ok(())
    }
}
