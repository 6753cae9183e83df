use chrono::{DateTime, Utc};
use course_core::model::{Email, MemberId};
use sqlx::Row;
use sqlx::sqlite::SqliteRow;

use crate::repository::{MemberRecord, StorageError};

pub(crate) fn ser<E: core::fmt::Display>(e: E) -> StorageError {
    StorageError::Serialization(e.to_string())
}

pub(crate) fn map_member_row(row: &SqliteRow) -> Result<MemberRecord, StorageError> {
    let id: String = row.try_get("id").map_err(ser)?;
    let email: String = row.try_get("email").map_err(ser)?;
    let created_at: DateTime<Utc> = row.try_get("created_at").map_err(ser)?;

    Ok(MemberRecord {
        id: id.parse::<MemberId>().map_err(ser)?,
        email: Email::parse(&email).map_err(ser)?,
        password: row.try_get("password").map_err(ser)?,
        display_name: row.try_get("display_name").map_err(ser)?,
        is_active: row.try_get("is_active").map_err(ser)?,
        purchase_date: row.try_get("purchase_date").map_err(ser)?,
        created_at,
    })
}
