use std::fmt;
use std::sync::LazyLock;

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::ids::MemberId;

/// One `@` with a non-empty, whitespace-free part on each side.
static EMAIL_SHAPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^@\s]+@[^@\s]+$").expect("email pattern compiles"));

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum MemberError {
    #[error("email cannot be empty")]
    EmptyEmail,

    #[error("email is not a valid address")]
    InvalidEmail,

    #[error("password cannot be empty")]
    EmptyPassword,

    #[error("password must be at least {min} characters")]
    PasswordTooShort { min: usize },
}

//
// ─── EMAIL ─────────────────────────────────────────────────────────────────────
//

/// A trimmed, lowercased email address.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Email(String);

impl Email {
    /// Normalize and validate an address.
    ///
    /// # Errors
    ///
    /// Returns `MemberError::EmptyEmail` for blank input and
    /// `MemberError::InvalidEmail` when the address is not `local@domain`.
    pub fn parse(raw: &str) -> Result<Self, MemberError> {
        let normalized = raw.trim().to_lowercase();
        if normalized.is_empty() {
            return Err(MemberError::EmptyEmail);
        }
        if !EMAIL_SHAPE.is_match(&normalized) {
            return Err(MemberError::InvalidEmail);
        }
        Ok(Self(normalized))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The part before `@`.
    #[must_use]
    pub fn local_part(&self) -> &str {
        self.0.split('@').next().unwrap_or(&self.0)
    }
}

impl TryFrom<String> for Email {
    type Error = MemberError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Email> for String {
    fn from(value: Email) -> Self {
        value.0
    }
}

impl fmt::Debug for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Email({})", self.0)
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

//
// ─── CREDENTIALS ───────────────────────────────────────────────────────────────
//

/// Local password rule applied before any backend is contacted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PasswordPolicy {
    min_len: usize,
}

impl PasswordPolicy {
    pub const DEFAULT_MIN_LEN: usize = 6;

    #[must_use]
    pub fn new(min_len: usize) -> Self {
        Self {
            min_len: min_len.max(1),
        }
    }

    /// Policy for strategies that leave password rules to the identity provider.
    #[must_use]
    pub fn delegated() -> Self {
        Self { min_len: 1 }
    }

    #[must_use]
    pub fn min_len(&self) -> usize {
        self.min_len
    }

    /// # Errors
    ///
    /// Returns `MemberError` when the password is empty or shorter than the minimum.
    pub fn check(&self, password: &str) -> Result<(), MemberError> {
        let len = password.chars().count();
        if len == 0 {
            return Err(MemberError::EmptyPassword);
        }
        if len < self.min_len {
            return Err(MemberError::PasswordTooShort { min: self.min_len });
        }
        Ok(())
    }
}

impl Default for PasswordPolicy {
    fn default() -> Self {
        Self::new(Self::DEFAULT_MIN_LEN)
    }
}

/// Raw login form input.
#[derive(Clone, Default)]
pub struct CredentialsDraft {
    pub email: String,
    pub password: String,
}

impl CredentialsDraft {
    #[must_use]
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }

    /// Validate the draft against the given password policy.
    ///
    /// # Errors
    ///
    /// Returns `MemberError` if the email or password is rejected.
    pub fn validate(self, policy: PasswordPolicy) -> Result<Credentials, MemberError> {
        let email = Email::parse(&self.email)?;
        policy.check(&self.password)?;
        Ok(Credentials {
            email,
            password: self.password,
        })
    }
}

/// Validated login input. The password is never printed.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    email: Email,
    password: String,
}

impl Credentials {
    #[must_use]
    pub fn email(&self) -> &Email {
        &self.email
    }

    #[must_use]
    pub fn password(&self) -> &str {
        &self.password
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

//
// ─── PROFILE ───────────────────────────────────────────────────────────────────
//

/// The authenticated member as persisted in the session blob.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberProfile {
    id: MemberId,
    email: Email,
    #[serde(default)]
    display_name: Option<String>,
    #[serde(default)]
    created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    purchase_date: Option<DateTime<Utc>>,
}

impl MemberProfile {
    #[must_use]
    pub fn new(id: MemberId, email: Email, created_at: Option<DateTime<Utc>>) -> Self {
        Self {
            id,
            email,
            display_name: None,
            created_at,
            purchase_date: None,
        }
    }

    #[must_use]
    pub fn with_display_name(mut self, display_name: Option<String>) -> Self {
        self.display_name = display_name
            .map(|name| name.trim().to_owned())
            .filter(|name| !name.is_empty());
        self
    }

    #[must_use]
    pub fn with_purchase_date(mut self, purchase_date: Option<DateTime<Utc>>) -> Self {
        self.purchase_date = purchase_date;
        self
    }

    #[must_use]
    pub fn id(&self) -> MemberId {
        self.id
    }

    #[must_use]
    pub fn email(&self) -> &Email {
        &self.email
    }

    #[must_use]
    pub fn display_name(&self) -> Option<&str> {
        self.display_name.as_deref()
    }

    /// When the member record was created on the backend.
    #[must_use]
    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        self.created_at
    }

    #[must_use]
    pub fn purchase_date(&self) -> Option<DateTime<Utc>> {
        self.purchase_date
    }

    /// Name used in greetings: the display name, or the email's local part.
    #[must_use]
    pub fn greeting_name(&self) -> &str {
        self.display_name().unwrap_or_else(|| self.email.local_part())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::fixed_now;

    #[test]
    fn email_is_normalized() {
        let email = Email::parse("  Ana@Example.COM ").unwrap();
        assert_eq!(email.as_str(), "ana@example.com");
        assert_eq!(email.local_part(), "ana");
    }

    #[test]
    fn email_rejects_blank_and_malformed() {
        assert_eq!(Email::parse("   "), Err(MemberError::EmptyEmail));
        assert_eq!(Email::parse("not-an-email"), Err(MemberError::InvalidEmail));
        assert_eq!(Email::parse("ana@"), Err(MemberError::InvalidEmail));
        assert_eq!(Email::parse("a@b@c"), Err(MemberError::InvalidEmail));
        assert_eq!(Email::parse("ana maria@x.com"), Err(MemberError::InvalidEmail));
    }

    #[test]
    fn email_accepts_single_label_domains() {
        let email = Email::parse("User@LocalHost").unwrap();
        assert_eq!(email.as_str(), "user@localhost");
        assert_eq!(email.local_part(), "user");
    }

    #[test]
    fn short_password_is_rejected_by_default_policy() {
        let err = CredentialsDraft::new("a@b.com", "1234")
            .validate(PasswordPolicy::default())
            .unwrap_err();
        assert_eq!(err, MemberError::PasswordTooShort { min: 6 });
    }

    #[test]
    fn delegated_policy_only_requires_a_password() {
        let creds = CredentialsDraft::new("a@b.com", "1234")
            .validate(PasswordPolicy::delegated())
            .unwrap();
        assert_eq!(creds.password(), "1234");

        let err = CredentialsDraft::new("a@b.com", "")
            .validate(PasswordPolicy::delegated())
            .unwrap_err();
        assert_eq!(err, MemberError::EmptyPassword);
    }

    #[test]
    fn credentials_debug_redacts_password() {
        let creds = CredentialsDraft::new("a@b.com", "secret-pass")
            .validate(PasswordPolicy::default())
            .unwrap();
        let printed = format!("{creds:?}");
        assert!(!printed.contains("secret-pass"));
    }

    #[test]
    fn profile_round_trips_through_json() {
        let profile = MemberProfile::new(
            MemberId::generate(),
            Email::parse("a@b.com").unwrap(),
            Some(fixed_now()),
        )
        .with_display_name(Some("  Ana ".into()));

        let json = serde_json::to_string(&profile).unwrap();
        let restored: MemberProfile = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, profile);
        assert_eq!(restored.greeting_name(), "Ana");
    }

    #[test]
    fn profile_rejects_invalid_email_on_load() {
        let json = format!(
            r#"{{"id":"{}","email":"nope"}}"#,
            MemberId::generate()
        );
        assert!(serde_json::from_str::<MemberProfile>(&json).is_err());
    }
}
