use std::fmt;
use std::str::FromStr;

use thiserror::Error;
use url::Url;

use crate::model::member::PasswordPolicy;

/// How credentials are verified.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AuthStrategy {
    /// Accept any well-formed email with a password meeting the local minimum.
    #[default]
    Local,
    /// Look up an active member record and compare the stored password.
    Directory,
    /// Delegate verification to the hosted identity provider.
    Hosted,
}

impl AuthStrategy {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            AuthStrategy::Local => "local",
            AuthStrategy::Directory => "directory",
            AuthStrategy::Hosted => "hosted",
        }
    }
}

impl fmt::Display for AuthStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AuthStrategy {
    type Err = SettingsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "local" => Ok(AuthStrategy::Local),
            "directory" => Ok(AuthStrategy::Directory),
            "hosted" => Ok(AuthStrategy::Hosted),
            other => Err(SettingsError::UnknownStrategy(other.to_owned())),
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SettingsError {
    #[error("unknown auth strategy: {0}")]
    UnknownStrategy(String),
    #[error("invalid backend URL")]
    InvalidBaseUrl,
    #[error("invalid password reset redirect URL")]
    InvalidRedirectUrl,
    #[error("{0} requires a backend URL")]
    MissingBaseUrl(AuthStrategy),
    #[error("{0} requires a backend API key")]
    MissingApiKey(AuthStrategy),
    #[error("minimum password length must be > 0")]
    InvalidMinPasswordLen,
}

/// Validated backend configuration.
#[derive(Clone, PartialEq, Eq)]
pub struct BackendSettings {
    strategy: AuthStrategy,
    base_url: Option<Url>,
    api_key: Option<String>,
    remote_directory: bool,
    password_policy: PasswordPolicy,
    reset_redirect_url: Option<Url>,
}

/// Unvalidated backend configuration as read from flags and environment.
#[derive(Clone, Debug, Default)]
pub struct BackendSettingsDraft {
    pub strategy: AuthStrategy,
    pub base_url: Option<String>,
    pub api_key: Option<String>,
    pub remote_directory: bool,
    pub min_password_len: Option<usize>,
    pub reset_redirect_url: Option<String>,
}

impl BackendSettingsDraft {
    #[must_use]
    pub fn new(strategy: AuthStrategy) -> Self {
        Self {
            strategy,
            ..Self::default()
        }
    }

    /// Validate and normalize the draft.
    ///
    /// # Errors
    ///
    /// Returns `SettingsError` if a URL does not parse, a required value for
    /// the chosen strategy is missing, or the minimum password length is zero.
    pub fn validate(self) -> Result<BackendSettings, SettingsError> {
        let base_url = normalize_optional(self.base_url)
            .map(|raw| Url::parse(&raw).map_err(|_| SettingsError::InvalidBaseUrl))
            .transpose()?;
        let api_key = normalize_optional(self.api_key);

        let needs_remote = match self.strategy {
            AuthStrategy::Local => false,
            AuthStrategy::Directory => self.remote_directory,
            AuthStrategy::Hosted => true,
        };
        if needs_remote {
            if base_url.is_none() {
                return Err(SettingsError::MissingBaseUrl(self.strategy));
            }
            if api_key.is_none() {
                return Err(SettingsError::MissingApiKey(self.strategy));
            }
        }

        let password_policy = match (self.strategy, self.min_password_len) {
            (_, Some(0)) => return Err(SettingsError::InvalidMinPasswordLen),
            (AuthStrategy::Hosted, _) => PasswordPolicy::delegated(),
            (_, Some(min)) => PasswordPolicy::new(min),
            (_, None) => PasswordPolicy::default(),
        };

        let reset_redirect_url = match normalize_optional(self.reset_redirect_url) {
            Some(raw) => Some(Url::parse(&raw).map_err(|_| SettingsError::InvalidRedirectUrl)?),
            None => base_url
                .as_ref()
                .and_then(|base| base.join("auth?reset=true").ok()),
        };

        Ok(BackendSettings {
            strategy: self.strategy,
            base_url,
            api_key,
            remote_directory: self.strategy == AuthStrategy::Directory && self.remote_directory,
            password_policy,
            reset_redirect_url,
        })
    }
}

impl BackendSettings {
    /// Local-only settings with the default password policy.
    #[must_use]
    pub fn local() -> Self {
        Self {
            strategy: AuthStrategy::Local,
            base_url: None,
            api_key: None,
            remote_directory: false,
            password_policy: PasswordPolicy::default(),
            reset_redirect_url: None,
        }
    }

    #[must_use]
    pub fn strategy(&self) -> AuthStrategy {
        self.strategy
    }

    #[must_use]
    pub fn base_url(&self) -> Option<&Url> {
        self.base_url.as_ref()
    }

    #[must_use]
    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref()
    }

    /// Whether the directory strategy queries the REST backend instead of the local database.
    #[must_use]
    pub fn remote_directory(&self) -> bool {
        self.remote_directory
    }

    #[must_use]
    pub fn password_policy(&self) -> PasswordPolicy {
        self.password_policy
    }

    #[must_use]
    pub fn reset_redirect_url(&self) -> Option<&Url> {
        self.reset_redirect_url.as_ref()
    }
}

impl Default for BackendSettings {
    fn default() -> Self {
        Self::local()
    }
}

impl fmt::Debug for BackendSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BackendSettings")
            .field("strategy", &self.strategy)
            .field("base_url", &self.base_url.as_ref().map(Url::as_str))
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("remote_directory", &self.remote_directory)
            .field("password_policy", &self.password_policy)
            .field(
                "reset_redirect_url",
                &self.reset_redirect_url.as_ref().map(Url::as_str),
            )
            .finish()
    }
}

fn normalize_optional(value: Option<String>) -> Option<String> {
    value
        .map(|val| val.trim().to_string())
        .filter(|val| !val.is_empty())
}
