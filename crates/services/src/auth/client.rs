use std::time::Duration;

use chrono::{DateTime, Utc};
use course_core::model::{BackendSettings, Credentials, Email, MemberId, MemberProfile};
use reqwest::{Client, Method, RequestBuilder, StatusCode};
use serde::{Deserialize, Serialize};
use storage::repository::MemberRecord;
use url::Url;

use crate::error::AuthError;

/// HTTP client for the hosted backend's auth and REST endpoints.
#[derive(Clone)]
pub struct BackendClient {
    http: Client,
    base_url: Url,
    api_key: String,
}

impl BackendClient {
    pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

    /// Build a client rooted at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns `reqwest::Error` if the TLS backend cannot be initialized.
    pub fn new(base_url: Url, api_key: impl Into<String>) -> Result<Self, reqwest::Error> {
        let http = Client::builder().timeout(Self::REQUEST_TIMEOUT).build()?;
        Ok(Self {
            http,
            base_url: with_trailing_slash(base_url),
            api_key: api_key.into(),
        })
    }

    /// Client for the configured backend, or `None` when no backend is configured.
    ///
    /// # Errors
    ///
    /// Returns `reqwest::Error` if the HTTP client cannot be built.
    pub fn from_settings(settings: &BackendSettings) -> Result<Option<Self>, reqwest::Error> {
        match (settings.base_url(), settings.api_key()) {
            (Some(base_url), Some(api_key)) => Self::new(base_url.clone(), api_key).map(Some),
            _ => Ok(None),
        }
    }

    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Exchange email and password for a session with the identity provider.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidCredentials` when the provider rejects the
    /// pair, `AuthError::HttpStatus` for other failures, and
    /// `AuthError::Network` when the provider cannot be reached.
    pub async fn password_grant(
        &self,
        credentials: &Credentials,
    ) -> Result<MemberProfile, AuthError> {
        let mut url = self.endpoint("auth/v1/token")?;
        url.query_pairs_mut().append_pair("grant_type", "password");

        let response = self
            .request(Method::POST, url)
            .json(&PasswordGrant {
                email: credentials.email().as_str(),
                password: credentials.password(),
            })
            .send()
            .await?;

        let status = response.status();
        if matches!(
            status,
            StatusCode::BAD_REQUEST | StatusCode::UNAUTHORIZED | StatusCode::UNPROCESSABLE_ENTITY
        ) {
            return Err(AuthError::InvalidCredentials);
        }
        if !status.is_success() {
            return Err(AuthError::HttpStatus(status));
        }

        let body: TokenResponse = response.json().await?;
        if body.access_token.trim().is_empty() {
            return Err(AuthError::UnexpectedResponse("empty access token".into()));
        }
        body.user.into_profile()
    }

    /// Ask the provider to email a password reset link.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::HttpStatus` or `AuthError::Network` when the request fails.
    pub async fn recover(&self, email: &Email, redirect_to: Option<&Url>) -> Result<(), AuthError> {
        let mut url = self.endpoint("auth/v1/recover")?;
        if let Some(redirect_to) = redirect_to {
            url.query_pairs_mut()
                .append_pair("redirect_to", redirect_to.as_str());
        }

        let response = self
            .request(Method::POST, url)
            .json(&RecoverRequest {
                email: email.as_str(),
            })
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(AuthError::HttpStatus(response.status()));
        }
        Ok(())
    }

    /// Fetch at most one active member row for `email`.
    ///
    /// # Errors
    ///
    /// Returns `AuthError` when the request fails or the body is not a member list.
    pub async fn find_active_member(
        &self,
        email: &Email,
    ) -> Result<Option<MemberRecord>, AuthError> {
        let mut url = self.endpoint("rest/v1/members")?;
        url.query_pairs_mut()
            .append_pair("select", "*")
            .append_pair("email", &format!("eq.{email}"))
            .append_pair("is_active", "eq.true")
            .append_pair("limit", "1");

        let response = self.request(Method::GET, url).send().await?;
        if !response.status().is_success() {
            return Err(AuthError::HttpStatus(response.status()));
        }

        let rows: Vec<MemberRecord> = response.json().await?;
        Ok(rows.into_iter().find(|row| row.is_active))
    }

    fn endpoint(&self, path: &str) -> Result<Url, AuthError> {
        self.base_url
            .join(path)
            .map_err(|err| AuthError::UnexpectedResponse(err.to_string()))
    }

    fn request(&self, method: Method, url: Url) -> RequestBuilder {
        self.http
            .request(method, url)
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
    }
}

fn with_trailing_slash(mut url: Url) -> Url {
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url
}

#[derive(Serialize)]
struct PasswordGrant<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Serialize)]
struct RecoverRequest<'a> {
    email: &'a str,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    user: HostedUser,
}

#[derive(Debug, Deserialize)]
struct HostedUser {
    id: MemberId,
    email: String,
    #[serde(default)]
    created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    user_metadata: HostedUserMetadata,
}

#[derive(Debug, Default, Deserialize)]
struct HostedUserMetadata {
    #[serde(default, alias = "nome_exibicao")]
    display_name: Option<String>,
}

impl HostedUser {
    fn into_profile(self) -> Result<MemberProfile, AuthError> {
        let email = Email::parse(&self.email)
            .map_err(|err| AuthError::UnexpectedResponse(err.to_string()))?;
        Ok(MemberProfile::new(self.id, email, self.created_at)
            .with_display_name(self.user_metadata.display_name))
    }
}
