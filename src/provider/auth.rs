use async_trait::async_trait;
use chrono::{DateTime, Duration, TimeZone, Utc};
use reqwest::Client;
use serde::{Deserialize, Serialize};

use super::error::{ProviderError, Result};
use super::http_client;
use crate::config::ProviderConfig;
use crate::session::{Session, User};

/// Registration details sent to the identity provider
#[derive(Debug, Clone, PartialEq)]
pub struct SignUpRequest {
    pub email: String,
    pub password: String,
    pub full_name: String,
}

/// Result of a sign-up call
#[derive(Debug, Clone)]
pub enum SignUpOutcome {
    /// The account needs email confirmation before it can sign in
    ConfirmationPending(User),
    /// The project auto-confirms accounts and returned a live session
    SignedIn(Session),
}

/// Identity operations consumed from the auth provider
#[async_trait]
pub trait AuthBackend: Send + Sync {
    async fn sign_in_with_password(&self, email: &str, password: &str) -> Result<Session>;

    async fn sign_up(&self, request: &SignUpRequest) -> Result<SignUpOutcome>;

    /// Revoke the given access token on the provider side
    async fn sign_out(&self, access_token: &str) -> Result<()>;

    async fn refresh_session(&self, refresh_token: &str) -> Result<Session>;

    /// Fetch the user that owns an access token
    async fn get_user(&self, access_token: &str) -> Result<User>;
}

/// Token endpoint response
#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    refresh_token: String,
    #[serde(default)]
    token_type: Option<String>,
    #[serde(default)]
    expires_in: Option<i64>,
    #[serde(default)]
    expires_at: Option<i64>,
    user: User,
}

impl TokenResponse {
    fn into_session(self, now: DateTime<Utc>) -> Session {
        let expires_at = self
            .expires_at
            .and_then(|ts| Utc.timestamp_opt(ts, 0).single())
            .unwrap_or_else(|| now + Duration::seconds(self.expires_in.unwrap_or(3600)));

        Session {
            access_token: self.access_token,
            refresh_token: self.refresh_token,
            token_type: self.token_type.unwrap_or_else(|| "bearer".to_string()),
            expires_at,
            user: self.user,
        }
    }
}

#[derive(Serialize)]
struct PasswordGrant<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Serialize)]
struct RefreshGrant<'a> {
    refresh_token: &'a str,
}

#[derive(Serialize)]
struct SignUpBody<'a> {
    email: &'a str,
    password: &'a str,
    data: SignUpData<'a>,
}

#[derive(Serialize)]
struct SignUpData<'a> {
    full_name: &'a str,
}

/// Parse a sign-up response, which is either a token response or a bare user
fn parse_sign_up(body: &str, now: DateTime<Utc>) -> Result<SignUpOutcome> {
    let value: serde_json::Value = serde_json::from_str(body)?;
    if value.get("access_token").is_some() {
        let tokens: TokenResponse = serde_json::from_value(value)?;
        Ok(SignUpOutcome::SignedIn(tokens.into_session(now)))
    } else {
        // Some provider versions wrap the user, others return it directly
        let user_value = value.get("user").cloned().unwrap_or(value);
        let user: User = serde_json::from_value(user_value)?;
        Ok(SignUpOutcome::ConfirmationPending(user))
    }
}

/// Client for the GoTrue auth REST API
pub struct AuthClient {
    client: Client,
    base_url: String,
    anon_key: String,
}

impl AuthClient {
    /// Create a new auth client
    pub fn new(config: &ProviderConfig) -> Result<Self> {
        Ok(Self {
            client: http_client()?,
            base_url: format!("{}/auth/v1", config.url),
            anon_key: config.anon_key.clone(),
        })
    }

    /// Build full URL for an endpoint
    fn url(&self, endpoint: &str) -> String {
        format!("{}/{}", self.base_url, endpoint.trim_start_matches('/'))
    }

    async fn token_grant<B: Serialize + ?Sized>(&self, grant_type: &str, body: &B) -> Result<Session> {
        let url = self.url("token");
        log::debug!("POST {} (grant_type={})", url, grant_type);

        let response = self
            .client
            .post(&url)
            .query(&[("grant_type", grant_type)])
            .header("apikey", &self.anon_key)
            .json(body)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;
        if !status.is_success() {
            return Err(ProviderError::from_response(status, &text));
        }

        let tokens: TokenResponse = serde_json::from_str(&text)?;
        Ok(tokens.into_session(Utc::now()))
    }
}

#[async_trait]
impl AuthBackend for AuthClient {
    async fn sign_in_with_password(&self, email: &str, password: &str) -> Result<Session> {
        self.token_grant("password", &PasswordGrant { email, password }).await
    }

    async fn sign_up(&self, request: &SignUpRequest) -> Result<SignUpOutcome> {
        let url = self.url("signup");
        log::debug!("POST {}", url);

        let body = SignUpBody {
            email: &request.email,
            password: &request.password,
            data: SignUpData {
                full_name: &request.full_name,
            },
        };

        let response = self
            .client
            .post(&url)
            .header("apikey", &self.anon_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;
        if !status.is_success() {
            return Err(ProviderError::from_response(status, &text));
        }

        parse_sign_up(&text, Utc::now())
    }

    async fn sign_out(&self, access_token: &str) -> Result<()> {
        let response = self
            .client
            .post(self.url("logout"))
            .header("apikey", &self.anon_key)
            .bearer_auth(access_token)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(ProviderError::from_response(status, &text));
        }
        Ok(())
    }

    async fn refresh_session(&self, refresh_token: &str) -> Result<Session> {
        self.token_grant("refresh_token", &RefreshGrant { refresh_token }).await
    }

    async fn get_user(&self, access_token: &str) -> Result<User> {
        let response = self
            .client
            .get(self.url("user"))
            .header("apikey", &self.anon_key)
            .bearer_auth(access_token)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;
        if !status.is_success() {
            return Err(ProviderError::from_response(status, &text));
        }
        Ok(serde_json::from_str(&text)?)
    }
}
