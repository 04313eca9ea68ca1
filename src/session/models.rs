//! Data models for authenticated sessions

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Sessions this close to expiry are treated as expired
const EXPIRY_MARGIN_SECS: i64 = 10;

/// Profile metadata attached to a user at sign-up
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    /// Any other keys the provider returns
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// An identity known to the auth provider
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub user_metadata: UserMetadata,
}

/// The authenticated-identity token set describing the current user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub access_token: String,
    pub refresh_token: String,
    #[serde(default = "default_token_type")]
    pub token_type: String,
    pub expires_at: DateTime<Utc>,
    pub user: User,
}

fn default_token_type() -> String {
    "bearer".to_string()
}

impl Session {
    pub fn user_id(&self) -> Uuid {
        self.user.id
    }

    /// Check whether the access token is expired (or about to be) at `now`
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now + Duration::seconds(EXPIRY_MARGIN_SECS) >= self.expires_at
    }
}

/// What caused a session change notification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthEvent {
    /// The stored session (or its absence) was read at start-up
    InitialSession,
    SignedIn,
    SignedOut,
    TokenRefreshed,
}

/// Payload delivered to session subscribers
#[derive(Debug, Clone)]
pub struct SessionChange {
    pub event: AuthEvent,
    pub session: Option<Session>,
}
