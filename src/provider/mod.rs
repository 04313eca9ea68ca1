//! Clients for the hosted identity and data provider
//!
//! The provider is a Supabase-compatible project:
//! - `auth`: GoTrue REST API (sign-in, sign-up, sign-out, token refresh)
//! - `rest`: PostgREST table API (filtered/ordered select, insert)
//!
//! Both are exposed through async traits so the session store and the
//! flashcard store can run against in-memory fakes in tests.

pub mod auth;
mod error;
pub mod rest;

use std::time::Duration;

use reqwest::Client;

pub use auth::{AuthBackend, AuthClient, SignUpOutcome, SignUpRequest};
pub use error::{ProviderError, Result};
pub use rest::{DataBackend, RestClient, SelectQuery};

/// Shared HTTP client settings for provider calls
fn http_client() -> Result<Client> {
    let client = Client::builder()
        .timeout(Duration::from_secs(30))
        .connect_timeout(Duration::from_secs(10))
        .build()?;
    Ok(client)
}
