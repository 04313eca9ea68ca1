//! Session store for the current authenticated identity
//!
//! This module provides:
//! - Session and user models as returned by the identity provider
//! - `SessionStore`: sign-in, sign-up, sign-out, get-current-session and
//!   change subscriptions
//! - `SessionFile`: persistence of the session between runs

pub mod models;
pub mod persist;
pub mod store;

use thiserror::Error;

use crate::provider::ProviderError;

pub use models::*;
pub use persist::SessionFile;
pub use store::{SessionStore, SessionSubscription};

#[derive(Error, Debug)]
pub enum SessionError {
    /// Provider failures display the provider message unchanged
    #[error("{0}")]
    Provider(#[from] ProviderError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
