use std::sync::Arc;

use chrono::Utc;
use tokio::sync::watch;

use super::models::{AuthEvent, Session, SessionChange, User};
use super::persist::SessionFile;
use super::SessionError;
use crate::provider::{AuthBackend, ProviderError, SignUpOutcome, SignUpRequest};

/// Holds the current session and notifies subscribers when it changes.
///
/// One store is created per process and handed to whoever needs it; there is
/// no global. Subscribers receive a [`SessionChange`] for every sign-in,
/// sign-out, refresh and the initial load.
pub struct SessionStore {
    backend: Arc<dyn AuthBackend>,
    persistence: Option<SessionFile>,
    tx: watch::Sender<SessionChange>,
}

/// Unsubscribe handle for session change notifications.
///
/// Dropping the handle unsubscribes as well.
pub struct SessionSubscription {
    rx: watch::Receiver<SessionChange>,
}

impl SessionSubscription {
    /// Whether a change arrived since the last [`latest`](Self::latest)
    pub fn has_changed(&self) -> bool {
        self.rx.has_changed().unwrap_or(false)
    }

    /// The most recent change, marking it as seen
    pub fn latest(&mut self) -> SessionChange {
        self.rx.borrow_and_update().clone()
    }

    pub fn unsubscribe(self) {}
}

impl SessionStore {
    pub fn new(backend: Arc<dyn AuthBackend>, persistence: Option<SessionFile>) -> Self {
        let (tx, _) = watch::channel(SessionChange {
            event: AuthEvent::InitialSession,
            session: None,
        });
        Self {
            backend,
            persistence,
            tx,
        }
    }

    /// The session currently held in memory
    pub fn current(&self) -> Option<Session> {
        self.tx.borrow().session.clone()
    }

    pub fn subscribe(&self) -> SessionSubscription {
        SessionSubscription {
            rx: self.tx.subscribe(),
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }

    fn publish(&self, event: AuthEvent, session: Option<Session>) {
        self.tx.send_replace(SessionChange { event, session });
    }

    fn persist(&self, session: &Session) {
        if let Some(ref file) = self.persistence {
            if let Err(e) = file.save(session) {
                log::warn!("Failed to persist session: {}", e);
            }
        }
    }

    fn forget(&self) -> Result<(), SessionError> {
        if let Some(ref file) = self.persistence {
            file.clear()?;
        }
        Ok(())
    }

    /// Resolve the current session: memory first, then persisted storage.
    ///
    /// An expired session is refreshed with its refresh token; if that fails
    /// the stored session is dropped and `None` is returned.
    pub async fn get_session(&self) -> Result<Option<Session>, SessionError> {
        let stored = match self.current() {
            Some(session) => Some(session),
            None => match self.persistence {
                Some(ref file) => file.load()?,
                None => None,
            },
        };

        let session = match stored {
            Some(session) if session.is_expired(Utc::now()) => {
                match self.refresh(&session).await? {
                    Some(refreshed) => return Ok(Some(refreshed)),
                    None => None,
                }
            }
            other => other,
        };

        self.publish(AuthEvent::InitialSession, session.clone());
        Ok(session)
    }

    /// The in-memory session for an authenticated request, refreshed first
    /// when its access token has expired.
    ///
    /// A failed refresh signs out locally and subscribers see `SignedOut`.
    pub async fn active_session(&self) -> Result<Session, SessionError> {
        let session = self.current().ok_or(ProviderError::NotAuthenticated)?;
        if !session.is_expired(Utc::now()) {
            return Ok(session);
        }

        match self.refresh(&session).await? {
            Some(refreshed) => Ok(refreshed),
            None => {
                self.publish(AuthEvent::SignedOut, None);
                Err(ProviderError::NotAuthenticated.into())
            }
        }
    }

    /// Exchange the refresh token. `None` means the provider refused it and
    /// the persisted session was dropped.
    async fn refresh(&self, session: &Session) -> Result<Option<Session>, SessionError> {
        match self.backend.refresh_session(&session.refresh_token).await {
            Ok(refreshed) => {
                log::info!("Refreshed session for {}", refreshed.user_id());
                self.persist(&refreshed);
                self.publish(AuthEvent::TokenRefreshed, Some(refreshed.clone()));
                Ok(Some(refreshed))
            }
            Err(e) => {
                log::warn!("Session refresh failed, signing out locally: {}", e);
                self.forget()?;
                Ok(None)
            }
        }
    }

    pub async fn sign_in(&self, email: &str, password: &str) -> Result<Session, SessionError> {
        let session = self.backend.sign_in_with_password(email, password).await?;
        log::info!("Signed in as {}", session.user_id());

        self.persist(&session);
        self.publish(AuthEvent::SignedIn, Some(session.clone()));
        Ok(session)
    }

    /// Register a new account. Auto-confirmed accounts are signed in at once.
    pub async fn sign_up(&self, request: &SignUpRequest) -> Result<SignUpOutcome, SessionError> {
        let outcome = self.backend.sign_up(request).await?;

        match outcome {
            SignUpOutcome::SignedIn(ref session) => {
                log::info!("Registered and signed in as {}", session.user_id());
                self.persist(session);
                self.publish(AuthEvent::SignedIn, Some(session.clone()));
            }
            SignUpOutcome::ConfirmationPending(ref user) => {
                log::info!("Registered {}, confirmation pending", user.id);
            }
        }

        Ok(outcome)
    }

    /// Ask the provider for the signed-in user's current profile
    pub async fn fetch_user(&self) -> Result<User, SessionError> {
        let session = self.active_session().await?;
        Ok(self.backend.get_user(&session.access_token).await?)
    }

    /// Drop the session locally and revoke it remotely (best-effort)
    pub async fn sign_out(&self) -> Result<(), SessionError> {
        if let Some(session) = self.current() {
            if let Err(e) = self.backend.sign_out(&session.access_token).await {
                log::warn!("Remote sign-out failed: {}", e);
            }
            log::info!("Signed out {}", session.user_id());
        }

        self.forget()?;
        self.publish(AuthEvent::SignedOut, None);
        Ok(())
    }
}
