use thiserror::Error;

use super::{Notice, Outcome};
use crate::app::Services;
use crate::flashcards::ValidationError;
use crate::provider::{SignUpOutcome, SignUpRequest};
use crate::router::Route;

/// Reasons a registration is refused before reaching the provider
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegisterError {
    #[error(transparent)]
    Missing(#[from] ValidationError),

    #[error("Passwords do not match!")]
    PasswordMismatch,

    #[error("You must accept the terms of service!")]
    TermsNotAccepted,
}

/// Account registration form
#[derive(Debug, Default)]
pub struct RegisterScreen {
    pub full_name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub accepted_terms: bool,
    loading: bool,
}

impl RegisterScreen {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Check the form and build the sign-up request
    pub fn validate(&self) -> Result<SignUpRequest, RegisterError> {
        if self.full_name.trim().is_empty() {
            return Err(ValidationError::Required("Full name").into());
        }
        if self.email.trim().is_empty() {
            return Err(ValidationError::Required("Email").into());
        }
        if self.password.is_empty() {
            return Err(ValidationError::Required("Password").into());
        }
        if self.password != self.confirm_password {
            return Err(RegisterError::PasswordMismatch);
        }
        if !self.accepted_terms {
            return Err(RegisterError::TermsNotAccepted);
        }

        Ok(SignUpRequest {
            email: self.email.trim().to_string(),
            password: self.password.clone(),
            full_name: self.full_name.trim().to_string(),
        })
    }

    pub async fn submit(&mut self, services: &Services) -> Outcome {
        let request = match self.validate() {
            Ok(request) => request,
            Err(e) => return Outcome::notice(Notice::error(e)),
        };

        self.loading = true;
        let result = services.session.sign_up(&request).await;
        self.loading = false;

        match result {
            Ok(SignUpOutcome::ConfirmationPending(_)) => Outcome::notice(Notice::Info(
                "Registration successful! Please confirm your email address.".to_string(),
            ))
            .then_navigate(Route::Login),
            Ok(SignUpOutcome::SignedIn(_)) => {
                Outcome::notice(Notice::Info("Registration successful!".to_string()))
                    .then_navigate(Route::Login)
            }
            Err(e) => Outcome::notice(Notice::error(e)),
        }
    }

    pub fn go_to_login(&self) -> Outcome {
        Outcome::navigate(Route::Login)
    }
}
