use super::{Notice, Outcome};
use crate::app::Services;
use crate::flashcards::ValidationError;
use crate::router::Route;

/// Email/password sign-in form
#[derive(Debug, Default)]
pub struct LoginScreen {
    pub email: String,
    pub password: String,
    loading: bool,
}

impl LoginScreen {
    pub fn new() -> Self {
        Self::default()
    }

    /// True while the sign-in call is in flight
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    fn validate(&self) -> Result<(), ValidationError> {
        if self.email.trim().is_empty() {
            return Err(ValidationError::Required("Email"));
        }
        if self.password.is_empty() {
            return Err(ValidationError::Required("Password"));
        }
        Ok(())
    }

    pub async fn submit(&mut self, services: &Services) -> Outcome {
        if let Err(e) = self.validate() {
            return Outcome::notice(Notice::error(e));
        }

        self.loading = true;
        let result = services
            .session
            .sign_in(self.email.trim(), &self.password)
            .await;
        self.loading = false;

        match result {
            Ok(_) => Outcome::navigate(Route::Dashboard),
            Err(e) => Outcome::notice(Notice::error(e)),
        }
    }

    pub fn go_to_register(&self) -> Outcome {
        Outcome::navigate(Route::Register)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::FakeAuth;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_successful_login_navigates_to_dashboard() {
        let services = Services::fake(Arc::new(FakeAuth::with_user("a@x.com", "p1")));
        let mut screen = LoginScreen::new();
        screen.email = " a@x.com ".into();
        screen.password = "p1".into();

        let outcome = screen.submit(&services).await;
        assert_eq!(outcome, Outcome::navigate(Route::Dashboard));
        assert!(services.session.current().is_some());
        assert!(!screen.is_loading());
    }

    #[tokio::test]
    async fn test_provider_error_is_shown_verbatim() {
        let services = Services::fake(Arc::new(FakeAuth::with_user("a@x.com", "p1")));
        let mut screen = LoginScreen::new();
        screen.email = "a@x.com".into();
        screen.password = "nope".into();

        let outcome = screen.submit(&services).await;
        assert_eq!(
            outcome.notices,
            vec![Notice::Error("Invalid login credentials".into())]
        );
        assert_eq!(outcome.navigate, None);
        assert_eq!(screen.email, "a@x.com");
    }

    #[tokio::test]
    async fn test_empty_fields_block_submission() {
        let services = Services::fake(Arc::new(FakeAuth::default()));
        let mut screen = LoginScreen::new();

        let outcome = screen.submit(&services).await;
        assert_eq!(outcome.notices, vec![Notice::Error("Email is required".into())]);
    }
}
