//! Screen controllers
//!
//! Each screen holds its own form fields and list state and talks to the
//! session and flashcard stores through [`Services`](crate::app::Services).
//! Screens never fail: every error becomes a [`Notice`] in the returned
//! [`Outcome`] and the screen keeps its previous state.

pub mod dashboard;
pub mod flashcard;
pub mod login;
pub mod register;
pub mod topic;

use crate::router::Route;

pub use dashboard::DashboardScreen;
pub use flashcard::{Face, FlashcardView};
pub use login::LoginScreen;
pub use register::{RegisterError, RegisterScreen};
pub use topic::TopicScreen;

/// A blocking notification the user has to acknowledge
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Error(String),
    Info(String),
}

impl Notice {
    pub fn error(message: impl ToString) -> Self {
        Notice::Error(message.to_string())
    }

    pub fn message(&self) -> &str {
        match self {
            Notice::Error(m) | Notice::Info(m) => m,
        }
    }
}

/// What a screen action asks of the application
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Outcome {
    pub notices: Vec<Notice>,
    pub navigate: Option<Route>,
}

impl Outcome {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn notice(notice: Notice) -> Self {
        Self {
            notices: vec![notice],
            navigate: None,
        }
    }

    pub fn navigate(route: Route) -> Self {
        Self {
            notices: Vec::new(),
            navigate: Some(route),
        }
    }

    pub fn push(&mut self, notice: Notice) {
        self.notices.push(notice);
    }

    pub fn then_navigate(mut self, route: Route) -> Self {
        self.navigate = Some(route);
        self
    }
}
