//! Application controller
//!
//! `App` owns the router, the mounted screen and the session subscription.
//! Front ends (CLI commands, the terminal UI) drive it with user actions and
//! read notices back from it.

use std::collections::VecDeque;
use std::path::Path;
use std::sync::Arc;

use crate::config::ProviderConfig;
use crate::flashcards::FlashcardStore;
use crate::provider::{AuthBackend, AuthClient, DataBackend, ProviderError, RestClient};
use crate::router::{Gate, Route, Router};
use crate::screens::{
    DashboardScreen, LoginScreen, Notice, Outcome, RegisterScreen, TopicScreen,
};
use crate::session::{SessionFile, SessionStore, SessionSubscription};

/// Provider-backed stores shared by every screen
pub struct Services {
    pub session: SessionStore,
    pub flashcards: FlashcardStore,
}

impl Services {
    pub fn new(
        auth: Arc<dyn AuthBackend>,
        data: Arc<dyn DataBackend>,
        persistence: Option<SessionFile>,
    ) -> Self {
        Self {
            session: SessionStore::new(auth, persistence),
            flashcards: FlashcardStore::new(data),
        }
    }

    /// Build HTTP clients for the configured provider, persisting the
    /// session under `data_dir`
    pub fn connect(config: &ProviderConfig, data_dir: &Path) -> Result<Self, ProviderError> {
        let auth = AuthClient::new(config)?;
        let data = RestClient::new(config)?;
        Ok(Self::new(
            Arc::new(auth),
            Arc::new(data),
            Some(SessionFile::new(data_dir)),
        ))
    }

    #[cfg(test)]
    pub(crate) fn fake(auth: Arc<crate::testing::FakeAuth>) -> Self {
        Self::fake_with(auth, Arc::new(crate::testing::FakeData::default()))
    }

    #[cfg(test)]
    pub(crate) fn fake_with(
        auth: Arc<crate::testing::FakeAuth>,
        data: Arc<crate::testing::FakeData>,
    ) -> Self {
        Self::new(auth, data, None)
    }
}

/// The screen currently mounted
#[derive(Debug)]
pub enum Screen {
    /// Nothing is rendered until the initial session lookup resolves
    Pending,
    Login(LoginScreen),
    Register(RegisterScreen),
    Dashboard(DashboardScreen),
    Topic(TopicScreen),
}

impl Screen {
    pub fn route(&self) -> Option<Route> {
        match self {
            Screen::Pending => None,
            Screen::Login(_) => Some(Route::Login),
            Screen::Register(_) => Some(Route::Register),
            Screen::Dashboard(_) => Some(Route::Dashboard),
            Screen::Topic(s) => Some(Route::Topic(s.topic_id().clone())),
        }
    }
}

pub struct App {
    services: Services,
    router: Router,
    screen: Screen,
    subscription: Option<SessionSubscription>,
    notices: VecDeque<Notice>,
}

impl App {
    /// Create the controller for `initial_path`. Call [`start`](Self::start)
    /// to resolve the session and mount the first screen.
    pub fn new(services: Services, initial_path: &str) -> Self {
        let subscription = services.session.subscribe();
        Self {
            services,
            router: Router::new(initial_path),
            screen: Screen::Pending,
            subscription: Some(subscription),
            notices: VecDeque::new(),
        }
    }

    pub fn services(&self) -> &Services {
        &self.services
    }

    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    /// Mutable access for form input
    pub fn screen_mut(&mut self) -> &mut Screen {
        &mut self.screen
    }

    pub fn route(&self) -> Option<&Route> {
        self.router.current()
    }

    pub fn gate(&self) -> Gate {
        self.router.gate()
    }

    /// Resolve the initial session and mount the requested (or redirected) screen
    pub async fn start(&mut self) {
        let authenticated = match self.services.session.get_session().await {
            Ok(session) => session.is_some(),
            Err(e) => {
                log::error!("Failed to restore session: {}", e);
                self.notices.push_back(Notice::error(e));
                false
            }
        };

        if let Some(ref mut sub) = self.subscription {
            sub.latest();
        }
        let transition = self.router.session_resolved(authenticated);
        if let Some(ref from) = transition.redirected_from {
            log::debug!("Redirected {} to {}", from, transition.route);
        }
        self.mount(transition.route).await;
    }

    /// Consume pending session changes and re-evaluate routing.
    ///
    /// Returns true when the mounted screen changed.
    pub async fn sync_session(&mut self) -> bool {
        let change = match self.subscription {
            Some(ref mut sub) if sub.has_changed() => sub.latest(),
            _ => return false,
        };
        if self.router.gate() == Gate::Pending {
            return false;
        }

        let authenticated = change.session.is_some();
        let was_authenticated = self.router.gate() == Gate::Authenticated;
        if authenticated == was_authenticated {
            return false;
        }

        log::debug!("Session change {:?}", change.event);
        let transition = self.router.session_resolved(authenticated);
        self.mount(transition.route).await
    }

    /// Navigate to `route`, subject to the session gate
    pub async fn navigate(&mut self, route: &Route) -> bool {
        match self.router.navigate(&route.path()) {
            Some(transition) => self.mount(transition.route).await,
            None => false,
        }
    }

    async fn mount(&mut self, route: Route) -> bool {
        if self.screen.route().as_ref() == Some(&route) {
            return false;
        }

        self.screen = match route {
            Route::Login => Screen::Login(LoginScreen::new()),
            Route::Register => Screen::Register(RegisterScreen::new()),
            Route::Dashboard => Screen::Dashboard(DashboardScreen::new()),
            Route::Topic(id) => Screen::Topic(TopicScreen::new(id)),
        };
        self.reload().await;
        true
    }

    /// Re-read the data shown by the mounted screen
    pub async fn reload(&mut self) {
        let outcome = match self.screen {
            Screen::Dashboard(ref mut s) => s.load(&self.services).await,
            Screen::Topic(ref mut s) => s.load(&self.services).await,
            _ => Outcome::none(),
        };
        self.notices.extend(outcome.notices);
    }

    /// Queue notices, follow session changes, then honour the requested navigation
    pub async fn apply(&mut self, outcome: Outcome) {
        self.notices.extend(outcome.notices);
        self.sync_session().await;
        if let Some(route) = outcome.navigate {
            self.navigate(&route).await;
        }
    }

    /// Submit the form on the mounted screen
    pub async fn submit(&mut self) {
        let outcome = match self.screen {
            Screen::Login(ref mut s) => s.submit(&self.services).await,
            Screen::Register(ref mut s) => s.submit(&self.services).await,
            Screen::Dashboard(ref mut s) => s.add_topic(&self.services).await,
            Screen::Topic(ref mut s) => s.add_card(&self.services).await,
            Screen::Pending => Outcome::none(),
        };
        self.apply(outcome).await;
    }

    pub async fn sign_out(&mut self) {
        let outcome = match self.screen {
            Screen::Dashboard(ref mut s) => s.sign_out(&self.services).await,
            _ => Outcome::none(),
        };
        self.apply(outcome).await;
    }

    /// Open the topic at `index` in the dashboard list
    pub async fn open_topic(&mut self, index: usize) {
        let outcome = match self.screen {
            Screen::Dashboard(ref s) => s.open(index),
            _ => Outcome::none(),
        };
        self.apply(outcome).await;
    }

    /// Leave the mounted screen: topic to dashboard, login and register to each other
    pub async fn back(&mut self) {
        let outcome = match self.screen {
            Screen::Topic(ref s) => s.back(),
            Screen::Register(ref s) => s.go_to_login(),
            Screen::Login(ref s) => s.go_to_register(),
            _ => Outcome::none(),
        };
        self.apply(outcome).await;
    }

    pub fn flip(&mut self, index: usize) {
        if let Screen::Topic(ref mut s) = self.screen {
            s.flip(index);
        }
    }

    pub fn peek_notice(&self) -> Option<&Notice> {
        self.notices.front()
    }

    /// Acknowledge the oldest notice
    pub fn take_notice(&mut self) -> Option<Notice> {
        self.notices.pop_front()
    }

    pub fn drain_notices(&mut self) -> Vec<Notice> {
        self.notices.drain(..).collect()
    }

    /// Drop the session subscription
    pub fn shutdown(&mut self) {
        if let Some(sub) = self.subscription.take() {
            sub.unsubscribe();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flashcards::TopicId;
    use crate::testing::{FakeAuth, FakeData};

    fn services() -> Services {
        Services::fake(Arc::new(FakeAuth::with_user("a@x.com", "p1")))
    }

    async fn started(services: Services, path: &str) -> App {
        let mut app = App::new(services, path);
        app.start().await;
        app
    }

    async fn sign_in_via_form(app: &mut App) {
        if let Screen::Login(s) = app.screen_mut() {
            s.email = "a@x.com".into();
            s.password = "p1".into();
        }
        app.submit().await;
    }

    #[tokio::test]
    async fn test_pending_until_started() {
        let mut app = App::new(services(), "/dashboard");
        assert_eq!(app.gate(), Gate::Pending);
        assert!(app.route().is_none());
        assert!(!app.navigate(&Route::Register).await);
        assert!(matches!(app.screen(), Screen::Pending));

        app.start().await;
        assert_eq!(app.route(), Some(&Route::Register));
    }

    #[tokio::test]
    async fn test_unauthenticated_start_redirects_to_login() {
        for path in ["/dashboard", "/topic/3", "/", "/nowhere"] {
            let app = started(services(), path).await;
            assert_eq!(app.route(), Some(&Route::Login), "from {}", path);
        }
    }

    #[tokio::test]
    async fn test_existing_session_redirects_to_dashboard() {
        let services = services();
        services.session.sign_in("a@x.com", "p1").await.unwrap();

        let app = started(services, "/register").await;
        assert_eq!(app.route(), Some(&Route::Dashboard));
        assert!(matches!(app.screen(), Screen::Dashboard(_)));
    }

    #[tokio::test]
    async fn test_sign_in_lands_on_dashboard() {
        let mut app = started(services(), "/login").await;
        sign_in_via_form(&mut app).await;

        assert_eq!(app.route(), Some(&Route::Dashboard));
        assert!(app.peek_notice().is_none());
    }

    #[tokio::test]
    async fn test_failed_sign_in_queues_notice() {
        let mut app = started(services(), "/login").await;
        if let Screen::Login(s) = app.screen_mut() {
            s.email = "a@x.com".into();
            s.password = "wrong".into();
        }
        app.submit().await;

        assert_eq!(app.route(), Some(&Route::Login));
        assert_eq!(
            app.take_notice(),
            Some(Notice::Error("Invalid login credentials".into()))
        );
        assert!(app.take_notice().is_none());
    }

    #[tokio::test]
    async fn test_session_loss_returns_to_login_from_topic() {
        let data = Arc::new(FakeData::default());
        let services = Services::fake_with(
            Arc::new(FakeAuth::with_user("a@x.com", "p1")),
            data,
        );
        let mut app = started(services, "/login").await;
        sign_in_via_form(&mut app).await;

        if let Screen::Dashboard(s) = app.screen_mut() {
            s.new_topic = "Biology".into();
        }
        app.submit().await;
        app.open_topic(0).await;
        assert!(matches!(app.route(), Some(Route::Topic(_))));

        app.services().session.sign_out().await.unwrap();
        assert!(app.sync_session().await);
        assert_eq!(app.route(), Some(&Route::Login));
    }

    #[tokio::test]
    async fn test_dashboard_sign_out() {
        let mut app = started(services(), "/login").await;
        sign_in_via_form(&mut app).await;

        app.sign_out().await;
        assert_eq!(app.route(), Some(&Route::Login));
        assert!(app.services().session.current().is_none());

        assert!(!app.navigate(&Route::Dashboard).await);
        assert_eq!(app.route(), Some(&Route::Login));
    }

    #[tokio::test]
    async fn test_back_navigation() {
        let mut app = started(services(), "/login").await;
        app.back().await;
        assert_eq!(app.route(), Some(&Route::Register));
        app.back().await;
        assert_eq!(app.route(), Some(&Route::Login));

        sign_in_via_form(&mut app).await;
        app.navigate(&Route::Topic(TopicId::new("42"))).await;
        assert!(matches!(app.route(), Some(Route::Topic(_))));
        // unknown topic surfaces the read error
        assert!(matches!(app.take_notice(), Some(Notice::Error(_))));

        app.back().await;
        assert_eq!(app.route(), Some(&Route::Dashboard));
    }

    #[tokio::test]
    async fn test_registration_notice_then_login() {
        let mut app = started(services(), "/register").await;
        if let Screen::Register(s) = app.screen_mut() {
            s.full_name = "Grace".into();
            s.email = "g@x.com".into();
            s.password = "pw".into();
            s.confirm_password = "pw".into();
            s.accepted_terms = true;
        }
        app.submit().await;

        assert_eq!(app.route(), Some(&Route::Login));
        assert!(matches!(app.take_notice(), Some(Notice::Info(_))));
    }

    #[tokio::test]
    async fn test_auto_confirmed_registration_lands_on_dashboard() {
        let auth = Arc::new(FakeAuth::default());
        auth.auto_confirm();
        let mut app = started(Services::fake(auth), "/register").await;
        if let Screen::Register(s) = app.screen_mut() {
            s.full_name = "Grace".into();
            s.email = "g@x.com".into();
            s.password = "pw".into();
            s.confirm_password = "pw".into();
            s.accepted_terms = true;
        }
        app.submit().await;

        assert_eq!(app.gate(), Gate::Authenticated);
        assert_eq!(app.route(), Some(&Route::Dashboard));
        assert!(matches!(app.screen(), Screen::Dashboard(_)));
        assert_eq!(
            app.take_notice(),
            Some(Notice::Info("Registration successful!".into()))
        );
    }

    #[tokio::test]
    async fn test_shutdown_unsubscribes() {
        let mut app = started(services(), "/login").await;
        assert_eq!(app.services().session.subscriber_count(), 1);

        app.shutdown();
        assert_eq!(app.services().session.subscriber_count(), 0);
        assert!(!app.sync_session().await);
    }
}
