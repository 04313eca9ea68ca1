//! Session-gated view routing
//!
//! | gate            | reachable routes          | anything else  |
//! |-----------------|---------------------------|----------------|
//! | unauthenticated | `/login`, `/register`     | → `/login`     |
//! | authenticated   | `/dashboard`, `/topic/:id`| → `/dashboard` |
//!
//! Until the initial session lookup resolves the router is pending and
//! renders nothing.

use std::fmt;

use crate::flashcards::TopicId;

/// A screen the user can be on
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Login,
    Register,
    Dashboard,
    Topic(TopicId),
}

impl Route {
    /// Parse a client path; query strings, fragments and trailing slashes are ignored
    pub fn parse(path: &str) -> Option<Route> {
        let path = path.split(['?', '#']).next().unwrap_or("");
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

        match segments.as_slice() {
            ["login"] => Some(Route::Login),
            ["register"] => Some(Route::Register),
            ["dashboard"] => Some(Route::Dashboard),
            ["topic", id] => Some(Route::Topic(TopicId::new(*id))),
            _ => None,
        }
    }

    pub fn path(&self) -> String {
        match self {
            Route::Login => "/login".to_string(),
            Route::Register => "/register".to_string(),
            Route::Dashboard => "/dashboard".to_string(),
            Route::Topic(id) => format!("/topic/{}", id),
        }
    }

    /// Whether the route belongs to the authenticated set
    pub fn requires_session(&self) -> bool {
        matches!(self, Route::Dashboard | Route::Topic(_))
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

/// Map a path to the route rendered for the given session state
pub fn resolve(path: &str, authenticated: bool) -> Route {
    match Route::parse(path) {
        Some(route) if route.requires_session() == authenticated => route,
        _ if authenticated => Route::Dashboard,
        _ => Route::Login,
    }
}

/// Session state as seen by the router
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gate {
    /// Initial session lookup has not resolved
    Pending,
    Unauthenticated,
    Authenticated,
}

/// Result of a routing step
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    pub route: Route,
    /// The requested path when it was replaced by a redirect
    pub redirected_from: Option<String>,
}

/// The view routing state machine
#[derive(Debug)]
pub struct Router {
    gate: Gate,
    /// Requested path, kept while pending
    location: String,
    route: Option<Route>,
}

impl Router {
    pub fn new(initial_path: &str) -> Self {
        Self {
            gate: Gate::Pending,
            location: initial_path.to_string(),
            route: None,
        }
    }

    pub fn gate(&self) -> Gate {
        self.gate
    }

    /// The route being rendered; `None` while pending
    pub fn current(&self) -> Option<&Route> {
        self.route.as_ref()
    }

    /// Re-evaluate after the session store reports presence or absence
    pub fn session_resolved(&mut self, authenticated: bool) -> Transition {
        self.gate = if authenticated {
            Gate::Authenticated
        } else {
            Gate::Unauthenticated
        };
        let path = self.location.clone();
        self.apply(&path)
    }

    /// Explicit navigation. While pending the path is only recorded.
    pub fn navigate(&mut self, path: &str) -> Option<Transition> {
        if self.gate == Gate::Pending {
            self.location = path.to_string();
            return None;
        }
        Some(self.apply(path))
    }

    fn apply(&mut self, path: &str) -> Transition {
        let route = resolve(path, self.gate == Gate::Authenticated);
        let redirected_from = match Route::parse(path) {
            Some(ref requested) if *requested == route => None,
            _ => Some(path.to_string()),
        };

        if self.route.as_ref() != Some(&route) {
            log::info!("Route {} -> {}", self.location, route);
        }
        self.location = route.path();
        self.route = Some(route.clone());

        Transition {
            route,
            redirected_from,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_routes() {
        assert_eq!(Route::parse("/login"), Some(Route::Login));
        assert_eq!(Route::parse("/register/"), Some(Route::Register));
        assert_eq!(Route::parse("/dashboard?tab=1"), Some(Route::Dashboard));
        assert_eq!(
            Route::parse("/topic/42#cards"),
            Some(Route::Topic(TopicId::new("42")))
        );
        assert_eq!(Route::parse("/topic/"), None);
        assert_eq!(Route::parse("/topic/1/extra"), None);
        assert_eq!(Route::parse("/"), None);
        assert_eq!(Route::parse("/nowhere"), None);
    }

    #[test]
    fn test_route_path_round_trip() {
        let topic = Route::Topic(TopicId::new("abc"));
        assert_eq!(topic.path(), "/topic/abc");
        assert_eq!(Route::parse(&topic.path()), Some(topic));
    }

    #[test]
    fn test_resolve_table() {
        assert_eq!(resolve("/login", false), Route::Login);
        assert_eq!(resolve("/register", false), Route::Register);
        assert_eq!(resolve("/dashboard", false), Route::Login);
        assert_eq!(resolve("/topic/1", false), Route::Login);
        assert_eq!(resolve("/garbage", false), Route::Login);

        assert_eq!(resolve("/dashboard", true), Route::Dashboard);
        assert_eq!(resolve("/topic/1", true), Route::Topic(TopicId::new("1")));
        assert_eq!(resolve("/login", true), Route::Dashboard);
        assert_eq!(resolve("/register", true), Route::Dashboard);
        assert_eq!(resolve("/garbage", true), Route::Dashboard);
    }

    #[test]
    fn test_pending_renders_nothing() {
        let mut router = Router::new("/topic/7");
        assert_eq!(router.gate(), Gate::Pending);
        assert!(router.current().is_none());
        assert!(router.navigate("/dashboard").is_none());
        assert!(router.current().is_none());
    }

    #[test]
    fn test_deep_link_survives_initial_lookup() {
        let mut router = Router::new("/topic/7");
        let t = router.session_resolved(true);
        assert_eq!(t.route, Route::Topic(TopicId::new("7")));
        assert_eq!(t.redirected_from, None);
    }

    #[test]
    fn test_session_lost_goes_to_login_from_any_path() {
        for start in ["/dashboard", "/topic/3"] {
            let mut router = Router::new(start);
            router.session_resolved(true);
            let t = router.session_resolved(false);
            assert_eq!(t.route, Route::Login);
            assert_eq!(t.redirected_from.as_deref(), Some(start));
        }
    }

    #[test]
    fn test_session_gained_goes_to_dashboard() {
        for start in ["/login", "/register"] {
            let mut router = Router::new(start);
            router.session_resolved(false);
            assert_eq!(router.session_resolved(true).route, Route::Dashboard);
        }
    }

    #[test]
    fn test_navigation_between_auth_screens() {
        let mut router = Router::new("/");
        assert_eq!(router.session_resolved(false).route, Route::Login);
        assert_eq!(router.navigate("/register").unwrap().route, Route::Register);
        assert_eq!(router.navigate("/login").unwrap().route, Route::Login);
        assert_eq!(router.gate(), Gate::Unauthenticated);
    }

    #[test]
    fn test_unmatched_path_redirects() {
        let mut router = Router::new("/login");
        router.session_resolved(true);
        let t = router.navigate("/settings").unwrap();
        assert_eq!(t.route, Route::Dashboard);
        assert_eq!(t.redirected_from.as_deref(), Some("/settings"));
    }
}
