pub mod guard;

use crate::constants::{FACESWAP_PATH, HOME_PATH, LOGIN_PATH};
use crate::session::SessionStore;
use self::guard::GuardDecision;
use std::fmt;
use std::fmt::{Display, Formatter};
use std::sync::{Arc, RwLock};
use tracing::debug;

/// One entry in the route table.
#[derive(Debug, Clone)]
pub struct Route {
    pub path: String,
    pub name: Option<String>,
    pub requires_auth: bool,
    /// Table-level alias: entering this route forwards to another path.
    pub redirect: Option<String>,
}

impl Route {
    pub fn new(path: &str, requires_auth: bool) -> Self {
        Self {
            path: path.to_string(),
            name: None,
            requires_auth,
            redirect: None,
        }
    }

    pub fn named(mut self, name: &str) -> Self {
        self.name = Some(name.to_string());
        self
    }

    pub fn redirect_to(mut self, path: &str) -> Self {
        self.redirect = Some(path.to_string());
        self
    }
}

#[derive(Debug, Clone, Default)]
pub struct RouteTable {
    routes: Vec<Route>,
}

impl RouteTable {
    pub fn new(routes: Vec<Route>) -> Self {
        Self { routes }
    }

    /// The application's route table: a public login screen and an
    /// authenticated area whose root forwards to the face-swap screen.
    pub fn standard() -> Self {
        Self::new(vec![
            Route::new(LOGIN_PATH, false).named("login"),
            Route::new(HOME_PATH, true).redirect_to(FACESWAP_PATH),
            Route::new(FACESWAP_PATH, true).named("faceswap"),
            Route::new("/prompts", true).named("prompts"),
        ])
    }

    pub fn find(&self, path: &str) -> Option<&Route> {
        self.routes.iter().find(|r| r.path == path)
    }
}

#[derive(Debug)]
pub enum RouteError {
    NotFound(String),
}

impl Display for RouteError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            RouteError::NotFound(path) => write!(f, "no route matches path: {path}"),
        }
    }
}

impl std::error::Error for RouteError {}

/// Hook the transport uses to force a client-side navigation as a side
/// effect of an authorization failure.
pub trait Navigator: Send + Sync {
    fn force_navigate(&self, path: &str);
}

/// Client-side router. Transitions are synchronous and run to completion;
/// every `navigate` call passes through the authentication guard before
/// the current path is updated.
pub struct Router {
    table: RouteTable,
    session: Arc<SessionStore>,
    current: RwLock<String>,
}

impl Router {
    pub fn new(table: RouteTable, session: Arc<SessionStore>) -> Self {
        Self {
            table,
            session,
            current: RwLock::new(LOGIN_PATH.to_string()),
        }
    }

    pub fn current_path(&self) -> String {
        self.current.read().unwrap().clone()
    }

    /// Attempts a transition to `path`. The guard may redirect the
    /// transition; a table-level alias is then followed. Returns the path
    /// actually landed on.
    pub fn navigate(&self, path: &str) -> Result<String, RouteError> {
        let route = self
            .table
            .find(path)
            .ok_or_else(|| RouteError::NotFound(path.to_string()))?;

        let destination = match guard::check(&self.session, route) {
            GuardDecision::Allow => route,
            GuardDecision::Redirect(to) => {
                debug!("Guard redirected {} -> {}", path, to);
                self.table
                    .find(&to)
                    .ok_or_else(|| RouteError::NotFound(to.clone()))?
            }
        };

        // Follow at most one alias hop ("/" forwards to "/faceswap").
        let landed = match &destination.redirect {
            Some(to) => self
                .table
                .find(to)
                .ok_or_else(|| RouteError::NotFound(to.clone()))?,
            None => destination,
        };

        *self.current.write().unwrap() = landed.path.clone();
        Ok(landed.path.clone())
    }
}

impl Navigator for Router {
    /// Bypasses route resolution: used by the forced-logout path, where
    /// the session is already cleared and the destination is the login
    /// screen.
    fn force_navigate(&self, path: &str) {
        debug!("Forced navigation to {}", path);
        *self.current.write().unwrap() = path.to_string();
    }
}

#[cfg(test)]
mod tests_router {
    use super::*;
    use crate::session::MemoryStorage;
    use pretty_assertions::assert_eq;

    fn router_with_session(authenticated: bool) -> Router {
        let session = Arc::new(SessionStore::new(Box::new(MemoryStorage::new())));
        if authenticated {
            session.set_auth("tok_123", "user@example.com");
        }
        Router::new(RouteTable::standard(), session)
    }

    #[test]
    fn test_anonymous_navigation_to_protected_lands_on_login() {
        let router = router_with_session(false);
        let landed = router.navigate("/faceswap").unwrap();
        assert_eq!(landed, "/login");
        assert_eq!(router.current_path(), "/login");
    }

    #[test]
    fn test_authenticated_navigation_to_protected_allows() {
        let router = router_with_session(true);
        let landed = router.navigate("/faceswap").unwrap();
        assert_eq!(landed, "/faceswap");
    }

    #[test]
    fn test_authenticated_login_redirects_to_home_alias() {
        let router = router_with_session(true);
        // Guard sends /login -> /, and / forwards to /faceswap.
        let landed = router.navigate("/login").unwrap();
        assert_eq!(landed, "/faceswap");
    }

    #[test]
    fn test_root_alias_follows_to_faceswap() {
        let router = router_with_session(true);
        let landed = router.navigate("/").unwrap();
        assert_eq!(landed, "/faceswap");
    }

    #[test]
    fn test_unknown_path_is_an_error() {
        let router = router_with_session(true);
        let err = router.navigate("/nope").unwrap_err();
        assert_eq!(err.to_string(), "no route matches path: /nope");
    }

    #[test]
    fn test_force_navigate_sets_current_path() {
        let router = router_with_session(true);
        router.force_navigate("/login");
        assert_eq!(router.current_path(), "/login");
    }

    #[test]
    fn test_logout_then_protected_navigation_redirects() {
        let session = Arc::new(SessionStore::new(Box::new(MemoryStorage::new())));
        session.set_auth("tok_123", "user@example.com");
        let router = Router::new(RouteTable::standard(), session.clone());

        assert_eq!(router.navigate("/prompts").unwrap(), "/prompts");
        session.logout();
        assert_eq!(router.navigate("/prompts").unwrap(), "/login");
    }
}
