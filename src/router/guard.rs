use crate::constants::{HOME_PATH, LOGIN_PATH};
use crate::router::Route;
use crate::session::SessionStore;

/// Outcome of a guard evaluation for one prospective transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
    Allow,
    Redirect(String),
}

/// Runs before every route transition. Pure function of the current
/// session state and the destination; evaluated in order:
/// 1. destination requires auth and session is anonymous → login screen;
/// 2. destination is the login screen and session is authenticated → home;
/// 3. otherwise the transition is allowed.
pub fn check(session: &SessionStore, route: &Route) -> GuardDecision {
    let authenticated = session.is_authenticated();

    if route.requires_auth && !authenticated {
        GuardDecision::Redirect(LOGIN_PATH.to_string())
    } else if route.path == LOGIN_PATH && authenticated {
        GuardDecision::Redirect(HOME_PATH.to_string())
    } else {
        GuardDecision::Allow
    }
}
