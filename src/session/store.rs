use crate::constants::{EMAIL_KEY, TOKEN_KEY};
use crate::session::storage::SessionStorage;
use std::fmt;
use std::sync::RwLock;
use tracing::{debug, error};

#[derive(Debug, Default)]
struct SessionState {
    token: Option<String>,
    email: Option<String>,
}

/// Single per-process owner of the authentication state. All other
/// components read it through the accessors; only `set_auth` and `logout`
/// mutate it. The initial state is read synchronously from durable storage
/// so a session survives restarts.
pub struct SessionStore {
    state: RwLock<SessionState>,
    storage: Box<dyn SessionStorage>,
}

impl SessionStore {
    pub fn new(storage: Box<dyn SessionStorage>) -> Self {
        let state = SessionState {
            token: storage.get(TOKEN_KEY),
            email: storage.get(EMAIL_KEY),
        };
        if state.token.is_some() {
            debug!("Restored session from durable storage");
        }
        Self {
            state: RwLock::new(state),
            storage,
        }
    }

    /// Records the token and email in memory and in durable storage. The
    /// token shape is not validated. Storage write failures are logged and
    /// swallowed; the in-memory session is authoritative for this process.
    pub fn set_auth(&self, token: &str, email: &str) {
        {
            let mut state = self.state.write().unwrap();
            state.token = Some(token.to_string());
            state.email = Some(email.to_string());
        }
        if let Err(e) = self.storage.set(TOKEN_KEY, token) {
            error!("Failed to persist session token: {}", e);
        }
        if let Err(e) = self.storage.set(EMAIL_KEY, email) {
            error!("Failed to persist session email: {}", e);
        }
    }

    /// Clears the session from memory and durable storage. Idempotent.
    pub fn logout(&self) {
        {
            let mut state = self.state.write().unwrap();
            state.token = None;
            state.email = None;
        }
        if let Err(e) = self.storage.remove(TOKEN_KEY) {
            error!("Failed to remove persisted token: {}", e);
        }
        if let Err(e) = self.storage.remove(EMAIL_KEY) {
            error!("Failed to remove persisted email: {}", e);
        }
    }

    /// Derived on read: true iff a non-empty token is present.
    pub fn is_authenticated(&self) -> bool {
        self.state
            .read()
            .unwrap()
            .token
            .as_deref()
            .is_some_and(|t| !t.is_empty())
    }

    pub fn token(&self) -> Option<String> {
        self.state.read().unwrap().token.clone()
    }

    pub fn email(&self) -> Option<String> {
        self.state.read().unwrap().email.clone()
    }
}

impl fmt::Display for SessionStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.read().unwrap();
        write!(
            f,
            "{{\"token\":{},\"email\":{},\"authenticated\":{}}}",
            state
                .token
                .as_ref()
                .map_or("null".to_string(), |_| "\"[REDACTED]\"".to_string()),
            state
                .email
                .as_ref()
                .map_or("null".to_string(), |e| format!("\"{e}\"")),
            state.token.as_deref().is_some_and(|t| !t.is_empty())
        )
    }
}

impl fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionStore")
            .field("authenticated", &self.is_authenticated())
            .finish()
    }
}
