use crate::application::services::{AuthServiceImpl, LegacySwapServiceImpl, SwapServiceImpl};
use crate::config::Config;
use crate::router::{RouteTable, Router};
use crate::session::{FileStorage, SessionStorage, SessionStore};
use crate::transport::ApiHttpClient;
use anyhow::Result;
use std::sync::Arc;

/// Explicitly constructed per-process wiring: one session store, one
/// router, one HTTP client, and the three endpoint groups on top. The
/// session is restored from durable storage before the router or client
/// see their first call.
pub struct AppContext {
    pub config: Config,
    pub session: Arc<SessionStore>,
    pub router: Arc<Router>,
    pub auth: AuthServiceImpl,
    pub legacy_swap: LegacySwapServiceImpl,
    pub swap: SwapServiceImpl,
}

impl AppContext {
    /// Builds the context with file-backed session persistence at the
    /// configured location.
    pub fn new(config: Config) -> Result<Self> {
        let storage = Box::new(FileStorage::new(&config.storage.session_file));
        Self::with_storage(config, storage)
    }

    /// Builds the context over an arbitrary storage backend.
    pub fn with_storage(config: Config, storage: Box<dyn SessionStorage>) -> Result<Self> {
        let session = Arc::new(SessionStore::new(storage));
        let router = Arc::new(Router::new(RouteTable::standard(), session.clone()));
        let client = Arc::new(ApiHttpClient::new(
            &config,
            session.clone(),
            router.clone(),
        )?);

        Ok(Self {
            config,
            session: session.clone(),
            router,
            auth: AuthServiceImpl::new(client.clone(), session),
            legacy_swap: LegacySwapServiceImpl::new(client.clone()),
            swap: SwapServiceImpl::new(client),
        })
    }
}
