use crate::config::Config;
use crate::groups::store::AccountGroupStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub store: AccountGroupStore,
    /// Kept for handlers that need runtime settings (port, log level).
    #[allow(dead_code)]
    pub config: Config,
}
