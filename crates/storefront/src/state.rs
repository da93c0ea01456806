//! Application state shared across handlers.

use std::sync::Arc;

use crate::api::CommerceClient;
use crate::config::StorefrontConfig;

/// Application state shared across all handlers.
///
/// Cheaply cloneable via `Arc`. Handlers only ever need the backend API
/// client; configuration is consumed at startup (server binding, session
/// layer) and by the client itself.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    api: CommerceClient,
}

impl AppState {
    /// Create a new application state.
    #[must_use]
    pub fn new(config: &StorefrontConfig) -> Self {
        let api = CommerceClient::new(&config.api);

        Self {
            inner: Arc::new(AppStateInner { api }),
        }
    }

    /// Get a reference to the commerce backend API client.
    #[must_use]
    pub fn api(&self) -> &CommerceClient {
        &self.inner.api
    }
}
