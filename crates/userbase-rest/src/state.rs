//! Application state for Axum handlers.

use std::sync::Arc;
use userbase_service::UserService;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub user_service: Arc<dyn UserService>,
    /// Name of the record store backend, reported by `/health`.
    pub store_backend: Arc<str>,
}

impl AppState {
    /// Creates a new application state.
    pub fn new(user_service: Arc<dyn UserService>, store_backend: impl Into<Arc<str>>) -> Self {
        Self {
            user_service,
            store_backend: store_backend.into(),
        }
    }
}
