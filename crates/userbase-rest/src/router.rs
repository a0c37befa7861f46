//! Main application router.

use crate::{
    controllers::{health_controller, user_controller},
    middleware::logging_middleware,
    state::AppState,
};
use axum::{middleware, Router};
use tower_http::trace::TraceLayer;
use tracing::info;

/// Creates the application router.
///
/// The user dispatcher is mounted at both `/` and `/users`; health
/// endpoints sit alongside it.
pub fn create_router(state: AppState) -> Router {
    let router = Router::new()
        .merge(health_controller::router())
        .merge(user_controller::router())
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(logging_middleware));

    info!("Router created with user dispatcher at / and /users");
    router
}
