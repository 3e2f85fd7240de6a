//! API Routes
//!
//! Configures the Axum router for the proxy.

use axum::{routing::get, Router};
use tower_http::trace::TraceLayer;

use super::handlers::{get_handler, root_handler, AppState};

/// Creates the router.
///
/// # Endpoints
/// - `GET /` - Empty key, always 400
/// - `GET /<key>` - Value for `key`, read through the cache
///
/// # Middleware
/// - Tracing: Logs all requests for debugging
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(root_handler))
        .route("/*key", get(get_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
