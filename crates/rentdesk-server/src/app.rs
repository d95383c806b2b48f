//! Router assembly.

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;

/// Build the application router with every route nested under `api_prefix`.
///
/// `api_prefix` must start with `/` and must not end with one; the
/// configuration layer enforces both.
pub fn create_app(state: AppState, api_prefix: &str) -> Router {
    let api = Router::new()
        .route("/health", get(handlers::health_check))
        .route(
            "/maintenance-requests",
            post(handlers::create_request).get(handlers::list_requests),
        )
        .route("/maintenance-requests/stats", get(handlers::request_stats))
        .route(
            "/maintenance-requests/{id}",
            get(handlers::get_request).patch(handlers::transition_request),
        )
        .route("/maintenance-requests/{id}/notes", post(handlers::add_note));

    Router::new()
        .nest(api_prefix, api)
        .fallback(handlers::not_found)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
