use axum::{Router, routing::get};
use tower_http::trace::TraceLayer;

use super::admin;
use super::health;
use super::state::AppState;
use super::v1;

/// Base path of the client and admin APIs
pub const API_BASE: &str = "/api/v1";

/// Create the full router with application state
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Unauthenticated
        .route("/", get(health::information))
        .route("/status/", get(health::status))
        // Client and admin APIs share one prefix
        .nest(
            API_BASE,
            v1::create_v1_router().merge(admin::create_admin_router()),
        )
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}
