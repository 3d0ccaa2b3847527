//! Client API endpoints, authenticated with `X-ApiKey`

pub mod check;

use axum::{Router, routing::get};

use super::health;
use super::state::AppState;

/// Create the client API router
pub fn create_v1_router() -> Router<AppState> {
    Router::new()
        .route("/status/", get(health::status))
        .route("/check/{bucket}/{key}/", get(check::check_key))
        .route("/bucket/{bucket}/", get(check::bucket_info))
}
