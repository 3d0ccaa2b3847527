//! Admin API endpoints, authenticated with `X-AdminKey`
//!
//! Every admin route answers both GET and POST.

pub mod api_keys;
pub mod buckets;
pub mod records;

use axum::{Router, routing::get};

use super::state::AppState;

/// Create admin API router
pub fn create_admin_router() -> Router<AppState> {
    Router::new()
        // Buckets
        .route("/add/{bucket}/", get(buckets::add_bucket).post(buckets::add_bucket))
        .route("/set/{bucket}/", get(buckets::set_bucket).post(buckets::set_bucket))
        .route("/del/{bucket}/", get(buckets::del_bucket).post(buckets::del_bucket))
        .route(
            "/enable/{bucket}/",
            get(buckets::enable_bucket).post(buckets::enable_bucket),
        )
        .route(
            "/disable/{bucket}/",
            get(buckets::disable_bucket).post(buckets::disable_bucket),
        )
        // Records
        .route(
            "/add/{bucket}/{key}/",
            get(records::add_record).post(records::add_record),
        )
        .route(
            "/set/{bucket}/{key}/",
            get(records::set_record).post(records::set_record),
        )
        .route(
            "/del/{bucket}/{key}/",
            get(records::del_record).post(records::del_record),
        )
        // API keys
        .route(
            "/create/",
            get(api_keys::create_api_key).post(api_keys::create_api_key),
        )
        .route(
            "/allow/{key}/",
            get(api_keys::allow_everywhere).post(api_keys::allow_everywhere),
        )
        .route(
            "/revoke/{key}/",
            get(api_keys::revoke_everywhere).post(api_keys::revoke_everywhere),
        )
        .route(
            "/allow/{key}/{bucket}/",
            get(api_keys::allow_on_bucket).post(api_keys::allow_on_bucket),
        )
        .route(
            "/revoke/{key}/{bucket}/",
            get(api_keys::revoke_on_bucket).post(api_keys::revoke_on_bucket),
        )
}
