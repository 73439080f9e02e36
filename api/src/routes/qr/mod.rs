//! Routes for `/qr`, the student-facing scan endpoint.

pub mod post;

use axum::{Router, routing::post};
use post::scan;
use util::state::AppState;

/// Builds the `/qr` route group.
///
/// - `POST /qr/scan` → `scan`
pub fn qr_routes(app_state: AppState) -> Router<AppState> {
    Router::new()
        .route("/scan", post(scan))
        .with_state(app_state)
}
