//! Self-service routes for the authenticated student under `/me`.

pub mod attendance;
pub mod classes;

use axum::{Router, routing::get};
use util::state::AppState;

use self::attendance::my_attendance;
use self::classes::my_classes_today;

/// Builds the `/me` route group.
///
/// - `GET /me/attendance` → the caller's attendance records, newest first
/// - `GET /me/classes/today` → today's sessions for the caller's courses
pub fn me_routes(app_state: AppState) -> Router<AppState> {
    Router::new()
        .route("/attendance", get(my_attendance))
        .route("/classes/today", get(my_classes_today))
        .with_state(app_state)
}
