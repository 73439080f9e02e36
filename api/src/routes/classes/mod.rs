//! Routes for `/classes/{class_id}`: class detail, the QR broadcast
//! controls, and the attendance views.

pub mod attendance;
pub mod get;
pub mod qr;

use axum::{
    Router,
    middleware::from_fn,
    routing::{get, post},
};
use util::state::AppState;

use crate::auth::guards::allow_admin;
use self::attendance::{list_class_records, marked_count};
use self::get::get_class;
use self::qr::{current_qr, start_broadcast, stop_broadcast};

/// Builds the `/classes` route group.
///
/// - `GET    /classes/{class_id}` → class detail (any authenticated user)
/// - `POST   /classes/{class_id}/qr` → start a QR broadcast (admin)
/// - `DELETE /classes/{class_id}/qr` → stop the QR broadcast (admin)
/// - `GET    /classes/{class_id}/qr` → current token + count (admin)
/// - `GET    /classes/{class_id}/attendance/records` → record listing (admin)
/// - `GET    /classes/{class_id}/attendance/count` → live counter (any)
pub fn classes_routes(app_state: AppState) -> Router<AppState> {
    Router::new()
        .route("/{class_id}", get(get_class))
        .route(
            "/{class_id}/qr",
            post(start_broadcast)
                .delete(stop_broadcast)
                .get(current_qr)
                .route_layer(from_fn(allow_admin)),
        )
        .route(
            "/{class_id}/attendance/records",
            get(list_class_records).route_layer(from_fn(allow_admin)),
        )
        .route("/{class_id}/attendance/count", get(marked_count))
        .with_state(app_state)
}
