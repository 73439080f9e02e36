use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use util::state::AppState;

use crate::response::ApiResponse;

/// DELETE `/api/classes/{class_id}/qr`
///
/// Stop the QR broadcast for a class. Every outstanding token becomes
/// invalid immediately.
///
/// **Auth**: admin.
///
/// **Responses**:
/// - `200 OK` on stop.
/// - `409` when no broadcast is running for this class.
pub async fn stop_broadcast(
    State(state): State<AppState>,
    Path(class_id): Path<i64>,
) -> (StatusCode, Json<ApiResponse<()>>) {
    match state.qr().stop_broadcast(class_id).await {
        Ok(()) => (
            StatusCode::OK,
            Json(ApiResponse::success((), "QR broadcast stopped")),
        ),
        Err(err) => (StatusCode::CONFLICT, Json(ApiResponse::error(err.to_string()))),
    }
}
