use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use util::state::AppState;

use super::common::CurrentQrResponse;
use crate::response::ApiResponse;
use db::models::attendance_record;

/// GET `/api/classes/{class_id}/qr`
///
/// Get the token currently on screen for an active broadcast, together
/// with the number of students already marked. Polled by the QR display
/// between rotations.
///
/// **Auth**: admin.
///
/// **Responses**:
/// - `200 OK` with the current token.
/// - `404` when no broadcast is running for this class.
pub async fn current_qr(
    State(state): State<AppState>,
    Path(class_id): Path<i64>,
) -> (StatusCode, Json<ApiResponse<CurrentQrResponse>>) {
    let issued = match state.qr().current_token(class_id).await {
        Ok(issued) => issued,
        Err(err) => {
            return (
                StatusCode::NOT_FOUND,
                Json(ApiResponse::error(err.to_string())),
            );
        }
    };

    let marked_count = attendance_record::Model::marked_count(state.db(), class_id)
        .await
        .unwrap_or(0);

    (
        StatusCode::OK,
        Json(ApiResponse::success(
            CurrentQrResponse {
                class_id,
                token: issued.token,
                issued_at: issued.issued_at.to_rfc3339(),
                marked_count,
            },
            "Current QR token",
        )),
    )
}
