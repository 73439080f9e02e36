use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use sea_orm::EntityTrait;
use util::state::AppState;

use super::common::QrTokenResponse;
use crate::response::ApiResponse;
use db::models::class_session::Entity as ClassSessionEntity;

/// POST `/api/classes/{class_id}/qr`
///
/// Start a QR broadcast for a class. The first token is returned so the
/// display can render immediately instead of waiting for its first poll.
///
/// **Auth**: admin.
///
/// **Responses**:
/// - `201 Created` with the initial token.
/// - `400` when the class session has been cancelled.
/// - `409` when a broadcast is already running for this class.
pub async fn start_broadcast(
    State(state): State<AppState>,
    Path(class_id): Path<i64>,
) -> (StatusCode, Json<ApiResponse<QrTokenResponse>>) {
    let Some(session) = ClassSessionEntity::find_by_id(class_id)
        .one(state.db())
        .await
        .ok()
        .flatten()
    else {
        return (
            StatusCode::NOT_FOUND,
            Json(ApiResponse::error("Class session not found")),
        );
    };

    if session.is_cancelled {
        return (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::error("Class session has been cancelled")),
        );
    }

    match state.qr().start_broadcast(class_id).await {
        Ok(issued) => (
            StatusCode::CREATED,
            Json(ApiResponse::success(
                QrTokenResponse::new(class_id, issued),
                "QR broadcast started",
            )),
        ),
        Err(err) => (StatusCode::CONFLICT, Json(ApiResponse::error(err.to_string()))),
    }
}
