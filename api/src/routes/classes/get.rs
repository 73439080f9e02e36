use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use sea_orm::EntityTrait;
use util::state::AppState;

use crate::response::ApiResponse;
use crate::routes::common::ClassSessionResponse;
use db::models::{class_session::Entity as ClassSessionEntity, course::Entity as CourseEntity};

/// GET `/api/classes/{class_id}`
///
/// Fetch a single class session with its course summary. Shown as the
/// header on the QR display and in schedule views.
pub async fn get_class(
    State(state): State<AppState>,
    Path(class_id): Path<i64>,
) -> (StatusCode, Json<ApiResponse<ClassSessionResponse>>) {
    let db = state.db();

    match ClassSessionEntity::find_by_id(class_id)
        .find_also_related(CourseEntity)
        .one(db)
        .await
    {
        Ok(Some((session, Some(course)))) => (
            StatusCode::OK,
            Json(ApiResponse::success(
                ClassSessionResponse::from_parts(session, course),
                "Class session retrieved",
            )),
        ),
        Ok(None) => (
            StatusCode::NOT_FOUND,
            Json(ApiResponse::error("Class session not found")),
        ),
        Ok(Some((_, None))) | Err(_) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiResponse::error("Database error retrieving class session")),
        ),
    }
}
