use axum::{Extension, Json, extract::State, http::StatusCode};
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QueryOrder};
use serde::Serialize;
use std::collections::HashMap;
use util::state::AppState;

use crate::auth::claims::AuthUser;
use crate::response::ApiResponse;
use db::models::{attendance_record, class_session, course, student};

/// One of the caller's attendance records, joined with its class and course.
#[derive(Debug, Serialize)]
pub struct MyAttendanceEntry {
    pub class_id: i64,
    pub course_code: String,
    pub course_name: String,
    pub scheduled_start: String,
    pub status: String,
    pub marked_at: String,
}

/// GET `/api/me/attendance`
///
/// The calling student's attendance records, newest first.
///
/// **Auth**: any authenticated user with a student profile; callers without
/// one get `403`.
pub async fn my_attendance(
    State(state): State<AppState>,
    Extension(AuthUser(claims)): Extension<AuthUser>,
) -> (StatusCode, Json<ApiResponse<Vec<MyAttendanceEntry>>>) {
    let db = state.db();

    let student = match student::Model::find_by_user(db, claims.sub).await {
        Ok(Some(student)) => student,
        Ok(None) => {
            return (
                StatusCode::FORBIDDEN,
                Json(ApiResponse::error("Student not found")),
            );
        }
        Err(e) => {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::error(format!("Database error: {}", e))),
            );
        }
    };

    let rows = match attendance_record::Entity::find()
        .filter(attendance_record::Column::StudentId.eq(student.id))
        .order_by_desc(attendance_record::Column::MarkedAt)
        .all(db)
        .await
    {
        Ok(rows) => rows,
        Err(e) => {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::error(format!("Database error: {}", e))),
            );
        }
    };

    let class_ids: Vec<i64> = rows.iter().map(|r| r.class_id).collect();
    let sessions: HashMap<i64, class_session::Model> = class_session::Entity::find()
        .filter(class_session::Column::Id.is_in(class_ids))
        .all(db)
        .await
        .unwrap_or_default()
        .into_iter()
        .map(|c| (c.id, c))
        .collect();

    let course_ids: Vec<i64> = sessions.values().map(|c| c.course_id).collect();
    let courses: HashMap<i64, course::Model> = course::Entity::find()
        .filter(course::Column::Id.is_in(course_ids))
        .all(db)
        .await
        .unwrap_or_default()
        .into_iter()
        .map(|c| (c.id, c))
        .collect();

    let entries: Vec<MyAttendanceEntry> = rows
        .into_iter()
        .filter_map(|r| {
            let session = sessions.get(&r.class_id)?;
            let course = courses.get(&session.course_id)?;
            Some(MyAttendanceEntry {
                class_id: r.class_id,
                course_code: course.code.clone(),
                course_name: course.name.clone(),
                scheduled_start: session.scheduled_start.to_rfc3339(),
                status: r.status.to_string(),
                marked_at: r.marked_at.to_rfc3339(),
            })
        })
        .collect();

    (
        StatusCode::OK,
        Json(ApiResponse::success(entries, "Attendance records retrieved")),
    )
}
