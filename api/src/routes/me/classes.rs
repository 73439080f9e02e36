use axum::{Extension, Json, extract::State, http::StatusCode};
use chrono::{Duration, NaiveTime, Utc};
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QueryOrder};
use std::collections::HashMap;
use util::state::AppState;

use crate::auth::claims::AuthUser;
use crate::response::ApiResponse;
use crate::routes::common::ClassSessionResponse;
use db::models::{class_session, course, enrollment, student};

/// GET `/api/me/classes/today`
///
/// Today's non-cancelled class sessions for the courses the calling student
/// is actively enrolled in, ordered by start time. "Today" is the UTC day.
///
/// **Auth**: any authenticated user with a student profile; callers without
/// one get `403`.
pub async fn my_classes_today(
    State(state): State<AppState>,
    Extension(AuthUser(claims)): Extension<AuthUser>,
) -> (StatusCode, Json<ApiResponse<Vec<ClassSessionResponse>>>) {
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

    let course_ids: Vec<i64> = match enrollment::Entity::find()
        .filter(enrollment::Column::StudentId.eq(student.id))
        .filter(enrollment::Column::IsActive.eq(true))
        .all(db)
        .await
    {
        Ok(enrollments) => enrollments.into_iter().map(|e| e.course_id).collect(),
        Err(e) => {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::error(format!("Database error: {}", e))),
            );
        }
    };

    let day_start = Utc::now().date_naive().and_time(NaiveTime::MIN).and_utc();
    let day_end = day_start + Duration::days(1);

    let sessions = match class_session::Entity::find()
        .filter(class_session::Column::CourseId.is_in(course_ids))
        .filter(class_session::Column::ScheduledStart.gte(day_start))
        .filter(class_session::Column::ScheduledStart.lt(day_end))
        .filter(class_session::Column::IsCancelled.eq(false))
        .order_by_asc(class_session::Column::ScheduledStart)
        .all(db)
        .await
    {
        Ok(sessions) => sessions,
        Err(e) => {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::error(format!("Database error: {}", e))),
            );
        }
    };

    let course_ids: Vec<i64> = sessions.iter().map(|s| s.course_id).collect();
    let courses: HashMap<i64, course::Model> = course::Entity::find()
        .filter(course::Column::Id.is_in(course_ids))
        .all(db)
        .await
        .unwrap_or_default()
        .into_iter()
        .map(|c| (c.id, c))
        .collect();

    let today: Vec<ClassSessionResponse> = sessions
        .into_iter()
        .filter_map(|session| {
            let course = courses.get(&session.course_id)?.clone();
            Some(ClassSessionResponse::from_parts(session, course))
        })
        .collect();

    (
        StatusCode::OK,
        Json(ApiResponse::success(today, "Today's classes retrieved")),
    )
}
