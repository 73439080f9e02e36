//! Read-only attendance views: the admin record listing and the live
//! counter the QR display shows.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use sea_orm::{ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder};
use std::collections::HashMap;
use util::state::AppState;

use crate::response::ApiResponse;
use db::models::{
    attendance_record::{self, Column as RecordCol, Entity as RecordEntity},
    student::{self, Column as StudentCol, Entity as StudentEntity},
};

/// A single attendance record (DTO) for API responses.
#[derive(serde::Serialize)]
pub struct AttendanceRecordDto {
    pub class_id: i64,
    pub student_id: i64,
    pub student_number: Option<String>,
    pub full_name: Option<String>,
    pub status: String,
    pub marked_at: String,
}

/// Query params for listing class records.
#[derive(serde::Deserialize)]
pub struct RecordsListQuery {
    /// Free-text search:
    /// - numeric → matches `student_id`
    /// - text   → matches student number or name (contains)
    pub q: Option<String>,
    /// Sort by: `marked_at` | `student_id` (prefix with `-` for desc). Default `-marked_at`.
    pub sort: Option<String>,
    /// 1-based page index (default 1).
    pub page: Option<i32>,
    /// Items per page (default 20, max 200).
    pub per_page: Option<i32>,
}

/// Paged response for the records list.
#[derive(serde::Serialize, Default)]
pub struct RecordsListResponse {
    pub records: Vec<AttendanceRecordDto>,
    pub page: i32,
    pub per_page: i32,
    pub total: i32,
}

#[derive(serde::Serialize, Default)]
pub struct CountResponse {
    pub class_id: i64,
    pub count: u64,
}

/// GET `/api/classes/{class_id}/attendance/records`
///
/// List attendance records for a class with pagination, sorting, and search.
///
/// **Auth**: admin.
///
/// **Query**:
/// - `q` *(optional)*: numeric matches `student_id`, text matches the
///   student number or name.
/// - `sort` *(optional)*: `marked_at` | `student_id` (prefix `-` for desc).
///   Default `-marked_at`.
/// - `page` *(default 1)*
/// - `per_page` *(default 20, max 200)*
pub async fn list_class_records(
    State(state): State<AppState>,
    Path(class_id): Path<i64>,
    Query(q): Query<RecordsListQuery>,
) -> (StatusCode, Json<ApiResponse<RecordsListResponse>>) {
    let db = state.db();
    let page = q.page.unwrap_or(1).max(1) as u64;
    let per_page = q.per_page.unwrap_or(20).clamp(1, 200) as u64;

    let mut sel = RecordEntity::find().filter(RecordCol::ClassId.eq(class_id));

    if let Some(needle) = q.q.as_ref().filter(|s| !s.trim().is_empty()) {
        if let Ok(id) = needle.trim().parse::<i64>() {
            sel = sel.filter(RecordCol::StudentId.eq(id));
        } else {
            let matching: Vec<i64> = StudentEntity::find()
                .filter(
                    Condition::any()
                        .add(StudentCol::StudentNumber.contains(needle))
                        .add(StudentCol::FirstName.contains(needle))
                        .add(StudentCol::LastName.contains(needle)),
                )
                .all(db)
                .await
                .unwrap_or_default()
                .into_iter()
                .map(|s| s.id)
                .collect();
            sel = sel.filter(RecordCol::StudentId.is_in(matching));
        }
    }

    sel = match q.sort.as_deref() {
        Some("marked_at") => sel.order_by_asc(RecordCol::MarkedAt),
        Some("student_id") => sel.order_by_asc(RecordCol::StudentId),
        Some("-student_id") => sel.order_by_desc(RecordCol::StudentId),
        _ => sel.order_by_desc(RecordCol::MarkedAt),
    };

    let paginator = sel.paginate(db, per_page);
    let total = paginator.num_items().await.unwrap_or(0) as i32;
    let rows = paginator
        .fetch_page(page.saturating_sub(1))
        .await
        .unwrap_or_default();

    let student_ids: Vec<i64> = rows.iter().map(|r| r.student_id).collect();
    let students: HashMap<i64, student::Model> = StudentEntity::find()
        .filter(StudentCol::Id.is_in(student_ids))
        .all(db)
        .await
        .unwrap_or_default()
        .into_iter()
        .map(|s| (s.id, s))
        .collect();

    let records = rows
        .into_iter()
        .map(|r| {
            let s = students.get(&r.student_id);
            AttendanceRecordDto {
                class_id: r.class_id,
                student_id: r.student_id,
                student_number: s.map(|s| s.student_number.clone()),
                full_name: s.map(|s| s.full_name()),
                status: r.status.to_string(),
                marked_at: r.marked_at.to_rfc3339(),
            }
        })
        .collect();

    (
        StatusCode::OK,
        Json(ApiResponse::success(
            RecordsListResponse {
                records,
                page: page as i32,
                per_page: per_page as i32,
                total,
            },
            "Attendance records retrieved",
        )),
    )
}

/// GET `/api/classes/{class_id}/attendance/count`
///
/// Number of students marked present or late for a class. Drives the live
/// counter next to the QR code.
///
/// **Auth**: any authenticated user.
pub async fn marked_count(
    State(state): State<AppState>,
    Path(class_id): Path<i64>,
) -> (StatusCode, Json<ApiResponse<CountResponse>>) {
    match attendance_record::Model::marked_count(state.db(), class_id).await {
        Ok(count) => (
            StatusCode::OK,
            Json(ApiResponse::success(
                CountResponse { class_id, count },
                "Attendance count retrieved",
            )),
        ),
        Err(e) => {
            tracing::error!(error = %e, class_id, "failed to count attendance records");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::error("Failed to count attendance records")),
            )
        }
    }
}
