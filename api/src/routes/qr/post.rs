use axum::{Extension, Json, extract::State, http::StatusCode};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use validator::Validate;

use attendance::{ScanError, ScanProcessor};
use db::store::AttendanceStore;
use util::state::AppState;

use crate::auth::claims::AuthUser;
use crate::response::ApiResponse;
use crate::routes::common::format_validation_errors;

#[derive(Debug, Deserialize, Validate)]
pub struct ScanRequest {
    #[validate(length(min = 1, message = "Token is required"))]
    pub token: String,
}

#[derive(Debug, Serialize, Default)]
pub struct ScanResponse {
    pub status: String,
    pub marked_at: String,
}

/// POST /api/qr/scan
///
/// Record attendance from a scanned QR token. The caller must be a student;
/// the token decides which class is being marked.
///
/// ### Request Body
/// ```json
/// { "token": "12.1766390400.9f04ab21c3d45e67.ab...ff" }
/// ```
///
/// ### Responses
/// - `200 OK` `{ "status": "present" | "late", "marked_at": "..." }`
/// - `400` invalid or expired token, cancelled class, or closed window.
/// - `403` caller is not a student, or not enrolled in the course.
/// - `404` the class in the token does not exist.
/// - `409` attendance already recorded for this class.
pub async fn scan(
    State(state): State<AppState>,
    Extension(AuthUser(claims)): Extension<AuthUser>,
    Json(body): Json<ScanRequest>,
) -> (StatusCode, Json<ApiResponse<ScanResponse>>) {
    if let Err(validation_errors) = body.validate() {
        return (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::error(format_validation_errors(
                &validation_errors,
            ))),
        );
    }

    let processor = ScanProcessor::new(state.qr_clone(), AttendanceStore::new(state.db_clone()));

    match processor.process(&body.token, claims.sub, Utc::now()).await {
        Ok(outcome) => (
            StatusCode::OK,
            Json(ApiResponse::success(
                ScanResponse {
                    status: outcome.status.as_str().into(),
                    marked_at: outcome.marked_at.to_rfc3339(),
                },
                "Attendance recorded",
            )),
        ),
        Err(err) => {
            if let ScanError::Internal(source) = &err {
                tracing::error!(user = claims.sub, error = %source, "scan failed on a collaborator");
            } else {
                tracing::debug!(user = claims.sub, kind = err.kind(), "scan rejected");
            }
            (scan_status(&err), Json(ApiResponse::error(err.to_string())))
        }
    }
}

/// Maps each scan failure to its HTTP status.
fn scan_status(err: &ScanError) -> StatusCode {
    match err {
        ScanError::InvalidToken
        | ScanError::ExpiredOrUnknownToken
        | ScanError::ClassCancelled
        | ScanError::WindowClosed => StatusCode::BAD_REQUEST,
        ScanError::NotEnrolled | ScanError::Unauthorized => StatusCode::FORBIDDEN,
        ScanError::ClassNotFound => StatusCode::NOT_FOUND,
        ScanError::AlreadyMarked => StatusCode::CONFLICT,
        ScanError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}
