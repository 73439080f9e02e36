//! DTOs shared by more than one route group.

use serde::Serialize;
use validator::ValidationErrors;

/// Flattens `validator` errors into one user-facing message.
pub fn format_validation_errors(errors: &ValidationErrors) -> String {
    errors
        .field_errors()
        .values()
        .flat_map(|errs| {
            errs.iter()
                .filter_map(|e| e.message.as_ref().map(|m| m.to_string()))
        })
        .collect::<Vec<_>>()
        .join("; ")
}

#[derive(Debug, Serialize, Default)]
pub struct CourseSummary {
    pub id: i64,
    pub code: String,
    pub name: String,
}

impl From<db::models::course::Model> for CourseSummary {
    fn from(course: db::models::course::Model) -> Self {
        Self {
            id: course.id,
            code: course.code,
            name: course.name,
        }
    }
}

/// A class session with its course, as shown on the QR display header and
/// in the student's daily schedule.
#[derive(Debug, Serialize, Default)]
pub struct ClassSessionResponse {
    pub id: i64,
    pub course: CourseSummary,
    pub scheduled_start: String,
    pub scheduled_end: String,
    pub topic: Option<String>,
    pub class_type: Option<String>,
    pub is_cancelled: bool,
}

impl ClassSessionResponse {
    pub fn from_parts(
        session: db::models::class_session::Model,
        course: db::models::course::Model,
    ) -> Self {
        Self {
            id: session.id,
            course: course.into(),
            scheduled_start: session.scheduled_start.to_rfc3339(),
            scheduled_end: session.scheduled_end.to_rfc3339(),
            topic: session.topic,
            class_type: session.class_type,
            is_cancelled: session.is_cancelled,
        }
    }
}
