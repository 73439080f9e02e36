//! Collaborator seams consumed by the scan flow.
//!
//! The directory answers who is scanning and what class the token points at;
//! the ledger performs the one atomic write. Implementations live in the
//! persistence crate; tests substitute in-memory fakes.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::error::StoreError;
use crate::types::MarkStatus;

/// The slice of a scheduled class meeting the scan flow needs.
#[derive(Debug, Clone)]
pub struct ClassSession {
    pub id: i64,
    pub course_id: i64,
    pub scheduled_start: DateTime<Utc>,
    pub is_cancelled: bool,
}

/// A record the ledger is asked to create.
#[derive(Debug, Clone)]
pub struct NewAttendance {
    pub student_id: i64,
    pub class_id: i64,
    pub status: MarkStatus,
    pub marked_at: DateTime<Utc>,
    pub notes: Option<String>,
}

/// Outcome of the conditional insert.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertOutcome {
    Created,
    AlreadyExists,
}

/// Identity, class and enrollment lookups.
#[async_trait]
pub trait Directory: Send + Sync {
    /// Maps an authenticated principal to its student id, if one exists.
    async fn resolve_student(&self, principal: i64) -> Result<Option<i64>, StoreError>;

    async fn class_session(&self, class_id: i64) -> Result<Option<ClassSession>, StoreError>;

    async fn is_enrolled(&self, student_id: i64, course_id: i64) -> Result<bool, StoreError>;
}

/// Durable attendance store.
#[async_trait]
pub trait Ledger: Send + Sync {
    /// Inserts the record unless one already exists for the same student and
    /// class. Must be atomic at the storage layer; two racing calls for the
    /// same pair see one `Created` and one `AlreadyExists`.
    async fn try_insert(&self, record: NewAttendance) -> Result<InsertOutcome, StoreError>;
}
