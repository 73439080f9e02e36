//! SeaORM-backed directory and ledger for the scan flow.
//!
//! The ledger insert is a single `INSERT ... ON CONFLICT DO NOTHING` against
//! the (class_id, student_id) primary key, so racing scans resolve inside
//! the database rather than in application code.

use async_trait::async_trait;
use attendance::error::StoreError;
use attendance::traits::{ClassSession, Directory, InsertOutcome, Ledger, NewAttendance};
use sea_orm::sea_query::OnConflict;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};

use crate::models::{attendance_record, class_session, enrollment, student};

#[derive(Clone)]
pub struct AttendanceStore {
    db: DatabaseConnection,
}

impl AttendanceStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl Directory for AttendanceStore {
    async fn resolve_student(&self, principal: i64) -> Result<Option<i64>, StoreError> {
        let found = student::Entity::find()
            .filter(student::Column::UserId.eq(principal))
            .one(&self.db)
            .await?;
        Ok(found.map(|s| s.id))
    }

    async fn class_session(&self, class_id: i64) -> Result<Option<ClassSession>, StoreError> {
        let found = class_session::Entity::find_by_id(class_id)
            .one(&self.db)
            .await?;
        Ok(found.map(|c| ClassSession {
            id: c.id,
            course_id: c.course_id,
            scheduled_start: c.scheduled_start,
            is_cancelled: c.is_cancelled,
        }))
    }

    async fn is_enrolled(&self, student_id: i64, course_id: i64) -> Result<bool, StoreError> {
        let found = enrollment::Entity::find_by_id((student_id, course_id))
            .one(&self.db)
            .await?;
        Ok(found.is_some_and(|e| e.is_active))
    }
}

#[async_trait]
impl Ledger for AttendanceStore {
    async fn try_insert(&self, record: NewAttendance) -> Result<InsertOutcome, StoreError> {
        let row = attendance_record::ActiveModel {
            class_id: Set(record.class_id),
            student_id: Set(record.student_id),
            status: Set(record.status.into()),
            marked_at: Set(record.marked_at),
            notes: Set(record.notes),
        };

        let inserted = attendance_record::Entity::insert(row)
            .on_conflict(
                OnConflict::columns([
                    attendance_record::Column::ClassId,
                    attendance_record::Column::StudentId,
                ])
                .do_nothing()
                .to_owned(),
            )
            .exec_without_returning(&self.db)
            .await?;

        if inserted == 0 {
            Ok(InsertOutcome::AlreadyExists)
        } else {
            Ok(InsertOutcome::Created)
        }
    }
}
