use crate::seed::Seeder;
use chrono::{Duration, Utc};
use db::models::{attendance_record, class_session, enrollment};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, Set,
};

pub struct AttendanceRecordSeeder;

#[async_trait::async_trait]
impl Seeder for AttendanceRecordSeeder {
    async fn seed(&self, db: &DatabaseConnection) -> Result<(), DbErr> {
        let cutoff = Utc::now() - Duration::hours(1);
        let past_sessions = class_session::Entity::find()
            .filter(class_session::Column::ScheduledStart.lt(cutoff))
            .filter(class_session::Column::IsCancelled.eq(false))
            .all(db)
            .await?;

        for session in past_sessions {
            let enrolled = enrollment::Entity::find()
                .filter(enrollment::Column::CourseId.eq(session.course_id))
                .filter(enrollment::Column::IsActive.eq(true))
                .all(db)
                .await?;

            for enrollment in enrolled {
                // Roughly one in five skips class entirely.
                if fastrand::f32() < 0.2 {
                    continue;
                }

                let late = fastrand::f32() < 0.25;
                let offset_minutes = if late {
                    fastrand::i64(11..=20)
                } else {
                    fastrand::i64(0..=10)
                };

                attendance_record::ActiveModel {
                    class_id: Set(session.id),
                    student_id: Set(enrollment.student_id),
                    status: Set(if late {
                        attendance_record::Status::Late
                    } else {
                        attendance_record::Status::Present
                    }),
                    marked_at: Set(session.scheduled_start + Duration::minutes(offset_minutes)),
                    notes: Set(None),
                }
                .insert(db)
                .await?;
            }
        }

        Ok(())
    }
}
