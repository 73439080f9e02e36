use crate::seed::Seeder;
use chrono::Utc;
use db::models::{course, enrollment, student};
use sea_orm::{ActiveModelTrait, DatabaseConnection, DbErr, EntityTrait, Set};

pub struct EnrollmentSeeder;

#[async_trait::async_trait]
impl Seeder for EnrollmentSeeder {
    async fn seed(&self, db: &DatabaseConnection) -> Result<(), DbErr> {
        let students = student::Entity::find().all(db).await?;
        let course_ids: Vec<i64> = course::Entity::find()
            .all(db)
            .await?
            .into_iter()
            .map(|c| c.id)
            .collect();

        let now = Utc::now();
        for student in students {
            let mut picks = course_ids.clone();
            fastrand::shuffle(&mut picks);
            picks.truncate(fastrand::usize(2..=4));

            for course_id in picks {
                enrollment::ActiveModel {
                    student_id: Set(student.id),
                    course_id: Set(course_id),
                    is_active: Set(true),
                    created_at: Set(now),
                }
                .insert(db)
                .await?;
            }
        }

        Ok(())
    }
}
