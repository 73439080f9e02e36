use crate::seed::Seeder;
use chrono::{Duration, NaiveTime, Utc};
use db::models::{class_session, course};
use sea_orm::{ActiveModelTrait, DatabaseConnection, DbErr, EntityTrait, Set};

pub struct ClassSessionSeeder;

const TOPICS: [&str; 8] = [
    "Variables and Types",
    "Control Flow",
    "Functions",
    "Collections",
    "Recursion",
    "Memory and Pointers",
    "Concurrency",
    "Revision",
];

#[async_trait::async_trait]
impl Seeder for ClassSessionSeeder {
    async fn seed(&self, db: &DatabaseConnection) -> Result<(), DbErr> {
        let courses = course::Entity::find().all(db).await?;
        let now = Utc::now();
        let today = now.date_naive();

        for course in courses {
            // One lecture per day over the past week plus one for today, at a
            // fixed slot so the demo timetable reads sensibly.
            let slot = NaiveTime::from_hms_opt(8 + fastrand::u32(0..8), 0, 0)
                .unwrap_or(NaiveTime::MIN);

            for days_ago in (0..=7).rev() {
                let day = today - Duration::days(days_ago);
                let start = day.and_time(slot).and_utc();

                class_session::ActiveModel {
                    course_id: Set(course.id),
                    scheduled_start: Set(start),
                    scheduled_end: Set(start + Duration::minutes(50)),
                    topic: Set(Some(TOPICS[fastrand::usize(..TOPICS.len())].to_string())),
                    class_type: Set(Some(
                        if fastrand::f32() < 0.8 { "lecture" } else { "lab" }.to_string(),
                    )),
                    is_cancelled: Set(fastrand::f32() < 0.05),
                    created_at: Set(now),
                    updated_at: Set(now),
                    ..Default::default()
                }
                .insert(db)
                .await?;
            }
        }

        Ok(())
    }
}
