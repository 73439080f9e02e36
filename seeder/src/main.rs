use crate::seed::Seeder;
use crate::seed::run_seeder;
use crate::seeds::{
    attendance_record::AttendanceRecordSeeder, class_session::ClassSessionSeeder,
    course::CourseSeeder, enrollment::EnrollmentSeeder, student::StudentSeeder, user::UserSeeder,
};
use migration::{Migrator, MigratorTrait};

mod seed;
mod seeds;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    let db = db::connect().await;

    Migrator::up(&db, None)
        .await
        .expect("Failed to run migrations");

    for (seeder, name) in [
        (Box::new(UserSeeder) as Box<dyn Seeder + Send + Sync>, "User"),
        (Box::new(CourseSeeder), "Course"),
        (Box::new(StudentSeeder), "Student"),
        (Box::new(EnrollmentSeeder), "Enrollment"),
        (Box::new(ClassSessionSeeder), "ClassSession"),
        (Box::new(AttendanceRecordSeeder), "AttendanceRecord"),
    ] {
        run_seeder(&*seeder, name, &db).await;
    }
}
