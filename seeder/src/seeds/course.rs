use crate::seed::Seeder;
use chrono::Utc;
use db::models::course;
use sea_orm::{ActiveModelTrait, DatabaseConnection, DbErr, Set};

pub struct CourseSeeder;

const COURSES: [(&str, &str, &str); 6] = [
    ("CS101", "Intro to Computer Science", "Computer Science"),
    ("CS244", "Data Structures and Algorithms", "Computer Science"),
    ("CS301", "Operating Systems", "Computer Science"),
    ("MATH144", "Calculus", "Mathematics"),
    ("STA126", "Introduction to Statistics", "Statistics"),
    ("INF164", "Information Systems", "Informatics"),
];

#[async_trait::async_trait]
impl Seeder for CourseSeeder {
    async fn seed(&self, db: &DatabaseConnection) -> Result<(), DbErr> {
        let now = Utc::now();
        for (code, name, department) in COURSES {
            course::ActiveModel {
                code: Set(code.to_string()),
                name: Set(name.to_string()),
                department: Set(department.to_string()),
                created_at: Set(now),
                updated_at: Set(now),
                ..Default::default()
            }
            .insert(db)
            .await?;
        }

        Ok(())
    }
}
