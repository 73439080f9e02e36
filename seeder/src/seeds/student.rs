use crate::seed::Seeder;
use chrono::Utc;
use db::models::{student, user};
use fake::{
    Fake,
    faker::name::en::{FirstName, LastName},
};
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, Set};

pub struct StudentSeeder;

#[async_trait::async_trait]
impl Seeder for StudentSeeder {
    async fn seed(&self, db: &DatabaseConnection) -> Result<(), DbErr> {
        let users = user::Entity::find()
            .filter(user::Column::Admin.eq(false))
            .all(db)
            .await?;

        let now = Utc::now();
        for (i, owner) in users.into_iter().enumerate() {
            let first_name: String = FirstName().fake();
            let last_name: String = LastName().fake();

            student::ActiveModel {
                user_id: Set(owner.id),
                student_number: Set(format!("STU2024{:03}", i + 1)),
                first_name: Set(first_name),
                last_name: Set(last_name),
                email: Set(owner.email.clone()),
                department: Set("Computer Science".to_string()),
                year_of_study: Set(fastrand::i32(1..=4)),
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
