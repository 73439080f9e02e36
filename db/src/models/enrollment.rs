use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;

/// Student membership in a course. Gate for every scan.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, serde::Serialize)]
#[sea_orm(table_name = "enrollments")]
pub struct Model {
    /// Student ID (foreign key to `students`).
    #[sea_orm(primary_key, auto_increment = false)]
    pub student_id: i64,

    /// Course ID (foreign key to `courses`).
    #[sea_orm(primary_key, auto_increment = false)]
    pub course_id: i64,

    /// Inactive enrollments (dropped courses) do not admit scans.
    pub is_active: bool,

    pub created_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::student::Entity",
        from = "Column::StudentId",
        to = "super::student::Column::Id"
    )]
    Student,
    #[sea_orm(
        belongs_to = "super::course::Entity",
        from = "Column::CourseId",
        to = "super::course::Column::Id"
    )]
    Course,
}

impl Related<super::student::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Student.def()
    }

    fn via() -> Option<RelationDef> {
        None
    }
}

impl Related<super::course::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Course.def()
    }

    fn via() -> Option<RelationDef> {
        None
    }
}

impl ActiveModelBehavior for ActiveModel {}
