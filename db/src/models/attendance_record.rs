use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use sea_orm::{PaginatorTrait, QueryFilter};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// One attendance outcome per (class, student), keyed by exactly that pair.
///
/// The composite primary key is the uniqueness guarantee the scan flow's
/// conditional insert relies on.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "attendance_records")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub class_id: i64,
    #[sea_orm(primary_key, auto_increment = false)]
    pub student_id: i64,

    pub status: Status,
    pub marked_at: DateTime<Utc>,
    pub notes: Option<String>,
}

/// Attendance status. Scans only ever write `present` or `late`; `absent`
/// and `excused` come from out-of-band administration.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Display, EnumString, Deserialize, Serialize,
)]
#[serde(rename_all = "snake_case")]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "attendance_status")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Status {
    #[sea_orm(string_value = "present")]
    Present,

    #[sea_orm(string_value = "late")]
    Late,

    #[sea_orm(string_value = "absent")]
    Absent,

    #[sea_orm(string_value = "excused")]
    Excused,
}

impl From<attendance::MarkStatus> for Status {
    fn from(status: attendance::MarkStatus) -> Self {
        match status {
            attendance::MarkStatus::Present => Status::Present,
            attendance::MarkStatus::Late => Status::Late,
        }
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::class_session::Entity",
        from = "Column::ClassId",
        to = "super::class_session::Column::Id"
    )]
    ClassSession,
    #[sea_orm(
        belongs_to = "super::student::Entity",
        from = "Column::StudentId",
        to = "super::student::Column::Id"
    )]
    Student,
}

impl Related<super::class_session::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ClassSession.def()
    }

    fn via() -> Option<RelationDef> {
        None
    }
}

impl Related<super::student::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Student.def()
    }

    fn via() -> Option<RelationDef> {
        None
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// How many students have scanned in for this class so far.
    ///
    /// Counts `present` and `late`; sweeps that write `absent`/`excused`
    /// do not inflate the live counter.
    pub async fn marked_count(db: &DatabaseConnection, class_id: i64) -> Result<u64, DbErr> {
        Entity::find()
            .filter(Column::ClassId.eq(class_id))
            .filter(Column::Status.is_in([Status::Present, Status::Late]))
            .count(db)
            .await
    }
}
