use chrono::{DateTime, Duration, Utc};
use db::models::{attendance_record, class_session, course, enrollment, student, user};
use sea_orm::{ActiveModelTrait, DatabaseConnection, Set};

/// The fixtures most route tests need: one admin lecturer, one enrolled
/// student and a class session that started just now.
pub struct Seed {
    pub admin: user::Model,
    pub student_user: user::Model,
    pub student: student::Model,
    pub course: course::Model,
    pub class: class_session::Model,
}

pub async fn seed(db: &DatabaseConnection) -> Seed {
    let admin = user::Model::create(db, "lecturer", "lecturer@test.com", "password1", true)
        .await
        .expect("create admin");

    let (student_user, student) =
        student_with_user(db, "u04211552", "STU2024001", "Amara", "Khumalo").await;

    let course = make_course(db, "CS101", "Intro to Computer Science").await;
    let class = class_starting_at(db, course.id, Utc::now()).await;
    enroll(db, student.id, course.id).await;

    Seed {
        admin,
        student_user,
        student,
        course,
        class,
    }
}

pub async fn student_with_user(
    db: &DatabaseConnection,
    username: &str,
    student_number: &str,
    first_name: &str,
    last_name: &str,
) -> (user::Model, student::Model) {
    let email = format!("{username}@test.com");
    let user = user::Model::create(db, username, &email, "password1", false)
        .await
        .expect("create user");

    let now = Utc::now();
    let student = student::ActiveModel {
        user_id: Set(user.id),
        student_number: Set(student_number.into()),
        first_name: Set(first_name.into()),
        last_name: Set(last_name.into()),
        email: Set(email),
        department: Set("Computer Science".into()),
        year_of_study: Set(2),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    }
    .insert(db)
    .await
    .expect("create student");

    (user, student)
}

pub async fn make_course(db: &DatabaseConnection, code: &str, name: &str) -> course::Model {
    let now = Utc::now();
    course::ActiveModel {
        code: Set(code.into()),
        name: Set(name.into()),
        department: Set("Computer Science".into()),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    }
    .insert(db)
    .await
    .expect("create course")
}

pub async fn class_starting_at(
    db: &DatabaseConnection,
    course_id: i64,
    scheduled_start: DateTime<Utc>,
) -> class_session::Model {
    let now = Utc::now();
    class_session::ActiveModel {
        course_id: Set(course_id),
        scheduled_start: Set(scheduled_start),
        scheduled_end: Set(scheduled_start + Duration::minutes(50)),
        topic: Set(Some("Variables".into())),
        class_type: Set(Some("lecture".into())),
        is_cancelled: Set(false),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    }
    .insert(db)
    .await
    .expect("create class session")
}

pub async fn enroll(db: &DatabaseConnection, student_id: i64, course_id: i64) {
    enrollment::ActiveModel {
        student_id: Set(student_id),
        course_id: Set(course_id),
        is_active: Set(true),
        created_at: Set(Utc::now()),
    }
    .insert(db)
    .await
    .expect("create enrollment");
}

pub async fn mark(
    db: &DatabaseConnection,
    class_id: i64,
    student_id: i64,
    status: attendance_record::Status,
    marked_at: DateTime<Utc>,
) {
    attendance_record::ActiveModel {
        class_id: Set(class_id),
        student_id: Set(student_id),
        status: Set(status),
        marked_at: Set(marked_at),
        notes: Set(None),
    }
    .insert(db)
    .await
    .expect("create attendance record");
}
