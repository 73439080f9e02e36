pub mod attendance_record;
pub mod class_session;
pub mod course;
pub mod enrollment;
pub mod student;
pub mod user;
