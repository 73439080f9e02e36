pub mod m202608010001_create_users;
pub mod m202608010002_create_courses;
pub mod m202608010003_create_students;
pub mod m202608010004_create_class_sessions;
pub mod m202608010005_create_enrollments;
pub mod m202608010006_create_attendance_records;
