//! Attendance views for a class, nested under `/classes/{class_id}/attendance`.

pub mod get;

pub use get::{list_class_records, marked_count};
