//! QR broadcast controls for a class, nested under `/classes/{class_id}/qr`.

pub mod common;
pub mod delete;
pub mod get;
pub mod post;

pub use delete::stop_broadcast;
pub use get::current_qr;
pub use post::start_broadcast;
