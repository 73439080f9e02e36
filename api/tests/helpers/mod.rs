pub mod app;
pub mod data;

pub use app::make_test_app;
