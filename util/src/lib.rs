//! Shared runtime plumbing: the environment-backed configuration singleton
//! and the application state passed into Axum handlers.

pub mod config;
pub mod state;
