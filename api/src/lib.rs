//! HTTP layer for the attendance service.
//!
//! Everything under `/api` is assembled in [`routes`]; [`auth`] carries the
//! JWT plumbing and guard middleware, [`response`] the JSON envelope every
//! handler answers with.

pub mod auth;
pub mod response;
pub mod routes;
