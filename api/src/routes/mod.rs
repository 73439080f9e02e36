//! HTTP route entry point for `/api/...`.
//!
//! Routes are organized by domain, each protected via the access control
//! middleware its group needs:
//! - `/health` → liveness check (public)
//! - `/auth` → login (public)
//! - `/classes` → class detail, QR broadcast controls, attendance views
//! - `/qr` → the student scan endpoint
//! - `/me` → the caller's own records and schedule

use crate::auth::guards::allow_authenticated;
use crate::routes::{
    auth::auth_routes, classes::classes_routes, health::health_routes, me::me_routes,
    qr::qr_routes,
};
use axum::{Router, middleware::from_fn};
use util::state::AppState;

pub mod auth;
pub mod classes;
pub mod common;
pub mod health;
pub mod me;
pub mod qr;

/// Builds the complete application router for all HTTP endpoints.
///
/// The returned router has `AppState` as its state type and mounts all core
/// API routes under their respective base paths. Admin-only routes carry
/// their own guard inside their group; everything outside `/health` and
/// `/auth` requires a valid bearer token.
pub fn routes(app_state: AppState) -> Router<AppState> {
    Router::new()
        .nest("/health", health_routes())
        .nest("/auth", auth_routes())
        .nest(
            "/classes",
            classes_routes(app_state.clone()).route_layer(from_fn(allow_authenticated)),
        )
        .nest(
            "/qr",
            qr_routes(app_state.clone()).route_layer(from_fn(allow_authenticated)),
        )
        .nest(
            "/me",
            me_routes(app_state.clone()).route_layer(from_fn(allow_authenticated)),
        )
        .with_state(app_state)
}
