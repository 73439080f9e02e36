use api::{auth::guards::validate_known_ids, routes::routes};
use attendance::{BroadcastRegistry, QrSettings, TokenCodec};
use axum::{
    Router, body::Body, http::Request, middleware::from_fn_with_state, response::Response,
};
use ctor::ctor;
use std::convert::Infallible;
use tower::ServiceExt;
use tower::util::BoxCloneService;
use util::{config, state::AppState};

#[ctor]
fn setup_tests() {
    // SAFETY: ctor runs before main, no other threads are touching the
    // environment yet.
    unsafe {
        std::env::set_var("APP_ENV", "test");
        std::env::set_var("DATABASE_PATH", "sqlite::memory:");
        std::env::set_var("JWT_SECRET", "test_jwt_secret");
        std::env::set_var(
            "QR_TOKEN_SECRET",
            "00112233445566778899aabbccddeeff00112233445566778899aabbccddeeff",
        );
        std::env::set_var("LOG_TO_STDOUT", "false");
    }
}

/// Builds a fresh app backed by its own in-memory database.
///
/// Returns the boxed service plus the state so tests can seed rows and reach
/// into the broadcast registry directly.
pub async fn make_test_app() -> (
    BoxCloneService<Request<Body>, Response, Infallible>,
    AppState,
) {
    make_test_app_with_settings(config::qr_settings()).await
}

/// Same as [`make_test_app`] but with explicit QR timing, for tests that
/// exercise rotation without waiting out the default interval.
pub async fn make_test_app_with_settings(
    settings: QrSettings,
) -> (
    BoxCloneService<Request<Body>, Response, Infallible>,
    AppState,
) {
    let db = db::test_utils::setup_test_db().await;
    let registry = BroadcastRegistry::new(TokenCodec::new(config::qr_token_secret()), settings);
    let app_state = AppState::new(db, registry);

    let router = Router::new()
        .nest(
            "/api",
            routes(app_state.clone())
                .layer(from_fn_with_state(app_state.clone(), validate_known_ids)),
        )
        .with_state(app_state.clone());

    (router.into_service().boxed_clone(), app_state)
}
