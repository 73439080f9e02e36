//! Route-level access guards.
//!
//! Guards run as axum middleware ahead of the handlers. They authenticate the
//! caller from the bearer header, insert the resulting [`AuthUser`] into
//! request extensions, and reject anything the route group does not allow.

use crate::auth::claims::AuthUser;
use crate::response::ApiResponse;
use axum::{
    Json,
    body::Body,
    extract::{FromRequestParts, Path, State},
    http::{Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use db::models::class_session::Entity as ClassSessionEntity;
use sea_orm::EntityTrait;
use std::collections::HashMap;
use util::state::AppState;

/// Serializable empty payload for guard error responses.
#[derive(serde::Serialize, Default)]
pub struct Empty;

/// Helper to extract, validate user from request extensions and insert them back into the request
async fn extract_and_insert_authuser(
    mut req: Request<Body>,
) -> Result<(Request<Body>, AuthUser), (StatusCode, Json<ApiResponse<Empty>>)> {
    let (mut parts, body) = req.into_parts();
    let user = AuthUser::from_request_parts(&mut parts, &())
        .await
        .map_err(|_| {
            (
                StatusCode::UNAUTHORIZED,
                Json(ApiResponse::error("Authentication required")),
            )
        })?;

    req = Request::from_parts(parts, body);
    req.extensions_mut().insert(user.clone());
    Ok((req, user))
}

/// Basic guard to ensure the request is authenticated.
pub async fn allow_authenticated(
    req: Request<Body>,
    next: Next,
) -> Result<Response, (StatusCode, Json<ApiResponse<Empty>>)> {
    let (req, _user) = extract_and_insert_authuser(req).await?;

    Ok(next.run(req).await)
}

/// Admin-only guard for the staff-facing routes.
pub async fn allow_admin(
    req: Request<Body>,
    next: Next,
) -> Result<Response, (StatusCode, Json<ApiResponse<Empty>>)> {
    let (req, user) = extract_and_insert_authuser(req).await?;

    if !user.0.admin {
        return Err((
            StatusCode::FORBIDDEN,
            Json(ApiResponse::error("Admin access required")),
        ));
    }

    Ok(next.run(req).await)
}

/// Validates every path ID before a handler runs.
///
/// Unknown parameter names are rejected outright; a `class_id` must parse as
/// an integer and refer to an existing class session, otherwise the request
/// ends here with 400 or 404.
pub async fn validate_known_ids(
    State(app_state): State<AppState>,
    Path(params): Path<HashMap<String, String>>,
    req: Request<Body>,
    next: Next,
) -> Result<Response, Response> {
    let db = app_state.db();

    for (key, raw) in &params {
        match key.as_str() {
            "class_id" => {
                let id = raw.parse::<i64>().map_err(|_| {
                    (
                        StatusCode::BAD_REQUEST,
                        Json(ApiResponse::<Empty>::error(format!(
                            "Invalid {}: '{}'. Must be an integer.",
                            key, raw
                        ))),
                    )
                        .into_response()
                })?;

                match ClassSessionEntity::find_by_id(id).one(db).await {
                    Ok(Some(_)) => {}
                    Ok(None) => {
                        return Err((
                            StatusCode::NOT_FOUND,
                            Json(ApiResponse::<Empty>::error("Class session not found")),
                        )
                            .into_response());
                    }
                    Err(e) => {
                        tracing::error!(error = %e, class_id = id, "DB error while validating path id");
                        return Err((
                            StatusCode::INTERNAL_SERVER_ERROR,
                            Json(ApiResponse::<Empty>::error("Failed to validate class id")),
                        )
                            .into_response());
                    }
                }
            }

            _ => {
                return Err((
                    StatusCode::BAD_REQUEST,
                    Json(ApiResponse::<Empty>::error(format!(
                        "Unexpected parameter: '{}'.",
                        key
                    ))),
                )
                    .into_response());
            }
        }
    }

    Ok(next.run(req).await)
}
