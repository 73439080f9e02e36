#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use api::auth::generate_jwt;
    use attendance::QrSettings;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use chrono::{DateTime, Utc};
    use db::models::{attendance_record, class_session};
    use sea_orm::{ActiveModelTrait, Set};
    use serde_json::Value;
    use tower::ServiceExt;

    use crate::helpers::app::{make_test_app, make_test_app_with_settings};
    use crate::helpers::data::{mark, seed};

    fn qr_request(method: &str, class_id: impl std::fmt::Display, token: &str) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(format!("/api/classes/{class_id}/qr"))
            .header("Authorization", format!("Bearer {token}"))
            .body(Body::empty())
            .unwrap()
    }

    async fn body_json(resp: axum::response::Response) -> Value {
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    // ---------------------------
    // start
    // ---------------------------

    #[tokio::test]
    async fn test_start_broadcast_as_admin_created() {
        let (app, app_state) = make_test_app().await;
        let ctx = seed(app_state.db()).await;
        let (token, _) = generate_jwt(ctx.admin.id, ctx.admin.admin);

        let resp = app
            .oneshot(qr_request("POST", ctx.class.id, &token))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::CREATED);

        let json = body_json(resp).await;
        assert_eq!(json["success"], true);
        assert_eq!(json["message"], "QR broadcast started");
        assert_eq!(json["data"]["class_id"], ctx.class.id);
        assert!(!json["data"]["token"].as_str().unwrap().is_empty());
        assert!(
            DateTime::parse_from_rfc3339(json["data"]["issued_at"].as_str().unwrap()).is_ok()
        );
    }

    #[tokio::test]
    async fn test_start_broadcast_forbidden_for_student() {
        let (app, app_state) = make_test_app().await;
        let ctx = seed(app_state.db()).await;
        let (token, _) = generate_jwt(ctx.student_user.id, false);

        let resp = app
            .oneshot(qr_request("POST", ctx.class.id, &token))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::FORBIDDEN);

        let json = body_json(resp).await;
        assert_eq!(json["message"], "Admin access required");
    }

    #[tokio::test]
    async fn test_start_broadcast_requires_auth() {
        let (app, app_state) = make_test_app().await;
        let ctx = seed(app_state.db()).await;

        let req = Request::builder()
            .method("POST")
            .uri(format!("/api/classes/{}/qr", ctx.class.id))
            .body(Body::empty())
            .unwrap();
        let resp = app.oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_double_start_conflict() {
        let (app, app_state) = make_test_app().await;
        let ctx = seed(app_state.db()).await;
        let (token, _) = generate_jwt(ctx.admin.id, true);

        let resp = app
            .clone()
            .oneshot(qr_request("POST", ctx.class.id, &token))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::CREATED);

        let resp = app
            .oneshot(qr_request("POST", ctx.class.id, &token))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::CONFLICT);

        let json = body_json(resp).await;
        assert_eq!(
            json["message"],
            "A QR broadcast is already active for this class"
        );
    }

    #[tokio::test]
    async fn test_start_broadcast_cancelled_class_rejected() {
        let (app, app_state) = make_test_app().await;
        let ctx = seed(app_state.db()).await;
        let (token, _) = generate_jwt(ctx.admin.id, true);

        let mut active: class_session::ActiveModel = ctx.class.clone().into();
        active.is_cancelled = Set(true);
        active.update(app_state.db()).await.unwrap();

        let resp = app
            .oneshot(qr_request("POST", ctx.class.id, &token))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let json = body_json(resp).await;
        assert_eq!(json["message"], "Class session has been cancelled");
    }

    #[tokio::test]
    async fn test_start_broadcast_unknown_class_not_found() {
        let (app, app_state) = make_test_app().await;
        let ctx = seed(app_state.db()).await;
        let (token, _) = generate_jwt(ctx.admin.id, true);

        let resp = app
            .oneshot(qr_request("POST", ctx.class.id + 999_999, &token))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);

        let json = body_json(resp).await;
        assert_eq!(json["message"], "Class session not found");
    }

    #[tokio::test]
    async fn test_class_id_must_be_integer() {
        let (app, app_state) = make_test_app().await;
        let ctx = seed(app_state.db()).await;
        let (token, _) = generate_jwt(ctx.admin.id, true);

        let resp = app.oneshot(qr_request("GET", "abc", &token)).await.unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let json = body_json(resp).await;
        assert!(json["message"].as_str().unwrap().contains("Invalid class_id"));
    }

    // ---------------------------
    // current token
    // ---------------------------

    #[tokio::test]
    async fn test_current_token_matches_started_broadcast() {
        let (app, app_state) = make_test_app().await;
        let ctx = seed(app_state.db()).await;
        let (token, _) = generate_jwt(ctx.admin.id, true);

        let resp = app
            .clone()
            .oneshot(qr_request("POST", ctx.class.id, &token))
            .await
            .unwrap();
        let started = body_json(resp).await;

        let resp = app
            .oneshot(qr_request("GET", ctx.class.id, &token))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);

        let json = body_json(resp).await;
        assert_eq!(json["message"], "Current QR token");
        assert_eq!(json["data"]["token"], started["data"]["token"]);
        assert_eq!(json["data"]["marked_count"], 0);
    }

    #[tokio::test]
    async fn test_current_token_no_broadcast_not_found() {
        let (app, app_state) = make_test_app().await;
        let ctx = seed(app_state.db()).await;
        let (token, _) = generate_jwt(ctx.admin.id, true);

        let resp = app
            .oneshot(qr_request("GET", ctx.class.id, &token))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);

        let json = body_json(resp).await;
        assert_eq!(json["message"], "No active QR broadcast for this class");
    }

    #[tokio::test]
    async fn test_current_token_reports_marked_count() {
        let (app, app_state) = make_test_app().await;
        let ctx = seed(app_state.db()).await;
        let (token, _) = generate_jwt(ctx.admin.id, true);

        mark(
            app_state.db(),
            ctx.class.id,
            ctx.student.id,
            attendance_record::Status::Present,
            Utc::now(),
        )
        .await;

        let resp = app
            .clone()
            .oneshot(qr_request("POST", ctx.class.id, &token))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::CREATED);

        let resp = app
            .oneshot(qr_request("GET", ctx.class.id, &token))
            .await
            .unwrap();
        let json = body_json(resp).await;
        assert_eq!(json["data"]["marked_count"], 1);
    }

    // ---------------------------
    // stop
    // ---------------------------

    #[tokio::test]
    async fn test_stop_broadcast_then_conflict_on_repeat() {
        let (app, app_state) = make_test_app().await;
        let ctx = seed(app_state.db()).await;
        let (token, _) = generate_jwt(ctx.admin.id, true);

        let resp = app
            .clone()
            .oneshot(qr_request("POST", ctx.class.id, &token))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::CREATED);

        let resp = app
            .clone()
            .oneshot(qr_request("DELETE", ctx.class.id, &token))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let json = body_json(resp).await;
        assert_eq!(json["message"], "QR broadcast stopped");

        let resp = app
            .oneshot(qr_request("DELETE", ctx.class.id, &token))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::CONFLICT);
        let json = body_json(resp).await;
        assert_eq!(json["message"], "No active QR broadcast for this class");
    }

    // ---------------------------
    // rotation
    // ---------------------------

    #[tokio::test]
    async fn test_displayed_token_rotates() {
        let (app, app_state) = make_test_app_with_settings(QrSettings {
            rotation_seconds: 1,
            ..QrSettings::default()
        })
        .await;
        let ctx = seed(app_state.db()).await;
        let (token, _) = generate_jwt(ctx.admin.id, true);

        let resp = app
            .clone()
            .oneshot(qr_request("POST", ctx.class.id, &token))
            .await
            .unwrap();
        let initial = body_json(resp).await["data"]["token"]
            .as_str()
            .unwrap()
            .to_string();

        let rotated = tokio::time::timeout(std::time::Duration::from_secs(5), async {
            loop {
                tokio::time::sleep(std::time::Duration::from_millis(100)).await;
                let resp = app
                    .clone()
                    .oneshot(qr_request("GET", ctx.class.id, &token))
                    .await
                    .unwrap();
                let current = body_json(resp).await["data"]["token"]
                    .as_str()
                    .unwrap()
                    .to_string();
                if current != initial {
                    return current;
                }
            }
        })
        .await
        .expect("token never rotated");

        assert_ne!(rotated, initial);
    }
}
