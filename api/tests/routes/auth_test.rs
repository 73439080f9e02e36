#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use serde_json::Value;
    use tower::ServiceExt;

    use crate::helpers::app::make_test_app;
    use crate::helpers::data::seed;

    fn login_request(username: &str, password: &str) -> Request<Body> {
        let body = serde_json::json!({ "username": username, "password": password });
        Request::builder()
            .method("POST")
            .uri("/api/auth/login")
            .header("Content-Type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_login_success_returns_token() {
        let (app, app_state) = make_test_app().await;
        let ctx = seed(app_state.db()).await;

        let resp = app
            .clone()
            .oneshot(login_request("u04211552", "password1"))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);

        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(json["success"], true);
        assert_eq!(json["message"], "Login successful");
        assert_eq!(json["data"]["id"], ctx.student_user.id);
        assert_eq!(json["data"]["username"], "u04211552");
        assert_eq!(json["data"]["admin"], false);

        // The issued token must be accepted by a protected route.
        let token = json["data"]["token"].as_str().unwrap().to_string();
        assert!(!token.is_empty());

        let req = Request::builder()
            .method("GET")
            .uri("/api/me/classes/today")
            .header("Authorization", format!("Bearer {token}"))
            .body(Body::empty())
            .unwrap();
        let resp = app.oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_login_reports_admin_flag() {
        let (app, app_state) = make_test_app().await;
        seed(app_state.db()).await;

        let resp = app
            .oneshot(login_request("lecturer", "password1"))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);

        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(json["data"]["admin"], true);
    }

    #[tokio::test]
    async fn test_login_wrong_password_unauthorized() {
        let (app, app_state) = make_test_app().await;
        seed(app_state.db()).await;

        let resp = app
            .oneshot(login_request("u04211552", "wrong"))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(json["success"], false);
        assert_eq!(json["message"], "Invalid username or password");
    }

    #[tokio::test]
    async fn test_login_unknown_username_same_message() {
        let (app, app_state) = make_test_app().await;
        seed(app_state.db()).await;

        let resp = app
            .oneshot(login_request("nobody", "password1"))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(json["message"], "Invalid username or password");
    }

    #[tokio::test]
    async fn test_login_empty_fields_rejected() {
        let (app, app_state) = make_test_app().await;
        seed(app_state.db()).await;

        let resp = app.clone().oneshot(login_request("", "password1")).await.unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: Value = serde_json::from_slice(&bytes).unwrap();
        assert!(
            json["message"]
                .as_str()
                .unwrap()
                .contains("Username is required")
        );

        let resp = app.oneshot(login_request("u04211552", "")).await.unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: Value = serde_json::from_slice(&bytes).unwrap();
        assert!(
            json["message"]
                .as_str()
                .unwrap()
                .contains("Password is required")
        );
    }
}
