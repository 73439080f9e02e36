#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use api::auth::generate_jwt;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use chrono::{Duration, NaiveTime, Utc};
    use db::models::{attendance_record::Status, class_session, user};
    use sea_orm::{ActiveModelTrait, Set};
    use serde_json::Value;
    use tower::ServiceExt;

    use crate::helpers::app::make_test_app;
    use crate::helpers::data::{class_starting_at, enroll, make_course, mark, seed};

    fn get(uri: &str, token: &str) -> Request<Body> {
        Request::builder()
            .method("GET")
            .uri(uri)
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
    // my attendance
    // ---------------------------

    #[tokio::test]
    async fn test_my_attendance_newest_first() {
        let (app, app_state) = make_test_app().await;
        let db = app_state.db();
        let ctx = seed(db).await;

        let earlier_class =
            class_starting_at(db, ctx.course.id, Utc::now() - Duration::days(7)).await;
        mark(
            db,
            earlier_class.id,
            ctx.student.id,
            Status::Late,
            Utc::now() - Duration::days(7),
        )
        .await;
        mark(db, ctx.class.id, ctx.student.id, Status::Present, Utc::now()).await;

        let (token, _) = generate_jwt(ctx.student_user.id, false);
        let resp = app.oneshot(get("/api/me/attendance", &token)).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);

        let json = body_json(resp).await;
        assert_eq!(json["message"], "Attendance records retrieved");

        let entries = json["data"].as_array().unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0]["class_id"], ctx.class.id);
        assert_eq!(entries[0]["status"], "present");
        assert_eq!(entries[0]["course_code"], "CS101");
        assert_eq!(entries[1]["class_id"], earlier_class.id);
        assert_eq!(entries[1]["status"], "late");
    }

    #[tokio::test]
    async fn test_my_attendance_empty_for_unmarked_student() {
        let (app, app_state) = make_test_app().await;
        let ctx = seed(app_state.db()).await;

        let (token, _) = generate_jwt(ctx.student_user.id, false);
        let resp = app.oneshot(get("/api/me/attendance", &token)).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);

        let json = body_json(resp).await;
        assert_eq!(json["data"].as_array().unwrap().len(), 0);
    }

    #[tokio::test]
    async fn test_my_attendance_without_profile_forbidden() {
        let (app, app_state) = make_test_app().await;
        seed(app_state.db()).await;

        let plain = user::Model::create(
            app_state.db(),
            "no_profile",
            "no_profile@test.com",
            "password1",
            false,
        )
        .await
        .unwrap();

        let (token, _) = generate_jwt(plain.id, false);
        let resp = app.oneshot(get("/api/me/attendance", &token)).await.unwrap();
        assert_eq!(resp.status(), StatusCode::FORBIDDEN);

        let json = body_json(resp).await;
        assert_eq!(json["message"], "Student not found");
    }

    // ---------------------------
    // today's classes
    // ---------------------------

    #[tokio::test]
    async fn test_classes_today_enrolled_courses_only() {
        let (app, app_state) = make_test_app().await;
        let db = app_state.db();
        let ctx = seed(db).await;

        let day_start = Utc::now().date_naive().and_time(NaiveTime::MIN).and_utc();

        let mine = class_starting_at(db, ctx.course.id, day_start + Duration::hours(9)).await;
        let other_course = make_course(db, "MATH144", "Calculus").await;
        let not_mine =
            class_starting_at(db, other_course.id, day_start + Duration::hours(10)).await;

        let (token, _) = generate_jwt(ctx.student_user.id, false);
        let resp = app
            .oneshot(get("/api/me/classes/today", &token))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);

        let json = body_json(resp).await;
        assert_eq!(json["message"], "Today's classes retrieved");

        let classes = json["data"].as_array().unwrap();
        let ids: Vec<i64> = classes
            .iter()
            .map(|c| c["id"].as_i64().unwrap())
            .collect();
        assert!(ids.contains(&mine.id));
        assert!(!ids.contains(&not_mine.id));
        assert!(
            classes
                .iter()
                .all(|c| c["course"]["code"] == "CS101")
        );
    }

    #[tokio::test]
    async fn test_classes_today_sorted_and_filtered() {
        let (app, app_state) = make_test_app().await;
        let db = app_state.db();
        let ctx = seed(db).await;

        let day_start = Utc::now().date_naive().and_time(NaiveTime::MIN).and_utc();

        let afternoon =
            class_starting_at(db, ctx.course.id, day_start + Duration::hours(14)).await;
        let morning = class_starting_at(db, ctx.course.id, day_start + Duration::hours(8)).await;

        let cancelled =
            class_starting_at(db, ctx.course.id, day_start + Duration::hours(11)).await;
        let mut active: class_session::ActiveModel = cancelled.into();
        active.is_cancelled = Set(true);
        active.update(db).await.unwrap();

        // Outside the UTC day on either side.
        class_starting_at(db, ctx.course.id, day_start + Duration::hours(25)).await;
        class_starting_at(db, ctx.course.id, day_start - Duration::hours(2)).await;

        let (token, _) = generate_jwt(ctx.student_user.id, false);
        let resp = app
            .oneshot(get("/api/me/classes/today", &token))
            .await
            .unwrap();
        let json = body_json(resp).await;

        let ids: Vec<i64> = json["data"]
            .as_array()
            .unwrap()
            .iter()
            .map(|c| c["id"].as_i64().unwrap())
            .collect();

        // The seeded "now" class plus morning and afternoon, in start order.
        assert_eq!(ids.len(), 3);
        let morning_pos = ids.iter().position(|id| *id == morning.id).unwrap();
        let afternoon_pos = ids.iter().position(|id| *id == afternoon.id).unwrap();
        assert!(morning_pos < afternoon_pos);
        assert!(ids.contains(&ctx.class.id));
    }

    #[tokio::test]
    async fn test_classes_today_without_profile_forbidden() {
        let (app, app_state) = make_test_app().await;
        seed(app_state.db()).await;

        let plain = user::Model::create(
            app_state.db(),
            "no_profile2",
            "no_profile2@test.com",
            "password1",
            false,
        )
        .await
        .unwrap();

        let (token, _) = generate_jwt(plain.id, false);
        let resp = app
            .oneshot(get("/api/me/classes/today", &token))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::FORBIDDEN);
    }
}
