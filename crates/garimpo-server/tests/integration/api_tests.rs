use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use tower::ServiceExt;

use crate::integration::common::setup_test_app;

#[tokio::test]
async fn health_returns_200() {
    let app = setup_test_app().await;

    let response = app
        .router
        .oneshot(Request::get("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["status"], "healthy");
    assert_eq!(json["database"], "ok");
}

#[tokio::test]
async fn search_without_keywords_is_rejected_with_400() {
    let app = setup_test_app().await;

    let response = app
        .router
        .oneshot(Request::post("/v1/search").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["error"], "config_error");
}

#[tokio::test]
async fn settings_roundtrip() {
    let app = setup_test_app().await;

    // Defaults come back on first read
    let response = app
        .router
        .clone()
        .oneshot(Request::get("/v1/settings").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["keywords"], "");
    assert_eq!(json["interval_hours"], 6);

    // Partial update keeps omitted fields
    let update = serde_json::json!({
        "keywords": "desenvolvedor rust",
        "enabled_sources": "remotive,linkedin"
    });
    let response = app
        .router
        .clone()
        .oneshot(
            Request::put("/v1/settings")
                .header("content-type", "application/json")
                .body(Body::from(serde_json::to_vec(&update).unwrap()))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["keywords"], "desenvolvedor rust");
    assert_eq!(json["enabled_sources"], "remotive,linkedin");
    assert_eq!(json["interval_hours"], 6);
    assert_eq!(json["is_active"], true);
}

#[tokio::test]
async fn jobs_listing_starts_empty_and_rejects_bad_filters() {
    let app = setup_test_app().await;

    let response = app
        .router
        .clone()
        .oneshot(Request::get("/v1/jobs").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["total"], 0);

    let response = app
        .router
        .oneshot(
            Request::get("/v1/jobs?filter=starred")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn toggle_unknown_job_returns_404() {
    let app = setup_test_app().await;

    let response = app
        .router
        .oneshot(
            Request::post(format!(
                "/v1/jobs/{}/favorite",
                uuid::Uuid::new_v4()
            ))
            .body(Body::empty())
            .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let body = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["error"], "not_found");
}

#[tokio::test]
async fn toggle_favorite_twice_restores_state() {
    let app = setup_test_app().await;

    let id: uuid::Uuid = sqlx::query_scalar(
        r#"
        INSERT INTO jobs (title, company, location, description, url, source)
        VALUES ('Dev', 'Acme', 'Recife', '', 'https://jobs.example/t', 'Remotive')
        RETURNING id
        "#,
    )
    .fetch_one(&app.pool)
    .await
    .unwrap();

    let toggle = |router: axum::Router| async move {
        let response = router
            .oneshot(
                Request::post(format!("/v1/jobs/{id}/favorite"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice::<serde_json::Value>(&body).unwrap()
    };

    let on = toggle(app.router.clone()).await;
    assert_eq!(on["is_favorite"], true);
    assert!(!on["favorited_at"].is_null());

    let off = toggle(app.router.clone()).await;
    assert_eq!(off["is_favorite"], false);
    assert!(off["favorited_at"].is_null());
}

#[tokio::test]
async fn status_reports_capability_booleans() {
    let app = setup_test_app().await;

    let response = app
        .router
        .oneshot(Request::get("/v1/status").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    for key in ["groq", "rapid_api", "jooble", "openai"] {
        assert!(json[key].is_boolean(), "{key} should be a boolean");
    }
}

#[tokio::test]
async fn courses_endpoint_filters_and_ranks() {
    let app = setup_test_app().await;

    let response = app
        .router
        .clone()
        .oneshot(
            Request::get("/v1/courses?modality=presencial&level=mestrado")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    let courses = json["courses"].as_array().unwrap();
    assert!(!courses.is_empty());
    for course in courses {
        assert_eq!(course["modality"], "presencial");
        assert_eq!(course["level"], "mestrado");
    }
    // grade-5 entries first
    assert_eq!(courses[0]["mec_grade"], 5);
    assert!(json["stats"]["total"].as_u64().unwrap() > 0);

    // AND semantics over the free-text query
    let response = app
        .router
        .oneshot(
            Request::get("/v1/courses?q=mestrado%20recife")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    for course in json["courses"].as_array().unwrap() {
        let text = course.to_string().to_lowercase();
        assert!(text.contains("mestrado"));
        assert!(text.contains("recife"));
    }
}
