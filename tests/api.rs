use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::Router;
use qna_cms::server::app::{app, AppState};
use sqlx::sqlite::SqlitePoolOptions;
use tempfile::TempDir;
use tower::ServiceExt;

async fn test_app() -> (Router, TempDir) {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("Cannot open in-memory database");
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Cannot run migrations");
    let media_dir = tempfile::tempdir().expect("Cannot create media dir");
    let router = app(AppState::new(pool, media_dir.path().to_path_buf()));
    (router, media_dir)
}

fn json_request(method: &str, uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_owned()))
        .unwrap()
}

async fn json_body(response: axum::response::Response) -> serde_json::Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn health_endpoint_responds() {
    let (router, _media_dir) = test_app().await;
    let response = router
        .oneshot(Request::get("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn empty_question_title_is_rejected() {
    let (router, _media_dir) = test_app().await;
    let response = router
        .oneshot(json_request("POST", "/questions", r#"{"title": ""}"#))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = json_body(response).await;
    assert_eq!(body["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn question_create_and_fetch() {
    let (router, _media_dir) = test_app().await;

    let response = router
        .clone()
        .oneshot(json_request(
            "POST",
            "/questions",
            r#"{"title": "Capital of France?"}"#,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let created = json_body(response).await;
    assert_eq!(created["title"], "Capital of France?");

    let id = created["id"].as_i64().unwrap();
    let response = router
        .oneshot(
            Request::get(format!("/questions/{id}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn missing_question_is_404() {
    let (router, _media_dir) = test_app().await;
    let response = router
        .oneshot(Request::get("/questions/123").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn link_with_dangling_reference_is_404_with_entity() {
    let (router, _media_dir) = test_app().await;

    let response = router
        .clone()
        .oneshot(json_request(
            "POST",
            "/categories",
            r#"{"title": "Geography"}"#,
        ))
        .await
        .unwrap();
    let category = json_body(response).await;

    let response = router
        .oneshot(json_request(
            "POST",
            "/links",
            &format!(
                r#"{{"question": 999, "category": {}}}"#,
                category["id"]
            ),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let body = json_body(response).await;
    assert_eq!(body["code"], "NOT_FOUND");
    assert_eq!(body["error"], "question with id 999 not found");
}

#[tokio::test]
async fn link_write_pipeline_derives_title_over_http() {
    let (router, _media_dir) = test_app().await;

    let question = json_body(
        router
            .clone()
            .oneshot(json_request(
                "POST",
                "/questions",
                r#"{"title": "Capital of France?"}"#,
            ))
            .await
            .unwrap(),
    )
    .await;
    let category = json_body(
        router
            .clone()
            .oneshot(json_request(
                "POST",
                "/categories",
                r#"{"title": "Geography"}"#,
            ))
            .await
            .unwrap(),
    )
    .await;

    let response = router
        .clone()
        .oneshot(json_request(
            "POST",
            "/links",
            &format!(
                r#"{{"question": {}, "category": {}}}"#,
                question["id"], category["id"]
            ),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let link = json_body(response).await;
    assert_eq!(
        link["title"],
        "Category: Geography - Question: Capital of France?"
    );
    assert_eq!(link["ordering"], 0);

    let reverse = json_body(
        router
            .oneshot(
                Request::get(format!("/categories/{}/links", category["id"]))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap(),
    )
    .await;
    assert_eq!(reverse.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn invalid_user_email_is_rejected() {
    let (router, _media_dir) = test_app().await;
    let response = router
        .oneshot(json_request(
            "POST",
            "/users",
            r#"{"email": "not-an-email"}"#,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn unknown_route_falls_back_to_404() {
    let (router, _media_dir) = test_app().await;
    let response = router
        .oneshot(Request::get("/nope").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
