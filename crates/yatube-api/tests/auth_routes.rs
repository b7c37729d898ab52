mod common;

use axum::http::{Method, StatusCode};
use common::{app, request};
use serde_json::json;
use tower::ServiceExt;

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_registrations_yield_one_account() {
    let app = app();
    let body = json!({ "username": "dupe", "password": "correct horse" });

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let router = app.router.clone();
            let req = request(Method::POST, "/auth/register", None, Some(body.clone()));
            tokio::spawn(async move { router.oneshot(req).await.unwrap().status() })
        })
        .collect();

    let mut statuses = Vec::new();
    for handle in handles {
        statuses.push(handle.await.unwrap());
    }

    let created = statuses.iter().filter(|&&s| s == StatusCode::CREATED).count();
    let conflicts = statuses.iter().filter(|&&s| s == StatusCode::CONFLICT).count();
    assert_eq!(created, 1, "statuses: {statuses:?}");
    assert_eq!(conflicts, 7, "statuses: {statuses:?}");
}

#[tokio::test]
async fn username_length_counts_characters() {
    let app = app();

    // 20 characters, 40 bytes
    let (status, _, _) = app
        .call(
            Method::POST,
            "/auth/register",
            None,
            Some(json!({ "username": "д".repeat(20), "password": "correct horse" })),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, _, body) = app
        .call(
            Method::POST,
            "/auth/register",
            None,
            Some(json!({ "username": "ж".repeat(33), "password": "correct horse" })),
        )
        .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["errors"]["username"].is_array());
}

#[tokio::test]
async fn malformed_login_body_is_a_field_error() {
    let app = app();

    let (status, _, body) = app
        .call(Method::POST, "/auth/login", None, Some(json!({ "username": "someone" })))
        .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["errors"]["body"][0].as_str().unwrap().contains("password"));
}
