mod common;

use axum::http::{Method, StatusCode, header};
use common::app;
use serde_json::json;

#[tokio::test]
async fn create_post_with_group_and_image() {
    let app = app();
    let (_, token) = app.user("author");
    app.group("Test group", "test-slug");

    let (status, _, post) = app
        .call(
            Method::POST,
            "/posts",
            Some(&token),
            Some(json!({ "text": "Test post", "group": "test-slug", "image": "posts/small.gif" })),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(post["text"], "Test post");
    assert_eq!(post["author"], "author");
    assert_eq!(post["group"]["slug"], "test-slug");
    assert_eq!(post["image"], "posts/small.gif");

    let id = post["id"].as_i64().unwrap();
    let (status, detail) = app.get(&format!("/posts/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(detail["post_count"], 1);
    assert!(detail["comments"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn create_post_rejects_bad_input() {
    let app = app();
    let (_, token) = app.user("author");

    let (status, _, _) = app
        .call(Method::POST, "/posts", None, Some(json!({ "text": "anon" })))
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _, body) = app
        .call(Method::POST, "/posts", Some(&token), Some(json!({ "text": "" })))
        .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["errors"]["text"].is_array());

    let (status, _, body) = app
        .call(
            Method::POST,
            "/posts",
            Some(&token),
            Some(json!({ "text": "hi", "group": "missing" })),
        )
        .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["errors"]["group"].is_array());

    let (status, _, body) = app
        .call(
            Method::POST,
            "/posts",
            Some(&token),
            Some(json!({ "text": "hi", "author": "someone-else" })),
        )
        .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["errors"]["body"].is_array());
}

#[tokio::test]
async fn non_author_edit_redirects_to_post() {
    let app = app();
    let (author, author_token) = app.user("author");
    let (_, other_token) = app.user("other");
    let group = app.group("Test group", "test-slug");
    let id = app.post(&author, "original", Some(group), 0);

    let (status, headers, _) = app
        .call(
            Method::PUT,
            &format!("/posts/{id}"),
            Some(&other_token),
            Some(json!({ "text": "hijacked" })),
        )
        .await;
    assert_eq!(status, StatusCode::SEE_OTHER);
    assert_eq!(headers[header::LOCATION], format!("/posts/{id}").as_str());

    let (status, _, post) = app
        .call(
            Method::PUT,
            &format!("/posts/{id}"),
            Some(&author_token),
            Some(json!({ "text": "edited" })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(post["text"], "edited");
    assert!(post["group"].is_null());
}

#[tokio::test]
async fn delete_post_is_author_only() {
    let app = app();
    let (author, author_token) = app.user("author");
    let (_, other_token) = app.user("other");
    let id = app.post(&author, "text", None, 0);
    app.state.db.insert_comment(id, &author, "comment", common::ts(1)).unwrap();

    let (status, _, _) = app
        .call(Method::DELETE, &format!("/posts/{id}"), Some(&other_token), None)
        .await;
    assert_eq!(status, StatusCode::SEE_OTHER);

    let (status, _, _) = app
        .call(Method::DELETE, &format!("/posts/{id}"), Some(&author_token), None)
        .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = app.get(&format!("/posts/{id}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(app.state.db.get_comments(id).unwrap().is_empty());
}

#[tokio::test]
async fn comments_are_validated_and_listed_newest_first() {
    let app = app();
    let (author, _) = app.user("author");
    let (_, token) = app.user("reader");
    let id = app.post(&author, "text", None, 0);
    let uri = format!("/posts/{id}/comments");

    let (status, _, comment) = app
        .call(Method::POST, &uri, Some(&token), Some(json!({ "text": "first" })))
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(comment["author"], "reader");
    assert_eq!(comment["post_id"], id);

    app.call(Method::POST, &uri, Some(&token), Some(json!({ "text": "second" })))
        .await;

    let (status, _, body) = app
        .call(Method::POST, &uri, Some(&token), Some(json!({ "text": "x".repeat(151) })))
        .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["errors"]["text"].is_array());

    let (status, _, body) = app
        .call(Method::POST, &uri, Some(&token), Some(json!({})))
        .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["errors"]["body"][0].as_str().unwrap().contains("text"));

    let (status, _, _) = app
        .call(Method::POST, &uri, None, Some(json!({ "text": "anon" })))
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _, _) = app
        .call(Method::POST, "/posts/999/comments", Some(&token), Some(json!({ "text": "hi" })))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, detail) = app.get(&format!("/posts/{id}"), None).await;
    let comments: Vec<&str> = detail["comments"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["text"].as_str().unwrap())
        .collect();
    assert_eq!(comments, vec!["second", "first"]);
}

#[tokio::test]
async fn register_then_login() {
    let app = app();
    let creds = json!({ "username": "newcomer", "password": "correct horse" });

    let (status, _, registered) = app
        .call(Method::POST, "/auth/register", None, Some(creds.clone()))
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert!(registered["token"].is_string());

    let (status, _, _) = app
        .call(Method::POST, "/auth/register", None, Some(creds.clone()))
        .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, _, login) = app.call(Method::POST, "/auth/login", None, Some(creds)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(login["username"], "newcomer");

    let token = login["token"].as_str().unwrap().to_string();
    let (status, _, _) = app
        .call(Method::POST, "/posts", Some(&token), Some(json!({ "text": "my first post" })))
        .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, _, _) = app
        .call(
            Method::POST,
            "/auth/login",
            None,
            Some(json!({ "username": "newcomer", "password": "wrong password" })),
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _, body) = app
        .call(
            Method::POST,
            "/auth/register",
            None,
            Some(json!({ "username": "shorty", "password": "short" })),
        )
        .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["errors"]["password"].is_array());
}
