#![allow(dead_code)]

use std::time::Duration;

use axum::{
    Router,
    body::Body,
    http::{Method, Request, StatusCode, header},
};
use chrono::{DateTime, TimeZone, Utc};
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;
use uuid::Uuid;

use yatube_api::{AppState, AppStateInner, auth::create_token, router};
use yatube_db::Database;
use yatube_feed::FeedSettings;

pub const SECRET: &str = "test-secret";

pub struct TestApp {
    pub state: AppState,
    pub router: Router,
}

pub fn app() -> TestApp {
    app_with(FeedSettings {
        index_cache_ttl: Duration::from_secs(300),
        ..FeedSettings::default()
    })
}

pub fn app_with(settings: FeedSettings) -> TestApp {
    let db = Database::open_in_memory().unwrap();
    let state = AppStateInner::new(db, SECRET.to_string(), settings);
    let router = router(state.clone());
    TestApp { state, router }
}

pub fn ts(secs: i64) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap() + chrono::Duration::seconds(secs)
}

impl TestApp {
    /// Create a user directly in the store and return (id, bearer token).
    pub fn user(&self, username: &str) -> (String, String) {
        let id = Uuid::new_v4();
        self.state.db.create_user(&id.to_string(), username, "unused-hash").unwrap();
        let token = create_token(SECRET, id, username).unwrap();
        (id.to_string(), token)
    }

    pub fn group(&self, title: &str, slug: &str) -> i64 {
        self.state.db.create_group(title, slug, "Test description").unwrap()
    }

    pub fn post(&self, author_id: &str, text: &str, group: Option<i64>, secs: i64) -> i64 {
        self.state.db.insert_post(author_id, text, group, None, ts(secs)).unwrap()
    }

    pub async fn send(&self, req: Request<Body>) -> (StatusCode, header::HeaderMap, Vec<u8>) {
        let response = self.router.clone().oneshot(req).await.unwrap();
        let status = response.status();
        let headers = response.headers().clone();
        let body = response.into_body().collect().await.unwrap().to_bytes().to_vec();
        (status, headers, body)
    }

    pub async fn get(&self, uri: &str, token: Option<&str>) -> (StatusCode, Value) {
        let (status, _, body) = self.send(request(Method::GET, uri, token, None)).await;
        (status, parse(&body))
    }

    pub async fn get_raw(&self, uri: &str, token: Option<&str>) -> (StatusCode, Vec<u8>) {
        let (status, _, body) = self.send(request(Method::GET, uri, token, None)).await;
        (status, body)
    }

    pub async fn call(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        json: Option<Value>,
    ) -> (StatusCode, header::HeaderMap, Value) {
        let (status, headers, body) = self.send(request(method, uri, token, json)).await;
        (status, headers, parse(&body))
    }
}

pub fn request(method: Method, uri: &str, token: Option<&str>, json: Option<Value>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    match json {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

fn parse(body: &[u8]) -> Value {
    if body.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(body).unwrap_or(Value::Null)
    }
}

pub fn texts(page: &Value) -> Vec<String> {
    page["posts"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["text"].as_str().unwrap().to_string())
        .collect()
}
