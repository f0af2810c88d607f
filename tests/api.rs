//! The posts API driven in-process through `Router::call`.

use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;
use http::{HeaderMap, StatusCode};
use http_body_util::{BodyExt, Full};
use serde_json::{Value, json};

use quill::api;
use quill::middleware::Cors;
use quill::post::{NewPost, Post};
use quill::store::{MemoryStore, PostStore, StoreError};
use quill::Router;

struct Reply {
    status: StatusCode,
    headers: HeaderMap,
    body: Bytes,
}

impl Reply {
    fn json(&self) -> Value {
        serde_json::from_slice(&self.body).expect("response body is JSON")
    }
}

async fn send(app: &Router, method: &str, uri: &str, body: &str) -> Reply {
    let req = http::Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Full::new(Bytes::from(body.to_owned())))
        .unwrap();
    let res = app.call(req).await;
    let (parts, body) = res.into_parts();
    Reply {
        status: parts.status,
        headers: parts.headers,
        body: body.collect().await.unwrap().to_bytes(),
    }
}

fn app() -> Router {
    api::router(Arc::new(MemoryStore::new()), Cors::any())
}

/// Every operation fails as if the database were down.
struct DownStore;

fn refused() -> StoreError {
    let io = std::io::Error::from(std::io::ErrorKind::ConnectionRefused);
    StoreError::Driver(mongodb::error::Error::from(io))
}

#[async_trait]
impl PostStore for DownStore {
    async fn list_all(&self) -> Result<Vec<Post>, StoreError> {
        Err(refused())
    }

    async fn create(&self, _new: NewPost) -> Result<Post, StoreError> {
        Err(refused())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Err(refused())
    }
}

#[tokio::test]
async fn empty_store_lists_empty_array() {
    let res = send(&app(), "GET", "/posts", "").await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.headers["content-type"], "application/json");
    assert_eq!(res.json(), json!([]));
}

#[tokio::test]
async fn created_post_is_returned_and_listed() {
    let app = app();

    let res = send(&app, "POST", "/posts", r#"{"title":"Hello","content":"World"}"#).await;
    assert_eq!(res.status, StatusCode::CREATED);
    let created = res.json();
    let id = created["id"].as_str().expect("generated id");
    assert!(!id.is_empty());
    assert_eq!(created, json!({ "id": id, "title": "Hello", "content": "World" }));

    let res = send(&app, "GET", "/posts", "").await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.json(), json!([created]));
}

#[tokio::test]
async fn concurrent_creates_both_land() {
    let app = app();

    let (a, b) = tokio::join!(
        send(&app, "POST", "/posts", r#"{"title":"a","content":"1"}"#),
        send(&app, "POST", "/posts", r#"{"title":"b","content":"2"}"#),
    );
    assert_eq!(a.status, StatusCode::CREATED);
    assert_eq!(b.status, StatusCode::CREATED);

    let listed = send(&app, "GET", "/posts", "").await.json();
    let listed = listed.as_array().unwrap();
    assert_eq!(listed.len(), 2);
    assert!(listed.contains(&a.json()));
    assert!(listed.contains(&b.json()));
}

#[tokio::test]
async fn absent_fields_are_accepted() {
    let app = app();

    for body in ["", "{}", r#"{"title":null}"#] {
        let res = send(&app, "POST", "/posts", body).await;
        assert_eq!(res.status, StatusCode::CREATED, "body {body:?}");
        let created = res.json();
        assert!(created.get("title").is_none());
        assert!(created.get("content").is_none());
    }

    let listed = send(&app, "GET", "/posts", "").await.json();
    let ids: HashSet<_> = listed
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["id"].as_str().unwrap().to_owned())
        .collect();
    assert_eq!(ids.len(), 3);
}

#[tokio::test]
async fn scalar_fields_are_coerced() {
    let res = send(&app(), "POST", "/posts", r#"{"title":7,"content":false}"#).await;
    assert_eq!(res.status, StatusCode::CREATED);
    let created = res.json();
    assert_eq!(created["title"], "7");
    assert_eq!(created["content"], "false");
}

#[tokio::test]
async fn malformed_bodies_are_rejected() {
    let app = app();

    for body in ["{not json", "[1,2]", r#""text""#, r#"{"title":{"nested":true}}"#] {
        let res = send(&app, "POST", "/posts", body).await;
        assert_eq!(res.status, StatusCode::BAD_REQUEST, "body {body:?}");
        let error = res.json()["error"].as_str().unwrap().to_owned();
        assert!(error.starts_with("malformed request"), "{error}");
    }

    assert_eq!(send(&app, "GET", "/posts", "").await.json(), json!([]));
}

#[tokio::test]
async fn oversized_bodies_are_rejected_and_not_stored() {
    let app = app();

    let title = "x".repeat(20 * 1024 * 1024);
    let body = json!({ "title": title, "content": "c" }).to_string();
    let res = send(&app, "POST", "/posts", &body).await;
    assert_eq!(res.status, StatusCode::PAYLOAD_TOO_LARGE);

    // Just under the default limit still goes through.
    let title = "x".repeat(quill::DEFAULT_BODY_LIMIT - 64);
    let body = json!({ "title": title }).to_string();
    assert_eq!(send(&app, "POST", "/posts", &body).await.status, StatusCode::CREATED);

    let listed = send(&app, "GET", "/posts", "").await.json();
    assert_eq!(listed.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn store_failures_become_500() {
    let app = api::router(Arc::new(DownStore), Cors::any());

    let res = send(&app, "GET", "/posts", "").await;
    assert_eq!(res.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(res.json(), json!({ "error": "internal server error" }));

    let res = send(&app, "POST", "/posts", r#"{"title":"t","content":"c"}"#).await;
    assert_eq!(res.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(res.json(), json!({ "error": "internal server error" }));
}

#[tokio::test]
async fn health_probes_follow_the_store() {
    let healthy = app();
    assert_eq!(send(&healthy, "GET", "/healthz", "").await.status, StatusCode::OK);
    let ready = send(&healthy, "GET", "/readyz", "").await;
    assert_eq!(ready.status, StatusCode::OK);
    assert_eq!(&ready.body[..], b"ready");

    let down = api::router(Arc::new(DownStore), Cors::any());
    assert_eq!(send(&down, "GET", "/healthz", "").await.status, StatusCode::OK);
    assert_eq!(send(&down, "GET", "/readyz", "").await.status, StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn cors_headers_and_preflight() {
    let app = app();

    let res = send(&app, "GET", "/posts", "").await;
    assert_eq!(res.headers["access-control-allow-origin"], "*");

    let res = send(&app, "OPTIONS", "/posts", "").await;
    assert_eq!(res.status, StatusCode::NO_CONTENT);
    assert_eq!(res.headers["access-control-allow-origin"], "*");
    assert!(res.headers.contains_key("access-control-allow-methods"));
}

#[tokio::test]
async fn unknown_routes_and_methods() {
    let app = app();
    assert_eq!(send(&app, "GET", "/nope", "").await.status, StatusCode::NOT_FOUND);
    assert_eq!(send(&app, "DELETE", "/posts", "").await.status, StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(send(&app, "PUT", "/posts", "{}").await.status, StatusCode::METHOD_NOT_ALLOWED);
}
