// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! End-to-end tests of the pipeline over the reqwest transport

use api_wrapper::{ApiClient, ApiConfig, ApiRequest, Body, Error, FileHandle, LanguageHints, ResponseContract};
use serde_json::json;
use wiremock::matchers::{body_string_contains, header, header_regex, headers, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn client(server: &MockServer) -> ApiClient {
    init_tracing();
    let config = ApiConfig::new()
        .base_url(format!("{}/", server.uri()))
        .unwrap()
        .header("X-Client", "tests")
        .unwrap()
        .languages(LanguageHints::new().document_language("de").negotiated("en-GB"));
    ApiClient::with_reqwest(config).unwrap()
}

#[tokio::test]
async fn get_sends_derived_headers() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/items"))
        .and(header("x-client", "tests"))
        .and(header("pragma", "no-cache"))
        .and(header("cache-control", "no-cache"))
        .and(headers("accept-language", vec!["de", "en"]))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"items": [1, 2]})))
        .expect(1)
        .mount(&server)
        .await;

    let value = client(&server).get("items").await.unwrap();
    assert_eq!(value, json!({"items": [1, 2]}));
}

#[tokio::test]
async fn post_without_content_type_sends_multipart() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/users"))
        .and(header("content-language", "de"))
        .and(header_regex("content-type", "^multipart/form-data; boundary=.+"))
        .and(body_string_contains("name=\"name\"\r\n\r\nAda"))
        .and(body_string_contains("filename=\"cv.txt\""))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"id": 5})))
        .expect(1)
        .mount(&server)
        .await;

    let data = Body::object()
        .field("user", Body::object().field("name", "Ada"))
        .field("cv", FileHandle::new("cv.txt", "hello").with_content_type("text/plain"));

    let id = client(&server)
        .request_with(
            ApiRequest::post("users").data(data),
            &ResponseContract::new().require("id").returning("id"),
        )
        .await
        .unwrap();
    assert_eq!(id, json!(5));

    let requests = server.received_requests().await.unwrap();
    let body = String::from_utf8_lossy(&requests[0].body).into_owned();
    assert!(body.contains("Content-Type: text/plain\r\n\r\nhello"));
    assert!(body.trim_end().ends_with("--"));
}

#[tokio::test]
async fn post_json_content_type_sends_json() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/todos/1"))
        .and(header("content-type", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ok": true})))
        .expect(1)
        .mount(&server)
        .await;

    client(&server)
        .request(
            ApiRequest::put("todos/1")
                .header("Content-Type", "application/json")
                .data(json!({"title": "Milk", "done": true})),
        )
        .await
        .unwrap();

    let requests = server.received_requests().await.unwrap();
    let sent: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
    assert_eq!(sent, json!({"title": "Milk", "done": true}));
}

#[tokio::test]
async fn failure_becomes_typed_error() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/items/9"))
        .respond_with(
            ResponseTemplate::new(404).set_body_json(json!({"status": "error", "message": "No such item"})),
        )
        .mount(&server)
        .await;

    let err = client(&server).delete("items/9").await.unwrap_err();
    assert_eq!(err, Error::transport("No such item", 404));
    assert!(err.is_client_error());
}

#[tokio::test]
async fn plain_text_failure_is_description() {
    let server = MockServer::start().await;
    Mock::given(method("PATCH"))
        .respond_with(ResponseTemplate::new(500).set_body_string("database down"))
        .mount(&server)
        .await;

    let err = client(&server)
        .patch("items/1", json!({"a": 1}))
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "database down");
    assert_eq!(err.status_code(), Some(500));
}

#[tokio::test]
async fn redirect_without_location_is_success() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/moved"))
        .respond_with(ResponseTemplate::new(302).set_body_json(json!({"moved": true})))
        .mount(&server)
        .await;

    let value = client(&server).get("moved").await.unwrap();
    assert_eq!(value, json!({"moved": true}));
}

#[tokio::test]
async fn options_cached_per_url() {
    let server = MockServer::start().await;
    Mock::given(method("OPTIONS"))
        .and(path("/items"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"fields": ["name"]})))
        .expect(1)
        .mount(&server)
        .await;

    let client = client(&server);
    let (a, b) = futures::join!(
        client.get_options("items", false),
        client.get_options("items", false)
    );
    assert_eq!(a.unwrap(), json!({"fields": ["name"]}));
    assert!(b.is_ok());
}

#[tokio::test]
async fn options_fetched_each_time_when_cache_disabled() {
    let server = MockServer::start().await;
    Mock::given(method("OPTIONS"))
        .and(path("/items"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(2)
        .mount(&server)
        .await;

    let client = client(&server);
    client.disable_cache();
    client.get_options("items", false).await.unwrap();
    client.get_options("items", false).await.unwrap();
}
