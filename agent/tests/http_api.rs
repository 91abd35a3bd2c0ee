//! Wire-level tests for `HttpApi` against a mock Moltbook server.
//!
//! The blocking client owns its own runtime, so each call runs on a blocking
//! task while the mock server keeps serving on the test runtime.

use agent::io::api::{AgentApi, ApiResponse, HttpApi};
use agent::post::PostRequest;
use serde_json::json;
use wiremock::matchers::{body_json, header, header_exists, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn blocking<T, F>(f: F) -> T
where
    T: Send + 'static,
    F: FnOnce() -> T + Send + 'static,
{
    tokio::task::spawn_blocking(f).await.expect("join")
}

#[tokio::test(flavor = "multi_thread")]
async fn status_sends_bearer_token_and_returns_raw_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/agents/status"))
        .and(header("authorization", "Bearer secret"))
        .and(header_exists("user-agent"))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"status":"claimed"}"#))
        .expect(1)
        .mount(&server)
        .await;

    let base = server.uri();
    let response = blocking(move || {
        let api = HttpApi::new(&base, "secret").expect("api");
        api.status().expect("status")
    })
    .await;

    assert_eq!(
        response,
        ApiResponse {
            code: 200,
            body: r#"{"status":"claimed"}"#.to_string(),
        }
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn create_post_sends_json_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/posts"))
        .and(header("authorization", "Bearer secret"))
        .and(header("content-type", "application/json"))
        .and(body_json(json!({
            "submolt": "general",
            "title": "Hello",
            "content": "",
        })))
        .respond_with(ResponseTemplate::new(201).set_body_string("{}"))
        .expect(1)
        .mount(&server)
        .await;

    let base = server.uri();
    let response = blocking(move || {
        let api = HttpApi::new(&base, "secret").expect("api");
        let request = PostRequest::new("general", "Hello", "").expect("request");
        api.create_post(&request).expect("create post")
    })
    .await;

    assert_eq!(response.code, 201);
}

#[tokio::test(flavor = "multi_thread")]
async fn error_statuses_are_responses_not_errors() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/posts"))
        .respond_with(ResponseTemplate::new(429).set_body_string("slow down"))
        .mount(&server)
        .await;

    let base = server.uri();
    let response = blocking(move || {
        let api = HttpApi::new(&base, "secret").expect("api");
        let request = PostRequest::new("general", "Hello", "Body").expect("request");
        api.create_post(&request).expect("create post")
    })
    .await;

    assert_eq!(response.code, 429);
    assert_eq!(response.body, "slow down");
}

#[tokio::test(flavor = "multi_thread")]
async fn unreachable_server_is_an_error() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind");
    let base = format!("http://{}", listener.local_addr().expect("addr"));
    drop(listener);

    let result = blocking(move || {
        let api = HttpApi::new(&base, "secret").expect("api");
        api.status()
    })
    .await;

    assert!(result.is_err());
}
