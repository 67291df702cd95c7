use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{body_json, body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use claimiq_client::{
    ApiFailure, ClientSettings, DocumentApi, HttpApiClient, DEFAULT_COLLECTION, REASONING_FALLBACK,
};

fn client_for(server: &MockServer) -> HttpApiClient {
    let settings = ClientSettings {
        base_url: server.uri(),
        ..ClientSettings::default()
    };
    HttpApiClient::new(settings).expect("build client")
}

#[tokio::test]
async fn upload_posts_multipart_file_field_and_returns_receipt() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/upload"))
        .and(body_string_contains("name=\"file\""))
        .and(body_string_contains("%PDF-claim"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "file_id": "abc123" })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let receipt = client
        .upload("claim.pdf", b"%PDF-claim".to_vec())
        .await
        .expect("upload ok");

    assert_eq!(receipt.file_id, "abc123");
    assert_eq!(receipt.file_name, "claim.pdf");
}

#[tokio::test]
async fn upload_failure_carries_server_status_text() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/upload"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let err = client
        .upload("claim.pdf", b"%PDF-claim".to_vec())
        .await
        .unwrap_err();

    assert_eq!(err.kind, ApiFailure::HttpStatus(500));
    assert!(err.message.contains("Internal Server Error"), "{}", err.message);
}

#[tokio::test]
async fn query_sends_expected_body_and_parses_answer() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/query"))
        .and(body_json(json!({
            "query": "What is the claim amount?",
            "collection_name": "pdf_collection",
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "success",
            "data": {
                "response": "$15,000",
                "thinking": "found in section 3.2",
            },
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let answer = client
        .query("What is the claim amount?", "pdf_collection")
        .await
        .expect("query ok");

    assert_eq!(answer.response, "$15,000");
    assert_eq!(answer.thinking, "found in section 3.2");
}

#[tokio::test]
async fn query_substitutes_fallback_for_missing_thinking() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/query"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "success",
            "data": { "response": "$15,000" },
        })))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let answer = client.query("amount?", "pdf_collection").await.expect("query ok");

    assert_eq!(answer.response, "$15,000");
    assert_eq!(answer.thinking, REASONING_FALLBACK);
}

#[tokio::test]
async fn query_falls_back_to_raw_data_without_response_field() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/query"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "success",
            "data": { "summary": "covered" },
        })))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let answer = client.query("amount?", "pdf_collection").await.expect("query ok");

    assert_eq!(answer.response, r#"{"summary":"covered"}"#);
}

#[tokio::test]
async fn query_maps_failing_envelope_status_to_server_logic_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/query"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "error",
            "data": {},
        })))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let err = client.query("amount?", "pdf_collection").await.unwrap_err();

    assert_eq!(err.kind, ApiFailure::ServerLogic);
    assert!(err.message.contains("error"), "{}", err.message);
}

#[tokio::test]
async fn query_maps_http_failure_to_status_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/query"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let err = client.query("amount?", "pdf_collection").await.unwrap_err();

    assert_eq!(err.kind, ApiFailure::HttpStatus(503));
    assert!(err.message.contains("Service Unavailable"), "{}", err.message);
}

#[tokio::test]
async fn health_returns_arbitrary_json_on_2xx() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "status": "ok", "version": 3 })),
        )
        .mount(&server)
        .await;

    let client = client_for(&server);
    let body = client.health().await.expect("health ok");

    assert_eq!(body, json!({ "status": "ok", "version": 3 }));
}

#[tokio::test]
async fn health_fails_on_non_2xx() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(502))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let err = client.health().await.unwrap_err();

    assert_eq!(err.kind, ApiFailure::HttpStatus(502));
}

#[tokio::test]
async fn deprecated_alias_delegates_to_default_collection() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/query"))
        .and(body_json(json!({
            "query": "amount?",
            "collection_name": DEFAULT_COLLECTION,
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "success",
            "data": { "response": "$15,000" },
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    #[allow(deprecated)]
    let answer = client
        .ask_question("amount?", "ignored-file-id")
        .await
        .expect("query ok");

    assert_eq!(answer.response, "$15,000");
}
