//! AuddClient against a local stand-in for the AudD API

mod helpers;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Form, Router,
};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use trk_ar::{AuddClient, ProviderError, RecognitionOutcome, RecognitionProvider};
use trk_common::ServiceUrl;

type Received = Arc<Mutex<Vec<HashMap<String, String>>>>;

/// Answers by the submitted `audio` value
async fn fake_audd(
    State(received): State<Received>,
    Form(fields): Form<HashMap<String, String>>,
) -> Response {
    let audio = fields.get("audio").cloned().unwrap_or_default();
    received.lock().unwrap().push(fields);

    match audio.as_str() {
        "known" => (
            [("content-type", "application/json")],
            r#"{"status":"success","result":{"title":"Wonderwall","artist":"Oasis"}}"#,
        )
            .into_response(),
        "unknown" => (
            [("content-type", "application/json")],
            r#"{"status":"success","result":null}"#,
        )
            .into_response(),
        "bad-token" => (
            [("content-type", "application/json")],
            r#"{"status":"error","error":{"error_code":900,"error_message":"Wrong API token"}}"#,
        )
            .into_response(),
        "overloaded" => StatusCode::BAD_GATEWAY.into_response(),
        _ => "not json at all".into_response(),
    }
}

async fn spawn_fake_audd() -> (ServiceUrl, Received) {
    let received: Received = Arc::default();
    let app = Router::new()
        .route("/", post(fake_audd))
        .with_state(received.clone());
    let addr = helpers::spawn_router(app).await;

    (
        ServiceUrl::parse(&format!("http://{}/", addr)).unwrap(),
        received,
    )
}

#[tokio::test]
async fn test_sends_token_audio_and_return_fields() {
    let (url, received) = spawn_fake_audd().await;
    let client = AuddClient::new(url, "secret-token".to_string());

    client.recognise("known").await.unwrap();

    let received = received.lock().unwrap();
    assert_eq!(received.len(), 1);
    assert_eq!(received[0]["api_token"], "secret-token");
    assert_eq!(received[0]["audio"], "known");
    assert_eq!(received[0]["return"], "title");
}

#[tokio::test]
async fn test_match() {
    let (url, _) = spawn_fake_audd().await;
    let client = AuddClient::new(url, "t".to_string());

    assert_eq!(
        client.recognise("known").await.unwrap(),
        RecognitionOutcome::Matched {
            title: "Wonderwall".to_string()
        }
    );
}

#[tokio::test]
async fn test_no_match() {
    let (url, _) = spawn_fake_audd().await;
    let client = AuddClient::new(url, "t".to_string());

    assert_eq!(
        client.recognise("unknown").await.unwrap(),
        RecognitionOutcome::NoMatch
    );
}

#[tokio::test]
async fn test_provider_reported_error() {
    let (url, _) = spawn_fake_audd().await;
    let client = AuddClient::new(url, "t".to_string());

    assert_eq!(
        client.recognise("bad-token").await.unwrap(),
        RecognitionOutcome::Rejected {
            code: 900,
            message: "Wrong API token".to_string()
        }
    );
}

#[tokio::test]
async fn test_non_2xx_is_status_error() {
    let (url, _) = spawn_fake_audd().await;
    let client = AuddClient::new(url, "t".to_string());

    assert!(matches!(
        client.recognise("overloaded").await,
        Err(ProviderError::Status(502))
    ));
}

#[tokio::test]
async fn test_unparseable_body_is_malformed() {
    let (url, _) = spawn_fake_audd().await;
    let client = AuddClient::new(url, "t".to_string());

    assert!(matches!(
        client.recognise("garbage").await,
        Err(ProviderError::Malformed(_))
    ));
}

#[tokio::test]
async fn test_unreachable_provider_is_transport_error() {
    let client = AuddClient::new(helpers::unreachable_url().await, "t".to_string());

    assert!(matches!(
        client.recognise("known").await,
        Err(ProviderError::Transport(_))
    ));
}
