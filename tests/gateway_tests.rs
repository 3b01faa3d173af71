//! HTTP surface tests driven through the router with mock tiers.

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;

use verdict::attest::{AttestationSigner, KeyCustodian};
use verdict::cascade::{CascadeConfig, MatchCascade};
use verdict::embedding::FixedSimilarity;
use verdict::gateway::{HandlerState, create_router};
use verdict::policy::EscalationPolicy;
use verdict::reasoning::MockReasoner;

fn build_app(similarity: f32, reasoner: MockReasoner, signer: AttestationSigner) -> Router {
    let cascade = MatchCascade::new(
        FixedSimilarity(similarity),
        reasoner,
        EscalationPolicy::default(),
        CascadeConfig::default(),
    );
    let state = HandlerState::new(Arc::new(cascade), Arc::new(signer));
    create_router(state)
}

fn signing_app(similarity: f32, reasoner: MockReasoner) -> Router {
    let signer = AttestationSigner::new(Arc::new(KeyCustodian::generate()));
    build_app(similarity, reasoner, signer)
}

async fn post_check(app: Router, body: Value) -> (StatusCode, Value) {
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/check-answer")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value: Value = serde_json::from_slice(&bytes).unwrap();
    (status, value)
}

#[tokio::test]
async fn test_exact_match_is_signed() {
    let app = signing_app(0.0, MockReasoner::unavailable());

    let (status, body) = post_check(
        app,
        json!({ "guess": "  Paris ", "answer": "paris" }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["is_correct"], true);
    assert_eq!(body["method"], "exact_match");
    assert_eq!(body["tier"], 1);
    assert_eq!(body["similarity"], 1.0);
    assert_eq!(body["oracle_enabled"], true);
    assert!(body["oracle_signature"].is_string());
    assert!(body["oracle_nonce"].is_string());
    assert!(body["oracle_pubkey"].is_string());
    assert!(body["oracle_timestamp"].is_i64());
}

#[tokio::test]
async fn test_missing_guess_is_rejected() {
    let app = signing_app(0.9, MockReasoner::unavailable());

    let (status, body) = post_check(app, json!({ "answer": "paris" })).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("guess"));
    assert_eq!(body["code"], 400);
}

#[tokio::test]
async fn test_missing_answer_is_rejected() {
    let app = signing_app(0.9, MockReasoner::unavailable());

    let (status, body) = post_check(app, json!({ "guess": "paris" })).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("answer"));
}

#[tokio::test]
async fn test_out_of_range_threshold_is_rejected() {
    for bad in [0.0, -0.5, 1.5] {
        let app = signing_app(0.9, MockReasoner::unavailable());
        let (status, _) = post_check(
            app,
            json!({ "guess": "a", "answer": "b", "threshold": bad }),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "threshold {bad}");
    }
}

#[tokio::test]
async fn test_empty_guess_is_rejected_without_model_call() {
    let app = signing_app(0.99, MockReasoner::unavailable());

    let (status, body) = post_check(app, json!({ "guess": "   ", "answer": "paris" })).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["is_correct"], false);
    assert_eq!(body["method"], "empty_input_rejection");
    assert_eq!(body["tier"], 0);
    assert_eq!(body["similarity"], 0.0);
}

#[tokio::test]
async fn test_custom_threshold_applies() {
    // 0.75 fails the default 0.8 threshold but passes an explicit 0.7.
    let app = signing_app(0.75, MockReasoner::unavailable());

    let (status, body) = post_check(
        app,
        json!({ "guess": "colour", "answer": "color", "threshold": 0.7 }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["is_correct"], true);
    assert_eq!(body["method"], "local_model");
    assert_eq!(body["threshold"], 0.7);
}

#[tokio::test]
async fn test_standard_reasoning_verdict_shape() {
    let app = signing_app(0.5, MockReasoner::standard(true));

    let (status, body) = post_check(
        app,
        json!({ "guess": "the big apple", "answer": "new york" }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["is_correct"], true);
    assert_eq!(body["method"], "standard_reasoning");
    assert_eq!(body["tier"], 3);
    assert_eq!(body["standard_says"], true);
    assert_eq!(body["local_similarity"], 0.5);
}

#[tokio::test]
async fn test_disabled_signer_reports_unsigned_verdict() {
    let app = build_app(0.0, MockReasoner::unavailable(), AttestationSigner::disabled());

    let (status, body) = post_check(app, json!({ "guess": "paris", "answer": "paris" })).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["is_correct"], true);
    assert_eq!(body["oracle_enabled"], false);
    assert!(body.get("oracle_signature").is_none());
    assert!(body.get("oracle_nonce").is_none());
    assert!(body.get("oracle_timestamp").is_none());
}

#[tokio::test]
async fn test_response_signature_verifies() {
    use base64::Engine;
    use base64::engine::general_purpose::STANDARD as BASE64;
    use ed25519_dalek::{Signature, VerifyingKey};

    let guess = "Satoshi Nakamoto";
    let answer = "bitcoin creator";
    let app = signing_app(0.0, MockReasoner::unavailable());

    let (_, body) = post_check(app, json!({ "guess": guess, "answer": answer })).await;

    let is_correct = body["is_correct"].as_bool().unwrap();
    let timestamp = body["oracle_timestamp"].as_i64().unwrap();
    let nonce = body["oracle_nonce"].as_str().unwrap();

    let pubkey_bytes: [u8; 32] = BASE64
        .decode(body["oracle_pubkey"].as_str().unwrap())
        .unwrap()
        .try_into()
        .unwrap();
    let sig_bytes: [u8; 64] = BASE64
        .decode(body["oracle_signature"].as_str().unwrap())
        .unwrap()
        .try_into()
        .unwrap();

    let public_key = VerifyingKey::from_bytes(&pubkey_bytes).unwrap();
    let signature = Signature::from_bytes(&sig_bytes);

    // An external verifier rebuilds the message from the ORIGINAL strings.
    let message = verdict::canonical_message(guess, answer, is_correct, timestamp, nonce);
    assert!(AttestationSigner::verify(
        &public_key,
        message.as_bytes(),
        &signature
    ));
}

#[tokio::test]
async fn test_caller_supplied_timestamp_is_signed() {
    let app = signing_app(0.0, MockReasoner::unavailable());

    let (_, body) = post_check(
        app,
        json!({ "guess": "x", "answer": "y", "timestamp": 1700000000 }),
    )
    .await;

    assert_eq!(body["oracle_timestamp"], 1700000000);
}

#[tokio::test]
async fn test_health_endpoint() {
    let app = signing_app(0.5, MockReasoner::standard(true));

    let response = app
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body: Value = serde_json::from_slice(&bytes).unwrap();

    assert_eq!(body["status"], "healthy");
    assert_eq!(body["reasoning_available"], true);
    assert_eq!(body["attestation_enabled"], true);
}

#[tokio::test]
async fn test_root_endpoint_exposes_public_key() {
    let app = signing_app(0.5, MockReasoner::unavailable());

    let response = app
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body: Value = serde_json::from_slice(&bytes).unwrap();

    assert_eq!(body["status"], "healthy");
    assert_eq!(body["reasoning_available"], false);
    assert!(body["oracle_pubkey"].is_string());
}
