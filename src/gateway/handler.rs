use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::cascade::{Tier, round4};
use crate::embedding::SimilarityOracle;
use crate::reasoning::ReasoningOracle;

use super::error::GatewayError;
use super::state::HandlerState;

#[derive(Debug, Deserialize)]
pub struct CheckAnswerRequest {
    pub guess: Option<String>,
    pub answer: Option<String>,
    /// Acceptance threshold in `(0, 1]`. Defaults to the configured value.
    pub threshold: Option<f32>,
    /// Attestation timestamp override (unix seconds). Defaults to the
    /// system clock; verifier-driven time goes here.
    pub timestamp: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct CheckAnswerResponse {
    pub is_correct: bool,
    pub similarity: f32,
    pub method: Tier,
    pub tier: u8,
    pub threshold: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub local_similarity: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub standard_says: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub premium_says: Option<bool>,
    /// Whether this response carries a signed attestation.
    pub oracle_enabled: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub oracle_timestamp: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub oracle_nonce: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub oracle_signature: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub oracle_pubkey: Option<String>,
}

#[instrument(skip(state, request))]
pub async fn check_answer_handler<S, R>(
    State(state): State<HandlerState<S, R>>,
    Json(request): Json<CheckAnswerRequest>,
) -> Result<Json<CheckAnswerResponse>, GatewayError>
where
    S: SimilarityOracle + 'static,
    R: ReasoningOracle + 'static,
{
    let guess = request
        .guess
        .ok_or_else(|| GatewayError::InvalidRequest("missing 'guess' in request body".into()))?;
    let answer = request
        .answer
        .ok_or_else(|| GatewayError::InvalidRequest("missing 'answer' in request body".into()))?;

    if let Some(threshold) = request.threshold
        && !(threshold > 0.0 && threshold <= 1.0)
    {
        return Err(GatewayError::InvalidRequest(format!(
            "threshold {threshold} is not in (0, 1]"
        )));
    }

    let threshold = request
        .threshold
        .unwrap_or_else(|| state.cascade.default_threshold());

    debug!(guess_len = guess.len(), answer_len = answer.len(), threshold, "Checking answer");

    let verdict = state.cascade.check(&guess, &answer, Some(threshold)).await?;

    // Sign over the ORIGINAL strings; normalization is a comparison detail,
    // not part of the attested claim.
    let attestation = state
        .signer
        .attest(&guess, &answer, verdict.is_correct, request.timestamp);

    let response = CheckAnswerResponse {
        is_correct: verdict.is_correct,
        similarity: verdict.similarity_display(),
        method: verdict.method,
        tier: verdict.tier_number(),
        threshold,
        local_similarity: verdict.local_similarity.map(round4),
        standard_says: verdict.standard_says,
        premium_says: verdict.premium_says,
        oracle_enabled: attestation.is_some(),
        oracle_timestamp: attestation.as_ref().map(|a| a.timestamp),
        oracle_nonce: attestation.as_ref().map(|a| a.nonce.clone()),
        oracle_signature: attestation.as_ref().map(|a| a.signature_base64()),
        oracle_pubkey: attestation.as_ref().map(|a| a.public_key_base64()),
    };

    Ok(Json(response))
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub reasoning_available: bool,
    pub attestation_enabled: bool,
}

pub async fn health_handler<S, R>(
    State(state): State<HandlerState<S, R>>,
) -> Json<HealthResponse>
where
    S: SimilarityOracle + 'static,
    R: ReasoningOracle + 'static,
{
    Json(HealthResponse {
        status: "healthy",
        reasoning_available: state.cascade.reasoning_available(),
        attestation_enabled: state.signer.enabled(),
    })
}

#[derive(Debug, Serialize)]
pub struct RootResponse {
    pub message: &'static str,
    pub status: &'static str,
    pub approach: &'static str,
    pub reasoning_available: bool,
    pub attestation_enabled: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub oracle_pubkey: Option<String>,
}

pub async fn root_handler<S, R>(State(state): State<HandlerState<S, R>>) -> Json<RootResponse>
where
    S: SimilarityOracle + 'static,
    R: ReasoningOracle + 'static,
{
    Json(RootResponse {
        message: "Verdict semantic answer oracle",
        status: "healthy",
        approach: "4-tier cascade + signed attestations",
        reasoning_available: state.cascade.reasoning_available(),
        attestation_enabled: state.signer.enabled(),
        oracle_pubkey: state
            .signer
            .public_key()
            .map(|k| base64_encode_key(&k.to_bytes())),
    })
}

fn base64_encode_key(bytes: &[u8]) -> String {
    use base64::Engine;
    base64::engine::general_purpose::STANDARD.encode(bytes)
}
