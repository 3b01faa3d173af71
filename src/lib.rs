//! Verdict library crate (used by the server binary and integration tests).
//!
//! Verdict decides whether a free-form guess matches an expected answer,
//! cheaply when it can and expensively only when it must, then signs the
//! result so third parties can verify it came from this service.
//!
//! # Public API Surface
//!
//! ## Core Types (Stable)
//! - [`Config`], [`ConfigError`] - Server configuration
//! - [`MatchCascade`], [`Verdict`], [`Tier`] - The tiered decision pipeline
//! - [`AttestationSigner`], [`Attestation`], [`KeyCustodian`] - Signed verdicts
//!
//! ## Comparison Tiers
//! - [`normalize`] - Canonical text form shared by every tier
//! - [`TextEncoder`], [`EncoderConfig`] - Local sentence-embedding similarity
//! - [`GenaiReasoner`], [`ReasoningConfig`], [`ReasoningTier`] - Remote reasoning
//! - [`EscalationPolicy`], [`PolicyConfig`] - Premium-tier gating
//!
//! ## HTTP
//! - [`create_router`], [`HandlerState`] - Axum application surface
//!
//! ## Test/Mock Support
//! Mock implementations are available behind `#[cfg(any(test, feature = "mock"))]`.

pub mod attest;
pub mod cascade;
pub mod config;
pub mod embedding;
pub mod gateway;
pub mod normalize;
pub mod policy;
pub mod reasoning;

pub use attest::{
    Attestation, AttestationSigner, AttestError, KeyCustodian, NONCE_LEN, canonical_message,
    default_key_path, generate_nonce,
};
pub use cascade::{
    CascadeConfig, CascadeError, DEFAULT_LOW_CUTOFF, DEFAULT_THRESHOLD, MatchCascade, Tier,
    Verdict, round4,
};
pub use config::{Config, ConfigError};
pub use embedding::{EmbeddingError, EncoderConfig, SimilarityOracle, TextEncoder};
#[cfg(any(test, feature = "mock"))]
pub use embedding::FixedSimilarity;
pub use gateway::{
    CheckAnswerRequest, CheckAnswerResponse, GatewayError, HandlerState, HealthResponse,
    create_router,
};
pub use normalize::{contains_pictograph, normalize};
pub use policy::{EscalationPolicy, PolicyConfig};
pub use reasoning::{GenaiReasoner, ReasoningConfig, ReasoningOracle, ReasoningTier};
#[cfg(any(test, feature = "mock"))]
pub use reasoning::MockReasoner;
