//! HTTP surface.
//!
//! Thin translation layer between JSON requests and the cascade: it
//! validates input, runs [`MatchCascade::check`], attaches the attestation,
//! and renders errors as JSON. No decision logic lives here.
//!
//! [`MatchCascade::check`]: crate::cascade::MatchCascade::check

mod error;
mod handler;
mod state;

pub use error::{ErrorResponse, GatewayError};
pub use handler::{CheckAnswerRequest, CheckAnswerResponse, HealthResponse, RootResponse};
pub use state::HandlerState;

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

use crate::embedding::SimilarityOracle;
use crate::reasoning::ReasoningOracle;

/// Builds the application router.
///
/// Routes:
/// - `POST /check-answer` runs the cascade and signs the verdict
/// - `GET /health` liveness plus oracle availability
/// - `GET /` service identity and the attestation public key
pub fn create_router<S, R>(state: HandlerState<S, R>) -> Router
where
    S: SimilarityOracle + 'static,
    R: ReasoningOracle + 'static,
{
    Router::new()
        .route("/", get(handler::root_handler))
        .route("/health", get(handler::health_handler))
        .route("/check-answer", post(handler::check_answer_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
