use std::sync::Arc;

use crate::attest::AttestationSigner;
use crate::cascade::MatchCascade;
use crate::embedding::SimilarityOracle;
use crate::reasoning::ReasoningOracle;

/// Shared, read-only request state. All fields are initialized once at
/// startup; concurrent requests clone cheap handles.
pub struct HandlerState<S, R>
where
    S: SimilarityOracle + 'static,
    R: ReasoningOracle + 'static,
{
    pub cascade: Arc<MatchCascade<S, R>>,
    pub signer: Arc<AttestationSigner>,
}

impl<S, R> Clone for HandlerState<S, R>
where
    S: SimilarityOracle + 'static,
    R: ReasoningOracle + 'static,
{
    fn clone(&self) -> Self {
        Self {
            cascade: Arc::clone(&self.cascade),
            signer: Arc::clone(&self.signer),
        }
    }
}

impl<S, R> HandlerState<S, R>
where
    S: SimilarityOracle + 'static,
    R: ReasoningOracle + 'static,
{
    pub fn new(cascade: Arc<MatchCascade<S, R>>, signer: Arc<AttestationSigner>) -> Self {
        Self { cascade, signer }
    }
}
