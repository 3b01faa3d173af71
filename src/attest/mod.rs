//! Signed verdict attestations.
//!
//! An [`Attestation`] is a tamper-evident claim that this service produced a
//! verdict, verifiable by any third party holding the public key. The signed
//! payload is the canonical message
//!
//! ```text
//! {guess}:{answer}:{is_correct}:{timestamp}:{nonce}
//! ```
//!
//! built over the ORIGINAL (pre-normalization) guess and answer, with the
//! boolean rendered lowercase (`true`/`false`) and the whole string encoded
//! as UTF-8. Any formatting deviation invalidates the signature, so external
//! verifiers must reproduce these bytes exactly.

mod error;
mod keys;

#[cfg(test)]
mod tests;

pub use error::AttestError;
pub use keys::{KeyCustodian, default_key_path};

use std::sync::Arc;

use base64::Engine;
use base64::engine::general_purpose::{STANDARD as BASE64_STANDARD, URL_SAFE_NO_PAD};
use ed25519_dalek::{Signature, Verifier, VerifyingKey};
use rand::RngCore;
use rand::rngs::OsRng;
use tracing::warn;

/// Nonce entropy in bytes (128 bits: collision over any realistic call
/// volume is negligible).
pub const NONCE_LEN: usize = 16;

/// A signed, timestamped, nonce-bound claim over a verdict.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attestation {
    /// Unix seconds; caller-supplied or system clock.
    pub timestamp: i64,
    /// Fresh 128-bit random value, URL-safe base64. Never reused across two
    /// verdicts signed by the same key.
    pub nonce: String,
    /// Ed25519 signature over the canonical message bytes.
    pub signature: Signature,
    /// The key to verify against.
    pub public_key: VerifyingKey,
}

impl Attestation {
    /// Signature as base64 for transport.
    pub fn signature_base64(&self) -> String {
        BASE64_STANDARD.encode(self.signature.to_bytes())
    }

    /// Public key as base64 for transport.
    pub fn public_key_base64(&self) -> String {
        BASE64_STANDARD.encode(self.public_key.to_bytes())
    }
}

/// Builds the exact byte sequence that is signed and verified.
pub fn canonical_message(
    guess: &str,
    answer: &str,
    is_correct: bool,
    timestamp: i64,
    nonce: &str,
) -> String {
    format!("{guess}:{answer}:{is_correct}:{timestamp}:{nonce}")
}

/// Generates a fresh 128-bit nonce from the OS entropy source (safe for
/// concurrent use; no correlation across threads).
pub fn generate_nonce() -> String {
    let mut bytes = [0u8; NONCE_LEN];
    OsRng.fill_bytes(&mut bytes);
    URL_SAFE_NO_PAD.encode(bytes)
}

/// Signs verdicts with the process keypair.
///
/// Stateless per call apart from nonce freshness. When no keypair is loaded
/// the signer degrades: [`AttestationSigner::attest`] returns `None` and the
/// verdict is still usable, just unsigned.
#[derive(Debug, Clone)]
pub struct AttestationSigner {
    custodian: Option<Arc<KeyCustodian>>,
}

impl AttestationSigner {
    pub fn new(custodian: Arc<KeyCustodian>) -> Self {
        Self {
            custodian: Some(custodian),
        }
    }

    /// Signer without a key: every `attest` call reports degraded signing.
    pub fn disabled() -> Self {
        Self { custodian: None }
    }

    /// Returns `true` if a keypair is loaded.
    pub fn enabled(&self) -> bool {
        self.custodian.is_some()
    }

    /// The distributable public key, when a keypair is loaded.
    pub fn public_key(&self) -> Option<VerifyingKey> {
        self.custodian.as_ref().map(|c| c.verifying_key())
    }

    /// Signs a verdict context. `timestamp` falls back to the system clock;
    /// a fresh nonce is generated per call.
    ///
    /// Returns `None` when no keypair is loaded: attestation is degraded,
    /// the verdict itself stands.
    pub fn attest(
        &self,
        guess: &str,
        answer: &str,
        is_correct: bool,
        timestamp: Option<i64>,
    ) -> Option<Attestation> {
        let Some(custodian) = &self.custodian else {
            warn!("No signing key loaded, returning unsigned verdict");
            return None;
        };

        let timestamp = timestamp.unwrap_or_else(|| chrono::Utc::now().timestamp());
        let nonce = generate_nonce();

        let message = canonical_message(guess, answer, is_correct, timestamp, &nonce);
        let signature = custodian.sign(message.as_bytes());

        Some(Attestation {
            timestamp,
            nonce,
            signature,
            public_key: custodian.verifying_key(),
        })
    }

    /// Verifies a signature over a canonical message. What an external
    /// verifier runs; exposed here so integrations and tests can check
    /// round-trips without reimplementing the message format.
    pub fn verify(public_key: &VerifyingKey, message: &[u8], signature: &Signature) -> bool {
        public_key.verify(message, signature).is_ok()
    }
}
