use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AttestError {
    #[error("failed to read signing key at {path}: {reason}")]
    KeyLoadFailed { path: PathBuf, reason: String },

    #[error("failed to persist signing key at {path}: {reason}")]
    KeyPersistFailed { path: PathBuf, reason: String },

    #[error("signing key at {path} is not valid PKCS#8 PEM: {reason}")]
    InvalidKeyEncoding { path: PathBuf, reason: String },
}
