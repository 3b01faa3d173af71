use std::path::{Path, PathBuf};

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64_STANDARD;
use ed25519_dalek::pkcs8::spki::der::pem::LineEnding;
use ed25519_dalek::pkcs8::{DecodePrivateKey, EncodePrivateKey};
use ed25519_dalek::{Signature, Signer, SigningKey, VerifyingKey};
use rand::rngs::OsRng;
use tracing::info;

use super::error::AttestError;

/// Holds the process signing keypair. The private key never leaves this
/// type; callers get signatures and the distributable public key.
///
/// Initialized once at process start and read-only afterwards, so it is
/// safe to share across concurrent requests.
pub struct KeyCustodian {
    signing_key: SigningKey,
}

impl std::fmt::Debug for KeyCustodian {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeyCustodian")
            .field("public_key", &self.public_key_base64())
            .finish()
    }
}

impl KeyCustodian {
    /// Loads the keypair from `path`, or generates and persists a fresh one
    /// on first run. Idempotent across restarts: external verifiers can pin
    /// the public key.
    ///
    /// The private key is stored as PKCS#8 PEM (the stable interop
    /// encoding; `openssl pkey` can inspect it).
    pub fn load_or_create<P: AsRef<Path>>(path: P) -> Result<Self, AttestError> {
        let path = path.as_ref();

        if path.exists() {
            let custodian = Self::load(path)?;
            info!(
                path = %path.display(),
                public_key = %custodian.public_key_base64(),
                "Loaded existing signing key"
            );
            return Ok(custodian);
        }

        let custodian = Self::generate();
        custodian.persist(path)?;
        info!(
            path = %path.display(),
            public_key = %custodian.public_key_base64(),
            "Generated new signing key"
        );
        Ok(custodian)
    }

    /// Generates an ephemeral keypair (not persisted).
    pub fn generate() -> Self {
        Self {
            signing_key: SigningKey::generate(&mut OsRng),
        }
    }

    fn load(path: &Path) -> Result<Self, AttestError> {
        let pem = std::fs::read_to_string(path).map_err(|e| AttestError::KeyLoadFailed {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let signing_key =
            SigningKey::from_pkcs8_pem(&pem).map_err(|e| AttestError::InvalidKeyEncoding {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?;

        Ok(Self { signing_key })
    }

    fn persist(&self, path: &Path) -> Result<(), AttestError> {
        let persist_err = |e: String| AttestError::KeyPersistFailed {
            path: path.to_path_buf(),
            reason: e,
        };

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).map_err(|e| persist_err(e.to_string()))?;
        }

        let pem = self
            .signing_key
            .to_pkcs8_pem(LineEnding::LF)
            .map_err(|e| persist_err(e.to_string()))?;

        std::fs::write(path, pem.as_bytes()).map_err(|e| persist_err(e.to_string()))?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o600))
                .map_err(|e| persist_err(e.to_string()))?;
        }

        Ok(())
    }

    /// Signs a message with the process key.
    pub fn sign(&self, message: &[u8]) -> Signature {
        self.signing_key.sign(message)
    }

    /// The distributable verification key.
    pub fn verifying_key(&self) -> VerifyingKey {
        self.signing_key.verifying_key()
    }

    /// Public key as raw bytes.
    pub fn public_key_bytes(&self) -> [u8; 32] {
        self.signing_key.verifying_key().to_bytes()
    }

    /// Public key as base64 (operator convenience when registering the key
    /// with an external verifier).
    pub fn public_key_base64(&self) -> String {
        BASE64_STANDARD.encode(self.public_key_bytes())
    }
}

/// Default location of the persisted signing key.
pub fn default_key_path() -> PathBuf {
    PathBuf::from("./.data/oracle_key.pem")
}
