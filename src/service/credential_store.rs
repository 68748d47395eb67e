use std::sync::OnceLock;
use thiserror::Error as ThisError;
use tracing::warn;

/// bcrypt work factor used for every stored password.
pub const HASH_COST: u32 = 10;

#[derive(Debug, ThisError)]
pub enum HashError {
    #[error("password hashing failed: {0}")]
    Bcrypt(#[from] bcrypt::BcryptError),

    #[error("hashing task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

/// Stand-in hash verified when no account matches, so a lookup miss costs one bcrypt round.
pub(crate) static PLACEHOLDER_HASH: OnceLock<String> = OnceLock::new();

/// One-way password hashing. Plaintext is never logged or kept.
pub struct CredentialStore;

impl CredentialStore {
    /// Hash with a fresh random salt; equal inputs give different outputs.
    pub fn hash(plaintext: &str) -> Result<String, HashError> {
        Ok(bcrypt::hash(plaintext, HASH_COST)?)
    }

    /// Check `plaintext` against a stored hash. A malformed hash never verifies.
    pub fn verify(plaintext: &str, hashed: &str) -> bool {
        match bcrypt::verify(plaintext, hashed) {
            Ok(ok) => ok,
            Err(e) => {
                warn!(error = %e, "stored password hash could not be parsed");
                false
            }
        }
    }

    /// [`CredentialStore::hash`] on the blocking pool.
    pub async fn hash_async(plaintext: String) -> Result<String, HashError> {
        tokio::task::spawn_blocking(move || Self::hash(&plaintext)).await?
    }

    /// [`CredentialStore::verify`] on the blocking pool.
    pub async fn verify_async(plaintext: String, hashed: String) -> Result<bool, tokio::task::JoinError> {
        tokio::task::spawn_blocking(move || Self::verify(&plaintext, &hashed)).await
    }

    /// Verify against [`PLACEHOLDER_HASH`]. Never succeeds.
    pub async fn verify_placeholder_async(plaintext: String) -> Result<(), tokio::task::JoinError> {
        tokio::task::spawn_blocking(move || {
            let hashed = PLACEHOLDER_HASH.get_or_init(|| {
                bcrypt::hash("course-api placeholder", HASH_COST).unwrap_or_default()
            });
            Self::verify(&plaintext, hashed);
        })
        .await
    }
}
