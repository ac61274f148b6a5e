//! Account key parsing and signing.
//!
//! # Security
//! - Secret keys come only from the accounts file, never from logs or config
//! - Keys are never logged or serialized
//! - `Debug` output redacts the key material

use ed25519_dalek::{Signer, SigningKey};
use sha2::{Digest, Sha256};

use crate::blockchain::types::{ChainError, ChainResult};

/// Key prefix used by NEAR for ed25519 keys.
const ED25519_PREFIX: &str = "ed25519:";

/// Parsed ed25519 account key.
///
/// Accepts both encodings NEAR tooling produces: a 64-byte keypair
/// (secret seed followed by public key) or a bare 32-byte seed, base58
/// encoded behind the `ed25519:` prefix.
pub struct AccountKey {
    signing: SigningKey,
}

impl AccountKey {
    /// Parse a secret key string in NEAR's `ed25519:<base58>` format.
    pub fn from_secret_key(secret_key: &str) -> ChainResult<Self> {
        let encoded = secret_key
            .strip_prefix(ED25519_PREFIX)
            .ok_or_else(|| ChainError::Auth("secret key must start with 'ed25519:'".into()))?;

        let bytes = bs58::decode(encoded)
            .into_vec()
            .map_err(|e| ChainError::Auth(format!("secret key is not valid base58: {}", e)))?;

        let signing = match bytes.len() {
            64 => {
                let keypair: [u8; 64] = bytes
                    .try_into()
                    .map_err(|_| ChainError::Auth("invalid keypair length".into()))?;
                SigningKey::from_keypair_bytes(&keypair).map_err(|e| {
                    ChainError::Auth(format!("keypair failed consistency check: {}", e))
                })?
            }
            32 => {
                let seed: [u8; 32] = bytes
                    .try_into()
                    .map_err(|_| ChainError::Auth("invalid seed length".into()))?;
                SigningKey::from_bytes(&seed)
            }
            n => {
                return Err(ChainError::Auth(format!(
                    "secret key must decode to 32 or 64 bytes, got {}",
                    n
                )))
            }
        };

        Ok(Self { signing })
    }

    /// Raw 32-byte public key.
    pub fn public_key(&self) -> [u8; 32] {
        self.signing.verifying_key().to_bytes()
    }

    /// Public key in NEAR's `ed25519:<base58>` wire format.
    pub fn public_key_str(&self) -> String {
        format!(
            "{}{}",
            ED25519_PREFIX,
            bs58::encode(self.public_key()).into_string()
        )
    }

    /// Sign the SHA-256 digest of a serialized transaction.
    ///
    /// NEAR signs the hash of the borsh-encoded transaction, not the raw
    /// bytes.
    pub fn sign_transaction(&self, tx_bytes: &[u8]) -> [u8; 64] {
        let hash = Sha256::digest(tx_bytes);
        self.signing.sign(&hash).to_bytes()
    }
}

impl std::fmt::Debug for AccountKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccountKey")
            .field("public_key", &self.public_key_str())
            .finish_non_exhaustive()
    }
}
