//! Participant credential store
//!
//! Maps each participant name to the SHA-256 hash of their shared secret.
//! Secrets come from configuration and are hashed as soon as they are loaded.

use std::collections::BTreeMap;

use sha2::{Digest, Sha256};
use thiserror::Error;

/// Errors raised while loading credentials
#[derive(Debug, Error)]
pub enum CredentialError {
    #[error("Credentials must be a JSON object of name to secret: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("Empty participant name")]
    EmptyName,

    #[error("Empty secret for participant '{0}'")]
    EmptySecret(String),

    #[error("Secret for participant '{0}' has leading or trailing whitespace")]
    PaddedSecret(String),

    #[error("Participants '{0}' and '{1}' share a secret")]
    SharedSecret(String, String),
}

/// Hash a secret for storage and comparison
pub fn hash_secret(secret: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(secret.as_bytes());
    hex::encode(hasher.finalize())
}

/// Immutable `{participant_name: secret_hash}` table
#[derive(Clone, Default)]
pub struct CredentialStore {
    // name -> hash, sorted by name
    hashes: BTreeMap<String, String>,
}

impl CredentialStore {
    /// Build a store from plaintext secrets.
    ///
    /// Every secret must identify exactly one participant, so two names
    /// sharing a secret is rejected. Secrets are compared byte for byte and
    /// may not start or end with whitespace.
    pub fn new(
        secrets: impl IntoIterator<Item = (String, String)>,
    ) -> Result<Self, CredentialError> {
        let mut hashes = BTreeMap::new();
        let mut owners: BTreeMap<String, String> = BTreeMap::new();

        for (name, secret) in secrets {
            let name = name.trim().to_string();
            if name.is_empty() {
                return Err(CredentialError::EmptyName);
            }
            if secret.is_empty() {
                return Err(CredentialError::EmptySecret(name));
            }
            if secret.trim() != secret {
                return Err(CredentialError::PaddedSecret(name));
            }

            let hash = hash_secret(&secret);
            if let Some(other) = owners.insert(hash.clone(), name.clone()) {
                return Err(CredentialError::SharedSecret(other, name));
            }
            hashes.insert(name, hash);
        }

        Ok(Self { hashes })
    }

    /// Parse a JSON object such as `{"Ada": "secret", "Grace": "other"}`
    pub fn from_json(raw: &str) -> Result<Self, CredentialError> {
        let secrets: BTreeMap<String, String> = serde_json::from_str(raw)?;
        Self::new(secrets)
    }

    /// Name of the participant owning this secret
    pub fn participant_for(&self, secret: &str) -> Option<&str> {
        let hash = hash_secret(secret);
        self.hashes
            .iter()
            .find(|(_, stored)| **stored == hash)
            .map(|(name, _)| name.as_str())
    }

    /// Configured participant names, sorted
    pub fn names(&self) -> Vec<String> {
        self.hashes.keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.hashes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hashes.is_empty()
    }
}

impl std::fmt::Debug for CredentialStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialStore")
            .field("participants", &self.hashes.keys().collect::<Vec<_>>())
            .finish()
    }
}
