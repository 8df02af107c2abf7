use rand::{distributions::Alphanumeric, thread_rng, Rng};
use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;

/// Generates and verifies single-use submit keys. Only the digest is ever
/// stored; the plaintext is handed out once, at test initiation.
#[derive(Debug, Clone)]
pub struct SubmitKeys {
    length: usize,
}

#[derive(Debug, Clone)]
pub struct SubmitKeyPair {
    pub plaintext: String,
    pub digest: String,
}

impl SubmitKeys {
    pub fn new(length: usize) -> Self {
        Self { length }
    }

    pub fn generate(&self) -> SubmitKeyPair {
        let plaintext: String = thread_rng()
            .sample_iter(&Alphanumeric)
            .take(self.length)
            .map(char::from)
            .collect();
        let digest = self.transform(&plaintext);
        SubmitKeyPair { plaintext, digest }
    }

    /// Deterministic one-way transform applied both at storage time and at
    /// verification time.
    pub fn transform(&self, plaintext: &str) -> String {
        hex::encode(Sha256::digest(plaintext.as_bytes()))
    }

    /// Constant-time comparison of a submitted plaintext key against the
    /// stored digest.
    pub fn matches(&self, submitted: &str, stored_digest: &str) -> bool {
        self.transform(submitted)
            .as_bytes()
            .ct_eq(stored_digest.as_bytes())
            .into()
    }
}
