//! Content digest of a plan capture.
//!
//! The digest is taken over the preprocessed text, so a colored and an
//! uncolored capture of the same plan hash identically.

use serde::Serialize;
use sha2::{Digest, Sha256};
use std::fmt;

/// SHA-256 of preprocessed plan text, hex encoded.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct PlanDigest(String);

impl PlanDigest {
    /// Hashes the given text.
    #[must_use]
    pub fn of(text: &str) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(text.as_bytes());
        Self(hex::encode(hasher.finalize()))
    }

    /// Full hex digest.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// First 8 hex characters.
    #[must_use]
    pub fn short(&self) -> &str {
        &self.0[..8]
    }
}

impl fmt::Display for PlanDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
