//! Actor identity.
//!
//! An [`ActorId`] is the authenticated caller identity supplied by the
//! execution substrate with every call. The engine never authenticates —
//! it only authorizes an already-trusted identity against the stored
//! owner/manager set. The id is the raw 32-byte ed25519 public key of the
//! account, so substrates that sign calls can derive it directly from the
//! verifying key.

use std::fmt;

use ed25519_dalek::VerifyingKey;
use serde::{Deserialize, Serialize};

/// An authenticated caller identity (account address).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct ActorId(pub [u8; 32]);

impl ActorId {
    #[must_use]
    pub const fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Short hex form for logs and event summaries.
    #[must_use]
    pub fn short(&self) -> String {
        hex::encode(&self.0[..4])
    }
}

impl From<&VerifyingKey> for ActorId {
    fn from(key: &VerifyingKey) -> Self {
        Self(key.to_bytes())
    }
}

impl fmt::Display for ActorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "actor:{}", hex::encode(&self.0[..8]))
    }
}

/// Test helpers.
#[cfg(any(test, feature = "test-helpers"))]
impl ActorId {
    /// A fresh random actor, for tests that need distinct identities.
    #[must_use]
    pub fn random() -> Self {
        Self(rand::random())
    }
}
