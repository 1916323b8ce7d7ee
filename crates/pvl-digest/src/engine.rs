use pvl_types::Fingerprint;
use serde_json::Value;
use sha2::{Digest, Sha256};

/// Deterministic content fingerprinting engine.
///
/// Fingerprints are SHA-256 digests of a value's canonical form:
///
/// - A string is hashed byte-for-byte, with no re-serialization.
/// - Anything else is first converted to a [`serde_json::Value`] and
///   rendered as compact JSON. The `Value` map type keeps object keys in
///   sorted order, so logically equal values fingerprint identically
///   regardless of key insertion order. This is the canonicalization
///   contract: sorted-key compact JSON.
///
/// The engine is pure and stateless; the same logical input yields the
/// same fingerprint within a process, across restarts, and across hosts.
pub struct DigestEngine;

impl DigestEngine {
    /// Fingerprint any serializable value.
    ///
    /// Fails with [`DigestError::Serialization`] if the value cannot be
    /// represented as JSON (e.g. a map with non-string keys).
    pub fn fingerprint<T: serde::Serialize>(value: &T) -> Result<Fingerprint, DigestError> {
        let value =
            serde_json::to_value(value).map_err(|e| DigestError::Serialization(e.to_string()))?;
        Ok(match value {
            Value::String(s) => Self::fingerprint_bytes(s.as_bytes()),
            other => Self::fingerprint_bytes(other.to_string().as_bytes()),
        })
    }

    /// Fingerprint raw bytes directly.
    pub fn fingerprint_bytes(data: &[u8]) -> Fingerprint {
        let digest = Sha256::digest(data);
        Fingerprint::from_digest(digest.into())
    }

    /// Verify that a value still produces the expected fingerprint.
    pub fn verify<T: serde::Serialize>(
        value: &T,
        expected: &Fingerprint,
    ) -> Result<bool, DigestError> {
        Ok(Self::fingerprint(value)? == *expected)
    }
}

/// Errors from fingerprinting operations.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum DigestError {
    #[error("serialization error: {0}")]
    Serialization(String),
}
