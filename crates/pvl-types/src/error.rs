use thiserror::Error;

/// Errors produced by type operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("malformed fingerprint: {0}")]
    InvalidFingerprint(String),

    #[error("unknown event kind: {0}")]
    UnknownKind(String),
}
