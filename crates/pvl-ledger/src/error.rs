use pvl_digest::DigestError;
use pvl_store::StoreError;
use pvl_types::EventKind;

/// Errors produced by ledger operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LedgerError {
    #[error("event kind {expected} does not match payload kind {actual}")]
    KindMismatch {
        expected: EventKind,
        actual: EventKind,
    },

    #[error("malformed content fingerprint: {0}")]
    MalformedFingerprint(String),

    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("store unavailable: {0}")]
    StoreUnavailable(String),
}

impl From<StoreError> for LedgerError {
    fn from(e: StoreError) -> Self {
        Self::StoreUnavailable(e.to_string())
    }
}

impl From<DigestError> for LedgerError {
    fn from(e: DigestError) -> Self {
        let DigestError::Serialization(reason) = e;
        Self::Serialization(reason)
    }
}
