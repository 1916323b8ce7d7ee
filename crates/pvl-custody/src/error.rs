use thiserror::Error;

use pvl_digest::DigestError;
use pvl_ledger::LedgerError;

/// Errors produced by custody workflow operations.
#[derive(Debug, Error)]
pub enum CustodyError {
    #[error("unknown batch: {0}")]
    UnknownBatch(String),

    #[error("batch {0} is not in transit")]
    NotInTransit(String),

    #[error("digest error: {0}")]
    Digest(#[from] DigestError),

    #[error("ledger error: {0}")]
    Ledger(#[from] LedgerError),
}
