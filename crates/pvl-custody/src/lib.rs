//! Batch custody workflow for ProvLine.
//!
//! This crate is the ledger's inbound caller: it owns the batch entities
//! the ledger references opaquely, fingerprints their metadata through the
//! digest engine, and appends one custody event per business action —
//! registration, verification, transfer. The ledger core stays free of any
//! batch knowledge beyond the subject reference inside payloads.

pub mod batch;
pub mod error;
pub mod service;

pub use batch::{Batch, BatchMetadata, BatchStatus};
pub use error::CustodyError;
pub use service::{CustodyService, VerificationOutcome};
