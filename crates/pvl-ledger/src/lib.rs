//! Append-only custody ledger for ProvLine.
//!
//! This crate is the heart of ProvLine. It provides:
//! - `Ledger` — exclusive owner of the hash-linked record sequence:
//!   linearized appends, ordered reads, subject lookup
//! - `ChainVerifier` — single-pass integrity verification over a chain
//! - `IntegrityReport` / `Violation` — verification results as data,
//!   never as process faults
//!
//! The chain is a local sequential log with one authoritative writer.
//! There is no consensus, mining, forking, or record signing here.

pub mod error;
pub mod ledger;
pub mod verify;

pub use error::LedgerError;
pub use ledger::Ledger;
pub use verify::{ChainVerifier, IntegrityReport, Violation, ViolationKind};
