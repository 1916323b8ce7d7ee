//! Foundation types for ProvLine, the custody provenance ledger.
//!
//! This crate provides the core value types shared by every other ProvLine
//! crate. Every other ProvLine crate depends on `pvl-types`.
//!
//! # Key Types
//!
//! - [`Fingerprint`] — Content-addressed SHA-256 fingerprint (`0x`-prefixed hex)
//! - [`EventKind`] — Closed set of custody event categories
//! - [`EventPayload`] — Closed set of event payload shapes, keyed by kind
//! - [`ChainRecord`] — One immutable, hash-linked ledger entry
//! - [`EventTime`] — Millisecond wall-clock timestamp with monotonic clamping

pub mod error;
pub mod event;
pub mod fingerprint;
pub mod record;
pub mod temporal;

pub use error::TypeError;
pub use event::{EventKind, EventPayload};
pub use fingerprint::Fingerprint;
pub use record::ChainRecord;
pub use temporal::EventTime;
