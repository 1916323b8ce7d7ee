//! Content fingerprinting for ProvLine.
//!
//! Provides deterministic SHA-256 fingerprinting of arbitrary structured
//! values. Content-addressing lets any later party recompute a fingerprint
//! from the same logical data and compare it to the recorded one — the
//! payload-level tamper-evidence mechanism, independent of the ledger's
//! own hash linkage.
//!
//! All crypto operations wrap established libraries — no custom
//! cryptography.

pub mod engine;

pub use engine::{DigestEngine, DigestError};
