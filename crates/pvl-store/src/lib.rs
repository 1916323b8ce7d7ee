//! Chain storage adapters for ProvLine.
//!
//! The ledger owns its record sequence exclusively; this crate provides
//! the seam it writes through. [`ChainStore`] is the adapter trait,
//! [`InMemoryChainStore`] backs tests and embedding, and
//! [`FileChainStore`] persists the chain as an append-only JSON-lines
//! segment — one record per line in the portable wire format.

pub mod error;
pub mod file;
pub mod memory;
pub mod traits;

pub use error::{StoreError, StoreResult};
pub use file::FileChainStore;
pub use memory::InMemoryChainStore;
pub use traits::ChainStore;
