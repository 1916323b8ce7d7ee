use pvl_types::ChainRecord;

use crate::error::StoreResult;

/// Append-only chain record store.
///
/// All implementations must satisfy these invariants:
/// - Records are immutable once appended; there is no update or delete.
/// - `append` is atomic: either the record is fully persisted or the
///   store is unchanged. A failed append consumes nothing and is safe to
///   retry.
/// - `read_all` returns records in insertion order, and reads observe a
///   consistent snapshot — never a torn, half-written record.
/// - The store never interprets record contents; sequence and linkage
///   rules belong to the ledger, which is the store's only writer.
/// - All I/O errors are propagated, never silently ignored.
pub trait ChainStore: Send + Sync {
    /// The most recently appended record, if any.
    fn head(&self) -> StoreResult<Option<ChainRecord>>;

    /// Persist one record at the end of the chain.
    fn append(&self, record: &ChainRecord) -> StoreResult<()>;

    /// All records in insertion order.
    fn read_all(&self) -> StoreResult<Vec<ChainRecord>>;

    /// Number of persisted records.
    fn count(&self) -> StoreResult<u64>;
}
