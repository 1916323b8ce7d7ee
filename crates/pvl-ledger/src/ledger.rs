use std::sync::Mutex;

use pvl_digest::DigestEngine;
use pvl_store::ChainStore;
use pvl_types::{ChainRecord, EventKind, EventPayload, EventTime, Fingerprint};
use tracing::debug;

use crate::error::LedgerError;
use crate::verify::{ChainVerifier, IntegrityReport};

/// The append-only custody ledger.
///
/// A `Ledger` exclusively owns the record sequence in its injected
/// [`ChainStore`]; no other component writes to the store. Appends are
/// linearized: the read-head → assign-sequence → persist critical section
/// runs under a single lock, so two concurrent appends can never compute
/// the same sequence number or the same previous link — the one
/// correctness-critical concurrency hazard in the system. Reads take no
/// lock against each other and observe consistent snapshots via the
/// store's own guarantees.
///
/// Each append is O(1) beyond the single read of the last record: linkage
/// uses the predecessor's already-computed self-hash, never a hash of the
/// whole history, and earlier records are never rehashed.
pub struct Ledger<S: ChainStore> {
    store: S,
    append_lock: Mutex<()>,
}

impl<S: ChainStore> Ledger<S> {
    /// Create a ledger over an injected store.
    pub fn new(store: S) -> Self {
        Self {
            store,
            append_lock: Mutex::new(()),
        }
    }

    /// Append one custody event to the chain.
    ///
    /// `kind` must agree with the payload's shape; `content_fingerprint`
    /// must be a well-formed digest fingerprint (format-checked only —
    /// whether it matches the caller's data is the caller's
    /// responsibility). The ledger assigns the sequence number, the
    /// monotonic timestamp, the previous link, and the record's own
    /// `link_hash` before persisting the record as a single atomic unit.
    ///
    /// A failed append consumes no sequence number and is safe to retry.
    pub fn append(
        &self,
        kind: EventKind,
        content_fingerprint: Fingerprint,
        payload: EventPayload,
    ) -> Result<ChainRecord, LedgerError> {
        if payload.kind() != kind {
            return Err(LedgerError::KindMismatch {
                expected: kind,
                actual: payload.kind(),
            });
        }
        if !content_fingerprint.is_digest() {
            return Err(LedgerError::MalformedFingerprint(
                content_fingerprint.to_string(),
            ));
        }

        let _guard = self
            .append_lock
            .lock()
            .map_err(|_| LedgerError::StoreUnavailable("ledger append lock poisoned".into()))?;

        let head = self.store.head()?;
        let (sequence, previous_link_hash, floor) = match &head {
            Some(last) => (last.sequence + 1, last.link_hash.clone(), last.timestamp),
            None => (1, Fingerprint::genesis(), EventTime::zero()),
        };
        let timestamp = EventTime::now().at_or_after(floor);

        let mut record = ChainRecord {
            sequence,
            timestamp,
            kind,
            content_fingerprint,
            payload,
            previous_link_hash,
            // Placeholder until the self-hash is computed below.
            link_hash: Fingerprint::genesis(),
        };
        record.link_hash = DigestEngine::fingerprint(&record.link_material())?;

        self.store.append(&record)?;
        debug!(sequence, kind = %record.kind, subject = record.subject_ref(), "appended custody record");

        Ok(record)
    }

    /// All records in ascending sequence order.
    pub fn read_all(&self) -> Result<Vec<ChainRecord>, LedgerError> {
        Ok(self.store.read_all()?)
    }

    /// Records whose payload references the given subject, in ascending
    /// sequence order. Empty when nothing matches.
    pub fn find_by_subject(&self, subject_ref: &str) -> Result<Vec<ChainRecord>, LedgerError> {
        let mut records = self.store.read_all()?;
        records.retain(|r| r.subject_ref() == subject_ref);
        Ok(records)
    }

    /// The most recently appended record, if any.
    pub fn head(&self) -> Result<Option<ChainRecord>, LedgerError> {
        Ok(self.store.head()?)
    }

    /// Number of records in the chain.
    pub fn record_count(&self) -> Result<u64, LedgerError> {
        Ok(self.store.count()?)
    }

    /// Walk the full chain once and verify every record's linkage and
    /// self-hash. Integrity failures are reported, never repaired.
    pub fn verify_integrity(&self) -> Result<IntegrityReport, LedgerError> {
        let records = self.store.read_all()?;
        ChainVerifier::verify(&records)
    }
}
