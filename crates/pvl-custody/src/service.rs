use std::collections::HashMap;
use std::sync::RwLock;

use serde::Serialize;
use tracing::debug;
use uuid::Uuid;

use pvl_digest::DigestEngine;
use pvl_ledger::Ledger;
use pvl_store::ChainStore;
use pvl_types::{ChainRecord, EventKind, EventPayload, EventTime, Fingerprint};

use crate::batch::{Batch, BatchMetadata, BatchStatus};
use crate::error::CustodyError;

/// Content-addressed detail of a custody transfer.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct TransferDetails<'a> {
    batch_id: &'a str,
    to: &'a str,
}

/// Outcome of a batch verification check.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VerificationOutcome {
    /// Whether the recomputed fingerprint matches the recorded one.
    pub matched: bool,
    /// Fingerprint recomputed from the batch's current metadata.
    pub recomputed: Fingerprint,
    /// Fingerprint recorded in the batch's `BATCH_CREATE` ledger entry.
    pub recorded: Fingerprint,
    /// The `BATCH_VERIFY` record this check appended.
    pub record: ChainRecord,
}

/// High-level custody workflow over a ledger.
///
/// Owns the batch registry (the subject entities) and the ledger, and
/// turns each business action into exactly one appended custody event.
pub struct CustodyService<S: ChainStore> {
    ledger: Ledger<S>,
    batches: RwLock<HashMap<String, Batch>>,
}

impl<S: ChainStore> CustodyService<S> {
    /// Create a service over an injected ledger.
    pub fn new(ledger: Ledger<S>) -> Self {
        Self {
            ledger,
            batches: RwLock::new(HashMap::new()),
        }
    }

    /// Register a new batch: fingerprint its metadata and append the
    /// `BATCH_CREATE` event. The farmer starts as custody holder.
    pub fn register_batch(
        &self,
        farmer_id: &str,
        metadata: BatchMetadata,
    ) -> Result<(Batch, ChainRecord), CustodyError> {
        let metadata_fingerprint = DigestEngine::fingerprint(&metadata)?;
        let batch = Batch {
            id: Uuid::now_v7().simple().to_string(),
            farmer_id: farmer_id.to_string(),
            metadata,
            metadata_fingerprint: metadata_fingerprint.clone(),
            current_owner: farmer_id.to_string(),
            status: BatchStatus::Created,
            created_at: EventTime::now(),
        };

        let record = self.ledger.append(
            EventKind::BatchCreate,
            metadata_fingerprint,
            EventPayload::BatchCreated {
                batch_id: batch.id.clone(),
                farmer_id: farmer_id.to_string(),
            },
        )?;

        self.batches
            .write()
            .expect("lock poisoned")
            .insert(batch.id.clone(), batch.clone());

        debug!(batch = %batch.id, farmer = farmer_id, "registered batch");
        Ok((batch, record))
    }

    /// Recompute the metadata fingerprint of a batch and compare it to
    /// the one recorded at creation, appending a `BATCH_VERIFY` event
    /// with the outcome. A match marks the batch VERIFIED; a mismatch is
    /// reported, never repaired.
    pub fn verify_batch(
        &self,
        batch_id: &str,
        verifier_id: &str,
    ) -> Result<VerificationOutcome, CustodyError> {
        let batch = self.require_batch(batch_id)?;

        // Compare against the fingerprint the chain recorded, not the
        // registry's copy: the ledger entry is the tamper-evident one.
        let recorded = self
            .ledger
            .find_by_subject(batch_id)?
            .into_iter()
            .find(|r| r.kind == EventKind::BatchCreate)
            .map(|r| r.content_fingerprint)
            .ok_or_else(|| CustodyError::UnknownBatch(batch_id.to_string()))?;

        let recomputed = DigestEngine::fingerprint(&batch.metadata)?;
        let matched = recomputed == recorded;

        let record = self.ledger.append(
            EventKind::BatchVerify,
            recomputed.clone(),
            EventPayload::BatchVerified {
                batch_id: batch_id.to_string(),
                verifier_id: verifier_id.to_string(),
                matched,
            },
        )?;

        if matched {
            self.with_batch(batch_id, |b| b.status = BatchStatus::Verified)?;
        }

        debug!(batch = batch_id, verifier = verifier_id, matched, "verified batch");
        Ok(VerificationOutcome {
            matched,
            recomputed,
            recorded,
            record,
        })
    }

    /// Move custody of a batch to another party, appending a `TRANSFER`
    /// event whose content fingerprint covers the transfer details.
    pub fn transfer_custody(
        &self,
        batch_id: &str,
        to: &str,
    ) -> Result<ChainRecord, CustodyError> {
        self.require_batch(batch_id)?;

        let details_fingerprint = DigestEngine::fingerprint(&TransferDetails { batch_id, to })?;
        let record = self.ledger.append(
            EventKind::Transfer,
            details_fingerprint,
            EventPayload::Transferred {
                batch_id: batch_id.to_string(),
                to: to.to_string(),
            },
        )?;

        self.with_batch(batch_id, |b| {
            b.current_owner = to.to_string();
            b.status = BatchStatus::InTransit;
        })?;

        debug!(batch = batch_id, to, "transferred custody");
        Ok(record)
    }

    /// Confirm receipt of a batch in transit. Entity-level state only:
    /// the custody movement itself is already on the ledger as the
    /// `TRANSFER` event.
    pub fn confirm_delivery(&self, batch_id: &str) -> Result<Batch, CustodyError> {
        let batch = self.require_batch(batch_id)?;
        if batch.status != BatchStatus::InTransit {
            return Err(CustodyError::NotInTransit(batch_id.to_string()));
        }
        self.with_batch(batch_id, |b| b.status = BatchStatus::Delivered)?;
        self.require_batch(batch_id)
    }

    /// Replace a batch's metadata (e.g. a correction before shipment).
    /// Deliberately does not touch the recorded fingerprint: a later
    /// `verify_batch` will report the drift.
    pub fn update_metadata(
        &self,
        batch_id: &str,
        metadata: BatchMetadata,
    ) -> Result<Batch, CustodyError> {
        self.with_batch(batch_id, |b| b.metadata = metadata)?;
        self.require_batch(batch_id)
    }

    /// Look up a batch by id.
    pub fn batch(&self, batch_id: &str) -> Option<Batch> {
        self.batches
            .read()
            .expect("lock poisoned")
            .get(batch_id)
            .cloned()
    }

    /// The full custody trail of a batch, in ledger order.
    pub fn batch_history(&self, batch_id: &str) -> Result<Vec<ChainRecord>, CustodyError> {
        Ok(self.ledger.find_by_subject(batch_id)?)
    }

    /// The underlying ledger, for inspection surfaces.
    pub fn ledger(&self) -> &Ledger<S> {
        &self.ledger
    }

    fn require_batch(&self, batch_id: &str) -> Result<Batch, CustodyError> {
        self.batch(batch_id)
            .ok_or_else(|| CustodyError::UnknownBatch(batch_id.to_string()))
    }

    fn with_batch(
        &self,
        batch_id: &str,
        update: impl FnOnce(&mut Batch),
    ) -> Result<(), CustodyError> {
        let mut batches = self.batches.write().expect("lock poisoned");
        let batch = batches
            .get_mut(batch_id)
            .ok_or_else(|| CustodyError::UnknownBatch(batch_id.to_string()))?;
        update(batch);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use pvl_store::InMemoryChainStore;

    use super::*;

    fn metadata() -> BatchMetadata {
        BatchMetadata {
            crop: "wheat".into(),
            quantity: "500".into(),
            harvest_date: "2026-07-01".into(),
            geo: "47.37,8.54".into(),
        }
    }

    fn service() -> CustodyService<InMemoryChainStore> {
        CustodyService::new(Ledger::new(InMemoryChainStore::new()))
    }

    #[test]
    fn register_appends_create_event() {
        let service = service();
        let (batch, record) = service.register_batch("farmer-1", metadata()).unwrap();

        assert_eq!(batch.status, BatchStatus::Created);
        assert_eq!(batch.current_owner, "farmer-1");
        assert_eq!(record.sequence, 1);
        assert_eq!(record.kind, EventKind::BatchCreate);
        assert_eq!(record.content_fingerprint, batch.metadata_fingerprint);
        assert_eq!(record.subject_ref(), batch.id);
    }

    #[test]
    fn verify_matches_untouched_metadata() {
        let service = service();
        let (batch, _) = service.register_batch("farmer-1", metadata()).unwrap();

        let outcome = service.verify_batch(&batch.id, "validator-1").unwrap();
        assert!(outcome.matched);
        assert_eq!(outcome.recomputed, outcome.recorded);
        assert_eq!(outcome.record.kind, EventKind::BatchVerify);
        assert_eq!(
            service.batch(&batch.id).unwrap().status,
            BatchStatus::Verified
        );
    }

    #[test]
    fn verify_detects_metadata_drift() {
        let service = service();
        let (batch, _) = service.register_batch("farmer-1", metadata()).unwrap();

        let mut changed = metadata();
        changed.quantity = "400".into();
        service.update_metadata(&batch.id, changed).unwrap();

        let outcome = service.verify_batch(&batch.id, "validator-1").unwrap();
        assert!(!outcome.matched);
        assert_ne!(outcome.recomputed, outcome.recorded);
        // A failed check never promotes the batch.
        assert_eq!(
            service.batch(&batch.id).unwrap().status,
            BatchStatus::Created
        );
        match &outcome.record.payload {
            EventPayload::BatchVerified { matched, .. } => assert!(!*matched),
            other => panic!("unexpected payload {other:?}"),
        }
    }

    #[test]
    fn transfer_moves_custody() {
        let service = service();
        let (batch, _) = service.register_batch("farmer-1", metadata()).unwrap();

        let record = service.transfer_custody(&batch.id, "dist-1").unwrap();
        assert_eq!(record.kind, EventKind::Transfer);

        let updated = service.batch(&batch.id).unwrap();
        assert_eq!(updated.current_owner, "dist-1");
        assert_eq!(updated.status, BatchStatus::InTransit);
    }

    #[test]
    fn delivery_requires_transit() {
        let service = service();
        let (batch, _) = service.register_batch("farmer-1", metadata()).unwrap();

        let err = service.confirm_delivery(&batch.id).unwrap_err();
        assert!(matches!(err, CustodyError::NotInTransit(_)));

        service.transfer_custody(&batch.id, "dist-1").unwrap();
        let delivered = service.confirm_delivery(&batch.id).unwrap();
        assert_eq!(delivered.status, BatchStatus::Delivered);
    }

    #[test]
    fn unknown_batch_is_an_error() {
        let service = service();
        assert!(matches!(
            service.verify_batch("missing", "v").unwrap_err(),
            CustodyError::UnknownBatch(_)
        ));
        assert!(matches!(
            service.transfer_custody("missing", "d").unwrap_err(),
            CustodyError::UnknownBatch(_)
        ));
        assert!(service.batch("missing").is_none());
    }

    #[test]
    fn lifecycle_builds_one_valid_chain() {
        let service = service();
        let (batch, _) = service.register_batch("farmer-1", metadata()).unwrap();
        service.verify_batch(&batch.id, "validator-1").unwrap();
        service.transfer_custody(&batch.id, "dist-1").unwrap();

        let trail = service.batch_history(&batch.id).unwrap();
        assert_eq!(trail.len(), 3);
        assert_eq!(
            trail.iter().map(|r| r.kind).collect::<Vec<_>>(),
            vec![
                EventKind::BatchCreate,
                EventKind::BatchVerify,
                EventKind::Transfer
            ]
        );

        let report = service.ledger().verify_integrity().unwrap();
        assert!(report.is_valid());
    }
}
