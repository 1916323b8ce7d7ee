use pvl_digest::DigestEngine;
use pvl_types::ChainRecord;

use crate::error::LedgerError;

/// Result of a chain integrity verification pass.
///
/// An invalid chain is a normal, expected result of verification, not a
/// fault in the running process — callers decide whether it is fatal to
/// their workflow. The ledger never repairs what verification finds.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IntegrityReport {
    /// Number of records the pass examined.
    pub records_checked: u64,
    /// Chain position (1-based) of the first failing record, if any.
    pub first_broken_at: Option<u64>,
    /// Every violation found, in chain order.
    pub violations: Vec<Violation>,
}

impl IntegrityReport {
    /// Returns `true` if the whole chain passed every check.
    pub fn is_valid(&self) -> bool {
        self.violations.is_empty()
    }
}

/// A specific integrity violation detected during verification.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Violation {
    /// Chain position (1-based) of the offending record.
    pub sequence: u64,
    pub kind: ViolationKind,
    pub description: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ViolationKind {
    /// Stored sequence number does not match the record's position.
    SequenceBreak,
    /// First record does not link to the genesis sentinel.
    GenesisLink,
    /// `previous_link_hash` does not match the predecessor's `link_hash`.
    LinkBreak,
    /// Stored `link_hash` does not match the recomputed self-hash.
    HashMismatch,
}

/// Single-pass chain integrity verifier.
///
/// Walks the records once in order. For every record it recomputes the
/// self-hash from the record's own fields and compares it to the stored
/// `link_hash`, and confirms `previous_link_hash` equals the predecessor's
/// stored `link_hash` (the genesis sentinel for the first record). O(N):
/// verification never rehashes prior history per record.
pub struct ChainVerifier;

impl ChainVerifier {
    /// Verify a chain of records in ascending order.
    pub fn verify(records: &[ChainRecord]) -> Result<IntegrityReport, LedgerError> {
        let mut violations = Vec::new();

        for (index, record) in records.iter().enumerate() {
            let position = (index + 1) as u64;

            if record.sequence != position {
                violations.push(Violation {
                    sequence: position,
                    kind: ViolationKind::SequenceBreak,
                    description: format!(
                        "expected sequence {position}, found {}",
                        record.sequence
                    ),
                });
            }

            if index == 0 {
                if !record.previous_link_hash.is_genesis() {
                    violations.push(Violation {
                        sequence: position,
                        kind: ViolationKind::GenesisLink,
                        description: "first record does not link to the genesis sentinel".into(),
                    });
                }
            } else if record.previous_link_hash != records[index - 1].link_hash {
                violations.push(Violation {
                    sequence: position,
                    kind: ViolationKind::LinkBreak,
                    description: "previous link does not match predecessor's link hash".into(),
                });
            }

            let recomputed = DigestEngine::fingerprint(&record.link_material())?;
            if recomputed != record.link_hash {
                violations.push(Violation {
                    sequence: position,
                    kind: ViolationKind::HashMismatch,
                    description: "stored link hash does not match recomputed self-hash".into(),
                });
            }
        }

        Ok(IntegrityReport {
            records_checked: records.len() as u64,
            first_broken_at: violations.first().map(|v| v.sequence),
            violations,
        })
    }
}
