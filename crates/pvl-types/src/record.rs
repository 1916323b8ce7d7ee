use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::event::{EventKind, EventPayload};
use crate::fingerprint::Fingerprint;
use crate::temporal::EventTime;

/// One immutable, hash-linked entry in the custody ledger.
///
/// A record is created exactly once by the ledger's append operation and
/// never mutated or deleted afterwards. `sequence` values are assigned by
/// the ledger — contiguous from 1, never by the caller.
///
/// Two fingerprints live side by side:
///
/// - `content_fingerprint` — supplied by the caller, covering the business
///   data the event refers to. The ledger format-checks it but never
///   recomputes it.
/// - `link_hash` — computed by the ledger over this record's own fields
///   (everything except `link_hash` itself). It becomes the next record's
///   `previous_link_hash`, chaining the sequence; the first record links
///   to the genesis sentinel `0x0`.
///
/// The JSON encoding with camelCase keys is the portable persisted format.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChainRecord {
    pub sequence: u64,
    pub timestamp: EventTime,
    pub kind: EventKind,
    pub content_fingerprint: Fingerprint,
    pub payload: EventPayload,
    pub previous_link_hash: Fingerprint,
    pub link_hash: Fingerprint,
}

impl ChainRecord {
    /// The opaque subject identifier carried in the payload.
    pub fn subject_ref(&self) -> &str {
        self.payload.subject_ref()
    }

    /// The fields covered by `link_hash`, as a JSON value.
    ///
    /// This is the exact input to the link fingerprint: every field except
    /// `link_hash` itself, under the wire key names. Recomputing the
    /// fingerprint of this value must reproduce the stored `link_hash`.
    pub fn link_material(&self) -> Value {
        serde_json::json!({
            "sequence": self.sequence,
            "timestamp": self.timestamp,
            "kind": self.kind,
            "contentFingerprint": self.content_fingerprint,
            "payload": self.payload,
            "previousLinkHash": self.previous_link_hash,
        })
    }
}
