use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TypeError;

/// Kind of custody event recorded in the ledger.
///
/// This is a closed set: the ledger rejects anything outside it at the
/// type boundary. Wire names match the persisted record format.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventKind {
    /// A batch entered the system.
    #[serde(rename = "BATCH_CREATE")]
    BatchCreate,
    /// A party recomputed and compared the batch metadata fingerprint.
    #[serde(rename = "BATCH_VERIFY")]
    BatchVerify,
    /// Custody of a batch moved to another party.
    #[serde(rename = "TRANSFER")]
    Transfer,
}

impl EventKind {
    /// The wire name of this kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::BatchCreate => "BATCH_CREATE",
            Self::BatchVerify => "BATCH_VERIFY",
            Self::Transfer => "TRANSFER",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EventKind {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "BATCH_CREATE" => Ok(Self::BatchCreate),
            "BATCH_VERIFY" => Ok(Self::BatchVerify),
            "TRANSFER" => Ok(Self::Transfer),
            other => Err(TypeError::UnknownKind(other.to_string())),
        }
    }
}

/// Event-specific detail carried by a ledger record.
///
/// Payload shapes form a closed set keyed by [`EventKind`], so malformed
/// events fail at the boundary rather than at read time. Each shape
/// carries the opaque batch identifier the event concerns — the ledger
/// itself knows nothing about batches beyond this reference.
///
/// Serialized untagged: the wire form is a flat JSON object
/// (e.g. `{"batchId":"…","farmerId":"…"}`), matching the persisted
/// record format.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EventPayload {
    /// Payload of a `BATCH_CREATE` event.
    #[serde(rename_all = "camelCase")]
    BatchCreated { batch_id: String, farmer_id: String },
    /// Payload of a `BATCH_VERIFY` event.
    #[serde(rename_all = "camelCase")]
    BatchVerified {
        batch_id: String,
        verifier_id: String,
        matched: bool,
    },
    /// Payload of a `TRANSFER` event.
    #[serde(rename_all = "camelCase")]
    Transferred { batch_id: String, to: String },
}

impl EventPayload {
    /// The event kind this payload shape belongs to.
    pub fn kind(&self) -> EventKind {
        match self {
            Self::BatchCreated { .. } => EventKind::BatchCreate,
            Self::BatchVerified { .. } => EventKind::BatchVerify,
            Self::Transferred { .. } => EventKind::Transfer,
        }
    }

    /// The opaque identifier of the subject this event concerns.
    pub fn subject_ref(&self) -> &str {
        match self {
            Self::BatchCreated { batch_id, .. }
            | Self::BatchVerified { batch_id, .. }
            | Self::Transferred { batch_id, .. } => batch_id,
        }
    }
}
