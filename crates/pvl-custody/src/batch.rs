use std::fmt;

use serde::{Deserialize, Serialize};

use pvl_types::{EventTime, Fingerprint};

/// Business metadata describing a batch.
///
/// This is the mutable, caller-owned data the ledger content-addresses:
/// its fingerprint goes into the `BATCH_CREATE` record, so any later
/// party can recompute and compare.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchMetadata {
    pub crop: String,
    pub quantity: String,
    pub harvest_date: String,
    pub geo: String,
}

/// Custody lifecycle state of a batch.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum BatchStatus {
    #[serde(rename = "CREATED")]
    Created,
    #[serde(rename = "IN_TRANSIT")]
    InTransit,
    #[serde(rename = "VERIFIED")]
    Verified,
    #[serde(rename = "DELIVERED")]
    Delivered,
}

impl fmt::Display for BatchStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Created => "CREATED",
            Self::InTransit => "IN_TRANSIT",
            Self::Verified => "VERIFIED",
            Self::Delivered => "DELIVERED",
        };
        f.write_str(s)
    }
}

/// A tracked batch — the subject entity custody events concern.
///
/// Lives entirely in the workflow layer; the ledger only ever sees the
/// opaque `id` inside payloads and the metadata fingerprint.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Batch {
    pub id: String,
    pub farmer_id: String,
    pub metadata: BatchMetadata,
    pub metadata_fingerprint: Fingerprint,
    pub current_owner: String,
    pub status: BatchStatus,
    pub created_at: EventTime,
}
