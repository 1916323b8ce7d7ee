use std::fs::{self, File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, RwLock};

use pvl_types::ChainRecord;
use tracing::{debug, warn};

use crate::error::{StoreError, StoreResult};
use crate::traits::ChainStore;

/// Durable chain store backed by a single append-only JSON-lines segment.
///
/// On-disk format: one record per line in the portable JSON wire format.
/// Each append writes one full line and flushes before the record becomes
/// visible to readers, so a crash can tear at most the final line. On open
/// the segment is read front-to-back; an unparsable final line is an
/// incomplete write from a crash and is truncated away with a warning. An
/// unparsable line anywhere else is corruption and fails the open.
pub struct FileChainStore {
    path: PathBuf,
    writer: Mutex<BufWriter<File>>,
    records: RwLock<Vec<ChainRecord>>,
}

impl FileChainStore {
    /// Open (or create) a chain segment file at the given path.
    pub fn open(path: &Path) -> StoreResult<Self> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let (records, valid_len) = Self::recover(path)?;

        let file = OpenOptions::new()
            .create(true)
            .read(true)
            .append(true)
            .open(path)?;
        if file.metadata()?.len() > valid_len {
            // Drop the torn tail so the next append starts on a clean line.
            file.set_len(valid_len)?;
        }

        debug!(path = %path.display(), records = records.len(), "opened chain segment");

        Ok(Self {
            path: path.to_path_buf(),
            writer: Mutex::new(BufWriter::new(file)),
            records: RwLock::new(records),
        })
    }

    /// Read a segment front-to-back, returning the recovered records and
    /// the byte length of the valid prefix.
    fn recover(path: &Path) -> StoreResult<(Vec<ChainRecord>, u64)> {
        if !path.exists() {
            return Ok((Vec::new(), 0));
        }

        let content = fs::read_to_string(path)?;
        let segments: Vec<&str> = content.split_inclusive('\n').collect();
        let mut records = Vec::new();
        let mut valid_len = 0u64;

        for (index, segment) in segments.iter().enumerate() {
            let line = segment.trim_end_matches(['\n', '\r']);
            if line.is_empty() {
                valid_len += segment.len() as u64;
                continue;
            }
            match serde_json::from_str::<ChainRecord>(line) {
                Ok(record) => {
                    records.push(record);
                    valid_len += segment.len() as u64;
                }
                Err(e) if index == segments.len() - 1 => {
                    warn!(path = %path.display(), "skipping torn tail entry: {e}");
                    break;
                }
                Err(e) => {
                    return Err(StoreError::CorruptSegment {
                        line: index + 1,
                        reason: e.to_string(),
                    });
                }
            }
        }

        Ok((records, valid_len))
    }

    /// Path of the underlying segment file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ChainStore for FileChainStore {
    fn head(&self) -> StoreResult<Option<ChainRecord>> {
        let records = self.records.read().expect("lock poisoned");
        Ok(records.last().cloned())
    }

    fn append(&self, record: &ChainRecord) -> StoreResult<()> {
        let line = serde_json::to_string(record)
            .map_err(|e| StoreError::Serialization(e.to_string()))?;

        {
            let mut writer = self.writer.lock().expect("segment writer poisoned");
            writer.write_all(line.as_bytes())?;
            writer.write_all(b"\n")?;
            writer.flush()?;
        }

        // Only a fully flushed record becomes visible; a failed write
        // above leaves the cache untouched and recovery truncates the
        // torn line on the next open.
        self.records
            .write()
            .expect("lock poisoned")
            .push(record.clone());

        debug!(sequence = record.sequence, "appended record to segment");
        Ok(())
    }

    fn read_all(&self) -> StoreResult<Vec<ChainRecord>> {
        let records = self.records.read().expect("lock poisoned");
        Ok(records.clone())
    }

    fn count(&self) -> StoreResult<u64> {
        let records = self.records.read().expect("lock poisoned");
        Ok(records.len() as u64)
    }
}

impl std::fmt::Debug for FileChainStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let count = self.records.read().expect("lock poisoned").len();
        f.debug_struct("FileChainStore")
            .field("path", &self.path)
            .field("record_count", &count)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pvl_types::{EventKind, EventPayload, EventTime, Fingerprint};

    fn record(sequence: u64) -> ChainRecord {
        ChainRecord {
            sequence,
            timestamp: EventTime::from_millis(1000 + sequence),
            kind: EventKind::Transfer,
            content_fingerprint: Fingerprint::from_digest([sequence as u8; 32]),
            payload: EventPayload::Transferred {
                batch_id: format!("batch-{sequence}"),
                to: "dist-1".into(),
            },
            previous_link_hash: Fingerprint::genesis(),
            link_hash: Fingerprint::from_digest([0xaa; 32]),
        }
    }

    #[test]
    fn open_creates_empty_segment() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileChainStore::open(&dir.path().join("chain.jsonl")).unwrap();
        assert_eq!(store.count().unwrap(), 0);
        assert!(store.head().unwrap().is_none());
    }

    #[test]
    fn records_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("chain.jsonl");

        {
            let store = FileChainStore::open(&path).unwrap();
            store.append(&record(1)).unwrap();
            store.append(&record(2)).unwrap();
        }

        let store = FileChainStore::open(&path).unwrap();
        let all = store.read_all().unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0], record(1));
        assert_eq!(all[1], record(2));
        assert_eq!(store.head().unwrap().unwrap().sequence, 2);
    }

    #[test]
    fn torn_tail_is_truncated_on_open() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("chain.jsonl");

        {
            let store = FileChainStore::open(&path).unwrap();
            store.append(&record(1)).unwrap();
        }
        // Simulate a crash mid-write: a partial line with no newline.
        let mut content = fs::read_to_string(&path).unwrap();
        content.push_str("{\"sequence\":2,\"time");
        fs::write(&path, &content).unwrap();

        let store = FileChainStore::open(&path).unwrap();
        assert_eq!(store.count().unwrap(), 1);

        // The truncated segment accepts new appends cleanly.
        store.append(&record(2)).unwrap();
        drop(store);

        let store = FileChainStore::open(&path).unwrap();
        let all = store.read_all().unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[1].sequence, 2);
    }

    #[test]
    fn corrupt_interior_line_fails_open() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("chain.jsonl");

        let valid = serde_json::to_string(&record(1)).unwrap();
        fs::write(&path, format!("not json at all\n{valid}\n")).unwrap();

        let err = FileChainStore::open(&path).unwrap_err();
        match err {
            StoreError::CorruptSegment { line, .. } => assert_eq!(line, 1),
            other => panic!("expected CorruptSegment, got {other:?}"),
        }
    }

    #[test]
    fn blank_lines_are_tolerated() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("chain.jsonl");

        let valid = serde_json::to_string(&record(1)).unwrap();
        fs::write(&path, format!("{valid}\n\n")).unwrap();

        let store = FileChainStore::open(&path).unwrap();
        assert_eq!(store.count().unwrap(), 1);
    }
}
