//! # Submission Log
//!
//! File-backed log of every submitted pairing.
//!
//! One JSON array in one file, nothing else. The file is the source of truth:
//! no in-memory copy survives between requests, so a restart cannot drift from
//! what is on disk. Every append re-reads the whole array, pushes one record,
//! and rewrites the whole array.
//!
//! ## Concurrency
//!
//! Two overlapping appends that both read the old array and then both write
//! would each persist an array missing the other's record. The whole
//! read-modify-write span therefore runs under one async mutex; appends are
//! strictly serialized within the process.
//!
//! The span also runs on its own spawned task rather than inside the caller's
//! future. Handler futures get dropped when the client disconnects; a record
//! that entered the critical section still lands on disk.
//!
//! The rewrite goes to a sibling `.tmp` file first and is renamed into place,
//! so a reader never sees a half-written array even if the process dies
//! mid-write.
//!
//! ## Limitations
//!
//! - The log only grows. No rotation, no TTL. Accepted for this dataset size.
//! - Appends have no idempotency key, so a retried request duplicates its
//!   record. Also accepted.

use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::{fs, sync::Mutex};

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Submission log I/O failure: {0}")]
    Io(#[from] std::io::Error),

    #[error("Submission log is not decodable: {0}")]
    Corrupt(serde_json::Error),

    #[error("Record has an empty required field")]
    InvalidRecord,
}

/// One submitted form, normalized. Key names are the on-disk format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionRecord {
    pub person1: String,
    pub person2: String,
    pub mode: String,
}

impl SubmissionRecord {
    pub fn is_complete(&self) -> bool {
        !self.person1.is_empty() && !self.person2.is_empty() && !self.mode.is_empty()
    }
}

pub struct SubmissionStore {
    inner: Arc<StoreInner>,
}

struct StoreInner {
    path: PathBuf,
    /// Guards the full read-modify-write span against the backing file.
    lock: Mutex<()>,
}

impl SubmissionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            inner: Arc::new(StoreInner {
                path: path.into(),
                lock: Mutex::new(()),
            }),
        }
    }

    /// Append one record to the end of the persisted log.
    ///
    /// A missing or empty file is an empty log; the first append creates it.
    /// Existing content that does not decode returns [`StoreError::Corrupt`]
    /// and leaves the file untouched rather than clobbering prior data.
    ///
    /// The critical section runs on its own task, so an accepted record
    /// reaches the file even if the calling future is dropped mid-write
    /// (client disconnect).
    pub async fn append(&self, record: SubmissionRecord) -> Result<(), StoreError> {
        if !record.is_complete() {
            return Err(StoreError::InvalidRecord);
        }

        let inner = self.inner.clone();
        tokio::spawn(async move { inner.append_locked(record).await })
            .await
            .map_err(|e| StoreError::Io(std::io::Error::other(e)))?
    }

    /// Snapshot of the full log, taken under the same lock as appends.
    pub async fn read_all(&self) -> Result<Vec<SubmissionRecord>, StoreError> {
        let _guard = self.inner.lock.lock().await;
        read_log(&self.inner.path).await
    }
}

impl StoreInner {
    async fn append_locked(&self, record: SubmissionRecord) -> Result<(), StoreError> {
        let _guard = self.lock.lock().await;

        let mut log = read_log(&self.path).await?;
        log.push(record);

        let encoded =
            serde_json::to_vec_pretty(&log).map_err(|e| StoreError::Io(e.into()))?;

        // Write-then-rename keeps the visible file a complete array at all
        // times.
        let tmp = tmp_path(&self.path);
        fs::write(&tmp, &encoded).await?;
        if let Err(e) = fs::rename(&tmp, &self.path).await {
            // Best effort, the next append overwrites it anyway.
            let _ = fs::remove_file(&tmp).await;
            return Err(StoreError::Io(e));
        }

        Ok(())
    }
}

async fn read_log(path: &Path) -> Result<Vec<SubmissionRecord>, StoreError> {
    let bytes = match fs::read(path).await {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(StoreError::Io(e)),
    };

    if bytes.is_empty() {
        return Ok(Vec::new());
    }

    serde_json::from_slice(&bytes).map_err(StoreError::Corrupt)
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    PathBuf::from(tmp)
}
