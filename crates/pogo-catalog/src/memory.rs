use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, SystemTime};

use moka::future::Cache;
use pogo_models::Catalog;

/// Identity of one on-disk version of the catalog file.
///
/// The builder replaces the file by rename, which always yields a new inode, so
/// a replaced file gets a new fingerprint even when its length and modification
/// time match the old one.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Fingerprint {
    pub path: PathBuf,
    pub len: u64,
    pub modified: Option<SystemTime>,
    /// Inode number; `None` on platforms without one.
    pub inode: Option<u64>,
}

impl Fingerprint {
    pub fn from_metadata(path: PathBuf, metadata: &std::fs::Metadata) -> Self {
        Self {
            path,
            len: metadata.len(),
            modified: metadata.modified().ok(),
            inode: inode(metadata),
        }
    }
}

#[cfg(unix)]
fn inode(metadata: &std::fs::Metadata) -> Option<u64> {
    use std::os::unix::fs::MetadataExt;
    Some(metadata.ino())
}

#[cfg(not(unix))]
fn inode(_metadata: &std::fs::Metadata) -> Option<u64> {
    None
}

/// Parsed catalog snapshots keyed by file fingerprint, backed by moka.
///
/// Idle snapshots are evicted after TTL.
pub struct SnapshotCache {
    inner: Cache<Fingerprint, Arc<Catalog>>,
}

impl SnapshotCache {
    pub fn new(max_capacity: u64, ttl: Duration) -> Self {
        Self {
            inner: Cache::builder()
                .max_capacity(max_capacity)
                .time_to_idle(ttl)
                .build(),
        }
    }

    pub async fn get(&self, key: &Fingerprint) -> Option<Arc<Catalog>> {
        self.inner.get(key).await
    }

    pub async fn insert(&self, key: Fingerprint, catalog: Arc<Catalog>) {
        self.inner.insert(key, catalog).await;
    }

    pub fn entry_count(&self) -> u64 {
        self.inner.entry_count()
    }
}
