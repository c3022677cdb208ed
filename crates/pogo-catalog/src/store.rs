use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use pogo_models::{Catalog, CatalogConfig};
use tracing::{debug, info};

use crate::error::CatalogError;
use crate::memory::{Fingerprint, SnapshotCache};
use crate::validate::validate;

/// Read-only access to the catalog file written by the catalog builder.
///
/// Every call to [`CatalogStore::snapshot`] checks the file on disk, so a
/// rewritten catalog is picked up by the next request. Parsing is skipped when
/// the file is unchanged. Callers hold the returned `Arc` for the whole
/// evaluation; it is never mutated.
pub struct CatalogStore {
    path: PathBuf,
    snapshots: SnapshotCache,
}

impl CatalogStore {
    pub fn new(path: impl Into<PathBuf>, max_snapshots: u64, snapshot_ttl: Duration) -> Self {
        Self {
            path: path.into(),
            snapshots: SnapshotCache::new(max_snapshots, snapshot_ttl),
        }
    }

    pub fn from_config(config: &CatalogConfig) -> Self {
        Self::new(
            &config.path,
            config.snapshot_capacity,
            Duration::from_secs(config.snapshot_ttl_seconds),
        )
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The current catalog snapshot.
    pub async fn snapshot(&self) -> Result<Arc<Catalog>, CatalogError> {
        let metadata = tokio::fs::metadata(&self.path)
            .await
            .map_err(|e| io_error(&self.path, e))?;
        let fingerprint = Fingerprint::from_metadata(self.path.clone(), &metadata);

        if let Some(catalog) = self.snapshots.get(&fingerprint).await {
            debug!(path = %self.path.display(), "Catalog snapshot reused");
            return Ok(catalog);
        }

        let catalog = Arc::new(load(&self.path).await?);
        info!(
            path = %self.path.display(),
            pokemon = catalog.pokemon.len(),
            "Catalog snapshot loaded"
        );
        self.snapshots.insert(fingerprint, Arc::clone(&catalog)).await;
        Ok(catalog)
    }

    /// Number of parsed snapshots currently held in memory.
    pub fn cached_snapshots(&self) -> u64 {
        self.snapshots.entry_count()
    }
}

/// Read, parse and validate a catalog file.
pub async fn load(path: &Path) -> Result<Catalog, CatalogError> {
    let raw = tokio::fs::read(path).await.map_err(|e| io_error(path, e))?;
    parse(&raw)
}

/// Parse and validate a catalog document.
pub fn parse(bytes: &[u8]) -> Result<Catalog, CatalogError> {
    let catalog: Catalog = serde_json::from_slice(bytes)?;
    validate(&catalog)?;
    Ok(catalog)
}

fn io_error(path: &Path, source: std::io::Error) -> CatalogError {
    CatalogError::Io {
        path: path.display().to_string(),
        source,
    }
}
