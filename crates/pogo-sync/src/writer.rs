use std::path::{Path, PathBuf};

use pogo_models::Catalog;
use tracing::info;

use crate::error::SyncError;

/// Write `catalog` as pretty JSON, atomically.
///
/// The document goes to a temporary file next to `path` and is renamed over it,
/// so a concurrent reader sees either the old file or the new one.
pub async fn write_catalog(path: &Path, catalog: &Catalog) -> Result<(), SyncError> {
    let json = serde_json::to_vec_pretty(catalog)?;

    let tmp = temp_path(path)?;
    if let Some(dir) = tmp.parent() {
        tokio::fs::create_dir_all(dir).await?;
    }

    tokio::fs::write(&tmp, &json).await?;
    if let Err(e) = tokio::fs::rename(&tmp, path).await {
        let _ = tokio::fs::remove_file(&tmp).await;
        return Err(e.into());
    }

    info!(path = %path.display(), bytes = json.len(), "Catalog written");
    Ok(())
}

fn temp_path(path: &Path) -> Result<PathBuf, SyncError> {
    let file_name = path.file_name().ok_or_else(|| {
        SyncError::Config(format!("output path has no file name: {}", path.display()))
    })?;
    let tmp_name = format!(".{}.{}.tmp", file_name.to_string_lossy(), std::process::id());
    Ok(path.with_file_name(tmp_name))
}
