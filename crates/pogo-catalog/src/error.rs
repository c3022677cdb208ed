use thiserror::Error;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Catalog not readable at {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Catalog JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid catalog: {0}")]
    Invalid(String),
}

impl CatalogError {
    /// True when the catalog file does not exist (the builder has not run yet).
    pub fn is_not_found(&self) -> bool {
        matches!(self, CatalogError::Io { source, .. } if source.kind() == std::io::ErrorKind::NotFound)
    }
}
