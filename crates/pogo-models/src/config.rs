use serde::{Deserialize, Serialize};

/// Top-level configuration for the pogo-trade service.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct PogoConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub catalog: CatalogConfig,
    #[serde(default)]
    pub valuation: ValuationConfig,
}

/// HTTP listener settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ServerConfig {
    /// Socket address to listen on.
    pub bind: String,
    /// Directory with the static front-end; unknown paths fall back to its `index.html`.
    pub public_dir: String,
    /// Largest accepted request body. Larger bodies are rejected with 413.
    pub max_body_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: "0.0.0.0:3000".to_string(),
            public_dir: "public".to_string(),
            max_body_bytes: 1_000_000,
        }
    }
}

/// Where the catalog document lives and how parsed snapshots are kept.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CatalogConfig {
    /// Path to the catalog JSON written by `pogo-sync`.
    pub path: String,
    /// Maximum number of parsed snapshots kept in memory.
    pub snapshot_capacity: u64,
    /// How long an idle parsed snapshot stays in memory.
    pub snapshot_ttl_seconds: u64,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            path: "data/pokemon-go-db.json".to_string(),
            snapshot_capacity: 4,
            snapshot_ttl_seconds: 300,
        }
    }
}

/// Language used for verdict labels and explanations.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    En,
    He,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ValuationConfig {
    pub locale: Locale,
}
