pub mod offline;
pub mod pokeapi;

use async_trait::async_trait;
use pogo_models::CreatureRecord;

use crate::error::SyncError;

pub use offline::OfflineSource;
pub use pokeapi::PokeApiSource;

/// A provider of creature records for the catalog builder.
#[async_trait]
pub trait CreatureSource: Send + Sync {
    /// Short identifier used in logs.
    fn name(&self) -> &str;

    /// Provenance recorded in the catalog metadata.
    fn description(&self) -> &str;

    async fn fetch(&self) -> Result<Vec<CreatureRecord>, SyncError>;
}

/// `"bulbasaur"` -> `"Bulbasaur"`.
pub(crate) fn display_name(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
