//! Catalog builder: fetches creature records from PokeAPI (or the built-in
//! offline dataset), attaches coefficients, events and links, and writes the
//! catalog document that `pogo-trade` serves.

pub mod builder;
pub mod config;
pub mod error;
pub mod sources;
pub mod writer;

use std::path::Path;

use chrono::Utc;
use pogo_models::Catalog;

pub use builder::{assemble, build_catalog, default_events, default_links};
pub use config::SyncConfig;
pub use error::SyncError;
pub use sources::{CreatureSource, OfflineSource, PokeApiSource};
pub use writer::write_catalog;

/// Build a catalog per `config` and write it to `config.output_path`.
pub async fn sync(config: &SyncConfig) -> Result<Catalog, SyncError> {
    config.validate()?;

    let offline: &dyn CreatureSource = &OfflineSource;
    let catalog = if config.offline_only {
        build_catalog(offline, None, Utc::now()).await?
    } else {
        let online = PokeApiSource::from_config(config)?;
        build_catalog(&online, Some(offline), Utc::now()).await?
    };

    write_catalog(Path::new(&config.output_path), &catalog).await?;
    Ok(catalog)
}
