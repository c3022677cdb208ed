use chrono::{DateTime, Duration, NaiveTime, Utc};
use pogo_models::{
    Catalog, CatalogMetadata, CreatureRecord, CreatureType, ExternalLink, GameEvent, TradeOptions,
};
use tracing::{info, warn};

use crate::error::SyncError;
use crate::sources::CreatureSource;

/// Build a catalog from `primary`, falling back to `fallback` if it fails.
///
/// The metadata `source` names the source that produced the records. The
/// result is validated before it is returned.
pub async fn build_catalog(
    primary: &dyn CreatureSource,
    fallback: Option<&dyn CreatureSource>,
    now: DateTime<Utc>,
) -> Result<Catalog, SyncError> {
    let (pokemon, source) = match primary.fetch().await {
        Ok(pokemon) => (pokemon, primary.description().to_string()),
        Err(e) => {
            let Some(fallback) = fallback else {
                return Err(e);
            };
            warn!(
                source = primary.name(),
                fallback = fallback.name(),
                error = %e,
                "Primary source failed, using fallback"
            );
            let pokemon = fallback.fetch().await?;
            let source = format!("{} ({} unavailable)", fallback.description(), primary.name());
            (pokemon, source)
        }
    };

    let catalog = assemble(pokemon, source, now);
    pogo_catalog::validate(&catalog)
        .map_err(|e| SyncError::Source(format!("built catalog is invalid: {e}")))?;

    info!(
        source = %catalog.metadata.as_ref().map_or("", |m| m.source.as_str()),
        pokemon = catalog.pokemon.len(),
        "Catalog built"
    );
    Ok(catalog)
}

/// Wrap creature records with metadata, standard coefficients, events and links.
pub fn assemble(pokemon: Vec<CreatureRecord>, source: String, now: DateTime<Utc>) -> Catalog {
    Catalog {
        metadata: Some(CatalogMetadata {
            source,
            last_synced_at: now,
            pokemon_count: pokemon.len(),
        }),
        pokemon,
        trade_options: TradeOptions::standard(),
        events: default_events(now),
        links: default_links(),
    }
}

/// Upcoming events, scheduled relative to `now` on whole hours (UTC).
pub fn default_events(now: DateTime<Utc>) -> Vec<GameEvent> {
    use CreatureType::*;

    let at = |days: i64, hour: i64| {
        let day = (now + Duration::days(days)).date_naive();
        (day.and_time(NaiveTime::MIN) + Duration::hours(hour)).and_utc()
    };

    vec![
        GameEvent {
            id: "community-day".to_string(),
            title: "Community Day".to_string(),
            start: at(4, 17),
            end: at(4, 20),
            description: "בונוסים מוגברים, יותר הופעות בשטח ומתקפות מיוחדות בהתפתחות."
                .to_string(),
            boost_types: vec![Grass, Fire, Water],
        },
        GameEvent {
            id: "raid-hour".to_string(),
            title: "Raid Hour".to_string(),
            start: at(2, 18),
            end: at(2, 19),
            description: "שעת ריידים מוגברת עם בוסים נבחרים.".to_string(),
            boost_types: vec![Dragon, Dark],
        },
        GameEvent {
            id: "spotlight-hour".to_string(),
            title: "Spotlight Hour".to_string(),
            start: at(1, 18),
            end: at(1, 19),
            description: "הופעה מוגברת של פוקימון ספציפי ובונוס XP/סטארדאסט.".to_string(),
            boost_types: vec![Electric, Fairy],
        },
    ]
}

pub fn default_links() -> Vec<ExternalLink> {
    [
        ("Pokemon GO Live", "https://pokemongolive.com"),
        ("Silph Road (Archive)", "https://thesilphroad.com"),
        ("PokeBattler", "https://www.pokebattler.com"),
        ("PvPoke", "https://pvpoke.com"),
    ]
    .into_iter()
    .map(|(title, url)| ExternalLink {
        title: title.to_string(),
        url: url.to_string(),
    })
    .collect()
}
