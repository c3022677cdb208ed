use async_trait::async_trait;
use pogo_models::{CreatureRecord, CreatureType, RarityTier, Stats, VariantAvailability};
use serde::de::{value, IntoDeserializer};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::{display_name, CreatureSource};
use crate::config::SyncConfig;
use crate::error::SyncError;

/// Species that never appear as shadows.
const NO_SHADOW: [&str; 3] = ["ditto", "smeargle", "mew"];

// Subset of the PokeAPI v2 resources the builder reads.

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NamedResource {
    pub name: String,
    #[serde(default)]
    pub url: String,
}

#[derive(Debug, Deserialize)]
struct ResourceList {
    results: Vec<NamedResource>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TypeSlot {
    #[serde(rename = "type")]
    pub kind: NamedResource,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatEntry {
    pub base_stat: f64,
    pub stat: NamedResource,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PokemonDetails {
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub types: Vec<TypeSlot>,
    #[serde(default)]
    pub stats: Vec<StatEntry>,
    #[serde(default)]
    pub forms: Vec<NamedResource>,
    pub species: NamedResource,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SpeciesDetails {
    #[serde(default)]
    pub is_legendary: bool,
    #[serde(default)]
    pub is_mythical: bool,
}

impl PokemonDetails {
    fn base_stat(&self, name: &str) -> f64 {
        self.stats
            .iter()
            .find(|s| s.stat.name == name)
            .map_or(0.0, |s| s.base_stat)
    }
}

/// Map API resources to a catalog record.
///
/// Types outside the fixed vocabulary are dropped; a missing stat counts as 0.
pub fn to_record(details: &PokemonDetails, species: &SpeciesDetails) -> CreatureRecord {
    let id = details.id;
    let rarity_tier = if species.is_mythical {
        RarityTier::Mythical
    } else if species.is_legendary {
        RarityTier::Legendary
    } else if id % 13 == 0 {
        RarityTier::Rare
    } else {
        RarityTier::Common
    };

    CreatureRecord {
        id,
        name: details.name.clone(),
        display_name: display_name(&details.name),
        pokedex_number: Some(id),
        types: details
            .types
            .iter()
            .filter_map(|slot| parse_type(&slot.kind.name))
            .collect(),
        stats: Stats {
            attack: details.base_stat("attack"),
            defense: details.base_stat("defense"),
            stamina: details.base_stat("hp"),
        },
        forms: details.forms.iter().map(|f| f.name.clone()).collect(),
        variants: VariantAvailability {
            shiny: true,
            shadow: !NO_SHADOW.contains(&details.name.as_str()),
            costume: id % 7 == 0,
            event: id % 11 == 0,
        },
        rarity_tier,
    }
}

fn parse_type(name: &str) -> Option<CreatureType> {
    let de: value::StrDeserializer<'_, value::Error> = name.into_deserializer();
    CreatureType::deserialize(de).ok()
}

/// Online source backed by the public PokeAPI.
pub struct PokeApiSource {
    client: reqwest::Client,
    base_url: String,
    limit: u32,
}

impl PokeApiSource {
    pub fn new(base_url: impl Into<String>, limit: u32, client: reqwest::Client) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            limit,
        }
    }

    pub fn from_config(config: &SyncConfig) -> Result<Self, SyncError> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout())
            .build()?;
        Ok(Self::new(&config.api_base_url, config.limit, client))
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, url: &str) -> Result<T, SyncError> {
        let response = self.client.get(url).send().await?.error_for_status()?;
        Ok(response.json().await?)
    }
}

#[async_trait]
impl CreatureSource for PokeApiSource {
    fn name(&self) -> &str {
        "pokeapi"
    }

    fn description(&self) -> &str {
        "PokeAPI"
    }

    async fn fetch(&self) -> Result<Vec<CreatureRecord>, SyncError> {
        let list_url = format!("{}/pokemon?limit={}", self.base_url, self.limit);
        let list: ResourceList = self.get_json(&list_url).await?;
        if list.results.is_empty() {
            return Err(SyncError::Source(format!("{list_url} returned no creatures")));
        }

        let mut records = Vec::with_capacity(list.results.len());
        for entry in &list.results {
            let details: PokemonDetails = self.get_json(&entry.url).await?;
            let species: SpeciesDetails = self.get_json(&details.species.url).await?;
            debug!(id = details.id, name = %details.name, "Fetched creature");
            records.push(to_record(&details, &species));
        }

        info!(count = records.len(), "Fetched creatures from PokeAPI");
        Ok(records)
    }
}
