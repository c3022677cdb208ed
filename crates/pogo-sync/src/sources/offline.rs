use async_trait::async_trait;
use pogo_models::{CreatureRecord, CreatureType, RarityTier, Stats, VariantAvailability};

use super::{display_name, CreatureSource};
use crate::error::SyncError;

use CreatureType::*;

/// name, types, attack, defense, stamina, tier
const DATASET: [(&str, &[CreatureType], f64, f64, f64, RarityTier); 10] = [
    ("bulbasaur", &[Grass, Poison], 118.0, 111.0, 128.0, RarityTier::Common),
    ("charmander", &[Fire], 116.0, 93.0, 118.0, RarityTier::Common),
    ("squirtle", &[Water], 94.0, 121.0, 127.0, RarityTier::Common),
    ("pikachu", &[Electric], 112.0, 96.0, 111.0, RarityTier::Common),
    ("machamp", &[Fighting], 234.0, 159.0, 207.0, RarityTier::Rare),
    ("gengar", &[Ghost, Poison], 261.0, 149.0, 155.0, RarityTier::Rare),
    ("snorlax", &[Normal], 190.0, 169.0, 330.0, RarityTier::Rare),
    ("dragonite", &[Dragon, Flying], 263.0, 198.0, 209.0, RarityTier::Rare),
    ("mewtwo", &[Psychic], 300.0, 182.0, 214.0, RarityTier::Legendary),
    ("mew", &[Psychic], 210.0, 210.0, 225.0, RarityTier::Mythical),
];

/// Built-in ten-creature dataset for when the network is unavailable.
///
/// Ids are positional (1..=10), not national dex numbers.
#[derive(Debug, Clone, Copy, Default)]
pub struct OfflineSource;

impl OfflineSource {
    pub fn records(&self) -> Vec<CreatureRecord> {
        DATASET
            .iter()
            .zip(1u32..)
            .map(|(&(name, types, attack, defense, stamina, rarity_tier), id)| CreatureRecord {
                id,
                name: name.to_string(),
                display_name: display_name(name),
                pokedex_number: Some(id),
                types: types.to_vec(),
                stats: Stats {
                    attack,
                    defense,
                    stamina,
                },
                forms: vec![name.to_string()],
                variants: VariantAvailability {
                    shiny: true,
                    shadow: true,
                    costume: id % 3 == 0,
                    event: id % 4 == 0,
                },
                rarity_tier,
            })
            .collect()
    }
}

#[async_trait]
impl CreatureSource for OfflineSource {
    fn name(&self) -> &str {
        "offline"
    }

    fn description(&self) -> &str {
        "Offline fallback dataset"
    }

    async fn fetch(&self) -> Result<Vec<CreatureRecord>, SyncError> {
        Ok(self.records())
    }
}
