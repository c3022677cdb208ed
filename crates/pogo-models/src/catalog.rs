use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::de::Deserializer;
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};

/// Coarse scarcity classification of a species.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum RarityTier {
    Common,
    Rare,
    Legendary,
    Mythical,
}

impl RarityTier {
    pub const ALL: [RarityTier; 4] = [
        RarityTier::Common,
        RarityTier::Rare,
        RarityTier::Legendary,
        RarityTier::Mythical,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RarityTier::Common => "common",
            RarityTier::Rare => "rare",
            RarityTier::Legendary => "legendary",
            RarityTier::Mythical => "mythical",
        }
    }
}

impl fmt::Display for RarityTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Quality tag on a traded creature that multiplies its value.
///
/// This is a closed set. Flag names outside it are dropped wherever they
/// appear (catalog multiplier tables, request option maps).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "camelCase")]
pub enum VariantFlag {
    Shiny,
    Shadow,
    Purified,
    Lucky,
    Event,
    Costume,
    LegacyMove,
}

impl VariantFlag {
    pub const ALL: [VariantFlag; 7] = [
        VariantFlag::Shiny,
        VariantFlag::Shadow,
        VariantFlag::Purified,
        VariantFlag::Lucky,
        VariantFlag::Event,
        VariantFlag::Costume,
        VariantFlag::LegacyMove,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            VariantFlag::Shiny => "shiny",
            VariantFlag::Shadow => "shadow",
            VariantFlag::Purified => "purified",
            VariantFlag::Lucky => "lucky",
            VariantFlag::Event => "event",
            VariantFlag::Costume => "costume",
            VariantFlag::LegacyMove => "legacyMove",
        }
    }
}

impl fmt::Display for VariantFlag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Elemental type tags. The vocabulary is fixed.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum CreatureType {
    Normal,
    Fire,
    Water,
    Electric,
    Grass,
    Ice,
    Fighting,
    Poison,
    Ground,
    Flying,
    Psychic,
    Bug,
    Rock,
    Ghost,
    Dragon,
    Dark,
    Steel,
    Fairy,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Stats {
    pub attack: f64,
    pub defense: f64,
    pub stamina: f64,
}

/// Which variants of a species exist in the game at all.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct VariantAvailability {
    #[serde(default)]
    pub shiny: bool,
    #[serde(default)]
    pub shadow: bool,
    #[serde(default)]
    pub costume: bool,
    #[serde(default)]
    pub event: bool,
}

/// One species entry in the catalog.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CreatureRecord {
    pub id: u32,
    /// Lowercase slug (e.g., "pikachu"). Used by search.
    #[serde(default)]
    pub name: String,
    pub display_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pokedex_number: Option<u32>,
    /// Order is not significant.
    #[serde(default)]
    pub types: Vec<CreatureType>,
    pub stats: Stats,
    #[serde(default)]
    pub forms: Vec<String>,
    #[serde(default)]
    pub variants: VariantAvailability,
    pub rarity_tier: RarityTier,
}

/// A key usable in a [`MultiplierTable`]: a closed enum with a canonical wire name.
pub trait TableKey: Copy + Ord {
    fn from_name(name: &str) -> Option<Self>;
    fn name(&self) -> &'static str;
}

impl TableKey for VariantFlag {
    fn from_name(name: &str) -> Option<Self> {
        VariantFlag::ALL.into_iter().find(|f| f.as_str() == name)
    }

    fn name(&self) -> &'static str {
        self.as_str()
    }
}

impl TableKey for RarityTier {
    fn from_name(name: &str) -> Option<Self> {
        RarityTier::ALL.into_iter().find(|t| t.as_str() == name)
    }

    fn name(&self) -> &'static str {
        self.as_str()
    }
}

/// Mapping from a closed key set to a numeric multiplier.
///
/// Deserializes from a JSON object; keys that do not name a known `K` are dropped.
#[derive(Debug, Clone, PartialEq)]
pub struct MultiplierTable<K: TableKey> {
    entries: BTreeMap<K, f64>,
}

impl<K: TableKey> MultiplierTable<K> {
    pub fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    pub fn with(mut self, key: K, multiplier: f64) -> Self {
        self.entries.insert(key, multiplier);
        self
    }

    pub fn insert(&mut self, key: K, multiplier: f64) {
        self.entries.insert(key, multiplier);
    }

    pub fn get(&self, key: K) -> Option<f64> {
        self.entries.get(&key).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (K, f64)> + '_ {
        self.entries.iter().map(|(k, v)| (*k, *v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: TableKey> Default for MultiplierTable<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: TableKey> FromIterator<(K, f64)> for MultiplierTable<K> {
    fn from_iter<I: IntoIterator<Item = (K, f64)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

impl<K: TableKey> Serialize for MultiplierTable<K> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.entries.iter().map(|(k, v)| (k.name(), v)))
    }
}

impl<'de, K: TableKey> Deserialize<'de> for MultiplierTable<K> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = BTreeMap::<String, f64>::deserialize(deserializer)?;
        Ok(raw
            .into_iter()
            .filter_map(|(name, value)| K::from_name(&name).map(|k| (k, value)))
            .collect())
    }
}

/// Scoring coefficients shipped with the catalog.
///
/// Both tables are optional at the type level so that a document missing one
/// still parses; the valuation engine reports that as a configuration error.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TradeOptions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variant_multipliers: Option<MultiplierTable<VariantFlag>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rarity_multipliers: Option<MultiplierTable<RarityTier>>,
}

impl TradeOptions {
    /// The coefficient set every generated catalog ships with.
    pub fn standard() -> Self {
        Self {
            variant_multipliers: Some(
                MultiplierTable::new()
                    .with(VariantFlag::Shiny, 1.25)
                    .with(VariantFlag::Shadow, 1.2)
                    .with(VariantFlag::Purified, 1.08)
                    .with(VariantFlag::Lucky, 1.12)
                    .with(VariantFlag::Event, 1.18)
                    .with(VariantFlag::Costume, 1.1)
                    .with(VariantFlag::LegacyMove, 1.2),
            ),
            rarity_multipliers: Some(
                MultiplierTable::new()
                    .with(RarityTier::Common, 1.0)
                    .with(RarityTier::Rare, 1.1)
                    .with(RarityTier::Legendary, 1.45)
                    .with(RarityTier::Mythical, 1.7),
            ),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CatalogMetadata {
    /// Where the creature list came from (online API or the offline dataset).
    pub source: String,
    pub last_synced_at: DateTime<Utc>,
    pub pokemon_count: usize,
}

/// A scheduled in-game event shown alongside the catalog.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GameEvent {
    pub id: String,
    pub title: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub description: String,
    #[serde(default)]
    pub boost_types: Vec<CreatureType>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ExternalLink {
    pub title: String,
    pub url: String,
}

/// The catalog document: creature records, scoring coefficients and static content.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Catalog {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<CatalogMetadata>,
    pub pokemon: Vec<CreatureRecord>,
    #[serde(default)]
    pub trade_options: TradeOptions,
    #[serde(default)]
    pub events: Vec<GameEvent>,
    #[serde(default)]
    pub links: Vec<ExternalLink>,
}

impl Catalog {
    /// A catalog with only creature records and coefficients.
    pub fn new(pokemon: Vec<CreatureRecord>, trade_options: TradeOptions) -> Self {
        Self {
            metadata: None,
            pokemon,
            trade_options,
            events: Vec::new(),
            links: Vec::new(),
        }
    }

    pub fn find(&self, id: u32) -> Option<&CreatureRecord> {
        self.pokemon.iter().find(|p| p.id == id)
    }
}
