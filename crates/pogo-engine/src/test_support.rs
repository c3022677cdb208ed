//! Synthetic catalog fixtures shared by unit tests, integration tests and
//! downstream crates.
//!
//! `defense_only` records are handy for exact totals: with defense weighted 1.0
//! and the other stats at zero, the base score equals the defense value.

use pogo_models::{
    Catalog, CreatureRecord, CreatureType, RarityTier, Stats, TradeOptions, VariantAvailability,
};

pub fn creature(
    id: u32,
    display_name: &str,
    attack: f64,
    defense: f64,
    stamina: f64,
    rarity_tier: RarityTier,
) -> CreatureRecord {
    CreatureRecord {
        id,
        name: display_name.to_lowercase(),
        display_name: display_name.to_string(),
        pokedex_number: Some(id),
        types: vec![CreatureType::Normal],
        stats: Stats {
            attack,
            defense,
            stamina,
        },
        forms: vec![display_name.to_lowercase()],
        variants: VariantAvailability {
            shiny: true,
            shadow: true,
            costume: false,
            event: false,
        },
        rarity_tier,
    }
}

/// A record whose base score is exactly `defense`.
pub fn defense_only(id: u32, defense: f64, rarity_tier: RarityTier) -> CreatureRecord {
    creature(id, &format!("Wall{id}"), 0.0, defense, 0.0, rarity_tier)
}

pub fn catalog_with(pokemon: Vec<CreatureRecord>, trade_options: TradeOptions) -> Catalog {
    Catalog::new(pokemon, trade_options)
}

/// A handful of well-known species with the standard coefficient set.
pub fn standard_catalog() -> Catalog {
    Catalog::new(
        vec![
            creature(1, "Bulbasaur", 118.0, 111.0, 128.0, RarityTier::Common),
            creature(4, "Charmander", 116.0, 93.0, 118.0, RarityTier::Common),
            creature(25, "Pikachu", 112.0, 96.0, 111.0, RarityTier::Common),
            creature(143, "Snorlax", 190.0, 169.0, 330.0, RarityTier::Rare),
            creature(150, "Mewtwo", 300.0, 182.0, 214.0, RarityTier::Legendary),
            creature(151, "Mew", 210.0, 210.0, 225.0, RarityTier::Mythical),
        ],
        TradeOptions::standard(),
    )
}
