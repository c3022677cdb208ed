//! Per-item score components.
//!
//! Stat weights are fixed design constants: attack weighs most, then stamina
//! via the raw stat, then defense.

use pogo_models::{MultiplierTable, RarityTier, Stats, VariantFlag, VariantFlags};

pub const ATTACK_WEIGHT: f64 = 1.1;
pub const DEFENSE_WEIGHT: f64 = 1.0;
pub const STAMINA_WEIGHT: f64 = 0.95;

/// Multiplier for a rarity tier that has no entry in the catalog's table.
pub const DEFAULT_RARITY_MULTIPLIER: f64 = 1.0;

/// Weighted stat sum before any multipliers.
pub fn base_score(stats: &Stats) -> f64 {
    stats.attack * ATTACK_WEIGHT + stats.defense * DEFENSE_WEIGHT + stats.stamina * STAMINA_WEIGHT
}

/// Product of the multipliers of every enabled flag present in `table`.
///
/// Returns the product (1 when nothing matches) and the matched flags in request
/// order. The product is taken in canonical flag order so the numeric result
/// does not depend on how the request ordered its options.
pub fn variant_score(
    flags: &VariantFlags,
    table: &MultiplierTable<VariantFlag>,
) -> (f64, Vec<VariantFlag>) {
    let applied: Vec<VariantFlag> = flags.iter().filter(|f| table.get(*f).is_some()).collect();

    let mut canonical = applied.clone();
    canonical.sort();
    let score = canonical
        .iter()
        .filter_map(|f| table.get(*f))
        .fold(1.0, |acc, m| acc * m);

    (score, applied)
}

pub fn rarity_score(tier: RarityTier, table: &MultiplierTable<RarityTier>) -> f64 {
    table.get(tier).unwrap_or(DEFAULT_RARITY_MULTIPLIER)
}

/// Round to the nearest integer for display, halves away from zero.
pub fn round_display(score: f64) -> i64 {
    score.round() as i64
}
