use serde::{Deserialize, Serialize};

use crate::catalog::{RarityTier, VariantFlag};

/// Score breakdown for one resolved trade item. Scores are rounded for display.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ItemValuation {
    pub creature_id: u32,
    pub display_name: String,
    pub rarity_tier: RarityTier,
    pub base_score: i64,
    /// Flags that matched a multiplier, in request order.
    pub applied_flags: Vec<VariantFlag>,
    pub final_score: i64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SideValuation {
    /// Sum of unrounded item scores, rounded once.
    pub total: i64,
    pub items: Vec<ItemValuation>,
    /// Creature ids that did not resolve against the catalog, in request order.
    #[serde(default)]
    pub skipped: Vec<i64>,
}

/// Three-way fairness classification.
///
/// The non-fair variants name the side that gets the worse deal, i.e. the side
/// whose total is smaller: `FavorsLeft` is reported when the left total is below
/// the right one, and renders as "unfavorable to left side".
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum Outcome {
    Fair,
    FavorsLeft,
    FavorsRight,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TradeVerdict {
    pub left: SideValuation,
    pub right: SideValuation,
    /// `left.total - right.total`.
    pub delta: i64,
    /// `|delta| / max(left.total, right.total, 1)`.
    pub ratio: f64,
    pub outcome: Outcome,
    pub explanation: String,
}
