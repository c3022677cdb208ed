use pogo_models::{
    Catalog, ItemValuation, Locale, MultiplierTable, Outcome, RarityTier, SideValuation,
    TradeItem, TradeProposal, TradeVerdict, VariantFlag,
};
use tracing::debug;

use crate::error::EngineError;
use crate::explain::explanation;
use crate::scoring::{base_score, rarity_score, round_display, variant_score};

/// Largest `ratio` still classified as a fair trade.
pub const FAIR_THRESHOLD: f64 = 0.08;

/// The catalog's multiplier tables, checked to be present.
#[derive(Debug, Clone, Copy)]
pub struct Coefficients<'a> {
    pub variants: &'a MultiplierTable<VariantFlag>,
    pub rarity: &'a MultiplierTable<RarityTier>,
}

impl<'a> Coefficients<'a> {
    pub fn from_catalog(catalog: &'a Catalog) -> Result<Self, EngineError> {
        let options = &catalog.trade_options;
        let variants = options.variant_multipliers.as_ref().ok_or_else(|| {
            EngineError::Configuration(
                "catalog is missing tradeOptions.variantMultipliers".to_string(),
            )
        })?;
        let rarity = options.rarity_multipliers.as_ref().ok_or_else(|| {
            EngineError::Configuration(
                "catalog is missing tradeOptions.rarityMultipliers".to_string(),
            )
        })?;
        Ok(Self { variants, rarity })
    }
}

/// Score one side of a trade.
///
/// Items whose creature id is not in the catalog (including ids no catalog can
/// hold, such as negative ones) are skipped: they add nothing to the total and
/// are listed in `skipped` instead of `items`.
pub fn valuate_side(side: &[TradeItem], catalog: &Catalog) -> Result<SideValuation, EngineError> {
    let coefficients = Coefficients::from_catalog(catalog)?;
    Ok(score_side(side, catalog, coefficients))
}

/// Score both sides and classify the trade, with English wording.
pub fn valuate_trade(
    proposal: &TradeProposal,
    catalog: &Catalog,
) -> Result<TradeVerdict, EngineError> {
    Valuator::default().valuate(proposal, catalog)
}

fn score_side(side: &[TradeItem], catalog: &Catalog, coefficients: Coefficients<'_>) -> SideValuation {
    let mut total = 0.0;
    let mut items = Vec::with_capacity(side.len());
    let mut skipped = Vec::new();

    for item in side {
        let resolved = u32::try_from(item.creature_id)
            .ok()
            .and_then(|id| catalog.find(id));
        let Some(record) = resolved else {
            debug!(creature_id = item.creature_id, "Skipping unresolved creature");
            skipped.push(item.creature_id);
            continue;
        };

        let base = base_score(&record.stats);
        let (variant, applied_flags) = variant_score(&item.flags, coefficients.variants);
        let rarity = rarity_score(record.rarity_tier, coefficients.rarity);
        let final_score = base * variant * rarity;
        total += final_score;

        items.push(ItemValuation {
            creature_id: record.id,
            display_name: record.display_name.clone(),
            rarity_tier: record.rarity_tier,
            base_score: round_display(base),
            applied_flags,
            final_score: round_display(final_score),
        });
    }

    SideValuation {
        total: round_display(total),
        items,
        skipped,
    }
}

/// `(delta, ratio)` for two side totals. The denominator is floored at 1 so two
/// empty sides compare as ratio 0.
pub fn compare_totals(left_total: i64, right_total: i64) -> (i64, f64) {
    let delta = left_total - right_total;
    let denominator = left_total.max(right_total).max(1) as f64;
    (delta, delta.unsigned_abs() as f64 / denominator)
}

/// Classify a comparison. Outside the fair band the outcome names the side with
/// the smaller total: a positive delta (left stronger) is `FavorsRight`.
pub fn classify(delta: i64, ratio: f64) -> Outcome {
    if ratio <= FAIR_THRESHOLD {
        Outcome::Fair
    } else if delta > 0 {
        Outcome::FavorsRight
    } else {
        Outcome::FavorsLeft
    }
}

/// Trade valuation with a fixed output language.
#[derive(Debug, Clone, Copy, Default)]
pub struct Valuator {
    locale: Locale,
}

impl Valuator {
    pub fn new(locale: Locale) -> Self {
        Self { locale }
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    /// Score both sides against one catalog snapshot and compare them.
    ///
    /// Fails before scoring anything if the catalog lacks a multiplier table.
    pub fn valuate(
        &self,
        proposal: &TradeProposal,
        catalog: &Catalog,
    ) -> Result<TradeVerdict, EngineError> {
        let coefficients = Coefficients::from_catalog(catalog)?;

        let left = score_side(&proposal.left, catalog, coefficients);
        let right = score_side(&proposal.right, catalog, coefficients);

        let (delta, ratio) = compare_totals(left.total, right.total);
        let outcome = classify(delta, ratio);

        debug!(
            left_total = left.total,
            right_total = right.total,
            delta,
            ratio,
            ?outcome,
            "Trade valuated"
        );

        Ok(TradeVerdict {
            left,
            right,
            delta,
            ratio,
            outcome,
            explanation: explanation(ratio, self.locale),
        })
    }
}
