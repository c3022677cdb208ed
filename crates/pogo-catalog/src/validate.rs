use std::collections::HashSet;

use pogo_models::{Catalog, MultiplierTable, TableKey};

use crate::error::CatalogError;

/// Check the catalog invariants: unique ids, non-negative finite stats, and
/// strictly positive finite multipliers in whichever tables are present.
///
/// A missing multiplier table is not reported here; scoring rejects it.
pub fn validate(catalog: &Catalog) -> Result<(), CatalogError> {
    let mut seen = HashSet::with_capacity(catalog.pokemon.len());
    for record in &catalog.pokemon {
        if !seen.insert(record.id) {
            return Err(CatalogError::Invalid(format!(
                "duplicate creature id {}",
                record.id
            )));
        }

        let stats = &record.stats;
        for (name, value) in [
            ("attack", stats.attack),
            ("defense", stats.defense),
            ("stamina", stats.stamina),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(CatalogError::Invalid(format!(
                    "creature {} has invalid {name} stat: {value}",
                    record.id
                )));
            }
        }
    }

    let options = &catalog.trade_options;
    if let Some(table) = &options.variant_multipliers {
        check_multipliers("variantMultipliers", table)?;
    }
    if let Some(table) = &options.rarity_multipliers {
        check_multipliers("rarityMultipliers", table)?;
    }

    Ok(())
}

fn check_multipliers<K: TableKey>(
    table_name: &str,
    table: &MultiplierTable<K>,
) -> Result<(), CatalogError> {
    match table.iter().find(|(_, m)| !m.is_finite() || *m <= 0.0) {
        Some((key, m)) => Err(CatalogError::Invalid(format!(
            "{table_name}.{} must be positive, got {m}",
            key.name()
        ))),
        None => Ok(()),
    }
}
