use pogo_models::{Catalog, CreatureRecord};

pub const DEFAULT_SEARCH_LIMIT: usize = 250;

/// Case-insensitive substring match on slug or display name, in catalog order.
/// An empty query matches everything. The query is used as given, surrounding
/// whitespace included.
pub fn search<'a>(catalog: &'a Catalog, query: &str, limit: usize) -> Vec<&'a CreatureRecord> {
    let needle = query.to_lowercase();
    catalog
        .pokemon
        .iter()
        .filter(|p| {
            needle.is_empty()
                || p.name.contains(&needle)
                || p.display_name.to_lowercase().contains(&needle)
        })
        .take(limit)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pogo_models::{RarityTier, Stats, TradeOptions, VariantAvailability};

    fn record(id: u32, name: &str, display_name: &str) -> CreatureRecord {
        CreatureRecord {
            id,
            name: name.to_string(),
            display_name: display_name.to_string(),
            pokedex_number: Some(id),
            types: vec![],
            stats: Stats {
                attack: 1.0,
                defense: 1.0,
                stamina: 1.0,
            },
            forms: vec![],
            variants: VariantAvailability::default(),
            rarity_tier: RarityTier::Common,
        }
    }

    fn catalog() -> Catalog {
        Catalog::new(
            vec![
                record(150, "mewtwo", "Mewtwo"),
                record(151, "mew", "Mew"),
                record(25, "pikachu", "Pikachu"),
                record(999, "", "Mega Mewtwo X"),
            ],
            TradeOptions::standard(),
        )
    }

    #[test]
    fn empty_query_matches_all() {
        assert_eq!(search(&catalog(), "", DEFAULT_SEARCH_LIMIT).len(), 4);
    }

    #[test]
    fn matches_slug_or_display_name_case_insensitively() {
        let ids: Vec<u32> = search(&catalog(), "MEW", DEFAULT_SEARCH_LIMIT)
            .iter()
            .map(|p| p.id)
            .collect();
        assert_eq!(ids, vec![150, 151, 999]);
    }

    #[test]
    fn whitespace_is_part_of_the_query() {
        assert!(search(&catalog(), "mew ", DEFAULT_SEARCH_LIMIT).is_empty());
        assert!(search(&catalog(), "   ", DEFAULT_SEARCH_LIMIT).is_empty());
    }

    #[test]
    fn respects_limit() {
        assert_eq!(search(&catalog(), "mew", 2).len(), 2);
    }

    #[test]
    fn no_match() {
        assert!(search(&catalog(), "snorlax", DEFAULT_SEARCH_LIMIT).is_empty());
    }
}
