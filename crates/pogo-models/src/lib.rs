pub mod catalog;
pub mod config;
pub mod trade_input;
pub mod trade_verdict;

pub use catalog::{
    Catalog, CatalogMetadata, CreatureRecord, CreatureType, ExternalLink, GameEvent,
    MultiplierTable, RarityTier, Stats, TableKey, TradeOptions, VariantAvailability, VariantFlag,
};
pub use config::{CatalogConfig, Locale, PogoConfig, ServerConfig, ValuationConfig};
pub use trade_input::{TradeItem, TradeProposal, TradeSide, VariantFlags};
pub use trade_verdict::{ItemValuation, Outcome, SideValuation, TradeVerdict};
