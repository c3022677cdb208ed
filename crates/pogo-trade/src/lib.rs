//! pogo-trade - creature trade fairness service
//!
//! Serves a creature catalog and scores two-sided trade proposals against it.
//!
//! # Library Usage
//!
//! ```rust,no_run
//! use pogo_trade::engine::Valuator;
//! use pogo_trade::models::{TradeItem, TradeProposal, VariantFlag};
//!
//! # async fn run() -> Result<(), anyhow::Error> {
//! let catalog = pogo_trade::catalog::load("data/pokemon-go-db.json".as_ref()).await?;
//! let proposal = TradeProposal {
//!     left: vec![TradeItem::new(150).with_flag(VariantFlag::Shadow)],
//!     right: vec![TradeItem::new(25), TradeItem::new(143)],
//! };
//! let verdict = Valuator::default().valuate(&proposal, &catalog)?;
//! println!("{:?}: {}", verdict.outcome, verdict.explanation);
//! # Ok(())
//! # }
//! ```

pub use pogo_catalog as catalog;
pub use pogo_engine as engine;
pub use pogo_models as models;

pub mod api;
pub mod server;

use std::sync::Arc;

use axum::Router;
use pogo_models::PogoConfig;

pub use api::{decode_proposal, evaluate_body, ApiError, ValuationResponse};
pub use server::AppState;

/// Build the full application router from configuration.
pub fn build_app(config: &PogoConfig) -> Router {
    let state = Arc::new(AppState::from_config(config));
    server::router(state, &config.server)
}
