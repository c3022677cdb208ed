pub mod error;
pub mod explain;
pub mod scoring;
pub mod valuation;

pub mod test_support;

pub use error::EngineError;
pub use explain::{explanation, verdict_label};
pub use valuation::{
    classify, compare_totals, valuate_side, valuate_trade, Coefficients, Valuator, FAIR_THRESHOLD,
};
