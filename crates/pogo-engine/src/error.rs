use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// The catalog is structurally unusable for scoring (e.g., a multiplier table is missing).
    #[error("Configuration error: {0}")]
    Configuration(String),
}
