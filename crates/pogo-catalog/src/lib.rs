pub mod error;
pub mod memory;
pub mod search;
pub mod store;
pub mod validate;

pub use error::CatalogError;
pub use memory::{Fingerprint, SnapshotCache};
pub use search::{search, DEFAULT_SEARCH_LIMIT};
pub use store::{load, parse, CatalogStore};
pub use validate::validate;
