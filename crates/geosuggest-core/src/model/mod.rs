// crates/geosuggest-core/src/model/mod.rs
pub mod bbox;
pub mod query;
pub mod raw;
pub mod suggestion;

pub use bbox::BoundingBox;
pub use query::{QueryBias, QueryDescriptor};
pub use raw::{RawAddress, RawPlace};
pub use suggestion::{Category, Suggestion};
