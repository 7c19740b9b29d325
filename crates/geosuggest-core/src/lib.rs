// crates/geosuggest-core/src/lib.rs

//! geosuggest-core
//! ===============
//!
//! The coordination and result-shaping logic between raw keystrokes and a
//! clean, rank-ordered list of place suggestions:
//!
//! - [`coordinator`]: debounce input, sequence sessions, commit only the latest
//! - [`session`]: one cancellable search attempt and its state machine
//! - [`dispatch`]: concurrent fan-out of differently-biased upstream queries
//! - [`normalize`], [`geo_filter`], [`rank`]: turn ragged upstream records
//!   into deduplicated, ranked [`Suggestion`]s
//! - [`upstream`]: the HTTP [`traits::PlaceSource`] (feature `http`)
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod config;
pub mod coordinator;
pub mod dispatch;
pub mod error;
pub mod geo_filter;
pub mod model;
pub mod normalize;
pub mod rank;
pub mod session;
pub mod text;
pub mod traits;
#[cfg(feature = "http")]
pub mod upstream;

// Re-exports
pub use crate::config::{RegionConfig, SuggestConfig};
pub use crate::coordinator::{CoordinatorPhase, SuggestCoordinator, SuggestState};
pub use crate::error::{Result, SuggestError};
pub use crate::model::{BoundingBox, Category, QueryDescriptor, RawPlace, Suggestion};

pub mod prelude {
    pub use crate::config::{RegionConfig, SuggestConfig};
    pub use crate::coordinator::{CoordinatorPhase, SuggestCoordinator, SuggestState};
    pub use crate::error::{Result, SuggestError};
    pub use crate::model::{Category, QueryDescriptor, RawPlace, Suggestion};
    pub use crate::traits::{NameMatch, PlaceSource};
    #[cfg(feature = "http")]
    pub use crate::upstream::HttpSource;
}
