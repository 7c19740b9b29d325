// crates/geosuggest-core/src/traits.rs
use crate::error::Result;
use crate::model::{QueryDescriptor, RawPlace};
use crate::text::fold_key;
use async_trait::async_trait;

/// Upstream abstraction: anything that can answer one [`QueryDescriptor`].
///
/// The coordinator fans every session out over one source. The default
/// implementation is [`crate::upstream::HttpSource`]; tests and offline
/// tooling plug in their own.
///
/// Implementations do not need to observe cancellation themselves. The
/// dispatcher races every `fetch` against the session's token and drops the
/// future once it fires; whatever the source does afterwards is discarded.
///
/// # Examples
/// ```rust
/// use async_trait::async_trait;
/// use geosuggest_core::model::{QueryDescriptor, RawPlace};
/// use geosuggest_core::traits::PlaceSource;
///
/// struct Nothing;
///
/// #[async_trait]
/// impl PlaceSource for Nothing {
///     async fn fetch(&self, _d: &QueryDescriptor) -> geosuggest_core::Result<Vec<RawPlace>> {
///         Ok(Vec::new())
///     }
/// }
/// ```
#[async_trait]
pub trait PlaceSource: Send + Sync {
    async fn fetch(&self, descriptor: &QueryDescriptor) -> Result<Vec<RawPlace>>;
}

/// Name-based matching helpers for types that expose a canonical display name.
///
/// Comparisons go through [`fold_key`], so they are accent-insensitive and
/// case-insensitive.
///
/// # Examples
/// ```rust
/// use geosuggest_core::traits::NameMatch;
///
/// struct Place(&'static str);
/// impl NameMatch for Place {
///     fn name_str(&self) -> &str { self.0 }
/// }
///
/// assert!(Place("Kōchi").is_named("kochi"));
/// assert!(Place("Thiruvananthapuram").name_starts_with("thiru"));
/// ```
pub trait NameMatch {
    /// Returns the canonical display name used for matching.
    fn name_str(&self) -> &str;

    #[inline]
    fn is_named(&self, q: &str) -> bool {
        fold_key(self.name_str()) == fold_key(q)
    }

    #[inline]
    fn name_starts_with(&self, q: &str) -> bool {
        fold_key(self.name_str()).starts_with(&fold_key(q))
    }
}
