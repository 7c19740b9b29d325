// crates/geosuggest-core/src/model/query.rs
use serde::Serialize;

/// How a fan-out query biases the upstream search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum QueryBias {
    /// Settlements and boundaries strictly inside the region's bounding box.
    Bounded,
    /// Free text suffixed with the region name, no bounding box.
    Regional,
}

/// One upstream request, fully resolved. Built fresh for every session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryDescriptor {
    pub url: String,
    pub source_priority: u8,
    pub bias: QueryBias,
    /// The user's text this descriptor was built from.
    pub query: String,
}
