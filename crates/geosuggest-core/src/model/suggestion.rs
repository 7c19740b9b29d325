// crates/geosuggest-core/src/model/suggestion.rs
use crate::text::fold_key;
use crate::traits::NameMatch;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Derived place category. Never upstream-native; see
/// [`crate::normalize::category_of`] for the derivation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    District,
    City,
    Town,
    Municipality,
    Administrative,
    Location,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::District => "district",
            Category::City => "city",
            Category::Town => "town",
            Category::Municipality => "municipality",
            Category::Administrative => "administrative",
            Category::Location => "location",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The unit handed to the UI.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Suggestion {
    pub id: String,
    pub name: String,
    /// `name, district, region`, with the district omitted when it equals the name.
    pub display_name: String,
    /// Upstream feature type (`administrative`, `city`, `town`, ...).
    #[serde(rename = "type")]
    pub kind: String,
    pub category: Category,
    pub district: Option<String>,
    /// Which fan-out query produced this record; lower is more authoritative.
    pub source_priority: u8,
    pub importance: f64,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

impl Suggestion {
    pub fn is_district(&self) -> bool {
        self.category == Category::District
    }

    /// Identity used by the deduplicator: folded name plus district.
    pub fn dedup_key(&self) -> (String, Option<String>) {
        (fold_key(&self.name), self.district.clone())
    }
}

impl NameMatch for Suggestion {
    fn name_str(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for Suggestion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}]", self.display_name, self.category)
    }
}
