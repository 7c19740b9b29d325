// crates/geosuggest-core/src/model/raw.rs
use serde::{Deserialize, Deserializer};

/// Raw address sub-object as the upstream sends it.
///
/// Ragged by nature: a city record carries `city`, a boundary record
/// usually carries `state_district` or `county`, villages carry neither.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawAddress {
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub town: Option<String>,
    #[serde(default)]
    pub municipality: Option<String>,
    #[serde(default)]
    pub village: Option<String>,
    #[serde(default)]
    pub county: Option<String>,
    #[serde(default)]
    pub state_district: Option<String>,
    #[serde(default)]
    pub district: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub country_code: Option<String>,
}

/// Raw search record from the upstream JSON array.
/// NOTE: This type mirrors the external API. Every field may be missing;
/// nothing here is validated until normalization.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawPlace {
    #[serde(default, deserialize_with = "opt_id")]
    pub place_id: Option<String>,
    #[serde(default, deserialize_with = "opt_id")]
    pub osm_id: Option<String>,
    #[serde(default, deserialize_with = "opt_f64")]
    pub lat: Option<f64>,
    #[serde(default, deserialize_with = "opt_f64")]
    pub lon: Option<f64>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub class: Option<String>,
    #[serde(default)]
    pub address: Option<RawAddress>,
    #[serde(default, deserialize_with = "opt_f64")]
    pub importance: Option<f64>,
}

impl RawPlace {
    pub fn kind(&self) -> &str {
        self.kind.as_deref().unwrap_or("")
    }

    pub fn class(&self) -> &str {
        self.class.as_deref().unwrap_or("")
    }

    pub fn display_name(&self) -> &str {
        self.display_name.as_deref().unwrap_or("")
    }

    /// Borrow the address, or an empty one when the record has none.
    pub fn address(&self) -> &RawAddress {
        static EMPTY: RawAddress = RawAddress {
            city: None,
            town: None,
            municipality: None,
            village: None,
            county: None,
            state_district: None,
            district: None,
            state: None,
            country: None,
            country_code: None,
        };
        self.address.as_ref().unwrap_or(&EMPTY)
    }

    /// Both coordinates, when both are present.
    pub fn coordinates(&self) -> Option<(f64, f64)> {
        self.lat.zip(self.lon)
    }
}

// The upstream sends `lat`/`lon` as strings, `importance` as a number and ids
// as integers; older deployments differ. Accept either representation.
#[derive(Deserialize)]
#[serde(untagged)]
enum NumOrStr {
    Int(i64),
    Float(f64),
    Str(String),
}

fn opt_f64<'de, D>(de: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<NumOrStr>::deserialize(de)? {
        Some(NumOrStr::Int(i)) => Some(i as f64),
        Some(NumOrStr::Float(f)) => Some(f),
        Some(NumOrStr::Str(s)) => s.trim().parse::<f64>().ok(),
        None => None,
    }
    .filter(|f| f.is_finite()))
}

fn opt_id<'de, D>(de: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<NumOrStr>::deserialize(de)? {
        Some(NumOrStr::Int(i)) => Some(i.to_string()),
        Some(NumOrStr::Float(f)) => Some(format!("{f}")),
        Some(NumOrStr::Str(s)) => Some(s).filter(|s| !s.trim().is_empty()),
        None => None,
    })
}
