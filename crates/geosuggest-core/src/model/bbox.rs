// crates/geosuggest-core/src/model/bbox.rs
use serde::{Deserialize, Serialize};

/// A rectangular geographic region in decimal degrees.
///
/// Edges are inclusive. Boxes crossing the antimeridian are not supported
/// (`west` must not exceed `east`).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub south: f64,
    pub north: f64,
    pub west: f64,
    pub east: f64,
}

impl BoundingBox {
    pub fn contains(&self, lat: f64, lon: f64) -> bool {
        lat >= self.south && lat <= self.north && lon >= self.west && lon <= self.east
    }

    /// Non-inverted and within WGS84 ranges.
    pub fn is_valid(&self) -> bool {
        self.south <= self.north
            && self.west <= self.east
            && (-90.0..=90.0).contains(&self.south)
            && (-90.0..=90.0).contains(&self.north)
            && (-180.0..=180.0).contains(&self.west)
            && (-180.0..=180.0).contains(&self.east)
    }

    /// Upstream `viewbox` parameter: `west,north,east,south`.
    pub fn viewbox(&self) -> String {
        format!("{},{},{},{}", self.west, self.north, self.east, self.south)
    }
}
