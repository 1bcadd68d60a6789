use serde::Deserialize;

/// A single place from the Nominatim `/search` response. The API returns
/// coordinates as decimal strings, not numbers.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchResult {
    pub lat: String,
    pub lon: String,
    #[serde(rename = "display_name")]
    pub display_name: Option<String>,
}

/// A resolved coordinate pair.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    pub lat: f64,
    pub lon: f64,
}

impl SearchResult {
    /// Parse the string-typed coordinate fields. `None` when either field
    /// is not a valid decimal.
    pub fn coordinates(&self) -> Option<Coordinates> {
        let lat = self.lat.parse().ok()?;
        let lon = self.lon.parse().ok()?;
        Some(Coordinates { lat, lon })
    }
}
