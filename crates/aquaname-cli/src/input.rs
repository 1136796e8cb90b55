//! Input CSV rows.

use aquaname_core::Coordinate;
use serde::Deserialize;

/// One data row of the coordinates CSV. Only `Lat` and `Lon` are required
/// for a lookup; unparsable numbers deserialize as `None`.
#[derive(Debug, Deserialize)]
pub(crate) struct InputRow {
    #[serde(rename = "Lat", default, deserialize_with = "csv::invalid_option")]
    pub(crate) lat: Option<f64>,
    #[serde(rename = "Lon", default, deserialize_with = "csv::invalid_option")]
    pub(crate) lon: Option<f64>,
    #[serde(rename = "City", default)]
    pub(crate) city: Option<String>,
    #[serde(default)]
    pub(crate) google_name: Option<String>,
}

impl InputRow {
    /// The row's coordinate, or an error describing why it cannot be looked up.
    pub(crate) fn coordinate(&self) -> anyhow::Result<Coordinate> {
        parse_coordinate(self.lat, self.lon)
    }
}

pub(crate) fn parse_coordinate(lat: Option<f64>, lon: Option<f64>) -> anyhow::Result<Coordinate> {
    let (Some(lat), Some(lon)) = (lat, lon) else {
        anyhow::bail!("missing or unparsable Lat/Lon");
    };
    Ok(Coordinate::new(lat, lon)?)
}
