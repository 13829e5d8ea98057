//! Station model and trait implementations.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::endpoint::Endpoint;
use crate::query::SearchQuery;
use crate::traits::{Entity, Get, List};

/// An observation station (e.g. `GHCND:USC00186350`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Station {
    /// The station ID, prefixed by its network (e.g. `COOP:010957`).
    pub id: String,

    /// Station name (e.g. "BOAZ, AL US").
    pub name: String,

    /// Latitude in decimal degrees.
    #[serde(default)]
    pub latitude: Option<f64>,

    /// Longitude in decimal degrees.
    #[serde(default)]
    pub longitude: Option<f64>,

    /// Elevation above sea level.
    #[serde(default)]
    pub elevation: Option<f64>,

    /// Unit of the elevation value (e.g. `METERS`).
    #[serde(rename = "elevationUnit", default)]
    pub elevation_unit: Option<String>,

    /// First date with observations from this station.
    #[serde(default)]
    pub mindate: Option<NaiveDate>,

    /// Last date with observations from this station.
    #[serde(default)]
    pub maxdate: Option<NaiveDate>,

    /// Fraction of the covered period with data present.
    #[serde(default)]
    pub datacoverage: Option<f64>,
}

impl Station {
    /// The network prefix of the ID (e.g. `GHCND` for `GHCND:USC00186350`).
    pub fn network(&self) -> Option<&str> {
        self.id.split(':').next()
    }

    /// Latitude/longitude pair, when the station reports coordinates.
    pub fn coordinates(&self) -> Option<(f64, f64)> {
        Some((self.latitude?, self.longitude?))
    }
}

impl Entity for Station {
    const ENDPOINT: Endpoint = Endpoint::Stations;
    type Query = SearchQuery;
}

impl Get for Station {}
impl List for Station {}
