//! Location model and trait implementations.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::endpoint::Endpoint;
use crate::query::SearchQuery;
use crate::traits::{Entity, Get, List};

/// A geographic area data can be filtered by, from countries down to ZIP
/// codes (e.g. `FIPS:11`, the District of Columbia).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Location {
    /// The location ID (e.g. `FIPS:11`, `CITY:US000001`, `ZIP:48182`).
    pub id: String,

    /// Human-readable name.
    pub name: String,

    /// Earliest date with data for this location.
    #[serde(default)]
    pub mindate: Option<NaiveDate>,

    /// Latest date with data for this location.
    #[serde(default)]
    pub maxdate: Option<NaiveDate>,

    /// Fraction of the covered period with data present.
    #[serde(default)]
    pub datacoverage: Option<f64>,
}

impl Location {
    /// The category prefix of the ID (e.g. `FIPS` for `FIPS:11`).
    pub fn category_prefix(&self) -> Option<&str> {
        self.id.split(':').next()
    }
}

impl Entity for Location {
    const ENDPOINT: Endpoint = Endpoint::Locations;
    type Query = SearchQuery;
}

impl Get for Location {}
impl List for Location {}
