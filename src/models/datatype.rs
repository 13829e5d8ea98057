//! Data-type model and trait implementations.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::endpoint::Endpoint;
use crate::query::SearchQuery;
use crate::traits::{Entity, Get, List};

/// A kind of observation within a dataset (e.g. `TMIN`, minimum
/// temperature).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataType {
    /// The data type ID (e.g. `TMIN`).
    pub id: String,

    /// Human-readable name. Absent for a handful of legacy types.
    #[serde(default)]
    pub name: Option<String>,

    /// Earliest date with observations of this type.
    #[serde(default)]
    pub mindate: Option<NaiveDate>,

    /// Latest date with observations of this type.
    #[serde(default)]
    pub maxdate: Option<NaiveDate>,

    /// Fraction of the covered period with data present.
    #[serde(default)]
    pub datacoverage: Option<f64>,
}

impl Entity for DataType {
    const ENDPOINT: Endpoint = Endpoint::DataTypes;
    type Query = SearchQuery;
}

impl Get for DataType {}
impl List for DataType {}
