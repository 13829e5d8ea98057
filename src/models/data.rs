//! Observational data model.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::endpoint::Endpoint;
use crate::query::DataQuery;
use crate::traits::{Entity, List};

/// A single observation from the data endpoint.
///
/// Values arrive in the units selected by the query's `units` parameter
/// (tenths of the base unit for some datasets when no conversion is
/// requested; see the dataset documentation).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataRecord {
    /// Observation timestamp (e.g. `2015-12-01T00:00:00`).
    pub date: NaiveDateTime,

    /// The data type observed (e.g. `TMAX`).
    pub datatype: String,

    /// The reporting station (e.g. `GHCND:USC00186350`).
    pub station: String,

    /// The observed value.
    pub value: f64,

    /// Source/measurement/quality flags, comma-separated, dataset-specific.
    #[serde(default)]
    pub attributes: Option<String>,
}

impl Entity for DataRecord {
    const ENDPOINT: Endpoint = Endpoint::Data;
    type Query = DataQuery;
}

// Observations have no per-record IDs; the data endpoint is list-only.
impl List for DataRecord {}
