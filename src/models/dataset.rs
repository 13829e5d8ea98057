//! Dataset model and trait implementations.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::endpoint::Endpoint;
use crate::query::SearchQuery;
use crate::traits::{Entity, Get, List};

/// A CDO dataset, the top-level container observational data lives in
/// (e.g. `GHCND`, the daily summaries).
///
/// Every data request names exactly one dataset; most other filters narrow
/// within it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Dataset {
    /// The dataset ID (e.g. `GHCND`).
    pub id: String,

    /// Human-readable name (e.g. "Daily Summaries").
    pub name: String,

    /// Opaque unique identifier assigned by the service.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uid: Option<String>,

    /// Earliest date with data in this dataset.
    #[serde(default)]
    pub mindate: Option<NaiveDate>,

    /// Latest date with data in this dataset.
    #[serde(default)]
    pub maxdate: Option<NaiveDate>,

    /// Fraction of the covered period with data present (0.0 to 1.0).
    #[serde(default)]
    pub datacoverage: Option<f64>,
}

impl Entity for Dataset {
    const ENDPOINT: Endpoint = Endpoint::Datasets;
    type Query = SearchQuery;
}

impl Get for Dataset {}
impl List for Dataset {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_dataset() {
        let dataset: Dataset = serde_json::from_value(serde_json::json!({
            "uid": "gov.noaa.ncdc:C00861",
            "mindate": "1763-01-01",
            "maxdate": "2026-08-29",
            "name": "Daily Summaries",
            "datacoverage": 1,
            "id": "GHCND"
        }))
        .unwrap();

        assert_eq!(dataset.id, "GHCND");
        assert_eq!(dataset.name, "Daily Summaries");
        assert_eq!(dataset.datacoverage, Some(1.0));
        assert_eq!(
            dataset.mindate,
            Some(NaiveDate::from_ymd_opt(1763, 1, 1).unwrap())
        );
    }
}
