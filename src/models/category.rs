//! Data-category and location-category models.

use serde::{Deserialize, Serialize};

use crate::endpoint::Endpoint;
use crate::query::SearchQuery;
use crate::traits::{Entity, Get, List};

/// A grouping of data types (e.g. `TEMP`, "Air Temperature").
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataCategory {
    /// The category ID (e.g. `TEMP`).
    pub id: String,
    /// Human-readable name.
    pub name: String,
}

impl Entity for DataCategory {
    const ENDPOINT: Endpoint = Endpoint::DataCategories;
    type Query = SearchQuery;
}

impl Get for DataCategory {}
impl List for DataCategory {}

/// A grouping of locations (e.g. `ST`, "State").
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocationCategory {
    /// The category ID (e.g. `ST`).
    pub id: String,
    /// Human-readable name.
    pub name: String,
}

impl Entity for LocationCategory {
    const ENDPOINT: Endpoint = Endpoint::LocationCategories;
    type Query = SearchQuery;
}

impl Get for LocationCategory {}
impl List for LocationCategory {}
