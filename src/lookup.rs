//! Static lookup tables mapping entity IDs to names.
//!
//! Snapshots of the metadata endpoints ship with the crate as CSV files and
//! back three things: ID validation, fuzzy ID search (`find_ids`), and the
//! write target for `refresh_lookups`. The datasets, datacategories, and
//! locationcategories tables are complete listings; datatypes, locations,
//! and stations are partial snapshots (the full listings run to hundreds of
//! thousands of rows), so membership checks only apply to the complete ones.

use std::collections::HashMap;
use std::fs::File;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::endpoint::{Endpoint, METADATA_ENDPOINTS};
use crate::error::Result;

const DATASETS_CSV: &str = include_str!("../data/datasets.csv");
const DATACATEGORIES_CSV: &str = include_str!("../data/datacategories.csv");
const DATATYPES_CSV: &str = include_str!("../data/datatypes.csv");
const LOCATIONCATEGORIES_CSV: &str = include_str!("../data/locationcategories.csv");
const LOCATIONS_CSV: &str = include_str!("../data/locations.csv");
const STATIONS_CSV: &str = include_str!("../data/stations.csv");

/// One row of a lookup table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LookupEntry {
    pub id: String,
    pub name: String,
}

/// A match from [`LookupTables::find_ids`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FoundId {
    pub endpoint: Endpoint,
    pub id: String,
    pub name: String,
}

/// ID-to-name tables for the six metadata endpoints.
#[derive(Debug, Clone)]
pub struct LookupTables {
    tables: HashMap<Endpoint, Vec<LookupEntry>>,
}

impl LookupTables {
    /// Load the lookup tables shipped with the crate.
    pub fn embedded() -> Self {
        let mut tables = HashMap::new();
        for endpoint in METADATA_ENDPOINTS {
            let csv = match endpoint {
                Endpoint::Datasets => DATASETS_CSV,
                Endpoint::DataCategories => DATACATEGORIES_CSV,
                Endpoint::DataTypes => DATATYPES_CSV,
                Endpoint::LocationCategories => LOCATIONCATEGORIES_CSV,
                Endpoint::Locations => LOCATIONS_CSV,
                Endpoint::Stations => STATIONS_CSV,
                Endpoint::Data => unreachable!("data has no lookup table"),
            };
            tables.insert(*endpoint, parse_embedded(csv));
        }
        Self { tables }
    }

    /// Load refreshed tables from `dir`, falling back to the embedded
    /// snapshot for any endpoint whose CSV is absent.
    pub fn from_dir(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref();
        let mut tables = Self::embedded();
        for endpoint in METADATA_ENDPOINTS {
            let path = dir.join(format!("{}.csv", endpoint.path()));
            if path.exists() {
                let mut reader = csv::Reader::from_reader(File::open(&path)?);
                let mut entries = Vec::new();
                for row in reader.deserialize() {
                    let entry: LookupEntry = row?;
                    entries.push(entry);
                }
                tables.tables.insert(*endpoint, entries);
            }
        }
        Ok(tables)
    }

    /// Whether this endpoint's table is a complete listing, making ID
    /// membership checks meaningful.
    pub fn is_complete(&self, endpoint: Endpoint) -> bool {
        matches!(
            endpoint,
            Endpoint::Datasets | Endpoint::DataCategories | Endpoint::LocationCategories
        )
    }

    /// The entries for an endpoint. Empty for `data`.
    pub fn entries(&self, endpoint: Endpoint) -> &[LookupEntry] {
        self.tables.get(&endpoint).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Whether `id` appears in the endpoint's table.
    pub fn contains(&self, endpoint: Endpoint, id: &str) -> bool {
        self.entries(endpoint).iter().any(|e| e.id == id)
    }

    /// The name recorded for `id`, if any.
    pub fn name_of(&self, endpoint: Endpoint, id: &str) -> Option<&str> {
        self.entries(endpoint)
            .iter()
            .find(|e| e.id == id)
            .map(|e| e.name.as_str())
    }

    /// Case-insensitive substring search over IDs and names.
    ///
    /// With `endpoint` set the search covers that table only; otherwise it
    /// covers every metadata endpoint, in endpoint order.
    pub fn find_ids(&self, term: &str, endpoint: Option<Endpoint>) -> Vec<FoundId> {
        let term = term.to_lowercase();
        let endpoints: &[Endpoint] = match endpoint {
            Some(ref e) => std::slice::from_ref(e),
            None => METADATA_ENDPOINTS,
        };

        let mut found = Vec::new();
        for endpoint in endpoints {
            for entry in self.entries(*endpoint) {
                if entry.id.to_lowercase().contains(&term)
                    || entry.name.to_lowercase().contains(&term)
                {
                    found.push(FoundId {
                        endpoint: *endpoint,
                        id: entry.id.clone(),
                        name: entry.name.clone(),
                    });
                }
            }
        }
        found
    }

    /// Replace an endpoint's table in memory.
    pub fn replace(&mut self, endpoint: Endpoint, entries: Vec<LookupEntry>) {
        self.tables.insert(endpoint, entries);
    }

    /// Write an endpoint's table to `<dir>/<endpoint>.csv`, sorted by ID.
    pub fn write_csv(&self, endpoint: Endpoint, dir: impl AsRef<Path>) -> Result<()> {
        let path = dir.as_ref().join(format!("{}.csv", endpoint.path()));
        let mut entries = self.entries(endpoint).to_vec();
        entries.sort_by(|a, b| a.id.cmp(&b.id));

        let mut writer = csv::Writer::from_writer(File::create(&path)?);
        for entry in &entries {
            writer.serialize(entry)?;
        }
        writer.flush()?;
        Ok(())
    }
}

impl Default for LookupTables {
    fn default() -> Self {
        Self::embedded()
    }
}

fn parse_embedded(csv: &str) -> Vec<LookupEntry> {
    // The embedded snapshots are generated files; rows that fail to parse
    // are dropped rather than surfaced.
    csv::Reader::from_reader(csv.as_bytes())
        .deserialize()
        .filter_map(std::result::Result::ok)
        .collect()
}
