//! NCEI Climate Data Online client library.
//!
//! A Rust library for querying NOAA NCEI's Climate Data Online (CDO) v2
//! web services: datasets, data categories, data types, location
//! categories, locations, stations, and observational data. Requests are
//! validated against endpoint metadata, rate limited, optionally cached on
//! disk, and paginated transparently into ordered record collections.
//!
//! # Quick Start
//!
//! ```no_run
//! use ncei::{DataQuery, NceiClient, SearchQuery};
//!
//! #[tokio::main]
//! async fn main() -> ncei::Result<()> {
//!     // Reads NCEI_TOKEN; tokens come from https://www.ncdc.noaa.gov/cdo-web/token
//!     let client = NceiClient::from_env()?;
//!
//!     // Find stations in the District of Columbia
//!     let stations = client
//!         .get_stations(&SearchQuery::new().locationid("FIPS:11").datasetid("GHCND"))
//!         .await?;
//!     println!("found {} stations", stations.len());
//!
//!     // Fetch daily temperature extremes for one station
//!     let data = client
//!         .get_data(
//!             &DataQuery::new("GHCND", "2015-12-01", "2015-12-02")
//!                 .stationid("GHCND:USC00186350")
//!                 .datatypeid("TMIN")
//!                 .datatypeid("TMAX"),
//!         )
//!         .await?;
//!     for record in data.values() {
//!         println!("{} {} {}", record.date, record.datatype, record.value);
//!     }
//!
//!     // Export to CSV
//!     data.to_csv("observations.csv")?;
//!     Ok(())
//! }
//! ```
//!
//! # Architecture
//!
//! [`NceiClient`] owns the HTTP plumbing: token auth, the inter-request
//! wait, the on-disk [`ResponseCache`], and offset-based pagination. Each
//! record type implements the capability traits its endpoint supports:
//!
//! - [`Get`] - fetch a single entity by ID
//! - [`List`] - fetch pages or complete result sets
//!
//! Results come back as an [`NceiResponse`], which preserves API order and
//! records per-page provenance (URL, fetch time, cache hit).
//!
//! # Configuration
//!
//! The client reads configuration from environment variables:
//!
//! - `NCEI_TOKEN` (required) - Your CDO API token
//! - `NCEI_API_URL` (optional) - Base URL (defaults to
//!   `https://www.ncdc.noaa.gov/cdo-web/api/v2`)

mod cache;
mod client;
mod endpoint;
mod error;
mod lookup;
mod models;
mod pagination;
mod query;
mod response;
mod traits;
mod validate;

pub mod cli;
pub mod output;

// Re-export core types
pub use cache::{CacheEntry, ResponseCache};
pub use client::{Fetched, NceiClient, DEFAULT_LIMIT, DEFAULT_WAIT};
pub use error::{NceiError, Result};
pub use pagination::{Page, ResultSet};
pub use response::{NceiResponse, Retrieved};

// Re-export endpoint and validation machinery
pub use endpoint::{Endpoint, ParamKind, ParamSpec, ENDPOINTS, METADATA_ENDPOINTS};
pub use lookup::{FoundId, LookupEntry, LookupTables};
pub use validate::{validate_params, MAX_LIMIT};

// Re-export queries
pub use query::{DataQuery, Extent, QueryParams, SearchQuery};

// Re-export traits
pub use traits::{Entity, Get, List};

// Re-export models
pub use models::{
    DataCategory, DataRecord, DataType, Dataset, Location, LocationCategory, Station,
};
