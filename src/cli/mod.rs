//! CLI argument parsing types.
//!
//! This module provides the command-line interface structure for the ncei binary.

use clap::{Parser, Subcommand, ValueEnum};

use crate::endpoint::Endpoint;

/// NCEI Climate Data Online command-line interface.
#[derive(Parser, Debug)]
#[command(name = "ncei", about = "NCEI Climate Data Online CLI", version)]
pub struct Cli {
    /// Output results as JSON instead of a table.
    #[arg(long, global = true, default_value = "false")]
    pub json: bool,

    /// API token (issued at https://www.ncdc.noaa.gov/cdo-web/token).
    #[arg(long, global = true, env = "NCEI_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Cache responses in this directory.
    #[arg(long, global = true)]
    pub cache_dir: Option<std::path::PathBuf>,

    /// Validate query parameters against endpoint metadata before sending.
    #[arg(long, global = true, default_value = "false")]
    pub validate: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Get a single entity by ID.
    Get {
        /// The type of entity to get.
        entity: EntityKind,

        /// The entity ID (e.g. GHCND, FIPS:11, COOP:010957).
        id: String,
    },

    /// List entities with optional filtering.
    List {
        /// The type of entity to list.
        entity: EntityKind,

        /// Filter by dataset ID.
        #[arg(long = "dataset")]
        datasets: Vec<String>,

        /// Filter by data type ID.
        #[arg(long = "datatype")]
        datatypes: Vec<String>,

        /// Filter by location ID.
        #[arg(long = "location")]
        locations: Vec<String>,

        /// Filter by station ID.
        #[arg(long = "station")]
        stations: Vec<String>,

        /// Start of the date range (YYYY-MM-DD).
        #[arg(long)]
        start: Option<String>,

        /// End of the date range (YYYY-MM-DD).
        #[arg(long)]
        end: Option<String>,

        /// Records per page (max 1000).
        #[arg(long)]
        limit: Option<u32>,

        /// Stop after this many records in total.
        #[arg(long)]
        max: Option<usize>,
    },

    /// Fetch observational data for a dataset and date range.
    Data {
        /// Dataset ID (e.g. GHCND).
        #[arg(long = "dataset")]
        dataset: String,

        /// Start of the date range (YYYY-MM-DD).
        #[arg(long)]
        start: String,

        /// End of the date range (YYYY-MM-DD).
        #[arg(long)]
        end: String,

        /// Filter by data type ID.
        #[arg(long = "datatype")]
        datatypes: Vec<String>,

        /// Filter by location ID.
        #[arg(long = "location")]
        locations: Vec<String>,

        /// Filter by station ID.
        #[arg(long = "station")]
        stations: Vec<String>,

        /// Unit system for values (standard or metric).
        #[arg(long)]
        units: Option<String>,

        /// Stop after this many records in total.
        #[arg(long)]
        max: Option<usize>,

        /// Write the records to this CSV file instead of printing.
        #[arg(long)]
        csv: Option<std::path::PathBuf>,
    },

    /// Search the lookup tables for IDs matching a term.
    Search {
        /// Case-insensitive term to match against IDs and names.
        term: String,

        /// Restrict the search to one endpoint (e.g. locations).
        #[arg(long)]
        endpoint: Option<Endpoint>,
    },

    /// Re-download lookup tables and write them as CSV files.
    RefreshLookups {
        /// Endpoints to refresh (default: all metadata endpoints).
        endpoints: Vec<Endpoint>,

        /// Directory to write the CSV files into.
        #[arg(long, default_value = ".")]
        dir: std::path::PathBuf,
    },
}

/// Entity types that can be fetched or listed.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum EntityKind {
    /// A dataset (e.g. GHCND).
    #[value(alias = "datasets")]
    Dataset,
    /// A data category (e.g. TEMP).
    #[value(alias = "datacategories", alias = "datacategory")]
    DataCategory,
    /// A data type (e.g. TMIN).
    #[value(alias = "datatypes", alias = "datatype")]
    DataType,
    /// A location category (e.g. ST).
    #[value(alias = "locationcategories", alias = "locationcategory")]
    LocationCategory,
    /// A location (e.g. FIPS:11).
    #[value(alias = "locations")]
    Location,
    /// A station (e.g. COOP:010957).
    #[value(alias = "stations")]
    Station,
}

impl EntityKind {
    /// The endpoint serving this entity kind.
    pub fn endpoint(self) -> Endpoint {
        match self {
            EntityKind::Dataset => Endpoint::Datasets,
            EntityKind::DataCategory => Endpoint::DataCategories,
            EntityKind::DataType => Endpoint::DataTypes,
            EntityKind::LocationCategory => Endpoint::LocationCategories,
            EntityKind::Location => Endpoint::Locations,
            EntityKind::Station => Endpoint::Stations,
        }
    }
}
