//! CDO v2 endpoint definitions and parameter metadata.
//!
//! Each endpoint accepts a fixed set of query parameters. The tables here
//! are the single source of truth for parameter validation: which names an
//! endpoint accepts, what kind of value each expects, and which are required.

use std::fmt;
use std::str::FromStr;

use crate::error::NceiError;

/// Sort orders accepted by every endpoint.
pub const SORT_ORDERS: &[&str] = &["asc", "desc"];

/// Unit systems accepted by the data endpoint.
pub const UNITS: &[&str] = &["standard", "metric"];

/// Sort fields accepted by the six metadata endpoints.
const METADATA_SORT_FIELDS: &[&str] = &["id", "name", "mindate", "maxdate", "datacoverage"];

/// Sort fields accepted by the data endpoint.
const DATA_SORT_FIELDS: &[&str] = &["date", "datatype", "station", "value"];

const DATASETS_PARAMS: &[ParamSpec] = &[
    ParamSpec::id("datatypeid", Some(Endpoint::DataTypes)),
    ParamSpec::id("locationid", Some(Endpoint::Locations)),
    ParamSpec::id("stationid", Some(Endpoint::Stations)),
    ParamSpec::date("startdate"),
    ParamSpec::date("enddate"),
    ParamSpec::sort_field("sortfield"),
    ParamSpec::choice("sortorder", SORT_ORDERS),
    ParamSpec::int("limit"),
    ParamSpec::int("offset"),
];

const DATACATEGORIES_PARAMS: &[ParamSpec] = &[
    ParamSpec::id("datasetid", Some(Endpoint::Datasets)),
    ParamSpec::id("locationid", Some(Endpoint::Locations)),
    ParamSpec::id("stationid", Some(Endpoint::Stations)),
    ParamSpec::date("startdate"),
    ParamSpec::date("enddate"),
    ParamSpec::sort_field("sortfield"),
    ParamSpec::choice("sortorder", SORT_ORDERS),
    ParamSpec::int("limit"),
    ParamSpec::int("offset"),
];

const DATATYPES_PARAMS: &[ParamSpec] = &[
    ParamSpec::id("datasetid", Some(Endpoint::Datasets)),
    ParamSpec::id("locationid", Some(Endpoint::Locations)),
    ParamSpec::id("stationid", Some(Endpoint::Stations)),
    ParamSpec::id("datacategoryid", Some(Endpoint::DataCategories)),
    ParamSpec::date("startdate"),
    ParamSpec::date("enddate"),
    ParamSpec::sort_field("sortfield"),
    ParamSpec::choice("sortorder", SORT_ORDERS),
    ParamSpec::int("limit"),
    ParamSpec::int("offset"),
];

const LOCATIONCATEGORIES_PARAMS: &[ParamSpec] = &[
    ParamSpec::date("startdate"),
    ParamSpec::date("enddate"),
    ParamSpec::sort_field("sortfield"),
    ParamSpec::choice("sortorder", SORT_ORDERS),
    ParamSpec::int("limit"),
    ParamSpec::int("offset"),
];

const LOCATIONS_PARAMS: &[ParamSpec] = &[
    ParamSpec::id("datasetid", Some(Endpoint::Datasets)),
    ParamSpec::id("locationcategoryid", Some(Endpoint::LocationCategories)),
    ParamSpec::id("datacategoryid", Some(Endpoint::DataCategories)),
    ParamSpec::date("startdate"),
    ParamSpec::date("enddate"),
    ParamSpec::sort_field("sortfield"),
    ParamSpec::choice("sortorder", SORT_ORDERS),
    ParamSpec::int("limit"),
    ParamSpec::int("offset"),
];

const STATIONS_PARAMS: &[ParamSpec] = &[
    ParamSpec::id("datasetid", Some(Endpoint::Datasets)),
    ParamSpec::id("locationid", Some(Endpoint::Locations)),
    ParamSpec::id("datacategoryid", Some(Endpoint::DataCategories)),
    ParamSpec::id("datatypeid", Some(Endpoint::DataTypes)),
    ParamSpec::extent("extent"),
    ParamSpec::date("startdate"),
    ParamSpec::date("enddate"),
    ParamSpec::sort_field("sortfield"),
    ParamSpec::choice("sortorder", SORT_ORDERS),
    ParamSpec::int("limit"),
    ParamSpec::int("offset"),
];

const DATA_PARAMS: &[ParamSpec] = &[
    ParamSpec::single_id("datasetid", Some(Endpoint::Datasets)),
    ParamSpec::id("datatypeid", Some(Endpoint::DataTypes)),
    ParamSpec::id("locationid", Some(Endpoint::Locations)),
    ParamSpec::id("stationid", Some(Endpoint::Stations)),
    ParamSpec::date("startdate"),
    ParamSpec::date("enddate"),
    ParamSpec::choice("units", UNITS),
    ParamSpec::sort_field("sortfield"),
    ParamSpec::choice("sortorder", SORT_ORDERS),
    ParamSpec::int("limit"),
    ParamSpec::int("offset"),
    ParamSpec::choice("includemetadata", &["true", "false"]),
];

/// The endpoint categories exposed by the CDO v2 web service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    Datasets,
    DataCategories,
    DataTypes,
    LocationCategories,
    Locations,
    Stations,
    Data,
}

/// All endpoints, in the order the service documents them.
pub const ENDPOINTS: &[Endpoint] = &[
    Endpoint::Datasets,
    Endpoint::DataCategories,
    Endpoint::DataTypes,
    Endpoint::LocationCategories,
    Endpoint::Locations,
    Endpoint::Stations,
    Endpoint::Data,
];

/// The metadata endpoints (everything except `data`), which back lookup
/// tables and support fetch-by-ID.
pub const METADATA_ENDPOINTS: &[Endpoint] = &[
    Endpoint::Datasets,
    Endpoint::DataCategories,
    Endpoint::DataTypes,
    Endpoint::LocationCategories,
    Endpoint::Locations,
    Endpoint::Stations,
];

impl Endpoint {
    /// The URL path segment for this endpoint.
    pub fn path(self) -> &'static str {
        match self {
            Endpoint::Datasets => "datasets",
            Endpoint::DataCategories => "datacategories",
            Endpoint::DataTypes => "datatypes",
            Endpoint::LocationCategories => "locationcategories",
            Endpoint::Locations => "locations",
            Endpoint::Stations => "stations",
            Endpoint::Data => "data",
        }
    }

    /// Parameters this endpoint accepts, with the kind of value each expects.
    pub fn params(self) -> &'static [ParamSpec] {
        match self {
            Endpoint::Datasets => DATASETS_PARAMS,
            Endpoint::DataCategories => DATACATEGORIES_PARAMS,
            Endpoint::DataTypes => DATATYPES_PARAMS,
            Endpoint::LocationCategories => LOCATIONCATEGORIES_PARAMS,
            Endpoint::Locations => LOCATIONS_PARAMS,
            Endpoint::Stations => STATIONS_PARAMS,
            Endpoint::Data => DATA_PARAMS,
        }
    }

    /// Parameters that must be present for a request to this endpoint.
    pub fn required_params(self) -> &'static [&'static str] {
        match self {
            Endpoint::Data => &["datasetid", "startdate", "enddate"],
            _ => &[],
        }
    }

    /// Values accepted for this endpoint's `sortfield` parameter.
    pub fn sort_fields(self) -> &'static [&'static str] {
        match self {
            Endpoint::Data => DATA_SORT_FIELDS,
            _ => METADATA_SORT_FIELDS,
        }
    }

    /// Look up the spec for a parameter name, if this endpoint accepts it.
    pub fn param(self, name: &str) -> Option<&'static ParamSpec> {
        self.params().iter().find(|p| p.name == name)
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

impl FromStr for Endpoint {
    type Err = NceiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ENDPOINTS
            .iter()
            .copied()
            .find(|e| e.path() == s)
            .ok_or_else(|| NceiError::UnknownEndpoint(s.to_string()))
    }
}

/// The kind of value a parameter expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamKind {
    /// One or more entity IDs (`PREFIX:value`), optionally tied to the
    /// lookup table of another endpoint.
    Id {
        lookup: Option<Endpoint>,
        /// Maximum number of IDs accepted (the data endpoint takes exactly
        /// one `datasetid`).
        max_values: Option<usize>,
    },
    /// A `YYYY-MM-DD` date or ISO datetime.
    Date,
    /// A non-negative integer.
    Int,
    /// One of a fixed set of strings.
    Choice(&'static [&'static str]),
    /// The endpoint's sort-field set (resolved per endpoint).
    SortField,
    /// A bounding box: four comma-separated decimal degrees.
    Extent,
}

/// Specification of a single query parameter.
#[derive(Debug, Clone, Copy)]
pub struct ParamSpec {
    pub name: &'static str,
    pub kind: ParamKind,
}

impl ParamSpec {
    const fn id(name: &'static str, lookup: Option<Endpoint>) -> Self {
        Self {
            name,
            kind: ParamKind::Id {
                lookup,
                max_values: None,
            },
        }
    }

    const fn single_id(name: &'static str, lookup: Option<Endpoint>) -> Self {
        Self {
            name,
            kind: ParamKind::Id {
                lookup,
                max_values: Some(1),
            },
        }
    }

    const fn date(name: &'static str) -> Self {
        Self {
            name,
            kind: ParamKind::Date,
        }
    }

    const fn int(name: &'static str) -> Self {
        Self {
            name,
            kind: ParamKind::Int,
        }
    }

    const fn choice(name: &'static str, values: &'static [&'static str]) -> Self {
        Self {
            name,
            kind: ParamKind::Choice(values),
        }
    }

    const fn sort_field(name: &'static str) -> Self {
        Self {
            name,
            kind: ParamKind::SortField,
        }
    }

    const fn extent(name: &'static str) -> Self {
        Self {
            name,
            kind: ParamKind::Extent,
        }
    }
}
