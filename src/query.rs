//! Query builders for CDO endpoint requests.
//!
//! Queries flatten to ordered `(name, value)` pairs; ID filters repeat the
//! key once per value, the way the CDO service expects. `max` is a
//! client-side cap on the total number of records fetched and is never sent
//! on the wire.

use std::fmt;

/// Flatten a query into wire parameters and expose its client-side cap.
pub trait QueryParams {
    /// Ordered query pairs to send with the request.
    fn to_params(&self) -> Vec<(String, String)>;

    /// Client-side cap on total records fetched across pages, if any.
    fn max(&self) -> Option<usize> {
        None
    }
}

/// An empty query.
impl QueryParams for () {
    fn to_params(&self) -> Vec<(String, String)> {
        Vec::new()
    }
}

/// A geographic bounding box for station searches.
///
/// Serialized as `south,west,north,east` in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Extent {
    pub south: f64,
    pub west: f64,
    pub north: f64,
    pub east: f64,
}

impl Extent {
    pub fn new(south: f64, west: f64, north: f64, east: f64) -> Self {
        Self {
            south,
            west,
            north,
            east,
        }
    }
}

impl fmt::Display for Extent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{},{},{}", self.south, self.west, self.north, self.east)
    }
}

/// Query parameters for the six metadata endpoints.
///
/// Not every filter applies to every endpoint; validation (when enabled)
/// rejects filters the target endpoint does not accept.
///
/// # Example
///
/// ```no_run
/// use ncei::SearchQuery;
///
/// let query = SearchQuery::new()
///     .datasetid("GHCND")
///     .startdate("2015-12-01")
///     .enddate("2015-12-02")
///     .limit(100);
/// ```
#[derive(Debug, Clone, Default)]
pub struct SearchQuery {
    pub datasetid: Vec<String>,
    pub datacategoryid: Vec<String>,
    pub datatypeid: Vec<String>,
    pub locationcategoryid: Vec<String>,
    pub locationid: Vec<String>,
    pub stationid: Vec<String>,
    pub extent: Option<Extent>,
    pub startdate: Option<String>,
    pub enddate: Option<String>,
    pub sortfield: Option<String>,
    pub sortorder: Option<String>,
    pub limit: Option<u32>,
    pub offset: Option<u32>,
    /// Client-side cap on total records fetched; not sent to the API.
    pub max: Option<usize>,
    /// Extra raw parameters, passed through as-is.
    pub extra: Vec<(String, String)>,
}

impl SearchQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn datasetid(mut self, id: impl Into<String>) -> Self {
        self.datasetid.push(id.into());
        self
    }

    pub fn datacategoryid(mut self, id: impl Into<String>) -> Self {
        self.datacategoryid.push(id.into());
        self
    }

    pub fn datatypeid(mut self, id: impl Into<String>) -> Self {
        self.datatypeid.push(id.into());
        self
    }

    pub fn locationcategoryid(mut self, id: impl Into<String>) -> Self {
        self.locationcategoryid.push(id.into());
        self
    }

    pub fn locationid(mut self, id: impl Into<String>) -> Self {
        self.locationid.push(id.into());
        self
    }

    pub fn stationid(mut self, id: impl Into<String>) -> Self {
        self.stationid.push(id.into());
        self
    }

    pub fn extent(mut self, extent: Extent) -> Self {
        self.extent = Some(extent);
        self
    }

    pub fn startdate(mut self, date: impl Into<String>) -> Self {
        self.startdate = Some(date.into());
        self
    }

    pub fn enddate(mut self, date: impl Into<String>) -> Self {
        self.enddate = Some(date.into());
        self
    }

    pub fn sortfield(mut self, field: impl Into<String>) -> Self {
        self.sortfield = Some(field.into());
        self
    }

    pub fn sortorder(mut self, order: impl Into<String>) -> Self {
        self.sortorder = Some(order.into());
        self
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn offset(mut self, offset: u32) -> Self {
        self.offset = Some(offset);
        self
    }

    pub fn max(mut self, max: usize) -> Self {
        self.max = Some(max);
        self
    }

    /// Attach a raw parameter. Useful for parameters this builder does not
    /// model; validation still applies when enabled.
    pub fn param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra.push((name.into(), value.into()));
        self
    }
}

impl QueryParams for SearchQuery {
    fn to_params(&self) -> Vec<(String, String)> {
        let mut params = Vec::new();
        push_ids(&mut params, "datasetid", &self.datasetid);
        push_ids(&mut params, "datacategoryid", &self.datacategoryid);
        push_ids(&mut params, "datatypeid", &self.datatypeid);
        push_ids(&mut params, "locationcategoryid", &self.locationcategoryid);
        push_ids(&mut params, "locationid", &self.locationid);
        push_ids(&mut params, "stationid", &self.stationid);
        if let Some(extent) = self.extent {
            params.push(("extent".to_string(), extent.to_string()));
        }
        push_opt(&mut params, "startdate", self.startdate.as_deref());
        push_opt(&mut params, "enddate", self.enddate.as_deref());
        push_opt(&mut params, "sortfield", self.sortfield.as_deref());
        push_opt(&mut params, "sortorder", self.sortorder.as_deref());
        if let Some(limit) = self.limit {
            params.push(("limit".to_string(), limit.to_string()));
        }
        if let Some(offset) = self.offset {
            params.push(("offset".to_string(), offset.to_string()));
        }
        params.extend(self.extra.iter().cloned());
        params
    }

    fn max(&self) -> Option<usize> {
        self.max
    }
}

/// Query parameters for the data endpoint.
///
/// `datasetid`, `startdate`, and `enddate` are required by the service.
///
/// # Example
///
/// ```no_run
/// use ncei::DataQuery;
///
/// let query = DataQuery::new("GHCND", "2015-12-01", "2015-12-02")
///     .stationid("GHCND:USC00186350")
///     .datatypeid("TMIN")
///     .datatypeid("TMAX");
/// ```
#[derive(Debug, Clone, Default)]
pub struct DataQuery {
    pub datasetid: Option<String>,
    pub datatypeid: Vec<String>,
    pub locationid: Vec<String>,
    pub stationid: Vec<String>,
    pub startdate: Option<String>,
    pub enddate: Option<String>,
    pub units: Option<String>,
    pub sortfield: Option<String>,
    pub sortorder: Option<String>,
    pub limit: Option<u32>,
    pub offset: Option<u32>,
    pub include_metadata: Option<bool>,
    /// Client-side cap on total records fetched; not sent to the API.
    pub max: Option<usize>,
    /// Extra raw parameters, passed through as-is.
    pub extra: Vec<(String, String)>,
}

impl DataQuery {
    pub fn new(
        datasetid: impl Into<String>,
        startdate: impl Into<String>,
        enddate: impl Into<String>,
    ) -> Self {
        Self {
            datasetid: Some(datasetid.into()),
            startdate: Some(startdate.into()),
            enddate: Some(enddate.into()),
            ..Self::default()
        }
    }

    /// An empty data query, for building up piecemeal. The service rejects
    /// it until dataset and date range are set.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn datatypeid(mut self, id: impl Into<String>) -> Self {
        self.datatypeid.push(id.into());
        self
    }

    pub fn locationid(mut self, id: impl Into<String>) -> Self {
        self.locationid.push(id.into());
        self
    }

    pub fn stationid(mut self, id: impl Into<String>) -> Self {
        self.stationid.push(id.into());
        self
    }

    pub fn units(mut self, units: impl Into<String>) -> Self {
        self.units = Some(units.into());
        self
    }

    pub fn sortfield(mut self, field: impl Into<String>) -> Self {
        self.sortfield = Some(field.into());
        self
    }

    pub fn sortorder(mut self, order: impl Into<String>) -> Self {
        self.sortorder = Some(order.into());
        self
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn offset(mut self, offset: u32) -> Self {
        self.offset = Some(offset);
        self
    }

    pub fn include_metadata(mut self, include: bool) -> Self {
        self.include_metadata = Some(include);
        self
    }

    pub fn max(mut self, max: usize) -> Self {
        self.max = Some(max);
        self
    }

    pub fn param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra.push((name.into(), value.into()));
        self
    }
}

impl QueryParams for DataQuery {
    fn to_params(&self) -> Vec<(String, String)> {
        let mut params = Vec::new();
        push_opt(&mut params, "datasetid", self.datasetid.as_deref());
        push_ids(&mut params, "datatypeid", &self.datatypeid);
        push_ids(&mut params, "locationid", &self.locationid);
        push_ids(&mut params, "stationid", &self.stationid);
        push_opt(&mut params, "startdate", self.startdate.as_deref());
        push_opt(&mut params, "enddate", self.enddate.as_deref());
        push_opt(&mut params, "units", self.units.as_deref());
        push_opt(&mut params, "sortfield", self.sortfield.as_deref());
        push_opt(&mut params, "sortorder", self.sortorder.as_deref());
        if let Some(limit) = self.limit {
            params.push(("limit".to_string(), limit.to_string()));
        }
        if let Some(offset) = self.offset {
            params.push(("offset".to_string(), offset.to_string()));
        }
        if let Some(include) = self.include_metadata {
            params.push(("includemetadata".to_string(), include.to_string()));
        }
        params.extend(self.extra.iter().cloned());
        params
    }

    fn max(&self) -> Option<usize> {
        self.max
    }
}

fn push_ids(params: &mut Vec<(String, String)>, name: &str, ids: &[String]) {
    for id in ids {
        params.push((name.to_string(), id.clone()));
    }
}

fn push_opt(params: &mut Vec<(String, String)>, name: &str, value: Option<&str>) {
    if let Some(value) = value {
        params.push((name.to_string(), value.to_string()));
    }
}
