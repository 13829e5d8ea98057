//! NCEI CDO v2 API client.
//!
//! Low-level HTTP client that handles authentication, rate limiting,
//! response caching, and paginated fetches. One convenience method per
//! endpoint category sits on top; entity types additionally implement the
//! `Get` and `List` traits.

use std::env;
use std::sync::{Arc, RwLock};
use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use tokio::sync::Mutex;
use url::Url;

use crate::cache::{CacheEntry, ResponseCache};
use crate::endpoint::Endpoint;
use crate::error::{NceiError, Result};
use crate::lookup::{FoundId, LookupEntry, LookupTables};
use crate::models::{
    DataCategory, DataRecord, DataType, Dataset, Location, LocationCategory, Station,
};
use crate::pagination::Page;
use crate::query::{DataQuery, QueryParams, SearchQuery};
use crate::response::NceiResponse;
use crate::validate::validate_params;

const DEFAULT_API_URL: &str = "https://www.ncdc.noaa.gov/cdo-web/api/v2";
const USER_AGENT: &str = concat!("ncei/", env!("CARGO_PKG_VERSION"));

/// Page size used when a query does not set `limit` (the service maximum).
pub const DEFAULT_LIMIT: u32 = 1000;

/// Delay between network requests, honoring the 5 requests/second limit.
pub const DEFAULT_WAIT: Duration = Duration::from_millis(200);

/// Maximum pages to fetch per query (safety limit).
const MAX_PAGES: u32 = 1000;

/// A fetched response body with its provenance.
#[derive(Debug, Clone)]
pub struct Fetched {
    /// The raw response body.
    pub body: String,
    /// The full request URL (token excluded).
    pub url: String,
    /// When the body was fetched from the network.
    pub retrieved: DateTime<Utc>,
    /// Whether the body came from the on-disk cache.
    pub from_cache: bool,
}

/// NCEI CDO v2 API client.
///
/// Holds the API token, the response cache, the inter-request wait, and the
/// parameter-validation flag. Cheaply cloneable; clones share the underlying
/// connection pool and rate-limit state.
///
/// # Example
///
/// ```no_run
/// use ncei::{NceiClient, SearchQuery};
///
/// # async fn example() -> ncei::Result<()> {
/// let client = NceiClient::from_env()?.with_validation(true);
///
/// let stations = client
///     .get_stations(&SearchQuery::new().locationid("FIPS:11"))
///     .await?;
/// println!("found {} stations", stations.len());
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct NceiClient {
    http: Client,
    base_url: Arc<Url>,
    token: String,
    wait: Duration,
    cache: Option<ResponseCache>,
    validate: bool,
    lookups: Arc<RwLock<LookupTables>>,
    last_request: Arc<Mutex<Option<Instant>>>,
}

impl std::fmt::Debug for NceiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NceiClient")
            .field("base_url", &self.base_url.as_str())
            .field("validate", &self.validate)
            .field("cached", &self.cache.is_some())
            .finish_non_exhaustive()
    }
}

impl NceiClient {
    /// Create a client with the provided API token.
    ///
    /// Tokens are issued at <https://www.ncdc.noaa.gov/cdo-web/token>.
    pub fn new(token: &str) -> Result<Self> {
        Self::with_base_url(token, DEFAULT_API_URL)
    }

    /// Create a client from environment variables.
    ///
    /// Uses `NCEI_TOKEN` for authentication and optionally `NCEI_API_URL`
    /// for the base URL.
    ///
    /// # Errors
    ///
    /// Returns an error if `NCEI_TOKEN` is not set.
    pub fn from_env() -> Result<Self> {
        let token = env::var("NCEI_TOKEN").map_err(|_| {
            NceiError::ConfigMissing("NCEI_TOKEN environment variable not set".to_string())
        })?;
        let base_url = env::var("NCEI_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string());
        Self::with_base_url(&token, &base_url)
    }

    /// Create a client against a non-default base URL.
    pub fn with_base_url(token: &str, base_url: &str) -> Result<Self> {
        // Ensure base URL ends with / so Url::join keeps the path
        let base_url_str = if base_url.ends_with('/') {
            base_url.to_string()
        } else {
            format!("{base_url}/")
        };
        let base_url = Url::parse(&base_url_str)?;

        let http = Client::builder()
            .user_agent(USER_AGENT)
            .brotli(true)
            .gzip(true)
            .deflate(true)
            .timeout(Duration::from_secs(300))
            .build()
            .map_err(NceiError::HttpError)?;

        Ok(Self {
            http,
            base_url: Arc::new(base_url),
            token: token.to_string(),
            wait: DEFAULT_WAIT,
            cache: None,
            validate: false,
            lookups: Arc::new(RwLock::new(LookupTables::embedded())),
            last_request: Arc::new(Mutex::new(None)),
        })
    }

    /// Cache responses on disk. Cache hits skip the network and the
    /// inter-request wait.
    #[must_use]
    pub fn with_cache(mut self, cache: ResponseCache) -> Self {
        self.cache = Some(cache);
        self
    }

    /// Set the delay between network requests.
    #[must_use]
    pub fn with_wait(mut self, wait: Duration) -> Self {
        self.wait = wait;
        self
    }

    /// Validate query parameters against endpoint metadata before sending.
    #[must_use]
    pub fn with_validation(mut self, validate: bool) -> Self {
        self.validate = validate;
        self
    }

    /// Replace the lookup tables (e.g. with [`LookupTables::from_dir`]).
    #[must_use]
    pub fn with_lookups(self, lookups: LookupTables) -> Self {
        *self.lookups.write().unwrap_or_else(|e| e.into_inner()) = lookups;
        self
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    // Endpoint convenience methods

    /// List datasets matching `query`.
    pub async fn get_datasets(&self, query: &SearchQuery) -> Result<NceiResponse<Dataset>> {
        self.get_all(Endpoint::Datasets, query).await
    }

    /// Fetch a single dataset by ID (e.g. `GHCND`).
    pub async fn get_dataset(&self, id: &str) -> Result<NceiResponse<Dataset>> {
        self.get_by_id(Endpoint::Datasets, id).await
    }

    /// List data categories matching `query`.
    pub async fn get_data_categories(
        &self,
        query: &SearchQuery,
    ) -> Result<NceiResponse<DataCategory>> {
        self.get_all(Endpoint::DataCategories, query).await
    }

    /// Fetch a single data category by ID (e.g. `TEMP`).
    pub async fn get_data_category(&self, id: &str) -> Result<NceiResponse<DataCategory>> {
        self.get_by_id(Endpoint::DataCategories, id).await
    }

    /// List data types matching `query`.
    pub async fn get_data_types(&self, query: &SearchQuery) -> Result<NceiResponse<DataType>> {
        self.get_all(Endpoint::DataTypes, query).await
    }

    /// Fetch a single data type by ID (e.g. `TMIN`).
    pub async fn get_data_type(&self, id: &str) -> Result<NceiResponse<DataType>> {
        self.get_by_id(Endpoint::DataTypes, id).await
    }

    /// List location categories matching `query`.
    pub async fn get_location_categories(
        &self,
        query: &SearchQuery,
    ) -> Result<NceiResponse<LocationCategory>> {
        self.get_all(Endpoint::LocationCategories, query).await
    }

    /// Fetch a single location category by ID (e.g. `ST`).
    pub async fn get_location_category(&self, id: &str) -> Result<NceiResponse<LocationCategory>> {
        self.get_by_id(Endpoint::LocationCategories, id).await
    }

    /// List locations matching `query`.
    pub async fn get_locations(&self, query: &SearchQuery) -> Result<NceiResponse<Location>> {
        self.get_all(Endpoint::Locations, query).await
    }

    /// Fetch a single location by ID (e.g. `FIPS:11`).
    pub async fn get_location(&self, id: &str) -> Result<NceiResponse<Location>> {
        self.get_by_id(Endpoint::Locations, id).await
    }

    /// List stations matching `query`.
    pub async fn get_stations(&self, query: &SearchQuery) -> Result<NceiResponse<Station>> {
        self.get_all(Endpoint::Stations, query).await
    }

    /// Fetch a single station by ID (e.g. `COOP:010957`).
    pub async fn get_station(&self, id: &str) -> Result<NceiResponse<Station>> {
        self.get_by_id(Endpoint::Stations, id).await
    }

    /// Fetch observational data.
    ///
    /// The service requires `datasetid`, `startdate`, and `enddate`.
    pub async fn get_data(&self, query: &DataQuery) -> Result<NceiResponse<DataRecord>> {
        self.get_all(Endpoint::Data, query).await
    }

    // Lookup table operations

    /// Case-insensitive substring search over the lookup tables.
    ///
    /// With `endpoint` set, only that table is searched; otherwise every
    /// metadata endpoint is.
    pub fn find_ids(&self, term: &str, endpoint: Option<Endpoint>) -> Vec<FoundId> {
        self.lookups
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .find_ids(term, endpoint)
    }

    /// Re-download the full listing for each endpoint and rewrite its
    /// lookup CSV in `dir`. The in-memory tables are updated as well.
    #[tracing::instrument(skip(self))]
    pub async fn refresh_lookups(
        &self,
        endpoints: &[Endpoint],
        dir: &std::path::Path,
    ) -> Result<()> {
        for endpoint in endpoints {
            let listing: NceiResponse<LookupEntry> =
                self.get_all(*endpoint, &SearchQuery::new()).await?;
            let entries = listing.into_values();
            tracing::info!(endpoint = %endpoint, rows = entries.len(), "refreshed lookup table");

            let mut lookups = self.lookups.write().unwrap_or_else(|e| e.into_inner());
            lookups.replace(*endpoint, entries);
            lookups.write_csv(*endpoint, dir)?;
        }
        Ok(())
    }

    // Fetch plumbing

    /// Fetch `endpoint/{id}` as a one-record response.
    pub async fn get_by_id<T: DeserializeOwned>(
        &self,
        endpoint: Endpoint,
        id: &str,
    ) -> Result<NceiResponse<T>> {
        let path = format!("{}/{}", endpoint.path(), urlencoding::encode(id));
        let fetched = self.fetch(&path, &[]).await?;
        let page: Page<T> = Page::from_body(&fetched.body)?;
        let mut response = NceiResponse::new();
        response.push_page(
            page.items,
            &fetched.url,
            fetched.retrieved,
            fetched.from_cache,
            page.total,
        );
        Ok(response)
    }

    /// Validate `query` (when enabled) and fetch every matching record,
    /// paging by offset until the reported count is exhausted or the
    /// query's `max` cap is reached.
    pub async fn get_all<T, Q>(&self, endpoint: Endpoint, query: &Q) -> Result<NceiResponse<T>>
    where
        T: DeserializeOwned,
        Q: QueryParams,
    {
        let params = query.to_params();
        if self.validate {
            let lookups = self.lookups.read().unwrap_or_else(|e| e.into_inner());
            validate_params(endpoint, &params, &lookups)?;
        }
        self.fetch_pages(endpoint, params, query.max()).await
    }

    #[tracing::instrument(skip(self, params), fields(endpoint = %endpoint))]
    async fn fetch_pages<T: DeserializeOwned>(
        &self,
        endpoint: Endpoint,
        params: Vec<(String, String)>,
        max: Option<usize>,
    ) -> Result<NceiResponse<T>> {
        let mut offset: u64 = take_param(&params, "offset")
            .and_then(|v| v.parse().ok())
            .unwrap_or(1);
        let limit: u32 = take_param(&params, "limit")
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_LIMIT);
        let base: Vec<(String, String)> = params
            .into_iter()
            .filter(|(name, _)| name != "offset" && name != "limit")
            .collect();

        let mut response = NceiResponse::new();
        let mut pages = 0u32;
        loop {
            let remaining = max.map(|m| m.saturating_sub(response.len()));
            if remaining == Some(0) {
                break;
            }
            let page_limit = match remaining {
                Some(r) => limit.min(r.min(u32::MAX as usize) as u32),
                None => limit,
            };

            let mut page_params = base.clone();
            page_params.push(("limit".to_string(), page_limit.to_string()));
            page_params.push(("offset".to_string(), offset.to_string()));

            let fetched = self.fetch(endpoint.path(), &page_params).await?;
            let page: Page<T> = Page::from_body(&fetched.body)?;
            let fetched_count = page.len();
            let has_more = page.has_more;
            offset = page.next_offset();

            response.push_page(
                page.items,
                &fetched.url,
                fetched.retrieved,
                fetched.from_cache,
                page.total,
            );

            if fetched_count == 0 || !has_more {
                break;
            }
            pages += 1;
            if pages >= MAX_PAGES {
                tracing::warn!("reached pagination limit of {MAX_PAGES} pages, stopping");
                break;
            }
        }

        if let Some(max) = max {
            response.truncate(max);
        }
        Ok(response)
    }

    /// Fetch a single response body, consulting the cache first.
    #[tracing::instrument(skip(self, params))]
    pub async fn fetch(&self, path: &str, params: &[(String, String)]) -> Result<Fetched> {
        let key = ResponseCache::key(path, params);
        if let Some(cache) = &self.cache {
            if let Some(entry) = cache.get(&key)? {
                tracing::debug!(path, "cache hit");
                return Ok(Fetched {
                    body: entry.body,
                    url: entry.url,
                    retrieved: entry.retrieved,
                    from_cache: true,
                });
            }
        }

        self.throttle().await;

        let url = self.base_url.join(path)?;
        let request = self.http.get(url).header("token", self.token.as_str());
        let request = if params.is_empty() {
            request
        } else {
            request.query(params)
        };

        let response = request.send().await.map_err(NceiError::HttpError)?;
        let response = Self::check_response(response).await?;

        let url = response.url().to_string();
        let retrieved = Utc::now();
        let body = response.text().await.map_err(NceiError::HttpError)?;

        if let Some(cache) = &self.cache {
            cache.put(
                &key,
                &CacheEntry {
                    url: url.clone(),
                    retrieved,
                    body: body.clone(),
                },
            )?;
        }

        Ok(Fetched {
            body,
            url,
            retrieved,
            from_cache: false,
        })
    }

    /// Sleep out the remainder of the inter-request wait.
    async fn throttle(&self) {
        let mut last = self.last_request.lock().await;
        if let Some(prev) = *last {
            let elapsed = prev.elapsed();
            if elapsed < self.wait {
                tokio::time::sleep(self.wait - elapsed).await;
            }
        }
        *last = Some(Instant::now());
    }

    /// Check response status and convert errors.
    async fn check_response(response: Response) -> Result<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        if status.as_u16() == 429 {
            let retry_after = response
                .headers()
                .get("retry-after")
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.parse().ok());
            return Err(NceiError::RateLimited {
                retry_after_secs: retry_after,
            });
        }

        let message = Self::extract_error_message(response, status).await;
        Err(NceiError::ApiError {
            message,
            status_code: Some(status.as_u16()),
        })
    }

    /// Extract error message from a failed response.
    async fn extract_error_message(response: Response, status: reqwest::StatusCode) -> String {
        let body = match response.text().await {
            Ok(b) => b,
            Err(_) => return format!("HTTP {status}"),
        };

        // CDO errors carry developerMessage; be lenient about the field name
        if let Ok(json) = serde_json::from_str::<serde_json::Value>(&body) {
            for field in ["developerMessage", "message", "error"] {
                if let Some(msg) = json.get(field).and_then(|m| m.as_str()) {
                    return msg.to_string();
                }
            }
        }

        if body.is_empty() {
            format!("HTTP {status}")
        } else {
            body
        }
    }
}

fn take_param<'a>(params: &'a [(String, String)], name: &str) -> Option<&'a str> {
    params
        .iter()
        .find(|(n, _)| n == name)
        .map(|(_, v)| v.as_str())
}
