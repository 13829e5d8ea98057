//! List trait for fetching collections of entities.

use async_trait::async_trait;

use crate::client::NceiClient;
use crate::error::Result;
use crate::pagination::Page;
use crate::query::QueryParams;
use crate::response::NceiResponse;
use crate::traits::Entity;

/// List entities with offset-based pagination.
///
/// # Example
///
/// ```no_run
/// use ncei::{NceiClient, SearchQuery, Station, List};
///
/// # async fn example() -> ncei::Result<()> {
/// let client = NceiClient::from_env()?;
/// let query = SearchQuery::new().locationid("FIPS:11");
///
/// // Fetch a single page
/// let page = Station::list_page(&client, &query, 1, 100).await?;
///
/// // Fetch every matching record
/// let stations = Station::list_all(&client, &query).await?;
/// # Ok(())
/// # }
/// ```
#[async_trait]
pub trait List: Entity {
    /// Fetch a single page at a 1-based `offset`.
    ///
    /// Any `offset` or `limit` already on the query is replaced by the
    /// arguments. This is the raw page fetch; it does not run parameter
    /// validation.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the body does not parse.
    async fn list_page(
        client: &NceiClient,
        query: &Self::Query,
        offset: u64,
        limit: u32,
    ) -> Result<Page<Self>> {
        let mut params = query.to_params();
        params.retain(|(name, _)| name != "offset" && name != "limit");
        params.push(("limit".to_string(), limit.to_string()));
        params.push(("offset".to_string(), offset.to_string()));

        let fetched = client.fetch(Self::ENDPOINT.path(), &params).await?;
        Page::from_body(&fetched.body)
    }

    /// Fetch every record matching the query, paging until the reported
    /// count is exhausted or the query's `max` cap is reached.
    ///
    /// # Errors
    ///
    /// Returns a validation error (when the client has validation enabled)
    /// or any error from a page request.
    async fn list_all(client: &NceiClient, query: &Self::Query) -> Result<NceiResponse<Self>> {
        client.get_all(Self::ENDPOINT, query).await
    }
}
