//! Get trait for fetching single entities.

use async_trait::async_trait;

use crate::client::NceiClient;
use crate::error::{NceiError, Result};
use crate::traits::Entity;

/// Fetch a single entity by ID.
///
/// Implemented by the six metadata record types; observational data has no
/// per-record IDs and is list-only.
///
/// # Example
///
/// ```no_run
/// use ncei::{NceiClient, Station, Get};
///
/// # async fn example() -> ncei::Result<()> {
/// let client = NceiClient::from_env()?;
/// let station = Station::get(&client, "COOP:010957").await?;
/// println!("{}", station.name);
/// # Ok(())
/// # }
/// ```
#[async_trait]
pub trait Get: Entity {
    /// Fetch the entity with `id`.
    ///
    /// # Errors
    ///
    /// Returns [`NceiError::NotFound`] if the service reports no entity
    /// under that ID, or any transport/parse error from the request.
    async fn get(client: &NceiClient, id: &str) -> Result<Self> {
        let response = client.get_by_id::<Self>(Self::ENDPOINT, id).await?;
        response
            .into_values()
            .into_iter()
            .next()
            .ok_or_else(|| NceiError::NotFound {
                endpoint: Self::ENDPOINT.path(),
                id: id.to_string(),
            })
    }
}
