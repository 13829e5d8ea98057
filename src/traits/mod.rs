//! Trait definitions for NCEI operations.
//!
//! [`Entity`] ties a record type to the endpoint that serves it; record
//! types then implement the capability traits their endpoint supports
//! (`data` is list-only, the metadata endpoints support both).

mod get;
mod list;

pub use get::Get;
pub use list::List;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::endpoint::Endpoint;
use crate::query::QueryParams;

/// A record type served by one CDO endpoint.
pub trait Entity: DeserializeOwned + Serialize + Send + Sync + Sized {
    /// The endpoint that serves this record type.
    const ENDPOINT: Endpoint;

    /// Query type for listing records of this type.
    type Query: QueryParams + Send + Sync;
}
