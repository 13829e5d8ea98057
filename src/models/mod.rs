//! NCEI CDO record types.

mod category;
mod data;
mod dataset;
mod datatype;
mod location;
mod station;

pub use category::{DataCategory, LocationCategory};
pub use data::DataRecord;
pub use dataset::Dataset;
pub use datatype::DataType;
pub use location::Location;
pub use station::Station;
