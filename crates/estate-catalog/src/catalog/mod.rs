//! Listing records, the in-memory catalog, and the async service and HTTP routes over it.

pub mod domain;
pub mod pricing;
pub mod router;
pub mod service;
pub mod store;

#[cfg(test)]
mod tests;

pub use domain::{
    Coordinates, ListingAgent, ListingStatus, Location, Property, PropertyId, PropertyType,
};
pub use pricing::{compact_price, format_price};
pub use router::{
    catalog_router, CatalogApi, ListingView, SearchQuery, SearchResponse, RELATED_LIMIT,
};
pub use service::PropertyService;
pub use store::{CatalogError, CatalogRepository, CatalogStore};
