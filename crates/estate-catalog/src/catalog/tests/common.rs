use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use axum::response::Response;
use chrono::{TimeZone, Utc};
use serde_json::Value;

use crate::catalog::domain::{
    Coordinates, ListingAgent, ListingStatus, Location, Property, PropertyId, PropertyType,
};
use crate::catalog::router::{catalog_router, CatalogApi};
use crate::catalog::service::PropertyService;
use crate::catalog::store::{CatalogError, CatalogRepository, CatalogStore};
use crate::config::LatencyProfile;
use crate::favorites::FavoritesStore;

pub(super) fn property(id: &str, price: u64, city: &str, address: &str) -> Property {
    let listed = Utc
        .with_ymd_and_hms(2024, 3, 1, 9, 0, 0)
        .single()
        .expect("valid timestamp");
    Property {
        id: PropertyId::from(id),
        title: format!("Listing {id}"),
        price,
        location: Location {
            address: address.to_string(),
            city: city.to_string(),
            state: "IL".to_string(),
            zip_code: "62701".to_string(),
            coordinates: Coordinates {
                lat: 39.78,
                lng: -89.65,
            },
        },
        images: vec![format!("/images/{id}-1.jpg"), format!("/images/{id}-2.jpg")],
        bedrooms: 3,
        bathrooms: 2.0,
        square_footage: 1_800,
        property_type: PropertyType::House,
        description: "Sample listing".to_string(),
        features: vec!["Garage".to_string()],
        year_built: 2001,
        status: ListingStatus::ForSale,
        agent: ListingAgent {
            name: "Sarah Johnson".to_string(),
            phone: "(555) 123-4567".to_string(),
            email: "sarah@estatecatalog.example".to_string(),
            image: "/images/agents/sarah.jpg".to_string(),
        },
        created_at: listed,
        updated_at: listed,
    }
}

/// Three listings priced 200k / 500k / 1.2M.
pub(super) fn three_price_catalog() -> Vec<Property> {
    vec![
        property("p1", 200_000, "Springfield", "1 Elm Street"),
        property("p2", 500_000, "Boston", "2 Beacon Street"),
        property("p3", 1_200_000, "Springfield", "3 Oak Street"),
    ]
}

pub(super) fn memory_store() -> Arc<CatalogStore> {
    Arc::new(CatalogStore::new(three_price_catalog()).expect("valid catalog"))
}

pub(super) fn service_over<R: CatalogRepository + 'static>(
    repository: Arc<R>,
) -> PropertyService<R> {
    PropertyService::new(repository, LatencyProfile::none())
}

pub(super) fn api_over<R: CatalogRepository + 'static>(
    repository: Arc<R>,
    favorites: FavoritesStore,
) -> CatalogApi<R> {
    CatalogApi {
        service: Arc::new(service_over(repository)),
        favorites,
    }
}

pub(super) fn router_with_store(favorites: FavoritesStore) -> axum::Router {
    catalog_router(api_over(memory_store(), favorites))
}

pub(super) struct UnavailableRepository;

impl CatalogRepository for UnavailableRepository {
    fn all(&self) -> Result<Vec<Property>, CatalogError> {
        Err(CatalogError::Unavailable("listings backend offline".to_string()))
    }

    fn fetch(&self, _id: &PropertyId) -> Result<Option<Property>, CatalogError> {
        Err(CatalogError::Unavailable("listings backend offline".to_string()))
    }
}

/// Fails the first `failures` calls, then serves the wrapped store.
pub(super) struct FlakyRepository {
    remaining_failures: AtomicUsize,
    store: CatalogStore,
}

impl FlakyRepository {
    pub(super) fn new(failures: usize) -> Self {
        Self {
            remaining_failures: AtomicUsize::new(failures),
            store: CatalogStore::new(three_price_catalog()).expect("valid catalog"),
        }
    }

    fn gate(&self) -> Result<(), CatalogError> {
        let previous = self
            .remaining_failures
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |left| {
                left.checked_sub(1)
            });
        match previous {
            Ok(_) => Err(CatalogError::Unavailable("transient outage".to_string())),
            Err(_) => Ok(()),
        }
    }
}

impl CatalogRepository for FlakyRepository {
    fn all(&self) -> Result<Vec<Property>, CatalogError> {
        self.gate()?;
        self.store.all()
    }

    fn fetch(&self, id: &PropertyId) -> Result<Option<Property>, CatalogError> {
        self.gate()?;
        self.store.fetch(id)
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 1024 * 64)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}

pub(super) fn ids(properties: &[Property]) -> Vec<&str> {
    properties.iter().map(|property| property.id.as_str()).collect()
}
