use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::domain::{Property, PropertyId, PropertyType};
use super::pricing::format_price;
use super::service::PropertyService;
use super::store::CatalogRepository;
use crate::error::AppError;
use crate::favorites::FavoritesStore;
use crate::search::{active_filter_count, FilterSpec, FilterUpdate};

/// Number of "similar listings" shown on a detail page.
pub const RELATED_LIMIT: usize = 3;

/// Shared state behind the catalog routes.
pub struct CatalogApi<R> {
    pub service: Arc<PropertyService<R>>,
    pub favorites: FavoritesStore,
}

impl<R> Clone for CatalogApi<R> {
    fn clone(&self) -> Self {
        Self {
            service: self.service.clone(),
            favorites: self.favorites.clone(),
        }
    }
}

/// Listing payload with the display fields cards need.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingView {
    #[serde(flatten)]
    pub property: Property,
    pub price_label: String,
    pub is_favorite: bool,
}

impl ListingView {
    pub fn new(property: Property, favorites: &FavoritesStore) -> Self {
        let is_favorite = favorites.is_favorite(&property.id);
        let price_label = format_price(property.price, property.status);
        Self {
            property,
            price_label,
            is_favorite,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResponse {
    pub count: usize,
    pub active_filter_count: usize,
    pub results: Vec<ListingView>,
}

/// Query-string form of a filter: `?location=spring&property_type=house,condo&min_price=1`.
#[derive(Debug, Default, Deserialize)]
pub struct SearchQuery {
    pub location: Option<String>,
    pub min_price: Option<u64>,
    pub max_price: Option<u64>,
    pub property_type: Option<String>,
    pub bedrooms: Option<u8>,
    pub bathrooms: Option<u8>,
}

impl SearchQuery {
    pub fn into_spec(self) -> Result<FilterSpec, String> {
        let mut update = FilterUpdate::new().price_bounds(self.min_price, self.max_price);

        if let Some(raw) = self.property_type {
            let types = raw
                .split(',')
                .filter(|value| !value.trim().is_empty())
                .map(|value| {
                    PropertyType::parse(value)
                        .ok_or_else(|| format!("unknown property type '{}'", value.trim()))
                })
                .collect::<Result<Vec<_>, _>>()?;
            update = update.property_types(types);
        }
        if let Some(beds) = self.bedrooms {
            update = update.bedrooms(Some(beds));
        }
        if let Some(baths) = self.bathrooms {
            update = update.bathrooms(Some(baths));
        }
        if let Some(location) = self.location {
            update = update.location(location);
        }

        Ok(update.into_spec())
    }
}

/// Router builder exposing catalog lookups, search, and favorites.
pub fn catalog_router<R>(api: CatalogApi<R>) -> Router
where
    R: CatalogRepository + 'static,
{
    Router::new()
        .route("/api/v1/properties", get(search_handler::<R>))
        .route("/api/v1/properties/search", post(filter_handler::<R>))
        .route("/api/v1/properties/:property_id", get(detail_handler::<R>))
        .route(
            "/api/v1/properties/:property_id/related",
            get(related_handler::<R>),
        )
        .route("/api/v1/favorites", get(favorites_handler::<R>))
        .route(
            "/api/v1/favorites/:property_id",
            post(toggle_favorite_handler::<R>).delete(remove_favorite_handler::<R>),
        )
        .with_state(api)
}

pub(crate) async fn search_handler<R>(
    State(api): State<CatalogApi<R>>,
    Query(query): Query<SearchQuery>,
) -> Result<Response, AppError>
where
    R: CatalogRepository + 'static,
{
    let spec = query.into_spec().map_err(AppError::BadRequest)?;
    run_search(&api, spec).await
}

pub(crate) async fn filter_handler<R>(
    State(api): State<CatalogApi<R>>,
    Json(update): Json<FilterUpdate>,
) -> Result<Response, AppError>
where
    R: CatalogRepository + 'static,
{
    run_search(&api, update.into_spec()).await
}

async fn run_search<R>(api: &CatalogApi<R>, spec: FilterSpec) -> Result<Response, AppError>
where
    R: CatalogRepository + 'static,
{
    spec.validate()?;

    let results: Vec<ListingView> = api
        .service
        .search_spec(&spec)
        .await?
        .into_iter()
        .map(|property| ListingView::new(property, &api.favorites))
        .collect();
    let body = SearchResponse {
        count: results.len(),
        active_filter_count: active_filter_count(&spec),
        results,
    };
    Ok((StatusCode::OK, Json(body)).into_response())
}

pub(crate) async fn detail_handler<R>(
    State(api): State<CatalogApi<R>>,
    Path(property_id): Path<String>,
) -> Result<Response, AppError>
where
    R: CatalogRepository + 'static,
{
    let id = PropertyId(property_id);
    let property = api
        .service
        .get_property_by_id(&id)
        .await?
        .ok_or_else(|| AppError::NotFound(id.to_string()))?;
    Ok((StatusCode::OK, Json(ListingView::new(property, &api.favorites))).into_response())
}

pub(crate) async fn related_handler<R>(
    State(api): State<CatalogApi<R>>,
    Path(property_id): Path<String>,
) -> Result<Response, AppError>
where
    R: CatalogRepository + 'static,
{
    let id = PropertyId(property_id);
    let views: Vec<ListingView> = api
        .service
        .related_properties(&id, RELATED_LIMIT)
        .await?
        .ok_or_else(|| AppError::NotFound(id.to_string()))?
        .into_iter()
        .map(|property| ListingView::new(property, &api.favorites))
        .collect();
    Ok((StatusCode::OK, Json(views)).into_response())
}

pub(crate) async fn favorites_handler<R>(State(api): State<CatalogApi<R>>) -> Response
where
    R: CatalogRepository + 'static,
{
    let favorites: Vec<ListingView> = api
        .favorites
        .list()
        .into_iter()
        .map(|property| ListingView::new(property, &api.favorites))
        .collect();
    let payload = json!({ "count": favorites.len(), "favorites": favorites });
    (StatusCode::OK, Json(payload)).into_response()
}

pub(crate) async fn toggle_favorite_handler<R>(
    State(api): State<CatalogApi<R>>,
    Path(property_id): Path<String>,
) -> Result<Response, AppError>
where
    R: CatalogRepository + 'static,
{
    let id = PropertyId(property_id);
    let property = api
        .service
        .get_property_by_id(&id)
        .await?
        .ok_or_else(|| AppError::NotFound(id.to_string()))?;
    let is_favorite = api.favorites.toggle(property);
    let payload = json!({
        "propertyId": id,
        "isFavorite": is_favorite,
        "count": api.favorites.len(),
    });
    Ok((StatusCode::OK, Json(payload)).into_response())
}

pub(crate) async fn remove_favorite_handler<R>(
    State(api): State<CatalogApi<R>>,
    Path(property_id): Path<String>,
) -> Response
where
    R: CatalogRepository + 'static,
{
    api.favorites.remove(&PropertyId(property_id));
    StatusCode::NO_CONTENT.into_response()
}
