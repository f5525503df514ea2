use std::sync::Arc;
use std::time::Duration;

use tracing::debug;

use super::domain::{ListingStatus, Property, PropertyId};
use super::pricing;
use super::store::{CatalogError, CatalogRepository};
use crate::config::LatencyProfile;
use crate::search::{self, FilterSpec, FilterUpdate};

/// Async collaborator surface over a catalog repository. Each call waits out the
/// configured latency before reading, standing in for a remote listings backend.
pub struct PropertyService<R> {
    repository: Arc<R>,
    latency: LatencyProfile,
}

impl<R> Clone for PropertyService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: self.repository.clone(),
            latency: self.latency,
        }
    }
}

impl<R> PropertyService<R>
where
    R: CatalogRepository + 'static,
{
    pub fn new(repository: Arc<R>, latency: LatencyProfile) -> Self {
        Self {
            repository,
            latency,
        }
    }

    pub fn repository(&self) -> &Arc<R> {
        &self.repository
    }

    pub async fn get_all_properties(&self) -> Result<Vec<Property>, CatalogError> {
        simulate(self.latency.list).await;
        self.repository.all()
    }

    /// `Ok(None)` means the id is unknown; callers navigate away rather than fail.
    pub async fn get_property_by_id(
        &self,
        id: &PropertyId,
    ) -> Result<Option<Property>, CatalogError> {
        simulate(self.latency.detail).await;
        let property = self.repository.fetch(id)?;
        if property.is_none() {
            debug!(property_id = %id, "listing not found");
        }
        Ok(property)
    }

    pub async fn search_properties(
        &self,
        update: FilterUpdate,
    ) -> Result<Vec<Property>, CatalogError> {
        self.search_spec(&update.into_spec()).await
    }

    pub async fn search_spec(&self, spec: &FilterSpec) -> Result<Vec<Property>, CatalogError> {
        simulate(self.latency.search).await;
        let catalog = self.repository.all()?;
        Ok(search::search(&catalog, spec))
    }

    /// Other listings in the same city, in catalog order. `Ok(None)` when `id` is unknown.
    pub async fn related_properties(
        &self,
        id: &PropertyId,
        limit: usize,
    ) -> Result<Option<Vec<Property>>, CatalogError> {
        let Some(anchor) = self.get_property_by_id(id).await? else {
            return Ok(None);
        };
        let catalog = self.get_all_properties().await?;
        Ok(Some(related_to(&anchor, catalog, limit)))
    }

    pub fn format_price(price: u64, status: ListingStatus) -> String {
        pricing::format_price(price, status)
    }
}

pub(crate) fn related_to(anchor: &Property, catalog: Vec<Property>, limit: usize) -> Vec<Property> {
    catalog
        .into_iter()
        .filter(|candidate| {
            candidate.id != anchor.id && candidate.location.city == anchor.location.city
        })
        .take(limit)
        .collect()
}

async fn simulate(delay: Duration) {
    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }
}
