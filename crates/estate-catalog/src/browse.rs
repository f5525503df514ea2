//! One user's browsing session: live filters drive catalog searches whose results feed the
//! view coordinator, while favorites stay independent of whatever the filter shows.

use std::collections::HashMap;

use tracing::info;

use crate::catalog::{CatalogError, CatalogRepository, Property, PropertyId, PropertyService};
use crate::favorites::FavoritesStore;
use crate::search::{FilterError, FilterSpec, FilterStateManager, FilterUpdate};
use crate::view::{FetchOutcome, FetchTicket, ImageCarousel, PropertyCardView, ViewCoordinator};

/// A search that has been issued but not yet completed.
#[derive(Debug, Clone)]
pub struct PendingSearch {
    pub ticket: FetchTicket,
    pub spec: FilterSpec,
}

pub struct BrowseSession<R> {
    service: PropertyService<R>,
    filters: FilterStateManager,
    view: ViewCoordinator,
    favorites: FavoritesStore,
    carousels: HashMap<PropertyId, ImageCarousel>,
}

impl<R> BrowseSession<R>
where
    R: CatalogRepository + 'static,
{
    pub fn new(service: PropertyService<R>, favorites: FavoritesStore) -> Self {
        Self {
            service,
            filters: FilterStateManager::new(),
            view: ViewCoordinator::new(),
            favorites,
            carousels: HashMap::new(),
        }
    }

    pub fn service(&self) -> &PropertyService<R> {
        &self.service
    }

    pub fn filters(&self) -> &FilterStateManager {
        &self.filters
    }

    pub fn filters_mut(&mut self) -> &mut FilterStateManager {
        &mut self.filters
    }

    pub fn view(&self) -> &ViewCoordinator {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut ViewCoordinator {
        &mut self.view
    }

    pub fn favorites(&self) -> &FavoritesStore {
        &self.favorites
    }

    /// Section heading shown above the results.
    pub fn heading(&self) -> &'static str {
        if self.filters.spec().is_default() {
            "Featured Properties"
        } else {
            "Filtered Properties"
        }
    }

    /// Initial load of the full catalog.
    pub async fn load(&mut self) -> FetchOutcome {
        let ticket = self.view.begin_fetch();
        let result = self.service.get_all_properties().await;
        self.complete(ticket, result)
    }

    /// Applies a filter edit and re-runs the search. Rejected edits issue no fetch.
    pub async fn apply_filter(&mut self, update: FilterUpdate) -> Result<FetchOutcome, FilterError> {
        self.filters.apply_partial(update)?;
        Ok(self.refresh().await)
    }

    pub async fn clear_filters(&mut self) -> FetchOutcome {
        self.filters.clear();
        self.refresh().await
    }

    /// Hero search box: a non-blank query replaces every filter with a location filter,
    /// a blank one resets to the full catalog.
    pub async fn quick_search(&mut self, query: &str) -> Result<FetchOutcome, FilterError> {
        match FilterUpdate::from_quick_search(query) {
            Some(update) => {
                self.filters.set(update.into_spec())?;
                Ok(self.refresh().await)
            }
            None => Ok(self.clear_filters().await),
        }
    }

    /// Re-issues the search for the current filter; also the retry path after a failure.
    pub async fn refresh(&mut self) -> FetchOutcome {
        let pending = self.issue_search();
        let result = self.service.search_spec(&pending.spec).await;
        self.complete(pending.ticket, result)
    }

    /// Tags a search for the current filter. Any earlier pending search becomes stale.
    pub fn issue_search(&mut self) -> PendingSearch {
        PendingSearch {
            ticket: self.view.begin_fetch(),
            spec: self.filters.spec().clone(),
        }
    }

    pub fn complete(
        &mut self,
        ticket: FetchTicket,
        result: Result<Vec<Property>, CatalogError>,
    ) -> FetchOutcome {
        let outcome = self.view.complete_fetch(ticket, result);
        if let FetchOutcome::Applied { results, .. } = &outcome {
            let visible = self.view.results();
            self.carousels
                .retain(|id, _| visible.iter().any(|property| &property.id == id));
            info!(
                results = *results,
                active_filters = self.filters.active_filter_count(),
                "results updated"
            );
        }
        outcome
    }

    /// Toggles a favorite from a visible card. `None` when the listing is not displayed.
    pub fn toggle_favorite(&self, id: &PropertyId) -> Option<bool> {
        let property = self.find_visible(id)?;
        Some(self.favorites.toggle(property.clone()))
    }

    pub fn carousel_mut(&mut self, id: &PropertyId) -> Option<&mut ImageCarousel> {
        let carousel = ImageCarousel::for_property(self.find_visible(id)?);
        Some(self.carousels.entry(id.clone()).or_insert(carousel))
    }

    pub fn cards(&self) -> Vec<PropertyCardView> {
        self.view
            .results()
            .iter()
            .map(|property| {
                let carousel = self
                    .carousels
                    .get(&property.id)
                    .copied()
                    .unwrap_or_else(|| ImageCarousel::for_property(property));
                PropertyCardView::build(property, &self.favorites, &carousel)
            })
            .collect()
    }

    fn find_visible(&self, id: &PropertyId) -> Option<&Property> {
        self.view
            .results()
            .iter()
            .find(|property| &property.id == id)
    }
}
