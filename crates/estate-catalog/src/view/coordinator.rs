use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::map::{layout_pins, MapPin, MapViewport};
use crate::catalog::{CatalogError, Property, PropertyId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewMode {
    #[default]
    Grid,
    Map,
}

impl ViewMode {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Grid => "Grid View",
            Self::Map => "Map View",
        }
    }
}

/// Sequence-tagged handle for one in-flight catalog fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct FetchTicket(u64);

impl FetchTicket {
    pub fn sequence(self) -> u64 {
        self.0
    }
}

/// What a retry-capable failure banner shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchFailureNotice {
    pub message: String,
    pub retryable: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    Applied { results: usize, selection_cleared: bool },
    /// A newer fetch was issued after this one; its result was discarded.
    Stale,
    Failed(FetchFailureNotice),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ViewError {
    #[error("selection is only available in map view")]
    SelectionRequiresMap,
    #[error("listing {0} is not in the current results")]
    NotInResults(PropertyId),
}

/// Reconciles the displayed result set with grid/map mode and the single map selection.
///
/// Fetches follow a last-issued-wins policy: each [`begin_fetch`](Self::begin_fetch)
/// supersedes every earlier ticket, and completions for superseded tickets are ignored.
#[derive(Debug, Default)]
pub struct ViewCoordinator {
    mode: ViewMode,
    selected: Option<PropertyId>,
    results: Vec<Property>,
    issued: u64,
    loading: bool,
    failure: Option<FetchFailureNotice>,
    viewport: MapViewport,
}

impl ViewCoordinator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode(&self) -> ViewMode {
        self.mode
    }

    pub fn selected_property_id(&self) -> Option<&PropertyId> {
        self.selected.as_ref()
    }

    pub fn selected_property(&self) -> Option<&Property> {
        let id = self.selected.as_ref()?;
        self.results.iter().find(|property| &property.id == id)
    }

    pub fn results(&self) -> &[Property] {
        &self.results
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn failure(&self) -> Option<&FetchFailureNotice> {
        self.failure.as_ref()
    }

    pub fn viewport(&self) -> &MapViewport {
        &self.viewport
    }

    pub fn viewport_mut(&mut self) -> &mut MapViewport {
        &mut self.viewport
    }

    /// Pins for the map panel; empty in grid mode.
    pub fn pins(&self) -> Vec<MapPin> {
        match self.mode {
            ViewMode::Map => layout_pins(&self.results),
            ViewMode::Grid => Vec::new(),
        }
    }

    /// Switching to grid drops the selection; switching to map never auto-selects.
    pub fn set_mode(&mut self, mode: ViewMode) {
        if mode == ViewMode::Grid {
            self.selected = None;
        }
        self.mode = mode;
    }

    pub fn select(&mut self, id: &PropertyId) -> Result<&Property, ViewError> {
        if self.mode != ViewMode::Map {
            return Err(ViewError::SelectionRequiresMap);
        }
        let property = self
            .results
            .iter()
            .find(|property| &property.id == id)
            .ok_or_else(|| ViewError::NotInResults(id.clone()))?;
        self.selected = Some(property.id.clone());
        Ok(property)
    }

    pub fn deselect(&mut self) {
        self.selected = None;
    }

    pub fn begin_fetch(&mut self) -> FetchTicket {
        self.issued += 1;
        self.loading = true;
        FetchTicket(self.issued)
    }

    pub fn is_current(&self, ticket: FetchTicket) -> bool {
        ticket.0 == self.issued
    }

    pub fn complete_fetch(
        &mut self,
        ticket: FetchTicket,
        result: Result<Vec<Property>, CatalogError>,
    ) -> FetchOutcome {
        if !self.is_current(ticket) {
            debug!(
                ticket = ticket.0,
                latest = self.issued,
                "discarding stale catalog response"
            );
            return FetchOutcome::Stale;
        }

        self.loading = false;
        match result {
            Ok(results) => {
                self.failure = None;
                let selection_cleared = self.replace_results(results);
                FetchOutcome::Applied {
                    results: self.results.len(),
                    selection_cleared,
                }
            }
            Err(error) => {
                warn!(%error, "catalog fetch failed");
                let notice = FetchFailureNotice {
                    message: format!("Failed to load properties: {error}"),
                    retryable: error.is_retryable(),
                };
                self.failure = Some(notice.clone());
                FetchOutcome::Failed(notice)
            }
        }
    }

    /// Installs a new result set, clearing a selection that no longer belongs to it.
    pub fn replace_results(&mut self, results: Vec<Property>) -> bool {
        self.results = results;
        let dangling = self
            .selected
            .as_ref()
            .is_some_and(|id| !self.results.iter().any(|property| &property.id == id));
        if dangling {
            self.selected = None;
        }
        dangling
    }
}
