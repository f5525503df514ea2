use std::fmt;

use tracing::debug;

use super::filter::{FilterError, FilterSpec, FilterUpdate};
use crate::catalog::compact_price;

type FilterListener = Box<dyn FnMut(&FilterSpec) + Send>;

/// Owns the live filter specification and notifies subscribers on every accepted change.
#[derive(Default)]
pub struct FilterStateManager {
    spec: FilterSpec,
    revision: u64,
    listeners: Vec<FilterListener>,
}

impl fmt::Debug for FilterStateManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FilterStateManager")
            .field("spec", &self.spec)
            .field("revision", &self.revision)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl FilterStateManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_spec(spec: FilterSpec) -> Result<Self, FilterError> {
        spec.validate()?;
        Ok(Self {
            spec,
            ..Self::default()
        })
    }

    pub fn spec(&self) -> &FilterSpec {
        &self.spec
    }

    /// Count of accepted changes since construction.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Registers a callback invoked synchronously after each accepted update or clear.
    pub fn subscribe<F>(&mut self, listener: F)
    where
        F: FnMut(&FilterSpec) + Send + 'static,
    {
        self.listeners.push(Box::new(listener));
    }

    /// Merges `update` into the live spec. Inverted price ranges are rejected and leave
    /// the state and subscribers untouched.
    pub fn apply_partial(&mut self, update: FilterUpdate) -> Result<&FilterSpec, FilterError> {
        let next = update.merged_into(&self.spec);
        next.validate()?;
        self.replace(next);
        Ok(&self.spec)
    }

    /// Replaces the whole spec at once (one notification).
    pub fn set(&mut self, spec: FilterSpec) -> Result<&FilterSpec, FilterError> {
        spec.validate()?;
        self.replace(spec);
        Ok(&self.spec)
    }

    pub fn clear(&mut self) -> &FilterSpec {
        self.replace(FilterSpec::default());
        &self.spec
    }

    /// Number of fields deviating from the default spec, used for the filter badge (0..=5).
    pub fn active_filter_count(&self) -> usize {
        active_filter_count(&self.spec)
    }

    pub fn badges(&self) -> Vec<String> {
        filter_badges(&self.spec)
    }

    fn replace(&mut self, next: FilterSpec) {
        self.spec = next;
        self.revision += 1;
        debug!(
            revision = self.revision,
            active = self.active_filter_count(),
            "filter updated"
        );
        for listener in &mut self.listeners {
            listener(&self.spec);
        }
    }
}

pub fn active_filter_count(spec: &FilterSpec) -> usize {
    [
        spec.location_query().is_some(),
        !spec.property_types.is_empty(),
        spec.bedrooms.is_some(),
        spec.bathrooms.is_some(),
        spec.price_range.is_narrowed(),
    ]
    .into_iter()
    .filter(|active| *active)
    .count()
}

/// Chip labels for the "active filters" summary.
pub fn filter_badges(spec: &FilterSpec) -> Vec<String> {
    let mut badges = Vec::new();

    if let Some(location) = spec.location_query() {
        badges.push(location.to_string());
    }
    badges.extend(
        spec.property_types
            .iter()
            .map(|property_type| property_type.label().to_string()),
    );
    match spec.bedrooms {
        Some(0) => badges.push("Studio".to_string()),
        Some(beds) => badges.push(format!("{beds}+ bed")),
        None => {}
    }
    if let Some(baths) = spec.bathrooms {
        badges.push(format!("{baths}+ bath"));
    }
    if spec.price_range.is_narrowed() {
        badges.push(format!(
            "{} - {}",
            compact_price(spec.price_range.min),
            compact_price(spec.price_range.max)
        ));
    }

    badges
}
