use std::collections::BTreeSet;

use serde::{Deserialize, Deserializer, Serialize};

use crate::catalog::PropertyType;

/// Upper slider bound and default maximum for the price filter.
pub const DEFAULT_MAX_PRICE: u64 = 3_000_000;

/// Inclusive price bounds in whole currency units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PriceRange {
    pub min: u64,
    pub max: u64,
}

impl PriceRange {
    pub const fn new(min: u64, max: u64) -> Self {
        Self { min, max }
    }

    pub const fn full() -> Self {
        Self {
            min: 0,
            max: DEFAULT_MAX_PRICE,
        }
    }

    pub const fn is_valid(&self) -> bool {
        self.min <= self.max
    }

    pub const fn contains(&self, price: u64) -> bool {
        price >= self.min && price <= self.max
    }

    /// True when either bound is tighter than the full slider range.
    pub const fn is_narrowed(&self) -> bool {
        self.min > 0 || self.max < DEFAULT_MAX_PRICE
    }
}

impl Default for PriceRange {
    fn default() -> Self {
        Self::full()
    }
}

/// The complete set of user search constraints. Every field is always present;
/// empty collections and `None` thresholds mean "unconstrained".
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct FilterSpec {
    pub price_range: PriceRange,
    #[serde(alias = "propertyType")]
    pub property_types: BTreeSet<PropertyType>,
    pub bedrooms: Option<u8>,
    pub bathrooms: Option<u8>,
    pub location: String,
}

impl FilterSpec {
    /// Trimmed location query, `None` when blank.
    pub fn location_query(&self) -> Option<&str> {
        let trimmed = self.location.trim();
        (!trimmed.is_empty()).then_some(trimmed)
    }

    pub fn is_default(&self) -> bool {
        self == &Self::default()
    }

    pub fn validate(&self) -> Result<(), FilterError> {
        if self.price_range.is_valid() {
            Ok(())
        } else {
            Err(FilterError::InvalidRange {
                min: self.price_range.min,
                max: self.price_range.max,
            })
        }
    }
}

/// Partial update merged field-by-field into a [`FilterSpec`]. Price range and
/// type set are replaced wholesale. Thresholds use a nested option so "clear to
/// any" (`Some(None)`) differs from "leave unchanged" (`None`).
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct FilterUpdate {
    pub price_range: Option<PriceRange>,
    #[serde(alias = "propertyType")]
    pub property_types: Option<BTreeSet<PropertyType>>,
    #[serde(deserialize_with = "present_value")]
    pub bedrooms: Option<Option<u8>>,
    #[serde(deserialize_with = "present_value")]
    pub bathrooms: Option<Option<u8>>,
    pub location: Option<String>,
}

impl FilterUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn price_range(mut self, min: u64, max: u64) -> Self {
        self.price_range = Some(PriceRange::new(min, max));
        self
    }

    /// Sets the price range when either bound is given; the missing bound keeps its
    /// full-range default.
    pub fn price_bounds(self, min: Option<u64>, max: Option<u64>) -> Self {
        if min.is_none() && max.is_none() {
            return self;
        }
        let full = PriceRange::full();
        self.price_range(min.unwrap_or(full.min), max.unwrap_or(full.max))
    }

    pub fn property_types<I>(mut self, types: I) -> Self
    where
        I: IntoIterator<Item = PropertyType>,
    {
        self.property_types = Some(types.into_iter().collect());
        self
    }

    pub fn bedrooms(mut self, minimum: Option<u8>) -> Self {
        self.bedrooms = Some(minimum);
        self
    }

    pub fn bathrooms(mut self, minimum: Option<u8>) -> Self {
        self.bathrooms = Some(minimum);
        self
    }

    pub fn location(mut self, query: impl Into<String>) -> Self {
        self.location = Some(query.into());
        self
    }

    /// Hero search box: a blank query means "no filter at all".
    pub fn from_quick_search(query: &str) -> Option<Self> {
        let trimmed = query.trim();
        (!trimmed.is_empty()).then(|| Self::new().location(trimmed))
    }

    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    /// Produces the spec that results from applying this update to `base`.
    pub fn merged_into(&self, base: &FilterSpec) -> FilterSpec {
        FilterSpec {
            price_range: self.price_range.unwrap_or(base.price_range),
            property_types: self
                .property_types
                .clone()
                .unwrap_or_else(|| base.property_types.clone()),
            bedrooms: self.bedrooms.unwrap_or(base.bedrooms),
            bathrooms: self.bathrooms.unwrap_or(base.bathrooms),
            location: self
                .location
                .clone()
                .unwrap_or_else(|| base.location.clone()),
        }
    }

    pub fn into_spec(self) -> FilterSpec {
        self.merged_into(&FilterSpec::default())
    }
}

/// Errors raised when a filter edit is rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FilterError {
    #[error("price range minimum {min} exceeds maximum {max}")]
    InvalidRange { min: u64, max: u64 },
}

// A present JSON key (even `null`) becomes `Some(..)`; an absent key stays `None` via `default`.
fn present_value<'de, D>(deserializer: D) -> Result<Option<Option<u8>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<u8>::deserialize(deserializer).map(Some)
}
