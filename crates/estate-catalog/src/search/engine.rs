use tracing::{debug, warn};

use super::filter::FilterSpec;
use crate::catalog::Property;

/// Returns the listings matching every active constraint, in catalog order.
///
/// An inverted price range (`min > max`) matches nothing rather than erroring.
pub fn search(catalog: &[Property], filter: &FilterSpec) -> Vec<Property> {
    if !filter.price_range.is_valid() {
        warn!(
            min = filter.price_range.min,
            max = filter.price_range.max,
            "inverted price range, returning no matches"
        );
        return Vec::new();
    }

    let location = filter.location_query().map(str::to_lowercase);
    let results: Vec<Property> = catalog
        .iter()
        .filter(|property| matches_with(property, filter, location.as_deref()))
        .cloned()
        .collect();

    debug!(
        catalog = catalog.len(),
        matched = results.len(),
        "catalog search completed"
    );
    results
}

/// Single-listing form of the search predicate.
pub fn matches(property: &Property, filter: &FilterSpec) -> bool {
    if !filter.price_range.is_valid() {
        return false;
    }
    let location = filter.location_query().map(str::to_lowercase);
    matches_with(property, filter, location.as_deref())
}

fn matches_with(property: &Property, filter: &FilterSpec, location: Option<&str>) -> bool {
    if !filter.price_range.contains(property.price) {
        return false;
    }

    if !filter.property_types.is_empty()
        && !filter.property_types.contains(&property.property_type)
    {
        return false;
    }

    if let Some(minimum) = filter.bedrooms {
        if property.bedrooms < minimum {
            return false;
        }
    }

    if let Some(minimum) = filter.bathrooms {
        if property.bathrooms < f32::from(minimum) {
            return false;
        }
    }

    match location {
        Some(needle) => {
            property.location.city.to_lowercase().contains(needle)
                || property.location.address.to_lowercase().contains(needle)
        }
        None => true,
    }
}
