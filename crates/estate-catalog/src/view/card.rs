use serde::Serialize;

use super::carousel::ImageCarousel;
use crate::catalog::pricing::group_thousands;
use crate::catalog::{format_price, Property, PropertyId};
use crate::favorites::FavoritesStore;

const FEATURE_PREVIEW: usize = 3;

/// Display model for a listing card in the grid or map list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyCardView {
    pub id: PropertyId,
    pub title: String,
    pub price_label: String,
    pub status_label: &'static str,
    pub address_line: String,
    /// Hidden for studios.
    pub beds_label: Option<String>,
    pub baths_label: String,
    pub area_label: String,
    pub feature_badges: Vec<String>,
    pub more_features: Option<String>,
    pub image: Option<String>,
    pub image_index: usize,
    pub show_image_navigation: bool,
    pub is_favorite: bool,
}

impl PropertyCardView {
    pub fn build(property: &Property, favorites: &FavoritesStore, carousel: &ImageCarousel) -> Self {
        let hidden = property.features.len().saturating_sub(FEATURE_PREVIEW);

        Self {
            id: property.id.clone(),
            title: property.title.clone(),
            price_label: format_price(property.price, property.status),
            status_label: property.status.label(),
            address_line: property.address_line(),
            beds_label: (!property.is_studio())
                .then(|| plural(f32::from(property.bedrooms), "bed")),
            baths_label: plural(property.bathrooms, "bath"),
            area_label: format!("{} sqft", group_thousands(u64::from(property.square_footage))),
            feature_badges: property
                .features
                .iter()
                .take(FEATURE_PREVIEW)
                .cloned()
                .collect(),
            more_features: (hidden > 0).then(|| format!("+{hidden} more")),
            image: carousel.current_image(property).map(str::to_string),
            image_index: carousel.current_index(),
            show_image_navigation: carousel.has_navigation(),
            is_favorite: favorites.is_favorite(&property.id),
        }
    }
}

fn plural(count: f32, unit: &str) -> String {
    if (count - 1.0).abs() < f32::EPSILON {
        format!("1 {unit}")
    } else {
        format!("{count} {unit}s")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::CatalogStore;

    fn listing(id: &str) -> Property {
        CatalogStore::standard()
            .expect("bundled catalog loads")
            .get(&PropertyId::from(id))
            .cloned()
            .expect("listing present")
    }

    #[test]
    fn card_summarizes_listing() {
        let property = listing("1");
        let favorites = FavoritesStore::new();
        favorites.add(property.clone());
        let mut carousel = ImageCarousel::for_property(&property);
        carousel.next();

        let card = PropertyCardView::build(&property, &favorites, &carousel);
        assert_eq!(card.price_label, "$1,250,000");
        assert_eq!(card.status_label, "For Sale");
        assert_eq!(card.address_line, "123 Oak Street, Springfield");
        assert_eq!(card.beds_label.as_deref(), Some("4 beds"));
        assert_eq!(card.baths_label, "3 baths");
        assert_eq!(card.area_label, "2,850 sqft");
        assert_eq!(card.feature_badges, vec!["Pool", "Garage", "Garden"]);
        assert_eq!(card.more_features.as_deref(), Some("+2 more"));
        assert_eq!(card.image.as_deref(), Some("/images/properties/1-2.jpg"));
        assert!(card.show_image_navigation);
        assert!(card.is_favorite);
    }

    #[test]
    fn studio_card_hides_beds_and_navigation() {
        let property = listing("5");
        let card = PropertyCardView::build(
            &property,
            &FavoritesStore::new(),
            &ImageCarousel::for_property(&property),
        );
        assert_eq!(card.beds_label, None);
        assert_eq!(card.baths_label, "1 bath");
        assert_eq!(card.price_label, "$1,450/month");
        assert!(!card.show_image_navigation);
        assert_eq!(card.more_features, None);
        assert!(!card.is_favorite);
    }

    #[test]
    fn fractional_baths_keep_decimal() {
        let property = listing("3");
        let card = PropertyCardView::build(
            &property,
            &FavoritesStore::new(),
            &ImageCarousel::for_property(&property),
        );
        assert_eq!(card.baths_label, "2.5 baths");
        assert_eq!(card.beds_label.as_deref(), Some("3 beds"));
    }
}
