use chrono::{TimeZone, Utc};
use estate_catalog::catalog::{
    CatalogStore, Coordinates, ListingAgent, ListingStatus, Location, Property, PropertyId,
    PropertyType,
};
use estate_catalog::search::{matches, search, FilterSpec, FilterUpdate};

fn listing(id: &str, price: u64, city: &str) -> Property {
    let stamp = Utc
        .with_ymd_and_hms(2024, 5, 1, 12, 0, 0)
        .single()
        .expect("valid timestamp");
    Property {
        id: PropertyId::from(id),
        title: format!("{city} listing"),
        price,
        location: Location {
            address: format!("{id} Main Street"),
            city: city.to_string(),
            state: "MA".to_string(),
            zip_code: "02108".to_string(),
            coordinates: Coordinates { lat: 0.0, lng: 0.0 },
        },
        images: vec![format!("/img/{id}.jpg")],
        bedrooms: 2,
        bathrooms: 1.0,
        square_footage: 900,
        property_type: PropertyType::Apartment,
        description: String::new(),
        features: Vec::new(),
        year_built: 1999,
        status: ListingStatus::ForSale,
        agent: ListingAgent {
            name: "Michael Chen".to_string(),
            phone: "(555) 987-6543".to_string(),
            email: "michael@estatecatalog.example".to_string(),
            image: "/images/agents/michael.jpg".to_string(),
        },
        created_at: stamp,
        updated_at: stamp,
    }
}

fn bundled() -> Vec<Property> {
    CatalogStore::standard()
        .expect("bundled catalog loads")
        .properties()
        .to_vec()
}

fn ids(properties: &[Property]) -> Vec<&str> {
    properties.iter().map(|property| property.id.as_str()).collect()
}

/// A spread of filters touching every field alone and in combination.
fn filter_grid() -> Vec<FilterSpec> {
    let mut specs = vec![FilterSpec::default()];
    let locations = ["", "spring", "SPRING", "  boston ", "street", "nowhere"];
    let types = [
        vec![],
        vec![PropertyType::House],
        vec![PropertyType::Condo, PropertyType::Townhouse],
    ];
    let rooms = [None, Some(0), Some(3), Some(5)];
    let prices = [(0, 3_000_000), (300_000, 1_000_000), (0, 5_000), (2_000_000, 2_000_000)];

    for location in locations {
        for property_types in &types {
            for beds in rooms {
                for (min, max) in prices {
                    specs.push(
                        FilterUpdate::new()
                            .location(location)
                            .property_types(property_types.iter().copied())
                            .bedrooms(beds)
                            .bathrooms(beds.map(|b| b.min(3)))
                            .price_range(min, max)
                            .into_spec(),
                    );
                }
            }
        }
    }
    specs
}

fn satisfies_all(property: &Property, spec: &FilterSpec) -> bool {
    let price_ok = property.price >= spec.price_range.min && property.price <= spec.price_range.max;
    let type_ok =
        spec.property_types.is_empty() || spec.property_types.contains(&property.property_type);
    let beds_ok = spec.bedrooms.map_or(true, |min| property.bedrooms >= min);
    let baths_ok = spec
        .bathrooms
        .map_or(true, |min| property.bathrooms >= f32::from(min));
    let location_ok = match spec.location.trim() {
        "" => true,
        query => {
            let query = query.to_lowercase();
            property.location.city.to_lowercase().contains(&query)
                || property.location.address.to_lowercase().contains(&query)
        }
    };
    price_ok && type_ok && beds_ok && baths_ok && location_ok
}

#[test]
fn results_are_sound_and_complete() {
    let catalog = bundled();
    for spec in filter_grid() {
        let results = search(&catalog, &spec);
        for property in &catalog {
            let expected = satisfies_all(property, &spec);
            let returned = results.iter().any(|hit| hit.id == property.id);
            assert_eq!(
                returned, expected,
                "listing {} with filter {spec:?}",
                property.id
            );
            assert_eq!(matches(property, &spec), expected);
        }
    }
}

#[test]
fn results_preserve_catalog_order() {
    let catalog = bundled();
    for spec in filter_grid() {
        let results = search(&catalog, &spec);
        let positions: Vec<usize> = results
            .iter()
            .map(|hit| {
                catalog
                    .iter()
                    .position(|property| property.id == hit.id)
                    .expect("result comes from catalog")
            })
            .collect();
        assert!(positions.windows(2).all(|pair| pair[0] < pair[1]));
    }
}

#[test]
fn default_filter_is_identity() {
    let catalog = bundled();
    assert_eq!(search(&catalog, &FilterSpec::default()), catalog);
}

#[test]
fn empty_catalog_yields_empty_results() {
    let spec = FilterUpdate::new().location("anything").into_spec();
    assert!(search(&[], &spec).is_empty());
    assert!(search(&[], &FilterSpec::default()).is_empty());
}

#[test]
fn inclusive_price_window_selects_middle_listing() {
    let catalog = vec![
        listing("low", 200_000, "Austin"),
        listing("mid", 500_000, "Austin"),
        listing("high", 1_200_000, "Austin"),
    ];
    let spec = FilterUpdate::new().price_range(300_000, 1_000_000).into_spec();
    assert_eq!(ids(&search(&catalog, &spec)), vec!["mid"]);

    let exact = FilterUpdate::new().price_range(200_000, 500_000).into_spec();
    assert_eq!(ids(&search(&catalog, &exact)), vec!["low", "mid"]);
}

#[test]
fn location_match_is_case_insensitive_substring() {
    let catalog = vec![
        listing("sf", 400_000, "Springfield"),
        listing("bos", 400_000, "Boston"),
    ];
    for query in ["spring", "SPRING", " Spring "] {
        let spec = FilterUpdate::new().location(query).into_spec();
        assert_eq!(ids(&search(&catalog, &spec)), vec!["sf"], "query {query:?}");
    }
}

#[test]
fn location_matches_address_as_well_as_city() {
    let spec = FilterUpdate::new().location("spring street").into_spec();
    assert_eq!(ids(&search(&bundled(), &spec)), vec!["5"]);
}

#[test]
fn studio_threshold_includes_everything() {
    let catalog = bundled();
    let spec = FilterUpdate::new().bedrooms(Some(0)).into_spec();
    assert_eq!(search(&catalog, &spec).len(), catalog.len());

    let one_plus = FilterUpdate::new().bedrooms(Some(1)).into_spec();
    assert!(!ids(&search(&catalog, &one_plus)).contains(&"5"));
}

#[test]
fn inverted_range_matches_nothing() {
    let catalog = bundled();
    let spec = FilterUpdate::new().price_range(1_000_000, 10).into_spec();
    assert!(search(&catalog, &spec).is_empty());
    assert!(!matches(&catalog[0], &spec));
}

#[test]
fn type_set_is_a_disjunction() {
    let spec = FilterUpdate::new()
        .property_types([PropertyType::House, PropertyType::Townhouse])
        .into_spec();
    let results = search(&bundled(), &spec);
    assert_eq!(ids(&results), vec!["1", "4", "6", "7", "9"]);
}
