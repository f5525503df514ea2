use crate::infra::{catalog_service, parse_property_type};
use clap::Args;
use estate_catalog::browse::BrowseSession;
use estate_catalog::catalog::{
    format_price, CatalogRepository, ListingView, Property, PropertyId, PropertyType,
    SearchResponse, RELATED_LIMIT,
};
use estate_catalog::config::{AppConfig, CatalogConfig, LatencyProfile};
use estate_catalog::error::AppError;
use estate_catalog::favorites::FavoritesStore;
use estate_catalog::search::{active_filter_count, filter_badges, FilterUpdate};
use estate_catalog::view::{FetchOutcome, ImageCarousel, PropertyCardView, ViewMode};
use std::path::PathBuf;

#[derive(Args, Debug, Default)]
pub(crate) struct SearchArgs {
    /// Case-insensitive substring matched against city and street address
    #[arg(long)]
    pub(crate) location: Option<String>,
    /// Minimum price in whole dollars (inclusive)
    #[arg(long)]
    pub(crate) min_price: Option<u64>,
    /// Maximum price in whole dollars (inclusive)
    #[arg(long)]
    pub(crate) max_price: Option<u64>,
    /// Property types to include; repeat or comma-separate (house, apartment, condo, townhouse)
    #[arg(long = "type", value_delimiter = ',', value_parser = parse_property_type)]
    pub(crate) property_types: Vec<PropertyType>,
    /// Minimum bedrooms (0 means studio or larger)
    #[arg(long)]
    pub(crate) bedrooms: Option<u8>,
    /// Minimum bathrooms
    #[arg(long)]
    pub(crate) bathrooms: Option<u8>,
    /// Emit the search response as JSON instead of listing cards
    #[arg(long)]
    pub(crate) json: bool,
}

impl SearchArgs {
    fn filter_update(&self) -> FilterUpdate {
        let mut update = FilterUpdate::new().price_bounds(self.min_price, self.max_price);
        if !self.property_types.is_empty() {
            update = update.property_types(self.property_types.iter().copied());
        }
        if let Some(beds) = self.bedrooms {
            update = update.bedrooms(Some(beds));
        }
        if let Some(baths) = self.bathrooms {
            update = update.bathrooms(Some(baths));
        }
        if let Some(location) = &self.location {
            update = update.location(location.clone());
        }
        update
    }
}

#[derive(Args, Debug)]
pub(crate) struct ShowArgs {
    /// Listing identifier
    #[arg(long)]
    pub(crate) id: String,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Alternate catalog fixture (JSON array of listings). Defaults to the bundled catalog.
    #[arg(long)]
    pub(crate) fixture: Option<PathBuf>,
    /// Apply the simulated backend delays while walking through the session.
    #[arg(long)]
    pub(crate) simulate_latency: bool,
}

pub(crate) async fn run_search(args: SearchArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let service = catalog_service(&config.catalog)?;

    let spec = args.filter_update().into_spec();
    spec.validate()?;
    let results = service.search_spec(&spec).await?;

    if args.json {
        let favorites = FavoritesStore::new();
        let response = SearchResponse {
            count: results.len(),
            active_filter_count: active_filter_count(&spec),
            results: results
                .into_iter()
                .map(|property| ListingView::new(property, &favorites))
                .collect(),
        };
        let json = serde_json::to_string_pretty(&response).map_err(std::io::Error::other)?;
        println!("{json}");
        return Ok(());
    }

    let badges = filter_badges(&spec);
    println!(
        "{} listing(s) | filters: {}",
        results.len(),
        if badges.is_empty() {
            "none".to_string()
        } else {
            badges.join(", ")
        }
    );
    let favorites = FavoritesStore::new();
    for property in &results {
        let card =
            PropertyCardView::build(property, &favorites, &ImageCarousel::for_property(property));
        render_card(&card);
    }

    Ok(())
}

pub(crate) async fn run_show(args: ShowArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let service = catalog_service(&config.catalog)?;
    let id = PropertyId::new(args.id);

    let property = service
        .get_property_by_id(&id)
        .await?
        .ok_or_else(|| AppError::NotFound(id.to_string()))?;
    render_detail(&property);

    let related = service
        .related_properties(&id, RELATED_LIMIT)
        .await?
        .unwrap_or_default();
    if related.is_empty() {
        println!("\nSimilar listings: none in {}", property.location.city);
    } else {
        println!("\nSimilar listings in {}", property.location.city);
        for other in &related {
            println!(
                "  - [{}] {} | {}",
                other.id,
                other.title,
                format_price(other.price, other.status)
            );
        }
    }

    Ok(())
}

pub(crate) async fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs {
        fixture,
        simulate_latency,
    } = args;

    let config = CatalogConfig {
        fixture,
        latency: if simulate_latency {
            LatencyProfile::simulated()
        } else {
            LatencyProfile::none()
        },
    };
    let mut session = BrowseSession::new(catalog_service(&config)?, FavoritesStore::new());

    println!("Property catalog demo");
    let outcome = session.load().await;
    report_step(&session, "Initial load", &outcome);

    let outcome = session.quick_search("Springfield").await?;
    report_step(&session, "Hero search for \"Springfield\"", &outcome);
    render_cards(&session);

    let outcome = session
        .apply_filter(
            FilterUpdate::new()
                .property_types([PropertyType::House, PropertyType::Townhouse])
                .bedrooms(Some(3)),
        )
        .await?;
    report_step(&session, "Houses and townhouses with 3+ bedrooms", &outcome);
    render_cards(&session);

    if let Some(first) = session.view().results().first().map(|p| p.id.clone()) {
        if let Some(added) = session.toggle_favorite(&first) {
            println!(
                "\nFavorite {} listing {first} ({} saved)",
                if added { "added:" } else { "removed:" },
                session.favorites().len()
            );
        }
    }

    match session
        .apply_filter(FilterUpdate::new().price_range(900_000, 100_000))
        .await
    {
        Ok(_) => println!("\nInverted price range unexpectedly accepted"),
        Err(err) => println!("\nRejected filter edit: {err}"),
    }

    session.view_mut().set_mode(ViewMode::Map);
    session.view_mut().viewport_mut().zoom_in();
    println!(
        "\n{} (zoom {})",
        session.view().mode().label(),
        session.view().viewport().zoom()
    );
    for pin in session.view().pins() {
        println!(
            "  - pin {} at ({}%, {}%): {}",
            pin.property_id, pin.left_pct, pin.top_pct, pin.title
        );
    }
    if let Some(first) = session.view().results().first().map(|p| p.id.clone()) {
        match session.view_mut().select(&first) {
            Ok(selected) => println!("  Selected: {} | {}", selected.title, selected.address_line()),
            Err(err) => println!("  Selection failed: {err}"),
        }
    }

    let outcome = session.clear_filters().await;
    report_step(&session, "Cleared filters", &outcome);
    println!(
        "  Selection after clearing: {}",
        session
            .view()
            .selected_property_id()
            .map_or_else(|| "none".to_string(), ToString::to_string)
    );

    session.view_mut().set_mode(ViewMode::Grid);
    println!(
        "\n{} | selection {}",
        session.view().mode().label(),
        if session.view().selected_property_id().is_some() {
            "kept"
        } else {
            "cleared"
        }
    );

    println!("\nSaved favorites");
    render_favorites(session.favorites());

    Ok(())
}

fn report_step<R>(session: &BrowseSession<R>, step: &str, outcome: &FetchOutcome)
where
    R: CatalogRepository + 'static,
{
    println!("\n{step}");
    match outcome {
        FetchOutcome::Applied {
            results,
            selection_cleared,
        } => {
            println!("  {}: {results} listing(s)", session.heading());
            let badges = session.filters().badges();
            if !badges.is_empty() {
                println!(
                    "  Active filters ({}): {}",
                    session.filters().active_filter_count(),
                    badges.join(", ")
                );
            }
            if *selection_cleared {
                println!("  Map selection cleared (listing no longer in results)");
            }
        }
        FetchOutcome::Stale => println!("  Superseded by a newer search"),
        FetchOutcome::Failed(notice) => {
            println!("  {}", notice.message);
            if notice.retryable {
                println!("  Retry available");
            }
        }
    }
}

fn render_cards<R>(session: &BrowseSession<R>)
where
    R: CatalogRepository + 'static,
{
    for card in session.cards() {
        render_card(&card);
    }
}

fn render_card(card: &PropertyCardView) {
    let rooms = match &card.beds_label {
        Some(beds) => format!("{beds} | {}", card.baths_label),
        None => format!("Studio | {}", card.baths_label),
    };
    println!(
        "  - [{}] {}{} | {} | {}",
        card.id,
        card.title,
        if card.is_favorite { " *" } else { "" },
        card.price_label,
        card.status_label
    );
    println!("      {} | {rooms} | {}", card.address_line, card.area_label);
    if !card.feature_badges.is_empty() {
        let mut features = card.feature_badges.join(", ");
        if let Some(more) = &card.more_features {
            features.push_str(&format!(" ({more})"));
        }
        println!("      {features}");
    }
}

fn render_detail(property: &Property) {
    println!("{} [{}]", property.title, property.id);
    println!(
        "{} | {}",
        format_price(property.price, property.status),
        property.status.label()
    );
    println!(
        "{}, {}, {} {}",
        property.location.address,
        property.location.city,
        property.location.state,
        property.location.zip_code
    );
    println!(
        "{} | {} bed | {} bath | {} sqft | built {}",
        property.property_type.label(),
        property.bedrooms,
        property.bathrooms,
        property.square_footage,
        property.year_built
    );
    if !property.features.is_empty() {
        println!("Features: {}", property.features.join(", "));
    }
    if !property.description.is_empty() {
        println!("\n{}", property.description);
    }
    println!(
        "\nAgent: {} | {} | {}",
        property.agent.name, property.agent.phone, property.agent.email
    );
    println!("Images: {}", property.images.len());
}

fn render_favorites(favorites: &FavoritesStore) {
    if favorites.is_empty() {
        println!("  none");
        return;
    }
    for property in favorites.list() {
        println!(
            "  - [{}] {} | {}",
            property.id,
            property.title,
            property.address_line()
        );
    }
}
