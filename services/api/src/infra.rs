use estate_catalog::catalog::{CatalogStore, PropertyService, PropertyType};
use estate_catalog::config::CatalogConfig;
use estate_catalog::error::AppError;
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Opens the configured catalog and wraps it in the async service.
pub(crate) fn catalog_service(
    config: &CatalogConfig,
) -> Result<PropertyService<CatalogStore>, AppError> {
    let store = config.open_store()?;
    Ok(PropertyService::new(Arc::new(store), config.latency))
}

pub(crate) fn parse_property_type(raw: &str) -> Result<PropertyType, String> {
    PropertyType::parse(raw).ok_or_else(|| {
        format!("unknown property type '{raw}' (expected house, apartment, condo, or townhouse)")
    })
}
