use std::collections::HashSet;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use std::sync::Arc;

use tracing::info;

use super::domain::{Property, PropertyId};

const BUNDLED_CATALOG: &str = include_str!("../../fixtures/catalog.json");

/// Read access to the canonical listing set so the service can be exercised in isolation.
pub trait CatalogRepository: Send + Sync {
    fn all(&self) -> Result<Vec<Property>, CatalogError>;
    fn fetch(&self, id: &PropertyId) -> Result<Option<Property>, CatalogError>;
}

/// Error enumeration for catalog loading and access failures.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("catalog unavailable: {0}")]
    Unavailable(String),
    #[error("failed to read catalog fixture: {0}")]
    Io(#[from] std::io::Error),
    #[error("catalog fixture is not valid JSON: {0}")]
    Fixture(#[from] serde_json::Error),
    #[error("listing {id} is invalid: {reason}")]
    InvalidRecord { id: PropertyId, reason: &'static str },
    #[error("listing id {0} appears more than once")]
    DuplicateId(PropertyId),
}

impl CatalogError {
    /// Failures that the caller can recover from by re-issuing the request.
    pub fn is_retryable(&self) -> bool {
        matches!(self, CatalogError::Unavailable(_))
    }
}

/// In-memory catalog holding every listing loaded at startup. Records are never mutated.
#[derive(Debug, Clone, Default)]
pub struct CatalogStore {
    properties: Arc<Vec<Property>>,
}

impl CatalogStore {
    /// Builds a store after checking the listing invariants (unique ids, images, positive sizes).
    pub fn new(properties: Vec<Property>) -> Result<Self, CatalogError> {
        let mut seen = HashSet::with_capacity(properties.len());
        for property in &properties {
            validate(property)?;
            if !seen.insert(property.id.clone()) {
                return Err(CatalogError::DuplicateId(property.id.clone()));
            }
        }

        Ok(Self {
            properties: Arc::new(properties),
        })
    }

    /// The catalog bundled with the crate.
    pub fn standard() -> Result<Self, CatalogError> {
        Self::from_json(BUNDLED_CATALOG)
    }

    pub fn from_json(raw: &str) -> Result<Self, CatalogError> {
        let properties: Vec<Property> = serde_json::from_str(raw)?;
        Self::new(properties)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, CatalogError> {
        let properties: Vec<Property> = serde_json::from_reader(reader)?;
        Self::new(properties)
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let file = File::open(path)?;
        let store = Self::from_reader(BufReader::new(file))?;
        info!(path = %path.display(), listings = store.len(), "catalog fixture loaded");
        Ok(store)
    }

    pub fn properties(&self) -> &[Property] {
        &self.properties
    }

    pub fn get(&self, id: &PropertyId) -> Option<&Property> {
        self.properties.iter().find(|property| &property.id == id)
    }

    pub fn len(&self) -> usize {
        self.properties.len()
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }
}

impl CatalogRepository for CatalogStore {
    fn all(&self) -> Result<Vec<Property>, CatalogError> {
        Ok(self.properties.as_ref().clone())
    }

    fn fetch(&self, id: &PropertyId) -> Result<Option<Property>, CatalogError> {
        Ok(self.get(id).cloned())
    }
}

fn validate(property: &Property) -> Result<(), CatalogError> {
    let reason = if property.id.as_str().trim().is_empty() {
        Some("id must not be empty")
    } else if property.images.is_empty() {
        Some("at least one image is required")
    } else if property.price == 0 {
        Some("price must be positive")
    } else if property.square_footage == 0 {
        Some("square footage must be positive")
    } else if property.bathrooms.is_nan() || property.bathrooms < 0.0 {
        Some("bathrooms must be non-negative")
    } else {
        None
    };

    match reason {
        Some(reason) => Err(CatalogError::InvalidRecord {
            id: property.id.clone(),
            reason,
        }),
        None => Ok(()),
    }
}
