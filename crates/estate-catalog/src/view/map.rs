//! Decorative map stand-in: zoom level and a fixed pin scatter, no real projection.

use serde::Serialize;

use crate::catalog::{Property, PropertyId};

pub const DEFAULT_ZOOM: u8 = 15;
pub const MIN_ZOOM: u8 = 8;
pub const MAX_ZOOM: u8 = 20;
const ZOOM_STEP: u8 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MapViewport {
    zoom: u8,
}

impl Default for MapViewport {
    fn default() -> Self {
        Self { zoom: DEFAULT_ZOOM }
    }
}

impl MapViewport {
    pub fn zoom(&self) -> u8 {
        self.zoom
    }

    pub fn zoom_in(&mut self) -> u8 {
        self.zoom = self.zoom.saturating_add(ZOOM_STEP).min(MAX_ZOOM);
        self.zoom
    }

    pub fn zoom_out(&mut self) -> u8 {
        self.zoom = self.zoom.saturating_sub(ZOOM_STEP).max(MIN_ZOOM);
        self.zoom
    }
}

/// Pin position as percentages of the map panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MapPin {
    pub property_id: PropertyId,
    pub title: String,
    pub left_pct: u32,
    pub top_pct: u32,
}

pub fn pin_position(index: usize) -> (u32, u32) {
    let left = 20 + (index * 15) % 60;
    let top = 30 + (index * 10) % 40;
    (left as u32, top as u32)
}

pub fn layout_pins(properties: &[Property]) -> Vec<MapPin> {
    properties
        .iter()
        .enumerate()
        .map(|(index, property)| {
            let (left_pct, top_pct) = pin_position(index);
            MapPin {
                property_id: property.id.clone(),
                title: property.title.clone(),
                left_pct,
                top_pct,
            }
        })
        .collect()
}
