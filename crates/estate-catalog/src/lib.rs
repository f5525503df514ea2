//! Search, favorites, and view coordination for a real-estate listing browser.

pub mod browse;
pub mod catalog;
pub mod config;
pub mod error;
pub mod favorites;
pub mod search;
pub mod telemetry;
pub mod view;
