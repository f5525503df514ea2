//! Filter specification, the search predicate, and the live filter state behind the filter panel.

pub mod engine;
pub mod filter;
pub mod state;

pub use engine::{matches, search};
pub use filter::{FilterError, FilterSpec, FilterUpdate, PriceRange, DEFAULT_MAX_PRICE};
pub use state::{active_filter_count, filter_badges, FilterStateManager};
