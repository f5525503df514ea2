//! Grid/map presentation state: the view coordinator, card models, image carousel, and map stub.

pub mod card;
pub mod carousel;
pub mod coordinator;
pub mod map;

pub use card::PropertyCardView;
pub use carousel::ImageCarousel;
pub use coordinator::{
    FetchFailureNotice, FetchOutcome, FetchTicket, ViewCoordinator, ViewError, ViewMode,
};
pub use map::{layout_pins, pin_position, MapPin, MapViewport};
