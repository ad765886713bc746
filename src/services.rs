pub mod aggregator;
pub mod draw_service;
pub mod presentation;

pub use aggregator::aggregate;
pub use draw_service::{DrawService, DrawServiceError};
pub use presentation::{summarize, top_locations, DEFAULT_TOP_LOCATIONS};
