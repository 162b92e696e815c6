//! Location suggestions
//!
//! Fetches candidate locations for a typed query from the external geocoder
//! and the internal boundary-layer search, merges them into one ordered set,
//! and resolves a chosen suggestion to map coordinates.

mod aggregator;
mod live;
mod models;
mod select;
mod source;
mod sources;

pub use aggregator::SuggestionAggregator;
pub use live::{LiveState, LiveSuggestions};
pub use models::*;
pub use select::LocationResolver;
pub use source::{
    parse_boundary_response, parse_geocoder_response, parse_select_response, SuggestionSource,
};
pub use sources::{BoundarySource, GeocoderSource};
