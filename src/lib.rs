//! mmw-client: client data layer for a watershed-analysis application
//!
//! Fetches location suggestions from an external geocoder and the internal
//! boundary-layer search, resolves selected suggestions to map positions,
//! loads analysis layers, and provides the comparison view's chart tables.

pub mod analyze;
pub mod compare;
pub mod config;
pub mod error;
pub mod network;
pub mod suggest;

pub use config::Settings;
pub use error::SuggestError;
pub use network::{CancellationToken, FetchOptions, HttpClient};
pub use suggest::{
    LocationResolver, LocationUpdate, SuggestionAggregator, SuggestionRecord, SuggestionSet,
};

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
