//! HTTP networking module
//!
//! Provides the HTTP client, request/response types and the cancellation
//! token shared by every data source.

mod client;
mod request;

pub use client::{HttpClient, TransportError};
pub use request::{FetchOptions, SourceRequest, SourceResponse};
pub use tokio_util::sync::CancellationToken;
