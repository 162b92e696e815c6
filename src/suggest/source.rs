//! Suggestion source trait and response parsing rules

use super::models::{kind_of, SourceRole, SuggestionRecord};
use crate::error::SuggestError;
use crate::network::{FetchOptions, HttpClient, SourceRequest, SourceResponse};
use async_trait::async_trait;
use serde_json::Value;

/// A service that turns a query into an ordered list of suggestion records
#[async_trait]
pub trait SuggestionSource: Send + Sync {
    /// Source name, used in logs and errors
    fn name(&self) -> &str;

    /// Slot this source fills in a suggestion set
    fn role(&self) -> SourceRole;

    /// Build the HTTP request for a query
    fn request(&self, query: &str) -> Result<SourceRequest, SuggestError>;

    /// Parse the HTTP response into records
    fn response(&self, response: SourceResponse) -> Result<Vec<SuggestionRecord>, SuggestError>;

    /// Fetch records for a query, passing `options` through to the transport
    async fn fetch(
        &self,
        client: &HttpClient,
        query: &str,
        options: &FetchOptions,
    ) -> Result<Vec<SuggestionRecord>, SuggestError> {
        let request = self.request(query)?;
        let response = client
            .execute(request, options)
            .await
            .map_err(|e| SuggestError::transport(self.name(), e))?;
        self.response(response)
    }
}

/// Decode a response body, rejecting non-2xx statuses first
pub(crate) fn decode_body(origin: &str, response: &SourceResponse) -> Result<Value, SuggestError> {
    if !response.is_success() {
        return Err(SuggestError::status(origin, response.status));
    }
    response
        .json()
        .map_err(|e| SuggestError::parse(origin, e.to_string()))
}

/// Raw records of a geocoder suggest response: the `suggestions` field
pub fn parse_geocoder_response(body: Value) -> Result<Vec<Value>, String> {
    match body {
        Value::Object(mut fields) => match fields.remove("suggestions") {
            Some(Value::Array(records)) => Ok(records),
            Some(other) => Err(format!("suggestions is a {}, not a list", kind_of(&other))),
            None => Err("response has no suggestions field".to_string()),
        },
        other => Err(format!("expected an object, got {}", kind_of(&other))),
    }
}

/// Raw records of a boundary search response: the body itself
pub fn parse_boundary_response(body: Value) -> Result<Vec<Value>, String> {
    match body {
        Value::Array(records) => Ok(records),
        other => Err(format!("expected a list, got {}", kind_of(&other))),
    }
}

/// A select lookup answers with a singleton list; anything else is
/// already a record and passes through unchanged.
pub fn parse_select_response(body: Value) -> Value {
    match body {
        Value::Array(mut items) if !items.is_empty() => items.swap_remove(0),
        other => other,
    }
}
