//! Resolving a selected suggestion to map coordinates

use super::models::{LocationUpdate, SuggestionRecord};
use super::source::{decode_body, parse_select_response};
use crate::config::Settings;
use crate::error::SuggestError;
use crate::network::{FetchOptions, HttpClient, SourceRequest};
use moka::future::Cache;
use serde_json::{Map, Value};
use std::time::Duration;
use tracing::debug;

const ORIGIN: &str = "geocode";

/// Looks up coordinates for geocoder suggestions.
///
/// Boundary suggestions need no lookup and pass through untouched.
pub struct LocationResolver {
    client: HttpClient,
    geocode_url: String,
    default_zoom: u8,
    /// Resolved fields by magic key
    cache: Cache<String, Map<String, Value>>,
}

impl LocationResolver {
    pub fn new(client: HttpClient, geocode_url: impl Into<String>) -> Self {
        Self {
            client,
            geocode_url: geocode_url.into(),
            default_zoom: 18,
            cache: Cache::builder()
                .time_to_live(Duration::from_secs(600))
                .max_capacity(1000)
                .build(),
        }
    }

    pub fn from_settings(client: HttpClient, settings: &Settings) -> Result<Self, SuggestError> {
        let url = settings
            .api
            .endpoint(&settings.api.geocode_path)
            .map_err(|e| SuggestError::Config(e.to_string()))?;

        Ok(Self {
            client,
            geocode_url: url.into(),
            default_zoom: settings.geocoder.default_zoom,
            cache: Cache::builder()
                .time_to_live(Duration::from_secs(settings.cache.select_ttl))
                .max_capacity(settings.cache.select_capacity)
                .build(),
        })
    }

    /// Build the lookup request for a geocoder record
    pub fn request(&self, magic_key: &str, text: &str) -> SourceRequest {
        SourceRequest::get(&self.geocode_url)
            .param("key", magic_key)
            .param("search", text)
    }

    /// Populate a record's coordinates.
    ///
    /// Geocoder records are looked up by magic key (cached); boundary
    /// records are left as they are.
    pub async fn select(
        &self,
        record: &mut SuggestionRecord,
        options: &FetchOptions,
    ) -> Result<(), SuggestError> {
        let Some(magic_key) = record.magic_key().map(String::from) else {
            return Ok(());
        };

        if let Some(fields) = self.cache.get(&magic_key).await {
            debug!("Using cached location for '{}'", record.text);
            record.apply_fields(&fields);
            return Ok(());
        }

        let request = self.request(&magic_key, &record.text);
        let response = self
            .client
            .execute(request, options)
            .await
            .map_err(|e| SuggestError::transport(ORIGIN, e))?;

        let body = decode_body(ORIGIN, &response)?;
        let fields = match parse_select_response(body) {
            Value::Object(fields) => fields,
            other => {
                return Err(SuggestError::parse(
                    ORIGIN,
                    format!("expected a location record, got {}", super::models::kind_of(&other)),
                ))
            }
        };

        record.apply_fields(&fields);
        self.cache.insert(magic_key, fields).await;
        Ok(())
    }

    /// Select a record and compute where the map should move.
    ///
    /// Returns `None` when the record has no coordinates. `zoom` overrides
    /// the record's zoom hint; the configured default applies when neither is set.
    pub async fn locate(
        &self,
        record: &mut SuggestionRecord,
        zoom: Option<u8>,
        options: &FetchOptions,
    ) -> Result<Option<LocationUpdate>, SuggestError> {
        self.select(record, options).await?;
        Ok(record.location_update(zoom).map(|mut update| {
            update.zoom = update.zoom.or(Some(self.default_zoom));
            update
        }))
    }

    /// Number of cached lookups
    pub fn cached(&self) -> u64 {
        self.cache.entry_count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_select_request() {
        let resolver = LocationResolver::new(
            HttpClient::new().unwrap(),
            "http://localhost:8000/api/geocode/",
        );
        let request = resolver.request("abc", "Philadelphia, PA");

        assert_eq!(request.url, "http://localhost:8000/api/geocode/");
        assert_eq!(request.param_value("key"), Some("abc"));
        assert_eq!(request.param_value("search"), Some("Philadelphia, PA"));
    }

    #[tokio::test]
    async fn test_boundary_select_makes_no_request() {
        // Unroutable URL: a request would fail
        let resolver = LocationResolver::new(HttpClient::new().unwrap(), "http://127.0.0.1:9/");
        let mut record =
            SuggestionRecord::from_boundary(json!({"id": 5, "text": "Brandywine"})).unwrap();
        let before = record.clone();

        resolver.select(&mut record, &FetchOptions::new()).await.unwrap();
        assert_eq!(record, before);

        let update = resolver.locate(&mut record, None, &FetchOptions::new()).await.unwrap();
        assert!(update.is_none());
    }

    #[tokio::test]
    async fn test_boundary_with_coordinates_uses_default_zoom() {
        let resolver = LocationResolver::new(HttpClient::new().unwrap(), "http://127.0.0.1:9/");
        let mut record = SuggestionRecord::from_boundary(json!({
            "id": 5,
            "text": "Brandywine",
            "x": -75.6,
            "y": 39.9
        }))
        .unwrap();

        let update = resolver
            .locate(&mut record, None, &FetchOptions::new())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(update.zoom, Some(18));
        assert_eq!(update.lat, 39.9);
    }

    #[tokio::test]
    async fn test_from_settings() {
        let settings = Settings::default();
        let resolver =
            LocationResolver::from_settings(HttpClient::new().unwrap(), &settings).unwrap();
        assert_eq!(resolver.geocode_url, "http://localhost:8000/api/geocode/");
        assert_eq!(resolver.cached(), 0);
    }
}
