//! Geocoder and boundary-layer suggestion sources

use super::models::{BoundingBox, SourceRole, SuggestionRecord};
use super::source::{
    decode_body, parse_boundary_response, parse_geocoder_response, SuggestionSource,
};
use crate::config::Settings;
use crate::error::SuggestError;
use crate::network::{SourceRequest, SourceResponse};
use serde_json::Value;

/// External geocoder suggest service, restricted to a fixed extent
pub struct GeocoderSource {
    suggest_url: String,
    search_extent: BoundingBox,
    max_suggestions: Option<u32>,
    default_zoom: u8,
}

impl GeocoderSource {
    pub fn new(suggest_url: impl Into<String>) -> Self {
        Self {
            suggest_url: suggest_url.into(),
            search_extent: BoundingBox::CONTINENTAL_US,
            max_suggestions: None,
            default_zoom: 18,
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        let geocoder = &settings.geocoder;
        Self {
            suggest_url: geocoder.suggest_url.clone(),
            search_extent: geocoder.search_extent,
            max_suggestions: geocoder.max_suggestions,
            default_zoom: geocoder.default_zoom,
        }
    }

    pub fn with_extent(mut self, extent: BoundingBox) -> Self {
        self.search_extent = extent;
        self
    }

    pub fn with_max_suggestions(mut self, max: u32) -> Self {
        self.max_suggestions = Some(max);
        self
    }

    /// Extent suggestions are restricted to
    pub fn bounding_box(&self) -> BoundingBox {
        self.search_extent
    }
}

impl SuggestionSource for GeocoderSource {
    fn name(&self) -> &str {
        "geocoder"
    }

    fn role(&self) -> SourceRole {
        SourceRole::Geocoder
    }

    fn request(&self, query: &str) -> Result<SourceRequest, SuggestError> {
        let mut request = SourceRequest::get(&self.suggest_url)
            .param("f", "json")
            .param("searchExtent", self.search_extent.to_string())
            .param("text", query);

        if let Some(max) = self.max_suggestions {
            request = request.param("maxSuggestions", max.to_string());
        }

        Ok(request)
    }

    fn response(&self, response: SourceResponse) -> Result<Vec<SuggestionRecord>, SuggestError> {
        let body = decode_body(self.name(), &response)?;
        let raw = parse_geocoder_response(body).map_err(|e| SuggestError::parse(self.name(), e))?;
        build_records(self.name(), raw, |r| {
            SuggestionRecord::from_geocoder(r, self.default_zoom)
        })
    }
}

/// Internal boundary-layer search
pub struct BoundarySource {
    search_url: String,
}

impl BoundarySource {
    pub fn new(search_url: impl Into<String>) -> Self {
        Self {
            search_url: search_url.into(),
        }
    }

    pub fn from_settings(settings: &Settings) -> Result<Self, SuggestError> {
        let url = settings
            .api
            .endpoint(&settings.api.boundary_search_path)
            .map_err(|e| SuggestError::Config(e.to_string()))?;
        Ok(Self::new(url))
    }
}

impl SuggestionSource for BoundarySource {
    fn name(&self) -> &str {
        "boundary"
    }

    fn role(&self) -> SourceRole {
        SourceRole::Boundary
    }

    fn request(&self, query: &str) -> Result<SourceRequest, SuggestError> {
        Ok(SourceRequest::get(&self.search_url).param("text", query))
    }

    fn response(&self, response: SourceResponse) -> Result<Vec<SuggestionRecord>, SuggestError> {
        let body = decode_body(self.name(), &response)?;
        let raw = parse_boundary_response(body).map_err(|e| SuggestError::parse(self.name(), e))?;
        build_records(self.name(), raw, SuggestionRecord::from_boundary)
    }
}

fn build_records<F>(
    origin: &str,
    raw: Vec<Value>,
    build: F,
) -> Result<Vec<SuggestionRecord>, SuggestError>
where
    F: Fn(Value) -> Result<SuggestionRecord, String>,
{
    raw.into_iter()
        .map(|r| build(r).map_err(|e| SuggestError::parse(origin, e)))
        .collect()
}
