//! Area-of-interest analysis results
//!
//! Each analysis layer (land cover, soil, ...) reports the area and share
//! of the area of interest covered by each of its categories.

use crate::config::Settings;
use crate::error::SuggestError;
use crate::network::{FetchOptions, HttpClient, SourceRequest};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::debug;

const ORIGIN: &str = "analyze";

/// Parameters of an analysis request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzeParams {
    /// Area of interest size
    pub area: f64,
    /// Place name the area belongs to
    pub place: String,
}

impl Default for AnalyzeParams {
    fn default() -> Self {
        Self {
            area: 10.0,
            place: "Philadelphia".to_string(),
        }
    }
}

/// One analysis layer with its categories
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Layer {
    pub name: String,
    #[serde(default, rename = "displayName", skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(default)]
    pub categories: Vec<LayerCategory>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Layer {
    /// Sum of category areas
    pub fn total_area(&self) -> f64 {
        self.categories.iter().map(|c| c.area).sum()
    }

    /// Category with the largest coverage
    pub fn dominant(&self) -> Option<&LayerCategory> {
        self.categories.iter().max_by(|a, b| {
            a.coverage
                .partial_cmp(&b.coverage)
                .unwrap_or(std::cmp::Ordering::Equal)
        })
    }
}

/// Share of a layer taken by one category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayerCategory {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub area: f64,
    #[serde(default)]
    pub coverage: f64,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Fetches analysis layers from the application API
pub struct AnalyzeService {
    client: HttpClient,
    analyze_url: String,
}

impl AnalyzeService {
    pub fn new(client: HttpClient, analyze_url: impl Into<String>) -> Self {
        Self {
            client,
            analyze_url: analyze_url.into(),
        }
    }

    pub fn from_settings(client: HttpClient, settings: &Settings) -> Result<Self, SuggestError> {
        let url = settings
            .api
            .endpoint(&settings.api.analyze_path)
            .map_err(|e| SuggestError::Config(e.to_string()))?;
        Ok(Self::new(client, url))
    }

    /// Build the analyze request for one area of interest
    pub fn request(&self, params: &AnalyzeParams) -> SourceRequest {
        SourceRequest::get(&self.analyze_url)
            .param("area", params.area.to_string())
            .param("place", &params.place)
    }

    /// Fetch every layer of the analysis for `params`
    pub async fn fetch_layers(
        &self,
        params: &AnalyzeParams,
        options: &FetchOptions,
    ) -> Result<Vec<Layer>, SuggestError> {
        let response = self
            .client
            .execute(self.request(params), options)
            .await
            .map_err(|e| SuggestError::transport(ORIGIN, e))?;

        if !response.is_success() {
            return Err(SuggestError::status(ORIGIN, response.status));
        }

        let layers: Vec<Layer> = response
            .json()
            .map_err(|e| SuggestError::parse(ORIGIN, e.to_string()))?;

        debug!("Fetched {} analysis layers", layers.len());
        Ok(layers)
    }
}
