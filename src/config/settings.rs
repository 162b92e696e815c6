//! Settings structures for mmw-client configuration

use crate::suggest::BoundingBox;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

/// Main settings structure, loaded from settings.yml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub general: GeneralSettings,
    pub geocoder: GeocoderSettings,
    pub api: ApiSettings,
    pub outgoing: OutgoingSettings,
    pub cache: CacheSettings,
}

impl Settings {
    /// Load settings from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse settings from a YAML document
    pub fn from_yaml(content: &str) -> Result<Self> {
        let settings: Settings = serde_yaml::from_str(content)?;
        Ok(settings)
    }

    /// Merge with environment variables (MMW_* prefix)
    pub fn merge_env(&mut self) {
        self.merge_vars(|key| std::env::var(key).ok());
    }

    fn merge_vars<F>(&mut self, var: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(val) = var("MMW_DEBUG") {
            self.general.debug = val.parse().unwrap_or(false);
        }
        if let Some(val) = var("MMW_LOG_LEVEL") {
            self.general.log_level = val;
        }
        if let Some(val) = var("MMW_API_BASE_URL") {
            self.api.base_url = val;
        }
        if let Some(val) = var("MMW_GEOCODER_URL") {
            self.geocoder.suggest_url = val;
        }
        if let Some(val) = var("MMW_REQUEST_TIMEOUT") {
            match val.parse::<f64>() {
                Ok(timeout) if timeout.is_finite() && timeout > 0.0 => {
                    self.outgoing.request_timeout = timeout;
                }
                _ => {}
            }
        }
    }
}

/// General settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralSettings {
    /// Enable debug mode
    pub debug: bool,
    /// Default tracing filter when RUST_LOG is unset
    pub log_level: String,
}

impl Default for GeneralSettings {
    fn default() -> Self {
        Self {
            debug: false,
            log_level: "info".to_string(),
        }
    }
}

/// External geocoder settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeocoderSettings {
    /// Suggest endpoint of the geocoding service
    pub suggest_url: String,
    /// Extent that suggestions are restricted to
    pub search_extent: BoundingBox,
    /// Upper bound on suggestions per query (service default when unset)
    pub max_suggestions: Option<u32>,
    /// Zoom level applied to a selected geocoder suggestion
    pub default_zoom: u8,
}

impl Default for GeocoderSettings {
    fn default() -> Self {
        Self {
            suggest_url:
                "https://geocode.arcgis.com/arcgis/rest/services/World/GeocodeServer/suggest"
                    .to_string(),
            search_extent: BoundingBox::CONTINENTAL_US,
            max_suggestions: None,
            default_zoom: 18,
        }
    }
}

/// Internal application API settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiSettings {
    /// Base URL of the application server
    pub base_url: String,
    pub boundary_search_path: String,
    pub geocode_path: String,
    pub analyze_path: String,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".to_string(),
            boundary_search_path: "/api/modeling/boundary-layers-search".to_string(),
            geocode_path: "/api/geocode/".to_string(),
            analyze_path: "/api/analyze/".to_string(),
        }
    }
}

impl ApiSettings {
    /// Resolve an API path against the base URL
    pub fn endpoint(&self, path: &str) -> Result<url::Url> {
        let base = url::Url::parse(&self.base_url)?;
        Ok(base.join(path)?)
    }
}

/// Outgoing request settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutgoingSettings {
    /// Default request timeout in seconds
    pub request_timeout: f64,
    /// Pool max size
    pub pool_maxsize: usize,
    /// Verify SSL certificates
    pub verify_ssl: bool,
    /// Proxy settings
    pub proxies: ProxySettings,
    /// Extra headers to send
    pub extra_headers: HashMap<String, String>,
}

impl Default for OutgoingSettings {
    fn default() -> Self {
        Self {
            request_timeout: 10.0,
            pool_maxsize: 10,
            verify_ssl: true,
            proxies: ProxySettings::default(),
            extra_headers: HashMap::new(),
        }
    }
}

/// Proxy settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProxySettings {
    pub http: Option<String>,
    pub https: Option<String>,
    pub all: Option<String>,
}

/// Select-result cache settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheSettings {
    /// Time to live for resolved suggestions, in seconds
    pub select_ttl: u64,
    /// Maximum number of resolved suggestions kept
    pub select_capacity: u64,
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            select_ttl: 600,
            select_capacity: 1000,
        }
    }
}
