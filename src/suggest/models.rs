//! Suggestion records, result sets and related data models

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Map, Value};
use std::fmt;

/// Geographic extent, in WGS84 degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub west: f64,
    pub south: f64,
    pub east: f64,
    pub north: f64,
}

impl BoundingBox {
    /// Continental United States
    pub const CONTINENTAL_US: BoundingBox = BoundingBox {
        west: -127.17,
        south: 24.76,
        east: -66.53,
        north: 50.4575,
    };

    pub fn new(west: f64, south: f64, east: f64, north: f64) -> Self {
        Self {
            west,
            south,
            east,
            north,
        }
    }
}

impl Default for BoundingBox {
    fn default() -> Self {
        Self::CONTINENTAL_US
    }
}

/// Renders as `west,south,east,north`
impl fmt::Display for BoundingBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{},{},{}", self.west, self.south, self.east, self.north)
    }
}

/// Which source a record or slot belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceRole {
    /// External geocoder suggest service
    Geocoder,
    /// Internal boundary-layer search
    Boundary,
}

impl SourceRole {
    pub fn name(&self) -> &'static str {
        match self {
            SourceRole::Geocoder => "geocoder",
            SourceRole::Boundary => "boundary",
        }
    }
}

impl fmt::Display for SourceRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Source-specific identity of a suggestion.
///
/// Geocoder and boundary identities live in separate spaces and never compare equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SuggestionKey {
    /// Opaque geocoder key, needed to resolve coordinates
    MagicKey(String),
    /// Internal boundary-layer id
    Boundary(String),
}

impl SuggestionKey {
    pub fn role(&self) -> SourceRole {
        match self {
            SuggestionKey::MagicKey(_) => SourceRole::Geocoder,
            SuggestionKey::Boundary(_) => SourceRole::Boundary,
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            SuggestionKey::MagicKey(k) | SuggestionKey::Boundary(k) => k,
        }
    }
}

/// Fields lifted out of a raw record into typed slots
const KNOWN_FIELDS: &[&str] = &["text", "magicKey", "id", "x", "y", "zoom", "isBoundaryLayer"];

/// One candidate answer to a location query
#[derive(Debug, Clone, PartialEq)]
pub struct SuggestionRecord {
    /// Display label
    pub text: String,
    /// Source-specific identity
    pub key: SuggestionKey,
    /// Longitude, once known
    pub x: Option<f64>,
    /// Latitude, once known
    pub y: Option<f64>,
    /// Zoom hint for the map
    pub zoom: Option<u8>,
    /// Any other fields the service returned
    pub extra: Map<String, Value>,
}

impl SuggestionRecord {
    /// Build a geocoder record from a raw `{text, magicKey, ...}` object
    pub fn from_geocoder(raw: Value, default_zoom: u8) -> Result<Self, String> {
        let mut fields = into_object(raw)?;
        let magic_key = match fields.get("magicKey") {
            Some(Value::String(key)) => key.clone(),
            _ => return Err("suggestion has no magicKey".to_string()),
        };

        let mut record = Self::with_key(&mut fields, SuggestionKey::MagicKey(magic_key));
        if record.zoom.is_none() {
            record.zoom = Some(default_zoom);
        }
        Ok(record)
    }

    /// Build a boundary record from a raw `{id, text, ...}` object
    pub fn from_boundary(raw: Value) -> Result<Self, String> {
        let mut fields = into_object(raw)?;
        let id = match fields.get("id") {
            Some(Value::String(id)) => id.clone(),
            Some(Value::Number(id)) => id.to_string(),
            _ => return Err("boundary record has no id".to_string()),
        };

        Ok(Self::with_key(&mut fields, SuggestionKey::Boundary(id)))
    }

    fn with_key(fields: &mut Map<String, Value>, key: SuggestionKey) -> Self {
        let text = fields
            .get("text")
            .and_then(|t| t.as_str())
            .unwrap_or_default()
            .to_string();
        let x = fields.get("x").and_then(|v| v.as_f64());
        let y = fields.get("y").and_then(|v| v.as_f64());
        let zoom = fields
            .get("zoom")
            .and_then(|v| v.as_u64())
            .and_then(|z| u8::try_from(z).ok());

        for field in KNOWN_FIELDS {
            fields.remove(*field);
        }

        Self {
            text,
            key,
            x,
            y,
            zoom,
            extra: std::mem::take(fields),
        }
    }

    /// Whether this is a named-area match rather than a point match
    pub fn is_boundary_layer(&self) -> bool {
        self.key.role() == SourceRole::Boundary
    }

    /// Geocoder key, for geocoder records
    pub fn magic_key(&self) -> Option<&str> {
        match self.key {
            SuggestionKey::MagicKey(ref k) => Some(k.as_str()),
            SuggestionKey::Boundary(_) => None,
        }
    }

    /// Whether both coordinates are known
    pub fn has_location(&self) -> bool {
        self.x.is_some() && self.y.is_some()
    }

    /// Merge fields returned by a select lookup into this record.
    ///
    /// The identity never changes; every other field is overwritten when present.
    pub fn apply_fields(&mut self, fields: &Map<String, Value>) {
        if let Some(text) = fields.get("text").and_then(|t| t.as_str()) {
            self.text = text.to_string();
        }
        if let Some(x) = fields.get("x").and_then(|v| v.as_f64()) {
            self.x = Some(x);
        }
        if let Some(y) = fields.get("y").and_then(|v| v.as_f64()) {
            self.y = Some(y);
        }
        if let Some(zoom) = fields
            .get("zoom")
            .and_then(|v| v.as_u64())
            .and_then(|z| u8::try_from(z).ok())
        {
            self.zoom = Some(zoom);
        }
        for (key, value) in fields {
            if !KNOWN_FIELDS.contains(&key.as_str()) {
                self.extra.insert(key.clone(), value.clone());
            }
        }
    }

    /// Map position for this record, if its coordinates are known.
    ///
    /// `zoom` overrides the record's own zoom hint.
    pub fn location_update(&self, zoom: Option<u8>) -> Option<LocationUpdate> {
        match (self.y, self.x) {
            (Some(lat), Some(lng)) => Some(LocationUpdate {
                lat,
                lng,
                zoom: zoom.or(self.zoom),
            }),
            _ => None,
        }
    }
}

fn into_object(raw: Value) -> Result<Map<String, Value>, String> {
    match raw {
        Value::Object(fields) => Ok(fields),
        other => Err(format!("expected a record object, got {}", kind_of(&other))),
    }
}

/// Short JSON type name for error messages
pub(crate) fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "list",
        Value::Object(_) => "object",
    }
}

/// Serializes with the camelCase field names the UI expects
impl Serialize for SuggestionRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("text", &self.text)?;
        match self.key {
            SuggestionKey::MagicKey(ref key) => map.serialize_entry("magicKey", key)?,
            SuggestionKey::Boundary(ref id) => map.serialize_entry("id", id)?,
        }
        map.serialize_entry("isBoundaryLayer", &self.is_boundary_layer())?;
        if let Some(x) = self.x {
            map.serialize_entry("x", &x)?;
        }
        if let Some(y) = self.y {
            map.serialize_entry("y", &y)?;
        }
        if let Some(zoom) = self.zoom {
            map.serialize_entry("zoom", &zoom)?;
        }
        for (key, value) in &self.extra {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

/// Ordered union of geocoder and boundary records for one query.
///
/// Geocoder records always come first, each slot in the order its source returned.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SuggestionSet {
    geocoder: Vec<SuggestionRecord>,
    boundary: Vec<SuggestionRecord>,
}

impl SuggestionSet {
    pub fn new(geocoder: Vec<SuggestionRecord>, boundary: Vec<SuggestionRecord>) -> Self {
        Self { geocoder, boundary }
    }

    /// Replace one source's contribution
    pub fn replace(&mut self, role: SourceRole, records: Vec<SuggestionRecord>) {
        match role {
            SourceRole::Geocoder => self.geocoder = records,
            SourceRole::Boundary => self.boundary = records,
        }
    }

    pub fn clear(&mut self) {
        self.geocoder.clear();
        self.boundary.clear();
    }

    /// Records contributed by one source
    pub fn slot(&self, role: SourceRole) -> &[SuggestionRecord] {
        match role {
            SourceRole::Geocoder => &self.geocoder,
            SourceRole::Boundary => &self.boundary,
        }
    }

    /// Records in display order
    pub fn iter(&self) -> impl Iterator<Item = &SuggestionRecord> {
        self.geocoder.iter().chain(self.boundary.iter())
    }

    pub fn get(&self, index: usize) -> Option<&SuggestionRecord> {
        self.iter().nth(index)
    }

    pub fn find(&self, key: &SuggestionKey) -> Option<&SuggestionRecord> {
        self.iter().find(|r| &r.key == key)
    }

    pub fn len(&self) -> usize {
        self.geocoder.len() + self.boundary.len()
    }

    pub fn is_empty(&self) -> bool {
        self.geocoder.is_empty() && self.boundary.is_empty()
    }

    /// Display labels in order
    pub fn labels(&self) -> Vec<&str> {
        self.iter().map(|r| r.text.as_str()).collect()
    }
}

impl Serialize for SuggestionSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.iter())
    }
}

/// Map position produced by selecting a suggestion
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LocationUpdate {
    pub lat: f64,
    pub lng: f64,
    pub zoom: Option<u8>,
}
