//! Typed view over a species record.
//!
//! The reader hands out raw JSON. The view layer projects each record into a
//! [`Species`] when it renders a card. Backend fields are filled from several
//! third-party sources and any of them may be missing, so every attribute is
//! optional.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// A record that does not have the species shape.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SpeciesError {
    /// Not a single-key object.
    #[error("expected an object with one species name, got {0}")]
    Shape(String),
    /// The attributes under the species name did not deserialize.
    #[error("invalid attributes for {name}: {message}")]
    Attributes { name: String, message: String },
}

/// One species returned by a search.
#[derive(Debug, Clone, PartialEq)]
pub struct Species {
    /// Display name (the record's single key)
    pub name: String,
    pub attributes: SpeciesAttributes,
}

/// Everything the backend knows about a species.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SpeciesAttributes {
    /// Image URLs
    #[serde(default)]
    pub images: Vec<String>,
    /// Wikipedia summary text
    #[serde(default)]
    pub wikipedia: Option<String>,
    /// iNaturalist taxon information
    #[serde(default)]
    pub inaturalist: Option<INaturalist>,
    /// Audio recordings (Xeno-canto)
    #[serde(default)]
    pub audio: Vec<AudioRecording>,
    /// Backend error while gathering this species' data
    #[serde(default)]
    pub error: Option<String>,
}

/// iNaturalist lookup result.
///
/// The backend sends a plain string instead of an object when the lookup
/// found nothing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum INaturalist {
    Details(TaxonDetails),
    Unavailable(String),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TaxonDetails {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub scientific_name: Option<String>,
    #[serde(default)]
    pub observations_count: Option<ObservationCount>,
    #[serde(default)]
    pub conservation_status: Option<String>,
    #[serde(default)]
    pub wikipedia_url: Option<String>,
}

/// Observation count, or `"N/A"` when iNaturalist has none.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ObservationCount {
    Count(u64),
    Text(String),
}

impl ObservationCount {
    pub fn as_count(&self) -> Option<u64> {
        match self {
            ObservationCount::Count(n) => Some(*n),
            ObservationCount::Text(_) => None,
        }
    }
}

/// One audio recording reference.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AudioRecording {
    #[serde(default)]
    pub source: Option<String>,
    /// Source-specific id; string or number depending on the source
    #[serde(default)]
    pub id: Option<Value>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub recordist: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub quality: Option<String>,
}

impl Species {
    /// Project a raw record into a species.
    ///
    /// The record must be an object with exactly one key whose value is an
    /// object.
    pub fn from_record(record: &Value) -> Result<Self, SpeciesError> {
        let map = record
            .as_object()
            .ok_or_else(|| SpeciesError::Shape(kind_of(record).to_string()))?;

        let mut entries = map.iter();
        let (name, attributes) = match (entries.next(), entries.next()) {
            (Some(entry), None) => entry,
            _ => return Err(SpeciesError::Shape(format!("object with {} keys", map.len()))),
        };

        if !attributes.is_object() {
            return Err(SpeciesError::Attributes {
                name: name.clone(),
                message: format!("expected an object, got {}", kind_of(attributes)),
            });
        }

        let attributes = SpeciesAttributes::deserialize(attributes).map_err(|e| {
            SpeciesError::Attributes {
                name: name.clone(),
                message: e.to_string(),
            }
        })?;

        Ok(Self {
            name: name.clone(),
            attributes,
        })
    }

    /// First image URL, if any.
    pub fn primary_image(&self) -> Option<&str> {
        self.attributes.images.first().map(String::as_str)
    }

    fn taxon(&self) -> Option<&TaxonDetails> {
        match &self.attributes.inaturalist {
            Some(INaturalist::Details(details)) => Some(details),
            _ => None,
        }
    }

    pub fn scientific_name(&self) -> Option<&str> {
        self.taxon()?
            .scientific_name
            .as_deref()
            .filter(|s| *s != "N/A")
    }

    pub fn conservation_status(&self) -> Option<&str> {
        self.taxon()?
            .conservation_status
            .as_deref()
            .filter(|s| *s != "N/A")
    }

    pub fn observations(&self) -> Option<u64> {
        self.taxon()?.observations_count.as_ref()?.as_count()
    }

    /// The Wikipedia summary cut to at most `max_chars` characters, on a word
    /// boundary when possible.
    pub fn summary_excerpt(&self, max_chars: usize) -> Option<String> {
        let text = self.attributes.wikipedia.as_deref()?.trim();
        if text.is_empty() {
            return None;
        }
        if text.chars().count() <= max_chars {
            return Some(text.to_string());
        }
        let cut: String = text.chars().take(max_chars).collect();
        let cut = match cut.rfind(' ') {
            Some(space) if space > 0 => &cut[..space],
            _ => cut.as_str(),
        };
        Some(format!("{}…", cut.trim_end()))
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
