//! Core data types: catalog input, image records and per-image metadata.
//!
//! The metadata schema mirrors the `metadata.json` documents that sit next to
//! each category folder (`img/<category>/metadata.json`), keyed by filename.
//! Every field is optional: documents are produced by an external tagging tool
//! and partial records are common.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Placeholder used for years and locations that cannot be derived.
pub const UNKNOWN: &str = "Unknown";

/// One image descriptor as rendered by the page template.
///
/// `src` is the eager source; lazy images only carry `data_src` until they
/// scroll into view.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawItem {
    #[serde(default)]
    pub src: Option<String>,
    #[serde(default)]
    pub data_src: Option<String>,
    #[serde(default)]
    pub alt: String,
    #[serde(default)]
    pub category: Option<String>,
}

impl RawItem {
    pub fn new(src: impl Into<String>, alt: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            src: Some(src.into()),
            data_src: None,
            alt: alt.into(),
            category: Some(category.into()),
        }
    }

    /// The image source: `src` when non-empty, else `data_src`.
    pub fn resolved_source(&self) -> Option<&str> {
        [self.src.as_deref(), self.data_src.as_deref()]
            .into_iter()
            .flatten()
            .map(str::trim)
            .find(|s| !s.is_empty())
    }
}

/// Intrinsic pixel dimensions of an image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Size {
    pub width: u32,
    pub height: u32,
}

impl Size {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Height of this image when scaled to `width`, if the size is usable.
    pub fn scaled_height(&self, width: f64) -> Option<f64> {
        if self.width == 0 || self.height == 0 {
            return None;
        }
        Some(width * f64::from(self.height) / f64::from(self.width))
    }
}

/// Splits a `YYYY-MM-Location` category into `(year, location)`.
///
/// The location is everything after the second dash and may itself contain
/// dashes. Missing pieces become [`UNKNOWN`].
pub fn parse_category(category: &str) -> (String, String) {
    let year: String = category.chars().take(4).collect();
    let year = if year.is_empty() {
        UNKNOWN.to_string()
    } else {
        year
    };

    let parts: Vec<&str> = category.split('-').collect();
    let location = if parts.len() > 2 {
        parts[2..].join("-")
    } else {
        UNKNOWN.to_string()
    };

    (year, location)
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageRecord {
    pub id: String,
    pub alt_text: String,
    pub category: String,
    year: String,
    location: String,
    pub metadata: Option<Metadata>,
    pub natural_size: Option<Size>,
    pub visible: bool,
}

impl ImageRecord {
    pub fn new(id: impl Into<String>, alt_text: impl Into<String>, category: impl Into<String>) -> Self {
        let category = category.into();
        let (year, location) = parse_category(&category);
        Self {
            id: id.into(),
            alt_text: alt_text.into(),
            category,
            year,
            location,
            metadata: None,
            natural_size: None,
            visible: true,
        }
    }

    pub fn year(&self) -> &str {
        &self.year
    }

    pub fn location(&self) -> &str {
        &self.location
    }

    /// Filename part of the id, without query string, percent-decoded.
    pub fn filename(&self) -> String {
        filename_from_source(&self.id)
    }
}

/// Basename of a path or URL with any `?query` stripped and percent-escapes
/// decoded. Falls back to the raw basename when decoding fails.
pub fn filename_from_source(source: &str) -> String {
    let base = source.rsplit('/').next().unwrap_or(source);
    let base = base.split('?').next().unwrap_or(base);
    match urlencoding::decode(base) {
        Ok(decoded) => decoded.into_owned(),
        Err(_) => base.to_string(),
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Metadata {
    pub photography: Option<Photography>,
    pub scene: Option<Scene>,
    pub objects: Vec<DetectedObject>,
    pub people: Option<People>,
    pub colors: Vec<ColorSwatch>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Photography {
    /// Comma-separated style list, e.g. "portrait, street".
    pub style: Option<String>,
    pub shot_type: Option<String>,
    pub lighting: Option<String>,
    pub subject_focus: Option<String>,
    pub orientation: Option<String>,
    pub composition: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Scene {
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub time_of_day: Option<String>,
    pub weather: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectedObject {
    pub name: String,
    pub confidence: f64,
    pub position: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct People {
    pub count: u32,
    pub attributes: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColorSwatch {
    pub hex: String,
    pub percentage: f64,
}

/// Metadata for every image of one category folder, keyed by filename.
///
/// Entries keep the order of the source document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FolderMetadata {
    entries: IndexMap<String, Metadata>,
}

impl FolderMetadata {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a `metadata.json` document.
    ///
    /// The document must be a JSON object; individual entries that do not fit
    /// the schema are skipped with a warning.
    pub fn from_json(content: &str) -> serde_json::Result<Self> {
        let raw: IndexMap<String, serde_json::Value> = serde_json::from_str(content)?;
        let mut entries = IndexMap::new();
        for (filename, value) in raw {
            match serde_json::from_value::<Metadata>(value) {
                Ok(meta) => {
                    entries.insert(filename, meta);
                }
                Err(e) => {
                    tracing::warn!(%filename, error = %e, "skipping malformed metadata entry");
                }
            }
        }
        Ok(Self { entries })
    }

    pub fn insert(&mut self, filename: impl Into<String>, meta: Metadata) {
        self.entries.insert(filename.into(), meta);
    }

    pub fn with_entry(mut self, filename: impl Into<String>, meta: Metadata) -> Self {
        self.insert(filename, meta);
        self
    }

    /// Exact filename lookup, then the first case-insensitive match in
    /// document order.
    pub fn find(&self, filename: &str) -> Option<&Metadata> {
        if let Some(meta) = self.entries.get(filename) {
            return Some(meta);
        }
        let wanted = filename.to_lowercase();
        self.entries
            .iter()
            .find(|(key, _)| key.to_lowercase() == wanted)
            .map(|(_, meta)| meta)
    }

    pub fn values(&self) -> impl Iterator<Item = &Metadata> {
        self.entries.values()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

pub type MetadataByCategory = HashMap<String, FolderMetadata>;
