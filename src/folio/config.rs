use crate::error::{FolioError, Result};
use crate::layout::{
    default_breakpoints, Breakpoint, ColumnBreakpoints, LayoutOptions, DEFAULT_COLUMNS,
    DEFAULT_FALLBACK_HEIGHT, DEFAULT_ROW_GAP,
};
use crate::lazy::DEFAULT_ROOT_MARGIN;
use crate::tags::DEFAULT_TOP_OBJECTS;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

pub const CONFIG_FILENAME: &str = "folio.json";
const DEFAULT_MIN_QUERY_LEN: usize = 2;
const DEFAULT_RESIZE_DEBOUNCE_MS: u64 = 200;
const DEFAULT_SECTION_SPACING: f64 = 48.0;

/// Gallery settings, stored in `<site>/folio.json`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct FolioConfig {
    /// Prefix for metadata URLs (e.g. "/gallery" or "https://example.org").
    pub base_url: String,
    pub default_columns: usize,
    pub breakpoints: Vec<Breakpoint>,
    pub row_gap: f64,
    pub column_gap: f64,
    pub fallback_height: f64,
    /// Queries shorter than this (and without tag tokens) don't search.
    pub min_query_len: usize,
    pub top_objects: usize,
    pub resize_debounce_ms: u64,
    pub lazy_root_margin: f64,
    /// Vertical space between year sections.
    pub section_spacing: f64,
    /// Read image headers to get intrinsic sizes.
    pub measure_images: bool,
}

impl Default for FolioConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            default_columns: DEFAULT_COLUMNS,
            breakpoints: default_breakpoints(),
            row_gap: DEFAULT_ROW_GAP,
            column_gap: 0.0,
            fallback_height: DEFAULT_FALLBACK_HEIGHT,
            min_query_len: DEFAULT_MIN_QUERY_LEN,
            top_objects: DEFAULT_TOP_OBJECTS,
            resize_debounce_ms: DEFAULT_RESIZE_DEBOUNCE_MS,
            lazy_root_margin: DEFAULT_ROOT_MARGIN,
            section_spacing: DEFAULT_SECTION_SPACING,
            measure_images: true,
        }
    }
}

/// Keys accepted by [`FolioConfig::get`] and [`FolioConfig::set`].
pub const CONFIG_KEYS: [&str; 11] = [
    "base_url",
    "default_columns",
    "row_gap",
    "column_gap",
    "fallback_height",
    "min_query_len",
    "top_objects",
    "resize_debounce_ms",
    "lazy_root_margin",
    "section_spacing",
    "measure_images",
];

impl FolioConfig {
    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(dir: P) -> Result<Self> {
        let path = dir.as_ref().join(CONFIG_FILENAME);

        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&path)?;
        let config: FolioConfig = serde_json::from_str(&content)?;
        tracing::debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    pub fn save<P: AsRef<Path>>(&self, dir: P) -> Result<()> {
        let dir = dir.as_ref();
        if !dir.exists() {
            fs::create_dir_all(dir)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        fs::write(dir.join(CONFIG_FILENAME), content)?;
        Ok(())
    }

    pub fn column_breakpoints(&self) -> ColumnBreakpoints {
        ColumnBreakpoints {
            default_columns: self.default_columns,
            breakpoints: self.breakpoints.clone(),
        }
    }

    pub fn layout_options(&self) -> LayoutOptions {
        LayoutOptions {
            row_gap: self.row_gap,
            column_gap: self.column_gap,
            fallback_height: self.fallback_height,
        }
    }

    pub fn resize_debounce(&self) -> Duration {
        Duration::from_millis(self.resize_debounce_ms)
    }

    /// Formatted value of a scalar key.
    pub fn get(&self, key: &str) -> Option<String> {
        let value = match key {
            "base_url" => self.base_url.clone(),
            "default_columns" => self.default_columns.to_string(),
            "row_gap" => self.row_gap.to_string(),
            "column_gap" => self.column_gap.to_string(),
            "fallback_height" => self.fallback_height.to_string(),
            "min_query_len" => self.min_query_len.to_string(),
            "top_objects" => self.top_objects.to_string(),
            "resize_debounce_ms" => self.resize_debounce_ms.to_string(),
            "lazy_root_margin" => self.lazy_root_margin.to_string(),
            "section_spacing" => self.section_spacing.to_string(),
            "measure_images" => self.measure_images.to_string(),
            _ => return None,
        };
        Some(value)
    }

    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "base_url" => self.base_url = value.trim().to_string(),
            "default_columns" => self.default_columns = parse_value(key, value)?,
            "row_gap" => self.row_gap = parse_value(key, value)?,
            "column_gap" => self.column_gap = parse_value(key, value)?,
            "fallback_height" => self.fallback_height = parse_value(key, value)?,
            "min_query_len" => self.min_query_len = parse_value(key, value)?,
            "top_objects" => self.top_objects = parse_value(key, value)?,
            "resize_debounce_ms" => self.resize_debounce_ms = parse_value(key, value)?,
            "lazy_root_margin" => self.lazy_root_margin = parse_value(key, value)?,
            "section_spacing" => self.section_spacing = parse_value(key, value)?,
            "measure_images" => self.measure_images = parse_value(key, value)?,
            _ => return Err(FolioError::Api(format!("Unknown config key: {}", key))),
        }
        if self.default_columns == 0 {
            self.default_columns = 1;
        }
        Ok(())
    }
}

fn parse_value<T: std::str::FromStr>(key: &str, value: &str) -> Result<T> {
    value
        .trim()
        .parse()
        .map_err(|_| FolioError::Api(format!("Invalid value for {}: {}", key, value)))
}
