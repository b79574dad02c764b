//! # Gallery state
//!
//! One explicit state object per page session. Every input (metadata
//! arriving, an image finishing loading, a filter change, a resize, lightbox
//! navigation) is a [`GalleryEvent`] fed to [`Gallery::update`], which mutates
//! the state and reports what the presentation has to re-derive.
//!
//! Metadata uses an all-complete barrier: it is stored as each category
//! arrives, but only attached to records (and the tag index only rebuilt) once
//! the last pending category has reported, success or failure. Queries issued
//! before that are applied right away and re-applied when the barrier
//! completes.

use crate::catalog::Catalog;
use crate::config::FolioConfig;
use crate::debounce::Debouncer;
use crate::error::Result;
use crate::layout::{layout, ColumnBreakpoints, LayoutOptions, LayoutResult};
use crate::lazy::{queue_loads, Candidate, LoadWindow};
use crate::lightbox::Lightbox;
use crate::model::{FolderMetadata, ImageRecord, MetadataByCategory, Size};
use crate::query::{LocationFilter, Query};
use crate::tags::TagIndex;
use serde::Serialize;
use std::collections::{BTreeSet, HashSet};
use std::time::Duration;

#[derive(Debug, Clone, PartialEq)]
pub struct GalleryOptions {
    pub breakpoints: ColumnBreakpoints,
    pub layout: LayoutOptions,
    pub min_query_len: usize,
    pub top_objects: usize,
    pub resize_debounce: Duration,
    pub section_spacing: f64,
}

impl Default for GalleryOptions {
    fn default() -> Self {
        Self::from(&FolioConfig::default())
    }
}

impl From<&FolioConfig> for GalleryOptions {
    fn from(config: &FolioConfig) -> Self {
        Self {
            breakpoints: config.column_breakpoints(),
            layout: config.layout_options(),
            min_query_len: config.min_query_len,
            top_objects: config.top_objects,
            resize_debounce: config.resize_debounce(),
            section_spacing: config.section_spacing,
        }
    }
}

#[derive(Debug)]
pub enum GalleryEvent {
    /// A category's metadata request finished. `Ok(None)` means no document.
    MetadataFetched {
        category: String,
        result: Result<Option<FolderMetadata>>,
    },
    ImageLoaded {
        id: String,
        size: Option<Size>,
    },
    /// `"all"` clears the location filter.
    LocationSelected(String),
    QueryChanged(String),
    Resized {
        viewport_width: f64,
        container_width: f64,
        at: Duration,
    },
    Tick {
        now: Duration,
    },
    LightboxOpened {
        id: String,
    },
    LightboxNext,
    LightboxPrevious,
    LightboxClosed,
}

/// What changed as a result of one event.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Update {
    pub visibility_changed: bool,
    pub relayout: bool,
    pub tags_rebuilt: bool,
}

/// Visible records of one year, in catalog order.
#[derive(Debug, Clone)]
pub struct Section<'a> {
    pub year: String,
    pub records: Vec<&'a ImageRecord>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SectionLayout {
    pub year: String,
    /// Offset of this section's grid from the top of the page.
    pub top: f64,
    pub layout: LayoutResult,
}

#[derive(Debug)]
pub struct Gallery {
    options: GalleryOptions,
    catalog: Catalog,
    metadata: MetadataByCategory,
    pending: BTreeSet<String>,
    tags: Option<TagIndex>,
    query: Query,
    viewport_width: f64,
    container_width: f64,
    requested_size: Option<(f64, f64)>,
    loaded: HashSet<String>,
    resize: Debouncer,
    lightbox: Lightbox,
}

impl Gallery {
    pub fn new(catalog: Catalog, options: GalleryOptions, viewport_width: f64, container_width: f64) -> Self {
        let pending: BTreeSet<String> = catalog.categories().into_iter().collect();
        let resize = Debouncer::new(options.resize_debounce);
        let mut gallery = Self {
            options,
            catalog,
            metadata: MetadataByCategory::new(),
            pending,
            tags: None,
            query: Query::default(),
            viewport_width,
            container_width,
            requested_size: None,
            loaded: HashSet::new(),
            resize,
            lightbox: Lightbox::new(),
        };
        if gallery.pending.is_empty() {
            gallery.complete_metadata();
        }
        gallery
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn query(&self) -> &Query {
        &self.query
    }

    pub fn options(&self) -> &GalleryOptions {
        &self.options
    }

    /// `None` until every category's metadata request has completed.
    pub fn tags(&self) -> Option<&TagIndex> {
        self.tags.as_ref()
    }

    /// Search is enabled once the metadata barrier has been passed.
    pub fn search_ready(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn pending_categories(&self) -> impl Iterator<Item = &str> {
        self.pending.iter().map(String::as_str)
    }

    pub fn lightbox(&self) -> &Lightbox {
        &self.lightbox
    }

    pub fn columns(&self) -> usize {
        self.options.breakpoints.columns_for(self.viewport_width)
    }

    pub fn viewport_width(&self) -> f64 {
        self.viewport_width
    }

    pub fn container_width(&self) -> f64 {
        self.container_width
    }

    pub fn is_loaded(&self, id: &str) -> bool {
        self.loaded.contains(id)
    }

    /// Records a size known ahead of loading (e.g. read from the file header).
    /// Unlike [`GalleryEvent::ImageLoaded`] the image still counts as pending.
    pub fn set_natural_size(&mut self, id: &str, size: Size) -> bool {
        match self.catalog.get_mut(id) {
            Some(record) => {
                record.natural_size = Some(size);
                true
            }
            None => false,
        }
    }

    pub fn update(&mut self, event: GalleryEvent) -> Update {
        match event {
            GalleryEvent::MetadataFetched { category, result } => {
                self.metadata_fetched(category, result)
            }
            GalleryEvent::ImageLoaded { id, size } => self.image_loaded(&id, size),
            GalleryEvent::LocationSelected(selector) => {
                self.query.location = LocationFilter::from_selector(&selector);
                self.reapply_query()
            }
            GalleryEvent::QueryChanged(raw) => {
                self.query = self.query.clone().with_search(&raw);
                self.reapply_query()
            }
            GalleryEvent::Resized {
                viewport_width,
                container_width,
                at,
            } => {
                self.requested_size = Some((viewport_width, container_width));
                self.resize.trigger(at);
                Update::default()
            }
            GalleryEvent::Tick { now } => self.tick(now),
            GalleryEvent::LightboxOpened { id } => {
                self.lightbox.open(self.catalog.visible_ids(), &id);
                Update::default()
            }
            GalleryEvent::LightboxNext => {
                self.lightbox.next();
                Update::default()
            }
            GalleryEvent::LightboxPrevious => {
                self.lightbox.previous();
                Update::default()
            }
            GalleryEvent::LightboxClosed => {
                self.lightbox.close();
                Update::default()
            }
        }
    }

    fn metadata_fetched(&mut self, category: String, result: Result<Option<FolderMetadata>>) -> Update {
        if !self.pending.remove(&category) {
            tracing::debug!(%category, "ignoring metadata for a category that is not pending");
            return Update::default();
        }

        match result {
            Ok(Some(folder)) => {
                tracing::debug!(%category, entries = folder.len(), "metadata loaded");
                self.metadata.insert(category, folder);
            }
            Ok(None) => tracing::debug!(%category, "no metadata document"),
            Err(e) => tracing::warn!(%category, error = %e, "metadata unavailable"),
        }

        if !self.pending.is_empty() {
            return Update::default();
        }

        self.complete_metadata();
        let mut update = self.reapply_query();
        update.tags_rebuilt = true;
        update
    }

    fn complete_metadata(&mut self) {
        self.catalog.attach_metadata(&self.metadata);
        // every loaded entry counts once, attached to a record or not
        let categories = self.catalog.categories();
        let index = TagIndex::build(
            categories
                .iter()
                .filter_map(|category| self.metadata.get(category))
                .flat_map(|folder| folder.values()),
            self.options.top_objects,
        );
        tracing::debug!(categories = self.metadata.len(), "metadata barrier complete");
        self.tags = Some(index);
    }

    fn image_loaded(&mut self, id: &str, size: Option<Size>) -> Update {
        let Some(record) = self.catalog.get_mut(id) else {
            tracing::debug!(%id, "load event for unknown image");
            return Update::default();
        };
        if size.is_some() {
            record.natural_size = size;
        }
        self.loaded.insert(id.to_string());
        Update {
            relayout: true,
            ..Update::default()
        }
    }

    fn tick(&mut self, now: Duration) -> Update {
        if !self.resize.poll(now) {
            return Update::default();
        }
        let Some((viewport_width, container_width)) = self.requested_size.take() else {
            return Update::default();
        };
        self.viewport_width = viewport_width;
        self.container_width = container_width;
        tracing::debug!(viewport_width, columns = self.columns(), "applying resize");
        Update {
            relayout: true,
            ..Update::default()
        }
    }

    fn reapply_query(&mut self) -> Update {
        let before = self.catalog.visible_ids();
        let count = self.catalog.apply_query(&self.query, self.options.min_query_len);
        let changed = before != self.catalog.visible_ids();
        tracing::debug!(visible = count, changed, "query applied");
        Update {
            visibility_changed: changed,
            relayout: changed,
            tags_rebuilt: false,
        }
    }

    /// Non-empty year sections, newest first.
    pub fn sections(&self) -> Vec<Section<'_>> {
        self.catalog
            .years()
            .into_iter()
            .filter_map(|year| {
                let records: Vec<&ImageRecord> = self
                    .catalog
                    .visible()
                    .filter(|r| r.year() == year)
                    .collect();
                if records.is_empty() {
                    None
                } else {
                    Some(Section { year, records })
                }
            })
            .collect()
    }

    /// Lays out each year section as its own grid, stacked vertically.
    pub fn layout_sections(&self) -> Vec<SectionLayout> {
        let columns = self.columns();
        let mut top = 0.0;
        self.sections()
            .into_iter()
            .map(|section| {
                let result = layout(
                    section.records,
                    self.container_width,
                    columns,
                    &self.options.layout,
                );
                let placed = SectionLayout {
                    year: section.year,
                    top,
                    layout: result,
                };
                top += placed.layout.height + self.options.section_spacing;
                placed
            })
            .collect()
    }

    /// Visible, not yet loaded images inside `window`, nearest first.
    pub fn pending_loads(&self, window: &LoadWindow) -> Vec<String> {
        let candidates = self
            .layout_sections()
            .into_iter()
            .flat_map(|section| {
                let offset = section.top;
                section
                    .layout
                    .placements
                    .into_iter()
                    .map(move |p| Candidate {
                        id: p.id,
                        top: offset + p.top,
                        height: p.height,
                    })
            })
            .filter(|c| !self.loaded.contains(&c.id))
            .collect();
        queue_loads(window, candidates)
    }
}
