//! # Image Catalog
//!
//! The catalog owns the canonical, ordered collection of [`ImageRecord`]s.
//! Everything downstream (filtering, layout, lightbox) works on this order:
//! visible subsets are stable filters over it, never re-sorts.

use crate::filter;
use crate::model::{ImageRecord, MetadataByCategory, RawItem, UNKNOWN};
use crate::query::Query;
use std::collections::HashSet;

#[derive(Debug, Clone, Default)]
pub struct Catalog {
    records: Vec<ImageRecord>,
}

impl Catalog {
    /// Builds records from raw descriptors, preserving input order.
    ///
    /// Items without a resolvable image source are dropped with a warning.
    /// Duplicates are kept.
    pub fn build(items: Vec<RawItem>) -> Self {
        let records = items
            .into_iter()
            .enumerate()
            .filter_map(|(position, item)| {
                let Some(source) = item.resolved_source() else {
                    tracing::warn!(position, alt = %item.alt, "dropping gallery item without image source");
                    return None;
                };
                let category = item.category.clone().unwrap_or_default();
                Some(ImageRecord::new(source, item.alt.clone(), category))
            })
            .collect();

        Self { records }
    }

    pub fn from_records(records: Vec<ImageRecord>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[ImageRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&ImageRecord> {
        self.records.iter().find(|r| r.id == id)
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut ImageRecord> {
        self.records.iter_mut().find(|r| r.id == id)
    }

    /// Records currently marked visible, in catalog order.
    pub fn visible(&self) -> impl Iterator<Item = &ImageRecord> {
        self.records.iter().filter(|r| r.visible)
    }

    pub fn visible_ids(&self) -> Vec<String> {
        self.visible().map(|r| r.id.clone()).collect()
    }

    /// Distinct years, newest first. `Unknown` always sorts last.
    pub fn years(&self) -> Vec<String> {
        let mut years: Vec<String> = self
            .records
            .iter()
            .map(|r| r.year().to_string())
            .collect::<HashSet<_>>()
            .into_iter()
            .collect();
        years.sort_by(|a, b| {
            (a.as_str() == UNKNOWN)
                .cmp(&(b.as_str() == UNKNOWN))
                .then_with(|| b.cmp(a))
        });
        years
    }

    /// Distinct known locations in ascending order.
    pub fn locations(&self) -> Vec<String> {
        let mut locations: Vec<String> = self
            .records
            .iter()
            .map(|r| r.location())
            .filter(|l| *l != UNKNOWN)
            .map(str::to_string)
            .collect::<HashSet<_>>()
            .into_iter()
            .collect();
        locations.sort();
        locations
    }

    /// Distinct categories in first-seen order.
    pub fn categories(&self) -> Vec<String> {
        let mut seen = HashSet::new();
        self.records
            .iter()
            .filter(|r| seen.insert(r.category.as_str()))
            .map(|r| r.category.clone())
            .collect()
    }

    /// Attaches per-category metadata by filename match.
    ///
    /// Returns how many records received metadata. Records without a match
    /// keep whatever they had before.
    pub fn attach_metadata(&mut self, by_category: &MetadataByCategory) -> usize {
        let mut attached = 0;
        for record in &mut self.records {
            let Some(folder) = by_category.get(&record.category) else {
                continue;
            };
            if let Some(meta) = folder.find(&record.filename()) {
                record.metadata = Some(meta.clone());
                attached += 1;
            }
        }
        tracing::debug!(attached, total = self.records.len(), "metadata attached");
        attached
    }

    /// Recomputes every record's `visible` flag. Returns the visible count.
    pub fn apply_query(&mut self, query: &Query, min_query_len: usize) -> usize {
        let mut count = 0;
        for record in &mut self.records {
            record.visible = filter::is_visible(record, query, min_query_len);
            if record.visible {
                count += 1;
            }
        }
        count
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{FolderMetadata, Metadata, Scene};
    use crate::query::LocationFilter;

    fn raw(src: &str, category: &str) -> RawItem {
        RawItem::new(src, src, category)
    }

    fn sample() -> Catalog {
        Catalog::build(vec![
            raw("img/2023-05-Rome/a.jpg", "2023-05-Rome"),
            raw("img/2022-01-Paris/b.jpg", "2022-01-Paris"),
            raw("img/2023-05-Rome/c.jpg", "2023-05-Rome"),
        ])
    }

    #[test]
    fn build_preserves_order_and_duplicates() {
        let catalog = Catalog::build(vec![
            raw("x.jpg", "2023-05-Rome"),
            raw("x.jpg", "2023-05-Rome"),
        ]);
        assert_eq!(catalog.len(), 2);
    }

    #[test]
    fn build_drops_items_without_source() {
        let catalog = Catalog::build(vec![
            RawItem {
                alt: "broken".into(),
                category: Some("2023-05-Rome".into()),
                ..Default::default()
            },
            raw("ok.jpg", "2023-05-Rome"),
        ]);
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.records()[0].id, "ok.jpg");
    }

    #[test]
    fn missing_category_degrades_to_unknown() {
        let catalog = Catalog::build(vec![RawItem {
            src: Some("a.jpg".into()),
            ..Default::default()
        }]);
        assert_eq!(catalog.records()[0].year(), UNKNOWN);
        assert_eq!(catalog.records()[0].location(), UNKNOWN);
    }

    #[test]
    fn years_sorted_descending() {
        assert_eq!(sample().years(), vec!["2023", "2022"]);
    }

    #[test]
    fn unknown_year_sorts_last() {
        let catalog = Catalog::build(vec![
            raw("a.jpg", ""),
            raw("b.jpg", "2019-01-Oslo"),
            raw("c.jpg", "2024-03-Lima"),
        ]);
        assert_eq!(catalog.years(), vec!["2024", "2019", UNKNOWN]);
    }

    #[test]
    fn locations_exclude_unknown() {
        let mut catalog = sample();
        catalog.records.push(ImageRecord::new("d.jpg", "", "2020-02"));
        assert_eq!(catalog.locations(), vec!["Paris", "Rome"]);
    }

    #[test]
    fn categories_in_first_seen_order() {
        assert_eq!(sample().categories(), vec!["2023-05-Rome", "2022-01-Paris"]);
    }

    #[test]
    fn location_filter_scenario() {
        let mut catalog = sample();
        let query = Query::new(LocationFilter::only("Rome"), "");
        assert_eq!(catalog.apply_query(&query, 2), 2);
        assert!(!catalog.records()[1].visible);
    }

    #[test]
    fn attach_matches_exact_then_case_insensitive() {
        let mut catalog = Catalog::build(vec![
            raw("img/2023-05-Rome/Photo%201.JPG", "2023-05-Rome"),
            raw("img/2023-05-Rome/other.jpg", "2023-05-Rome"),
            raw("img/2022-01-Paris/b.jpg", "2022-01-Paris"),
        ]);
        let meta = Metadata {
            scene: Some(Scene {
                kind: Some("urban".into()),
                ..Default::default()
            }),
            ..Default::default()
        };
        let mut by_category = MetadataByCategory::new();
        by_category.insert(
            "2023-05-Rome".into(),
            FolderMetadata::new().with_entry("photo 1.jpg", meta.clone()),
        );

        assert_eq!(catalog.attach_metadata(&by_category), 1);
        assert_eq!(catalog.records()[0].metadata.as_ref(), Some(&meta));
        assert!(catalog.records()[1].metadata.is_none());
        assert!(catalog.records()[2].metadata.is_none());
    }
}
