//! Visibility rules for the filter & search engine.
//!
//! A record is visible when it passes the location filter, every tag
//! predicate (which requires metadata), and the free-text clause. The free-text
//! clause tolerates missing metadata fields; predicates do not.

use crate::model::{ImageRecord, Metadata};
use crate::query::{Facet, Query, TagPredicate};

impl TagPredicate {
    /// Checks this predicate against one metadata record.
    pub fn matches(&self, meta: &Metadata) -> bool {
        let photography = meta.photography.as_ref();
        match self.facet {
            Facet::Style => contains_lower(photography.and_then(|p| p.style.as_deref()), &self.value),
            Facet::Lighting => {
                contains_lower(photography.and_then(|p| p.lighting.as_deref()), &self.value)
            }
            Facet::Shot => {
                contains_lower(photography.and_then(|p| p.shot_type.as_deref()), &self.value)
            }
            Facet::Scene => meta
                .scene
                .as_ref()
                .and_then(|s| s.kind.as_deref())
                .is_some_and(|kind| kind.to_lowercase() == self.value),
            Facet::Object => meta
                .objects
                .iter()
                .any(|obj| obj.name.to_lowercase().contains(&self.value)),
        }
    }
}

fn contains_lower(field: Option<&str>, needle: &str) -> bool {
    field.is_some_and(|f| f.to_lowercase().contains(needle))
}

/// Lower-cased haystack for free-text search.
pub fn searchable_text(record: &ImageRecord) -> String {
    let mut fields: Vec<&str> = vec![record.location(), record.year(), record.category.as_str()];

    if let Some(meta) = &record.metadata {
        let scene = meta.scene.as_ref();
        let photography = meta.photography.as_ref();
        fields.push(scene.and_then(|s| s.description.as_deref()).unwrap_or(""));
        fields.push(scene.and_then(|s| s.kind.as_deref()).unwrap_or(""));
        fields.push(photography.and_then(|p| p.style.as_deref()).unwrap_or(""));
        fields.push(photography.and_then(|p| p.subject_focus.as_deref()).unwrap_or(""));
        fields.extend(meta.objects.iter().map(|o| o.name.as_str()));
        if let Some(people) = &meta.people {
            fields.extend(people.attributes.iter().map(String::as_str));
        }
    }

    fields.join(" ").to_lowercase()
}

pub fn is_visible(record: &ImageRecord, query: &Query, min_query_len: usize) -> bool {
    if !query.location.matches(record.location()) {
        return false;
    }

    let search = &query.search;
    if !search.is_active(min_query_len) {
        return true;
    }

    if !search.predicates().is_empty() {
        let Some(meta) = &record.metadata else {
            return false;
        };
        if !search.predicates().iter().all(|p| p.matches(meta)) {
            return false;
        }
    }

    let free_text = search.free_text();
    free_text.is_empty() || searchable_text(record).contains(free_text)
}

/// The visible subset for `query`, in catalog order.
pub fn apply_query<'a>(
    records: &'a [ImageRecord],
    query: &Query,
    min_query_len: usize,
) -> Vec<&'a ImageRecord> {
    records
        .iter()
        .filter(|r| is_visible(r, query, min_query_len))
        .collect()
}
