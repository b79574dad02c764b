//! Tag index for search suggestions.
//!
//! Rebuilt whenever metadata finishes loading. Values are lower-cased and
//! deduplicated; the object list is capped to the most frequent names.

use crate::model::Metadata;
use crate::query::Facet;
use serde::Serialize;
use std::collections::{BTreeSet, HashMap};

/// How many object names the index keeps by default.
pub const DEFAULT_TOP_OBJECTS: usize = 20;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TagIndex {
    pub styles: Vec<String>,
    pub scenes: Vec<String>,
    pub lighting: Vec<String>,
    pub shot_types: Vec<String>,
    pub objects: Vec<String>,
}

impl TagIndex {
    /// Builds the index from every loaded metadata record.
    ///
    /// Object ties keep first-seen order, so callers should pass metadata in a
    /// stable order.
    pub fn build<'a>(metadata: impl IntoIterator<Item = &'a Metadata>, top_objects: usize) -> Self {
        let mut styles = BTreeSet::new();
        let mut scenes = BTreeSet::new();
        let mut lighting = BTreeSet::new();
        let mut shot_types = BTreeSet::new();
        let mut object_counts: HashMap<String, usize> = HashMap::new();
        let mut object_order: Vec<String> = Vec::new();

        for meta in metadata {
            if let Some(photo) = &meta.photography {
                if let Some(style) = &photo.style {
                    styles.extend(
                        style
                            .split(',')
                            .map(|s| s.trim().to_lowercase())
                            .filter(|s| !s.is_empty()),
                    );
                }
                if let Some(light) = &photo.lighting {
                    lighting.insert(light.to_lowercase());
                }
                if let Some(shot) = &photo.shot_type {
                    shot_types.insert(shot.to_lowercase());
                }
            }
            if let Some(kind) = meta.scene.as_ref().and_then(|s| s.kind.as_ref()) {
                scenes.insert(kind.to_lowercase());
            }
            for obj in &meta.objects {
                let name = obj.name.to_lowercase();
                let count = object_counts.entry(name.clone()).or_insert(0);
                if *count == 0 {
                    object_order.push(name);
                }
                *count += 1;
            }
        }

        // stable sort keeps first-seen order among equal counts
        object_order.sort_by(|a, b| object_counts[b].cmp(&object_counts[a]));
        object_order.truncate(top_objects);

        Self {
            styles: styles.into_iter().collect(),
            scenes: scenes.into_iter().collect(),
            lighting: lighting.into_iter().collect(),
            shot_types: shot_types.into_iter().collect(),
            objects: object_order,
        }
    }

    pub fn values(&self, facet: Facet) -> &[String] {
        match facet {
            Facet::Style => &self.styles,
            Facet::Scene => &self.scenes,
            Facet::Lighting => &self.lighting,
            Facet::Shot => &self.shot_types,
            Facet::Object => &self.objects,
        }
    }

    /// Non-empty suggestion groups in dropdown order.
    pub fn suggestions(&self) -> Vec<(Facet, &[String])> {
        Facet::ALL
            .into_iter()
            .map(|facet| (facet, self.values(facet)))
            .filter(|(_, values)| !values.is_empty())
            .collect()
    }

    /// Insertable `facet:value` tokens, flattened in dropdown order.
    pub fn tokens(&self) -> Vec<String> {
        self.suggestions()
            .into_iter()
            .flat_map(|(facet, values)| values.iter().map(move |v| format!("{}:{}", facet, v)))
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.suggestions().is_empty()
    }
}

pub fn facet_title(facet: Facet) -> &'static str {
    match facet {
        Facet::Style => "PHOTOGRAPHY STYLES",
        Facet::Scene => "SCENE TYPES",
        Facet::Lighting => "LIGHTING",
        Facet::Shot => "SHOT TYPES",
        Facet::Object => "COMMON OBJECTS",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{DetectedObject, Photography, Scene};

    fn with_objects(names: &[&str]) -> Metadata {
        Metadata {
            objects: names
                .iter()
                .map(|n| DetectedObject {
                    name: n.to_string(),
                    ..Default::default()
                })
                .collect(),
            ..Default::default()
        }
    }

    #[test]
    fn collects_sorted_distinct_lowercase_values() {
        let a = Metadata {
            photography: Some(Photography {
                style: Some("Street, Documentary,".into()),
                lighting: Some("Natural".into()),
                shot_type: Some("Wide Shot".into()),
                ..Default::default()
            }),
            scene: Some(Scene {
                kind: Some("Urban".into()),
                ..Default::default()
            }),
            ..Default::default()
        };
        let b = Metadata {
            photography: Some(Photography {
                style: Some("street".into()),
                lighting: Some("natural".into()),
                ..Default::default()
            }),
            scene: Some(Scene {
                kind: Some("Nature".into()),
                ..Default::default()
            }),
            ..Default::default()
        };

        let index = TagIndex::build([&a, &b], DEFAULT_TOP_OBJECTS);
        assert_eq!(index.styles, vec!["documentary", "street"]);
        assert_eq!(index.scenes, vec!["nature", "urban"]);
        assert_eq!(index.lighting, vec!["natural"]);
        assert_eq!(index.shot_types, vec!["wide shot"]);
    }

    #[test]
    fn objects_ranked_by_count_then_first_seen() {
        let a = with_objects(&["Car", "Tree", "Bench"]);
        let b = with_objects(&["tree", "Dog", "bench"]);
        let c = with_objects(&["Dog"]);

        let index = TagIndex::build([&a, &b, &c], DEFAULT_TOP_OBJECTS);
        assert_eq!(index.objects, vec!["tree", "bench", "dog", "car"]);
    }

    #[test]
    fn objects_capped_to_top_n() {
        let names: Vec<String> = (0..30).map(|i| format!("obj{}", i)).collect();
        let refs: Vec<&str> = names.iter().map(String::as_str).collect();
        let meta = with_objects(&refs);

        let index = TagIndex::build([&meta], DEFAULT_TOP_OBJECTS);
        assert_eq!(index.objects.len(), 20);
        assert_eq!(index.objects[0], "obj0");
    }

    #[test]
    fn suggestions_skip_empty_groups() {
        let index = TagIndex::build([&with_objects(&["Boat"])], DEFAULT_TOP_OBJECTS);
        let groups = index.suggestions();
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].0, Facet::Object);
        assert_eq!(index.tokens(), vec!["object:boat"]);
    }

    #[test]
    fn empty_index() {
        let index = TagIndex::build(std::iter::empty(), DEFAULT_TOP_OBJECTS);
        assert!(index.is_empty());
    }
}
