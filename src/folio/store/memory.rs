use super::GalleryStore;
use crate::error::{FolioError, Result};
use crate::model::{FolderMetadata, RawItem, Size};
use std::collections::{HashMap, HashSet};

/// In-memory gallery content for tests and embedding.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    items: Vec<RawItem>,
    metadata: HashMap<String, FolderMetadata>,
    sizes: HashMap<String, Size>,
    failing: HashSet<String>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_item(&mut self, item: RawItem) {
        self.items.push(item);
    }

    pub fn insert_metadata(&mut self, category: impl Into<String>, folder: FolderMetadata) {
        self.metadata.insert(category.into(), folder);
    }

    pub fn insert_size(&mut self, id: impl Into<String>, size: Size) {
        self.sizes.insert(id.into(), size);
    }

    /// Makes metadata requests for `category` fail, like an unreachable file.
    pub fn fail_category(&mut self, category: impl Into<String>) {
        self.failing.insert(category.into());
    }
}

impl GalleryStore for InMemoryStore {
    fn list_items(&self) -> Result<Vec<RawItem>> {
        Ok(self.items.clone())
    }

    fn load_metadata(&self, category: &str) -> Result<Option<FolderMetadata>> {
        if self.failing.contains(category) {
            return Err(FolioError::Store(format!(
                "metadata request failed for {}",
                category
            )));
        }
        Ok(self.metadata.get(category).cloned())
    }

    fn natural_size(&self, id: &str) -> Result<Option<Size>> {
        Ok(self.sizes.get(id).copied())
    }
}

// --- Test Fixtures ---

#[cfg(any(test, feature = "test_utils"))]
pub mod fixtures {
    use super::*;
    use crate::model::{DetectedObject, Metadata, People, Photography, Scene};

    pub struct StoreFixture {
        pub store: InMemoryStore,
    }

    impl Default for StoreFixture {
        fn default() -> Self {
            Self::new()
        }
    }

    impl StoreFixture {
        pub fn new() -> Self {
            Self {
                store: InMemoryStore::new(),
            }
        }

        /// Adds `count` images to `category`, named `<category>-<n>.jpg`.
        pub fn with_images(mut self, category: &str, count: usize) -> Self {
            for i in 0..count {
                let src = format!("img/{}/{}-{}.jpg", category, category, i + 1);
                self.store
                    .add_item(RawItem::new(src, format!("Photo {}", i + 1), category));
            }
            self
        }

        pub fn with_metadata(mut self, category: &str, folder: FolderMetadata) -> Self {
            self.store.insert_metadata(category, folder);
            self
        }

        pub fn with_size(mut self, id: &str, width: u32, height: u32) -> Self {
            self.store.insert_size(id, Size::new(width, height));
            self
        }

        pub fn failing(mut self, category: &str) -> Self {
            self.store.fail_category(category);
            self
        }

        /// Two Rome photos and one Paris photo; Rome has tagged metadata.
        pub fn sample() -> Self {
            let portrait = Metadata {
                photography: Some(Photography {
                    style: Some("Portrait, Outdoor".into()),
                    lighting: Some("Golden Hour".into()),
                    shot_type: Some("Medium Shot".into()),
                    ..Default::default()
                }),
                scene: Some(Scene {
                    kind: Some("Outdoor".into()),
                    description: Some("A sunset over the hills".into()),
                    ..Default::default()
                }),
                objects: vec![DetectedObject {
                    name: "Olive Tree".into(),
                    confidence: 0.82,
                    position: Some("left".into()),
                }],
                people: Some(People {
                    count: 1,
                    attributes: vec!["adult woman".into()],
                }),
                colors: Vec::new(),
            };
            let street = Metadata {
                photography: Some(Photography {
                    style: Some("Street".into()),
                    lighting: Some("Natural".into()),
                    ..Default::default()
                }),
                scene: Some(Scene {
                    kind: Some("Urban".into()),
                    description: Some("Scooters outside a cafe".into()),
                    ..Default::default()
                }),
                objects: vec![DetectedObject {
                    name: "Scooter".into(),
                    confidence: 0.9,
                    position: None,
                }],
                ..Default::default()
            };

            Self::new()
                .with_images("2023-05-Rome", 2)
                .with_images("2022-01-Paris", 1)
                .with_metadata(
                    "2023-05-Rome",
                    FolderMetadata::new()
                        .with_entry("2023-05-Rome-1.jpg", portrait)
                        .with_entry("2023-05-Rome-2.jpg", street),
                )
                .with_size("img/2023-05-Rome/2023-05-Rome-1.jpg", 400, 600)
        }
    }
}
