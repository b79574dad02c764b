use crate::catalog::Catalog;
use crate::commands::Selection;
use crate::config::FolioConfig;
use crate::error::Result;
use crate::gallery::{Gallery, GalleryEvent, GalleryOptions, Update};
use crate::model::ImageRecord;
use crate::store::GalleryStore;

pub fn load_catalog<S: GalleryStore>(store: &S) -> Result<Catalog> {
    Ok(Catalog::build(store.list_items()?))
}

/// Builds a gallery and drives it through metadata loading.
///
/// Every category is requested once; failures are fed to the gallery as
/// failed fetches, so the metadata barrier always completes.
pub fn open_gallery<S: GalleryStore>(
    store: &S,
    config: &FolioConfig,
    viewport_width: f64,
    container_width: f64,
) -> Result<Gallery> {
    let catalog = load_catalog(store)?;
    let categories = catalog.categories();
    let mut gallery = Gallery::new(
        catalog,
        GalleryOptions::from(config),
        viewport_width,
        container_width,
    );

    for category in categories {
        let result = store.load_metadata(&category);
        gallery.update(GalleryEvent::MetadataFetched { category, result });
    }

    if config.measure_images {
        let ids: Vec<String> = gallery
            .catalog()
            .records()
            .iter()
            .map(|r| r.id.clone())
            .collect();
        for id in ids {
            match store.natural_size(&id) {
                Ok(Some(size)) => {
                    gallery.set_natural_size(&id, size);
                }
                Ok(None) => {}
                Err(e) => tracing::warn!(%id, error = %e, "could not measure image"),
            }
        }
    }

    Ok(gallery)
}

pub fn apply_selection(gallery: &mut Gallery, selection: &Selection) -> Update {
    if let Some(location) = &selection.location {
        gallery.update(GalleryEvent::LocationSelected(location.clone()));
    }
    gallery.update(GalleryEvent::QueryChanged(selection.search.clone()))
}

pub fn visible_records(gallery: &Gallery) -> Vec<ImageRecord> {
    gallery.catalog().visible().cloned().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::fixtures::StoreFixture;

    #[test]
    fn opening_passes_the_metadata_barrier() {
        let store = StoreFixture::sample().store;
        let gallery = open_gallery(&store, &FolioConfig::default(), 1200.0, 1200.0).unwrap();
        assert!(gallery.search_ready());
        assert!(gallery
            .catalog()
            .get("img/2023-05-Rome/2023-05-Rome-1.jpg")
            .and_then(|r| r.metadata.as_ref())
            .is_some());
        assert!(gallery.tags().is_some_and(|t| !t.is_empty()));
    }

    #[test]
    fn failed_category_still_completes() {
        let store = StoreFixture::sample().failing("2023-05-Rome").store;
        let gallery = open_gallery(&store, &FolioConfig::default(), 1200.0, 1200.0).unwrap();
        assert!(gallery.search_ready());
        assert!(gallery.catalog().records().iter().all(|r| r.metadata.is_none()));
    }

    #[test]
    fn measured_sizes_are_attached_when_enabled() {
        let store = StoreFixture::sample().store;
        let id = "img/2023-05-Rome/2023-05-Rome-1.jpg";

        let gallery = open_gallery(&store, &FolioConfig::default(), 1200.0, 1200.0).unwrap();
        assert!(gallery.catalog().get(id).unwrap().natural_size.is_some());
        assert!(!gallery.is_loaded(id));

        let config = FolioConfig {
            measure_images: false,
            ..FolioConfig::default()
        };
        let gallery = open_gallery(&store, &config, 1200.0, 1200.0).unwrap();
        assert!(gallery.catalog().get(id).unwrap().natural_size.is_none());
    }
}
