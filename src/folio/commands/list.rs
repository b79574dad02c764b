use crate::commands::{CmdResult, Selection};
use crate::config::FolioConfig;
use crate::error::Result;
use crate::store::GalleryStore;

use super::helpers::{apply_selection, open_gallery, visible_records};

/// Visible images for a location, in catalog order.
pub fn run<S: GalleryStore>(
    store: &S,
    config: &FolioConfig,
    location: Option<String>,
) -> Result<CmdResult> {
    let mut gallery = open_gallery(store, config, 0.0, 0.0)?;
    apply_selection(&mut gallery, &Selection::new(location, ""));
    Ok(CmdResult::default().with_images(visible_records(&gallery)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::fixtures::StoreFixture;

    #[test]
    fn lists_everything_by_default() {
        let store = StoreFixture::sample().store;
        let result = run(&store, &FolioConfig::default(), None).unwrap();
        assert_eq!(result.images.len(), 3);
    }

    #[test]
    fn filters_by_location() {
        let store = StoreFixture::sample().store;
        let result = run(&store, &FolioConfig::default(), Some("Rome".into())).unwrap();
        assert_eq!(result.images.len(), 2);
        assert!(result.images.iter().all(|r| r.location() == "Rome"));

        let all = run(&store, &FolioConfig::default(), Some("all".into())).unwrap();
        assert_eq!(all.images.len(), 3);
    }
}
