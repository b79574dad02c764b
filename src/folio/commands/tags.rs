use crate::commands::{CmdMessage, CmdResult};
use crate::config::FolioConfig;
use crate::error::Result;
use crate::store::GalleryStore;

use super::helpers::open_gallery;

/// The tag index behind the search suggestions.
pub fn run<S: GalleryStore>(store: &S, config: &FolioConfig) -> Result<CmdResult> {
    let gallery = open_gallery(store, config, 0.0, 0.0)?;
    let tags = gallery.tags().cloned().unwrap_or_default();

    let mut result = CmdResult::default();
    if tags.is_empty() {
        result.add_message(CmdMessage::info("No tagged images"));
    }
    Ok(result.with_tags(tags))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::fixtures::StoreFixture;

    #[test]
    fn builds_index_from_loaded_metadata() {
        let store = StoreFixture::sample().store;
        let result = run(&store, &FolioConfig::default()).unwrap();
        let tags = result.tags.unwrap();
        assert_eq!(tags.styles, vec!["outdoor", "portrait", "street"]);
        assert_eq!(tags.scenes, vec!["outdoor", "urban"]);
        assert_eq!(tags.objects, vec!["olive tree", "scooter"]);
        assert!(result.messages.is_empty());
    }

    #[test]
    fn untagged_gallery_reports_empty_index() {
        let store = StoreFixture::new().with_images("2023-05-Rome", 2).store;
        let result = run(&store, &FolioConfig::default()).unwrap();
        assert!(result.tags.unwrap().is_empty());
        assert_eq!(result.messages.len(), 1);
    }
}
