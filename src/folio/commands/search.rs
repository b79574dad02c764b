use crate::commands::{CmdMessage, CmdResult, Selection};
use crate::config::FolioConfig;
use crate::error::Result;
use crate::store::GalleryStore;

use super::helpers::{apply_selection, open_gallery, visible_records};

pub fn run<S: GalleryStore>(store: &S, config: &FolioConfig, selection: &Selection) -> Result<CmdResult> {
    let mut gallery = open_gallery(store, config, 0.0, 0.0)?;
    apply_selection(&mut gallery, selection);

    let mut result = CmdResult::default().with_images(visible_records(&gallery));
    let search = &gallery.query().search;
    if !search.raw().trim().is_empty() && !search.is_active(config.min_query_len) {
        result.add_message(CmdMessage::warning(format!(
            "Search needs at least {} characters, showing all images",
            config.min_query_len
        )));
    }
    if result.images.is_empty() {
        result.add_message(CmdMessage::info("No matching images"));
    }
    Ok(result)
}
