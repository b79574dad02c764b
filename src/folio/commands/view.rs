use crate::commands::{CmdMessage, CmdResult, LightboxView, Selection};
use crate::config::FolioConfig;
use crate::error::{FolioError, Result};
use crate::gallery::GalleryEvent;
use crate::store::GalleryStore;

use super::helpers::{apply_selection, open_gallery};

/// Opens the lightbox on `id` and moves `steps` images forward (negative
/// steps move back).
pub fn run<S: GalleryStore>(
    store: &S,
    config: &FolioConfig,
    id: &str,
    steps: i64,
    selection: &Selection,
) -> Result<CmdResult> {
    let mut gallery = open_gallery(store, config, 0.0, 0.0)?;
    apply_selection(&mut gallery, selection);

    gallery.update(GalleryEvent::LightboxOpened { id: id.to_string() });
    // navigation wraps, so only the remainder matters
    let len = gallery.lightbox().len().max(1) as i64;
    for _ in 0..steps.rem_euclid(len) {
        gallery.update(GalleryEvent::LightboxNext);
    }

    let lightbox = gallery.lightbox();
    let record = lightbox
        .current()
        .and_then(|current| gallery.catalog().get(current))
        .cloned()
        .ok_or_else(|| FolioError::ImageNotFound(id.to_string()))?;

    let mut result = CmdResult::default();
    if gallery.catalog().get(id).map_or(true, |r| !r.visible) {
        result.add_message(CmdMessage::warning(format!(
            "{} is not in the current selection, showing the first image",
            id
        )));
    }
    Ok(result.with_lightbox(LightboxView {
        position: lightbox.cursor(),
        total: lightbox.len(),
        has_navigation: lightbox.has_navigation(),
        record,
    }))
}
