use crate::commands::{CmdResult, Selection};
use crate::config::FolioConfig;
use crate::error::Result;
use crate::lazy::LoadWindow;
use crate::store::GalleryStore;

use super::helpers::{apply_selection, open_gallery};

#[derive(Debug, Clone, Copy)]
pub struct Viewport {
    pub width: f64,
    /// Width of the gallery container; defaults to the viewport width.
    pub container_width: Option<f64>,
    /// Scroll offset and height, for reporting which images would load.
    pub window: Option<(f64, f64)>,
}

/// Masonry placements per year section for the current selection.
///
/// With a scroll window, `values` lists the images that would be requested,
/// nearest to the viewport centre first.
pub fn run<S: GalleryStore>(
    store: &S,
    config: &FolioConfig,
    viewport: Viewport,
    selection: &Selection,
) -> Result<CmdResult> {
    let container_width = viewport.container_width.unwrap_or(viewport.width);
    let mut gallery = open_gallery(store, config, viewport.width, container_width)?;
    apply_selection(&mut gallery, selection);

    let mut result = CmdResult::default().with_sections(gallery.layout_sections());
    if let Some((top, height)) = viewport.window {
        let window = LoadWindow::new(top, height, config.lazy_root_margin);
        result = result.with_values(gallery.pending_loads(&window));
    }
    Ok(result)
}
