use crate::commands::CmdResult;
use crate::config::FolioConfig;
use crate::error::Result;
use crate::store::{metadata_url, GalleryStore};

use super::helpers::load_catalog;

/// Metadata document URLs, one per category in first-seen order.
pub fn run<S: GalleryStore>(store: &S, config: &FolioConfig) -> Result<CmdResult> {
    let catalog = load_catalog(store)?;
    let urls = catalog
        .categories()
        .iter()
        .map(|category| metadata_url(&config.base_url, category))
        .collect();
    Ok(CmdResult::default().with_values(urls))
}
