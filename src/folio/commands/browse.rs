use crate::commands::CmdResult;
use crate::error::Result;
use crate::store::GalleryStore;

use super::helpers::load_catalog;

/// Distinct years, newest first.
pub fn years<S: GalleryStore>(store: &S) -> Result<CmdResult> {
    let catalog = load_catalog(store)?;
    Ok(CmdResult::default().with_values(catalog.years()))
}

/// Distinct known locations, for the location bar.
pub fn locations<S: GalleryStore>(store: &S) -> Result<CmdResult> {
    let catalog = load_catalog(store)?;
    Ok(CmdResult::default().with_values(catalog.locations()))
}
