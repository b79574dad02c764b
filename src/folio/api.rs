//! # API Facade
//!
//! A thin facade over the command layer and the single entry point for every
//! gallery operation, whatever the UI.
//!
//! The facade dispatches to `commands/*.rs`, turns loose UI input (location
//! selector, search text, viewport numbers) into command arguments and returns
//! `Result<CmdResult>`. It does no printing and holds no business logic.
//!
//! `FolioApi<S: GalleryStore>` is generic over the content source:
//! `FolioApi<FileStore>` for a built site, `FolioApi<InMemoryStore>` in tests.

use crate::commands::{self, layout::Viewport, CmdResult, Selection};
use crate::config::FolioConfig;
use crate::error::Result;
use crate::store::GalleryStore;
use std::path::{Path, PathBuf};

pub struct FolioApi<S: GalleryStore> {
    store: S,
    config: FolioConfig,
    config_dir: PathBuf,
}

impl<S: GalleryStore> FolioApi<S> {
    pub fn new(store: S, config: FolioConfig, config_dir: impl Into<PathBuf>) -> Self {
        Self {
            store,
            config,
            config_dir: config_dir.into(),
        }
    }

    pub fn config(&self) -> &FolioConfig {
        &self.config
    }

    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }

    pub fn years(&self) -> Result<CmdResult> {
        commands::browse::years(&self.store)
    }

    pub fn locations(&self) -> Result<CmdResult> {
        commands::browse::locations(&self.store)
    }

    pub fn list(&self, location: Option<&str>) -> Result<CmdResult> {
        commands::list::run(&self.store, &self.config, normalize_location(location))
    }

    pub fn search(&self, location: Option<&str>, query: &str) -> Result<CmdResult> {
        let selection = Selection::new(normalize_location(location), query);
        commands::search::run(&self.store, &self.config, &selection)
    }

    pub fn tags(&self) -> Result<CmdResult> {
        commands::tags::run(&self.store, &self.config)
    }

    pub fn layout(&self, viewport: Viewport, location: Option<&str>, query: &str) -> Result<CmdResult> {
        let selection = Selection::new(normalize_location(location), query);
        commands::layout::run(&self.store, &self.config, viewport, &selection)
    }

    pub fn view(&self, id: &str, steps: i64, location: Option<&str>, query: &str) -> Result<CmdResult> {
        let selection = Selection::new(normalize_location(location), query);
        commands::view::run(&self.store, &self.config, id, steps, &selection)
    }

    pub fn metadata_urls(&self) -> Result<CmdResult> {
        commands::urls::run(&self.store, &self.config)
    }

    pub fn config_action(&mut self, action: commands::config::ConfigAction) -> Result<CmdResult> {
        let result = commands::config::run(&self.config_dir, action)?;
        if let Some(config) = &result.config {
            self.config = config.clone();
        }
        Ok(result)
    }
}

/// Blank selectors mean "all locations".
fn normalize_location(location: Option<&str>) -> Option<String> {
    location
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::config::ConfigAction;
    use crate::store::memory::fixtures::StoreFixture;
    use tempfile::tempdir;

    fn api(dir: &Path) -> FolioApi<crate::store::memory::InMemoryStore> {
        FolioApi::new(StoreFixture::sample().store, FolioConfig::default(), dir)
    }

    #[test]
    fn blank_location_means_all() {
        let dir = tempdir().unwrap();
        let api = api(dir.path());
        assert_eq!(api.list(Some("  ")).unwrap().images.len(), 3);
        assert_eq!(api.list(Some("Paris")).unwrap().images.len(), 1);
    }

    #[test]
    fn dispatches_search() {
        let dir = tempdir().unwrap();
        let api = api(dir.path());
        let result = api.search(None, "object:olive").unwrap();
        assert_eq!(result.images.len(), 1);
    }

    #[test]
    fn config_changes_apply_to_later_calls() {
        let dir = tempdir().unwrap();
        let mut api = api(dir.path());
        api.config_action(ConfigAction::Set("base_url".into(), "/g".into()))
            .unwrap();
        assert_eq!(api.config().base_url, "/g");
        let urls = api.metadata_urls().unwrap();
        assert_eq!(urls.values[0], "/g/img/2023-05-Rome/metadata.json");
    }

    #[test]
    fn view_dispatches_steps() {
        let dir = tempdir().unwrap();
        let api = api(dir.path());
        let result = api
            .view("img/2023-05-Rome/2023-05-Rome-1.jpg", 1, None, "")
            .unwrap();
        assert_eq!(result.lightbox.unwrap().position, 1);
    }
}
