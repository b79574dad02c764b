use super::{GalleryStore, METADATA_FILENAME};
use crate::error::{FolioError, Result};
use crate::model::{FolderMetadata, RawItem, Size};
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Optional manifest listing the catalog explicitly.
pub const MANIFEST_FILENAME: &str = "gallery.json";
const IMAGE_DIR: &str = "img";
const IMAGE_EXTENSIONS: [&str; 5] = ["jpg", "jpeg", "png", "webp", "gif"];

/// Reads a built site from disk.
///
/// The catalog comes from `<root>/gallery.json` when present, otherwise from
/// scanning `<root>/img/<category>/` for image files.
pub struct FileStore {
    root: PathBuf,
    measure_images: bool,
}

impl FileStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            measure_images: true,
        }
    }

    pub fn with_measure_images(mut self, measure: bool) -> Self {
        self.measure_images = measure;
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn scan_image_dir(&self) -> Result<Vec<RawItem>> {
        let img_dir = self.root.join(IMAGE_DIR);
        if !img_dir.is_dir() {
            tracing::warn!(path = %img_dir.display(), "no image directory");
            return Ok(Vec::new());
        }

        let mut items = Vec::new();
        for entry in WalkDir::new(&img_dir)
            .min_depth(2)
            .max_depth(2)
            .sort_by_file_name()
        {
            let entry = entry.map_err(std::io::Error::from)?;
            if !entry.file_type().is_file() || !is_image(entry.path()) {
                continue;
            }
            let Some(category) = entry
                .path()
                .parent()
                .and_then(Path::file_name)
                .and_then(|n| n.to_str())
            else {
                continue;
            };
            let Some(file) = entry.file_name().to_str() else {
                tracing::warn!(path = %entry.path().display(), "skipping non UTF-8 filename");
                continue;
            };
            items.push(RawItem::new(
                format!("{}/{}/{}", IMAGE_DIR, category, file),
                alt_from_filename(entry.path()),
                category,
            ));
        }
        tracing::debug!(count = items.len(), "scanned image directory");
        Ok(items)
    }

    /// Local path for an image id, if it refers to a file under the root.
    fn image_path(&self, id: &str) -> Option<PathBuf> {
        if id.contains("://") {
            return None;
        }
        let relative = id.split('?').next().unwrap_or(id).trim_start_matches('/');
        let decoded = urlencoding::decode(relative)
            .map(|s| s.into_owned())
            .unwrap_or_else(|_| relative.to_string());
        Some(self.root.join(decoded))
    }
}

fn is_image(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| IMAGE_EXTENSIONS.contains(&e.to_lowercase().as_str()))
        .unwrap_or(false)
}

fn alt_from_filename(path: &Path) -> String {
    path.file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or_default()
        .replace(['-', '_'], " ")
}

impl GalleryStore for FileStore {
    fn list_items(&self) -> Result<Vec<RawItem>> {
        let manifest = self.root.join(MANIFEST_FILENAME);
        if manifest.exists() {
            let content = fs::read_to_string(&manifest)?;
            let items: Vec<RawItem> = serde_json::from_str(&content)?;
            tracing::debug!(count = items.len(), "read gallery manifest");
            return Ok(items);
        }
        self.scan_image_dir()
    }

    fn load_metadata(&self, category: &str) -> Result<Option<FolderMetadata>> {
        let path = self
            .root
            .join(IMAGE_DIR)
            .join(category)
            .join(METADATA_FILENAME);
        if !path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(&path)?;
        Ok(Some(FolderMetadata::from_json(&content)?))
    }

    fn natural_size(&self, id: &str) -> Result<Option<Size>> {
        if !self.measure_images {
            return Ok(None);
        }
        let Some(path) = self.image_path(id) else {
            return Ok(None);
        };
        if !path.is_file() {
            return Err(FolioError::ImageNotFound(id.to_string()));
        }
        let (width, height) = image::image_dimensions(&path)?;
        Ok(Some(Size::new(width, height)))
    }
}
