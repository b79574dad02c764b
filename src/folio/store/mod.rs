use crate::error::Result;
use crate::model::{FolderMetadata, RawItem, Size};

pub mod fs;
pub mod memory;

/// Name of the per-category metadata document.
pub const METADATA_FILENAME: &str = "metadata.json";

/// Source of gallery content: the catalog input, per-category metadata
/// documents and intrinsic image sizes.
///
/// Agnostic of where the content lives (a built site on disk, memory).
pub trait GalleryStore {
    /// Raw image descriptors in page order.
    fn list_items(&self) -> Result<Vec<RawItem>>;

    /// The metadata document for `category`, or `None` if it has none.
    fn load_metadata(&self, category: &str) -> Result<Option<FolderMetadata>>;

    /// Intrinsic size of the image behind `id`, when the store can tell.
    fn natural_size(&self, id: &str) -> Result<Option<Size>>;
}

/// URL of a category's metadata document under `base_url`.
///
/// The category is percent-encoded as a single component, then any encoded
/// `/` is put back so nested folders keep their path shape.
pub fn metadata_url(base_url: &str, category: &str) -> String {
    let encoded = urlencoding::encode(category).replace("%2F", "/");
    format!(
        "{}/img/{}/{}",
        base_url.trim_end_matches('/'),
        encoded,
        METADATA_FILENAME
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn metadata_url_encodes_category() {
        assert_eq!(
            metadata_url("", "2023-05-Rome"),
            "/img/2023-05-Rome/metadata.json"
        );
        assert_eq!(
            metadata_url("https://example.org/", "2021-07-São Paulo"),
            "https://example.org/img/2021-07-S%C3%A3o%20Paulo/metadata.json"
        );
    }

    #[test]
    fn metadata_url_keeps_nested_folders() {
        assert_eq!(
            metadata_url("/gallery", "2020/2020-01-Oslo"),
            "/gallery/img/2020/2020-01-Oslo/metadata.json"
        );
    }
}
