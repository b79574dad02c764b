//! Lightbox navigation over the visible subset.
//!
//! The sequence is captured when the lightbox opens, so later filter changes
//! do not shift the cursor under the viewer. Navigation never fails.

use crate::model::filename_from_source;
use serde::Serialize;

#[derive(Debug, Clone, Default, Serialize)]
pub struct Lightbox {
    sequence: Vec<String>,
    cursor: usize,
    open: bool,
}

impl Lightbox {
    pub fn new() -> Self {
        Self::default()
    }

    /// Opens on `id` within `visible_ids`.
    ///
    /// Matches the exact id first, then an entry with the same filename; an
    /// unknown id opens on the first entry.
    pub fn open(&mut self, visible_ids: Vec<String>, id: &str) {
        let filename = filename_from_source(id);
        self.cursor = visible_ids
            .iter()
            .position(|candidate| candidate == id)
            .or_else(|| {
                visible_ids
                    .iter()
                    .position(|candidate| filename_from_source(candidate) == filename)
            })
            .unwrap_or_else(|| {
                tracing::debug!(%id, "lightbox target not in visible set, opening first image");
                0
            });
        self.sequence = visible_ids;
        self.open = true;
    }

    pub fn next(&mut self) {
        if self.sequence.len() <= 1 {
            return;
        }
        self.cursor = (self.cursor + 1) % self.sequence.len();
    }

    pub fn previous(&mut self) {
        if self.sequence.len() <= 1 {
            return;
        }
        let len = self.sequence.len();
        self.cursor = (self.cursor + len - 1) % len;
    }

    /// Hides the viewer. Sequence and cursor stay until the next `open`.
    pub fn close(&mut self) {
        self.open = false;
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn current(&self) -> Option<&str> {
        self.sequence.get(self.cursor).map(String::as_str)
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn len(&self) -> usize {
        self.sequence.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sequence.is_empty()
    }

    pub fn sequence(&self) -> &[String] {
        &self.sequence
    }

    /// Whether prev/next controls should be enabled.
    pub fn has_navigation(&self) -> bool {
        self.sequence.len() > 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn opens_on_matching_id() {
        let mut lb = Lightbox::new();
        lb.open(ids(&["a.jpg", "b.jpg", "c.jpg"]), "b.jpg");
        assert!(lb.is_open());
        assert_eq!(lb.cursor(), 1);
        assert_eq!(lb.current(), Some("b.jpg"));
    }

    #[test]
    fn matches_by_filename_when_paths_differ() {
        let mut lb = Lightbox::new();
        lb.open(
            ids(&["img/2023-05-Rome/a.jpg", "img/2023-05-Rome/b.jpg"]),
            "https://example.org/img/2023-05-Rome/b.jpg",
        );
        assert_eq!(lb.cursor(), 1);
    }

    #[test]
    fn unknown_id_defaults_to_first() {
        let mut lb = Lightbox::new();
        lb.open(ids(&["a.jpg", "b.jpg"]), "missing.jpg");
        assert_eq!(lb.cursor(), 0);
        assert_eq!(lb.current(), Some("a.jpg"));
    }

    #[test]
    fn navigation_wraps() {
        let mut lb = Lightbox::new();
        lb.open(ids(&["a", "b", "c"]), "c");
        lb.next();
        assert_eq!(lb.current(), Some("a"));
        lb.previous();
        lb.previous();
        assert_eq!(lb.current(), Some("b"));
    }

    #[test]
    fn single_and_empty_sequences_do_not_move() {
        let mut lb = Lightbox::new();
        lb.open(ids(&["only"]), "only");
        lb.next();
        lb.previous();
        assert_eq!(lb.cursor(), 0);
        assert!(!lb.has_navigation());

        let mut empty = Lightbox::new();
        empty.open(Vec::new(), "x");
        empty.next();
        empty.previous();
        assert_eq!(empty.current(), None);
    }

    #[test]
    fn close_keeps_state() {
        let mut lb = Lightbox::new();
        lb.open(ids(&["a", "b"]), "b");
        lb.close();
        assert!(!lb.is_open());
        assert_eq!(lb.current(), Some("b"));
    }
}
