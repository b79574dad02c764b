//! Viewport-driven lazy loading.
//!
//! An image becomes eligible for loading when its placement intersects the
//! viewport grown by a root margin on both edges.

use serde::Serialize;

pub const DEFAULT_ROOT_MARGIN: f64 = 200.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LoadWindow {
    pub viewport_top: f64,
    pub viewport_height: f64,
    pub root_margin: f64,
}

impl LoadWindow {
    pub fn new(viewport_top: f64, viewport_height: f64, root_margin: f64) -> Self {
        Self {
            viewport_top,
            viewport_height,
            root_margin,
        }
    }

    pub fn load_top(&self) -> f64 {
        self.viewport_top - self.root_margin
    }

    pub fn load_bottom(&self) -> f64 {
        self.viewport_top + self.viewport_height + self.root_margin
    }

    fn centre(&self) -> f64 {
        self.viewport_top + self.viewport_height / 2.0
    }

    pub fn intersects(&self, top: f64, height: f64) -> bool {
        top + height >= self.load_top() && top <= self.load_bottom()
    }

    /// Distance from the middle of a box to the middle of the viewport.
    pub fn distance(&self, top: f64, height: f64) -> f64 {
        (top + height / 2.0 - self.centre()).abs()
    }
}

/// A placed box in page coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    pub id: String,
    pub top: f64,
    pub height: f64,
}

/// Ids of the candidates inside `window`, nearest the viewport centre first.
pub fn queue_loads(window: &LoadWindow, candidates: Vec<Candidate>) -> Vec<String> {
    let mut in_range: Vec<(f64, String)> = candidates
        .into_iter()
        .filter(|c| window.intersects(c.top, c.height))
        .map(|c| (window.distance(c.top, c.height), c.id))
        .collect();
    in_range.sort_by(|a, b| a.0.total_cmp(&b.0));
    in_range.into_iter().map(|(_, id)| id).collect()
}
