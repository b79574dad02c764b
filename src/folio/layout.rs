//! # Masonry Layout Engine
//!
//! Greedy shortest-column placement. Items are visited in catalog order and
//! each one goes into the column that is currently shortest (lowest index on
//! ties). One pass, `O(n·k)` for `n` items and `k` columns.
//!
//! An item's height comes from its intrinsic aspect ratio when known. Before
//! an image has loaded the real height is unknowable, so a fixed fallback
//! height stands in; the caller re-runs the layout once the image reports its
//! size. The layout is a pure function of its inputs, which makes those
//! re-runs idempotent regardless of the order images finish loading in.

use crate::model::{ImageRecord, Size};
use serde::{Deserialize, Serialize};

pub const DEFAULT_COLUMNS: usize = 4;
pub const DEFAULT_ROW_GAP: f64 = 8.0;
pub const DEFAULT_FALLBACK_HEIGHT: f64 = 250.0;

/// Anything the engine can place.
pub trait LayoutItem {
    fn layout_id(&self) -> &str;
    fn natural_size(&self) -> Option<Size>;
}

impl LayoutItem for ImageRecord {
    fn layout_id(&self) -> &str {
        &self.id
    }

    fn natural_size(&self) -> Option<Size> {
        self.natural_size
    }
}

impl<T: LayoutItem + ?Sized> LayoutItem for &T {
    fn layout_id(&self) -> &str {
        (**self).layout_id()
    }

    fn natural_size(&self) -> Option<Size> {
        (**self).natural_size()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Breakpoint {
    /// Viewport widths at or below this use `columns`.
    pub max_width: f64,
    pub columns: usize,
}

/// Maps viewport width to a column count. Narrower viewports never get more
/// columns than wider ones as long as the breakpoints are monotonic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnBreakpoints {
    pub default_columns: usize,
    pub breakpoints: Vec<Breakpoint>,
}

impl Default for ColumnBreakpoints {
    fn default() -> Self {
        Self {
            default_columns: DEFAULT_COLUMNS,
            breakpoints: default_breakpoints(),
        }
    }
}

pub fn default_breakpoints() -> Vec<Breakpoint> {
    vec![
        Breakpoint {
            max_width: 1400.0,
            columns: 3,
        },
        Breakpoint {
            max_width: 900.0,
            columns: 2,
        },
        Breakpoint {
            max_width: 600.0,
            columns: 1,
        },
    ]
}

impl ColumnBreakpoints {
    pub fn columns_for(&self, viewport_width: f64) -> usize {
        self.breakpoints
            .iter()
            .filter(|bp| viewport_width <= bp.max_width)
            .min_by(|a, b| a.max_width.total_cmp(&b.max_width))
            .map(|bp| bp.columns)
            .unwrap_or(self.default_columns)
            .max(1)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LayoutOptions {
    /// Added below every item.
    pub row_gap: f64,
    /// Horizontal space between columns.
    pub column_gap: f64,
    /// Height used when the intrinsic size is unknown.
    pub fallback_height: f64,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            row_gap: DEFAULT_ROW_GAP,
            column_gap: 0.0,
            fallback_height: DEFAULT_FALLBACK_HEIGHT,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Placement {
    pub id: String,
    pub column: usize,
    pub left: f64,
    pub top: f64,
    pub width: f64,
    /// Rendered height including the row gap.
    pub height: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LayoutResult {
    pub columns: usize,
    pub item_width: f64,
    pub placements: Vec<Placement>,
    pub column_heights: Vec<f64>,
    /// Container height: the tallest column.
    pub height: f64,
}

impl LayoutResult {
    pub fn placement(&self, id: &str) -> Option<&Placement> {
        self.placements.iter().find(|p| p.id == id)
    }
}

/// Lays out `items` in order across `columns` equal columns.
pub fn layout<I>(items: I, container_width: f64, columns: usize, options: &LayoutOptions) -> LayoutResult
where
    I: IntoIterator,
    I::Item: LayoutItem,
{
    let columns = columns.max(1);
    let gaps = options.column_gap * (columns - 1) as f64;
    let item_width = ((container_width - gaps) / columns as f64).max(0.0);

    let mut column_heights = vec![0.0_f64; columns];
    let mut placements = Vec::new();

    for item in items {
        let base = item
            .natural_size()
            .and_then(|size| size.scaled_height(item_width))
            .unwrap_or(options.fallback_height);
        let height = base + options.row_gap;

        let column = shortest_column(&column_heights);
        let top = column_heights[column];
        placements.push(Placement {
            id: item.layout_id().to_string(),
            column,
            left: column as f64 * (item_width + options.column_gap),
            top,
            width: item_width,
            height,
        });
        column_heights[column] += height;
    }

    let height = column_heights.iter().copied().fold(0.0, f64::max);
    tracing::debug!(items = placements.len(), columns, height, "masonry pass");

    LayoutResult {
        columns,
        item_width,
        placements,
        column_heights,
        height,
    }
}

/// Index of the shortest column; the first one wins ties.
fn shortest_column(heights: &[f64]) -> usize {
    let mut best = 0;
    for (i, h) in heights.iter().enumerate().skip(1) {
        if *h < heights[best] {
            best = i;
        }
    }
    best
}
