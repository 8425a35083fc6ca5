#![forbid(unsafe_code)]

//! Surface geometry: cell ↔ pixel conversion and auto-sizing.
//!
//! # Height rules
//!
//! [`HeightRule::Observed`] takes the largest `y` anywhere in the list and the
//! largest `h` anywhere in the list, independently, and sums them:
//!
//! ```text
//! height = (max y + max h) * cell_size
//! ```
//!
//! This can overestimate: `[{y:5,h:1}, {y:0,h:10}]` yields `15` rows although
//! the items only reach row `10`. It is the default for compatibility with
//! existing layouts. [`HeightRule::Tight`] computes `max(y + h)` per item.
//!
//! All arithmetic saturates.

use gridstack_core::geometry::{PixelRect, Point, Position};
use serde::{Deserialize, Serialize};

use crate::item::{GridItem, PlaceholderState};

/// Default pixel size of one grid cell.
pub const DEFAULT_CELL_SIZE: u32 = 100;

/// How the surface height is derived from the item list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HeightRule {
    /// `(max y + max h) * cell_size`, maxima taken independently.
    #[default]
    Observed,
    /// `max(y + h) * cell_size`.
    Tight,
}

impl HeightRule {
    /// Number of rows the surface must span.
    #[must_use]
    pub fn rows(self, items: &[GridItem]) -> u32 {
        match self {
            Self::Observed => {
                let (y_max, h_max) = items.iter().fold((0u16, 0u16), |(y, h), item| {
                    (y.max(item.y), h.max(item.h))
                });
                u32::from(y_max) + u32::from(h_max)
            }
            Self::Tight => items
                .iter()
                .map(|item| u32::from(item.y) + u32::from(item.h))
                .max()
                .unwrap_or(0),
        }
    }

    /// Pixel height of the surface for `items`.
    #[must_use]
    pub fn surface_height(self, items: &[GridItem], cell_size: u32) -> u32 {
        self.rows(items).saturating_mul(cell_size)
    }
}

/// Pixel height of the surface under the default [`HeightRule::Observed`].
///
/// Empty lists yield `0`.
#[must_use]
pub fn compute_surface_height(items: &[GridItem], cell_size: u32) -> u32 {
    HeightRule::Observed.surface_height(items, cell_size)
}

/// Derived surface measurements.
///
/// `height` is recomputed from the item list on every change; `width` is
/// whatever the host last measured (0 until measured).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SurfaceMetrics {
    pub width: u32,
    pub height: u32,
}

fn cells_to_px(cells: u16, cell_size: u32) -> u32 {
    u32::from(cells).saturating_mul(cell_size)
}

fn origin_px(cells: u16, cell_size: u32) -> i32 {
    i32::try_from(cells_to_px(cells, cell_size)).unwrap_or(i32::MAX)
}

/// Pixel box for an item's natural grid placement, relative to the surface.
#[must_use]
pub fn item_rect(item: &GridItem, cell_size: u32) -> PixelRect {
    PixelRect::new(
        origin_px(item.x, cell_size),
        origin_px(item.y, cell_size),
        cells_to_px(item.w, cell_size),
        cells_to_px(item.h, cell_size),
    )
}

/// Pixel box for the placeholder, or `None` for the empty sentinel.
#[must_use]
pub fn placeholder_rect(placeholder: &PlaceholderState, cell_size: u32) -> Option<PixelRect> {
    if placeholder.is_empty() {
        return None;
    }
    Some(PixelRect::new(
        origin_px(placeholder.x, cell_size),
        origin_px(placeholder.y, cell_size),
        cells_to_px(placeholder.w, cell_size),
        cells_to_px(placeholder.h, cell_size),
    ))
}

/// Grid cell under a surface-local pixel point.
///
/// Points left of or above the surface clamp to column/row 0. Returns `None`
/// when `cell_size` is zero.
#[must_use]
pub fn cell_at(point: Point, cell_size: u32) -> Option<Position> {
    if cell_size == 0 {
        return None;
    }
    let axis = |v: i32| {
        let cells = u32::try_from(v.max(0)).unwrap_or(0) / cell_size;
        u16::try_from(cells).unwrap_or(u16::MAX)
    };
    Some(Position::new(axis(point.x), axis(point.y)))
}
