#![forbid(unsafe_code)]

//! Grid item model and drag placeholder footprint.

use std::fmt;

use gridstack_core::geometry::Rect;
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

/// Stable identifier the owning application uses to track an item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(pub u64);

impl ItemId {
    /// Get the raw numeric value.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "item:{}", self.0)
    }
}

/// One cell-aligned element on the grid surface.
///
/// `x`/`y` are the top-left cell, `w`/`h` the size in cells. `kind` selects
/// the template used to render the item and serializes as `"type"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridItem {
    pub id: ItemId,
    #[serde(rename = "type")]
    pub kind: String,
    pub x: u16,
    pub y: u16,
    pub w: u16,
    pub h: u16,
}

impl GridItem {
    /// Create an item of the given type at `(x, y)` spanning `w × h` cells.
    #[must_use]
    pub fn new(id: u64, kind: impl Into<String>, x: u16, y: u16, w: u16, h: u16) -> Self {
        Self {
            id: ItemId(id),
            kind: kind.into(),
            x,
            y,
            w,
            h,
        }
    }

    /// Cells covered by the item.
    #[inline]
    #[must_use]
    pub const fn footprint(&self) -> Rect {
        Rect::new(self.x, self.y, self.w, self.h)
    }

    /// Reject zero-sized items.
    pub fn validate(&self) -> Result<(), GridItemError> {
        if self.w == 0 || self.h == 0 {
            return Err(GridItemError::EmptySize {
                id: self.id,
                w: self.w,
                h: self.h,
            });
        }
        Ok(())
    }
}

/// Validate a whole item list: every item has a non-zero size and no two
/// items share an id.
///
/// Overlap between items is not checked; placement policy belongs to the
/// owning application.
pub fn validate_items(items: &[GridItem]) -> Result<(), GridItemError> {
    let mut seen = FxHashSet::default();
    for item in items {
        item.validate()?;
        if !seen.insert(item.id) {
            return Err(GridItemError::DuplicateId { id: item.id });
        }
    }
    Ok(())
}

/// Item validation failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridItemError {
    EmptySize { id: ItemId, w: u16, h: u16 },
    DuplicateId { id: ItemId },
}

impl fmt::Display for GridItemError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptySize { id, w, h } => {
                write!(f, "grid item {id} has empty size {w}x{h}")
            }
            Self::DuplicateId { id } => write!(f, "duplicate grid item id {id}"),
        }
    }
}

impl std::error::Error for GridItemError {}

/// Cell footprint reserved on the surface while an item is dragged.
///
/// All-zero ([`PlaceholderState::EMPTY`]) means no drag is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct PlaceholderState {
    pub w: u16,
    pub h: u16,
    pub x: u16,
    pub y: u16,
}

impl PlaceholderState {
    /// The "no drag active" sentinel.
    pub const EMPTY: Self = Self {
        w: 0,
        h: 0,
        x: 0,
        y: 0,
    };

    /// Snapshot an item's current footprint.
    #[must_use]
    pub const fn from_item(item: &GridItem) -> Self {
        Self {
            w: item.w,
            h: item.h,
            x: item.x,
            y: item.y,
        }
    }

    /// Whether this is the empty sentinel.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.w == 0 && self.h == 0 && self.x == 0 && self.y == 0
    }

    /// Cells covered by the placeholder.
    #[inline]
    #[must_use]
    pub const fn footprint(&self) -> Rect {
        Rect::new(self.x, self.y, self.w, self.h)
    }
}
