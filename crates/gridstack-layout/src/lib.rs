#![forbid(unsafe_code)]

//! Grid item model and surface geometry.
//!
//! Items are placed in cell space ([`GridItem`]); the surface converts cells to
//! pixels with a fixed cell size and derives its own height from the item list
//! ([`compute_surface_height`]). Nothing here mutates items: placement policy,
//! collision handling and persistence belong to the owning application.

pub mod item;
pub mod surface;

pub use gridstack_core::geometry::{PixelRect, Point, Position, Rect};
pub use item::{GridItem, GridItemError, ItemId, PlaceholderState, validate_items};
pub use surface::{
    DEFAULT_CELL_SIZE, HeightRule, SurfaceMetrics, cell_at, compute_surface_height, item_rect,
    placeholder_rect,
};
