#![forbid(unsafe_code)]

//! gridstack public facade crate.
//!
//! Re-exports the grid surface and its supporting types from the internal
//! crates, and offers a prelude plus a top-level [`Error`] for applications
//! that want a single error type across registry, drag and item validation
//! failures.
//!
//! ```
//! use gridstack::prelude::*;
//!
//! let items = Observable::new(vec![
//!     GridItem::new(1, "card", 0, 0, 2, 2),
//!     GridItem::new(2, "chart", 2, 0, 2, 3),
//! ]);
//! let mut grid = GridStack::new(items, RetainedSurface::new(400), GridStackConfig::default());
//! grid.content_init([
//!     TemplateDef::new("card", TemplateRef::from_fn(|_| "<card/>".into())),
//!     TemplateDef::new("chart", TemplateRef::from_fn(|_| "<chart/>".into())),
//! ]);
//!
//! let frame = grid.render()?;
//! assert_eq!(frame.height, 300);
//! assert_eq!(frame.tiles.len(), 2);
//! # Ok::<(), gridstack::Error>(())
//! ```

use std::fmt;

// --- Core re-exports -------------------------------------------------------

pub use gridstack_core::event::{PointerButton, PointerEvent};
pub use gridstack_core::gesture::{DragGesture, DragRecognizer};

// --- Layout re-exports -----------------------------------------------------

pub use gridstack_layout::{
    GridItem, GridItemError, HeightRule, ItemId, PixelRect, PlaceholderState, Point, Position,
    Rect, SurfaceMetrics, cell_at, compute_surface_height, item_rect, placeholder_rect,
    validate_items,
};

// --- Runtime re-exports ----------------------------------------------------

pub use gridstack_runtime::{Observable, Subscription};

// --- Widget re-exports -----------------------------------------------------

pub use gridstack_widgets::{
    DragEffect, DragEvent, DragHandle, DragPhase, DragSession, DragSessionError, DragSessionState,
    DragTransition, ElementFlags, ElementId, FreeDragHandle, GridStack, GridStackConfig,
    ItemRegistry, ItemTemplate, LookupError, RenderedTile, RetainedSurface, StyleProperty,
    SurfaceFrame, SurfaceHost, TemplateContext, TemplateDef, TemplateRef, WidgetLoadTracker,
};

// --- Errors ---------------------------------------------------------------

/// Top-level error type for gridstack apps.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// An item type has no registered template.
    Lookup(LookupError),
    /// Drag input outside the session contract.
    Drag(DragSessionError),
    /// An item failed validation.
    Item(GridItemError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Lookup(err) => write!(f, "{err}"),
            Self::Drag(err) => write!(f, "{err}"),
            Self::Item(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Lookup(err) => Some(err),
            Self::Drag(err) => Some(err),
            Self::Item(err) => Some(err),
        }
    }
}

impl From<LookupError> for Error {
    fn from(err: LookupError) -> Self {
        Self::Lookup(err)
    }
}

impl From<DragSessionError> for Error {
    fn from(err: DragSessionError) -> Self {
        Self::Drag(err)
    }
}

impl From<GridItemError> for Error {
    fn from(err: GridItemError) -> Self {
        Self::Item(err)
    }
}

/// Standard result type for gridstack APIs.
pub type Result<T> = std::result::Result<T, Error>;

// --- Prelude --------------------------------------------------------------

pub mod prelude {
    pub use crate::{
        DragEvent, DragHandle, Error, FreeDragHandle, GridItem, GridStack, GridStackConfig,
        HeightRule, ItemId, Observable, PlaceholderState, PointerEvent, Result, RetainedSurface,
        SurfaceFrame, SurfaceHost, TemplateDef, TemplateRef,
    };

    pub use crate::{core, layout, runtime, widgets};
}

pub use gridstack_core as core;
pub use gridstack_layout as layout;
pub use gridstack_runtime as runtime;
pub use gridstack_widgets as widgets;
