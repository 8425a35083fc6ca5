#![forbid(unsafe_code)]

//! Grid surface widget.
//!
//! [`GridStack`] lays out a reactive list of [`GridItem`]s on a pixel surface,
//! renders each through the template registered for its type, and runs a
//! drag session with a placeholder showing the dragged item's footprint.
//!
//! The surface never mutates items. Where a dropped item lands is up to the
//! application that owns the list.
//!
//! Rendering and measurement go through the [`SurfaceHost`] trait;
//! [`RetainedSurface`] is an in-memory host that records what was placed and
//! can run headless.
//!
//! [`GridItem`]: gridstack_layout::GridItem

pub mod drag_session;
pub mod grid_stack;
pub mod host;
pub mod item_registry;
pub mod load_tracker;
pub mod template;

pub use drag_session::{
    DragEffect, DragEvent, DragHandle, DragPhase, DragSession, DragSessionError,
    DragSessionState, DragTransition, FreeDragHandle,
};
pub use grid_stack::{GridStack, GridStackConfig, RenderedTile, SurfaceFrame};
pub use host::{ElementFlags, ElementId, ElementState, RetainedSurface, StyleProperty, SurfaceHost};
pub use item_registry::{ItemRegistry, LookupError};
pub use load_tracker::WidgetLoadTracker;
pub use template::{ItemTemplate, TemplateContext, TemplateDef, TemplateRef};
