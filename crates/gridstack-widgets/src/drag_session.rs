#![forbid(unsafe_code)]

//! Drag session lifecycle for the grid surface.
//!
//! ```text
//! Idle --start--> Dragging --move--> Dragging --end/cancel--> Idle
//! ```
//!
//! # Invariants
//!
//! 1. At most one item is dragged at a time.
//! 2. `is_active()` holds exactly when the placeholder is non-empty and a
//!    dragged item is recorded; in `Idle` the placeholder is
//!    [`PlaceholderState::EMPTY`].
//! 3. The dragged element's `max-width`/`top`/`left` overrides are set only
//!    by `start` and removed by `end`/`force_cancel`.
//! 4. No transition mutates a [`GridItem`]. Writing back a new position is
//!    the owning application's job.
//!
//! # Failure Modes
//!
//! Out-of-contract input (a second `start`, `end` for another item, any
//! transition on a zero-sized item) returns a [`DragSessionError`] and leaves
//! the state untouched. If the host cannot measure the dragged element, the
//! drag still starts; the element is simply not pinned.

use std::fmt;

use gridstack_layout::{GridItem, ItemId, PixelRect, PlaceholderState, Point, Position, cell_at};

use crate::host::{ElementId, StyleProperty, SurfaceHost};

/// One drag gesture callback payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DragEvent {
    /// Element the gesture is attached to.
    pub source: ElementId,
    /// Pointer position in surface-local pixels.
    pub pointer: Point,
}

impl DragEvent {
    #[must_use]
    pub const fn new(source: ElementId, pointer: Point) -> Self {
        Self { source, pointer }
    }

    /// Event sourced from an item's draggable wrapper.
    #[must_use]
    pub const fn for_item(item: ItemId, pointer: Point) -> Self {
        Self::new(ElementId::Item(item), pointer)
    }
}

/// The interactive wrapper around a rendered item.
pub trait DragHandle {
    /// Element this handle wraps.
    fn element(&self) -> ElementId;

    /// Return the rendered transform to the natural layout position.
    fn reset(&mut self);
}

/// Drag handle that follows the pointer with a free translation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FreeDragHandle {
    element: ElementId,
    offset: (i32, i32),
}

impl FreeDragHandle {
    #[must_use]
    pub const fn new(element: ElementId) -> Self {
        Self {
            element,
            offset: (0, 0),
        }
    }

    /// Accumulate pointer movement into the transform.
    pub fn move_by(&mut self, dx: i32, dy: i32) {
        self.offset = (
            self.offset.0.saturating_add(dx),
            self.offset.1.saturating_add(dy),
        );
    }

    /// Current translation away from the natural position.
    #[must_use]
    pub const fn offset(&self) -> (i32, i32) {
        self.offset
    }

    #[must_use]
    pub const fn is_displaced(&self) -> bool {
        self.offset.0 != 0 || self.offset.1 != 0
    }
}

impl DragHandle for FreeDragHandle {
    fn element(&self) -> ElementId {
        self.element
    }

    fn reset(&mut self) {
        self.offset = (0, 0);
    }
}

/// Coarse lifecycle phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DragPhase {
    Idle,
    Dragging,
}

/// Full drag session state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DragSessionState {
    #[default]
    Idle,
    Dragging {
        item: ItemId,
        element: ElementId,
        placeholder: PlaceholderState,
        /// Box pinned on the dragged element, if the host could measure it.
        pinned: Option<PixelRect>,
        pointer: Point,
        /// Cell under the pointer at the last move.
        hover: Option<Position>,
    },
}

impl DragSessionState {
    #[must_use]
    pub const fn phase(&self) -> DragPhase {
        match self {
            Self::Idle => DragPhase::Idle,
            Self::Dragging { .. } => DragPhase::Dragging,
        }
    }
}

/// Observable effect of one transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragEffect {
    Started {
        item: ItemId,
        placeholder: PlaceholderState,
        pinned: Option<PixelRect>,
    },
    Moved {
        item: ItemId,
        pointer: Point,
        hover: Option<Position>,
    },
    Ended {
        item: ItemId,
        drop: Point,
        hover: Option<Position>,
    },
    Cancelled {
        item: ItemId,
    },
}

/// One state-machine step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DragTransition {
    pub transition_id: u64,
    pub from: DragPhase,
    pub to: DragPhase,
    pub effect: DragEffect,
}

/// Out-of-contract drag input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragSessionError {
    /// `start` while another drag is active.
    AlreadyDragging { active: ItemId, requested: ItemId },
    /// `move`/`end` while idle.
    NotDragging { requested: ItemId },
    /// `move`/`end` for an item other than the dragged one.
    ItemMismatch { active: ItemId, requested: ItemId },
    /// `start` on an item with zero width or height.
    EmptyFootprint { item: ItemId },
    /// `start` on an item that is not on the surface.
    UntrackedItem { requested: ItemId },
}

impl fmt::Display for DragSessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AlreadyDragging { active, requested } => write!(
                f,
                "cannot start dragging {requested}: {active} is already being dragged"
            ),
            Self::NotDragging { requested } => {
                write!(f, "no drag in progress for {requested}")
            }
            Self::ItemMismatch { active, requested } => write!(
                f,
                "drag event for {requested} but {active} is being dragged"
            ),
            Self::EmptyFootprint { item } => {
                write!(f, "cannot drag {item}: item has an empty footprint")
            }
            Self::UntrackedItem { requested } => {
                write!(f, "cannot drag {requested}: item is not on the surface")
            }
        }
    }
}

impl std::error::Error for DragSessionError {}

fn clamp_px(value: u32) -> i32 {
    i32::try_from(value).unwrap_or(i32::MAX)
}

/// Drag lifecycle machine.
#[derive(Debug, Clone, Default)]
pub struct DragSession {
    state: DragSessionState,
    transition_counter: u64,
}

impl DragSession {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn state(&self) -> DragSessionState {
        self.state
    }

    /// Whether a drag is in progress.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        matches!(self.state, DragSessionState::Dragging { .. })
    }

    #[must_use]
    pub const fn dragged_item(&self) -> Option<ItemId> {
        match self.state {
            DragSessionState::Dragging { item, .. } => Some(item),
            DragSessionState::Idle => None,
        }
    }

    /// Placeholder footprint; the empty sentinel when idle.
    #[must_use]
    pub const fn placeholder(&self) -> PlaceholderState {
        match self.state {
            DragSessionState::Dragging { placeholder, .. } => placeholder,
            DragSessionState::Idle => PlaceholderState::EMPTY,
        }
    }

    /// Cell under the pointer at the last move.
    #[must_use]
    pub const fn hover_cell(&self) -> Option<Position> {
        match self.state {
            DragSessionState::Dragging { hover, .. } => hover,
            DragSessionState::Idle => None,
        }
    }

    /// Begin dragging `item`.
    ///
    /// Measures the source element and pins its current box as
    /// `max-width`/`top`/`left` overrides so it does not reflow while moved.
    pub fn start(
        &mut self,
        event: &DragEvent,
        item: &GridItem,
        host: &mut dyn SurfaceHost,
    ) -> Result<DragTransition, DragSessionError> {
        if let DragSessionState::Dragging { item: active, .. } = self.state {
            return Err(DragSessionError::AlreadyDragging {
                active,
                requested: item.id,
            });
        }
        let placeholder = PlaceholderState::from_item(item);
        if item.w == 0 || item.h == 0 {
            return Err(DragSessionError::EmptyFootprint { item: item.id });
        }

        let pinned = host.bounding_rect(event.source);
        if let Some(rect) = pinned {
            host.set_style(event.source, StyleProperty::MaxWidth, clamp_px(rect.width));
            host.set_style(event.source, StyleProperty::Top, rect.top());
            host.set_style(event.source, StyleProperty::Left, rect.left());
        }

        self.state = DragSessionState::Dragging {
            item: item.id,
            element: event.source,
            placeholder,
            pinned,
            pointer: event.pointer,
            hover: None,
        };

        #[cfg(feature = "tracing")]
        tracing::debug!(
            target: "gridstack.drag",
            item_id = item.id.get(),
            placeholder_x = placeholder.x,
            placeholder_y = placeholder.y,
            placeholder_w = placeholder.w,
            placeholder_h = placeholder.h,
            measured = pinned.is_some(),
            "drag started"
        );

        Ok(self.transition(
            DragPhase::Idle,
            DragEffect::Started {
                item: item.id,
                placeholder,
                pinned,
            },
        ))
    }

    /// Observe pointer movement.
    ///
    /// Records the pointer and the cell beneath it for hover feedback. The
    /// placeholder and the item are left alone.
    pub fn drag_move(
        &mut self,
        event: &DragEvent,
        item: &GridItem,
        cell_size: u32,
    ) -> Result<DragTransition, DragSessionError> {
        let DragSessionState::Dragging {
            item: active,
            element,
            placeholder,
            pinned,
            ..
        } = self.state
        else {
            return Err(DragSessionError::NotDragging { requested: item.id });
        };
        if active != item.id {
            return Err(DragSessionError::ItemMismatch {
                active,
                requested: item.id,
            });
        }

        let hover = cell_at(event.pointer, cell_size);
        self.state = DragSessionState::Dragging {
            item: active,
            element,
            placeholder,
            pinned,
            pointer: event.pointer,
            hover,
        };

        #[cfg(feature = "tracing")]
        tracing::trace!(
            target: "gridstack.drag",
            item_id = active.get(),
            pointer_x = event.pointer.x,
            pointer_y = event.pointer.y,
            "drag moved"
        );

        Ok(self.transition(
            DragPhase::Dragging,
            DragEffect::Moved {
                item: active,
                pointer: event.pointer,
                hover,
            },
        ))
    }

    /// Finish dragging `item`.
    ///
    /// Removes the pinned overrides, clears the placeholder and resets the
    /// drag handle's transform.
    pub fn end(
        &mut self,
        event: &DragEvent,
        item: &GridItem,
        handle: &mut dyn DragHandle,
        host: &mut dyn SurfaceHost,
    ) -> Result<DragTransition, DragSessionError> {
        let DragSessionState::Dragging {
            item: active,
            element,
            hover,
            ..
        } = self.state
        else {
            return Err(DragSessionError::NotDragging { requested: item.id });
        };
        if active != item.id {
            return Err(DragSessionError::ItemMismatch {
                active,
                requested: item.id,
            });
        }

        self.state = DragSessionState::Idle;
        unpin(host, element);
        handle.reset();

        #[cfg(feature = "tracing")]
        tracing::debug!(
            target: "gridstack.drag",
            item_id = active.get(),
            drop_x = event.pointer.x,
            drop_y = event.pointer.y,
            "drag ended"
        );

        Ok(self.transition(
            DragPhase::Dragging,
            DragEffect::Ended {
                item: active,
                drop: event.pointer,
                hover,
            },
        ))
    }

    /// Abort any active drag and return to `Idle`.
    ///
    /// Used when the gesture is interrupted without a regular end signal.
    /// Returns `None` if already idle.
    pub fn force_cancel(
        &mut self,
        host: &mut dyn SurfaceHost,
        handle: Option<&mut dyn DragHandle>,
    ) -> Option<DragTransition> {
        let DragSessionState::Dragging { item, element, .. } = self.state else {
            return None;
        };
        self.state = DragSessionState::Idle;
        unpin(host, element);
        if let Some(handle) = handle {
            handle.reset();
        }

        #[cfg(feature = "tracing")]
        tracing::debug!(target: "gridstack.drag", item_id = item.get(), "drag cancelled");

        Some(self.transition(DragPhase::Dragging, DragEffect::Cancelled { item }))
    }

    fn transition(&mut self, from: DragPhase, effect: DragEffect) -> DragTransition {
        self.transition_counter = self.transition_counter.saturating_add(1);
        DragTransition {
            transition_id: self.transition_counter,
            from,
            to: self.state.phase(),
            effect,
        }
    }
}

fn unpin(host: &mut dyn SurfaceHost, element: ElementId) {
    host.remove_style(element, StyleProperty::MaxWidth);
    host.remove_style(element, StyleProperty::Top);
    host.remove_style(element, StyleProperty::Left);
}
