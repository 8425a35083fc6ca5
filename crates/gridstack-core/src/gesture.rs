#![forbid(unsafe_code)]

//! Drag gesture recognition: turns raw pointer input into drag lifecycle
//! gestures.
//!
//! [`DragRecognizer`] watches press → move → release sequences and emits
//! [`DragGesture::Start`] once the pointer travels past the configured
//! threshold, then [`DragGesture::Move`] for each further move and
//! [`DragGesture::End`] on release.
//!
//! # Invariants
//!
//! 1. Every drag is well-formed: `Start` → zero or more `Move` → `End` or
//!    `Cancel`. No `Move`/`End`/`Cancel` is emitted without a prior `Start`.
//! 2. A press released before crossing the threshold never emits anything
//!    (a click is not a drag).
//! 3. Only the button that started the press can end it.
//! 4. After [`reset`](DragRecognizer::reset) the recognizer is idle.
//!
//! # Failure Modes
//!
//! - [`PointerEvent::Cancel`] and [`PointerEvent::FocusLost`] during a drag
//!   emit `Cancel`, so a consumer is never left holding a dangling `Start`.
//! - A second press while one is held replaces nothing: it is ignored until
//!   the first press is released or cancelled.

use crate::event::{PointerButton, PointerEvent};
use crate::geometry::Point;

/// Default minimum manhattan distance (pixels) before a press becomes a drag.
pub const DEFAULT_DRAG_THRESHOLD: u16 = 3;

/// A recognized drag lifecycle gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragGesture {
    /// The pointer crossed the threshold. `origin` is where the press began.
    Start { origin: Point, position: Point },
    /// The pointer moved during a drag.
    Move {
        origin: Point,
        position: Point,
        delta: (i32, i32),
    },
    /// The button was released.
    End { origin: Point, position: Point },
    /// The drag was interrupted.
    Cancel,
}

#[derive(Debug, Clone, Copy)]
struct DragTracker {
    origin: Point,
    button: PointerButton,
    last: Point,
    started: bool,
}

/// Stateful drag recognizer. Feed every pointer event through
/// [`process`](DragRecognizer::process).
#[derive(Debug, Clone)]
pub struct DragRecognizer {
    threshold: u16,
    tracker: Option<DragTracker>,
}

impl Default for DragRecognizer {
    fn default() -> Self {
        Self::new(DEFAULT_DRAG_THRESHOLD)
    }
}

impl DragRecognizer {
    /// Create a recognizer with the given threshold. A threshold of zero
    /// starts the drag on the first move after the press.
    #[must_use]
    pub fn new(threshold: u16) -> Self {
        Self {
            threshold,
            tracker: None,
        }
    }

    /// Configured drag threshold.
    #[inline]
    #[must_use]
    pub const fn threshold(&self) -> u16 {
        self.threshold
    }

    /// Whether a drag is currently in progress.
    #[inline]
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.tracker.is_some_and(|t| t.started)
    }

    /// Whether a press is held (armed or dragging).
    #[inline]
    #[must_use]
    pub fn is_pressed(&self) -> bool {
        self.tracker.is_some()
    }

    /// Process one raw pointer event.
    pub fn process(&mut self, event: &PointerEvent) -> Option<DragGesture> {
        match *event {
            PointerEvent::Down { position, button } => {
                if self.tracker.is_none() {
                    self.tracker = Some(DragTracker {
                        origin: position,
                        button,
                        last: position,
                        started: false,
                    });
                }
                None
            }
            PointerEvent::Move { position } => self.on_move(position),
            PointerEvent::Up { position, button } => {
                let tracker = self.tracker?;
                if tracker.button != button {
                    return None;
                }
                self.tracker = None;
                tracker.started.then_some(DragGesture::End {
                    origin: tracker.origin,
                    position,
                })
            }
            PointerEvent::Cancel | PointerEvent::FocusLost => {
                let tracker = self.tracker.take()?;
                #[cfg(feature = "tracing")]
                if tracker.started {
                    tracing::debug!(?event, "drag gesture cancelled");
                }
                tracker.started.then_some(DragGesture::Cancel)
            }
        }
    }

    /// Reset to idle without emitting anything.
    pub fn reset(&mut self) {
        self.tracker = None;
    }

    fn on_move(&mut self, position: Point) -> Option<DragGesture> {
        let tracker = self.tracker.as_mut()?;
        let gesture = if tracker.started {
            Some(DragGesture::Move {
                origin: tracker.origin,
                position,
                delta: position.delta_from(tracker.last),
            })
        } else if tracker.origin.manhattan_distance(position) >= u32::from(self.threshold) {
            tracker.started = true;
            Some(DragGesture::Start {
                origin: tracker.origin,
                position,
            })
        } else {
            None
        };
        tracker.last = position;
        gesture
    }
}
