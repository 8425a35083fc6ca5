#![forbid(unsafe_code)]

//! Raw pointer input delivered by a host to the grid surface.

use crate::geometry::Point;

/// Pointer button that initiated a press.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PointerButton {
    #[default]
    Primary,
    Secondary,
    Middle,
}

/// One raw pointer lifecycle signal, in surface-local pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerEvent {
    /// A button was pressed.
    Down {
        position: Point,
        button: PointerButton,
    },
    /// The pointer moved (with or without a button held).
    Move { position: Point },
    /// A button was released.
    Up {
        position: Point,
        button: PointerButton,
    },
    /// The host aborted the pointer sequence (e.g. lost pointer capture).
    Cancel,
    /// The surface lost focus or visibility.
    FocusLost,
}

impl PointerEvent {
    /// Pointer position carried by the event, if any.
    #[must_use]
    pub const fn position(&self) -> Option<Point> {
        match self {
            Self::Down { position, .. } | Self::Move { position } | Self::Up { position, .. } => {
                Some(*position)
            }
            Self::Cancel | Self::FocusLost => None,
        }
    }

    /// Shorthand for a primary-button press.
    #[must_use]
    pub const fn down(x: i32, y: i32) -> Self {
        Self::Down {
            position: Point::new(x, y),
            button: PointerButton::Primary,
        }
    }

    /// Shorthand for a pointer move.
    #[must_use]
    pub const fn moved(x: i32, y: i32) -> Self {
        Self::Move {
            position: Point::new(x, y),
        }
    }

    /// Shorthand for a primary-button release.
    #[must_use]
    pub const fn up(x: i32, y: i32) -> Self {
        Self::Up {
            position: Point::new(x, y),
            button: PointerButton::Primary,
        }
    }
}
