#![forbid(unsafe_code)]

//! Host abstraction for the rendered grid surface.
//!
//! A [`SurfaceHost`] is whatever retained UI layer displays the surface: a
//! DOM, a scene graph, or the in-memory [`RetainedSurface`] used by tests and
//! headless renderers. The grid surface only ever talks to it through element
//! ids, pixel boxes, pixel style overrides and state flags.
//!
//! # Measurement
//!
//! [`SurfaceHost::bounding_rect`] returns `None` when the host has no layout
//! context (server-side or headless rendering). Callers skip measurement in
//! that case; it is not an error.

use std::collections::BTreeMap;

use bitflags::bitflags;
use gridstack_layout::{ItemId, PixelRect, Point};

/// Addressable part of the rendered surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ElementId {
    /// The surface element itself.
    Surface,
    /// The draggable wrapper around one item.
    Item(ItemId),
    /// The placeholder box drawn at the dragged item's pre-drag slot.
    Placeholder,
}

/// Pixel style properties the grid surface writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum StyleProperty {
    Height,
    MaxWidth,
    Top,
    Left,
}

impl StyleProperty {
    /// CSS property name.
    #[must_use]
    pub const fn css_name(self) -> &'static str {
        match self {
            Self::Height => "height",
            Self::MaxWidth => "max-width",
            Self::Top => "top",
            Self::Left => "left",
        }
    }
}

bitflags! {
    /// State flags carried by rendered elements.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct ElementFlags: u8 {
        /// Set on the surface while a drag is active.
        const DRAGGING_ACTIVE = 1 << 0;
        /// Set on every item wrapper.
        const DRAGGABLE       = 1 << 1;
        /// Set on the placeholder element.
        const PLACEHOLDER     = 1 << 2;
    }
}

impl ElementFlags {
    /// CSS class names for the set flags, in bit order.
    #[must_use]
    pub fn class_names(self) -> Vec<&'static str> {
        let mut names = Vec::with_capacity(3);
        if self.contains(Self::DRAGGING_ACTIVE) {
            names.push("is-dragging-active");
        }
        if self.contains(Self::DRAGGABLE) {
            names.push("gridstack-item");
        }
        if self.contains(Self::PLACEHOLDER) {
            names.push("gridstack-placeholder");
        }
        names
    }
}

/// Rendering layer the grid surface writes into.
pub trait SurfaceHost {
    /// Current on-screen box of an element, or `None` when measurement is
    /// unavailable.
    fn bounding_rect(&self, element: ElementId) -> Option<PixelRect>;

    /// Mount (or move) an element at its natural layout box, relative to the
    /// surface.
    fn place(&mut self, element: ElementId, rect: PixelRect);

    /// Remove an element. Unknown elements are ignored.
    fn unmount(&mut self, element: ElementId);

    /// Set a pixel style override.
    fn set_style(&mut self, element: ElementId, property: StyleProperty, px: i32);

    /// Remove a style override. Missing overrides are ignored.
    fn remove_style(&mut self, element: ElementId, property: StyleProperty);

    /// Set or clear state flags.
    fn set_flags(&mut self, element: ElementId, flags: ElementFlags, enabled: bool);
}

/// Retained state of one element in a [`RetainedSurface`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ElementState {
    /// Natural layout box relative to the surface origin.
    pub layout: PixelRect,
    pub styles: BTreeMap<StyleProperty, i32>,
    pub flags: ElementFlags,
}

impl ElementState {
    /// Style override in pixels, if set.
    #[must_use]
    pub fn style(&self, property: StyleProperty) -> Option<i32> {
        self.styles.get(&property).copied()
    }
}

/// In-memory [`SurfaceHost`].
///
/// Bounding boxes are reported in page space: the element's layout box
/// shifted by the surface origin, with `top`/`left`/`max-width` overrides
/// applied as absolute positioning would. The surface's own box uses the
/// configured width and its `height` style.
#[derive(Debug, Clone)]
pub struct RetainedSurface {
    elements: BTreeMap<ElementId, ElementState>,
    origin: Point,
    width: u32,
    measurable: bool,
}

impl Default for RetainedSurface {
    fn default() -> Self {
        Self::new(0)
    }
}

impl RetainedSurface {
    /// A measurable surface of the given pixel width at the page origin.
    #[must_use]
    pub fn new(width: u32) -> Self {
        let mut elements = BTreeMap::new();
        elements.insert(ElementId::Surface, ElementState::default());
        Self {
            elements,
            origin: Point::default(),
            width,
            measurable: true,
        }
    }

    /// A surface with no layout context: every measurement returns `None`.
    #[must_use]
    pub fn headless() -> Self {
        Self {
            measurable: false,
            ..Self::new(0)
        }
    }

    /// Place the surface at a page offset.
    #[must_use]
    pub fn with_origin(mut self, origin: Point) -> Self {
        self.origin = origin;
        self
    }

    /// Simulate a host resize.
    pub fn set_width(&mut self, width: u32) {
        self.width = width;
    }

    /// Whether measurements are available.
    #[must_use]
    pub const fn is_measurable(&self) -> bool {
        self.measurable
    }

    /// Retained element state.
    #[must_use]
    pub fn element(&self, element: ElementId) -> Option<&ElementState> {
        self.elements.get(&element)
    }

    /// Whether an element is mounted.
    #[must_use]
    pub fn is_mounted(&self, element: ElementId) -> bool {
        self.elements.contains_key(&element)
    }

    /// Pixel style override on an element.
    #[must_use]
    pub fn style(&self, element: ElementId, property: StyleProperty) -> Option<i32> {
        self.element(element).and_then(|e| e.style(property))
    }

    /// Flags on an element (empty if not mounted).
    #[must_use]
    pub fn flags(&self, element: ElementId) -> ElementFlags {
        self.element(element).map(|e| e.flags).unwrap_or_default()
    }

    /// Ids of all mounted item wrappers, in id order.
    #[must_use]
    pub fn mounted_items(&self) -> Vec<ItemId> {
        self.elements
            .keys()
            .filter_map(|id| match id {
                ElementId::Item(item) => Some(*item),
                _ => None,
            })
            .collect()
    }
}

fn px_to_u32(px: i32) -> u32 {
    u32::try_from(px.max(0)).unwrap_or(0)
}

impl SurfaceHost for RetainedSurface {
    fn bounding_rect(&self, element: ElementId) -> Option<PixelRect> {
        if !self.measurable {
            return None;
        }
        let state = self.elements.get(&element)?;
        if element == ElementId::Surface {
            let height = state.style(StyleProperty::Height).map_or(0, px_to_u32);
            return Some(PixelRect::new(self.origin.x, self.origin.y, self.width, height));
        }
        let mut rect = state.layout.translate(self.origin.x, self.origin.y);
        if let Some(left) = state.style(StyleProperty::Left) {
            rect.x = left;
        }
        if let Some(top) = state.style(StyleProperty::Top) {
            rect.y = top;
        }
        if let Some(max_width) = state.style(StyleProperty::MaxWidth) {
            rect.width = rect.width.min(px_to_u32(max_width));
        }
        Some(rect)
    }

    fn place(&mut self, element: ElementId, rect: PixelRect) {
        self.elements.entry(element).or_default().layout = rect;
    }

    fn unmount(&mut self, element: ElementId) {
        if element != ElementId::Surface {
            self.elements.remove(&element);
        }
    }

    fn set_style(&mut self, element: ElementId, property: StyleProperty, px: i32) {
        self.elements
            .entry(element)
            .or_default()
            .styles
            .insert(property, px);
    }

    fn remove_style(&mut self, element: ElementId, property: StyleProperty) {
        if let Some(state) = self.elements.get_mut(&element) {
            state.styles.remove(&property);
        }
    }

    fn set_flags(&mut self, element: ElementId, flags: ElementFlags, enabled: bool) {
        self.elements
            .entry(element)
            .or_default()
            .flags
            .set(flags, enabled);
    }
}
