#![forbid(unsafe_code)]

//! Item templates: how one item type renders.

use std::fmt;
use std::rc::Rc;

use gridstack_layout::{GridItem, PixelRect};

use crate::load_tracker::WidgetLoadTracker;

/// Everything a template sees while rendering one item.
pub struct TemplateContext<'a> {
    item: &'a GridItem,
    area: PixelRect,
    dragging: bool,
    loads: &'a mut WidgetLoadTracker,
}

impl<'a> TemplateContext<'a> {
    pub(crate) fn new(
        item: &'a GridItem,
        area: PixelRect,
        dragging: bool,
        loads: &'a mut WidgetLoadTracker,
    ) -> Self {
        Self {
            item,
            area,
            dragging,
            loads,
        }
    }

    /// The item being rendered.
    #[must_use]
    pub fn item(&self) -> &GridItem {
        self.item
    }

    /// The item's pixel box relative to the surface.
    #[must_use]
    pub fn area(&self) -> PixelRect {
        self.area
    }

    /// Whether this item is the one being dragged.
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// Report that the widget for this item finished loading.
    ///
    /// Returns `true` the first time it is called for an item.
    pub fn mark_loaded(&mut self) -> bool {
        self.loads.set_widget_loaded(self.item.id)
    }
}

/// Renders an item into markup.
pub trait ItemTemplate {
    fn render(&self, ctx: &mut TemplateContext<'_>) -> String;
}

impl<F> ItemTemplate for F
where
    F: Fn(&mut TemplateContext<'_>) -> String,
{
    fn render(&self, ctx: &mut TemplateContext<'_>) -> String {
        self(ctx)
    }
}

/// Shared, identity-compared handle to a template.
///
/// Two `TemplateRef`s are equal only if they point at the same template
/// instance.
#[derive(Clone)]
pub struct TemplateRef(Rc<dyn ItemTemplate>);

impl TemplateRef {
    /// Wrap a template.
    #[must_use]
    pub fn new<T: ItemTemplate + 'static>(template: T) -> Self {
        Self(Rc::new(template))
    }

    /// Wrap a closure.
    #[must_use]
    pub fn from_fn<F>(f: F) -> Self
    where
        F: Fn(&mut TemplateContext<'_>) -> String + 'static,
    {
        Self(Rc::new(f))
    }

    /// Render through the wrapped template.
    pub fn render(&self, ctx: &mut TemplateContext<'_>) -> String {
        self.0.render(ctx)
    }
}

impl PartialEq for TemplateRef {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::addr_eq(Rc::as_ptr(&self.0), Rc::as_ptr(&other.0))
    }
}

impl Eq for TemplateRef {}

impl fmt::Debug for TemplateRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("TemplateRef")
            .field(&Rc::as_ptr(&self.0).cast::<()>())
            .finish()
    }
}

/// One declared item definition: a type name and the template for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateDef {
    pub kind: String,
    pub template: TemplateRef,
}

impl TemplateDef {
    #[must_use]
    pub fn new(kind: impl Into<String>, template: TemplateRef) -> Self {
        Self {
            kind: kind.into(),
            template,
        }
    }
}
