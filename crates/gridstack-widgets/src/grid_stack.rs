#![forbid(unsafe_code)]

//! The grid surface: composes the item registry, surface geometry and drag
//! session over a reactive item list.
//!
//! # Lifecycle
//!
//! 1. [`GridStack::new`] subscribes to the item list. Every change copies the
//!    list, recomputes the surface height and writes it to the host, before
//!    the observable's `set` returns.
//! 2. [`GridStack::content_init`] builds the [`ItemRegistry`] from the declared
//!    item definitions and marks the surface initialized. Rendering before this
//!    produces an empty frame.
//! 3. [`GridStack::render`] resolves every item's template, then places one
//!    draggable wrapper per item plus the placeholder while dragging.
//! 4. Drag gestures arrive either as raw pointer input
//!    ([`GridStack::handle_pointer`]) or as explicit callbacks
//!    ([`GridStack::on_drag_started`] and friends).
//!
//! # Failure Modes
//!
//! - An item whose type has no template fails the whole render with
//!   [`LookupError`]; no tile is emitted for any item in that frame.
//! - If the item list is changed from inside a template while rendering, the
//!   change is applied at the start of the next call into the surface.
//! - If the dragged item disappears from the list, the drag is cancelled.

use std::cell::{Cell, Ref, RefCell, RefMut};
use std::rc::Rc;

use ahash::{AHashMap, AHashSet};
use gridstack_core::event::PointerEvent;
use gridstack_core::gesture::{DEFAULT_DRAG_THRESHOLD, DragGesture, DragRecognizer};
use gridstack_layout::{
    DEFAULT_CELL_SIZE, GridItem, HeightRule, ItemId, PixelRect, PlaceholderState, Point, Position,
    SurfaceMetrics, item_rect, placeholder_rect,
};
use gridstack_runtime::{Observable, Subscription};
use serde::{Deserialize, Serialize};

use crate::drag_session::{
    DragEvent, DragHandle, DragSession, DragSessionError, DragSessionState, DragTransition,
    FreeDragHandle,
};
use crate::host::{ElementFlags, ElementId, StyleProperty, SurfaceHost};
use crate::item_registry::{ItemRegistry, LookupError};
use crate::load_tracker::WidgetLoadTracker;
use crate::template::{TemplateContext, TemplateDef, TemplateRef};

/// Surface configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridStackConfig {
    /// Pixel size of one grid cell (default: 100, at least 1).
    #[serde(deserialize_with = "deserialize_cell_size")]
    pub cell_size: u32,
    /// How the surface height is derived (default: [`HeightRule::Observed`]).
    pub height_rule: HeightRule,
    /// Pointer travel in pixels before a press becomes a drag (default: 3).
    pub drag_threshold: u16,
}

impl Default for GridStackConfig {
    fn default() -> Self {
        Self {
            cell_size: DEFAULT_CELL_SIZE,
            height_rule: HeightRule::Observed,
            drag_threshold: DEFAULT_DRAG_THRESHOLD,
        }
    }
}

fn deserialize_cell_size<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: serde::Deserializer<'de>,
{
    u32::deserialize(deserializer).map(|cell_size| cell_size.max(1))
}

impl GridStackConfig {
    /// Set the cell size. Zero is raised to 1 so a non-empty list never
    /// yields a zero-height surface.
    #[must_use]
    pub fn with_cell_size(mut self, cell_size: u32) -> Self {
        self.cell_size = cell_size.max(1);
        self
    }

    #[must_use]
    pub fn with_height_rule(mut self, rule: HeightRule) -> Self {
        self.height_rule = rule;
        self
    }

    #[must_use]
    pub fn with_drag_threshold(mut self, threshold: u16) -> Self {
        self.drag_threshold = threshold;
        self
    }
}

/// One rendered item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedTile {
    pub id: ItemId,
    pub kind: String,
    pub element: ElementId,
    /// Visual box: the natural placement plus the drag handle's transform.
    pub rect: PixelRect,
    pub markup: String,
    pub dragging: bool,
}

/// Output of one render pass.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SurfaceFrame {
    pub height: u32,
    pub width: u32,
    /// Mirrors the `is-dragging-active` surface flag.
    pub dragging: bool,
    pub tiles: Vec<RenderedTile>,
    /// Placeholder box, present only while dragging.
    pub placeholder: Option<PixelRect>,
}

struct GridStackInner<H> {
    host: H,
    config: GridStackConfig,
    items: Vec<GridItem>,
    metrics: SurfaceMetrics,
    registry: ItemRegistry,
    initialized: bool,
    session: DragSession,
    handles: AHashMap<ItemId, FreeDragHandle>,
    mounted: AHashSet<ItemId>,
    loads: WidgetLoadTracker,
}

impl<H: SurfaceHost> GridStackInner<H> {
    fn apply_items(&mut self, items: Vec<GridItem>) {
        let height = self
            .config
            .height_rule
            .surface_height(&items, self.config.cell_size);
        self.metrics.height = height;
        self.host.set_style(
            ElementId::Surface,
            StyleProperty::Height,
            i32::try_from(height).unwrap_or(i32::MAX),
        );

        self.handles
            .retain(|id, _| items.iter().any(|item| item.id == *id));
        for item in &items {
            self.handles
                .entry(item.id)
                .or_insert_with(|| FreeDragHandle::new(ElementId::Item(item.id)));
        }
        self.loads.retain_items(&items);
        self.items = items;

        #[cfg(feature = "tracing")]
        tracing::debug!(
            target: "gridstack.height",
            height,
            item_count = self.items.len(),
            "surface height recomputed"
        );

        if let Some(dragged) = self.session.dragged_item()
            && self.find(dragged).is_none()
        {
            self.cancel_active();
        }
    }

    fn find(&self, id: ItemId) -> Option<&GridItem> {
        self.items.iter().find(|item| item.id == id)
    }

    /// Topmost item whose natural box contains `point`. Later items draw on
    /// top of earlier ones.
    fn hit_test(&self, point: Point) -> Option<GridItem> {
        self.items
            .iter()
            .rev()
            .find(|item| item_rect(item, self.config.cell_size).contains(point))
            .cloned()
    }

    fn set_dragging_flag(&mut self) {
        let active = self.session.is_active();
        self.host
            .set_flags(ElementId::Surface, ElementFlags::DRAGGING_ACTIVE, active);
    }

    fn cancel_active(&mut self) -> Option<DragTransition> {
        let dragged = self.session.dragged_item()?;
        let handle = self
            .handles
            .get_mut(&dragged)
            .map(|handle| handle as &mut dyn DragHandle);
        let transition = self.session.force_cancel(&mut self.host, handle);
        self.set_dragging_flag();
        transition
    }

    fn end_with_own_handle(
        &mut self,
        event: &DragEvent,
        item: &GridItem,
    ) -> Result<DragTransition, DragSessionError> {
        let handle = self
            .handles
            .entry(item.id)
            .or_insert_with(|| FreeDragHandle::new(ElementId::Item(item.id)));
        let transition = self.session.end(event, item, handle, &mut self.host)?;
        self.set_dragging_flag();
        Ok(transition)
    }
}

/// Borrow the inner state, first applying an item change that arrived while
/// it was borrowed.
fn synced<'a, H: SurfaceHost>(
    inner: &'a RefCell<GridStackInner<H>>,
    stale: &Cell<bool>,
    items: &Observable<Vec<GridItem>>,
) -> RefMut<'a, GridStackInner<H>> {
    let mut guard = inner.borrow_mut();
    if stale.replace(false) {
        guard.apply_items(items.get());
    }
    guard
}

/// Drag-reorderable grid surface over a host `H`.
pub struct GridStack<H: SurfaceHost + 'static> {
    inner: Rc<RefCell<GridStackInner<H>>>,
    items: Observable<Vec<GridItem>>,
    stale: Rc<Cell<bool>>,
    recognizer: DragRecognizer,
    pointer_target: Option<ItemId>,
    _subscription: Subscription,
}

impl<H: SurfaceHost + 'static> std::fmt::Debug for GridStack<H> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("GridStack")
            .field("items", &inner.items.len())
            .field("initialized", &inner.initialized)
            .field("metrics", &inner.metrics)
            .field("drag", &inner.session.state())
            .finish_non_exhaustive()
    }
}

impl<H: SurfaceHost + 'static> GridStack<H> {
    /// Bind a surface to an item list and a host.
    ///
    /// The current list is applied immediately, so the host's surface height
    /// is correct before the first render.
    pub fn new(items: Observable<Vec<GridItem>>, host: H, config: GridStackConfig) -> Self {
        let config = config.with_cell_size(config.cell_size);
        let mut inner = GridStackInner {
            host,
            config,
            items: Vec::new(),
            metrics: SurfaceMetrics::default(),
            registry: ItemRegistry::new(),
            initialized: false,
            session: DragSession::new(),
            handles: AHashMap::new(),
            mounted: AHashSet::new(),
            loads: WidgetLoadTracker::new(),
        };
        inner.apply_items(items.get());
        let inner = Rc::new(RefCell::new(inner));
        let stale = Rc::new(Cell::new(false));

        let weak = Rc::downgrade(&inner);
        let stale_flag = Rc::clone(&stale);
        let subscription = items.subscribe(move |list: &Vec<GridItem>| {
            let Some(inner) = weak.upgrade() else {
                return;
            };
            match inner.try_borrow_mut() {
                Ok(mut inner) => inner.apply_items(list.clone()),
                // Changed from inside a render; picked up by the next call.
                Err(_) => stale_flag.set(true),
            };
        });

        Self {
            inner,
            items,
            stale,
            recognizer: DragRecognizer::new(config.drag_threshold),
            pointer_target: None,
            _subscription: subscription,
        }
    }

    fn sync(&self) -> RefMut<'_, GridStackInner<H>> {
        synced(&self.inner, &self.stale, &self.items)
    }

    /// Build the item registry from the declared item definitions.
    ///
    /// Can be called again when the declarations change; the registry is
    /// rebuilt from scratch.
    pub fn content_init(&mut self, defs: impl IntoIterator<Item = TemplateDef>) {
        let mut inner = self.sync();
        inner.registry.build(defs);
        inner.initialized = true;

        #[cfg(feature = "tracing")]
        tracing::debug!(
            template_count = inner.registry.len(),
            "grid stack item defs registered"
        );
    }

    /// Whether the registry has been built.
    #[must_use]
    pub fn is_initialized(&self) -> bool {
        self.inner.borrow().initialized
    }

    /// Template bound to an item type.
    pub fn resolve_template(&self, kind: &str) -> Result<TemplateRef, LookupError> {
        self.inner.borrow().registry.resolve(kind)
    }

    /// Re-measure the surface width after the host has laid out.
    ///
    /// Skipped when the host cannot measure.
    pub fn after_view_checked(&mut self) {
        let mut inner = self.sync();
        if let Some(rect) = inner.host.bounding_rect(ElementId::Surface)
            && rect.width != inner.metrics.width
        {
            inner.metrics.width = rect.width;
        }
    }

    /// Render every item through its template.
    pub fn render(&mut self) -> Result<SurfaceFrame, LookupError> {
        let mut guard = self.sync();
        let inner = &mut *guard;

        #[cfg(feature = "tracing")]
        let _span = tracing::debug_span!(
            "gridstack.render",
            item_count = inner.items.len(),
            dragging = inner.session.is_active()
        )
        .entered();

        let mut frame = SurfaceFrame {
            height: inner.metrics.height,
            width: inner.metrics.width,
            dragging: inner.session.is_active(),
            tiles: Vec::new(),
            placeholder: None,
        };
        if !inner.initialized {
            return Ok(frame);
        }

        let templates = inner
            .items
            .iter()
            .map(|item| inner.registry.resolve(&item.kind))
            .collect::<Result<Vec<_>, _>>();
        let templates = match templates {
            Ok(templates) => templates,
            Err(err) => {
                #[cfg(feature = "tracing")]
                tracing::error!(kind = %err.kind, "no template registered for item type");
                return Err(err);
            }
        };

        let cell_size = inner.config.cell_size;
        let dragged = inner.session.dragged_item();
        let mut mounted = AHashSet::with_capacity(inner.items.len());
        frame.tiles.reserve(inner.items.len());

        for (item, template) in inner.items.iter().zip(&templates) {
            let element = ElementId::Item(item.id);
            let natural = item_rect(item, cell_size);
            inner.host.place(element, natural);
            inner
                .host
                .set_flags(element, ElementFlags::DRAGGABLE, true);

            let (dx, dy) = inner
                .handles
                .get(&item.id)
                .map_or((0, 0), FreeDragHandle::offset);
            let dragging = dragged == Some(item.id);
            let mut ctx = TemplateContext::new(item, natural, dragging, &mut inner.loads);
            let markup = template.render(&mut ctx);

            mounted.insert(item.id);
            frame.tiles.push(RenderedTile {
                id: item.id,
                kind: item.kind.clone(),
                element,
                rect: natural.translate(dx, dy),
                markup,
                dragging,
            });
        }

        for gone in inner.mounted.difference(&mounted) {
            inner.host.unmount(ElementId::Item(*gone));
        }
        inner.mounted = mounted;

        frame.placeholder = placeholder_rect(&inner.session.placeholder(), cell_size);
        match frame.placeholder {
            Some(rect) => {
                inner.host.place(ElementId::Placeholder, rect);
                inner
                    .host
                    .set_flags(ElementId::Placeholder, ElementFlags::PLACEHOLDER, true);
            }
            None => inner.host.unmount(ElementId::Placeholder),
        }
        inner.set_dragging_flag();

        Ok(frame)
    }

    /// Drag-start callback from an item's drag handle.
    ///
    /// Fails with [`DragSessionError::UntrackedItem`] if `item` is not in the
    /// current list.
    pub fn on_drag_started(
        &mut self,
        event: &DragEvent,
        item: &GridItem,
    ) -> Result<DragTransition, DragSessionError> {
        let mut guard = self.sync();
        let inner = &mut *guard;
        if inner.find(item.id).is_none() {
            return Err(DragSessionError::UntrackedItem { requested: item.id });
        }
        let transition = inner.session.start(event, item, &mut inner.host)?;
        inner.set_dragging_flag();
        Ok(transition)
    }

    /// Drag-move callback from an item's drag handle.
    pub fn on_drag_moved(
        &mut self,
        event: &DragEvent,
        item: &GridItem,
    ) -> Result<DragTransition, DragSessionError> {
        let mut inner = self.sync();
        let cell_size = inner.config.cell_size;
        inner.session.drag_move(event, item, cell_size)
    }

    /// Drag-end callback from an item's drag handle. `handle` is reset to its
    /// natural position, as is the surface's own handle for the item.
    ///
    /// Ends any pointer gesture still tracking the drag; the rest of that
    /// press is ignored.
    pub fn on_drag_ended(
        &mut self,
        event: &DragEvent,
        item: &GridItem,
        handle: &mut dyn DragHandle,
    ) -> Result<DragTransition, DragSessionError> {
        let mut guard = synced(&self.inner, &self.stale, &self.items);
        let inner = &mut *guard;
        let transition = inner.session.end(event, item, handle, &mut inner.host)?;
        if let Some(own) = inner.handles.get_mut(&item.id) {
            own.reset();
        }
        inner.set_dragging_flag();
        self.recognizer.reset();
        self.pointer_target = None;
        Ok(transition)
    }

    /// Abort the active drag, if any.
    pub fn cancel_drag(&mut self) -> Option<DragTransition> {
        self.recognizer.reset();
        self.pointer_target = None;
        self.sync().cancel_active()
    }

    /// Feed raw pointer input. Recognized drag gestures on an item drive the
    /// drag session using the surface's own drag handles.
    ///
    /// Presses that start outside every item are ignored until released.
    pub fn handle_pointer(
        &mut self,
        event: &PointerEvent,
    ) -> Result<Option<DragTransition>, DragSessionError> {
        let Some(gesture) = self.recognizer.process(event) else {
            return Ok(None);
        };
        let mut guard = synced(&self.inner, &self.stale, &self.items);
        let inner = &mut *guard;

        match gesture {
            DragGesture::Start { origin, position } => {
                self.pointer_target = None;
                let Some(item) = inner.hit_test(origin) else {
                    return Ok(None);
                };
                let transition = inner.session.start(
                    &DragEvent::for_item(item.id, position),
                    &item,
                    &mut inner.host,
                )?;
                let (dx, dy) = position.delta_from(origin);
                if let Some(handle) = inner.handles.get_mut(&item.id) {
                    handle.move_by(dx, dy);
                }
                self.pointer_target = Some(item.id);
                inner.set_dragging_flag();
                Ok(Some(transition))
            }
            DragGesture::Move {
                position, delta, ..
            } => {
                let Some(target) = self.pointer_target else {
                    return Ok(None);
                };
                let Some(item) = inner.find(target).cloned() else {
                    self.pointer_target = None;
                    return Ok(inner.cancel_active());
                };
                let cell_size = inner.config.cell_size;
                let transition = inner.session.drag_move(
                    &DragEvent::for_item(target, position),
                    &item,
                    cell_size,
                )?;
                if let Some(handle) = inner.handles.get_mut(&target) {
                    handle.move_by(delta.0, delta.1);
                }
                Ok(Some(transition))
            }
            DragGesture::End { position, .. } => {
                let Some(target) = self.pointer_target.take() else {
                    return Ok(None);
                };
                let Some(item) = inner.find(target).cloned() else {
                    return Ok(inner.cancel_active());
                };
                inner
                    .end_with_own_handle(&DragEvent::for_item(target, position), &item)
                    .map(Some)
            }
            DragGesture::Cancel => {
                if self.pointer_target.take().is_none() {
                    return Ok(None);
                }
                Ok(inner.cancel_active())
            }
        }
    }

    /// The observable item list this surface is bound to.
    #[must_use]
    pub fn items(&self) -> &Observable<Vec<GridItem>> {
        &self.items
    }

    /// Local copy of the items as of the last change.
    #[must_use]
    pub fn current_items(&self) -> Vec<GridItem> {
        self.sync().items.clone()
    }

    #[must_use]
    pub fn config(&self) -> GridStackConfig {
        self.inner.borrow().config
    }

    #[must_use]
    pub fn metrics(&self) -> SurfaceMetrics {
        self.sync().metrics
    }

    /// Whether a drag is in progress.
    #[must_use]
    pub fn is_dragging_active(&self) -> bool {
        self.inner.borrow().session.is_active()
    }

    /// Placeholder footprint; the empty sentinel when idle.
    #[must_use]
    pub fn placeholder(&self) -> PlaceholderState {
        self.inner.borrow().session.placeholder()
    }

    #[must_use]
    pub fn drag_state(&self) -> DragSessionState {
        self.inner.borrow().session.state()
    }

    /// Cell under the pointer during a drag.
    #[must_use]
    pub fn hover_cell(&self) -> Option<Position> {
        self.inner.borrow().session.hover_cell()
    }

    /// Free-drag transform currently applied to an item's wrapper.
    #[must_use]
    pub fn handle_offset(&self, id: ItemId) -> Option<(i32, i32)> {
        self.inner.borrow().handles.get(&id).map(FreeDragHandle::offset)
    }

    #[must_use]
    pub fn is_widget_loaded(&self, id: ItemId) -> bool {
        self.inner.borrow().loads.is_loaded(id)
    }

    /// Whether every current item's widget has reported loaded.
    #[must_use]
    pub fn all_widgets_loaded(&self) -> bool {
        let inner = self.sync();
        inner.loads.all_loaded(&inner.items)
    }

    /// Borrow the host.
    #[must_use]
    pub fn host(&self) -> Ref<'_, H> {
        Ref::map(self.inner.borrow(), |inner| &inner.host)
    }

    /// Mutably borrow the host (e.g. to simulate a resize).
    #[must_use]
    pub fn host_mut(&self) -> RefMut<'_, H> {
        RefMut::map(self.inner.borrow_mut(), |inner| &mut inner.host)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::RetainedSurface;

    fn defs() -> Vec<TemplateDef> {
        vec![
            TemplateDef::new(
                "card",
                TemplateRef::from_fn(|ctx| format!("<card {}>", ctx.item().id.get())),
            ),
            TemplateDef::new(
                "chart",
                TemplateRef::from_fn(|ctx| {
                    ctx.mark_loaded();
                    format!("<chart {}>", ctx.item().id.get())
                }),
            ),
        ]
    }

    fn dashboard() -> Vec<GridItem> {
        vec![
            GridItem::new(1, "card", 0, 0, 2, 2),
            GridItem::new(2, "chart", 2, 0, 2, 3),
        ]
    }

    fn surface(items: &Observable<Vec<GridItem>>) -> GridStack<RetainedSurface> {
        let mut grid = GridStack::new(
            items.clone(),
            RetainedSurface::new(400),
            GridStackConfig::default(),
        );
        grid.content_init(defs());
        grid
    }

    #[test]
    fn height_applied_on_construction() {
        let items = Observable::new(dashboard());
        let grid = GridStack::new(items, RetainedSurface::new(400), GridStackConfig::default());
        assert_eq!(grid.metrics().height, 300);
        assert_eq!(
            grid.host().style(ElementId::Surface, StyleProperty::Height),
            Some(300)
        );
        assert!(!grid.is_initialized());
    }

    #[test]
    fn height_follows_item_changes() {
        let items = Observable::new(dashboard());
        let grid = surface(&items);
        items.update(|list| list.push(GridItem::new(3, "card", 0, 4, 1, 1)));
        assert_eq!(grid.metrics().height, 700);
        assert_eq!(
            grid.host().style(ElementId::Surface, StyleProperty::Height),
            Some(700)
        );

        items.set(Vec::new());
        assert_eq!(grid.metrics().height, 0);
    }

    #[test]
    fn render_before_init_is_empty() {
        let items = Observable::new(dashboard());
        let mut grid =
            GridStack::new(items, RetainedSurface::new(400), GridStackConfig::default());
        let frame = grid.render().unwrap();
        assert!(frame.tiles.is_empty());
        assert_eq!(frame.height, 300);
        assert!(grid.resolve_template("card").is_err());
    }

    #[test]
    fn render_places_wrappers() {
        let items = Observable::new(dashboard());
        let mut grid = surface(&items);
        let frame = grid.render().unwrap();
        assert_eq!(frame.tiles.len(), 2);
        assert_eq!(frame.tiles[0].markup, "<card 1>");
        assert_eq!(frame.tiles[1].markup, "<chart 2>");
        assert_eq!(frame.tiles[1].rect, PixelRect::new(200, 0, 200, 300));
        assert!(!frame.dragging);
        assert_eq!(frame.placeholder, None);

        let host = grid.host();
        assert_eq!(host.mounted_items(), vec![ItemId(1), ItemId(2)]);
        assert!(
            host.flags(ElementId::Item(ItemId(1)))
                .contains(ElementFlags::DRAGGABLE)
        );
    }

    #[test]
    fn removed_items_are_unmounted() {
        let items = Observable::new(dashboard());
        let mut grid = surface(&items);
        grid.render().unwrap();
        items.update(|list| list.retain(|item| item.id != ItemId(1)));
        grid.render().unwrap();
        assert_eq!(grid.host().mounted_items(), vec![ItemId(2)]);
    }

    #[test]
    fn unknown_type_fails_whole_render() {
        let items = Observable::new(dashboard());
        let mut grid = surface(&items);
        items.update(|list| list.push(GridItem::new(3, "unknown", 0, 3, 1, 1)));
        let err = grid.render().unwrap_err();
        assert_eq!(err.kind, "unknown");
        assert!(grid.host().mounted_items().is_empty());
    }

    #[test]
    fn widget_load_notifications() {
        let items = Observable::new(dashboard());
        let mut grid = surface(&items);
        grid.render().unwrap();
        assert!(grid.is_widget_loaded(ItemId(2)));
        assert!(!grid.is_widget_loaded(ItemId(1)));
        assert!(!grid.all_widgets_loaded());

        items.update(|list| list.retain(|item| item.kind == "chart"));
        assert!(grid.all_widgets_loaded());
    }

    #[test]
    fn width_measured_after_view_check() {
        let items = Observable::new(dashboard());
        let mut grid = surface(&items);
        assert_eq!(grid.metrics().width, 0);
        grid.after_view_checked();
        assert_eq!(grid.metrics().width, 400);
        grid.host_mut().set_width(640);
        grid.after_view_checked();
        assert_eq!(grid.metrics().width, 640);
    }

    #[test]
    fn headless_skips_width_measurement() {
        let items = Observable::new(dashboard());
        let mut grid = GridStack::new(
            items,
            RetainedSurface::headless(),
            GridStackConfig::default(),
        );
        grid.after_view_checked();
        assert_eq!(grid.metrics().width, 0);
        assert_eq!(grid.metrics().height, 300);
    }

    #[test]
    fn items_changed_during_render_apply_next_call() {
        let items = Observable::new(vec![GridItem::new(1, "grow", 0, 0, 1, 1)]);
        let mut grid = GridStack::new(
            items.clone(),
            RetainedSurface::new(400),
            GridStackConfig::default(),
        );
        let feed = items.clone();
        grid.content_init([TemplateDef::new(
            "grow",
            TemplateRef::from_fn(move |_| {
                feed.set(vec![GridItem::new(1, "grow", 0, 0, 1, 4)]);
                "<grow>".to_string()
            }),
        )]);

        grid.render().unwrap();
        assert_eq!(grid.metrics().height, 400);
    }

    #[test]
    fn removing_dragged_item_cancels_drag() {
        let items = Observable::new(dashboard());
        let mut grid = surface(&items);
        grid.render().unwrap();
        let chart = dashboard()[1].clone();
        grid.on_drag_started(&DragEvent::for_item(chart.id, Point::new(250, 10)), &chart)
            .unwrap();
        assert!(grid.is_dragging_active());

        items.update(|list| list.retain(|item| item.id != chart.id));
        assert!(!grid.is_dragging_active());
        assert_eq!(grid.placeholder(), PlaceholderState::EMPTY);
        assert!(
            !grid
                .host()
                .flags(ElementId::Surface)
                .contains(ElementFlags::DRAGGING_ACTIVE)
        );
    }

    #[test]
    fn tight_height_rule() {
        let items = Observable::new(vec![
            GridItem::new(1, "card", 0, 5, 1, 1),
            GridItem::new(2, "card", 0, 0, 1, 10),
        ]);
        let grid = GridStack::new(
            items,
            RetainedSurface::new(400),
            GridStackConfig::default().with_height_rule(HeightRule::Tight),
        );
        assert_eq!(grid.metrics().height, 1000);
    }

    #[test]
    fn zero_cell_size_is_raised_to_one() {
        assert_eq!(GridStackConfig::default().with_cell_size(0).cell_size, 1);
        let config: GridStackConfig =
            serde_json::from_str(r#"{"cell_size": 0}"#).expect("config json");
        assert_eq!(config.cell_size, 1);

        let raw = GridStackConfig {
            cell_size: 0,
            ..GridStackConfig::default()
        };
        let grid = GridStack::new(
            Observable::new(dashboard()),
            RetainedSurface::new(400),
            raw,
        );
        assert_eq!(grid.config().cell_size, 1);
        assert_eq!(grid.metrics().height, 3);
    }

    #[test]
    fn config_loads_partial_json() {
        let config: GridStackConfig =
            serde_json::from_str(r#"{"cell_size": 80}"#).expect("config json");
        assert_eq!(config, GridStackConfig::default().with_cell_size(80));
        let json = serde_json::to_value(GridStackConfig::default()).expect("serialize");
        assert_eq!(
            json,
            serde_json::json!({"cell_size": 100, "height_rule": "observed", "drag_threshold": 3})
        );
    }
}
