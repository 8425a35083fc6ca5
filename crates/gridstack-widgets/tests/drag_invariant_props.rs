#![forbid(unsafe_code)]

//! Property tests for the drag session and item registry.
//!
//! Under any interleaving of drag callbacks, pointer input, renders and
//! item-list refreshes:
//! 1. a drag is active exactly when the placeholder is non-empty,
//! 2. the surface's dragging flag mirrors the session,
//! 3. no pinned overrides survive once the session is idle,
//! 4. rejected input leaves the session untouched,
//! 5. items are never mutated by the surface.
//!
//! Run:
//!   cargo test -p gridstack-widgets --test drag_invariant_props

use std::collections::BTreeMap;

use gridstack_core::event::PointerEvent;
use gridstack_layout::{GridItem, Point};
use gridstack_runtime::Observable;
use gridstack_widgets::{
    DragEvent, ElementFlags, ElementId, FreeDragHandle, GridStack, GridStackConfig, ItemRegistry,
    RetainedSurface, StyleProperty, TemplateDef, TemplateRef,
};
use proptest::prelude::*;

fn layout() -> Vec<GridItem> {
    vec![
        GridItem::new(1, "card", 0, 0, 2, 2),
        GridItem::new(2, "chart", 2, 0, 2, 3),
        GridItem::new(3, "card", 0, 2, 1, 1),
        GridItem::new(4, "chart", 1, 2, 1, 2),
    ]
}

#[derive(Debug, Clone)]
enum Op {
    Start(usize),
    Move(usize, i32, i32),
    End(usize),
    Cancel,
    Down(i32, i32),
    PointerMove(i32, i32),
    Up(i32, i32),
    FocusLost,
    Render,
    Refresh,
}

fn arb_op() -> impl Strategy<Value = Op> {
    let idx = 0usize..4;
    let px = -50i32..500;
    prop_oneof![
        idx.clone().prop_map(Op::Start),
        (idx.clone(), px.clone(), px.clone()).prop_map(|(i, x, y)| Op::Move(i, x, y)),
        idx.prop_map(Op::End),
        Just(Op::Cancel),
        (px.clone(), px.clone()).prop_map(|(x, y)| Op::Down(x, y)),
        (px.clone(), px.clone()).prop_map(|(x, y)| Op::PointerMove(x, y)),
        (px.clone(), px).prop_map(|(x, y)| Op::Up(x, y)),
        Just(Op::FocusLost),
        Just(Op::Render),
        Just(Op::Refresh),
    ]
}

fn surface(items: &Observable<Vec<GridItem>>) -> GridStack<RetainedSurface> {
    let mut grid = GridStack::new(
        items.clone(),
        RetainedSurface::new(400),
        GridStackConfig::default(),
    );
    grid.content_init([
        TemplateDef::new("card", TemplateRef::from_fn(|_| "<card>".to_string())),
        TemplateDef::new("chart", TemplateRef::from_fn(|_| "<chart>".to_string())),
    ]);
    grid
}

fn apply(
    grid: &mut GridStack<RetainedSurface>,
    items: &Observable<Vec<GridItem>>,
    op: &Op,
) -> bool {
    let list = layout();
    let ok = |r: Result<_, _>| r.is_ok();
    match *op {
        Op::Start(i) => ok(grid
            .on_drag_started(&DragEvent::for_item(list[i].id, Point::new(5, 5)), &list[i])
            .map(|_| ())),
        Op::Move(i, x, y) => ok(grid
            .on_drag_moved(&DragEvent::for_item(list[i].id, Point::new(x, y)), &list[i])
            .map(|_| ())),
        Op::End(i) => {
            let mut handle = FreeDragHandle::new(ElementId::Item(list[i].id));
            handle.move_by(7, 7);
            let result = grid.on_drag_ended(
                &DragEvent::for_item(list[i].id, Point::new(5, 5)),
                &list[i],
                &mut handle,
            );
            if result.is_ok() {
                assert_eq!(handle.offset(), (0, 0));
            }
            ok(result.map(|_| ()))
        }
        Op::Cancel => {
            grid.cancel_drag();
            true
        }
        Op::Down(x, y) => ok(grid.handle_pointer(&PointerEvent::down(x, y)).map(|_| ())),
        Op::PointerMove(x, y) => ok(grid.handle_pointer(&PointerEvent::moved(x, y)).map(|_| ())),
        Op::Up(x, y) => ok(grid.handle_pointer(&PointerEvent::up(x, y)).map(|_| ())),
        Op::FocusLost => ok(grid.handle_pointer(&PointerEvent::FocusLost).map(|_| ())),
        Op::Render => {
            grid.render().expect("every type is registered");
            true
        }
        Op::Refresh => {
            items.set(layout());
            true
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(96))]

    #[test]
    fn drag_session_invariants_hold(ops in prop::collection::vec(arb_op(), 1..48)) {
        let items = Observable::new(layout());
        let mut grid = surface(&items);

        for op in &ops {
            let before = grid.drag_state();
            let accepted = apply(&mut grid, &items, op);
            if !accepted {
                prop_assert_eq!(grid.drag_state(), before, "rejected {:?} changed state", op);
            }

            let active = grid.is_dragging_active();
            prop_assert_eq!(active, !grid.placeholder().is_empty());
            let flag = grid
                .host()
                .flags(ElementId::Surface)
                .contains(ElementFlags::DRAGGING_ACTIVE);
            prop_assert_eq!(flag, active);

            if !active {
                let host = grid.host();
                for item in layout() {
                    let element = ElementId::Item(item.id);
                    prop_assert_eq!(host.style(element, StyleProperty::MaxWidth), None);
                    prop_assert_eq!(host.style(element, StyleProperty::Top), None);
                    prop_assert_eq!(host.style(element, StyleProperty::Left), None);
                }
            }
            prop_assert_eq!(grid.current_items(), layout());
            prop_assert_eq!(grid.metrics().height, 500);
        }
    }

    #[test]
    fn start_then_end_restores_idle(idx in 0usize..4, x in 0i32..400, y in 0i32..400) {
        let items = Observable::new(layout());
        let mut grid = surface(&items);
        grid.render().expect("render");
        let item = layout()[idx].clone();
        let event = DragEvent::for_item(item.id, Point::new(x, y));
        let mut handle = FreeDragHandle::new(event.source);
        handle.move_by(x, y);

        grid.on_drag_started(&event, &item).expect("start");
        grid.on_drag_ended(&event, &item, &mut handle).expect("end");

        prop_assert!(!grid.is_dragging_active());
        prop_assert!(grid.placeholder().is_empty());
        prop_assert_eq!(handle.offset(), (0, 0));
        let original = layout();
        prop_assert_eq!(&item, &original[idx]);
    }

    #[test]
    fn registry_resolves_exactly_what_was_registered(
        kinds in prop::collection::btree_set("[a-z]{1,8}", 1..12),
        unknown in "[a-z]{1,8}",
    ) {
        let bound: BTreeMap<String, TemplateRef> = kinds
            .iter()
            .map(|kind| {
                let tag = kind.clone();
                (kind.clone(), TemplateRef::from_fn(move |_| tag.clone()))
            })
            .collect();
        let mut registry = ItemRegistry::new();
        registry.build(
            bound
                .iter()
                .map(|(kind, template)| TemplateDef::new(kind.clone(), template.clone())),
        );

        prop_assert_eq!(registry.len(), bound.len());
        for (kind, template) in &bound {
            let resolved = registry.resolve(kind);
            prop_assert_eq!(resolved.as_ref(), Ok(template));
        }
        if !bound.contains_key(&unknown) {
            let err = registry.resolve(&unknown).unwrap_err();
            prop_assert_eq!(err.kind, unknown);
        }
    }
}
