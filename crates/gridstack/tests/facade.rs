#![forbid(unsafe_code)]

use gridstack::prelude::*;
use gridstack::{DragSessionError, GridItemError, validate_items};

fn surface(items: Vec<GridItem>) -> GridStack<RetainedSurface> {
    let mut grid = GridStack::new(
        Observable::new(items),
        RetainedSurface::new(400),
        GridStackConfig::default(),
    );
    grid.content_init([TemplateDef::new(
        "card",
        TemplateRef::from_fn(|ctx| format!("<card {}>", ctx.item().id)),
    )]);
    grid
}

fn render_all(grid: &mut GridStack<RetainedSurface>) -> Result<Vec<String>> {
    let frame = grid.render()?;
    Ok(frame.tiles.into_iter().map(|tile| tile.markup).collect())
}

#[test]
fn lookup_errors_convert() {
    let mut grid = surface(vec![
        GridItem::new(1, "card", 0, 0, 1, 1),
        GridItem::new(2, "map", 1, 0, 1, 1),
    ]);
    let err = render_all(&mut grid).unwrap_err();
    assert!(matches!(&err, Error::Lookup(lookup) if lookup.kind == "map"));
    assert_eq!(err.to_string(), "invalid type \"map\" for grid stack item def");
    assert!(std::error::Error::source(&err).is_some());
}

#[test]
fn drag_errors_convert() {
    let mut grid = surface(vec![GridItem::new(1, "card", 0, 0, 1, 1)]);
    let item = grid.current_items()[0].clone();
    let mut handle = FreeDragHandle::new(gridstack::ElementId::Item(item.id));

    let result: Result<_> = grid
        .on_drag_ended(&DragEvent::for_item(item.id, Default::default()), &item, &mut handle)
        .map_err(Error::from);
    assert_eq!(
        result.unwrap_err(),
        Error::Drag(DragSessionError::NotDragging { requested: item.id })
    );
}

#[test]
fn item_errors_convert() {
    let items = vec![
        GridItem::new(1, "card", 0, 0, 1, 1),
        GridItem::new(1, "card", 1, 0, 1, 1),
    ];
    let err: Error = validate_items(&items).unwrap_err().into();
    assert_eq!(err, Error::Item(GridItemError::DuplicateId { id: ItemId(1) }));
}

#[test]
fn renders_through_prelude() {
    let mut grid = surface(vec![GridItem::new(9, "card", 0, 0, 1, 1)]);
    assert_eq!(render_all(&mut grid).expect("render"), vec!["<card item:9>"]);
}

#[test]
fn items_load_from_json() {
    let items: Vec<GridItem> = serde_json::from_str(
        r#"[{"id":1,"type":"card","x":0,"y":0,"w":2,"h":2},
            {"id":2,"type":"chart","x":2,"y":0,"w":2,"h":3}]"#,
    )
    .expect("item json");
    assert_eq!(gridstack::compute_surface_height(&items, 100), 300);
    assert_eq!(items[1].kind, "chart");
}
