//! End-to-end gesture sessions against [`GridInteraction`] and
//! [`ResponsiveGrid`].
//!
//! Each test plays a realistic event stream (pointer deltas, handle sizes,
//! external drops, width changes) and checks the layout, the reported
//! changes and the rendered styles after every step. The grid used
//! throughout has four 60px columns with 5px gutters and padding.
//!
//! Run with: `cargo test -p tessera-layout --test interaction_sessions`

use serde_json::json;
use tessera_layout::{
    Breakpoint, Breakpoints, ChildSpec, CompactionMode, Extent, GridConfig, GridInteraction,
    InteractionError, ItemConfig, ItemPosition, ItemStyle, Layout, LayoutItem, Phase, PixelBox,
    PixelPoint, PixelSize, ResponsiveGrid, SyncOptions, find_item, validate_value,
};

fn config() -> GridConfig {
    GridConfig::default()
        .with_cols(4)
        .with_container_width(265.0)
        .with_row_height(60.0)
}

fn dashboard() -> Layout {
    vec![
        LayoutItem::new("a", 0, 0, 2, 1),
        LayoutItem::new("b", 0, 1, 2, 1),
        LayoutItem::new("c", 2, 0, 2, 2),
    ]
}

fn rect(layout: &[LayoutItem], id: &str) -> (u32, u32, u32, u32) {
    let item = find_item(layout, id).expect("item present");
    (item.x, item.y, item.w, item.h)
}

#[test]
fn drag_resize_and_drop_session() {
    let mut grid = GridInteraction::new(config().with_droppable(true), dashboard());
    grid.set_mounted(true);
    assert_eq!(rect(grid.layout(), "b"), (0, 1, 2, 1));

    // Drag `b` one row up; `a` is pushed beneath it.
    assert_eq!(grid.drag_start("b", PixelPoint::new(5.0, 70.0)), Ok((0, 1)));
    assert!(grid.is_active());
    assert_eq!(grid.drag("b", 0.0, -65.0), Ok((0, 0)));
    assert_eq!(rect(grid.layout(), "b"), (0, 0, 2, 1));
    assert_eq!(rect(grid.layout(), "a"), (0, 1, 2, 1));
    let placeholder = grid.placeholder_style().expect("placeholder while dragging");
    assert_eq!(
        placeholder,
        ItemStyle::Transform {
            bounds: PixelBox::new(5.0, 5.0, 125.0, 60.0)
        }
    );

    let change = grid.drag_stop("b").unwrap().expect("layout changed");
    assert_eq!(rect(&change.previous, "b"), (0, 1, 2, 1));
    assert_eq!(rect(&change.layout, "b"), (0, 0, 2, 1));
    assert!(!grid.is_active());

    // Shrink `c` to a single row.
    grid.resize_start("c").unwrap();
    assert_eq!(grid.resize("c", PixelSize::new(125.0, 60.0)), Ok((2, 1)));
    let change = grid.resize_stop("c").unwrap().expect("layout changed");
    assert_eq!(rect(&change.layout, "c"), (2, 0, 2, 1));
    assert_eq!(grid.container_height(), 2.0 * 60.0 + 5.0 + 10.0);

    let style = grid.item_style("c").unwrap();
    assert_eq!(
        style.to_inline(),
        "transform:translate(135px,5px);-webkit-transform:translate(135px,5px);\
         -ms-transform:translate(135px,5px);-o-transform:translate(135px,5px);\
         width:125px;height:60px;position:absolute;"
    );

    // Drop an external item into the gap under `c`.
    grid.drag_enter();
    assert_eq!(grid.drop_over(PixelPoint::new(135.0, 70.0)), Ok((2, 1)));
    assert_eq!(grid.layout().len(), 4);
    let dropped = grid.drop().expect("dropping item present");
    assert_eq!(dropped, ItemPosition { x: 2, y: 1, w: 1, h: 1 });
    assert_eq!(grid.layout().len(), 3);

    // The caller adds the dropped child at the reported position.
    let children = [
        ChildSpec::new("a"),
        ChildSpec::new("b"),
        ChildSpec::new("c"),
        ChildSpec::new("d").with_config(ItemConfig::at(dropped.x, dropped.y, dropped.w, dropped.h)),
    ];
    let change = grid
        .sync_children(&children, SyncOptions::strict())
        .unwrap()
        .expect("new child reported");
    assert_eq!(change.previous.len(), 3);
    assert_eq!(rect(grid.layout(), "d"), (2, 1, 1, 1));
}

#[test]
fn out_of_order_events_are_rejected() {
    let mut grid = GridInteraction::new(config(), dashboard());

    assert_eq!(
        grid.drag("a", 10.0, 10.0),
        Err(InteractionError::NotStarted {
            id: "a".to_owned(),
            phase: Phase::Drag
        })
    );
    grid.resize_start("a").unwrap();
    assert_eq!(
        grid.drag_stop("a"),
        Err(InteractionError::NotStarted {
            id: "a".to_owned(),
            phase: Phase::DragStop
        })
    );
    assert_eq!(
        grid.resize_start("zz"),
        Err(InteractionError::UnknownItem { id: "zz".to_owned() })
    );
    assert_eq!(grid.layout(), dashboard().as_slice());
}

#[test]
fn locked_grid_refuses_gestures() {
    let mut grid = GridInteraction::new(
        config().with_draggable(false).with_resizable(false),
        dashboard(),
    );
    assert_eq!(
        grid.drag_start("a", PixelPoint::default()),
        Err(InteractionError::NotDraggable { id: "a".to_owned() })
    );
    assert_eq!(
        grid.resize_start("a"),
        Err(InteractionError::NotResizable { id: "a".to_owned() })
    );
    assert!(!grid.is_active());
}

#[test]
fn unmounted_grid_renders_percentages() {
    let grid = GridInteraction::new(config(), dashboard());
    let ItemStyle::Percent { left, width, top, height } = grid.item_style("c").unwrap() else {
        panic!("expected percent style before mount");
    };
    assert_eq!(left, 135.0 / 265.0);
    assert_eq!(width, Extent::Finite(125.0 / 265.0));
    assert_eq!(top, 5.0);
    assert_eq!(height, Extent::Finite(125.0));
}

#[test]
fn json_layout_is_validated_then_loaded() {
    let raw = json!([
        { "i": "a", "x": 0, "y": 3, "w": 2, "h": 1 },
        { "i": "s", "x": 0, "y": 0, "w": 4, "h": 1, "static": true }
    ]);
    validate_value(&raw, "layout").unwrap();
    let layout: Layout = serde_json::from_value(raw).unwrap();

    let grid = GridInteraction::new(config(), layout);
    assert_eq!(rect(grid.layout(), "s"), (0, 0, 4, 1));
    assert_eq!(rect(grid.layout(), "a"), (0, 1, 2, 1));

    let broken = json!([{ "i": "a", "x": "0", "y": 0, "w": 1, "h": 1 }]);
    assert!(validate_value(&broken, "layout").is_err());
}

#[test]
fn responsive_grid_regenerates_and_remembers_layouts() {
    let wide = vec![
        LayoutItem::new("a", 0, 0, 8, 2),
        LayoutItem::new("b", 8, 0, 4, 2),
        LayoutItem::new("c", 0, 2, 12, 1),
    ];
    let mut grid = ResponsiveGrid::new(
        Breakpoints::default_widths(),
        Breakpoints::default_columns(),
        Breakpoints::new().at(Breakpoint::Lg, wide.clone()),
        CompactionMode::Vertical,
        1300.0,
    )
    .unwrap();
    assert_eq!(grid.breakpoint(), Breakpoint::Lg);
    assert_eq!(grid.layout(), wide.as_slice());
    assert_eq!(grid.on_width_change(1250.0), Ok(None));

    let change = grid.on_width_change(800.0).unwrap().expect("crossed into sm");
    assert_eq!((change.from, change.to, change.cols), (Breakpoint::Lg, Breakpoint::Sm, 6));
    assert_eq!(rect(&change.layout, "a"), (0, 0, 6, 2));
    assert_eq!(rect(&change.layout, "b"), (2, 2, 4, 2));
    assert_eq!(rect(&change.layout, "c"), (0, 4, 6, 1));

    let mut edited = change.layout.clone();
    edited[2].y = 9;
    grid.set_layout(edited.clone());

    let back = grid.on_width_change(1300.0).unwrap().expect("back to lg");
    assert_eq!(back.layout, wide);
    let again = grid.on_width_change(800.0).unwrap().expect("sm again");
    assert_eq!(again.layout, edited);
}
