//! End-to-end container scenarios
//!
//! A three-pane workspace goes through a drag, a border resize, a vetoed
//! close and a real close, checking the tree, active tabs and content hosts
//! after each step.

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;

use tiledock_core::layout::{find, parent_tab_group};
use tiledock_core::{
    ContainerKind, DataTransfer, DropOutcome, ItemId, LayoutContainer, LayoutNode, NodeRef,
    Point, Rect, Renderers, SplitDirection,
};

const WORKSPACE: &str = r#"{"id":"root","direction":"row","items":[
    {"id":"g1","type":"doc","tabs":[{"id":"a","type":"doc"},{"id":"b","type":"doc"}]},
    {"id":"right","direction":"column","items":[
        {"id":"g2","type":"doc","tabs":[{"id":"c","type":"term"}]},
        {"id":"t","type":"preview"}
    ]}
]}"#;

fn id(value: &str) -> ItemId {
    ItemId::from(value)
}

fn workspace() -> NodeRef {
    Arc::new(serde_json::from_str::<LayoutNode>(WORKSPACE).unwrap())
}

fn bodies() -> Renderers<&'static str> {
    Renderers::new()
        .with("doc", "DocBody")
        .with("term", "TermBody")
        .with("preview", "Preview")
}

fn labels() -> Renderers<&'static str> {
    Renderers::new().with("doc", "DocLabel").with("term", "TermLabel")
}

#[test]
fn test_workspace_session() {
    let vetoed = Rc::new(RefCell::new(Vec::new()));
    let veto_log = Rc::clone(&vetoed);
    let changes = Rc::new(RefCell::new(0usize));
    let change_count = Rc::clone(&changes);

    let mut container = LayoutContainer::new(Some(workspace()), bodies(), labels())
        .unwrap()
        .on_layout_change(move |_| *change_count.borrow_mut() += 1)
        .confirm_close(move |tab| {
            veto_log.borrow_mut().push(tab.clone());
            false
        });

    // Initial mount: a/b/c each get a label and a body, t a body.
    let plan = container.content_host_plan();
    assert_eq!(plan.mount.len(), 7);
    assert!(plan.unmount.is_empty());
    assert!(container.content_host_plan().is_empty());
    assert!(container.update_tab("doc", &id("b")));

    // Make "b" active, then drag it onto the right edge of g2.
    assert!(container.set_active_tab(&id("g1"), 1));
    let tab = container.register_tab(id("b"), id("g1"), 1);
    let body = container.register_body(id("g2"), Rect::new(400.0, 0.0, 400.0, 300.0));

    let mut transfer = DataTransfer::new();
    container.drag_start(&tab.draggable.draggable_id, &mut transfer).unwrap();
    assert!(container.is_dragging());
    assert!(container.drag_enter(&body.dropzone_id));
    let hover = Point::new(790.0, 150.0);
    assert_eq!(
        container.drag_over(&body.dropzone_id, hover),
        Some(tiledock_core::DropRegion::Right)
    );
    let outcome = container.handle_drop(&body.dropzone_id, &transfer, hover).unwrap();
    container.drag_end(&tab.draggable.draggable_id);
    assert_eq!(outcome, DropOutcome::Moved(id("b")));
    assert!(!container.is_dragging());
    assert_eq!(*changes.borrow(), 1);

    let layout = container.layout().unwrap().clone();
    assert_eq!(layout.weight(), Some(1.0));
    let wrapper = parent_tab_group(&layout, &id("b")).unwrap().id.clone();
    assert_ne!(wrapper, id("g2"));
    let LayoutNode::SplitGroup(right) = find(&layout, &id("right")).unwrap().as_ref() else {
        panic!("right column should still be a split group");
    };
    let LayoutNode::SplitGroup(split) = right.items[0].as_ref() else {
        panic!("g2 should have been split");
    };
    assert_eq!(split.direction, SplitDirection::Row);
    assert_eq!(split.items[0].id(), &id("g2"));
    assert_eq!(split.items[1].id(), &wrapper);

    // g1 lost its active tab and is clamped; focus follows on the next tick.
    assert_eq!(container.active_tab_index(&id("g1")), Some(0));
    assert_eq!(container.pending_focus().collect::<Vec<_>>(), vec![&id("b")]);
    assert_eq!(container.tick(), 1);
    assert_eq!(container.active_tab_index(&wrapper), Some(0));

    // Tab "b" kept its hosts; nothing to mount or unmount.
    assert!(container.content_host_plan().is_empty());

    // Widen g1 by dragging the root border 50px to the right.
    container.set_region_bounds(id("g1"), Rect::new(0.0, 0.0, 400.0, 300.0));
    container.set_region_bounds(id("right"), Rect::new(400.0, 0.0, 400.0, 300.0));
    container
        .begin_border_resize(&id("root"), 0, Point::new(400.0, 150.0))
        .unwrap();
    assert_eq!(container.resize_cursor(), Some("ew-resize"));
    container.move_border_resize(Point::new(450.0, 150.0));
    assert_eq!(container.pending_weights(&id("root"), 0), Some((450.0, 350.0)));
    container.end_border_resize().unwrap();
    assert_eq!(container.resize_cursor(), None);

    let layout = container.layout().unwrap().clone();
    assert_eq!(find(&layout, &id("g1")).unwrap().weight(), Some(450.0));
    assert_eq!(find(&layout, &id("right")).unwrap().weight(), Some(350.0));

    // Closing the dirty, only instance of "c" asks first; the hook says no.
    assert!(!container.request_close_tab(&id("c"), true).unwrap());
    assert_eq!(*vetoed.borrow(), vec![id("c")]);
    assert!(find(container.layout().unwrap(), &id("g2")).is_some());

    // A clean close goes through and collapses the split around g2.
    assert!(container.request_close_tab(&id("c"), false).unwrap());
    assert_eq!(vetoed.borrow().len(), 1);
    let layout = container.layout().unwrap().clone();
    assert!(find(&layout, &id("g2")).is_none());
    let LayoutNode::SplitGroup(right) = find(&layout, &id("right")).unwrap().as_ref() else {
        panic!("right column should still be a split group");
    };
    assert_eq!(right.items[0].id(), &wrapper);
    assert_eq!(container.active_tab_index(&id("g2")), None);

    let plan = container.content_host_plan();
    assert!(plan.mount.is_empty());
    assert_eq!(plan.unmount.len(), 2);
    assert!(plan.unmount.iter().all(|host| host.id == id("c")));
    assert!(plan.unmount.iter().any(|host| host.container == ContainerKind::Tab));
}

#[test]
fn test_double_click_appends_and_focuses() {
    let mut counter = 0;
    let mut container = LayoutContainer::new(Some(workspace()), bodies(), labels())
        .unwrap()
        .on_double_click_tab_strip(move |_group| {
            counter += 1;
            Some(tiledock_core::TabRef::new(format!("new-{counter}"), "term"))
        });

    let appended = container.double_click_tab_strip(&id("g1")).unwrap();
    assert_eq!(appended, Some(id("new-1")));
    let layout = container.layout().unwrap().clone();
    let group = parent_tab_group(&layout, &id("new-1")).unwrap();
    assert_eq!(group.id, id("g1"));
    assert_eq!(group.tabs.len(), 3);

    assert_eq!(container.tick(), 1);
    assert_eq!(container.active_tab_index(&id("g1")), Some(2));

    let plan = container.content_host_plan();
    assert!(plan.mount.iter().any(|host| host.id == id("new-1")));
}

#[test]
fn test_drop_with_foreign_payload_ends_gesture() {
    let mut container = LayoutContainer::new(Some(workspace()), bodies(), labels()).unwrap();
    let tab = container.register_tab(id("a"), id("g1"), 0);
    let strip = container.register_tab_strip(id("g2"));

    let mut transfer = DataTransfer::new();
    container.drag_start(&tab.draggable.draggable_id, &mut transfer).unwrap();
    let foreign = DataTransfer::new();
    assert!(
        container
            .handle_drop(&strip.dropzone.dropzone_id, &foreign, Point::default())
            .is_err()
    );
    assert!(!container.is_dragging());
    assert_eq!(container.layout().map(|layout| layout.as_ref()), Some(workspace().as_ref()));
}
