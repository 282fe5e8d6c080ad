//! End-to-end scenarios for the dock and drawer
//!
//! These drive the widgets the way a host frame loop would and check the
//! painted views, not internal state.

use std::time::Duration;

use navkit_animation::DrawerState;
use navkit_core::{PointerEvent, Rect};
use navkit_widgets::{
    DockConfig, DockItem, DockPanel, DrawerConfig, DrawerElement, DrawerView, MenuEntry,
    NavTheme, StaggeredDrawer, EMPTY_PLACEHOLDER,
};

const FRAME: Duration = Duration::from_millis(10);

fn frames(drawer: &mut StaggeredDrawer, ms: u32) -> DrawerView {
    let mut view = drawer.view();
    for _ in 0..ms / 10 {
        view = drawer.frame(FRAME);
    }
    view
}

fn menu() -> Vec<MenuEntry> {
    vec![
        MenuEntry::new("Home", "/customer"),
        MenuEntry::new("Discounts", "/customer/discounts").aria_label("Open discounts"),
        MenuEntry::new("History", "/customer/history"),
    ]
}

fn mounted_drawer() -> StaggeredDrawer {
    let mut drawer = StaggeredDrawer::new(DrawerConfig::default(), NavTheme::default()).unwrap();
    drawer.set_entries(menu());
    drawer.mount();
    drawer
}

/// Pointer on, at, and beyond the falloff distance
#[test]
fn magnification_clamps_to_base_beyond_falloff() {
    let mut dock = DockPanel::new(DockConfig::default()).unwrap();
    dock.set_items(vec![DockItem::new("Home")]);
    dock.set_layout("Home", Rect::new(475.0, 0.0, 50.0, 50.0)).unwrap();

    for (pointer, expected) in [(500.0, 70.0), (700.0, 50.0), (900.0, 50.0), (100.0, 50.0)] {
        dock.handle_pointer(PointerEvent::Move { x: pointer, y: 0.0 });
        for _ in 0..120 {
            dock.frame(Duration::from_millis(16));
        }
        let state = dock.animation_state("Home").unwrap();
        assert_eq!(state.target_magnitude, expected, "pointer at {pointer}");
        assert_eq!(state.rendered_magnitude, expected, "pointer at {pointer}");
    }
}

/// Every slot reads the same pointer sample in a frame
#[test]
fn symmetric_items_magnify_identically() {
    let mut dock = DockPanel::new(DockConfig::default()).unwrap();
    dock.set_items(vec![
        DockItem::new("Left"),
        DockItem::new("Middle"),
        DockItem::new("Right"),
    ]);
    dock.set_layout("Left", Rect::new(0.0, 0.0, 50.0, 50.0)).unwrap();
    dock.set_layout("Middle", Rect::new(60.0, 0.0, 50.0, 50.0)).unwrap();
    dock.set_layout("Right", Rect::new(120.0, 0.0, 50.0, 50.0)).unwrap();

    let pointer = dock.pointer();
    for x in [85.0, 85.0, 85.0] {
        pointer.set(x);
        let view = dock.frame(Duration::from_millis(16));
        assert_eq!(view.items[0].size, view.items[2].size);
        assert!(view.items[1].size > view.items[0].size);
    }
}

#[test]
fn exactly_one_dock_item_matches_route() {
    let mut dock = DockPanel::new(DockConfig::default()).unwrap();
    dock.set_items(vec![
        DockItem::new("Home").route("/customer"),
        DockItem::new("Discounts").route("/customer/discounts"),
        DockItem::new("History").route("/customer/history"),
    ]);

    dock.set_current_route(Some("/customer/discounts"));
    let view = dock.view();
    assert_eq!(view.active(), Some(1));
    assert_eq!(view.items.iter().filter(|item| item.active).count(), 1);
    assert_eq!(view.items[1].label, "Discounts");

    dock.set_current_route(Some("/settings"));
    assert_eq!(dock.view().active(), None);
}

#[test]
fn exactly_one_menu_entry_matches_route() {
    let mut drawer = mounted_drawer();
    drawer.set_current_route(Some("/customer/discounts"));
    let view = drawer.view();
    let active: Vec<&str> = view
        .items
        .iter()
        .filter(|item| item.active)
        .map(|item| item.label.as_str())
        .collect();
    assert_eq!(active, vec!["Discounts"]);
    assert_eq!(view.items[1].aria_label, "Open discounts");
}

/// `false -> true -> false` inside the opening animation
#[test]
fn close_during_open_ends_fully_closed_and_reset() {
    let mut drawer = mounted_drawer();
    let initial = drawer.view();

    drawer.set_open(true);
    frames(&mut drawer, 300);
    assert_eq!(drawer.state(), DrawerState::Opening);
    let mid = drawer.transform(DrawerElement::Label(0)).unwrap();
    assert!(mid.y_percent < 140.0, "first label should be mid-reveal");

    drawer.set_open(false);
    assert_eq!(drawer.state(), DrawerState::Closing);
    let view = frames(&mut drawer, 1000);

    assert_eq!(view.state, DrawerState::Closed);
    assert_eq!(view.panel, initial.panel);
    assert_eq!(view.layers, initial.layers);
    assert_eq!(view.items, initial.items);
}

/// `false -> true`, left open
#[test]
fn uninterrupted_open_reaches_final_transforms() {
    let mut drawer = mounted_drawer();
    drawer.set_open(true);
    let view = frames(&mut drawer, 3000);

    assert_eq!(view.state, DrawerState::Open);
    assert_eq!(view.panel.x_percent, 0.0);
    assert!(view.layers.iter().all(|layer| layer.transform.x_percent == 0.0));
    for item in &view.items {
        assert_eq!(item.transform.y_percent, 0.0);
        assert_eq!(item.transform.rotate, 0.0);
    }
}

/// Open, close before completion, open again: same end state as one open
#[test]
fn interrupted_open_matches_clean_open() {
    let mut clean = mounted_drawer();
    clean.set_open(true);
    let expected = frames(&mut clean, 3000);

    let mut drawer = mounted_drawer();
    let first = drawer.set_open(true).unwrap();
    frames(&mut drawer, 200);
    let second = drawer.set_open(false).unwrap();
    frames(&mut drawer, 50);
    let panel_before = drawer.transform(DrawerElement::Panel).unwrap();
    let third = drawer.set_open(true).unwrap();

    // no jump when the reverse is replaced
    assert_eq!(drawer.transform(DrawerElement::Panel).unwrap(), panel_before);
    assert!(first.generation() < second.generation());
    assert!(second.generation() < third.generation());
    assert_eq!(drawer.live_token(), Some(third));

    let view = frames(&mut drawer, 3000);
    assert_eq!(view, expected);
}

/// Reset holds after a close reached via interruption and restart
#[test]
fn close_after_restart_resets_labels() {
    let mut drawer = mounted_drawer();
    let initial = drawer.view();

    drawer.set_open(true);
    frames(&mut drawer, 400);
    drawer.set_open(false);
    frames(&mut drawer, 100);
    drawer.set_open(true);
    frames(&mut drawer, 500);
    drawer.set_open(false);
    let view = frames(&mut drawer, 1000);

    assert_eq!(view.state, DrawerState::Closed);
    assert_eq!(view.items, initial.items);
    assert_eq!(view.panel, initial.panel);
}

#[test]
fn repeated_requests_in_terminal_state_change_nothing() {
    let mut drawer = mounted_drawer();
    for _ in 0..3 {
        assert_eq!(drawer.set_open(false), None);
    }
    assert_eq!(drawer.tokens_issued(), 0);

    drawer.set_open(true);
    let open = frames(&mut drawer, 3000);
    for _ in 0..3 {
        assert_eq!(drawer.set_open(true), None);
    }
    assert_eq!(drawer.tokens_issued(), 1);
    assert_eq!(frames(&mut drawer, 100), open);
}

#[test]
fn rapid_toggling_never_sticks() {
    let mut drawer = mounted_drawer();
    for i in 0..25 {
        drawer.toggle();
        frames(&mut drawer, 10 + (i % 4) * 20);
    }
    // 25 toggles leave the input open
    let view = frames(&mut drawer, 3000);
    assert_eq!(view.state, DrawerState::Open);
    assert_eq!(view.panel.x_percent, 0.0);
    assert!(view.items.iter().all(|item| item.transform.y_percent == 0.0));
}

#[test]
fn empty_lists_render_safely() {
    let mut dock = DockPanel::new(DockConfig::default()).unwrap();
    dock.set_items(Vec::new());
    dock.handle_pointer(PointerEvent::Move { x: 10.0, y: 10.0 });
    assert!(dock.frame(Duration::from_millis(16)).is_empty());

    let mut drawer = StaggeredDrawer::new(DrawerConfig::default(), NavTheme::default()).unwrap();
    drawer.mount();
    let view = drawer.view();
    assert!(view.items.is_empty());
    assert_eq!(view.placeholder, Some(EMPTY_PLACEHOLDER));
}
