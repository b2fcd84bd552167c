use super::*;
use crate::util::split::{MAX_LEFT_PCT, MIN_LEFT_PCT};

// =============================================================
// LayoutState defaults
// =============================================================

#[test]
fn layout_state_default_split() {
    let state = LayoutState::default();
    assert_eq!(state.left_pct, DEFAULT_LEFT_PCT);
    assert!(!state.resizing);
    assert_eq!(state.left_style(), "width: 35.00%;");
}

// =============================================================
// Dragging
// =============================================================

#[test]
fn drag_is_ignored_unless_resizing() {
    let mut state = LayoutState::default();
    assert!(!state.drag_to(600.0, 0.0, 1000.0));
    assert_eq!(state.left_pct, DEFAULT_LEFT_PCT);
}

#[test]
fn drag_follows_pointer_within_bounds() {
    let mut state = LayoutState::default();
    state.start_resize();
    assert!(state.drag_to(600.0, 0.0, 1000.0));
    assert!((state.left_pct - 60.0).abs() < 1e-9);

    assert!(state.drag_to(5.0, 0.0, 1000.0));
    assert_eq!(state.left_pct, MIN_LEFT_PCT);

    assert!(state.drag_to(990.0, 0.0, 1000.0));
    assert_eq!(state.left_pct, MAX_LEFT_PCT);
}

#[test]
fn drag_reports_no_change_at_clamped_edge() {
    let mut state = LayoutState::default();
    state.start_resize();
    state.drag_to(990.0, 0.0, 1000.0);
    assert!(!state.drag_to(995.0, 0.0, 1000.0));
}

#[test]
fn drag_ignores_collapsed_container() {
    let mut state = LayoutState::default();
    state.start_resize();
    assert!(!state.drag_to(100.0, 0.0, 0.0));
    assert_eq!(state.left_pct, DEFAULT_LEFT_PCT);
}

#[test]
fn stop_resize_freezes_width() {
    let mut state = LayoutState::default();
    state.start_resize();
    state.drag_to(500.0, 0.0, 1000.0);
    state.stop_resize();
    assert!(!state.drag_to(200.0, 0.0, 1000.0));
    assert!((state.left_pct - 50.0).abs() < 1e-9);
}
