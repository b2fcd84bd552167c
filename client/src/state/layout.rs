//! Workspace split-pane layout state.

#[cfg(test)]
#[path = "layout_test.rs"]
mod layout_test;

use crate::util::split::{DEFAULT_LEFT_PCT, clamp_left_pct, left_pct_from_pointer};

/// Width of the chat pane and whether the divider is being dragged.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LayoutState {
    /// Chat pane width in percent of the workspace.
    pub left_pct: f64,
    pub resizing: bool,
}

impl Default for LayoutState {
    fn default() -> Self {
        Self { left_pct: DEFAULT_LEFT_PCT, resizing: false }
    }
}

impl LayoutState {
    pub fn start_resize(&mut self) {
        self.resizing = true;
    }

    pub fn stop_resize(&mut self) {
        self.resizing = false;
    }

    /// Follow the pointer while dragging. Returns whether the width changed.
    pub fn drag_to(&mut self, pointer_x: f64, container_left: f64, container_width: f64) -> bool {
        if !self.resizing {
            return false;
        }
        match left_pct_from_pointer(pointer_x, container_left, container_width) {
            Some(pct) if (pct - self.left_pct).abs() > f64::EPSILON => {
                self.left_pct = pct;
                true
            }
            _ => false,
        }
    }

    /// Inline style for the chat pane.
    pub fn left_style(&self) -> String {
        format!("width: {:.2}%;", clamp_left_pct(self.left_pct))
    }
}
