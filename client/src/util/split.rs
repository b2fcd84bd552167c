//! Split-pane geometry for the resizable workspace divider.

#[cfg(test)]
#[path = "split_test.rs"]
mod split_test;

/// Initial chat pane width, in percent of the container.
pub const DEFAULT_LEFT_PCT: f64 = 35.0;
/// Narrowest the chat pane may become.
pub const MIN_LEFT_PCT: f64 = 20.0;
/// Widest the chat pane may become.
pub const MAX_LEFT_PCT: f64 = 70.0;

/// Clamp a requested pane width into the allowed range.
pub fn clamp_left_pct(pct: f64) -> f64 {
    if pct.is_nan() {
        return DEFAULT_LEFT_PCT;
    }
    pct.clamp(MIN_LEFT_PCT, MAX_LEFT_PCT)
}

/// Left pane width for a pointer at `pointer_x`, given the container's left
/// edge and width in the same (client) coordinates.
///
/// Returns `None` for a collapsed container, where no ratio exists.
pub fn left_pct_from_pointer(pointer_x: f64, container_left: f64, container_width: f64) -> Option<f64> {
    if container_width <= 0.0 || !container_width.is_finite() {
        return None;
    }
    let pct = (pointer_x - container_left) / container_width * 100.0;
    Some(clamp_left_pct(pct))
}
