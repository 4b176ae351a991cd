//! User-driven column resize.
//!
//! A drag only moves the preview width. The layout engine keeps serving the
//! committed widths underneath and overlays the preview, so a drag never
//! invalidates the memoized layout; `end_resize` commits the preview.

/// An in-progress resize of one column.
#[derive(Debug, Clone, PartialEq)]
pub struct ResizeSession {
    pub column_id: String,
    /// Width when the drag started.
    pub start_width: f64,
    /// Uncommitted width shown while dragging.
    pub preview_width: f64,
}

impl ResizeSession {
    pub fn new(column_id: impl Into<String>, start_width: f64) -> Self {
        Self {
            column_id: column_id.into(),
            start_width,
            preview_width: start_width,
        }
    }

    /// Width change relative to the start of the drag.
    pub fn delta(&self) -> f64 {
        self.preview_width - self.start_width
    }
}

/// Clamp a requested width to the resize floor. Non-finite requests land on
/// the floor.
pub fn clamp_resize_width(requested: f64, min_width: f64) -> f64 {
    if requested.is_finite() {
        requested.max(min_width)
    } else {
        min_width
    }
}
