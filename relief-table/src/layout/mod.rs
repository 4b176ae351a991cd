//! Column width resolution.

pub mod resize;

use std::collections::HashMap;

use log::{debug, trace};

use crate::config::TableConfig;
use crate::error::TableError;

pub use resize::{ResizeSession, clamp_resize_width};

/// Width inputs of one column.
#[derive(Debug, Clone, PartialEq)]
pub struct WidthSpec {
    pub id: String,
    /// Declared width, if any.
    pub width: Option<f64>,
    pub stretch: bool,
}

impl WidthSpec {
    pub fn new(id: impl Into<String>, width: Option<f64>, stretch: bool) -> Self {
        Self {
            id: id.into(),
            width,
            stretch,
        }
    }
}

/// Resolved width per column id, in column order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ColumnWidths {
    entries: Vec<(String, f64)>,
}

impl ColumnWidths {
    /// Width of `id`. With duplicate ids the last column wins.
    pub fn get(&self, id: &str) -> Option<f64> {
        self.entries
            .iter()
            .rev()
            .find(|(entry, _)| entry == id)
            .map(|(_, width)| *width)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.entries.iter().map(|(id, width)| (id.as_str(), *width))
    }

    /// Widths in column order.
    pub fn values(&self) -> Vec<f64> {
        self.entries.iter().map(|(_, width)| *width).collect()
    }

    pub fn total(&self) -> f64 {
        self.entries.iter().map(|(_, width)| width).sum()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn set(&mut self, id: &str, width: f64) {
        if let Some(entry) = self.entries.iter_mut().rev().find(|(entry, _)| entry == id) {
            entry.1 = width;
        }
    }
}

/// Resolve column widths against the container width.
///
/// Columns start at their declared width (or `default_width`). When the
/// container is wider than the declared total, stretch columns are scaled by
/// one common factor so the row fills the container; otherwise every column
/// keeps its declared width and the table overflows.
pub fn compute_widths(
    specs: &[WidthSpec],
    container_width: f64,
    default_width: f64,
) -> ColumnWidths {
    let declared: Vec<f64> = specs
        .iter()
        .map(|spec| spec.width.unwrap_or(default_width))
        .collect();

    let (stretch_total, fixed_total) = specs.iter().zip(&declared).fold(
        (0.0, 0.0),
        |(stretch, fixed), (spec, width)| {
            if spec.stretch {
                (stretch + width, fixed)
            } else {
                (stretch, fixed + width)
            }
        },
    );

    let scale = if stretch_total > 0.0 && container_width.is_finite() && container_width > 0.0 {
        (container_width - fixed_total) / stretch_total
    } else {
        1.0
    };

    let entries = specs
        .iter()
        .zip(declared)
        .map(|(spec, width)| {
            let resolved = if spec.stretch && scale > 1.0 {
                width * scale
            } else {
                width
            };
            (spec.id.clone(), resolved)
        })
        .collect();

    ColumnWidths { entries }
}

#[derive(Debug, Clone)]
struct Memo {
    specs: Vec<WidthSpec>,
    container_width: f64,
    widths: ColumnWidths,
}

/// Owns the width map of one table.
///
/// Results are memoized on `(column specs, container width)`, so frequent
/// resize observations with unchanged inputs are cheap. Committed user
/// resizes are kept as overrides: an overridden column uses the override as
/// its width and stops stretching.
#[derive(Debug, Clone)]
pub struct LayoutEngine {
    default_width: f64,
    min_width: f64,
    container_width: f64,
    fixed_total_width: bool,
    overrides: HashMap<String, f64>,
    resize: Option<ResizeSession>,
    memo: Option<Memo>,
}

impl Default for LayoutEngine {
    fn default() -> Self {
        Self::new(&TableConfig::default())
    }
}

impl LayoutEngine {
    pub fn new(config: &TableConfig) -> Self {
        Self {
            default_width: config.default_column_width,
            min_width: config.min_column_width,
            container_width: 0.0,
            fixed_total_width: false,
            overrides: HashMap::new(),
            resize: None,
            memo: None,
        }
    }

    /// Record a container size observation.
    pub fn set_container_width(&mut self, width: f64) {
        self.container_width = width;
    }

    pub fn container_width(&self) -> f64 {
        self.container_width
    }

    /// In fixed mode the table is exactly as wide as its columns instead of
    /// filling the container.
    pub fn set_fixed_total_width(&mut self, fixed: bool) {
        self.fixed_total_width = fixed;
    }

    pub fn fixed_total_width(&self) -> bool {
        self.fixed_total_width
    }

    pub fn min_width(&self) -> f64 {
        self.min_width
    }

    /// Committed widths, without any in-progress resize preview.
    pub fn committed_widths(&mut self, specs: &[WidthSpec]) -> ColumnWidths {
        let specs: Vec<WidthSpec> = specs
            .iter()
            .map(|spec| match self.overrides.get(&spec.id) {
                Some(width) => WidthSpec::new(spec.id.clone(), Some(*width), false),
                None => spec.clone(),
            })
            .collect();

        if let Some(memo) = &self.memo
            && memo.container_width == self.container_width
            && memo.specs == specs
        {
            trace!("column widths: memo hit");
            return memo.widths.clone();
        }

        let widths = compute_widths(&specs, self.container_width, self.default_width);
        debug!(
            "column widths recomputed: container={} total={} columns={}",
            self.container_width,
            widths.total(),
            widths.len()
        );
        self.memo = Some(Memo {
            specs,
            container_width: self.container_width,
            widths: widths.clone(),
        });
        widths
    }

    /// Widths to display: committed widths with the resize preview overlaid.
    pub fn widths(&mut self, specs: &[WidthSpec]) -> ColumnWidths {
        let mut widths = self.committed_widths(specs);
        if let Some(session) = &self.resize {
            widths.set(&session.column_id, session.preview_width);
        }
        widths
    }

    /// Overall table width for the given column widths.
    pub fn table_width(&self, widths: &ColumnWidths) -> f64 {
        let total = widths.total();
        if self.fixed_total_width {
            total
        } else {
            total.max(self.container_width)
        }
    }

    /// Start resizing `column_id`, currently `current_width` wide.
    pub fn begin_resize(&mut self, column_id: impl Into<String>, current_width: f64) {
        self.resize = Some(ResizeSession::new(column_id, current_width));
    }

    /// Move the drag to `requested`. Returns the clamped preview width.
    pub fn drag_resize(&mut self, requested: f64) -> Result<f64, TableError> {
        let min_width = self.min_width;
        let session = self.resize.as_mut().ok_or(TableError::NoResizeInProgress)?;
        session.preview_width = clamp_resize_width(requested, min_width);
        Ok(session.preview_width)
    }

    /// Commit the preview width. Returns the column and its new width.
    pub fn end_resize(&mut self) -> Result<(String, f64), TableError> {
        let session = self.resize.take().ok_or(TableError::NoResizeInProgress)?;
        debug!(
            "column {} resized: {} -> {}",
            session.column_id, session.start_width, session.preview_width
        );
        self.overrides
            .insert(session.column_id.clone(), session.preview_width);
        self.memo = None;
        Ok((session.column_id, session.preview_width))
    }

    /// Drop the preview without committing.
    pub fn cancel_resize(&mut self) {
        self.resize = None;
    }

    pub fn resizing(&self) -> Option<&ResizeSession> {
        self.resize.as_ref()
    }

    /// Committed user widths by column id.
    pub fn overrides(&self) -> &HashMap<String, f64> {
        &self.overrides
    }

    /// Forget all committed user widths.
    pub fn clear_overrides(&mut self) {
        self.overrides.clear();
        self.memo = None;
    }
}
