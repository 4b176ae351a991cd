//! Cell props and the renderer registry.
//!
//! A column never stores a renderer directly. It carries a [`CellKind`] tag
//! and produces [`CellProps`]; the [`CellRegistry`] maps the tag to a render
//! function at paint time.

mod registry;

pub use registry::{Align, CellContent, CellRegistry, CellRenderFn, RenderContext, Tone};

use chrono::NaiveDate;

/// Renderer tag for a column's cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CellKind {
    Text,
    Number,
    Date,
    DateRange,
    Boolean,
    Progress,
    Link,
    Actions,
    Expand,
    List,
}

/// An action offered in an action column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowAction {
    /// Stable identifier for the action, independent of its label.
    pub name: String,
    /// Label displayed in the cell.
    pub label: String,
}

impl RowAction {
    pub fn new(name: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            label: label.into(),
        }
    }
}

/// Inputs for one cell, derived from a record by the column's
/// `cell_params` function. Missing data is the `None` form of a variant.
#[derive(Debug, Clone, PartialEq)]
pub enum CellProps {
    Text(Option<String>),
    Number {
        value: Option<f64>,
        precision: Option<usize>,
        prefix: Option<String>,
        suffix: Option<String>,
    },
    Date(Option<NaiveDate>),
    DateRange {
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    },
    Boolean(Option<bool>),
    Progress {
        value: Option<f64>,
        total: Option<f64>,
    },
    Link {
        label: Option<String>,
        href: Option<String>,
    },
    Actions(Vec<RowAction>),
    Expand {
        expanded: bool,
    },
    List(Vec<String>),
}

impl CellProps {
    /// The renderer tag matching this variant.
    pub fn kind(&self) -> CellKind {
        match self {
            Self::Text(_) => CellKind::Text,
            Self::Number { .. } => CellKind::Number,
            Self::Date(_) => CellKind::Date,
            Self::DateRange { .. } => CellKind::DateRange,
            Self::Boolean(_) => CellKind::Boolean,
            Self::Progress { .. } => CellKind::Progress,
            Self::Link { .. } => CellKind::Link,
            Self::Actions(_) => CellKind::Actions,
            Self::Expand { .. } => CellKind::Expand,
            Self::List(_) => CellKind::List,
        }
    }

    /// Whether the props carry no value to show.
    pub fn is_missing(&self) -> bool {
        match self {
            Self::Text(v) => v.is_none(),
            Self::Number { value, .. } => value.is_none(),
            Self::Date(v) => v.is_none(),
            Self::DateRange { start, end } => start.is_none() && end.is_none(),
            Self::Boolean(v) => v.is_none(),
            Self::Progress { value, .. } => value.is_none(),
            Self::Link { label, .. } => label.is_none(),
            Self::Actions(actions) => actions.is_empty(),
            Self::Expand { .. } => false,
            Self::List(items) => items.is_empty(),
        }
    }
}
