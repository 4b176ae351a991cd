//! Data-table engine for the relief front end.
//!
//! A table is described by a list of [`Column`] descriptors (usually built with
//! the `create_*_column` factories) and a key selector. [`Table`] resolves
//! column widths against the container, renders the header row against its
//! [`SortContext`], maps every record into a [`RenderedRow`] and picks the
//! pending / empty / populated display mode. [`paint`] turns the result into
//! terminal lines.

pub mod cell;
pub mod column;
pub mod config;
pub mod error;
pub mod header;
pub mod layout;
pub mod row;
pub mod sort;
pub mod table;
pub mod text;

pub use cell::{Align, CellContent, CellKind, CellProps, CellRegistry, RowAction, Tone};
pub use column::factories::*;
pub use column::{Column, ColumnOptions, HeaderParams, NumberFormat};
pub use config::TableConfig;
pub use error::TableError;
pub use header::{HeaderCell, RenderedHeader, SortIndicator};
pub use layout::{ColumnWidths, LayoutEngine, WidthSpec, compute_widths};
pub use row::expansion::{ExpansionModifier, ExpansionState};
pub use row::{RenderedCell, RenderedRow, RowModifier, RowOptions, RowRenderer, modifier_fn};
pub use sort::{SortContext, SortDirection, Sorting, sort_rows};
pub use table::paint::{Line, Span, paint};
pub use table::{DisplayMode, RenderedTable, Table, TableInput};
