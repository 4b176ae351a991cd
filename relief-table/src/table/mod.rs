//! Table orchestration.

pub mod paint;

use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use log::{debug, warn};

use crate::column::Column;
use crate::config::TableConfig;
use crate::error::TableError;
use crate::header::{HeaderCell, RenderedHeader};
use crate::layout::{ColumnWidths, LayoutEngine, WidthSpec};
use crate::row::{CellClassFn, KeySelector, RenderedRow, RowClassFn, RowModifier, RowRenderer};
use crate::sort::{SortContext, Sorting, sort_rows};

/// What the table shows, picked from the inputs on every render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayMode {
    /// A fetch is running. Rows from stale data are still shown under the
    /// placeholder.
    Pending,
    /// No rows and nothing pending.
    Empty {
        /// Rows are missing because of caller-side filters.
        filtered: bool,
    },
    Populated,
}

impl DisplayMode {
    pub fn select(rows: Option<usize>, pending: bool, filtered: bool) -> Self {
        if pending {
            return Self::Pending;
        }
        match rows {
            Some(count) if count > 0 => Self::Populated,
            _ => Self::Empty { filtered },
        }
    }
}

/// Per-render inputs supplied by the data-fetching caller.
///
/// Both flags come from the caller's request state; the table never infers
/// them from the data.
#[derive(Debug)]
pub struct TableInput<'a, D> {
    pub data: Option<&'a [D]>,
    pub pending: bool,
    pub filtered: bool,
}

impl<D> Clone for TableInput<'_, D> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<D> Copy for TableInput<'_, D> {}

impl<'a, D> TableInput<'a, D> {
    pub fn new(data: Option<&'a [D]>, pending: bool, filtered: bool) -> Self {
        Self {
            data,
            pending,
            filtered,
        }
    }
}

/// Output of [`Table::render`].
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedTable {
    pub caption: Option<String>,
    pub mode: DisplayMode,
    /// `None` when headers are hidden.
    pub header: Option<Vec<RenderedHeader>>,
    pub rows: Vec<RenderedRow>,
    pub widths: ColumnWidths,
    pub table_width: f64,
    /// Placeholder text for the pending and empty modes.
    pub message: Option<String>,
}

/// A data table over records `D` keyed by `K`.
///
/// Owns its sort context and layout engine. Rendering is a pure function of
/// the columns, the inputs and those two pieces of state, so callers simply
/// render again after any change.
pub struct Table<D, K> {
    columns: Vec<Column<D, K>>,
    key_selector: KeySelector<D, K>,
    config: TableConfig,
    caption: Option<String>,
    row_class: Option<RowClassFn<D, K>>,
    cell_class: Option<CellClassFn<D, K>>,
    row_modifier: Option<Arc<dyn RowModifier<D, K>>>,
    resizable_columns: bool,
    headers_hidden: bool,
    sort: SortContext,
    layout: LayoutEngine,
}

impl<D, K> fmt::Debug for Table<D, K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Table")
            .field("columns", &self.columns)
            .field("caption", &self.caption)
            .field("resizable_columns", &self.resizable_columns)
            .field("headers_hidden", &self.headers_hidden)
            .field("sort", &self.sort.sorting())
            .field("layout", &self.layout)
            .finish()
    }
}

impl<D, K: ToString> Table<D, K> {
    pub fn new(
        columns: Vec<Column<D, K>>,
        key_selector: impl Fn(&D, usize) -> K + Send + Sync + 'static,
    ) -> Self {
        warn_duplicate_ids(&columns);
        let config = TableConfig::default();
        Self {
            columns,
            key_selector: Arc::new(key_selector),
            layout: LayoutEngine::new(&config),
            config,
            caption: None,
            row_class: None,
            cell_class: None,
            row_modifier: None,
            resizable_columns: false,
            headers_hidden: false,
            sort: SortContext::new(),
        }
    }

    pub fn config(mut self, config: TableConfig) -> Self {
        let mut layout = LayoutEngine::new(&config);
        layout.set_container_width(self.layout.container_width());
        layout.set_fixed_total_width(self.layout.fixed_total_width());
        self.layout = layout;
        self.config = config;
        self
    }

    pub fn caption(mut self, caption: impl Into<String>) -> Self {
        self.caption = Some(caption.into());
        self
    }

    pub fn row_class(
        mut self,
        f: impl Fn(&K, &D, usize) -> Option<String> + Send + Sync + 'static,
    ) -> Self {
        self.row_class = Some(Arc::new(f));
        self
    }

    pub fn cell_class(
        mut self,
        f: impl Fn(&K, &D, &str) -> Option<String> + Send + Sync + 'static,
    ) -> Self {
        self.cell_class = Some(Arc::new(f));
        self
    }

    pub fn row_modifier(mut self, modifier: impl RowModifier<D, K> + 'static) -> Self {
        self.row_modifier = Some(Arc::new(modifier));
        self
    }

    /// Size the table to its columns instead of the container.
    pub fn fixed_column_width(mut self, fixed: bool) -> Self {
        self.layout.set_fixed_total_width(fixed);
        self
    }

    pub fn resizable_columns(mut self, resizable: bool) -> Self {
        self.resizable_columns = resizable;
        self
    }

    pub fn headers_hidden(mut self, hidden: bool) -> Self {
        self.headers_hidden = hidden;
        self
    }

    /// Use a caller-provided sort context, e.g. one seeded with an initial
    /// sort or observed by the query owner.
    pub fn with_sort_context(mut self, sort: SortContext) -> Self {
        self.sort = sort;
        self
    }

    pub fn columns(&self) -> &[Column<D, K>] {
        &self.columns
    }

    pub fn set_columns(&mut self, columns: Vec<Column<D, K>>) {
        warn_duplicate_ids(&columns);
        self.columns = columns;
    }

    pub fn table_config(&self) -> &TableConfig {
        &self.config
    }

    /// Record a container size observation.
    pub fn set_container_width(&mut self, width: f64) {
        self.layout.set_container_width(width);
    }

    pub fn sort_context(&self) -> &SortContext {
        &self.sort
    }

    pub fn sorting(&self) -> Option<Sorting> {
        self.sort.sorting()
    }

    /// Header cell of `column_id`, if the column exists.
    pub fn header_cell(&self, column_id: &str) -> Option<HeaderCell<'_>> {
        self.column(column_id)
            .map(|column| HeaderCell::new(column, &self.sort))
    }

    /// Click the header of `column_id`. Returns the sort state afterwards.
    pub fn click_header(&self, column_id: &str) -> Result<Option<Sorting>, TableError> {
        let header = self
            .header_cell(column_id)
            .ok_or_else(|| TableError::UnknownColumn(column_id.to_string()))?;
        Ok(header.click())
    }

    /// Sort `data` in place by the active sort.
    pub fn apply_sort(&self, data: &mut [D]) {
        sort_rows(data, &self.columns, self.sort.sorting().as_ref());
    }

    /// Widths to display, including any resize preview.
    pub fn column_widths(&mut self) -> ColumnWidths {
        let specs = self.width_specs();
        self.layout.widths(&specs)
    }

    /// Start resizing `column_id`. Returns its current width.
    pub fn begin_resize(&mut self, column_id: &str) -> Result<f64, TableError> {
        if !self.resizable_columns {
            return Err(TableError::ResizeDisabled);
        }
        let specs = self.width_specs();
        let current = self
            .layout
            .committed_widths(&specs)
            .get(column_id)
            .ok_or_else(|| TableError::UnknownColumn(column_id.to_string()))?;
        self.layout.begin_resize(column_id, current);
        Ok(current)
    }

    /// Move the active resize. Returns the clamped preview width.
    pub fn drag_resize(&mut self, requested: f64) -> Result<f64, TableError> {
        self.layout.drag_resize(requested)
    }

    /// Commit the active resize.
    pub fn end_resize(&mut self) -> Result<(String, f64), TableError> {
        self.layout.end_resize()
    }

    pub fn cancel_resize(&mut self) {
        self.layout.cancel_resize();
    }

    pub fn layout(&self) -> &LayoutEngine {
        &self.layout
    }

    pub fn render(&mut self, input: TableInput<'_, D>) -> RenderedTable {
        let mode = DisplayMode::select(input.data.map(<[D]>::len), input.pending, input.filtered);
        let widths = self.column_widths();
        let table_width = self.layout.table_width(&widths);

        let header = (!self.headers_hidden).then(|| {
            self.columns
                .iter()
                .map(|column| HeaderCell::new(column, &self.sort).render())
                .collect()
        });

        let rows = match (mode, input.data) {
            (DisplayMode::Empty { .. }, _) | (_, None) => Vec::new(),
            (_, Some(data)) => RowRenderer::new(&self.columns, &*self.key_selector)
                .row_class(self.row_class.as_ref())
                .cell_class(self.cell_class.as_ref())
                .modifier(self.row_modifier.as_deref())
                .render_rows(data),
        };

        let message = match mode {
            DisplayMode::Pending => Some(self.config.pending_message.clone()),
            DisplayMode::Empty { filtered: true } => {
                Some(self.config.filtered_empty_message.clone())
            }
            DisplayMode::Empty { filtered: false } => Some(self.config.empty_message.clone()),
            DisplayMode::Populated => None,
        };

        debug!("table rendered: mode={mode:?} rows={} width={table_width}", rows.len());

        RenderedTable {
            caption: self.caption.clone(),
            mode,
            header,
            rows,
            widths,
            table_width,
            message,
        }
    }

    fn column(&self, column_id: &str) -> Option<&Column<D, K>> {
        self.columns.iter().rev().find(|c| c.id == column_id)
    }

    fn width_specs(&self) -> Vec<WidthSpec> {
        self.columns.iter().map(Column::width_spec).collect()
    }
}

fn warn_duplicate_ids<D, K>(columns: &[Column<D, K>]) {
    if !cfg!(debug_assertions) {
        return;
    }
    let mut seen = HashSet::new();
    for column in columns {
        if !seen.insert(column.id.as_str()) {
            warn!("duplicate column id {:?}; the last one wins", column.id);
        }
    }
}
