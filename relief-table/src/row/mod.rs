//! Row and cell rendering.

pub mod expansion;

use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use crate::cell::{CellKind, CellProps};
use crate::column::Column;

/// Computes the key of a record from `(datum, index)`.
pub type KeySelector<D, K> = Arc<dyn Fn(&D, usize) -> K + Send + Sync>;

/// Extra class for a whole row.
pub type RowClassFn<D, K> = Arc<dyn Fn(&K, &D, usize) -> Option<String> + Send + Sync>;

/// Extra class for one cell, given the column id.
pub type CellClassFn<D, K> = Arc<dyn Fn(&K, &D, &str) -> Option<String> + Send + Sync>;

/// One rendered cell.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedCell {
    pub column_id: String,
    pub kind: CellKind,
    pub props: CellProps,
    pub class: Option<String>,
}

/// One rendered row.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedRow {
    /// String form of the record key.
    pub key: String,
    /// Key of the row this one was injected under, for detail rows.
    pub parent: Option<String>,
    /// Index of the record in its dataset.
    pub index: usize,
    /// Nesting level; top-level rows are 0.
    pub depth: usize,
    pub class: Option<String>,
    pub cells: Vec<RenderedCell>,
}

impl RenderedRow {
    pub fn is_detail(&self) -> bool {
        self.parent.is_some()
    }

    pub fn cell(&self, column_id: &str) -> Option<&RenderedCell> {
        self.cells.iter().rev().find(|c| c.column_id == column_id)
    }
}

/// Context handed to a row modifier.
pub struct RowOptions<'a, D, K> {
    /// The row as rendered from the columns.
    pub row: RenderedRow,
    pub key: &'a K,
    pub datum: &'a D,
    pub index: usize,
    pub columns: &'a [Column<D, K>],
    pub data: &'a [D],
}

/// Augments a rendered row, typically by appending detail rows after it.
///
/// Returning `vec![options.row]` keeps the row unchanged.
pub trait RowModifier<D, K>: Send + Sync {
    fn modify(&self, options: RowOptions<'_, D, K>) -> Vec<RenderedRow>;
}

/// A [`RowModifier`] backed by a closure. Built with [`modifier_fn`].
pub struct FnModifier<D, K, F> {
    f: F,
    _marker: PhantomData<fn(&D, &K)>,
}

/// Wrap a closure as a [`RowModifier`].
pub fn modifier_fn<D, K, F>(f: F) -> FnModifier<D, K, F>
where
    F: for<'a> Fn(RowOptions<'a, D, K>) -> Vec<RenderedRow> + Send + Sync,
{
    FnModifier {
        f,
        _marker: PhantomData,
    }
}

impl<D, K, F> RowModifier<D, K> for FnModifier<D, K, F>
where
    F: for<'a> Fn(RowOptions<'a, D, K>) -> Vec<RenderedRow> + Send + Sync,
{
    fn modify(&self, options: RowOptions<'_, D, K>) -> Vec<RenderedRow> {
        (self.f)(options)
    }
}

/// Maps records through the column descriptors.
pub struct RowRenderer<'a, D, K> {
    columns: &'a [Column<D, K>],
    key_selector: &'a (dyn Fn(&D, usize) -> K + Send + Sync),
    row_class: Option<&'a RowClassFn<D, K>>,
    cell_class: Option<&'a CellClassFn<D, K>>,
    modifier: Option<&'a dyn RowModifier<D, K>>,
    parent: Option<String>,
    depth: usize,
}

impl<D, K> fmt::Debug for RowRenderer<'_, D, K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RowRenderer")
            .field("columns", &self.columns.len())
            .field("parent", &self.parent)
            .field("depth", &self.depth)
            .finish()
    }
}

impl<'a, D, K: ToString> RowRenderer<'a, D, K> {
    pub fn new(
        columns: &'a [Column<D, K>],
        key_selector: &'a (dyn Fn(&D, usize) -> K + Send + Sync),
    ) -> Self {
        Self {
            columns,
            key_selector,
            row_class: None,
            cell_class: None,
            modifier: None,
            parent: None,
            depth: 0,
        }
    }

    pub fn row_class(mut self, row_class: Option<&'a RowClassFn<D, K>>) -> Self {
        self.row_class = row_class;
        self
    }

    pub fn cell_class(mut self, cell_class: Option<&'a CellClassFn<D, K>>) -> Self {
        self.cell_class = cell_class;
        self
    }

    pub fn modifier(mut self, modifier: Option<&'a dyn RowModifier<D, K>>) -> Self {
        self.modifier = modifier;
        self
    }

    /// Render rows as detail rows of `parent` at `depth`.
    pub fn nested(mut self, parent: impl Into<String>, depth: usize) -> Self {
        self.parent = Some(parent.into());
        self.depth = depth;
        self
    }

    /// Render one record, without the modifier.
    pub fn render_row(&self, key: &K, datum: &D, index: usize, data: &[D]) -> RenderedRow {
        let cells = self
            .columns
            .iter()
            .map(|column| {
                let extra = self.cell_class.and_then(|f| f(key, datum, &column.id));
                RenderedCell {
                    column_id: column.id.clone(),
                    kind: column.cell_kind,
                    props: column.cell_props(key, datum, index, data),
                    class: join_classes(column.cell_class.as_deref(), extra),
                }
            })
            .collect();

        RenderedRow {
            key: key.to_string(),
            parent: self.parent.clone(),
            index,
            depth: self.depth,
            class: self.row_class.and_then(|f| f(key, datum, index)),
            cells,
        }
    }

    /// Render every record, passing each row through the modifier.
    pub fn render_rows(&self, data: &[D]) -> Vec<RenderedRow> {
        let mut rows = Vec::with_capacity(data.len());
        for (index, datum) in data.iter().enumerate() {
            let key = (self.key_selector)(datum, index);
            let row = self.render_row(&key, datum, index, data);
            match self.modifier {
                Some(modifier) => rows.extend(modifier.modify(RowOptions {
                    row,
                    key: &key,
                    datum,
                    index,
                    columns: self.columns,
                    data,
                })),
                None => rows.push(row),
            }
        }
        rows
    }
}

fn join_classes(base: Option<&str>, extra: Option<String>) -> Option<String> {
    match (base, extra) {
        (Some(base), Some(extra)) => Some(format!("{base} {extra}")),
        (Some(base), None) => Some(base.to_string()),
        (None, extra) => extra,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::column::ColumnOptions;
    use crate::{create_number_column, create_string_column};

    #[derive(Debug)]
    struct Event {
        id: u32,
        name: &'static str,
        affected: Option<f64>,
    }

    fn columns() -> Vec<Column<Event, u32>> {
        vec![
            create_string_column(
                "name",
                "Name",
                |e: &Event| Some(e.name.to_string()),
                ColumnOptions::new().cell_class("name-cell"),
            ),
            create_number_column(
                "affected",
                "Affected",
                |e: &Event| e.affected,
                ColumnOptions::new(),
            ),
        ]
    }

    fn events() -> Vec<Event> {
        vec![
            Event {
                id: 10,
                name: "Cyclone",
                affected: Some(1200.0),
            },
            Event {
                id: 11,
                name: "Drought",
                affected: None,
            },
        ]
    }

    #[test]
    fn test_rows_follow_columns() {
        let columns = columns();
        let key = |e: &Event, _: usize| e.id;
        let renderer = RowRenderer::new(&columns, &key);
        let rows = renderer.render_rows(&events());

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].key, "10");
        assert_eq!(rows[1].index, 1);
        assert_eq!(rows[1].cells.len(), 2);
        assert_eq!(
            rows[1].cell("affected").map(|c| c.props.is_missing()),
            Some(true)
        );
        assert_eq!(rows[0].cells[0].class.as_deref(), Some("name-cell"));
    }

    #[test]
    fn test_class_functions_apply() {
        let columns = columns();
        let key = |e: &Event, _: usize| e.id;
        let row_class: RowClassFn<Event, u32> = Arc::new(|_: &u32, e: &Event, _: usize| {
            e.affected.is_none().then(|| "incomplete".to_string())
        });
        let cell_class: CellClassFn<Event, u32> = Arc::new(|_: &u32, _: &Event, column: &str| {
            (column == "name").then(|| "bold".to_string())
        });
        let renderer = RowRenderer::new(&columns, &key)
            .row_class(Some(&row_class))
            .cell_class(Some(&cell_class));
        let rows = renderer.render_rows(&events());

        assert_eq!(rows[0].class, None);
        assert_eq!(rows[1].class.as_deref(), Some("incomplete"));
        assert_eq!(rows[0].cells[0].class.as_deref(), Some("name-cell bold"));
        assert_eq!(rows[0].cells[1].class, None);
    }

    #[test]
    fn test_modifier_can_append_rows() {
        let columns = columns();
        let key = |e: &Event, _: usize| e.id;
        let modifier = modifier_fn(|options: RowOptions<'_, Event, u32>| {
            let mut extra = options.row.clone();
            extra.parent = Some(options.row.key.clone());
            extra.depth = 1;
            vec![options.row, extra]
        });
        let renderer = RowRenderer::new(&columns, &key).modifier(Some(&modifier));
        let rows = renderer.render_rows(&events());

        assert_eq!(rows.len(), 4);
        assert!(rows[1].is_detail());
        assert_eq!(rows[1].parent.as_deref(), Some("10"));
    }
}
