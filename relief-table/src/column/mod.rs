//! Column descriptors.

pub mod compare;
pub mod factories;

use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;

use crate::cell::{Align, CellKind, CellProps};
use crate::layout::WidthSpec;
use crate::sort::SortDirection;

/// Derives the props of one cell from `(key, datum, index, all_data)`.
pub type CellParamsFn<D, K> = Arc<dyn Fn(&K, &D, usize, &[D]) -> CellProps + Send + Sync>;

/// Orders two records for a sortable column.
pub type ComparatorFn<D> = Arc<dyn Fn(&D, &D) -> Ordering + Send + Sync>;

/// Inputs for a column's header cell.
#[derive(Debug, Clone, PartialEq)]
pub struct HeaderParams {
    /// Whether clicking the header changes the sort.
    pub sortable: bool,
    /// Direction applied by the first click.
    pub default_direction: SortDirection,
    /// Alignment of the header label.
    pub align: Align,
    pub info_title: Option<String>,
    pub info_description: Option<String>,
}

impl Default for HeaderParams {
    fn default() -> Self {
        Self {
            sortable: false,
            default_direction: SortDirection::Asc,
            align: Align::Left,
            info_title: None,
            info_description: None,
        }
    }
}

/// Immutable description of how one column is labeled, rendered, sized and
/// (optionally) sorted.
///
/// Cloning is cheap: the closures are shared.
pub struct Column<D, K> {
    /// Unique among sibling columns.
    pub id: String,
    /// Header label.
    pub title: String,
    pub header: HeaderParams,
    pub header_class: Option<String>,
    /// Renderer tag for every cell of this column.
    pub cell_kind: CellKind,
    pub cell_params: CellParamsFn<D, K>,
    pub cell_class: Option<String>,
    /// Declared width; the table's default applies when absent.
    pub column_width: Option<f64>,
    /// Whether this column absorbs extra container width.
    pub column_stretch: bool,
    /// Present only on sortable columns.
    pub value_comparator: Option<ComparatorFn<D>>,
}

impl<D, K> Clone for Column<D, K> {
    fn clone(&self) -> Self {
        Self {
            id: self.id.clone(),
            title: self.title.clone(),
            header: self.header.clone(),
            header_class: self.header_class.clone(),
            cell_kind: self.cell_kind,
            cell_params: Arc::clone(&self.cell_params),
            cell_class: self.cell_class.clone(),
            column_width: self.column_width,
            column_stretch: self.column_stretch,
            value_comparator: self.value_comparator.clone(),
        }
    }
}

impl<D, K> fmt::Debug for Column<D, K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Column")
            .field("id", &self.id)
            .field("title", &self.title)
            .field("cell_kind", &self.cell_kind)
            .field("column_width", &self.column_width)
            .field("column_stretch", &self.column_stretch)
            .field("sortable", &self.is_sortable())
            .finish()
    }
}

impl<D, K> Column<D, K> {
    /// Create a column from its parts. The factories in [`factories`] cover
    /// the common data kinds.
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        cell_kind: CellKind,
        cell_params: impl Fn(&K, &D, usize, &[D]) -> CellProps + Send + Sync + 'static,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            header: HeaderParams::default(),
            header_class: None,
            cell_kind,
            cell_params: Arc::new(cell_params),
            cell_class: None,
            column_width: None,
            column_stretch: false,
            value_comparator: None,
        }
    }

    /// Attach a comparator, making the column sortable.
    pub fn comparator(
        mut self,
        compare: impl Fn(&D, &D) -> Ordering + Send + Sync + 'static,
    ) -> Self {
        self.value_comparator = Some(Arc::new(compare));
        self.header.sortable = true;
        self
    }

    /// Set the declared width.
    pub fn width(mut self, width: f64) -> Self {
        self.column_width = Some(width);
        self
    }

    /// Mark the column as a stretch column.
    pub fn stretch(mut self) -> Self {
        self.column_stretch = true;
        self
    }

    /// A column is sortable when it has a comparator and its header allows it.
    pub fn is_sortable(&self) -> bool {
        self.header.sortable && self.value_comparator.is_some()
    }

    /// Compute the cell props for one record.
    pub fn cell_props(&self, key: &K, datum: &D, index: usize, data: &[D]) -> CellProps {
        (self.cell_params)(key, datum, index, data)
    }

    /// Compare two records with this column's comparator.
    pub fn compare(&self, a: &D, b: &D) -> Option<Ordering> {
        self.value_comparator.as_ref().map(|cmp| cmp(a, b))
    }

    /// Width inputs for the layout engine.
    pub fn width_spec(&self) -> WidthSpec {
        WidthSpec {
            id: self.id.clone(),
            width: self.column_width,
            stretch: self.column_stretch,
        }
    }
}

/// Formatting inputs for number columns.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NumberFormat {
    /// Fraction digits; whole numbers show none and fractions two when unset.
    pub precision: Option<usize>,
    pub prefix: Option<String>,
    pub suffix: Option<String>,
}

impl NumberFormat {
    pub fn precision(mut self, precision: usize) -> Self {
        self.precision = Some(precision);
        self
    }

    pub fn prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = Some(prefix.into());
        self
    }

    pub fn suffix(mut self, suffix: impl Into<String>) -> Self {
        self.suffix = Some(suffix.into());
        self
    }
}

/// Optional settings shared by every column factory.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnOptions {
    pub column_width: Option<f64>,
    pub column_stretch: bool,
    /// Set to false to hide the sort control on a column that could sort.
    pub sortable: bool,
    pub default_sort_direction: SortDirection,
    pub header_class: Option<String>,
    pub cell_class: Option<String>,
    pub header_info_title: Option<String>,
    pub header_info_description: Option<String>,
    /// Used by number columns only.
    pub number: NumberFormat,
}

impl Default for ColumnOptions {
    fn default() -> Self {
        Self {
            column_width: None,
            column_stretch: false,
            sortable: true,
            default_sort_direction: SortDirection::Asc,
            header_class: None,
            cell_class: None,
            header_info_title: None,
            header_info_description: None,
            number: NumberFormat::default(),
        }
    }
}

impl ColumnOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn width(mut self, width: f64) -> Self {
        self.column_width = Some(width);
        self
    }

    pub fn stretch(mut self) -> Self {
        self.column_stretch = true;
        self
    }

    pub fn sortable(mut self, sortable: bool) -> Self {
        self.sortable = sortable;
        self
    }

    pub fn default_sort_direction(mut self, direction: SortDirection) -> Self {
        self.default_sort_direction = direction;
        self
    }

    pub fn header_class(mut self, class: impl Into<String>) -> Self {
        self.header_class = Some(class.into());
        self
    }

    pub fn cell_class(mut self, class: impl Into<String>) -> Self {
        self.cell_class = Some(class.into());
        self
    }

    pub fn header_info(mut self, title: impl Into<String>, description: impl Into<String>) -> Self {
        self.header_info_title = Some(title.into());
        self.header_info_description = Some(description.into());
        self
    }

    pub fn number(mut self, format: NumberFormat) -> Self {
        self.number = format;
        self
    }
}
