//! Header cells.

use crate::cell::Align;
use crate::column::{Column, HeaderParams};
use crate::sort::{SortContext, SortDirection, Sorting};

/// Sort marker shown next to a header label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortIndicator {
    /// The column cannot sort.
    None,
    /// Sortable, but another column (or nothing) is sorted.
    Unsorted,
    Asc,
    Dsc,
}

impl SortIndicator {
    pub fn symbol(self) -> &'static str {
        match self {
            Self::None | Self::Unsorted => "",
            Self::Asc => "▲",
            Self::Dsc => "▼",
        }
    }
}

/// A rendered header cell.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedHeader {
    pub column_id: String,
    pub title: String,
    pub class: Option<String>,
    pub align: Align,
    pub indicator: SortIndicator,
    pub info: Option<(String, String)>,
}

/// Interactive header of one column, wired to the table's [`SortContext`].
///
/// The cell only writes the sort state; reordering the data belongs to
/// whoever owns the data request.
#[derive(Debug, Clone)]
pub struct HeaderCell<'a> {
    column_id: &'a str,
    title: &'a str,
    class: Option<&'a str>,
    params: &'a HeaderParams,
    sortable: bool,
    context: &'a SortContext,
}

impl<'a> HeaderCell<'a> {
    pub fn new<D, K>(column: &'a Column<D, K>, context: &'a SortContext) -> Self {
        Self {
            column_id: &column.id,
            title: &column.title,
            class: column.header_class.as_deref(),
            params: &column.header,
            sortable: column.is_sortable(),
            context,
        }
    }

    pub fn is_sortable(&self) -> bool {
        self.sortable
    }

    /// Handle a click: advance this column's sort cycle.
    ///
    /// Returns the sort state after the click. Non-sortable headers leave the
    /// state unchanged.
    pub fn click(&self) -> Option<Sorting> {
        if !self.sortable {
            return self.context.sorting();
        }
        self.context.cycle(self.column_id, self.params.default_direction)
    }

    pub fn indicator(&self) -> SortIndicator {
        if !self.sortable {
            return SortIndicator::None;
        }
        match self.context.direction_of(self.column_id) {
            Some(SortDirection::Asc) => SortIndicator::Asc,
            Some(SortDirection::Dsc) => SortIndicator::Dsc,
            None => SortIndicator::Unsorted,
        }
    }

    pub fn render(&self) -> RenderedHeader {
        let info = match (&self.params.info_title, &self.params.info_description) {
            (Some(title), Some(description)) => Some((title.clone(), description.clone())),
            (Some(title), None) => Some((title.clone(), String::new())),
            _ => None,
        };
        RenderedHeader {
            column_id: self.column_id.to_string(),
            title: self.title.to_string(),
            class: self.class.map(String::from),
            align: self.params.align,
            indicator: self.indicator(),
            info,
        }
    }
}
