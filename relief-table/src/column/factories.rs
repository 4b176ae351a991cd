//! One factory per data kind.
//!
//! Every factory takes `(id, title, accessor, options)`. Accessors are total:
//! they return `None` (or an empty list) for missing data instead of failing.
//! Link, action and expand columns never sort.

use std::sync::Arc;

use chrono::NaiveDate;

use crate::cell::{Align, CellKind, CellProps, RowAction};
use crate::row::expansion::ExpansionState;

use super::compare::{
    compare_bool, compare_date, compare_date_range, compare_list, compare_number, compare_text,
};
use super::{Column, ColumnOptions};

/// Width given to expand columns that do not declare one.
const EXPAND_COLUMN_WIDTH: f64 = 40.0;

fn apply_options<D, K>(mut column: Column<D, K>, options: &ColumnOptions) -> Column<D, K> {
    column.column_width = options.column_width;
    column.column_stretch = options.column_stretch;
    column.header_class = options.header_class.clone();
    column.cell_class = options.cell_class.clone();
    column.header.sortable = options.sortable && column.value_comparator.is_some();
    column.header.default_direction = options.default_sort_direction;
    column.header.info_title = options.header_info_title.clone();
    column.header.info_description = options.header_info_description.clone();
    column
}

pub fn create_string_column<D, K, F>(
    id: impl Into<String>,
    title: impl Into<String>,
    accessor: F,
    options: ColumnOptions,
) -> Column<D, K>
where
    D: 'static,
    K: 'static,
    F: Fn(&D) -> Option<String> + Send + Sync + 'static,
{
    let accessor = Arc::new(accessor);
    let read = Arc::clone(&accessor);
    let column = Column::new(id, title, CellKind::Text, move |_, datum, _, _| {
        CellProps::Text(read(datum))
    })
    .comparator(move |a, b| compare_text(accessor(a).as_deref(), accessor(b).as_deref()));
    apply_options(column, &options)
}

pub fn create_number_column<D, K, F>(
    id: impl Into<String>,
    title: impl Into<String>,
    accessor: F,
    options: ColumnOptions,
) -> Column<D, K>
where
    D: 'static,
    K: 'static,
    F: Fn(&D) -> Option<f64> + Send + Sync + 'static,
{
    let accessor = Arc::new(accessor);
    let read = Arc::clone(&accessor);
    let format = options.number.clone();
    let mut column = Column::new(id, title, CellKind::Number, move |_, datum, _, _| {
        CellProps::Number {
            value: read(datum),
            precision: format.precision,
            prefix: format.prefix.clone(),
            suffix: format.suffix.clone(),
        }
    })
    .comparator(move |a, b| compare_number(accessor(a), accessor(b)));
    column.header.align = Align::Right;
    apply_options(column, &options)
}

pub fn create_date_column<D, K, F>(
    id: impl Into<String>,
    title: impl Into<String>,
    accessor: F,
    options: ColumnOptions,
) -> Column<D, K>
where
    D: 'static,
    K: 'static,
    F: Fn(&D) -> Option<NaiveDate> + Send + Sync + 'static,
{
    let accessor = Arc::new(accessor);
    let read = Arc::clone(&accessor);
    let column = Column::new(id, title, CellKind::Date, move |_, datum, _, _| {
        CellProps::Date(read(datum))
    })
    .comparator(move |a, b| compare_date(accessor(a), accessor(b)));
    apply_options(column, &options)
}

/// The accessor returns `(start, end)`; either side may be open.
pub fn create_date_range_column<D, K, F>(
    id: impl Into<String>,
    title: impl Into<String>,
    accessor: F,
    options: ColumnOptions,
) -> Column<D, K>
where
    D: 'static,
    K: 'static,
    F: Fn(&D) -> (Option<NaiveDate>, Option<NaiveDate>) + Send + Sync + 'static,
{
    let accessor = Arc::new(accessor);
    let read = Arc::clone(&accessor);
    let column = Column::new(id, title, CellKind::DateRange, move |_, datum, _, _| {
        let (start, end) = read(datum);
        CellProps::DateRange { start, end }
    })
    .comparator(move |a, b| compare_date_range(accessor(a), accessor(b)));
    apply_options(column, &options)
}

pub fn create_boolean_column<D, K, F>(
    id: impl Into<String>,
    title: impl Into<String>,
    accessor: F,
    options: ColumnOptions,
) -> Column<D, K>
where
    D: 'static,
    K: 'static,
    F: Fn(&D) -> Option<bool> + Send + Sync + 'static,
{
    let accessor = Arc::new(accessor);
    let read = Arc::clone(&accessor);
    let column = Column::new(id, title, CellKind::Boolean, move |_, datum, _, _| {
        CellProps::Boolean(read(datum))
    })
    .comparator(move |a, b| compare_bool(accessor(a), accessor(b)));
    apply_options(column, &options)
}

/// Progress of `value` out of `total` (100 when `total` yields `None`).
/// Sorts by the resulting ratio.
pub fn create_progress_column<D, K, V, T>(
    id: impl Into<String>,
    title: impl Into<String>,
    value: V,
    total: T,
    options: ColumnOptions,
) -> Column<D, K>
where
    D: 'static,
    K: 'static,
    V: Fn(&D) -> Option<f64> + Send + Sync + 'static,
    T: Fn(&D) -> Option<f64> + Send + Sync + 'static,
{
    let value = Arc::new(value);
    let total = Arc::new(total);
    let (read_value, read_total) = (Arc::clone(&value), Arc::clone(&total));
    let ratio = move |d: &D| {
        let total = total(d).unwrap_or(100.0);
        value(d).filter(|_| total != 0.0).map(|v| v / total)
    };
    let column = Column::new(id, title, CellKind::Progress, move |_, datum, _, _| {
        CellProps::Progress {
            value: read_value(datum),
            total: read_total(datum),
        }
    })
    .comparator(move |a, b| compare_number(ratio(a), ratio(b)));
    apply_options(column, &options)
}

/// Navigation column. Never sortable.
pub fn create_link_column<D, K, L, H>(
    id: impl Into<String>,
    title: impl Into<String>,
    label: L,
    href: H,
    options: ColumnOptions,
) -> Column<D, K>
where
    D: 'static,
    K: 'static,
    L: Fn(&D) -> Option<String> + Send + Sync + 'static,
    H: Fn(&D) -> Option<String> + Send + Sync + 'static,
{
    let column = Column::new(id, title, CellKind::Link, move |_, datum, _, _| {
        CellProps::Link {
            label: label(datum),
            href: href(datum),
        }
    });
    apply_options(column, &options)
}

/// Per-row actions. Never sortable.
pub fn create_action_column<D, K, F>(
    id: impl Into<String>,
    title: impl Into<String>,
    actions: F,
    options: ColumnOptions,
) -> Column<D, K>
where
    D: 'static,
    K: 'static,
    F: Fn(&K, &D) -> Vec<RowAction> + Send + Sync + 'static,
{
    let mut column = Column::new(id, title, CellKind::Actions, move |key, datum, _, _| {
        CellProps::Actions(actions(key, datum))
    });
    column.header.align = Align::Right;
    apply_options(column, &options)
}

/// Expansion toggle reading `expansion` by row key. Never sortable.
///
/// The caller toggles [`ExpansionState`] when the cell is clicked; an
/// [`ExpansionModifier`](crate::ExpansionModifier) sharing the same state
/// injects the detail rows.
pub fn create_expand_column<D, K>(
    id: impl Into<String>,
    expansion: ExpansionState,
    options: ColumnOptions,
) -> Column<D, K>
where
    D: 'static,
    K: ToString + 'static,
{
    let column = Column::new(id, "", CellKind::Expand, move |key: &K, _, _, _| {
        CellProps::Expand {
            expanded: expansion.is_expanded(&key.to_string()),
        }
    });
    let mut column = apply_options(column, &options);
    column.column_width = column.column_width.or(Some(EXPAND_COLUMN_WIDTH));
    column
}

pub fn create_list_column<D, K, F>(
    id: impl Into<String>,
    title: impl Into<String>,
    accessor: F,
    options: ColumnOptions,
) -> Column<D, K>
where
    D: 'static,
    K: 'static,
    F: Fn(&D) -> Vec<String> + Send + Sync + 'static,
{
    let accessor = Arc::new(accessor);
    let read = Arc::clone(&accessor);
    let column = Column::new(id, title, CellKind::List, move |_, datum, _, _| {
        CellProps::List(read(datum))
    })
    .comparator(move |a, b| compare_list(&accessor(a), &accessor(b)));
    apply_options(column, &options)
}

#[cfg(test)]
mod tests {
    use std::cmp::Ordering;

    use super::*;
    use crate::sort::SortDirection;

    #[derive(Debug, Clone)]
    struct Appeal {
        id: u32,
        name: Option<String>,
        amount: Option<f64>,
        start: Option<NaiveDate>,
        funded: Option<f64>,
    }

    fn appeal(id: u32, name: Option<&str>, amount: Option<f64>) -> Appeal {
        Appeal {
            id,
            name: name.map(String::from),
            amount,
            start: NaiveDate::from_ymd_opt(2024, 1, id),
            funded: Some(id as f64 * 10.0),
        }
    }

    #[test]
    fn test_string_column_reads_and_sorts() {
        let column: Column<Appeal, u32> = create_string_column(
            "name",
            "Name",
            |a: &Appeal| a.name.clone(),
            ColumnOptions::new(),
        );
        let rows = vec![appeal(1, Some("Floods"), None), appeal(2, None, None)];

        assert_eq!(
            column.cell_props(&1, &rows[0], 0, &rows),
            CellProps::Text(Some("Floods".into()))
        );
        assert_eq!(
            column.cell_props(&2, &rows[1], 1, &rows),
            CellProps::Text(None)
        );
        assert!(column.is_sortable());
        assert_eq!(column.compare(&rows[1], &rows[0]), Some(Ordering::Less));
    }

    #[test]
    fn test_number_column_applies_format_and_options() {
        let column: Column<Appeal, u32> = create_number_column(
            "amount",
            "Amount",
            |a: &Appeal| a.amount,
            ColumnOptions::new()
                .width(100.0)
                .stretch()
                .default_sort_direction(SortDirection::Dsc)
                .number(crate::NumberFormat::default().prefix("CHF ")),
        );
        let rows = vec![appeal(1, None, Some(12.0))];

        assert_eq!(column.column_width, Some(100.0));
        assert!(column.column_stretch);
        assert_eq!(column.header.default_direction, SortDirection::Dsc);
        assert_eq!(column.header.align, Align::Right);
        assert_eq!(
            column.cell_props(&1, &rows[0], 0, &rows),
            CellProps::Number {
                value: Some(12.0),
                precision: None,
                prefix: Some("CHF ".into()),
                suffix: None,
            }
        );
    }

    #[test]
    fn test_sortable_false_hides_sort() {
        let column: Column<Appeal, u32> = create_date_column(
            "start",
            "Start",
            |a: &Appeal| a.start,
            ColumnOptions::new().sortable(false),
        );
        assert!(!column.is_sortable());
    }

    #[test]
    fn test_navigation_columns_are_not_sortable() {
        let link: Column<Appeal, u32> = create_link_column(
            "link",
            "Details",
            |a: &Appeal| a.name.clone(),
            |a: &Appeal| Some(format!("/appeals/{}", a.id)),
            ColumnOptions::new(),
        );
        let actions: Column<Appeal, u32> = create_action_column(
            "actions",
            "",
            |_: &u32, _: &Appeal| vec![RowAction::new("edit", "Edit")],
            ColumnOptions::new(),
        );
        let expand: Column<Appeal, u32> =
            create_expand_column("expand", ExpansionState::new(), ColumnOptions::new());

        assert!(link.value_comparator.is_none());
        assert!(!actions.is_sortable());
        assert!(!expand.is_sortable());
        assert_eq!(expand.column_width, Some(EXPAND_COLUMN_WIDTH));
    }

    #[test]
    fn test_expand_column_reads_shared_state() {
        let expansion = ExpansionState::new();
        let column: Column<Appeal, u32> =
            create_expand_column("expand", expansion.clone(), ColumnOptions::new());
        let rows = vec![appeal(7, None, None)];

        assert_eq!(
            column.cell_props(&7, &rows[0], 0, &rows),
            CellProps::Expand { expanded: false }
        );
        expansion.toggle("7");
        assert_eq!(
            column.cell_props(&7, &rows[0], 0, &rows),
            CellProps::Expand { expanded: true }
        );
    }

    #[test]
    fn test_progress_sorts_by_ratio() {
        let column: Column<Appeal, u32> = create_progress_column(
            "funded",
            "Funded",
            |a: &Appeal| a.funded,
            |a: &Appeal| a.amount,
            ColumnOptions::new(),
        );
        // 10 of 20 (50%) vs 20 of 100 (20%)
        let a = appeal(1, None, Some(20.0));
        let b = appeal(2, None, Some(100.0));
        assert_eq!(column.compare(&a, &b), Some(Ordering::Greater));
    }
}
