use chrono::NaiveDate;
use relief_table::{
    ColumnOptions, SortContext, SortDirection, SortIndicator, Sorting, Table, TableError,
    TableInput, create_date_column, create_link_column, create_number_column, create_string_column,
    sort_rows,
};

#[derive(Debug, Clone, PartialEq)]
struct Appeal {
    code: &'static str,
    start: Option<NaiveDate>,
    amount: Option<f64>,
}

fn date(y: i32, m: u32, d: u32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(y, m, d)
}

fn appeals() -> Vec<Appeal> {
    vec![
        Appeal {
            code: "MDRBD021",
            start: date(2023, 5, 14),
            amount: Some(250_000.0),
        },
        Appeal {
            code: "MDRKE054",
            start: None,
            amount: Some(90_000.0),
        },
        Appeal {
            code: "MDRPH049",
            start: date(2022, 11, 2),
            amount: None,
        },
    ]
}

fn appeal_table() -> Table<Appeal, &'static str> {
    Table::new(
        vec![
            create_string_column(
                "code",
                "Code",
                |a: &Appeal| Some(a.code.to_string()),
                ColumnOptions::new(),
            ),
            create_date_column("date", "Start", |a: &Appeal| a.start, ColumnOptions::new()),
            create_number_column(
                "amount",
                "Amount",
                |a: &Appeal| a.amount,
                ColumnOptions::new().default_sort_direction(SortDirection::Dsc),
            ),
            create_link_column(
                "open",
                "",
                |_: &Appeal| Some("Open".to_string()),
                |a: &Appeal| Some(format!("/appeals/{}", a.code)),
                ColumnOptions::new(),
            ),
        ],
        |a: &Appeal, _| a.code,
    )
}

// ============================================================================
// Header Click Cycle
// ============================================================================

#[test]
fn test_three_clicks_on_date() {
    let table = appeal_table();
    let states: Vec<Option<Sorting>> = (0..3)
        .map(|_| table.click_header("date").unwrap())
        .collect();

    assert_eq!(
        states,
        vec![
            Some(Sorting::new("date", SortDirection::Asc)),
            Some(Sorting::new("date", SortDirection::Dsc)),
            None,
        ]
    );
}

#[test]
fn test_dsc_default_cycle() {
    let table = appeal_table();
    assert_eq!(
        table.click_header("amount").unwrap().map(|s| s.direction),
        Some(SortDirection::Dsc)
    );
    assert_eq!(
        table.click_header("amount").unwrap().map(|s| s.direction),
        Some(SortDirection::Asc)
    );
    assert_eq!(table.click_header("amount").unwrap(), None);
}

#[test]
fn test_other_column_resets_indicator() {
    let mut table = appeal_table();
    table.click_header("date").unwrap();
    table.click_header("code").unwrap();

    let rendered = table.render(TableInput::new(None, false, false));
    let header = rendered.header.unwrap();
    let indicator = |id: &str| header.iter().find(|h| h.column_id == id).map(|h| h.indicator);

    assert_eq!(indicator("code"), Some(SortIndicator::Asc));
    assert_eq!(indicator("date"), Some(SortIndicator::Unsorted));
    assert_eq!(indicator("open"), Some(SortIndicator::None));
}

#[test]
fn test_unknown_and_unsortable_headers() {
    let table = appeal_table();
    assert!(matches!(table.click_header("nope"), Err(TableError::UnknownColumn(_))));

    table.click_header("code").unwrap();
    assert_eq!(
        table.click_header("open").unwrap(),
        Some(Sorting::new("code", SortDirection::Asc))
    );
}

#[test]
fn test_shared_context_sees_clicks() {
    let context = SortContext::new();
    let table = appeal_table().with_sort_context(context.clone());
    assert!(!context.take_changed());

    table.click_header("amount").unwrap();
    assert!(context.take_changed());
    assert_eq!(context.direction_of("amount"), Some(SortDirection::Dsc));
}

// ============================================================================
// Client-Side Sorting
// ============================================================================

#[test]
fn test_header_click_does_not_reorder() {
    let mut table = appeal_table();
    let data = appeals();
    table.click_header("amount").unwrap();

    let rendered = table.render(TableInput::new(Some(data.as_slice()), false, false));
    let keys: Vec<&str> = rendered.rows.iter().map(|r| r.key.as_str()).collect();
    assert_eq!(keys, vec!["MDRBD021", "MDRKE054", "MDRPH049"]);
}

#[test]
fn test_apply_sort_missing_first() {
    let table = appeal_table();
    let mut data = appeals();
    table.click_header("date").unwrap();
    table.apply_sort(&mut data);

    let codes: Vec<&str> = data.iter().map(|a| a.code).collect();
    assert_eq!(codes, vec!["MDRKE054", "MDRPH049", "MDRBD021"]);
}

#[test]
fn test_sort_rows_descending_amount() {
    let table = appeal_table();
    let mut data = appeals();
    sort_rows(
        &mut data,
        table.columns(),
        Some(&Sorting::new("amount", SortDirection::Dsc)),
    );
    let codes: Vec<&str> = data.iter().map(|a| a.code).collect();
    assert_eq!(codes, vec!["MDRBD021", "MDRKE054", "MDRPH049"]);
}

#[test]
fn test_sort_rows_ignores_unknown_column() {
    let table = appeal_table();
    let mut data = appeals();
    sort_rows(&mut data, table.columns(), Some(&Sorting::new("ghost", SortDirection::Asc)));
    assert_eq!(data, appeals());
}
