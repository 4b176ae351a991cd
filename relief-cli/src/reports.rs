//! Field report records and their table columns.

use std::path::Path;

use chrono::NaiveDate;
use relief_api::{FetchFailure, Request};
use relief_table::{
    Column, ColumnOptions, ExpansionModifier, ExpansionState, NumberFormat, SortDirection,
    create_date_column, create_date_range_column, create_expand_column, create_number_column,
    create_progress_column, create_string_column,
};
use serde::Deserialize;

const SAMPLE: &str = include_str!("../data/field_reports.json");

/// Reports at or above this many affected people are highlighted.
const MAJOR_EVENT: f64 = 100_000.0;

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct FieldReport {
    pub id: u32,
    pub summary: String,
    pub country: Option<String>,
    pub disaster_type: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub num_affected: Option<f64>,
    #[serde(default)]
    pub appeals: Vec<Appeal>,
}

impl FieldReport {
    fn amount_requested(&self) -> Option<f64> {
        sum(self.appeals.iter().map(|a| a.amount_requested))
    }

    fn amount_funded(&self) -> Option<f64> {
        sum(self.appeals.iter().map(|a| a.amount_funded))
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Appeal {
    pub code: String,
    pub name: String,
    pub status: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub amount_requested: Option<f64>,
    pub amount_funded: Option<f64>,
}

fn sum(values: impl Iterator<Item = Option<f64>>) -> Option<f64> {
    values.flatten().fold(None, |acc, v| Some(acc.unwrap_or(0.0) + v))
}

/// Load reports from `path`, or the bundled sample.
///
/// The load is modeled as a request so undecodable input is reported the same
/// way a bad server response would be.
pub fn load(path: Option<&Path>) -> Result<Request<Vec<FieldReport>>, std::io::Error> {
    let body = match path {
        Some(path) => std::fs::read_to_string(path)?,
        None => SAMPLE.to_string(),
    };
    let mut request = Request::eager();
    request.resolve_fetch(
        serde_json::from_str(&body).map_err(|e| FetchFailure::Parse(e.to_string())),
    );
    Ok(request)
}

pub fn row_class(_: &u32, report: &FieldReport, _: usize) -> Option<String> {
    report
        .num_affected
        .filter(|n| *n >= MAJOR_EVENT)
        .map(|_| "highlight".to_string())
}

/// Columns of the report table.
pub fn columns(expansion: &ExpansionState) -> Vec<Column<FieldReport, u32>> {
    let money = || NumberFormat::default().precision(0).prefix("CHF ");
    vec![
        create_expand_column("expand", expansion.clone(), ColumnOptions::new()),
        create_date_column(
            "date",
            "Date",
            |r: &FieldReport| r.start_date,
            ColumnOptions::new()
                .width(100.0)
                .default_sort_direction(SortDirection::Dsc),
        ),
        create_string_column(
            "summary",
            "Summary",
            |r: &FieldReport| Some(r.summary.clone()),
            ColumnOptions::new().width(240.0).stretch(),
        ),
        create_string_column(
            "country",
            "Country",
            |r: &FieldReport| r.country.clone(),
            ColumnOptions::new(),
        ),
        create_string_column(
            "disaster",
            "Disaster",
            |r: &FieldReport| r.disaster_type.clone(),
            ColumnOptions::new(),
        ),
        create_number_column(
            "affected",
            "Affected",
            |r: &FieldReport| r.num_affected,
            ColumnOptions::new()
                .width(100.0)
                .default_sort_direction(SortDirection::Dsc)
                .header_info("People affected", "As reported by the national society"),
        ),
        create_number_column(
            "requested",
            "Requested",
            FieldReport::amount_requested,
            ColumnOptions::new().width(130.0).number(money()),
        ),
        create_progress_column(
            "funding",
            "Funding",
            FieldReport::amount_funded,
            FieldReport::amount_requested,
            ColumnOptions::new().width(140.0),
        ),
    ]
}

/// Appeal columns, one per report column so detail rows line up.
pub fn appeal_columns() -> Vec<Column<Appeal, String>> {
    let money = || NumberFormat::default().precision(0).prefix("CHF ");
    vec![
        create_string_column("expand", "", |_: &Appeal| None, ColumnOptions::new()),
        create_string_column(
            "code",
            "Code",
            |a: &Appeal| Some(a.code.clone()),
            ColumnOptions::new(),
        ),
        create_string_column(
            "name",
            "Appeal",
            |a: &Appeal| Some(a.name.clone()),
            ColumnOptions::new(),
        ),
        create_string_column(
            "status",
            "Status",
            |a: &Appeal| a.status.clone(),
            ColumnOptions::new(),
        ),
        create_date_range_column(
            "period",
            "Period",
            |a: &Appeal| (a.start_date, a.end_date),
            ColumnOptions::new(),
        ),
        create_number_column("empty", "", |_: &Appeal| None, ColumnOptions::new()),
        create_number_column(
            "requested",
            "Requested",
            |a: &Appeal| a.amount_requested,
            ColumnOptions::new().number(money()),
        ),
        create_progress_column(
            "funding",
            "Funding",
            |a: &Appeal| a.amount_funded,
            |a: &Appeal| a.amount_requested,
            ColumnOptions::new(),
        ),
    ]
}

/// Shows a report's appeals under the report while it is expanded.
pub fn appeal_modifier(
    expansion: &ExpansionState,
) -> ExpansionModifier<FieldReport, Appeal, String> {
    ExpansionModifier::new(
        expansion.clone(),
        |r: &FieldReport| r.appeals.clone(),
        appeal_columns(),
        |a: &Appeal, _| a.code.clone(),
    )
}

/// Keep reports whose summary contains `needle`, ignoring case.
pub fn filter(reports: &[FieldReport], needle: &str) -> Vec<FieldReport> {
    let needle = needle.to_lowercase();
    reports
        .iter()
        .filter(|r| r.summary.to_lowercase().contains(&needle))
        .cloned()
        .collect()
}
