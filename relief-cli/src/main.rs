mod args;
mod error;
mod output;
mod paths;
mod reports;

use std::fs::File;
use std::io::IsTerminal;
use std::process::ExitCode;

use clap::Parser;
use log::{debug, info, warn};
use relief_table::{CellRegistry, ExpansionState, Table, TableConfig, TableInput, paint};
use simplelog::{Config, LevelFilter, WriteLogger};

use crate::args::{Args, SortArg};
use crate::error::CliError;
use crate::reports::FieldReport;

/// Layout units per terminal cell when no config file sets one.
const UNITS_PER_CELL: f64 = 8.0;

/// Used when the terminal size cannot be read.
const FALLBACK_WIDTH: u16 = 120;

fn setup_logging(verbose: bool) {
    paths::rotate_logs();
    let Some(path) = paths::log_file() else { return };
    let Ok(file) = File::create(&path) else { return };
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    if WriteLogger::init(level, Config::default(), file).is_ok() {
        info!("logging to {}", path.display());
    }
}

fn load_config(args: &Args) -> Result<TableConfig, CliError> {
    let base = TableConfig::default().units_per_cell(UNITS_PER_CELL);
    match args.config.clone().or_else(paths::config_file) {
        Some(path) => {
            debug!("table config from {}", path.display());
            Ok(base.overlay_path(path)?)
        }
        None => Ok(base),
    }
}

/// Click the header of `sort.column` until the requested direction is active.
fn apply_sort_arg(table: &Table<FieldReport, u32>, sort: &SortArg) -> Result<(), CliError> {
    // The cycle has three states, so three clicks reach any of them.
    for _ in 0..3 {
        let sorting = table.click_header(&sort.column)?;
        let reached = match (&sorting, sort.direction) {
            (Some(s), Some(direction)) => s.name == sort.column && s.direction == direction,
            (Some(s), None) => s.name == sort.column,
            (None, _) => false,
        };
        if reached {
            return Ok(());
        }
    }
    Err(CliError::InvalidArgument(format!(
        "column {:?} cannot be sorted",
        sort.column
    )))
}

fn run(args: Args) -> Result<(), CliError> {
    let config = load_config(&args)?;
    let units = config.units_per_cell;

    let mut request = reports::load(args.input.as_deref())?;
    if let Some(error) = request.state().error() {
        return Err(error.clone().into());
    }
    if args.pending {
        // Stale rows stay visible under the pending message.
        request.trigger();
    }
    let (pending, data) = request.state().table_flags();
    let mut rows: Option<Vec<FieldReport>> = data.cloned();

    let expansion = ExpansionState::new();
    for id in &args.expand {
        expansion.expand(&id.to_string());
    }

    let mut table = Table::new(reports::columns(&expansion), |r: &FieldReport, _| r.id)
        .config(config.clone())
        .caption("Field reports")
        .row_class(reports::row_class)
        .row_modifier(reports::appeal_modifier(&expansion))
        .resizable_columns(true)
        .fixed_column_width(args.fixed);

    let cells = match args.width {
        Some(width) => width,
        None => crossterm::terminal::size()
            .map(|(width, _)| width)
            .unwrap_or(FALLBACK_WIDTH),
    };
    table.set_container_width(f64::from(cells) * units);

    for resize in &args.resize {
        table.begin_resize(&resize.column)?;
        let width = table.drag_resize(resize.width * units)?;
        if width > resize.width * units {
            warn!("column {} clamped to {width}", resize.column);
        }
        table.end_resize()?;
    }

    if let Some(sort) = &args.sort {
        apply_sort_arg(&table, sort)?;
        if let Some(rows) = rows.as_mut() {
            table.apply_sort(rows);
        }
    }

    if let Some(needle) = &args.filter {
        rows = rows.map(|all| reports::filter(&all, needle));
    }

    let rendered = table.render(TableInput::new(rows.as_deref(), pending, args.filter.is_some()));
    debug!("rendered {} rows in {:?} mode", rendered.rows.len(), rendered.mode);

    let lines = paint(&rendered, &CellRegistry::new(), &config);
    let stdout = std::io::stdout();
    let plain = args.plain || !stdout.is_terminal();
    output::write_lines(&mut stdout.lock(), &lines, plain)?;
    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();
    setup_logging(args.verbose);

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
