use std::path::PathBuf;
use std::str::FromStr;

use clap::Parser;
use relief_table::SortDirection;

/// Render field reports as a table in the terminal.
#[derive(Debug, Parser)]
#[command(name = "relief")]
#[command(about = "Render field reports as a terminal table")]
#[command(version)]
pub struct Args {
    /// JSON array of field reports (defaults to the bundled sample)
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Container width in terminal cells (defaults to the terminal width)
    #[arg(short, long)]
    pub width: Option<u16>,

    /// Sort by COLUMN, optionally with a direction: `date`, `affected:dsc`
    #[arg(short, long, value_name = "COLUMN[:asc|:dsc]")]
    pub sort: Option<SortArg>,

    /// Only show reports whose summary contains TEXT (case-insensitive)
    #[arg(short, long, value_name = "TEXT")]
    pub filter: Option<String>,

    /// Expand a report to show its appeals
    #[arg(short, long, value_name = "ID")]
    pub expand: Vec<u32>,

    /// Resize a column, as if its edge was dragged
    #[arg(long, value_name = "COLUMN=WIDTH")]
    pub resize: Vec<ResizeArg>,

    /// Size the table to its columns instead of the terminal
    #[arg(long)]
    pub fixed: bool,

    /// Show the table as if a refresh was in flight
    #[arg(long)]
    pub pending: bool,

    /// Print without colors
    #[arg(long)]
    pub plain: bool,

    /// Table config file (defaults to config.json in the config directory)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Log at debug level
    #[arg(short, long)]
    pub verbose: bool,
}

/// `COLUMN[:asc|:dsc]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortArg {
    pub column: String,
    /// `None` means the column's default direction.
    pub direction: Option<SortDirection>,
}

impl FromStr for SortArg {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (column, direction) = match s.split_once(':') {
            Some((column, direction)) => (column, Some(direction.parse::<SortDirection>()?)),
            None => (s, None),
        };
        if column.is_empty() {
            return Err("missing column name".to_string());
        }
        Ok(Self {
            column: column.to_string(),
            direction,
        })
    }
}

/// `COLUMN=WIDTH`, width in terminal cells.
#[derive(Debug, Clone, PartialEq)]
pub struct ResizeArg {
    pub column: String,
    pub width: f64,
}

impl FromStr for ResizeArg {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (column, width) = s
            .split_once('=')
            .ok_or_else(|| format!("expected COLUMN=WIDTH, got {s:?}"))?;
        let width = width
            .parse::<f64>()
            .map_err(|e| format!("invalid width {width:?}: {e}"))?;
        Ok(Self {
            column: column.to_string(),
            width,
        })
    }
}
