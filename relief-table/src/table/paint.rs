//! Text painter for rendered tables.
//!
//! Widths are layout units; the painter snaps each column edge to the nearest
//! terminal cell from the cumulative sum, so rounding error never accumulates
//! across a row and detail rows line up with their parent.

use crate::cell::{Align, CellRegistry, RenderContext, Tone};
use crate::config::TableConfig;
use crate::header::RenderedHeader;
use crate::row::RenderedRow;
use crate::text::{display_width, fit_to_width};

use super::RenderedTable;

const INDENT: &str = "  ";

/// Appended to header titles that carry an info note.
const INFO_MARKER: &str = "*";

/// A run of styled text.
#[derive(Debug, Clone, PartialEq)]
pub struct Span {
    pub text: String,
    pub tone: Tone,
    pub bold: bool,
    /// Row and cell classes, for output layers that style by class.
    pub class: Option<String>,
}

impl Span {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            tone: Tone::Default,
            bold: false,
            class: None,
        }
    }

    pub fn tone(mut self, tone: Tone) -> Self {
        self.tone = tone;
        self
    }

    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    pub fn class(mut self, class: Option<String>) -> Self {
        self.class = class;
        self
    }
}

/// One painted line.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Line {
    pub spans: Vec<Span>,
}

impl Line {
    pub fn new(spans: Vec<Span>) -> Self {
        Self { spans }
    }

    /// The line without styling.
    pub fn plain(&self) -> String {
        self.spans.iter().map(|span| span.text.as_str()).collect()
    }

    pub fn width(&self) -> usize {
        display_width(&self.plain())
    }
}

/// Column edges in cells, `widths.len() + 1` entries starting at 0.
pub fn cell_edges(widths: &[f64], units_per_cell: f64) -> Vec<usize> {
    let units = if units_per_cell.is_finite() && units_per_cell > 0.0 {
        units_per_cell
    } else {
        1.0
    };
    let mut edges = Vec::with_capacity(widths.len() + 1);
    edges.push(0);
    let mut total = 0.0;
    for width in widths {
        if width.is_finite() && *width > 0.0 {
            total += width;
        }
        let edge = (total / units).round() as usize;
        // Never step backwards, even if a column rounds to nothing.
        edges.push(edge.max(edges.last().copied().unwrap_or(0)));
    }
    edges
}

/// Paint a rendered table as terminal lines.
///
/// Layout: optional caption, header row and rule, the placeholder message
/// (pending or empty), the body rows, then one note per header that carries
/// info. Titles with a note are marked with `*`.
pub fn paint(table: &RenderedTable, registry: &CellRegistry, config: &TableConfig) -> Vec<Line> {
    let edges = cell_edges(&table.widths.values(), config.units_per_cell);
    let columns: Vec<usize> = edges.windows(2).map(|pair| pair[1] - pair[0]).collect();
    let total = edges.last().copied().unwrap_or(0);

    let mut lines = Vec::new();

    if let Some(caption) = &table.caption {
        lines.push(Line::new(vec![Span::new(caption.clone()).bold()]));
    }

    if let Some(header) = &table.header {
        lines.push(header_line(header, &columns));
        lines.push(Line::new(vec![Span::new("─".repeat(total)).tone(Tone::Muted)]));
    }

    if let Some(message) = &table.message {
        let text = fit_to_width(message, total.max(display_width(message)), Align::Left);
        lines.push(Line::new(vec![Span::new(text).tone(Tone::Muted)]));
    }

    for row in &table.rows {
        lines.push(row_line(row, &columns, registry, config));
    }

    for (title, description) in table.header.iter().flatten().filter_map(|h| h.info.as_ref()) {
        let note = format!("{INFO_MARKER} {title}: {description}");
        let text = fit_to_width(&note, total.max(display_width(&note)), Align::Left);
        lines.push(Line::new(vec![Span::new(text).tone(Tone::Muted)]));
    }

    lines
}

fn header_line(header: &[RenderedHeader], columns: &[usize]) -> Line {
    let spans = columns
        .iter()
        .enumerate()
        .map(|(i, &width)| match header.get(i) {
            Some(cell) => {
                let mut label = cell.title.clone();
                if cell.info.is_some() {
                    label.push_str(INFO_MARKER);
                }
                let symbol = cell.indicator.symbol();
                if !symbol.is_empty() {
                    label = format!("{label} {symbol}");
                }
                Span::new(cell_text(&label, width, cell.align))
                    .bold()
                    .class(cell.class.clone())
            }
            None => Span::new(" ".repeat(width)),
        })
        .collect();
    Line::new(spans)
}

fn row_line(
    row: &RenderedRow,
    columns: &[usize],
    registry: &CellRegistry,
    config: &TableConfig,
) -> Line {
    let indent = INDENT.len() * row.depth;
    let spans = columns
        .iter()
        .enumerate()
        .map(|(i, &width)| {
            let Some(cell) = row.cells.get(i) else {
                return Span::new(" ".repeat(width));
            };
            if width == 0 {
                return Span::new(String::new());
            }
            let inner = width.saturating_sub(1);
            let (prefix, available) = if i == 0 {
                let used = indent.min(inner);
                (" ".repeat(used), inner - used)
            } else {
                (String::new(), inner)
            };
            let cx = RenderContext {
                config,
                width: available,
            };
            let content = registry.render(&cell.props, &cx);
            let body = cell_text(&content.text, available + 1, content.align);
            let text = format!("{prefix}{body}");
            Span::new(text)
                .tone(content.tone)
                .class(join(row.class.as_deref(), cell.class.as_deref()))
        })
        .collect();
    Line::new(spans)
}

/// Fit `text` into a column `width` cells wide, keeping one cell of gutter.
fn cell_text(text: &str, width: usize, align: Align) -> String {
    if width == 0 {
        return String::new();
    }
    let mut out = fit_to_width(text, width - 1, align);
    out.push(' ');
    out
}

fn join(row: Option<&str>, cell: Option<&str>) -> Option<String> {
    match (row, cell) {
        (Some(row), Some(cell)) => Some(format!("{row} {cell}")),
        (Some(one), None) | (None, Some(one)) => Some(one.to_string()),
        (None, None) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edges_accumulate_before_rounding() {
        assert_eq!(cell_edges(&[10.4, 10.4, 10.4], 1.0), vec![0, 10, 21, 31]);
        assert_eq!(cell_edges(&[150.0, 350.0], 10.0), vec![0, 15, 50]);
        assert_eq!(cell_edges(&[f64::NAN, 5.0], 0.0), vec![0, 0, 5]);
    }

    #[test]
    fn test_cell_text_keeps_gutter() {
        assert_eq!(cell_text("abc", 5, Align::Left), "abc  ");
        assert_eq!(cell_text("abc", 5, Align::Right), " abc ");
        assert_eq!(cell_text("abcdef", 4, Align::Left), "ab… ");
        assert_eq!(cell_text("x", 0, Align::Left), "");
    }
}
