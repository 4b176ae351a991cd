use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::config::TableConfig;

use super::{CellKind, CellProps};

/// Horizontal alignment of cell text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Align {
    #[default]
    Left,
    Center,
    Right,
}

/// Semantic color of a piece of output. The front end maps tones to colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tone {
    #[default]
    Default,
    Muted,
    Accent,
    Positive,
    Negative,
}

/// Display-ready content of one cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellContent {
    pub text: String,
    pub align: Align,
    pub tone: Tone,
}

impl CellContent {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            align: Align::Left,
            tone: Tone::Default,
        }
    }

    pub fn align(mut self, align: Align) -> Self {
        self.align = align;
        self
    }

    pub fn tone(mut self, tone: Tone) -> Self {
        self.tone = tone;
        self
    }
}

/// What a render function may look at besides the props.
#[derive(Debug, Clone, Copy)]
pub struct RenderContext<'a> {
    pub config: &'a TableConfig,
    /// Terminal columns available for the content.
    pub width: usize,
}

pub type CellRenderFn = Arc<dyn Fn(&CellProps, &RenderContext<'_>) -> CellContent + Send + Sync>;

/// Maps each [`CellKind`] to the function that renders it.
///
/// Starts with the built-in renderers; [`CellRegistry::register`] swaps one
/// out for every column of that kind.
#[derive(Clone)]
pub struct CellRegistry {
    renderers: HashMap<CellKind, CellRenderFn>,
}

impl fmt::Debug for CellRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CellRegistry")
            .field("kinds", &self.renderers.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl Default for CellRegistry {
    fn default() -> Self {
        let mut renderers: HashMap<CellKind, CellRenderFn> = HashMap::new();
        renderers.insert(CellKind::Text, Arc::new(render_text));
        renderers.insert(CellKind::Number, Arc::new(render_number));
        renderers.insert(CellKind::Date, Arc::new(render_date));
        renderers.insert(CellKind::DateRange, Arc::new(render_date_range));
        renderers.insert(CellKind::Boolean, Arc::new(render_boolean));
        renderers.insert(CellKind::Progress, Arc::new(render_progress));
        renderers.insert(CellKind::Link, Arc::new(render_link));
        renderers.insert(CellKind::Actions, Arc::new(render_actions));
        renderers.insert(CellKind::Expand, Arc::new(render_expand));
        renderers.insert(CellKind::List, Arc::new(render_list));
        Self { renderers }
    }
}

impl CellRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the renderer used for `kind`.
    pub fn register(
        &mut self,
        kind: CellKind,
        render: impl Fn(&CellProps, &RenderContext<'_>) -> CellContent + Send + Sync + 'static,
    ) {
        self.renderers.insert(kind, Arc::new(render));
    }

    /// Render props with the function registered for their kind.
    pub fn render(&self, props: &CellProps, cx: &RenderContext<'_>) -> CellContent {
        match self.renderers.get(&props.kind()) {
            Some(render) => render(props, cx),
            None => placeholder(cx),
        }
    }
}

fn placeholder(cx: &RenderContext<'_>) -> CellContent {
    CellContent::new(cx.config.placeholder.clone()).tone(Tone::Muted)
}

fn render_text(props: &CellProps, cx: &RenderContext<'_>) -> CellContent {
    match props {
        CellProps::Text(Some(value)) => CellContent::new(value.clone()),
        _ => placeholder(cx),
    }
}

fn render_number(props: &CellProps, cx: &RenderContext<'_>) -> CellContent {
    let CellProps::Number {
        value: Some(value),
        precision,
        prefix,
        suffix,
    } = props
    else {
        return placeholder(cx).align(Align::Right);
    };
    if !value.is_finite() {
        return placeholder(cx).align(Align::Right);
    }

    let text = format!(
        "{}{}{}",
        prefix.as_deref().unwrap_or(""),
        format_number(*value, *precision),
        suffix.as_deref().unwrap_or("")
    );
    CellContent::new(text).align(Align::Right)
}

fn render_date(props: &CellProps, cx: &RenderContext<'_>) -> CellContent {
    match props {
        CellProps::Date(Some(date)) => {
            CellContent::new(date.format(&cx.config.date_format).to_string())
        }
        _ => placeholder(cx),
    }
}

fn render_date_range(props: &CellProps, cx: &RenderContext<'_>) -> CellContent {
    let CellProps::DateRange { start, end } = props else {
        return placeholder(cx);
    };
    if start.is_none() && end.is_none() {
        return placeholder(cx);
    }

    let format = |date: &Option<chrono::NaiveDate>| match date {
        Some(d) => d.format(&cx.config.date_format).to_string(),
        None => cx.config.placeholder.clone(),
    };
    CellContent::new(format!("{} → {}", format(start), format(end)))
}

fn render_boolean(props: &CellProps, cx: &RenderContext<'_>) -> CellContent {
    match props {
        CellProps::Boolean(Some(true)) => CellContent::new("Yes").tone(Tone::Positive),
        CellProps::Boolean(Some(false)) => CellContent::new("No").tone(Tone::Negative),
        _ => placeholder(cx),
    }
}

fn render_progress(props: &CellProps, cx: &RenderContext<'_>) -> CellContent {
    let CellProps::Progress {
        value: Some(value),
        total,
    } = props
    else {
        return placeholder(cx);
    };

    let total = total.unwrap_or(100.0);
    if total == 0.0 || !total.is_finite() || !value.is_finite() {
        return placeholder(cx);
    }

    let percent = (value / total * 100.0).clamp(0.0, 100.0);
    let label = format!("{percent:.0}%");
    let bar_len = cx.width.saturating_sub(label.len() + 1);
    if bar_len < 3 {
        return CellContent::new(label).align(Align::Right);
    }

    let filled = ((percent / 100.0) * bar_len as f64).round() as usize;
    let bar = format!("{}{}", "█".repeat(filled), "░".repeat(bar_len - filled));
    CellContent::new(format!("{bar} {label}")).tone(Tone::Accent)
}

fn render_link(props: &CellProps, cx: &RenderContext<'_>) -> CellContent {
    match props {
        CellProps::Link {
            label: Some(label), ..
        } => CellContent::new(label.clone()).tone(Tone::Accent),
        _ => placeholder(cx),
    }
}

fn render_actions(props: &CellProps, _cx: &RenderContext<'_>) -> CellContent {
    let CellProps::Actions(actions) = props else {
        return CellContent::new("");
    };
    let labels: Vec<&str> = actions.iter().map(|a| a.label.as_str()).collect();
    CellContent::new(labels.join(" | "))
        .tone(Tone::Accent)
        .align(Align::Right)
}

fn render_expand(props: &CellProps, _cx: &RenderContext<'_>) -> CellContent {
    let expanded = matches!(props, CellProps::Expand { expanded: true });
    CellContent::new(if expanded { "▾" } else { "▸" }).align(Align::Center)
}

fn render_list(props: &CellProps, cx: &RenderContext<'_>) -> CellContent {
    match props {
        CellProps::List(items) if !items.is_empty() => CellContent::new(items.join(", ")),
        _ => placeholder(cx),
    }
}

/// Format with thousands separators. Whole numbers drop the fraction unless
/// a precision is given.
fn format_number(value: f64, precision: Option<usize>) -> String {
    let precision = precision.unwrap_or(if value.fract() == 0.0 { 0 } else { 2 });
    let formatted = format!("{:.*}", precision, value.abs());
    let (int_part, frac_part) = match formatted.split_once('.') {
        Some((int_part, frac_part)) => (int_part, Some(frac_part)),
        None => (formatted.as_str(), None),
    };

    let mut grouped = String::with_capacity(formatted.len() + int_part.len() / 3 + 1);
    if value < 0.0 && formatted.chars().any(|c| c != '0' && c != '.') {
        grouped.push('-');
    }
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if let Some(frac) = frac_part {
        grouped.push('.');
        grouped.push_str(frac);
    }
    grouped
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    fn cx(config: &TableConfig, width: usize) -> RenderContext<'_> {
        RenderContext { config, width }
    }

    #[test]
    fn test_format_number_groups_thousands() {
        assert_eq!(format_number(1234567.0, None), "1,234,567");
        assert_eq!(format_number(999.0, None), "999");
        assert_eq!(format_number(-1500.5, None), "-1,500.50");
        assert_eq!(format_number(0.26, Some(1)), "0.3");
        assert_eq!(format_number(-0.0001, Some(2)), "0.00");
    }

    #[test]
    fn test_missing_values_render_placeholder() {
        let config = TableConfig::default();
        let registry = CellRegistry::new();
        let cx = cx(&config, 10);

        for props in [
            CellProps::Text(None),
            CellProps::Date(None),
            CellProps::Boolean(None),
            CellProps::List(Vec::new()),
            CellProps::DateRange {
                start: None,
                end: None,
            },
        ] {
            let content = registry.render(&props, &cx);
            assert_eq!(content.text, "-", "{props:?}");
            assert_eq!(content.tone, Tone::Muted);
        }
    }

    #[test]
    fn test_number_is_right_aligned_with_affixes() {
        let config = TableConfig::default();
        let content = CellRegistry::new().render(
            &CellProps::Number {
                value: Some(2500.0),
                precision: None,
                prefix: Some("CHF ".into()),
                suffix: None,
            },
            &cx(&config, 12),
        );
        assert_eq!(content.text, "CHF 2,500");
        assert_eq!(content.align, Align::Right);
    }

    #[test]
    fn test_date_range_with_open_end() {
        let config = TableConfig::default();
        let content = CellRegistry::new().render(
            &CellProps::DateRange {
                start: NaiveDate::from_ymd_opt(2024, 3, 1),
                end: None,
            },
            &cx(&config, 30),
        );
        assert_eq!(content.text, "2024-03-01 → -");
    }

    #[test]
    fn test_progress_bar_fills_available_width() {
        let config = TableConfig::default();
        let content = CellRegistry::new().render(
            &CellProps::Progress {
                value: Some(30.0),
                total: Some(60.0),
            },
            &cx(&config, 14),
        );
        // 14 columns: "50%" + space leaves a 10 column bar
        assert_eq!(content.text, "█████░░░░░ 50%");
    }

    #[test]
    fn test_progress_zero_total_is_placeholder() {
        let config = TableConfig::default();
        let content = CellRegistry::new().render(
            &CellProps::Progress {
                value: Some(3.0),
                total: Some(0.0),
            },
            &cx(&config, 14),
        );
        assert_eq!(content.text, "-");
    }

    #[test]
    fn test_register_overrides_builtin() {
        let config = TableConfig::default();
        let mut registry = CellRegistry::new();
        registry.register(CellKind::Boolean, |props, _| match props {
            CellProps::Boolean(Some(true)) => CellContent::new("✔"),
            _ => CellContent::new("✘"),
        });

        let content = registry.render(&CellProps::Boolean(Some(true)), &cx(&config, 3));
        assert_eq!(content.text, "✔");
    }
}
