//! Writes painted lines to the terminal.

use std::io::Write;

use crossterm::QueueableCommand;
use crossterm::style::{Attribute, Color, Print, ResetColor, SetAttribute, SetForegroundColor};
use relief_table::{Line, Span, Tone};

fn tone_color(tone: Tone) -> Option<Color> {
    match tone {
        Tone::Default => None,
        Tone::Muted => Some(Color::DarkGrey),
        Tone::Accent => Some(Color::Cyan),
        Tone::Positive => Some(Color::Green),
        Tone::Negative => Some(Color::Red),
    }
}

fn is_highlighted(span: &Span) -> bool {
    span.class
        .as_deref()
        .is_some_and(|class| class.split(' ').any(|c| c == "highlight"))
}

/// Write `lines`, styled unless `plain` is set.
pub fn write_lines(out: &mut impl Write, lines: &[Line], plain: bool) -> std::io::Result<()> {
    for line in lines {
        if plain {
            writeln!(out, "{}", line.plain().trim_end())?;
            continue;
        }
        for span in &line.spans {
            if let Some(color) = tone_color(span.tone) {
                out.queue(SetForegroundColor(color))?;
            } else if is_highlighted(span) {
                out.queue(SetForegroundColor(Color::Yellow))?;
            }
            if span.bold {
                out.queue(SetAttribute(Attribute::Bold))?;
            }
            out.queue(Print(&span.text))?;
            out.queue(SetAttribute(Attribute::Reset))?;
            out.queue(ResetColor)?;
        }
        out.queue(Print("\n"))?;
    }
    out.flush()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_output_trims() {
        let lines = vec![
            Line::new(vec![Span::new("Name  "), Span::new("Count ")]),
            Line::new(vec![Span::new("Floods").tone(Tone::Muted)]),
        ];
        let mut out = Vec::new();
        write_lines(&mut out, &lines, true).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "Name  Count\nFloods\n");
    }

    #[test]
    fn test_highlight_class() {
        let span = Span::new("x").class(Some("row highlight".to_string()));
        assert!(is_highlighted(&span));
        assert!(!is_highlighted(&Span::new("x")));
    }
}
