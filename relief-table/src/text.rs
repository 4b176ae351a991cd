//! Terminal text measurement.

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::cell::Align;

pub fn display_width(s: &str) -> usize {
    s.width()
}

pub fn char_width(c: char) -> usize {
    c.width().unwrap_or(0)
}

/// Cut `s` down to `max_width` columns, ending with an ellipsis when cut.
pub fn truncate_to_width(s: &str, max_width: usize) -> String {
    if display_width(s) <= max_width {
        return s.to_string();
    }
    if max_width == 0 {
        return String::new();
    }

    let target = max_width - 1;
    let mut result = String::new();
    let mut width = 0;
    for ch in s.chars() {
        let w = char_width(ch);
        if width + w > target {
            break;
        }
        result.push(ch);
        width += w;
    }
    result.push('…');
    result
}

/// Truncate then pad `s` so it occupies exactly `width` columns.
pub fn fit_to_width(s: &str, width: usize, align: Align) -> String {
    let text = truncate_to_width(s, width);
    let gap = width.saturating_sub(display_width(&text));
    let (left, right) = match align {
        Align::Left => (0, gap),
        Align::Right => (gap, 0),
        Align::Center => (gap / 2, gap - gap / 2),
    };
    format!("{}{}{}", " ".repeat(left), text, " ".repeat(right))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_adds_ellipsis() {
        assert_eq!(truncate_to_width("Floods", 4), "Flo…");
        assert_eq!(truncate_to_width("Floods", 6), "Floods");
        assert_eq!(truncate_to_width("Floods", 0), "");
    }

    #[test]
    fn test_wide_glyphs_count_double() {
        assert_eq!(display_width("救援"), 4);
        assert_eq!(truncate_to_width("救援行动", 5), "救援…");
    }

    #[test]
    fn test_fit_aligns() {
        assert_eq!(fit_to_width("42", 5, Align::Right), "   42");
        assert_eq!(fit_to_width("ab", 5, Align::Left), "ab   ");
        assert_eq!(fit_to_width("ab", 5, Align::Center), " ab  ");
    }
}
