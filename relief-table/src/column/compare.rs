//! Comparators used by the column factories.
//!
//! Missing values order before present ones, the same way `Option` does,
//! so a column's empty cells gather at the top of an ascending sort.

use std::cmp::Ordering;

use chrono::NaiveDate;

/// Case-insensitive, with a case-sensitive tiebreak so the order is total.
pub fn compare_text(a: Option<&str>, b: Option<&str>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a
            .to_lowercase()
            .cmp(&b.to_lowercase())
            .then_with(|| a.cmp(b)),
        (a, b) => a.is_some().cmp(&b.is_some()),
    }
}

pub fn compare_number(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.total_cmp(&b),
        (a, b) => a.is_some().cmp(&b.is_some()),
    }
}

pub fn compare_date(a: Option<NaiveDate>, b: Option<NaiveDate>) -> Ordering {
    a.cmp(&b)
}

/// By start date, then by end date.
pub fn compare_date_range(
    a: (Option<NaiveDate>, Option<NaiveDate>),
    b: (Option<NaiveDate>, Option<NaiveDate>),
) -> Ordering {
    compare_date(a.0, b.0).then_with(|| compare_date(a.1, b.1))
}

pub fn compare_bool(a: Option<bool>, b: Option<bool>) -> Ordering {
    a.cmp(&b)
}

/// By item count, then by the items themselves.
pub fn compare_list(a: &[String], b: &[String]) -> Ordering {
    a.len().cmp(&b.len()).then_with(|| {
        a.iter()
            .zip(b)
            .map(|(x, y)| compare_text(Some(x), Some(y)))
            .find(|o| o.is_ne())
            .unwrap_or(Ordering::Equal)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_sorts_first() {
        assert_eq!(compare_text(None, Some("a")), Ordering::Less);
        assert_eq!(compare_number(Some(-5.0), None), Ordering::Greater);
        assert_eq!(
            compare_date(None, NaiveDate::from_ymd_opt(2020, 1, 1)),
            Ordering::Less
        );
        assert_eq!(compare_bool(None, None), Ordering::Equal);
    }

    #[test]
    fn test_text_ignores_case_first() {
        assert_eq!(compare_text(Some("apple"), Some("Banana")), Ordering::Less);
        assert_eq!(compare_text(Some("Nepal"), Some("nepal")), Ordering::Less);
    }

    #[test]
    fn test_number_total_order() {
        assert_eq!(compare_number(Some(2.0), Some(10.0)), Ordering::Less);
        assert_eq!(compare_number(Some(f64::NAN), Some(1.0)), Ordering::Greater);
    }

    #[test]
    fn test_list_by_len_then_items() {
        let one = vec!["b".to_string()];
        let two = vec!["a".to_string(), "a".to_string()];
        assert_eq!(compare_list(&one, &two), Ordering::Less);
        assert_eq!(
            compare_list(&["a".to_string()], &["b".to_string()]),
            Ordering::Less
        );
    }
}
