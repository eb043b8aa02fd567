use chrono::NaiveDate;
use uuid::Uuid;

/// Inclusive number of calendar days covered by `start..=end`.
///
/// A trip that starts and ends on the same day spans one day. Callers are
/// expected to have checked `end >= start`; a reversed range yields zero or
/// a negative count.
pub fn calculate_days(start: NaiveDate, end: NaiveDate) -> i64 {
    (end - start).num_days() + 1
}

pub fn format_date(date: NaiveDate, pattern: &str) -> String {
    date.format(pattern).to_string()
}

pub fn generate_id() -> String {
    Uuid::new_v4().to_string()
}

/// Renders a budget the way a browser's `toLocaleString` would for en-US:
/// grouped thousands, at most two decimals, trailing zeros dropped.
pub fn format_budget(amount: f64, symbol: &str) -> String {
    // Work on the decimal text so amounts beyond integer range stay exact.
    let fixed = format!("{:.2}", amount.max(0.0));
    let (whole, frac) = fixed.split_once('.').unwrap_or((fixed.as_str(), ""));
    let grouped = group_thousands(whole);
    let frac = frac.trim_end_matches('0');
    if frac.is_empty() {
        format!("{symbol}{grouped}")
    } else {
        format!("{symbol}{grouped}.{frac}")
    }
}

fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

pub fn normalize_optional(input: Option<String>) -> Option<String> {
    input.and_then(|value| {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(raw: &str) -> NaiveDate {
        NaiveDate::parse_from_str(raw, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn same_day_trip_spans_one_day() {
        assert_eq!(calculate_days(date("2024-01-01"), date("2024-01-01")), 1);
    }

    #[test]
    fn day_count_is_inclusive() {
        assert_eq!(calculate_days(date("2024-01-01"), date("2024-01-05")), 5);
        // leap day
        assert_eq!(calculate_days(date("2024-02-28"), date("2024-03-01")), 3);
        assert_eq!(calculate_days(date("2023-12-30"), date("2024-01-02")), 4);
    }

    #[test]
    fn dates_render_with_pattern() {
        let d = date("2024-01-05");
        assert_eq!(format_date(d, "%b %-d, %Y"), "Jan 5, 2024");
        assert_eq!(format_date(d, "%d.%m.%Y"), "05.01.2024");
    }

    #[test]
    fn budgets_group_thousands() {
        assert_eq!(format_budget(2000.0, "$"), "$2,000");
        assert_eq!(format_budget(0.0, "$"), "$0");
        assert_eq!(format_budget(999.0, "€"), "€999");
        assert_eq!(format_budget(1_234_567.0, "$"), "$1,234,567");
        assert_eq!(format_budget(1234.5, "$"), "$1,234.5");
        assert_eq!(format_budget(1234.56, "$"), "$1,234.56");
        assert_eq!(format_budget(12.05, "$"), "$12.05");
    }

    #[test]
    fn huge_budgets_are_not_clamped() {
        assert_eq!(
            format_budget(1e20, "$"),
            "$100,000,000,000,000,000,000"
        );
        assert_eq!(format_budget(2e13, "$"), "$20,000,000,000,000");
        assert_eq!(format_budget(0.999, "$"), "$1");
    }

    #[test]
    fn ids_are_distinct() {
        let a = generate_id();
        let b = generate_id();
        assert_ne!(a, b);
        assert!(Uuid::parse_str(&a).is_ok());
    }

    #[test]
    fn blank_optionals_collapse_to_none() {
        assert_eq!(normalize_optional(None), None);
        assert_eq!(normalize_optional(Some("   ".into())), None);
        assert_eq!(
            normalize_optional(Some("  bring sunscreen ".into())),
            Some("bring sunscreen".to_string())
        );
    }
}
