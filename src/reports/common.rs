//! Shared formatting helpers for the report generators.

/// Format a count with thousands separators: 1234567 becomes "1,234,567".
pub fn format_count(value: usize) -> String {
    let digits = value.to_string();
    let mut result = String::with_capacity(digits.len() + digits.len() / 3);

    for (i, digit) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            result.push(',');
        }
        result.push(digit);
    }

    result
}

/// Percentage of `count` within `total`, 0 when `total` is zero.
#[expect(clippy::cast_precision_loss, reason = "plugin counts are far below 2^52")]
pub fn percent_of(count: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }

    count as f64 / total as f64 * 100.0
}

/// Format a count together with its share of `total`: "1,234 (45.6%)".
pub fn format_count_with_percent(count: usize, total: usize) -> String {
    format!("{} ({:.1}%)", format_count(count), percent_of(count, total))
}

/// Format an optional statistic with the given precision, "n/a" when absent.
pub fn format_stat(value: Option<f64>, decimals: usize) -> String {
    value.map_or_else(|| "n/a".to_string(), |value| format!("{value:.decimals$}"))
}

/// Format an optional percentage with one decimal, "n/a" when absent.
pub fn format_percent_stat(value: Option<f64>) -> String {
    value.map_or_else(|| "n/a".to_string(), |value| format!("{value:.1}%"))
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn count_separators() {
        assert_eq!(format_count(0), "0");
        assert_eq!(format_count(999), "999");
        assert_eq!(format_count(1000), "1,000");
        assert_eq!(format_count(1_234_567), "1,234,567");
    }

    #[test]
    fn percent_of_zero_total() {
        assert!((percent_of(5, 0) - 0.0).abs() < 1e-9);
        assert!((percent_of(1, 4) - 25.0).abs() < 1e-9);
    }

    #[test]
    fn count_with_percent() {
        assert_eq!(format_count_with_percent(1, 4), "1 (25.0%)");
        assert_eq!(format_count_with_percent(1500, 3000), "1,500 (50.0%)");
    }

    #[test]
    fn optional_stats() {
        assert_eq!(format_stat(Some(28.333_333), 1), "28.3");
        assert_eq!(format_stat(Some(4.0), 0), "4");
        assert_eq!(format_stat(None, 1), "n/a");
        assert_eq!(format_percent_stat(Some(58.25)), "58.2%");
        assert_eq!(format_percent_stat(None), "n/a");
    }
}
