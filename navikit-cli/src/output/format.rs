//! Small pure formatters.

use chrono::Utc;

/// The current month in `YYYY-MM` form.
pub fn current_month() -> String {
    Utc::now().format("%Y-%m").to_string()
}

/// Converts `YYYY-MM` to the billing API's `YYYYMM` form.
pub fn to_yyyymm(month: &str) -> String {
    month.replace('-', "")
}

/// Formats meters as `"1.5km"` or `"500m"`.
pub fn format_distance(meters: u64) -> String {
    if meters >= 1000 {
        format!("{:.1}km", meters as f64 / 1000.0)
    } else {
        format!("{meters}m")
    }
}

/// Formats a millisecond duration as `"1h 31m"` or `"45m"`.
///
/// Minutes are rounded, so 30 s displays as one minute.
pub fn format_duration_ms(ms: u64) -> String {
    let total_minutes = (ms as f64 / 60_000.0).round() as u64;
    let hours = total_minutes / 60;
    let minutes = total_minutes % 60;

    if hours > 0 {
        format!("{hours}h {minutes}m")
    } else {
        format!("{minutes}m")
    }
}

/// Formats a KRW amount with thousands separators, e.g. `"1,500 KRW"`.
pub fn format_currency(amount: f64) -> String {
    format!("{} KRW", format_number(amount))
}

/// Formats a count with thousands separators. Fractions are rounded.
pub fn format_number(value: f64) -> String {
    let negative = value < 0.0;
    let rounded = value.abs().round() as u64;

    let digits = rounded.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    if negative {
        format!("-{grouped}")
    } else {
        grouped
    }
}

/// Formats a percentage with one decimal, e.g. `"75.5%"`.
pub fn format_percent(value: f64) -> String {
    format!("{value:.1}%")
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distance_switches_units_at_a_kilometer() {
        assert_eq!(format_distance(500), "500m");
        assert_eq!(format_distance(999), "999m");
        assert_eq!(format_distance(1000), "1.0km");
        assert_eq!(format_distance(12_500), "12.5km");
    }

    #[test]
    fn duration_rounds_to_minutes() {
        assert_eq!(format_duration_ms(30_000), "1m");
        assert_eq!(format_duration_ms(1_860_000), "31m");
        assert_eq!(format_duration_ms(5_460_000), "1h 31m");
        assert_eq!(format_duration_ms(7_200_000), "2h 0m");
    }

    #[test]
    fn numbers_group_by_thousands() {
        assert_eq!(format_number(0.0), "0");
        assert_eq!(format_number(999.0), "999");
        assert_eq!(format_number(1_500.0), "1,500");
        assert_eq!(format_number(6_000_000.0), "6,000,000");
        assert_eq!(format_number(-1_234.0), "-1,234");
    }

    #[test]
    fn currency_appends_the_unit() {
        assert_eq!(format_currency(1_500.0), "1,500 KRW");
    }

    #[test]
    fn month_converts_to_wire_form() {
        assert_eq!(to_yyyymm("2024-01"), "202401");
        assert_eq!(to_yyyymm("2025-12"), "202512");
    }

    #[test]
    fn percent_keeps_one_decimal() {
        assert_eq!(format_percent(75.5), "75.5%");
        assert_eq!(format_percent(0.0), "0.0%");
        assert_eq!(format_percent(100.0), "100.0%");
    }
}
