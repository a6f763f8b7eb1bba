//! Display Formatting
//!
//! Dates arrive as `YYYY-MM-DD` or RFC 3339 timestamps. Anything that does
//! not parse is shown as-is.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

fn parse_date(raw: &str) -> Option<NaiveDate> {
    parse_date_time(raw)
        .map(|dt| dt.date())
        .or_else(|| NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").ok())
}

fn parse_date_time(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.naive_utc())
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f"))
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f"))
        .ok()
}

/// `Oct 14, 2025`
pub fn short_date(raw: &str) -> String {
    parse_date(raw)
        .map(|d| d.format("%b %-d, %Y").to_string())
        .unwrap_or_else(|| raw.to_string())
}

/// `Tuesday, October 14, 2025`
pub fn long_date(raw: &str) -> String {
    parse_date(raw)
        .map(|d| d.format("%A, %B %-d, %Y").to_string())
        .unwrap_or_else(|| raw.to_string())
}

/// `Oct 14, 2025, 3:05 PM` (UTC)
pub fn date_time(raw: &str) -> String {
    match parse_date_time(raw) {
        Some(dt) => dt.format("%b %-d, %Y, %-I:%M %p").to_string(),
        None => short_date(raw),
    }
}

/// Whether a target date lies before `today` (both `YYYY-MM-DD`).
pub fn is_overdue(target_date: &str, today: &str) -> bool {
    match (parse_date(target_date), parse_date(today)) {
        (Some(target), Some(today)) => target < today,
        _ => false,
    }
}

/// Today's date from the browser clock
#[cfg(target_arch = "wasm32")]
pub fn today() -> String {
    let iso: String = js_sys::Date::new_0().to_iso_string().into();
    iso.chars().take(10).collect()
}

#[cfg(not(target_arch = "wasm32"))]
pub fn today() -> String {
    chrono::Utc::now().format("%Y-%m-%d").to_string()
}

/// `71900000` -> `$71.9M`, `63000` -> `$63.0K`
pub fn compact_currency(value: f64) -> String {
    if value >= 1_000_000.0 {
        format!("${:.1}M", value / 1_000_000.0)
    } else if value >= 1_000.0 {
        format!("${:.1}K", value / 1_000.0)
    } else {
        format!("${:.0}", value)
    }
}

/// `63000` -> `63,000`
pub fn thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Metric value with its unit suffix
pub fn metric_value(value: f64, unit: &str) -> String {
    let number = if value.fract() == 0.0 { format!("{:.0}", value) } else { format!("{:.1}", value) };
    match unit {
        "percent" => format!("{}%", number),
        "" => number,
        other => format!("{} {}", number, other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dates() {
        assert_eq!(short_date("2025-10-14"), "Oct 14, 2025");
        assert_eq!(long_date("2025-10-14"), "Tuesday, October 14, 2025");
        assert_eq!(date_time("2025-10-14T15:05:00+00:00"), "Oct 14, 2025, 3:05 PM");
        assert_eq!(date_time("2025-10-14 09:30:00"), "Oct 14, 2025, 9:30 AM");
        assert_eq!(short_date("soon"), "soon");
    }

    #[test]
    fn test_is_overdue() {
        assert!(is_overdue("2025-10-01", "2025-10-14"));
        assert!(!is_overdue("2025-10-14", "2025-10-14"));
        assert!(!is_overdue("TBD", "2025-10-14"));
    }

    #[test]
    fn test_numbers() {
        assert_eq!(compact_currency(71_900_000.0), "$71.9M");
        assert_eq!(thousands(63_000), "63,000");
        assert_eq!(thousands(999), "999");
        assert_eq!(metric_value(99.1, "percent"), "99.1%");
        assert_eq!(metric_value(28.0, "estimates"), "28 estimates");
    }
}
