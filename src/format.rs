use serde_json::Value;
use time::Date;
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

pub(crate) const MISSING: &str = "N/A";

/// Scalar fields degrade to `N/A` when absent, null or blank.
pub(crate) fn display_text(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(text)) if !text.trim().is_empty() => text.clone(),
        Some(Value::Number(number)) => number.to_string(),
        Some(Value::Bool(flag)) => flag.to_string(),
        _ => MISSING.to_string(),
    }
}

/// Prices are redisplayed with a single `$` prefix. Whatever currency symbol
/// or separator the stored value carries is discarded: every character other
/// than digits, `.` and `-` is stripped. Absent values render as `$0`.
pub(crate) fn display_price(value: Option<&Value>) -> String {
    let raw = match value {
        Some(Value::String(text)) => text.clone(),
        Some(Value::Number(number)) => number.to_string(),
        _ => return "$0".to_string(),
    };
    let stripped: String = raw
        .chars()
        .filter(|ch| ch.is_ascii_digit() || *ch == '.' || *ch == '-')
        .collect();
    if stripped.is_empty() {
        "$0".to_string()
    } else {
        format!("${stripped}")
    }
}

/// Dates render as day/month/year; anything unparseable renders as `N/A`
/// rather than failing the whole row.
pub(crate) fn display_date(value: Option<&Value>) -> String {
    let Some(Value::String(raw)) = value else {
        return MISSING.to_string();
    };
    match parse_date(raw) {
        Some(date) => format!(
            "{:02}/{:02}/{}",
            date.day(),
            u8::from(date.month()),
            date.year()
        ),
        None => MISSING.to_string(),
    }
}

fn parse_date(raw: &str) -> Option<Date> {
    let trimmed = raw.trim();
    if let Ok(stamp) = OffsetDateTime::parse(trimmed, &Rfc3339) {
        return Some(stamp.date());
    }
    let format = time::format_description::parse("[year]-[month]-[day]").ok()?;
    Date::parse(trimmed.get(..10)?, &format).ok()
}

/// The source form dates are stored in (`YYYY-MM-DD`).
pub(crate) fn iso_date(date: Date) -> String {
    format!(
        "{:04}-{:02}-{:02}",
        date.year(),
        u8::from(date.month()),
        date.day()
    )
}

#[cfg(test)]
#[allow(non_snake_case)]
mod tests {
    use super::*;
    use serde_json::json;
    use time::Month;

    #[test]
    fn display_text__should_fall_back_to_na() {
        // Given / When / Then
        assert_eq!(display_text(None), "N/A");
        assert_eq!(display_text(Some(&Value::Null)), "N/A");
        assert_eq!(display_text(Some(&json!("  "))), "N/A");
        assert_eq!(display_text(Some(&json!("Deluxe"))), "Deluxe");
        assert_eq!(display_text(Some(&json!(4))), "4");
    }

    #[test]
    fn display_price__should_strip_currency_noise() {
        // Given
        let noisy = json!("₹1,200.50abc");

        // When
        let shown = display_price(Some(&noisy));

        // Then
        assert_eq!(shown, "$1200.50");
    }

    #[test]
    fn display_price__should_render_absent_as_zero_dollars() {
        // Given / When / Then
        assert_eq!(display_price(None), "$0");
        assert_eq!(display_price(Some(&Value::Null)), "$0");
        assert_eq!(display_price(Some(&json!("abc"))), "$0");
    }

    #[test]
    fn display_price__should_pass_numbers_through() {
        // Given / When / Then
        assert_eq!(display_price(Some(&json!(120))), "$120");
        assert_eq!(display_price(Some(&json!(-3.5))), "$-3.5");
    }

    #[test]
    fn display_date__should_format_day_month_year() {
        // Given / When / Then
        assert_eq!(display_date(Some(&json!("2026-08-06"))), "06/08/2026");
        assert_eq!(
            display_date(Some(&json!("2026-01-12T09:30:00Z"))),
            "12/01/2026"
        );
    }

    #[test]
    fn display_date__should_render_unparseable_as_na() {
        // Given / When / Then
        assert_eq!(display_date(None), "N/A");
        assert_eq!(display_date(Some(&json!("soon"))), "N/A");
        assert_eq!(display_date(Some(&json!(20260806))), "N/A");
    }

    #[test]
    fn iso_date__should_zero_pad() {
        // Given
        let date = Date::from_calendar_date(2026, Month::August, 6).expect("date");

        // When / Then
        assert_eq!(iso_date(date), "2026-08-06");
    }
}
