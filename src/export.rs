use crate::catalog::CollectionSpec;
use crate::collection::Record;
use crate::view;
use time::OffsetDateTime;

/// Timestamped attachment name, e.g. `bookings-20260806-143000.csv`.
pub(crate) fn export_filename(spec: &CollectionSpec, stamp: OffsetDateTime) -> String {
    format!(
        "{}-{:04}{:02}{:02}-{:02}{:02}{:02}.csv",
        spec.slug,
        stamp.year(),
        u8::from(stamp.month()),
        stamp.day(),
        stamp.hour(),
        stamp.minute(),
        stamp.second()
    )
}

/// Denormalized tabular export of the given (already filtered) records,
/// using the same display projection as the table pages.
pub(crate) fn csv_document(spec: &CollectionSpec, records: &[Record]) -> String {
    let mut lines = Vec::with_capacity(records.len() + 1);
    let header: Vec<String> = std::iter::once("Id".to_string())
        .chain(spec.columns.iter().map(|column| column.label.to_string()))
        .collect();
    lines.push(csv_line(&header));
    for row in view::project_rows(spec, records) {
        let fields: Vec<String> = std::iter::once(row.id.to_string())
            .chain(row.cells.into_iter().map(|cell| cell.text))
            .collect();
        lines.push(csv_line(&fields));
    }
    lines.join("\r\n") + "\r\n"
}

fn csv_line(fields: &[String]) -> String {
    fields
        .iter()
        .map(|field| csv_field(field))
        .collect::<Vec<_>>()
        .join(",")
}

fn csv_field(text: &str) -> String {
    if text.contains(',') || text.contains('"') || text.contains('\n') || text.contains('\r') {
        format!("\"{}\"", text.replace('"', "\"\""))
    } else {
        text.to_string()
    }
}

#[cfg(test)]
#[allow(non_snake_case)]
mod tests {
    use super::*;
    use crate::catalog;
    use serde_json::Value;
    use serde_json::json;
    use time::Date;
    use time::Month;
    use time::Time;

    #[test]
    fn export_filename__should_stamp_slug_and_time() {
        // Given
        let date = Date::from_calendar_date(2026, Month::August, 6).expect("date");
        let time = Time::from_hms(14, 30, 0).expect("time");
        let stamp = date.with_time(time).assume_utc();

        // When
        let name = export_filename(&catalog::BOOKINGS, stamp);

        // Then
        assert_eq!(name, "bookings-20260806-143000.csv");
    }

    #[test]
    fn csv_document__should_project_rows_with_display_rules() {
        // Given
        let Value::Object(record) = json!({
            "id": 1,
            "name": "Smith, John",
            "price": "₹1,200.50abc"
        }) else {
            unreachable!()
        };

        // When
        let csv = csv_document(&catalog::BOOKINGS, &[record]);

        // Then
        let mut lines = csv.lines();
        assert_eq!(
            lines.next(),
            Some("Id,Guest,Phone,Room,Check-in,Check-out,Price,Status")
        );
        let row = lines.next().expect("data row");
        assert_eq!(row, "1,\"Smith, John\",N/A,N/A,N/A,N/A,$1200.50,N/A");
    }

    #[test]
    fn csv_field__should_escape_quotes() {
        // Given / When / Then
        assert_eq!(csv_field("plain"), "plain");
        assert_eq!(csv_field("a \"b\""), "\"a \"\"b\"\"\"");
    }
}
