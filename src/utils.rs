use iso8601::{Date, DateTime, Time};
use xml::escape::escape_str_pcdata;

use std::borrow::Cow;

/// Escape a string for use as XML characters.
///
/// The resulting string is *not* suitable for use in XML attributes, but XML-RPC doesn't use those.
pub fn escape_xml(s: &str) -> Cow<'_, str> {
    escape_str_pcdata(s)
}

/// Formats a `DateTime` for the wire: `YYYYMMDDTHH:MM:SS`, no punctuation in the date portion,
/// second precision.
pub fn format_datetime(date_time: &DateTime) -> String {
    let Time {
        hour,
        minute,
        second,
        ..
    } = date_time.time;

    match date_time.date {
        Date::YMD { year, month, day } => {
            format!(
                "{:04}{:02}{:02}T{:02}:{:02}:{:02}",
                year, month, day, hour, minute, second
            )
        }
        // Week and ordinal dates have no compact form; emit their ISO 8601 shapes.
        Date::Week { year, ww, d } => {
            format!(
                "{:04}-W{:02}-{}T{:02}:{:02}:{:02}",
                year, ww, d, hour, minute, second
            )
        }
        Date::Ordinal { year, ddd } => {
            format!(
                "{:04}-{:03}T{:02}:{:02}:{:02}",
                year, ddd, hour, minute, second
            )
        }
    }
}

/// Inserts the date separators into a compact `YYYYMMDDTHH:MM:SS` timestamp.
///
/// Inbound timestamps lack punctuation between year, month and day, which the generic ISO 8601
/// parser won't take in every position. Text that doesn't look like a compact date passes through
/// untouched.
pub fn expand_compact_date(raw: &str) -> Cow<'_, str> {
    let bytes = raw.as_bytes();
    if bytes.len() > 8 && bytes[..8].iter().all(u8::is_ascii_digit) && bytes[8] == b'T' {
        Cow::Owned(format!(
            "{}-{}-{}{}",
            &raw[..4],
            &raw[4..6],
            &raw[6..8],
            &raw[8..]
        ))
    } else {
        Cow::Borrowed(raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_datetimes() {
        let date_time = iso8601::datetime("2024-01-31T12:00:05Z").unwrap();
        assert_eq!(format_datetime(&date_time), "20240131T12:00:05");
    }

    #[test]
    fn expands_compact_dates() {
        assert_eq!(expand_compact_date("20240131T12:00:00"), "2024-01-31T12:00:00");
        assert_eq!(expand_compact_date("2024-01-31T12:00:00"), "2024-01-31T12:00:00");
        assert_eq!(expand_compact_date("ILLEGAL VALUE :("), "ILLEGAL VALUE :(");
    }

    #[test]
    fn formatted_datetimes_parse_back() {
        let date_time = iso8601::datetime("2016-05-02T06:01:05Z").unwrap();

        let formatted = format_datetime(&date_time);
        assert_eq!(formatted, "20160502T06:01:05");
        assert_eq!(
            iso8601::datetime(&expand_compact_date(&formatted)).unwrap(),
            date_time
        );
    }
}
