//! Timestamp parsing and formatting.
//!
//! Stored timestamps are RFC 3339 strings with microsecond precision so that
//! they compare correctly as text. Inputs are more lenient: clients may send
//! a full RFC 3339 date-time, SQLite's `datetime('now')` format, or a bare
//! calendar date (read as midnight UTC).

use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, Utc};

use crate::errors::CoreError;

/// Parse a timestamp in any of the accepted input formats.
///
/// # Errors
///
/// Returns `CoreError::Validation` if the string matches none of them.
pub fn parse_timestamp(s: &str) -> Result<DateTime<Utc>, CoreError> {
    let s = s.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S") {
        return Ok(naive.and_utc());
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
        .ok_or_else(|| CoreError::Validation(format!("invalid timestamp '{s}'")))
}

/// Format a timestamp for storage.
#[must_use]
pub fn format_timestamp(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::Micros, true)
}

/// Serde adapter for optional timestamps given in any accepted input format.
///
/// ```
/// use chrono::{DateTime, Utc};
/// use serde::Deserialize;
///
/// #[derive(Deserialize)]
/// struct Body {
///     #[serde(default, with = "rentdesk_core::timestamps::lenient_option")]
///     when: Option<DateTime<Utc>>,
/// }
///
/// let body: Body = serde_json::from_str(r#"{"when":"2025-06-01"}"#).unwrap();
/// assert_eq!(body.when.unwrap().to_rfc3339(), "2025-06-01T00:00:00+00:00");
/// ```
pub mod lenient_option {
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    /// # Errors
    ///
    /// Propagates the serializer's error.
    #[allow(clippy::ref_option)]
    pub fn serialize<S: Serializer>(
        value: &Option<DateTime<Utc>>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match value {
            Some(dt) => serializer.serialize_some(&super::format_timestamp(dt)),
            None => serializer.serialize_none(),
        }
    }

    /// # Errors
    ///
    /// Fails when the string is not an accepted timestamp format.
    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<DateTime<Utc>>, D::Error> {
        let raw: Option<String> = Option::deserialize(deserializer)?;
        raw.map(|s| super::parse_timestamp(&s).map_err(serde::de::Error::custom))
            .transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    #[test]
    fn parses_rfc3339() {
        let dt = parse_timestamp("2025-06-01T09:30:00+02:00").unwrap();
        assert_eq!(dt, Utc.with_ymd_and_hms(2025, 6, 1, 7, 30, 0).unwrap());
    }

    #[test]
    fn parses_sqlite_format() {
        let dt = parse_timestamp("2025-06-01 09:30:00").unwrap();
        assert_eq!(dt, Utc.with_ymd_and_hms(2025, 6, 1, 9, 30, 0).unwrap());
    }

    #[test]
    fn parses_bare_date_as_midnight() {
        let dt = parse_timestamp("2025-06-01").unwrap();
        assert_eq!(dt, Utc.with_ymd_and_hms(2025, 6, 1, 0, 0, 0).unwrap());
    }

    #[test]
    fn rejects_garbage() {
        assert!(matches!(
            parse_timestamp("next tuesday"),
            Err(CoreError::Validation(_))
        ));
    }

    #[test]
    fn storage_format_is_fixed_width() {
        let a = format_timestamp(&Utc.with_ymd_and_hms(2025, 6, 1, 0, 0, 0).unwrap());
        let b = format_timestamp(&Utc.with_ymd_and_hms(2025, 12, 31, 23, 59, 59).unwrap());
        assert_eq!(a, "2025-06-01T00:00:00.000000Z");
        assert_eq!(a.len(), b.len());
        assert!(a < b);
    }
}
