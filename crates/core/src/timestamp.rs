// ISO-8601 UTC timestamp codec
// Decision: Always emit fixed microsecond precision with a trailing "Z" so that
// string order equals chronological order in the document store.

use chrono::{DateTime, NaiveDateTime, SecondsFormat, Utc};

/// Format a timestamp as `YYYY-MM-DDTHH:MM:SS.ffffffZ`
pub fn format_iso_utc(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Micros, true)
}

/// Parse an RFC 3339 string (any offset) or a naive ISO-8601 string (read as UTC)
pub fn parse_iso_utc(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.with_timezone(&Utc));
    }
    raw.parse::<NaiveDateTime>().ok().map(|naive| naive.and_utc())
}

/// Serde adapter for `DateTime<Utc>` fields that travel as ISO strings
pub mod iso_utc {
    use super::{format_iso_utc, parse_iso_utc};
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(ts: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&format_iso_utc(ts))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        parse_iso_utc(&raw)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid timestamp: {raw}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_format_has_z_suffix_and_micros() {
        let ts = Utc.with_ymd_and_hms(2024, 5, 1, 12, 30, 0).unwrap();
        assert_eq!(format_iso_utc(&ts), "2024-05-01T12:30:00.000000Z");
    }

    #[test]
    fn test_parse_accepts_offsets_and_naive() {
        let expected = Utc.with_ymd_and_hms(2024, 5, 1, 12, 30, 0).unwrap();

        assert_eq!(parse_iso_utc("2024-05-01T12:30:00Z"), Some(expected));
        assert_eq!(parse_iso_utc("2024-05-01T14:30:00+02:00"), Some(expected));
        assert_eq!(parse_iso_utc("2024-05-01T12:30:00.000000Z"), Some(expected));
        assert_eq!(parse_iso_utc("2024-05-01T12:30:00"), Some(expected));
        assert_eq!(parse_iso_utc("yesterday"), None);
    }

    #[test]
    fn test_string_order_matches_time_order() {
        let earlier = Utc.with_ymd_and_hms(2024, 5, 1, 9, 59, 59).unwrap();
        let later = earlier + chrono::Duration::microseconds(1);
        assert!(format_iso_utc(&earlier) < format_iso_utc(&later));
    }
}
