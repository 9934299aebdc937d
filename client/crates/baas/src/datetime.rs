//! BaaS Timestamp Codec
//!
//! The service serializes record timestamps as `"2024-01-02 03:04:05.678Z"`
//! (space separator, millisecond precision), not RFC 3339. This module is a
//! `#[serde(with = "baas::datetime")]` codec accepting both shapes.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serializer};

/// Wire format used by the service
pub const FORMAT: &str = "%Y-%m-%d %H:%M:%S%.3fZ";

/// Parse a timestamp in the service wire format, falling back to RFC 3339
pub fn parse(s: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
    NaiveDateTime::parse_from_str(s, FORMAT)
        .map(|naive| naive.and_utc())
        .or_else(|_| DateTime::parse_from_rfc3339(s).map(|dt| dt.with_timezone(&Utc)))
}

/// Render a timestamp in the service wire format
pub fn to_wire(dt: &DateTime<Utc>) -> String {
    dt.format(FORMAT).to_string()
}

pub fn serialize<S>(dt: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&to_wire(dt))
}

pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    parse(&s).map_err(serde::de::Error::custom)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_parse_wire_shape() {
        let dt = parse("2024-01-02 03:04:05.678Z").unwrap();
        assert_eq!(dt, Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap() + chrono::Duration::milliseconds(678));
    }

    #[test]
    fn test_parse_rfc3339_fallback() {
        let dt = parse("2024-01-02T03:04:05.678Z").unwrap();
        assert_eq!(to_wire(&dt), "2024-01-02 03:04:05.678Z");
    }

    #[test]
    fn test_roundtrip() {
        let wire = "2024-01-02 03:04:05.678Z";
        let dt = parse(wire).unwrap();
        assert_eq!(to_wire(&dt), wire);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(parse("yesterday").is_err());
        assert!(parse("").is_err());
    }
}
