//! Timestamp (de)serialization shared by all API models.
//!
//! Incoming timestamps are any RFC 3339 string and are normalised to UTC. Outgoing
//! timestamps are rendered in the local timezone with whole seconds, e.g.
//! `2022-03-01T10:11:12+01:00`.

use chrono::{DateTime, Local, SubsecRound, TimeZone, Utc};
use serde::{Deserialize, Deserializer, Serializer};

/// Render `dt` in the given timezone, truncated to whole seconds.
pub fn format_datetime_in<Tz: TimeZone>(dt: &DateTime<Utc>, tz: &Tz) -> String
where
    Tz::Offset: std::fmt::Display,
{
    dt.with_timezone(tz).trunc_subsecs(0).to_rfc3339()
}

pub fn parse_datetime(value: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
    DateTime::parse_from_rfc3339(value).map(|dt| dt.with_timezone(&Utc))
}

pub fn serialize<S>(dt: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&format_datetime_in(dt, &Local))
}

pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_datetime(&raw).map_err(serde::de::Error::custom)
}

pub mod option {
    use super::*;

    pub fn serialize<S>(dt: &Option<DateTime<Utc>>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match dt {
            Some(dt) => super::serialize(dt, serializer),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Option::<String>::deserialize(deserializer)?
            .map(|raw| parse_datetime(&raw).map_err(serde::de::Error::custom))
            .transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::FixedOffset;

    #[test]
    fn test_parse_normalises_to_utc() {
        let dt = parse_datetime("2022-03-01T10:11:12.123456+01:00").unwrap();
        assert_eq!(dt.to_rfc3339(), "2022-03-01T09:11:12.123456+00:00");
    }

    #[test]
    fn test_format_drops_subseconds_and_applies_offset() {
        let dt = parse_datetime("2022-03-01T09:11:12.987Z").unwrap();
        let cet = FixedOffset::east_opt(3600).unwrap();
        assert_eq!(format_datetime_in(&dt, &cet), "2022-03-01T10:11:12+01:00");
        assert_eq!(format_datetime_in(&dt, &Utc), "2022-03-01T09:11:12+00:00");
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(parse_datetime("yesterday").is_err());
    }
}
