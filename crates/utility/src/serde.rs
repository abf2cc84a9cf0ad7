pub mod date_time {
    use chrono::{DateTime, FixedOffset, NaiveDateTime, TimeZone as _};
    use serde::{Deserialize as _, Deserializer};

    /// Formats flight data providers use for local times, in the order they are
    /// tried. All of them carry an explicit utc offset.
    const OFFSET_FORMATS: [&str; 4] = [
        "%Y-%m-%d %H:%M%:z",
        "%Y-%m-%d %H:%M%z",
        "%Y-%m-%d %H:%M:%S%:z",
        "%Y-%m-%dT%H:%M%:z",
    ];

    /// Formats used for local times without an offset.
    const NAIVE_FORMATS: [&str; 4] = [
        "%Y-%m-%d %H:%M",
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%dT%H:%M:%S",
    ];

    /// Parses a local time that carries its utc offset, e.g.
    /// `2025-11-21 08:00-05:00` or `2025-11-21T08:00:00-05:00`.
    pub fn parse_with_offset(s: &str) -> Option<DateTime<FixedOffset>> {
        let s = s.trim();
        if let Ok(date_time) = DateTime::parse_from_rfc3339(s) {
            return Some(date_time);
        }
        OFFSET_FORMATS
            .iter()
            .find_map(|format| DateTime::parse_from_str(s, format).ok())
    }

    /// Parses a time without offset, e.g. `2025-11-21 08:00`.
    pub fn parse_naive(s: &str) -> Option<NaiveDateTime> {
        let s = s.trim();
        NAIVE_FORMATS
            .iter()
            .find_map(|format| NaiveDateTime::parse_from_str(s, format).ok())
    }

    /// Attaches the offset implied by the difference between a local wall clock
    /// time and the same instant in utc. Offsets are rounded to full minutes.
    pub fn with_offset_from_utc(
        local: NaiveDateTime,
        utc: NaiveDateTime,
    ) -> Option<DateTime<FixedOffset>> {
        let offset_seconds = (local - utc).num_minutes() * 60;
        let offset = FixedOffset::east_opt(i32::try_from(offset_seconds).ok()?)?;
        offset.from_local_datetime(&local).single()
    }

    /// Deserializes an optional provider time string. Missing, empty or
    /// unparsable values become `None`.
    pub fn deserialize_with_offset_option<'de, D>(
        deserializer: D,
    ) -> Result<Option<DateTime<FixedOffset>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = Option::<String>::deserialize(deserializer)?;
        Ok(s.as_deref().and_then(parse_with_offset))
    }

    /// Same as [`deserialize_with_offset_option`] for times without offset.
    pub fn deserialize_naive_option<'de, D>(
        deserializer: D,
    ) -> Result<Option<NaiveDateTime>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = Option::<String>::deserialize(deserializer)?;
        Ok(s.as_deref().and_then(parse_naive))
    }

}

pub mod date {
    use chrono::NaiveDate;

    /// Parses a `YYYY-MM-DD` calendar date.
    pub fn parse_iso(s: &str) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").ok()
    }
}
