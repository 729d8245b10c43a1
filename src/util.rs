//! Layout parsing and zone resolution shared by the constructors.
//!
//! Layouts are `chrono` strftime patterns. A layout without time fields
//! (`%Y-%m-%d`, `%Y%m%d`) yields midnight of the parsed date.

use chrono::format::{ParseError, ParseErrorKind};
use chrono::{
    DateTime, FixedOffset, LocalResult, NaiveDate, NaiveDateTime, NaiveTime, Offset, TimeDelta,
    TimeZone, Utc,
};

const NANOS_PER_SECOND: i64 = 1_000_000_000;

/// Parse `input` against `layout` into a wall-clock datetime.
pub fn parse_naive(layout: &str, input: &str) -> Result<NaiveDateTime, ParseError> {
    match NaiveDateTime::parse_from_str(input, layout) {
        Ok(naive) => Ok(naive),
        Err(err) if err.kind() == ParseErrorKind::NotEnough => {
            NaiveDate::parse_from_str(input, layout).map(|date| date.and_time(NaiveTime::MIN))
        }
        Err(err) => Err(err),
    }
}

/// Pin a wall-clock datetime to `zone`.
///
/// Ambiguous times take the earlier instant. Times inside a DST gap are
/// read with the offset in effect a day earlier, which moves them past the
/// gap, and are then shown in the offset in effect at that instant.
pub fn resolve<Z: TimeZone>(zone: &Z, naive: &NaiveDateTime) -> Option<DateTime<FixedOffset>> {
    match zone.from_local_datetime(naive) {
        LocalResult::Single(dt) | LocalResult::Ambiguous(dt, _) => Some(dt.fixed_offset()),
        LocalResult::None => {
            let before = naive.checked_sub_signed(TimeDelta::days(1))?;
            zone.offset_from_utc_datetime(&before)
                .fix()
                .from_local_datetime(naive)
                .single()
                .map(|dt| dt.with_timezone(zone).fixed_offset())
        }
    }
}

/// Build a UTC instant from Unix seconds and a nanosecond count that may
/// fall outside `[0, 1e9)`.
pub fn utc_from_unix(seconds: i64, nanos: i64) -> Option<DateTime<Utc>> {
    let seconds = seconds.checked_add(nanos.div_euclid(NANOS_PER_SECOND))?;
    let nanos = u32::try_from(nanos.rem_euclid(NANOS_PER_SECOND)).ok()?;
    DateTime::<Utc>::from_timestamp(seconds, nanos)
}
