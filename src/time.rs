use crate::{LAYOUT, Zone};
use chrono::format::{DelayedFormat, StrftimeItems};
use chrono::{
    DateTime, Datelike, FixedOffset, Local, NaiveDate, NaiveDateTime, SecondsFormat, TimeDelta,
    Utc,
};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::{Add, Sub};

/// Unix seconds of `0001-01-01T00:00:00Z`, the zero value.
const ZERO_UNIX_SECONDS: i64 = -62_135_596_800;

const MILLIS_LAYOUT: &str = "%Y-%m-%d %H:%M:%S%.3f";
const MONTH_LAYOUT: &str = "%Y-%m";
const TIME_LAYOUT: &str = "%H:%M:%S";
const TIME_MILLIS_LAYOUT: &str = "%H:%M:%S%.3f";
const COMPACT_MILLIS_LAYOUT: &str = "%Y%m%d%H%M%S%3f";

/// An instant together with the zone it lives in.
///
/// The default value, `0001-01-01 00:00:00` in UTC, is the zero value and
/// means "unset": every string, JSON and SQL rendering turns it into an empty
/// value. Comparison and hashing use the instant only.
#[derive(Debug, Clone, Copy)]
pub struct LocalTime {
    instant: DateTime<FixedOffset>,
    zone: Zone,
}

impl Default for LocalTime {
    fn default() -> Self {
        Self::zero()
    }
}

impl LocalTime {
    /// `instant` must already be expressed in `zone`.
    pub(crate) fn new(instant: DateTime<FixedOffset>, zone: Zone) -> Self {
        Self { instant, zone }
    }

    pub fn zero() -> Self {
        let instant = DateTime::<Utc>::from_timestamp(ZERO_UNIX_SECONDS, 0)
            .expect("0001-01-01T00:00:00Z is representable");
        Self::new(instant.fixed_offset(), Zone::utc())
    }

    /// Only a year-1 midnight value in UTC counts as zero. The same instant
    /// parsed in a locale keeps that locale's zone and is not zero.
    pub fn is_zero(&self) -> bool {
        self.zone == Zone::utc()
            && self.instant.timestamp() == ZERO_UNIX_SECONDS
            && self.instant.timestamp_subsec_nanos() == 0
    }

    pub fn as_datetime(&self) -> &DateTime<FixedOffset> {
        &self.instant
    }

    pub fn into_inner(self) -> DateTime<FixedOffset> {
        self.instant
    }

    pub fn zone(&self) -> Zone {
        self.zone
    }

    /// The same instant shown in another zone.
    pub fn with_zone(&self, zone: Zone) -> Self {
        Self::new(zone.convert(self.instant.to_utc()), zone)
    }

    /// Pin a wall-clock datetime to this value's zone.
    ///
    /// Out-of-range results collapse to the zero value.
    pub(crate) fn with_wall_clock(&self, naive: Option<NaiveDateTime>) -> Self {
        naive
            .and_then(|naive| self.zone.resolve(&naive))
            .map_or_else(Self::zero, |instant| Self::new(instant, self.zone))
    }

    fn shifted(&self, instant: Option<DateTime<FixedOffset>>) -> Self {
        instant.map_or_else(Self::zero, |instant| {
            Self::new(self.zone.convert(instant.to_utc()), self.zone)
        })
    }

    /// Add a calendar offset.
    ///
    /// The month is normalized first and any day overflow then rolls into
    /// the following month, so Jan 31 plus one month lands in early March.
    pub fn add_date(&self, years: i32, months: i32, days: i32) -> Self {
        let local = self.instant.naive_local();
        let total_months = i64::from(local.year()) * 12
            + i64::from(local.month0())
            + i64::from(years) * 12
            + i64::from(months);
        let month = total_months.rem_euclid(12) as u32 + 1;
        let day_offset = i64::from(local.day()) - 1 + i64::from(days);

        let naive = i32::try_from(total_months.div_euclid(12))
            .ok()
            .and_then(|year| NaiveDate::from_ymd_opt(year, month, 1))
            .and_then(|first| first.checked_add_signed(TimeDelta::days(day_offset)))
            .map(|date| date.and_time(local.time()));
        self.with_wall_clock(naive)
    }

    pub fn duration_since(&self, earlier: LocalTime) -> TimeDelta {
        self.instant.signed_duration_since(earlier.instant)
    }

    pub fn before(&self, other: LocalTime) -> bool {
        self.instant < other.instant
    }

    pub fn after(&self, other: LocalTime) -> bool {
        self.instant > other.instant
    }

    pub fn equal(&self, other: LocalTime) -> bool {
        self.instant == other.instant
    }

    pub fn unix(&self) -> i64 {
        self.instant.timestamp()
    }

    pub fn unix_millis(&self) -> i64 {
        self.instant.timestamp_millis()
    }

    /// `None` when the instant does not fit in `i64` nanoseconds
    /// (roughly outside 1677..2262).
    pub fn unix_nanos(&self) -> Option<i64> {
        self.instant.timestamp_nanos_opt()
    }

    /// Format with an arbitrary strftime layout. Not zero-guarded.
    pub fn format<'a>(&self, layout: &'a str) -> DelayedFormat<StrftimeItems<'a>> {
        self.instant.format(layout)
    }

    fn format_guarded(&self, layout: &str) -> String {
        if self.is_zero() {
            return String::new();
        }
        self.instant.format(layout).to_string()
    }

    /// `YYYY-MM-DD hh:mm:ss.mmm`. Unlike the other renderings this one is
    /// produced for the zero value too.
    pub fn format_millis(&self) -> String {
        self.instant.format(MILLIS_LAYOUT).to_string()
    }

    pub fn format_date(&self) -> String {
        self.format_guarded(crate::DATE_LAYOUT)
    }

    pub fn format_month(&self) -> String {
        self.format_guarded(MONTH_LAYOUT)
    }

    /// ISO week as `{week-year}-{week:02}`; the week-year can differ from
    /// the calendar year around January 1st.
    pub fn format_week(&self) -> String {
        if self.is_zero() {
            return String::new();
        }
        let week = self.instant.iso_week();
        format!("{}-{:02}", week.year(), week.week())
    }

    pub fn format_year(&self) -> String {
        if self.is_zero() {
            return String::new();
        }
        self.instant.year().to_string()
    }

    pub fn format_time(&self) -> String {
        self.format_guarded(TIME_LAYOUT)
    }

    pub fn format_time_millis(&self) -> String {
        self.format_guarded(TIME_MILLIS_LAYOUT)
    }

    pub fn to_rfc3339(&self) -> String {
        if self.is_zero() {
            return String::new();
        }
        self.instant.to_rfc3339_opts(SecondsFormat::Secs, true)
    }

    pub fn format_compact(&self) -> String {
        self.format_guarded(crate::COMPACT_LAYOUT)
    }

    /// `YYYYMMDDhhmmssmmm`, a single run of digits.
    pub fn format_compact_millis(&self) -> String {
        self.format_guarded(COMPACT_MILLIS_LAYOUT)
    }
}

impl fmt::Display for LocalTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_zero() {
            return Ok(());
        }
        write!(f, "{}", self.instant.format(LAYOUT))
    }
}

impl PartialEq for LocalTime {
    fn eq(&self, other: &Self) -> bool {
        self.instant == other.instant
    }
}

impl Eq for LocalTime {}

impl PartialOrd for LocalTime {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for LocalTime {
    fn cmp(&self, other: &Self) -> Ordering {
        self.instant.cmp(&other.instant)
    }
}

impl Hash for LocalTime {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.instant.hash(state);
    }
}

impl From<DateTime<chrono_tz::Tz>> for LocalTime {
    fn from(dt: DateTime<chrono_tz::Tz>) -> Self {
        let zone = Zone::Named(dt.timezone());
        Self::new(dt.fixed_offset(), zone)
    }
}

impl From<DateTime<Local>> for LocalTime {
    fn from(dt: DateTime<Local>) -> Self {
        Self::new(dt.fixed_offset(), Zone::Local)
    }
}

impl From<DateTime<Utc>> for LocalTime {
    fn from(dt: DateTime<Utc>) -> Self {
        Self::new(dt.fixed_offset(), Zone::utc())
    }
}

impl From<DateTime<FixedOffset>> for LocalTime {
    fn from(dt: DateTime<FixedOffset>) -> Self {
        Self::new(dt, Zone::Fixed(*dt.offset()))
    }
}

impl From<LocalTime> for DateTime<FixedOffset> {
    fn from(t: LocalTime) -> Self {
        t.instant
    }
}

/// Overflow collapses to the zero value.
impl Add<TimeDelta> for LocalTime {
    type Output = LocalTime;

    fn add(self, rhs: TimeDelta) -> LocalTime {
        self.shifted(self.instant.checked_add_signed(rhs))
    }
}

impl Sub<TimeDelta> for LocalTime {
    type Output = LocalTime;

    fn sub(self, rhs: TimeDelta) -> LocalTime {
        self.shifted(self.instant.checked_sub_signed(rhs))
    }
}

impl Sub<LocalTime> for LocalTime {
    type Output = TimeDelta;

    fn sub(self, rhs: LocalTime) -> TimeDelta {
        self.duration_since(rhs)
    }
}
