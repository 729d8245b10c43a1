use crate::config::Config;
use crate::util::{parse_naive, resolve, utc_from_unix};
use crate::{COMPACT_DATE_LAYOUT, COMPACT_LAYOUT, DATE_LAYOUT, Error, LAYOUT, LocalTime};
use chrono::{DateTime, FixedOffset, Local, NaiveDateTime, Offset, TimeDelta, Utc};
use chrono_tz::Tz;
use std::fmt;
use std::str::FromStr;
use tracing::{debug, info, warn};

/// The zone a [`LocalTime`] lives in.
///
/// Period boundaries and calendar arithmetic re-resolve wall clocks through
/// it, so a value keeps following DST transitions of its zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Zone {
    /// The process local zone (`TZ`, then the system setting).
    Local,
    Named(Tz),
    /// A bare offset, for values built from UTC or fixed-offset datetimes.
    Fixed(FixedOffset),
}

impl Zone {
    pub(crate) fn utc() -> Self {
        Zone::Fixed(Utc.fix())
    }

    pub(crate) fn resolve(&self, naive: &NaiveDateTime) -> Option<DateTime<FixedOffset>> {
        match self {
            Zone::Local => resolve(&Local, naive),
            Zone::Named(tz) => resolve(tz, naive),
            Zone::Fixed(offset) => resolve(offset, naive),
        }
    }

    pub(crate) fn convert(&self, utc: DateTime<Utc>) -> DateTime<FixedOffset> {
        match self {
            Zone::Local => utc.with_timezone(&Local).fixed_offset(),
            Zone::Named(tz) => utc.with_timezone(tz).fixed_offset(),
            Zone::Fixed(offset) => utc.with_timezone(offset),
        }
    }
}

impl fmt::Display for Zone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Zone::Local => write!(f, "Local"),
            Zone::Named(tz) => write!(f, "{}", tz.name()),
            Zone::Fixed(offset) => write!(f, "{offset}"),
        }
    }
}

impl FromStr for Zone {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Error> {
        if s.eq_ignore_ascii_case("local") {
            return Ok(Zone::Local);
        }
        s.parse::<Tz>()
            .map(Zone::Named)
            .map_err(|_| Error::UnknownZone(s.to_string()))
    }
}

/// The two zones a [`LocalTime`] is built in.
///
/// `now` uses the reference zone. Every parser and [`Locale::from_unix`] use
/// the ambient zone, which by default is the process local zone and not the
/// reference zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Locale {
    reference: Tz,
    ambient: Zone,
}

impl Default for Locale {
    fn default() -> Self {
        Self {
            reference: Tz::Asia__Shanghai,
            ambient: Zone::Local,
        }
    }
}

impl Locale {
    pub fn new(reference: Tz, ambient: Zone) -> Self {
        Self { reference, ambient }
    }

    pub fn from_config(config: &Config) -> Result<Self, Error> {
        let reference = config
            .reference_zone
            .parse::<Tz>()
            .map_err(|_| Error::UnknownZone(config.reference_zone.clone()))?;
        let ambient = match config.ambient_zone.as_deref() {
            Some(name) => name.parse::<Zone>()?,
            None => Zone::Local,
        };

        info!(
            reference_zone = reference.name(),
            ambient_zone = %ambient,
            "Locale configured"
        );

        Ok(Self { reference, ambient })
    }

    pub fn reference(&self) -> Tz {
        self.reference
    }

    pub fn ambient(&self) -> Zone {
        self.ambient
    }

    pub fn now(&self) -> LocalTime {
        LocalTime::from(Utc::now().with_timezone(&self.reference))
    }

    /// Parse `input` against a strftime `layout` in the ambient zone.
    pub fn parse_layout(&self, layout: &str, input: &str) -> Result<LocalTime, Error> {
        let naive = parse_naive(layout, input).map_err(|source| {
            debug!(layout, input, error = %source, "Failed to parse LocalTime");
            Error::Parse {
                layout: layout.to_string(),
                input: input.to_string(),
                source,
            }
        })?;

        self.ambient
            .resolve(&naive)
            .map(|dt| LocalTime::new(dt, self.ambient))
            .ok_or_else(|| Error::OutOfRange {
                input: input.to_string(),
            })
    }

    /// `YYYY-MM-DD hh:mm:ss`
    pub fn parse(&self, input: &str) -> Result<LocalTime, Error> {
        self.parse_layout(LAYOUT, input)
    }

    /// `YYYY-MM-DD`, at midnight.
    pub fn parse_date(&self, input: &str) -> Result<LocalTime, Error> {
        self.parse_layout(DATE_LAYOUT, input)
    }

    /// `YYYYMMDDhhmmss`
    pub fn parse_compact(&self, input: &str) -> Result<LocalTime, Error> {
        self.parse_layout(COMPACT_LAYOUT, input)
    }

    /// `YYYYMMDD`, at midnight.
    pub fn parse_compact_date(&self, input: &str) -> Result<LocalTime, Error> {
        self.parse_layout(COMPACT_DATE_LAYOUT, input)
    }

    /// Nanoseconds outside `[0, 1e9)` carry into the seconds. An instant
    /// outside the representable range yields the zero value.
    pub fn from_unix(&self, seconds: i64, nanos: i64) -> LocalTime {
        match utc_from_unix(seconds, nanos) {
            Some(utc) => LocalTime::new(self.ambient.convert(utc), self.ambient),
            None => {
                warn!(seconds, nanos, "Unix timestamp out of range, using zero value");
                LocalTime::zero()
            }
        }
    }
}

/// The current instant in the reference zone ([`crate::ZONE`]).
pub fn now() -> LocalTime {
    Locale::default().now()
}

/// Parse with a strftime layout in the process local zone.
pub fn parse_layout(layout: &str, input: &str) -> Result<LocalTime, Error> {
    Locale::default().parse_layout(layout, input)
}

/// Parse `YYYY-MM-DD hh:mm:ss` in the process local zone.
pub fn parse_local(input: &str) -> Result<LocalTime, Error> {
    Locale::default().parse(input)
}

pub fn parse_date(input: &str) -> Result<LocalTime, Error> {
    Locale::default().parse_date(input)
}

pub fn parse_compact(input: &str) -> Result<LocalTime, Error> {
    Locale::default().parse_compact(input)
}

pub fn parse_compact_date(input: &str) -> Result<LocalTime, Error> {
    Locale::default().parse_compact_date(input)
}

/// Unix seconds and nanoseconds, in the process local zone.
pub fn unix(seconds: i64, nanos: i64) -> LocalTime {
    Locale::default().from_unix(seconds, nanos)
}

/// Time elapsed since `t`.
pub fn since(t: LocalTime) -> TimeDelta {
    Utc::now().signed_duration_since(t.into_inner())
}

/// Time remaining until `t`.
pub fn until(t: LocalTime) -> TimeDelta {
    t.into_inner().signed_duration_since(Utc::now())
}

impl FromStr for LocalTime {
    type Err = Error;

    /// Same as [`parse_local`].
    fn from_str(s: &str) -> Result<Self, Error> {
        parse_local(s)
    }
}
