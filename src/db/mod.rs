//! Database driver binding.
//!
//! A [`LocalTime`] goes out as text in the default layout, or `NULL` for the
//! zero value. It comes back from any [`Source`]: a datetime, a `LocalTime`,
//! text or raw bytes. Text is only ever read with the default layout.

mod sqlite;

use crate::{Error, LAYOUT, Locale, LocalTime};
use chrono::{DateTime, TimeZone};
use tracing::debug;

/// A value handed over by a database driver.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Source<'a> {
    /// A native datetime, wrapped together with its zone.
    DateTime(LocalTime),
    LocalTime(LocalTime),
    Text(&'a str),
    Bytes(&'a [u8]),
    Integer(i64),
    Real(f64),
    Null,
}

impl Source<'_> {
    fn kind(&self) -> &'static str {
        match self {
            Source::DateTime(_) => "datetime",
            Source::LocalTime(_) => "local time",
            Source::Text(_) => "text",
            Source::Bytes(_) => "bytes",
            Source::Integer(_) => "integer",
            Source::Real(_) => "real",
            Source::Null => "null",
        }
    }
}

impl<Tz: TimeZone> From<DateTime<Tz>> for Source<'_>
where
    LocalTime: From<DateTime<Tz>>,
{
    fn from(dt: DateTime<Tz>) -> Self {
        Source::DateTime(LocalTime::from(dt))
    }
}

impl<Tz: TimeZone> From<&DateTime<Tz>> for Source<'_>
where
    LocalTime: From<DateTime<Tz>>,
{
    fn from(dt: &DateTime<Tz>) -> Self {
        Source::DateTime(LocalTime::from(dt.clone()))
    }
}

impl From<LocalTime> for Source<'_> {
    fn from(t: LocalTime) -> Self {
        Source::LocalTime(t)
    }
}

impl From<&LocalTime> for Source<'_> {
    fn from(t: &LocalTime) -> Self {
        Source::LocalTime(*t)
    }
}

impl<'a> From<&'a str> for Source<'a> {
    fn from(s: &'a str) -> Self {
        Source::Text(s)
    }
}

impl<'a> From<&'a String> for Source<'a> {
    fn from(s: &'a String) -> Self {
        Source::Text(s)
    }
}

impl<'a> From<&'a [u8]> for Source<'a> {
    fn from(bytes: &'a [u8]) -> Self {
        Source::Bytes(bytes)
    }
}

impl<'a> From<&'a Vec<u8>> for Source<'a> {
    fn from(bytes: &'a Vec<u8>) -> Self {
        Source::Bytes(bytes)
    }
}

impl From<i64> for Source<'_> {
    fn from(v: i64) -> Self {
        Source::Integer(v)
    }
}

impl From<f64> for Source<'_> {
    fn from(v: f64) -> Self {
        Source::Real(v)
    }
}

impl Locale {
    /// Read a driver value into `target`, parsing text in the ambient zone.
    ///
    /// On error `target` is left as it was.
    pub fn scan(&self, target: &mut LocalTime, src: Source<'_>) -> Result<(), Error> {
        *target = match src {
            Source::DateTime(t) | Source::LocalTime(t) => t,
            Source::Text(text) => self.parse_scanned(text)?,
            Source::Bytes(bytes) => match std::str::from_utf8(bytes) {
                Ok(text) => self.parse_scanned(text)?,
                Err(err) => {
                    debug!(error = %err, "Rejected non UTF-8 driver bytes for LocalTime");
                    return Err(Error::InvalidString);
                }
            },
            other => {
                debug!(kind = other.kind(), "Rejected driver value for LocalTime");
                return Err(Error::IncompatibleType);
            }
        };
        Ok(())
    }

    fn parse_scanned(&self, text: &str) -> Result<LocalTime, Error> {
        self.parse(text).map_err(|err| {
            debug!(
                layout = LAYOUT,
                input = text,
                error = %err,
                "Rejected driver text for LocalTime"
            );
            Error::InvalidString
        })
    }
}

impl LocalTime {
    /// Outbound driver value: `None` for the zero value.
    pub fn value(&self) -> Option<String> {
        if self.is_zero() {
            return None;
        }
        Some(self.to_string())
    }

    /// See [`Locale::scan`]; text is parsed in the process local zone.
    pub fn scan<'a>(&mut self, src: impl Into<Source<'a>>) -> Result<(), Error> {
        Locale::default().scan(self, src.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use chrono_tz::Tz;
    use std::io::{self, Write};
    use std::sync::{Arc, Mutex};

    fn utc_locale() -> Locale {
        Locale::new(Tz::Asia__Shanghai, crate::Zone::Named(Tz::UTC))
    }

    fn sample() -> LocalTime {
        LocalTime::from(Utc.with_ymd_and_hms(2024, 1, 15, 12, 30, 45).unwrap())
    }

    #[test]
    fn value_of_zero_is_none() {
        assert_eq!(LocalTime::zero().value(), None);
        assert_eq!(sample().value().as_deref(), Some("2024-01-15 12:30:45"));
    }

    #[test]
    fn scan_native_and_wrapped_values() {
        let dt = Utc.with_ymd_and_hms(2024, 1, 15, 12, 30, 45).unwrap();

        let mut by_value = LocalTime::zero();
        by_value.scan(dt).unwrap();
        let mut by_ref = LocalTime::zero();
        by_ref.scan(&dt).unwrap();
        let mut wrapped = LocalTime::zero();
        wrapped.scan(sample()).unwrap();
        let mut wrapped_ref = LocalTime::zero();
        wrapped_ref.scan(&sample()).unwrap();

        assert_eq!(by_value, sample());
        assert_eq!(by_ref, sample());
        assert_eq!(wrapped, sample());
        assert_eq!(wrapped_ref, sample());
    }

    #[test]
    fn scan_text_and_bytes_agree() {
        let locale = utc_locale();
        let text = String::from("2024-01-15 12:30:45");

        let mut from_str = LocalTime::zero();
        locale.scan(&mut from_str, Source::from(text.as_str())).unwrap();
        let mut from_string = LocalTime::zero();
        locale.scan(&mut from_string, Source::from(&text)).unwrap();
        let mut from_bytes = LocalTime::zero();
        locale
            .scan(&mut from_bytes, Source::from(text.as_bytes()))
            .unwrap();
        let mut from_vec = LocalTime::zero();
        let raw = text.clone().into_bytes();
        locale.scan(&mut from_vec, Source::from(&raw)).unwrap();

        assert_eq!(from_str, sample());
        assert_eq!(from_string, sample());
        assert_eq!(from_bytes, sample());
        assert_eq!(from_vec, sample());
    }

    #[test]
    fn scan_only_accepts_the_default_layout() {
        let mut t = sample();
        let err = t.scan("20240115123045").unwrap_err();
        assert!(matches!(err, Error::InvalidString));
        assert_eq!(err.to_string(), "Invalid string for LocalTime");
        assert_eq!(t, sample());

        let err = t.scan(&[0xffu8, 0xfe][..]).unwrap_err();
        assert!(matches!(err, Error::InvalidString));
    }

    #[test]
    fn scan_rejects_other_kinds() {
        let mut t = LocalTime::zero();
        for src in [Source::Integer(1_705_321_845), Source::Real(1.5), Source::Null] {
            let err = t.scan(src).unwrap_err();
            assert!(matches!(err, Error::IncompatibleType));
            assert_eq!(err.to_string(), "Incompatible type for LocalTime");
        }
        assert!(t.is_zero());
    }

    #[test]
    fn scan_local_text_round_trips_value() {
        let mut t = LocalTime::zero();
        t.scan("2024-01-15 12:30:45").unwrap();
        assert_eq!(t.value().as_deref(), Some("2024-01-15 12:30:45"));
    }

    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl Write for Captured {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn rejected_text_is_logged() {
        let captured = Captured::default();
        let writer = captured.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();

        tracing::subscriber::with_default(subscriber, || {
            let mut t = LocalTime::zero();
            assert!(t.scan("20240115123045").is_err());
        });

        let output = String::from_utf8(captured.0.lock().unwrap().clone()).unwrap();
        assert!(output.contains("Rejected driver text for LocalTime"));
        assert!(output.contains("20240115123045"));
    }
}
