//! JSON rendering: the zero value is `""`, anything else the default layout.

use crate::{Error, LAYOUT, Locale, LocalTime};
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use tracing::debug;

const EMPTY_JSON_STRING: &[u8] = b"\"\"";

impl Serialize for LocalTime {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

struct LocalTimeVisitor;

impl Visitor<'_> for LocalTimeVisitor {
    type Value = LocalTime;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("an empty string or a \"YYYY-MM-DD hh:mm:ss\" timestamp")
    }

    fn visit_str<E: de::Error>(self, value: &str) -> Result<LocalTime, E> {
        if value.is_empty() {
            return Ok(LocalTime::zero());
        }
        Locale::default().parse(value).map_err(E::custom)
    }
}

/// Parses in the process local zone. An empty string yields the zero value.
impl<'de> Deserialize<'de> for LocalTime {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_str(LocalTimeVisitor)
    }
}

impl LocalTime {
    /// The exact JSON bytes [`Serialize`] produces.
    pub fn encode_json(&self) -> Vec<u8> {
        format!("\"{self}\"").into_bytes()
    }

    /// Decode a raw JSON value into `self`.
    ///
    /// Empty input and `""` leave `self` untouched; they do not reset it to
    /// zero. Callers wanting "absent" semantics must start from
    /// [`LocalTime::zero`].
    pub fn decode_json(&mut self, data: &[u8]) -> Result<(), Error> {
        Locale::default().decode_json(self, data)
    }
}

impl Locale {
    /// [`LocalTime::decode_json`], parsing in this locale's ambient zone.
    pub fn decode_json(&self, target: &mut LocalTime, data: &[u8]) -> Result<(), Error> {
        if data.is_empty() || data == EMPTY_JSON_STRING {
            return Ok(());
        }

        let text = std::str::from_utf8(data).map_err(|err| {
            debug!(error = %err, "JSON timestamp is not UTF-8");
            err
        })?;
        *target = self.parse_layout(&format!("\"{LAYOUT}\""), text)?;
        Ok(())
    }
}
