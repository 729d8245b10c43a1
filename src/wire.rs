//! Conversion to and from `google.protobuf.Timestamp`.

use crate::LocalTime;
use crate::util::utc_from_unix;
use prost_types::Timestamp;
use tracing::warn;

const NANOS_PER_SECOND: u32 = 1_000_000_000;

impl LocalTime {
    /// Values decoded from the wire are expressed in UTC.
    pub fn from_timestamp_proto(ts: &Timestamp) -> Self {
        match utc_from_unix(ts.seconds, i64::from(ts.nanos)) {
            Some(utc) => LocalTime::from(utc),
            None => {
                warn!(
                    seconds = ts.seconds,
                    nanos = ts.nanos,
                    "Wire timestamp out of range, using zero value"
                );
                LocalTime::zero()
            }
        }
    }

    pub fn to_timestamp_proto(&self) -> Timestamp {
        let dt = self.as_datetime();
        // A leap second reports nanos of 1e9 or more; carry the excess.
        let nanos = dt.timestamp_subsec_nanos();
        Timestamp {
            seconds: dt.timestamp() + i64::from(nanos / NANOS_PER_SECOND),
            nanos: (nanos % NANOS_PER_SECOND) as i32,
        }
    }
}

impl From<Timestamp> for LocalTime {
    fn from(ts: Timestamp) -> Self {
        Self::from_timestamp_proto(&ts)
    }
}

impl From<&Timestamp> for LocalTime {
    fn from(ts: &Timestamp) -> Self {
        Self::from_timestamp_proto(ts)
    }
}

impl From<LocalTime> for Timestamp {
    fn from(t: LocalTime) -> Self {
        t.to_timestamp_proto()
    }
}
