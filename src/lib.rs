//! A timestamp value anchored to one locale convention.
//!
//! [`LocalTime`] wraps a `chrono` datetime and standardizes its textual
//! representation: a fixed set of layouts, JSON that maps the zero value to
//! an empty string, SQLite binding that maps it to `NULL`, and conversion to
//! and from `google.protobuf.Timestamp`.

pub mod config;
pub mod db;
mod error;
mod json;
mod locale;
mod period;
mod time;
mod util;
mod wire;

pub use db::Source;
pub use error::Error;
pub use locale::{
    Locale, Zone, now, parse_compact, parse_compact_date, parse_date, parse_layout, parse_local,
    since, unix, until,
};
pub use time::LocalTime;

/// Default layout: `YYYY-MM-DD hh:mm:ss`.
pub const LAYOUT: &str = "%Y-%m-%d %H:%M:%S";

/// Date-only layout: `YYYY-MM-DD`.
pub const DATE_LAYOUT: &str = "%Y-%m-%d";

/// Compact layout: `YYYYMMDDhhmmss`.
pub const COMPACT_LAYOUT: &str = "%Y%m%d%H%M%S";

/// Compact date-only layout: `YYYYMMDD`.
pub const COMPACT_DATE_LAYOUT: &str = "%Y%m%d";

/// Reference zone used by [`now`].
pub const ZONE: &str = "Asia/Shanghai";
