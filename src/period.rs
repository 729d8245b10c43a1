//! Calendar period boundaries, computed on the value's own date and zone.

use crate::LocalTime;
use chrono::{Datelike, NaiveDate, TimeDelta};

impl LocalTime {
    pub fn start_of_year(&self) -> Self {
        let start = NaiveDate::from_ymd_opt(self.as_datetime().year(), 1, 1)
            .and_then(|date| date.and_hms_opt(0, 0, 0));
        self.with_wall_clock(start)
    }

    /// Dec 31 23:59:59: one second before the next year starts.
    pub fn end_of_year(&self) -> Self {
        self.start_of_year().add_date(1, 0, 0) - TimeDelta::seconds(1)
    }

    pub fn start_of_month(&self) -> Self {
        let start = self
            .as_datetime()
            .date_naive()
            .with_day(1)
            .and_then(|date| date.and_hms_opt(0, 0, 0));
        self.with_wall_clock(start)
    }

    /// Last day of the month at 23:59:59.
    pub fn end_of_month(&self) -> Self {
        self.start_of_month().add_date(0, 1, 0) - TimeDelta::seconds(1)
    }

    pub fn start_of_day(&self) -> Self {
        self.with_wall_clock(self.as_datetime().date_naive().and_hms_opt(0, 0, 0))
    }

    /// 23:59:59 with zero nanoseconds, the last whole second of the day.
    pub fn end_of_day(&self) -> Self {
        self.with_wall_clock(self.as_datetime().date_naive().and_hms_opt(23, 59, 59))
    }

    /// Weeks start on Monday.
    ///
    /// Compatible with existing stored data, this returns 23:59:59 on the
    /// Monday of the week, not midnight.
    pub fn start_of_week(&self) -> Self {
        let back = i64::from(self.as_datetime().weekday().num_days_from_monday());
        let monday = self
            .as_datetime()
            .date_naive()
            .and_hms_opt(23, 59, 59)
            .and_then(|naive| naive.checked_sub_signed(TimeDelta::days(back)));
        self.with_wall_clock(monday)
    }

    /// Weeks end on Sunday.
    ///
    /// Compatible with existing stored data, this returns 00:00:00 on the
    /// Sunday of the week, not 23:59:59.
    pub fn end_of_week(&self) -> Self {
        let ahead = 6 - i64::from(self.as_datetime().weekday().num_days_from_monday());
        let sunday = self
            .as_datetime()
            .date_naive()
            .and_hms_opt(0, 0, 0)
            .and_then(|naive| naive.checked_add_signed(TimeDelta::days(ahead)));
        self.with_wall_clock(sunday)
    }
}
