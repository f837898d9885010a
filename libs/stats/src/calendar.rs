//! Clock and calendar-day arithmetic
//!
//! Every notion of "day" in the tracker (today, the day of a check-in, the
//! days that make up a streak) is taken in one fixed UTC offset. Storage
//! keeps instants in UTC; this module maps between the two.

use chrono::{DateTime, Duration, FixedOffset, Local, NaiveDate, NaiveTime, TimeZone, Utc};
use std::fmt;
use std::sync::Arc;

/// Source of the current instant
pub trait Clock: Send + Sync + fmt::Debug {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock time
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock frozen at one instant
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Calendar zone plus the clock that defines "today"
#[derive(Debug, Clone)]
pub struct Calendar {
    offset: FixedOffset,
    clock: Arc<dyn Clock>,
}

impl Calendar {
    pub fn new(offset: FixedOffset, clock: Arc<dyn Clock>) -> Self {
        Self { offset, clock }
    }

    /// System clock in the server's current local offset.
    ///
    /// The offset is sampled once, so a daylight saving change shifts
    /// "today" by an hour until the calendar is rebuilt. Prefer
    /// [`Calendar::with_offset_minutes`] in zones that observe DST.
    pub fn local() -> Self {
        Self::new(*Local::now().offset(), Arc::new(SystemClock))
    }

    /// System clock in a configured offset; `None` when the offset is out of range
    pub fn with_offset_minutes(minutes: i32) -> Option<Self> {
        let offset = FixedOffset::east_opt(minutes.checked_mul(60)?)?;
        Some(Self::new(offset, Arc::new(SystemClock)))
    }

    pub fn offset(&self) -> FixedOffset {
        self.offset
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    pub fn today(&self) -> NaiveDate {
        self.date_of(self.now())
    }

    /// Calendar date of an instant in this zone
    pub fn date_of(&self, timestamp: DateTime<Utc>) -> NaiveDate {
        timestamp.with_timezone(&self.offset).date_naive()
    }

    /// Half-open UTC range `[start, end)` covering `day` in this zone
    pub fn day_bounds(&self, day: NaiveDate) -> (DateTime<Utc>, DateTime<Utc>) {
        let local_midnight = day.and_time(NaiveTime::MIN);
        let start = Utc.from_utc_datetime(
            &(local_midnight - Duration::seconds(self.offset.local_minus_utc().into())),
        );
        (start, start + Duration::days(1))
    }
}
