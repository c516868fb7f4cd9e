use time::OffsetDateTime;

use crate::catalog::Weekday;

/// Source of the current moment.
pub trait Clock {
    fn now(&self) -> OffsetDateTime;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> OffsetDateTime {
        match OffsetDateTime::now_local() {
            Ok(now) => now,
            Err(err) => {
                tracing::warn!(%err, "local UTC offset unavailable, resolving day in UTC");
                OffsetDateTime::now_utc()
            }
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub OffsetDateTime);

impl Clock for FixedClock {
    fn now(&self) -> OffsetDateTime {
        self.0
    }
}

/// Weekday captured once when a session starts.
///
/// The value is never refreshed, so a session left open across midnight keeps
/// showing the day it was opened on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayResolver {
    current: Weekday,
}

impl DayResolver {
    pub fn resolve(clock: &dyn Clock) -> Self {
        let now = clock.now();
        let current = Weekday::from_sunday_ordinal(now.weekday().number_days_from_sunday());
        tracing::debug!(day = %current, date = %now.date(), "resolved current weekday");
        Self { current }
    }

    pub fn fixed(day: Weekday) -> Self {
        Self { current: day }
    }

    pub fn current_day(&self) -> Weekday {
        self.current
    }
}
