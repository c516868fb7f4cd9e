mod day;
mod periods;

pub use day::{Clock, DayResolver, FixedClock, SystemClock};
pub use periods::{period_table, resolve_period, PeriodLabel};
