use std::collections::HashMap;

use once_cell::sync::Lazy;
use strum::{Display, IntoStaticStr};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, IntoStaticStr)]
pub enum PeriodLabel {
    #[strum(serialize = "1st period")]
    First,
    #[strum(serialize = "2nd period")]
    Second,
    #[strum(serialize = "3rd period")]
    Third,
    #[strum(serialize = "4a period")]
    FourthA,
    #[strum(serialize = "4b period")]
    FourthB,
    #[strum(serialize = "5th period")]
    Fifth,
    #[strum(serialize = "6th period")]
    Sixth,
    #[strum(serialize = "7th period")]
    Seventh,
    #[strum(serialize = "8th period")]
    Eighth,
    #[strum(serialize = "9th period")]
    Ninth,
    #[strum(serialize = "10th period")]
    Tenth,
    #[strum(serialize = "unrecognized")]
    Unrecognized,
}

impl PeriodLabel {
    pub fn as_str(self) -> &'static str {
        self.into()
    }

    pub fn is_recognized(self) -> bool {
        self != PeriodLabel::Unrecognized
    }
}

// The 4th period is split around lunch.
static PERIOD_TABLE: [(&str, PeriodLabel); 11] = [
    ("9:30 - 10:15", PeriodLabel::First),
    ("10:25 - 11:10", PeriodLabel::Second),
    ("11:20 - 12:05", PeriodLabel::Third),
    ("12:15 - 13:00", PeriodLabel::FourthA),
    ("13:00 - 13:45", PeriodLabel::FourthB),
    ("13:55 - 14:40", PeriodLabel::Fifth),
    ("14:50 - 15:35", PeriodLabel::Sixth),
    ("15:45 - 16:30", PeriodLabel::Seventh),
    ("16:40 - 17:25", PeriodLabel::Eighth),
    ("17:35 - 18:20", PeriodLabel::Ninth),
    ("18:30 - 19:15", PeriodLabel::Tenth),
];

static PERIOD_LOOKUP: Lazy<HashMap<&'static str, PeriodLabel>> =
    Lazy::new(|| PERIOD_TABLE.iter().copied().collect());

/// Known time ranges in period order.
pub fn period_table() -> &'static [(&'static str, PeriodLabel)] {
    &PERIOD_TABLE
}

/// Exact-match lookup. Anything outside the table maps to `Unrecognized`.
pub fn resolve_period(time_range: &str) -> PeriodLabel {
    PERIOD_LOOKUP
        .get(time_range)
        .copied()
        .unwrap_or(PeriodLabel::Unrecognized)
}
