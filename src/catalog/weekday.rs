use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoStaticStr};

/// Day label attached to every schedule slot.
///
/// Catalog files may spell days either in English or with the Japanese
/// labels the seed data was first written in; both decode to the same variant.
/// Serde also takes the all-lowercase English name so config files accept the
/// same spellings as `--day`.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    Display,
    EnumIter,
    EnumString,
    IntoStaticStr,
)]
#[strum(ascii_case_insensitive)]
pub enum Weekday {
    #[serde(alias = "日曜日", alias = "sunday")]
    #[strum(to_string = "Sunday", serialize = "日曜日")]
    Sunday,
    #[serde(alias = "月曜日", alias = "monday")]
    #[strum(to_string = "Monday", serialize = "月曜日")]
    Monday,
    #[serde(alias = "火曜日", alias = "tuesday")]
    #[strum(to_string = "Tuesday", serialize = "火曜日")]
    Tuesday,
    #[serde(alias = "水曜日", alias = "wednesday")]
    #[strum(to_string = "Wednesday", serialize = "水曜日")]
    Wednesday,
    #[serde(alias = "木曜日", alias = "thursday")]
    #[strum(to_string = "Thursday", serialize = "木曜日")]
    Thursday,
    #[serde(alias = "金曜日", alias = "friday")]
    #[strum(to_string = "Friday", serialize = "金曜日")]
    Friday,
    #[serde(alias = "土曜日", alias = "saturday")]
    #[strum(to_string = "Saturday", serialize = "土曜日")]
    Saturday,
}

impl Weekday {
    /// Week order starting from Sunday, indexed by `from_sunday_ordinal`.
    pub const SUNDAY_FIRST: [Weekday; 7] = [
        Weekday::Sunday,
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
        Weekday::Saturday,
    ];

    /// Positional lookup where 0 is Sunday. Ordinals past 6 wrap around.
    pub fn from_sunday_ordinal(ordinal: u8) -> Self {
        Self::SUNDAY_FIRST[usize::from(ordinal % 7)]
    }

    pub fn sunday_ordinal(self) -> u8 {
        self as u8
    }

    pub fn label(self) -> &'static str {
        self.into()
    }
}

impl From<time::Weekday> for Weekday {
    fn from(day: time::Weekday) -> Self {
        Self::from_sunday_ordinal(day.number_days_from_sunday())
    }
}
