use thiserror::Error;

use crate::catalog::{Catalog, ScheduleSlot, StaffRecord, Weekday};
use crate::schedule::{resolve_period, Clock, DayResolver, PeriodLabel};
use crate::search::{filter_records, group_by_subject, SubjectGroup};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum BoardError {
    #[error("no staff record with id {0}")]
    UnknownRecord(u32),
}

/// One row of the detail view: a slot on the current day plus its period.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TodaySlot<'a> {
    pub slot: &'a ScheduleSlot,
    pub period: PeriodLabel,
}

/// Session state over an immutable catalog: the search text and at most one
/// selected record. Everything shown to the user is derived on read.
#[derive(Debug, Clone)]
pub struct ScheduleBoard {
    catalog: Catalog,
    day: DayResolver,
    search_text: String,
    selected: Option<u32>,
}

impl ScheduleBoard {
    pub fn new(catalog: Catalog, day: DayResolver) -> Self {
        Self {
            catalog,
            day,
            search_text: String::new(),
            selected: None,
        }
    }

    pub fn with_clock(catalog: Catalog, clock: &dyn Clock) -> Self {
        Self::new(catalog, DayResolver::resolve(clock))
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn current_day(&self) -> Weekday {
        self.day.current_day()
    }

    pub fn search_text(&self) -> &str {
        &self.search_text
    }

    pub fn set_search_text(&mut self, text: impl Into<String>) {
        self.search_text = text.into();
        tracing::trace!(query = %self.search_text, "search text updated");
    }

    pub fn select(&mut self, id: u32) -> Result<(), BoardError> {
        if !self.catalog.contains(id) {
            tracing::warn!(id, "attempted to select unknown staff record");
            return Err(BoardError::UnknownRecord(id));
        }
        self.selected = Some(id);
        tracing::debug!(id, "staff record selected");
        Ok(())
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    pub fn selected_id(&self) -> Option<u32> {
        self.selected
    }

    pub fn selected_record(&self) -> Option<&StaffRecord> {
        self.selected.and_then(|id| self.catalog.get(id))
    }

    pub fn visible_records(&self) -> Vec<&StaffRecord> {
        filter_records(&self.catalog, &self.search_text)
    }

    pub fn visible_groups(&self) -> Vec<SubjectGroup<'_>> {
        group_by_subject(self.visible_records())
    }

    /// Slots of the selected record that fall on the current day, or `None`
    /// when nothing is selected. An empty vector means no sessions today.
    pub fn todays_slots(&self) -> Option<Vec<TodaySlot<'_>>> {
        let record = self.selected_record()?;
        Some(todays_slots_for(record, self.current_day()))
    }
}

pub fn todays_slots_for(record: &StaffRecord, day: Weekday) -> Vec<TodaySlot<'_>> {
    record
        .slots_on(day)
        .map(|slot| TodaySlot {
            slot,
            period: resolve_period(&slot.time),
        })
        .collect()
}
