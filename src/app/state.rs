use unicode_segmentation::UnicodeSegmentation;

use crate::board::{BoardError, ScheduleBoard, TodaySlot};
use crate::catalog::{StaffRecord, Weekday};
use crate::search::SubjectGroup;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusPane {
    List,
    Detail,
}

/// Line of the left pane: either a subject heading or a staff entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListRow<'a> {
    Subject { name: &'a str, count: usize },
    Staff(&'a StaffRecord),
}

#[derive(Debug, Clone, Default)]
pub struct SearchState {
    pub active: bool,
    pub query: String,
}

/// Interactive state layered on top of a [`ScheduleBoard`]: list cursor,
/// pane focus and the search prompt.
#[derive(Debug, Clone)]
pub struct AppState {
    board: ScheduleBoard,
    pub focus: FocusPane,
    /// Position among visible staff entries, ignoring subject headings.
    pub cursor: usize,
    pub search: SearchState,
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(board: ScheduleBoard) -> Self {
        let query = board.search_text().to_string();
        Self {
            board,
            focus: FocusPane::List,
            cursor: 0,
            search: SearchState {
                active: false,
                query,
            },
            status_message: None,
        }
    }

    pub fn board(&self) -> &ScheduleBoard {
        &self.board
    }

    pub fn current_day(&self) -> Weekday {
        self.board.current_day()
    }

    pub fn total(&self) -> usize {
        self.board.catalog().len()
    }

    pub fn visible_groups(&self) -> Vec<SubjectGroup<'_>> {
        self.board.visible_groups()
    }

    /// Visible records in display order (grouped, then catalog order).
    pub fn visible_ids(&self) -> Vec<u32> {
        self.visible_groups()
            .iter()
            .flat_map(|group| group.records.iter().map(|record| record.id))
            .collect()
    }

    pub fn visible_len(&self) -> usize {
        self.board.visible_records().len()
    }

    pub fn is_empty(&self) -> bool {
        self.visible_len() == 0
    }

    pub fn list_rows(&self) -> Vec<ListRow<'_>> {
        let groups = self.visible_groups();
        let mut rows = Vec::with_capacity(groups.len() + self.visible_len());
        for group in groups {
            rows.push(ListRow::Subject {
                name: group.subject,
                count: group.len(),
            });
            rows.extend(group.records.into_iter().map(ListRow::Staff));
        }
        rows
    }

    /// Index into [`Self::list_rows`] of the entry under the cursor.
    pub fn cursor_row(&self) -> Option<usize> {
        let target = self.cursor_record()?.id;
        self.list_rows()
            .iter()
            .position(|row| matches!(row, ListRow::Staff(record) if record.id == target))
    }

    pub fn cursor_record(&self) -> Option<&StaffRecord> {
        let id = *self.visible_ids().get(self.cursor)?;
        self.board.catalog().get(id)
    }

    pub fn selected_record(&self) -> Option<&StaffRecord> {
        self.board.selected_record()
    }

    pub fn todays_slots(&self) -> Option<Vec<TodaySlot<'_>>> {
        self.board.todays_slots()
    }

    pub fn move_cursor(&mut self, delta: isize) {
        let len = self.visible_len();
        if len == 0 {
            self.cursor = 0;
            return;
        }
        let next = (self.cursor as isize + delta).clamp(0, len as isize - 1);
        self.cursor = next as usize;
    }

    pub fn jump_first(&mut self) {
        self.cursor = 0;
    }

    pub fn jump_last(&mut self) {
        self.cursor = self.visible_len().saturating_sub(1);
    }

    pub fn select_under_cursor(&mut self) -> Result<(), BoardError> {
        let Some(id) = self.cursor_record().map(|record| record.id) else {
            return Ok(());
        };
        self.board.select(id)?;
        self.focus = FocusPane::Detail;
        Ok(())
    }

    pub fn clear_selection(&mut self) -> bool {
        if self.board.selected_id().is_none() {
            return false;
        }
        self.board.clear_selection();
        self.focus = FocusPane::List;
        true
    }

    pub fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            FocusPane::List => FocusPane::Detail,
            FocusPane::Detail => FocusPane::List,
        };
    }

    pub fn is_search_active(&self) -> bool {
        self.search.active
    }

    pub fn search_query(&self) -> &str {
        &self.search.query
    }

    pub fn begin_search(&mut self) {
        self.search.active = true;
        self.focus = FocusPane::List;
    }

    pub fn finish_search(&mut self) {
        self.search.active = false;
    }

    pub fn cancel_search(&mut self) {
        self.search.active = false;
        self.clear_search();
    }

    pub fn clear_search(&mut self) {
        self.search.query.clear();
        self.apply_search();
    }

    pub fn push_search_char(&mut self, ch: char) {
        self.search.query.push(ch);
        self.apply_search();
    }

    pub fn pop_search_grapheme(&mut self) -> bool {
        let Some((idx, _)) = self.search.query.grapheme_indices(true).next_back() else {
            return false;
        };
        self.search.query.truncate(idx);
        self.apply_search();
        true
    }

    pub fn status_message(&self) -> Option<&str> {
        self.status_message.as_deref()
    }

    pub fn set_status_message<S: Into<String>>(&mut self, message: Option<S>) {
        self.status_message = message.map(Into::into);
    }

    fn apply_search(&mut self) {
        let anchor = self.cursor_record().map(|record| record.id);
        self.board.set_search_text(self.search.query.clone());
        self.cursor = anchor
            .and_then(|id| self.visible_ids().iter().position(|visible| *visible == id))
            .unwrap_or(0);
        self.move_cursor(0);
    }
}
