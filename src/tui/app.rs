// TUI application state
//
// This module owns the data the rest of the UI reads: the current filter
// criteria, the fetched record set and summary stats, loading state, the
// chart cursor, and the detail modal. All mutation goes through methods
// here so the consistency rules live in one place:
//
// - the record set and summary are replaced wholesale, never partially;
// - a records completion is applied only if it belongs to the most
//   recently issued fetch (last-write-wins by sequence number);
// - a failed fetch keeps the previous records on screen;
// - the chart cursor is reset whenever the record set is replaced, so the
//   cursor and the plotted points always derive from the same snapshot.

use super::modal::Modal;
use crate::data::{BattedBall, Summary};
use crate::filters::{FilterField, Filters};
use crate::logging::LogBuffer;

/// Animation frames for the loading spinner
const SPINNER_FRAMES: [char; 4] = ['|', '/', '-', '\\'];

/// Which part of the screen receives keyboard input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    /// Typing edits the selected filter field
    #[default]
    Filters,
    /// Arrow keys move the point cursor
    Chart,
}

/// Main application state for the TUI
pub struct App {
    /// Current filter criteria (the only mutator is `edit_filter`)
    pub filters: Filters,

    /// Selected filter field in the form
    pub field_index: usize,

    /// Keyboard focus
    pub focus: Focus,

    /// Set when a filter was edited; the event loop turns it into
    /// exactly one new records fetch
    pub filters_dirty: bool,

    /// The record set currently displayed, in server response order.
    /// Point index in the chart is the join key back into this Vec.
    pub records: Vec<BattedBall>,

    /// Dataset-wide aggregates; None until the first summary fetch succeeds
    pub summary: Option<Summary>,

    /// True from fetch issue until the latest-issued fetch settles
    pub loading: bool,

    /// Sequence number of the most recently issued records fetch
    latest_issued: u64,

    /// Chart point cursor (index into `records`), None when nothing
    /// is highlighted
    pub cursor: Option<usize>,

    /// Active modal overlay; `Modal::Detail` owns the selected record
    pub modal: Option<Modal>,

    /// Message of the most recent failed records fetch, cleared on success
    pub last_error: Option<String>,

    /// Whether the app should quit
    pub should_quit: bool,

    /// Captured tracing output for the status bar
    pub log_buffer: LogBuffer,

    /// Endpoint label for the status bar ("demo" or the base URL)
    pub source_label: String,

    /// Plot area of the last rendered chart, for mouse hit-testing.
    /// Set during draw; None before the first frame.
    pub chart_plot_area: Option<ratatui::layout::Rect>,

    /// Animation frame counter
    tick: usize,
}

impl App {
    pub fn new(log_buffer: LogBuffer, source_label: String) -> Self {
        Self {
            filters: Filters::default(),
            field_index: 0,
            focus: Focus::default(),
            filters_dirty: false,
            records: Vec::new(),
            summary: None,
            loading: false,
            latest_issued: 0,
            cursor: None,
            modal: None,
            last_error: None,
            should_quit: false,
            log_buffer,
            source_label,
            chart_plot_area: None,
            tick: 0,
        }
    }

    // ----- filter form -----

    pub fn selected_field(&self) -> FilterField {
        FilterField::ALL[self.field_index]
    }

    pub fn next_field(&mut self) {
        self.field_index = (self.field_index + 1) % FilterField::ALL.len();
    }

    pub fn prev_field(&mut self) {
        let n = FilterField::ALL.len();
        self.field_index = (self.field_index + n - 1) % n;
    }

    /// Append a character to the selected filter field and mark the
    /// criteria dirty. One edit = one scheduled fetch.
    pub fn type_char(&mut self, ch: char) {
        self.filters.push_char(self.selected_field(), ch);
        self.filters_dirty = true;
    }

    /// Backspace in the selected filter field
    pub fn backspace(&mut self) {
        let field = self.selected_field();
        if !self.filters.get(field).is_empty() {
            self.filters.pop_char(field);
            self.filters_dirty = true;
        }
    }

    /// Consume the dirty flag; the caller issues the fetch
    pub fn take_filters_dirty(&mut self) -> bool {
        std::mem::take(&mut self.filters_dirty)
    }

    // ----- fetch lifecycle -----

    /// Mark a new records fetch as issued and return its sequence number.
    /// The loading flag goes up immediately.
    pub fn begin_records_fetch(&mut self) -> u64 {
        self.latest_issued += 1;
        self.loading = true;
        self.latest_issued
    }

    /// Apply a records completion.
    ///
    /// Superseded completions (any sequence number other than the latest
    /// issued) are discarded wholesale - they touch neither the records
    /// nor the loading flag. For the latest fetch the loading flag clears
    /// on success and failure alike; on failure the previous records stay
    /// in place so a transient error never blanks the chart.
    pub fn apply_records(&mut self, seq: u64, result: Result<Vec<BattedBall>, String>) {
        if seq != self.latest_issued {
            tracing::debug!(
                seq,
                latest = self.latest_issued,
                "Discarding superseded records completion"
            );
            return;
        }

        self.loading = false;
        match result {
            Ok(records) => {
                self.records = records;
                self.last_error = None;
                // New snapshot: the old cursor would point at a different
                // record, so it does not survive the replacement
                self.cursor = None;
            }
            Err(message) => {
                self.last_error = Some(message);
            }
        }
    }

    /// Apply a summary completion. Failures keep the previous value
    /// (possibly still None, which renders as a loading indicator).
    pub fn apply_summary(&mut self, result: Result<Summary, String>) {
        if let Ok(summary) = result {
            self.summary = Some(summary);
        }
    }

    // ----- selection -----

    /// Map a plotted point index back to its source record.
    /// Out-of-range indices resolve to no selection, never a panic.
    pub fn resolve_point(&self, index: usize) -> Option<&BattedBall> {
        self.records.get(index)
    }

    /// Open the detail view for the record at `index`.
    ///
    /// The resolved record is cloned into the modal, so the detail view
    /// shows a snapshot taken at click time even if a fetch replaces the
    /// record set while it is open. Returns false when the index did not
    /// resolve (the view stays closed).
    pub fn open_detail(&mut self, index: usize) -> bool {
        match self.resolve_point(index) {
            Some(record) => {
                self.modal = Some(Modal::detail(record.clone()));
                true
            }
            None => false,
        }
    }

    /// Close whatever modal is open. Drops the detail record outright so
    /// a later open can never show stale data.
    pub fn close_modal(&mut self) {
        self.modal = None;
    }

    pub fn detail_record(&self) -> Option<&BattedBall> {
        match &self.modal {
            Some(Modal::Detail(record)) => Some(record),
            _ => None,
        }
    }

    /// Move the chart cursor to the next point (starts at 0)
    pub fn cursor_next(&mut self) {
        if self.records.is_empty() {
            self.cursor = None;
            return;
        }
        let last = self.records.len() - 1;
        self.cursor = Some(match self.cursor {
            Some(i) => (i + 1).min(last),
            None => 0,
        });
    }

    /// Move the chart cursor to the previous point
    pub fn cursor_prev(&mut self) {
        if self.records.is_empty() {
            self.cursor = None;
            return;
        }
        self.cursor = Some(match self.cursor {
            Some(i) => i.saturating_sub(1),
            None => 0,
        });
    }

    /// The record under the chart cursor, from the same snapshot the
    /// chart was drawn from
    pub fn cursor_record(&self) -> Option<&BattedBall> {
        self.cursor.and_then(|i| self.records.get(i))
    }

    // ----- animation -----

    pub fn tick_animation(&mut self) {
        self.tick = self.tick.wrapping_add(1);
    }

    pub fn spinner_char(&self) -> char {
        SPINNER_FRAMES[self.tick % SPINNER_FRAMES.len()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::demo;

    fn app() -> App {
        App::new(LogBuffer::new(), "test".to_string())
    }

    fn sample_records() -> Vec<BattedBall> {
        demo::dataset()
    }

    #[test]
    fn test_loading_true_on_issue_false_on_success() {
        let mut app = app();
        assert!(!app.loading);

        let seq = app.begin_records_fetch();
        assert!(app.loading);

        app.apply_records(seq, Ok(sample_records()));
        assert!(!app.loading);
        assert!(!app.records.is_empty());
    }

    #[test]
    fn test_loading_clears_on_failure_too() {
        let mut app = app();
        let seq = app.begin_records_fetch();

        app.apply_records(seq, Err("connection refused".to_string()));
        assert!(!app.loading);
        assert_eq!(app.last_error.as_deref(), Some("connection refused"));
    }

    #[test]
    fn test_failure_keeps_previous_records() {
        let mut app = app();
        let seq = app.begin_records_fetch();
        app.apply_records(seq, Ok(sample_records()));
        let before = app.records.clone();

        let seq = app.begin_records_fetch();
        app.apply_records(seq, Err("timeout".to_string()));
        assert_eq!(app.records, before);
    }

    #[test]
    fn test_success_clears_previous_error() {
        let mut app = app();
        let seq = app.begin_records_fetch();
        app.apply_records(seq, Err("timeout".to_string()));

        let seq = app.begin_records_fetch();
        app.apply_records(seq, Ok(sample_records()));
        assert!(app.last_error.is_none());
    }

    #[test]
    fn test_superseded_completion_is_discarded() {
        let mut app = app();
        let first = app.begin_records_fetch();
        let second = app.begin_records_fetch();

        // Out-of-order completion: the older fetch settles after the
        // newer one was issued - its payload must not become visible
        app.apply_records(first, Ok(sample_records()));
        assert!(app.records.is_empty());
        assert!(app.loading, "only the latest fetch may clear loading");

        app.apply_records(second, Ok(sample_records()));
        assert!(!app.records.is_empty());
        assert!(!app.loading);
    }

    #[test]
    fn test_superseded_failure_does_not_clear_loading() {
        let mut app = app();
        let first = app.begin_records_fetch();
        let _second = app.begin_records_fetch();

        app.apply_records(first, Err("stale failure".to_string()));
        assert!(app.loading);
        assert!(app.last_error.is_none());
    }

    #[test]
    fn test_summary_failure_keeps_previous_value() {
        let mut app = app();
        app.apply_summary(Ok(demo::summarize(&sample_records())));
        let before = app.summary.clone();

        app.apply_summary(Err("boom".to_string()));
        assert_eq!(app.summary, before);
    }

    #[test]
    fn test_summary_untouched_by_records_fetch() {
        // Scenario: a filter edit re-fetches records only
        let mut app = app();
        app.apply_summary(Ok(demo::summarize(&sample_records())));
        let summary_before = app.summary.clone();

        app.type_char('J');
        assert!(app.take_filters_dirty());
        let seq = app.begin_records_fetch();
        app.apply_records(seq, Ok(Vec::new()));

        assert_eq!(app.summary, summary_before);
    }

    #[test]
    fn test_resolve_point_in_and_out_of_range() {
        let mut app = app();
        let seq = app.begin_records_fetch();
        app.apply_records(seq, Ok(sample_records()));
        let n = app.records.len();

        assert!(app.resolve_point(0).is_some());
        assert!(app.resolve_point(n - 1).is_some());
        assert!(app.resolve_point(n).is_none());
        assert!(app.resolve_point(usize::MAX).is_none());
    }

    #[test]
    fn test_resolution_is_positional() {
        // Clicking point i must resolve to record i of the same snapshot
        let mut app = app();
        let records = sample_records();
        let seq = app.begin_records_fetch();
        app.apply_records(seq, Ok(records.clone()));

        assert_eq!(app.resolve_point(0), Some(&records[0]));
        assert_eq!(app.resolve_point(1), Some(&records[1]));
        assert_eq!(
            app.resolve_point(0).unwrap().exit_speed,
            records[0].exit_speed
        );
    }

    #[test]
    fn test_detail_opens_on_valid_index_only() {
        let mut app = app();
        let seq = app.begin_records_fetch();
        app.apply_records(seq, Ok(sample_records()));

        assert!(!app.open_detail(app.records.len()));
        assert!(app.detail_record().is_none());

        assert!(app.open_detail(2));
        assert_eq!(app.detail_record(), Some(&app.records[2].clone()));
    }

    #[test]
    fn test_detail_close_clears_selection() {
        let mut app = app();
        let seq = app.begin_records_fetch();
        app.apply_records(seq, Ok(sample_records()));

        app.open_detail(0);
        app.close_modal();
        assert!(app.detail_record().is_none());
        assert!(app.modal.is_none());
    }

    #[test]
    fn test_reopen_shows_new_record_not_old() {
        let mut app = app();
        let seq = app.begin_records_fetch();
        app.apply_records(seq, Ok(sample_records()));

        app.open_detail(0);
        let first = app.detail_record().cloned().unwrap();
        app.close_modal();

        app.open_detail(1);
        let second = app.detail_record().cloned().unwrap();
        assert_ne!(first, second);
    }

    #[test]
    fn test_click_while_open_replaces_selection() {
        let mut app = app();
        let seq = app.begin_records_fetch();
        app.apply_records(seq, Ok(sample_records()));

        app.open_detail(0);
        app.open_detail(3);
        assert_eq!(app.detail_record(), Some(&app.records[3].clone()));
    }

    #[test]
    fn test_detail_survives_records_replacement() {
        // The open detail is a snapshot; replacing the result set under
        // it must not change what is displayed
        let mut app = app();
        let seq = app.begin_records_fetch();
        app.apply_records(seq, Ok(sample_records()));

        app.open_detail(0);
        let shown = app.detail_record().cloned().unwrap();

        let seq = app.begin_records_fetch();
        app.apply_records(seq, Ok(Vec::new()));
        assert_eq!(app.detail_record(), Some(&shown));
    }

    #[test]
    fn test_cursor_reset_on_records_replacement() {
        let mut app = app();
        let seq = app.begin_records_fetch();
        app.apply_records(seq, Ok(sample_records()));
        app.cursor_next();
        app.cursor_next();
        assert_eq!(app.cursor, Some(1));

        let seq = app.begin_records_fetch();
        app.apply_records(seq, Ok(sample_records()));
        assert_eq!(app.cursor, None);
    }

    #[test]
    fn test_cursor_clamps_at_ends() {
        let mut app = app();
        let seq = app.begin_records_fetch();
        app.apply_records(seq, Ok(sample_records()));
        let last = app.records.len() - 1;

        app.cursor_prev();
        assert_eq!(app.cursor, Some(0));
        app.cursor_prev();
        assert_eq!(app.cursor, Some(0));

        for _ in 0..app.records.len() + 5 {
            app.cursor_next();
        }
        assert_eq!(app.cursor, Some(last));
    }

    #[test]
    fn test_cursor_noop_when_empty() {
        let mut app = app();
        app.cursor_next();
        assert_eq!(app.cursor, None);
        assert!(app.cursor_record().is_none());
    }

    #[test]
    fn test_each_edit_marks_dirty_once() {
        let mut app = app();
        app.type_char('S');
        assert!(app.take_filters_dirty());
        // Flag is consumed
        assert!(!app.take_filters_dirty());

        // Backspace on an already-empty field schedules nothing
        app.next_field();
        app.backspace();
        assert!(!app.take_filters_dirty());
    }

    #[test]
    fn test_field_navigation_wraps() {
        let mut app = app();
        assert_eq!(app.selected_field(), FilterField::Batter);
        app.prev_field();
        assert_eq!(app.selected_field(), FilterField::MaxLaunchAngle);
        app.next_field();
        assert_eq!(app.selected_field(), FilterField::Batter);
    }
}
