//! The review session: records, decisions, filter, search term, view and cursor.
//!
//! [`Session`] is the only owner of this state and the only way to change it.
//! Every mutation ends in [`Session::refresh`], which recomputes the view and
//! then clamps the cursor, so a caller can never observe a cursor outside the
//! current view.

use crate::codec;
use crate::cursor;
use crate::error::{ExportError, ImportError};
use crate::store::RecordStore;
use crate::types::{Decision, Filter, RawItem, Record};
use crate::view::compute_view;

/// Per-decision record counts, independent of the active filter and search.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct DecisionCounts {
    pub accepted: usize,
    pub rejected: usize,
    pub undecided: usize,
    pub total: usize,
}

impl DecisionCounts {
    /// Count shown next to a filter tab.
    pub fn for_filter(&self, filter: Filter) -> usize {
        match filter {
            Filter::All => self.total,
            Filter::Accepted => self.accepted,
            Filter::Rejected => self.rejected,
            Filter::Undecided => self.undecided,
        }
    }

    /// Fraction of records that carry a decision, in `0.0..=1.0`.
    pub fn progress(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            (self.accepted + self.rejected) as f64 / self.total as f64
        }
    }
}

/// Complete engine state for one load/export cycle.
#[derive(Debug, Default, Clone)]
pub struct Session {
    store: RecordStore,
    filter: Filter,
    search_term: String,
    view: Vec<usize>,
    cursor: usize,
    /// Decisions as of the last load or export.
    baseline: Vec<Decision>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses `text` and, on success, replaces the session with its contents.
    ///
    /// Returns the number of records loaded.
    ///
    /// # Errors
    ///
    /// Returns the [`ImportError`] from [`codec::import`]. The session is left
    /// untouched on failure.
    pub fn import(&mut self, text: &str) -> Result<usize, ImportError> {
        let batch = codec::import(text)?;
        self.load(batch);
        Ok(self.store.len())
    }

    /// Replaces the session with `batch`.
    ///
    /// Filter goes back to `All`, the search term is cleared and the cursor
    /// returns to the first record.
    pub fn load(&mut self, batch: Vec<RawItem>) {
        self.store.load(batch);
        self.filter = Filter::All;
        self.search_term.clear();
        self.cursor = 0;
        self.baseline = self.store.decisions().to_vec();
        self.refresh();
        tracing::info!(records = self.store.len(), "session loaded");
    }

    /// Renders the whole batch with decisions merged in. Filter and search are ignored.
    ///
    /// # Errors
    ///
    /// See [`codec::export`].
    pub fn export(&self) -> Result<String, ExportError> {
        codec::export(&self.store)
    }

    pub fn store(&self) -> &RecordStore {
        &self.store
    }

    pub fn records(&self) -> &[Record] {
        self.store.records()
    }

    pub fn decisions(&self) -> &[Decision] {
        self.store.decisions()
    }

    pub fn filter(&self) -> Filter {
        self.filter
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    /// Original indices of the visible records, ascending.
    pub fn view(&self) -> &[usize] {
        &self.view
    }

    /// Position within [`Session::view`].
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// True when some decision differs from its value at the last load or
    /// [`Session::mark_exported`]. Changing a decision and changing it back
    /// leaves nothing to export.
    pub fn has_unexported_changes(&self) -> bool {
        self.store.decisions() != self.baseline.as_slice()
    }

    /// Records the current decisions as written out.
    pub fn mark_exported(&mut self) {
        self.baseline = self.store.decisions().to_vec();
    }

    /// Original index of the record under the cursor.
    pub fn current_index(&self) -> Option<usize> {
        self.view.get(self.cursor).copied()
    }

    pub fn current_record(&self) -> Option<&Record> {
        self.store.get(self.current_index()?).map(|(record, _)| record)
    }

    pub fn current_decision(&self) -> Option<Decision> {
        self.store.get(self.current_index()?).map(|(_, decision)| decision)
    }

    pub fn counts(&self) -> DecisionCounts {
        let mut counts = DecisionCounts {
            total: self.store.len(),
            ..DecisionCounts::default()
        };
        for decision in self.store.decisions() {
            match decision {
                Decision::Accepted => counts.accepted += 1,
                Decision::Rejected => counts.rejected += 1,
                Decision::Undecided => counts.undecided += 1,
            }
        }
        counts
    }

    pub fn progress(&self) -> f64 {
        self.counts().progress()
    }

    /// Switches the filter. Always sends the cursor back to the first entry.
    pub fn set_filter(&mut self, filter: Filter) {
        tracing::debug!(?filter, "filter changed");
        self.filter = filter;
        self.cursor = 0;
        self.refresh();
    }

    /// Replaces the search term. The cursor is only clamped, never reset.
    pub fn set_search_term(&mut self, term: impl Into<String>) {
        self.search_term = term.into();
        self.refresh();
    }

    pub fn push_search_char(&mut self, c: char) {
        self.search_term.push(c);
        self.refresh();
    }

    pub fn pop_search_char(&mut self) {
        if self.search_term.pop().is_some() {
            self.refresh();
        }
    }

    pub fn next(&mut self) {
        self.cursor = cursor::next(self.cursor, self.view.len());
    }

    pub fn previous(&mut self) {
        self.cursor = cursor::previous(self.cursor, self.view.len());
    }

    /// Jumps to `position` within the view, clamped to the last entry.
    pub fn select(&mut self, position: usize) {
        self.cursor = cursor::clamp(position, self.view.len());
    }

    pub fn accept(&mut self) {
        self.decide(Decision::Accepted);
    }

    pub fn reject(&mut self) {
        self.decide(Decision::Rejected);
    }

    pub fn reset(&mut self) {
        self.decide(Decision::Undecided);
    }

    /// Applies `decision` to the record under the cursor, addressed by its
    /// original index. No-op when the view is empty.
    fn decide(&mut self, decision: Decision) {
        let Some(index) = self.current_index() else {
            return;
        };
        if self.store.set(index, decision) {
            tracing::debug!(index, decision = decision.as_str(), "decision recorded");
        }
        self.refresh();
    }

    /// Recomputes the view, then clamps the cursor into it.
    fn refresh(&mut self) {
        self.view = compute_view(
            self.store.records(),
            self.store.decisions(),
            self.filter,
            &self.search_term,
        );
        self.cursor = cursor::clamp(self.cursor, self.view.len());
    }
}
