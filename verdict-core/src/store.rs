//! Record storage: the imported batch and its parallel decision vector.

use serde_json::Value;

use crate::types::{Decision, RawItem, Record};

/// Holds the imported records and one decision per record.
///
/// `records` and `decisions` always have the same length: both are replaced
/// together by [`RecordStore::load`] and nothing else changes their size.
#[derive(Debug, Default, Clone)]
pub struct RecordStore {
    records: Vec<Record>,
    decisions: Vec<Decision>,
}

impl RecordStore {
    /// Replaces the whole store with `batch`.
    ///
    /// Each record starts with the decision found in its own `status` field, or
    /// `Undecided` when that field is missing or not a recognised value.
    pub fn load(&mut self, batch: Vec<RawItem>) {
        let records: Vec<Record> = batch.into_iter().map(Record::from_raw).collect();
        let decisions = records
            .iter()
            .map(|r| r.prior_decision().unwrap_or_default())
            .collect();
        self.records = records;
        self.decisions = decisions;
        tracing::debug!(records = self.records.len(), "record store loaded");
    }

    /// Returns every record merged with its current decision under `status`.
    ///
    /// Record order is preserved. An existing `status` field is overwritten in
    /// place; otherwise it is appended after the record's own fields.
    pub fn serialize(&self) -> Vec<RawItem> {
        self.records
            .iter()
            .zip(&self.decisions)
            .map(|(record, decision)| {
                let mut item = record.raw().clone();
                item.insert("status".to_owned(), Value::from(decision.as_str()));
                item
            })
            .collect()
    }

    /// Sets the decision for the record at original `index`.
    ///
    /// Returns `true` when the stored decision changed. Out-of-range indices are
    /// ignored.
    pub fn set(&mut self, index: usize, decision: Decision) -> bool {
        match self.decisions.get_mut(index) {
            Some(slot) if *slot != decision => {
                *slot = decision;
                true
            }
            _ => false,
        }
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn decisions(&self) -> &[Decision] {
        &self.decisions
    }

    /// Record at original `index` together with its decision.
    pub fn get(&self, index: usize) -> Option<(&Record, Decision)> {
        Some((self.records.get(index)?, *self.decisions.get(index)?))
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
