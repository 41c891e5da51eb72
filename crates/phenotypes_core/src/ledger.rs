//! Failure ledger accumulated during one validation run.

use crate::RowValidationOutcome;
use serde::ser::{Serialize, SerializeMap, Serializer};
use std::collections::BTreeMap;

/// What one validator recorded during a run.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
#[serde(untagged)]
pub enum LedgerEntry {
    /// Outcome of a validator evaluated once per run
    Single(RowValidationOutcome),
    /// Failing outcomes of a row validator, keyed by 1-based line number
    PerLine(BTreeMap<usize, RowValidationOutcome>),
}

impl LedgerEntry {
    /// Returns true if the validator ran without finding anything.
    pub fn is_clean(&self) -> bool {
        match self {
            LedgerEntry::Single(outcome) => outcome.is_valid(),
            LedgerEntry::PerLine(lines) => lines.is_empty(),
        }
    }

    /// The first failure, with its line number for row validators.
    pub fn first_failure(&self) -> Option<(Option<usize>, &RowValidationOutcome)> {
        match self {
            LedgerEntry::Single(outcome) if !outcome.is_valid() => Some((None, outcome)),
            LedgerEntry::Single(_) => None,
            LedgerEntry::PerLine(lines) => lines
                .iter()
                .next()
                .map(|(line, outcome)| (Some(*line), outcome)),
        }
    }

    /// Number of recorded failures.
    pub fn failure_count(&self) -> usize {
        match self {
            LedgerEntry::Single(outcome) => usize::from(!outcome.is_valid()),
            LedgerEntry::PerLine(lines) => lines.len(),
        }
    }
}

/// Validator id to recorded results, in the order validators ran.
///
/// An id that is present ran; an id that is absent never ran.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FailureLedger {
    entries: Vec<(String, LedgerEntry)>,
}

impl FailureLedger {
    /// Creates an empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the outcome of a once-per-run validator.
    pub fn record(&mut self, validator_id: &str, outcome: RowValidationOutcome) {
        let entry = LedgerEntry::Single(outcome);
        match self.position(validator_id) {
            Some(index) => self.entries[index].1 = entry,
            None => self.entries.push((validator_id.to_string(), entry)),
        }
    }

    /// Marks a row validator as run, without any failure yet.
    pub fn open_rows(&mut self, validator_id: &str) {
        if self.position(validator_id).is_none() {
            self.entries
                .push((validator_id.to_string(), LedgerEntry::PerLine(BTreeMap::new())));
        }
    }

    /// Records the outcome of a row validator on one line.
    ///
    /// Passing outcomes only mark the validator as run.
    pub fn record_line(&mut self, validator_id: &str, line: usize, outcome: RowValidationOutcome) {
        self.open_rows(validator_id);
        if outcome.is_valid() {
            return;
        }
        let Some(index) = self.position(validator_id) else {
            return;
        };
        if let LedgerEntry::PerLine(lines) = &mut self.entries[index].1 {
            lines.insert(line, outcome);
        } else {
            self.entries[index].1 = LedgerEntry::PerLine(BTreeMap::from([(line, outcome)]));
        }
    }

    /// Results recorded for a validator.
    pub fn get(&self, validator_id: &str) -> Option<&LedgerEntry> {
        self.position(validator_id).map(|index| &self.entries[index].1)
    }

    /// Whether the validator ran.
    pub fn contains(&self, validator_id: &str) -> bool {
        self.position(validator_id).is_some()
    }

    /// Entries in execution order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &LedgerEntry)> {
        self.entries.iter().map(|(id, entry)| (id.as_str(), entry))
    }

    /// Number of validators that ran.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if no validator ran.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns true if any validator recorded a failure.
    pub fn has_failures(&self) -> bool {
        self.entries.iter().any(|(_, entry)| !entry.is_clean())
    }

    fn position(&self, validator_id: &str) -> Option<usize> {
        self.entries.iter().position(|(id, _)| id == validator_id)
    }
}

impl Serialize for FailureLedger {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (id, entry) in &self.entries {
            map.serialize_entry(id, entry)?;
        }
        map.end()
    }
}
