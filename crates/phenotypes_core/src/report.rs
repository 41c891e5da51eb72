//! User-facing validation report.
//!
//! The report has one entry per well-known validator key, in a fixed order.
//! Keys and titles are what consumers bind to, so they are treated as a
//! stable surface.

use crate::LedgerEntry;
use serde::ser::{Serialize, SerializeMap, Serializer};
use std::fmt;

/// Status of one check in the report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportStatus {
    /// The check never ran
    Todo,
    /// The check ran and found nothing
    Pass,
    /// The check ran and found at least one problem
    Fail,
}

impl fmt::Display for ReportStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReportStatus::Todo => f.write_str("todo"),
            ReportStatus::Pass => f.write_str("pass"),
            ReportStatus::Fail => f.write_str("fail"),
        }
    }
}

/// One line of the report.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct ReportEntry {
    /// Well-known validator key
    #[serde(skip)]
    pub key: String,

    /// Title shown to the user
    pub title: String,

    /// Outcome of the check
    pub status: ReportStatus,

    /// Message describing the first failure; empty unless failed
    pub details: String,

    /// Everything the validator recorded, kept for failed checks
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw_results: Option<LedgerEntry>,
}

/// Final artifact of a validation run.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationReport {
    entries: Vec<ReportEntry>,
}

impl ValidationReport {
    /// Creates a report from its entries, in display order.
    pub fn new(entries: Vec<ReportEntry>) -> Self {
        Self { entries }
    }

    /// Entries in display order.
    pub fn entries(&self) -> &[ReportEntry] {
        &self.entries
    }

    /// The entry for a key.
    pub fn entry(&self, key: &str) -> Option<&ReportEntry> {
        self.entries.iter().find(|entry| entry.key == key)
    }

    /// The status for a key.
    pub fn status(&self, key: &str) -> Option<ReportStatus> {
        self.entry(key).map(|entry| entry.status)
    }

    /// Returns true if no check failed.
    pub fn passed(&self) -> bool {
        self.entries
            .iter()
            .all(|entry| entry.status != ReportStatus::Fail)
    }

    /// Entries that failed.
    pub fn failures(&self) -> impl Iterator<Item = &ReportEntry> {
        self.entries
            .iter()
            .filter(|entry| entry.status == ReportStatus::Fail)
    }

    /// Serializes the report as pretty JSON.
    pub fn to_json_pretty(&self) -> crate::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl Serialize for ValidationReport {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for entry in &self.entries {
            map.serialize_entry(&entry.key, entry)?;
        }
        map.end()
    }
}
