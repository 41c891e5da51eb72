//! Reduces a failure ledger to the user-facing report.

use crate::keys;
use phenotypes_core::{FailureLedger, LedgerEntry, ReportEntry, ReportStatus, ValidationReport};

/// Maps ledger entries onto a fixed list of report keys.
///
/// Keys that are not in the ledger are `todo`, clean entries are `pass` and
/// anything else is `fail` with the first failure as details.
#[derive(Debug, Clone)]
pub struct ResultReducer {
    checks: Vec<(String, String)>,
}

impl ResultReducer {
    /// Creates a reducer reporting the given `(key, title)` pairs in order.
    pub fn new<I, K, T>(checks: I) -> Self
    where
        I: IntoIterator<Item = (K, T)>,
        K: Into<String>,
        T: Into<String>,
    {
        Self {
            checks: checks
                .into_iter()
                .map(|(key, title)| (key.into(), title.into()))
                .collect(),
        }
    }

    /// The reducer for a traits import.
    pub fn traits() -> Self {
        Self::new([
            (keys::GENUS, "Genus exists and/or matches the project"),
            (keys::FILE, "File is a valid tsv or txt"),
            (keys::HEADERS, "File has all of the column headers expected"),
            (keys::EMPTY_CELL, "Required cells contain a value"),
            (keys::VALID_DATA_TYPE, "Values in required cells are valid"),
            (
                keys::DUPLICATE_TRAITS,
                "All trait-method-unit combinations are unique",
            ),
        ])
    }

    /// Builds the report.
    pub fn reduce(&self, ledger: &FailureLedger) -> ValidationReport {
        let entries = self
            .checks
            .iter()
            .map(|(key, title)| {
                let (status, details, raw_results) = match ledger.get(key) {
                    None => (ReportStatus::Todo, String::new(), None),
                    Some(entry) => match entry.first_failure() {
                        None => (ReportStatus::Pass, String::new(), None),
                        Some((line, outcome)) => {
                            let details = match line {
                                Some(line) => format!("{} at row #: {}", outcome.case(), line),
                                None => outcome.case().to_string(),
                            };
                            (ReportStatus::Fail, details, Some(entry.clone()))
                        }
                    },
                };
                ReportEntry {
                    key: key.clone(),
                    title: title.clone(),
                    status,
                    details,
                    raw_results,
                }
            })
            .collect();

        ValidationReport::new(entries)
    }
}

impl Default for ResultReducer {
    fn default() -> Self {
        Self::traits()
    }
}

/// Counts failing lines across every row-keyed entry of a ledger.
pub fn failing_lines(ledger: &FailureLedger) -> usize {
    ledger
        .iter()
        .filter_map(|(_, entry)| match entry {
            LedgerEntry::PerLine(lines) => Some(lines.len()),
            LedgerEntry::Single(_) => None,
        })
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use phenotypes_core::RowValidationOutcome;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_untouched_ledger_is_all_todo() {
        let report = ResultReducer::traits().reduce(&FailureLedger::new());
        let ids: Vec<&str> = report.entries().iter().map(|e| e.key.as_str()).collect();
        assert_eq!(ids, keys::ALL);
        assert!(
            report
                .entries()
                .iter()
                .all(|entry| entry.status == ReportStatus::Todo)
        );
        assert!(report.passed());
    }

    #[test]
    fn test_single_failure_details() {
        let mut ledger = FailureLedger::new();
        ledger.record(keys::GENUS, RowValidationOutcome::pass());
        ledger.record(keys::FILE, RowValidationOutcome::fail("Unsupported file mime type"));

        let report = ResultReducer::traits().reduce(&ledger);
        assert_eq!(report.status(keys::GENUS), Some(ReportStatus::Pass));

        let file = report.entry(keys::FILE).unwrap();
        assert_eq!(file.status, ReportStatus::Fail);
        assert_eq!(file.details, "Unsupported file mime type");
        assert_eq!(file.title, "File is a valid tsv or txt");
        assert!(file.raw_results.is_some());
        assert_eq!(report.status(keys::HEADERS), Some(ReportStatus::Todo));
    }

    #[test]
    fn test_row_failure_names_first_line() {
        let mut ledger = FailureLedger::new();
        ledger.record_line(
            keys::EMPTY_CELL,
            4,
            RowValidationOutcome::fail("Empty value found in required column(s)"),
        );
        ledger.record_line(
            keys::EMPTY_CELL,
            2,
            RowValidationOutcome::fail("Empty value found in required column(s)"),
        );
        ledger.record_line(keys::VALID_DATA_TYPE, 2, RowValidationOutcome::pass());

        let report = ResultReducer::traits().reduce(&ledger);
        assert_eq!(
            report.entry(keys::EMPTY_CELL).unwrap().details,
            "Empty value found in required column(s) at row #: 2"
        );
        assert_eq!(report.status(keys::VALID_DATA_TYPE), Some(ReportStatus::Pass));
        assert_eq!(failing_lines(&ledger), 2);
        assert!(!report.passed());
    }

    #[test]
    fn test_custom_checks() {
        let mut ledger = FailureLedger::new();
        ledger.record("extra", RowValidationOutcome::pass());

        let report = ResultReducer::new([("extra", "Extra check")]).reduce(&ledger);
        assert_eq!(report.entries().len(), 1);
        assert_eq!(report.status("extra"), Some(ReportStatus::Pass));
    }
}
