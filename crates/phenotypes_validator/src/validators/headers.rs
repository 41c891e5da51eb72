//! Header row check.

use phenotypes_core::{Result, RowValidationOutcome, Validator, ValidatorDescriptor};

/// Checks the header row holds every expected header, each in its expected column.
///
/// Extra trailing columns are allowed.
pub struct HeadersValidator {
    descriptor: ValidatorDescriptor,
    expected: Vec<String>,
}

impl HeadersValidator {
    /// Creates a header validator for the given expected headers.
    pub fn new(descriptor: ValidatorDescriptor, expected: Vec<String>) -> Self {
        Self {
            descriptor,
            expected,
        }
    }
}

impl Validator for HeadersValidator {
    fn descriptor(&self) -> &ValidatorDescriptor {
        &self.descriptor
    }

    fn validate_row(&mut self, columns: &[String]) -> Result<RowValidationOutcome> {
        if columns.iter().all(|column| column.trim().is_empty()) {
            return Ok(RowValidationOutcome::fail("Header row is empty"));
        }

        let provided: Vec<&str> = columns.iter().map(|column| column.trim()).collect();
        let expected: Vec<&str> = self.expected.iter().map(|header| header.trim()).collect();

        let absent: Vec<&str> = expected
            .iter()
            .copied()
            .filter(|header| !provided.contains(header))
            .collect();

        let out_of_order: Vec<&str> = if absent.is_empty() {
            expected
                .iter()
                .enumerate()
                .filter(|(index, header)| provided.get(*index) != Some(*header))
                .map(|(_, header)| *header)
                .collect()
        } else {
            // With columns absent, compare the order of the headers that remain.
            let remaining: Vec<&str> = expected
                .iter()
                .copied()
                .filter(|header| !absent.contains(header))
                .collect();
            let found: Vec<&str> = provided
                .iter()
                .copied()
                .filter(|header| remaining.contains(header))
                .collect();
            remaining
                .iter()
                .enumerate()
                .filter(|(index, header)| found.get(*index) != Some(*header))
                .map(|(_, header)| *header)
                .collect()
        };

        if absent.is_empty() && out_of_order.is_empty() {
            return Ok(RowValidationOutcome::pass());
        }

        let missing: Vec<&str> = expected
            .iter()
            .copied()
            .filter(|header| absent.contains(header) || out_of_order.contains(header))
            .collect();

        let mut outcome = RowValidationOutcome::fail(format!(
            "{} is/are missing in the file",
            missing.join(", ")
        ))
        .with_item("missing", missing);
        if !out_of_order.is_empty() {
            outcome = outcome.with_item("out_of_order", out_of_order);
        }
        Ok(outcome.with_item("headers_provided", provided))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use phenotypes_core::{InputType, columns};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn validator() -> HeadersValidator {
        HeadersValidator::new(
            ValidatorDescriptor::new("HEADERS", "Headers", [InputType::HeaderRow]),
            columns::ALL.iter().map(|h| h.to_string()).collect(),
        )
    }

    fn row(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn test_matching_headers() {
        let outcome = validator().validate_row(&row(&columns::ALL)).unwrap();
        assert!(outcome.is_valid());
    }

    #[test]
    fn test_missing_trait_description() {
        let outcome = validator()
            .validate_row(&row(&[
                "Trait Name",
                "Method Short Name",
                "Collection Method",
                "Unit",
                "Type",
            ]))
            .unwrap();

        assert!(!outcome.is_valid());
        assert_eq!(outcome.case(), "Trait Description is/are missing in the file");
        assert_eq!(
            outcome.failed_item("missing"),
            Some(&json!(["Trait Description"]))
        );
    }

    #[test]
    fn test_several_missing_are_all_named() {
        let outcome = validator()
            .validate_row(&row(&["Trait Name", "Trait Description", "Type"]))
            .unwrap();
        assert_eq!(
            outcome.case(),
            "Method Short Name, Collection Method, Unit is/are missing in the file"
        );
    }

    #[test]
    fn test_swapped_headers_are_out_of_order() {
        let outcome = validator()
            .validate_row(&row(&[
                "Trait Name",
                "Trait Description",
                "Method Short Name",
                "Collection Method",
                "Type",
                "Unit",
            ]))
            .unwrap();
        assert_eq!(outcome.case(), "Unit, Type is/are missing in the file");
        assert_eq!(outcome.failed_item("missing"), Some(&json!(["Unit", "Type"])));
        assert_eq!(outcome.failed_item("out_of_order"), Some(&json!(["Unit", "Type"])));
    }

    #[test]
    fn test_missing_and_swapped_are_reported_together() {
        let outcome = validator()
            .validate_row(&row(&[
                "Trait Name",
                "Method Short Name",
                "Collection Method",
                "Type",
                "Unit",
            ]))
            .unwrap();

        assert_eq!(
            outcome.case(),
            "Trait Description, Unit, Type is/are missing in the file"
        );
        assert_eq!(
            outcome.failed_item("missing"),
            Some(&json!(["Trait Description", "Unit", "Type"]))
        );
        assert_eq!(outcome.failed_item("out_of_order"), Some(&json!(["Unit", "Type"])));
    }

    #[test]
    fn test_interleaved_extra_column_shifts_headers() {
        let outcome = validator()
            .validate_row(&row(&[
                "Trait Name",
                "Notes",
                "Trait Description",
                "Method Short Name",
                "Collection Method",
                "Unit",
                "Type",
            ]))
            .unwrap();
        assert!(!outcome.is_valid());
        assert_eq!(
            outcome.failed_item("out_of_order"),
            Some(&json!([
                "Trait Description",
                "Method Short Name",
                "Collection Method",
                "Unit",
                "Type"
            ]))
        );
    }

    #[test]
    fn test_only_last_header_missing() {
        let outcome = validator()
            .validate_row(&row(&[
                "Trait Name",
                "Trait Description",
                "Method Short Name",
                "Collection Method",
                "Unit",
            ]))
            .unwrap();
        assert_eq!(outcome.case(), "Type is/are missing in the file");
    }

    #[test]
    fn test_extra_trailing_columns_are_allowed() {
        let mut headers = row(&columns::ALL);
        headers.push("Notes".to_string());
        assert!(validator().validate_row(&headers).unwrap().is_valid());
    }

    #[test]
    fn test_empty_header_row() {
        let outcome = validator().validate_row(&row(&["", " "])).unwrap();
        assert_eq!(outcome.case(), "Header row is empty");
    }
}
