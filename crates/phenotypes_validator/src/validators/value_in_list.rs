//! Accepted value check.

use phenotypes_core::{CaseRule, Result, RowValidationOutcome, Validator, ValidatorDescriptor};

/// Fails a row when a configured column holds a value outside the accepted set.
///
/// Blank cells are skipped; reporting them is the empty cell check's job.
pub struct ValueInListValidator {
    descriptor: ValidatorDescriptor,
    indices: Vec<usize>,
    accepted: Vec<String>,
    case_rule: CaseRule,
}

impl ValueInListValidator {
    /// Creates a validator matching values case-insensitively.
    pub fn new<I, S>(descriptor: ValidatorDescriptor, indices: Vec<usize>, accepted: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            descriptor,
            indices,
            accepted: accepted.into_iter().map(Into::into).collect(),
            case_rule: CaseRule::IgnoreCase,
        }
    }

    /// Sets how values are compared.
    pub fn with_case_rule(mut self, case_rule: CaseRule) -> Self {
        self.case_rule = case_rule;
        self
    }

    fn is_accepted(&self, value: &str) -> bool {
        let value = self.case_rule.normalize(value);
        self.accepted
            .iter()
            .any(|accepted| self.case_rule.normalize(accepted) == value)
    }
}

impl Validator for ValueInListValidator {
    fn descriptor(&self) -> &ValidatorDescriptor {
        &self.descriptor
    }

    fn validate_row(&mut self, columns: &[String]) -> Result<RowValidationOutcome> {
        let invalid: Vec<(usize, &str)> = self
            .indices
            .iter()
            .filter_map(|index| {
                let value = columns.get(*index)?.trim();
                (!value.is_empty() && !self.is_accepted(value)).then_some((*index, value))
            })
            .collect();

        if invalid.is_empty() {
            return Ok(RowValidationOutcome::pass());
        }

        let outcome = invalid.into_iter().fold(
            RowValidationOutcome::fail("Invalid value(s) in required column(s)"),
            |outcome, (index, value)| outcome.with_item(index.to_string(), value),
        );
        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use phenotypes_core::{DataType, InputType};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn validator() -> ValueInListValidator {
        ValueInListValidator::new(
            ValidatorDescriptor::new("valid_data_type", "Data type", [InputType::DataRow]),
            vec![5],
            DataType::NAMES,
        )
    }

    fn row(type_value: &str) -> Vec<String> {
        ["Height", "desc", "Ruler", "Measured", "cm", type_value]
            .iter()
            .map(|v| v.to_string())
            .collect()
    }

    #[test]
    fn test_accepted_values() {
        let mut validator = validator();
        assert!(validator.validate_row(&row("Quantitative")).unwrap().is_valid());
        assert!(validator.validate_row(&row("qualitative")).unwrap().is_valid());
    }

    #[test]
    fn test_invalid_value() {
        let outcome = validator().validate_row(&row("incorrect")).unwrap();
        assert_eq!(outcome.case(), "Invalid value(s) in required column(s)");
        assert_eq!(outcome.failed_item("5"), Some(&json!("incorrect")));
    }

    #[test]
    fn test_exact_case_rule() {
        let mut validator = validator().with_case_rule(CaseRule::Exact);
        let outcome = validator.validate_row(&row("quantitative")).unwrap();
        assert!(!outcome.is_valid());
    }

    #[test]
    fn test_blank_value_left_to_empty_cell() {
        assert!(validator().validate_row(&row("")).unwrap().is_valid());
    }

    #[test]
    fn test_every_violating_column_reported() {
        let mut validator = ValueInListValidator::new(
            ValidatorDescriptor::new("flags", "Flags", [InputType::DataRow]),
            vec![0, 1],
            ["yes", "no"],
        );
        let outcome = validator
            .validate_row(&["maybe".to_string(), "perhaps".to_string()])
            .unwrap();
        assert_eq!(
            outcome.failed_items().keys().collect::<Vec<_>>(),
            vec!["0", "1"]
        );
    }
}
