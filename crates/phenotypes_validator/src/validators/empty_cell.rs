//! Required cell check.

use phenotypes_core::{Result, RowValidationOutcome, Validator, ValidatorDescriptor};

/// Fails a row when any of the configured columns is blank.
pub struct EmptyCellValidator {
    descriptor: ValidatorDescriptor,
    indices: Vec<usize>,
}

impl EmptyCellValidator {
    /// Creates a validator requiring a value in every given column.
    pub fn new(descriptor: ValidatorDescriptor, indices: Vec<usize>) -> Self {
        Self {
            descriptor,
            indices,
        }
    }
}

impl Validator for EmptyCellValidator {
    fn descriptor(&self) -> &ValidatorDescriptor {
        &self.descriptor
    }

    fn validate_row(&mut self, columns: &[String]) -> Result<RowValidationOutcome> {
        // Cells past the end of a short row are blank too.
        let empty_indices: Vec<usize> = self
            .indices
            .iter()
            .copied()
            .filter(|index| {
                columns
                    .get(*index)
                    .is_none_or(|value| value.trim().is_empty())
            })
            .collect();

        if empty_indices.is_empty() {
            return Ok(RowValidationOutcome::pass());
        }

        Ok(
            RowValidationOutcome::fail("Empty value found in required column(s)")
                .with_item("empty_indices", empty_indices),
        )
    }
}
