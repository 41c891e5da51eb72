//! Genus existence check.

use phenotypes_core::{
    Result, RowValidationOutcome, TermResolver, ValidationContext, Validator, ValidatorDescriptor,
};
use serde_json::json;
use std::sync::Arc;

/// Checks that the configured genus exists and, when a project is set, that
/// it is the genus the project was configured with.
pub struct GenusExistsValidator {
    descriptor: ValidatorDescriptor,
    resolver: Arc<dyn TermResolver>,
}

impl GenusExistsValidator {
    /// Creates a genus validator backed by a term resolver.
    pub fn new(descriptor: ValidatorDescriptor, resolver: Arc<dyn TermResolver>) -> Self {
        Self {
            descriptor,
            resolver,
        }
    }
}

impl Validator for GenusExistsValidator {
    fn descriptor(&self) -> &ValidatorDescriptor {
        &self.descriptor
    }

    fn validate_metadata(&self, context: &ValidationContext) -> Result<RowValidationOutcome> {
        let genus = context.genus.trim();
        if genus.is_empty() {
            return Ok(RowValidationOutcome::fail("Genus is empty"));
        }

        if !self.resolver.genus_exists(genus)? {
            return Ok(RowValidationOutcome::fail("Genus does not exist")
                .with_item("genus_provided", genus));
        }

        let Some(project_id) = context.project() else {
            return Ok(RowValidationOutcome::pass());
        };

        match self.resolver.project_genus(project_id)? {
            None => Ok(RowValidationOutcome::fail("Project does not exist")
                .with_item("project_provided", project_id)),
            Some(project_genus) if project_genus != genus => Ok(RowValidationOutcome::fail(
                "Genus does not match the genus set to the project",
            )
            .with_item("genus_provided", genus)
            .with_item(
                "project_genus",
                json!({ "project_id": project_id, "genus": project_genus }),
            )),
            Some(_) => Ok(RowValidationOutcome::pass()),
        }
    }
}
