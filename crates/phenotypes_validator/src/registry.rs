//! Explicit validator registry.
//!
//! Validators are registered by id together with a factory. The pipeline asks
//! the registry which validators handle an input type and creates a fresh
//! instance of each for every run, so per-run state never leaks between runs.

use phenotypes_core::{
    InputType, PhenotypesError, Result, ValidationContext, Validator, ValidatorDescriptor,
};

/// Builds a validator for one run.
pub type ValidatorFactory =
    Box<dyn Fn(&ValidatorDescriptor, &ValidationContext) -> Result<Box<dyn Validator>> + Send + Sync>;

struct Registration {
    descriptor: ValidatorDescriptor,
    factory: ValidatorFactory,
}

/// Ordered set of validators known to the pipeline.
///
/// Registration order is execution order within a stage.
///
/// # Example
///
/// ```rust
/// use phenotypes_core::{InputType, ValidationContext, Validator, ValidatorDescriptor};
/// use phenotypes_validator::{EmptyCellValidator, ValidatorRegistry};
///
/// let mut registry = ValidatorRegistry::new();
/// registry
///     .register(
///         ValidatorDescriptor::new("empty_cell", "Required cells", [InputType::DataRow]),
///         |descriptor, _context| {
///             Ok(Box::new(EmptyCellValidator::new(descriptor.clone(), vec![0])))
///         },
///     )
///     .unwrap();
///
/// let context = ValidationContext::new("Lens", "traits.tsv");
/// let mut validator = registry.create("empty_cell", &context).unwrap();
/// let outcome = validator.validate_row(&["".to_string()]).unwrap();
/// assert!(!outcome.is_valid());
/// assert_eq!(registry.resolve(InputType::DataRow).len(), 1);
/// ```
#[derive(Default)]
pub struct ValidatorRegistry {
    registrations: Vec<Registration>,
}

impl ValidatorRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a validator.
    ///
    /// Fails with [`PhenotypesError::DuplicateValidatorId`] if the id is taken.
    pub fn register<F>(&mut self, descriptor: ValidatorDescriptor, factory: F) -> Result<()>
    where
        F: Fn(&ValidatorDescriptor, &ValidationContext) -> Result<Box<dyn Validator>>
            + Send
            + Sync
            + 'static,
    {
        if self.find(&descriptor.id).is_some() {
            return Err(PhenotypesError::DuplicateValidatorId(descriptor.id));
        }
        self.registrations.push(Registration {
            descriptor,
            factory: Box::new(factory),
        });
        Ok(())
    }

    /// Descriptors of the validators handling an input type, in registration order.
    pub fn resolve(&self, input_type: InputType) -> Vec<&ValidatorDescriptor> {
        self.registrations
            .iter()
            .map(|registration| &registration.descriptor)
            .filter(|descriptor| descriptor.supports(input_type))
            .collect()
    }

    /// Creates a fresh validator instance for a run.
    pub fn create(&self, id: &str, context: &ValidationContext) -> Result<Box<dyn Validator>> {
        let registration = self
            .find(id)
            .ok_or_else(|| PhenotypesError::UnknownValidatorId(id.to_string()))?;
        (registration.factory)(&registration.descriptor, context)
    }

    /// Every registered descriptor, in registration order.
    pub fn descriptors(&self) -> impl Iterator<Item = &ValidatorDescriptor> {
        self.registrations
            .iter()
            .map(|registration| &registration.descriptor)
    }

    /// Number of registered validators.
    pub fn len(&self) -> usize {
        self.registrations.len()
    }

    /// Returns true if nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.registrations.is_empty()
    }

    fn find(&self, id: &str) -> Option<&Registration> {
        self.registrations
            .iter()
            .find(|registration| registration.descriptor.id == id)
    }
}
