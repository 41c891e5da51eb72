//! Validation traits and types.
//!
//! A validator works on exactly the granularities it declares in its
//! [`ValidatorDescriptor`]. The pipeline only calls the method matching the
//! stage it is in, so calling any other method is a registration mistake and
//! fails with [`PhenotypesError::NotSupported`].

use crate::{FileId, PhenotypesError, Result, ValidationContext};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// The granularity a validator operates on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum InputType {
    /// Static, non-file inputs such as the genus
    Metadata,
    /// The file object itself, without reading its contents
    File,
    /// The first line of the file, split into columns
    HeaderRow,
    /// Every line after the header, split into columns
    DataRow,
    /// An unsplit line; never dispatched by the pipeline
    RawRow,
}

impl fmt::Display for InputType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            InputType::Metadata => "metadata",
            InputType::File => "file",
            InputType::HeaderRow => "header-row",
            InputType::DataRow => "data-row",
            InputType::RawRow => "raw-row",
        };
        f.write_str(name)
    }
}

/// Identity of a registered validator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidatorDescriptor {
    /// Unique id; also the key the validator's results are stored under
    pub id: String,

    /// Human readable name
    pub display_name: String,

    /// Input types this validator implements
    pub supported_input_types: BTreeSet<InputType>,
}

impl ValidatorDescriptor {
    /// Creates a descriptor for the given input types.
    pub fn new(
        id: impl Into<String>,
        display_name: impl Into<String>,
        input_types: impl IntoIterator<Item = InputType>,
    ) -> Self {
        Self {
            id: id.into(),
            display_name: display_name.into(),
            supported_input_types: input_types.into_iter().collect(),
        }
    }

    /// Returns true if the validator implements `input_type`.
    pub fn supports(&self, input_type: InputType) -> bool {
        self.supported_input_types.contains(&input_type)
    }
}

/// Verdict of one validator on one row or one static target.
///
/// A passing outcome never carries a case or failed items; the only way to
/// build one is [`RowValidationOutcome::pass`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RowValidationOutcome {
    valid: bool,
    case: String,
    failed_items: BTreeMap<String, Value>,
}

impl RowValidationOutcome {
    /// A passing outcome.
    pub fn pass() -> Self {
        Self {
            valid: true,
            case: String::new(),
            failed_items: BTreeMap::new(),
        }
    }

    /// A failing outcome with a short classification of the failure.
    pub fn fail(case: impl Into<String>) -> Self {
        Self {
            valid: false,
            case: case.into(),
            failed_items: BTreeMap::new(),
        }
    }

    /// Attaches a structured detail to a failing outcome.
    ///
    /// Details are ignored on passing outcomes.
    pub fn with_item(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        if !self.valid {
            self.failed_items.insert(key.into(), value.into());
        }
        self
    }

    /// Whether the input was valid.
    pub fn is_valid(&self) -> bool {
        self.valid
    }

    /// Short failure classification; empty when valid.
    pub fn case(&self) -> &str {
        &self.case
    }

    /// Structured failure details; empty when valid.
    pub fn failed_items(&self) -> &BTreeMap<String, Value> {
        &self.failed_items
    }

    /// Looks up a single failure detail.
    pub fn failed_item(&self, key: &str) -> Option<&Value> {
        self.failed_items.get(key)
    }
}

/// A unit of validation work.
///
/// Implement the methods matching the input types declared in the
/// descriptor; the defaults fail with [`PhenotypesError::NotSupported`].
///
/// # Example
///
/// ```rust
/// use phenotypes_core::{
///     InputType, Result, RowValidationOutcome, ValidationContext, Validator, ValidatorDescriptor,
/// };
///
/// struct NonEmptyGenus(ValidatorDescriptor);
///
/// impl Validator for NonEmptyGenus {
///     fn descriptor(&self) -> &ValidatorDescriptor {
///         &self.0
///     }
///
///     fn validate_metadata(&self, context: &ValidationContext) -> Result<RowValidationOutcome> {
///         if context.genus.trim().is_empty() {
///             return Ok(RowValidationOutcome::fail("Genus is empty"));
///         }
///         Ok(RowValidationOutcome::pass())
///     }
/// }
///
/// let mut validator = NonEmptyGenus(ValidatorDescriptor::new(
///     "genus_set",
///     "Genus is set",
///     [InputType::Metadata],
/// ));
/// let context = ValidationContext::new("Lens", "traits.tsv");
/// assert!(validator.validate_metadata(&context).unwrap().is_valid());
/// assert!(validator.validate_row(&[]).is_err());
/// ```
pub trait Validator: Send {
    /// Identity and supported input types.
    fn descriptor(&self) -> &ValidatorDescriptor;

    /// Checks static, non-file inputs.
    fn validate_metadata(&self, _context: &ValidationContext) -> Result<RowValidationOutcome> {
        Err(PhenotypesError::not_supported(
            &self.descriptor().id,
            "validate_metadata",
        ))
    }

    /// Checks the file object without reading its contents.
    fn validate_file(&self, _file_id: &FileId) -> Result<RowValidationOutcome> {
        Err(PhenotypesError::not_supported(
            &self.descriptor().id,
            "validate_file",
        ))
    }

    /// Checks one split row, header or data.
    ///
    /// Takes `&mut self` so validators can track state across the rows of a
    /// single run.
    fn validate_row(&mut self, _columns: &[String]) -> Result<RowValidationOutcome> {
        Err(PhenotypesError::not_supported(
            &self.descriptor().id,
            "validate_row",
        ))
    }
}
