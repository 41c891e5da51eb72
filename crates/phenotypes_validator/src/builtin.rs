//! The validators of a traits import, wired together.

use crate::{
    DatabaseDuplicates, DuplicateTraitsValidator, EmptyCellValidator, FileValidator,
    GenusExistsValidator, HeadersValidator, ValidatorRegistry, ValueInListValidator,
};
use phenotypes_core::{
    DataType, FileReader, ImporterConfig, InputType, PhenotypesError, Result, TermResolver,
    ValidationContext, ValidatorDescriptor, columns,
};
use std::sync::Arc;

/// Well-known validator ids, which are also the report keys.
pub mod keys {
    /// Genus exists and matches the project
    pub const GENUS: &str = "GENUS";
    /// File exists with an accepted mime type
    pub const FILE: &str = "FILE";
    /// Header row matches the expected headers
    pub const HEADERS: &str = "HEADERS";
    /// Required cells are filled
    pub const EMPTY_CELL: &str = "empty_cell";
    /// Type column holds an accepted value
    pub const VALID_DATA_TYPE: &str = "valid_data_type";
    /// Trait-method-unit combinations are unique
    pub const DUPLICATE_TRAITS: &str = "duplicate_traits";

    /// Every key, in report order.
    pub const ALL: [&str; 6] = [
        GENUS,
        FILE,
        HEADERS,
        EMPTY_CELL,
        VALID_DATA_TYPE,
        DUPLICATE_TRAITS,
    ];
}

/// Mime types a traits file may be uploaded as.
pub const ACCEPTED_MIME_TYPES: [&str; 3] =
    ["text/tab-separated-values", "text/plain", "text/csv"];

/// Services the built-in validators are constructed with.
#[derive(Clone)]
pub struct Collaborators {
    pub file_reader: Arc<dyn FileReader>,
    pub resolver: Arc<dyn TermResolver>,
}

impl Collaborators {
    pub fn new(file_reader: Arc<dyn FileReader>, resolver: Arc<dyn TermResolver>) -> Self {
        Self {
            file_reader,
            resolver,
        }
    }
}

fn missing_index(name: &str) -> PhenotypesError {
    PhenotypesError::Configuration(format!("no column index for '{name}'"))
}

fn index(context: &ValidationContext, name: &str) -> Result<usize> {
    context.column_index(name).ok_or_else(|| missing_index(name))
}

fn indices(context: &ValidationContext, names: &[&'static str]) -> Result<Vec<usize>> {
    context
        .column_indices(names.iter().copied())
        .map_err(missing_index)
}

/// Registers the six traits validators in report order.
///
/// # Example
///
/// ```rust
/// use phenotypes_core::{ImporterConfig, InputType};
/// use phenotypes_validator::{Collaborators, keys, traits_registry};
/// # use phenotypes_core::{FileId, FileReader, GenusVocabulary, Result, TermId, TermResolver};
/// # use std::io::BufRead;
/// # use std::sync::Arc;
/// # struct Nothing;
/// # impl FileReader for Nothing {
/// #     fn open(&self, _: &FileId) -> Result<Box<dyn BufRead + '_>> { Ok(Box::new(std::io::empty())) }
/// #     fn mime_type(&self, _: &FileId) -> Result<Option<String>> { Ok(None) }
/// #     fn size(&self, _: &FileId) -> Result<Option<u64>> { Ok(None) }
/// # }
/// # impl TermResolver for Nothing {
/// #     fn genus_exists(&self, _: &str) -> Result<bool> { Ok(false) }
/// #     fn project_genus(&self, _: u64) -> Result<Option<String>> { Ok(None) }
/// #     fn resolve_genus_vocabulary_config(&self, _: &str) -> Result<Option<GenusVocabulary>> { Ok(None) }
/// #     fn resolve_term_id(&self, _: &str, _: &str) -> Result<Option<TermId>> { Ok(None) }
/// #     fn create_term(&self, _: &str, _: &str) -> Result<TermId> { Ok(TermId(1)) }
/// #     fn relationship_exists(&self, _: TermId, _: &str, _: TermId) -> Result<bool> { Ok(false) }
/// #     fn insert_relationship(&self, _: TermId, _: &str, _: TermId) -> Result<()> { Ok(()) }
/// #     fn set_term_property(&self, _: TermId, _: &str, _: &str) -> Result<()> { Ok(()) }
/// #     fn begin(&self) -> Result<()> { Ok(()) }
/// #     fn commit(&self) -> Result<()> { Ok(()) }
/// #     fn rollback(&self) -> Result<()> { Ok(()) }
/// # }
/// let collaborators = Collaborators::new(Arc::new(Nothing), Arc::new(Nothing));
/// let registry = traits_registry(&collaborators, &ImporterConfig::default()).unwrap();
///
/// let data_row: Vec<&str> = registry
///     .resolve(InputType::DataRow)
///     .iter()
///     .map(|descriptor| descriptor.id.as_str())
///     .collect();
/// assert_eq!(data_row, [keys::EMPTY_CELL, keys::VALID_DATA_TYPE, keys::DUPLICATE_TRAITS]);
/// ```
pub fn traits_registry(
    collaborators: &Collaborators,
    config: &ImporterConfig,
) -> Result<ValidatorRegistry> {
    let mut registry = ValidatorRegistry::new();

    let resolver = Arc::clone(&collaborators.resolver);
    registry.register(
        ValidatorDescriptor::new(keys::GENUS, "Genus exists", [InputType::Metadata]),
        move |descriptor, _context| {
            Ok(Box::new(GenusExistsValidator::new(
                descriptor.clone(),
                Arc::clone(&resolver),
            )))
        },
    )?;

    let file_reader = Arc::clone(&collaborators.file_reader);
    registry.register(
        ValidatorDescriptor::new(keys::FILE, "Valid traits file", [InputType::File]),
        move |descriptor, _context| {
            Ok(Box::new(FileValidator::new(
                descriptor.clone(),
                Arc::clone(&file_reader),
                ACCEPTED_MIME_TYPES,
            )))
        },
    )?;

    registry.register(
        ValidatorDescriptor::new(keys::HEADERS, "Expected headers", [InputType::HeaderRow]),
        |descriptor, context| {
            Ok(Box::new(HeadersValidator::new(
                descriptor.clone(),
                context.expected_headers.clone(),
            )))
        },
    )?;

    registry.register(
        ValidatorDescriptor::new(keys::EMPTY_CELL, "Required cells", [InputType::DataRow]),
        |descriptor, context| {
            Ok(Box::new(EmptyCellValidator::new(
                descriptor.clone(),
                indices(context, &columns::ALL)?,
            )))
        },
    )?;

    registry.register(
        ValidatorDescriptor::new(keys::VALID_DATA_TYPE, "Data type values", [InputType::DataRow]),
        |descriptor, context| {
            Ok(Box::new(ValueInListValidator::new(
                descriptor.clone(),
                indices(context, &[columns::TYPE])?,
                DataType::NAMES,
            )))
        },
    )?;

    let resolver = Arc::clone(&collaborators.resolver);
    let duplicate_case = config.duplicate_case;
    let database_check = config
        .check_database_duplicates
        .then(|| config.relations.clone());
    registry.register(
        ValidatorDescriptor::new(
            keys::DUPLICATE_TRAITS,
            "Unique trait-method-unit",
            [InputType::DataRow],
        ),
        move |descriptor, context| {
            let combo = [
                index(context, columns::TRAIT_NAME)?,
                index(context, columns::METHOD_SHORT_NAME)?,
                index(context, columns::UNIT)?,
            ];
            let mut validator = DuplicateTraitsValidator::new(descriptor.clone(), combo)
                .with_case_rule(duplicate_case);
            if let Some(relations) = &database_check {
                validator = validator.with_database(DatabaseDuplicates::for_genus(
                    Arc::clone(&resolver),
                    &context.genus,
                    relations.clone(),
                )?);
            }
            Ok(Box::new(validator))
        },
    )?;

    Ok(registry)
}
