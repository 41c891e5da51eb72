//! Duplicate trait-method-unit check.

use phenotypes_core::{
    CaseRule, GenusVocabulary, PhenotypesError, RelationNames, Result, RowValidationOutcome,
    TermResolver, Validator, ValidatorDescriptor,
};
use serde_json::json;
use std::collections::HashSet;
use std::sync::Arc;

/// Store-side half of the duplicate check.
///
/// A combination is a database duplicate when its trait, method and unit all
/// exist in the genus vocabularies and are already linked together.
pub struct DatabaseDuplicates {
    resolver: Arc<dyn TermResolver>,
    vocabulary: GenusVocabulary,
    relations: RelationNames,
}

impl DatabaseDuplicates {
    /// Binds the check to the vocabularies of a genus.
    ///
    /// Fails with [`PhenotypesError::GenusNotConfigured`] when the genus has
    /// no vocabulary configuration.
    pub fn for_genus(
        resolver: Arc<dyn TermResolver>,
        genus: &str,
        relations: RelationNames,
    ) -> Result<Self> {
        let vocabulary = resolver
            .resolve_genus_vocabulary_config(genus)?
            .ok_or_else(|| PhenotypesError::GenusNotConfigured(genus.to_string()))?;
        Ok(Self {
            resolver,
            vocabulary,
            relations,
        })
    }

    fn exists(&self, trait_name: &str, method: &str, unit: &str) -> Result<bool> {
        let resolver = &self.resolver;
        let Some(trait_id) = resolver.resolve_term_id(trait_name, &self.vocabulary.trait_cv)? else {
            return Ok(false);
        };
        let Some(method_id) = resolver.resolve_term_id(method, &self.vocabulary.method_cv)? else {
            return Ok(false);
        };
        let Some(unit_id) = resolver.resolve_term_id(unit, &self.vocabulary.unit_cv)? else {
            return Ok(false);
        };

        Ok(resolver.relationship_exists(method_id, &self.relations.method_to_trait, trait_id)?
            && resolver.relationship_exists(unit_id, &self.relations.unit_to_method, method_id)?)
    }
}

/// Fails a row whose trait, method and unit were already seen in this run,
/// or optionally already exist in the store.
///
/// State lives for one run: a fresh instance is created by the registry for
/// every pipeline run.
pub struct DuplicateTraitsValidator {
    descriptor: ValidatorDescriptor,
    trait_index: usize,
    method_index: usize,
    unit_index: usize,
    case_rule: CaseRule,
    seen: HashSet<(String, String, String)>,
    database: Option<DatabaseDuplicates>,
}

impl DuplicateTraitsValidator {
    /// Creates a validator reading the trait, method and unit from the given
    /// columns.
    pub fn new(descriptor: ValidatorDescriptor, indices: [usize; 3]) -> Self {
        let [trait_index, method_index, unit_index] = indices;
        Self {
            descriptor,
            trait_index,
            method_index,
            unit_index,
            case_rule: CaseRule::default(),
            seen: HashSet::new(),
            database: None,
        }
    }

    /// Sets how names are compared.
    pub fn with_case_rule(mut self, case_rule: CaseRule) -> Self {
        self.case_rule = case_rule;
        self
    }

    /// Also reports combinations that already exist in the store.
    pub fn with_database(mut self, database: DatabaseDuplicates) -> Self {
        self.database = Some(database);
        self
    }

    fn cell<'a>(columns: &'a [String], index: usize) -> &'a str {
        columns.get(index).map(|value| value.trim()).unwrap_or_default()
    }
}

impl Validator for DuplicateTraitsValidator {
    fn descriptor(&self) -> &ValidatorDescriptor {
        &self.descriptor
    }

    fn validate_row(&mut self, columns: &[String]) -> Result<RowValidationOutcome> {
        let trait_name = Self::cell(columns, self.trait_index);
        let method = Self::cell(columns, self.method_index);
        let unit = Self::cell(columns, self.unit_index);

        let combo = json!({
            "trait": trait_name,
            "method": method,
            "unit": unit,
        });

        let key = (
            self.case_rule.normalize(trait_name),
            self.case_rule.normalize(method),
            self.case_rule.normalize(unit),
        );

        if !self.seen.insert(key) {
            return Ok(
                RowValidationOutcome::fail("A duplicate trait was found within the input file")
                    .with_item("combo_provided", combo),
            );
        }

        if let Some(database) = &self.database
            && database.exists(trait_name, method, unit)?
        {
            return Ok(
                RowValidationOutcome::fail("A duplicate trait was found in the database")
                    .with_item("combo_provided", combo),
            );
        }

        Ok(RowValidationOutcome::pass())
    }
}
