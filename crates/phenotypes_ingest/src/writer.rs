//! Trait ingestion writer.
//!
//! Turns validated [`TraitRecord`]s into controlled-vocabulary terms. For each
//! record the writer:
//!
//! 1. Resolves the vocabularies configured for the genus
//! 2. Looks up (or, when allowed, creates) the trait, method and unit terms
//! 3. Links the method to the trait and the unit to the method
//! 4. Records the data type on the unit
//!
//! Every step runs inside a store transaction and nothing is left behind when
//! one of them fails.

use phenotypes_core::{
    GenusVocabulary, ImporterConfig, PhenotypesError, RelationNames, Result, TermId, TermKind,
    TermResolver, TraitRecord,
};
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Property holding the free text description of created traits and methods.
pub const DEFINITION_PROPERTY: &str = "definition";

/// Term ids of one ingested trait.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TraitIds {
    #[serde(rename = "trait")]
    pub trait_id: TermId,
    #[serde(rename = "method")]
    pub method_id: TermId,
    #[serde(rename = "unit")]
    pub unit_id: TermId,
}

/// Writes trait records through a [`TermResolver`].
///
/// Holds a read-through cache of term ids for the lifetime of the writer.
/// Terms created by the writer enter the cache immediately, and the cache is
/// cleared whenever a transaction is rolled back.
pub struct TraitWriter {
    resolver: Arc<dyn TermResolver>,
    allow_new_terms: bool,
    relations: RelationNames,
    cache: HashMap<(String, String), TermId>,
    in_transaction: bool,
}

impl TraitWriter {
    /// Creates a writer using the term policy and relation names of a config.
    pub fn new(resolver: Arc<dyn TermResolver>, config: &ImporterConfig) -> Self {
        Self {
            resolver,
            allow_new_terms: config.allow_new_terms,
            relations: config.relations.clone(),
            cache: HashMap::new(),
            in_transaction: false,
        }
    }

    /// Number of cached term ids.
    pub fn cached_terms(&self) -> usize {
        self.cache.len()
    }

    /// Inserts one trait, its method and unit atomically.
    ///
    /// Inserting the same names twice returns the same ids and keeps a
    /// single copy of each link.
    pub fn insert_trait(&mut self, record: &TraitRecord, genus: &str) -> Result<TraitIds> {
        self.atomically(|writer| writer.write(record, genus))
    }

    /// Inserts every record inside a single transaction.
    ///
    /// Any failing record rolls back all of them.
    pub fn import_rows(&mut self, records: &[TraitRecord], genus: &str) -> Result<Vec<TraitIds>> {
        let ids = self.atomically(|writer| {
            records
                .iter()
                .map(|record| writer.write(record, genus))
                .collect::<Result<Vec<_>>>()
        })?;
        info!("Imported {} traits for genus '{}'", ids.len(), genus);
        Ok(ids)
    }

    fn atomically<T>(&mut self, work: impl FnOnce(&mut Self) -> Result<T>) -> Result<T> {
        if self.in_transaction {
            return work(self);
        }

        self.resolver.begin()?;
        self.in_transaction = true;
        let result = work(self);
        self.in_transaction = false;

        match result {
            Ok(value) => {
                self.resolver.commit()?;
                Ok(value)
            }
            Err(err) => {
                warn!("Rolling back trait import: {}", err);
                self.cache.clear();
                if let Err(rollback_err) = self.resolver.rollback() {
                    warn!("Rollback failed: {}", rollback_err);
                }
                Err(err)
            }
        }
    }

    fn write(&mut self, record: &TraitRecord, genus: &str) -> Result<TraitIds> {
        let vocabulary = self.vocabulary(genus)?;

        let trait_id = self.term(
            TermKind::Trait,
            &record.name,
            &vocabulary.trait_cv,
            Some(&record.description),
        )?;
        let method_id = self.term(
            TermKind::Method,
            &record.method_short_name,
            &vocabulary.method_cv,
            Some(&record.collection_method_description),
        )?;
        let unit_id = self.term(TermKind::Unit, &record.unit_name, &vocabulary.unit_cv, None)?;

        self.resolver
            .insert_relationship(method_id, &self.relations.method_to_trait, trait_id)?;
        self.resolver
            .insert_relationship(unit_id, &self.relations.unit_to_method, method_id)?;
        self.resolver.set_term_property(
            unit_id,
            &self.relations.unit_data_type,
            record.data_type.as_str(),
        )?;

        debug!(
            "Wrote trait '{}' ({}), method '{}' ({}), unit '{}' ({})",
            record.name, trait_id, record.method_short_name, method_id, record.unit_name, unit_id
        );
        Ok(TraitIds {
            trait_id,
            method_id,
            unit_id,
        })
    }

    fn vocabulary(&self, genus: &str) -> Result<GenusVocabulary> {
        self.resolver
            .resolve_genus_vocabulary_config(genus)?
            .ok_or_else(|| PhenotypesError::GenusNotConfigured(genus.to_string()))
    }

    fn term(
        &mut self,
        kind: TermKind,
        name: &str,
        vocabulary: &str,
        definition: Option<&str>,
    ) -> Result<TermId> {
        let key = (vocabulary.to_string(), name.to_string());
        if let Some(id) = self.cache.get(&key) {
            return Ok(*id);
        }

        let id = match self.resolver.resolve_term_id(name, vocabulary)? {
            Some(id) => id,
            None if self.allow_new_terms => {
                let id = self.resolver.create_term(name, vocabulary)?;
                if let Some(definition) = definition.filter(|text| !text.is_empty()) {
                    self.resolver
                        .set_term_property(id, DEFINITION_PROPERTY, definition)?;
                }
                debug!("Created {} '{}' in {}", kind, name, vocabulary);
                id
            }
            None => return Err(PhenotypesError::term_not_found(kind, name, vocabulary)),
        };

        self.cache.insert(key, id);
        Ok(id)
    }
}
