//! In-memory controlled-vocabulary store.

use phenotypes_core::{
    GenusVocabulary, PhenotypesError, Result, StoreConfig, TermId, TermResolver,
};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use std::sync::{Mutex, MutexGuard};
use tracing::debug;

#[derive(Debug, Clone, Default)]
struct StoreState {
    genera: BTreeMap<String, GenusVocabulary>,
    projects: BTreeMap<u64, String>,
    terms: BTreeMap<(String, String), TermId>,
    relationships: BTreeSet<(TermId, String, TermId)>,
    properties: BTreeMap<(TermId, String), String>,
    next_id: u64,
}

#[derive(Debug, Default)]
struct Inner {
    state: StoreState,
    snapshot: Option<StoreState>,
}

/// Counts of what a store holds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StoreStats {
    pub genera: usize,
    pub projects: usize,
    pub terms: usize,
    pub relationships: usize,
    pub properties: usize,
}

/// A [`TermResolver`] keeping everything in memory.
///
/// Transactions snapshot the whole store on [`begin`](TermResolver::begin)
/// and restore the snapshot on [`rollback`](TermResolver::rollback). Only one
/// transaction can be open at a time.
///
/// # Example
///
/// ```rust
/// use phenotypes_core::{StoreConfig, TermResolver};
/// use phenotypes_ingest::InMemoryTermStore;
///
/// let store = InMemoryTermStore::from_config(&StoreConfig::default());
/// store.begin().unwrap();
/// let id = store.create_term("Plant Height", "lens_traits").unwrap();
/// store.rollback().unwrap();
///
/// assert_eq!(store.resolve_term_id("Plant Height", "lens_traits").unwrap(), None);
/// assert_eq!(store.term_name(id).unwrap(), None);
/// ```
#[derive(Debug, Default)]
pub struct InMemoryTermStore {
    inner: Mutex<Inner>,
}

impl InMemoryTermStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store seeded with configured genera, projects and terms.
    ///
    /// Seeded terms get ids from 1 upwards, in configuration order.
    pub fn from_config(config: &StoreConfig) -> Self {
        let mut state = StoreState {
            genera: config.genera.clone(),
            projects: config
                .projects
                .iter()
                .map(|project| (project.id, project.genus.clone()))
                .collect(),
            ..Default::default()
        };
        for term in &config.terms {
            state.insert_term(&term.name, &term.vocabulary);
        }

        Self {
            inner: Mutex::new(Inner {
                state,
                snapshot: None,
            }),
        }
    }

    /// Counts of genera, projects, terms, relationships and properties.
    pub fn stats(&self) -> Result<StoreStats> {
        let inner = self.lock()?;
        let state = &inner.state;
        Ok(StoreStats {
            genera: state.genera.len(),
            projects: state.projects.len(),
            terms: state.terms.len(),
            relationships: state.relationships.len(),
            properties: state.properties.len(),
        })
    }

    /// Name of a term, if it exists.
    pub fn term_name(&self, term: TermId) -> Result<Option<String>> {
        let inner = self.lock()?;
        Ok(inner
            .state
            .terms
            .iter()
            .find(|(_, id)| **id == term)
            .map(|((_, name), _)| name.clone()))
    }

    /// Value of a term property, if set.
    pub fn term_property(&self, term: TermId, property: &str) -> Result<Option<String>> {
        let inner = self.lock()?;
        Ok(inner
            .state
            .properties
            .get(&(term, property.to_string()))
            .cloned())
    }

    /// Whether a transaction is open.
    pub fn in_transaction(&self) -> Result<bool> {
        Ok(self.lock()?.snapshot.is_some())
    }

    fn lock(&self) -> Result<MutexGuard<'_, Inner>> {
        self.inner
            .lock()
            .map_err(|_| PhenotypesError::store("term store lock poisoned"))
    }
}

impl StoreState {
    fn insert_term(&mut self, name: &str, vocabulary: &str) -> TermId {
        let key = (vocabulary.to_string(), name.to_string());
        if let Some(id) = self.terms.get(&key) {
            return *id;
        }
        self.next_id += 1;
        let id = TermId(self.next_id);
        self.terms.insert(key, id);
        id
    }

    fn has_term(&self, term: TermId) -> bool {
        self.terms.values().any(|id| *id == term)
    }
}

impl TermResolver for InMemoryTermStore {
    fn genus_exists(&self, genus: &str) -> Result<bool> {
        Ok(self.lock()?.state.genera.contains_key(genus))
    }

    fn project_genus(&self, project_id: u64) -> Result<Option<String>> {
        Ok(self.lock()?.state.projects.get(&project_id).cloned())
    }

    fn resolve_genus_vocabulary_config(&self, genus: &str) -> Result<Option<GenusVocabulary>> {
        Ok(self.lock()?.state.genera.get(genus).cloned())
    }

    fn resolve_term_id(&self, name: &str, vocabulary: &str) -> Result<Option<TermId>> {
        let inner = self.lock()?;
        Ok(inner
            .state
            .terms
            .get(&(vocabulary.to_string(), name.to_string()))
            .copied())
    }

    fn create_term(&self, name: &str, vocabulary: &str) -> Result<TermId> {
        if name.trim().is_empty() {
            return Err(PhenotypesError::store(format!(
                "cannot create a term without a name in '{vocabulary}'"
            )));
        }
        let id = self.lock()?.state.insert_term(name, vocabulary);
        debug!("Created term {} '{}' in {}", id, name, vocabulary);
        Ok(id)
    }

    fn relationship_exists(
        &self,
        subject: TermId,
        relation: &str,
        object: TermId,
    ) -> Result<bool> {
        let inner = self.lock()?;
        Ok(inner
            .state
            .relationships
            .contains(&(subject, relation.to_string(), object)))
    }

    fn insert_relationship(&self, subject: TermId, relation: &str, object: TermId) -> Result<()> {
        let mut inner = self.lock()?;
        for term in [subject, object] {
            if !inner.state.has_term(term) {
                return Err(PhenotypesError::store(format!("term {term} does not exist")));
            }
        }
        inner
            .state
            .relationships
            .insert((subject, relation.to_string(), object));
        Ok(())
    }

    fn set_term_property(&self, term: TermId, property: &str, value: &str) -> Result<()> {
        let mut inner = self.lock()?;
        if !inner.state.has_term(term) {
            return Err(PhenotypesError::store(format!("term {term} does not exist")));
        }
        inner
            .state
            .properties
            .insert((term, property.to_string()), value.to_string());
        Ok(())
    }

    fn begin(&self) -> Result<()> {
        let mut inner = self.lock()?;
        if inner.snapshot.is_some() {
            return Err(PhenotypesError::store("a transaction is already open"));
        }
        inner.snapshot = Some(inner.state.clone());
        Ok(())
    }

    fn commit(&self) -> Result<()> {
        let mut inner = self.lock()?;
        inner
            .snapshot
            .take()
            .ok_or_else(|| PhenotypesError::store("no transaction to commit"))?;
        Ok(())
    }

    fn rollback(&self) -> Result<()> {
        let mut inner = self.lock()?;
        let snapshot = inner
            .snapshot
            .take()
            .ok_or_else(|| PhenotypesError::store("no transaction to roll back"))?;
        inner.state = snapshot;
        debug!("Rolled back term store transaction");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use phenotypes_core::{ProjectConfig, TermConfig};
    use pretty_assertions::assert_eq;

    fn config() -> StoreConfig {
        let mut config = StoreConfig::default();
        config.genera.insert(
            "Lens".to_string(),
            GenusVocabulary {
                trait_cv: "lens_traits".to_string(),
                method_cv: "lens_method".to_string(),
                unit_cv: "lens_unit".to_string(),
                db: "LENS".to_string(),
                crop_ontology: None,
            },
        );
        config.projects.push(ProjectConfig {
            id: 4,
            genus: "Lens".to_string(),
        });
        config.terms.push(TermConfig {
            vocabulary: "lens_traits".to_string(),
            name: "Plant Height".to_string(),
        });
        config
    }

    #[test]
    fn test_seeded_from_config() {
        let store = InMemoryTermStore::from_config(&config());
        assert!(store.genus_exists("Lens").unwrap());
        assert!(!store.genus_exists("lens").unwrap());
        assert_eq!(store.project_genus(4).unwrap(), Some("Lens".to_string()));
        assert_eq!(
            store.resolve_term_id("Plant Height", "lens_traits").unwrap(),
            Some(TermId(1))
        );
        assert_eq!(
            store.stats().unwrap(),
            StoreStats {
                genera: 1,
                projects: 1,
                terms: 1,
                ..Default::default()
            }
        );
    }

    #[test]
    fn test_create_term_is_idempotent() {
        let store = InMemoryTermStore::from_config(&config());
        let first = store.create_term("Ruler", "lens_method").unwrap();
        let second = store.create_term("Ruler", "lens_method").unwrap();
        assert_eq!(first, second);
        assert_eq!(store.term_name(first).unwrap(), Some("Ruler".to_string()));
    }

    #[test]
    fn test_relationships_are_idempotent() {
        let store = InMemoryTermStore::from_config(&config());
        let method = store.create_term("Ruler", "lens_method").unwrap();
        store.insert_relationship(method, "method_of", TermId(1)).unwrap();
        store.insert_relationship(method, "method_of", TermId(1)).unwrap();

        assert!(store.relationship_exists(method, "method_of", TermId(1)).unwrap());
        assert_eq!(store.stats().unwrap().relationships, 1);
    }

    #[test]
    fn test_unknown_terms_rejected() {
        let store = InMemoryTermStore::from_config(&config());
        assert!(store.insert_relationship(TermId(1), "method_of", TermId(99)).is_err());
        assert!(store.set_term_property(TermId(99), "additionalType", "Quantitative").is_err());
    }

    #[test]
    fn test_commit_keeps_writes() {
        let store = InMemoryTermStore::from_config(&config());
        store.begin().unwrap();
        let unit = store.create_term("cm", "lens_unit").unwrap();
        store.set_term_property(unit, "additionalType", "Quantitative").unwrap();
        store.commit().unwrap();

        assert!(!store.in_transaction().unwrap());
        assert_eq!(
            store.term_property(unit, "additionalType").unwrap(),
            Some("Quantitative".to_string())
        );
    }

    #[test]
    fn test_rollback_restores_snapshot() {
        let store = InMemoryTermStore::from_config(&config());
        let before = store.stats().unwrap();

        store.begin().unwrap();
        store.create_term("cm", "lens_unit").unwrap();
        store.rollback().unwrap();

        assert_eq!(store.stats().unwrap(), before);
    }

    #[test]
    fn test_transaction_misuse() {
        let store = InMemoryTermStore::new();
        assert!(store.commit().is_err());
        assert!(store.rollback().is_err());

        store.begin().unwrap();
        assert!(store.begin().is_err());
    }
}
