//! Interfaces of the external collaborators.
//!
//! The pipeline never talks to storage directly. File contents come through a
//! [`FileReader`] and every vocabulary lookup or write goes through a
//! [`TermResolver`]. Both are shared behind `Arc<dyn ...>` and take `&self`;
//! implementations handle their own synchronization.

use crate::Result;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::io::BufRead;

/// Opaque handle of an uploaded file.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FileId(String);

impl FileId {
    /// Wraps a handle.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The raw handle.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for FileId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for FileId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Identifier of a controlled-vocabulary term.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TermId(pub u64);

impl fmt::Display for TermId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Vocabularies configured for one genus.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenusVocabulary {
    /// Vocabulary holding trait terms
    pub trait_cv: String,
    /// Vocabulary holding method terms
    pub method_cv: String,
    /// Vocabulary holding unit terms
    pub unit_cv: String,
    /// Database accessions are minted in
    pub db: String,
    /// Crop ontology the traits may be cross-referenced to
    #[serde(default)]
    pub crop_ontology: Option<String>,
}

/// Read access to uploaded files.
pub trait FileReader: Send + Sync {
    /// Opens the file for forward-only reading.
    fn open(&self, file_id: &FileId) -> Result<Box<dyn BufRead + '_>>;

    /// Mime type of the file, or `None` if the handle does not resolve.
    fn mime_type(&self, file_id: &FileId) -> Result<Option<String>>;

    /// Size in bytes, or `None` if the handle does not resolve.
    fn size(&self, file_id: &FileId) -> Result<Option<u64>>;
}

/// Lookups and writes against the controlled-vocabulary store.
///
/// Writes issued between [`begin`](TermResolver::begin) and
/// [`commit`](TermResolver::commit) must disappear on
/// [`rollback`](TermResolver::rollback).
pub trait TermResolver: Send + Sync {
    /// Whether the genus is known to the store.
    fn genus_exists(&self, genus: &str) -> Result<bool>;

    /// Genus configured for a project, if the project exists.
    fn project_genus(&self, project_id: u64) -> Result<Option<String>>;

    /// Vocabulary configuration of a genus.
    fn resolve_genus_vocabulary_config(&self, genus: &str) -> Result<Option<GenusVocabulary>>;

    /// Looks up a term by name within a vocabulary.
    fn resolve_term_id(&self, name: &str, vocabulary: &str) -> Result<Option<TermId>>;

    /// Creates a term in a vocabulary.
    fn create_term(&self, name: &str, vocabulary: &str) -> Result<TermId>;

    /// Whether `subject --relation--> object` is recorded.
    fn relationship_exists(&self, subject: TermId, relation: &str, object: TermId)
    -> Result<bool>;

    /// Records `subject --relation--> object`; recording it twice is a no-op.
    fn insert_relationship(&self, subject: TermId, relation: &str, object: TermId) -> Result<()>;

    /// Sets a property on a term, replacing any previous value.
    fn set_term_property(&self, term: TermId, property: &str, value: &str) -> Result<()>;

    /// Starts a transaction.
    fn begin(&self) -> Result<()>;

    /// Makes every write since [`begin`](TermResolver::begin) permanent.
    fn commit(&self) -> Result<()>;

    /// Discards every write since [`begin`](TermResolver::begin).
    fn rollback(&self) -> Result<()>;
}
