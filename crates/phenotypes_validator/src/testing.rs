//! Read-only collaborator stubs for unit tests.

use phenotypes_core::{
    FileId, FileReader, GenusVocabulary, PhenotypesError, Result, TermId, TermResolver,
};
use std::collections::{HashMap, HashSet};
use std::io::{BufRead, Cursor};

#[derive(Default)]
pub struct StubResolver {
    genera: HashMap<String, GenusVocabulary>,
    projects: HashMap<u64, String>,
    terms: HashMap<(String, String), TermId>,
    relationships: HashSet<(TermId, String, TermId)>,
}

impl StubResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_genus(mut self, genus: &str) -> Self {
        let prefix = genus.to_lowercase();
        self.genera.insert(
            genus.to_string(),
            GenusVocabulary {
                trait_cv: format!("{prefix}_traits"),
                method_cv: format!("{prefix}_method"),
                unit_cv: format!("{prefix}_unit"),
                db: genus.to_uppercase(),
                crop_ontology: None,
            },
        );
        self
    }

    pub fn with_project(mut self, id: u64, genus: &str) -> Self {
        self.projects.insert(id, genus.to_string());
        self
    }

    pub fn with_term(mut self, vocabulary: &str, name: &str, id: u64) -> Self {
        self.terms
            .insert((vocabulary.to_string(), name.to_string()), TermId(id));
        self
    }

    pub fn with_relationship(mut self, subject: u64, relation: &str, object: u64) -> Self {
        self.relationships
            .insert((TermId(subject), relation.to_string(), TermId(object)));
        self
    }
}

impl TermResolver for StubResolver {
    fn genus_exists(&self, genus: &str) -> Result<bool> {
        Ok(self.genera.contains_key(genus))
    }

    fn project_genus(&self, project_id: u64) -> Result<Option<String>> {
        Ok(self.projects.get(&project_id).cloned())
    }

    fn resolve_genus_vocabulary_config(&self, genus: &str) -> Result<Option<GenusVocabulary>> {
        Ok(self.genera.get(genus).cloned())
    }

    fn resolve_term_id(&self, name: &str, vocabulary: &str) -> Result<Option<TermId>> {
        Ok(self
            .terms
            .get(&(vocabulary.to_string(), name.to_string()))
            .copied())
    }

    fn create_term(&self, _name: &str, _vocabulary: &str) -> Result<TermId> {
        Err(PhenotypesError::store("stub resolver is read-only"))
    }

    fn relationship_exists(
        &self,
        subject: TermId,
        relation: &str,
        object: TermId,
    ) -> Result<bool> {
        Ok(self
            .relationships
            .contains(&(subject, relation.to_string(), object)))
    }

    fn insert_relationship(&self, _subject: TermId, _relation: &str, _object: TermId) -> Result<()> {
        Err(PhenotypesError::store("stub resolver is read-only"))
    }

    fn set_term_property(&self, _term: TermId, _property: &str, _value: &str) -> Result<()> {
        Err(PhenotypesError::store("stub resolver is read-only"))
    }

    fn begin(&self) -> Result<()> {
        Ok(())
    }

    fn commit(&self) -> Result<()> {
        Ok(())
    }

    fn rollback(&self) -> Result<()> {
        Ok(())
    }
}

#[derive(Default)]
pub struct StubFileReader {
    files: HashMap<FileId, (String, String)>,
}

impl StubFileReader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_file(mut self, id: &str, mime_type: &str, contents: &str) -> Self {
        self.files.insert(
            FileId::new(id),
            (mime_type.to_string(), contents.to_string()),
        );
        self
    }
}

impl FileReader for StubFileReader {
    fn open(&self, file_id: &FileId) -> Result<Box<dyn BufRead + '_>> {
        let (_, contents) = self.files.get(file_id).ok_or_else(|| {
            PhenotypesError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                file_id.to_string(),
            ))
        })?;
        Ok(Box::new(Cursor::new(contents.as_bytes())))
    }

    fn mime_type(&self, file_id: &FileId) -> Result<Option<String>> {
        Ok(self.files.get(file_id).map(|(mime, _)| mime.clone()))
    }

    fn size(&self, file_id: &FileId) -> Result<Option<u64>> {
        Ok(self
            .files
            .get(file_id)
            .map(|(_, contents)| contents.len() as u64))
    }
}
