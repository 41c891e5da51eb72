//! Per-run validation context.

use crate::FileId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Configuration consumed by validators during one run.
///
/// Built once per run and only read afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationContext {
    /// Genus the uploaded traits belong to
    pub genus: String,

    /// Project the upload is attached to; `None` or `Some(0)` disables the
    /// project-genus check
    pub project_id: Option<u64>,

    /// Handle of the uploaded file
    pub file_id: FileId,

    /// Column headers the file must start with, in order
    pub expected_headers: Vec<String>,

    /// Logical header name to zero-based column index
    pub column_index_map: BTreeMap<String, usize>,
}

impl ValidationContext {
    /// Creates a context for a genus and file.
    pub fn new(genus: impl Into<String>, file_id: impl Into<FileId>) -> Self {
        Self {
            genus: genus.into(),
            file_id: file_id.into(),
            ..Default::default()
        }
    }

    /// Sets the project id.
    pub fn with_project(mut self, project_id: u64) -> Self {
        self.project_id = Some(project_id);
        self
    }

    /// Sets the expected headers and indexes each by its position.
    ///
    /// Explicit indices added afterwards with [`Self::with_column_index`]
    /// override the positional ones.
    pub fn with_expected_headers<I, S>(mut self, headers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.expected_headers = headers.into_iter().map(Into::into).collect();
        self.column_index_map = self
            .expected_headers
            .iter()
            .enumerate()
            .map(|(index, name)| (name.clone(), index))
            .collect();
        self
    }

    /// Maps a logical header name to a column index.
    pub fn with_column_index(mut self, name: impl Into<String>, index: usize) -> Self {
        self.column_index_map.insert(name.into(), index);
        self
    }

    /// Project id, ignoring the `0` placeholder.
    pub fn project(&self) -> Option<u64> {
        self.project_id.filter(|id| *id != 0)
    }

    /// Column index of a logical header.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.column_index_map.get(name).copied()
    }

    /// Column indices of several headers, in the order given.
    ///
    /// Returns the first name that has no index as the error.
    pub fn column_indices<'a>(
        &self,
        names: impl IntoIterator<Item = &'a str>,
    ) -> std::result::Result<Vec<usize>, &'a str> {
        names
            .into_iter()
            .map(|name| self.column_index(name).ok_or(name))
            .collect()
    }
}
