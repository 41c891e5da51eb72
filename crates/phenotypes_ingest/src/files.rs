//! File readers.

use phenotypes_core::{FileId, FileReader, PhenotypesError, Result};
use std::collections::HashMap;
use std::fs::{self, File};
use std::io::{self, BufRead, BufReader, Cursor};
use std::path::{Path, PathBuf};

/// Mime type for a file name, from its extension.
pub fn mime_type_for_path(path: &Path) -> &'static str {
    let extension = path
        .extension()
        .and_then(|extension| extension.to_str())
        .map(|extension| extension.to_ascii_lowercase());

    match extension.as_deref() {
        Some("tsv") => "text/tab-separated-values",
        Some("csv") => "text/csv",
        Some("txt") => "text/plain",
        _ => "application/octet-stream",
    }
}

/// Reads files from the local filesystem; a file id is a path.
///
/// Relative ids are resolved against the base directory when one is set.
#[derive(Debug, Clone, Default)]
pub struct LocalFileReader {
    base_dir: Option<PathBuf>,
}

impl LocalFileReader {
    /// Creates a reader resolving ids as given.
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolves relative ids against a directory.
    pub fn with_base_dir(mut self, base_dir: impl Into<PathBuf>) -> Self {
        self.base_dir = Some(base_dir.into());
        self
    }

    fn path(&self, file_id: &FileId) -> PathBuf {
        let path = Path::new(file_id.as_str());
        match &self.base_dir {
            Some(base_dir) if path.is_relative() => base_dir.join(path),
            _ => path.to_path_buf(),
        }
    }
}

impl FileReader for LocalFileReader {
    fn open(&self, file_id: &FileId) -> Result<Box<dyn BufRead + '_>> {
        let file = File::open(self.path(file_id))?;
        Ok(Box::new(BufReader::new(file)))
    }

    fn mime_type(&self, file_id: &FileId) -> Result<Option<String>> {
        let path = self.path(file_id);
        if !path.is_file() {
            return Ok(None);
        }
        Ok(Some(mime_type_for_path(&path).to_string()))
    }

    fn size(&self, file_id: &FileId) -> Result<Option<u64>> {
        match fs::metadata(self.path(file_id)) {
            Ok(metadata) => Ok(Some(metadata.len())),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }
}

/// Holds file contents in memory, keyed by id.
#[derive(Debug, Clone, Default)]
pub struct InMemoryFileReader {
    files: HashMap<FileId, (String, Vec<u8>)>,
}

impl InMemoryFileReader {
    /// Creates a reader with no files.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a file with an explicit mime type.
    pub fn with_file(
        mut self,
        file_id: impl Into<FileId>,
        mime_type: impl Into<String>,
        contents: impl Into<Vec<u8>>,
    ) -> Self {
        self.files
            .insert(file_id.into(), (mime_type.into(), contents.into()));
        self
    }
}

impl FileReader for InMemoryFileReader {
    fn open(&self, file_id: &FileId) -> Result<Box<dyn BufRead + '_>> {
        let (_, contents) = self.files.get(file_id).ok_or_else(|| {
            PhenotypesError::Io(io::Error::new(
                io::ErrorKind::NotFound,
                format!("file {file_id} does not exist"),
            ))
        })?;
        Ok(Box::new(Cursor::new(contents.as_slice())))
    }

    fn mime_type(&self, file_id: &FileId) -> Result<Option<String>> {
        Ok(self.files.get(file_id).map(|(mime_type, _)| mime_type.clone()))
    }

    fn size(&self, file_id: &FileId) -> Result<Option<u64>> {
        Ok(self
            .files
            .get(file_id)
            .map(|(_, contents)| contents.len() as u64))
    }
}
