//! File existence and mime type check.

use phenotypes_core::{
    FileId, FileReader, Result, RowValidationOutcome, Validator, ValidatorDescriptor,
};
use std::sync::Arc;

/// Checks the uploaded file exists, has an accepted mime type and is not empty.
///
/// The file contents are never read.
pub struct FileValidator {
    descriptor: ValidatorDescriptor,
    reader: Arc<dyn FileReader>,
    accepted_mime_types: Vec<String>,
}

impl FileValidator {
    /// Creates a file validator accepting the given mime types.
    pub fn new<I, S>(descriptor: ValidatorDescriptor, reader: Arc<dyn FileReader>, accepted: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            descriptor,
            reader,
            accepted_mime_types: accepted
                .into_iter()
                .map(|mime| mime.into().to_ascii_lowercase())
                .collect(),
        }
    }

    fn accepts(&self, mime_type: &str) -> bool {
        let essence = mime_type
            .split(';')
            .next()
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase();
        self.accepted_mime_types.contains(&essence)
    }
}

impl Validator for FileValidator {
    fn descriptor(&self) -> &ValidatorDescriptor {
        &self.descriptor
    }

    fn validate_file(&self, file_id: &FileId) -> Result<RowValidationOutcome> {
        let Some(mime_type) = self.reader.mime_type(file_id)? else {
            return Ok(
                RowValidationOutcome::fail("File does not exist").with_item("file_id", file_id.as_str())
            );
        };

        if !self.accepts(&mime_type) {
            return Ok(RowValidationOutcome::fail("Unsupported file mime type")
                .with_item("mime_type", mime_type)
                .with_item("accepted", self.accepted_mime_types.clone()));
        }

        if self.reader.size(file_id)? == Some(0) {
            return Ok(RowValidationOutcome::fail(
                "The file has no data and is an empty file",
            )
            .with_item("file_id", file_id.as_str()));
        }

        Ok(RowValidationOutcome::pass())
    }
}
