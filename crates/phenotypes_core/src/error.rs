//! Error types for phenotype validation and ingestion.
//!
//! Input problems found in an uploaded file are never errors: they are
//! recorded as failed [`RowValidationOutcome`](crate::RowValidationOutcome)s
//! and end up in the report. The variants below are the conditions that
//! abort a run outright.

use std::fmt;
use thiserror::Error;

/// Result type for phenotype operations.
pub type Result<T> = std::result::Result<T, PhenotypesError>;

/// Which of the three vocabulary terms of a trait a failure concerns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TermKind {
    /// The measured phenotype
    Trait,
    /// How the phenotype was measured
    Method,
    /// The unit the measurement was taken in
    Unit,
}

impl fmt::Display for TermKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TermKind::Trait => f.write_str("trait"),
            TermKind::Method => f.write_str("method"),
            TermKind::Unit => f.write_str("unit"),
        }
    }
}

/// Main error type for phenotype operations.
#[derive(Error, Debug)]
pub enum PhenotypesError {
    /// No validator with this id was registered
    #[error("Unknown validator id: {0}")]
    UnknownValidatorId(String),

    /// A validator with this id was already registered
    #[error("Validator id '{0}' is already registered")]
    DuplicateValidatorId(String),

    /// A validator was asked to validate an input type it does not implement
    #[error("Method {method}() from plugin '{plugin}' is not supported")]
    NotSupported {
        /// Validator id
        plugin: String,
        /// Name of the unimplemented method
        method: String,
    },

    /// The mime type has no known delimiter
    #[error("Unsupported mime type: '{0}'")]
    UnsupportedMimeType(String),

    /// The mime type maps to more than one delimiter
    #[error("Mime type '{mime_type}' supports multiple delimiters ({delimiters:?}); splitting such files is not supported")]
    AmbiguousDelimiter {
        /// The mime type that was requested
        mime_type: String,
        /// Every delimiter the mime type allows
        delimiters: Vec<char>,
    },

    /// The line did not contain the expected delimiter
    #[error("Could not split line into columns: '{0}'")]
    SplitFailed(String),

    /// A row could not be turned into a trait record
    #[error("Invalid row: {0}")]
    InvalidRow(String),

    /// The genus has no vocabulary configuration
    #[error("Genus '{0}' has no vocabulary configuration")]
    GenusNotConfigured(String),

    /// A term does not exist and creating new terms is not allowed
    #[error("The {kind} '{name}' does not exist in vocabulary '{vocabulary}'")]
    TermNotFound {
        /// Which term was missing
        kind: TermKind,
        /// Term name as provided
        name: String,
        /// Vocabulary that was searched
        vocabulary: String,
    },

    /// The term store rejected an operation
    #[error("Term store error: {0}")]
    Store(String),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    Configuration(String),

    /// The run was cancelled by the caller
    #[error("Run cancelled at line {0}")]
    Cancelled(usize),

    /// File I/O error
    #[error("File I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl PhenotypesError {
    /// Creates a new not-supported error.
    pub fn not_supported(plugin: impl Into<String>, method: impl Into<String>) -> Self {
        Self::NotSupported {
            plugin: plugin.into(),
            method: method.into(),
        }
    }

    /// Creates a new term-not-found error.
    pub fn term_not_found(
        kind: TermKind,
        name: impl Into<String>,
        vocabulary: impl Into<String>,
    ) -> Self {
        Self::TermNotFound {
            kind,
            name: name.into(),
            vocabulary: vocabulary.into(),
        }
    }

    /// Creates a new store error.
    pub fn store(message: impl Into<String>) -> Self {
        Self::Store(message.into())
    }

    /// Returns true for deployment mistakes rather than input or data problems.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            Self::UnknownValidatorId(_)
                | Self::DuplicateValidatorId(_)
                | Self::NotSupported { .. }
                | Self::UnsupportedMimeType(_)
                | Self::GenusNotConfigured(_)
                | Self::Configuration(_)
        )
    }
}
