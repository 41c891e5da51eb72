//! Mime type to delimiter resolution and line splitting.

use phenotypes_core::{PhenotypesError, Result};
use regex::Regex;
use std::sync::LazyLock;

/// Stray quote characters at either end of a cell.
static EDGE_QUOTES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"^["']+|["']+$"#).expect("edge quote pattern is valid"));

/// Fixed mime type to delimiter table.
const DELIMITERS: &[(&str, &[char])] = &[
    ("text/tab-separated-values", &['\t']),
    ("text/csv", &[',']),
    ("text/plain", &['\t', ',']),
];

/// Strips parameters and case from a mime type (`Text/CSV; charset=utf-8` → `text/csv`).
fn essence(mime_type: &str) -> String {
    mime_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase()
}

/// Returns the delimiters a mime type may use, in preference order.
///
/// # Errors
///
/// Returns `PhenotypesError::UnsupportedMimeType` for an empty or unknown
/// mime type.
///
/// # Example
///
/// ```rust
/// use phenotypes_parser::delimiters_for;
///
/// assert_eq!(delimiters_for("text/csv").unwrap(), &[',']);
/// assert_eq!(delimiters_for("text/plain").unwrap(), &['\t', ',']);
/// assert!(delimiters_for("application/pdf").is_err());
/// ```
pub fn delimiters_for(mime_type: &str) -> Result<&'static [char]> {
    let wanted = essence(mime_type);
    DELIMITERS
        .iter()
        .find(|(mime, _)| *mime == wanted)
        .map(|(_, delimiters)| *delimiters)
        .ok_or_else(|| PhenotypesError::UnsupportedMimeType(mime_type.to_string()))
}

/// Returns true if the mime type is in the delimiter table.
pub fn is_supported_mime_type(mime_type: &str) -> bool {
    delimiters_for(mime_type).is_ok()
}

/// Byte order mark some spreadsheet exports put in front of the first cell.
const BYTE_ORDER_MARK: char = '\u{feff}';

/// Trims a cell and removes a leading byte order mark and stray quotes
/// around it.
pub fn sanitize_cell(cell: &str) -> String {
    let cell = cell.trim_start_matches(BYTE_ORDER_MARK).trim();
    EDGE_QUOTES.replace_all(cell, "").trim().to_string()
}

/// Splits one raw line into sanitized columns.
///
/// Mime types with several candidate delimiters are refused rather than
/// guessed at.
///
/// # Errors
///
/// - `UnsupportedMimeType` if the mime type is unknown
/// - `AmbiguousDelimiter` if the mime type allows more than one delimiter
/// - `SplitFailed` if the delimiter does not occur in the line
///
/// # Example
///
/// ```rust
/// use phenotypes_parser::split_line;
///
/// let columns = split_line("Plant Height\t\"cm\"\tQuantitative\n", "text/tab-separated-values").unwrap();
/// assert_eq!(columns, vec!["Plant Height", "cm", "Quantitative"]);
/// ```
pub fn split_line(raw_line: &str, mime_type: &str) -> Result<Vec<String>> {
    LineSplitter::new(mime_type)?.split(raw_line)
}

/// Splits lines of one file, resolving its delimiter once.
#[derive(Debug, Clone)]
pub struct LineSplitter {
    mime_type: String,
    delimiter: char,
}

impl LineSplitter {
    /// Creates a splitter for a mime type.
    ///
    /// Fails like [`split_line`] for unknown or ambiguous mime types.
    pub fn new(mime_type: impl Into<String>) -> Result<Self> {
        let mime_type = mime_type.into();
        let delimiter = match delimiters_for(&mime_type)? {
            [single] => *single,
            many => {
                return Err(PhenotypesError::AmbiguousDelimiter {
                    mime_type,
                    delimiters: many.to_vec(),
                });
            }
        };
        Ok(Self {
            mime_type,
            delimiter,
        })
    }

    /// The mime type this splitter was created for.
    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    /// The resolved delimiter.
    pub fn delimiter(&self) -> char {
        self.delimiter
    }

    /// Splits one raw line.
    pub fn split(&self, raw_line: &str) -> Result<Vec<String>> {
        let line = raw_line.trim_end_matches(['\n', '\r']);
        let columns: Vec<String> = line.split(self.delimiter).map(sanitize_cell).collect();
        if columns.len() == 1 {
            return Err(PhenotypesError::SplitFailed(line.to_string()));
        }
        Ok(columns)
    }
}
