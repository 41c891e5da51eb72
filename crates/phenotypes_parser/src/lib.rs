//! Parsing for traits files and importer configuration.
//!
//! Two concerns live here:
//!
//! - the delimiter resolver, which maps a file's mime type to its column
//!   delimiter and splits raw lines into sanitized cells
//! - the importer configuration loader, which reads an [`ImporterConfig`]
//!   from YAML or TOML
//!
//! # Example
//!
//! ```rust
//! use phenotypes_parser::parse_yaml;
//!
//! let yaml = r#"
//! allow_new_terms: true
//! store:
//!   genera:
//!     Lens:
//!       trait_cv: lens_traits
//!       method_cv: lens_method
//!       unit_cv: lens_unit
//!       db: LENS
//! "#;
//!
//! let config = parse_yaml(yaml).expect("Failed to parse config");
//! assert!(config.allow_new_terms);
//! assert!(config.store.genera.contains_key("Lens"));
//! ```

mod delimiter;

pub use delimiter::*;

use phenotypes_core::ImporterConfig;
use std::path::Path;
use thiserror::Error;

/// Errors that can occur while loading a configuration.
#[derive(Debug, Error)]
pub enum ParserError {
    /// YAML parsing or deserialization failed
    #[error("Failed to parse YAML: {0}")]
    YamlError(#[from] serde_yaml_ng::Error),

    /// TOML parsing or deserialization failed
    #[error("Failed to parse TOML: {0}")]
    TomlError(String),

    /// File I/O error
    #[error("File I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Unsupported file format
    #[error("Unsupported file format: {0}")]
    UnsupportedFormat(String),

    /// Invalid file extension
    #[error("Invalid or missing file extension")]
    InvalidExtension,

    /// The configuration parsed but is inconsistent
    #[error("Invalid configuration: {}", .0.join("; "))]
    Invalid(Vec<String>),
}

/// Result type alias for parser operations.
pub type Result<T> = std::result::Result<T, ParserError>;

/// Supported configuration file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    /// YAML format (.yml, .yaml)
    Yaml,
    /// TOML format (.toml)
    Toml,
}

fn checked(config: ImporterConfig) -> Result<ImporterConfig> {
    let problems = config.problems();
    if problems.is_empty() {
        Ok(config)
    } else {
        Err(ParserError::Invalid(problems))
    }
}

/// Parse a configuration from a YAML string.
///
/// Missing sections take their defaults.
pub fn parse_yaml(content: &str) -> Result<ImporterConfig> {
    let config: ImporterConfig = serde_yaml_ng::from_str(content)?;
    checked(config)
}

/// Parse a configuration from a TOML string.
///
/// # Example
///
/// ```rust
/// use phenotypes_parser::parse_toml;
///
/// let toml = r#"
/// allow_new_terms = false
/// duplicate_case = "ignore-case"
///
/// [store.genera.Lens]
/// trait_cv = "lens_traits"
/// method_cv = "lens_method"
/// unit_cv = "lens_unit"
/// db = "LENS"
/// "#;
///
/// let config = parse_toml(toml).unwrap();
/// assert_eq!(config.store.genera["Lens"].unit_cv, "lens_unit");
/// ```
pub fn parse_toml(content: &str) -> Result<ImporterConfig> {
    let config: ImporterConfig =
        toml::from_str(content).map_err(|e| ParserError::TomlError(e.to_string()))?;
    checked(config)
}

/// Detect the configuration format from a file path based on its extension.
///
/// # Supported Extensions
///
/// * `.yaml`, `.yml` → `ConfigFormat::Yaml`
/// * `.toml` → `ConfigFormat::Toml`
///
/// # Errors
///
/// Returns `ParserError::InvalidExtension` if the file has no extension.
/// Returns `ParserError::UnsupportedFormat` if the extension is not recognized.
pub fn detect_format(path: &Path) -> Result<ConfigFormat> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .ok_or(ParserError::InvalidExtension)?;

    match extension.to_lowercase().as_str() {
        "yaml" | "yml" => Ok(ConfigFormat::Yaml),
        "toml" => Ok(ConfigFormat::Toml),
        other => Err(ParserError::UnsupportedFormat(other.to_string())),
    }
}

/// Parse a configuration file with automatic format detection.
///
/// ```no_run
/// use phenotypes_parser::parse_file;
/// use std::path::Path;
///
/// let config = parse_file(Path::new("config/lens.yml")).unwrap();
/// println!("Genera configured: {}", config.store.genera.len());
/// ```
pub fn parse_file(path: &Path) -> Result<ImporterConfig> {
    let format = detect_format(path)?;
    let content = std::fs::read_to_string(path)?;

    match format {
        ConfigFormat::Yaml => parse_yaml(&content),
        ConfigFormat::Toml => parse_toml(&content),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use phenotypes_core::{CaseRule, ProjectConfig};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_empty_yaml_uses_defaults() {
        let config = parse_yaml("{}").expect("Failed to parse empty YAML");
        assert_eq!(config, ImporterConfig::default());
    }

    #[test]
    fn test_parse_full_yaml() {
        let yaml = r#"
allow_new_terms: true
duplicate_case: ignore-case
check_database_duplicates: false
relations:
  method_to_trait: measured_by
store:
  genera:
    Lens:
      trait_cv: lens_traits
      method_cv: lens_method
      unit_cv: lens_unit
      db: LENS
      crop_ontology: CO_339
  projects:
    - id: 4
      genus: Lens
  terms:
    - vocabulary: lens_traits
      name: Plant Height
"#;

        let config = parse_yaml(yaml).expect("Failed to parse YAML");

        assert!(config.allow_new_terms);
        assert_eq!(config.duplicate_case, CaseRule::IgnoreCase);
        assert!(!config.check_database_duplicates);
        assert_eq!(config.relations.method_to_trait, "measured_by");
        assert_eq!(config.relations.unit_to_method, "unit_of");
        assert_eq!(
            config.store.genera["Lens"].crop_ontology.as_deref(),
            Some("CO_339")
        );
        assert_eq!(
            config.store.projects,
            vec![ProjectConfig {
                id: 4,
                genus: "Lens".to_string()
            }]
        );
        assert_eq!(config.store.terms[0].name, "Plant Height");
    }

    #[test]
    fn test_parse_yaml_missing_vocabulary_field() {
        let yaml = r#"
store:
  genera:
    Lens:
      trait_cv: lens_traits
"#;
        assert!(matches!(parse_yaml(yaml), Err(ParserError::YamlError(_))));
    }

    #[test]
    fn test_parse_yaml_inconsistent() {
        let yaml = r#"
store:
  projects:
    - id: 2
      genus: Cicer
"#;
        let err = parse_yaml(yaml).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid configuration: project 2 refers to unconfigured genus 'Cicer'"
        );
    }

    #[test]
    fn test_parse_invalid_toml() {
        assert!(matches!(
            parse_toml("allow_new_terms = maybe"),
            Err(ParserError::TomlError(_))
        ));
    }

    #[test]
    fn test_detect_format() {
        assert_eq!(
            detect_format(Path::new("lens.yaml")).unwrap(),
            ConfigFormat::Yaml
        );
        assert_eq!(
            detect_format(Path::new("lens.YML")).unwrap(),
            ConfigFormat::Yaml
        );
        assert_eq!(
            detect_format(Path::new("lens.toml")).unwrap(),
            ConfigFormat::Toml
        );
        assert!(matches!(
            detect_format(Path::new("lens.json")),
            Err(ParserError::UnsupportedFormat(ref ext)) if ext == "json"
        ));
        assert!(matches!(
            detect_format(Path::new("lens")),
            Err(ParserError::InvalidExtension)
        ));
    }
}
