//! Importer configuration.
//!
//! Everything a deployment can tune about a traits import: the term creation
//! policy, how duplicate combinations are compared, the relationship names
//! linking terms, and the seed contents of the vocabulary store.

use crate::GenusVocabulary;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// How trait, method and unit names are compared when looking for duplicates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CaseRule {
    /// Names must match byte for byte
    #[default]
    Exact,
    /// Names are compared after lowercasing
    IgnoreCase,
}

impl CaseRule {
    /// Normalizes a name for comparison.
    pub fn normalize(&self, value: &str) -> String {
        match self {
            CaseRule::Exact => value.trim().to_string(),
            CaseRule::IgnoreCase => value.trim().to_lowercase(),
        }
    }
}

/// Relationship and property names written when a trait is ingested.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RelationNames {
    /// Links a method (subject) to the trait it measures (object)
    pub method_to_trait: String,
    /// Links a unit (subject) to the method it is reported by (object)
    pub unit_to_method: String,
    /// Property on the unit term holding Qualitative/Quantitative
    pub unit_data_type: String,
}

impl Default for RelationNames {
    fn default() -> Self {
        Self {
            method_to_trait: "method_of".to_string(),
            unit_to_method: "unit_of".to_string(),
            unit_data_type: "additionalType".to_string(),
        }
    }
}

/// A project and the genus it was configured with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectConfig {
    /// Project id
    pub id: u64,
    /// Genus the project studies
    pub genus: String,
}

/// A term that already exists in the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TermConfig {
    /// Vocabulary the term belongs to
    pub vocabulary: String,
    /// Term name
    pub name: String,
}

/// Initial contents of the vocabulary store.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Genus name to its vocabularies
    pub genera: BTreeMap<String, GenusVocabulary>,
    /// Known projects
    pub projects: Vec<ProjectConfig>,
    /// Pre-existing terms
    pub terms: Vec<TermConfig>,
}

/// Complete importer configuration.
///
/// # Example
///
/// ```rust
/// use phenotypes_core::{CaseRule, ImporterConfig};
///
/// let config = ImporterConfig::default();
/// assert!(!config.allow_new_terms);
/// assert_eq!(config.duplicate_case, CaseRule::Exact);
/// assert!(config.check_database_duplicates);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImporterConfig {
    /// Create trait, method and unit terms that do not exist yet
    pub allow_new_terms: bool,

    /// Comparison used by the duplicate trait check
    pub duplicate_case: CaseRule,

    /// Also report combinations that already exist in the store
    pub check_database_duplicates: bool,

    /// Relationship and property names
    pub relations: RelationNames,

    /// Store contents
    pub store: StoreConfig,
}

impl Default for ImporterConfig {
    fn default() -> Self {
        Self {
            allow_new_terms: false,
            duplicate_case: CaseRule::Exact,
            check_database_duplicates: true,
            relations: RelationNames::default(),
            store: StoreConfig::default(),
        }
    }
}

impl ImporterConfig {
    /// Checks the configuration for internal consistency.
    ///
    /// Returns every problem found; an empty list means the configuration is
    /// usable.
    pub fn problems(&self) -> Vec<String> {
        let mut problems = Vec::new();

        for (genus, vocabulary) in &self.store.genera {
            if genus.trim().is_empty() {
                problems.push("genus names cannot be empty".to_string());
            }
            for (field, value) in [
                ("trait_cv", &vocabulary.trait_cv),
                ("method_cv", &vocabulary.method_cv),
                ("unit_cv", &vocabulary.unit_cv),
                ("db", &vocabulary.db),
            ] {
                if value.trim().is_empty() {
                    problems.push(format!("genus '{genus}' has an empty {field}"));
                }
            }
        }

        for project in &self.store.projects {
            if !self.store.genera.contains_key(&project.genus) {
                problems.push(format!(
                    "project {} refers to unconfigured genus '{}'",
                    project.id, project.genus
                ));
            }
        }

        for (name, value) in [
            ("method_to_trait", &self.relations.method_to_trait),
            ("unit_to_method", &self.relations.unit_to_method),
            ("unit_data_type", &self.relations.unit_data_type),
        ] {
            if value.trim().is_empty() {
                problems.push(format!("relation name '{name}' cannot be empty"));
            }
        }

        problems
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn lens() -> GenusVocabulary {
        GenusVocabulary {
            trait_cv: "lens_traits".to_string(),
            method_cv: "lens_method".to_string(),
            unit_cv: "lens_unit".to_string(),
            db: "LENS".to_string(),
            crop_ontology: None,
        }
    }

    #[test]
    fn test_case_rule_normalize() {
        assert_eq!(CaseRule::Exact.normalize(" Height "), "Height");
        assert_eq!(CaseRule::IgnoreCase.normalize(" Height "), "height");
    }

    #[test]
    fn test_valid_config_has_no_problems() {
        let mut config = ImporterConfig::default();
        config.store.genera.insert("Lens".to_string(), lens());
        config.store.projects.push(ProjectConfig {
            id: 1,
            genus: "Lens".to_string(),
        });
        assert!(config.problems().is_empty());
    }

    #[test]
    fn test_problems_reported() {
        let mut config = ImporterConfig::default();
        let mut vocabulary = lens();
        vocabulary.unit_cv = " ".to_string();
        config.store.genera.insert("Lens".to_string(), vocabulary);
        config.store.projects.push(ProjectConfig {
            id: 9,
            genus: "Cicer".to_string(),
        });
        config.relations.unit_to_method.clear();

        assert_eq!(
            config.problems(),
            vec![
                "genus 'Lens' has an empty unit_cv".to_string(),
                "project 9 refers to unconfigured genus 'Cicer'".to_string(),
                "relation name 'unit_to_method' cannot be empty".to_string(),
            ]
        );
    }
}
