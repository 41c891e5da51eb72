use anyhow::{Context, Result};
use phenotypes_parser::parse_file;
use std::path::Path;
use tracing::info;

use crate::output;

pub fn execute(config_path: &str, format: &str) -> Result<()> {
    info!("Checking importer configuration: {}", config_path);

    // Parsing also checks the configuration for consistency
    let path = Path::new(config_path);
    let config = parse_file(path)
        .with_context(|| format!("Failed to parse configuration file: {}", config_path))?;

    if format == "json" {
        println!("{}", serde_json::to_string_pretty(&config)?);
        return Ok(());
    }

    output::print_success("Configuration is valid");

    println!("\nConfiguration Summary:");
    println!("  Allow new terms:      {}", config.allow_new_terms);
    println!("  Duplicate matching:   {:?}", config.duplicate_case);
    println!(
        "  Database duplicates:  {}",
        if config.check_database_duplicates {
            "checked"
        } else {
            "ignored"
        }
    );
    println!(
        "  Relations:            method {} trait, unit {} method, data type as {}",
        config.relations.method_to_trait,
        config.relations.unit_to_method,
        config.relations.unit_data_type
    );

    println!("\nGenera:");
    for (genus, vocabulary) in &config.store.genera {
        println!(
            "  {}: traits={}, methods={}, units={}, db={}",
            genus, vocabulary.trait_cv, vocabulary.method_cv, vocabulary.unit_cv, vocabulary.db
        );
        if let Some(ontology) = &vocabulary.crop_ontology {
            println!("    Crop ontology: {}", ontology);
        }
    }

    if !config.store.projects.is_empty() {
        println!("\nProjects:");
        for project in &config.store.projects {
            println!("  {} ({})", project.id, project.genus);
        }
    }

    println!("\nTerms: {}", config.store.terms.len());

    Ok(())
}
