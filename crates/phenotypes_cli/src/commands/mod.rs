pub mod check;
pub mod import;
pub mod validate;

use anyhow::{Context, Result};
use phenotypes_ingest::{InMemoryTermStore, LocalFileReader, TraitsImporter};
use phenotypes_parser::parse_file;
use phenotypes_validator::Collaborators;
use std::path::Path;
use std::sync::Arc;
use tracing::info;

/// Loads the importer configuration and wires an importer over the local
/// filesystem and an in-memory store seeded from that configuration.
fn load_importer(config_path: &str) -> Result<(TraitsImporter, Arc<InMemoryTermStore>)> {
    let config = parse_file(Path::new(config_path))
        .with_context(|| format!("Failed to parse configuration file: {}", config_path))?;

    info!(
        "Configuration loaded: {} genera, {} projects, {} terms",
        config.store.genera.len(),
        config.store.projects.len(),
        config.store.terms.len()
    );

    let store = Arc::new(InMemoryTermStore::from_config(&config.store));
    let collaborators = Collaborators::new(Arc::new(LocalFileReader::new()), store.clone());
    let importer =
        TraitsImporter::new(config, collaborators).context("Failed to set up the importer")?;

    Ok((importer, store))
}
