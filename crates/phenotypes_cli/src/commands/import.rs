use anyhow::{Context, Result};
use phenotypes_ingest::ImportOutcome;
use phenotypes_validator::CancellationToken;
use tracing::info;

use super::load_importer;
use crate::output;

pub fn execute(
    file: &str,
    genus: &str,
    project: Option<u64>,
    config_path: &str,
    format: &str,
) -> Result<()> {
    info!("Importing traits file: {}", file);

    let (importer, store) = load_importer(config_path)?;
    let context = importer.build_context(genus, project, file);

    let outcome = importer
        .import(&context, &CancellationToken::new())
        .with_context(|| format!("Failed to import traits file: {}", file))?;

    match outcome {
        ImportOutcome::Imported(summary) => {
            let stats = store.stats().context("Failed to read the term store")?;
            output::print_import_summary(&summary, &stats, format)?;
        }
        ImportOutcome::Rejected(report) => {
            output::print_validation_report(&report, format)?;
            std::process::exit(1);
        }
    }

    Ok(())
}
