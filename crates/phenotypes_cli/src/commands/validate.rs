use anyhow::{Context, Result};
use phenotypes_validator::{CancellationToken, failing_lines};
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
    info!("Validating traits file: {}", file);
    info!("Genus: {}", genus);
    if let Some(project) = project {
        info!("Project: {}", project);
    }

    let (importer, _store) = load_importer(config_path)?;
    let context = importer.build_context(genus, project, file);

    let (run, report) = importer
        .run(&context, &CancellationToken::new())
        .with_context(|| format!("Failed to validate traits file: {}", file))?;

    if format != "json" {
        output::print_info(&format!(
            "Checked {} data rows, stopped after the {} stage ({} failing rows)",
            run.data_lines,
            run.last_stage,
            failing_lines(&run.ledger)
        ));
    }

    output::print_validation_report(&report, format)?;

    if !report.passed() {
        std::process::exit(1);
    }

    Ok(())
}
