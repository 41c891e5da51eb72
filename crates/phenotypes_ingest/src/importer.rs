//! Traits importer: validate a traits file, then write it.

use crate::{TraitIds, TraitWriter};
use chrono::{DateTime, Utc};
use phenotypes_core::{
    FileId, ImporterConfig, PhenotypesError, Result, TraitRecord, ValidationContext,
    ValidationReport, columns,
};
use phenotypes_validator::{
    CancellationToken, Collaborators, PipelineRun, PipelineRunner, ResultReducer, traits_registry,
};
use serde::Serialize;
use tracing::info;

/// What a completed import wrote.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImportSummary {
    /// Genus the traits were written for
    pub genus: String,
    /// File the traits were read from
    pub file_id: FileId,
    /// Number of data rows written
    pub rows: usize,
    /// Term ids, one entry per data row in file order
    pub traits: Vec<TraitIds>,
    /// When the import committed
    pub completed_at: DateTime<Utc>,
}

/// Result of [`TraitsImporter::import`].
#[derive(Debug, Clone, PartialEq)]
pub enum ImportOutcome {
    /// Validation passed and every row was written
    Imported(ImportSummary),
    /// Validation failed; nothing was written
    Rejected(ValidationReport),
}

/// Validates and imports traits files.
///
/// # Example
///
/// ```rust
/// use phenotypes_core::{GenusVocabulary, ImporterConfig, ProjectConfig};
/// use phenotypes_ingest::{ImportOutcome, InMemoryFileReader, InMemoryTermStore, TraitsImporter};
/// use phenotypes_validator::{CancellationToken, Collaborators};
/// use std::sync::Arc;
///
/// let mut config = ImporterConfig::default();
/// config.allow_new_terms = true;
/// config.store.genera.insert(
///     "Lens".to_string(),
///     GenusVocabulary {
///         trait_cv: "lens_traits".to_string(),
///         method_cv: "lens_method".to_string(),
///         unit_cv: "lens_unit".to_string(),
///         db: "LENS".to_string(),
///         crop_ontology: None,
///     },
/// );
///
/// let files = InMemoryFileReader::new().with_file(
///     "traits.tsv",
///     "text/tab-separated-values",
///     "Trait Name\tTrait Description\tMethod Short Name\tCollection Method\tUnit\tType\n\
///      Plant Height\tHeight of the plant\tRuler\tSoil to tip\tcm\tQuantitative\n",
/// );
/// let store = InMemoryTermStore::from_config(&config.store);
/// let importer =
///     TraitsImporter::new(config, Collaborators::new(Arc::new(files), Arc::new(store))).unwrap();
///
/// let context = importer.build_context("Lens", None, "traits.tsv");
/// match importer.import(&context, &CancellationToken::new()).unwrap() {
///     ImportOutcome::Imported(summary) => assert_eq!(summary.rows, 1),
///     ImportOutcome::Rejected(report) => panic!("{}", report.to_json_pretty().unwrap()),
/// }
/// ```
pub struct TraitsImporter {
    config: ImporterConfig,
    collaborators: Collaborators,
    runner: PipelineRunner,
    reducer: ResultReducer,
}

impl TraitsImporter {
    /// Creates an importer wired with the six traits validators.
    pub fn new(config: ImporterConfig, collaborators: Collaborators) -> Result<Self> {
        let problems = config.problems();
        if !problems.is_empty() {
            return Err(PhenotypesError::Configuration(problems.join("; ")));
        }

        let registry = traits_registry(&collaborators, &config)?;
        let runner = PipelineRunner::new(registry, collaborators.file_reader.clone());
        Ok(Self {
            config,
            collaborators,
            runner,
            reducer: ResultReducer::traits(),
        })
    }

    /// The importer configuration.
    pub fn config(&self) -> &ImporterConfig {
        &self.config
    }

    /// Context for validating a traits file.
    pub fn build_context(
        &self,
        genus: &str,
        project_id: Option<u64>,
        file_id: impl Into<FileId>,
    ) -> ValidationContext {
        let context =
            ValidationContext::new(genus, file_id).with_expected_headers(columns::ALL);
        match project_id {
            Some(project_id) => context.with_project(project_id),
            None => context,
        }
    }

    /// Runs the pipeline and returns both the raw run and its report.
    pub fn run(
        &self,
        context: &ValidationContext,
        cancel: &CancellationToken,
    ) -> Result<(PipelineRun, ValidationReport)> {
        let run = self.runner.run(context, cancel)?;
        let report = self.reducer.reduce(&run.ledger);
        Ok((run, report))
    }

    /// Validates a traits file.
    pub fn validate(
        &self,
        context: &ValidationContext,
        cancel: &CancellationToken,
    ) -> Result<ValidationReport> {
        self.run(context, cancel).map(|(_, report)| report)
    }

    /// Validates a traits file and, if nothing failed, writes every row in
    /// one transaction.
    pub fn import(
        &self,
        context: &ValidationContext,
        cancel: &CancellationToken,
    ) -> Result<ImportOutcome> {
        // Rows are parsed as the pipeline dispatches them; the file is read once.
        let mut rows = Vec::new();
        let run = self
            .runner
            .run_with_rows(context, cancel, |_, columns| {
                rows.push(TraitRecord::from_row(columns, context));
            })?;
        let report = self.reducer.reduce(&run.ledger);
        if !report.passed() {
            info!("Import of {} rejected by validation", context.file_id);
            return Ok(ImportOutcome::Rejected(report));
        }

        let records = rows.into_iter().collect::<Result<Vec<_>>>()?;
        let mut writer = TraitWriter::new(self.collaborators.resolver.clone(), &self.config);
        let traits = writer.import_rows(&records, &context.genus)?;

        Ok(ImportOutcome::Imported(ImportSummary {
            genus: context.genus.clone(),
            file_id: context.file_id.clone(),
            rows: traits.len(),
            traits,
            completed_at: Utc::now(),
        }))
    }
}
