//! Staged validation pipeline.
//!
//! A run walks four stage groups in a fixed order:
//!
//! 1. **Metadata**: validators checking the context only
//! 2. **File**: validators checking the file object, without reading it
//! 3. **HeaderRow**: validators checking the first line
//! 4. **DataRow**: validators checking every remaining non-blank line
//!
//! Every validator of a stage runs, and each records its outcome in the
//! [`FailureLedger`]. A stage with any failure stops the run: later stages
//! never run and the run ends [`PipelineState::Aborted`]. Data-row
//! validators see every data line, and only failing lines are recorded.

use crate::{CancellationToken, ValidatorRegistry};
use phenotypes_core::{
    FailureLedger, FileReader, InputType, PhenotypesError, Result, RowValidationOutcome,
    ValidationContext, Validator,
};
use phenotypes_parser::LineSplitter;
use std::fmt;
use std::io::{self, BufRead};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Where a run is, or where it ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineState {
    Metadata,
    File,
    HeaderRow,
    DataRow,
    /// Every stage ran and passed
    Done,
    /// A stage failed and later stages were skipped
    Aborted,
}

impl PipelineState {
    /// Input type dispatched during this stage, if it is a stage.
    pub fn input_type(&self) -> Option<InputType> {
        match self {
            PipelineState::Metadata => Some(InputType::Metadata),
            PipelineState::File => Some(InputType::File),
            PipelineState::HeaderRow => Some(InputType::HeaderRow),
            PipelineState::DataRow => Some(InputType::DataRow),
            PipelineState::Done | PipelineState::Aborted => None,
        }
    }
}

impl fmt::Display for PipelineState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PipelineState::Metadata => "metadata",
            PipelineState::File => "file",
            PipelineState::HeaderRow => "header-row",
            PipelineState::DataRow => "data-row",
            PipelineState::Done => "done",
            PipelineState::Aborted => "aborted",
        };
        f.write_str(name)
    }
}

/// Result of one pipeline run.
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineRun {
    /// What every validator that ran recorded
    pub ledger: FailureLedger,
    /// Final state, [`PipelineState::Done`] or [`PipelineState::Aborted`]
    pub state: PipelineState,
    /// Last stage that ran
    pub last_stage: PipelineState,
    /// Number of data lines dispatched to data-row validators
    pub data_lines: usize,
}

impl PipelineRun {
    /// Returns true if no validator recorded a failure.
    pub fn passed(&self) -> bool {
        self.state == PipelineState::Done
    }
}

/// Drives the staged validation of one file.
pub struct PipelineRunner {
    registry: ValidatorRegistry,
    file_reader: Arc<dyn FileReader>,
}

impl PipelineRunner {
    /// Creates a runner over a registry and the reader the file is opened with.
    pub fn new(registry: ValidatorRegistry, file_reader: Arc<dyn FileReader>) -> Self {
        Self {
            registry,
            file_reader,
        }
    }

    /// The registry validators are created from.
    pub fn registry(&self) -> &ValidatorRegistry {
        &self.registry
    }

    /// Runs every stage against the file named by the context.
    ///
    /// Validation failures end up in the returned ledger. Errors are reserved
    /// for configuration mistakes, unreadable or unsplittable input and
    /// cancellation.
    pub fn run(
        &self,
        context: &ValidationContext,
        cancel: &CancellationToken,
    ) -> Result<PipelineRun> {
        self.run_with_rows(context, cancel, |_, _| {})
    }

    /// Like [`run`](Self::run), also handing every dispatched data row to
    /// `on_row` with its line number.
    ///
    /// Rows are handed over as they are read, before the run's outcome is
    /// known; callers should only act on them once the run has passed.
    pub fn run_with_rows<F>(
        &self,
        context: &ValidationContext,
        cancel: &CancellationToken,
        mut on_row: F,
    ) -> Result<PipelineRun>
    where
        F: FnMut(usize, &[String]),
    {
        info!(
            "Validating file {} for genus '{}'",
            context.file_id, context.genus
        );

        let mut ledger = FailureLedger::new();

        // 1. Metadata
        let passed = self.run_once(PipelineState::Metadata, context, &mut ledger, |validator| {
            validator.validate_metadata(context)
        })?;
        if !passed {
            return Ok(Self::aborted(PipelineState::Metadata, ledger, 0));
        }

        // 2. File
        let passed = self.run_once(PipelineState::File, context, &mut ledger, |validator| {
            validator.validate_file(&context.file_id)
        })?;
        if !passed {
            return Ok(Self::aborted(PipelineState::File, ledger, 0));
        }

        // 3. Header row
        debug!("Entering {} stage", PipelineState::HeaderRow);
        let mime_type = self.file_reader.mime_type(&context.file_id)?.ok_or_else(|| {
            PhenotypesError::Io(io::Error::new(
                io::ErrorKind::NotFound,
                format!("file {} does not exist", context.file_id),
            ))
        })?;
        let splitter = LineSplitter::new(&mime_type)?;
        let reader = self.file_reader.open(&context.file_id)?;
        let mut lines = reader.lines();

        if cancel.is_cancelled() {
            return Err(PhenotypesError::Cancelled(1));
        }
        let header = match lines.next().transpose()? {
            Some(line) if !line.trim().is_empty() => splitter.split(&line)?,
            _ => Vec::new(),
        };

        let mut passed = true;
        for descriptor in self.registry.resolve(InputType::HeaderRow) {
            let mut validator = self.registry.create(&descriptor.id, context)?;
            let outcome = validator.validate_row(&header)?;
            passed &= Self::log_outcome(&descriptor.id, &outcome);
            ledger.record(&descriptor.id, outcome);
        }
        if !passed {
            return Ok(Self::aborted(PipelineState::HeaderRow, ledger, 0));
        }

        // 4. Data rows
        debug!("Entering {} stage", PipelineState::DataRow);
        let mut validators = self
            .registry
            .resolve(InputType::DataRow)
            .into_iter()
            .map(|descriptor| self.registry.create(&descriptor.id, context))
            .collect::<Result<Vec<_>>>()?;

        let mut data_lines = 0;
        for (index, line) in lines.enumerate() {
            // Line 1 was the header.
            let line_number = index + 2;
            if cancel.is_cancelled() {
                warn!("Validation cancelled at line {}", line_number);
                return Err(PhenotypesError::Cancelled(line_number));
            }

            let line = line?;
            if line.trim().is_empty() {
                continue;
            }

            let columns = splitter.split(&line)?;
            for validator in validators.iter_mut() {
                let outcome = validator.validate_row(&columns)?;
                ledger.record_line(&validator.descriptor().id, line_number, outcome);
            }
            on_row(line_number, &columns);
            data_lines += 1;
        }
        debug!("Dispatched {} data lines", data_lines);

        let failed: Vec<&str> = validators
            .iter()
            .map(|validator| validator.descriptor().id.as_str())
            .filter(|id| ledger.get(id).is_some_and(|entry| !entry.is_clean()))
            .collect();
        if !failed.is_empty() {
            warn!("Data-row validators failed: {}", failed.join(", "));
            return Ok(Self::aborted(PipelineState::DataRow, ledger, data_lines));
        }

        info!("Validation passed ({} data lines)", data_lines);
        Ok(PipelineRun {
            ledger,
            state: PipelineState::Done,
            last_stage: PipelineState::DataRow,
            data_lines,
        })
    }

    /// Runs every validator of a once-per-run stage and reports whether all
    /// of them passed.
    fn run_once<F>(
        &self,
        stage: PipelineState,
        context: &ValidationContext,
        ledger: &mut FailureLedger,
        check: F,
    ) -> Result<bool>
    where
        F: Fn(&dyn Validator) -> Result<RowValidationOutcome>,
    {
        debug!("Entering {} stage", stage);

        let mut passed = true;
        let input_type = stage.input_type().unwrap_or(InputType::Metadata);
        for descriptor in self.registry.resolve(input_type) {
            let validator = self.registry.create(&descriptor.id, context)?;
            let outcome = check(validator.as_ref())?;
            passed &= Self::log_outcome(&descriptor.id, &outcome);
            ledger.record(&descriptor.id, outcome);
        }
        Ok(passed)
    }

    fn log_outcome(id: &str, outcome: &RowValidationOutcome) -> bool {
        if outcome.is_valid() {
            debug!("{} passed", id);
        } else {
            warn!("{} failed: {}", id, outcome.case());
        }
        outcome.is_valid()
    }

    fn aborted(stage: PipelineState, ledger: FailureLedger, data_lines: usize) -> PipelineRun {
        info!("Validation stopped after the {} stage", stage);
        PipelineRun {
            ledger,
            state: PipelineState::Aborted,
            last_stage: stage,
            data_lines,
        }
    }
}
