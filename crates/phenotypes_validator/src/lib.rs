//! # Phenotypes Validator
//!
//! Staged validation of uploaded trait files. This crate provides:
//!
//! - The built-in validators (genus, file, headers, empty cells, accepted
//!   values, duplicate trait-method-unit combinations)
//! - An explicit [`ValidatorRegistry`] mapping ids to factories
//! - The [`PipelineRunner`] driving metadata, file, header-row and data-row
//!   stages over a file
//! - The [`ResultReducer`] turning a failure ledger into a report
//!
//! ## Example
//!
//! ```rust,no_run
//! use phenotypes_core::{ImporterConfig, ValidationContext, columns};
//! use phenotypes_validator::{
//!     CancellationToken, Collaborators, PipelineRunner, ResultReducer, traits_registry,
//! };
//! # fn collaborators() -> Collaborators { unimplemented!() }
//!
//! let collaborators = collaborators();
//! let registry = traits_registry(&collaborators, &ImporterConfig::default()).unwrap();
//! let runner = PipelineRunner::new(registry, collaborators.file_reader.clone());
//!
//! let context = ValidationContext::new("Lens", "traits.tsv")
//!     .with_project(4)
//!     .with_expected_headers(columns::ALL);
//! let run = runner.run(&context, &CancellationToken::new()).unwrap();
//!
//! let report = ResultReducer::traits().reduce(&run.ledger);
//! println!("{}", report.to_json_pretty().unwrap());
//! ```

mod builtin;
mod cancel;
mod pipeline;
mod reducer;
mod registry;
mod validators;

#[cfg(test)]
mod testing;

pub use builtin::*;
pub use cancel::*;
pub use pipeline::*;
pub use reducer::*;
pub use registry::*;
pub use validators::*;
