//! # Phenotypes Core
//!
//! Core data structures for validating and ingesting phenotype trait files.
//!
//! An uploaded traits file goes through a staged validation pipeline before
//! any vocabulary term is written. This crate holds the types every stage
//! agrees on:
//!
//! - **Validator**: the polymorphic unit of validation work and its descriptor
//! - **ValidationContext**: per-run configuration (genus, project, headers)
//! - **FailureLedger**: what each validator recorded during a run
//! - **ValidationReport**: the fixed, user-facing summary of a run
//! - **FileReader / TermResolver**: the external collaborators
//!
//! ## Example
//!
//! ```rust
//! use phenotypes_core::{FailureLedger, RowValidationOutcome, ValidationContext, columns};
//!
//! let context = ValidationContext::new("Lens", "traits.tsv")
//!     .with_project(4)
//!     .with_expected_headers(columns::ALL);
//! assert_eq!(context.column_index(columns::UNIT), Some(4));
//!
//! let mut ledger = FailureLedger::new();
//! ledger.record("GENUS", RowValidationOutcome::pass());
//! assert!(!ledger.has_failures());
//! ```

pub mod config;
pub mod context;
pub mod error;
pub mod ledger;
pub mod record;
pub mod report;
pub mod services;
pub mod validator;

pub use config::*;
pub use context::*;
pub use error::*;
pub use ledger::*;
pub use record::*;
pub use report::*;
pub use services::*;
pub use validator::*;
