//! # Phenotypes Ingest
//!
//! Writes validated trait files into a controlled-vocabulary store.
//!
//! - [`TraitWriter`]: resolves or creates trait, method and unit terms and
//!   links them, atomically
//! - [`TraitsImporter`]: validates a traits file and imports it only when
//!   nothing failed
//! - [`InMemoryTermStore`], [`LocalFileReader`], [`InMemoryFileReader`]:
//!   reference collaborators for the command line and tests

mod files;
mod importer;
mod store;
mod writer;

pub use files::*;
pub use importer::*;
pub use store::*;
pub use writer::*;
