//! Built-in validators.

mod duplicate_traits;
mod empty_cell;
mod file;
mod genus;
mod headers;
mod value_in_list;

pub use duplicate_traits::{DatabaseDuplicates, DuplicateTraitsValidator};
pub use empty_cell::EmptyCellValidator;
pub use file::FileValidator;
pub use genus::GenusExistsValidator;
pub use headers::HeadersValidator;
pub use value_in_list::ValueInListValidator;
