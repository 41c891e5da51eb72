//! Trait records parsed from data rows.

use crate::{PhenotypesError, Result, ValidationContext};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Column headers of a traits file, in the order they must appear.
pub mod columns {
    /// Name of the measured trait
    pub const TRAIT_NAME: &str = "Trait Name";
    /// Free text description of the trait
    pub const TRAIT_DESCRIPTION: &str = "Trait Description";
    /// Short name of the collection method
    pub const METHOD_SHORT_NAME: &str = "Method Short Name";
    /// Free text description of the collection method
    pub const COLLECTION_METHOD: &str = "Collection Method";
    /// Unit of measurement
    pub const UNIT: &str = "Unit";
    /// Qualitative or Quantitative
    pub const TYPE: &str = "Type";

    /// All headers in file order.
    pub const ALL: [&str; 6] = [
        TRAIT_NAME,
        TRAIT_DESCRIPTION,
        METHOD_SHORT_NAME,
        COLLECTION_METHOD,
        UNIT,
        TYPE,
    ];
}

/// Kind of value a unit measures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DataType {
    /// Categorical observations
    Qualitative,
    /// Numeric observations
    Quantitative,
}

impl DataType {
    /// Accepted spellings, as they appear in files.
    pub const NAMES: [&'static str; 2] = ["Qualitative", "Quantitative"];

    /// Canonical name.
    pub fn as_str(&self) -> &'static str {
        match self {
            DataType::Qualitative => "Qualitative",
            DataType::Quantitative => "Quantitative",
        }
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DataType {
    type Err = PhenotypesError;

    fn from_str(value: &str) -> Result<Self> {
        match value.trim().to_lowercase().as_str() {
            "qualitative" => Ok(DataType::Qualitative),
            "quantitative" => Ok(DataType::Quantitative),
            other => Err(PhenotypesError::InvalidRow(format!(
                "'{other}' is not one of {}",
                DataType::NAMES.join(", ")
            ))),
        }
    }
}

/// One trait, its collection method and unit, as described by a data row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraitRecord {
    pub name: String,
    pub description: String,
    pub method_short_name: String,
    pub collection_method_description: String,
    pub unit_name: String,
    pub data_type: DataType,
}

impl TraitRecord {
    /// Builds a record from a split data row, locating cells through the
    /// context's column index map.
    pub fn from_row(cells: &[String], context: &ValidationContext) -> Result<Self> {
        let cell = |header: &str| -> Result<String> {
            let index = context.column_index(header).ok_or_else(|| {
                PhenotypesError::Configuration(format!("no column index for '{header}'"))
            })?;
            cells
                .get(index)
                .map(|value| value.trim().to_string())
                .ok_or_else(|| {
                    PhenotypesError::InvalidRow(format!("missing column {index} ({header})"))
                })
        };

        Ok(Self {
            name: cell(columns::TRAIT_NAME)?,
            description: cell(columns::TRAIT_DESCRIPTION)?,
            method_short_name: cell(columns::METHOD_SHORT_NAME)?,
            collection_method_description: cell(columns::COLLECTION_METHOD)?,
            unit_name: cell(columns::UNIT)?,
            data_type: cell(columns::TYPE)?.parse()?,
        })
    }
}
