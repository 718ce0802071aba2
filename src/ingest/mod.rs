//! Survey ingestion: reading the raw table, normalizing it into
//! [`PriceRecord`](crate::core::PriceRecord)s and building the
//! [`DatasetStore`](crate::core::DatasetStore).

pub mod loader;
pub mod normalize;
pub mod raw;

use serde::{Deserialize, Serialize};

use crate::core::primitives::DEFAULT_DATE_FORMATS;
use crate::error::{DashboardError, DashboardResult};

pub use loader::{LoadedDataset, load_dataset, load_dataset_from_reader};
pub use normalize::{IngestReport, NormalizeOutput, normalize};
pub use raw::{ColumnMapping, RawRow, RawTable, RowError, read_raw_rows};

/// Product kept in the normalized dataset in the reference survey.
pub const DEFAULT_TARGET_PRODUCT: &str = "GASOLINA COMUM";

/// Which product's rows survive normalization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProductSelection {
    Named(String),
    /// The product with the most rows in the input.
    MostCommon,
}

impl Default for ProductSelection {
    fn default() -> Self {
        Self::Named(DEFAULT_TARGET_PRODUCT.to_owned())
    }
}

/// Ingest configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngestConfig {
    #[serde(default)]
    pub product: ProductSelection,
    #[serde(default)]
    pub columns: ColumnMapping,
    #[serde(default = "default_date_formats")]
    pub date_formats: Vec<String>,
    #[serde(default = "default_delimiter")]
    pub delimiter: char,
    #[serde(default = "default_max_row_errors")]
    pub max_row_errors: usize,
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            product: ProductSelection::default(),
            columns: ColumnMapping::default(),
            date_formats: default_date_formats(),
            delimiter: default_delimiter(),
            max_row_errors: default_max_row_errors(),
        }
    }
}

impl IngestConfig {
    #[must_use]
    pub fn with_product(mut self, product: ProductSelection) -> Self {
        self.product = product;
        self
    }

    #[must_use]
    pub fn with_columns(mut self, columns: ColumnMapping) -> Self {
        self.columns = columns;
        self
    }

    #[must_use]
    pub fn with_delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = delimiter;
        self
    }

    #[must_use]
    pub fn with_max_row_errors(mut self, max_row_errors: usize) -> Self {
        self.max_row_errors = max_row_errors;
        self
    }

    pub fn validate(&self) -> DashboardResult<()> {
        if !self.delimiter.is_ascii() {
            return Err(DashboardError::InvalidData(
                "ingest delimiter must be a single ASCII character".to_owned(),
            ));
        }
        if self.date_formats.is_empty() {
            return Err(DashboardError::InvalidData(
                "ingest needs at least one date format".to_owned(),
            ));
        }
        if let ProductSelection::Named(name) = &self.product {
            if name.trim().is_empty() {
                return Err(DashboardError::InvalidData(
                    "target product must not be empty".to_owned(),
                ));
            }
        }
        Ok(())
    }

    pub(crate) fn delimiter_byte(&self) -> u8 {
        u8::try_from(self.delimiter).unwrap_or(b',')
    }
}

fn default_date_formats() -> Vec<String> {
    DEFAULT_DATE_FORMATS.iter().map(|f| (*f).to_owned()).collect()
}

fn default_delimiter() -> char {
    ','
}

fn default_max_row_errors() -> usize {
    100
}
