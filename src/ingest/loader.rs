use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use tracing::{info, warn};

use crate::core::DatasetStore;
use crate::error::{DashboardError, DashboardResult};

use super::{IngestConfig, IngestReport, normalize, read_raw_rows};

/// A ready store plus the accounting of how it was built.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedDataset {
    pub store: DatasetStore,
    pub report: IngestReport,
}

/// Loads and normalizes a survey file.
///
/// The file handle lives only for the duration of parsing. Missing or
/// unreadable files and an empty normalized dataset are fatal.
pub fn load_dataset(path: impl AsRef<Path>, config: &IngestConfig) -> DashboardResult<LoadedDataset> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| DashboardError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    info!(path = %path.display(), "loading survey dataset");
    load_dataset_from_reader(BufReader::new(file), config)
}

/// Same as [`load_dataset`], reading from any UTF-8 source.
pub fn load_dataset_from_reader<R: Read>(
    reader: R,
    config: &IngestConfig,
) -> DashboardResult<LoadedDataset> {
    config.validate()?;
    let table = read_raw_rows(reader, &config.columns, config.delimiter_byte())?;
    let output = normalize(&table.rows, config);

    let mut report = output.report;
    report.rows_read += table.unreadable.len();
    for error in table.unreadable {
        report.record_error(error, config.max_row_errors);
    }
    report.row_errors.sort_by_key(|error| error.line);
    report.row_errors.truncate(config.max_row_errors);

    if output.records.is_empty() {
        return Err(DashboardError::EmptyDataset {
            product: report.product,
            rows_read: report.rows_read,
            rows_skipped: report.rows_skipped,
        });
    }
    if report.rows_skipped > 0 {
        warn!(
            rows_skipped = report.rows_skipped,
            "dataset loaded with skipped rows"
        );
    }

    let store = DatasetStore::from_records(output.records)?;
    info!(
        records = store.len(),
        years = store.years_available().len(),
        states = store.states_available().len(),
        "survey dataset ready"
    );
    Ok(LoadedDataset { store, report })
}
