use std::collections::HashMap;
use std::io::Read;

use csv::StringRecord;
use serde::{Deserialize, Serialize};

use crate::error::{DashboardError, DashboardResult, ParseError};

/// Source header names for the fields the data model keeps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnMapping {
    #[serde(default = "default_period_start")]
    pub period_start: String,
    #[serde(default = "default_period_end")]
    pub period_end: String,
    #[serde(default = "default_product")]
    pub product: String,
    #[serde(default = "default_region")]
    pub region: String,
    #[serde(default = "default_state")]
    pub state: String,
    #[serde(default = "default_resale_price")]
    pub resale_price: String,
}

impl Default for ColumnMapping {
    fn default() -> Self {
        Self {
            period_start: default_period_start(),
            period_end: default_period_end(),
            product: default_product(),
            region: default_region(),
            state: default_state(),
            resale_price: default_resale_price(),
        }
    }
}

fn default_period_start() -> String {
    "DATA INICIAL".to_owned()
}

fn default_period_end() -> String {
    "DATA FINAL".to_owned()
}

fn default_product() -> String {
    "PRODUTO".to_owned()
}

fn default_region() -> String {
    "REGIÃO".to_owned()
}

fn default_state() -> String {
    "ESTADO".to_owned()
}

fn default_resale_price() -> String {
    "PREÇO MÉDIO REVENDA".to_owned()
}

/// One input row reduced to the columns normalization needs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawRow {
    /// 1-based line in the source file (header is line 1).
    pub line: usize,
    pub period_start: String,
    pub period_end: String,
    pub product: String,
    pub region: String,
    pub state: String,
    pub resale_price: String,
}

/// A row that could not be turned into a record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowError {
    pub line: usize,
    pub error: ParseError,
}

#[derive(Debug, Clone, Copy)]
struct ColumnIndices {
    period_start: usize,
    period_end: usize,
    product: usize,
    region: usize,
    state: usize,
    resale_price: usize,
}

/// Rows read from a source, plus the rows the reader itself could not decode.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawTable {
    pub rows: Vec<RawRow>,
    pub unreadable: Vec<RowError>,
}

/// Reads every row of a delimited UTF-8 source.
///
/// Missing required headers are fatal; malformed individual rows are reported
/// in [`RawTable::unreadable`].
pub fn read_raw_rows<R: Read>(
    mut reader: R,
    mapping: &ColumnMapping,
    delimiter: u8,
) -> DashboardResult<RawTable> {
    let mut source = Vec::new();
    reader.read_to_end(&mut source).map_err(csv::Error::from)?;
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(source.as_slice());

    let headers = reader.headers()?.clone();
    let indices = resolve_columns(&headers, mapping)?;

    let mut table = RawTable::default();
    for (ordinal, result) in reader.records().enumerate() {
        // header is line 1; only used when the reader reports no position
        let fallback = ordinal + 2;
        let record = match result {
            Ok(record) => record,
            Err(err) => {
                table.unreadable.push(RowError {
                    line: err
                        .position()
                        .and_then(|position| record_start_line(&source, position))
                        .unwrap_or(fallback),
                    error: ParseError::MissingField(format!("unreadable row: {err}")),
                });
                continue;
            }
        };
        let line = record
            .position()
            .and_then(|position| record_start_line(&source, position))
            .unwrap_or(fallback);
        match extract_row(&record, indices, mapping, line) {
            Ok(row) => table.rows.push(row),
            Err(error) => table.unreadable.push(RowError { line, error }),
        }
    }
    Ok(table)
}

/// File line a record starts on.
///
/// The reader stamps each record with its position before skipping blank
/// lines, so the line terminators after that offset are counted in.
fn record_start_line(source: &[u8], position: &csv::Position) -> Option<usize> {
    let offset = usize::try_from(position.byte()).ok()?;
    let skipped = source
        .get(offset..)?
        .iter()
        .take_while(|byte| matches!(byte, b'\r' | b'\n'))
        .filter(|byte| **byte == b'\n')
        .count();
    usize::try_from(position.line()).ok().map(|line| line + skipped)
}

fn resolve_columns(headers: &StringRecord, mapping: &ColumnMapping) -> DashboardResult<ColumnIndices> {
    let header_map: HashMap<String, usize> = headers
        .iter()
        .enumerate()
        .map(|(idx, name)| (normalize_header_name(name), idx))
        .collect();

    let find = |name: &str| {
        header_map
            .get(&normalize_header_name(name))
            .copied()
            .ok_or_else(|| DashboardError::MissingColumn(name.to_owned()))
    };

    Ok(ColumnIndices {
        period_start: find(&mapping.period_start)?,
        period_end: find(&mapping.period_end)?,
        product: find(&mapping.product)?,
        region: find(&mapping.region)?,
        state: find(&mapping.state)?,
        resale_price: find(&mapping.resale_price)?,
    })
}

/// Header comparison key: trimmed, BOM-stripped, uppercased.
pub(crate) fn normalize_header_name(name: &str) -> String {
    name.trim().trim_start_matches('\u{feff}').trim().to_uppercase()
}

fn extract_row(
    record: &StringRecord,
    indices: ColumnIndices,
    mapping: &ColumnMapping,
    line: usize,
) -> Result<RawRow, ParseError> {
    let field = |idx: usize, name: &str| {
        record
            .get(idx)
            .map(str::to_owned)
            .ok_or_else(|| ParseError::MissingField(name.to_owned()))
    };

    Ok(RawRow {
        line,
        period_start: field(indices.period_start, &mapping.period_start)?,
        period_end: field(indices.period_end, &mapping.period_end)?,
        product: field(indices.product, &mapping.product)?,
        region: field(indices.region, &mapping.region)?,
        state: field(indices.state, &mapping.state)?,
        resale_price: field(indices.resale_price, &mapping.resale_price)?,
    })
}
