use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::core::PriceRecord;
use crate::core::primitives::{parse_price, parse_survey_date};
use crate::error::ParseError;

use super::{IngestConfig, ProductSelection, RawRow, RowError};

/// Row accounting for one normalization pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngestReport {
    /// Product the records were restricted to.
    pub product: String,
    pub rows_read: usize,
    /// Rows of other products, dropped on purpose.
    pub rows_filtered: usize,
    /// Target-product rows dropped because they failed to parse.
    pub rows_skipped: usize,
    pub rows_used: usize,
    /// Up to `max_row_errors` failures, ordered by line.
    pub row_errors: Vec<RowError>,
}

impl IngestReport {
    pub(crate) fn record_error(&mut self, error: RowError, max_row_errors: usize) {
        self.rows_skipped += 1;
        if self.row_errors.len() < max_row_errors {
            self.row_errors.push(error);
        }
    }
}

/// Normalized records (date-ordered, re-indexed) and the pass report.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizeOutput {
    pub records: Vec<PriceRecord>,
    pub report: IngestReport,
}

/// Turns raw survey rows into date-ordered price records.
///
/// Pure: the same rows and config always produce the same output. Rows of
/// other products are filtered; target rows that fail to parse are skipped
/// and counted. An empty result is returned as-is; the loader decides whether
/// that is fatal.
#[must_use]
pub fn normalize(rows: &[RawRow], config: &IngestConfig) -> NormalizeOutput {
    let product = resolve_product(rows, &config.product);
    let mut report = IngestReport {
        product: product.clone(),
        rows_read: rows.len(),
        ..IngestReport::default()
    };

    let mut records = Vec::with_capacity(rows.len());
    for row in rows {
        if !same_product(&row.product, &product) {
            report.rows_filtered += 1;
            continue;
        }
        match normalize_row(row, config) {
            Ok(record) => records.push(record),
            Err(error) => report.record_error(
                RowError {
                    line: row.line,
                    error,
                },
                config.max_row_errors,
            ),
        }
    }

    records.sort_by_key(PriceRecord::date);
    let records: Vec<PriceRecord> = records
        .into_iter()
        .enumerate()
        .map(|(index, record)| record.with_index(index))
        .collect();
    report.rows_used = records.len();

    if report.rows_skipped > 0 {
        warn!(
            rows_skipped = report.rows_skipped,
            rows_used = report.rows_used,
            "skipped malformed survey rows"
        );
    }
    debug!(
        product = %report.product,
        rows_read = report.rows_read,
        rows_filtered = report.rows_filtered,
        rows_used = report.rows_used,
        "normalized survey rows"
    );

    NormalizeOutput { records, report }
}

fn normalize_row(row: &RawRow, config: &IngestConfig) -> Result<PriceRecord, ParseError> {
    let start = parse_survey_date(
        &config.columns.period_start,
        &row.period_start,
        &config.date_formats,
    )?;
    let end = parse_survey_date(
        &config.columns.period_end,
        &row.period_end,
        &config.date_formats,
    )?;
    let price = parse_price(&row.resale_price)?;
    PriceRecord::new(start, end, row.region.as_str(), row.state.as_str(), price)
}

/// Case-folded comparison key for product names, shared by matching and voting.
fn product_key(name: &str) -> String {
    name.trim().to_uppercase()
}

fn same_product(candidate: &str, target: &str) -> bool {
    product_key(candidate) == product_key(target)
}

/// Resolves the product to keep. `MostCommon` picks the most frequent product,
/// ties broken by name.
fn resolve_product(rows: &[RawRow], selection: &ProductSelection) -> String {
    match selection {
        ProductSelection::Named(name) => name.trim().to_owned(),
        ProductSelection::MostCommon => {
            let mut counts: HashMap<String, usize> = HashMap::new();
            for row in rows {
                *counts.entry(product_key(&row.product)).or_default() += 1;
            }
            counts
                .into_iter()
                .max_by(|(name_a, count_a), (name_b, count_b)| {
                    count_a.cmp(count_b).then_with(|| name_b.cmp(name_a))
                })
                .map(|(name, _)| name)
                .unwrap_or_default()
        }
    }
}
