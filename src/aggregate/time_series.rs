use std::collections::BTreeMap;

use chrono::NaiveDate;
use indexmap::IndexMap;

use crate::core::{PriceRecord, SeriesPoint};

use super::PriceAccumulator;

/// One ascending `(date, price)` series per requested state, in request order.
///
/// States without matching records map to an empty series. Several records of
/// the same state on the same date collapse into their mean.
pub fn time_series<'a, I, S>(records: I, states: &[S]) -> IndexMap<String, Vec<SeriesPoint>>
where
    I: IntoIterator<Item = &'a PriceRecord>,
    S: AsRef<str>,
{
    let mut buckets: IndexMap<String, BTreeMap<NaiveDate, PriceAccumulator>> = states
        .iter()
        .map(|state| (state.as_ref().to_owned(), BTreeMap::new()))
        .collect();

    for record in records {
        if let Some(series) = buckets.get_mut(record.state()) {
            series
                .entry(record.date())
                .or_default()
                .push(record.resale_price());
        }
    }

    buckets
        .into_iter()
        .map(|(state, series)| (state, collapse_series(series)))
        .collect()
}

/// Daily-mean series for a single state.
pub(crate) fn state_series<'a, I>(records: I, state: &str) -> Vec<SeriesPoint>
where
    I: IntoIterator<Item = &'a PriceRecord>,
{
    let mut series: BTreeMap<NaiveDate, PriceAccumulator> = BTreeMap::new();
    for record in records.into_iter().filter(|record| record.state() == state) {
        series
            .entry(record.date())
            .or_default()
            .push(record.resale_price());
    }
    collapse_series(series)
}

fn collapse_series(series: BTreeMap<NaiveDate, PriceAccumulator>) -> Vec<SeriesPoint> {
    series
        .into_iter()
        .filter_map(|(date, acc)| acc.mean().map(|price| SeriesPoint::new(date, price)))
        .collect()
}
