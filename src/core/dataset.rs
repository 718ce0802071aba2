use std::collections::BTreeSet;

use chrono::NaiveDate;
use tracing::debug;

use crate::core::{DateRange, PriceRecord, RecordQuery, YearRange};
use crate::error::{DashboardError, DashboardResult};

/// Immutable, date-ordered record set with precomputed category sets.
///
/// Built once per load and shared read-only (typically behind an `Arc`) by
/// every session.
#[derive(Debug, Clone, PartialEq)]
pub struct DatasetStore {
    records: Vec<PriceRecord>,
    years: Vec<String>,
    regions: Vec<String>,
    states: Vec<String>,
    year_bounds: YearRange,
    date_bounds: DateRange,
}

impl DatasetStore {
    /// Builds a store from already-normalized records.
    ///
    /// Records are stably re-sorted by date and re-indexed. Fails on empty input.
    pub fn from_records(mut records: Vec<PriceRecord>) -> DashboardResult<Self> {
        records.sort_by_key(PriceRecord::date);
        let records: Vec<PriceRecord> = records
            .into_iter()
            .enumerate()
            .map(|(index, record)| record.with_index(index))
            .collect();

        let (Some(first), Some(last)) = (records.first(), records.last()) else {
            return Err(DashboardError::InvalidData(
                "dataset must contain at least one record".to_owned(),
            ));
        };
        let date_bounds = DateRange::new(first.date(), last.date());
        let year_bounds = YearRange::new(first.year_number(), last.year_number());

        let years = distinct(records.iter().map(PriceRecord::year));
        let regions = distinct(records.iter().map(PriceRecord::region));
        let states = distinct(records.iter().map(PriceRecord::state));

        debug!(
            record_count = records.len(),
            year_count = years.len(),
            region_count = regions.len(),
            state_count = states.len(),
            "built dataset store"
        );

        Ok(Self {
            records,
            years,
            regions,
            states,
            year_bounds,
            date_bounds,
        })
    }

    #[must_use]
    pub fn records(&self) -> &[PriceRecord] {
        &self.records
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    #[must_use]
    pub fn record(&self, index: usize) -> Option<&PriceRecord> {
        self.records.get(index)
    }

    /// Distinct years, ascending.
    #[must_use]
    pub fn years_available(&self) -> &[String] {
        &self.years
    }

    /// Distinct regions, ascending.
    #[must_use]
    pub fn regions_available(&self) -> &[String] {
        &self.regions
    }

    /// Distinct states, ascending.
    #[must_use]
    pub fn states_available(&self) -> &[String] {
        &self.states
    }

    #[must_use]
    pub fn contains_year(&self, year: &str) -> bool {
        self.years.binary_search_by(|probe| probe.as_str().cmp(year)).is_ok()
    }

    #[must_use]
    pub fn contains_region(&self, region: &str) -> bool {
        self.regions
            .binary_search_by(|probe| probe.as_str().cmp(region))
            .is_ok()
    }

    #[must_use]
    pub fn contains_state(&self, state: &str) -> bool {
        self.states
            .binary_search_by(|probe| probe.as_str().cmp(state))
            .is_ok()
    }

    /// First and last year present in the dataset.
    #[must_use]
    pub fn year_bounds(&self) -> YearRange {
        self.year_bounds
    }

    #[must_use]
    pub fn date_bounds(&self) -> DateRange {
        self.date_bounds
    }

    #[must_use]
    pub fn latest_date(&self) -> NaiveDate {
        self.date_bounds.end
    }

    /// Region a state was surveyed under (first occurrence).
    #[must_use]
    pub fn region_of_state(&self, state: &str) -> Option<&str> {
        self.records
            .iter()
            .find(|record| record.state() == state)
            .map(PriceRecord::region)
    }

    /// Returns matching records in ascending date order.
    #[must_use]
    pub fn query(&self, query: &RecordQuery) -> Vec<&PriceRecord> {
        let matched: Vec<&PriceRecord> = self
            .records
            .iter()
            .filter(|record| query.matches(record))
            .collect();
        debug!(matched = matched.len(), "dataset query");
        matched
    }
}

fn distinct<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
    values
        .collect::<BTreeSet<&str>>()
        .into_iter()
        .map(str::to_owned)
        .collect()
}
