use serde::{Deserialize, Serialize};

use crate::core::{DateRange, PriceRecord, YearRange};

/// Conjunctive record predicate over year, region, states and date windows.
///
/// Unset fields match everything; an empty `states` list matches no record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordQuery {
    pub year: Option<String>,
    pub region: Option<String>,
    pub states: Option<Vec<String>>,
    pub date_range: Option<DateRange>,
    pub year_range: Option<YearRange>,
}

impl RecordQuery {
    #[must_use]
    pub fn all() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_year(mut self, year: impl Into<String>) -> Self {
        self.year = Some(year.into());
        self
    }

    #[must_use]
    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = Some(region.into());
        self
    }

    #[must_use]
    pub fn with_state(self, state: impl Into<String>) -> Self {
        self.with_states([state])
    }

    #[must_use]
    pub fn with_states<I, S>(mut self, states: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.states = Some(states.into_iter().map(Into::into).collect());
        self
    }

    #[must_use]
    pub fn with_date_range(mut self, range: DateRange) -> Self {
        self.date_range = Some(range);
        self
    }

    #[must_use]
    pub fn with_year_range(mut self, range: YearRange) -> Self {
        self.year_range = Some(range.ordered());
        self
    }

    #[must_use]
    pub fn matches(&self, record: &PriceRecord) -> bool {
        if self.year.as_deref().is_some_and(|year| year != record.year()) {
            return false;
        }
        if self
            .region
            .as_deref()
            .is_some_and(|region| region != record.region())
        {
            return false;
        }
        if self
            .states
            .as_ref()
            .is_some_and(|states| !states.iter().any(|state| state == record.state()))
        {
            return false;
        }
        if self
            .date_range
            .is_some_and(|range| !range.contains(record.date()))
        {
            return false;
        }
        if self
            .year_range
            .is_some_and(|range| !range.contains(record.year_number()))
        {
            return false;
        }
        true
    }
}
