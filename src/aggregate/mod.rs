//! Derived views over filtered record sequences.
//!
//! Every function here is deterministic and side-effect free. Empty inputs
//! never fail: they produce [`ViewOutcome::NoData`] or an empty per-key
//! result, so callers can render a placeholder instead of a misleading zero.

pub mod bar_race;
pub mod comparison;
pub mod indicators;
pub mod max_min;
pub mod time_series;
pub mod totals;

use serde::{Deserialize, Serialize};

pub use bar_race::{BarRaceFrame, RaceBar, bar_race};
pub use comparison::{ComparisonVerdict, DirectComparison, direct_comparison};
pub use indicators::{Indicators, PercentChange, PriorYear, indicators};
pub use max_min::{MaxMin, max_min_by_year};
pub use time_series::time_series;
pub use totals::{totals_by_region, totals_by_state};

/// Result of an aggregation that may legitimately match nothing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", content = "data", rename_all = "snake_case")]
pub enum ViewOutcome<T> {
    Ready(T),
    NoData,
}

impl<T> ViewOutcome<T> {
    #[must_use]
    pub fn is_no_data(&self) -> bool {
        matches!(self, Self::NoData)
    }

    #[must_use]
    pub fn ready(&self) -> Option<&T> {
        match self {
            Self::Ready(value) => Some(value),
            Self::NoData => None,
        }
    }

    #[must_use]
    pub fn into_ready(self) -> Option<T> {
        match self {
            Self::Ready(value) => Some(value),
            Self::NoData => None,
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> ViewOutcome<U> {
        match self {
            Self::Ready(value) => ViewOutcome::Ready(f(value)),
            Self::NoData => ViewOutcome::NoData,
        }
    }
}

impl<K, V> ViewOutcome<indexmap::IndexMap<K, V>> {
    pub(crate) fn from_map(map: indexmap::IndexMap<K, V>) -> Self {
        if map.is_empty() {
            Self::NoData
        } else {
            Self::Ready(map)
        }
    }
}

/// Summary statistics of a group of resale prices. Bar charts plot `mean`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceAggregate {
    pub count: usize,
    pub sum: f64,
    pub mean: f64,
    pub min: f64,
    pub max: f64,
}

/// Running accumulator behind [`PriceAggregate`].
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct PriceAccumulator {
    count: usize,
    sum: f64,
    min: f64,
    max: f64,
}

impl PriceAccumulator {
    pub(crate) fn push(&mut self, price: f64) {
        if self.count == 0 {
            self.min = price;
            self.max = price;
        } else {
            self.min = self.min.min(price);
            self.max = self.max.max(price);
        }
        self.count += 1;
        self.sum += price;
    }

    pub(crate) fn mean(&self) -> Option<f64> {
        (self.count > 0).then(|| self.sum / self.count as f64)
    }

    pub(crate) fn finish(self) -> Option<PriceAggregate> {
        let mean = self.mean()?;
        Some(PriceAggregate {
            count: self.count,
            sum: self.sum,
            mean,
            min: self.min,
            max: self.max,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::{PriceAccumulator, ViewOutcome};

    #[test]
    fn empty_accumulator_has_no_aggregate() {
        assert!(PriceAccumulator::default().finish().is_none());
    }

    #[test]
    fn accumulator_tracks_extremes_and_mean() {
        let mut acc = PriceAccumulator::default();
        for price in [2.0, 4.0, 3.0] {
            acc.push(price);
        }
        let aggregate = acc.finish().expect("aggregate");
        assert_eq!(aggregate.count, 3);
        assert_eq!(aggregate.min, 2.0);
        assert_eq!(aggregate.max, 4.0);
        assert_eq!(aggregate.mean, 3.0);
    }

    #[test]
    fn view_outcome_serializes_with_status_tag() {
        let ready = serde_json::to_value(ViewOutcome::Ready(1)).expect("json");
        assert_eq!(ready, serde_json::json!({"status": "ready", "data": 1}));
        let empty = serde_json::to_value(ViewOutcome::<u8>::NoData).expect("json");
        assert_eq!(empty, serde_json::json!({"status": "no_data"}));
    }
}
