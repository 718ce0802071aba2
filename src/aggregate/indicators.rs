use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::core::PriceRecord;

use super::{PriceAccumulator, ViewOutcome};

/// Mean price of the closest earlier year present in the data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriorYear {
    pub year: String,
    pub mean: f64,
}

/// Year-over-year change, or an explicit marker when there is no baseline.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum PercentChange {
    /// `(current - previous) / previous`, as a fraction.
    Value(f64),
    NoPriorData,
}

impl PercentChange {
    #[must_use]
    pub fn value(self) -> Option<f64> {
        match self {
            Self::Value(value) => Some(value),
            Self::NoPriorData => None,
        }
    }
}

/// Summary card values for one year.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Indicators {
    pub year: String,
    pub current: f64,
    pub previous: Option<PriorYear>,
    pub percent_change: PercentChange,
}

/// Mean price for `year` against the nearest earlier year in `records`.
///
/// The baseline is the greatest year below `year` that has records, which is
/// not necessarily `year - 1`. A zero baseline also reports
/// [`PercentChange::NoPriorData`].
pub fn indicators<'a, I>(records: I, year: &str) -> ViewOutcome<Indicators>
where
    I: IntoIterator<Item = &'a PriceRecord>,
{
    let mut by_year: BTreeMap<&str, PriceAccumulator> = BTreeMap::new();
    for record in records {
        if record.year() <= year {
            by_year
                .entry(record.year())
                .or_default()
                .push(record.resale_price());
        }
    }

    let Some(current) = by_year.get(year).and_then(PriceAccumulator::mean) else {
        return ViewOutcome::NoData;
    };

    let previous = by_year
        .range::<&str, _>(..year)
        .next_back()
        .and_then(|(prior, acc)| {
            acc.mean().map(|mean| PriorYear {
                year: (*prior).to_owned(),
                mean,
            })
        });

    let percent_change = match &previous {
        Some(prior) if prior.mean > 0.0 => {
            PercentChange::Value((current - prior.mean) / prior.mean)
        }
        _ => PercentChange::NoPriorData,
    };

    ViewOutcome::Ready(Indicators {
        year: year.to_owned(),
        current,
        previous,
        percent_change,
    })
}
