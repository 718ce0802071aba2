use std::collections::BTreeMap;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::core::PriceRecord;

use super::{PriceAccumulator, ViewOutcome};

/// Highest and lowest resale price observed in one year.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MaxMin {
    pub max: f64,
    pub min: f64,
}

/// One max/min pair per year across every state observed that year, years ascending.
pub fn max_min_by_year<'a, I>(records: I) -> ViewOutcome<IndexMap<String, MaxMin>>
where
    I: IntoIterator<Item = &'a PriceRecord>,
{
    let mut by_year: BTreeMap<&str, PriceAccumulator> = BTreeMap::new();
    for record in records {
        by_year
            .entry(record.year())
            .or_default()
            .push(record.resale_price());
    }

    let series = by_year
        .into_iter()
        .filter_map(|(year, acc)| {
            acc.finish().map(|aggregate| {
                (
                    year.to_owned(),
                    MaxMin {
                        max: aggregate.max,
                        min: aggregate.min,
                    },
                )
            })
        })
        .collect();
    ViewOutcome::from_map(series)
}
