use std::collections::BTreeMap;

use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};

use crate::core::{PriceRecord, YearRange, records_in_year_window};

use super::PriceAccumulator;

/// One bar of a race frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RaceBar {
    pub state: String,
    pub mean_price: f64,
    /// 1-based position, most expensive first.
    pub rank: usize,
}

/// Ranked state bars for one animation year.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BarRaceFrame {
    pub year: String,
    pub bars: Vec<RaceBar>,
}

/// Builds the animated bar race: one frame per year of `range` that has data
/// for any requested state.
///
/// States missing in a year are left out of that frame.
pub fn bar_race<'a, I, S>(records: I, states: &[S], range: YearRange) -> Vec<BarRaceFrame>
where
    I: IntoIterator<Item = &'a PriceRecord>,
    S: AsRef<str>,
{
    let mut frames: BTreeMap<&str, BTreeMap<&str, PriceAccumulator>> = BTreeMap::new();
    for record in records_in_year_window(records, range) {
        if !states.iter().any(|state| state.as_ref() == record.state()) {
            continue;
        }
        frames
            .entry(record.year())
            .or_default()
            .entry(record.state())
            .or_default()
            .push(record.resale_price());
    }

    frames
        .into_iter()
        .map(|(year, by_state)| {
            let mut bars: Vec<(&str, f64)> = by_state
                .into_iter()
                .filter_map(|(state, acc)| acc.mean().map(|mean| (state, mean)))
                .collect();
            bars.sort_by(|(state_a, a), (state_b, b)| {
                OrderedFloat(*b)
                    .cmp(&OrderedFloat(*a))
                    .then_with(|| state_a.cmp(state_b))
            });
            BarRaceFrame {
                year: year.to_owned(),
                bars: bars
                    .into_iter()
                    .enumerate()
                    .map(|(idx, (state, mean_price))| RaceBar {
                        state: state.to_owned(),
                        mean_price,
                        rank: idx + 1,
                    })
                    .collect(),
            }
        })
        .collect()
}
