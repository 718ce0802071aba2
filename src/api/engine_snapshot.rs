use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::aggregate::{
    BarRaceFrame, DirectComparison, Indicators, MaxMin, PriceAggregate, ViewOutcome, bar_race,
    direct_comparison, indicators, max_min_by_year, totals_by_region, totals_by_state,
    time_series,
};
use crate::core::{DatasetStore, RecordQuery, SeriesPoint, YearRange};
use crate::error::{DashboardError, DashboardResult};
use crate::interaction::{FilterState, PlaybackMode};

use super::{ViewTopic, ViewTopics};

/// Values offered by the dashboard's selectors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectorOptions {
    pub years: Vec<String>,
    pub regions: Vec<String>,
    pub states: Vec<String>,
}

/// Serializable view bundle handed to the rendering side after a recompute.
///
/// Every derived view is computed from the committed [`FilterState`] it
/// carries, so a snapshot is always internally consistent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardSnapshot {
    pub filter: FilterState,
    pub playback_mode: PlaybackMode,
    pub year_bounds: YearRange,
    pub options: SelectorOptions,
    /// Whole dataset, independent of selections.
    pub max_min: ViewOutcome<IndexMap<String, MaxMin>>,
    /// Selected year.
    pub region_bars: ViewOutcome<IndexMap<String, PriceAggregate>>,
    /// Selected region and year.
    pub state_bars: ViewOutcome<IndexMap<String, PriceAggregate>>,
    /// Comparison states inside the year range.
    pub time_series: IndexMap<String, Vec<SeriesPoint>>,
    /// `state_a` against `state_b` inside the year range.
    pub comparison: ViewOutcome<DirectComparison>,
    pub indicators_a: ViewOutcome<Indicators>,
    pub indicators_b: ViewOutcome<Indicators>,
    pub bar_race: Vec<BarRaceFrame>,
}

impl DashboardSnapshot {
    /// Builds a snapshot, reusing views of `previous` whose topic is not in `stale`.
    pub(super) fn compose(
        store: &DatasetStore,
        filter: &FilterState,
        playback_mode: PlaybackMode,
        previous: Option<&Self>,
        stale: ViewTopics,
    ) -> Self {
        let year = filter.selected_year();
        let range = filter.year_range();
        let is_stale = |topic: ViewTopic| previous.is_none() || stale.contains(topic);

        let max_min = reuse_or(previous.map(|p| &p.max_min), is_stale(ViewTopic::MaxMin), || {
            max_min_by_year(store.records())
        });

        let region_bars = reuse_or(
            previous.map(|p| &p.region_bars),
            is_stale(ViewTopic::RegionBars),
            || totals_by_region(store.query(&RecordQuery::all().with_year(year)), year),
        );

        let state_bars = reuse_or(
            previous.map(|p| &p.state_bars),
            is_stale(ViewTopic::StateBars),
            || {
                let query = RecordQuery::all()
                    .with_year(year)
                    .with_region(filter.selected_region());
                totals_by_state(store.query(&query), filter.selected_region(), year)
            },
        );

        let time_series = reuse_or(
            previous.map(|p| &p.time_series),
            is_stale(ViewTopic::TimeSeries),
            || {
                let query = RecordQuery::all()
                    .with_states(filter.comparison_states().iter().cloned())
                    .with_year_range(range);
                time_series(store.query(&query), filter.comparison_states())
            },
        );

        let comparison = reuse_or(
            previous.map(|p| &p.comparison),
            is_stale(ViewTopic::Comparison),
            || match range.to_date_range() {
                Some(dates) => ViewOutcome::Ready(direct_comparison(
                    store.query(&RecordQuery::all().with_date_range(dates)),
                    filter.state_a(),
                    filter.state_b(),
                    dates,
                )),
                None => ViewOutcome::NoData,
            },
        );

        let indicators_stale = is_stale(ViewTopic::Indicators);
        let indicators_a = reuse_or(previous.map(|p| &p.indicators_a), indicators_stale, || {
            indicators(store.query(&RecordQuery::all().with_state(filter.state_a())), year)
        });
        let indicators_b = reuse_or(previous.map(|p| &p.indicators_b), indicators_stale, || {
            indicators(store.query(&RecordQuery::all().with_state(filter.state_b())), year)
        });

        let bar_race = reuse_or(
            previous.map(|p| &p.bar_race),
            is_stale(ViewTopic::BarRace),
            || bar_race(store.records(), filter.comparison_states(), range),
        );

        Self {
            filter: filter.clone(),
            playback_mode,
            year_bounds: store.year_bounds(),
            options: SelectorOptions {
                years: store.years_available().to_vec(),
                regions: store.regions_available().to_vec(),
                states: store.states_available().to_vec(),
            },
            max_min,
            region_bars,
            state_bars,
            time_series,
            comparison,
            indicators_a,
            indicators_b,
            bar_race,
        }
    }

    /// Serializes the snapshot as pretty JSON for fixture-based regression checks.
    pub fn to_json_pretty(&self) -> DashboardResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| DashboardError::InvalidData(format!("failed to serialize snapshot: {e}")))
    }
}

fn reuse_or<T: Clone>(previous: Option<&T>, stale: bool, compute: impl FnOnce() -> T) -> T {
    match previous {
        Some(value) if !stale => value.clone(),
        _ => compute(),
    }
}
