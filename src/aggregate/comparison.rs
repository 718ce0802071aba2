use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::core::{DateRange, PriceRecord, SeriesPoint, records_in_date_window};

use super::time_series::state_series;

/// Typed outcome of a direct comparison at the latest date in range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ComparisonVerdict {
    Cheaper {
        date: NaiveDate,
        cheaper: String,
        other: String,
        /// Price gap in currency per liter (always > 0).
        difference: f64,
        /// Gap relative to the more expensive state, in percent.
        percent: f64,
    },
    Equal {
        date: NaiveDate,
        price: f64,
    },
    InsufficientData {
        date: Option<NaiveDate>,
    },
}

/// Paired series contrasting two states over a date window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DirectComparison {
    pub state_a: String,
    pub state_b: String,
    pub range: DateRange,
    pub series_a: Vec<SeriesPoint>,
    pub series_b: Vec<SeriesPoint>,
    /// `price_a - price_b` for every date present in both series.
    pub delta: Vec<SeriesPoint>,
    pub description: String,
    pub verdict: ComparisonVerdict,
}

/// Compares `state_a` against `state_b` inside `range`.
///
/// The verdict looks at the latest date either series reaches; when one of the
/// states has no sample on that date the verdict is
/// [`ComparisonVerdict::InsufficientData`] rather than a guess.
pub fn direct_comparison<'a, I>(
    records: I,
    state_a: &str,
    state_b: &str,
    range: DateRange,
) -> DirectComparison
where
    I: IntoIterator<Item = &'a PriceRecord>,
{
    let in_range = records_in_date_window(records, range);
    let series_a = state_series(in_range.iter().copied(), state_a);
    let series_b = state_series(in_range.iter().copied(), state_b);

    let prices_b: BTreeMap<NaiveDate, f64> =
        series_b.iter().map(|point| (point.date, point.price)).collect();
    let delta: Vec<SeriesPoint> = series_a
        .iter()
        .filter_map(|point| {
            prices_b
                .get(&point.date)
                .map(|price_b| SeriesPoint::new(point.date, point.price - price_b))
        })
        .collect();

    let verdict = verdict_at_latest(state_a, state_b, &series_a, &series_b);
    let description = describe(state_a, state_b, &verdict);

    DirectComparison {
        state_a: state_a.to_owned(),
        state_b: state_b.to_owned(),
        range,
        series_a,
        series_b,
        delta,
        description,
        verdict,
    }
}

fn verdict_at_latest(
    state_a: &str,
    state_b: &str,
    series_a: &[SeriesPoint],
    series_b: &[SeriesPoint],
) -> ComparisonVerdict {
    let latest_a = series_a.last();
    let latest_b = series_b.last();
    let Some(date) = latest_a.into_iter().chain(latest_b).map(|point| point.date).max() else {
        return ComparisonVerdict::InsufficientData { date: None };
    };

    let (Some(a), Some(b)) = (
        latest_a.filter(|point| point.date == date),
        latest_b.filter(|point| point.date == date),
    ) else {
        return ComparisonVerdict::InsufficientData { date: Some(date) };
    };

    if a.price == b.price {
        return ComparisonVerdict::Equal {
            date,
            price: a.price,
        };
    }

    let (cheaper, other, low, high) = if a.price < b.price {
        (state_a, state_b, a.price, b.price)
    } else {
        (state_b, state_a, b.price, a.price)
    };
    ComparisonVerdict::Cheaper {
        date,
        cheaper: cheaper.to_owned(),
        other: other.to_owned(),
        difference: high - low,
        percent: (high - low) / high * 100.0,
    }
}

fn describe(state_a: &str, state_b: &str, verdict: &ComparisonVerdict) -> String {
    match verdict {
        ComparisonVerdict::Cheaper {
            date,
            cheaper,
            other,
            difference,
            percent,
        } => format!(
            "On {}, {cheaper} was R$ {difference:.3}/L ({percent:.1}%) cheaper than {other}.",
            date.format("%d/%m/%Y")
        ),
        ComparisonVerdict::Equal { date, price } => format!(
            "On {}, {state_a} and {state_b} had the same price (R$ {price:.3}/L).",
            date.format("%d/%m/%Y")
        ),
        ComparisonVerdict::InsufficientData { date: Some(date) } => format!(
            "Insufficient data to compare {state_a} and {state_b} on {}.",
            date.format("%d/%m/%Y")
        ),
        ComparisonVerdict::InsufficientData { date: None } => format!(
            "Insufficient data to compare {state_a} and {state_b} in the selected period."
        ),
    }
}
