use std::collections::BTreeMap;

use indexmap::IndexMap;
use ordered_float::OrderedFloat;

use crate::core::PriceRecord;

use super::{PriceAccumulator, PriceAggregate, ViewOutcome};

/// Mean resale price per region for `year`.
///
/// Regions without records that year get no entry. Entries are ordered by
/// ascending mean, ties by region name.
pub fn totals_by_region<'a, I>(
    records: I,
    year: &str,
) -> ViewOutcome<IndexMap<String, PriceAggregate>>
where
    I: IntoIterator<Item = &'a PriceRecord>,
{
    group_means(
        records.into_iter().filter(|record| record.year() == year),
        PriceRecord::region,
    )
}

/// Mean resale price per state of `region` for `year`, ordered like
/// [`totals_by_region`].
pub fn totals_by_state<'a, I>(
    records: I,
    region: &str,
    year: &str,
) -> ViewOutcome<IndexMap<String, PriceAggregate>>
where
    I: IntoIterator<Item = &'a PriceRecord>,
{
    group_means(
        records
            .into_iter()
            .filter(|record| record.year() == year && record.region() == region),
        PriceRecord::state,
    )
}

fn group_means<'a, I>(
    records: I,
    key: fn(&PriceRecord) -> &str,
) -> ViewOutcome<IndexMap<String, PriceAggregate>>
where
    I: Iterator<Item = &'a PriceRecord>,
{
    let mut groups: BTreeMap<&str, PriceAccumulator> = BTreeMap::new();
    for record in records {
        groups.entry(key(record)).or_default().push(record.resale_price());
    }

    let mut bars: Vec<(String, PriceAggregate)> = groups
        .into_iter()
        .filter_map(|(name, acc)| acc.finish().map(|aggregate| (name.to_owned(), aggregate)))
        .collect();
    bars.sort_by(|(name_a, a), (name_b, b)| {
        OrderedFloat(a.mean)
            .cmp(&OrderedFloat(b.mean))
            .then_with(|| name_a.cmp(name_b))
    });

    ViewOutcome::from_map(bars.into_iter().collect())
}
