use crate::core::{DateRange, PriceRecord, YearRange};

/// Returns records whose representative date falls inside an inclusive date window.
#[must_use]
pub fn records_in_date_window<'a, I>(records: I, window: DateRange) -> Vec<&'a PriceRecord>
where
    I: IntoIterator<Item = &'a PriceRecord>,
{
    records
        .into_iter()
        .filter(|record| window.contains(record.date()))
        .collect()
}

/// Returns records whose year falls inside an inclusive year window.
///
/// Swapped bounds are treated as the ordered window.
#[must_use]
pub fn records_in_year_window<'a, I>(records: I, window: YearRange) -> Vec<&'a PriceRecord>
where
    I: IntoIterator<Item = &'a PriceRecord>,
{
    let window = window.ordered();
    records
        .into_iter()
        .filter(|record| window.contains(record.year_number()))
        .collect()
}
