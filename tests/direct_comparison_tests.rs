use std::path::Path;

use approx::assert_relative_eq;
use chrono::NaiveDate;
use fuel_dash::aggregate::{ComparisonVerdict, direct_comparison};
use fuel_dash::core::{DatasetStore, DateRange, PriceRecord};
use fuel_dash::ingest::{IngestConfig, load_dataset};

fn fixture_store() -> DatasetStore {
    load_dataset(
        Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/survey_sample.csv"),
        &IngestConfig::default(),
    )
    .expect("load fixture")
    .store
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

fn year_2021() -> DateRange {
    DateRange::new(date(2021, 1, 1), date(2021, 12, 31))
}

#[test]
fn delta_is_a_minus_b_on_shared_dates() {
    let store = fixture_store();
    let comparison = direct_comparison(store.records(), "SAO PAULO", "RIO DE JANEIRO", year_2021());

    assert_eq!(comparison.series_a.len(), 2);
    assert_eq!(comparison.series_b.len(), 2);
    assert_eq!(comparison.delta.len(), 2);
    for ((a, b), d) in comparison
        .series_a
        .iter()
        .zip(&comparison.series_b)
        .zip(&comparison.delta)
    {
        assert_eq!(a.date, d.date);
        assert_relative_eq!(d.price, a.price - b.price);
    }
}

#[test]
fn swapping_states_negates_delta() {
    let store = fixture_store();
    let forward = direct_comparison(store.records(), "SAO PAULO", "RIO DE JANEIRO", year_2021());
    let backward = direct_comparison(store.records(), "RIO DE JANEIRO", "SAO PAULO", year_2021());

    assert_eq!(forward.delta.len(), backward.delta.len());
    for (f, b) in forward.delta.iter().zip(&backward.delta) {
        assert_eq!(f.date, b.date);
        assert_relative_eq!(f.price, -b.price);
    }
}

#[test]
fn verdict_names_the_cheaper_state_at_latest_date() {
    let store = fixture_store();
    let comparison = direct_comparison(store.records(), "RIO DE JANEIRO", "SAO PAULO", year_2021());

    match &comparison.verdict {
        ComparisonVerdict::Cheaper {
            date: at,
            cheaper,
            other,
            difference,
            percent,
        } => {
            assert_eq!(*at, date(2021, 5, 12));
            assert_eq!(cheaper, "SAO PAULO");
            assert_eq!(other, "RIO DE JANEIRO");
            assert_relative_eq!(*difference, 0.5, epsilon = 1e-9);
            assert_relative_eq!(*percent, 0.5 / 6.1 * 100.0, epsilon = 1e-9);
        }
        other => panic!("unexpected verdict: {other:?}"),
    }
    assert!(comparison.description.starts_with("On 12/05/2021, SAO PAULO was R$ 0.500/L"));
    assert!(comparison.description.ends_with("cheaper than RIO DE JANEIRO."));
}

#[test]
fn missing_sample_on_latest_date_is_insufficient_data() {
    let store = fixture_store();
    let comparison = direct_comparison(store.records(), "BAHIA", "SAO PAULO", year_2021());

    assert_eq!(
        comparison.verdict,
        ComparisonVerdict::InsufficientData {
            date: Some(date(2021, 5, 12))
        }
    );
    assert_eq!(comparison.delta.len(), 1);
}

#[test]
fn window_without_data_has_empty_series() {
    let store = fixture_store();
    let range = DateRange::new(date(2010, 1, 1), date(2015, 12, 31));
    let comparison = direct_comparison(store.records(), "BAHIA", "SAO PAULO", range);

    assert!(comparison.series_a.is_empty());
    assert!(comparison.delta.is_empty());
    assert_eq!(
        comparison.verdict,
        ComparisonVerdict::InsufficientData { date: None }
    );
}

#[test]
fn same_state_is_equal_with_zero_delta() {
    let store = fixture_store();
    let comparison = direct_comparison(store.records(), "PARANA", "PARANA", year_2021());

    assert!(comparison.delta.iter().all(|p| p.price == 0.0));
    assert!(matches!(
        comparison.verdict,
        ComparisonVerdict::Equal { .. }
    ));
}

#[test]
fn equal_prices_are_reported_as_equal() {
    let start = date(2007, 5, 6);
    let end = date(2007, 5, 12);
    let records = vec![
        PriceRecord::new(start, end, "SUL", "PARANA", 2.45).expect("record"),
        PriceRecord::new(start, end, "SUL", "RIO GRANDE DO SUL", 2.45).expect("record"),
    ];
    let range = DateRange::new(date(2007, 1, 1), date(2007, 12, 31));
    let comparison = direct_comparison(&records, "PARANA", "RIO GRANDE DO SUL", range);

    assert_eq!(
        comparison.verdict,
        ComparisonVerdict::Equal {
            date: date(2007, 5, 9),
            price: 2.45
        }
    );
    assert!(comparison.description.contains("had the same price"));
}
