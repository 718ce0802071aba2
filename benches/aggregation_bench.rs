use chrono::{NaiveDate, TimeDelta};
use criterion::{Criterion, criterion_group, criterion_main};
use fuel_dash::aggregate::{max_min_by_year, time_series, totals_by_region};
use fuel_dash::api::{DashboardConfig, DashboardEngine};
use fuel_dash::core::{DatasetStore, PriceRecord, YearRange};
use fuel_dash::interaction::FilterChange;
use std::hint::black_box;
use std::sync::Arc;

static STATES: [(&str, &str); 6] = [
    ("SUL", "PARANA"),
    ("SUL", "RIO GRANDE DO SUL"),
    ("SUDESTE", "SAO PAULO"),
    ("SUDESTE", "RIO DE JANEIRO"),
    ("NORDESTE", "BAHIA"),
    ("NORTE", "AMAZONAS"),
];

// 18 years of weekly samples for every state.
fn weekly_store() -> DatasetStore {
    let first_sunday = NaiveDate::from_ymd_opt(2004, 5, 9).expect("valid date");
    let records: Vec<PriceRecord> = (0..(52 * 18))
        .flat_map(|week: i64| {
            let start = first_sunday + TimeDelta::weeks(week);
            let end = start + TimeDelta::days(6);
            STATES
                .iter()
                .enumerate()
                .map(move |(i, (region, state))| {
                    let price = 1.8 + week as f64 * 0.004 + i as f64 * 0.05;
                    PriceRecord::new(start, end, *region, *state, price)
                        .expect("valid generated record")
                })
        })
        .collect();
    DatasetStore::from_records(records).expect("non-empty store")
}

fn bench_max_min_by_year(c: &mut Criterion) {
    let store = weekly_store();
    c.bench_function("max_min_by_year_5k", |b| {
        b.iter(|| black_box(max_min_by_year(black_box(store.records()))))
    });
}

fn bench_totals_by_region(c: &mut Criterion) {
    let store = weekly_store();
    c.bench_function("totals_by_region_5k", |b| {
        b.iter(|| black_box(totals_by_region(black_box(store.records()), black_box("2015"))))
    });
}

fn bench_time_series(c: &mut Criterion) {
    let store = weekly_store();
    let states = ["SAO PAULO", "BAHIA", "PARANA"];
    c.bench_function("time_series_3_states_5k", |b| {
        b.iter(|| black_box(time_series(black_box(store.records()), &states)))
    });
}

fn bench_playback_recompute(c: &mut Criterion) {
    let store = Arc::new(weekly_store());
    let mut engine =
        DashboardEngine::new(store, DashboardConfig::default()).expect("engine init");
    engine.recompute();

    c.bench_function("engine_year_range_recompute_5k", |b| {
        b.iter(|| {
            engine
                .apply_filter(FilterChange::YearRange(YearRange::new(2006, 2015)))
                .expect("valid range");
            black_box(engine.recompute());
        })
    });
}

criterion_group!(
    benches,
    bench_max_min_by_year,
    bench_totals_by_region,
    bench_time_series,
    bench_playback_recompute
);
criterion_main!(benches);
