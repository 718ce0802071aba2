use std::path::Path;

use approx::assert_relative_eq;
use fuel_dash::aggregate::{PercentChange, indicators};
use fuel_dash::core::{DatasetStore, RecordQuery};
use fuel_dash::ingest::{IngestConfig, load_dataset};

fn fixture_store() -> DatasetStore {
    load_dataset(
        Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/survey_sample.csv"),
        &IngestConfig::default(),
    )
    .expect("load fixture")
    .store
}

#[test]
fn baseline_is_nearest_earlier_year_with_data() {
    let store = fixture_store();
    let bahia = store.query(&RecordQuery::all().with_state("BAHIA"));
    let summary = indicators(bahia, "2021").into_ready().expect("BAHIA 2021");

    assert_relative_eq!(summary.current, 5.80);
    let previous = summary.previous.expect("earlier BAHIA year");
    // BAHIA has no 2007 sample
    assert_eq!(previous.year, "2005");
    assert_relative_eq!(previous.mean, 2.40);
    let change = summary.percent_change.value().expect("baseline exists");
    assert_relative_eq!(change, (5.80 - 2.40) / 2.40, epsilon = 1e-12);
}

#[test]
fn first_year_reports_no_prior_data() {
    let store = fixture_store();
    let summary = indicators(store.records(), "2004")
        .into_ready()
        .expect("2004 has data");

    assert!(summary.previous.is_none());
    assert_eq!(summary.percent_change, PercentChange::NoPriorData);
    assert!(summary.current.is_finite());
}

#[test]
fn year_without_records_is_no_data() {
    let store = fixture_store();
    assert!(indicators(store.records(), "2006").is_no_data());
}

#[test]
fn current_value_is_the_year_mean() {
    let store = fixture_store();
    let summary = indicators(store.records(), "2007")
        .into_ready()
        .expect("2007 has data");

    assert_relative_eq!(summary.current, (2.40 + 2.50 + 2.45 + 2.45) / 4.0, epsilon = 1e-12);
    assert_eq!(summary.previous.map(|p| p.year).as_deref(), Some("2005"));
}

#[test]
fn percent_change_serializes_with_explicit_marker() {
    let json = serde_json::to_string(&PercentChange::NoPriorData).expect("serialize");
    assert_eq!(json, r#"{"kind":"no_prior_data"}"#);
}
