use std::cell::RefCell;
use std::path::Path;
use std::rc::Rc;
use std::sync::Arc;

use fuel_dash::DashboardError;
use fuel_dash::api::{DashboardConfig, DashboardEngine, TickDisposition, ViewTopic, ViewTopics};
use fuel_dash::core::{DatasetStore, YearRange};
use fuel_dash::error::ValidationError;
use fuel_dash::extensions::{DashboardContext, DashboardEvent, DashboardObserver};
use fuel_dash::ingest::{IngestConfig, load_dataset};
use fuel_dash::interaction::{FilterChange, FilterRules, PlaybackMode, TickOutcome};

fn fixture_store() -> Arc<DatasetStore> {
    let loaded = load_dataset(
        Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/survey_sample.csv"),
        &IngestConfig::default(),
    )
    .expect("load fixture");
    Arc::new(loaded.store)
}

fn engine() -> DashboardEngine {
    DashboardEngine::new(fixture_store(), DashboardConfig::default()).expect("engine init")
}

struct RecordingObserver {
    id: String,
    events: Rc<RefCell<Vec<(DashboardEvent, DashboardContext)>>>,
}

impl DashboardObserver for RecordingObserver {
    fn id(&self) -> &str {
        &self.id
    }

    fn on_event(&mut self, event: &DashboardEvent, context: DashboardContext) {
        self.events.borrow_mut().push((event.clone(), context));
    }
}

fn event_kind(event: &DashboardEvent) -> &'static str {
    match event {
        DashboardEvent::FilterApplied { .. } => "applied",
        DashboardEvent::FilterRejected { .. } => "rejected",
        DashboardEvent::PlaybackStarted => "started",
        DashboardEvent::PlaybackStopped => "stopped",
        DashboardEvent::Ticked { .. } => "ticked",
        DashboardEvent::PlaybackFinished { .. } => "finished",
        DashboardEvent::TickCoalesced => "coalesced",
        DashboardEvent::Recomputed { .. } => "recomputed",
    }
}

#[test]
fn fresh_engine_has_every_view_pending() {
    let engine = engine();
    assert!(engine.has_pending_recompute());
    assert_eq!(engine.pending_views(), ViewTopics::all());
    assert!(engine.last_snapshot().is_none());
    assert_eq!(engine.playback().mode(), PlaybackMode::Stopped);
}

#[test]
fn first_recompute_builds_every_view() {
    let mut engine = engine();
    let snapshot = engine.recompute();

    assert!(!engine.has_pending_recompute());
    assert_eq!(snapshot.filter.selected_year(), "2004");
    assert_eq!(snapshot.year_bounds, YearRange::new(2004, 2021));
    assert_eq!(snapshot.options.years.len(), 4);
    assert!(snapshot.max_min.ready().is_some());
    assert!(snapshot.region_bars.ready().is_some());
    assert_eq!(
        snapshot
            .state_bars
            .ready()
            .map(|bars| bars.keys().cloned().collect::<Vec<_>>()),
        Some(vec!["SAO PAULO".to_owned(), "RIO DE JANEIRO".to_owned()])
    );
    assert_eq!(snapshot.time_series.len(), 3);
    assert!(snapshot.comparison.ready().is_some());
    assert!(snapshot.indicators_a.ready().is_some());
    assert_eq!(snapshot.bar_race.len(), 4);
}

#[test]
fn rejected_change_keeps_selection_and_pending_set() {
    let mut engine = engine();
    engine.recompute();

    let err = engine
        .apply_filter(FilterChange::Region("NOT_A_REGION".to_owned()))
        .expect_err("unknown region");
    assert!(matches!(err, ValidationError::UnknownCategory { .. }));
    assert_eq!(engine.filter().selected_region(), "SUDESTE");
    assert!(!engine.has_pending_recompute());
}

#[test]
fn region_change_only_refreshes_state_bars() {
    let mut engine = engine();
    let before = engine.recompute();

    let invalidated = engine
        .apply_filter(FilterChange::Region("SUL".to_owned()))
        .expect("known region");
    assert_eq!(invalidated, ViewTopics::from_topic(ViewTopic::StateBars));

    let after = engine.recompute();
    assert_eq!(after.region_bars, before.region_bars);
    assert_eq!(after.time_series, before.time_series);
    assert_ne!(after.state_bars, before.state_bars);
    assert_eq!(after.filter.selected_region(), "SUL");
}

#[test]
fn incremental_recompute_matches_full_rebuild() {
    let mut engine = engine();
    engine.recompute();
    engine
        .apply_filter(FilterChange::Batch(vec![
            FilterChange::Year("2021".to_owned()),
            FilterChange::YearRange(YearRange::new(2005, 2021)),
            FilterChange::StateA("SAO PAULO".to_owned()),
        ]))
        .expect("valid batch");
    let incremental = engine.recompute();

    let mut fresh = DashboardEngine::new(Arc::clone(engine.store()), DashboardConfig::default())
        .expect("engine init");
    fresh
        .apply_filter(FilterChange::Batch(vec![
            FilterChange::Year("2021".to_owned()),
            FilterChange::YearRange(YearRange::new(2005, 2021)),
            FilterChange::StateA("SAO PAULO".to_owned()),
        ]))
        .expect("valid batch");
    assert_eq!(fresh.recompute(), incremental);
}

#[test]
fn ticks_are_coalesced_until_recompute() {
    let mut engine = engine();
    engine.recompute();
    assert!(engine.play());

    assert_eq!(
        engine.on_timer_tick(),
        TickDisposition::Applied(TickOutcome::Advanced(YearRange::new(2004, 2007)))
    );
    assert_eq!(engine.on_timer_tick(), TickDisposition::Coalesced);
    assert_eq!(engine.filter().year_range(), YearRange::new(2004, 2007));

    engine.recompute();
    assert_eq!(
        engine.on_timer_tick(),
        TickDisposition::Applied(TickOutcome::Advanced(YearRange::new(2004, 2010)))
    );
}

#[test]
fn playback_runs_to_completion_through_engine() {
    let mut engine = engine();
    engine.recompute();
    engine.play();

    let mut last = None;
    for _ in 0..6 {
        last = Some(engine.on_timer_tick());
        engine.recompute();
    }
    assert_eq!(
        last,
        Some(TickDisposition::Applied(TickOutcome::Finished(YearRange::new(
            2004, 2021
        ))))
    );
    assert_eq!(engine.playback().mode(), PlaybackMode::Stopped);
    assert_eq!(
        engine.on_timer_tick(),
        TickDisposition::Applied(TickOutcome::Idle)
    );
}

#[test]
fn user_range_change_stops_playback() {
    let mut engine = engine();
    engine.recompute();
    engine.play();
    engine.on_timer_tick();

    engine
        .apply_filter(FilterChange::YearRange(YearRange::new(2005, 2007)))
        .expect("valid range");
    assert_eq!(engine.playback().mode(), PlaybackMode::Stopped);
    assert_eq!(engine.filter().year_range(), YearRange::new(2005, 2007));
}

#[test]
fn non_range_change_keeps_playing() {
    let mut engine = engine();
    engine.recompute();
    engine.play();
    engine
        .apply_filter(FilterChange::Year("2005".to_owned()))
        .expect("known year");
    assert!(engine.playback().is_playing());
}

#[test]
fn observers_see_events_in_order() {
    let mut engine = engine();
    let events = Rc::new(RefCell::new(Vec::new()));
    engine
        .register_observer(Box::new(RecordingObserver {
            id: "recorder".to_owned(),
            events: Rc::clone(&events),
        }))
        .expect("register observer");

    engine.recompute();
    engine.play();
    engine.on_timer_tick();
    engine.on_timer_tick();
    let _ = engine.apply_filter(FilterChange::StateA("ATLANTIS".to_owned()));
    engine
        .apply_filter(FilterChange::YearRange(YearRange::new(2004, 2005)))
        .expect("valid range");

    let kinds: Vec<&str> = events.borrow().iter().map(|(e, _)| event_kind(e)).collect();
    assert_eq!(
        kinds,
        vec![
            "recomputed",
            "started",
            "ticked",
            "coalesced",
            "rejected",
            "stopped",
            "applied",
        ]
    );

    let recorded = events.borrow();
    let (_, tick_context) = &recorded[2];
    assert_eq!(tick_context.year_range, YearRange::new(2004, 2007));
    assert_eq!(tick_context.playback_mode, PlaybackMode::Playing);
    assert_eq!(tick_context.record_count, 18);
}

#[test]
fn observer_ids_must_be_unique_and_non_empty() {
    let mut engine = engine();
    let events = Rc::new(RefCell::new(Vec::new()));
    let observer = |id: &str| {
        Box::new(RecordingObserver {
            id: id.to_owned(),
            events: Rc::clone(&events),
        })
    };

    engine.register_observer(observer("a")).expect("first");
    assert!(matches!(
        engine.register_observer(observer("a")),
        Err(DashboardError::InvalidData(_))
    ));
    assert!(engine.register_observer(observer("")).is_err());
    assert_eq!(engine.observer_count(), 1);

    assert!(engine.unregister_observer("a"));
    assert!(!engine.unregister_observer("a"));
    assert!(!engine.has_observer("a"));
}

#[test]
fn invalid_config_is_rejected_at_construction() {
    let config = DashboardConfig::from_json_str(r#"{ "playback": { "tick_interval_ms": 0 } }"#);
    assert!(config.is_err());
}

#[test]
fn configured_comparison_minimum_shapes_initial_selection() {
    let rules = FilterRules {
        min_comparison_states: 4,
        ..FilterRules::default()
    };
    let config = DashboardConfig::default().with_filter_rules(rules);
    let mut engine = DashboardEngine::new(fixture_store(), config).expect("engine init");

    let initial = engine.filter().comparison_states().to_vec();
    assert_eq!(
        initial,
        ["BAHIA", "RIO DE JANEIRO", "RIO GRANDE DO SUL", "PARANA"]
    );
    engine
        .apply_filter(FilterChange::ComparisonStates(initial))
        .expect("initial selection is valid");
}
