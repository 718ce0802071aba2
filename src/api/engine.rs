use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, trace, warn};

use crate::core::DatasetStore;
use crate::error::{DashboardResult, ValidationError};
use crate::extensions::{DashboardEvent, DashboardObserver};
use crate::interaction::{FilterChange, FilterState, PlaybackState, TickOutcome};

use super::{DashboardConfig, DashboardSnapshot, ViewTopics, topics_for_change, year_range_topics};

/// What the engine did with one timer tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TickDisposition {
    /// Dropped: the views from the previous step have not been recomputed yet.
    Coalesced,
    Applied(TickOutcome),
}

/// Session facade consumed by the host dashboard.
///
/// `DashboardEngine` owns one session's [`FilterState`] and
/// [`PlaybackState`] over a shared, immutable [`DatasetStore`]. Mutations
/// mark derived views stale; [`DashboardEngine::recompute`] rebuilds only the
/// stale ones.
pub struct DashboardEngine {
    pub(super) store: Arc<DatasetStore>,
    pub(super) config: DashboardConfig,
    pub(super) filter: FilterState,
    pub(super) playback: PlaybackState,
    pub(super) pending: ViewTopics,
    pub(super) cached: Option<DashboardSnapshot>,
    pub(super) observers: Vec<Box<dyn DashboardObserver>>,
}

impl DashboardEngine {
    pub fn new(store: Arc<DatasetStore>, config: DashboardConfig) -> DashboardResult<Self> {
        config.validate()?;
        let filter = FilterState::initial(&store, &config.filter_rules)?;
        let playback = PlaybackState::new(config.playback)?;
        debug!(
            record_count = store.len(),
            year = filter.selected_year(),
            region = filter.selected_region(),
            year_min = filter.year_range().min,
            year_max = filter.year_range().max,
            "dashboard session initialized"
        );
        Ok(Self {
            store,
            config,
            filter,
            playback,
            pending: ViewTopics::all(),
            cached: None,
            observers: Vec::new(),
        })
    }

    #[must_use]
    pub fn store(&self) -> &Arc<DatasetStore> {
        &self.store
    }

    #[must_use]
    pub fn config(&self) -> &DashboardConfig {
        &self.config
    }

    #[must_use]
    pub fn filter(&self) -> &FilterState {
        &self.filter
    }

    #[must_use]
    pub fn playback(&self) -> PlaybackState {
        self.playback
    }

    /// Period the host timer should use between [`Self::on_timer_tick`] calls.
    #[must_use]
    pub fn tick_interval(&self) -> Duration {
        self.playback.tick_interval()
    }

    #[must_use]
    pub fn has_pending_recompute(&self) -> bool {
        !self.pending.is_empty()
    }

    #[must_use]
    pub fn pending_views(&self) -> ViewTopics {
        self.pending
    }

    /// Last snapshot produced by [`Self::recompute`], if any.
    #[must_use]
    pub fn last_snapshot(&self) -> Option<&DashboardSnapshot> {
        self.cached.as_ref()
    }

    /// Validates and commits a selection change.
    ///
    /// On error the current selections are kept. A committed change that
    /// touches the year range stops playback. Returns the views it made stale.
    pub fn apply_filter(&mut self, change: FilterChange) -> Result<ViewTopics, ValidationError> {
        let invalidated = topics_for_change(&change);
        let touches_year_range = change.touches_year_range();

        let next = match self
            .filter
            .apply(change, &self.store, &self.config.filter_rules)
        {
            Ok(next) => next,
            Err(error) => {
                warn!(error = %error, "rejected selection change");
                self.emit_event(DashboardEvent::FilterRejected {
                    error: error.clone(),
                });
                return Err(error);
            }
        };

        self.filter = next;
        self.pending = self.pending.union(invalidated);
        debug!(
            invalidated_count = invalidated.iter().count(),
            pending_count = self.pending.iter().count(),
            "selection change committed"
        );

        if touches_year_range && self.playback.stop() {
            info!("year range changed by user, playback stopped");
            self.emit_event(DashboardEvent::PlaybackStopped);
        }
        self.emit_event(DashboardEvent::FilterApplied { invalidated });
        Ok(invalidated)
    }

    /// Starts playback. Returns `false` when already playing.
    pub fn play(&mut self) -> bool {
        if !self.playback.start() {
            return false;
        }
        debug!(
            step_years = self.playback.config().step_years,
            "playback started"
        );
        self.emit_event(DashboardEvent::PlaybackStarted);
        true
    }

    /// Stops playback. Returns `false` when already stopped.
    pub fn stop(&mut self) -> bool {
        if !self.playback.stop() {
            return false;
        }
        debug!("playback stopped");
        self.emit_event(DashboardEvent::PlaybackStopped);
        true
    }

    /// Handles one period of the host timer.
    ///
    /// While playing, a tick that arrives before the previous step was
    /// recomputed is coalesced and leaves the year range untouched.
    pub fn on_timer_tick(&mut self) -> TickDisposition {
        if self.playback.is_playing() && self.has_pending_recompute() {
            trace!("tick coalesced behind pending recompute");
            self.emit_event(DashboardEvent::TickCoalesced);
            return TickDisposition::Coalesced;
        }

        let dataset_max_year = self.store.year_bounds().max;
        let outcome = self
            .playback
            .tick(self.filter.year_range_mut(), dataset_max_year);

        match outcome {
            TickOutcome::Idle => {}
            TickOutcome::Advanced(year_range) => {
                self.pending = self.pending.union(year_range_topics());
                trace!(
                    year_min = year_range.min,
                    year_max = year_range.max,
                    "playback advanced"
                );
                self.emit_event(DashboardEvent::Ticked { year_range });
            }
            TickOutcome::Finished(year_range) => {
                self.pending = self.pending.union(year_range_topics());
                debug!(
                    year_min = year_range.min,
                    year_max = year_range.max,
                    "playback reached last year"
                );
                self.emit_event(DashboardEvent::Ticked { year_range });
                self.emit_event(DashboardEvent::PlaybackFinished { year_range });
            }
        }
        TickDisposition::Applied(outcome)
    }

    /// Rebuilds stale views from the committed selections and clears the
    /// pending set.
    pub fn recompute(&mut self) -> DashboardSnapshot {
        let refreshed = if self.cached.is_some() {
            self.pending
        } else {
            ViewTopics::all()
        };

        let snapshot = DashboardSnapshot::compose(
            &self.store,
            &self.filter,
            self.playback.mode(),
            self.cached.as_ref(),
            refreshed,
        );
        debug!(
            refreshed_count = refreshed.iter().count(),
            year_min = snapshot.filter.year_range().min,
            year_max = snapshot.filter.year_range().max,
            "dashboard views recomputed"
        );

        self.pending = ViewTopics::none();
        self.cached = Some(snapshot.clone());
        self.emit_event(DashboardEvent::Recomputed { refreshed });
        snapshot
    }
}
