use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::core::YearRange;
use crate::error::{DashboardError, DashboardResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PlaybackMode {
    #[default]
    Stopped,
    Playing,
}

/// Timer and step tuning for the year-range animation.
///
/// Deserialization runs [`PlaybackConfig::validate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "PlaybackConfigFields")]
pub struct PlaybackConfig {
    /// Period the host timer should use between `tick()` calls.
    pub tick_interval_ms: u64,
    /// Years added to the range's upper bound per tick.
    pub step_years: i32,
}

#[derive(Deserialize)]
struct PlaybackConfigFields {
    #[serde(default = "default_tick_interval_ms")]
    tick_interval_ms: u64,
    #[serde(default = "default_step_years")]
    step_years: i32,
}

impl TryFrom<PlaybackConfigFields> for PlaybackConfig {
    type Error = DashboardError;

    fn try_from(fields: PlaybackConfigFields) -> DashboardResult<Self> {
        Self {
            tick_interval_ms: fields.tick_interval_ms,
            step_years: fields.step_years,
        }
        .validate()
    }
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: default_tick_interval_ms(),
            step_years: default_step_years(),
        }
    }
}

impl PlaybackConfig {
    pub fn validate(self) -> DashboardResult<Self> {
        if self.tick_interval_ms == 0 {
            return Err(DashboardError::InvalidData(
                "playback tick interval must be > 0 ms".to_owned(),
            ));
        }
        if self.step_years <= 0 {
            return Err(DashboardError::InvalidData(
                "playback step must be > 0 years".to_owned(),
            ));
        }
        Ok(self)
    }
}

fn default_tick_interval_ms() -> u64 {
    10_000
}

fn default_step_years() -> i32 {
    3
}

/// What a single `tick()` did to the year range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TickOutcome {
    /// Playback is stopped; the range was not touched.
    Idle,
    Advanced(YearRange),
    /// The range reached the dataset's last year and playback stopped.
    Finished(YearRange),
}

/// Play/stop state machine driving the year-range animation.
///
/// It performs no timing: the host delivers `tick()` calls at
/// [`PlaybackState::tick_interval`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct PlaybackState {
    mode: PlaybackMode,
    config: PlaybackConfig,
    opening_frame_pending: bool,
}

impl PlaybackState {
    pub fn new(config: PlaybackConfig) -> DashboardResult<Self> {
        Ok(Self {
            mode: PlaybackMode::Stopped,
            config: config.validate()?,
            opening_frame_pending: false,
        })
    }

    #[must_use]
    pub fn mode(self) -> PlaybackMode {
        self.mode
    }

    #[must_use]
    pub fn is_playing(self) -> bool {
        self.mode == PlaybackMode::Playing
    }

    #[must_use]
    pub fn config(self) -> PlaybackConfig {
        self.config
    }

    #[must_use]
    pub fn tick_interval(self) -> Duration {
        Duration::from_millis(self.config.tick_interval_ms)
    }

    /// Starts playback. Returns `false` when already playing.
    pub fn start(&mut self) -> bool {
        if self.is_playing() {
            return false;
        }
        self.mode = PlaybackMode::Playing;
        self.opening_frame_pending = true;
        true
    }

    /// Stops playback. Returns `false` when already stopped.
    pub fn stop(&mut self) -> bool {
        if !self.is_playing() {
            return false;
        }
        self.mode = PlaybackMode::Stopped;
        self.opening_frame_pending = false;
        true
    }

    /// Advances `range` by one step.
    ///
    /// The first tick after [`Self::start`] shows the opening frame
    /// `(min, min + step)`; later ticks push `max` forward by the step. When the
    /// new upper bound reaches `dataset_max_year` it is clamped there and
    /// playback stops.
    pub fn tick(&mut self, range: &mut YearRange, dataset_max_year: i32) -> TickOutcome {
        if !self.is_playing() {
            return TickOutcome::Idle;
        }

        let base = if self.opening_frame_pending {
            range.min
        } else {
            range.max
        };
        self.opening_frame_pending = false;

        let target = base.saturating_add(self.config.step_years).max(range.min);
        if target >= dataset_max_year {
            range.max = dataset_max_year.max(range.min);
            self.mode = PlaybackMode::Stopped;
            return TickOutcome::Finished(*range);
        }

        range.max = target;
        TickOutcome::Advanced(*range)
    }
}
