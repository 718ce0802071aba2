use serde::{Deserialize, Serialize};

use crate::api::ViewTopics;
use crate::core::YearRange;
use crate::error::ValidationError;
use crate::interaction::PlaybackMode;

/// Read-only session state passed to observer hooks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardContext {
    pub year_range: YearRange,
    pub playback_mode: PlaybackMode,
    pub pending_views: ViewTopics,
    pub record_count: usize,
}

/// Event stream exposed to observers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DashboardEvent {
    FilterApplied { invalidated: ViewTopics },
    FilterRejected { error: ValidationError },
    PlaybackStarted,
    PlaybackStopped,
    Ticked { year_range: YearRange },
    PlaybackFinished { year_range: YearRange },
    TickCoalesced,
    Recomputed { refreshed: ViewTopics },
}

/// Hook interface for host-side reactions (logging, audit, widget refresh).
///
/// Observers see events and a context snapshot but cannot mutate the session.
pub trait DashboardObserver {
    fn id(&self) -> &str;
    fn on_event(&mut self, event: &DashboardEvent, context: DashboardContext);
}
