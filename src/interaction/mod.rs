//! Session state mutated by input widgets: selections and playback.

pub mod filter;
pub mod playback;

pub use filter::{FilterChange, FilterRules, FilterState, RangeOrderPolicy};
pub use playback::{PlaybackConfig, PlaybackMode, PlaybackState, TickOutcome};
