//! Optional hook points for hosts embedding the dashboard engine.
//!
//! Keep observers read-only and out of the recompute path.

pub mod plugins;

pub use plugins::{DashboardContext, DashboardEvent, DashboardObserver};
