//! fuel-dash-rs: data core for fuel-price survey dashboards.
//!
//! The crate loads a weekly price survey, normalizes it into an immutable
//! [`core::DatasetStore`], and derives the dashboard's views from a validated
//! selection state. Rendering and the timer live in the host; the engine only
//! tells it what changed.

pub mod aggregate;
pub mod api;
pub mod core;
pub mod error;
pub mod extensions;
pub mod ingest;
pub mod interaction;
pub mod telemetry;

pub use api::{DashboardConfig, DashboardEngine, DashboardSnapshot};
pub use error::{DashboardError, DashboardResult};
