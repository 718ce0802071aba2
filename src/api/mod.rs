//! Host-facing session API: the dashboard engine, its configuration, view
//! invalidation and the snapshot contract.

mod engine;
mod engine_config;
mod engine_snapshot;
mod invalidation;
mod json_contract;
mod plugin_dispatch;
mod plugin_registry;

pub use engine::{DashboardEngine, TickDisposition};
pub use engine_config::DashboardConfig;
pub use engine_snapshot::{DashboardSnapshot, SelectorOptions};
pub use invalidation::{ViewTopic, ViewTopics, topics_for_change, year_range_topics};
pub use json_contract::{DASHBOARD_SNAPSHOT_JSON_SCHEMA_V1, DashboardSnapshotJsonContractV1};
