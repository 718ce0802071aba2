use serde::{Deserialize, Serialize};

use crate::error::{DashboardError, DashboardResult};

use super::{DashboardEngine, DashboardSnapshot};

pub const DASHBOARD_SNAPSHOT_JSON_SCHEMA_V1: u32 = 1;

/// Versioned envelope hosts persist or ship to a front end.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardSnapshotJsonContractV1 {
    pub schema_version: u32,
    pub snapshot: DashboardSnapshot,
}

fn contract_error(action: &str, err: &serde_json::Error) -> DashboardError {
    DashboardError::InvalidData(format!("snapshot contract {action}: {err}"))
}

impl DashboardSnapshot {
    pub fn to_json_contract_v1_pretty(&self) -> DashboardResult<String> {
        let envelope = DashboardSnapshotJsonContractV1 {
            schema_version: DASHBOARD_SNAPSHOT_JSON_SCHEMA_V1,
            snapshot: self.clone(),
        };
        serde_json::to_string_pretty(&envelope).map_err(|e| contract_error("encode", &e))
    }

    /// Accepts either a bare snapshot or a versioned v1 envelope.
    pub fn from_json_compat_str(input: &str) -> DashboardResult<Self> {
        if let Ok(snapshot) = serde_json::from_str::<DashboardSnapshot>(input) {
            return Ok(snapshot);
        }
        let envelope: DashboardSnapshotJsonContractV1 =
            serde_json::from_str(input).map_err(|e| contract_error("decode", &e))?;
        match envelope.schema_version {
            DASHBOARD_SNAPSHOT_JSON_SCHEMA_V1 => Ok(envelope.snapshot),
            other => Err(DashboardError::InvalidData(format!(
                "snapshot contract v{other} is not supported (expected v{DASHBOARD_SNAPSHOT_JSON_SCHEMA_V1})"
            ))),
        }
    }
}

impl DashboardEngine {
    /// Recomputes pending views and serializes the result as a v1 contract.
    pub fn snapshot_json_contract_v1_pretty(&mut self) -> DashboardResult<String> {
        self.recompute().to_json_contract_v1_pretty()
    }
}
