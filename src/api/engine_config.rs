use serde::{Deserialize, Serialize};

use crate::error::{DashboardError, DashboardResult};
use crate::ingest::IngestConfig;
use crate::interaction::{FilterRules, PlaybackConfig};

/// Public engine bootstrap configuration.
///
/// Serializable so hosts can keep dashboard setup next to their own settings
/// instead of inventing an ad-hoc format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct DashboardConfig {
    #[serde(default)]
    pub ingest: IngestConfig,
    #[serde(default)]
    pub playback: PlaybackConfig,
    #[serde(default)]
    pub filter_rules: FilterRules,
}

impl DashboardConfig {
    #[must_use]
    pub fn with_ingest(mut self, ingest: IngestConfig) -> Self {
        self.ingest = ingest;
        self
    }

    #[must_use]
    pub fn with_playback(mut self, playback: PlaybackConfig) -> Self {
        self.playback = playback;
        self
    }

    #[must_use]
    pub fn with_filter_rules(mut self, filter_rules: FilterRules) -> Self {
        self.filter_rules = filter_rules;
        self
    }

    pub fn validate(&self) -> DashboardResult<()> {
        self.ingest.validate()?;
        self.playback.validate()?;
        if self.filter_rules.min_comparison_states == 0 {
            return Err(DashboardError::InvalidData(
                "min_comparison_states must be >= 1".to_owned(),
            ));
        }
        Ok(())
    }

    /// Serializes config to pretty JSON for debug/config files.
    pub fn to_json_pretty(&self) -> DashboardResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| DashboardError::InvalidData(format!("failed to serialize config: {e}")))
    }

    /// Deserializes and validates config from JSON. Missing fields take their defaults.
    pub fn from_json_str(input: &str) -> DashboardResult<Self> {
        let config: Self = serde_json::from_str(input)
            .map_err(|e| DashboardError::InvalidData(format!("failed to parse config: {e}")))?;
        config.validate()?;
        Ok(config)
    }
}
