use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::{ConfigError, PlayMode, ScoringPolicy};

/// Gravity timing: seconds per row as a function of level.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GravityConfig {
    pub base_interval_secs: f64,
    pub level_decrement_secs: f64,
    pub min_interval_secs: f64,
}

impl Default for GravityConfig {
    fn default() -> Self {
        Self {
            base_interval_secs: 0.8,
            level_decrement_secs: 0.05,
            min_interval_secs: 0.05,
        }
    }
}

impl GravityConfig {
    /// `max(min, base - (level - 1) * decrement)`.
    #[must_use]
    pub fn interval(&self, level: usize) -> Duration {
        #[expect(clippy::cast_precision_loss)]
        let steps = level.saturating_sub(1) as f64;
        let secs = (self.base_interval_secs - steps * self.level_decrement_secs)
            .max(self.min_interval_secs);
        Duration::try_from_secs_f64(secs).unwrap_or_default()
    }
}

/// Tunable engine parameters.
///
/// Every field has a default, so a partial JSON document is accepted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub gravity: GravityConfig,
    /// Seconds between automatic placements.
    pub auto_move_interval_secs: f64,
    pub manual_scoring: ScoringPolicy,
    pub automatic_scoring: ScoringPolicy,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            gravity: GravityConfig::default(),
            auto_move_interval_secs: 1.08,
            manual_scoring: ScoringPolicy::Classic,
            automatic_scoring: ScoringPolicy::Doubling,
        }
    }
}

impl EngineConfig {
    #[must_use]
    pub fn auto_move_interval(&self) -> Duration {
        Duration::try_from_secs_f64(self.auto_move_interval_secs).unwrap_or_default()
    }

    #[must_use]
    pub fn scoring_for(&self, mode: PlayMode) -> ScoringPolicy {
        match mode {
            PlayMode::Manual => self.manual_scoring,
            PlayMode::Automatic => self.automatic_scoring,
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("gravity.base_interval_secs", self.gravity.base_interval_secs),
            ("gravity.min_interval_secs", self.gravity.min_interval_secs),
            ("auto_move_interval_secs", self.auto_move_interval_secs),
        ];
        for (field, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::NonPositiveInterval { field, value });
            }
        }
        let decrement = self.gravity.level_decrement_secs;
        if !decrement.is_finite() || decrement < 0.0 {
            return Err(ConfigError::NegativeDecrement {
                field: "gravity.level_decrement_secs",
                value: decrement,
            });
        }
        Ok(())
    }
}
