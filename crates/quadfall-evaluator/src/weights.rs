//! Heuristic weights for the linear board evaluator.

use serde::{Deserialize, Serialize};

/// A weight that is NaN or infinite.
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("weight `{field}` must be finite, got {value}")]
pub struct WeightsError {
    pub field: &'static str,
    pub value: f64,
}

/// Coefficients of `lines`, `holes`, `aggregate_height` and `bumpiness`.
///
/// Defaults are the well-known greedy-player tuning; lines are rewarded and
/// the three board-shape penalties are negative.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeuristicWeights {
    pub lines: f64,
    pub holes: f64,
    pub aggregate_height: f64,
    pub bumpiness: f64,
}

impl Default for HeuristicWeights {
    fn default() -> Self {
        Self {
            lines: 0.760_666,
            holes: -0.356_63,
            aggregate_height: -0.510_066,
            bumpiness: -0.184_483,
        }
    }
}

impl HeuristicWeights {
    pub fn validate(&self) -> Result<(), WeightsError> {
        let fields = [
            ("lines", self.lines),
            ("holes", self.holes),
            ("aggregate_height", self.aggregate_height),
            ("bumpiness", self.bumpiness),
        ];
        match fields.into_iter().find(|(_, value)| !value.is_finite()) {
            Some((field, value)) => Err(WeightsError { field, value }),
            None => Ok(()),
        }
    }
}
