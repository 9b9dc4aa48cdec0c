//! Placement evaluation: scoring one simulated placement.
//!
//! The default [`LinearPlacementEvaluator`] is a weighted sum of four board
//! metrics:
//!
//! ```text
//! score = w_lines·lines + w_holes·holes + w_height·aggregate_height + w_bumpy·bumpiness
//! ```
//!
//! Higher is better. Other evaluators can be plugged into
//! [`MoveEvaluator`](crate::MoveEvaluator) through the [`PlacementEvaluator`] trait.

use std::fmt;

use crate::{placement_analysis::PlacementAnalysis, weights::HeuristicWeights};

/// Evaluates piece placements by assigning scores.
pub trait PlacementEvaluator: fmt::Debug + Send + Sync {
    /// Evaluates a placement and returns a score (higher is better).
    fn evaluate_placement(&self, analysis: &PlacementAnalysis) -> f64;
}

/// Weighted sum of lines cleared, holes, aggregate height and bumpiness.
#[derive(Debug, Clone, Default)]
pub struct LinearPlacementEvaluator {
    weights: HeuristicWeights,
}

impl LinearPlacementEvaluator {
    #[must_use]
    pub fn new(weights: HeuristicWeights) -> Self {
        Self { weights }
    }

    #[must_use]
    pub fn weights(&self) -> &HeuristicWeights {
        &self.weights
    }
}

impl PlacementEvaluator for LinearPlacementEvaluator {
    #[inline]
    #[expect(clippy::cast_precision_loss)]
    fn evaluate_placement(&self, analysis: &PlacementAnalysis) -> f64 {
        let w = &self.weights;
        w.lines * analysis.cleared_lines() as f64
            + w.holes * analysis.holes() as f64
            + w.aggregate_height * analysis.aggregate_height() as f64
            + w.bumpiness * analysis.bumpiness() as f64
    }
}

#[cfg(test)]
mod tests {
    use quadfall_engine::{Board, PieceKind};

    use super::*;

    #[test]
    fn test_linear_score() {
        let board = Board::from_ascii("IIII..IIII");
        let analysis = PlacementAnalysis::simulate(&board, PieceKind::O, 0, 3).unwrap();
        let weights = HeuristicWeights {
            lines: 10.0,
            holes: -1.0,
            aggregate_height: -0.5,
            bumpiness: -0.25,
        };
        let score = LinearPlacementEvaluator::new(weights).evaluate_placement(&analysis);
        // 1 line, 0 holes, height 2, bumpiness 2.
        assert!((score - (10.0 - 1.0 - 0.5)).abs() < 1e-9);
    }

    #[test]
    fn test_clearing_beats_stacking() {
        let board = Board::from_ascii("IIII..IIII");
        let evaluator = LinearPlacementEvaluator::default();
        let clear = PlacementAnalysis::simulate(&board, PieceKind::O, 0, 3).unwrap();
        let stack = PlacementAnalysis::simulate(&board, PieceKind::O, 0, -1).unwrap();
        assert!(evaluator.evaluate_placement(&clear) > evaluator.evaluate_placement(&stack));
    }
}
