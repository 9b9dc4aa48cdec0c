//! Automatic player: one evaluated placement per cooldown interval.

use std::time::Duration;

use quadfall_engine::{Controller, GameSession, PlacementOutcome};
use tracing::debug;

use crate::move_evaluator::MoveEvaluator;

/// Places a whole piece each time the cooldown elapses.
///
/// The accumulator resets to zero when it fires. If the evaluator finds no
/// placement the session ends.
#[derive(Debug)]
pub struct HeuristicController {
    evaluator: MoveEvaluator<'static>,
    interval: Duration,
    accumulated: Duration,
}

impl HeuristicController {
    #[must_use]
    pub fn new(evaluator: MoveEvaluator<'static>, interval: Duration) -> Self {
        Self {
            evaluator,
            interval,
            accumulated: Duration::ZERO,
        }
    }

    /// Chooses and applies one placement immediately.
    pub fn place_one(&self, session: &mut GameSession) -> PlacementOutcome {
        let Some(piece) = session.current_piece() else {
            return PlacementOutcome::Rejected;
        };
        let kind = piece.kind();
        match self.evaluator.best_move(session.board(), kind) {
            Some(best) => {
                debug!(
                    piece = %kind.as_char(),
                    rotation = best.rotation,
                    left_col = best.left_col,
                    score = best.score,
                    "automatic placement"
                );
                session.place_directly(best.rotation, best.left_col)
            }
            None => session.top_out(),
        }
    }
}

impl Controller for HeuristicController {
    fn update(&mut self, session: &mut GameSession, delta: Duration) {
        self.accumulated += delta;
        if self.accumulated >= self.interval {
            self.accumulated = Duration::ZERO;
            self.place_one(session);
        }
    }

    fn reset_timer(&mut self) {
        self.accumulated = Duration::ZERO;
    }
}
