//! Playing automatic sessions without a terminal.

use quadfall_engine::{EngineConfig, GameSession, PieceBag, PieceSeed, PlayMode};
use serde::Serialize;
use tracing::{info, warn};

use crate::controller::HeuristicController;

/// Final statistics of a headless session.
#[derive(Debug, Clone, Serialize)]
pub struct SessionSummary {
    pub seed: Option<String>,
    pub score: usize,
    pub lines: usize,
    pub level: usize,
    pub pieces: usize,
    pub line_cleared_counter: [usize; 5],
    pub game_over: bool,
    /// The last placement left the board untouched: every cell landed above
    /// row 0 while the spawn area stayed open, so the game could not progress.
    pub stalled: bool,
    /// Simulated play time at the configured placement interval.
    pub simulated_secs: f64,
}

/// Plays an automatic session until game over, a stall, or `piece_limit` locks.
///
/// A placement that writes no cell onto the board leaves the session in the
/// same state forever, so the run stops there and reports `stalled`.
///
/// Each placement advances the simulated clock by the configured interval,
/// so the summary reports the time a live automatic game would have taken.
#[must_use]
pub fn play_session(
    config: &EngineConfig,
    controller: &HeuristicController,
    seed: Option<PieceSeed>,
    piece_limit: Option<usize>,
) -> SessionSummary {
    let bag = seed.map_or_else(PieceBag::new, PieceBag::with_seed);
    let mut session = GameSession::new(bag, config.scoring_for(PlayMode::Automatic));
    let step = config.auto_move_interval();
    let mut stalled = false;

    while !session.is_game_over()
        && piece_limit.is_none_or(|limit| session.stats().completed_pieces() < limit)
    {
        session.advance_clock(step);
        // Written cells always change the board, even when they clear lines.
        let before = session.board().clone();
        if controller.place_one(&mut session).is_rejected() {
            break;
        }
        if !session.is_game_over() && *session.board() == before {
            warn!(
                pieces = session.stats().completed_pieces(),
                "placement landed entirely above the board; stopping"
            );
            stalled = true;
            break;
        }
    }

    let stats = session.stats();
    let summary = SessionSummary {
        seed: seed.map(|s| s.to_string()),
        score: stats.score(),
        lines: stats.total_cleared_lines(),
        level: stats.level(),
        pieces: stats.completed_pieces(),
        line_cleared_counter: *stats.line_cleared_counter(),
        game_over: session.is_game_over(),
        stalled,
        simulated_secs: session.elapsed().as_secs_f64(),
    };
    info!(
        score = summary.score,
        lines = summary.lines,
        pieces = summary.pieces,
        game_over = summary.game_over,
        stalled = summary.stalled,
        "headless session finished"
    );
    summary
}

/// Convenience for a controller with default weights and the configured interval.
#[must_use]
pub fn default_controller(config: &EngineConfig) -> HeuristicController {
    HeuristicController::new(crate::MoveEvaluator::default(), config.auto_move_interval())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_piece_limit() {
        let config = EngineConfig::default();
        let controller = default_controller(&config);
        let seed = PieceSeed::from_bytes([1; 16]);
        let summary = play_session(&config, &controller, Some(seed), Some(50));
        assert_eq!(summary.pieces, 50);
        assert!(!summary.game_over);
        assert!(!summary.stalled);
        assert_eq!(summary.seed.as_deref(), Some("01010101010101010101010101010101"));
        assert!((summary.simulated_secs - 50.0 * 1.08).abs() < 1e-6);
    }

    #[test]
    fn test_seeded_sessions_repeat() {
        let config = EngineConfig::default();
        let controller = default_controller(&config);
        let seed = PieceSeed::from_bytes([5; 16]);
        let a = play_session(&config, &controller, Some(seed), Some(200));
        let b = play_session(&config, &controller, Some(seed), Some(200));
        assert_eq!(a.score, b.score);
        assert_eq!(a.lines, b.lines);
        assert_eq!(a.line_cleared_counter, b.line_cleared_counter);
    }

    #[test]
    fn test_clears_lines_with_doubling_score() {
        let config = EngineConfig::default();
        let controller = default_controller(&config);
        let seed = PieceSeed::from_bytes([2; 16]);
        let summary = play_session(&config, &controller, Some(seed), Some(300));
        assert!(summary.lines > 0);
        let expected: usize = summary
            .line_cleared_counter
            .iter()
            .enumerate()
            .skip(1)
            .map(|(n, count)| count * (100 << (n - 1)))
            .sum();
        assert_eq!(summary.score, expected);
    }

    #[test]
    fn test_stops_when_placements_vanish() {
        // This sequence fills column 0 to the top after about ten thousand
        // pieces; later placements rest entirely in the spawn buffer.
        let config = EngineConfig::default();
        let controller = default_controller(&config);
        let seed = PieceSeed::from_bytes([1; 16]);
        let summary = play_session(&config, &controller, Some(seed), Some(50_000));
        assert!(summary.stalled);
        assert!(!summary.game_over);
        assert!(summary.pieces < 50_000);
    }

    #[test]
    fn test_height_seeking_weights_top_out() {
        use crate::{HeuristicWeights, LinearPlacementEvaluator, MoveEvaluator};

        // Rewarding height makes every writing placement beat a vanishing one,
        // so the stack grows into the spawn area.
        let weights = HeuristicWeights {
            lines: 0.0,
            holes: 1.0,
            aggregate_height: 1.0,
            bumpiness: 0.0,
        };
        let config = EngineConfig::default();
        let evaluator = MoveEvaluator::new(Box::new(LinearPlacementEvaluator::new(weights)));
        let controller = HeuristicController::new(evaluator, config.auto_move_interval());
        let seed = PieceSeed::from_bytes([7; 16]);
        let summary = play_session(&config, &controller, Some(seed), Some(1_000));
        assert!(summary.game_over);
        assert!(!summary.stalled);
        assert!(summary.pieces < 1_000);
    }
}
