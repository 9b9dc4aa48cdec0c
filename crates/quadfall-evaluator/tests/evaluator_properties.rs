//! Property tests for heuristic move selection.

use proptest::prelude::*;
use quadfall_engine::{BOARD_HEIGHT, BOARD_WIDTH, Board, PieceKind};
use quadfall_evaluator::{
    HeuristicWeights, LinearPlacementEvaluator, MoveEvaluator, PlacementAnalysis,
    PlacementEvaluator,
};

fn kind_strategy() -> impl Strategy<Value = PieceKind> {
    prop::sample::select(PieceKind::ALL.to_vec())
}

/// Column heights in the lower half, rendered as a gap-free stack per column.
fn board_strategy() -> impl Strategy<Value = Board> {
    prop::collection::vec(0usize..=BOARD_HEIGHT / 2, BOARD_WIDTH).prop_map(|heights| {
        let mut art = String::new();
        for row in 0..BOARD_HEIGHT {
            let depth = BOARD_HEIGHT - row;
            let mut line: Vec<char> = heights
                .iter()
                .map(|&h| if h >= depth { 'L' } else { '.' })
                .collect();
            if line.iter().all(|&c| c == 'L') {
                line[0] = '.';
            }
            art.extend(line);
            art.push('\n');
        }
        Board::from_ascii(&art)
    })
}

proptest! {
    #[test]
    fn best_move_is_deterministic(board in board_strategy(), kind in kind_strategy()) {
        let evaluator = MoveEvaluator::default();
        prop_assert_eq!(evaluator.best_move(&board, kind), evaluator.best_move(&board, kind));
    }

    #[test]
    fn best_move_dominates_every_placement(board in board_strategy(), kind in kind_strategy()) {
        let linear = LinearPlacementEvaluator::new(HeuristicWeights::default());
        let evaluator = MoveEvaluator::new(Box::new(linear.clone()));
        let best = evaluator.best_move(&board, kind);
        let placements: Vec<PlacementAnalysis> = MoveEvaluator::placements(&board, kind).collect();
        prop_assert_eq!(best.is_some(), !placements.is_empty());
        if let Some(best) = best {
            let first_best = placements
                .iter()
                .find(|a| linear.evaluate_placement(a).to_bits() == best.score.to_bits())
                .unwrap();
            prop_assert_eq!((first_best.rotation(), first_best.left_col()), (best.rotation, best.left_col));
            for analysis in &placements {
                prop_assert!(linear.evaluate_placement(analysis) <= best.score);
            }
        }
    }

    #[test]
    fn simulation_never_mutates_input(board in board_strategy(), kind in kind_strategy(), left in -4i32..=10) {
        let before = board.clone();
        for rotation in 0..kind.rotation_count() {
            let _ = PlacementAnalysis::simulate(&board, kind, rotation, left);
        }
        prop_assert_eq!(board, before);
    }
}
