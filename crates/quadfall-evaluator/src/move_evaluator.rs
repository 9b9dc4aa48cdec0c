//! Move selection: the best placement for the current piece.
//!
//! Every stored rotation state is tried in every left offset from `-4` to
//! the board width inclusive. Offsets where the shape cannot enter the board
//! are skipped, each remaining placement is simulated and scored, and the
//! strictly highest score wins. Ties keep the first placement found in
//! rotation-major, column-minor order, so the search is deterministic.
//!
//! Only the immediate placement is considered; there is no lookahead.

use quadfall_engine::{BOARD_WIDTH, Board, PieceKind};
use tracing::trace;

use crate::{
    placement_analysis::PlacementAnalysis,
    placement_evaluator::{LinearPlacementEvaluator, PlacementEvaluator},
};

/// Leftmost column offset searched; a 4×4 box can hang off the left wall by this much.
const MIN_LEFT_COL: i32 = -4;

/// The chosen placement for one piece.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BestMove {
    pub rotation: usize,
    pub left_col: i32,
    pub score: f64,
    pub cleared_lines: usize,
}

#[derive(Debug)]
pub struct MoveEvaluator<'a> {
    placement_evaluator: Box<dyn PlacementEvaluator + 'a>,
}

impl Default for MoveEvaluator<'_> {
    fn default() -> Self {
        Self::new(Box::new(LinearPlacementEvaluator::default()))
    }
}

impl<'a> MoveEvaluator<'a> {
    #[must_use]
    pub fn new(placement_evaluator: Box<dyn PlacementEvaluator + 'a>) -> Self {
        Self {
            placement_evaluator,
        }
    }

    /// Every landing placement of `kind` on `board`, in search order.
    pub fn placements<'b>(
        board: &'b Board,
        kind: PieceKind,
    ) -> impl Iterator<Item = PlacementAnalysis> + 'b {
        #[expect(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
        let max_left_col = BOARD_WIDTH as i32;
        (0..kind.rotation_count()).flat_map(move |rotation| {
            (MIN_LEFT_COL..=max_left_col).filter_map(move |left_col| {
                PlacementAnalysis::simulate(board, kind, rotation, left_col)
            })
        })
    }

    /// Highest-scoring placement, or `None` if no placement lands.
    #[must_use]
    pub fn best_move(&self, board: &Board, kind: PieceKind) -> Option<BestMove> {
        let mut best: Option<BestMove> = None;
        for analysis in Self::placements(board, kind) {
            let score = self.placement_evaluator.evaluate_placement(&analysis);
            if best.is_none_or(|b| score > b.score) {
                best = Some(BestMove {
                    rotation: analysis.rotation(),
                    left_col: analysis.left_col(),
                    score,
                    cleared_lines: analysis.cleared_lines(),
                });
            }
        }
        trace!(piece = %kind.as_char(), ?best, "best move");
        best
    }
}
