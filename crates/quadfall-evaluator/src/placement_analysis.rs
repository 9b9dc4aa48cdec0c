//! Board state after simulating one placement.
//!
//! A [`PlacementAnalysis`] drops a shape into a column on a copy of the board,
//! clears full rows, and records the metrics the evaluators score. The live
//! board is never touched.

use quadfall_engine::{Board, PieceKind};

#[derive(Debug, Clone)]
pub struct PlacementAnalysis {
    kind: PieceKind,
    rotation: usize,
    left_col: i32,
    top_row: i32,
    cleared_lines: usize,
    holes: usize,
    aggregate_height: usize,
    bumpiness: usize,
    board: Board,
}

impl PlacementAnalysis {
    /// Simulates `kind` in `rotation` dropped at `left_col`.
    ///
    /// Returns `None` if the rotation is not stored for this kind or if the
    /// shape cannot enter the column at all.
    #[must_use]
    pub fn simulate(
        before_placement: &Board,
        kind: PieceKind,
        rotation: usize,
        left_col: i32,
    ) -> Option<Self> {
        let shape = kind.rotation_states().get(rotation)?;
        let top_row = before_placement.drop_position(shape, left_col)?;

        let mut board = before_placement.clone();
        board.place_shape(shape, top_row, left_col, kind);
        let cleared_lines = board.clear_lines();

        Some(Self {
            kind,
            rotation,
            left_col,
            top_row,
            cleared_lines,
            holes: board.holes(),
            aggregate_height: board.aggregate_height(),
            bumpiness: board.bumpiness(),
            board,
        })
    }

    #[must_use]
    pub fn kind(&self) -> PieceKind {
        self.kind
    }

    #[must_use]
    pub fn rotation(&self) -> usize {
        self.rotation
    }

    #[must_use]
    pub fn left_col(&self) -> i32 {
        self.left_col
    }

    #[must_use]
    pub fn top_row(&self) -> i32 {
        self.top_row
    }

    #[must_use]
    pub fn cleared_lines(&self) -> usize {
        self.cleared_lines
    }

    #[must_use]
    pub fn holes(&self) -> usize {
        self.holes
    }

    #[must_use]
    pub fn aggregate_height(&self) -> usize {
        self.aggregate_height
    }

    #[must_use]
    pub fn bumpiness(&self) -> usize {
        self.bumpiness
    }

    /// Board after the placement and its line clears.
    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simulate_leaves_original_untouched() {
        let board = Board::from_ascii("IIII..IIII");
        let analysis = PlacementAnalysis::simulate(&board, PieceKind::O, 0, 3).unwrap();
        assert_eq!(analysis.cleared_lines(), 1);
        assert_eq!(analysis.top_row(), 18);
        assert_eq!(analysis.aggregate_height(), 2);
        assert_eq!(analysis.holes(), 0);
        assert_eq!(analysis.bumpiness(), 2);
        assert_eq!(board.max_height(), 1);
    }

    #[test]
    fn test_simulate_counts_holes() {
        let board = Board::from_ascii("T.........");
        // Horizontal I over column 0's block leaves three holes beneath it.
        let analysis = PlacementAnalysis::simulate(&board, PieceKind::I, 0, 0).unwrap();
        assert_eq!(analysis.top_row(), 17);
        assert_eq!(analysis.holes(), 3);
        assert_eq!(analysis.aggregate_height(), 2 * 4);
    }

    #[test]
    fn test_simulate_rejects_unstored_rotation() {
        let board = Board::new();
        assert!(PlacementAnalysis::simulate(&board, PieceKind::O, 1, 3).is_none());
        assert!(PlacementAnalysis::simulate(&board, PieceKind::I, 0, 7).is_none());
    }
}
