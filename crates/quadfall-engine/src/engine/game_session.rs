use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::core::{
    board::Board,
    piece::{Piece, PieceKind, PiecePosition},
};

use super::{GameStats, PieceBag, ScoringPolicy};

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum SessionState {
    Playing,
    Paused,
    GameOver,
}

/// Who drives the falling piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, derive_more::IsVariant)]
#[serde(rename_all = "snake_case")]
pub enum PlayMode {
    Manual,
    Automatic,
}

/// Result of a command that moves or rotates the falling piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum MoveOutcome {
    Applied,
    Rejected,
}

/// Result of a command that locks a piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum PlacementOutcome {
    /// Piece locked; holds the number of lines it cleared.
    Applied { cleared_lines: usize },
    /// The session is not playing or the placement is invalid.
    Rejected,
    /// No placement exists for the current piece.
    NoneAvailable,
}

/// Result of one gravity step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum GravityOutcome {
    Fell,
    Locked { cleared_lines: usize },
    Idle,
}

/// One game from first spawn to game over.
///
/// Owns the board, the randomizer and the falling piece. Every lock goes
/// through the same pipeline: write the piece, clear lines, score, spawn.
/// A spawn that collides ends the session without touching the board.
///
/// ```
/// use quadfall_engine::{GameSession, PieceBag, PieceSeed, ScoringPolicy};
///
/// let seed: PieceSeed = "000102030405060708090a0b0c0d0e0f".parse().unwrap();
/// let mut session = GameSession::new(PieceBag::with_seed(seed), ScoringPolicy::Classic);
/// session.hard_drop();
/// assert_eq!(session.stats().completed_pieces(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct GameSession {
    board: Board,
    bag: PieceBag,
    falling_piece: Piece,
    stats: GameStats,
    state: SessionState,
    scoring: ScoringPolicy,
    elapsed: Duration,
}

impl GameSession {
    /// Starts a session on an empty board.
    #[must_use]
    pub fn new(bag: PieceBag, scoring: ScoringPolicy) -> Self {
        Self::with_board(Board::new(), bag, scoring)
    }

    /// Starts a session on a prepared board and spawns the first piece.
    #[must_use]
    pub fn with_board(board: Board, mut bag: PieceBag, scoring: ScoringPolicy) -> Self {
        let falling_piece = Piece::new(bag.pop_next());
        let mut session = Self {
            board,
            bag,
            falling_piece,
            stats: GameStats::new(),
            state: SessionState::Playing,
            scoring,
            elapsed: Duration::ZERO,
        };
        session.check_spawn();
        session
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[must_use]
    pub fn stats(&self) -> &GameStats {
        &self.stats
    }

    #[must_use]
    pub fn state(&self) -> SessionState {
        self.state
    }

    #[must_use]
    pub fn scoring(&self) -> ScoringPolicy {
        self.scoring
    }

    /// The falling piece, or `None` once the game is over.
    #[must_use]
    pub fn current_piece(&self) -> Option<&Piece> {
        (!self.state.is_game_over()).then_some(&self.falling_piece)
    }

    /// Where the falling piece would land on a hard drop.
    #[must_use]
    pub fn ghost_piece(&self) -> Option<Piece> {
        self.current_piece().map(|piece| piece.dropped(&self.board))
    }

    #[must_use]
    pub fn peek_upcoming(&self, count: usize) -> Vec<PieceKind> {
        self.bag.peek(count)
    }

    #[must_use]
    pub fn score(&self) -> usize {
        self.stats.score()
    }

    #[must_use]
    pub fn lines(&self) -> usize {
        self.stats.total_cleared_lines()
    }

    #[must_use]
    pub fn level(&self) -> usize {
        self.stats.level()
    }

    #[must_use]
    pub fn is_game_over(&self) -> bool {
        self.state.is_game_over()
    }

    #[must_use]
    pub fn is_paused(&self) -> bool {
        self.state.is_paused()
    }

    /// Time spent in the playing state.
    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    pub fn advance_clock(&mut self, delta: Duration) {
        if self.state.is_playing() {
            self.elapsed += delta;
        }
    }

    /// Switches between playing and paused. Rejected after game over.
    pub fn toggle_pause(&mut self) -> MoveOutcome {
        self.state = match self.state {
            SessionState::Playing => SessionState::Paused,
            SessionState::Paused => SessionState::Playing,
            SessionState::GameOver => return MoveOutcome::Rejected,
        };
        MoveOutcome::Applied
    }

    pub fn move_left(&mut self) -> MoveOutcome {
        self.try_replace(|piece, _| Some(piece.left()))
    }

    pub fn move_right(&mut self) -> MoveOutcome {
        self.try_replace(|piece, _| Some(piece.right()))
    }

    /// Moves down one row; never locks.
    pub fn soft_drop(&mut self) -> MoveOutcome {
        self.try_replace(|piece, _| Some(piece.down()))
    }

    pub fn rotate_cw(&mut self) -> MoveOutcome {
        self.try_replace(Piece::kicked_cw)
    }

    pub fn rotate_ccw(&mut self) -> MoveOutcome {
        self.try_replace(Piece::kicked_ccw)
    }

    fn try_replace<F>(&mut self, f: F) -> MoveOutcome
    where
        F: FnOnce(&Piece, &Board) -> Option<Piece>,
    {
        if !self.state.is_playing() {
            return MoveOutcome::Rejected;
        }
        match f(&self.falling_piece, &self.board) {
            Some(piece) if !self.board.is_colliding(&piece) => {
                self.falling_piece = piece;
                MoveOutcome::Applied
            }
            _ => MoveOutcome::Rejected,
        }
    }

    /// Drops the falling piece to its resting row and locks it.
    pub fn hard_drop(&mut self) -> PlacementOutcome {
        if !self.state.is_playing() {
            return PlacementOutcome::Rejected;
        }
        self.falling_piece = self.falling_piece.dropped(&self.board);
        let cleared_lines = self.lock_falling_piece();
        PlacementOutcome::Applied { cleared_lines }
    }

    /// Moves the falling piece down one row, locking it if it cannot move.
    pub fn gravity_step(&mut self) -> GravityOutcome {
        if !self.state.is_playing() {
            return GravityOutcome::Idle;
        }
        let lowered = self.falling_piece.down();
        if self.board.is_colliding(&lowered) {
            let cleared_lines = self.lock_falling_piece();
            GravityOutcome::Locked { cleared_lines }
        } else {
            self.falling_piece = lowered;
            GravityOutcome::Fell
        }
    }

    /// Places the falling piece with `rotation` in `left_col`, dropped from
    /// above the board, and locks it.
    ///
    /// Cells that rest above row 0 are discarded.
    pub fn place_directly(&mut self, rotation: usize, left_col: i32) -> PlacementOutcome {
        if !self.state.is_playing() {
            return PlacementOutcome::Rejected;
        }
        let kind = self.falling_piece.kind();
        let Some(shape) = kind.rotation_states().get(rotation) else {
            return PlacementOutcome::Rejected;
        };
        let Some(top_row) = self.board.drop_position(shape, left_col) else {
            return PlacementOutcome::Rejected;
        };
        self.falling_piece =
            Piece::with_placement(kind, rotation, PiecePosition::new(top_row, left_col));
        let cleared_lines = self.lock_falling_piece();
        PlacementOutcome::Applied { cleared_lines }
    }

    /// Ends the session because no placement exists for the falling piece.
    pub fn top_out(&mut self) -> PlacementOutcome {
        if !self.state.is_game_over() {
            self.end(self.falling_piece.kind());
        }
        PlacementOutcome::NoneAvailable
    }

    fn lock_falling_piece(&mut self) -> usize {
        self.board.fill_piece(&self.falling_piece);
        let cleared_lines = self.board.clear_lines();
        let points = self.stats.record_lock(cleared_lines, self.scoring);
        if cleared_lines > 0 {
            debug!(
                cleared_lines,
                points,
                score = self.stats.score(),
                level = self.stats.level(),
                "lines cleared"
            );
        }
        self.falling_piece = Piece::new(self.bag.pop_next());
        self.check_spawn();
        cleared_lines
    }

    fn check_spawn(&mut self) {
        if self.board.is_colliding(&self.falling_piece) {
            self.end(self.falling_piece.kind());
        }
    }

    fn end(&mut self, kind: PieceKind) {
        self.state = SessionState::GameOver;
        info!(
            piece = %kind.as_char(),
            score = self.stats.score(),
            lines = self.stats.total_cleared_lines(),
            pieces = self.stats.completed_pieces(),
            "game over"
        );
    }
}
