use std::time::Duration;

use tracing::debug;

use crate::{Block, Board, Piece, PieceKind};

use super::{
    Controller, EngineConfig, GameSession, GameStats, GravityController, MoveOutcome, PieceBag,
    PieceSeed, PlacementOutcome, PlayMode, SessionState,
};

/// A session plus the controller that advances it.
///
/// This is the surface a front-end talks to: per-frame [`Self::tick`], the
/// player commands, and the read-only queries. Piece commands are rejected in
/// automatic mode, and pause is only available in manual mode.
///
/// ```
/// use std::time::Duration;
///
/// use quadfall_engine::{EngineConfig, Game};
///
/// let mut game = Game::manual(EngineConfig::default(), None);
/// game.move_left();
/// game.tick(Duration::from_millis(16));
/// assert_eq!(game.score(), 0);
/// assert_eq!(game.level(), 1);
/// ```
#[derive(Debug)]
pub struct Game {
    config: EngineConfig,
    mode: PlayMode,
    session: GameSession,
    controller: Box<dyn Controller>,
}

impl Game {
    /// Human-controlled game with level-based gravity.
    #[must_use]
    pub fn manual(config: EngineConfig, seed: Option<PieceSeed>) -> Self {
        let controller = Box::new(GravityController::new(config.gravity.clone()));
        Self::new(config, PlayMode::Manual, controller, seed)
    }

    /// Game driven by `controller`, which places whole pieces.
    #[must_use]
    pub fn automatic(
        config: EngineConfig,
        controller: Box<dyn Controller>,
        seed: Option<PieceSeed>,
    ) -> Self {
        Self::new(config, PlayMode::Automatic, controller, seed)
    }

    fn new(
        config: EngineConfig,
        mode: PlayMode,
        controller: Box<dyn Controller>,
        seed: Option<PieceSeed>,
    ) -> Self {
        let bag = seed.map_or_else(PieceBag::new, PieceBag::with_seed);
        let session = GameSession::new(bag, config.scoring_for(mode));
        Self {
            config,
            mode,
            session,
            controller,
        }
    }

    #[must_use]
    pub fn mode(&self) -> PlayMode {
        self.mode
    }

    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    #[must_use]
    pub fn session(&self) -> &GameSession {
        &self.session
    }

    /// Advances timers by the measured frame time. No-op unless playing.
    pub fn tick(&mut self, delta: Duration) {
        if !self.session.state().is_playing() {
            return;
        }
        self.session.advance_clock(delta);
        self.controller.update(&mut self.session, delta);
    }

    /// Discards the current session and starts a fresh one with a new seed.
    pub fn restart(&mut self) {
        debug!(mode = ?self.mode, "restarting session");
        self.session = GameSession::new(PieceBag::new(), self.config.scoring_for(self.mode));
        self.controller.reset_timer();
    }

    fn manual_session(&mut self) -> Option<&mut GameSession> {
        self.mode.is_manual().then_some(&mut self.session)
    }

    pub fn move_left(&mut self) -> MoveOutcome {
        self.manual_session()
            .map_or(MoveOutcome::Rejected, GameSession::move_left)
    }

    pub fn move_right(&mut self) -> MoveOutcome {
        self.manual_session()
            .map_or(MoveOutcome::Rejected, GameSession::move_right)
    }

    pub fn soft_drop(&mut self) -> MoveOutcome {
        self.manual_session()
            .map_or(MoveOutcome::Rejected, GameSession::soft_drop)
    }

    pub fn rotate_cw(&mut self) -> MoveOutcome {
        self.manual_session()
            .map_or(MoveOutcome::Rejected, GameSession::rotate_cw)
    }

    pub fn rotate_ccw(&mut self) -> MoveOutcome {
        self.manual_session()
            .map_or(MoveOutcome::Rejected, GameSession::rotate_ccw)
    }

    /// Locks the piece at its landing row and restarts the gravity timer.
    pub fn hard_drop(&mut self) -> PlacementOutcome {
        let outcome = self
            .manual_session()
            .map_or(PlacementOutcome::Rejected, GameSession::hard_drop);
        if outcome.is_applied() {
            self.controller.reset_timer();
        }
        outcome
    }

    pub fn toggle_pause(&mut self) -> MoveOutcome {
        self.manual_session()
            .map_or(MoveOutcome::Rejected, GameSession::toggle_pause)
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        self.session.board()
    }

    /// Block at `(row, col)`, or `None` outside the grid.
    #[must_use]
    pub fn cell(&self, row: usize, col: usize) -> Option<Block> {
        self.session.board().cell(row, col)
    }

    #[must_use]
    pub fn current_piece(&self) -> Option<&Piece> {
        self.session.current_piece()
    }

    #[must_use]
    pub fn ghost_piece(&self) -> Option<Piece> {
        self.session.ghost_piece()
    }

    #[must_use]
    pub fn peek_upcoming(&self, count: usize) -> Vec<PieceKind> {
        self.session.peek_upcoming(count)
    }

    #[must_use]
    pub fn stats(&self) -> &GameStats {
        self.session.stats()
    }

    #[must_use]
    pub fn state(&self) -> SessionState {
        self.session.state()
    }

    #[must_use]
    pub fn score(&self) -> usize {
        self.session.score()
    }

    #[must_use]
    pub fn lines(&self) -> usize {
        self.session.lines()
    }

    #[must_use]
    pub fn level(&self) -> usize {
        self.session.level()
    }

    #[must_use]
    pub fn is_game_over(&self) -> bool {
        self.session.is_game_over()
    }

    #[must_use]
    pub fn is_paused(&self) -> bool {
        self.session.is_paused()
    }

    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.session.elapsed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SEED: PieceSeed = PieceSeed::from_bytes([42; 16]);

    /// Places a fixed number of pieces in the left columns, then tops out.
    #[derive(Debug)]
    struct ScriptedController {
        placements_left: usize,
    }

    impl ScriptedController {
        fn boxed(placements: usize) -> Box<Self> {
            Box::new(Self {
                placements_left: placements,
            })
        }
    }

    impl Controller for ScriptedController {
        fn update(&mut self, session: &mut GameSession, _delta: Duration) {
            if self.placements_left == 0 {
                session.top_out();
            } else {
                self.placements_left -= 1;
                session.place_directly(0, 0);
            }
        }
    }

    #[test]
    fn test_manual_gravity_through_tick() {
        let mut game = Game::manual(EngineConfig::default(), Some(SEED));
        let start = game.current_piece().unwrap().position().row;
        game.tick(Duration::from_millis(400));
        game.tick(Duration::from_millis(400));
        assert_eq!(game.current_piece().unwrap().position().row, start + 1);
        assert_eq!(game.elapsed(), Duration::from_millis(800));
    }

    #[test]
    fn test_hard_drop_resets_gravity_timer() {
        let mut game = Game::manual(EngineConfig::default(), Some(SEED));
        game.tick(Duration::from_millis(700));
        assert!(game.hard_drop().is_applied());
        game.tick(Duration::from_millis(700));
        assert_eq!(game.current_piece().unwrap().position().row, 0);
    }

    #[test]
    fn test_pause_stops_tick() {
        let mut game = Game::manual(EngineConfig::default(), Some(SEED));
        assert!(game.toggle_pause().is_applied());
        game.tick(Duration::from_secs(10));
        assert!(game.is_paused());
        assert_eq!(game.current_piece().unwrap().position().row, 0);
        assert_eq!(game.elapsed(), Duration::ZERO);
    }

    #[test]
    fn test_automatic_rejects_manual_commands() {
        let controller = ScriptedController::boxed(5);
        let mut game = Game::automatic(EngineConfig::default(), controller, Some(SEED));
        assert!(game.move_left().is_rejected());
        assert!(game.rotate_cw().is_rejected());
        assert!(game.hard_drop().is_rejected());
        assert!(game.toggle_pause().is_rejected());
        assert!(!game.is_paused());
    }

    #[test]
    fn test_automatic_uses_doubling_scoring() {
        let controller = ScriptedController::boxed(5);
        let mut game = Game::automatic(EngineConfig::default(), controller, Some(SEED));
        game.tick(Duration::from_millis(10));
        assert_eq!(game.stats().completed_pieces(), 1);
        assert_eq!(game.session().scoring(), crate::ScoringPolicy::Doubling);
    }

    #[test]
    fn test_restart_replaces_session() {
        let mut game = Game::manual(EngineConfig::default(), Some(SEED));
        game.hard_drop();
        game.hard_drop();
        assert_eq!(game.stats().completed_pieces(), 2);
        game.restart();
        assert_eq!(game.stats().completed_pieces(), 0);
        assert_eq!(game.score(), 0);
        assert!(game.board().rows().flatten().all(|b| b.is_empty()));
        assert!(game.state().is_playing());
    }

    #[test]
    fn test_tick_after_game_over_is_noop() {
        let controller = ScriptedController::boxed(3);
        let mut game = Game::automatic(EngineConfig::default(), controller, Some(SEED));
        for _ in 0..4 {
            game.tick(Duration::from_millis(10));
        }
        assert!(game.is_game_over());
        assert!(game.current_piece().is_none());
        game.tick(Duration::from_millis(10));
        assert_eq!(game.stats().completed_pieces(), 3);
        assert_eq!(game.elapsed(), Duration::from_millis(40));
    }
}
