//! Game engine logic and state management.
//!
//! - [`GameSession`] - one game: board, falling piece, bag, stats, state machine
//! - [`Game`] - a session paired with the [`Controller`] that advances it
//! - [`GameStats`] / [`ScoringPolicy`] - score, lines, level
//! - [`PieceBag`] / [`PieceSeed`] - 7-bag piece generation
//! - [`EngineConfig`] - gravity and automatic-play timing, scoring per mode
//!
//! # Game Flow
//!
//! 1. A piece spawns at the top; a colliding spawn ends the game
//! 2. The player (or a controller) moves, rotates and drops it
//! 3. On lock, full rows are cleared and the score is updated
//! 4. The next piece spawns
//!
//! ```
//! use std::time::Duration;
//!
//! use quadfall_engine::{EngineConfig, Game};
//!
//! let mut game = Game::manual(EngineConfig::default(), None);
//! game.rotate_cw();
//! game.hard_drop();
//! game.tick(Duration::from_millis(16));
//! assert_eq!(game.stats().completed_pieces(), 1);
//! ```

pub use self::{
    config::*, controller::*, game::*, game_session::*, game_stats::*, piece_bag::*,
};

mod config;
mod controller;
mod game;
mod game_session;
mod game_stats;
mod piece_bag;
