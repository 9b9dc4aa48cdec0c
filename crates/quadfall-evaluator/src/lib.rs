//! Single-ply heuristic move selection for the automatic player.
//!
//! The evaluator is layered the same way at every step:
//!
//! 1. [`placement_analysis`] simulates one placement on a copy of the board
//! 2. [`placement_evaluator`] scores the resulting board
//! 3. [`move_evaluator`] enumerates every rotation and column and keeps the best
//! 4. [`controller`] applies the best move to a live session on a cooldown
//!
//! [`headless`] plays whole sessions without a terminal.

pub use self::{
    controller::HeuristicController,
    headless::{SessionSummary, default_controller, play_session},
    move_evaluator::{BestMove, MoveEvaluator},
    placement_analysis::PlacementAnalysis,
    placement_evaluator::{LinearPlacementEvaluator, PlacementEvaluator},
    weights::{HeuristicWeights, WeightsError},
};

pub mod controller;
pub mod headless;
pub mod move_evaluator;
pub mod placement_analysis;
pub mod placement_evaluator;
pub mod weights;
