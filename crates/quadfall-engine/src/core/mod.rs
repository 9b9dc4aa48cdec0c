//! Core data structures: the piece catalog and the playfield.
//!
//! - [`PieceKind`] / [`Shape`] - the seven tetrominoes and their rotation states
//! - [`Piece`] - a tetromino at a position and rotation
//! - [`Board`] - the 10×20 grid with collision, line clearing and metrics

pub use self::{board::*, piece::*};

pub(crate) mod board;
pub(crate) mod piece;
