//! A game tree search agent for 'Connect 4' on a wide 6 x 12 board
//!
//! The agent plays as player one and picks its move with a depth-limited minimax
//! search using alpha-beta and futility pruning, tactical move ordering, depth
//! control by branching factor and a per-decision transposition table.
//!
//! # Basic Usage
//!
//! ```
//! use connect4_engine::{board::Board, choose_move};
//!
//!# use std::error::Error;
//!# fn main() -> Result<(), Box<dyn Error>> {
//! // player one has three stacked in column 0 and wins by playing there again
//! let board: Board = Board::from_moves("0b0b0")?;
//! assert_eq!(choose_move(&board, 4), Some(0));
//!# Ok(())
//!# }
//! ```

use static_assertions::*;
pub use anyhow;

pub mod board;

pub mod config;

pub mod engine;

pub mod error;

pub mod eval;

pub mod move_order;

pub mod search;

pub mod transposition_table;


pub use board::{Board, Cell, Player};
pub use config::{EngineConfig, SearchConfig, Weights};
pub use engine::{Decision, Engine};

/// The width of the game board in tiles
pub const WIDTH: usize = 12;

/// The height of the game board in tiles
pub const HEIGHT: usize = 6;

/// A heuristic or search value, positive values favour the player it is computed for
pub type Score = i32;

// a four-in-a-row has to fit both horizontally and vertically
const_assert!(WIDTH >= board::CONNECT && HEIGHT >= board::CONNECT);
const_assert_eq!(config::DEFAULT_COLUMN_WEIGHTS.len(), WIDTH);

/// Drops a token for `player` into `column`, returning whether it was placed
pub fn apply_move<const ROWS: usize, const COLS: usize>(
    board: &mut Board<ROWS, COLS>,
    column: usize,
    player: Player,
) -> bool {
    board.apply(column, player)
}

/// The player with a four-in-a-row on `board`, if any
pub fn terminal_state<const ROWS: usize, const COLS: usize>(
    board: &Board<ROWS, COLS>,
) -> Option<Player> {
    board.winner()
}

/// Best column for player one with the default configuration, or `None` if the
/// board has no legal move
pub fn choose_move(board: &Board, base_depth: u32) -> Option<usize> {
    Engine::default().choose_move(board, base_depth)
}
