//! Tactical ordering of candidate moves

use crate::board::{Board, Player};

/// Priority of a move completing a four for the side to move
pub const WINNING_PRIORITY: i32 = -100;
/// Priority of a move occupying the cell the opponent would win on
pub const BLOCKING_PRIORITY: i32 = -50;

/// Insertion-sorted list of columns, yielding the lowest priority first
///
/// Columns with equal priority come out in the reverse of their push order.
pub(crate) struct MoveSorter<const COLS: usize> {
    size: usize,
    // column and priority
    moves: [(usize, i32); COLS],
}

impl<const COLS: usize> MoveSorter<COLS> {
    pub fn new() -> Self {
        Self {
            size: 0,
            moves: [(0, 0); COLS],
        }
    }

    pub fn push(&mut self, column: usize, priority: i32) {
        let mut pos = self.size;
        self.size += 1;
        while pos != 0 && self.moves[pos - 1].1 < priority {
            self.moves[pos] = self.moves[pos - 1];
            pos -= 1;
        }
        self.moves[pos] = (column, priority);
    }
}

impl<const COLS: usize> Iterator for MoveSorter<COLS> {
    type Item = usize;

    fn next(&mut self) -> Option<Self::Item> {
        match self.size {
            0 => None,
            _ => {
                self.size -= 1;
                Some(self.moves[self.size].0)
            }
        }
    }
}

/// Search priority of `column` for `player`, lower is searched earlier
pub fn move_priority<const ROWS: usize, const COLS: usize>(
    board: &Board<ROWS, COLS>,
    column: usize,
    player: Player,
) -> i32 {
    if board.is_winning_move(column, player) {
        WINNING_PRIORITY
    } else if board.is_winning_move(column, player.opponent()) {
        BLOCKING_PRIORITY
    } else {
        (COLS as i32 / 2 - column as i32).abs()
    }
}

/// Legal columns of `board` ordered for `player`: wins, then blocks, then from the
/// centre outwards, ties broken by ascending column
pub fn ordered_moves<const ROWS: usize, const COLS: usize>(
    board: &Board<ROWS, COLS>,
    player: Player,
) -> Vec<usize> {
    let mut moves = MoveSorter::<COLS>::new();
    // pushing in reverse makes ties come out in ascending column order
    for column in (0..COLS).rev() {
        if board.playable(column) {
            moves.push(column, move_priority(board, column, player));
        }
    }
    moves.collect()
}
