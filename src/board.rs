//! The game grid, its single mutator and the four-in-a-row detector

use anyhow::{anyhow, Result};

use std::fmt;

use crate::{HEIGHT, WIDTH};

/// Length of a winning alignment
pub const CONNECT: usize = 4;

/// One of the two sides of the game
///
/// `PlayerOne` is the engine's side and is always the maximizing player in search.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Player {
    PlayerOne,
    PlayerTwo,
}

impl Player {
    /// The other side
    pub fn opponent(self) -> Self {
        match self {
            Player::PlayerOne => Player::PlayerTwo,
            Player::PlayerTwo => Player::PlayerOne,
        }
    }

    /// Signed identity of the player, `+1` for player one and `-1` for player two
    pub fn sign(self) -> i32 {
        match self {
            Player::PlayerOne => 1,
            Player::PlayerTwo => -1,
        }
    }

    /// The cell occupied by this player's tokens
    pub fn cell(self) -> Cell {
        match self {
            Player::PlayerOne => Cell::PlayerOne,
            Player::PlayerTwo => Cell::PlayerTwo,
        }
    }
}

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Cell {
    PlayerOne,
    PlayerTwo,
    Empty,
}

impl Cell {
    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }

    /// The player owning a token in this cell, if any
    pub fn owner(&self) -> Option<Player> {
        match self {
            Cell::PlayerOne => Some(Player::PlayerOne),
            Cell::PlayerTwo => Some(Player::PlayerTwo),
            Cell::Empty => None,
        }
    }

    fn symbol(&self) -> char {
        match self {
            Cell::PlayerOne => 'X',
            Cell::PlayerTwo => 'O',
            Cell::Empty => '.',
        }
    }
}

/// Line directions as (row step, column step), scanned in this order:
/// horizontal, vertical, diagonal up-right, diagonal down-right
pub(crate) const DIRECTIONS: [(isize, isize); 4] = [(0, 1), (1, 0), (1, 1), (-1, 1)];

/// A `ROWS` x `COLS` grid of cells under gravity
///
/// Rows are indexed from the bottom, so row 0 is the row tokens land on first.
/// The board is `Copy`: search branches duplicate it instead of undoing moves, and
/// its value doubles as the transposition table's position snapshot.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct Board<const ROWS: usize = HEIGHT, const COLS: usize = WIDTH> {
    cells: [[Cell; COLS]; ROWS],
    heights: [usize; COLS],
}

impl<const ROWS: usize, const COLS: usize> Board<ROWS, COLS> {
    pub fn new() -> Self {
        Self {
            cells: [[Cell::Empty; COLS]; ROWS],
            heights: [0; COLS],
        }
    }

    /// Builds a board from a string of alternating moves, player one first
    ///
    /// Columns are written as single base-36 digits, so `0`-`9` then `a`, `b`, ...
    /// Whitespace is ignored.
    pub fn from_moves<S: AsRef<str>>(moves: S) -> Result<Self> {
        let mut board = Self::new();
        let mut player = Player::PlayerOne;

        for column_char in moves.as_ref().chars().filter(|c| !c.is_whitespace()) {
            match column_char.to_digit(36).map(|c| c as usize) {
                Some(column) if column < COLS => {
                    if !board.apply(column, player) {
                        return Err(anyhow!("Invalid move, column {} full", column));
                    }
                    player = player.opponent();
                }
                Some(column) => {
                    return Err(anyhow!(
                        "Invalid move, column {} out of range. Columns must be between 0 and {}",
                        column,
                        COLS - 1
                    ))
                }
                None => return Err(anyhow!("could not parse '{}' as a valid move", column_char)),
            }
        }
        Ok(board)
    }

    /// Parses a textual grid, top row first, using `X`, `O` and `.`
    ///
    /// Blank lines and spaces are ignored. Every row must have `COLS` cells, there
    /// must be exactly `ROWS` rows and no token may float above an empty cell.
    pub fn from_diagram(diagram: &str) -> Result<Self> {
        let rows: Vec<Vec<char>> = diagram
            .lines()
            .map(|line| line.chars().filter(|c| !c.is_whitespace()).collect::<Vec<_>>())
            .filter(|row| !row.is_empty())
            .collect();

        if rows.len() != ROWS {
            return Err(anyhow!("expected {} rows, found {}", ROWS, rows.len()));
        }

        let mut board = Self::new();
        // diagram rows are written top to bottom
        for (row, symbols) in rows.iter().rev().enumerate() {
            if symbols.len() != COLS {
                return Err(anyhow!(
                    "expected {} cells in row {}, found {}",
                    COLS,
                    row,
                    symbols.len()
                ));
            }
            for (column, symbol) in symbols.iter().enumerate() {
                let player = match symbol {
                    'X' | 'x' => Player::PlayerOne,
                    'O' | 'o' => Player::PlayerTwo,
                    '.' => continue,
                    other => return Err(anyhow!("could not parse '{}' as a cell", other)),
                };
                if board.heights[column] != row {
                    return Err(anyhow!(
                        "floating token in column {} at row {}",
                        column,
                        row
                    ));
                }
                board.apply(column, player);
            }
        }
        Ok(board)
    }

    pub const fn rows(&self) -> usize {
        ROWS
    }

    pub const fn columns(&self) -> usize {
        COLS
    }

    /// The cell at `row` (counted from the bottom) and `column`
    pub fn get(&self, row: usize, column: usize) -> Cell {
        self.cells[row][column]
    }

    /// Number of tokens in `column`
    pub fn height(&self, column: usize) -> usize {
        self.heights[column]
    }

    pub fn num_moves(&self) -> usize {
        self.heights.iter().sum()
    }

    /// Whether `column` exists and its top cell is empty
    pub fn playable(&self, column: usize) -> bool {
        column < COLS && self.heights[column] < ROWS
    }

    /// Drops a token for `player` into the lowest empty cell of `column`
    ///
    /// Returns `false` and leaves the board untouched if the column is out of range
    /// or full.
    pub fn apply(&mut self, column: usize, player: Player) -> bool {
        if !self.playable(column) {
            return false;
        }
        self.cells[self.heights[column]][column] = player.cell();
        self.heights[column] += 1;
        true
    }

    /// A copy of this board with `column` played by `player`
    ///
    /// Callers must only pass playable columns; an illegal column yields an
    /// unchanged copy.
    pub fn with_move(&self, column: usize, player: Player) -> Self {
        let mut next = *self;
        next.apply(column, player);
        next
    }

    /// Legal columns in ascending order
    pub fn legal_moves(&self) -> Vec<usize> {
        (0..COLS).filter(|&column| self.playable(column)).collect()
    }

    pub fn num_legal_moves(&self) -> usize {
        (0..COLS).filter(|&column| self.playable(column)).count()
    }

    pub fn is_full(&self) -> bool {
        self.heights.iter().all(|&height| height == ROWS)
    }

    /// A finished game with no winner
    pub fn is_draw(&self) -> bool {
        self.winner().is_none() && self.is_full()
    }

    /// The cell `step` cells away from (`row`, `column`) in `direction`, if on the board
    fn offset(&self, row: usize, column: usize, direction: (isize, isize), step: isize) -> Option<Cell> {
        let r = row as isize + direction.0 * step;
        let c = column as isize + direction.1 * step;
        if r < 0 || r >= ROWS as isize || c < 0 || c >= COLS as isize {
            None
        } else {
            Some(self.cells[r as usize][c as usize])
        }
    }

    /// The owner of the first four-in-a-row found, scanning horizontal, vertical and
    /// both diagonal orientations in turn
    ///
    /// A full board without an alignment has no winner.
    pub fn winner(&self) -> Option<Player> {
        for &direction in DIRECTIONS.iter() {
            for row in 0..ROWS {
                for column in 0..COLS {
                    let owner = match self.cells[row][column].owner() {
                        Some(owner) => owner,
                        None => continue,
                    };
                    let run = (1..CONNECT as isize)
                        .all(|step| self.offset(row, column, direction, step) == Some(owner.cell()));
                    if run {
                        return Some(owner);
                    }
                }
            }
        }
        None
    }

    /// Whether dropping a token for `player` into `column` completes a four-in-a-row
    /// through that token
    pub fn is_winning_move(&self, column: usize, player: Player) -> bool {
        if !self.playable(column) {
            return false;
        }
        let row = self.heights[column];
        let cell = player.cell();

        // count matching tokens on both sides of the landing cell for each line
        for &direction in DIRECTIONS.iter() {
            let mut run = 0;
            for &dx in [-1isize, 1].iter() {
                let mut step = dx;
                while self.offset(row, column, direction, step) == Some(cell) {
                    run += 1;
                    step += dx;
                }
            }
            if run >= CONNECT - 1 {
                return true;
            }
        }
        false
    }
}

impl<const ROWS: usize, const COLS: usize> Default for Board<ROWS, COLS> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const ROWS: usize, const COLS: usize> fmt::Display for Board<ROWS, COLS> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in (0..ROWS).rev() {
            for column in 0..COLS {
                write!(f, " {} ", self.cells[row][column].symbol())?;
            }
            writeln!(f)?;
        }
        writeln!(f, "{}", "-".repeat(3 * COLS))?;
        for column in 0..COLS {
            write!(f, "{:^3}", column)?;
        }
        writeln!(f)
    }
}
