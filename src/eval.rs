//! Static evaluation of non-terminal positions

use crate::{
    board::{Board, Player, CONNECT, DIRECTIONS},
    config::Weights,
    Score,
};

/// Heuristic scorer for board positions
///
/// # Scoring
/// A position is scored from one player's point of view as the sum of
/// - the column weight of every own token, minus that of every opponent token
/// - a bonus for every 4-cell line window held only by one side: two, three or four
///   tokens earn the matching bonus, counted positive for own windows and negative
///   for opponent windows. Windows containing both sides score nothing.
///
/// Every term is own-minus-opponent, so swapping the point of view negates the score.
#[derive(Clone, Debug)]
pub struct Evaluator {
    weights: Weights,
}

impl Evaluator {
    /// Creates an evaluator from already validated weights
    ///
    /// `weights.column_weights` must cover every column of the boards it scores;
    /// outside the crate evaluators come from [`Engine::new`], which checks this.
    ///
    /// [`Engine::new`]: ../engine/struct.Engine.html#method.new
    pub(crate) fn new(weights: Weights) -> Self {
        Self { weights }
    }

    pub fn weights(&self) -> &Weights {
        &self.weights
    }

    /// Scores `board` from the point of view of `player`
    pub fn score<const ROWS: usize, const COLS: usize>(
        &self,
        board: &Board<ROWS, COLS>,
        player: Player,
    ) -> Score {
        self.positional_score(board, player) + self.window_score(board, player)
    }

    fn positional_score<const ROWS: usize, const COLS: usize>(
        &self,
        board: &Board<ROWS, COLS>,
        player: Player,
    ) -> Score {
        let mut score = 0;
        for row in 0..ROWS {
            for column in 0..COLS {
                if let Some(owner) = board.get(row, column).owner() {
                    // +1 for own tokens, -1 for opponent tokens
                    score += owner.sign() * player.sign() * self.weights.column_weights[column];
                }
            }
        }
        score
    }

    fn window_score<const ROWS: usize, const COLS: usize>(
        &self,
        board: &Board<ROWS, COLS>,
        player: Player,
    ) -> Score {
        let mut score = 0;
        for &(dr, dc) in DIRECTIONS.iter() {
            for row in 0..ROWS {
                for column in 0..COLS {
                    let last_row = row as isize + dr * (CONNECT as isize - 1);
                    let last_column = column as isize + dc * (CONNECT as isize - 1);
                    if last_row < 0
                        || last_row >= ROWS as isize
                        || last_column >= COLS as isize
                    {
                        continue;
                    }

                    let (mut own, mut opponent) = (0, 0);
                    for step in 0..CONNECT as isize {
                        let r = (row as isize + dr * step) as usize;
                        let c = (column as isize + dc * step) as usize;
                        match board.get(r, c).owner() {
                            Some(owner) if owner == player => own += 1,
                            Some(_) => opponent += 1,
                            None => {}
                        }
                    }

                    score += match (own, opponent) {
                        (n, 0) => self.line_bonus(n),
                        (0, n) => -self.line_bonus(n),
                        _ => 0,
                    };
                }
            }
        }
        score
    }

    fn line_bonus(&self, tokens: usize) -> Score {
        match tokens {
            4 => self.weights.four_bonus,
            3 => self.weights.three_bonus,
            2 => self.weights.two_bonus,
            _ => 0,
        }
    }
}
