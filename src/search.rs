//! Depth-limited minimax with alpha-beta and futility pruning

use std::ops::AddAssign;

use crate::{
    board::{Board, Player},
    config::SearchConfig,
    eval::Evaluator,
    move_order::ordered_moves,
    transposition_table::{TranspositionKey, TranspositionTable},
    Score,
};

/// Bound of the search window, beyond any reachable score
pub const INFINITY: Score = 1_000_000_000;

/// Counters gathered during a search (for diagnostics only)
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct SearchStats {
    pub nodes: usize,
    pub memo_hits: usize,
    pub cutoffs: usize,
    pub futility_skips: usize,
    pub table_entries: usize,
}

impl AddAssign for SearchStats {
    fn add_assign(&mut self, other: Self) {
        self.nodes += other.nodes;
        self.memo_hits += other.memo_hits;
        self.cutoffs += other.cutoffs;
        self.futility_skips += other.futility_skips;
        self.table_entries += other.table_entries;
    }
}

/// A single search session owning its transposition table
///
/// # Node Values
/// Values are on player one's scale: positive favours player one. Leaves are the
/// static score of the player to move, so a leaf where player two moves is scored
/// from player two's point of view. An immediate win for the side to move is worth
/// the four bonus for player one and its negation for player two.
pub struct Search<'a, const ROWS: usize, const COLS: usize> {
    evaluator: &'a Evaluator,
    config: &'a SearchConfig,
    transposition_table: TranspositionTable<ROWS, COLS>,
    stats: SearchStats,
}

impl<'a, const ROWS: usize, const COLS: usize> Search<'a, ROWS, COLS> {
    /// Creates a search with an empty transposition table
    pub fn new(evaluator: &'a Evaluator, config: &'a SearchConfig) -> Self {
        Self {
            evaluator,
            config,
            transposition_table: TranspositionTable::new(),
            stats: SearchStats::default(),
        }
    }

    pub fn stats(&self) -> SearchStats {
        SearchStats {
            memo_hits: self.transposition_table.hits(),
            table_entries: self.transposition_table.len(),
            ..self.stats
        }
    }

    /// Searches `board` to `depth` plies with the window (`alpha`, `beta`)
    ///
    /// Both sides share this one body: `sign` is +1 when player one (maximizing) is
    /// to move and -1 for player two, so comparisons are made on `sign * value`.
    pub fn minimax(
        &mut self,
        board: &Board<ROWS, COLS>,
        depth: u32,
        maximizing: bool,
        mut alpha: Score,
        mut beta: Score,
    ) -> Score {
        self.stats.nodes += 1;

        let key = TranspositionKey::new(*board, depth, maximizing);
        if let Some(value) = self.transposition_table.lookup(&key) {
            return value;
        }

        let player = if maximizing {
            Player::PlayerOne
        } else {
            Player::PlayerTwo
        };

        // won, exhausted or full positions are scored statically
        if depth == 0 || board.winner().is_some() || board.num_legal_moves() == 0 {
            let score = self.evaluator.score(board, player);
            self.transposition_table.store(key, score);
            return score;
        }

        let sign = player.sign();
        let mut best = -sign * INFINITY;

        for column in ordered_moves(board, player) {
            // nothing beats winning on the spot
            if board.is_winning_move(column, player) {
                let score = sign * self.evaluator.weights().four_bonus;
                self.transposition_table.store(key, score);
                return score;
            }

            let child = board.with_move(column, player);

            if depth <= self.config.futility_depth {
                let static_score = self.evaluator.score(&child, player);
                let bound = if maximizing { alpha } else { beta };
                if sign * static_score + self.config.futility_margin < sign * bound {
                    self.stats.futility_skips += 1;
                    continue;
                }
            }

            let value = self.minimax(&child, depth - 1, !maximizing, alpha, beta);
            if sign * value > sign * best {
                best = value;
            }
            if maximizing {
                alpha = alpha.max(value);
            } else {
                beta = beta.min(value);
            }
            if beta <= alpha {
                self.stats.cutoffs += 1;
                break;
            }
        }

        self.transposition_table.store(key, best);
        best
    }
}
