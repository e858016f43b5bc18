//! Depth control and the top-level move decision

use rayon::prelude::*;

use std::time::{Duration, Instant};

use crate::{
    board::{Board, Player},
    config::EngineConfig,
    error::ConfigError,
    eval::Evaluator,
    search::{Search, SearchStats, INFINITY},
    Score, HEIGHT, WIDTH,
};

/// Outcome of a move decision
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Decision {
    pub column: usize,
    /// Search value of the chosen column on player one's scale
    pub value: Score,
    /// Effective depth the decision was searched to
    pub depth: u32,
    /// The column wins on the spot and was returned without searching further
    pub immediate_win: bool,
    pub stats: SearchStats,
    pub elapsed: Duration,
}

/// Move selection engine for player one
///
/// Every decision runs a fresh search with its own transposition table; nothing is
/// carried over between calls and the caller's board is never modified.
#[derive(Clone, Debug)]
pub struct Engine<const ROWS: usize = HEIGHT, const COLS: usize = WIDTH> {
    config: EngineConfig,
    evaluator: Evaluator,
}

impl<const ROWS: usize, const COLS: usize> Engine<ROWS, COLS> {
    /// Creates an engine, checking that `config` fits a `ROWS` x `COLS` board
    pub fn new(config: EngineConfig) -> Result<Self, ConfigError> {
        config.validate(ROWS, COLS)?;
        let evaluator = Evaluator::new(config.weights.clone());
        Ok(Self { config, evaluator })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn evaluator(&self) -> &Evaluator {
        &self.evaluator
    }

    /// A search session with an empty transposition table
    pub fn search(&self) -> Search<'_, ROWS, COLS> {
        Search::new(&self.evaluator, &self.config.search)
    }

    /// Search depth to use for `board`, trading depth for speed while many columns
    /// are open
    pub fn effective_depth(&self, board: &Board<ROWS, COLS>, base_depth: u32) -> u32 {
        let search = &self.config.search;
        if board.num_legal_moves() > search.wide_branching {
            base_depth
                .saturating_sub(search.depth_reduction)
                .max(search.min_depth)
        } else {
            base_depth
        }
    }

    /// Picks the best column for player one, or `None` if no column is playable
    pub fn choose_move(&self, board: &Board<ROWS, COLS>, base_depth: u32) -> Option<usize> {
        self.decide(board, base_depth).map(|decision| decision.column)
    }

    /// Picks the best column for player one along with the search details
    ///
    /// Columns are tried in ascending order. The first one that wins outright is
    /// returned at once; otherwise the strictly best searched value wins, so ties go
    /// to the lowest column.
    pub fn decide(&self, board: &Board<ROWS, COLS>, base_depth: u32) -> Option<Decision> {
        let start = Instant::now();
        let depth = self.effective_depth(board, base_depth);
        let mut search = self.search();

        let mut best: Option<(usize, Score)> = None;
        for column in board.legal_moves() {
            let child = board.with_move(column, Player::PlayerOne);
            if child.winner() == Some(Player::PlayerOne) {
                return Some(self.report(Decision {
                    column,
                    value: self.evaluator.weights().four_bonus,
                    depth,
                    immediate_win: true,
                    stats: search.stats(),
                    elapsed: start.elapsed(),
                }));
            }

            let value = search.minimax(&child, depth.saturating_sub(1), false, -INFINITY, INFINITY);
            if best.map_or(true, |(_, best_value)| value > best_value) {
                best = Some((column, value));
            }
        }

        best.map(|(column, value)| {
            self.report(Decision {
                column,
                value,
                depth,
                immediate_win: false,
                stats: search.stats(),
                elapsed: start.elapsed(),
            })
        })
    }

    /// Like [`choose_move`], searching the root columns in parallel
    ///
    /// [`choose_move`]: #method.choose_move
    pub fn choose_move_parallel(
        &self,
        board: &Board<ROWS, COLS>,
        base_depth: u32,
    ) -> Option<usize> {
        self.decide_parallel(board, base_depth)
            .map(|decision| decision.column)
    }

    /// Like [`decide`], searching the root columns in parallel
    ///
    /// Outright wins are still found in ascending column order before any search.
    /// Each root column is then searched with the full window and a private
    /// transposition table, so values can differ slightly from [`decide`] where the
    /// shared table would have reused a window-dependent entry.
    ///
    /// [`decide`]: #method.decide
    pub fn decide_parallel(&self, board: &Board<ROWS, COLS>, base_depth: u32) -> Option<Decision> {
        let start = Instant::now();
        let depth = self.effective_depth(board, base_depth);
        let legal_moves = board.legal_moves();

        if let Some(&column) = legal_moves.iter().find(|&&column| {
            board.with_move(column, Player::PlayerOne).winner() == Some(Player::PlayerOne)
        }) {
            return Some(self.report(Decision {
                column,
                value: self.evaluator.weights().four_bonus,
                depth,
                immediate_win: true,
                stats: SearchStats::default(),
                elapsed: start.elapsed(),
            }));
        }

        let results: Vec<(usize, Score, SearchStats)> = legal_moves
            .par_iter()
            .map(|&column| {
                let mut search = self.search();
                let child = board.with_move(column, Player::PlayerOne);
                let value =
                    search.minimax(&child, depth.saturating_sub(1), false, -INFINITY, INFINITY);
                (column, value, search.stats())
            })
            .collect();

        let mut stats = SearchStats::default();
        let mut best: Option<(usize, Score)> = None;
        for (column, value, column_stats) in results {
            stats += column_stats;
            if best.map_or(true, |(_, best_value)| value > best_value) {
                best = Some((column, value));
            }
        }

        best.map(|(column, value)| {
            self.report(Decision {
                column,
                value,
                depth,
                immediate_win: false,
                stats,
                elapsed: start.elapsed(),
            })
        })
    }

    fn report(&self, decision: Decision) -> Decision {
        tracing::debug!(
            column = decision.column,
            value = decision.value,
            depth = decision.depth,
            immediate_win = decision.immediate_win,
            nodes = decision.stats.nodes,
            memo_hits = decision.stats.memo_hits,
            cutoffs = decision.stats.cutoffs,
            futility_skips = decision.stats.futility_skips,
            table_entries = decision.stats.table_entries,
            elapsed_ms = decision.elapsed.as_millis() as u64,
            "decision made"
        );
        decision
    }
}

impl Default for Engine {
    fn default() -> Self {
        let config = EngineConfig::default();
        let evaluator = Evaluator::new(config.weights.clone());
        Self { config, evaluator }
    }
}
