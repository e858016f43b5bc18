use std::collections::HashMap;

use crate::{board::Board, Score};

/// Identifies a searched node: the position, the remaining depth and whether the
/// maximizing player is to move
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct TranspositionKey<const ROWS: usize, const COLS: usize> {
    pub board: Board<ROWS, COLS>,
    pub depth: u32,
    pub maximizing: bool,
}

impl<const ROWS: usize, const COLS: usize> TranspositionKey<ROWS, COLS> {
    pub fn new(board: Board<ROWS, COLS>, depth: u32, maximizing: bool) -> Self {
        Self {
            board,
            depth,
            maximizing,
        }
    }
}

/// Memo of search results for a single decision
///
/// Keys hold the full board, so distinct nodes never collide. Nothing is evicted;
/// the table is dropped together with the decision that created it.
#[derive(Clone, Debug, Default)]
pub struct TranspositionTable<const ROWS: usize, const COLS: usize> {
    entries: HashMap<TranspositionKey<ROWS, COLS>, Score>,
    hits: usize,
}

impl<const ROWS: usize, const COLS: usize> TranspositionTable<ROWS, COLS> {
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
            hits: 0,
        }
    }

    pub fn lookup(&mut self, key: &TranspositionKey<ROWS, COLS>) -> Option<Score> {
        let value = self.entries.get(key).copied();
        if value.is_some() {
            self.hits += 1;
        }
        value
    }

    pub fn store(&mut self, key: TranspositionKey<ROWS, COLS>, value: Score) {
        self.entries.insert(key, value);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of successful lookups so far
    pub fn hits(&self) -> usize {
        self.hits
    }
}
