//! Tunable weights for evaluation and search

use serde::{Deserialize, Serialize};

use std::path::Path;

use crate::{board::CONNECT, error::ConfigError, search::INFINITY, Score, HEIGHT, WIDTH};

/// Default per-column positional bonus for the 12 column board, favouring the centre
pub const DEFAULT_COLUMN_WEIGHTS: [Score; WIDTH] = [1, 2, 4, 6, 8, 10, 10, 8, 6, 4, 2, 1];

/// Heuristic weights used by the evaluator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Weights {
    /// Bonus for a window holding exactly two of a player's tokens and none of the opponent's
    pub two_bonus: Score,
    pub three_bonus: Score,
    /// Bonus for a completed window, large enough to dominate every positional term
    pub four_bonus: Score,
    /// Positional bonus per occupied cell, indexed by column
    pub column_weights: Vec<Score>,
}

impl Default for Weights {
    fn default() -> Self {
        Self {
            two_bonus: 5,
            three_bonus: 50,
            four_bonus: 100_000,
            column_weights: DEFAULT_COLUMN_WEIGHTS.to_vec(),
        }
    }
}

/// Search pruning and depth control parameters
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Depth requested for each decision before depth control
    pub base_depth: u32,
    /// Remaining depth at or below which futility pruning applies, 0 disables it
    pub futility_depth: u32,
    pub futility_margin: Score,
    /// Legal move count above which the base depth is reduced
    pub wide_branching: usize,
    pub depth_reduction: u32,
    /// Floor of the reduced depth
    pub min_depth: u32,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            base_depth: 8,
            futility_depth: 2,
            futility_margin: 50,
            wide_branching: 8,
            depth_reduction: 2,
            min_depth: 4,
        }
    }
}

/// Top-level engine configuration, loadable from TOML
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub weights: Weights,
    pub search: SearchConfig,
}

impl EngineConfig {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::from_toml(&content)
    }

    /// Load configuration from a TOML file, falling back to defaults if the file
    /// does not exist
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            tracing::warn!("config file '{}' not found, using defaults", path.display());
            Ok(Self::default())
        }
    }

    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: EngineConfig = toml::from_str(content)?;
        config.validate(HEIGHT, WIDTH)?;
        Ok(config)
    }

    /// Validate the configuration against a `rows` x `columns` board
    pub fn validate(&self, rows: usize, columns: usize) -> Result<(), ConfigError> {
        let weights = &self.weights;
        if weights.column_weights.len() != columns {
            return Err(ConfigError::Validation(format!(
                "weights.column_weights must have {} entries, found {}",
                columns,
                weights.column_weights.len()
            )));
        }
        if weights.column_weights.iter().any(|&w| w <= 0) {
            return Err(ConfigError::Validation(
                "weights.column_weights must all be > 0".into(),
            ));
        }
        if weights.column_weights.iter().ne(weights.column_weights.iter().rev()) {
            return Err(ConfigError::Validation(
                "weights.column_weights must be symmetric around the centre".into(),
            ));
        }
        if weights.two_bonus < 0 || weights.three_bonus < 0 || weights.four_bonus < 0 {
            return Err(ConfigError::Validation(
                "weights bonuses must be >= 0".into(),
            ));
        }
        if self.search.futility_margin < 0 {
            return Err(ConfigError::Validation(
                "search.futility_margin must be >= 0".into(),
            ));
        }

        // every static score plus the futility margin must stay inside the search window
        let largest_bonus = weights
            .two_bonus
            .max(weights.three_bonus)
            .max(weights.four_bonus) as i64;
        let positional: i64 = weights.column_weights.iter().map(|&w| w as i64).sum();
        let bound = windows(rows, columns) as i64 * largest_bonus
            + rows as i64 * positional
            + self.search.futility_margin as i64;
        if bound >= INFINITY as i64 {
            return Err(ConfigError::Validation(format!(
                "weights and search.futility_margin can reach {}, must stay below {}",
                bound, INFINITY
            )));
        }
        Ok(())
    }
}

/// Number of 4-cell line windows on a `rows` x `columns` board
fn windows(rows: usize, columns: usize) -> usize {
    let along_rows = columns.saturating_sub(CONNECT - 1);
    let along_columns = rows.saturating_sub(CONNECT - 1);
    rows * along_rows + columns * along_columns + 2 * along_rows * along_columns
}
