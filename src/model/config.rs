//! Validated configuration of one model and its search

use crate::io::configuration::{
    DEFAULT_COPIES, DEFAULT_DECK_SIZE, DEFAULT_GRID_SIZE, DEFAULT_MAX_LAYERS, DEFAULT_MAX_VALUE,
    DEFAULT_SEED, MAX_GRID_SIZE, MAX_TILE_VALUE, MIN_GRID_SIZE,
};
use crate::io::error::{Result, invalid_parameter};
use crate::model::instance::{Instance, PlayType};
use std::time::Duration;

/// Everything the board model builder consumes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModelConfig {
    /// Free or known deck
    pub play_type: PlayType,
    /// Highest tile value, at most 9
    pub max_value: usize,
    /// Copies of each tile value
    pub copies: usize,
    /// Number of deck slots
    pub deck_size: usize,
    /// Side length of the square board
    pub grid_size: usize,
    /// Number of stacking levels
    pub max_layers: usize,
    /// Post the copy-order and board-rotation constraints
    pub symmetry_breaking: bool,
    /// Order level codes along the deck under free play
    pub deck_level_symmetry: bool,
    /// Seed of the known-deck deal
    pub seed: u64,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            play_type: PlayType::Free,
            max_value: DEFAULT_MAX_VALUE,
            copies: DEFAULT_COPIES,
            deck_size: DEFAULT_DECK_SIZE,
            grid_size: DEFAULT_GRID_SIZE,
            max_layers: DEFAULT_MAX_LAYERS,
            symmetry_breaking: true,
            deck_level_symmetry: false,
            seed: DEFAULT_SEED,
        }
    }
}

impl ModelConfig {
    /// Total number of parts, `(max_value + 1) · copies`
    pub const fn number_of_parts(&self) -> usize {
        (self.max_value + 1) * self.copies
    }

    /// Instance key of this configuration
    pub const fn instance(&self) -> Instance {
        Instance::new(
            self.play_type,
            self.max_value,
            self.copies,
            self.deck_size,
            self.grid_size,
        )
    }

    /// Check every parameter against its supported range
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` naming the first offending parameter.
    pub fn validate(&self) -> Result<()> {
        if self.max_value > MAX_TILE_VALUE {
            return Err(invalid_parameter(
                "max-value",
                &self.max_value,
                &format!(
                    "max-value can be at most {MAX_TILE_VALUE}, {} supplied",
                    self.max_value
                ),
            ));
        }
        if self.copies == 0 {
            return Err(invalid_parameter(
                "copies",
                &self.copies,
                &"at least one copy of each tile is needed",
            ));
        }
        let parts = self.number_of_parts();
        if self.deck_size > parts {
            return Err(invalid_parameter(
                "deck-size",
                &self.deck_size,
                &format!(
                    "deck-size can be at most max-value*copies (({}+1)*{}={parts}), {} supplied",
                    self.max_value, self.copies, self.deck_size
                ),
            ));
        }
        if self.deck_size == 0 {
            return Err(invalid_parameter(
                "deck-size",
                &self.deck_size,
                &"the deck needs at least one slot",
            ));
        }
        if !(MIN_GRID_SIZE..=MAX_GRID_SIZE).contains(&self.grid_size) {
            return Err(invalid_parameter(
                "grid-size",
                &self.grid_size,
                &format!("grid-size must be between {MIN_GRID_SIZE} and {MAX_GRID_SIZE}"),
            ));
        }
        if self.max_layers == 0 {
            return Err(invalid_parameter(
                "max-layers",
                &self.max_layers,
                &"at least one level is needed",
            ));
        }
        Ok(())
    }
}

/// Budgets that stop the search early
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SearchLimits {
    /// Wall-clock budget
    pub time_limit: Option<Duration>,
    /// Maximum number of search nodes
    pub node_limit: Option<u64>,
}

impl SearchLimits {
    /// No limits
    pub const fn unlimited() -> Self {
        Self {
            time_limit: None,
            node_limit: None,
        }
    }

    /// Limit the search to `nodes` nodes
    #[must_use]
    pub const fn with_node_limit(mut self, nodes: u64) -> Self {
        self.node_limit = Some(nodes);
        self
    }

    /// Limit the search to `time`
    #[must_use]
    pub const fn with_time_limit(mut self, time: Duration) -> Self {
        self.time_limit = Some(time);
        self
    }
}
