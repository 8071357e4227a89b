//! Board manager configuration.

use kanban_models::Board;
use kanban_persistence::BOARD_KEY;

/// What a fresh board looks like when the store has no snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SeedMode {
    /// Every stage, no cards.
    Empty,
    /// Every stage with the example cards.
    #[default]
    Examples,
}

impl SeedMode {
    /// Builds the seed board.
    pub fn board(&self) -> Board {
        match self {
            SeedMode::Empty => Board::new(),
            SeedMode::Examples => Board::with_example_cards(),
        }
    }
}

/// Configuration for the board manager.
#[derive(Debug, Clone)]
pub struct BoardConfig {
    /// Store key holding the board snapshot.
    pub storage_key: String,
    /// Seed used when no snapshot exists.
    pub seed: SeedMode,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            storage_key: BOARD_KEY.to_string(),
            seed: SeedMode::default(),
        }
    }
}

impl BoardConfig {
    /// Creates a new config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the storage key.
    pub fn with_storage_key(mut self, key: impl Into<String>) -> Self {
        self.storage_key = key.into();
        self
    }

    /// Sets the seed mode.
    pub fn with_seed(mut self, seed: SeedMode) -> Self {
        self.seed = seed;
        self
    }
}
