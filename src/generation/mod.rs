//! # Generation Module
//!
//! Procedural content generation: maze layouts and the encounter roster.
//!
//! Generation is deterministic for a given [`MazeConfig`] seed, since every
//! random choice goes through the `StdRng` handed to the generator.

pub mod encounters;
pub mod maze;

pub use encounters::*;
pub use maze::*;

use crate::{config, MinotaurError, MinotaurResult, Position};
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

/// Where carving starts and which cells it may touch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MazeLayout {
    /// Start at (0, 0); corridors may run along the outer edge
    Open,
    /// Start at (1, 1); the outer ring always stays wall
    Bordered,
}

/// Configuration for maze generation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MazeConfig {
    /// Random seed for reproducible generation
    pub seed: u64,
    /// Side length of the square grid
    pub size: usize,
    pub layout: MazeLayout,
    /// Treasure markers scattered over carved cells
    pub treasure_count: usize,
    /// Whether to mark an exit in the far corner
    pub place_exit: bool,
}

impl MazeConfig {
    /// Creates an open-layout configuration with an exit and no treasure.
    ///
    /// # Examples
    ///
    /// ```
    /// use minotaur::{MazeConfig, Position};
    ///
    /// let config = MazeConfig::new(42, 10);
    /// assert_eq!(config.start_position(), Position::new(0, 0));
    /// assert_eq!(config.exit_position(), Position::new(8, 8));
    /// assert!(config.validate().is_ok());
    /// ```
    pub fn new(seed: u64, size: usize) -> Self {
        Self {
            seed,
            size,
            layout: MazeLayout::Open,
            treasure_count: 0,
            place_exit: true,
        }
    }

    /// The 10×10 encounter variant.
    pub fn minotaur(seed: u64) -> Self {
        Self {
            treasure_count: 3,
            ..Self::new(seed, config::MINOTAUR_MAZE_SIZE)
        }
    }

    /// The 15×15 walled variant with its exit at (13, 13).
    pub fn amazing_maze(seed: u64) -> Self {
        Self {
            layout: MazeLayout::Bordered,
            ..Self::new(seed, config::AMAZING_MAZE_SIZE)
        }
    }

    /// Lowest and highest coordinate carving may reach.
    pub fn carve_bounds(&self) -> (i32, i32) {
        let size = self.size as i32;
        match self.layout {
            MazeLayout::Open => (0, size - 1),
            MazeLayout::Bordered => (1, size - 2),
        }
    }

    /// Cell the player starts on.
    pub fn start_position(&self) -> Position {
        let (low, _) = self.carve_bounds();
        Position::new(low, low)
    }

    /// Carved cell nearest the corner opposite the start.
    pub fn exit_position(&self) -> Position {
        let (low, high) = self.carve_bounds();
        let last = low + ((high - low) / 2) * 2;
        Position::new(last, last)
    }

    /// Checks that a maze can be carved from this configuration.
    pub fn validate(&self) -> MinotaurResult<()> {
        if self.size < config::MIN_MAZE_SIZE {
            return Err(MinotaurError::InvalidConfig(format!(
                "maze size {} is below the minimum of {}",
                self.size,
                config::MIN_MAZE_SIZE
            )));
        }

        if self.place_exit && self.exit_position() == self.start_position() {
            return Err(MinotaurError::InvalidConfig(format!(
                "a {:?} maze of size {} has no room for an exit",
                self.layout, self.size
            )));
        }

        Ok(())
    }
}

impl Default for MazeConfig {
    fn default() -> Self {
        Self::minotaur(42)
    }
}

/// Trait for procedural generators.
pub trait Generator<T> {
    /// Generates content using the provided configuration and random number generator.
    fn generate(&self, config: &MazeConfig, rng: &mut StdRng) -> MinotaurResult<T>;

    /// Validates that the generated content meets requirements.
    fn validate(&self, content: &T, config: &MazeConfig) -> MinotaurResult<()>;

    /// Gets the generator type name for logging and debugging.
    fn generator_type(&self) -> &'static str;
}

/// Utility functions for generation algorithms.
pub mod utils {
    use super::*;
    use crate::{is_perfect_maze, Grid, TerrainKind};
    use rand::SeedableRng;

    /// Creates a seeded random number generator from the config.
    pub fn create_rng(config: &MazeConfig) -> StdRng {
        StdRng::seed_from_u64(config.seed)
    }

    /// Checks the structural guarantees of a finished maze.
    ///
    /// The start must be passable, every passable cell must hang off a single
    /// loop-free tree, and there must be exactly one exit when one was asked for.
    pub fn validate_maze(grid: &Grid, config: &MazeConfig) -> MinotaurResult<()> {
        let start = config.start_position();
        if !grid.is_passable(start) {
            return Err(MinotaurError::GenerationFailed(format!(
                "start {} is not passable",
                start
            )));
        }

        if !is_perfect_maze(grid, start) {
            return Err(MinotaurError::GenerationFailed(
                "maze is disconnected or contains a loop".to_string(),
            ));
        }

        let exits = grid.positions_of(TerrainKind::Exit).len();
        let expected = usize::from(config.place_exit);
        if exits != expected {
            return Err(MinotaurError::GenerationFailed(format!(
                "maze has {} exits, expected {}",
                exits, expected
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_presets() {
        let minotaur = MazeConfig::minotaur(1);
        assert_eq!(minotaur.size, 10);
        assert_eq!(minotaur.layout, MazeLayout::Open);
        assert_eq!(minotaur.start_position(), Position::new(0, 0));

        let amazing = MazeConfig::amazing_maze(1);
        assert_eq!(amazing.size, 15);
        assert_eq!(amazing.start_position(), Position::new(1, 1));
        assert_eq!(amazing.exit_position(), Position::new(13, 13));
    }

    #[test]
    fn test_exit_lands_on_lattice() {
        assert_eq!(MazeConfig::new(0, 11).exit_position(), Position::new(10, 10));
        assert_eq!(MazeConfig::new(0, 3).exit_position(), Position::new(2, 2));

        let mut bordered = MazeConfig::new(0, 10);
        bordered.layout = MazeLayout::Bordered;
        assert_eq!(bordered.exit_position(), Position::new(7, 7));
    }

    #[test]
    fn test_validate_rejects_small_sizes() {
        assert!(MazeConfig::new(0, 2).validate().is_err());
        assert!(MazeConfig::new(0, 3).validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bordered_without_room_for_exit() {
        let mut config = MazeConfig::new(0, 4);
        config.layout = MazeLayout::Bordered;
        assert!(config.validate().is_err());

        config.place_exit = false;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_utils_rng_is_reproducible() {
        use rand::Rng;

        let config = MazeConfig::new(12345, 9);
        let a: u64 = utils::create_rng(&config).gen();
        let b: u64 = utils::create_rng(&config).gen();
        assert_eq!(a, b);
    }
}
