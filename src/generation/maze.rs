//! # Maze Generation
//!
//! Randomized depth-first carving of a perfect maze.
//!
//! Carving works on the sublattice of cells two steps apart from the start.
//! Each lattice cell is opened exactly once, together with the single wall cell
//! between it and the cell it was reached from, so the corridors form a
//! spanning tree: every passable cell is reachable and there are no loops.

use super::utils;
use crate::{
    config, Direction, Generator, Grid, MazeConfig, MinotaurResult, Position, TerrainKind,
};
use log::{debug, warn};
use rand::seq::SliceRandom;
use rand::{rngs::StdRng, Rng};

/// Maze generator using an explicit stack instead of recursion.
///
/// # Examples
///
/// ```
/// use minotaur::{DepthFirstCarver, Generator, MazeConfig, Position, TerrainKind};
/// use minotaur::generation::utils::create_rng;
///
/// let config = MazeConfig::new(7, 10);
/// let grid = DepthFirstCarver::new()
///     .generate(&config, &mut create_rng(&config))
///     .unwrap();
///
/// assert_eq!(grid.get(Position::new(0, 0)), Some(TerrainKind::Path));
/// assert_eq!(grid.exit_position(), Some(Position::new(8, 8)));
/// ```
#[derive(Debug, Clone)]
pub struct DepthFirstCarver {
    /// Placement attempts per treasure before giving up
    pub max_treasure_attempts: u32,
    /// Whether to check connectivity and acyclicity after carving
    pub validate_output: bool,
}

impl DepthFirstCarver {
    /// Creates a carver with default settings.
    pub fn new() -> Self {
        Self {
            max_treasure_attempts: config::MAX_TREASURE_ATTEMPTS,
            validate_output: true,
        }
    }

    /// Carves corridors into an all-wall grid.
    ///
    /// Returns the number of lattice cells visited, which is also the number
    /// of pushes the stack saw before draining.
    fn carve<R: Rng + ?Sized>(
        &self,
        grid: &mut Grid,
        config: &MazeConfig,
        rng: &mut R,
    ) -> MinotaurResult<usize> {
        let (low, high) = config.carve_bounds();
        let in_carve_bounds = |pos: Position| {
            pos.x >= low && pos.x <= high && pos.y >= low && pos.y <= high
        };

        let start = config.start_position();
        grid.set(start, TerrainKind::Path)?;
        let mut stack = vec![start];
        let mut visited = 1;

        while let Some(cell) = stack.pop() {
            let mut directions = Direction::all();
            directions.shuffle(rng);

            for direction in directions {
                let neighbour = cell.offset(direction, 2);
                if !in_carve_bounds(neighbour) || grid.get(neighbour) != Some(TerrainKind::Wall) {
                    continue;
                }

                grid.set(cell.offset(direction, 1), TerrainKind::Path)?;
                grid.set(neighbour, TerrainKind::Path)?;
                stack.push(neighbour);
                visited += 1;
            }
        }

        Ok(visited)
    }

    /// Marks the far-corner lattice cell as the exit.
    fn place_exit(&self, grid: &mut Grid, config: &MazeConfig) -> MinotaurResult<()> {
        let exit = config.exit_position();
        grid.set(exit, TerrainKind::Exit)?;
        debug!("Exit placed at {}", exit);
        Ok(())
    }

    /// Scatters treasure over carved cells by rejection sampling.
    ///
    /// Never covers the start or the exit. Returns how many were placed,
    /// which is fewer than requested only when attempts ran out.
    fn place_treasures<R: Rng + ?Sized>(
        &self,
        grid: &mut Grid,
        config: &MazeConfig,
        rng: &mut R,
    ) -> MinotaurResult<usize> {
        let start = config.start_position();
        let size = grid.size() as i32;
        let mut placed = 0;

        for _ in 0..config.treasure_count {
            let mut success = false;

            for _ in 0..self.max_treasure_attempts {
                let candidate = Position::new(rng.gen_range(0..size), rng.gen_range(0..size));
                if candidate != start && grid.get(candidate) == Some(TerrainKind::Path) {
                    grid.set(candidate, TerrainKind::Treasure)?;
                    success = true;
                    break;
                }
            }

            if !success {
                warn!(
                    "Gave up placing treasure after {} attempts ({} of {} placed)",
                    self.max_treasure_attempts, placed, config.treasure_count
                );
                break;
            }
            placed += 1;
        }

        Ok(placed)
    }
}

impl Generator<Grid> for DepthFirstCarver {
    fn generate(&self, config: &MazeConfig, rng: &mut StdRng) -> MinotaurResult<Grid> {
        config.validate()?;

        // Create empty grid (all walls)
        let mut grid = Grid::new(config.size)?;

        let visited = self.carve(&mut grid, config, rng)?;

        // Exit goes in before treasure so treasure never lands on it
        if config.place_exit {
            self.place_exit(&mut grid, config)?;
        }

        let treasures = self.place_treasures(&mut grid, config, rng)?;

        if self.validate_output {
            self.validate(&grid, config)?;
        }

        debug!(
            "{} carved a {}x{} maze: {} lattice cells, {} passable, {} treasures",
            self.generator_type(),
            config.size,
            config.size,
            visited,
            grid.passable_count(),
            treasures
        );

        Ok(grid)
    }

    fn validate(&self, grid: &Grid, config: &MazeConfig) -> MinotaurResult<()> {
        utils::validate_maze(grid, config)
    }

    fn generator_type(&self) -> &'static str {
        "DepthFirstCarver"
    }
}

impl Default for DepthFirstCarver {
    fn default() -> Self {
        Self::new()
    }
}
