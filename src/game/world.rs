//! # Maze Grid
//!
//! Square terrain matrix the player walks through.
//!
//! Cells are stored row-major: `cells[y][x]`.

use crate::{config, MinotaurError, MinotaurResult, Position};
use serde::{Deserialize, Serialize};

/// Terrain kinds a maze cell can hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TerrainKind {
    Wall,
    Path,
    Exit,
    Treasure,
}

impl TerrainKind {
    /// Returns true if the player can stand on this terrain.
    pub fn is_passable(self) -> bool {
        !matches!(self, TerrainKind::Wall)
    }

    /// Character used by the ASCII view.
    pub fn glyph(self) -> char {
        match self {
            TerrainKind::Wall => '#',
            TerrainKind::Path => '.',
            TerrainKind::Exit => 'E',
            TerrainKind::Treasure => '$',
        }
    }
}

/// An N×N maze.
///
/// # Examples
///
/// ```
/// use minotaur::{Grid, Position, TerrainKind};
///
/// let mut grid = Grid::new(5).unwrap();
/// assert_eq!(grid.get(Position::new(0, 0)), Some(TerrainKind::Wall));
///
/// grid.set(Position::new(1, 1), TerrainKind::Path).unwrap();
/// assert!(grid.is_passable(Position::new(1, 1)));
/// assert_eq!(grid.get(Position::new(5, 0)), None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawGrid")]
pub struct Grid {
    size: usize,
    cells: Vec<Vec<TerrainKind>>,
}

/// Unchecked serialized form of a [`Grid`].
#[derive(Deserialize)]
struct RawGrid {
    size: usize,
    cells: Vec<Vec<TerrainKind>>,
}

impl TryFrom<RawGrid> for Grid {
    type Error = MinotaurError;

    fn try_from(raw: RawGrid) -> MinotaurResult<Self> {
        let mut grid = Self::new(raw.size)?;

        if raw.cells.len() != raw.size {
            return Err(MinotaurError::InvalidConfig(format!(
                "grid has {} rows, expected {}",
                raw.cells.len(),
                raw.size
            )));
        }
        if let Some(y) = raw.cells.iter().position(|row| row.len() != raw.size) {
            return Err(MinotaurError::InvalidConfig(format!(
                "row {} has {} cells, expected {}",
                y,
                raw.cells[y].len(),
                raw.size
            )));
        }

        grid.cells = raw.cells;
        Ok(grid)
    }
}

impl Grid {
    /// Creates a grid with every cell set to `Wall`.
    pub fn new(size: usize) -> MinotaurResult<Self> {
        if size < config::MIN_MAZE_SIZE {
            return Err(MinotaurError::InvalidConfig(format!(
                "maze size {} is below the minimum of {}",
                size,
                config::MIN_MAZE_SIZE
            )));
        }

        Ok(Self {
            size,
            cells: vec![vec![TerrainKind::Wall; size]; size],
        })
    }

    /// Builds a grid from rows of glyphs (`#`, `.`, `E`, `$`).
    ///
    /// Mostly useful for hand-written layouts in tests and demos.
    pub fn from_rows(rows: &[&str]) -> MinotaurResult<Self> {
        let mut grid = Self::new(rows.len())?;

        for (y, row) in rows.iter().enumerate() {
            let glyphs: Vec<char> = row.chars().collect();
            if glyphs.len() != grid.size {
                return Err(MinotaurError::InvalidConfig(format!(
                    "row {} has {} cells, expected {}",
                    y,
                    glyphs.len(),
                    grid.size
                )));
            }

            for (x, glyph) in glyphs.into_iter().enumerate() {
                grid.cells[y][x] = match glyph {
                    '#' => TerrainKind::Wall,
                    '.' => TerrainKind::Path,
                    'E' => TerrainKind::Exit,
                    '$' => TerrainKind::Treasure,
                    other => {
                        return Err(MinotaurError::InvalidConfig(format!(
                            "unknown glyph '{}' at ({}, {})",
                            other, x, y
                        )))
                    }
                };
            }
        }

        Ok(grid)
    }

    /// Side length of the grid.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Checks whether a position lies inside the grid.
    pub fn in_bounds(&self, pos: Position) -> bool {
        pos.x >= 0 && pos.y >= 0 && (pos.x as usize) < self.size && (pos.y as usize) < self.size
    }

    /// Gets the terrain at a position, or None when out of bounds.
    pub fn get(&self, pos: Position) -> Option<TerrainKind> {
        if self.in_bounds(pos) {
            Some(self.cells[pos.y as usize][pos.x as usize])
        } else {
            None
        }
    }

    /// Sets the terrain at a position.
    pub fn set(&mut self, pos: Position, terrain: TerrainKind) -> MinotaurResult<()> {
        if !self.in_bounds(pos) {
            return Err(MinotaurError::InvalidState(format!(
                "position {} is outside a {}x{} grid",
                pos, self.size, self.size
            )));
        }

        self.cells[pos.y as usize][pos.x as usize] = terrain;
        Ok(())
    }

    /// Returns true if the position is in bounds and not a wall.
    pub fn is_passable(&self, pos: Position) -> bool {
        self.get(pos).map(TerrainKind::is_passable).unwrap_or(false)
    }

    /// Iterates over every position in row-major order.
    pub fn positions(&self) -> impl Iterator<Item = Position> + '_ {
        (0..self.size).flat_map(move |y| {
            (0..self.size).map(move |x| Position::new(x as i32, y as i32))
        })
    }

    /// All positions holding the given terrain.
    pub fn positions_of(&self, terrain: TerrainKind) -> Vec<Position> {
        self.positions()
            .filter(|&pos| self.get(pos) == Some(terrain))
            .collect()
    }

    /// Location of the exit, if the maze has one.
    pub fn exit_position(&self) -> Option<Position> {
        self.positions()
            .find(|&pos| self.get(pos) == Some(TerrainKind::Exit))
    }

    /// Passable cardinal neighbours of a position.
    pub fn passable_neighbours(&self, pos: Position) -> Vec<Position> {
        pos.cardinal_adjacent_positions()
            .into_iter()
            .filter(|&next| self.is_passable(next))
            .collect()
    }

    /// Number of passable cells.
    pub fn passable_count(&self) -> usize {
        self.cells
            .iter()
            .flat_map(|row| row.iter())
            .filter(|terrain| terrain.is_passable())
            .count()
    }

    /// Read access to the rows.
    pub fn rows(&self) -> &[Vec<TerrainKind>] {
        &self.cells
    }
}

impl std::fmt::Display for Grid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for row in &self.cells {
            let line: String = row.iter().map(|terrain| terrain.glyph()).collect();
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_rejects_small_size() {
        assert!(matches!(Grid::new(2), Err(MinotaurError::InvalidConfig(_))));
        assert!(Grid::new(0).is_err());
        assert!(Grid::new(3).is_ok());
    }

    #[test]
    fn test_grid_starts_walled() {
        let grid = Grid::new(4).unwrap();
        assert_eq!(grid.passable_count(), 0);
        assert!(grid.exit_position().is_none());
    }

    #[test]
    fn test_grid_bounds() {
        let grid = Grid::new(4).unwrap();
        assert!(grid.in_bounds(Position::new(3, 3)));
        assert!(!grid.in_bounds(Position::new(4, 0)));
        assert!(!grid.in_bounds(Position::new(0, -1)));
        assert_eq!(grid.get(Position::new(-1, 2)), None);
    }

    #[test]
    fn test_grid_set_out_of_bounds() {
        let mut grid = Grid::new(4).unwrap();
        assert!(grid.set(Position::new(9, 9), TerrainKind::Path).is_err());
    }

    #[test]
    fn test_grid_from_rows_is_row_major() {
        let grid = Grid::from_rows(&["#.#", "..E", "$##"]).unwrap();
        assert_eq!(grid.get(Position::new(1, 0)), Some(TerrainKind::Path));
        assert_eq!(grid.get(Position::new(2, 1)), Some(TerrainKind::Exit));
        assert_eq!(grid.get(Position::new(0, 2)), Some(TerrainKind::Treasure));
        assert_eq!(grid.exit_position(), Some(Position::new(2, 1)));
        assert_eq!(grid.to_string(), "#.#\n..E\n$##\n");
    }

    #[test]
    fn test_grid_from_rows_rejects_ragged_input() {
        assert!(Grid::from_rows(&["#.#", "..", "###"]).is_err());
        assert!(Grid::from_rows(&["#.#", ".?.", "###"]).is_err());
    }

    #[test]
    fn test_grid_json_round_trip() {
        let grid = Grid::from_rows(&["#.#", "..E", "$##"]).unwrap();
        let json = serde_json::to_string(&grid).unwrap();
        let loaded: Grid = serde_json::from_str(&json).unwrap();
        assert_eq!(loaded, grid);
    }

    #[test]
    fn test_grid_json_rejects_mismatched_cells() {
        assert!(serde_json::from_str::<Grid>(r#"{"size":5,"cells":[]}"#).is_err());
        assert!(serde_json::from_str::<Grid>(
            r#"{"size":3,"cells":[["wall","wall","wall"],["wall"],["wall","wall","wall"]]}"#
        )
        .is_err());
        assert!(serde_json::from_str::<Grid>(r#"{"size":1,"cells":[["path"]]}"#).is_err());
    }

    #[test]
    fn test_passable_neighbours() {
        let grid = Grid::from_rows(&["...", ".#.", "..."]).unwrap();
        let neighbours = grid.passable_neighbours(Position::new(1, 0));
        assert_eq!(neighbours.len(), 2);
        assert!(!neighbours.contains(&Position::new(1, 1)));
    }
}
