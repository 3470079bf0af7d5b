//! # Movement Validation
//!
//! Single-step collision rules for the player.

use crate::{Direction, Grid, Position};

/// Computes where a single step in `direction` leads.
///
/// Returns the neighbouring cell when it is in bounds and not a wall.
/// Otherwise the original position comes back unchanged: blocked moves are
/// ignored rather than reported.
///
/// # Examples
///
/// ```
/// use minotaur::{try_move, Direction, Grid, Position};
///
/// let grid = Grid::from_rows(&["..#", "###", "###"]).unwrap();
/// let start = Position::new(0, 0);
///
/// assert_eq!(try_move(&grid, start, Direction::Right), Position::new(1, 0));
/// assert_eq!(try_move(&grid, start, Direction::Down), start);
/// assert_eq!(try_move(&grid, start, Direction::Left), start);
/// ```
pub fn try_move(grid: &Grid, position: Position, direction: Direction) -> Position {
    let candidate = position + direction.to_delta();
    if grid.is_passable(candidate) {
        candidate
    } else {
        position
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn corridor() -> Grid {
        Grid::from_rows(&["...#", "#.##", "#..E", "####"]).unwrap()
    }

    #[test]
    fn test_move_into_path() {
        let grid = corridor();
        assert_eq!(
            try_move(&grid, Position::new(1, 0), Direction::Down),
            Position::new(1, 1)
        );
    }

    #[test]
    fn test_move_onto_exit() {
        let grid = corridor();
        assert_eq!(
            try_move(&grid, Position::new(2, 2), Direction::Right),
            Position::new(3, 2)
        );
    }

    #[test]
    fn test_wall_rejection_is_idempotent() {
        let grid = corridor();
        let start = Position::new(2, 0);
        let mut pos = start;
        for _ in 0..5 {
            pos = try_move(&grid, pos, Direction::Right);
            assert_eq!(pos, start);
        }
    }

    #[test]
    fn test_edge_of_grid_is_blocked() {
        let grid = corridor();
        let origin = Position::origin();
        assert_eq!(try_move(&grid, origin, Direction::Up), origin);
        assert_eq!(try_move(&grid, origin, Direction::Left), origin);
    }
}
