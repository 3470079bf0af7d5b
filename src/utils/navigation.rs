//! # Maze Navigation
//!
//! Reachability and shortest-path queries over a [`Grid`], built on the
//! `pathfinding` crate's breadth-first search.

use crate::{Direction, Grid, Position};
use ::pathfinding::prelude::{bfs, bfs_reach};
use std::collections::HashSet;

/// Every passable cell reachable from `start` by cardinal steps.
///
/// Empty if `start` itself is not passable.
pub fn reachable_from(grid: &Grid, start: Position) -> HashSet<Position> {
    if !grid.is_passable(start) {
        return HashSet::new();
    }

    bfs_reach(start, |&pos| grid.passable_neighbours(pos)).collect()
}

/// Shortest walk from `from` to `to`, both ends included.
pub fn shortest_path(grid: &Grid, from: Position, to: Position) -> Option<Vec<Position>> {
    if !grid.is_passable(from) || !grid.is_passable(to) {
        return None;
    }

    bfs(&from, |&pos| grid.passable_neighbours(pos), |&pos| pos == to)
}

/// Direction of the first step along the shortest path, if one exists.
pub fn first_step_towards(grid: &Grid, from: Position, to: Position) -> Option<Direction> {
    let path = shortest_path(grid, from, to)?;
    let next = *path.get(1)?;
    Direction::from_delta(next - from)
}

/// Number of unordered pairs of orthogonally adjacent passable cells.
pub fn passable_edge_count(grid: &Grid) -> usize {
    grid.positions()
        .filter(|&pos| grid.is_passable(pos))
        .map(|pos| {
            [Direction::Right, Direction::Down]
                .into_iter()
                .filter(|&direction| grid.is_passable(pos + direction.to_delta()))
                .count()
        })
        .sum()
}

/// True if the passable cells form a single tree containing `start`.
///
/// A connected graph with one edge fewer than it has nodes has no cycles, so
/// this is exactly "one simple path between any two passable cells".
pub fn is_perfect_maze(grid: &Grid, start: Position) -> bool {
    let passable = grid.passable_count();
    if passable == 0 {
        return false;
    }

    reachable_from(grid, start).len() == passable && passable_edge_count(grid) == passable - 1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reachable_stops_at_walls() {
        let grid = Grid::from_rows(&["..#.", "#.#.", "#..#", "####"]).unwrap();
        let reached = reachable_from(&grid, Position::origin());
        assert_eq!(reached.len(), 5);
        assert!(!reached.contains(&Position::new(3, 0)));
    }

    #[test]
    fn test_reachable_from_wall_is_empty() {
        let grid = Grid::from_rows(&["#..", "...", "..."]).unwrap();
        assert!(reachable_from(&grid, Position::origin()).is_empty());
    }

    #[test]
    fn test_shortest_path_ends() {
        let grid = Grid::from_rows(&["...", "##.", "E.."]).unwrap();
        let path = shortest_path(&grid, Position::origin(), Position::new(0, 2)).unwrap();
        assert_eq!(path.first(), Some(&Position::origin()));
        assert_eq!(path.last(), Some(&Position::new(0, 2)));
        assert_eq!(path.len(), 7);
        assert_eq!(
            first_step_towards(&grid, Position::origin(), Position::new(0, 2)),
            Some(Direction::Right)
        );
    }

    #[test]
    fn test_no_path_across_walls() {
        let grid = Grid::from_rows(&[".#.", "###", "..."]).unwrap();
        assert!(shortest_path(&grid, Position::origin(), Position::new(2, 0)).is_none());
        assert!(first_step_towards(&grid, Position::origin(), Position::origin()).is_none());
    }

    #[test]
    fn test_perfect_maze_detection() {
        let tree = Grid::from_rows(&["...", "#.#", "#.."]).unwrap();
        assert!(is_perfect_maze(&tree, Position::origin()));

        let cycle = Grid::from_rows(&["...", ".#.", "..."]).unwrap();
        assert_eq!(passable_edge_count(&cycle), 8);
        assert!(!is_perfect_maze(&cycle, Position::origin()));

        let split = Grid::from_rows(&[".#.", "###", "###"]).unwrap();
        assert!(!is_perfect_maze(&split, Position::origin()));
    }
}
