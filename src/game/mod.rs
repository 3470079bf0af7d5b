//! # Game Module
//!
//! Core game state, maze grid representation, and the transitions that mutate them.
//!
//! This module contains the building blocks of a maze session:
//! - Grid and terrain representation
//! - Movement validation
//! - Encounter probability and combat state machines
//! - Effects returned to the presentation layer
//! - The session that owns all of the above

pub mod autoplay;
pub mod combat;
pub mod effects;
pub mod encounter;
pub mod movement;
pub mod session;
pub mod settings;
pub mod state;
pub mod timers;
pub mod world;

pub use autoplay::*;
pub use combat::*;
pub use effects::*;
pub use encounter::*;
pub use movement::*;
pub use session::*;
pub use settings::*;
pub use state::*;
pub use timers::*;
pub use world::*;

use serde::{Deserialize, Serialize};

/// A cell coordinate in the maze.
///
/// `x` is the column and `y` is the row; `y` grows downward.
///
/// # Examples
///
/// ```
/// use minotaur::Position;
///
/// let pos = Position::new(2, 5);
/// assert_eq!(pos.x, 2);
/// assert_eq!(pos.y, 5);
/// assert_eq!(pos.cardinal_adjacent_positions().len(), 4);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    /// Creates a new position with the given coordinates.
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Returns the origin position (0, 0).
    pub fn origin() -> Self {
        Self::new(0, 0)
    }

    /// Calculates the Manhattan distance to another position.
    ///
    /// # Examples
    ///
    /// ```
    /// use minotaur::Position;
    ///
    /// let pos1 = Position::new(0, 0);
    /// let pos2 = Position::new(3, 4);
    /// assert_eq!(pos1.manhattan_distance(pos2), 7);
    /// ```
    pub fn manhattan_distance(self, other: Position) -> u32 {
        ((self.x - other.x).abs() + (self.y - other.y).abs()) as u32
    }

    /// Returns the 4 cardinal adjacent positions (no diagonals).
    pub fn cardinal_adjacent_positions(self) -> Vec<Position> {
        Direction::all()
            .into_iter()
            .map(|direction| self + direction.to_delta())
            .collect()
    }

    /// Returns the position `steps` cells away in `direction`.
    pub fn offset(self, direction: Direction, steps: i32) -> Position {
        let delta = direction.to_delta();
        Position::new(self.x + delta.x * steps, self.y + delta.y * steps)
    }
}

impl std::ops::Add for Position {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self::new(self.x + other.x, self.y + other.y)
    }
}

impl std::ops::Sub for Position {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self::new(self.x - other.x, self.y - other.y)
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Logical movement directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Converts a direction to a unit position delta.
    ///
    /// # Examples
    ///
    /// ```
    /// use minotaur::{Direction, Position};
    ///
    /// assert_eq!(Direction::Up.to_delta(), Position::new(0, -1));
    /// assert_eq!(Direction::Right.to_delta(), Position::new(1, 0));
    /// ```
    pub fn to_delta(self) -> Position {
        match self {
            Direction::Up => Position::new(0, -1),
            Direction::Down => Position::new(0, 1),
            Direction::Left => Position::new(-1, 0),
            Direction::Right => Position::new(1, 0),
        }
    }

    /// Converts a unit delta back to a direction.
    ///
    /// Returns None if the delta is not a single cardinal step.
    pub fn from_delta(delta: Position) -> Option<Direction> {
        match (delta.x, delta.y) {
            (0, -1) => Some(Direction::Up),
            (0, 1) => Some(Direction::Down),
            (-1, 0) => Some(Direction::Left),
            (1, 0) => Some(Direction::Right),
            _ => None,
        }
    }

    /// Returns all 4 directions.
    pub fn all() -> [Direction; 4] {
        [
            Direction::Up,
            Direction::Down,
            Direction::Left,
            Direction::Right,
        ]
    }
}
