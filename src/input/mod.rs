//! # Input Module
//!
//! Maps raw text input onto logical player commands.
//!
//! Only logical events reach the game: a direction, a roll, closing an
//! encounter, or resetting the board. Keyboard and button wiring belong to
//! whatever front end produces the text.

pub mod commands;

pub use commands::*;

use crate::Direction;
use serde::{Deserialize, Serialize};

/// Logical commands a player can issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayerInput {
    /// Step one cell
    Move(Direction),
    /// Roll the die
    Roll,
    /// Dismiss the current encounter
    CloseEncounter,
    /// Regenerate the maze
    Reset,
    /// Show help information
    Help,
    /// Quit the game
    Quit,
}

/// Input handler for text front ends.
///
/// # Examples
///
/// ```
/// use minotaur::{Direction, InputHandler, PlayerInput};
///
/// let input_handler = InputHandler::new();
/// assert_eq!(input_handler.parse_line("w"), Some(PlayerInput::Move(Direction::Up)));
/// assert_eq!(input_handler.parse_line("k"), Some(PlayerInput::Move(Direction::Up)));
/// assert_eq!(input_handler.parse_line("  ROLL "), Some(PlayerInput::Roll));
/// assert_eq!(input_handler.parse_line("dance"), None);
/// ```
#[derive(Debug, Clone)]
pub struct InputHandler {
    /// Whether to accept Vi-style movement keys (hjkl)
    pub vi_keys_enabled: bool,
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl InputHandler {
    /// Creates a new input handler.
    pub fn new() -> Self {
        Self {
            vi_keys_enabled: true,
        }
    }

    /// Parses one line of input into a command.
    ///
    /// Returns None for blank or unrecognised lines.
    pub fn parse_line(&self, line: &str) -> Option<PlayerInput> {
        let word = line.trim().to_lowercase();
        if word.is_empty() {
            return None;
        }

        if self.vi_keys_enabled {
            let vi_move = match word.as_str() {
                "h" => Some(Direction::Left),
                "j" => Some(Direction::Down),
                "k" => Some(Direction::Up),
                "l" => Some(Direction::Right),
                _ => None,
            };
            if let Some(direction) = vi_move {
                return Some(PlayerInput::Move(direction));
            }
        }

        command_for_word(&word)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wasd_and_words() {
        let handler = InputHandler::new();
        assert_eq!(handler.parse_line("a"), Some(PlayerInput::Move(Direction::Left)));
        assert_eq!(handler.parse_line("down"), Some(PlayerInput::Move(Direction::Down)));
        assert_eq!(handler.parse_line("close"), Some(PlayerInput::CloseEncounter));
        assert_eq!(handler.parse_line("q"), Some(PlayerInput::Quit));
        assert_eq!(handler.parse_line("   "), None);
    }

    #[test]
    fn test_vi_keys_can_be_disabled() {
        let handler = InputHandler {
            vi_keys_enabled: false,
        };
        assert_eq!(handler.parse_line("j"), None);
        assert_eq!(handler.parse_line("s"), Some(PlayerInput::Move(Direction::Down)));
    }
}
