//! # Command Definitions
//!
//! Command words and scripted command sequences.

use crate::{Direction, MinotaurError, MinotaurResult, PlayerInput};

/// Help shown by text front ends.
pub const HELP_TEXT: &str = "Commands: w/a/s/d or up/down/left/right (hjkl) to move, \
r/roll to roll the die, c/close to dismiss an encounter, reset, help, q/quit";

/// Looks up a single lowercase command word.
///
/// Vi keys are not included; [`InputHandler`](crate::InputHandler) handles those.
pub fn command_for_word(word: &str) -> Option<PlayerInput> {
    let input = match word {
        "w" | "up" => PlayerInput::Move(Direction::Up),
        "s" | "down" => PlayerInput::Move(Direction::Down),
        "a" | "left" => PlayerInput::Move(Direction::Left),
        "d" | "right" => PlayerInput::Move(Direction::Right),
        "r" | "roll" => PlayerInput::Roll,
        "c" | "close" => PlayerInput::CloseEncounter,
        "reset" | "new" => PlayerInput::Reset,
        "?" | "help" => PlayerInput::Help,
        "q" | "quit" | "exit" => PlayerInput::Quit,
        _ => return None,
    };
    Some(input)
}

/// Parses a whitespace- or comma-separated list of command words.
///
/// Unlike interactive parsing, an unknown word is an error so a typo in a
/// script is reported rather than skipped.
///
/// # Examples
///
/// ```
/// use minotaur::{parse_script, Direction, PlayerInput};
///
/// let script = parse_script("roll, right right\ndown").unwrap();
/// assert_eq!(script.len(), 4);
/// assert_eq!(script[1], PlayerInput::Move(Direction::Right));
/// assert!(parse_script("roll jump").is_err());
/// ```
pub fn parse_script(text: &str) -> MinotaurResult<Vec<PlayerInput>> {
    text.split(|c: char| c.is_whitespace() || c == ',')
        .filter(|word| !word.is_empty())
        .map(|word| {
            let lower = word.to_lowercase();
            command_for_word(&lower).ok_or_else(|| {
                MinotaurError::InvalidConfig(format!("unknown command '{}' in script", word))
            })
        })
        .collect()
}
