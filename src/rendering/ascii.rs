//! # ASCII View
//!
//! Board and status lines drawn from a [`Snapshot`].

use crate::{CombatPhase, GameCompletionState, Position, Snapshot};

/// Glyph drawn on the player's cell.
pub const PLAYER_GLYPH: char = '@';

/// Text renderer with an optional message log.
#[derive(Debug, Clone)]
pub struct AsciiRenderer {
    /// Message history, oldest first
    pub messages: Vec<String>,
    /// Maximum number of messages to keep
    pub max_messages: usize,
}

impl Default for AsciiRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl AsciiRenderer {
    pub fn new() -> Self {
        Self {
            messages: Vec::new(),
            max_messages: 5,
        }
    }

    /// Appends a message, dropping the oldest past the limit.
    pub fn add_message(&mut self, message: String) {
        self.messages.push(message);
        if self.messages.len() > self.max_messages {
            let overflow = self.messages.len() - self.max_messages;
            self.messages.drain(..overflow);
        }
    }

    /// Draws the board with the player on it.
    ///
    /// # Examples
    ///
    /// ```
    /// use minotaur::{AsciiRenderer, GameConfig, Session};
    ///
    /// let session = Session::new(GameConfig::amazing_maze(1)).unwrap();
    /// let board = AsciiRenderer::new().render_board(&session.snapshot());
    /// assert_eq!(board.lines().count(), 15);
    /// assert!(board.lines().nth(1).unwrap().starts_with("#@"));
    /// ```
    pub fn render_board(&self, snapshot: &Snapshot) -> String {
        let grid = &snapshot.grid;
        let mut out = String::with_capacity((grid.size() + 1) * grid.size());

        for (y, row) in grid.rows().iter().enumerate() {
            for (x, terrain) in row.iter().enumerate() {
                if Position::new(x as i32, y as i32) == snapshot.position {
                    out.push(PLAYER_GLYPH);
                } else {
                    out.push(terrain.glyph());
                }
            }
            out.push('\n');
        }

        out
    }

    /// One-line summary of moves, encounter chance and combat.
    pub fn render_status(&self, snapshot: &Snapshot) -> String {
        let mut status = format!(
            "Moves left: {} | Monster probability: {:.1}%",
            snapshot.moves_left,
            snapshot.encounter_probability * 100.0
        );

        if let Some(encounter) = &snapshot.active_encounter {
            status.push_str(&format!(" | Encounter: {}", encounter.template.name));
        }

        match snapshot.combat_phase {
            CombatPhase::InCombat => {
                status.push_str(&format!(" | Enemy health: {}", snapshot.enemy_health))
            }
            CombatPhase::Resolved => status.push_str(" | Enemy defeated!"),
            CombatPhase::Idle => {}
        }

        if snapshot.completion_state == GameCompletionState::Won {
            status.push_str(" | You escaped the maze!");
        }

        status
    }

    /// Board, status line and message log.
    pub fn render(&self, snapshot: &Snapshot) -> String {
        let mut out = self.render_board(snapshot);
        out.push_str(&self.render_status(snapshot));
        out.push('\n');
        for message in &self.messages {
            out.push_str(message);
            out.push('\n');
        }
        out
    }
}
