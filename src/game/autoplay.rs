//! # Autoplay Module
//!
//! An autopilot that plays a session to the exit: it rolls when out of moves,
//! rolls through combat, closes encounters, and otherwise follows the shortest
//! path to the exit.

use crate::{
    dispatch_effects, shortest_path, Direction, MediaBackend, MinotaurError, MinotaurResult,
    PlayerInput, Position, Session,
};
use log::debug;

/// Autopilot state.
#[derive(Debug, Clone, Default)]
pub struct Autopilot {
    /// Remaining cells of the path being followed, next cell first
    pub current_path: Vec<Position>,
    /// Cell the path leads to
    pub target: Option<Position>,
}

/// Summary of [`Autopilot::run_to_exit`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AutoplayReport {
    /// Commands issued
    pub actions: u32,
    /// Effects the backend failed to perform
    pub media_failures: usize,
    pub won: bool,
}

impl Autopilot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Chooses the next command, or None once the game is won or the maze
    /// has no exit to head for.
    pub fn next_input(&mut self, session: &Session) -> Option<PlayerInput> {
        let state = session.state();
        if state.is_won() {
            return None;
        }

        if let Some(encounter) = &state.active_encounter {
            return Some(if encounter.in_combat {
                PlayerInput::Roll
            } else {
                PlayerInput::CloseEncounter
            });
        }

        if state.moves_left == 0 {
            return Some(PlayerInput::Roll);
        }

        let exit = session.grid().exit_position()?;
        if self.target != Some(exit) {
            self.current_path.clear();
        }

        // If we have a current path, follow it
        if let Some(&next) = self.current_path.first() {
            if let Some(direction) = Direction::from_delta(next - state.position) {
                self.current_path.remove(0);
                return Some(PlayerInput::Move(direction));
            }
            // Path is stale, find a new one
            self.current_path.clear();
        }

        let mut path = shortest_path(session.grid(), state.position, exit)?;
        path.remove(0);
        debug!("Autopilot planned {} steps to {}", path.len(), exit);
        self.target = Some(exit);
        self.current_path = path;

        let next = *self.current_path.first()?;
        self.current_path.remove(0);
        Direction::from_delta(next - state.position).map(PlayerInput::Move)
    }

    /// Drives `session` until it is won, handing effects to `backend`.
    ///
    /// Fails if `max_actions` commands are spent without reaching the exit.
    pub fn run_to_exit<B: MediaBackend + ?Sized>(
        &mut self,
        session: &mut Session,
        backend: &mut B,
        max_actions: u32,
    ) -> MinotaurResult<AutoplayReport> {
        let mut report = AutoplayReport {
            actions: 0,
            media_failures: 0,
            won: false,
        };

        while report.actions < max_actions {
            let input = match self.next_input(session) {
                Some(input) => input,
                None => break,
            };

            let effects = session.handle_input(input)?;
            report.media_failures += dispatch_effects(backend, &effects);
            report.actions += 1;
        }

        report.won = session.state().is_won();
        if !report.won && report.actions >= max_actions {
            return Err(MinotaurError::InvalidState(format!(
                "autopilot did not reach the exit within {} actions",
                max_actions
            )));
        }

        Ok(report)
    }
}
