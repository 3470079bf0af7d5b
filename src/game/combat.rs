//! # Combat
//!
//! Dice-driven fight against the monster of an active encounter.

use log::debug;
use serde::{Deserialize, Serialize};

/// Phase of the combat state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CombatPhase {
    /// No fight running
    Idle,
    /// Each roll damages the enemy
    InCombat,
    /// Enemy defeated; waiting for the encounter to close
    Resolved,
}

/// Result of feeding one roll into combat.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CombatOutcome {
    /// The roll did not apply (combat not running)
    Ignored,
    /// Enemy took damage and is still standing
    Hit { remaining: u32 },
    /// This roll brought the enemy to zero
    Defeated,
}

/// Combat state for the current encounter.
///
/// # Examples
///
/// ```
/// use minotaur::{Combat, CombatOutcome, CombatPhase};
///
/// let mut combat = Combat::new();
/// combat.start(10);
/// assert_eq!(combat.apply_roll(4), CombatOutcome::Hit { remaining: 6 });
/// assert_eq!(combat.apply_roll(6), CombatOutcome::Defeated);
/// assert_eq!(combat.phase, CombatPhase::Resolved);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Combat {
    pub phase: CombatPhase,
    pub enemy_health: u32,
    pub max_health: u32,
    /// Most recent roll applied, for display
    pub last_roll: Option<u32>,
}

impl Combat {
    pub fn new() -> Self {
        Self {
            phase: CombatPhase::Idle,
            enemy_health: 0,
            max_health: 0,
            last_roll: None,
        }
    }

    /// Moves from Idle into InCombat with a fresh enemy.
    ///
    /// Has no effect unless combat is idle.
    pub fn start(&mut self, enemy_health: u32) -> bool {
        if self.phase != CombatPhase::Idle {
            return false;
        }

        self.phase = CombatPhase::InCombat;
        self.enemy_health = enemy_health;
        self.max_health = enemy_health;
        self.last_roll = None;
        debug!("Combat started against {} health", enemy_health);
        true
    }

    /// Applies a roll as damage, flooring health at zero.
    pub fn apply_roll(&mut self, roll: u32) -> CombatOutcome {
        if self.phase != CombatPhase::InCombat {
            return CombatOutcome::Ignored;
        }

        self.last_roll = Some(roll);
        self.enemy_health = self.enemy_health.saturating_sub(roll);

        if self.enemy_health == 0 {
            self.phase = CombatPhase::Resolved;
            debug!("Enemy defeated by a roll of {}", roll);
            CombatOutcome::Defeated
        } else {
            CombatOutcome::Hit {
                remaining: self.enemy_health,
            }
        }
    }

    /// Returns a resolved combat to Idle.
    ///
    /// Returns false if combat was not resolved, so callers can tell a
    /// duplicate completion apart from the first one.
    pub fn finish(&mut self) -> bool {
        if self.phase != CombatPhase::Resolved {
            return false;
        }

        *self = Self::new();
        true
    }

    pub fn is_active(&self) -> bool {
        self.phase == CombatPhase::InCombat
    }
}

impl Default for Combat {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_four_then_six_resolves_once() {
        let mut combat = Combat::new();
        assert!(combat.start(10));

        assert_eq!(combat.apply_roll(4), CombatOutcome::Hit { remaining: 6 });
        assert_eq!(combat.phase, CombatPhase::InCombat);

        assert_eq!(combat.apply_roll(6), CombatOutcome::Defeated);
        assert_eq!(combat.phase, CombatPhase::Resolved);
        assert_eq!(combat.enemy_health, 0);

        // Further rolls do not resolve again
        assert_eq!(combat.apply_roll(3), CombatOutcome::Ignored);
        assert!(combat.finish());
        assert!(!combat.finish());
        assert_eq!(combat.phase, CombatPhase::Idle);
    }

    #[test]
    fn test_overkill_floors_at_zero() {
        let mut combat = Combat::new();
        combat.start(3);
        assert_eq!(combat.apply_roll(6), CombatOutcome::Defeated);
        assert_eq!(combat.enemy_health, 0);
        assert_eq!(combat.last_roll, Some(6));
    }

    #[test]
    fn test_idle_ignores_rolls() {
        let mut combat = Combat::new();
        assert_eq!(combat.apply_roll(5), CombatOutcome::Ignored);
        assert!(!combat.is_active());
    }

    #[test]
    fn test_start_requires_idle() {
        let mut combat = Combat::new();
        assert!(combat.start(10));
        assert!(!combat.start(20));
        assert_eq!(combat.max_health, 10);
    }
}
