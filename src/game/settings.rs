//! # Game Settings
//!
//! Tunable parameters for a session, with presets for the two game variants
//! and JSON loading.

use crate::{config, EncounterKind, EncounterTable, MazeConfig, MinotaurError, MinotaurResult};
use log::info;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Built-in game variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum GameVariant {
    /// 10×10 open maze with monsters, treasure and combat
    Minotaur,
    /// 15×15 walled maze, exit only
    AmazingMaze,
}

/// Encounter tuning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EncounterConfig {
    pub enabled: bool,
    /// Probability after a reset
    pub base_probability: f64,
    /// Added after each miss
    pub probability_step: f64,
    pub table: EncounterTable,
}

impl Default for EncounterConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            base_probability: config::BASE_ENCOUNTER_PROBABILITY,
            probability_step: config::ENCOUNTER_PROBABILITY_STEP,
            table: EncounterTable::default_monsters(),
        }
    }
}

/// Combat tuning.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CombatConfig {
    /// Replaces every monster's own health when set
    pub enemy_health_override: Option<u32>,
}

/// Timer delays in milliseconds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerConfig {
    pub auto_reset_delay_ms: u64,
    pub defeat_fallback_delay_ms: u64,
}

impl Default for TimerConfig {
    fn default() -> Self {
        Self {
            auto_reset_delay_ms: config::AUTO_RESET_DELAY_MS,
            defeat_fallback_delay_ms: config::DEFEAT_FALLBACK_DELAY_MS,
        }
    }
}

/// Complete configuration of a session.
///
/// # Examples
///
/// ```
/// use minotaur::{GameConfig, GameVariant};
///
/// let config = GameConfig::for_variant(GameVariant::AmazingMaze, 9);
/// assert_eq!(config.maze.size, 15);
/// assert!(!config.encounters.enabled);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    pub maze: MazeConfig,
    pub encounters: EncounterConfig,
    #[serde(default)]
    pub combat: CombatConfig,
    #[serde(default)]
    pub timers: TimerConfig,
    /// Faces on the die; a roll is uniform in `1..=dice_sides`
    pub dice_sides: u32,
}

impl GameConfig {
    /// "Legend of the Minotaur": encounters, treasure and combat.
    pub fn minotaur(seed: u64) -> Self {
        Self {
            maze: MazeConfig::minotaur(seed),
            encounters: EncounterConfig::default(),
            combat: CombatConfig::default(),
            timers: TimerConfig::default(),
            dice_sides: config::DICE_SIDES,
        }
    }

    /// "It's A-MAZE-ing": a walled maze with an exit and nothing else.
    pub fn amazing_maze(seed: u64) -> Self {
        Self {
            maze: MazeConfig::amazing_maze(seed),
            encounters: EncounterConfig {
                enabled: false,
                table: EncounterTable::empty(),
                ..EncounterConfig::default()
            },
            ..Self::minotaur(seed)
        }
    }

    pub fn for_variant(variant: GameVariant, seed: u64) -> Self {
        match variant {
            GameVariant::Minotaur => Self::minotaur(seed),
            GameVariant::AmazingMaze => Self::amazing_maze(seed),
        }
    }

    /// Reads and validates a JSON configuration file.
    pub fn load(path: &Path) -> MinotaurResult<Self> {
        let text = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&text)?;
        config.validate()?;
        info!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Writes the configuration as pretty JSON.
    pub fn save(&self, path: &Path) -> MinotaurResult<()> {
        let text = serde_json::to_string_pretty(self)?;
        std::fs::write(path, text)?;
        Ok(())
    }

    /// Starting health for a monster with the given roster health.
    pub fn enemy_health(&self, roster_health: u32) -> u32 {
        self.combat.enemy_health_override.unwrap_or(roster_health)
    }

    /// Checks every parameter range.
    pub fn validate(&self) -> MinotaurResult<()> {
        self.maze.validate()?;

        let encounters = &self.encounters;
        for (name, value) in [
            ("base_probability", encounters.base_probability),
            ("probability_step", encounters.probability_step),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(MinotaurError::InvalidConfig(format!(
                    "{} {} is outside [0, 1]",
                    name, value
                )));
            }
        }

        if encounters.enabled && encounters.table.is_empty() {
            return Err(MinotaurError::InvalidConfig(
                "encounters are enabled but the table is empty".to_string(),
            ));
        }

        if self.dice_sides == 0 {
            return Err(MinotaurError::InvalidConfig(
                "dice must have at least one side".to_string(),
            ));
        }

        if self.combat.enemy_health_override == Some(0) {
            return Err(MinotaurError::InvalidConfig(
                "enemy health override must be positive".to_string(),
            ));
        }

        if self.combat.enemy_health_override.is_none() {
            if let Some(monster) = encounters
                .table
                .entries
                .iter()
                .find(|entry| entry.kind == EncounterKind::Monster && entry.enemy_health == 0)
            {
                return Err(MinotaurError::InvalidConfig(format!(
                    "monster '{}' has zero health",
                    monster.id
                )));
            }
        }

        Ok(())
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::minotaur(42)
    }
}
