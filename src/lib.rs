//! # Minotaur Maze Adventure
//!
//! The game core behind a small maze adventure: a randomized perfect maze,
//! dice-gated player movement, probabilistic monster and treasure encounters,
//! and a dice-driven combat loop.
//!
//! ## Architecture Overview
//!
//! - **Generation**: randomized depth-first carving of a perfect maze, plus
//!   treasure and exit placement
//! - **Game State**: position, moves left, visited cells, encounter chance,
//!   active encounter and combat, mutated only through explicit transitions
//! - **Effects**: every transition returns the media effects it implies
//!   (sounds, videos, timers) so the presentation layer performs playback
//! - **Session**: owns the grid, state, random source and timers for one game
//!
//! All randomness is routed through an injectable [`rand::Rng`], so a seeded
//! session replays identically.

pub mod game;
pub mod generation;
pub mod input;
pub mod rendering;
pub mod utils;

// Core module re-exports
pub use game::*;
pub use generation::*;
pub use input::*;
pub use rendering::*;
pub use utils::*;

/// Core error type for the Minotaur game core.
#[derive(thiserror::Error, Debug)]
pub enum MinotaurError {
    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    /// Configuration is out of range
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Game state is invalid
    #[error("Invalid game state: {0}")]
    InvalidState(String),

    /// Generation failed
    #[error("Generation failed: {0}")]
    GenerationFailed(String),
}

/// Result type used throughout the Minotaur codebase.
pub type MinotaurResult<T> = Result<T, MinotaurError>;

/// Version information for the game.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Game configuration constants.
pub mod config {
    /// Smallest maze that can be carved
    pub const MIN_MAZE_SIZE: usize = 3;

    /// Maze size of the encounter variant
    pub const MINOTAUR_MAZE_SIZE: usize = 10;

    /// Maze size of the exit-only variant
    pub const AMAZING_MAZE_SIZE: usize = 15;

    /// Encounter probability after a reset
    pub const BASE_ENCOUNTER_PROBABILITY: f64 = 0.2;

    /// Encounter probability added after each miss
    pub const ENCOUNTER_PROBABILITY_STEP: f64 = 0.05;

    /// Enemy health at the start of combat
    pub const DEFAULT_ENEMY_HEALTH: u32 = 10;

    /// Faces on the movement and combat die
    pub const DICE_SIDES: u32 = 6;

    /// Delay before a won game resets itself
    pub const AUTO_RESET_DELAY_MS: u64 = 10_000;

    /// Delay before a resolved combat closes if the defeat sound never reports back
    pub const DEFEAT_FALLBACK_DELAY_MS: u64 = 1_000;

    /// Placement attempts per treasure before giving up
    pub const MAX_TREASURE_ATTEMPTS: u32 = 100;
}
