//! # Session
//!
//! Owner of everything one game needs: configuration, grid, player state,
//! random source and timers.
//!
//! The presentation layer holds a single `Session`, forwards logical input to
//! it, advances its clock, performs the returned effects, and reads a
//! [`Snapshot`] to draw the screen.

use crate::generation::utils::create_rng;
use crate::{
    roll_die, CombatPhase, DepthFirstCarver, Direction, Effect, Encounter, EncounterChance,
    EncounterKind, EncounterResolver, GameCompletionState, GameConfig, GameState, GameStatistics,
    Generator, Grid, MazeConfig, MinotaurResult, MoveOutcome, PlayerInput, Position, RollReport,
    RollResult, TimerKind, TimerQueue,
};
use log::{info, warn};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

/// Everything the presentation layer needs to draw one frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub grid: Grid,
    pub position: Position,
    pub moves_left: u32,
    pub encounter_probability: f64,
    pub active_encounter: Option<Encounter>,
    pub enemy_health: u32,
    pub combat_phase: CombatPhase,
    pub completion_state: GameCompletionState,
    pub statistics: GameStatistics,
    /// Clock reading at which a won game resets itself
    pub reset_at_ms: Option<u64>,
}

impl Snapshot {
    pub fn to_json(&self) -> MinotaurResult<String> {
        Ok(serde_json::to_string(self)?)
    }
}

/// One running game.
pub struct Session {
    config: GameConfig,
    /// Seed of the maze currently on the board
    maze_seed: u64,
    grid: Grid,
    state: GameState,
    resolver: EncounterResolver,
    generator: DepthFirstCarver,
    rng: StdRng,
    timers: TimerQueue,
}

impl Session {
    /// Starts a session seeded from the maze seed in `config`.
    ///
    /// # Examples
    ///
    /// ```
    /// use minotaur::{GameConfig, Session};
    ///
    /// let session = Session::new(GameConfig::minotaur(42)).unwrap();
    /// assert_eq!(session.state().moves_left, 0);
    /// assert!(session.grid().is_passable(session.state().position));
    /// ```
    pub fn new(config: GameConfig) -> MinotaurResult<Self> {
        let rng = StdRng::seed_from_u64(config.maze.seed);
        Self::with_rng(config, rng)
    }

    /// Starts a session drawing dice, encounters and later mazes from `rng`.
    ///
    /// The first maze always comes from the configured maze seed.
    pub fn with_rng(config: GameConfig, rng: StdRng) -> MinotaurResult<Self> {
        config.validate()?;

        let generator = DepthFirstCarver::new();
        let maze_seed = config.maze.seed;
        let grid = generator.generate(&config.maze, &mut create_rng(&config.maze))?;
        let state = Self::fresh_state(&config)?;
        let resolver = Self::build_resolver(&config);

        info!(
            "Session started: {}x{} maze, seed {}",
            config.maze.size, config.maze.size, maze_seed
        );

        Ok(Self {
            config,
            maze_seed,
            grid,
            state,
            resolver,
            generator,
            rng,
            timers: TimerQueue::new(),
        })
    }

    fn fresh_state(config: &GameConfig) -> MinotaurResult<GameState> {
        let chance = EncounterChance::new(
            config.encounters.base_probability,
            config.encounters.probability_step,
        )?;
        Ok(GameState::new(config.maze.start_position(), chance))
    }

    fn build_resolver(config: &GameConfig) -> EncounterResolver {
        let mut table = config.encounters.table.clone();
        for entry in &mut table.entries {
            if entry.kind == EncounterKind::Monster {
                entry.enemy_health = config.enemy_health(entry.enemy_health);
            }
        }

        EncounterResolver {
            table,
            enabled: config.encounters.enabled,
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn timers(&self) -> &TimerQueue {
        &self.timers
    }

    pub fn maze_seed(&self) -> u64 {
        self.maze_seed
    }

    /// Takes one step. Blocked and gated moves change nothing.
    pub fn move_player(&mut self, direction: Direction) -> MinotaurResult<MoveOutcome> {
        let outcome =
            self.state
                .apply_move(&mut self.grid, direction, &self.resolver, &mut self.rng)?;

        if let MoveOutcome::Moved(report) = &outcome {
            if report.reached_exit {
                self.timers
                    .schedule(TimerKind::AutoReset, self.config.timers.auto_reset_delay_ms);
            }
        }

        Ok(outcome)
    }

    /// Rolls the die: grants moves outside combat, deals damage inside it.
    pub fn roll(&mut self) -> RollReport {
        let value = roll_die(&mut self.rng, self.config.dice_sides);
        self.apply_roll(value)
    }

    /// Applies an externally produced roll value.
    pub fn apply_roll(&mut self, value: u32) -> RollReport {
        let report = self.state.apply_roll(value);

        if report.result == RollResult::EnemyDefeated {
            self.timers.schedule(
                TimerKind::CloseEncounter,
                self.config.timers.defeat_fallback_delay_ms,
            );
        }

        report
    }

    /// Dismisses the active encounter if combat allows it.
    pub fn close_encounter(&mut self) -> Vec<Effect> {
        match self.state.close_encounter() {
            Some(effects) => {
                self.timers.cancel(TimerKind::CloseEncounter);
                effects
            }
            None => Vec::new(),
        }
    }

    /// The defeat sound finished playing; close the encounter now.
    pub fn defeat_sound_finished(&mut self) -> Vec<Effect> {
        if self.state.combat.phase != CombatPhase::Resolved {
            return Vec::new();
        }
        self.close_encounter()
    }

    /// The defeat sound could not be played; close without waiting.
    pub fn defeat_sound_failed(&mut self, reason: &str) -> Vec<Effect> {
        if self.state.combat.phase != CombatPhase::Resolved {
            return Vec::new();
        }
        warn!("Defeat sound failed ({}), closing encounter", reason);
        self.close_encounter()
    }

    /// Regenerates the maze and puts the player back at the start.
    ///
    /// Pending timers are cancelled. Statistics carry over.
    pub fn reset(&mut self) -> MinotaurResult<Vec<Effect>> {
        self.timers.clear();

        let maze_seed: u64 = self.rng.gen();
        let maze_config = MazeConfig {
            seed: maze_seed,
            ..self.config.maze.clone()
        };
        let grid = self
            .generator
            .generate(&maze_config, &mut create_rng(&maze_config))?;

        let statistics = self.state.statistics.clone();
        let had_encounter = self.state.active_encounter.is_some();

        self.grid = grid;
        self.maze_seed = maze_seed;
        self.state = Self::fresh_state(&self.config)?;
        self.state.statistics = statistics;

        info!("Board reset with maze seed {}", maze_seed);

        let mut effects = Vec::new();
        if had_encounter {
            effects.push(Effect::StopVideo);
        }
        effects.push(Effect::BoardReset);
        Ok(effects)
    }

    /// Applies one logical command and returns the effects it produced.
    ///
    /// `Help` and `Quit` belong to the front end and do nothing here.
    pub fn handle_input(&mut self, input: PlayerInput) -> MinotaurResult<Vec<Effect>> {
        let effects = match input {
            PlayerInput::Move(direction) => self.move_player(direction)?.effects().to_vec(),
            PlayerInput::Roll => self.roll().effects,
            PlayerInput::CloseEncounter => self.close_encounter(),
            PlayerInput::Reset => self.reset()?,
            PlayerInput::Help | PlayerInput::Quit => Vec::new(),
        };
        Ok(effects)
    }

    /// Moves the clock to `now_ms` and runs every timer that came due.
    pub fn advance_clock(&mut self, now_ms: u64) -> MinotaurResult<Vec<Effect>> {
        let mut effects = Vec::new();

        for kind in self.timers.advance(now_ms) {
            match kind {
                TimerKind::AutoReset => effects.extend(self.reset()?),
                TimerKind::CloseEncounter => {
                    if let Some(closed) = self.state.close_encounter() {
                        effects.extend(closed);
                    }
                }
            }
        }

        Ok(effects)
    }

    /// Current view of the game.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            grid: self.grid.clone(),
            position: self.state.position,
            moves_left: self.state.moves_left,
            encounter_probability: self.state.encounter_chance.probability(),
            active_encounter: self.state.active_encounter.clone(),
            enemy_health: self.state.combat.enemy_health,
            combat_phase: self.state.combat.phase,
            completion_state: self.state.completion_state,
            statistics: self.state.statistics.clone(),
            reset_at_ms: self.timers.deadline(TimerKind::AutoReset),
        }
    }
}
