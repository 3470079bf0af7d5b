//! # Game State Module
//!
//! Player-side state of a maze session and the transitions that mutate it.
//!
//! Every transition takes the state by `&mut self`, applies one logical event
//! (a step, a roll, closing an encounter) and returns a report carrying the
//! media effects the presentation layer should perform.

use crate::{
    try_move, Combat, CombatOutcome, Direction, Effect, Encounter, EncounterChance,
    EncounterResolver, Grid, MinotaurResult, Position, SoundCue, TerrainKind,
};
use log::{debug, info};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Game statistics tracking player progress.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameStatistics {
    /// Successful single-cell steps
    pub steps_taken: u64,
    /// Dice rolls, in or out of combat
    pub rolls: u64,
    pub encounters_triggered: u32,
    pub monsters_defeated: u32,
    pub treasures_collected: u32,
    pub games_won: u32,
}

/// Game completion state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameCompletionState {
    /// Game is still in progress
    Playing,
    /// Player reached the exit
    Won,
}

/// Why a move request was not even attempted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveGate {
    NoMovesLeft,
    EncounterActive,
    GameOver,
}

/// What a successful step did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepReport {
    pub from: Position,
    pub to: Position,
    pub treasure_collected: bool,
    pub reached_exit: bool,
    /// Id of the encounter this step triggered
    pub encounter: Option<String>,
    pub effects: Vec<Effect>,
}

/// Result of [`GameState::apply_move`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveOutcome {
    /// Movement is currently not allowed
    Gated(MoveGate),
    /// Wall or grid edge; nothing changed
    Blocked,
    Moved(StepReport),
}

impl MoveOutcome {
    pub fn moved(&self) -> bool {
        matches!(self, MoveOutcome::Moved(_))
    }

    /// Effects to perform; empty unless the player moved.
    pub fn effects(&self) -> &[Effect] {
        match self {
            MoveOutcome::Moved(report) => &report.effects,
            _ => &[],
        }
    }
}

/// How a roll was used.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RollResult {
    /// Outside combat the roll becomes the number of moves left
    MovesGranted,
    EnemyHit { remaining: u32 },
    EnemyDefeated,
    /// Rolled while an encounter waits to be closed, or after the game ended
    Ignored,
}

/// Result of [`GameState::apply_roll`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RollReport {
    pub value: u32,
    pub result: RollResult,
    pub effects: Vec<Effect>,
}

/// Rolls a die with `sides` faces.
pub fn roll_die<R: Rng + ?Sized>(rng: &mut R, sides: u32) -> u32 {
    rng.gen_range(1..=sides.max(1))
}

/// Mutable state of one game.
///
/// # Examples
///
/// ```
/// use minotaur::{Direction, EncounterChance, EncounterResolver, GameState, Grid, Position};
/// use rand::{rngs::StdRng, SeedableRng};
///
/// let mut grid = Grid::from_rows(&["...", "###", "###"]).unwrap();
/// let mut state = GameState::new(Position::origin(), EncounterChance::default());
/// let resolver = EncounterResolver::disabled();
/// let mut rng = StdRng::seed_from_u64(1);
///
/// state.apply_roll(2);
/// state.apply_move(&mut grid, Direction::Right, &resolver, &mut rng).unwrap();
/// assert_eq!(state.position, Position::new(1, 0));
/// assert_eq!(state.moves_left, 1);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    pub position: Position,
    /// Steps the player may still take before rolling again
    pub moves_left: u32,
    /// Every cell the player has stood on
    pub visited: HashSet<Position>,
    pub encounter_chance: EncounterChance,
    pub active_encounter: Option<Encounter>,
    pub combat: Combat,
    pub completion_state: GameCompletionState,
    pub statistics: GameStatistics,
}

impl GameState {
    /// Creates a fresh state with the player standing on `start`.
    pub fn new(start: Position, encounter_chance: EncounterChance) -> Self {
        let mut visited = HashSet::new();
        visited.insert(start);

        Self {
            position: start,
            moves_left: 0,
            visited,
            encounter_chance,
            active_encounter: None,
            combat: Combat::new(),
            completion_state: GameCompletionState::Playing,
            statistics: GameStatistics::default(),
        }
    }

    /// Returns the reason movement is blocked, if any.
    pub fn move_gate(&self) -> Option<MoveGate> {
        if self.completion_state != GameCompletionState::Playing {
            Some(MoveGate::GameOver)
        } else if self.active_encounter.is_some() {
            Some(MoveGate::EncounterActive)
        } else if self.moves_left == 0 {
            Some(MoveGate::NoMovesLeft)
        } else {
            None
        }
    }

    pub fn can_move(&self) -> bool {
        self.move_gate().is_none()
    }

    pub fn is_won(&self) -> bool {
        self.completion_state == GameCompletionState::Won
    }

    /// Takes one step in `direction`.
    ///
    /// A successful step spends a move, marks the cell visited, collects any
    /// treasure there, and then either wins the game (on the exit) or gives
    /// the encounter resolver its draw.
    pub fn apply_move<R: Rng + ?Sized>(
        &mut self,
        grid: &mut Grid,
        direction: Direction,
        resolver: &EncounterResolver,
        rng: &mut R,
    ) -> MinotaurResult<MoveOutcome> {
        if let Some(gate) = self.move_gate() {
            debug!("Move {:?} gated: {:?}", direction, gate);
            return Ok(MoveOutcome::Gated(gate));
        }

        let from = self.position;
        let to = try_move(grid, from, direction);
        if to == from {
            return Ok(MoveOutcome::Blocked);
        }

        self.position = to;
        self.moves_left -= 1;
        self.visited.insert(to);
        self.statistics.steps_taken += 1;

        let mut report = StepReport {
            from,
            to,
            treasure_collected: false,
            reached_exit: false,
            encounter: None,
            effects: vec![Effect::PlaySound {
                cue: SoundCue::Footsteps,
            }],
        };

        match grid.get(to) {
            Some(TerrainKind::Treasure) => {
                grid.set(to, TerrainKind::Path)?;
                self.statistics.treasures_collected += 1;
                report.treasure_collected = true;
                debug!("Treasure collected at {}", to);
            }
            Some(TerrainKind::Exit) => {
                self.completion_state = GameCompletionState::Won;
                self.moves_left = 0;
                self.statistics.games_won += 1;
                report.reached_exit = true;
                report.effects.push(Effect::VictoryFade);
                info!("Player escaped the maze at {}", to);
                return Ok(MoveOutcome::Moved(report));
            }
            _ => {}
        }

        if let Some(encounter) = resolver.resolve(&mut self.encounter_chance, rng) {
            report.encounter = Some(encounter.id().to_string());
            report.effects.extend(self.open_encounter(encounter));
        }

        Ok(MoveOutcome::Moved(report))
    }

    /// Makes `encounter` the active one, starting combat for monsters.
    pub fn open_encounter(&mut self, encounter: Encounter) -> Vec<Effect> {
        info!("Encounter: {}", encounter.template.name);
        self.statistics.encounters_triggered += 1;

        if encounter.in_combat {
            self.combat.start(encounter.template.enemy_health);
        }

        let effects = vec![Effect::PlayVideo {
            media: encounter.template.media.clone(),
        }];
        self.active_encounter = Some(encounter);
        effects
    }

    /// Feeds a dice roll into the game.
    ///
    /// During combat the roll is damage; otherwise it sets the moves left.
    pub fn apply_roll(&mut self, value: u32) -> RollReport {
        self.statistics.rolls += 1;
        let mut effects = vec![Effect::PlaySound {
            cue: SoundCue::DiceRoll,
        }];

        let result = if self.combat.is_active() {
            match self.combat.apply_roll(value) {
                CombatOutcome::Hit { remaining } => RollResult::EnemyHit { remaining },
                CombatOutcome::Defeated => {
                    self.statistics.monsters_defeated += 1;
                    if let Some(encounter) = self.active_encounter.as_mut() {
                        encounter.in_combat = false;
                    }
                    effects.push(Effect::PlaySound {
                        cue: SoundCue::Defeat,
                    });
                    RollResult::EnemyDefeated
                }
                CombatOutcome::Ignored => RollResult::Ignored,
            }
        } else if self.active_encounter.is_some() || self.is_won() {
            RollResult::Ignored
        } else {
            self.moves_left = value;
            RollResult::MovesGranted
        };

        debug!("Rolled {}: {:?}", value, result);
        RollReport {
            value,
            result,
            effects,
        }
    }

    /// Dismisses the active encounter if combat is not still running.
    ///
    /// Returns None when there is nothing that may be closed.
    pub fn close_encounter(&mut self) -> Option<Vec<Effect>> {
        let closable = self
            .active_encounter
            .as_ref()
            .map(Encounter::can_close)
            .unwrap_or(false);
        if !closable {
            return None;
        }

        let encounter = self.active_encounter.take()?;
        self.combat.finish();
        debug!("Encounter {} closed", encounter.id());

        Some(vec![
            Effect::StopVideo,
            Effect::EncounterClosed {
                encounter_id: encounter.template.id,
            },
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{CombatPhase, EncounterTable, EncounterTemplate};
    use rand::rngs::mock::StepRng;
    use rand::{rngs::StdRng, SeedableRng};

    fn open_row() -> Grid {
        Grid::from_rows(&["....", "#.##", "#.$#", "##E#"]).unwrap()
    }

    fn quiet() -> EncounterResolver {
        EncounterResolver::disabled()
    }

    fn new_state() -> GameState {
        GameState::new(Position::origin(), EncounterChance::default())
    }

    #[test]
    fn test_game_state_creation() {
        let state = new_state();
        assert_eq!(state.moves_left, 0);
        assert!(state.visited.contains(&Position::origin()));
        assert_eq!(state.move_gate(), Some(MoveGate::NoMovesLeft));
    }

    #[test]
    fn test_two_right_moves_from_three() {
        let mut grid = open_row();
        let mut state = new_state();
        let mut rng = StdRng::seed_from_u64(3);
        state.moves_left = 3;

        assert!(state
            .apply_move(&mut grid, Direction::Right, &quiet(), &mut rng)
            .unwrap()
            .moved());
        assert_eq!(state.moves_left, 2);
        assert!(state
            .apply_move(&mut grid, Direction::Right, &quiet(), &mut rng)
            .unwrap()
            .moved());
        assert_eq!(state.moves_left, 1);
        assert_eq!(state.position, Position::new(2, 0));
        assert_eq!(state.visited.len(), 3);
    }

    #[test]
    fn test_blocked_move_spends_nothing() {
        let mut grid = open_row();
        let mut state = new_state();
        let mut rng = StdRng::seed_from_u64(3);
        state.moves_left = 2;

        let outcome = state
            .apply_move(&mut grid, Direction::Down, &quiet(), &mut rng)
            .unwrap();
        assert_eq!(outcome, MoveOutcome::Blocked);
        assert!(outcome.effects().is_empty());
        assert_eq!(state.moves_left, 2);
        assert_eq!(state.statistics.steps_taken, 0);
    }

    #[test]
    fn test_moves_gated_at_zero() {
        let mut grid = open_row();
        let mut state = new_state();
        let mut rng = StdRng::seed_from_u64(3);

        let outcome = state
            .apply_move(&mut grid, Direction::Right, &quiet(), &mut rng)
            .unwrap();
        assert_eq!(outcome, MoveOutcome::Gated(MoveGate::NoMovesLeft));
        assert_eq!(state.position, Position::origin());
    }

    #[test]
    fn test_treasure_is_collected_and_cleared() {
        let mut grid = open_row();
        let mut state = GameState::new(Position::new(1, 1), EncounterChance::default());
        let mut rng = StdRng::seed_from_u64(3);
        state.moves_left = 1;

        match state
            .apply_move(&mut grid, Direction::Down, &quiet(), &mut rng)
            .unwrap()
        {
            MoveOutcome::Moved(report) => assert!(report.treasure_collected),
            other => panic!("unexpected outcome {:?}", other),
        }
        assert_eq!(grid.get(Position::new(1, 2)), Some(TerrainKind::Path));
        assert_eq!(state.statistics.treasures_collected, 1);
    }

    #[test]
    fn test_exit_wins_and_skips_encounter() {
        let mut grid = Grid::from_rows(&[".E#", "###", "###"]).unwrap();
        let mut state = new_state();
        state.moves_left = 4;
        let resolver = EncounterResolver::default();

        let outcome = state
            .apply_move(&mut grid, Direction::Right, &resolver, &mut StepRng::new(0, 0))
            .unwrap();
        assert!(outcome.effects().contains(&Effect::VictoryFade));
        assert!(state.is_won());
        assert!(state.active_encounter.is_none());
        assert_eq!(state.moves_left, 0);
        assert_eq!(state.apply_roll(6).result, RollResult::Ignored);
        assert_eq!(state.move_gate(), Some(MoveGate::GameOver));
    }

    #[test]
    fn test_encounter_gates_movement_and_starts_combat() {
        let mut grid = open_row();
        let mut state = new_state();
        state.moves_left = 3;
        let resolver = EncounterResolver::default();

        let outcome = state
            .apply_move(&mut grid, Direction::Right, &resolver, &mut StepRng::new(0, 0))
            .unwrap();
        assert!(outcome
            .effects()
            .iter()
            .any(|effect| matches!(effect, Effect::PlayVideo { .. })));
        assert_eq!(state.combat.phase, CombatPhase::InCombat);
        assert_eq!(state.move_gate(), Some(MoveGate::EncounterActive));
        assert!(state.close_encounter().is_none());

        let gated = state
            .apply_move(&mut grid, Direction::Right, &resolver, &mut StepRng::new(0, 0))
            .unwrap();
        assert_eq!(gated, MoveOutcome::Gated(MoveGate::EncounterActive));
    }

    #[test]
    fn test_combat_rolls_then_close() {
        let mut state = new_state();
        let template = EncounterTemplate::monster("rats", "Rats", "video/rats");
        state.open_encounter(Encounter::from_template(template));

        assert_eq!(state.apply_roll(4).result, RollResult::EnemyHit { remaining: 6 });
        let report = state.apply_roll(6);
        assert_eq!(report.result, RollResult::EnemyDefeated);
        assert!(report.effects.contains(&Effect::PlaySound {
            cue: SoundCue::Defeat
        }));
        assert_eq!(state.statistics.monsters_defeated, 1);

        // Moves are not granted by a roll while the encounter is still open
        assert_eq!(state.apply_roll(5).result, RollResult::Ignored);
        assert_eq!(state.moves_left, 0);

        let effects = state.close_encounter().unwrap();
        assert!(effects.contains(&Effect::EncounterClosed {
            encounter_id: "rats".to_string()
        }));
        assert_eq!(state.combat.phase, CombatPhase::Idle);
        assert!(state.close_encounter().is_none());
    }

    #[test]
    fn test_treasure_encounter_needs_no_combat() {
        let mut state = new_state();
        let table = EncounterTable {
            entries: vec![EncounterTemplate::treasure("chest", "Chest", "video/chest")],
        };
        let resolver = EncounterResolver::new(table);
        let mut grid = open_row();
        state.moves_left = 1;

        state
            .apply_move(&mut grid, Direction::Right, &resolver, &mut StepRng::new(0, 0))
            .unwrap();
        assert_eq!(state.combat.phase, CombatPhase::Idle);
        assert!(state.close_encounter().is_some());
        assert!(state.active_encounter.is_none());
    }

    #[test]
    fn test_misses_ratchet_probability() {
        let mut grid = Grid::from_rows(&[
            "......", "######", "######", "######", "######", "######",
        ])
        .unwrap();
        let mut state = new_state();
        let resolver = EncounterResolver::default();
        let mut rng = StepRng::new(u64::MAX, 0);
        state.apply_roll(5);

        for _ in 0..5 {
            state
                .apply_move(&mut grid, Direction::Right, &resolver, &mut rng)
                .unwrap();
        }
        assert!((state.encounter_chance.probability() - 0.45).abs() < 1e-9);
        assert!(state.active_encounter.is_none());
    }

    #[test]
    fn test_roll_die_range() {
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..200 {
            let value = roll_die(&mut rng, 6);
            assert!((1..=6).contains(&value));
        }
    }
}
