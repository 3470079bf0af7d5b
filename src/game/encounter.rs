//! # Encounter Resolution
//!
//! Decides after each successful step whether a monster or treasure shows up.
//!
//! The chance works as a pity timer: every miss raises it by a fixed step
//! (capped at 1.0) and every hit drops it back to the base value, so long
//! droughts are bounded while single steps stay random.

use crate::{
    config, EncounterKind, EncounterTable, EncounterTemplate, MinotaurError, MinotaurResult,
};
use log::debug;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Current encounter probability together with its tuning.
///
/// # Examples
///
/// ```
/// use minotaur::EncounterChance;
///
/// let mut chance = EncounterChance::new(0.2, 0.05).unwrap();
/// assert!(!chance.draw(0.9));
/// assert!((chance.probability() - 0.25).abs() < 1e-9);
///
/// assert!(chance.draw(0.1));
/// assert_eq!(chance.probability(), 0.2);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EncounterChance {
    probability: f64,
    base: f64,
    step: f64,
}

impl EncounterChance {
    /// Creates a chance starting at `base`.
    pub fn new(base: f64, step: f64) -> MinotaurResult<Self> {
        if !(0.0..=1.0).contains(&base) {
            return Err(MinotaurError::InvalidConfig(format!(
                "base encounter probability {} is outside [0, 1]",
                base
            )));
        }
        if !(0.0..=1.0).contains(&step) {
            return Err(MinotaurError::InvalidConfig(format!(
                "encounter probability step {} is outside [0, 1]",
                step
            )));
        }

        Ok(Self {
            probability: base,
            base,
            step,
        })
    }

    /// Current probability of an encounter on the next step.
    pub fn probability(&self) -> f64 {
        self.probability
    }

    /// Value the probability returns to after a hit.
    pub fn base(&self) -> f64 {
        self.base
    }

    /// Raises the probability by one step, never above 1.0.
    pub fn record_miss(&mut self) {
        self.probability = (self.probability + self.step).min(1.0);
    }

    /// Drops the probability back to the base value.
    pub fn reset(&mut self) {
        self.probability = self.base;
    }

    /// Compares a sample in `[0, 1)` against the probability and updates it.
    ///
    /// Returns true when the sample triggers an encounter.
    pub fn draw(&mut self, sample: f64) -> bool {
        if sample < self.probability {
            self.reset();
            true
        } else {
            self.record_miss();
            false
        }
    }
}

impl Default for EncounterChance {
    fn default() -> Self {
        Self {
            probability: config::BASE_ENCOUNTER_PROBABILITY,
            base: config::BASE_ENCOUNTER_PROBABILITY,
            step: config::ENCOUNTER_PROBABILITY_STEP,
        }
    }
}

/// A live encounter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Encounter {
    pub template: EncounterTemplate,
    /// True while combat with this encounter is still running
    pub in_combat: bool,
}

impl Encounter {
    /// Opens an encounter from a roster entry. Monsters start in combat.
    pub fn from_template(template: EncounterTemplate) -> Self {
        let in_combat = template.kind == EncounterKind::Monster;
        Self {
            template,
            in_combat,
        }
    }

    pub fn id(&self) -> &str {
        &self.template.id
    }

    pub fn kind(&self) -> EncounterKind {
        self.template.kind
    }

    /// Whether the player may dismiss the encounter right now.
    pub fn can_close(&self) -> bool {
        !self.in_combat
    }
}

/// Draws encounters from a roster using an [`EncounterChance`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EncounterResolver {
    pub table: EncounterTable,
    /// When false, steps never draw and the chance never moves
    pub enabled: bool,
}

impl EncounterResolver {
    pub fn new(table: EncounterTable) -> Self {
        Self {
            table,
            enabled: true,
        }
    }

    /// A resolver that never produces encounters.
    pub fn disabled() -> Self {
        Self {
            table: EncounterTable::empty(),
            enabled: false,
        }
    }

    /// Draws one sample and returns the encounter it triggers, if any.
    pub fn resolve<R: Rng + ?Sized>(
        &self,
        chance: &mut EncounterChance,
        rng: &mut R,
    ) -> Option<Encounter> {
        if !self.enabled || self.table.is_empty() {
            return None;
        }

        let sample: f64 = rng.gen();
        if chance.draw(sample) {
            let template = self.table.choose(rng)?.clone();
            debug!(
                "Encounter triggered: {} (sample {:.3})",
                template.id, sample
            );
            Some(Encounter::from_template(template))
        } else {
            debug!(
                "No encounter (sample {:.3}), chance now {:.2}",
                sample,
                chance.probability()
            );
            None
        }
    }
}

impl Default for EncounterResolver {
    fn default() -> Self {
        Self::new(EncounterTable::default_monsters())
    }
}
