//! # Encounter Content
//!
//! The fixed roster of monsters and treasures an encounter can draw from.

use crate::config;
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// What kind of interaction an encounter starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EncounterKind {
    /// Starts combat; closes once the monster is defeated
    Monster,
    /// No combat; closes when the player acknowledges it
    Treasure,
}

/// One entry of the encounter roster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncounterTemplate {
    /// Stable identifier
    pub id: String,
    /// Display name
    pub name: String,
    pub kind: EncounterKind,
    /// Media key of the clip to play when the encounter opens
    pub media: String,
    /// Starting health for monsters; ignored for treasures
    pub enemy_health: u32,
}

impl EncounterTemplate {
    /// Creates a monster entry with the default enemy health.
    pub fn monster(id: &str, name: &str, media: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            kind: EncounterKind::Monster,
            media: media.to_string(),
            enemy_health: config::DEFAULT_ENEMY_HEALTH,
        }
    }

    /// Creates a treasure entry.
    pub fn treasure(id: &str, name: &str, media: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            kind: EncounterKind::Treasure,
            media: media.to_string(),
            enemy_health: 0,
        }
    }

    /// Overrides the starting health.
    pub fn with_health(mut self, enemy_health: u32) -> Self {
        self.enemy_health = enemy_health;
        self
    }
}

/// Roster an encounter is drawn from, uniformly at random.
///
/// # Examples
///
/// ```
/// use minotaur::EncounterTable;
/// use rand::{rngs::StdRng, SeedableRng};
///
/// let table = EncounterTable::default_monsters();
/// let mut rng = StdRng::seed_from_u64(7);
/// assert!(table.choose(&mut rng).is_some());
/// assert!(EncounterTable::empty().choose(&mut rng).is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncounterTable {
    pub entries: Vec<EncounterTemplate>,
}

impl EncounterTable {
    /// A table with no entries.
    pub fn empty() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// The five level-one monsters.
    pub fn default_monsters() -> Self {
        Self {
            entries: vec![
                EncounterTemplate::monster("rats", "Rats Attack!", "video/rats_attack"),
                EncounterTemplate::monster("george", "George the Orc", "video/george_orc"),
                EncounterTemplate::monster("ernie", "Ernie", "video/ernie_level_1"),
                EncounterTemplate::monster("bert", "Bert", "video/bert_level_1"),
                EncounterTemplate::monster("chad", "Chad", "video/chad"),
            ],
        }
    }

    /// Default monsters followed by Ernie's later levels.
    pub fn extended_roster() -> Self {
        let mut table = Self::default_monsters();
        table.push(
            EncounterTemplate::monster("ernie_2", "Ernie, Level 2", "video/ernie_level_2")
                .with_health(config::DEFAULT_ENEMY_HEALTH + 5),
        );
        table.push(
            EncounterTemplate::monster("ernie_3", "Ernie, Level 3", "video/ernie_level_3")
                .with_health(config::DEFAULT_ENEMY_HEALTH + 10),
        );
        table
    }

    /// Appends an entry.
    pub fn push(&mut self, template: EncounterTemplate) {
        self.entries.push(template);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Picks one entry uniformly at random.
    pub fn choose<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<&EncounterTemplate> {
        self.entries.choose(rng)
    }

    /// Looks up an entry by id.
    pub fn get(&self, id: &str) -> Option<&EncounterTemplate> {
        self.entries.iter().find(|entry| entry.id == id)
    }
}

impl Default for EncounterTable {
    fn default() -> Self {
        Self::default_monsters()
    }
}
