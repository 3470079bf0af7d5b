//! # Effects
//!
//! Media side effects requested by game transitions.
//!
//! The core never plays anything itself. Each transition returns the effects
//! it implies and the presentation layer hands them to a [`MediaBackend`].
//! Playback failures are logged and otherwise ignored.

use log::{debug, warn};
use serde::{Deserialize, Serialize};

/// Sound cues the game asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SoundCue {
    DiceRoll,
    Footsteps,
    Defeat,
}

impl SoundCue {
    /// Media key of the cue.
    pub fn media_key(self) -> &'static str {
        match self {
            SoundCue::DiceRoll => "audio/dice_roll",
            SoundCue::Footsteps => "audio/footsteps",
            SoundCue::Defeat => "audio/sword_slash",
        }
    }
}

/// A side effect for the presentation layer to carry out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Effect {
    /// Play a short sound from the start
    PlaySound { cue: SoundCue },
    /// Loop an encounter clip until the encounter closes
    PlayVideo { media: String },
    /// Stop the encounter clip
    StopVideo,
    /// Fade the board out after a win
    VictoryFade,
    /// An encounter was dismissed or resolved
    EncounterClosed { encounter_id: String },
    /// The maze was regenerated and the player returned to start
    BoardReset,
}

/// Error reported by a media backend.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("media playback failed for {media}: {reason}")]
pub struct MediaError {
    pub media: String,
    pub reason: String,
}

/// Seam to whatever actually plays media.
pub trait MediaBackend {
    /// Performs one effect.
    fn perform(&mut self, effect: &Effect) -> Result<(), MediaError>;
}

/// Backend that drops every effect. Handy for headless runs.
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentBackend;

impl MediaBackend for SilentBackend {
    fn perform(&mut self, effect: &Effect) -> Result<(), MediaError> {
        debug!("Skipping effect {:?}", effect);
        Ok(())
    }
}

/// Hands every effect to the backend, logging failures.
///
/// Returns the number of effects that failed.
pub fn dispatch_effects<B: MediaBackend + ?Sized>(backend: &mut B, effects: &[Effect]) -> usize {
    let mut failures = 0;
    for effect in effects {
        if let Err(error) = backend.perform(effect) {
            warn!("{}", error);
            failures += 1;
        }
    }
    failures
}
