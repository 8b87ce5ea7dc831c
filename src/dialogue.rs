//! Dialogue source boundary
//!
//! The dialogue collaborator supplies an ordered list of (speaker, text)
//! turns per episode. The assembly engine assumes strictly alternating
//! speakers starting with speaker A at turn 0; that assumption is validated
//! here, at the boundary, so a colliding transcript is rejected before any
//! audio is rendered.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::engine::buffer::Speaker;
use crate::error::{CallweaveError, Result};

/// One conversational turn: who speaks and what they say
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DialogueTurn {
    pub speaker: Speaker,
    pub text: String,
}

/// A complete two-party conversation for one episode
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Transcript {
    /// Identifying key for the episode, used in reports and file names
    pub episode: String,
    pub turns: Vec<DialogueTurn>,
}

impl Transcript {
    /// Load a transcript from a JSON file and validate it.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        let transcript: Transcript = serde_json::from_str(&contents)?;
        transcript.validate()?;
        Ok(transcript)
    }

    /// Check the transcript satisfies the engine's turn-taking assumption.
    ///
    /// # Errors
    /// * `InvalidTranscript` - no turns, or a turn whose speaker breaks
    ///   strict alternation (turn i must be spoken by A when i is even,
    ///   B when odd)
    pub fn validate(&self) -> Result<()> {
        if self.turns.is_empty() {
            return Err(CallweaveError::InvalidTranscript {
                reason: format!("episode '{}' has no turns", self.episode),
            });
        }

        for (index, turn) in self.turns.iter().enumerate() {
            let expected = Speaker::from_sequence_index(index);
            if turn.speaker != expected {
                return Err(CallweaveError::InvalidTranscript {
                    reason: format!(
                        "turn {} is spoken by {:?} but strict alternation requires {:?}",
                        index, turn.speaker, expected
                    ),
                });
            }
        }

        Ok(())
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }
}

// ============================================================================
// Tests
// ============================================================================
