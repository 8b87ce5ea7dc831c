//! Mock speech synthesizer for testing
//!
//! Produces no real speech, but its output is verifiable: each speaker gets
//! a distinct tone frequency and the fragment duration scales with the text
//! length, so pipeline tests can check channel placement and timing without
//! an external synthesis service.

use std::path::Path;

use log::debug;

use super::{SpeechSynthesizer, SynthesizerInfo};
use crate::engine::buffer::{Speaker, CANONICAL_SAMPLE_RATE};
use crate::engine::io::{generate_tone, write_mono_wav};
use crate::error::Result;

/// Seconds of audio per character of text
const SECS_PER_CHAR: f32 = 0.01;

/// Floor duration so even a one-word turn is audible
const MIN_DURATION_SECS: f32 = 0.05;

/// Tone-based stand-in for a real text-to-speech service
pub struct MockSynthesizer {
    amplitude: f32,
}

impl MockSynthesizer {
    pub fn new() -> Self {
        Self { amplitude: 0.5 }
    }

    /// Each speaker gets a recognizable pitch: A low, B an octave up.
    fn frequency(speaker: Speaker) -> f32 {
        match speaker {
            Speaker::A => 220.0,
            Speaker::B => 440.0,
        }
    }

    fn duration_for(text: &str) -> f32 {
        (text.chars().count() as f32 * SECS_PER_CHAR).max(MIN_DURATION_SECS)
    }
}

impl Default for MockSynthesizer {
    fn default() -> Self {
        Self::new()
    }
}

impl SpeechSynthesizer for MockSynthesizer {
    fn info(&self) -> SynthesizerInfo {
        SynthesizerInfo {
            id: "mock-tone".to_string(),
            name: "Mock Tone Synthesizer".to_string(),
        }
    }

    fn synthesize(&mut self, text: &str, speaker: Speaker, output: &Path) -> Result<()> {
        let duration = Self::duration_for(text);
        let samples = generate_tone(Self::frequency(speaker), duration, self.amplitude);

        debug!(
            "Mock-synthesized {:.2}s of {:?} audio to {}",
            duration,
            speaker,
            output.display()
        );

        write_mono_wav(&samples, CANONICAL_SAMPLE_RATE, output)
    }
}

// ============================================================================
// Tests
// ============================================================================
