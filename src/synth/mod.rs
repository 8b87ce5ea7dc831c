//! Speech synthesis boundary
//!
//! The synthesis collaborator turns (text, speaker) into a decodable mono
//! fragment file. It may be rate-limited, so calls go through an explicit
//! throttle policy owned by the client wrapper rather than ad-hoc sleeps
//! inside the pipeline.

pub mod mock;

use std::path::Path;
use std::time::{Duration, Instant};

use log::debug;

use crate::engine::buffer::Speaker;
use crate::error::Result;

pub use mock::MockSynthesizer;

/// Descriptive metadata about a synthesizer implementation
#[derive(Debug, Clone)]
pub struct SynthesizerInfo {
    /// Implementation identifier, e.g. "mock-tone"
    pub id: String,
    /// Human-readable name
    pub name: String,
}

/// Interface for rendering one utterance to a fragment file
///
/// Implementations may vary speaking style per speaker; that variation is
/// cosmetic and outside the assembly engine's concern.
pub trait SpeechSynthesizer {
    /// Information about this synthesizer
    fn info(&self) -> SynthesizerInfo;

    /// Render `text` in `speaker`'s voice and write a mono fragment file
    /// at `output`.
    fn synthesize(&mut self, text: &str, speaker: Speaker, output: &Path) -> Result<()>;
}

/// Minimum-interval rate limiting policy
///
/// Tracks the last call time and blocks until the interval has elapsed.
/// This is a scheduling policy at the collaborator boundary, not part of
/// the core pipeline.
#[derive(Debug)]
pub struct Throttle {
    min_interval: Duration,
    last_call: Option<Instant>,
}

impl Throttle {
    pub fn new(min_interval: Duration) -> Self {
        Self {
            min_interval,
            last_call: None,
        }
    }

    /// A throttle that never waits
    pub fn unlimited() -> Self {
        Self::new(Duration::ZERO)
    }

    /// Block until enough time has passed since the previous call, then
    /// record this call.
    pub fn wait(&mut self) {
        if let Some(last) = self.last_call {
            let elapsed = last.elapsed();
            if elapsed < self.min_interval {
                let remaining = self.min_interval - elapsed;
                debug!("Throttling synthesis call for {:?}", remaining);
                std::thread::sleep(remaining);
            }
        }
        self.last_call = Some(Instant::now());
    }
}

/// Wraps a synthesizer so every call respects a throttle policy
pub struct ThrottledSynthesizer<S: SpeechSynthesizer> {
    inner: S,
    throttle: Throttle,
}

impl<S: SpeechSynthesizer> ThrottledSynthesizer<S> {
    pub fn new(inner: S, throttle: Throttle) -> Self {
        Self { inner, throttle }
    }
}

impl<S: SpeechSynthesizer> SpeechSynthesizer for ThrottledSynthesizer<S> {
    fn info(&self) -> SynthesizerInfo {
        self.inner.info()
    }

    fn synthesize(&mut self, text: &str, speaker: Speaker, output: &Path) -> Result<()> {
        self.throttle.wait();
        self.inner.synthesize(text, speaker, output)
    }
}

// ============================================================================
// Tests
// ============================================================================
