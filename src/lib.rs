//! Callweave - Two-Party Stereo Call Synthesis
//!
//! Callweave assembles a stereo "call-center style" recording from a
//! sequence of per-utterance mono speech fragments. Each of the two
//! speakers occupies a dedicated channel, and turn-taking timing is
//! preserved exactly: no overlap compression, no silence removal.
//!
//! # Architecture
//!
//! The core is a single-pass pipeline per episode:
//! - FragmentStore: decode fragment files, recover sequence indices
//! - Sequencer: order fragments and assign channels by index parity
//! - ChannelBuilder: one full-length track per channel, audio or silence
//! - StereoMixer: interleave the tracks into the final recording
//!
//! Collaborators around the core (dialogue source, speech synthesis, batch
//! driver, CLI) live in their own modules and talk to the engine only
//! through its typed boundary.

pub mod batch;
pub mod cli;
pub mod dialogue;
pub mod engine;
pub mod error;
pub mod synth;

pub use error::{CallweaveError, Result};
