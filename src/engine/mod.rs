//! Fragment-to-stereo assembly engine
//!
//! The pipeline is a single-pass, stateless transform per episode:
//! store -> sequencer -> channel builder -> stereo mixer. Each stage fully
//! consumes its input before the next begins; a stage either succeeds or
//! the whole episode synthesis fails.

pub mod buffer;
pub mod channels;
pub mod io;
pub mod mixer;
pub mod sequencer;
pub mod store;

use std::path::Path;

use log::info;

use crate::error::Result;

pub use buffer::{
    AudioFragment, Channel, ChannelTrack, Speaker, StereoRecording, CANONICAL_SAMPLE_RATE,
};
pub use channels::build_channel_track;
pub use mixer::mix_stereo;
pub use sequencer::{sequence_fragments, SequencedFragment};
pub use store::load_fragments;

/// Assemble one episode's fragments into a stereo recording in memory.
///
/// No output is produced on failure; the recording only exists once every
/// stage has succeeded.
pub fn assemble_episode(input_dir: &Path) -> Result<StereoRecording> {
    let fragments = load_fragments(input_dir)?;
    let sequenced = sequence_fragments(fragments)?;

    let left = build_channel_track(&sequenced, Channel::Left);
    let right = build_channel_track(&sequenced, Channel::Right);

    mix_stereo(left, right)
}

/// Assemble one episode and write the recording to `output_path`.
///
/// All-or-nothing per artifact: the output file is only created after the
/// in-memory recording is complete.
pub fn synthesize_episode(input_dir: &Path, output_path: &Path) -> Result<()> {
    let recording = assemble_episode(input_dir)?;

    io::export_recording(&recording, output_path)?;
    info!(
        "Wrote {:.2}s stereo recording to {}",
        recording.duration_secs(),
        output_path.display()
    );

    Ok(())
}

// ============================================================================
// Tests
// ============================================================================
