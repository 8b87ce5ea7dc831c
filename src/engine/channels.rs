//! Channel track construction
//!
//! Builds one full-length sample buffer per output channel. Every fragment
//! contributes exactly one real segment to the channel it owns and one
//! equal-length silent segment to the other, so the two finished tracks are
//! always the same length and the turn timing stays sample-accurate with no
//! explicit timestamp bookkeeping.

use crate::engine::buffer::{Channel, ChannelTrack};
use crate::engine::sequencer::{total_sample_count, SequencedFragment};

/// Build the full-episode track for one channel.
///
/// For each fragment in sequence order: append its real samples if it
/// belongs to `target`, otherwise append a silent slot of identical length.
pub fn build_channel_track(sequenced: &[SequencedFragment], target: Channel) -> ChannelTrack {
    let mut track = ChannelTrack::with_capacity(total_sample_count(sequenced));

    for entry in sequenced {
        if entry.channel == target {
            track.push_audio(entry.fragment.samples());
        } else {
            track.push_silence(entry.fragment.sample_count());
        }
    }

    track
}

// ============================================================================
// Tests
// ============================================================================
