//! Core audio types for episode synthesis
//!
//! All fragment and track audio is mono 32-bit float at the canonical
//! sample rate. Fragments are read-only once constructed; tracks are built
//! once per episode and consumed by the mixer.

use serde::{Deserialize, Serialize};

use crate::error::{CallweaveError, Result};

/// Canonical sample rate for all fragments and the final recording (Hz)
pub const CANONICAL_SAMPLE_RATE: u32 = 22_050;

// ============================================================================
// Speakers and channels
// ============================================================================

/// One of the two parties in a call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Speaker {
    A,
    B,
}

impl Speaker {
    /// Derive the speaker from a fragment's position in the conversation.
    ///
    /// The two parties strictly alternate turns starting with speaker A,
    /// so the speaker is a pure function of index parity.
    pub fn from_sequence_index(index: usize) -> Self {
        if index % 2 == 0 {
            Speaker::A
        } else {
            Speaker::B
        }
    }

    /// The output channel dedicated to this speaker
    pub fn channel(&self) -> Channel {
        match self {
            Speaker::A => Channel::Left,
            Speaker::B => Channel::Right,
        }
    }
}

/// One of the two output channels of the stereo recording
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channel {
    /// Channel 1, carries speaker A
    Left,
    /// Channel 2, carries speaker B
    Right,
}

impl Channel {
    /// Channel assignment rule: even index -> left, odd index -> right.
    pub fn from_sequence_index(index: usize) -> Self {
        Speaker::from_sequence_index(index).channel()
    }

    /// 1-based channel number, matching the "channel 1/channel 2" naming
    /// used when talking about call recordings
    pub fn number(&self) -> u8 {
        match self {
            Channel::Left => 1,
            Channel::Right => 2,
        }
    }
}

// ============================================================================
// Audio fragment
// ============================================================================

/// One speaker's single rendered utterance as a mono audio buffer
///
/// Fragments are immutable after construction: the store creates them, the
/// sequencer and channel builder only read them.
#[derive(Debug, Clone)]
pub struct AudioFragment {
    /// Position in the conversation, 0-based and dense across an episode
    sequence_index: usize,
    /// Party that spoke this utterance, derived from index parity
    speaker: Speaker,
    /// Mono samples at the canonical rate, normalized to -1.0..1.0
    samples: Vec<f32>,
    /// Cached length of `samples`
    sample_count: usize,
}

impl AudioFragment {
    /// Create a fragment from decoded mono samples.
    ///
    /// The speaker is derived from the index; no external speaker metadata
    /// is trusted beyond the parity rule.
    pub fn new(sequence_index: usize, samples: Vec<f32>) -> Self {
        let sample_count = samples.len();
        Self {
            sequence_index,
            speaker: Speaker::from_sequence_index(sequence_index),
            samples,
            sample_count,
        }
    }

    #[inline]
    pub fn sequence_index(&self) -> usize {
        self.sequence_index
    }

    #[inline]
    pub fn speaker(&self) -> Speaker {
        self.speaker
    }

    #[inline]
    pub fn samples(&self) -> &[f32] {
        &self.samples
    }

    #[inline]
    pub fn sample_count(&self) -> usize {
        self.sample_count
    }

    /// The output channel this fragment's real audio belongs to
    #[inline]
    pub fn channel(&self) -> Channel {
        self.speaker.channel()
    }

    /// Duration in seconds at the canonical rate
    pub fn duration_secs(&self) -> f64 {
        self.sample_count as f64 / CANONICAL_SAMPLE_RATE as f64
    }
}

// ============================================================================
// Channel track
// ============================================================================

/// Full-episode sample buffer for one channel: real audio where the channel
/// owns the fragment, equal-length silence where it does not
#[derive(Debug, Clone, PartialEq)]
pub struct ChannelTrack {
    samples: Vec<f32>,
}

impl ChannelTrack {
    /// Create an empty track, reserving room for the episode's total length
    pub fn with_capacity(total_samples: usize) -> Self {
        Self {
            samples: Vec::with_capacity(total_samples),
        }
    }

    /// Append a fragment's real samples
    pub fn push_audio(&mut self, samples: &[f32]) {
        self.samples.extend_from_slice(samples);
    }

    /// Append a silent slot of the given length
    pub fn push_silence(&mut self, sample_count: usize) {
        self.samples.resize(self.samples.len() + sample_count, 0.0);
    }

    #[inline]
    pub fn samples(&self) -> &[f32] {
        &self.samples
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}

#[cfg(test)]
impl ChannelTrack {
    /// Test helper to build a track from raw samples
    pub fn from_samples(samples: Vec<f32>) -> Self {
        Self { samples }
    }
}

// ============================================================================
// Stereo recording
// ============================================================================

/// The final artifact: two equal-length channel tracks interleaved
/// sample-by-sample, at the canonical sample rate
#[derive(Debug, Clone, PartialEq)]
pub struct StereoRecording {
    /// Interleaved samples: [left0, right0, left1, right1, ...]
    samples: Vec<f32>,
    /// Sample rate in Hz
    sample_rate: u32,
}

impl StereoRecording {
    /// Create a recording from already-interleaved samples.
    ///
    /// Fails if the sample count is odd, since every frame must carry one
    /// sample per channel.
    pub fn from_interleaved(samples: Vec<f32>, sample_rate: u32) -> Result<Self> {
        if samples.len() % 2 != 0 {
            return Err(CallweaveError::ChannelLengthMismatch {
                left: samples.len() / 2 + 1,
                right: samples.len() / 2,
            });
        }
        Ok(Self {
            samples,
            sample_rate,
        })
    }

    #[inline]
    pub fn samples(&self) -> &[f32] {
        &self.samples
    }

    #[inline]
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Number of frames (sample pairs)
    #[inline]
    pub fn num_frames(&self) -> usize {
        self.samples.len() / 2
    }

    /// Duration in seconds
    pub fn duration_secs(&self) -> f64 {
        if self.sample_rate == 0 {
            return 0.0;
        }
        self.num_frames() as f64 / self.sample_rate as f64
    }

    /// De-interleave back into (left, right) tracks
    pub fn split_channels(&self) -> (ChannelTrack, ChannelTrack) {
        let mut left = ChannelTrack::with_capacity(self.num_frames());
        let mut right = ChannelTrack::with_capacity(self.num_frames());
        for frame in self.samples.chunks_exact(2) {
            left.push_audio(&frame[..1]);
            right.push_audio(&frame[1..]);
        }
        (left, right)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case(0 => Speaker::A)]
    #[test_case(1 => Speaker::B)]
    #[test_case(2 => Speaker::A)]
    #[test_case(7 => Speaker::B)]
    #[test_case(100 => Speaker::A)]
    fn test_speaker_parity(index: usize) -> Speaker {
        Speaker::from_sequence_index(index)
    }

    #[test_case(0 => Channel::Left)]
    #[test_case(1 => Channel::Right)]
    #[test_case(4 => Channel::Left)]
    #[test_case(13 => Channel::Right)]
    fn test_channel_parity(index: usize) -> Channel {
        Channel::from_sequence_index(index)
    }

    #[test]
    fn test_channel_numbers() {
        assert_eq!(Channel::Left.number(), 1);
        assert_eq!(Channel::Right.number(), 2);
    }

    #[test]
    fn test_fragment_derives_speaker_and_count() {
        let fragment = AudioFragment::new(3, vec![0.1, 0.2, 0.3]);
        assert_eq!(fragment.sequence_index(), 3);
        assert_eq!(fragment.speaker(), Speaker::B);
        assert_eq!(fragment.channel(), Channel::Right);
        assert_eq!(fragment.sample_count(), 3);
        assert_eq!(fragment.samples(), &[0.1, 0.2, 0.3]);
    }

    #[test]
    fn test_fragment_duration() {
        let fragment = AudioFragment::new(0, vec![0.0; CANONICAL_SAMPLE_RATE as usize]);
        assert!((fragment.duration_secs() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_track_push() {
        let mut track = ChannelTrack::with_capacity(5);
        track.push_audio(&[1.0, 2.0]);
        track.push_silence(3);
        assert_eq!(track.len(), 5);
        assert_eq!(track.samples(), &[1.0, 2.0, 0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_recording_frames_and_duration() {
        let recording =
            StereoRecording::from_interleaved(vec![0.0; CANONICAL_SAMPLE_RATE as usize * 2], CANONICAL_SAMPLE_RATE)
                .unwrap();
        assert_eq!(recording.num_frames(), CANONICAL_SAMPLE_RATE as usize);
        assert!((recording.duration_secs() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_recording_rejects_odd_length() {
        let result = StereoRecording::from_interleaved(vec![0.0; 3], CANONICAL_SAMPLE_RATE);
        assert!(matches!(
            result,
            Err(CallweaveError::ChannelLengthMismatch { .. })
        ));
    }

    #[test]
    fn test_split_channels() {
        let recording =
            StereoRecording::from_interleaved(vec![1.0, 4.0, 2.0, 5.0, 3.0, 6.0], CANONICAL_SAMPLE_RATE).unwrap();
        let (left, right) = recording.split_channels();
        assert_eq!(left.samples(), &[1.0, 2.0, 3.0]);
        assert_eq!(right.samples(), &[4.0, 5.0, 6.0]);
    }
}
