//! Stereo interleaving
//!
//! Combines the two finished channel tracks into the final recording. The
//! length check here guards an invariant the channel builder already
//! guarantees; tripping it means a defect upstream, not bad input.

use crate::engine::buffer::{ChannelTrack, StereoRecording, CANONICAL_SAMPLE_RATE};
use crate::error::{CallweaveError, Result};

/// Interleave the left and right tracks into one stereo recording.
///
/// # Errors
/// * `ChannelLengthMismatch` - the tracks differ in length (internal
///   invariant violation)
pub fn mix_stereo(left: ChannelTrack, right: ChannelTrack) -> Result<StereoRecording> {
    if left.len() != right.len() {
        return Err(CallweaveError::ChannelLengthMismatch {
            left: left.len(),
            right: right.len(),
        });
    }

    let mut interleaved = Vec::with_capacity(left.len() * 2);
    for (l, r) in left.samples().iter().zip(right.samples().iter()) {
        interleaved.push(*l);
        interleaved.push(*r);
    }

    StereoRecording::from_interleaved(interleaved, CANONICAL_SAMPLE_RATE)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mix_interleaves_sample_by_sample() {
        let left = ChannelTrack::from_samples(vec![1.0, 2.0, 3.0]);
        let right = ChannelTrack::from_samples(vec![4.0, 5.0, 6.0]);

        let recording = mix_stereo(left, right).unwrap();
        assert_eq!(recording.samples(), &[1.0, 4.0, 2.0, 5.0, 3.0, 6.0]);
        assert_eq!(recording.sample_rate(), CANONICAL_SAMPLE_RATE);
    }

    #[test]
    fn test_mix_round_trips_through_split() {
        let left = ChannelTrack::from_samples(vec![0.1, 0.2, 0.3, 0.4]);
        let right = ChannelTrack::from_samples(vec![-0.1, -0.2, -0.3, -0.4]);

        let recording = mix_stereo(left.clone(), right.clone()).unwrap();
        let (split_left, split_right) = recording.split_channels();

        assert_eq!(split_left, left);
        assert_eq!(split_right, right);
    }

    #[test]
    fn test_mix_rejects_mismatched_lengths() {
        let left = ChannelTrack::from_samples(vec![1.0, 2.0]);
        let right = ChannelTrack::from_samples(vec![1.0]);

        let result = mix_stereo(left, right);
        assert!(matches!(
            result,
            Err(CallweaveError::ChannelLengthMismatch { left: 2, right: 1 })
        ));
    }

    #[test]
    fn test_mix_empty_tracks() {
        let recording = mix_stereo(
            ChannelTrack::from_samples(vec![]),
            ChannelTrack::from_samples(vec![]),
        )
        .unwrap();
        assert_eq!(recording.num_frames(), 0);
    }
}
