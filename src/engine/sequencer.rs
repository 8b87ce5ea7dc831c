//! Fragment sequencing
//!
//! Orders fragments by their position in the conversation and derives the
//! output channel each one belongs to. Pure transform, no I/O.

use crate::engine::buffer::{AudioFragment, Channel};
use crate::error::{CallweaveError, Result};

/// A fragment paired with the output channel its real audio belongs to
#[derive(Debug, Clone)]
pub struct SequencedFragment {
    pub fragment: AudioFragment,
    pub channel: Channel,
}

/// Order fragments ascending by sequence index and assign each its channel.
///
/// The channel comes from index parity (even -> left, odd -> right),
/// encoding the assumption that the two parties strictly alternate turns.
///
/// # Errors
/// * `EmptyEpisode` - the fragment set is empty; there is nothing to
///   synthesize
pub fn sequence_fragments(mut fragments: Vec<AudioFragment>) -> Result<Vec<SequencedFragment>> {
    if fragments.is_empty() {
        return Err(CallweaveError::EmptyEpisode);
    }

    fragments.sort_by_key(|f| f.sequence_index());

    Ok(fragments
        .into_iter()
        .map(|fragment| {
            let channel = Channel::from_sequence_index(fragment.sequence_index());
            SequencedFragment { fragment, channel }
        })
        .collect())
}

/// Total sample count across all fragments, which is also the length of
/// each finished channel track
pub fn total_sample_count(sequenced: &[SequencedFragment]) -> usize {
    sequenced.iter().map(|s| s.fragment.sample_count()).sum()
}

// ============================================================================
// Tests
// ============================================================================
