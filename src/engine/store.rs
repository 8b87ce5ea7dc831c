//! Fragment loading
//!
//! Scans an episode directory for fragment WAV files, recovers each file's
//! sequence index from its name, decodes the audio to mono at the canonical
//! rate, and verifies the recovered indices form a contiguous 0..N range.

use std::collections::BTreeSet;
use std::path::Path;

use log::{debug, info};
use walkdir::WalkDir;

use crate::engine::buffer::AudioFragment;
use crate::engine::io::load_fragment_audio;
use crate::error::{CallweaveError, Result};

/// Load all audio fragments for one episode.
///
/// Each file name must encode the fragment's sequence index as the final
/// `_`-separated token of its stem, e.g. `utterance_3.wav` -> index 3.
///
/// # Errors
/// * `Decode` - a file cannot be parsed as audio, or its name does not
///   encode a sequence index
/// * `MissingFragment` - recovered indices have a duplicate or a gap
pub fn load_fragments(directory: &Path) -> Result<Vec<AudioFragment>> {
    let mut fragments = Vec::new();
    let mut seen = BTreeSet::new();

    for entry in WalkDir::new(directory).max_depth(1).sort_by_file_name() {
        let entry = entry.map_err(|e| CallweaveError::Io(e.into()))?;
        let path = entry.path();

        if !entry.file_type().is_file() || !has_wav_extension(path) {
            continue;
        }

        let index = parse_sequence_index(path)?;
        if !seen.insert(index) {
            return Err(CallweaveError::MissingFragment {
                details: format!(
                    "duplicate sequence index {} in {}",
                    index,
                    directory.display()
                ),
            });
        }

        let samples = load_fragment_audio(path)?;
        debug!(
            "Loaded fragment {} ({} samples) from {}",
            index,
            samples.len(),
            path.display()
        );
        fragments.push(AudioFragment::new(index, samples));
    }

    validate_contiguity(&seen, directory)?;

    info!(
        "Retrieved {} audio fragments from {}",
        fragments.len(),
        directory.display()
    );

    Ok(fragments)
}

/// Recover a fragment's sequence index from its file name.
///
/// The index is the final `_`-separated token of the file stem, parsed as a
/// non-negative integer. Anything else is a decode failure, not a silent
/// skip.
pub fn parse_sequence_index(path: &Path) -> Result<usize> {
    let stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .ok_or_else(|| name_error(path, "file name is not valid UTF-8"))?;

    let token = stem.rsplit('_').next().unwrap_or(stem);

    token
        .parse::<usize>()
        .map_err(|_| name_error(path, "file name does not end in a sequence index"))
}

fn name_error(path: &Path, reason: &str) -> CallweaveError {
    CallweaveError::Decode {
        path: path.display().to_string(),
        reason: reason.to_string(),
        source: None,
    }
}

fn has_wav_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.eq_ignore_ascii_case("wav"))
        .unwrap_or(false)
}

/// Check that the loaded indices are exactly {0, 1, ..., N-1}.
///
/// A gap indicates an upstream generation failure; the whole episode is
/// rejected rather than assembled with a hole in the timeline.
fn validate_contiguity(seen: &BTreeSet<usize>, directory: &Path) -> Result<()> {
    let count = seen.len();
    let missing: Vec<usize> = (0..count).filter(|i| !seen.contains(i)).collect();

    if missing.is_empty() {
        return Ok(());
    }

    Err(CallweaveError::MissingFragment {
        details: format!(
            "{} fragments in {} but indices {:?} are missing",
            count,
            directory.display(),
            missing
        ),
    })
}

// ============================================================================
// Tests
// ============================================================================
