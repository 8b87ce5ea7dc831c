//! CLI Command Implementations
//!
//! Implements the actual logic for each CLI command.

use std::path::{Path, PathBuf};
use std::time::Duration;

use log::info;

use crate::batch::run_batch;
use crate::dialogue::Transcript;
use crate::engine::synthesize_episode;
use crate::error::{CallweaveError, Result};
use crate::synth::{MockSynthesizer, SpeechSynthesizer, Throttle, ThrottledSynthesizer};

/// Subdirectory cleared and recreated under the output directory to hold
/// rendered fragments for a transcript
const WORKING_SUBTREE: &str = "synth_calls";

/// Assemble one episode's fragments into a stereo recording.
pub fn synthesize(input_dir: &Path, output: &Path) -> Result<()> {
    require_directory(input_dir)?;

    synthesize_episode(input_dir, output)?;

    println!("Recording written: {}", output.display());

    Ok(())
}

/// Assemble every episode subdirectory under `root`.
pub fn batch(root: &Path, output_dir: &Path) -> Result<()> {
    require_directory(root)?;
    std::fs::create_dir_all(output_dir)?;

    let summary = run_batch(root, output_dir)?;

    for report in &summary.reports {
        match (&report.error_code, &report.message) {
            (Some(code), Some(message)) => {
                println!("FAILED  {} [{}]: {}", report.episode, code, message)
            }
            _ => println!("OK      {}", report.episode),
        }
    }
    println!(
        "{} succeeded, {} failed",
        summary.succeeded_count(),
        summary.failed_count()
    );

    Ok(())
}

/// Render a transcript to fragment files, then assemble the recording.
///
/// The working subtree under `output_dir` is cleared and recreated so stale
/// fragments from a previous run can never leak into the episode.
pub fn render(transcript_path: &Path, output_dir: &Path, throttle_ms: u64) -> Result<()> {
    require_directory(output_dir)?;

    let transcript = Transcript::load(transcript_path)?;
    info!(
        "Rendering episode '{}' ({} turns)",
        transcript.episode,
        transcript.len()
    );

    let fragment_dir = recreate_working_subtree(output_dir, &transcript.episode)?;

    let mut synth = ThrottledSynthesizer::new(
        MockSynthesizer::new(),
        Throttle::new(Duration::from_millis(throttle_ms)),
    );

    for (index, turn) in transcript.turns.iter().enumerate() {
        let fragment_path = fragment_dir.join(format!("utterance_{}.wav", index));
        synth.synthesize(&turn.text, turn.speaker, &fragment_path)?;
    }

    let output = output_dir.join(format!("{}.wav", transcript.episode));
    synthesize_episode(&fragment_dir, &output)?;

    println!("Recording written: {}", output.display());

    Ok(())
}

/// Fail with a decode-free I/O error when a caller-supplied directory is
/// missing or not a directory; the binary maps this to a non-zero exit.
fn require_directory(path: &Path) -> Result<()> {
    if !path.is_dir() {
        return Err(CallweaveError::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!("not a directory: {}", path.display()),
        )));
    }
    Ok(())
}

/// Clear and recreate the per-episode working subtree.
fn recreate_working_subtree(output_dir: &Path, episode: &str) -> Result<PathBuf> {
    let subtree = output_dir.join(WORKING_SUBTREE).join(episode);
    if subtree.exists() {
        std::fs::remove_dir_all(&subtree)?;
    }
    std::fs::create_dir_all(&subtree)?;
    Ok(subtree)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::buffer::Speaker;
    use crate::dialogue::DialogueTurn;
    use tempfile::tempdir;

    fn sample_transcript() -> Transcript {
        Transcript {
            episode: "sample_transcript".to_string(),
            turns: vec![
                DialogueTurn {
                    speaker: Speaker::A,
                    text: "Thank you for calling, how can I help?".to_string(),
                },
                DialogueTurn {
                    speaker: Speaker::B,
                    text: "Hi, I'd like to update my address.".to_string(),
                },
                DialogueTurn {
                    speaker: Speaker::A,
                    text: "No problem, let me pull up your account.".to_string(),
                },
            ],
        }
    }

    #[test]
    fn test_require_directory_rejects_missing_path() {
        let result = require_directory(Path::new("/no/such/directory"));
        assert!(matches!(result, Err(CallweaveError::Io(_))));
    }

    #[test]
    fn test_render_produces_recording() {
        let out = tempdir().unwrap();
        let transcript_path = out.path().join("transcript.json");
        std::fs::write(
            &transcript_path,
            serde_json::to_string(&sample_transcript()).unwrap(),
        )
        .unwrap();

        render(&transcript_path, out.path(), 0).unwrap();

        assert!(out.path().join("sample_transcript.wav").exists());
        // One fragment per turn in the working subtree
        let fragment_dir = out.path().join(WORKING_SUBTREE).join("sample_transcript");
        let fragments = std::fs::read_dir(&fragment_dir).unwrap().count();
        assert_eq!(fragments, 3);
    }

    #[test]
    fn test_render_clears_stale_fragments() {
        let out = tempdir().unwrap();
        let transcript_path = out.path().join("transcript.json");
        std::fs::write(
            &transcript_path,
            serde_json::to_string(&sample_transcript()).unwrap(),
        )
        .unwrap();

        // A stale fragment from an aborted earlier run
        let stale_dir = out.path().join(WORKING_SUBTREE).join("sample_transcript");
        std::fs::create_dir_all(&stale_dir).unwrap();
        std::fs::write(stale_dir.join("utterance_9.wav"), b"stale").unwrap();

        render(&transcript_path, out.path(), 0).unwrap();

        assert!(!stale_dir.join("utterance_9.wav").exists());
    }
}
