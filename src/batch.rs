//! Batch episode driver
//!
//! Runs the assembly pipeline over every episode subdirectory under a root.
//! Episodes are independent: a failed episode is reported with its key and
//! error code and the batch moves on, never aborting the remaining work. No
//! partial output is persisted for a failed episode.

use std::path::{Path, PathBuf};

use log::{error, info};

use crate::engine::synthesize_episode;
use crate::error::Result;

/// Outcome of one episode's synthesis within a batch
#[derive(Debug)]
pub struct EpisodeReport {
    /// Identifying key: the episode subdirectory's name
    pub episode: String,
    /// Error code from `CallweaveError::error_code` when the episode failed
    pub error_code: Option<&'static str>,
    /// Human-readable error description when the episode failed
    pub message: Option<String>,
}

impl EpisodeReport {
    pub fn succeeded(&self) -> bool {
        self.error_code.is_none()
    }
}

/// Summary of a completed batch run
#[derive(Debug)]
pub struct BatchSummary {
    pub reports: Vec<EpisodeReport>,
}

impl BatchSummary {
    pub fn succeeded_count(&self) -> usize {
        self.reports.iter().filter(|r| r.succeeded()).count()
    }

    pub fn failed_count(&self) -> usize {
        self.reports.len() - self.succeeded_count()
    }

    /// Whether every episode in the batch produced a recording
    pub fn all_succeeded(&self) -> bool {
        self.failed_count() == 0
    }
}

/// Synthesize every episode under `root`.
///
/// Each direct subdirectory of `root` is one episode's fragment directory;
/// its recording is written next to it as `<episode>.wav` in `output_dir`.
/// Subdirectory iteration order is name-sorted so batch runs are
/// reproducible.
pub fn run_batch(root: &Path, output_dir: &Path) -> Result<BatchSummary> {
    let mut episode_dirs: Vec<PathBuf> = std::fs::read_dir(root)?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.is_dir())
        .collect();
    episode_dirs.sort();

    info!(
        "Batch of {} episodes under {}",
        episode_dirs.len(),
        root.display()
    );

    let mut reports = Vec::with_capacity(episode_dirs.len());
    for episode_dir in &episode_dirs {
        reports.push(run_episode(episode_dir, output_dir));
    }

    let summary = BatchSummary { reports };
    info!(
        "Batch complete: {} succeeded, {} failed",
        summary.succeeded_count(),
        summary.failed_count()
    );

    Ok(summary)
}

fn run_episode(episode_dir: &Path, output_dir: &Path) -> EpisodeReport {
    let episode = episode_dir
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| episode_dir.display().to_string());

    let output_path = output_dir.join(format!("{}.wav", episode));

    match synthesize_episode(episode_dir, &output_path) {
        Ok(()) => EpisodeReport {
            episode,
            error_code: None,
            message: None,
        },
        Err(err) => {
            error!("Episode '{}' failed [{}]: {}", episode, err.error_code(), err);
            EpisodeReport {
                episode,
                error_code: Some(err.error_code()),
                message: Some(err.to_string()),
            }
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
