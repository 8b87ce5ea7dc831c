//! CLI Module
//!
//! Command-line interface for the Callweave synthesis pipeline.

pub mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Callweave - two-party stereo call recording synthesis
#[derive(Parser, Debug)]
#[command(name = "callweave")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Assemble one episode's fragment directory into a stereo recording
    #[command(name = "synthesize")]
    Synthesize {
        /// Directory containing the episode's fragment WAV files
        input_dir: PathBuf,

        /// Path for the output stereo WAV file
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Assemble every episode subdirectory under a root
    #[command(name = "batch")]
    Batch {
        /// Root directory; each subdirectory is one episode
        root: PathBuf,

        /// Directory for the output recordings
        #[arg(short, long)]
        output_dir: PathBuf,
    },

    /// Render a transcript to fragments and assemble the recording
    #[command(name = "render")]
    Render {
        /// Transcript JSON file of (speaker, text) turns
        transcript: PathBuf,

        /// Output directory; a working subtree is cleared and recreated
        /// under it for the rendered fragments
        #[arg(short, long)]
        output_dir: PathBuf,

        /// Minimum milliseconds between synthesis calls
        #[arg(long, default_value_t = 0)]
        throttle_ms: u64,
    },
}
