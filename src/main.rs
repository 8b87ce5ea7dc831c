//! Callweave CLI - Stereo Call Synthesis
//!
//! Command-line interface for the Callweave synthesis pipeline.

use clap::Parser;
use env_logger::Env;
use log::info;

use callweave::cli::{commands, Cli, Commands};

fn main() -> anyhow::Result<()> {
    // Initialize logger
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    info!("Callweave v{}", env!("CARGO_PKG_VERSION"));

    match cli.command {
        Some(cmd) => handle_command(cmd)?,
        None => {
            println!("Callweave v{}", env!("CARGO_PKG_VERSION"));
            println!("Use --help for available commands");
        }
    }

    Ok(())
}

fn handle_command(cmd: Commands) -> callweave::Result<()> {
    match cmd {
        Commands::Synthesize { input_dir, output } => {
            commands::synthesize(&input_dir, &output)
        }
        Commands::Batch { root, output_dir } => commands::batch(&root, &output_dir),
        Commands::Render {
            transcript,
            output_dir,
            throttle_ms,
        } => commands::render(&transcript, &output_dir, throttle_ms),
    }
}
