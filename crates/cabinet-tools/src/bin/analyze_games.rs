//! analyze-games
//!
//! For every game in the gamelist, writes a CRT shader preset for raster
//! displays and a sticky-diagonal joystick map for 4-way games.

use anyhow::Result;
use cabinet_tools::artifacts::generate_artifacts;
use cabinet_tools::{load_config, load_manifest, mame_from_config, setup_logging};
use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{error, info};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Generate shader presets and joystick maps for a MAME gamelist"
)]
struct Args {
    /// Configuration file (defaults to the user or system config)
    #[arg(short, long)]
    config: Option<PathBuf>,
}

async fn run(args: Args) -> Result<()> {
    let config = load_config(args.config.as_deref())?;
    let manifest = load_manifest(&config.paths.gamelist, true)?;
    let mame = mame_from_config(&config);

    info!("Analyzing {} games", manifest.len());

    let results = generate_artifacts(
        &mame,
        &manifest,
        &config.paths.shader_dir,
        &config.paths.ini_dir,
    )
    .await;

    for game in &results {
        println!("{}", game.summary());
    }

    info!("Processed {} of {} games", results.len(), manifest.len());
    Ok(())
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    setup_logging();

    match run(Args::parse()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}
