//! list-controls
//!
//! Writes every input device each game needs, with button labels recovered
//! from the MAME driver sources.

use anyhow::{Context, Result};
use cabinet_mame::SourceCache;
use cabinet_tools::listing::write_listing;
use cabinet_tools::{load_config, load_manifest, mame_from_config, setup_logging};
use clap::Parser;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::error;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "List every input device required by the games in a gamelist"
)]
struct Args {
    /// Gamelist to read instead of the configured one
    gamelist: Option<PathBuf>,

    /// Configuration file (defaults to the user or system config)
    #[arg(short, long)]
    config: Option<PathBuf>,
}

async fn run(args: Args) -> Result<()> {
    let config = load_config(args.config.as_deref())?;
    let gamelist = args.gamelist.unwrap_or_else(|| config.paths.gamelist.clone());
    let manifest = load_manifest(&gamelist, false)?;
    let output = &config.paths.control_list;

    let file = File::create(output)
        .with_context(|| format!("Cannot open output file: {}", output.display()))?;
    let mame = mame_from_config(&config);
    let cache = SourceCache::new(&config.paths.source_cache, &config.mame.source_base_url)?;

    println!("Processing games...");

    let mut out = BufWriter::new(file);
    let count = write_listing(&mame, &cache, &manifest, &mut out).await?;
    out.flush()?;

    println!();
    println!("Complete! Processed {} games.", count);
    println!("Output written to: {}", output.display());

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
