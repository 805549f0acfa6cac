//! analyze-controls
//!
//! Classifies every game's control scheme, cross-references the known-issues
//! table and writes the control mapping report.

use anyhow::{Context, Result};
use cabinet_tools::report::AnalysisReport;
use cabinet_tools::{load_config, load_manifest, mame_from_config, setup_logging};
use clap::Parser;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::error;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Report games whose controls need a custom arcade panel mapping"
)]
struct Args {
    /// Configuration file (defaults to the user or system config)
    #[arg(short, long)]
    config: Option<PathBuf>,
}

async fn run(args: Args) -> Result<()> {
    let config = load_config(args.config.as_deref())?;
    let manifest = load_manifest(&config.paths.gamelist, true)?;
    let report_path = &config.paths.report;

    let file = File::create(report_path)
        .with_context(|| format!("Failed to open report file: {}", report_path.display()))?;
    let mame = mame_from_config(&config);

    let report = AnalysisReport::analyze(&mame, &manifest).await;

    let mut out = BufWriter::new(file);
    report.write_to(&mut out)?;
    out.flush()?;

    let stdout = io::stdout();
    let mut console = stdout.lock();
    writeln!(
        console,
        "Analysis complete! Report written to: {}",
        report_path.display()
    )?;
    report.write_console_summary(&mut console)?;

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
