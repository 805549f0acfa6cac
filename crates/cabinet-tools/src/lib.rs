//! Cabinet tools
//!
//! Shared pieces of the `analyze-games`, `analyze-controls` and
//! `list-controls` binaries: per-game artifact writers, the control mapping
//! report and the comprehensive control listing.

pub mod artifacts;
pub mod listing;
pub mod report;

use anyhow::{Context, Result};
use cabinet_config::CabinetConfig;
use cabinet_library::Manifest;
use cabinet_mame::{GameRecord, MameCli, MameError, MetadataSource, extract_game};
use std::path::Path;

/// Setup logging to stderr, filtered by `RUST_LOG` (default `info`)
pub fn setup_logging() {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_ansi(false)
                .with_writer(std::io::stderr),
        )
        .init();
}

/// Load the config file given on the command line, or the default one
pub fn load_config(path: Option<&Path>) -> Result<CabinetConfig> {
    CabinetConfig::load_or_default(path).context("Failed to load configuration")
}

/// Load the gamelist, optionally insisting on a `<gameList>` root
pub fn load_manifest(path: &Path, require_game_list: bool) -> Result<Manifest> {
    let manifest = Manifest::load(path)
        .with_context(|| format!("Failed to load gamelist: {}", path.display()))?;

    if require_game_list {
        manifest.require_root("gameList").map_err(Into::into)
    } else {
        Ok(manifest)
    }
}

/// The configured MAME binary, resolved on `PATH` when possible
///
/// A missing binary is not fatal here; every game then fails individually.
pub fn mame_from_config(config: &CabinetConfig) -> MameCli {
    MameCli::locate(&config.mame.binary).unwrap_or_else(|e| {
        tracing::warn!("{}", e);
        MameCli::new(&config.mame.binary)
    })
}

/// Fetch and extract one game's record
pub async fn fetch_game<S: MetadataSource>(
    source: &S,
    short_name: &str,
) -> Result<GameRecord, MameError> {
    let xml = source.list_xml(short_name).await?;
    extract_game(&xml, short_name)
}
