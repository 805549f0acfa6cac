//! Game library handling for the cabinet tools
//!
//! Loads the EmulationStation arcade gamelist, decides whether a game's
//! controls fit a standard one-stick, two-button panel, and carries the
//! hand-curated notes on games whose buttons are known to misbehave.

mod classify;
mod known_issues;
mod manifest;

pub use classify::{MappingIssue, classify, needs_custom_mapping};
pub use known_issues::{ButtonLabel, KnownIssue, known_issues, lookup};
pub use manifest::{Manifest, ManifestEntry, short_name};

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LibraryError {
    #[error("Gamelist not found: {0}")]
    ManifestNotFound(PathBuf),

    #[error("Invalid gamelist: {0}")]
    InvalidManifest(String),

    #[error("XML error: {0}")]
    Xml(#[from] roxmltree::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
