//! MAME metadata for the cabinet tools
//!
//! Runs `mame -listxml` for a single machine, turns the result into flat
//! records, and mines button names out of the machine's driver source.

mod extract;
mod fetch;
mod labels;

pub use extract::{ControlEntry, GameRecord, MachineInfo, PortMapping, extract_game, extract_machine};
pub use fetch::{MameCli, MetadataSource};
pub use labels::{LabelLookup, SourceCache, label_candidates, parse_button_labels};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum MameError {
    #[error("Emulator not found: {0}")]
    EmulatorNotFound(String),

    #[error("Command failed: {command} (exit status {status:?})")]
    CommandFailed { command: String, status: Option<i32> },

    #[error("XML error: {0}")]
    Xml(#[from] roxmltree::Error),

    #[error("No <machine> element found for {0}")]
    MissingMachine(String),

    #[error("Download failed: {0}")]
    DownloadFailed(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}
