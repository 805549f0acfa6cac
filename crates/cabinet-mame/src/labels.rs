//! Button label scraping from MAME driver sources
//!
//! Driver files declare their inputs in `INPUT_PORTS_START( name )` ...
//! `INPUT_PORTS_END` blocks, with human-readable names given through
//! `PORT_NAME("...")`. The block naming rarely lines up exactly with the
//! machine's short name, so a list of candidates is tried and the busiest
//! block is used as a last resort. Wrong matches are possible and accepted.

use crate::{MachineInfo, MameError};
use regex::Regex;
use std::collections::BTreeMap;
use std::path::{Component, Path, PathBuf};
use std::sync::LazyLock;

static BLOCK_START: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:static\s+)?INPUT_PORTS_START\(\s*([^)\s]+)\s*\)").expect("valid regex")
});

static PORT_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"PORT_NAME\("([^"]+)"\)"#).expect("valid regex"));

const BLOCK_END: &str = "INPUT_PORTS_END";

/// Collect the labels of every `INPUT_PORTS` block that has any
fn collect_blocks(source: &str) -> BTreeMap<String, Vec<String>> {
    let mut blocks = BTreeMap::new();

    for caps in BLOCK_START.captures_iter(source) {
        let Some(start) = caps.get(0) else {
            continue;
        };
        let Some(end) = source[start.end()..]
            .find(BLOCK_END)
            .map(|offset| start.end() + offset)
        else {
            continue;
        };

        let labels: Vec<String> = PORT_NAME
            .captures_iter(&source[start.start()..end])
            .map(|c| c[1].to_string())
            .collect();

        if !labels.is_empty() {
            blocks.insert(caps[1].to_string(), labels);
        }
    }

    blocks
}

/// Extract `PORT_NAME` labels for the first candidate block found in `source`
///
/// Falls back to the block with the most labels when no candidate matches.
pub fn parse_button_labels(source: &str, candidates: &[String]) -> Vec<String> {
    let mut blocks = collect_blocks(source);

    for name in candidates.iter().filter(|n| !n.is_empty()) {
        if let Some(labels) = blocks.remove(name) {
            return labels;
        }
    }

    // Strictly greater keeps the first block in name order on ties
    let mut best: Option<Vec<String>> = None;
    for labels in blocks.into_values() {
        if best.as_ref().is_none_or(|b| labels.len() > b.len()) {
            best = Some(labels);
        }
    }
    best.unwrap_or_default()
}

/// Block names to try, most specific first
pub fn label_candidates(
    short_name: &str,
    clone_of: Option<&str>,
    rom_of: Option<&str>,
    source_file: &str,
) -> Vec<String> {
    let driver_base = Path::new(source_file)
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned());

    [
        Some(short_name.to_string()),
        clone_of.map(str::to_string),
        rom_of.map(str::to_string),
        driver_base,
    ]
    .into_iter()
    .flatten()
    .filter(|c| !c.is_empty())
    .collect()
}

/// Labels found for a game plus a human-readable account of the lookup
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LabelLookup {
    pub labels: Vec<String>,
    pub diagnostic: String,
}

impl LabelLookup {
    fn failed(diagnostic: String) -> Self {
        Self {
            labels: Vec::new(),
            diagnostic,
        }
    }
}

/// Local mirror of driver sources, filled lazily over HTTP
pub struct SourceCache {
    dir: PathBuf,
    base_url: String,
    client: reqwest::Client,
}

impl SourceCache {
    /// Create a cache rooted at `dir` that downloads from `base_url`
    pub fn new(dir: impl Into<PathBuf>, base_url: impl Into<String>) -> Result<Self, MameError> {
        let client = reqwest::Client::builder()
            .user_agent(format!("cabinet/{}", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            dir: dir.into(),
            base_url: base_url.into(),
            client,
        })
    }

    /// Where `source_file` lives in the cache
    ///
    /// Root, prefix and `..` components are dropped so the entry always
    /// stays inside the cache directory.
    pub fn cached_path(&self, source_file: &str) -> PathBuf {
        let relative: PathBuf = Path::new(source_file)
            .components()
            .filter(|c| matches!(c, Component::Normal(_)))
            .collect();
        self.dir.join(relative)
    }

    /// Return the cached copy of `source_file`, downloading it first if needed
    ///
    /// Any download failure leaves the entry absent and yields `None`.
    pub async fn fetch(&self, source_file: &str) -> Option<PathBuf> {
        let dest = self.cached_path(source_file);

        if !is_populated(&dest).await {
            if let Err(e) = self.download(source_file, &dest).await {
                tracing::warn!("Failed to download {}: {}", source_file, e);
            }
        }

        is_populated(&dest).await.then_some(dest)
    }

    async fn download(&self, source_file: &str, dest: &Path) -> Result<(), MameError> {
        let url = format!("{}{}", self.base_url, source_file);
        tracing::info!("Downloading {}", url);

        let response = self.client.get(&url).send().await?;
        if !response.status().is_success() {
            return Err(MameError::DownloadFailed(format!(
                "Server returned {} for {}",
                response.status(),
                url
            )));
        }
        let body = response.bytes().await?;

        if let Some(parent) = dest.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(dest, &body).await?;

        Ok(())
    }

    /// Look up button labels for one machine
    ///
    /// `declared_buttons` is the machine's total declared button count; a
    /// label count that differs is called out in the diagnostic.
    pub async fn lookup_labels(
        &self,
        short_name: &str,
        machine: &MachineInfo,
        declared_buttons: u32,
    ) -> LabelLookup {
        let Some(source_file) = machine.source_file.as_deref().filter(|s| !s.is_empty()) else {
            return LabelLookup::failed("No source file found in MAME metadata".to_string());
        };

        let mut diagnostic = format!("Source: {} | ", source_file);

        let source = match self.fetch(source_file).await {
            Some(path) => tokio::fs::read(&path).await.ok(),
            None => None,
        };
        let Some(source) = source else {
            diagnostic.push_str("Download/parse failed (file empty or missing)");
            return LabelLookup::failed(diagnostic);
        };
        let source = String::from_utf8_lossy(&source);

        diagnostic.push_str("Downloaded | ");

        let candidates = label_candidates(
            short_name,
            machine.clone_of.as_deref(),
            machine.rom_of.as_deref(),
            source_file,
        );
        diagnostic.push_str(&format!("Trying: [{}] | ", candidates.join(", ")));

        let labels = parse_button_labels(&source, &candidates);

        if labels.is_empty() {
            diagnostic.push_str("No INPUT_PORTS blocks matched (check driver structure)");
        } else {
            diagnostic.push_str(&format!("Found {} labels", labels.len()));
            if declared_buttons > 0 && labels.len() != declared_buttons as usize {
                diagnostic.push_str(&format!(
                    " (⚠ expected {} for {} declared buttons)",
                    declared_buttons, declared_buttons
                ));
            }
        }

        tracing::debug!("{}: {}", short_name, diagnostic);

        LabelLookup { labels, diagnostic }
    }
}

/// Exists and is non-empty
async fn is_populated(path: &Path) -> bool {
    tokio::fs::metadata(path)
        .await
        .map(|m| m.is_file() && m.len() > 0)
        .unwrap_or(false)
}
