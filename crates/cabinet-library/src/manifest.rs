//! EmulationStation gamelist.xml loading

use crate::LibraryError;
use roxmltree::{Document, Node};
use std::path::Path;

/// Short machine name of a ROM, e.g. `./roms/arcade/pacman.zip` -> `pacman`
pub fn short_name(rom_path: &str) -> String {
    Path::new(rom_path)
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// One `<game>` of the gamelist
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestEntry {
    /// ROM path as written in the gamelist
    pub path: String,

    /// Display name, when the gamelist has one
    pub name: Option<String>,
}

impl ManifestEntry {
    pub fn short_name(&self) -> String {
        short_name(&self.path)
    }
}

/// A loaded gamelist
#[derive(Debug, Clone, Default)]
pub struct Manifest {
    root: String,
    entries: Vec<ManifestEntry>,
}

fn child_text(node: Node<'_, '_>, name: &str) -> Option<String> {
    node.children()
        .find(|n| n.has_tag_name(name))
        .and_then(|n| n.text())
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
}

impl Manifest {
    /// Load a gamelist from disk
    pub fn load(path: &Path) -> Result<Self, LibraryError> {
        if !path.exists() {
            return Err(LibraryError::ManifestNotFound(path.to_path_buf()));
        }

        let xml = std::fs::read_to_string(path)?;
        let manifest = Self::parse(&xml)?;
        tracing::info!(
            "Loaded {} games from {}",
            manifest.entries.len(),
            path.display()
        );
        Ok(manifest)
    }

    /// Parse gamelist XML; `<game>` entries without a `<path>` are skipped
    pub fn parse(xml: &str) -> Result<Self, LibraryError> {
        let doc = Document::parse(xml)?;
        let root = doc.root_element();

        let entries = root
            .children()
            .filter(|n| n.has_tag_name("game"))
            .filter_map(|game| {
                let Some(path) = child_text(game, "path") else {
                    tracing::debug!("Skipping <game> without a <path>");
                    return None;
                };
                Some(ManifestEntry {
                    path,
                    name: child_text(game, "name"),
                })
            })
            .collect();

        Ok(Self {
            root: root.tag_name().name().to_string(),
            entries,
        })
    }

    /// Fail unless the root element is `name`
    pub fn require_root(self, name: &str) -> Result<Self, LibraryError> {
        if self.root == name {
            Ok(self)
        } else {
            Err(LibraryError::InvalidManifest(format!(
                "No <{}> element found.",
                name
            )))
        }
    }

    pub fn root(&self) -> &str {
        &self.root
    }

    pub fn entries(&self) -> &[ManifestEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
