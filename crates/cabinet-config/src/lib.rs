//! Configuration for the cabinet arcade tools
//!
//! Holds the RetroPie paths the tools read from and write to, plus the MAME
//! binary and driver source location. Every field has a default matching a
//! stock RetroPie install, so a missing config file is not an error.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration file not found: {0}")]
    NotFound(PathBuf),

    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),
}

/// System-wide configuration path
pub const SYSTEM_CONFIG_PATH: &str = "/etc/cabinet/config.toml";

/// Per-user configuration path, relative to `$HOME`
pub const USER_CONFIG_PATH: &str = ".config/cabinet/config.toml";

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CabinetConfig {
    #[serde(default)]
    pub paths: PathsConfig,

    #[serde(default)]
    pub mame: MameConfig,
}

/// Input and output locations
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    /// EmulationStation arcade gamelist
    pub gamelist: PathBuf,

    /// RetroArch per-game shader presets
    pub shader_dir: PathBuf,

    /// MAME per-game ini files
    pub ini_dir: PathBuf,

    /// Control mapping analysis report
    pub report: PathBuf,

    /// Comprehensive control listing
    pub control_list: PathBuf,

    /// Local mirror of downloaded driver sources
    pub source_cache: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            gamelist: PathBuf::from(
                "/opt/retropie/configs/all/emulationstation/gamelists/arcade/gamelist.xml",
            ),
            shader_dir: PathBuf::from("/opt/retropie/configs/all/retroarch/config/MAME/"),
            ini_dir: PathBuf::from("/opt/retropie/emulators/mame/ini/"),
            report: PathBuf::from("/opt/retropie/configs/all/CONTROL_MAPPING_REPORT.txt"),
            control_list: PathBuf::from("./CONTROL_LIST.txt"),
            source_cache: PathBuf::from("/tmp/mame_sources"),
        }
    }
}

/// MAME binary and driver source settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MameConfig {
    /// Binary invoked for `-listxml`
    pub binary: String,

    /// Base URL the driver `sourcefile` paths are appended to
    pub source_base_url: String,
}

impl Default for MameConfig {
    fn default() -> Self {
        Self {
            binary: "mame".to_string(),
            source_base_url: "https://raw.githubusercontent.com/mamedev/mame/mame0276/src/mame/"
                .to_string(),
        }
    }
}

impl CabinetConfig {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::NotFound(path.to_path_buf()));
        }

        let contents = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from default locations
    pub fn load_default() -> Result<Self, ConfigError> {
        // Try user config first, then system config
        if let Some(home) = std::env::var_os("HOME") {
            let user_config = Path::new(&home).join(USER_CONFIG_PATH);
            if user_config.exists() {
                return Self::load(&user_config);
            }
        }

        let system_config = Path::new(SYSTEM_CONFIG_PATH);
        if system_config.exists() {
            return Self::load(system_config);
        }

        tracing::warn!("No configuration file found, using defaults");
        Ok(Self::default())
    }

    /// Load an explicit file when given, otherwise the default locations
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::load(path),
            None => Self::load_default(),
        }
    }

    /// Save configuration to a file
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let contents = toml::to_string_pretty(self)?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(path, contents)?;
        tracing::info!("Configuration saved to {}", path.display());
        Ok(())
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.mame.binary.trim().is_empty() {
            return Err(ConfigError::Invalid("mame.binary must not be empty".into()));
        }
        if !self.mame.source_base_url.ends_with('/') {
            return Err(ConfigError::Invalid(
                "mame.source_base_url must end with '/'".into(),
            ));
        }
        Ok(())
    }
}
