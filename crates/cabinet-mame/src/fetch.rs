//! Machine metadata retrieval

use crate::MameError;
use std::future::Future;
use std::path::PathBuf;
use std::process::Stdio;
use tokio::process::Command;

/// Something that can describe a machine as `-listxml` output
pub trait MetadataSource {
    /// Return the hardware description document for one short name
    fn list_xml(&self, short_name: &str) -> impl Future<Output = Result<String, MameError>>;
}

/// The MAME command line binary
#[derive(Debug, Clone)]
pub struct MameCli {
    binary: PathBuf,
}

impl MameCli {
    /// Use the given binary as-is
    pub fn new(binary: impl Into<PathBuf>) -> Self {
        Self {
            binary: binary.into(),
        }
    }

    /// Resolve the binary on `PATH` so a missing emulator fails once, up front
    pub fn locate(binary: &str) -> Result<Self, MameError> {
        let path = which::which(binary).map_err(|_| MameError::EmulatorNotFound(binary.to_string()))?;
        tracing::debug!("Using MAME binary {}", path.display());
        Ok(Self::new(path))
    }
}

impl MetadataSource for MameCli {
    async fn list_xml(&self, short_name: &str) -> Result<String, MameError> {
        let command = format!("{} -listxml {}", self.binary.display(), short_name);
        tracing::debug!("Running {}", command);

        let output = Command::new(&self.binary)
            .arg("-listxml")
            .arg(short_name)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .output()
            .await?;

        if !output.status.success() {
            return Err(MameError::CommandFailed {
                command,
                status: output.status.code(),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_locate_missing_binary() {
        let err = MameCli::locate("cabinet-no-such-mame-binary").unwrap_err();
        assert!(matches!(err, MameError::EmulatorNotFound(_)));
    }

    #[tokio::test]
    async fn test_list_xml_spawn_failure() {
        let mame = MameCli::new("/nonexistent/bin/mame");
        let result = mame.list_xml("pacman").await;
        assert!(matches!(result, Err(MameError::Io(_))));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_list_xml_nonzero_exit() {
        // `false` ignores its arguments and exits 1
        let mame = MameCli::new("false");
        let result = mame.list_xml("pacman").await;
        assert!(matches!(
            result,
            Err(MameError::CommandFailed { status: Some(1), .. })
        ));
    }
}
