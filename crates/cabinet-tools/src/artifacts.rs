//! Per-game RetroArch shader presets and MAME joystick maps
//!
//! Raster games get a CRT shader matching their orientation. 4-way games get
//! a sticky-diagonal `joystick_map` so an 8-way stick does not drop inputs on
//! the diagonals (see retrogamedeconstructionzone.com, "Joystick mapping in
//! MAME").

use crate::fetch_game;
use cabinet_library::Manifest;
use cabinet_mame::{GameRecord, MetadataSource};
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

pub const HORIZONTAL_SHADER: &str = "#reference \"../../shaders/crt-pi.glslp\"";
pub const VERTICAL_SHADER: &str = "#reference \"../../shaders/crt-pi-vertical.glslp\"";

/// 4-way with sticky diagonals
pub const STICKY_DIAGONAL_MAP: &str = "joystick_map s8.4s8.44s8.4445";

/// Q*bert's stick is mounted at 45 degrees, so every position is spelled out
///
/// 4 = left, 8 = up, 2 = down, 6 = right, 5 = neutral, s = sticky.
pub const QBERT_MAP: &str = concat!(
    "joystick_map ",
    "4444s8888.",
    "4444s8888.",
    "444458888.",
    "444555888.",
    "ss55555ss.",
    "222555666.",
    "222256666.",
    "2222s6666.",
    "2222s6666",
);

/// Shader line for a game, or `None` for anything but raster displays
pub fn shader_reference(record: &GameRecord) -> Option<&'static str> {
    if record.display_type != "raster" {
        return None;
    }

    Some(if record.rotation == "0" {
        HORIZONTAL_SHADER
    } else {
        VERTICAL_SHADER
    })
}

/// Write `<dir>/<short>.glslp`; returns the path when a file was written
pub fn write_shader(dir: &Path, record: &GameRecord) -> io::Result<Option<PathBuf>> {
    let Some(line) = shader_reference(record) else {
        return Ok(None);
    };

    fs::create_dir_all(dir)?;
    let path = dir.join(format!("{}.glslp", record.short_name));
    fs::write(&path, format!("{}\n", line))?;

    tracing::debug!("Wrote shader preset {}", path.display());
    Ok(Some(path))
}

/// What happened to a game's ini file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IniOutcome {
    /// 8-way or no joystick; nothing to do
    Skipped,
    Created(PathBuf),
    Appended(PathBuf),
    /// The file already has a joystick map and was left alone
    AlreadyMapped(PathBuf),
}

/// Map line for a game, or `None` when the default 8-way handling is fine
pub fn joystick_map_line(short_name: &str, ways: Option<u32>) -> Option<&'static str> {
    if short_name == "qbert" {
        return Some(QBERT_MAP);
    }

    match ways {
        Some(8) | None => None,
        Some(_) => Some(STICKY_DIAGONAL_MAP),
    }
}

fn has_joystick_map(contents: &[u8]) -> bool {
    String::from_utf8_lossy(contents)
        .lines()
        .any(|line| line.contains("joystick_map") || line.contains("joymap"))
}

/// Create or extend `<dir>/<short>.ini` with a joystick map
///
/// An existing map line is never touched, so re-running is harmless.
pub fn write_joystick_ini(dir: &Path, short_name: &str, ways: Option<u32>) -> io::Result<IniOutcome> {
    let Some(line) = joystick_map_line(short_name, ways) else {
        return Ok(IniOutcome::Skipped);
    };

    let path = dir.join(format!("{}.ini", short_name));

    if path.exists() {
        // User-edited files may hold non-UTF-8 comments
        let contents = fs::read(&path)?;
        if has_joystick_map(&contents) {
            return Ok(IniOutcome::AlreadyMapped(path));
        }

        let mut file = OpenOptions::new().append(true).open(&path)?;
        if contents.last().is_some_and(|&b| b != b'\n') {
            writeln!(file)?;
        }
        writeln!(file, "{}", line)?;

        tracing::debug!("Appended joystick map to {}", path.display());
        Ok(IniOutcome::Appended(path))
    } else {
        fs::create_dir_all(dir)?;
        fs::write(&path, format!("{}\n", line))?;

        tracing::debug!("Created {}", path.display());
        Ok(IniOutcome::Created(path))
    }
}

/// Artifacts produced for one game
#[derive(Debug, Clone)]
pub struct GameArtifacts {
    pub record: GameRecord,
    pub shader: Option<PathBuf>,
    pub ini: IniOutcome,
}

impl GameArtifacts {
    /// One-line console summary
    pub fn summary(&self) -> String {
        let ways = self
            .record
            .joystick_ways()
            .map(|w| w.to_string())
            .unwrap_or_else(|| "n/a".to_string());

        format!(
            "Game: {}, Type: {}, Rotation: {}, Ways: {}",
            self.record.short_name, self.record.display_type, self.record.rotation, ways
        )
    }
}

/// Generate shader presets and ini files for every game in the gamelist
///
/// Games whose metadata cannot be fetched, or whose files cannot be
/// written, are logged and skipped.
pub async fn generate_artifacts<S: MetadataSource>(
    source: &S,
    manifest: &Manifest,
    shader_dir: &Path,
    ini_dir: &Path,
) -> Vec<GameArtifacts> {
    let mut results = Vec::new();

    for entry in manifest.entries() {
        let short_name = entry.short_name();

        let record = match fetch_game(source, &short_name).await {
            Ok(record) => record,
            Err(e) => {
                tracing::warn!("Skipping {}: {}", short_name, e);
                continue;
            }
        };

        let shader = write_shader(shader_dir, &record).unwrap_or_else(|e| {
            tracing::warn!("Failed to write shader file for {}: {}", short_name, e);
            None
        });

        let ini = match write_joystick_ini(ini_dir, &short_name, record.joystick_ways()) {
            Ok(outcome) => outcome,
            Err(e) => {
                tracing::warn!("Failed to write INI file for {}: {}", short_name, e);
                IniOutcome::Skipped
            }
        };

        results.push(GameArtifacts {
            record,
            shader,
            ini,
        });
    }

    results
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn record(display_type: &str, rotation: &str) -> GameRecord {
        let mut record = GameRecord::new("galaga");
        record.display_type = display_type.to_string();
        record.rotation = rotation.to_string();
        record
    }

    #[test]
    fn test_shader_reference() {
        assert_eq!(shader_reference(&record("raster", "0")), Some(HORIZONTAL_SHADER));
        assert_eq!(shader_reference(&record("raster", "90")), Some(VERTICAL_SHADER));
        assert_eq!(shader_reference(&record("raster", "270")), Some(VERTICAL_SHADER));
        assert_eq!(shader_reference(&record("vector", "0")), None);
        assert_eq!(shader_reference(&record("unknown", "unknown")), None);
    }

    #[test]
    fn test_write_shader() {
        let dir = TempDir::new().unwrap();

        let path = write_shader(dir.path(), &record("raster", "90")).unwrap().unwrap();
        assert_eq!(path, dir.path().join("galaga.glslp"));
        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "#reference \"../../shaders/crt-pi-vertical.glslp\"\n"
        );

        let path = write_shader(dir.path(), &record("raster", "0")).unwrap().unwrap();
        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "#reference \"../../shaders/crt-pi.glslp\"\n"
        );
    }

    #[test]
    fn test_write_shader_skips_vector() {
        let dir = TempDir::new().unwrap();
        assert_eq!(write_shader(dir.path(), &record("vector", "0")).unwrap(), None);
        assert!(!dir.path().join("galaga.glslp").exists());
    }

    #[test]
    fn test_joystick_map_line() {
        assert_eq!(joystick_map_line("pacman", Some(4)), Some(STICKY_DIAGONAL_MAP));
        assert_eq!(joystick_map_line("joust", Some(2)), Some(STICKY_DIAGONAL_MAP));
        assert_eq!(joystick_map_line("galaga", Some(8)), None);
        assert_eq!(joystick_map_line("pong", None), None);
        assert_eq!(joystick_map_line("qbert", Some(4)), Some(QBERT_MAP));
        assert_eq!(joystick_map_line("qbert", None), Some(QBERT_MAP));
    }

    #[test]
    fn test_qbert_map_has_nine_rows() {
        let map = QBERT_MAP.trim_start_matches("joystick_map ");
        let rows: Vec<_> = map.split('.').collect();
        assert_eq!(rows.len(), 9);
        assert!(rows.iter().all(|r| r.len() == 9));
    }

    #[test]
    fn test_write_joystick_ini_created_then_idempotent() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("pacman.ini");

        let outcome = write_joystick_ini(dir.path(), "pacman", Some(4)).unwrap();
        assert_eq!(outcome, IniOutcome::Created(path.clone()));
        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "joystick_map s8.4s8.44s8.4445\n"
        );

        let outcome = write_joystick_ini(dir.path(), "pacman", Some(4)).unwrap();
        assert_eq!(outcome, IniOutcome::AlreadyMapped(path.clone()));
        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "joystick_map s8.4s8.44s8.4445\n"
        );
    }

    #[test]
    fn test_write_joystick_ini_appends() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("dkong.ini");
        fs::write(&path, "skip_gameinfo 1").unwrap();

        let outcome = write_joystick_ini(dir.path(), "dkong", Some(4)).unwrap();
        assert_eq!(outcome, IniOutcome::Appended(path.clone()));
        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "skip_gameinfo 1\njoystick_map s8.4s8.44s8.4445\n"
        );
    }

    #[test]
    fn test_write_joystick_ini_appends_to_non_utf8_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("dkong.ini");
        fs::write(&path, b"# r\xe9glage\nskip_gameinfo 1").unwrap();

        let outcome = write_joystick_ini(dir.path(), "dkong", Some(4)).unwrap();
        assert_eq!(outcome, IniOutcome::Appended(path.clone()));
        assert_eq!(
            fs::read(&path).unwrap(),
            b"# r\xe9glage\nskip_gameinfo 1\njoystick_map s8.4s8.44s8.4445\n".to_vec()
        );

        let outcome = write_joystick_ini(dir.path(), "dkong", Some(4)).unwrap();
        assert_eq!(outcome, IniOutcome::AlreadyMapped(path));
    }

    #[test]
    fn test_write_joystick_ini_respects_joymap() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("digdug.ini");
        fs::write(&path, "joymap 4\n").unwrap();

        let outcome = write_joystick_ini(dir.path(), "digdug", Some(4)).unwrap();
        assert_eq!(outcome, IniOutcome::AlreadyMapped(path.clone()));
        assert_eq!(fs::read_to_string(&path).unwrap(), "joymap 4\n");
    }

    #[test]
    fn test_write_joystick_ini_skips_8way() {
        let dir = TempDir::new().unwrap();
        assert_eq!(
            write_joystick_ini(dir.path(), "galaga", Some(8)).unwrap(),
            IniOutcome::Skipped
        );
        assert!(!dir.path().join("galaga.ini").exists());
    }

    #[test]
    fn test_summary_line() {
        let mut record = GameRecord::new("pacman");
        record.controls.push(cabinet_mame::ControlEntry::new("joy").with_ways("4"));
        let artifacts = GameArtifacts {
            record,
            shader: None,
            ini: IniOutcome::Skipped,
        };
        assert_eq!(
            artifacts.summary(),
            "Game: pacman, Type: unknown, Rotation: unknown, Ways: 4"
        );
    }
}
