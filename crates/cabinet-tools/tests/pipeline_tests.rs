//! End-to-end tests of the analysis tools against a canned MAME

use cabinet_library::Manifest;
use cabinet_mame::{MameError, MetadataSource, SourceCache};
use cabinet_tools::artifacts::{IniOutcome, STICKY_DIAGONAL_MAP, generate_artifacts};
use cabinet_tools::listing::write_listing;
use cabinet_tools::report::AnalysisReport;
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// Serves `-listxml` documents from memory; unknown games fail like MAME does
struct FakeMame {
    machines: HashMap<&'static str, String>,
}

impl FakeMame {
    fn new() -> Self {
        let mut machines = HashMap::new();
        machines.insert(
            "pacman",
            machine(
                "pacman",
                r#"sourcefile="pacman/pacman.cpp""#,
                r#"<display tag="screen" type="vector" rotate="90"/>
                   <input players="2"><control type="joy" player="1" buttons="1" ways="4"/></input>"#,
            ),
        );
        machines.insert(
            "robotron",
            machine(
                "robotron",
                r#"sourcefile="midway/williams.cpp""#,
                r#"<display tag="screen" type="raster" rotate="0"/>
                   <input players="2"><control type="doublejoy" player="1" ways="8" ways2="8"/></input>"#,
            ),
        );
        machines.insert(
            "roadrunn",
            machine(
                "roadrunn",
                r#"sourcefile="atari/atarisy1.cpp" cloneof="indytemp" romof="indytemp""#,
                r#"<display tag="screen" type="raster" rotate="0"/>
                   <input players="1"><control type="joy" player="1" buttons="3" ways="8"/></input>
                   <port tag=":IN0"><newseq type="P1_BUTTON1">KEYCODE_LCONTROL</newseq></port>"#,
            ),
        );

        Self { machines }
    }
}

fn machine(name: &str, attributes: &str, body: &str) -> String {
    format!(
        r#"<?xml version="1.0"?>
<!DOCTYPE mame [
<!ELEMENT mame (machine+)>
]>
<mame build="0.276">
    <machine name="{name}" {attributes}>
        {body}
    </machine>
</mame>"#
    )
}

impl MetadataSource for FakeMame {
    async fn list_xml(&self, short_name: &str) -> Result<String, MameError> {
        self.machines
            .get(short_name)
            .cloned()
            .ok_or_else(|| MameError::CommandFailed {
                command: format!("mame -listxml {}", short_name),
                status: Some(1),
            })
    }
}

/// Test helper with output directories and a gamelist
struct PipelineEnv {
    temp_dir: TempDir,
}

impl PipelineEnv {
    fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        Self { temp_dir }
    }

    fn path(&self, name: &str) -> PathBuf {
        self.temp_dir.path().join(name)
    }
}

fn manifest(games: &[(&str, Option<&str>)]) -> Manifest {
    let mut xml = String::from("<gameList>");
    for (path, name) in games {
        xml.push_str(&format!("<game><path>{}</path>", path));
        if let Some(name) = name {
            xml.push_str(&format!("<name>{}</name>", name));
        }
        xml.push_str("</game>");
    }
    xml.push_str("</gameList>");

    Manifest::parse(&xml).unwrap()
}

#[tokio::test]
async fn test_pacman_artifacts() {
    let env = PipelineEnv::new();
    let (shaders, inis) = (env.path("shaders"), env.path("ini"));
    let games = manifest(&[("./pacman.zip", Some("Pac-Man"))]);

    let results = generate_artifacts(&FakeMame::new(), &games, &shaders, &inis).await;

    assert_eq!(results.len(), 1);
    let pacman = &results[0];
    assert_eq!(cabinet_library::classify(&pacman.record), None);
    assert_eq!(pacman.shader, None);
    assert!(!shaders.join("pacman.glslp").exists());

    let ini = inis.join("pacman.ini");
    assert_eq!(pacman.ini, IniOutcome::Created(ini.clone()));
    assert_eq!(
        fs::read_to_string(&ini).unwrap(),
        format!("{}\n", STICKY_DIAGONAL_MAP)
    );
    assert_eq!(
        pacman.summary(),
        "Game: pacman, Type: vector, Rotation: 90, Ways: 4"
    );

    // Second run leaves the map alone
    let results = generate_artifacts(&FakeMame::new(), &games, &shaders, &inis).await;
    assert_eq!(results[0].ini, IniOutcome::AlreadyMapped(ini.clone()));
    assert_eq!(
        fs::read_to_string(&ini).unwrap(),
        format!("{}\n", STICKY_DIAGONAL_MAP)
    );
}

#[tokio::test]
async fn test_artifacts_skip_unknown_games() {
    let env = PipelineEnv::new();
    let (shaders, inis) = (env.path("shaders"), env.path("ini"));
    let games = manifest(&[("./missing.zip", None), ("./robotron.zip", None)]);

    let results = generate_artifacts(&FakeMame::new(), &games, &shaders, &inis).await;

    assert_eq!(results.len(), 1);
    assert_eq!(results[0].record.short_name, "robotron");
    assert_eq!(
        fs::read_to_string(shaders.join("robotron.glslp")).unwrap(),
        "#reference \"../../shaders/crt-pi.glslp\"\n"
    );
    // doublejoy is not a "joy" control, so no joystick map
    assert_eq!(results[0].ini, IniOutcome::Skipped);
}

#[tokio::test]
async fn test_analysis_report() {
    let games = manifest(&[
        ("./pacman.zip", None),
        ("./robotron.zip", None),
        ("./missing.zip", None),
        ("./roadrunn.zip", None),
    ]);

    let report = AnalysisReport::analyze(&FakeMame::new(), &games).await;

    assert_eq!(report.games.len(), 3);
    let flagged: Vec<_> = report
        .needs_customization
        .iter()
        .map(|(record, issue)| (record.short_name.as_str(), issue.code()))
        .collect();
    assert_eq!(
        flagged,
        vec![("robotron", "DUAL_JOYSTICK"), ("roadrunn", "JOYSTICK_MULTIBUTTON")]
    );
    assert_eq!(report.known_issues.len(), 2);

    let mut out = Vec::new();
    report.write_to(&mut out).unwrap();
    let text = String::from_utf8(out).unwrap();
    assert!(text.contains("Total games analyzed: 3\n"));
    assert!(text.contains("pacman\n  Display: vector (rotate: 90)\n  Players: 2\n  Controls: joy (1btn, 4-way)\n"));
}

#[tokio::test]
async fn test_control_listing() {
    let env = PipelineEnv::new();
    let cache_dir = env.path("sources");
    fs::create_dir_all(cache_dir.join("atari")).unwrap();
    fs::write(
        cache_dir.join("atari/atarisy1.cpp"),
        r#"
static INPUT_PORTS_START( indytemp )
    PORT_BIT( 0x01, IP_ACTIVE_LOW, IPT_BUTTON1 ) PORT_NAME("Left Whip/P1 Start")
    PORT_BIT( 0x02, IP_ACTIVE_LOW, IPT_BUTTON2 ) PORT_NAME("Right Whip/P2 Start")
INPUT_PORTS_END
"#,
    )
    .unwrap();
    let cache = SourceCache::new(&cache_dir, "http://127.0.0.1:9/src/mame/").unwrap();

    let games = manifest(&[
        ("./roadrunn.zip", Some("Road Runner")),
        ("./pacman.zip", None),
        ("./missing.zip", Some("Missing")),
    ]);

    let mut out = Vec::new();
    let count = write_listing(&FakeMame::new(), &cache, &games, &mut out)
        .await
        .unwrap();
    let text = String::from_utf8(out).unwrap();

    assert_eq!(count, 2);
    assert!(text.contains("roadrunn - Road Runner\n"));
    assert!(text.contains("      • joy (3 buttons) 8-way\n        → Joystick (8-way, 8 directions)\n"));
    assert!(text.contains("    Button 1: Left Whip/P1 Start\n    Button 2: Right Whip/P2 Start\n"));
    assert!(text.contains("  ⚠ INCOMPLETE LABEL DATA:\n"));
    assert!(text.contains("(⚠ expected 3 for 3 declared buttons)"));
    assert!(text.contains("      ◆ :IN0\n"));
    assert!(text.contains("missing - Missing\n"));
    assert!(!text.contains("pacman"));
    assert!(text.ends_with("Total games processed: 2\n"));
}
