//! Integration tests for gamelist loading and classification

use cabinet_library::{LibraryError, Manifest, MappingIssue, classify, lookup};
use cabinet_mame::extract_game;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// Test helper holding a temporary gamelist
struct TestEnvironment {
    #[allow(dead_code)]
    temp_dir: TempDir,
    gamelist: PathBuf,
}

impl TestEnvironment {
    fn new(xml: &str) -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let gamelist = temp_dir.path().join("gamelist.xml");
        fs::write(&gamelist, xml).expect("Failed to write gamelist");

        Self { temp_dir, gamelist }
    }
}

fn listxml(name: &str, controls: &str) -> String {
    format!(
        r#"<?xml version="1.0"?>
<mame build="0.276">
    <machine name="{name}" sourcefile="test.cpp">
        <display tag="screen" type="raster" rotate="90"/>
        <input players="2">{controls}</input>
    </machine>
</mame>"#
    )
}

#[test]
fn test_load_gamelist_from_disk() {
    let env = TestEnvironment::new(
        r#"<gameList>
    <game><path>./robotron.zip</path><name>Robotron: 2084</name></game>
    <game><path>./pacman.zip</path></game>
</gameList>"#,
    );

    let manifest = Manifest::load(&env.gamelist)
        .and_then(|m| m.require_root("gameList"))
        .unwrap();
    let names: Vec<_> = manifest.entries().iter().map(|e| e.short_name()).collect();
    assert_eq!(names, vec!["robotron", "pacman"]);
}

#[test]
fn test_load_missing_gamelist() {
    let err = Manifest::load(&PathBuf::from("/nonexistent/gamelist.xml")).unwrap_err();
    assert!(matches!(err, LibraryError::ManifestNotFound(_)));
}

#[test]
fn test_robotron_classification_and_known_issue() {
    let xml = listxml(
        "robotron",
        r#"<control type="doublejoy" player="1" ways="8" ways2="8"/>"#,
    );
    let record = extract_game(&xml, "robotron").unwrap();

    assert_eq!(classify(&record), Some(MappingIssue::DualJoystick));
    assert_eq!(lookup("robotron").unwrap().issue, "DUAL_JOYSTICK");
}

#[test]
fn test_pacman_is_standard() {
    let xml = listxml("pacman", r#"<control type="joy" player="1" buttons="1" ways="4"/>"#);
    let record = extract_game(&xml, "pacman").unwrap();

    assert_eq!(classify(&record), None);
    assert!(lookup("pacman").is_none());
    assert_eq!(record.joystick_ways(), Some(4));
}

#[test]
fn test_multibutton_reported_after_clean_controls() {
    let xml = listxml(
        "sf2",
        r#"<control type="paddle" player="1"/>
           <control type="joy" player="1" buttons="6" ways="8"/>"#,
    );
    let record = extract_game(&xml, "sf2").unwrap();

    let issue = classify(&record).unwrap();
    assert_eq!(issue.to_string(), "JOYSTICK_MULTIBUTTON: Joystick with 6 buttons");
    // Classification is independent of the knowledge base
    assert_eq!(lookup("sf2").unwrap().buttons.len(), 6);
}

#[test]
fn test_game_without_input_is_unflagged() {
    let xml = r#"<mame><machine name="blank"><display tag="screen" type="vector" rotate="0"/></machine></mame>"#;
    let record = extract_game(xml, "blank").unwrap();

    assert!(record.controls.is_empty());
    assert_eq!(classify(&record), None);
}
