//! Control mapping analysis report

use crate::fetch_game;
use cabinet_library::{KnownIssue, Manifest, MappingIssue, classify, lookup};
use cabinet_mame::{ControlEntry, GameRecord, MetadataSource};
use std::collections::BTreeMap;
use std::io::{self, Write};

const RULE_WIDTH: usize = 60;
const CONSOLE_RULE: &str = "════════════════════════════════════════════════════════════";

/// `joy (6btn, 8-way)`, `trackball (3btn)`, `joy (4-way)` or `pedal`
pub fn format_control(control: &ControlEntry) -> String {
    let mut result = control.control_type.clone();

    if control.buttons > 0 {
        result.push_str(&format!(" ({}btn", control.buttons));
        if !control.ways.is_empty() {
            result.push_str(&format!(", {}-way", control.ways));
        }
        result.push(')');
    } else if !control.ways.is_empty() {
        result.push_str(&format!(" ({}-way)", control.ways));
    }

    result
}

/// Results accumulated over one run of the analysis
#[derive(Debug, Default)]
pub struct AnalysisReport {
    pub games: Vec<GameRecord>,
    pub needs_customization: Vec<(GameRecord, MappingIssue)>,
    pub known_issues: Vec<&'static KnownIssue>,
}

impl AnalysisReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one game into the report
    pub fn add(&mut self, record: GameRecord) {
        if let Some(issue) = classify(&record) {
            self.needs_customization.push((record.clone(), issue));
        }
        if let Some(known) = lookup(&record.short_name) {
            self.known_issues.push(known);
        }
        self.games.push(record);
    }

    /// Analyze every game in the gamelist; failures are logged and skipped
    pub async fn analyze<S: MetadataSource>(source: &S, manifest: &Manifest) -> Self {
        let mut report = Self::new();

        for entry in manifest.entries() {
            let short_name = entry.short_name();
            match fetch_game(source, &short_name).await {
                Ok(record) => report.add(record),
                Err(e) => tracing::warn!("Could not get MAME data for {}: {}", short_name, e),
            }
        }

        report
    }

    /// Write the full text report
    pub fn write_to<W: Write>(&self, out: &mut W) -> io::Result<()> {
        let rule = "-".repeat(RULE_WIDTH);

        writeln!(out, "CONTROL MAPPING ANALYSIS REPORT")?;
        writeln!(out, "Generated by analyze-controls")?;
        writeln!(out, "{}", "=".repeat(RULE_WIDTH))?;
        writeln!(out)?;

        writeln!(out, "SUMMARY")?;
        writeln!(out, "{}", rule)?;
        writeln!(out, "Total games analyzed: {}", self.games.len())?;
        writeln!(
            out,
            "Games with 3+ buttons (arcade panel mapping issue): {}",
            self.needs_customization.len()
        )?;
        writeln!(
            out,
            "Games with KNOWN ISSUES (dual-purpose buttons, etc.): {}",
            self.known_issues.len()
        )?;
        writeln!(out)?;

        self.write_notes(out)?;
        self.write_known_issues(out, &rule)?;
        self.write_customization(out, &rule)?;
        self.write_listing(out, &rule)
    }

    fn write_notes<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(out, "NOTE ON CUSTOM MAPPING NEEDS:")?;
        writeln!(out, "=============================")?;
        writeln!(out, "Two categories of games may need custom remapping:")?;
        writeln!(out)?;
        writeln!(out, "1. MULTI-BUTTON GAMES (3+ buttons):")?;
        writeln!(
            out,
            "   Most arcade cabinets have 1-2 buttons per player. Games requiring 3+ buttons"
        )?;
        writeln!(out, "   will have awkward default mappings and be difficult to play.")?;
        writeln!(
            out,
            "   Examples: Street Fighter (6 buttons), Robotron (multiple fire directions)"
        )?;
        writeln!(out)?;
        writeln!(out, "2. KNOWN ISSUE GAMES (dual-purpose buttons, etc.):")?;
        writeln!(
            out,
            "   These games have specific button labeling issues that were extracted from"
        )?;
        writeln!(out, "   MAME source code and verified. Examples:")?;
        writeln!(out, "   - Buttons that trigger both game actions AND menu functions")?;
        writeln!(out, "   - Asymmetric controls between players")?;
        writeln!(out, "   - Non-obvious button mapping quirks")?;
        writeln!(out)
    }

    fn write_known_issues<W: Write>(&self, out: &mut W, rule: &str) -> io::Result<()> {
        writeln!(out, "⚠ GAMES WITH KNOWN DUAL-PURPOSE BUTTONS OR COMPLEX MAPPINGS")?;
        writeln!(out, "{}", rule)?;
        writeln!(
            out,
            "These games have buttons that serve multiple functions, confusing control layouts,"
        )?;
        writeln!(
            out,
            "or other non-obvious input mappings. Manual testing and custom INI files may be needed."
        )?;
        writeln!(out)?;

        if self.known_issues.is_empty() {
            writeln!(out, "None of your favorite games are in the known problematic list.")?;
        }

        for known in &self.known_issues {
            writeln!(out)?;
            writeln!(out, "{} - {}", known.short_name, known.name)?;
            writeln!(out, "  Issue Type: {}", known.issue)?;
            writeln!(out, "  Description: {}", known.description)?;
            writeln!(out, "  Recommendation: {}", known.recommendation)?;

            if !known.buttons.is_empty() {
                writeln!(out, "  Problematic Buttons:")?;
                for button in known.buttons {
                    writeln!(out, "    Button {}: {}", button.number, button.labels.join(" AND "))?;
                }
            }
        }

        writeln!(out)
    }

    fn write_customization<W: Write>(&self, out: &mut W, rule: &str) -> io::Result<()> {
        writeln!(out, "GAMES NEEDING CUSTOMIZATION")?;
        writeln!(out, "{}", rule)?;
        writeln!(
            out,
            "These games have issues that may require custom button mapping or hardware."
        )?;
        writeln!(out)?;

        if self.needs_customization.is_empty() {
            writeln!(out, "None - all favorite games use standard joystick controls!")?;
        }

        for (record, issue) in &self.needs_customization {
            writeln!(out)?;
            writeln!(out, "{}", record.short_name)?;
            writeln!(out, "  Issue: {}", issue)?;
            writeln!(
                out,
                "  Display: {} (rotate: {})",
                record.display_type, record.rotation
            )?;
            writeln!(out, "  Players: {}", record.player_count)?;
            writeln!(out, "  Controls:")?;
            for control in &record.controls {
                writeln!(out, "    - Player {}: {}", control.player, format_control(control))?;
            }
        }

        writeln!(out)
    }

    fn write_listing<W: Write>(&self, out: &mut W, rule: &str) -> io::Result<()> {
        writeln!(out, "COMPLETE GAME LISTING")?;
        writeln!(out, "{}", rule)?;

        for record in &self.games {
            writeln!(out)?;
            writeln!(out, "{}", record.short_name)?;
            writeln!(
                out,
                "  Display: {} (rotate: {})",
                record.display_type, record.rotation
            )?;
            writeln!(out, "  Players: {}", record.player_count)?;

            let controls = if record.controls.is_empty() {
                "none defined".to_string()
            } else {
                record
                    .controls
                    .iter()
                    .map(format_control)
                    .collect::<Vec<_>>()
                    .join("; ")
            };
            writeln!(out, "  Controls: {}", controls)?;
        }

        Ok(())
    }

    /// Shorter console version, with customization games grouped by issue
    pub fn write_console_summary<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(out, "Games analyzed: {}", self.games.len())?;
        writeln!(out)?;
        writeln!(out, "{}", CONSOLE_RULE)?;
        writeln!(out, "CUSTOM MAPPING ANALYSIS")?;
        writeln!(out, "{}", CONSOLE_RULE)?;
        writeln!(out)?;
        writeln!(
            out,
            "Games with 3+ buttons (arcade panel mismatch): {}",
            self.needs_customization.len()
        )?;
        writeln!(
            out,
            "Games with KNOWN ISSUES (dual-purpose buttons): {}",
            self.known_issues.len()
        )?;
        writeln!(out)?;

        if !self.known_issues.is_empty() {
            writeln!(out, "⚠ KNOWN ISSUE GAMES (extracted from MAME source):")?;
            writeln!(out, "{}", "─".repeat(49))?;
            for known in &self.known_issues {
                writeln!(out)?;
                writeln!(out, "  • {} - {}", known.short_name, known.name)?;
                writeln!(out, "    Issue Type: {}", known.issue)?;
                writeln!(out, "    Recommendation: {}", known.recommendation)?;
            }
            writeln!(out)?;
        }

        if !self.needs_customization.is_empty() {
            writeln!(out, "⚠ GAMES NEEDING CUSTOMIZATION:")?;
            writeln!(out, "{}", "─".repeat(58))?;

            let mut by_issue: BTreeMap<&str, Vec<&(GameRecord, MappingIssue)>> = BTreeMap::new();
            for game in &self.needs_customization {
                by_issue.entry(game.1.code()).or_default().push(game);
            }

            for (code, games) in by_issue {
                writeln!(out)?;
                writeln!(out, "  {}:", code)?;
                for (record, issue) in games {
                    writeln!(out, "    • {} - {}", record.short_name, issue)?;
                }
            }
            writeln!(out)?;
        }

        Ok(())
    }
}
