//! Comprehensive control listing with button labels scraped from driver
//! sources

use cabinet_library::Manifest;
use cabinet_mame::{
    ControlEntry, LabelLookup, MachineInfo, MetadataSource, PortMapping, SourceCache,
    extract_machine,
};
use std::collections::BTreeMap;
use std::io::{self, Write};

const SECTION_RULE: &str = "═══════════════════════════════════════════════════════════════════";

/// Human-readable hardware needed for a control
pub fn describe_control(control: &ControlEntry) -> String {
    let kind = control.control_type.as_str();
    let buttons = control.buttons;

    let with_buttons = |base: &str, suffix: &str| {
        if buttons > 0 {
            format!("{} + {} {}", base, buttons, suffix)
        } else {
            base.to_string()
        }
    };

    match kind {
        "joy" if control.ways.is_empty() => "Joystick (8-way)".to_string(),
        "joy" => format!("Joystick ({}-way, 8 directions)", control.ways),
        "button" if buttons > 0 => format!("{} buttons", buttons),
        "button" => "Button controls".to_string(),
        "paddle" | "paddle_h" | "paddle_v" => {
            "Paddle/Potentiometer (analog horizontal)".to_string()
        }
        "dial" | "dial_h" | "dial_v" => "Dial/Spinner (analog rotary)".to_string(),
        "trackball" | "trackball_h" | "trackball_v" => {
            with_buttons("Trackball (X/Y positioning, analog)", "buttons")
        }
        "lightgun" | "lightgun_h" | "lightgun_v" => {
            with_buttons("Light gun (X/Y targeting + trigger)", "additional buttons")
        }
        "pedal" | "pedal_h" | "pedal_v" => "Pedal/Throttle (analog axis)".to_string(),
        "stick" => "Stick/Joystick (4-way or 8-way movement)".to_string(),
        "doublejoy" => "Dual joysticks (movement + firing, 2 × 8-way)".to_string(),
        "wheel" | "wheel_h" | "wheel_v" => with_buttons("Steering wheel (analog rotary)", "buttons"),
        other => format!("Hardware: {}", other),
    }
}

/// `joy (2 buttons) 4-way`, `trackball (1 buttons)`, `pedal`
pub fn control_title(control: &ControlEntry) -> String {
    let mut title = control.control_type.clone();

    if control.buttons > 0 {
        title.push_str(&format!(" ({} buttons)", control.buttons));
    }
    if control.control_type == "joy" && !control.ways.is_empty() {
        title.push_str(&format!(" {}-way", control.ways));
    }

    title
}

/// Everything known about one listed game
#[derive(Debug, Clone)]
pub struct ListedGame {
    pub short_name: String,
    pub name: String,
    pub machine: MachineInfo,
    pub labels: LabelLookup,
}

impl ListedGame {
    fn label_mismatch(&self) -> bool {
        let declared = self.machine.declared_buttons();
        declared > 0 && self.labels.labels.len() != declared as usize
    }

    /// Write this game's section of the listing
    pub fn write_to<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(out, "{}", SECTION_RULE)?;
        writeln!(out, "{} - {}", self.short_name, self.name)?;
        writeln!(out, "{}", SECTION_RULE)?;

        if self.machine.controls.is_empty() && self.machine.ports.is_empty() {
            writeln!(out, "  [No input ports found]")?;
            return writeln!(out);
        }

        if !self.machine.controls.is_empty() {
            writeln!(out)?;
            writeln!(out, "  ▼ CONTROL SUMMARY:")?;

            let mut by_player: BTreeMap<u32, Vec<&ControlEntry>> = BTreeMap::new();
            for control in &self.machine.controls {
                by_player.entry(control.player).or_default().push(control);
            }

            for (player, controls) in by_player {
                writeln!(out, "    Player {}:", player)?;
                for control in controls {
                    writeln!(out, "      • {}", control_title(control))?;
                    writeln!(out, "        → {}", describe_control(control))?;
                }
            }
        }

        if !self.labels.labels.is_empty() {
            writeln!(out)?;
            writeln!(out, "  ▼ BUTTON LABELS (from MAME source code):")?;
            for (i, label) in self.labels.labels.iter().enumerate() {
                writeln!(out, "    Button {}: {}", i + 1, label)?;
            }
        }

        if self.labels.labels.is_empty() || self.label_mismatch() {
            writeln!(out)?;
            if self.labels.labels.is_empty() {
                writeln!(out, "  ⚠ BUTTON LABEL LOOKUP FAILED:")?;
            } else {
                writeln!(out, "  ⚠ INCOMPLETE LABEL DATA:")?;
            }
            writeln!(out, "    {}", self.labels.diagnostic)?;
        }

        if !self.machine.ports.is_empty() {
            writeln!(out)?;
            writeln!(out, "  ▼ DETAILED INPUT PORTS:")?;

            let mut by_player: BTreeMap<u32, Vec<&PortMapping>> = BTreeMap::new();
            for port in &self.machine.ports {
                by_player.entry(port.player).or_default().push(port);
            }

            for (player, ports) in by_player {
                writeln!(out, "    Player {}:", player)?;
                for port in ports {
                    writeln!(out, "      ◆ {}", port.tag)?;
                    writeln!(out, "          Type: {}", port.input_type)?;
                    if !port.sequence.is_empty() {
                        writeln!(out, "          Maps to: {}", port.sequence)?;
                    }
                }
            }
        }

        writeln!(out)
    }
}

pub fn write_header<W: Write>(out: &mut W) -> io::Result<()> {
    writeln!(out, "╔════════════════════════════════════════════════════════════════════╗")?;
    writeln!(out, "║           COMPREHENSIVE INPUT DEVICE LISTING                      ║")?;
    writeln!(out, "║   ALL Control Types: Joysticks, Buttons, Wheels, Pedals, etc.    ║")?;
    writeln!(out, "╚════════════════════════════════════════════════════════════════════╝")?;
    writeln!(out)?;
    writeln!(out, "Generated from MAME machine definitions")?;
    writeln!(out, "This file shows EVERY input device each game requires:")?;
    writeln!(out, "  - Joysticks (with direction ways)")?;
    writeln!(out, "  - All buttons and their counts")?;
    writeln!(out, "  - Analog controls (pedals, paddles, dials, wheels)")?;
    writeln!(out, "  - Specialized input (trackballs, light guns, flight yokes)")?;
    writeln!(out, "Use this to understand your hardware mapping requirements.")?;
    writeln!(out)?;
    writeln!(out)
}

pub fn write_footer<W: Write>(out: &mut W, games: usize) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "{}", SECTION_RULE)?;
    writeln!(out, "SUMMARY")?;
    writeln!(out, "{}", SECTION_RULE)?;
    writeln!(out, "Total games processed: {}", games)
}

/// Gather machine data and button labels for one game
///
/// A game MAME cannot describe is still listed, just without inputs.
pub async fn list_game<S: MetadataSource>(
    source: &S,
    cache: &SourceCache,
    short_name: &str,
    name: &str,
) -> ListedGame {
    let machine = match source.list_xml(short_name).await {
        Ok(xml) => extract_machine(&xml).unwrap_or_else(|e| {
            tracing::warn!("Could not parse MAME data for {}: {}", short_name, e);
            MachineInfo::default()
        }),
        Err(e) => {
            tracing::warn!("Could not get MAME data for {}: {}", short_name, e);
            MachineInfo::default()
        }
    };

    let labels = cache
        .lookup_labels(short_name, &machine, machine.declared_buttons())
        .await;

    ListedGame {
        short_name: short_name.to_string(),
        name: name.to_string(),
        machine,
        labels,
    }
}

/// Write the full listing for every named game; returns the number listed
///
/// Gamelist entries without a `<name>` are left out.
pub async fn write_listing<S: MetadataSource, W: Write>(
    source: &S,
    cache: &SourceCache,
    manifest: &Manifest,
    out: &mut W,
) -> io::Result<usize> {
    write_header(out)?;

    let mut count = 0;
    for entry in manifest.entries() {
        let Some(name) = entry.name.as_deref() else {
            continue;
        };
        let short_name = entry.short_name();
        count += 1;

        println!("  [{}] {} - {}", count, short_name, name);

        let game = list_game(source, cache, &short_name, name).await;
        game.write_to(out)?;
    }

    write_footer(out, count)?;
    Ok(count)
}
