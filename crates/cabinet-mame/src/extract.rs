//! `-listxml` document extraction

use crate::MameError;
use roxmltree::{Document, Node, ParsingOptions};

/// One `<control>` element of a machine's `<input>`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControlEntry {
    /// joy, paddle, pedal, trackball, dial, lightgun, stick, doublejoy, ...
    pub control_type: String,

    /// Declared button count; MAME's figure, not verified against the driver
    pub buttons: u32,

    /// Joystick direction count as text ("2", "4", "8"), empty when absent
    pub ways: String,

    /// Owning player
    pub player: u32,
}

impl ControlEntry {
    pub fn new(control_type: impl Into<String>) -> Self {
        Self {
            control_type: control_type.into(),
            buttons: 0,
            ways: String::new(),
            player: 1,
        }
    }

    pub fn with_buttons(mut self, buttons: u32) -> Self {
        self.buttons = buttons;
        self
    }

    pub fn with_ways(mut self, ways: impl Into<String>) -> Self {
        self.ways = ways.into();
        self
    }

    pub fn with_player(mut self, player: u32) -> Self {
        self.player = player;
        self
    }
}

/// Display and control summary of one game
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameRecord {
    pub short_name: String,

    /// "raster", "vector", ... or "unknown"
    pub display_type: String,

    /// "0", "90", "180", "270" or "unknown"
    pub rotation: String,

    pub player_count: u32,

    /// Empty means MAME had no input metadata, not a standard layout
    pub controls: Vec<ControlEntry>,
}

impl GameRecord {
    pub fn new(short_name: impl Into<String>) -> Self {
        Self {
            short_name: short_name.into(),
            display_type: "unknown".to_string(),
            rotation: "unknown".to_string(),
            player_count: 1,
            controls: Vec::new(),
        }
    }

    /// Total declared buttons across every control
    pub fn declared_buttons(&self) -> u32 {
        self.controls.iter().map(|c| c.buttons).sum()
    }

    /// Direction count of the first `joy` control that declares one
    pub fn joystick_ways(&self) -> Option<u32> {
        self.controls
            .iter()
            .find(|c| c.control_type == "joy" && !c.ways.is_empty())
            .and_then(|c| c.ways.parse().ok())
    }
}

/// A `newseq`/`seq` default assignment inside a `<port>`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PortMapping {
    /// Port tag, e.g. ":IN0"
    pub tag: String,

    /// Input type, e.g. "P1_BUTTON1"
    pub input_type: String,

    /// Assigned sequence, whitespace-trimmed
    pub sequence: String,

    /// Player guessed from the port tag
    pub player: u32,
}

/// Machine-level attributes used for driver source lookups
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MachineInfo {
    pub source_file: Option<String>,
    pub clone_of: Option<String>,
    pub rom_of: Option<String>,
    pub controls: Vec<ControlEntry>,
    pub ports: Vec<PortMapping>,
}

impl MachineInfo {
    /// Total declared buttons across every control
    pub fn declared_buttons(&self) -> u32 {
        self.controls.iter().map(|c| c.buttons).sum()
    }
}

/// Parse a `-listxml` document, which carries an inline DTD
fn parse_document(xml: &str) -> Result<Document<'_>, MameError> {
    let mut options = ParsingOptions::default();
    options.allow_dtd = true;
    Ok(Document::parse_with_options(xml, options)?)
}

fn first_child<'a, 'input>(node: Node<'a, 'input>, name: &str) -> Option<Node<'a, 'input>> {
    node.children().find(|n| n.has_tag_name(name))
}

/// `<control>` children in document order; entries without a type are dropped
fn read_controls(input: Node<'_, '_>) -> Vec<ControlEntry> {
    let mut controls = Vec::new();

    for control in input.children().filter(|n| n.has_tag_name("control")) {
        let Some(control_type) = control.attribute("type") else {
            continue;
        };

        let mut entry = ControlEntry::new(control_type);
        if let Some(buttons) = control.attribute("buttons").and_then(|b| b.parse().ok()) {
            entry.buttons = buttons;
        }
        if let Some(ways) = control.attribute("ways") {
            entry.ways = ways.to_string();
        }
        if let Some(player) = control.attribute("player").and_then(|p| p.parse().ok()) {
            entry.player = player;
        }
        controls.push(entry);
    }

    controls
}

/// Build a [`GameRecord`] from the `<mame><machine>` structure
pub fn extract_game(xml: &str, short_name: &str) -> Result<GameRecord, MameError> {
    let doc = parse_document(xml)?;
    let root = doc.root_element();

    let machine = Some(root)
        .filter(|r| r.has_tag_name("mame"))
        .and_then(|r| first_child(r, "machine"))
        .ok_or_else(|| MameError::MissingMachine(short_name.to_string()))?;

    let mut record = GameRecord::new(short_name);

    if let Some(screen) = machine
        .children()
        .filter(|n| n.has_tag_name("display"))
        .find(|n| n.attribute("tag") == Some("screen"))
    {
        if let Some(display_type) = screen.attribute("type") {
            record.display_type = display_type.to_string();
        }
        if let Some(rotate) = screen.attribute("rotate") {
            record.rotation = rotate.to_string();
        }
    }

    if let Some(input) = first_child(machine, "input") {
        if let Some(players) = input.attribute("players").and_then(|p| p.parse().ok()) {
            record.player_count = players;
        }

        record.controls = read_controls(input);
    }

    tracing::debug!(
        "{}: display={} rotate={} players={} controls={}",
        record.short_name,
        record.display_type,
        record.rotation,
        record.player_count,
        record.controls.len()
    );

    Ok(record)
}

/// Player number implied by a port tag such as ":P2" or "p2_buttons"
fn player_from_port_tag(tag: &str) -> u32 {
    for player in 2..=4 {
        if tag.contains(&format!(":P{}", player)) || tag.contains(&format!("p{}", player)) {
            return player;
        }
    }
    1
}

/// Read source file, parent sets, controls and port assignments of the first
/// machine under any root element
pub fn extract_machine(xml: &str) -> Result<MachineInfo, MameError> {
    let doc = parse_document(xml)?;
    let root = doc.root_element();
    let machine = first_child(root, "machine")
        .ok_or_else(|| MameError::MissingMachine(root.tag_name().name().to_string()))?;

    let mut info = MachineInfo {
        source_file: machine.attribute("sourcefile").map(str::to_string),
        clone_of: machine.attribute("cloneof").map(str::to_string),
        rom_of: machine.attribute("romof").map(str::to_string),
        controls: first_child(machine, "input")
            .map(read_controls)
            .unwrap_or_default(),
        ports: Vec::new(),
    };

    for port in machine.children().filter(|n| n.has_tag_name("port")) {
        let Some(tag) = port.attribute("tag") else {
            continue;
        };
        let player = player_from_port_tag(tag);

        for seq in port
            .children()
            .filter(|n| n.has_tag_name("newseq") || n.has_tag_name("seq"))
        {
            let Some(input_type) = seq.attribute("type") else {
                continue;
            };

            info.ports.push(PortMapping {
                tag: tag.to_string(),
                input_type: input_type.to_string(),
                sequence: seq.text().unwrap_or("").trim().to_string(),
                player,
            });
        }
    }

    Ok(info)
}
