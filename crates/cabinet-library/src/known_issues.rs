//! Games with known control quirks
//!
//! Button labels come from the `INPUT_PORTS_START` blocks of the MAME 0.276
//! driver sources (mostly `atari/atarisy1.cpp`). More than one label on a
//! button means it does two jobs, typically a game action and a start button.

/// One physical button of a known game
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ButtonLabel {
    pub number: u32,

    /// Everything the button does; two or more entries means dual-purpose
    pub labels: &'static [&'static str],

    /// DUAL_PURPOSE_BUTTON, MULTI_BUTTON, ... or empty
    pub issue: &'static str,

    /// What to do about it, or empty
    pub recommendation: &'static str,
}

impl ButtonLabel {
    pub fn is_dual_purpose(&self) -> bool {
        self.labels.len() > 1
    }
}

/// Hand-curated notes on a game that maps badly onto a standard panel
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KnownIssue {
    pub short_name: &'static str,
    pub name: &'static str,
    pub issue: &'static str,
    pub description: &'static str,
    pub recommendation: &'static str,
    pub buttons: &'static [ButtonLabel],
}

const fn button(
    number: u32,
    labels: &'static [&'static str],
    issue: &'static str,
    recommendation: &'static str,
) -> ButtonLabel {
    ButtonLabel {
        number,
        labels,
        issue,
        recommendation,
    }
}

const ACCIDENTAL_START: &str =
    "Button triggers both attack AND start menu. Players may accidentally exit game.";
const PETERPAK_DUAL: &str = "Part of 3-button requirement AND has dual purposes.";
const ROADRUNN_DUAL: &str = "Dual purpose and part of 4-button requirement.";
const ROADRUNN_EXTRA: &str = "Part of 4-button requirement.";

// Sorted by short name
static KNOWN_ISSUES: &[KnownIssue] = &[
    KnownIssue {
        short_name: "defender",
        name: "Defender",
        issue: "JOYSTICK_MULTIBUTTON",
        description: "Requires 5 buttons:\n  Button 1: Fire\n  Button 2: Thrust\n  Button 3: Smart Bomb\n  Button 4: Hyperspace\n  Button 5: Reverse",
        recommendation: "5-button classic arcade game.\nRequires button remapping to playable state on 1-2 button panel.",
        buttons: &[
            button(1, &["Fire"], "JOYSTICK_MULTIBUTTON", ""),
            button(2, &["Thrust"], "JOYSTICK_MULTIBUTTON", ""),
            button(3, &["Smart Bomb"], "JOYSTICK_MULTIBUTTON", ""),
            button(4, &["Hyperspace"], "JOYSTICK_MULTIBUTTON", ""),
            button(5, &["Reverse"], "JOYSTICK_MULTIBUTTON", ""),
        ],
    },
    KnownIssue {
        short_name: "gravitar",
        name: "Gravitar",
        issue: "JOYSTICK_MULTIBUTTON",
        description: "Requires 3 buttons:\n  Button 1: Fire\n  Button 2: Shield\n  Button 3: Hyperspace",
        recommendation: "3-button requirement - needs button remapping for 1-2 button panels.",
        buttons: &[
            button(1, &["Fire"], "JOYSTICK_MULTIBUTTON", ""),
            button(2, &["Shield"], "JOYSTICK_MULTIBUTTON", ""),
            button(3, &["Hyperspace"], "JOYSTICK_MULTIBUTTON", ""),
        ],
    },
    KnownIssue {
        short_name: "indytemp",
        name: "Indiana Jones and the Temple of Doom",
        issue: "DUAL_PURPOSE_BUTTONS",
        description: "Buttons 1 and 2 each serve DUAL PURPOSES:\n  Button 1: 'Left Whip' (action) AND 'Player 1 Start' (menu)\n  Button 2: 'Right Whip' (action) AND 'Player 2 Start' (menu)",
        recommendation: "Critical: Create custom INI/CFG file to map buttons separately\n  Button 1 in gameplay should NOT trigger start menu\n  Suggestion: Use separate button for game start in custom config",
        buttons: &[
            button(1, &["Left Whip", "Player 1 Start"], "DUAL_PURPOSE_BUTTON", ACCIDENTAL_START),
            button(2, &["Right Whip", "Player 2 Start"], "DUAL_PURPOSE_BUTTON", ACCIDENTAL_START),
        ],
    },
    KnownIssue {
        short_name: "marble",
        name: "Marble Madness",
        issue: "DUAL_PURPOSE_BUTTONS",
        description: "Buttons each serve DUAL PURPOSES:\n  Button 1: 'Left' movement (action) AND 'Player 1 Start' (menu)\n  Button 2: 'Right' movement (action) AND 'Player 2 Start' (menu)",
        recommendation: "Critical: Create custom mapping to separate movement from menu.\n  Button presses in gameplay must not trigger start menu.",
        buttons: &[
            button(1, &["Left", "Player 1 Start"], "DUAL_PURPOSE_BUTTON", "Dual purpose detected."),
            button(2, &["Right", "Player 2 Start"], "DUAL_PURPOSE_BUTTON", "Dual purpose detected."),
        ],
    },
    KnownIssue {
        short_name: "missile",
        name: "Missile Command",
        issue: "TRACKBALL_MULTIBUTTON",
        description: "Uses TRACKBALL with 3 buttons:\n  Trackball: Aim cursor (X-Y positioning)\n  Button 1: Fire weapon 1\n  Button 2: Fire weapon 2\n  Button 3: Fire weapon 3",
        recommendation: "Trackball is best with analog/mouse support.\nCan play with joystick approximation, but trackball hardware preferred.",
        buttons: &[
            button(1, &["Fire Weapon 1"], "", ""),
            button(2, &["Fire Weapon 2"], "", ""),
            button(3, &["Fire Weapon 3"], "", ""),
        ],
    },
    KnownIssue {
        short_name: "mk",
        name: "Mortal Kombat",
        issue: "JOYSTICK_MULTIBUTTON",
        description: "Requires 6 buttons per player:\n  Button 1: High Punch\n  Button 2: Low Punch\n  Button 3: High Kick\n  Button 4: Low Kick\n  Button 5: Block\n  Button 6: (Special)",
        recommendation: "Fighting game - 6 buttons mandatory.\nRequires button remapping (modifier keys or direction-based combinations).",
        buttons: &[
            button(1, &["High Punch"], "JOYSTICK_MULTIBUTTON", ""),
            button(2, &["Low Punch"], "JOYSTICK_MULTIBUTTON", ""),
            button(3, &["High Kick"], "JOYSTICK_MULTIBUTTON", ""),
            button(4, &["Low Kick"], "JOYSTICK_MULTIBUTTON", ""),
            button(5, &["Block"], "JOYSTICK_MULTIBUTTON", ""),
            button(6, &["Special"], "JOYSTICK_MULTIBUTTON", ""),
        ],
    },
    KnownIssue {
        short_name: "peterpak",
        name: "Peter Pack Rat",
        issue: "MULTI_BUTTON_GAME + DUAL_PURPOSE",
        description: "Requires 3+ buttons for gameplay:\n  Button 1: 'Left Throw' (action) AND 'Player 1 Start' (menu)\n  Button 2: 'Jump' (action)\n  Button 3: 'Right Throw' (action) AND 'Player 2 Start' (menu)",
        recommendation: "Critical: Standard arcade panel likely has only 1-2 buttons.\n  Need custom mapping to handle 3+ button requirement.\n  Must also separate dual-purpose button conflicts.",
        buttons: &[
            button(1, &["Left Throw", "Player 1 Start"], "DUAL_PURPOSE_BUTTON + MULTI_BUTTON", PETERPAK_DUAL),
            button(2, &["Jump"], "MULTI_BUTTON", "Game requires this button; no arcade panel mapping."),
            button(3, &["Right Throw", "Player 2 Start"], "DUAL_PURPOSE_BUTTON + MULTI_BUTTON", PETERPAK_DUAL),
        ],
    },
    KnownIssue {
        short_name: "punchout",
        name: "Mike Tyson's Punch-Out!!",
        issue: "JOYSTICK_MULTIBUTTON",
        description: "Requires 3 buttons:\n  Button 1: Jab\n  Button 2: Body Blow\n  Button 3: Dodge (with directions)",
        recommendation: "3-button boxing game - needs button remapping for 1-2 button panels.\nMultiple buttons required to execute all boxer moves.",
        buttons: &[
            button(1, &["Jab"], "JOYSTICK_MULTIBUTTON", ""),
            button(2, &["Body Blow"], "JOYSTICK_MULTIBUTTON", ""),
            button(3, &["Dodge"], "JOYSTICK_MULTIBUTTON", ""),
        ],
    },
    KnownIssue {
        short_name: "roadrunn",
        name: "Road Runner",
        issue: "MULTI_BUTTON_GAME + DUAL_PURPOSE",
        description: "Requires 4 buttons for gameplay:\n  Button 1: 'Left Hop' (action) AND 'Player 1 Start' (menu)\n  Button 2: 'Right Hop' (action) AND 'Player 2 Start' (menu)\n  Button 3: 'Special Weapon' (action)\n  Button 4: 'Lasers' (action)",
        recommendation: "Critical: Requires 4 buttons but standard arcade panels have 1-2.\n  Advanced remapping needed + must separate dual-purpose conflicts.",
        buttons: &[
            button(1, &["Left Hop", "Player 1 Start"], "DUAL_PURPOSE_BUTTON + MULTI_BUTTON", ROADRUNN_DUAL),
            button(2, &["Right Hop", "Player 2 Start"], "DUAL_PURPOSE_BUTTON + MULTI_BUTTON", ROADRUNN_DUAL),
            button(3, &["Special Weapon"], "MULTI_BUTTON", ROADRUNN_EXTRA),
            button(4, &["Lasers"], "MULTI_BUTTON", ROADRUNN_EXTRA),
        ],
    },
    KnownIssue {
        short_name: "robotron",
        name: "Robotron: 2084",
        issue: "DUAL_JOYSTICK",
        description: "Requires DUAL-JOYSTICK setup:\n  Left Joystick: Movement (Up/Down/Left/Right)\n  Right Joystick: Firing direction (Up/Down/Left/Right)\nSimultaneously control movement AND firing in different directions.",
        recommendation: "COMPLEX: Dual-joystick is non-standard arcade setup.\nRequires either:\n  - Physical dual-joystick hardware, OR\n  - Complex button mapping: Direction keys for movement, WASD for firing",
        buttons: &[
            button(1, &["Move Up"], "DUAL_JOYSTICK", ""),
            button(2, &["Move Down"], "DUAL_JOYSTICK", ""),
            button(3, &["Move Left"], "DUAL_JOYSTICK", ""),
            button(4, &["Move Right"], "DUAL_JOYSTICK", ""),
            button(5, &["Fire Up"], "DUAL_JOYSTICK", ""),
            button(6, &["Fire Down"], "DUAL_JOYSTICK", ""),
            button(7, &["Fire Left"], "DUAL_JOYSTICK", ""),
            button(8, &["Fire Right"], "DUAL_JOYSTICK", ""),
        ],
    },
    KnownIssue {
        short_name: "sf",
        name: "Street Fighter",
        issue: "JOYSTICK_MULTIBUTTON",
        description: "Requires 6 buttons per player:\n  Button 1: Light Punch\n  Button 2: Medium Punch\n  Button 3: Heavy Punch\n  Button 4: Light Kick\n  Button 5: Medium Kick\n  Button 6: Heavy Kick",
        recommendation: "Original fighting game - 6 buttons mandatory for playable controls.\nRequires button remapping strategy (shift keys, direction combos, etc.)",
        buttons: STREET_FIGHTER_BUTTONS,
    },
    KnownIssue {
        short_name: "sf2",
        name: "Street Fighter II: The World Warrior",
        issue: "JOYSTICK_MULTIBUTTON",
        description: "Requires 6 buttons per player:\n  Button 1: Light Punch\n  Button 2: Medium Punch\n  Button 3: Heavy Punch\n  Button 4: Light Kick\n  Button 5: Medium Kick\n  Button 6: Heavy Kick",
        recommendation: "Fighting game - 6 buttons mandatory for playable controls.\nRequires button remapping strategy (shift keys, direction combos, etc.)",
        buttons: STREET_FIGHTER_BUTTONS,
    },
    KnownIssue {
        short_name: "spacduel",
        name: "Space Duel",
        issue: "JOYSTICK_MULTIBUTTON",
        description: "Requires 3 buttons:\n  Button 1: Fire\n  Button 2: Shield\n  Button 3: Hyperspace",
        recommendation: "3-button requirement - needs button remapping for 1-2 button panels.",
        buttons: &[
            button(1, &["Fire"], "JOYSTICK_MULTIBUTTON", ""),
            button(2, &["Shield"], "JOYSTICK_MULTIBUTTON", ""),
            button(3, &["Hyperspace"], "JOYSTICK_MULTIBUTTON", ""),
        ],
    },
];

const STREET_FIGHTER_BUTTONS: &[ButtonLabel] = &[
    button(1, &["Light Punch"], "JOYSTICK_MULTIBUTTON", ""),
    button(2, &["Medium Punch"], "JOYSTICK_MULTIBUTTON", ""),
    button(3, &["Heavy Punch"], "JOYSTICK_MULTIBUTTON", ""),
    button(4, &["Light Kick"], "JOYSTICK_MULTIBUTTON", ""),
    button(5, &["Medium Kick"], "JOYSTICK_MULTIBUTTON", ""),
    button(6, &["Heavy Kick"], "JOYSTICK_MULTIBUTTON", ""),
];

/// Every known problematic game
pub fn known_issues() -> &'static [KnownIssue] {
    KNOWN_ISSUES
}

/// Known quirks for a short name, if it is in the table
pub fn lookup(short_name: &str) -> Option<&'static KnownIssue> {
    KNOWN_ISSUES.iter().find(|k| k.short_name == short_name)
}
