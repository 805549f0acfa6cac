//! Control scheme classification
//!
//! A standard cabinet panel has one joystick and two buttons per player.
//! Anything that needs more than that is flagged for a custom mapping.

use cabinet_mame::GameRecord;
use std::fmt;

/// Why a game needs a custom control mapping
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MappingIssue {
    /// A joystick control with three or more buttons
    JoystickMultiButton(u32),

    /// Two joysticks (movement plus firing direction)
    DualJoystick,

    /// A trackball or spinner with more than two buttons
    TrackballMultiButton(u32),
}

impl MappingIssue {
    /// Machine-readable reason code
    pub fn code(&self) -> &'static str {
        match self {
            MappingIssue::JoystickMultiButton(_) => "JOYSTICK_MULTIBUTTON",
            MappingIssue::DualJoystick => "DUAL_JOYSTICK",
            MappingIssue::TrackballMultiButton(_) => "TRACKBALL_MULTIBUTTON",
        }
    }
}

impl fmt::Display for MappingIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MappingIssue::JoystickMultiButton(buttons) => {
                write!(f, "{}: Joystick with {} buttons", self.code(), buttons)
            }
            MappingIssue::DualJoystick => write!(
                f,
                "{}: Requires two joysticks or complex button mapping",
                self.code()
            ),
            MappingIssue::TrackballMultiButton(buttons) => {
                write!(f, "{}: Trackball/spinner with {} buttons", self.code(), buttons)
            }
        }
    }
}

/// Classify a game's controls; `None` means a standard mapping suffices
///
/// Controls are checked in order and the first offending one is reported.
/// The joystick test is a substring match, so a `doublejoy` with three or
/// more buttons reports [`MappingIssue::JoystickMultiButton`].
pub fn classify(record: &GameRecord) -> Option<MappingIssue> {
    for control in &record.controls {
        let kind = control.control_type.as_str();

        if kind.contains("joy") && control.buttons >= 3 {
            return Some(MappingIssue::JoystickMultiButton(control.buttons));
        }

        if kind == "doublejoy" {
            return Some(MappingIssue::DualJoystick);
        }

        // Paddles, pedals, dials and small trackballs only need the hardware
        if (kind == "trackball" || kind == "spinner") && control.buttons > 2 {
            return Some(MappingIssue::TrackballMultiButton(control.buttons));
        }
    }

    None
}

/// Whether the game needs anything beyond the standard panel mapping
pub fn needs_custom_mapping(record: &GameRecord) -> bool {
    classify(record).is_some()
}
