//! Keyboard shortcuts and focus targets for the wizard UI.

use serde::{Deserialize, Serialize};

use super::state::WizardStep;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Key {
    Enter,
    ArrowLeft,
    Backspace,
    #[serde(other)]
    Other,
}

/// A key press together with the modifiers held.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyChord {
    pub key: Key,
    #[serde(default)]
    pub ctrl: bool,
    #[serde(default)]
    pub alt: bool,
}

impl KeyChord {
    pub fn ctrl(key: Key) -> Self {
        Self {
            key,
            ctrl: true,
            alt: false,
        }
    }

    pub fn alt(key: Key) -> Self {
        Self {
            key,
            ctrl: false,
            alt: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WizardCommand {
    Advance,
    Retreat,
}

/// Ctrl+Enter advances; Alt+ArrowLeft or Alt+Backspace goes back.
pub fn command_for(chord: KeyChord) -> Option<WizardCommand> {
    match chord {
        KeyChord {
            key: Key::Enter,
            ctrl: true,
            ..
        } => Some(WizardCommand::Advance),
        KeyChord {
            key: Key::ArrowLeft | Key::Backspace,
            alt: true,
            ..
        } => Some(WizardCommand::Retreat),
        _ => None,
    }
}

/// Input to focus when `step` becomes active.
pub fn focus_target(step: WizardStep) -> Option<&'static str> {
    match step {
        WizardStep::Personal => Some("firstName"),
        WizardStep::Contact => Some("email"),
        WizardStep::Resume => Some("summary"),
        WizardStep::Experience => Some("experience.title"),
        WizardStep::Projects => Some("projects.name"),
        WizardStep::Review => None,
    }
}
