//! Preset keymaps: Standard, Vim, Emacs

use super::{Action, KeyBinding};
use serde::{Deserialize, Serialize};

/// Available keymap presets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum KeymapPreset {
    /// Arrows, Enter, Esc and single-letter record actions
    #[default]
    Standard,
    /// hjkl navigation
    Vim,
    /// Ctrl+N/P navigation
    Emacs,
}

impl KeymapPreset {
    pub const ALL: [KeymapPreset; 3] = [
        KeymapPreset::Standard,
        KeymapPreset::Vim,
        KeymapPreset::Emacs,
    ];

    /// Get all key bindings for this preset
    pub fn bindings(&self) -> Vec<KeyBinding> {
        let specific: &[(&str, Action)] = match self {
            KeymapPreset::Standard => STANDARD,
            KeymapPreset::Vim => VIM,
            KeymapPreset::Emacs => EMACS,
        };
        specific
            .iter()
            .chain(COMMON)
            .map(|(key, action)| KeyBinding::new(key, *action))
            .collect()
    }

    pub fn name(&self) -> &'static str {
        match self {
            KeymapPreset::Standard => "Standard",
            KeymapPreset::Vim => "Vim",
            KeymapPreset::Emacs => "Emacs",
        }
    }
}

/// Bindings shared by every preset. Preset-specific entries come first and
/// win when both bind the same key.
const COMMON: &[(&str, Action)] = &[
    ("up", Action::MoveUp),
    ("down", Action::MoveDown),
    ("left", Action::MoveLeft),
    ("right", Action::MoveRight),
    ("pageup", Action::PageUp),
    ("pagedown", Action::PageDown),
    ("home", Action::GoToTop),
    ("end", Action::GoToEnd),
    ("enter", Action::Confirm),
    ("esc", Action::Cancel),
    ("space", Action::ToggleSelect),
    ("ctrl+c", Action::Quit),
    ("?", Action::Help),
    ("ctrl+s", Action::Save),
    ("tab", Action::NextField),
    ("shift+tab", Action::PrevField),
    ("t", Action::Today),
];

const STANDARD: &[(&str, Action)] = &[
    ("q", Action::Quit),
    ("m", Action::OpenDrawer),
    ("c", Action::Create),
    ("e", Action::Edit),
    ("d", Action::Delete),
    ("r", Action::Refresh),
];

const VIM: &[(&str, Action)] = &[
    ("k", Action::MoveUp),
    ("j", Action::MoveDown),
    ("h", Action::MoveLeft),
    ("l", Action::MoveRight),
    ("ctrl+u", Action::PageUp),
    ("ctrl+d", Action::PageDown),
    ("g", Action::GoToTop),
    ("shift+g", Action::GoToEnd),
    ("q", Action::Quit),
    ("m", Action::OpenDrawer),
    ("o", Action::Create),
    ("e", Action::Edit),
    ("d", Action::Delete),
    ("r", Action::Refresh),
];

const EMACS: &[(&str, Action)] = &[
    ("ctrl+p", Action::MoveUp),
    ("ctrl+n", Action::MoveDown),
    ("ctrl+b", Action::MoveLeft),
    ("ctrl+f", Action::MoveRight),
    ("alt+v", Action::PageUp),
    ("ctrl+v", Action::PageDown),
    ("ctrl+g", Action::Cancel),
    ("ctrl+x", Action::OpenDrawer),
    ("ctrl+o", Action::Create),
    ("ctrl+e", Action::Edit),
    ("ctrl+k", Action::Delete),
    ("ctrl+r", Action::Refresh),
    ("q", Action::Quit),
];
