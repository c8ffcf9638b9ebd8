//! Keymap configuration module
//!
//! Keys resolve to semantic [`Action`]s through a preset (standard, vim,
//! emacs) and optional user overrides from the config file.

mod actions;
mod binding;
mod presets;

pub use actions::Action;
pub use binding::{format_key_display, parse_key_string, KeyBinding, ParsedKey};
pub use presets::KeymapPreset;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use serde::{Deserialize, Serialize};

/// Keymap configuration with preset and optional overrides
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Keymap {
    #[serde(default)]
    pub preset: KeymapPreset,

    /// User-defined overrides (checked before preset)
    #[serde(default)]
    pub overrides: Vec<KeyBinding>,
}

impl Keymap {
    /// Get the action for a key event, checking overrides first then preset.
    /// An overridden action loses all of its preset bindings.
    pub fn get_action(&self, code: KeyCode, modifiers: KeyModifiers) -> Option<Action> {
        self.all_bindings()
            .into_iter()
            .find(|binding| binding.matches(code, modifiers))
            .map(|binding| binding.action)
    }

    pub fn resolve(&self, key: &KeyEvent) -> Option<Action> {
        self.get_action(key.code, key.modifiers)
    }

    /// Get all bindings (overrides + preset) for display in help
    pub fn all_bindings(&self) -> Vec<KeyBinding> {
        let mut bindings = self.overrides.clone();
        bindings.extend(
            self.preset
                .bindings()
                .into_iter()
                .filter(|preset| !self.overrides.iter().any(|o| o.action == preset.action)),
        );
        bindings
    }

    /// Display string of the first key bound to `action` (e.g. "Ctrl+S").
    pub fn key_for(&self, action: Action) -> String {
        self.all_bindings()
            .into_iter()
            .find(|b| b.action == action)
            .map(|b| b.display())
            .unwrap_or_else(|| "unbound".to_string())
    }

    /// Footer hint for a set of actions, e.g. `"Create: C | Refresh: R"`.
    pub fn hints(&self, actions: &[(&str, Action)]) -> String {
        actions
            .iter()
            .map(|(label, action)| format!("{}: {}", label, self.key_for(*action)))
            .collect::<Vec<_>>()
            .join(" | ")
    }

    /// Bindings whose key string does not parse. Reported once at startup.
    pub fn invalid_overrides(&self) -> Vec<(String, String)> {
        self.overrides
            .iter()
            .filter_map(|b| parse_key_string(&b.key).err().map(|e| (b.key.clone(), e)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_keymap() {
        let keymap = Keymap::default();
        assert_eq!(keymap.preset, KeymapPreset::Standard);
        assert_eq!(
            keymap.get_action(KeyCode::Char('m'), KeyModifiers::NONE),
            Some(Action::OpenDrawer)
        );
    }

    #[test]
    fn test_override_shadows_preset_binding() {
        let keymap = Keymap {
            preset: KeymapPreset::Standard,
            overrides: vec![KeyBinding::new("n", Action::Create)],
        };
        assert_eq!(
            keymap.get_action(KeyCode::Char('n'), KeyModifiers::NONE),
            Some(Action::Create)
        );
        // 'c' no longer creates once Create is overridden
        assert_eq!(keymap.get_action(KeyCode::Char('c'), KeyModifiers::NONE), None);
        assert_eq!(keymap.key_for(Action::Create), "N");
    }

    #[test]
    fn test_hints_reflect_bindings() {
        let keymap = Keymap::default();
        assert_eq!(
            keymap.hints(&[("Save", Action::Save), ("Back", Action::Cancel)]),
            "Save: Ctrl+S | Back: Esc"
        );
    }

    #[test]
    fn test_invalid_overrides_are_reported() {
        let keymap = Keymap {
            preset: KeymapPreset::Vim,
            overrides: vec![
                KeyBinding::new("ctrl+nope", Action::Quit),
                KeyBinding::new("x", Action::Delete),
            ],
        };
        let invalid = keymap.invalid_overrides();
        assert_eq!(invalid.len(), 1);
        assert_eq!(invalid[0].0, "ctrl+nope");
    }
}
