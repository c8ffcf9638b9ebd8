//! Semantic actions triggered by key bindings.

use serde::{Deserialize, Serialize};

/// Every action a key can be bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    // ============ Navigation ============
    /// Move selection up (cards, drawer entries, form fields)
    MoveUp,
    /// Move selection down
    MoveDown,
    /// Previous option of a picker, or one day back
    MoveLeft,
    /// Next option of a picker, or one day forward
    MoveRight,
    PageUp,
    PageDown,
    GoToTop,
    GoToEnd,

    // ============ Selection ============
    /// Open the selected entry (Enter)
    Confirm,
    /// Close an overlay or go back (Esc)
    Cancel,
    /// Flip a switch or a checkbox (Space)
    ToggleSelect,

    // ============ Global ============
    Quit,
    Help,
    /// Show the navigation drawer
    OpenDrawer,

    // ============ Records ============
    Create,
    Edit,
    Delete,
    /// Refetch the current list (counts as a new focus)
    Refresh,

    // ============ Forms ============
    Save,
    NextField,
    PrevField,
    /// Set a date field to today
    Today,
}

impl Action {
    /// Get a human-readable description of this action
    pub fn description(&self) -> &'static str {
        match self {
            Action::MoveUp => "Move up",
            Action::MoveDown => "Move down",
            Action::MoveLeft => "Previous option / day",
            Action::MoveRight => "Next option / day",
            Action::PageUp => "Page up",
            Action::PageDown => "Page down",
            Action::GoToTop => "Go to top",
            Action::GoToEnd => "Go to end",
            Action::Confirm => "Open / select",
            Action::Cancel => "Cancel / Go back",
            Action::ToggleSelect => "Toggle switch or checkbox",
            Action::Quit => "Quit",
            Action::Help => "Show help",
            Action::OpenDrawer => "Open menu",
            Action::Create => "Create new",
            Action::Edit => "Edit",
            Action::Delete => "Delete",
            Action::Refresh => "Refresh",
            Action::Save => "Save",
            Action::NextField => "Next field",
            Action::PrevField => "Previous field",
            Action::Today => "Set date to today",
        }
    }

    /// Get action category for grouping in help display
    pub fn category(&self) -> &'static str {
        match self {
            Action::MoveUp
            | Action::MoveDown
            | Action::MoveLeft
            | Action::MoveRight
            | Action::PageUp
            | Action::PageDown
            | Action::GoToTop
            | Action::GoToEnd => "Navigation",

            Action::Confirm | Action::Cancel | Action::ToggleSelect => "Selection",

            Action::Quit | Action::Help | Action::OpenDrawer => "Global",

            Action::Create | Action::Edit | Action::Delete | Action::Refresh => "Records",

            Action::Save | Action::NextField | Action::PrevField | Action::Today => "Forms",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_category() {
        assert_eq!(Action::MoveUp.category(), "Navigation");
        assert_eq!(Action::OpenDrawer.category(), "Global");
        assert_eq!(Action::Delete.category(), "Records");
        assert_eq!(Action::Today.category(), "Forms");
    }

    #[test]
    fn test_action_serde_uses_snake_case() {
        let json = serde_json::to_string(&Action::OpenDrawer).unwrap();
        assert_eq!(json, "\"open_drawer\"");
        let action: Action = serde_json::from_str("\"next_field\"").unwrap();
        assert_eq!(action, Action::NextField);
    }
}
