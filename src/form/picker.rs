//! Cross-entity selection controls.
//!
//! Options are filled by a side fetch of the referenced entity. Only ids are
//! stored, so a seeded selection survives until (and after) options arrive.

use crate::model::Record;

/// One selectable record: its id and the label shown for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PickerOption {
    pub id: i64,
    pub label: String,
}

impl PickerOption {
    pub fn from_record(record: &Record) -> Self {
        Self {
            id: record.id(),
            label: record.option_label(),
        }
    }
}

/// Options have not arrived yet, arrived, or could not be fetched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum OptionsState {
    #[default]
    Loading,
    Loaded,
    Failed(String),
}

/// Single-id picker.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Picker {
    options: Vec<PickerOption>,
    selected: Option<i64>,
    state: OptionsState,
}

impl Picker {
    pub fn new(selected: Option<i64>) -> Self {
        Self {
            selected,
            ..Self::default()
        }
    }

    pub fn selected(&self) -> Option<i64> {
        self.selected
    }

    pub fn options(&self) -> &[PickerOption] {
        &self.options
    }

    pub fn state(&self) -> &OptionsState {
        &self.state
    }

    pub fn set_options(&mut self, options: Vec<PickerOption>) {
        self.options = options;
        self.state = OptionsState::Loaded;
    }

    pub fn set_failed(&mut self, reason: impl Into<String>) {
        self.state = OptionsState::Failed(reason.into());
    }

    /// Label of the current selection, falling back to the bare id when the
    /// options do not (yet) include it.
    pub fn selected_label(&self) -> Option<String> {
        let id = self.selected?;
        Some(
            self.options
                .iter()
                .find(|o| o.id == id)
                .map_or_else(|| format!("#{}", id), |o| o.label.clone()),
        )
    }

    /// Select the next (or previous) option, wrapping around. With nothing
    /// selected, forward picks the first option and backward the last.
    pub fn cycle(&mut self, forward: bool) {
        let len = self.options.len();
        if len == 0 {
            return;
        }
        let position = self
            .selected
            .and_then(|id| self.options.iter().position(|o| o.id == id));
        let next = match (position, forward) {
            (Some(i), true) => (i + 1) % len,
            (Some(i), false) => (i + len - 1) % len,
            (None, true) => 0,
            (None, false) => len - 1,
        };
        self.selected = Some(self.options[next].id);
    }
}

/// Multi-id checkbox list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CheckList {
    options: Vec<PickerOption>,
    selected: Vec<i64>,
    cursor: usize,
    state: OptionsState,
}

impl CheckList {
    pub fn new(selected: Vec<i64>) -> Self {
        Self {
            selected,
            ..Self::default()
        }
    }

    /// Selected ids, in toggle order.
    pub fn selected(&self) -> &[i64] {
        &self.selected
    }

    pub fn options(&self) -> &[PickerOption] {
        &self.options
    }

    pub fn state(&self) -> &OptionsState {
        &self.state
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn is_checked(&self, id: i64) -> bool {
        self.selected.contains(&id)
    }

    pub fn set_options(&mut self, options: Vec<PickerOption>) {
        self.options = options;
        self.cursor = self.cursor.min(self.options.len().saturating_sub(1));
        self.state = OptionsState::Loaded;
    }

    pub fn set_failed(&mut self, reason: impl Into<String>) {
        self.state = OptionsState::Failed(reason.into());
    }

    /// Remove `id` if present, append it otherwise.
    pub fn toggle(&mut self, id: i64) {
        if let Some(i) = self.selected.iter().position(|s| *s == id) {
            self.selected.remove(i);
        } else {
            self.selected.push(id);
        }
    }

    pub fn toggle_at_cursor(&mut self) {
        if let Some(id) = self.options.get(self.cursor).map(|o| o.id) {
            self.toggle(id);
        }
    }

    pub fn move_cursor(&mut self, forward: bool) {
        let len = self.options.len();
        if len == 0 {
            return;
        }
        self.cursor = if forward {
            (self.cursor + 1) % len
        } else {
            (self.cursor + len - 1) % len
        };
    }
}
