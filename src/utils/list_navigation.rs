//! Selection movement shared by the card list and the drawer.

use crate::keymap::Action;
use ratatui::widgets::ListState;

/// Default page size for page up/down navigation.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Extension trait for `ListState` driven by keymap actions.
pub trait ListStateExt {
    /// Move by `delta` items, clamping at both ends.
    fn step_by(&mut self, delta: isize, total_items: usize);

    /// Keep the selection inside `0..total_items` after the list changed.
    fn clamp_to(&mut self, total_items: usize);

    /// Apply a navigation action. Returns false for non-navigation actions.
    fn apply_navigation(&mut self, action: Action, total_items: usize) -> bool;
}

impl ListStateExt for ListState {
    fn step_by(&mut self, delta: isize, total_items: usize) {
        if total_items == 0 {
            self.select(None);
            return;
        }
        let current = self.selected().unwrap_or(0) as isize;
        let last = total_items as isize - 1;
        self.select(Some((current + delta).clamp(0, last) as usize));
    }

    fn clamp_to(&mut self, total_items: usize) {
        match (self.selected(), total_items) {
            (_, 0) => self.select(None),
            (None, _) => self.select(Some(0)),
            (Some(i), n) if i >= n => self.select(Some(n - 1)),
            _ => {}
        }
    }

    fn apply_navigation(&mut self, action: Action, total_items: usize) -> bool {
        let page = DEFAULT_PAGE_SIZE as isize;
        match action {
            Action::MoveUp => self.step_by(-1, total_items),
            Action::MoveDown => self.step_by(1, total_items),
            Action::PageUp => self.step_by(-page, total_items),
            Action::PageDown => self.step_by(page, total_items),
            Action::GoToTop => self.step_by(isize::MIN / 2, total_items),
            Action::GoToEnd => self.step_by(isize::MAX / 2, total_items),
            _ => return false,
        }
        true
    }
}
