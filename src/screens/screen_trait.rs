//! Screen trait and associated types.
//!
//! Screens own their state and never touch the network: they describe the
//! requests they need as [`ApiRequest`]s and receive the outcomes through
//! [`Screen::on_response`]. Navigation and notifications go back to the
//! shell as [`ScreenAction`]s.

use crate::api::{ApiError, ApiRequest, Operation, Reply};
use crate::config::MutationPolicy;
use crate::keymap::Keymap;
use crate::ui::Route;
use crate::widgets::Toast;
use anyhow::Result;
use crossterm::event::Event;
use ratatui::layout::Rect;
use ratatui::Frame;

/// Read-only resources shared by every screen.
#[derive(Debug, Clone, Copy)]
pub struct ScreenContext<'a> {
    pub keymap: &'a Keymap,
    pub policy: MutationPolicy,
}

impl<'a> ScreenContext<'a> {
    pub fn new(keymap: &'a Keymap, policy: MutationPolicy) -> Self {
        Self { keymap, policy }
    }
}

/// Actions that a screen can return after handling an event.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum ScreenAction {
    /// Stay on the current screen.
    #[default]
    None,
    Navigate(Route),
    /// Return to the route's parent (a form's list, a list's home).
    Back,
    /// Focus the current route again.
    Refresh,
    /// Send a request under the current generation.
    Request(ApiRequest),
    Toast(Toast),
    OpenDrawer,
    ShowHelp,
    Quit,
}

/// Trait for screen controllers.
pub trait Screen {
    fn render(&mut self, frame: &mut Frame, area: Rect, ctx: &ScreenContext) -> Result<()>;

    fn handle_event(&mut self, event: Event, ctx: &ScreenContext) -> Result<ScreenAction>;

    /// When true, the shell leaves printable keys to the screen so users can
    /// type freely; only Ctrl-chords act globally.
    fn is_input_focused(&self) -> bool {
        false
    }

    /// Called each time the screen gains focus. Returns the requests the
    /// screen needs for this focus.
    fn on_enter(&mut self, _ctx: &ScreenContext) -> Vec<ApiRequest> {
        Vec::new()
    }

    /// Apply the outcome of a request issued under the current generation.
    fn on_response(
        &mut self,
        _operation: Operation,
        _result: Result<Reply, ApiError>,
        _ctx: &ScreenContext,
    ) -> Vec<ScreenAction> {
        Vec::new()
    }

    /// Key hints for the footer.
    fn footer_hints(&self, ctx: &ScreenContext) -> String;
}
