//! Landing screen: product name and a way into the drawer.

use super::screen_trait::{Screen, ScreenAction, ScreenContext};
use crate::keymap::Action;
use crate::styles::theme;
use crate::widgets::CinedkLogo;
use anyhow::Result;
use crossterm::event::{Event, KeyEventKind};
use ratatui::layout::{Alignment, Constraint, Flex, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

#[derive(Debug, Default)]
pub struct HomeScreen;

impl HomeScreen {
    pub fn new() -> Self {
        Self
    }
}

impl Screen for HomeScreen {
    fn render(&mut self, frame: &mut Frame, area: Rect, ctx: &ScreenContext) -> Result<()> {
        let t = theme();
        let [logo_row, text_row] = Layout::vertical([
            Constraint::Length(CinedkLogo::height() + 1),
            Constraint::Length(4),
        ])
        .flex(Flex::Center)
        .areas(area);
        let [logo_area] = Layout::horizontal([Constraint::Length(CinedkLogo::width())])
            .flex(Flex::Center)
            .areas(logo_row);
        frame.render_widget(CinedkLogo, logo_area);

        let lines = vec![
            Line::from(Span::styled("Cinema management", t.text_style())),
            Line::from(""),
            Line::from(vec![
                Span::styled("Get started: ", t.muted_style()),
                Span::styled(ctx.keymap.key_for(Action::Confirm), t.emphasis_style()),
            ]),
        ];
        frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), text_row);
        Ok(())
    }

    fn handle_event(&mut self, event: Event, ctx: &ScreenContext) -> Result<ScreenAction> {
        let Event::Key(key) = event else {
            return Ok(ScreenAction::None);
        };
        if key.kind != KeyEventKind::Press {
            return Ok(ScreenAction::None);
        }
        Ok(match ctx.keymap.resolve(&key) {
            Some(Action::Confirm) => ScreenAction::OpenDrawer,
            _ => ScreenAction::None,
        })
    }

    fn footer_hints(&self, ctx: &ScreenContext) -> String {
        ctx.keymap.hints(&[
            ("Get started", Action::Confirm),
            ("Menu", Action::OpenDrawer),
            ("Help", Action::Help),
            ("Quit", Action::Quit),
        ])
    }
}
