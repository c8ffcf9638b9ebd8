//! Card list of one entity's records.

use super::screen_trait::{Screen, ScreenAction, ScreenContext};
use crate::api::{ApiError, ApiRequest, Operation, Reply};
use crate::config::MutationPolicy;
use crate::keymap::Action;
use crate::model::{EntityKind, Record};
use crate::styles::{theme, LIST_HIGHLIGHT_SYMBOL};
use crate::ui::Route;
use crate::utils::ListStateExt;
use crate::widgets::Toast;
use anyhow::Result;
use crossterm::event::{Event, KeyEventKind};
use ratatui::layout::{Alignment, Rect};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap};
use ratatui::Frame;
use tracing::warn;

/// Where the current focus's fetch stands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListPhase {
    Loading,
    Loaded,
    /// The fetch failed; the message replaces the cards.
    Failed(String),
}

pub struct ListScreen {
    kind: EntityKind,
    records: Vec<Record>,
    phase: ListPhase,
    state: ListState,
}

impl ListScreen {
    pub fn new(kind: EntityKind) -> Self {
        Self {
            kind,
            records: Vec::new(),
            phase: ListPhase::Loading,
            state: ListState::default(),
        }
    }

    /// Point the screen at another entity. Takes effect on the next focus.
    pub fn set_kind(&mut self, kind: EntityKind) {
        if self.kind != kind {
            self.kind = kind;
            self.records.clear();
            self.state = ListState::default();
        }
    }

    pub fn kind(&self) -> EntityKind {
        self.kind
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn phase(&self) -> &ListPhase {
        &self.phase
    }

    pub fn selected(&self) -> Option<&Record> {
        self.state.selected().and_then(|i| self.records.get(i))
    }

    pub fn select(&mut self, index: usize) {
        self.state.select(Some(index));
        self.state.clamp_to(self.records.len());
    }

    fn remove(&mut self, id: i64) {
        self.records.retain(|r| r.id() != id);
        self.state.clamp_to(self.records.len());
    }

    fn render_cards(&mut self, frame: &mut Frame, area: Rect, block: Block) {
        let t = theme();
        let items: Vec<ListItem> = self
            .records
            .iter()
            .map(|record| {
                let card = record.card();
                let mut lines = vec![Line::from(Span::styled(card.title, t.card_title_style()))];
                lines.extend(
                    card.lines
                        .into_iter()
                        .map(|l| Line::from(Span::styled(format!("  {}", l), t.text_style()))),
                );
                lines.push(Line::from(""));
                ListItem::new(Text::from(lines))
            })
            .collect();

        let list = List::new(items)
            .block(block)
            .highlight_style(t.highlight_style())
            .highlight_symbol(LIST_HIGHLIGHT_SYMBOL);
        frame.render_stateful_widget(list, area, &mut self.state);
    }

    fn message(frame: &mut Frame, area: Rect, block: Block, text: Line) {
        frame.render_widget(
            Paragraph::new(text)
                .block(block)
                .alignment(Alignment::Center)
                .wrap(Wrap { trim: true }),
            area,
        );
    }
}

impl Screen for ListScreen {
    fn render(&mut self, frame: &mut Frame, area: Rect, ctx: &ScreenContext) -> Result<()> {
        let t = theme();
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(t.border_focused_style())
            .title(format!(" {} {} ", self.kind.icon(), self.kind.title()))
            .title_style(t.title_style());

        match &self.phase {
            ListPhase::Loading => {
                let text = format!("Loading {}...", self.kind.title().to_lowercase());
                Self::message(frame, area, block, Line::styled(text, t.muted_style()));
            }
            ListPhase::Failed(reason) => {
                let text = format!("Could not load {}: {}", self.kind.title().to_lowercase(), reason);
                Self::message(frame, area, block, Line::styled(text, t.error_style()));
            }
            ListPhase::Loaded if self.records.is_empty() => {
                let text = format!(
                    "No {} yet. Press {} to create one.",
                    self.kind.title().to_lowercase(),
                    ctx.keymap.key_for(Action::Create)
                );
                Self::message(frame, area, block, Line::styled(text, t.muted_style()));
            }
            ListPhase::Loaded => self.render_cards(frame, area, block),
        }
        Ok(())
    }

    fn handle_event(&mut self, event: Event, ctx: &ScreenContext) -> Result<ScreenAction> {
        let Event::Key(key) = event else {
            return Ok(ScreenAction::None);
        };
        if key.kind != KeyEventKind::Press {
            return Ok(ScreenAction::None);
        }
        let Some(action) = ctx.keymap.resolve(&key) else {
            return Ok(ScreenAction::None);
        };

        let total = self.records.len();
        if self.state.apply_navigation(action, total) {
            return Ok(ScreenAction::None);
        }

        Ok(match action {
            Action::Create => ScreenAction::Navigate(Route::Create(self.kind)),
            Action::Refresh => ScreenAction::Refresh,
            Action::Cancel => ScreenAction::Back,
            Action::Confirm | Action::Edit => match self.selected() {
                Some(record) => ScreenAction::Navigate(Route::Edit(record.clone())),
                None => ScreenAction::None,
            },
            Action::Delete => match self.selected() {
                Some(record) => ScreenAction::Request(ApiRequest::Delete {
                    kind: self.kind,
                    id: record.id(),
                }),
                None => ScreenAction::None,
            },
            _ => ScreenAction::None,
        })
    }

    fn on_enter(&mut self, _ctx: &ScreenContext) -> Vec<ApiRequest> {
        self.phase = ListPhase::Loading;
        vec![ApiRequest::List { kind: self.kind }]
    }

    fn on_response(
        &mut self,
        operation: Operation,
        result: Result<Reply, ApiError>,
        ctx: &ScreenContext,
    ) -> Vec<ScreenAction> {
        match (operation, result) {
            (Operation::List(kind), Ok(Reply::Records(records))) if kind == self.kind => {
                self.records = records;
                self.phase = ListPhase::Loaded;
                self.state.clamp_to(self.records.len());
                Vec::new()
            }
            (Operation::List(kind), Err(e)) if kind == self.kind => {
                self.records.clear();
                self.state.clamp_to(0);
                self.phase = ListPhase::Failed(e.to_string());
                vec![ScreenAction::Toast(Toast::error(format!(
                    "Could not load {}",
                    kind.title().to_lowercase()
                )))]
            }
            (Operation::Delete(kind, id), Ok(_)) => {
                self.remove(id);
                vec![ScreenAction::Toast(Toast::success(format!(
                    "{} #{} deleted",
                    kind.singular(),
                    id
                )))]
            }
            (Operation::Delete(kind, id), Err(e)) => match ctx.policy {
                MutationPolicy::Confirmed => vec![ScreenAction::Toast(Toast::error(format!(
                    "Could not delete {} #{}: {}",
                    kind.singular().to_lowercase(),
                    id,
                    e
                )))],
                MutationPolicy::Optimistic => {
                    warn!("Delete of {} #{} failed, removing it anyway: {}", kind, id, e);
                    self.remove(id);
                    Vec::new()
                }
            },
            (operation, _) => {
                warn!("List screen ignored a reply to {:?}", operation);
                Vec::new()
            }
        }
    }

    fn footer_hints(&self, ctx: &ScreenContext) -> String {
        ctx.keymap.hints(&[
            ("Create", Action::Create),
            ("Edit", Action::Edit),
            ("Delete", Action::Delete),
            ("Refresh", Action::Refresh),
            ("Menu", Action::OpenDrawer),
            ("Help", Action::Help),
        ])
    }
}
