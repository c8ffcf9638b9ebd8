//! Navigation drawer: Home plus one entry per entity list.

use crate::keymap::Action;
use crate::model::EntityKind;
use crate::styles::{theme, LIST_HIGHLIGHT_SYMBOL};
use crate::ui::Route;
use crate::utils::ListStateExt;
use ratatui::layout::Rect;
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, ListState};
use ratatui::Frame;

/// One row of the drawer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawerEntry {
    Home,
    Entity(EntityKind),
}

impl DrawerEntry {
    /// Drawer rows in display order.
    pub fn all() -> Vec<DrawerEntry> {
        std::iter::once(DrawerEntry::Home)
            .chain(EntityKind::ALL.into_iter().map(DrawerEntry::Entity))
            .collect()
    }

    pub fn route(self) -> Route {
        match self {
            DrawerEntry::Home => Route::Home,
            DrawerEntry::Entity(kind) => Route::List(kind),
        }
    }

    pub fn label(self) -> String {
        match self {
            DrawerEntry::Home => "🏠 Home".to_string(),
            DrawerEntry::Entity(kind) => format!("{} {}", kind.icon(), kind.title()),
        }
    }

    fn of_route(route: &Route) -> DrawerEntry {
        match route.kind() {
            Some(kind) => DrawerEntry::Entity(kind),
            None => DrawerEntry::Home,
        }
    }
}

/// What the drawer wants after a key.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawerOutcome {
    Stay,
    Close,
    Go(Route),
}

#[derive(Debug, Default)]
pub struct Drawer {
    open: bool,
    state: ListState,
}

impl Drawer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Open with the entry for `current` preselected.
    pub fn open(&mut self, current: &Route) {
        let entry = DrawerEntry::of_route(current);
        let index = DrawerEntry::all().iter().position(|e| *e == entry);
        self.state.select(index.or(Some(0)));
        self.open = true;
    }

    pub fn close(&mut self) {
        self.open = false;
    }

    pub fn selected(&self) -> Option<DrawerEntry> {
        self.state
            .selected()
            .and_then(|i| DrawerEntry::all().get(i).copied())
    }

    pub fn handle_action(&mut self, action: Option<Action>) -> DrawerOutcome {
        let total = DrawerEntry::all().len();
        match action {
            Some(Action::Cancel | Action::OpenDrawer) => {
                self.close();
                DrawerOutcome::Close
            }
            Some(Action::Confirm) => match self.selected() {
                Some(entry) => {
                    self.close();
                    DrawerOutcome::Go(entry.route())
                }
                None => DrawerOutcome::Stay,
            },
            Some(action) => {
                self.state.apply_navigation(action, total);
                DrawerOutcome::Stay
            }
            None => DrawerOutcome::Stay,
        }
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect) {
        let t = theme();
        let width = 32.min(area.width);
        let drawer_area = Rect::new(area.x, area.y, width, area.height);
        frame.render_widget(Clear, drawer_area);

        let items: Vec<ListItem> = DrawerEntry::all()
            .into_iter()
            .map(|entry| ListItem::new(entry.label()).style(t.text_style()))
            .collect();

        let list = List::new(items)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(" Menu ")
                    .title_style(t.title_style())
                    .border_style(t.border_focused_style())
                    .style(t.background_style()),
            )
            .highlight_style(t.highlight_style())
            .highlight_symbol(LIST_HIGHLIGHT_SYMBOL);

        frame.render_stateful_widget(list, drawer_area, &mut self.state);
    }
}
