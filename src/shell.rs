//! Routing, overlays and stale-response filtering around the screens.
//!
//! The shell owns no I/O. Key events and API events go in; [`Dispatch`]es
//! come out for the caller to run. That keeps the whole UI state machine
//! drivable from tests.

use crate::api::{ApiEvent, ApiRequest, Dispatch, Generation, GenerationFence};
use crate::components::{Drawer, DrawerOutcome, Footer, Header, HelpOverlay, FOOTER_HEIGHT, HEADER_HEIGHT};
use crate::config::MutationPolicy;
use crate::keymap::{Action, Keymap};
use crate::model::EntityKind;
use crate::screens::{FormMode, FormScreen, HomeScreen, ListScreen, Screen, ScreenAction, ScreenContext};
use crate::ui::Route;
use crate::utils::create_standard_layout;
use crate::widgets::ToastManager;
use anyhow::Result;
use crossterm::event::{Event, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::Frame;
use tracing::{debug, error, info};

/// One instance of each screen; the route picks the active one.
struct Screens {
    home: HomeScreen,
    list: ListScreen,
    form: FormScreen,
}

impl Screens {
    fn get(&mut self, route: &Route) -> &mut dyn Screen {
        match route {
            Route::Home => &mut self.home,
            Route::List(_) => &mut self.list,
            Route::Create(_) | Route::Edit(_) => &mut self.form,
        }
    }

    fn get_ref(&self, route: &Route) -> &dyn Screen {
        match route {
            Route::Home => &self.home,
            Route::List(_) => &self.list,
            Route::Create(_) | Route::Edit(_) => &self.form,
        }
    }
}

pub struct Shell {
    route: Route,
    screens: Screens,
    fence: GenerationFence,
    drawer: Drawer,
    toasts: ToastManager,
    show_help: bool,
    keymap: Keymap,
    policy: MutationPolicy,
    /// Shown in the help overlay
    config_path: String,
    should_quit: bool,
}

impl Shell {
    pub fn new(keymap: Keymap, policy: MutationPolicy, config_path: impl Into<String>) -> Self {
        Self {
            route: Route::Home,
            screens: Screens {
                home: HomeScreen::new(),
                list: ListScreen::new(EntityKind::Theater),
                form: FormScreen::new(FormMode::Create(EntityKind::Theater)),
            },
            fence: GenerationFence::new(),
            drawer: Drawer::new(),
            toasts: ToastManager::new(),
            show_help: false,
            keymap,
            policy,
            config_path: config_path.into(),
            should_quit: false,
        }
    }

    /// Focus the home screen. Call once before the first event.
    pub fn start(&mut self) -> Vec<Dispatch> {
        self.navigate(Route::Home)
    }

    /// Focus `route`: a new generation starts and the screen's focus
    /// requests are returned tagged with it.
    pub fn navigate(&mut self, route: Route) -> Vec<Dispatch> {
        match &route {
            Route::Home => {}
            Route::List(kind) => self.screens.list.set_kind(*kind),
            Route::Create(kind) => self.screens.form.set_mode(FormMode::Create(*kind)),
            Route::Edit(record) => self.screens.form.set_mode(FormMode::Edit(record.clone())),
        }
        self.route = route;
        let generation = self.fence.advance();
        info!("Entering {} ({})", self.route.title(), generation);

        let ctx = ScreenContext::new(&self.keymap, self.policy);
        let requests = self.screens.get(&self.route).on_enter(&ctx);
        self.tag(requests)
    }

    fn tag(&self, requests: Vec<ApiRequest>) -> Vec<Dispatch> {
        let generation = self.fence.current();
        requests
            .into_iter()
            .map(|request| Dispatch { generation, request })
            .collect()
    }

    pub fn handle_event(&mut self, event: Event) -> Result<Vec<Dispatch>> {
        match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => self.handle_key(key),
            _ => Ok(Vec::new()),
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Result<Vec<Dispatch>> {
        let action = self.keymap.resolve(&key);

        if self.show_help {
            self.show_help = false;
            return Ok(Vec::new());
        }

        if self.drawer.is_open() {
            return Ok(match self.drawer.handle_action(action) {
                DrawerOutcome::Go(route) => self.navigate(route),
                DrawerOutcome::Stay | DrawerOutcome::Close => Vec::new(),
            });
        }

        // Forms take printable keys; only chords act globally there
        let global = !self.screens.get_ref(&self.route).is_input_focused()
            || key.modifiers.contains(KeyModifiers::CONTROL);
        if global {
            match action {
                Some(Action::Quit) => return Ok(self.perform(ScreenAction::Quit)),
                Some(Action::Help) => return Ok(self.perform(ScreenAction::ShowHelp)),
                Some(Action::OpenDrawer) => return Ok(self.perform(ScreenAction::OpenDrawer)),
                _ => {}
            }
        }

        let ctx = ScreenContext::new(&self.keymap, self.policy);
        let outcome = self.screens.get(&self.route).handle_event(Event::Key(key), &ctx)?;
        Ok(self.perform(outcome))
    }

    /// Apply a finished request. Outcomes from an earlier generation are
    /// dropped.
    pub fn apply_event(&mut self, event: ApiEvent) -> Vec<Dispatch> {
        let ApiEvent {
            generation,
            operation,
            result,
        } = event;
        if !self.fence.is_current(generation) {
            debug!(
                "Dropping stale reply to {:?} from {} (current {})",
                operation,
                generation,
                self.fence.current()
            );
            return Vec::new();
        }
        if let Err(e) = &result {
            error!("{:?} failed: {}", operation, e);
        }

        let ctx = ScreenContext::new(&self.keymap, self.policy);
        let actions = self.screens.get(&self.route).on_response(operation, result, &ctx);
        let mut dispatches = Vec::new();
        for action in actions {
            dispatches.extend(self.perform(action));
        }
        dispatches
    }

    fn perform(&mut self, action: ScreenAction) -> Vec<Dispatch> {
        match action {
            ScreenAction::None => Vec::new(),
            ScreenAction::Navigate(route) => self.navigate(route),
            ScreenAction::Back => {
                let parent = self.route.parent();
                self.navigate(parent)
            }
            ScreenAction::Refresh => {
                let route = self.route.clone();
                self.navigate(route)
            }
            ScreenAction::Request(request) => self.tag(vec![request]),
            ScreenAction::Toast(toast) => {
                self.toasts.push(toast);
                Vec::new()
            }
            ScreenAction::OpenDrawer => {
                self.drawer.open(&self.route);
                Vec::new()
            }
            ScreenAction::ShowHelp => {
                self.show_help = true;
                Vec::new()
            }
            ScreenAction::Quit => {
                info!("Quit requested");
                self.should_quit = true;
                Vec::new()
            }
        }
    }

    /// Expire toasts. Call once per loop iteration.
    pub fn tick(&mut self) {
        self.toasts.tick();
    }

    pub fn render(&mut self, frame: &mut Frame) -> Result<()> {
        let area = frame.area();
        let (header_area, body_area, footer_area) =
            create_standard_layout(area, HEADER_HEIGHT, FOOTER_HEIGHT);

        Header::render(frame, header_area, &self.route.title(), &self.description())?;

        let ctx = ScreenContext::new(&self.keymap, self.policy);
        let screen = self.screens.get(&self.route);
        screen.render(frame, body_area, &ctx)?;
        let hints = screen.footer_hints(&ctx);
        Footer::render(frame, footer_area, &hints)?;

        if self.drawer.is_open() {
            self.drawer.render(frame, body_area);
        }
        self.toasts.render(frame, area);
        if self.show_help {
            HelpOverlay::render(frame, area, &self.keymap, &self.config_path)?;
        }
        Ok(())
    }

    fn description(&self) -> String {
        match &self.route {
            Route::Home => "Theaters, movies, rooms, sessions and tickets in one place.".to_string(),
            Route::List(kind) => format!("All {} on the server.", kind.title().to_lowercase()),
            Route::Create(_) | Route::Edit(_) => format!(
                "Press {} to save, {} to go back.",
                self.keymap.key_for(Action::Save),
                self.keymap.key_for(Action::Cancel)
            ),
        }
    }

    pub fn route(&self) -> &Route {
        &self.route
    }

    pub fn generation(&self) -> Generation {
        self.fence.current()
    }

    pub fn list(&self) -> &ListScreen {
        &self.screens.list
    }

    pub fn form(&self) -> &FormScreen {
        &self.screens.form
    }

    pub fn form_mut(&mut self) -> &mut FormScreen {
        &mut self.screens.form
    }

    pub fn drawer(&self) -> &Drawer {
        &self.drawer
    }

    pub fn toasts(&self) -> &ToastManager {
        &self.toasts
    }

    pub fn help_visible(&self) -> bool {
        self.show_help
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }
}
