use crate::api::{ApiClient, ApiEvent, Dispatch};
use crate::cli::load_config;
use crate::config::Config;
use crate::shell::Shell;
use crate::styles::init_theme;
use crate::tui::Tui;
use crate::utils::format_path_for_display;
use anyhow::{Context, Result};
use std::path::PathBuf;
use std::time::Duration;
use tokio::runtime::Runtime;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::{debug, info};

/// How long the loop waits for a key before checking API results again.
const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Main application state.
///
/// The terminal loop runs on the main thread. HTTP requests run on a tokio
/// runtime and report back over a channel, so the UI never blocks on the
/// network.
pub struct App {
    tui: Tui,
    shell: Shell,
    client: ApiClient,
    runtime: Runtime,
    events_tx: UnboundedSender<ApiEvent>,
    events_rx: UnboundedReceiver<ApiEvent>,
}

impl App {
    pub fn new(config_path: PathBuf, base_url: Option<&str>, no_colors: bool) -> Result<Self> {
        let config = load_config(&config_path, base_url)?;
        let no_color = no_colors || std::env::var_os("NO_COLOR").is_some();
        init_theme(config.effective_theme(no_color));

        let client = ApiClient::new(&config.base_url, config.request_timeout())
            .with_context(|| format!("Invalid base URL '{}'", config.base_url))?;
        info!("Using backend {}", client.base_url());

        let Config {
            keymap, mutations, ..
        } = config;
        let shell = Shell::new(keymap, mutations, format_path_for_display(&config_path));

        let runtime = Runtime::new().context("Failed to start async runtime")?;
        let (events_tx, events_rx) = mpsc::unbounded_channel();

        Ok(Self {
            tui: Tui::new()?,
            shell,
            client,
            runtime,
            events_tx,
            events_rx,
        })
    }

    pub fn run(&mut self) -> Result<()> {
        self.tui.enter()?;
        let result = self.event_loop();
        self.tui.exit()?;
        result
    }

    fn event_loop(&mut self) -> Result<()> {
        let initial = self.shell.start();
        self.spawn_all(initial);

        loop {
            self.draw()?;
            if self.shell.should_quit() {
                break;
            }

            while let Ok(event) = self.events_rx.try_recv() {
                let follow_up = self.shell.apply_event(event);
                self.spawn_all(follow_up);
            }

            if let Some(event) = self.tui.poll_event(POLL_INTERVAL)? {
                let dispatches = self.shell.handle_event(event)?;
                self.spawn_all(dispatches);
            }

            self.shell.tick();
        }

        info!("Exiting");
        Ok(())
    }

    fn draw(&mut self) -> Result<()> {
        let shell = &mut self.shell;
        let mut render_result = Ok(());
        self.tui.terminal_mut().draw(|frame| {
            render_result = shell.render(frame);
        })?;
        render_result
    }

    fn spawn_all(&self, dispatches: Vec<Dispatch>) {
        for dispatch in dispatches {
            debug!(
                "Dispatching {:?} (generation {})",
                dispatch.request.operation(),
                dispatch.generation
            );
            let client = self.client.clone();
            let tx = self.events_tx.clone();
            self.runtime.spawn(async move {
                // The receiver only goes away when the app is shutting down.
                let _ = tx.send(client.dispatch(dispatch).await);
            });
        }
    }
}
