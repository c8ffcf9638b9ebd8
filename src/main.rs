use anyhow::Result;
use cinedk::app::App;
use cinedk::cli::{print_error, Cli};
use cinedk::utils::get_log_dir;
use clap::Parser;
use tracing_appender::non_blocking::WorkerGuard;

/// Set up panic hook to restore terminal state on panic
fn setup_panic_hook() {
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        // Restore the terminal first so the panic message is readable
        let _ = crossterm::terminal::disable_raw_mode();
        let _ = crossterm::execute!(
            std::io::stdout(),
            crossterm::terminal::LeaveAlternateScreen,
            crossterm::event::DisableMouseCapture
        );
        original_hook(panic_info);
    }));
}

/// File logging; the terminal belongs to the TUI.
fn init_logging() -> Result<(WorkerGuard, std::path::PathBuf)> {
    let log_dir = get_log_dir();
    std::fs::create_dir_all(&log_dir)?;
    let log_file = log_dir.join("cinedk.log");

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let file_appender = tracing_appender::rolling::never(&log_dir, "cinedk.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(non_blocking)
        .with_ansi(false)
        .init();

    Ok((guard, log_file))
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let (guard, log_file) = init_logging()?;

    if cli.command.is_some() {
        let result = cli.execute();
        if let Err(e) = &result {
            tracing::error!("Command failed: {:#}", e);
        }
        drop(guard);
        if let Err(e) = result {
            print_error(&format!("{:#}", e));
            std::process::exit(1);
        }
        return Ok(());
    }

    setup_panic_hook();

    // Visible briefly, before the alternate screen takes over
    eprintln!("Logs are being written to: {:?}", log_file);
    eprintln!("View logs in real-time: tail -f {:?}", log_file);

    let result = App::new(cli.config_path(), cli.base_url.as_deref(), cli.no_colors)
        .and_then(|mut app| app.run());

    drop(guard);
    result
}
