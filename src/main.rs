use std::fs::OpenOptions;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::Event,
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::runtime::Runtime;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use leanpoint_dash::data::time::now_ms;
use leanpoint_dash::{events, ui};
use leanpoint_dash::{ApiClient, App, Dashboard, DashboardSnapshot, Overrides, Settings, Theme};

#[derive(Parser, Debug)]
#[command(name = "leanpoint-dash")]
#[command(about = "Terminal dashboard for monitoring a Leanpoint checkpoint sync provider")]
struct Args {
    /// Provider base URL [default: http://localhost:5555]
    #[arg(short, long)]
    url: Option<String>,

    /// Settings file (TOML, YAML or JSON)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Status refresh interval (e.g., "5s", "500ms") [default: 5s]
    #[arg(long)]
    status_interval: Option<String>,

    /// Upstreams refresh interval [default: 10s]
    #[arg(long)]
    upstreams_interval: Option<String>,

    /// Health check interval [default: 5s]
    #[arg(long)]
    health_interval: Option<String>,

    /// Fetch every resource once, write JSON to this file and exit
    #[arg(short, long)]
    export: Option<PathBuf>,

    /// Append diagnostic logs to this file (filtered by RUST_LOG)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    if let Some(ref path) = args.log_file {
        init_logging(path)?;
    }

    let overrides = Overrides {
        base_url: args.url.clone(),
        status_interval: args.status_interval.clone(),
        upstreams_interval: args.upstreams_interval.clone(),
        health_interval: args.health_interval.clone(),
    };
    let settings = Settings::load(args.config.as_deref(), &overrides)?;
    info!(base_url = %settings.base_url, intervals = ?settings.intervals, "settings loaded");

    let client = ApiClient::builder()
        .base_url(settings.base_url.clone())
        .build()?;

    let rt = Runtime::new()?;

    // Handle export mode (non-interactive)
    if let Some(export_path) = args.export {
        return export_to_file(&rt, &client, &export_path);
    }

    // Pollers run on the runtime's worker threads; the TUI stays on this one.
    let dashboard = {
        let _guard = rt.enter();
        Dashboard::start(client, settings.intervals)
    };

    let result = run_tui(dashboard, &rt);
    info!("exiting");
    result
}

/// Log to a file only; the terminal belongs to the TUI.
fn init_logging(path: &Path) -> Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open log file {}", path.display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .init();
    Ok(())
}

/// Run the TUI over a started dashboard, then stop the pollers.
fn run_tui(dashboard: Dashboard, rt: &Runtime) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Setup panic hook to restore terminal
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic);
    }));

    let mut app = App::new(dashboard, Theme::auto_detect());

    // Run the main loop
    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    rt.block_on(app.into_dashboard().shutdown());

    result
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> Result<()> {
    while app.running {
        terminal.draw(|frame| ui::draw(frame, app, now_ms()))?;

        // Poll for events with a short timeout; pollers update slots meanwhile
        if let Some(event) = events::poll_event(Duration::from_millis(100))? {
            match event {
                Event::Key(key) => events::handle_key_event(app, key),
                Event::Resize(_, _) => {
                    // Terminal will redraw on next iteration
                }
                _ => {}
            }
        }
    }

    Ok(())
}

/// Fetch all resources once and write them to a JSON file.
fn export_to_file(rt: &Runtime, client: &ApiClient, export_path: &Path) -> Result<()> {
    let snapshot = rt.block_on(DashboardSnapshot::fetch(client));
    for (resource, error) in &snapshot.errors {
        warn!(resource = %resource, error = %error, "export fetch failed");
        eprintln!("Failed to fetch {}: {}", resource, error);
    }

    snapshot.write_json(export_path)?;
    println!("Exported provider state to: {}", export_path.display());
    Ok(())
}
