//! MI_CARE terminal client.
//!
//! Starts on the splash screen and walks through login or onboarding to the
//! dashboard. Every backend call is simulated with a delay on the flow clock,
//! which this loop advances once per frame.

use std::fs::OpenOptions;
use std::io::{self, stdout};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::event::{self, DisableMouseCapture, EnableMouseCapture, Event};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::Rect;
use tracing::info;

use micare_core::AppConfig;
use micare_tui::{handle_key, handle_mouse, ui, AppState};

#[derive(Parser)]
#[command(name = "micare", about = "MI_CARE healthcare onboarding client")]
struct Cli {
    /// Path to a TOML config file. Defaults are used when omitted.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Where to write the log. The terminal is owned by the UI.
    #[arg(long, default_value = "micare.log")]
    log_file: PathBuf,

    /// Divide every simulated delay by ten.
    #[arg(long, default_value_t = false)]
    fast: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_file_logging(&cli.log_file)?;

    let mut config = match &cli.config {
        Some(path) => AppConfig::from_file(path)?,
        None => AppConfig::default(),
    };
    if cli.fast {
        config.timings = config.timings.scaled_down(10);
    }
    info!(fast = cli.fast, config = ?cli.config, "starting");

    // Install a panic hook that restores the terminal before printing the panic.
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stderr(), LeaveAlternateScreen, DisableMouseCapture);
        default_hook(info);
    }));

    let mut app = AppState::new(&config);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    // Run the main event loop
    let tick_rate = Duration::from_millis(config.tick_rate_ms.max(1));
    let result = run_app(&mut terminal, &mut app, tick_rate);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    info!("exiting");
    result
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut AppState,
    tick_rate: Duration,
) -> Result<()> {
    let started = Instant::now();
    loop {
        // 1. Render
        let size = terminal.size()?;
        app.frame_area = Rect::new(0, 0, size.width, size.height);
        terminal.draw(|f| ui::draw(f, app))?;

        // 2. Poll for input events
        if event::poll(tick_rate)? {
            match event::read()? {
                Event::Key(key) => handle_key(app, key),
                Event::Mouse(mouse) => handle_mouse(app, mouse),
                _ => {}
            }
        }

        // 3. Fire due timers
        app.tick(started.elapsed().as_millis() as u64);

        // 4. Check quit
        if !app.running {
            break;
        }
    }
    Ok(())
}

fn init_file_logging(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("create log directory '{}'", parent.display()))?;
        }
    }

    let log_file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("open log file '{}'", path.display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with_ansi(false)
        .with_writer(Mutex::new(log_file))
        .init();

    Ok(())
}
