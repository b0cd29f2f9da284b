// src/main.rs

use clap::Parser;
use color_eyre::eyre::Result;
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind,
    },
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use ratatui::prelude::*;
use std::io::stdout;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{error, info};

use vanguard_rs_assessor::config::ScannerConfig;
use vanguard_rs_assessor::core::{self, models::ErrorResult};
use vanguard_rs_assessor::logging;

mod app;
mod ui;

use app::{App, AppState, ScanOutcome};

/// Passive website security assessment.
///
/// With a URL, runs one assessment and prints the JSON report. Without one,
/// starts the interactive terminal UI.
#[derive(Debug, Parser)]
#[command(version)]
struct Cli {
    /// Site to assess, e.g. "example.com" or "https://example.com/login".
    url: Option<String>,

    /// Skip the external IP geolocation lookup.
    #[arg(long)]
    no_geo: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    let log_path = logging::initialize_logging()?;
    info!(log = %log_path.display(), "Logging initialized.");

    let mut config = ScannerConfig::from_env();
    if cli.no_geo {
        config.geolocation_enabled = false;
    }

    match cli.url {
        Some(url) => run_headless(&url, &config).await,
        None => run_tui(config).await,
    }
}

/// Prints one assessment as JSON. Exits with status 2 on an error result.
async fn run_headless(url: &str, config: &ScannerConfig) -> Result<()> {
    let response = core::assess_site_response(url, config).await;
    println!("{}", serde_json::to_string_pretty(&response)?);
    if response.is_error() {
        std::process::exit(2);
    }
    Ok(())
}

async fn run_tui(config: ScannerConfig) -> Result<()> {
    // --- Setup ---
    stdout().execute(EnterAlternateScreen)?;
    stdout().execute(EnableMouseCapture)?;
    enable_raw_mode()?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout()))?;
    terminal.clear()?;

    let mut app = App::new();
    let (tx, mut rx) = mpsc::channel(1);

    let result = loop {
        if app.should_quit {
            break Ok(());
        }
        if let Err(e) = terminal.draw(|frame| ui::render(&mut app, frame)) {
            break Err(e.into());
        }

        match event::poll(Duration::from_millis(100)) {
            Ok(true) => {
                if let Err(e) = handle_events(&mut app, &tx, &config) {
                    break Err(e);
                }
            }
            Ok(false) => app.on_tick(),
            Err(e) => break Err(e.into()),
        }

        if let Ok(outcome) = rx.try_recv() {
            app.finish(outcome);
        }
    };

    // --- Restore Terminal ---
    stdout().execute(LeaveAlternateScreen)?;
    stdout().execute(DisableMouseCapture)?;
    disable_raw_mode()?;
    result
}

/// Single event handler so the main loop stays readable.
fn handle_events(app: &mut App, tx: &mpsc::Sender<ScanOutcome>, config: &ScannerConfig) -> Result<()> {
    if let Event::Key(key) = event::read()? {
        if key.kind == KeyEventKind::Press {
            match app.state {
                AppState::Disclaimer => match key.code {
                    KeyCode::Enter => app.state = AppState::Idle,
                    KeyCode::Char('q') | KeyCode::Esc => app.quit(),
                    _ => {}
                },
                AppState::Idle => handle_idle_input(app, key.code, tx, config),
                AppState::Finished => handle_finished_input(app, key.code),
                AppState::Scanning => {
                    if key.code == KeyCode::Char('q') { app.quit(); }
                }
            }
        }
    }
    Ok(())
}

/// Handles typing while the app waits for a target.
fn handle_idle_input(app: &mut App, key_code: KeyCode, tx: &mpsc::Sender<ScanOutcome>, config: &ScannerConfig) {
    match key_code {
        KeyCode::Esc => app.quit(),
        KeyCode::Char(c) => app.input.push(c),
        KeyCode::Backspace => { app.input.pop(); },
        KeyCode::Enter => {
            if app.input.trim().is_empty() { return; }
            app.state = AppState::Scanning;
            let tx_clone = tx.clone();
            let raw_input = app.input.clone();
            let config = config.clone();

            tokio::spawn(async move {
                let outcome = match core::assess_site_with(&raw_input, &config).await {
                    Ok(report) => ScanOutcome::Report(Box::new(report)),
                    Err(e) => {
                        error!(error = %e, "Assessment did not produce a report.");
                        ScanOutcome::Failed(ErrorResult::from(&e))
                    }
                };
                let _ = tx_clone.send(outcome).await;
            });
        }
        _ => {}
    }
}

/// Handles keys while a report is on screen.
fn handle_finished_input(app: &mut App, key_code: KeyCode) {
    match key_code {
        KeyCode::Char('q') => app.quit(),
        KeyCode::Char('n') => app.reset(),
        KeyCode::Char('e') | KeyCode::Char('E') => app.export(),
        KeyCode::Up => app.scroll_up(),
        KeyCode::Down => app.scroll_down(),
        _ => {}
    }
}
