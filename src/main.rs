//! Terminal runtime and entry point.
//!
//! This module is the thin integration layer between the DineDeck library and
//! the terminal. It owns the tokio runtime, raw mode, the key reader thread and
//! the event loop.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────┐
//! │   Key reader (std thread)    │  ← blocking crossterm::event::read
//! └──────────────┬───────────────┘
//!                │ mpsc
//! ┌──────────────▼───────────────┐        ┌──────────────────────┐
//! │   Event loop (current thread)│ ─────► │  Worker tasks        │
//! │   handle_event → render      │ ◄───── │  (tokio::spawn)      │
//! └──────────────────────────────┘  mpsc  └──────────────────────┘
//! ```
//!
//! The loop waits on three sources: keys, worker responses, and the search
//! debounce deadline.
//!
//! # Keybindings
//!
//! Global:
//! - `Ctrl+c`: Quit
//!
//! In normal mode:
//! - `j`/`Down`: Move down (loads more near the end)
//! - `k`/`Up`: Move up
//! - `G`/`End`: Load the next page
//! - `/`: Focus the search bar
//! - `r`: Refresh
//! - `t`: Toggle light/dark theme
//! - `1`/`2`/`3`: Home, Explore, Profile
//! - `l`: Log out (Profile)
//! - `q`: Quit
//!
//! In search mode:
//! - Characters: Type (committed after the quiet period)
//! - `Ctrl+u`: Clear and search immediately
//! - `Esc`/`Enter`: Leave the search bar
//!
//! In the login / register form:
//! - `Tab`/`Shift+Tab`: Next / previous field
//! - `Enter`: Submit
//! - `Ctrl+t`: Switch between login and register
//! - `Esc`: Go to Home

#![allow(clippy::multiple_crate_versions)]

use clap::Parser;
use crossterm::event::{self as term_event, Event as TermEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::{cursor, execute, queue, terminal};
use dinedeck::app::InputMode;
use dinedeck::worker::{ExploreWorker, WorkerResponse};
use dinedeck::{build_worker, handle_event, initialize, observability, Action, AppState, Config, Event, Result, Screen};
use std::collections::BTreeMap;
use std::io::{self, Write};
use std::path::PathBuf;
use std::time::Instant;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

/// Browse restaurants from the terminal.
#[derive(Debug, Parser)]
#[command(name = "dinedeck", version, about)]
struct Args {
    /// Path to a TOML config file (default: <config dir>/dinedeck/config.toml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// API base URL, e.g. http://localhost:3000/api
    #[arg(long)]
    base_url: Option<String>,

    /// Built-in theme: light or dark
    #[arg(long)]
    theme: Option<String>,

    /// Custom theme TOML file
    #[arg(long)]
    theme_file: Option<String>,

    /// Log level or filter directive (overridden by RUST_LOG)
    #[arg(long)]
    log_level: Option<String>,

    /// Directory for stores and logs
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Keep the session in memory only
    #[arg(long)]
    ephemeral: bool,
}

impl Args {
    fn overrides(&self) -> BTreeMap<String, String> {
        [
            ("api_base_url", self.base_url.clone()),
            ("theme", self.theme.clone()),
            ("theme_file", self.theme_file.clone()),
            ("trace_level", self.log_level.clone()),
            ("data_dir", self.data_dir.as_ref().map(|p| p.to_string_lossy().into_owned())),
        ]
        .into_iter()
        .filter_map(|(key, value)| value.map(|v| (key.to_string(), v)))
        .collect()
    }
}

/// Defaults, then the config file, then `DINEDECK_*` variables, then flags.
fn load_config(args: &Args) -> Result<Config> {
    let base = match &args.config {
        Some(path) => Config::from_file(path)?,
        None => {
            let default_path = dirs::config_dir().map(|dir| dir.join("dinedeck").join("config.toml"));
            match default_path {
                Some(path) if path.exists() => Config::from_file(path)?,
                _ => Config::default(),
            }
        }
    };

    Ok(base.with_env().with_overrides(&args.overrides()))
}

/// Raw mode and alternate screen for the lifetime of the value.
struct TerminalGuard;

impl TerminalGuard {
    fn enter() -> Result<Self> {
        terminal::enable_raw_mode()?;
        let guard = Self;
        execute!(io::stdout(), terminal::EnterAlternateScreen, cursor::Hide)?;
        Ok(guard)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = execute!(io::stdout(), cursor::Show, terminal::LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();
    }
}

/// Forwards terminal events from a blocking reader thread.
fn spawn_key_reader() -> UnboundedReceiver<TermEvent> {
    let (tx, rx) = mpsc::unbounded_channel();
    std::thread::spawn(move || loop {
        match term_event::read() {
            Ok(event) => {
                if tx.send(event).is_err() {
                    break;
                }
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to read terminal event");
                break;
            }
        }
    });
    rx
}

/// Translates a key press into an application event for the current input mode.
fn map_key(state: &AppState, key: KeyEvent) -> Option<Event> {
    if key.kind != KeyEventKind::Press {
        return None;
    }
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    if ctrl && key.code == KeyCode::Char('c') {
        return Some(Event::Quit);
    }
    let at = Instant::now();

    match state.active_input() {
        InputMode::Form => match key.code {
            KeyCode::Char('t') if ctrl => Some(Event::FormToggleMode),
            KeyCode::Tab | KeyCode::Down => Some(Event::FormNextField),
            KeyCode::BackTab | KeyCode::Up => Some(Event::FormPrevField),
            KeyCode::Enter => Some(Event::FormSubmit),
            KeyCode::Esc => Some(Event::ShowScreen(Screen::Home)),
            KeyCode::Backspace => Some(Event::Backspace { at }),
            KeyCode::Char(c) if !ctrl => Some(Event::Char { c, at }),
            _ => None,
        },
        InputMode::Search => match key.code {
            KeyCode::Char('u') if ctrl => Some(Event::ClearSearch),
            KeyCode::Esc | KeyCode::Enter => Some(Event::ExitSearch),
            KeyCode::Down => Some(Event::KeyDown),
            KeyCode::Up => Some(Event::KeyUp),
            KeyCode::Backspace => Some(Event::Backspace { at }),
            KeyCode::Char(c) if !ctrl => Some(Event::Char { c, at }),
            _ => None,
        },
        InputMode::Normal => match key.code {
            KeyCode::Char('q') => Some(Event::Quit),
            KeyCode::Char('j') | KeyCode::Down => Some(Event::KeyDown),
            KeyCode::Char('k') | KeyCode::Up => Some(Event::KeyUp),
            KeyCode::Char('G') | KeyCode::End => Some(Event::EndReached),
            KeyCode::Char('/') => Some(Event::SearchMode),
            KeyCode::Char('r') => Some(Event::Refresh),
            KeyCode::Char('t') => Some(Event::ToggleTheme),
            KeyCode::Char('1') => Some(Event::ShowScreen(Screen::Home)),
            KeyCode::Char('2') => Some(Event::ShowScreen(Screen::Explore)),
            KeyCode::Char('3') => Some(Event::ShowScreen(Screen::Profile)),
            KeyCode::Char('l') if state.screen == Screen::Profile => Some(Event::Logout),
            _ => None,
        },
    }
}

fn draw(state: &AppState) -> Result<()> {
    let (cols, rows) = terminal::size()?;
    let mut stdout = io::stdout();
    queue!(stdout, terminal::Clear(terminal::ClearType::All))?;
    dinedeck::ui::render(state, usize::from(rows), usize::from(cols));
    stdout.flush()?;
    Ok(())
}

/// Applies one event. Returns `false` once the app should exit.
fn apply(
    state: &mut AppState,
    event: &Event,
    worker: &ExploreWorker,
    responses: &UnboundedSender<WorkerResponse>,
) -> Result<bool> {
    let (should_render, actions) = handle_event(state, event)?;

    for action in actions {
        match action {
            Action::PostToWorker(message) => {
                worker.dispatch(message, responses.clone());
            }
            Action::Quit => return Ok(false),
        }
    }

    if should_render {
        draw(state)?;
    }
    Ok(true)
}

async fn run(config: Config, ephemeral: bool) -> Result<()> {
    let worker = build_worker(&config, ephemeral)?;
    let mut state = initialize(&config);

    let _terminal = TerminalGuard::enter()?;
    let mut keys = spawn_key_reader();
    let (response_tx, mut response_rx) = mpsc::unbounded_channel();

    apply(&mut state, &Event::Mount, &worker, &response_tx)?;

    loop {
        let deadline = state.debouncer.next_deadline();
        let debounce = async move {
            match deadline {
                Some(at) => tokio::time::sleep_until(tokio::time::Instant::from_std(at)).await,
                None => std::future::pending::<()>().await,
            }
        };

        let event = tokio::select! {
            Some(term) = keys.recv() => match term {
                TermEvent::Key(key) => map_key(&state, key),
                TermEvent::Resize(_, _) => {
                    draw(&state)?;
                    None
                }
                _ => None,
            },
            Some(response) = response_rx.recv() => Some(Event::WorkerResponse(response)),
            () = debounce => Some(Event::Tick(Instant::now())),
            else => break,
        };

        let Some(event) = event else {
            continue;
        };
        if !apply(&mut state, &event, &worker, &response_tx)? {
            break;
        }
    }

    handle_event(&mut state, &Event::Unmount)?;
    tracing::info!("exiting");
    Ok(())
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let args = Args::parse();
    let config = load_config(&args)?;

    if let Some(log_file) = observability::init_tracing(&config) {
        tracing::info!(log_file = %log_file.display(), version = env!("CARGO_PKG_VERSION"), "dinedeck starting");
    }

    run(config, args.ephemeral).await
}
