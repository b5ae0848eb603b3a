//! Event handling and state transition logic.
//!
//! This module implements the core event handler that processes user input,
//! timer ticks and worker responses, translating them into state changes and
//! action sequences.
//!
//! # Architecture
//!
//! The handler follows a unidirectional data flow pattern:
//! 1. Events arrive from the terminal loop or the worker
//! 2. [`handle_event`] pattern-matches the event type
//! 3. State mutations occur via `AppState` methods
//! 4. Actions are collected and returned for execution
//!
//! # Event Types
//!
//! - **Lifecycle**: `Mount`, `Unmount`, `ShowScreen`, `ScreenFocus`
//! - **Navigation**: `KeyDown`, `KeyUp`, `EndReached`, `Refresh`
//! - **Input**: `Char`, `Backspace`, `ClearSearch`, `SetSearch`, `Tick`
//! - **Form**: `FormNextField`, `FormPrevField`, `FormSubmit`, `FormToggleMode`
//! - **Worker**: `WorkerResponse` with typed message variants
//!
//! # Example
//!
//! ```rust
//! use dinedeck::app::{handle_event, Action, AppState, Event};
//! use dinedeck::ui::theme::{Theme, ThemeMode};
//! use dinedeck::worker::WorkerMessage;
//! use std::time::Duration;
//!
//! let mut state = AppState::new(Theme::default(), ThemeMode::Light, Duration::from_millis(500));
//! let (render, actions) = handle_event(&mut state, &Event::Mount)?;
//! assert!(render);
//! assert_eq!(actions[0], Action::PostToWorker(WorkerMessage::ProbeAuth));
//! # Ok::<(), dinedeck::DineError>(())
//! ```

use crate::app::modes::{InputMode, Phase, Screen};
use crate::app::{Action, AppState};
use crate::auth::{AuthFormState, Submission};
use crate::domain::error::Result;
use crate::worker::{WorkerMessage, WorkerResponse};
use std::time::Instant;

/// Events triggered by user input, timers, or worker responses.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// The Explore controller comes alive: probe auth and load preferences.
    Mount,
    /// The controller is torn down; late completions are discarded.
    Unmount,

    /// Switches the visible screen.
    ShowScreen(Screen),
    /// The Explore screen regained focus.
    ScreenFocus,

    /// Moves selection down (clamped); near the end this loads more.
    KeyDown,
    /// Moves selection up (clamped).
    KeyUp,
    /// The list was scrolled to its end.
    EndReached,
    /// Pull-to-refresh.
    Refresh,

    /// Focuses the search bar.
    SearchMode,
    /// Leaves the search bar, keeping its text.
    ExitSearch,

    /// A printable key, routed to the search bar or the form.
    Char { c: char, at: Instant },
    /// Backspace, routed like [`Event::Char`].
    Backspace { at: Instant },
    /// Clears the search bar and commits the empty term immediately.
    ClearSearch,
    /// Sets the search term from outside the input, committing immediately.
    SetSearch(String),
    /// Timer tick; commits the debounced search term once it is due.
    Tick(Instant),

    ToggleTheme,

    FormNextField,
    FormPrevField,
    FormSubmit,
    FormToggleMode,

    Logout,
    Quit,

    /// Wraps a response from the background worker.
    WorkerResponse(WorkerResponse),
}

impl Event {
    /// Short name for tracing. Never includes typed characters.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Mount => "mount",
            Self::Unmount => "unmount",
            Self::ShowScreen(_) => "show_screen",
            Self::ScreenFocus => "screen_focus",
            Self::KeyDown => "key_down",
            Self::KeyUp => "key_up",
            Self::EndReached => "end_reached",
            Self::Refresh => "refresh",
            Self::SearchMode => "search_mode",
            Self::ExitSearch => "exit_search",
            Self::Char { .. } => "char",
            Self::Backspace { .. } => "backspace",
            Self::ClearSearch => "clear_search",
            Self::SetSearch(_) => "set_search",
            Self::Tick(_) => "tick",
            Self::ToggleTheme => "toggle_theme",
            Self::FormNextField => "form_next_field",
            Self::FormPrevField => "form_prev_field",
            Self::FormSubmit => "form_submit",
            Self::FormToggleMode => "form_toggle_mode",
            Self::Logout => "logout",
            Self::Quit => "quit",
            Self::WorkerResponse(_) => "worker_response",
        }
    }
}

/// Processes an event, mutates application state, and returns actions to execute.
///
/// Returns `(should_render, actions)`. While the controller is unmounted
/// every event except [`Event::Mount`] and [`Event::Quit`] is ignored.
///
/// # Errors
///
/// Reserved for state transitions that cannot be applied; none of the
/// current transitions fail.
#[allow(clippy::too_many_lines)]
pub fn handle_event(state: &mut AppState, event: &Event) -> Result<(bool, Vec<Action>)> {
    let _span = tracing::debug_span!("handle_event", event_type = event.name()).entered();

    if !state.mounted && !matches!(event, Event::Mount | Event::Quit) {
        tracing::trace!("controller unmounted, ignoring event");
        return Ok((false, vec![]));
    }

    match event {
        Event::Mount => {
            let theme = state.theme.clone();
            let custom_theme = state.custom_theme;
            let generation = state.guard.generation;
            *state = AppState::new(theme, state.theme_mode, state.debouncer.quiet_period());
            state.custom_theme = custom_theme;
            // Generations keep increasing across remounts so pre-unmount completions stay stale.
            state.guard.generation = generation;
            state.guard.invalidate();
            state.mounted = true;
            state.phase = Phase::AuthChecking;
            Ok((true, vec![state.handle_auth(), Action::PostToWorker(WorkerMessage::LoadThemePreference)]))
        }
        Event::Unmount => {
            tracing::debug!("controller unmounted");
            state.mounted = false;
            state.phase = Phase::Uninitialized;
            Ok((false, vec![]))
        }
        Event::ShowScreen(screen) => {
            if state.screen == *screen {
                return Ok((false, vec![]));
            }
            let previous = std::mem::replace(&mut state.screen, *screen);
            state.input_mode = InputMode::Normal;
            let actions = if *screen == Screen::Explore && previous != Screen::Explore {
                state.on_screen_focus()
            } else {
                vec![]
            };
            Ok((true, actions))
        }
        Event::ScreenFocus => Ok((true, state.on_screen_focus())),
        Event::KeyDown => {
            let actions = state.move_selection_down().into_iter().collect();
            Ok((true, actions))
        }
        Event::KeyUp => {
            state.move_selection_up();
            Ok((true, vec![]))
        }
        Event::EndReached => {
            let actions: Vec<Action> = state.on_end_reached().into_iter().collect();
            Ok((!actions.is_empty(), actions))
        }
        Event::Refresh => Ok((true, state.on_refresh())),
        Event::SearchMode => {
            if state.screen != Screen::Explore || state.form_visible() {
                return Ok((false, vec![]));
            }
            state.input_mode = InputMode::Search;
            Ok((true, vec![]))
        }
        Event::ExitSearch => {
            state.input_mode = InputMode::Normal;
            Ok((true, vec![]))
        }
        Event::Char { c, at } => match state.active_input() {
            InputMode::Search => {
                state.debouncer.push(*c, *at);
                tracing::trace!(query = %state.debouncer.echo(), "search input updated");
                Ok((true, vec![]))
            }
            InputMode::Form => {
                state.auth_form.insert_char(*c);
                Ok((true, vec![]))
            }
            InputMode::Normal => Ok((false, vec![])),
        },
        Event::Backspace { at } => match state.active_input() {
            InputMode::Search => {
                state.debouncer.pop(*at);
                Ok((true, vec![]))
            }
            InputMode::Form => {
                state.auth_form.backspace();
                Ok((true, vec![]))
            }
            InputMode::Normal => Ok((false, vec![])),
        },
        Event::ClearSearch => {
            let actions = match state.debouncer.clear() {
                Some(term) => state.on_search_term_committed(term).into_iter().collect(),
                None => vec![],
            };
            Ok((true, actions))
        }
        Event::SetSearch(term) => {
            if term == state.debouncer.committed() {
                state.debouncer.sync_external(term);
                return Ok((true, vec![]));
            }
            state.debouncer.sync_external(term);
            Ok((true, state.on_search_term_committed(term.clone()).into_iter().collect()))
        }
        Event::Tick(now) => match state.debouncer.poll(*now) {
            Some(term) => Ok((true, state.on_search_term_committed(term).into_iter().collect())),
            None => Ok((false, vec![])),
        },
        Event::ToggleTheme => {
            let mode = state.theme_mode.toggle();
            tracing::debug!(mode = mode.as_str(), "toggling theme");
            state.set_theme_mode(mode);
            Ok((true, vec![Action::PostToWorker(WorkerMessage::SaveThemePreference { mode })]))
        }
        Event::FormNextField | Event::FormPrevField => {
            if !state.form_visible() {
                return Ok((false, vec![]));
            }
            state.auth_form.cycle_focus(matches!(event, Event::FormNextField));
            Ok((true, vec![]))
        }
        Event::FormToggleMode => {
            if !state.form_visible() {
                return Ok((false, vec![]));
            }
            state.auth_form.toggle_mode();
            Ok((true, vec![]))
        }
        Event::FormSubmit => {
            if !state.form_visible() {
                return Ok((false, vec![]));
            }
            let actions = match state.auth_form.submit() {
                Some(Submission::Login(data)) => vec![Action::PostToWorker(WorkerMessage::Login(data))],
                Some(Submission::Register(data)) => vec![Action::PostToWorker(WorkerMessage::Register(data))],
                None => vec![],
            };
            Ok((true, actions))
        }
        Event::Logout => {
            if !state.gate.signed_in() {
                return Ok((false, vec![]));
            }
            Ok((false, vec![Action::PostToWorker(WorkerMessage::Logout)]))
        }
        Event::Quit => Ok((false, vec![Action::Quit])),
        Event::WorkerResponse(response) => handle_worker_response(state, response),
    }
}

fn handle_worker_response(state: &mut AppState, response: &WorkerResponse) -> Result<(bool, Vec<Action>)> {
    match response {
        WorkerResponse::AuthProbed { user } => {
            tracing::debug!(signed_in = user.is_some(), "auth probe completed");
            Ok((true, state.on_auth_probed(user.clone())))
        }
        WorkerResponse::PageLoaded { generation, reset, page } => {
            let applied = state.on_page_loaded(*generation, *reset, page.clone());
            if applied {
                tracing::debug!(
                    page = state.list.current_page,
                    total_pages = state.list.total_pages,
                    items = state.list.items.len(),
                    "page applied"
                );
            }
            Ok((applied, vec![]))
        }
        WorkerResponse::PageFailed { generation, page, message, .. } => {
            Ok((state.on_page_failed(*generation, *page, message), vec![]))
        }
        WorkerResponse::LoggedIn { user } => {
            tracing::info!(email = %user.email, "signed in");
            state.auth_form.succeed();
            state.phase = Phase::AuthChecking;
            Ok((true, vec![state.handle_auth()]))
        }
        WorkerResponse::AuthFailed { message } => {
            tracing::debug!(has_message = message.is_some(), "authentication failed");
            state.auth_form.fail(message.clone());
            Ok((true, vec![]))
        }
        WorkerResponse::LoggedOut => {
            tracing::info!("signed out");
            state.reset_session_state();
            state.auth_form = AuthFormState::new();
            Ok((true, vec![]))
        }
        WorkerResponse::ThemeLoaded { mode } => match mode {
            Some(mode) if !state.custom_theme && *mode != state.theme_mode => {
                state.set_theme_mode(*mode);
                Ok((true, vec![]))
            }
            _ => Ok((false, vec![])),
        },
        WorkerResponse::ThemeSaved => Ok((false, vec![])),
        WorkerResponse::Error { message } => {
            tracing::error!("Worker error: {}", message);
            Ok((true, vec![]))
        }
    }
}
