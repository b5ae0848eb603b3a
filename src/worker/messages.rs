//! Worker message types.
//!
//! This module defines the request and response protocol between the event
//! loop and the background tasks that run gateway and storage operations.
//! Fetch requests carry the controller's generation so completions can be
//! matched to the request that produced them.

use crate::domain::{LoginData, RegisterData, RestaurantPage, User};
use crate::ui::theme::ThemeMode;

/// Messages sent from the controller to the worker.
#[derive(Debug, Clone, PartialEq)]
pub enum WorkerMessage {
    /// Check whether a session exists and load the cached user.
    ProbeAuth,

    /// Fetch one page of restaurants.
    FetchPage {
        page: u32,
        search: String,
        /// Controller generation at the time of the request.
        generation: u64,
        /// Whether the result replaces the list instead of extending it.
        reset: bool,
    },

    Login(LoginData),

    Register(RegisterData),

    /// Clear every session key.
    Logout,

    LoadThemePreference,

    SaveThemePreference {
        mode: ThemeMode,
    },
}

impl WorkerMessage {
    /// Variant name for logging. Never includes credentials.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::ProbeAuth => "probe_auth",
            Self::FetchPage { .. } => "fetch_page",
            Self::Login(_) => "login",
            Self::Register(_) => "register",
            Self::Logout => "logout",
            Self::LoadThemePreference => "load_theme_preference",
            Self::SaveThemePreference { .. } => "save_theme_preference",
        }
    }
}

/// Responses sent from the worker back to the controller.
#[derive(Debug, Clone, PartialEq)]
pub enum WorkerResponse {
    /// Result of [`WorkerMessage::ProbeAuth`]. Probe failures report `None`.
    AuthProbed {
        user: Option<User>,
    },

    PageLoaded {
        generation: u64,
        reset: bool,
        page: RestaurantPage,
    },

    PageFailed {
        generation: u64,
        reset: bool,
        /// Page number that was requested.
        page: u32,
        message: String,
    },

    /// Login or registration succeeded and the session was saved.
    LoggedIn {
        user: User,
    },

    /// Login or registration failed.
    AuthFailed {
        /// Server-provided message, if the response carried one.
        message: Option<String>,
    },

    LoggedOut,

    ThemeLoaded {
        /// `None` when nothing has been saved yet.
        mode: Option<ThemeMode>,
    },

    ThemeSaved,

    /// A worker operation failed with nothing more specific to report.
    Error {
        message: String,
    },
}
