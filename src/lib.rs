//! DineDeck: a terminal client for restaurant discovery.
//!
//! DineDeck provides:
//! - A paginated, infinitely scrolling restaurant list backed by a REST API
//! - Debounced search that resets pagination on every committed term
//! - Login, registration and transparent re-login when a token expires
//! - Light and dark themes with a persisted preference
//! - Persistent session state backed by JSON file storage

#![allow(clippy::multiple_crate_versions)]

//!
//! # Architecture
//!
//! The crate follows a layered architecture pattern:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Terminal runtime (main.rs)                         │  ← Entry point
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │  ← State machine
//! │  - Event handling, search debounce                  │
//! │  - Load controller (pagination, stale guard)        │
//! │  - View model computation                           │
//! └─────────────────────────────────────────────────────┘
//!         │                    │                    │
//! ┌───────────────┐   ┌───────────────┐   ┌───────────────┐
//! │ UI Layer      │   │ Worker Layer  │   │ Auth          │
//! │ (ui/)         │   │ (worker/)     │   │ (auth/)       │
//! │ - Rendering   │   │ - Async tasks │   │ - Session     │
//! │ - Theming     │   │ - Responses   │   │ - Gate, form  │
//! └───────────────┘   └───────────────┘   └───────────────┘
//!                              │
//! ┌─────────────────────────────────────────────────────┐
//! │  Gateway (gateway/) and Storage (storage/)          │
//! │  - HTTP transport with bearer auth and 401 retry    │
//! │  - Key/value stores (JSON file, memory)             │
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Domain, Infrastructure, Observability              │
//! │  - Restaurant/User models, error types              │
//! │  - Data directory paths                             │
//! │  - Rotating log file                                │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`app`]: Application state machine with event/action model
//! - [`auth`]: Session store, auth gate and login/register form
//! - [`domain`]: Core domain types (Restaurant, User, errors)
//! - [`gateway`]: REST gateway and HTTP transport
//! - [`infrastructure`]: Platform-specific utilities (paths)
//! - [`storage`]: Key/value persistence
//! - [`worker`]: Background tasks for gateway and storage calls
//! - [`ui`]: Terminal rendering with theme support
//! - [`observability`]: File-based tracing
//!
//! # Configuration
//!
//! Values are layered: defaults, then an optional TOML file, then
//! `DINEDECK_*` environment variables, then command-line flags.
//!
//! ```toml
//! # ~/.config/dinedeck/config.toml
//! api_base_url = "https://api.example.com/api"
//! search_debounce_ms = 400
//! request_timeout_secs = 10
//! theme = "dark"
//! trace_level = "debug"
//! ```
//!
//! # Data Flow
//!
//! 1. `Event::Mount` posts `ProbeAuth` and `LoadThemePreference` to the worker.
//! 2. The worker answers with `AuthProbed`; with a user present the controller
//!    requests page 1.
//! 3. `PageLoaded` replaces or extends the list; stale generations are dropped.
//! 4. Each state change re-renders from a freshly computed view model.

pub mod app;
pub mod auth;
pub mod domain;
pub mod gateway;
pub mod infrastructure;
pub mod observability;
pub mod storage;
pub mod ui;
pub mod worker;

pub use app::{handle_event, Action, AppState, Event, InputMode, Phase, Screen};
pub use domain::{DineError, Restaurant, RestaurantPage, Result, User};
pub use ui::{Theme, ThemeMode};

use auth::Session;
use gateway::{HttpGateway, HttpTransport, ReqwestExecutor};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use storage::{JsonStore, MemoryStore, Preferences};
use worker::ExploreWorker;

/// Prefix of environment variables read by [`Config::with_env`].
pub const ENV_PREFIX: &str = "DINEDECK_";

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:3000/api";
pub const DEFAULT_SEARCH_DEBOUNCE_MS: u64 = 500;
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 15;

/// Runtime configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Base URL every API path is appended to.
    pub api_base_url: String,

    /// Search quiet period in milliseconds. Clamped to 300..=500.
    pub search_debounce_ms: u64,

    /// HTTP request timeout.
    pub request_timeout_secs: u64,

    /// Built-in theme used until a saved preference loads.
    ///
    /// Options: `light`, `dark`. Ignored if `theme_file` is set.
    #[serde(alias = "theme")]
    pub theme_name: Option<String>,

    /// Path to a custom TOML theme file.
    ///
    /// Takes precedence over `theme_name` and over the saved preference until
    /// the user toggles the theme.
    pub theme_file: Option<String>,

    /// Tracing level. Options: `trace`, `debug`, `info`, `warn`, `error`.
    pub trace_level: Option<String>,

    /// Overrides the directory holding stores and logs.
    pub data_dir: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            search_debounce_ms: DEFAULT_SEARCH_DEBOUNCE_MS,
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            theme_name: None,
            theme_file: None,
            trace_level: None,
            data_dir: None,
        }
    }
}

impl Config {
    /// Reads a TOML configuration file. Missing keys keep their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`DineError::Config`] if the file cannot be read or parsed.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = std::fs::read_to_string(path.as_ref())
            .map_err(|e| DineError::Config(format!("Failed to read config file: {e}")))?;

        toml::from_str(&contents).map_err(|e| DineError::Config(format!("Failed to parse config TOML: {e}")))
    }

    /// Builds a configuration from a string map on top of the defaults.
    ///
    /// # Parsing Rules
    ///
    /// - `api_base_url`: used when non-empty
    /// - `search_debounce_ms`, `request_timeout_secs`: parsed as integers,
    ///   falling back to the current value on parse error
    /// - `theme`, `theme_file`, `trace_level`, `data_dir`: taken as-is when non-empty
    ///
    /// # Example
    ///
    /// ```rust
    /// use std::collections::BTreeMap;
    /// use dinedeck::Config;
    ///
    /// let mut map = BTreeMap::new();
    /// map.insert("search_debounce_ms".to_string(), "350".to_string());
    /// map.insert("request_timeout_secs".to_string(), "soon".to_string());
    ///
    /// let config = Config::from_map(&map);
    /// assert_eq!(config.search_debounce_ms, 350);
    /// assert_eq!(config.request_timeout_secs, 15);
    /// ```
    #[must_use]
    pub fn from_map(map: &BTreeMap<String, String>) -> Self {
        Self::default().with_overrides(map)
    }

    /// Applies the keys present in `map` over `self`.
    #[must_use]
    pub fn with_overrides(mut self, map: &BTreeMap<String, String>) -> Self {
        let non_empty = |key: &str| map.get(key).map(|v| v.trim()).filter(|v| !v.is_empty());

        if let Some(url) = non_empty("api_base_url") {
            self.api_base_url = url.to_string();
        }
        if let Some(ms) = non_empty("search_debounce_ms").and_then(|s| s.parse::<u64>().ok()) {
            self.search_debounce_ms = ms;
        }
        if let Some(secs) = non_empty("request_timeout_secs").and_then(|s| s.parse::<u64>().ok()) {
            self.request_timeout_secs = secs;
        }
        if let Some(theme) = non_empty("theme").or_else(|| non_empty("theme_name")) {
            self.theme_name = Some(theme.to_string());
        }
        if let Some(file) = non_empty("theme_file") {
            self.theme_file = Some(file.to_string());
        }
        if let Some(level) = non_empty("trace_level") {
            self.trace_level = Some(level.to_string());
        }
        if let Some(dir) = non_empty("data_dir") {
            self.data_dir = Some(PathBuf::from(dir));
        }
        self
    }

    /// Collects `DINEDECK_*` variables into a map keyed by the lowercased suffix.
    #[must_use]
    pub fn env_map<I>(vars: I) -> BTreeMap<String, String>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        vars.into_iter()
            .filter_map(|(key, value)| {
                key.strip_prefix(ENV_PREFIX)
                    .map(|suffix| (suffix.to_ascii_lowercase(), value))
            })
            .collect()
    }

    /// Applies `DINEDECK_*` environment variables over `self`.
    #[must_use]
    pub fn with_env(self) -> Self {
        self.with_overrides(&Self::env_map(std::env::vars()))
    }

    #[must_use]
    pub const fn quiet_period(&self) -> Duration {
        Duration::from_millis(self.search_debounce_ms)
    }

    #[must_use]
    pub const fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Resolved data directory.
    #[must_use]
    pub fn data_dir(&self) -> PathBuf {
        infrastructure::get_data_dir(self.data_dir.as_deref())
    }
}

/// Resolves the starting theme.
///
/// A theme file wins, then a built-in name, then light. Returns the theme,
/// the mode it corresponds to, and whether it came from a file.
pub fn resolve_theme(config: &Config) -> (Theme, ThemeMode, bool) {
    if let Some(theme_file) = &config.theme_file {
        match Theme::from_file(infrastructure::expand_tilde(theme_file)) {
            Ok(theme) => {
                let mode = ThemeMode::parse(&theme.name).unwrap_or_default();
                return (theme, mode, true);
            }
            Err(e) => {
                tracing::warn!(theme_file = %theme_file, error = %e, "failed to load theme from file, using default");
            }
        }
    }

    let mode = config.theme_name.as_deref().map_or_else(ThemeMode::default, |name| {
        ThemeMode::parse(name).unwrap_or_else(|| {
            tracing::warn!(theme_name = %name, "unknown theme, using default");
            ThemeMode::default()
        })
    });
    (Theme::for_mode(mode), mode, false)
}

/// Creates the initial, unmounted application state.
///
/// # Example
///
/// ```rust
/// use dinedeck::{initialize, Config, ThemeMode};
///
/// let config = Config {
///     theme_name: Some("dark".to_string()),
///     ..Default::default()
/// };
/// let state = initialize(&config);
/// assert_eq!(state.theme_mode, ThemeMode::Dark);
/// ```
pub fn initialize(config: &Config) -> AppState {
    tracing::debug!("initializing dinedeck");

    let (theme, mode, custom_theme) = resolve_theme(config);
    let mut state = AppState::new(theme, mode, config.quiet_period());
    state.custom_theme = custom_theme;
    state
}

/// Wires stores, transport and gateways into a worker.
///
/// With `ephemeral` the session lives in memory only; preferences are
/// always persisted.
///
/// # Errors
///
/// Fails if a store file cannot be opened or the HTTP client cannot be built.
pub fn build_worker(config: &Config, ephemeral: bool) -> Result<ExploreWorker> {
    let data_dir = config.data_dir();

    let session = if ephemeral {
        Session::new(MemoryStore::new())
    } else {
        Session::new(JsonStore::new(data_dir.join("session.json"))?)
    };
    let preferences = Preferences::new(JsonStore::new(data_dir.join("preferences.json"))?);

    let executor = Arc::new(ReqwestExecutor::new(config.request_timeout())?);
    let transport = HttpTransport::new(config.api_base_url.clone(), session.clone(), executor);
    let gateway = Arc::new(HttpGateway::new(transport));

    tracing::info!(
        api_base_url = %config.api_base_url,
        data_dir = %data_dir.display(),
        ephemeral,
        "worker ready"
    );

    Ok(ExploreWorker::new(gateway.clone(), gateway, session, preferences))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn defaults() {
        let config = Config::default();
        assert_eq!(config.api_base_url, "http://localhost:3000/api");
        assert_eq!(config.quiet_period(), Duration::from_millis(500));
        assert_eq!(config.request_timeout(), Duration::from_secs(15));
    }

    #[test]
    fn toml_file_overrides_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "api_base_url = \"https://api.test/api\"\ntheme = \"dark\"\n").unwrap();

        let config = Config::from_file(&path).unwrap();
        assert_eq!(config.api_base_url, "https://api.test/api");
        assert_eq!(config.theme_name.as_deref(), Some("dark"));
        assert_eq!(config.search_debounce_ms, DEFAULT_SEARCH_DEBOUNCE_MS);
    }

    #[test]
    fn malformed_toml_is_config_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "search_debounce_ms = \"fast\"").unwrap();
        assert!(matches!(Config::from_file(&path), Err(DineError::Config(_))));
    }

    #[test]
    fn env_vars_are_prefixed_and_lowercased() {
        let vars = vec![
            ("DINEDECK_API_BASE_URL".to_string(), "http://x/api".to_string()),
            ("DINEDECK_TRACE_LEVEL".to_string(), "debug".to_string()),
            ("HOME".to_string(), "/root".to_string()),
        ];
        let map = Config::env_map(vars);
        assert_eq!(map.len(), 2);

        let config = Config::default().with_overrides(&map);
        assert_eq!(config.api_base_url, "http://x/api");
        assert_eq!(config.trace_level.as_deref(), Some("debug"));
    }

    #[test]
    fn theme_file_marks_custom_theme() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("mine.toml");
        let mut theme = Theme::for_mode(ThemeMode::Dark);
        theme.name = "midnight".to_string();
        std::fs::write(&path, toml::to_string(&theme).unwrap()).unwrap();

        let config = Config {
            theme_file: Some(path.to_string_lossy().into_owned()),
            ..Config::default()
        };
        let state = initialize(&config);
        assert!(state.custom_theme);
        assert_eq!(state.theme.name, "midnight");
    }

    #[test]
    fn unknown_theme_name_falls_back_to_light() {
        let config = Config {
            theme_name: Some("sepia".to_string()),
            ..Config::default()
        };
        let (theme, mode, custom) = resolve_theme(&config);
        assert_eq!(mode, ThemeMode::Light);
        assert_eq!(theme.name, "light");
        assert!(!custom);
    }
}
