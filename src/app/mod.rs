//! Application layer coordinating state, events, and actions.
//!
//! This module sits between the terminal runtime (main.rs) and the
//! domain/gateway/worker layers. It implements the event-driven
//! architecture that powers the interactive UI.
//!
//! # Architecture
//!
//! The application layer follows a unidirectional data flow pattern:
//!
//! ```text
//! User Input → Events → Event Handler → State Mutations → Actions → Side Effects
//!                           ↑                                  ↓
//!                           └──────── Worker Responses ────────┘
//! ```
//!
//! # Modules
//!
//! - [`actions`]: Side effect commands emitted by the event handler
//! - [`debounce`]: Search input debouncing
//! - [`handler`]: Event processing logic and state transition coordinator
//! - [`modes`]: Lifecycle, screen and input mode types
//! - [`state`]: Central application state, load controller and view model computation

pub mod actions;
pub mod debounce;
pub mod handler;
pub mod modes;
pub mod state;

pub use actions::Action;
pub use debounce::SearchDebouncer;
pub use handler::{handle_event, Event};
pub use modes::{FetchOrigin, InputMode, Phase, Screen};
pub use state::AppState;
