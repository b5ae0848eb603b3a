//! User interface rendering layer with component-based architecture.
//!
//! This module transforms view models into ANSI-styled terminal output through
//! composable rendering components, with light/dark theme support and fuzzy
//! match highlighting.
//!
//! # Architecture
//!
//! ```text
//! AppState → compute_viewmodel → UIViewModel → render → ANSI Output
//! ```
//!
//! # Modules
//!
//! - [`viewmodel`]: View model types representing renderable UI state
//! - [`renderer`]: Top-level rendering coordinator
//! - [`components`]: Composable UI component renderers
//! - [`helpers`]: Shared rendering utilities (highlighting, centering)
//! - [`theme`]: Colour tokens, theme modes and ANSI escape sequence generation

pub mod components;
pub mod helpers;
pub mod renderer;
pub mod theme;
pub mod viewmodel;

pub use renderer::render;
pub use theme::{Theme, ThemeMode};
pub use viewmodel::{Body, CardItem, EmptyState, ExploreView, FooterInfo, HeaderInfo, SearchBarInfo, UIViewModel};
