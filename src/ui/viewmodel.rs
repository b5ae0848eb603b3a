//! View model types representing renderable UI state.
//!
//! View models are immutable snapshots computed from application state. They
//! carry display-ready strings (rating labels, masked passwords, overlay
//! notices) and pre-computed highlight ranges, and contain no business logic.
//!
//! # Architecture
//!
//! View models are created via `AppState::compute_viewmodel()` and consumed by
//! the renderer. The [`Body`] enum selects which screen layout is drawn
//! between the header and the footer.
//!
//! # Example
//!
//! ```rust
//! use dinedeck::ui::viewmodel::{Body, FooterInfo, HeaderInfo, HomeView, UIViewModel};
//!
//! let vm = UIViewModel {
//!     header: HeaderInfo {
//!         title: " DineDeck · Home ".to_string(),
//!         subtitle: String::new(),
//!     },
//!     body: Body::Home(HomeView {
//!         title: "Home Screen".to_string(),
//!         message: "Welcome to the app!".to_string(),
//!     }),
//!     footer: FooterInfo {
//!         keybindings: "q: quit".to_string(),
//!     },
//! };
//! assert!(matches!(vm.body, Body::Home(_)));
//! ```

/// Complete UI view model for rendering.
#[derive(Debug, Clone, PartialEq)]
pub struct UIViewModel {
    pub header: HeaderInfo,
    pub body: Body,
    pub footer: FooterInfo,
}

/// Screen content between header and footer.
#[derive(Debug, Clone, PartialEq)]
pub enum Body {
    /// Centered spinner text while auth or the first page resolves.
    Loading { message: String },
    Explore(ExploreView),
    AuthForm(AuthFormView),
    Profile(ProfileView),
    Home(HomeView),
}

/// Header display information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderInfo {
    /// Title text, centered.
    pub title: String,
    /// Right-aligned greeting; empty when nobody is signed in.
    pub subtitle: String,
}

/// Footer display information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FooterInfo {
    /// Keybinding help text (e.g., "j/k: navigate  /: search").
    pub keybindings: String,
}

/// The Explore list screen.
#[derive(Debug, Clone, PartialEq)]
pub struct ExploreView {
    pub search_bar: SearchBarInfo,

    /// Cards in the visible window.
    pub cards: Vec<CardItem>,

    /// Selection index relative to `cards`.
    pub selected_index: usize,

    /// Shown instead of cards when the list is empty.
    pub empty_state: Option<EmptyState>,

    /// A refresh is outstanding.
    pub refreshing: bool,

    /// A next-page fetch is outstanding; drives the footer indicator.
    pub loading_more: bool,

    /// `"selected/total"` when the list is not empty.
    pub position: Option<String>,
}

/// Display information for one restaurant card.
///
/// A card renders as three lines: name and price, address, then either the
/// rating or the closed notice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardItem {
    /// Name, already truncated to fit.
    pub name: String,

    /// Address up to the first comma.
    pub address: String,

    /// `"4.3 (120)"`; `None` when unrated or closed.
    pub rating: Option<String>,

    /// `"$$"`; empty when unknown.
    pub price: String,

    /// Overlay text for cards shown as closed.
    pub closed_notice: Option<String>,

    pub is_selected: bool,

    /// Character ranges of `name` to highlight for the committed search.
    ///
    /// Each tuple is `(start_index, end_index)` in UTF-8 character indices.
    pub highlight_ranges: Vec<(usize, usize)>,
}

/// Empty state message display information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmptyState {
    /// Primary message (e.g., "No restaurants found").
    pub message: String,

    /// Secondary hint.
    pub subtitle: String,
}

/// Search bar display information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchBarInfo {
    /// Immediate echo of the typed text.
    pub query: String,
    /// Shown when `query` is empty.
    pub placeholder: String,
    /// The bar has keyboard focus.
    pub focused: bool,
}

/// Login / register form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthFormView {
    pub title: String,
    /// Submission error banner.
    pub error: Option<String>,
    pub fields: Vec<FormFieldView>,
    pub submit_label: String,
    pub toggle_hint: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormFieldView {
    pub label: String,
    /// Display value; passwords arrive masked.
    pub value: String,
    pub error: Option<String>,
    pub focused: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileView {
    pub greeting: String,
    pub logout_hint: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HomeView {
    pub title: String,
    pub message: String,
}
