//! Lifecycle, screen and input mode types.
//!
//! These enums drive which view is rendered and how keystrokes are routed.
//!
//! # State Machine
//!
//! The Explore controller moves through:
//!
//! ```text
//! Uninitialized → AuthChecking → InitialLoading → Ready
//!                      │
//!                      └→ SignedOut → (login) → AuthChecking
//! ```
//!
//! Refreshing and loading-more are transient flags on top of `Ready`, not
//! phases of their own.

/// Controller lifecycle phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    /// Not mounted yet, or torn down.
    #[default]
    Uninitialized,
    /// Waiting for the auth probe.
    AuthChecking,
    /// Signed in, first page requested but not yet resolved.
    InitialLoading,
    /// First page resolved (successfully or not).
    Ready,
    /// Probe found no user; the authentication form is shown.
    SignedOut,
}

/// Top-level screen selected by the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Screen {
    Home,
    #[default]
    Explore,
    Profile,
}

impl Screen {
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Home => "Home",
            Self::Explore => "Explore",
            Self::Profile => "Profile",
        }
    }
}

/// How keystrokes are interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    /// Navigation and commands.
    #[default]
    Normal,
    /// Typing into the search bar.
    Search,
    /// Typing into the login / register form.
    Form,
}

/// What triggered a page fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOrigin {
    /// First load after the auth probe found a user.
    Initial,
    /// Selection reached the end of the list.
    EndReached,
    /// Explicit refresh.
    Refresh,
    /// A committed search term.
    Search,
    /// Returning to the Explore screen.
    Focus,
    /// A different user signed in.
    SignIn,
}

impl FetchOrigin {
    /// Whether a fetch from this origin proceeds while another is in flight.
    #[must_use]
    pub const fn may_interrupt(self) -> bool {
        matches!(self, Self::Refresh | Self::Search | Self::SignIn)
    }
}
