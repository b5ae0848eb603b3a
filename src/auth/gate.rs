//! Auth gate: the controller's view of who is signed in.

use crate::domain::User;

/// Current user identity plus probe flags.
///
/// `auth_loading` is true between [`begin_check`](Self::begin_check) and
/// [`complete`](Self::complete). Data may only be fetched once a probe has
/// resolved with a user; a later re-probe does not block fetching.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthGate {
    pub user: Option<User>,
    pub auth_checked: bool,
    pub auth_loading: bool,
}

impl AuthGate {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin_check(&mut self) {
        self.auth_loading = true;
    }

    /// Records the probe result and returns the previous user.
    pub fn complete(&mut self, user: Option<User>) -> Option<User> {
        self.auth_checked = true;
        self.auth_loading = false;
        std::mem::replace(&mut self.user, user)
    }

    #[must_use]
    pub const fn ready(&self) -> bool {
        self.auth_checked && !self.auth_loading
    }

    /// True once any probe has completed and a user is present.
    #[must_use]
    pub const fn has_resolved_user(&self) -> bool {
        self.auth_checked && self.user.is_some()
    }

    #[must_use]
    pub const fn signed_in(&self) -> bool {
        self.user.is_some()
    }

    pub fn sign_out(&mut self) {
        self.user = None;
        self.auth_checked = true;
        self.auth_loading = false;
    }
}
