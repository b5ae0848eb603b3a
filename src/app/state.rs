//! Application state and the Explore load controller.
//!
//! [`AppState`] is the single source of truth for everything the UI shows. It
//! owns the fetched restaurant list, the auth gate, the search debouncer and
//! the re-entrancy guard, and decides when a page fetch is issued.
//!
//! # Fetch rules
//!
//! - At most one fetch is logically in flight. A new request while one is
//!   outstanding is dropped unless it comes from a search commit, a refresh or
//!   a sign-in.
//! - Every reset fetch bumps the generation. A completion whose generation is
//!   not current is discarded and does not clear the in-flight slot.
//! - Nothing is fetched until the auth gate has resolved with a user.
//! - Failures keep the last good list.
//!
//! # View Model Computation
//!
//! `compute_viewmodel` turns a state snapshot into a
//! [`UIViewModel`](crate::ui::viewmodel::UIViewModel), windowing the card list
//! around the selection and computing fuzzy highlight ranges for the
//! committed search term.

use super::debounce::SearchDebouncer;
use super::modes::{FetchOrigin, InputMode, Phase, Screen};
use crate::app::Action;
use crate::auth::{AuthFormState, AuthGate, FormField};
use crate::domain::{Restaurant, RestaurantPage, User};
use crate::ui::theme::{Theme, ThemeMode};
use crate::ui::viewmodel::{
    AuthFormView, Body, CardItem, EmptyState, ExploreView, FooterInfo, FormFieldView, HeaderInfo,
    HomeView, ProfileView, SearchBarInfo, UIViewModel,
};
use crate::worker::WorkerMessage;
use fuzzy_matcher::skim::SkimMatcherV2;
use std::time::Duration;

/// Moving the selection within this many cards of the end requests the next page.
pub const LOAD_MORE_THRESHOLD: usize = 3;

/// Rows taken by one card, including its spacer line.
const CARD_HEIGHT: usize = 4;

/// Rows used by header, search bar, borders and footer on the Explore screen.
const EXPLORE_CHROME_ROWS: usize = 11;

/// Fetched items plus paging position.
#[derive(Debug, Clone, PartialEq)]
pub struct ListState {
    /// Concatenation of every page fetched since the last reset.
    pub items: Vec<Restaurant>,
    /// Last successfully loaded page.
    pub current_page: u32,
    /// From the most recent response.
    pub total_pages: u32,
    /// Last committed search term; empty means unfiltered.
    pub search_term: String,
}

impl Default for ListState {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            current_page: 1,
            total_pages: 0,
            search_term: String::new(),
        }
    }
}

impl ListState {
    /// Replaces (`reset`) or extends the list with a loaded page.
    pub fn merge(&mut self, page: RestaurantPage, reset: bool) {
        self.current_page = page.current_page.max(1);
        self.total_pages = page.total_pages;
        if reset {
            self.items = page.restaurants;
        } else {
            self.items.extend(page.restaurants);
        }
    }

    #[must_use]
    pub const fn has_more(&self) -> bool {
        self.current_page < self.total_pages
    }

    /// Empties the list and keeps the search term.
    pub fn clear(&mut self) {
        self.items.clear();
        self.current_page = 1;
        self.total_pages = 0;
    }
}

/// The outstanding fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InFlight {
    pub generation: u64,
    pub page: u32,
    pub reset: bool,
}

/// Re-entrancy guard: one in-flight slot and a generation counter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OperationGuard {
    pub in_flight: Option<InFlight>,
    pub generation: u64,
}

impl OperationGuard {
    #[must_use]
    pub const fn is_busy(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Claims the slot and returns the generation to tag the request with.
    pub fn begin(&mut self, page: u32, reset: bool) -> u64 {
        if reset {
            self.invalidate();
        }
        self.in_flight = Some(InFlight {
            generation: self.generation,
            page,
            reset,
        });
        self.generation
    }

    /// Makes every earlier request stale and frees the slot.
    pub fn invalidate(&mut self) {
        self.generation = self.generation.wrapping_add(1);
        self.in_flight = None;
    }

    /// Releases the slot if `generation` is the outstanding one.
    ///
    /// Returns `false` for stale completions, which must be ignored.
    pub fn finish(&mut self, generation: u64) -> bool {
        match self.in_flight {
            Some(flight) if flight.generation == generation => {
                self.in_flight = None;
                true
            }
            _ => false,
        }
    }
}

/// Central application state container.
#[derive(Debug, Clone)]
pub struct AppState {
    pub phase: Phase,
    pub screen: Screen,
    pub input_mode: InputMode,

    /// False before mount and after unmount; completions are then discarded.
    pub mounted: bool,

    pub list: ListState,
    pub guard: OperationGuard,
    pub gate: AuthGate,
    pub debouncer: SearchDebouncer,
    pub auth_form: AuthFormState,

    /// The first page has resolved for the current user.
    pub initial_load_done: bool,
    /// A refresh is outstanding.
    pub refreshing: bool,

    /// Zero-based index into `list.items`.
    pub selected_index: usize,

    pub theme: Theme,
    pub theme_mode: ThemeMode,
    /// A theme loaded from a file; saved light/dark preferences do not replace it.
    pub custom_theme: bool,
}

impl AppState {
    /// Creates an unmounted state.
    ///
    /// # Example
    ///
    /// ```rust
    /// use dinedeck::app::AppState;
    /// use dinedeck::ui::theme::{Theme, ThemeMode};
    /// use std::time::Duration;
    ///
    /// let state = AppState::new(Theme::default(), ThemeMode::Light, Duration::from_millis(500));
    /// assert!(!state.mounted);
    /// assert!(state.list.items.is_empty());
    /// ```
    #[must_use]
    pub fn new(theme: Theme, theme_mode: ThemeMode, quiet_period: Duration) -> Self {
        Self {
            phase: Phase::Uninitialized,
            screen: Screen::Explore,
            input_mode: InputMode::Normal,
            mounted: false,
            list: ListState::default(),
            guard: OperationGuard::default(),
            gate: AuthGate::new(),
            debouncer: SearchDebouncer::new(quiet_period),
            auth_form: AuthFormState::new(),
            initial_load_done: false,
            refreshing: false,
            selected_index: 0,
            theme,
            theme_mode,
            custom_theme: false,
        }
    }

    /// How keystrokes should currently be routed.
    #[must_use]
    pub fn active_input(&self) -> InputMode {
        if self.form_visible() {
            InputMode::Form
        } else {
            self.input_mode
        }
    }

    /// The authentication form replaces Explore and Profile while signed out.
    #[must_use]
    pub fn form_visible(&self) -> bool {
        self.phase == Phase::SignedOut && self.screen != Screen::Home
    }

    #[must_use]
    pub fn is_loading_more(&self) -> bool {
        self.guard.in_flight.is_some_and(|f| !f.reset)
    }

    /// Starts an auth probe.
    pub fn handle_auth(&mut self) -> Action {
        self.gate.begin_check();
        Action::PostToWorker(WorkerMessage::ProbeAuth)
    }

    /// Requests a page unless the guard rejects it.
    pub fn load_page(&mut self, page: u32, search_term: &str, reset: bool, origin: FetchOrigin) -> Option<Action> {
        if !self.mounted {
            return None;
        }
        if self.guard.is_busy() && !origin.may_interrupt() {
            tracing::debug!(page, ?origin, "fetch already in flight, skipping");
            return None;
        }

        let generation = self.guard.begin(page, reset);
        tracing::debug!(page, reset, generation, ?origin, "requesting page");
        Some(Action::PostToWorker(WorkerMessage::FetchPage {
            page,
            search: search_term.to_string(),
            generation,
            reset,
        }))
    }

    fn can_fetch(&self) -> bool {
        self.mounted && self.gate.has_resolved_user()
    }

    /// Fetches the next page when more exist and nothing is in flight.
    pub fn on_end_reached(&mut self) -> Option<Action> {
        if !self.can_fetch() || !self.list.has_more() || self.guard.is_busy() {
            return None;
        }
        let next = self.list.current_page + 1;
        let term = self.list.search_term.clone();
        self.load_page(next, &term, false, FetchOrigin::EndReached)
    }

    /// Re-probes auth and reloads page 1, overriding any in-flight fetch.
    pub fn on_refresh(&mut self) -> Vec<Action> {
        if !self.mounted {
            return vec![];
        }
        let signed_in = self.gate.signed_in();
        let mut actions = vec![self.handle_auth()];
        if signed_in {
            self.refreshing = true;
            let term = self.list.search_term.clone();
            actions.extend(self.load_page(1, &term, true, FetchOrigin::Refresh));
        }
        actions
    }

    /// Stores the term and, when signed in, reloads page 1 for it.
    pub fn on_search_term_committed(&mut self, term: String) -> Option<Action> {
        self.list.search_term = term;
        self.selected_index = 0;
        if !self.can_fetch() {
            return None;
        }
        let term = self.list.search_term.clone();
        self.load_page(1, &term, true, FetchOrigin::Search)
    }

    /// Refreshes when returning to Explore, if the first load is done and idle.
    pub fn on_screen_focus(&mut self) -> Vec<Action> {
        if !self.mounted || !self.initial_load_done || self.guard.is_busy() || !self.gate.signed_in() {
            return vec![];
        }
        let mut actions = vec![self.handle_auth()];
        let term = self.list.search_term.clone();
        actions.extend(self.load_page(1, &term, true, FetchOrigin::Focus));
        actions
    }

    /// Applies an auth probe result.
    pub fn on_auth_probed(&mut self, user: Option<User>) -> Vec<Action> {
        let previous = self.gate.complete(user);
        let Some(current) = self.gate.user.clone() else {
            if previous.is_some() || self.phase != Phase::SignedOut {
                tracing::info!("no signed-in user");
            }
            self.reset_session_state();
            return vec![];
        };

        let user_changed = previous.as_ref().is_some_and(|p| p.email != current.email);
        if self.initial_load_done && !user_changed {
            return vec![];
        }

        let origin = if user_changed {
            FetchOrigin::SignIn
        } else {
            FetchOrigin::Initial
        };

        if user_changed {
            self.list.clear();
            self.selected_index = 0;
        }
        self.initial_load_done = false;
        self.phase = Phase::InitialLoading;
        let term = self.list.search_term.clone();
        self.load_page(1, &term, true, origin).into_iter().collect()
    }

    /// Applies a page completion. Returns whether anything changed.
    pub fn on_page_loaded(&mut self, generation: u64, reset: bool, page: RestaurantPage) -> bool {
        if !self.mounted || !self.guard.finish(generation) {
            tracing::debug!(generation, current = self.guard.generation, "discarding stale page");
            return false;
        }
        self.list.merge(page, reset);
        if reset {
            self.selected_index = 0;
        }
        self.clamp_selection();
        self.settle();
        true
    }

    /// Applies a page failure. The list keeps its last good value.
    pub fn on_page_failed(&mut self, generation: u64, page: u32, message: &str) -> bool {
        if !self.mounted || !self.guard.finish(generation) {
            tracing::debug!(generation, "discarding stale failure");
            return false;
        }
        tracing::error!(page, error = %message, "error loading restaurants");
        self.settle();
        true
    }

    fn settle(&mut self) {
        self.refreshing = false;
        if !self.initial_load_done {
            self.initial_load_done = true;
            self.phase = Phase::Ready;
        }
    }

    /// Drops everything tied to the signed-in user.
    pub fn reset_session_state(&mut self) {
        self.gate.sign_out();
        self.guard.invalidate();
        self.list = ListState::default();
        self.debouncer.sync_external("");
        self.selected_index = 0;
        self.refreshing = false;
        self.initial_load_done = false;
        self.input_mode = InputMode::Normal;
        self.phase = Phase::SignedOut;
    }

    /// Moves the selection down and requests more when near the end.
    pub fn move_selection_down(&mut self) -> Option<Action> {
        if self.list.items.is_empty() {
            return None;
        }
        self.selected_index = (self.selected_index + 1).min(self.list.items.len() - 1);
        if self.selected_index + LOAD_MORE_THRESHOLD >= self.list.items.len() {
            return self.on_end_reached();
        }
        None
    }

    pub fn move_selection_up(&mut self) {
        self.selected_index = self.selected_index.saturating_sub(1);
    }

    fn clamp_selection(&mut self) {
        if self.list.items.is_empty() {
            self.selected_index = 0;
        } else {
            self.selected_index = self.selected_index.min(self.list.items.len() - 1);
        }
    }

    #[must_use]
    pub fn selected_restaurant(&self) -> Option<&Restaurant> {
        self.list.items.get(self.selected_index)
    }

    pub fn set_theme_mode(&mut self, mode: ThemeMode) {
        self.theme_mode = mode;
        self.theme = Theme::for_mode(mode);
        self.custom_theme = false;
    }

    /// Computes a renderable view model for a terminal of `rows` × `cols`.
    #[must_use]
    pub fn compute_viewmodel(&self, rows: usize, cols: usize) -> UIViewModel {
        let body = match self.screen {
            Screen::Home => Body::Home(HomeView {
                title: "Home Screen".to_string(),
                message: "Welcome to the app!".to_string(),
            }),
            _ if matches!(self.phase, Phase::Uninitialized | Phase::AuthChecking) => Body::Loading {
                message: "Checking session...".to_string(),
            },
            _ if self.form_visible() => Body::AuthForm(self.compute_auth_form()),
            Screen::Profile => Body::Profile(self.compute_profile()),
            Screen::Explore if self.phase == Phase::InitialLoading => Body::Loading {
                message: "Loading restaurants...".to_string(),
            },
            Screen::Explore => Body::Explore(self.compute_explore(rows, cols)),
        };

        UIViewModel {
            header: self.compute_header(),
            body,
            footer: self.compute_footer(),
        }
    }

    fn compute_header(&self) -> HeaderInfo {
        let subtitle = match (&self.gate.user, self.screen) {
            (Some(user), Screen::Explore) => user.display_name().to_string(),
            _ => String::new(),
        };
        HeaderInfo {
            title: format!(" DineDeck · {} ", self.screen.title()),
            subtitle,
        }
    }

    fn compute_footer(&self) -> FooterInfo {
        let keybindings = match (self.active_input(), self.screen) {
            (InputMode::Form, _) => "Tab: next field  Enter: submit  Ctrl+t: login/register  Esc: back".to_string(),
            (InputMode::Search, _) => "Esc: done  Ctrl+u: clear  Type to search".to_string(),
            (InputMode::Normal, Screen::Explore) => {
                "j/k: navigate  /: search  r: refresh  t: theme  1/2/3: screens  q: quit".to_string()
            }
            (InputMode::Normal, Screen::Profile) => "l: logout  t: theme  1/2/3: screens  q: quit".to_string(),
            (InputMode::Normal, Screen::Home) => "t: theme  1/2/3: screens  q: quit".to_string(),
        };
        FooterInfo { keybindings }
    }

    fn compute_profile(&self) -> ProfileView {
        let email = self.gate.user.as_ref().map_or("", |u| u.email.as_str());
        ProfileView {
            greeting: format!("Hello, {email}"),
            logout_hint: "Press l to log out".to_string(),
        }
    }

    fn compute_auth_form(&self) -> AuthFormView {
        let form = &self.auth_form;
        let fields = form
            .fields()
            .iter()
            .map(|&field| {
                let raw = form.value(field);
                let value = if field == FormField::Password {
                    "•".repeat(raw.chars().count())
                } else {
                    raw.to_string()
                };
                let error = match field {
                    FormField::Email => form.email_error.clone(),
                    FormField::Password => form.password_error.clone(),
                    _ => None,
                };
                FormFieldView {
                    label: field.label().to_string(),
                    value,
                    error,
                    focused: field == form.focus,
                }
            })
            .collect();

        AuthFormView {
            title: form.mode.title().to_string(),
            error: form.error.clone(),
            fields,
            submit_label: if form.submitting { "...".to_string() } else { form.mode.title().to_string() },
            toggle_hint: form.mode.toggle_hint().to_string(),
        }
    }

    fn compute_explore(&self, rows: usize, cols: usize) -> ExploreView {
        let search_bar = SearchBarInfo {
            query: self.debouncer.echo().to_string(),
            placeholder: "Find your restaurant".to_string(),
            focused: self.input_mode == InputMode::Search,
        };

        let empty_state = if self.list.items.is_empty() {
            Some(EmptyState {
                message: "No restaurants found".to_string(),
                subtitle: if self.list.search_term.is_empty() {
                    "Press r to refresh".to_string()
                } else {
                    "Try a different search".to_string()
                },
            })
        } else {
            None
        };

        let visible_cards = (rows.saturating_sub(EXPLORE_CHROME_ROWS) / CARD_HEIGHT).max(1);
        let total = self.list.items.len();
        let mut start = self.selected_index.saturating_sub(visible_cards / 2);
        let end = (start + visible_cards).min(total);
        if end - start < visible_cards && total >= visible_cards {
            start = end.saturating_sub(visible_cards);
        }

        let matcher = (!self.list.search_term.is_empty()).then(SkimMatcherV2::default);

        let cards = self.list.items[start..end]
            .iter()
            .enumerate()
            .map(|(offset, restaurant)| {
                self.compute_card(restaurant, start + offset, cols, matcher.as_ref())
            })
            .collect();

        ExploreView {
            search_bar,
            cards,
            selected_index: self.selected_index.saturating_sub(start),
            empty_state,
            refreshing: self.refreshing,
            loading_more: self.is_loading_more(),
            position: (total > 0).then(|| format!("{}/{}", self.selected_index + 1, total)),
        }
    }

    fn compute_card(&self, restaurant: &Restaurant, index: usize, cols: usize, matcher: Option<&SkimMatcherV2>) -> CardItem {
        const CARD_MARGIN: usize = 4;

        let max_name = cols.saturating_sub(CARD_MARGIN + 8);
        let name = truncate(&restaurant.name, max_name);

        // Placeholder: every third card after the first renders as closed.
        let is_closed = index % 3 == 0 && index != 0;

        let rating = if is_closed {
            None
        } else {
            restaurant.rating_label().map(|label| {
                format!("{label} ({})", restaurant.user_ratings_total.unwrap_or(0))
            })
        };

        let highlight_ranges = matcher.map_or_else(Vec::new, |m| {
            compute_highlight_ranges(&name, &self.list.search_term, m)
        });

        CardItem {
            name,
            address: truncate(restaurant.short_address(), cols.saturating_sub(CARD_MARGIN)),
            rating,
            price: restaurant.price_label(),
            closed_notice: is_closed.then(|| "Opening at 8 AM".to_string()),
            is_selected: index == self.selected_index,
            highlight_ranges,
        }
    }
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let kept: String = text.chars().take(max_chars.saturating_sub(3)).collect();
    format!("{kept}...")
}

/// Character ranges of `text` matched by `query`, coalesced into runs.
///
/// Ranges are `(start, end)` with exclusive end, in character indices.
#[must_use]
pub fn compute_highlight_ranges(text: &str, query: &str, matcher: &SkimMatcherV2) -> Vec<(usize, usize)> {
    use fuzzy_matcher::FuzzyMatcher;

    let Some((_score, indices)) = matcher.fuzzy_indices(text, query) else {
        return vec![];
    };

    let mut ranges: Vec<(usize, usize)> = Vec::new();
    for idx in indices {
        match ranges.last_mut() {
            Some((_, end)) if *end == idx => *end = idx + 1,
            _ => ranges.push((idx, idx + 1)),
        }
    }
    ranges
}

#[cfg(test)]
mod tests {
    use super::*;

    fn restaurant(id: &str) -> Restaurant {
        Restaurant::new(id, format!("Restaurant {id}"))
    }

    fn page(current: u32, total: u32, ids: &[&str]) -> RestaurantPage {
        RestaurantPage::new(current, total, ids.iter().map(|id| restaurant(id)).collect())
    }

    fn ids(state: &AppState) -> Vec<&str> {
        state.list.items.iter().map(|r| r.id.as_str()).collect()
    }

    fn fetch_of(action: &Action) -> (u32, u64, bool) {
        match action {
            Action::PostToWorker(WorkerMessage::FetchPage {
                page, generation, reset, ..
            }) => (*page, *generation, *reset),
            other => panic!("expected FetchPage, got {other:?}"),
        }
    }

    fn ready_state() -> AppState {
        let mut state = AppState::new(Theme::default(), ThemeMode::Light, Duration::from_millis(500));
        state.mounted = true;
        state.phase = Phase::AuthChecking;
        state.gate.begin_check();
        let actions = state.on_auth_probed(Some(User::new("ana@example.com")));
        let (_, generation, _) = fetch_of(&actions[0]);
        assert!(state.on_page_loaded(generation, true, page(1, 3, &["r1", "r2"])));
        state
    }

    #[test]
    fn guard_discards_stale_generation_without_freeing_slot() {
        let mut guard = OperationGuard::default();
        let old = guard.begin(2, false);
        let new = guard.begin(1, true);
        assert_ne!(old, new);
        assert!(!guard.finish(old));
        assert!(guard.is_busy());
        assert!(guard.finish(new));
        assert!(!guard.is_busy());
    }

    #[test]
    fn initial_load_populates_list() {
        let state = ready_state();
        assert_eq!(ids(&state), ["r1", "r2"]);
        assert_eq!(state.phase, Phase::Ready);
        assert!(state.initial_load_done);
        assert_eq!(state.list.total_pages, 3);
    }

    #[test]
    fn end_reached_appends_next_page() {
        let mut state = ready_state();
        let action = state.on_end_reached().unwrap();
        let (page_no, generation, reset) = fetch_of(&action);
        assert_eq!((page_no, reset), (2, false));
        assert!(state.is_loading_more());

        assert_eq!(state.on_end_reached(), None, "blocked while in flight");

        state.on_page_loaded(generation, false, page(2, 3, &["r3"]));
        assert_eq!(ids(&state), ["r1", "r2", "r3"]);
        assert_eq!(state.list.current_page, 2);
    }

    #[test]
    fn end_reached_is_noop_on_last_page() {
        let mut state = ready_state();
        state.list.current_page = 3;
        assert_eq!(state.on_end_reached(), None);
        assert!(!state.guard.is_busy());
    }

    #[test]
    fn search_during_load_more_drops_late_append() {
        let mut state = ready_state();
        let (_, page_two_gen, _) = fetch_of(&state.on_end_reached().unwrap());

        let (p, search_gen, reset) = fetch_of(&state.on_search_term_committed("sushi".into()).unwrap());
        assert_eq!((p, reset), (1, true));

        assert!(state.on_page_loaded(search_gen, true, page(1, 1, &["s1"])));
        assert!(!state.on_page_loaded(page_two_gen, false, page(2, 3, &["r3"])));
        assert_eq!(ids(&state), ["s1"]);
        assert_eq!(state.list.search_term, "sushi");
    }

    #[test]
    fn overlapping_resets_keep_only_latest() {
        let mut state = ready_state();
        let (_, first, _) = fetch_of(&state.on_search_term_committed("a".into()).unwrap());
        let (_, second, _) = fetch_of(&state.on_search_term_committed("ab".into()).unwrap());

        assert!(state.on_page_loaded(second, true, page(1, 1, &["ab1"])));
        assert!(!state.on_page_loaded(first, true, page(1, 1, &["a1", "a2"])));
        assert_eq!(ids(&state), ["ab1"]);
    }

    #[test]
    fn refresh_resets_to_first_page() {
        let mut state = ready_state();
        let (_, g, _) = fetch_of(&state.on_end_reached().unwrap());
        state.on_page_loaded(g, false, page(2, 3, &["r3"]));

        let actions = state.on_refresh();
        assert_eq!(actions[0], Action::PostToWorker(WorkerMessage::ProbeAuth));
        let (p, g, reset) = fetch_of(&actions[1]);
        assert_eq!((p, reset), (1, true));
        assert!(state.refreshing);

        state.on_page_loaded(g, true, page(1, 3, &["n1", "n2"]));
        assert_eq!(ids(&state), ["n1", "n2"]);
        assert_eq!(state.list.current_page, 1);
        assert!(!state.refreshing);
    }

    #[test]
    fn refresh_during_load_more_drops_late_append() {
        let mut state = ready_state();
        let (_, page_two_gen, _) = fetch_of(&state.on_end_reached().unwrap());

        let actions = state.on_refresh();
        let (p, refresh_gen, reset) = fetch_of(&actions[1]);
        assert_eq!((p, reset), (1, true));

        assert!(state.on_page_loaded(refresh_gen, true, page(1, 3, &["n1", "n2"])));
        assert!(!state.on_page_loaded(page_two_gen, false, page(2, 3, &["r3"])));
        assert_eq!(ids(&state), ["n1", "n2"]);
        assert_eq!(state.list.current_page, 1);
        assert!(!state.guard.is_busy());
        assert!(!state.refreshing);
    }

    #[test]
    fn search_commit_during_refresh_probe_fetches() {
        let mut state = ready_state();
        let actions = state.on_refresh();
        let (_, refresh_gen, _) = fetch_of(&actions[1]);
        assert!(state.gate.auth_loading);

        let (p, search_gen, reset) = fetch_of(&state.on_search_term_committed("sushi".into()).unwrap());
        assert_eq!((p, reset), (1, true));

        assert!(!state.on_page_loaded(refresh_gen, true, page(1, 3, &["r1", "r2"])));
        assert!(state.on_auth_probed(Some(User::new("ana@example.com"))).is_empty());
        assert!(state.on_page_loaded(search_gen, true, page(1, 1, &["s1"])));
        assert_eq!(ids(&state), ["s1"]);
        assert_eq!(state.list.search_term, "sushi");
        assert!(!state.refreshing);
    }

    #[test]
    fn failure_keeps_last_good_list() {
        let mut state = ready_state();
        let (_, g, _) = fetch_of(&state.on_end_reached().unwrap());
        assert!(state.on_page_failed(g, 2, "Network error: timeout"));
        assert_eq!(ids(&state), ["r1", "r2"]);
        assert!(!state.guard.is_busy());
    }

    #[test]
    fn focus_refetches_only_when_idle_after_initial_load() {
        let mut state = ready_state();
        let actions = state.on_screen_focus();
        assert_eq!(actions.len(), 2);

        assert!(state.on_screen_focus().is_empty(), "busy now");
    }

    #[test]
    fn no_fetch_without_user() {
        let mut state = AppState::new(Theme::default(), ThemeMode::Light, Duration::from_millis(500));
        state.mounted = true;
        state.gate.begin_check();
        assert!(state.on_auth_probed(None).is_empty());
        assert_eq!(state.phase, Phase::SignedOut);
        assert_eq!(state.on_search_term_committed("pho".into()), None);
        assert_eq!(state.on_end_reached(), None);
        assert!(state.form_visible());
    }

    #[test]
    fn unmounted_state_ignores_completions() {
        let mut state = ready_state();
        let (_, g, _) = fetch_of(&state.on_end_reached().unwrap());
        state.mounted = false;
        assert!(!state.on_page_loaded(g, false, page(2, 3, &["r3"])));
        assert_eq!(ids(&state), ["r1", "r2"]);
    }

    #[test]
    fn selection_near_end_triggers_load_more() {
        let mut state = ready_state();
        let action = state.move_selection_down();
        assert_eq!(state.selected_index, 1);
        assert!(matches!(action, Some(Action::PostToWorker(WorkerMessage::FetchPage { page: 2, .. }))));
    }

    #[test]
    fn card_overlay_and_rating_labels() {
        let mut state = ready_state();
        let mut items: Vec<Restaurant> = (0..5).map(|i| restaurant(&i.to_string())).collect();
        for r in &mut items {
            r.rating = Some(4.26);
            r.address = "Ilica 1, Zagreb".into();
        }
        items[1].user_ratings_total = Some(120);
        state.list.items = items;

        let vm = state.compute_viewmodel(60, 80);
        let Body::Explore(view) = vm.body else {
            panic!("expected explore body");
        };
        assert_eq!(view.cards[0].closed_notice, None);
        assert_eq!(view.cards[0].rating.as_deref(), Some("4.3 (0)"));
        assert_eq!(view.cards[1].rating.as_deref(), Some("4.3 (120)"));
        assert_eq!(view.cards[3].closed_notice.as_deref(), Some("Opening at 8 AM"));
        assert_eq!(view.cards[3].rating, None);
        assert_eq!(view.cards[0].address, "Ilica 1");
        assert_eq!(vm.header.subtitle, "ana");
    }

    #[test]
    fn empty_list_shows_empty_state() {
        let mut state = ready_state();
        state.list.items.clear();
        let Body::Explore(view) = state.compute_viewmodel(40, 80).body else {
            panic!("expected explore body");
        };
        assert_eq!(view.empty_state.unwrap().message, "No restaurants found");
    }

    #[test]
    fn highlight_ranges_are_coalesced() {
        let matcher = SkimMatcherV2::default();
        assert_eq!(compute_highlight_ranges("Bistro", "bis", &matcher), vec![(0, 3)]);
        assert!(compute_highlight_ranges("Bistro", "xyz", &matcher).is_empty());
    }
}
