//! Search input debouncing.
//!
//! The debouncer keeps an immediate echo of what the user typed and commits
//! a search term only after a quiet period without keystrokes. Time is passed
//! in explicitly so the event loop decides when to poll and tests stay
//! deterministic.

use std::time::{Duration, Instant};

pub const DEFAULT_QUIET_PERIOD: Duration = Duration::from_millis(500);
pub const MIN_QUIET_PERIOD: Duration = Duration::from_millis(300);
pub const MAX_QUIET_PERIOD: Duration = Duration::from_millis(500);

/// Turns keystrokes into committed search terms.
///
/// A commit equal to the last committed term is swallowed, so typing a
/// character and deleting it again does not refetch.
///
/// # Examples
///
/// ```
/// use dinedeck::app::debounce::SearchDebouncer;
/// use std::time::{Duration, Instant};
///
/// let start = Instant::now();
/// let mut debouncer = SearchDebouncer::new(Duration::from_millis(300));
/// debouncer.input("a", start);
/// debouncer.input("ab", start + Duration::from_millis(100));
///
/// assert_eq!(debouncer.poll(start + Duration::from_millis(350)), None);
/// assert_eq!(
///     debouncer.poll(start + Duration::from_millis(400)).as_deref(),
///     Some("ab")
/// );
/// ```
#[derive(Debug, Clone)]
pub struct SearchDebouncer {
    echo: String,
    committed: String,
    pending: Option<Instant>,
    quiet_period: Duration,
}

impl Default for SearchDebouncer {
    fn default() -> Self {
        Self::new(DEFAULT_QUIET_PERIOD)
    }
}

impl SearchDebouncer {
    /// Creates a debouncer. The quiet period is clamped to 300..=500 ms.
    #[must_use]
    pub fn new(quiet_period: Duration) -> Self {
        Self {
            echo: String::new(),
            committed: String::new(),
            pending: None,
            quiet_period: quiet_period.clamp(MIN_QUIET_PERIOD, MAX_QUIET_PERIOD),
        }
    }

    /// Text currently shown in the input.
    #[must_use]
    pub fn echo(&self) -> &str {
        &self.echo
    }

    /// Last committed term.
    #[must_use]
    pub fn committed(&self) -> &str {
        &self.committed
    }

    #[must_use]
    pub const fn quiet_period(&self) -> Duration {
        self.quiet_period
    }

    #[must_use]
    pub const fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Replaces the echo and restarts the quiet period.
    pub fn input(&mut self, text: impl Into<String>, now: Instant) {
        self.echo = text.into();
        self.pending = Some(now + self.quiet_period);
    }

    pub fn push(&mut self, c: char, now: Instant) {
        let mut text = std::mem::take(&mut self.echo);
        text.push(c);
        self.input(text, now);
    }

    pub fn pop(&mut self, now: Instant) {
        let mut text = std::mem::take(&mut self.echo);
        text.pop();
        self.input(text, now);
    }

    /// Clears the input and commits the empty term without waiting.
    ///
    /// Returns `None` when the committed term was already empty.
    pub fn clear(&mut self) -> Option<String> {
        self.echo.clear();
        self.pending = None;
        self.commit(String::new())
    }

    /// Adopts a value set from outside the input, bypassing the delay.
    ///
    /// Any pending commit is cancelled; the value counts as committed.
    pub fn sync_external(&mut self, value: &str) {
        self.echo = value.to_string();
        self.committed = value.to_string();
        self.pending = None;
    }

    /// Commits the echo if its quiet period has elapsed by `now`.
    pub fn poll(&mut self, now: Instant) -> Option<String> {
        let deadline = self.pending?;
        if now < deadline {
            return None;
        }
        self.pending = None;
        self.commit(self.echo.clone())
    }

    /// When the pending commit falls due, if there is one.
    #[must_use]
    pub const fn next_deadline(&self) -> Option<Instant> {
        self.pending
    }

    fn commit(&mut self, term: String) -> Option<String> {
        if term == self.committed {
            tracing::trace!(term = %term, "search term unchanged, not committing");
            return None;
        }
        self.committed.clone_from(&term);
        tracing::debug!(term = %term, "search term committed");
        Some(term)
    }
}
