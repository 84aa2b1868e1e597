//! The debounced "searching" affordance.

use std::time::{Duration, Instant};

/// Window the indicator stays on after the last query change.
pub const DEFAULT_SEARCH_DEBOUNCE: Duration = Duration::from_millis(450);

/// Display-only flag that reads `true` for a short window after each
/// keystroke.
///
/// Single-shot: every non-blank query change re-arms the deadline, replacing
/// the previous one. A blank query clears it at once. The flag never
/// influences which products are shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchIndicator {
    window: Duration,
    deadline: Option<Instant>,
}

impl SearchIndicator {
    /// Create an idle indicator with the given window.
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            deadline: None,
        }
    }

    /// The debounce window.
    pub fn window(&self) -> Duration {
        self.window
    }

    /// Record a query change at `now`.
    pub fn on_query_change(&mut self, query: &str, now: Instant) {
        if query.trim().is_empty() {
            self.deadline = None;
        } else {
            self.deadline = now.checked_add(self.window);
        }
    }

    /// Drop any pending deadline.
    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    /// Whether the indicator is on at `now`.
    pub fn is_searching(&self, now: Instant) -> bool {
        self.deadline.is_some_and(|deadline| now < deadline)
    }

    /// Time left before the indicator turns off.
    pub fn remaining(&self, now: Instant) -> Option<Duration> {
        self.deadline
            .and_then(|deadline| deadline.checked_duration_since(now))
            .filter(|left| !left.is_zero())
    }
}

impl Default for SearchIndicator {
    fn default() -> Self {
        Self::new(DEFAULT_SEARCH_DEBOUNCE)
    }
}
