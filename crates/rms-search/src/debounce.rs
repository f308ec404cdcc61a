//! Per-input debounce gate

use std::time::{Duration, Instant};

pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(300);

/// Coalesces rapid keystrokes into a single query.
///
/// Every keystroke re-arms the deadline; only the text present when the
/// deadline passes is released. Callers supply the current time, which keeps
/// the gate free of any clock of its own.
#[derive(Debug, Clone)]
pub struct DebounceGate {
    window: Duration,
    pending: Option<Pending>,
}

#[derive(Debug, Clone)]
struct Pending {
    text: String,
    deadline: Instant,
}

impl Default for DebounceGate {
    fn default() -> Self {
        Self::new(DEFAULT_DEBOUNCE)
    }
}

impl DebounceGate {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            pending: None,
        }
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    /// Record the latest input value and restart the timer
    pub fn keystroke(&mut self, text: impl Into<String>, now: Instant) {
        self.pending = Some(Pending {
            text: text.into(),
            deadline: now + self.window,
        });
    }

    /// Release the pending text once its deadline has passed
    pub fn poll(&mut self, now: Instant) -> Option<String> {
        match &self.pending {
            Some(pending) if now >= pending.deadline => self.pending.take().map(|p| p.text),
            _ => None,
        }
    }

    pub fn cancel(&mut self) {
        self.pending = None;
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|pending| pending.deadline)
    }
}
