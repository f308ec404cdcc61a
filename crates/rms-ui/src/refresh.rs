use std::time::{Duration, Instant};

pub const DEFAULT_REFRESH_PERIOD: Duration = Duration::from_secs(120);
pub const DEFAULT_REFRESH_PAGES: &[&str] = &["/orders/", "/dashboard/"];

/// Fixed-rate timer driven by the caller's clock
#[derive(Debug, Clone)]
pub struct Interval {
    period: Duration,
    next: Instant,
}

impl Interval {
    pub fn new(period: Duration, now: Instant) -> Self {
        Self {
            period,
            next: now + period,
        }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    pub fn next_due(&self) -> Instant {
        self.next
    }

    /// True at most once per call when one or more periods have elapsed.
    /// Missed periods are skipped rather than replayed.
    pub fn poll(&mut self, now: Instant) -> bool {
        if now < self.next || self.period.is_zero() {
            return false;
        }
        while self.next <= now {
            self.next += self.period;
        }
        true
    }
}

/// Which pages refresh themselves, and how often
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefreshPolicy {
    pub pages: Vec<String>,
    pub period: Duration,
}

impl Default for RefreshPolicy {
    fn default() -> Self {
        Self {
            pages: DEFAULT_REFRESH_PAGES.iter().map(|p| p.to_string()).collect(),
            period: DEFAULT_REFRESH_PERIOD,
        }
    }
}

impl RefreshPolicy {
    pub fn applies_to(&self, path: &str) -> bool {
        self.pages.iter().any(|page| path.contains(page.as_str()))
    }

    /// A started interval for `path`, if that page auto-refreshes
    pub fn interval_for(&self, path: &str, now: Instant) -> Option<Interval> {
        self.applies_to(path)
            .then(|| Interval::new(self.period, now))
    }
}
