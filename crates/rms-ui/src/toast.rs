use ratatui::style::Color;
use std::time::{Duration, Instant};

pub const DEFAULT_TOAST_DURATION: Duration = Duration::from_millis(5000);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ToastKind {
    Success,
    Error,
    Warning,
    #[default]
    Info,
}

impl ToastKind {
    pub fn icon(&self) -> &'static str {
        match self {
            ToastKind::Success => "✓",
            ToastKind::Error => "✗",
            ToastKind::Warning => "!",
            ToastKind::Info => "ℹ",
        }
    }

    pub fn color(&self) -> Color {
        match self {
            ToastKind::Success => Color::Green,
            ToastKind::Error => Color::Red,
            ToastKind::Warning => Color::Yellow,
            ToastKind::Info => Color::Blue,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ToastId(u64);

#[derive(Debug, Clone)]
pub struct Toast {
    pub id: ToastId,
    pub message: String,
    pub kind: ToastKind,
    pub expires_at: Instant,
}

impl Toast {
    pub fn is_expired(&self, now: Instant) -> bool {
        now >= self.expires_at
    }
}

/// Stack of transient notifications, oldest first
#[derive(Debug, Clone)]
pub struct ToastQueue {
    toasts: Vec<Toast>,
    duration: Duration,
    next_id: u64,
}

impl Default for ToastQueue {
    fn default() -> Self {
        Self::new(DEFAULT_TOAST_DURATION)
    }
}

impl ToastQueue {
    pub fn new(duration: Duration) -> Self {
        Self {
            toasts: Vec::new(),
            duration,
            next_id: 0,
        }
    }

    pub fn push(&mut self, message: impl Into<String>, kind: ToastKind, now: Instant) -> ToastId {
        self.push_for(message, kind, self.duration, now)
    }

    pub fn push_for(
        &mut self,
        message: impl Into<String>,
        kind: ToastKind,
        duration: Duration,
        now: Instant,
    ) -> ToastId {
        self.next_id += 1;
        let id = ToastId(self.next_id);
        self.toasts.push(Toast {
            id,
            message: message.into(),
            kind,
            expires_at: now + duration,
        });
        id
    }

    /// Drop expired toasts; returns how many were removed
    pub fn expire(&mut self, now: Instant) -> usize {
        let before = self.toasts.len();
        self.toasts.retain(|toast| !toast.is_expired(now));
        before - self.toasts.len()
    }

    pub fn dismiss(&mut self, id: ToastId) -> bool {
        let before = self.toasts.len();
        self.toasts.retain(|toast| toast.id != id);
        self.toasts.len() != before
    }

    pub fn iter(&self) -> impl Iterator<Item = &Toast> {
        self.toasts.iter()
    }

    pub fn latest(&self) -> Option<&Toast> {
        self.toasts.last()
    }

    pub fn len(&self) -> usize {
        self.toasts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.toasts.is_empty()
    }
}
