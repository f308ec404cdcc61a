//! Terminal-agnostic helpers for the rms console: toasts, field validation,
//! display formatting and auto-refresh timers.

pub mod format;
pub mod refresh;
pub mod toast;
pub mod validate;

pub use format::{format_currency, time_ago};
pub use refresh::{DEFAULT_REFRESH_PAGES, DEFAULT_REFRESH_PERIOD, Interval, RefreshPolicy};
pub use toast::{DEFAULT_TOAST_DURATION, Toast, ToastId, ToastKind, ToastQueue};
pub use validate::{
    FieldCheck, MissingFields, check_required, format_phone, validate_email, validate_phone,
};
