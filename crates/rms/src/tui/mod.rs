//! Interactive incremental search over customers, menu items and orders
//!
//! ```text
//! ╭ Orders ─────────────────────────────╮
//! │[Ready] Order #7 - Ada               │   results for the active tab
//! │    Ready • $12.50                   │
//! ╰─────────────────────────────────────╯
//!   Customers │ Menu │ Orders  1 results   tabs
//!   [↑↓ select] [Tab switch] ...          shortcuts
//!   [✓ Order status updated to Ready]     newest toast
//! ▌ ada█                                  search input
//! ```

mod app;
mod input;
mod ui;

pub use app::run;
