pub mod actions;
pub mod client;
pub mod error;
pub mod interceptor;

pub use actions::{ActionResponse, CustomerStats, OrderLine, OrderSummary};
pub use client::{ApiClient, DEFAULT_TIMEOUT};
pub use error::ClientError;
pub use interceptor::{CSRF_HEADER, CsrfInterceptor, RequestInterceptor};
