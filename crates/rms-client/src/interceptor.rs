//! Hooks that adjust outgoing request headers

use crate::ClientError;
use reqwest::Method;
use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue};

pub const CSRF_HEADER: HeaderName = HeaderName::from_static("x-csrftoken");

/// Runs on every request an [`ApiClient`](crate::ApiClient) sends, before it leaves
pub trait RequestInterceptor: Send + Sync {
    fn intercept(&self, method: &Method, headers: &mut HeaderMap);
}

/// Adds the CSRF token and a JSON content type to state-changing requests.
///
/// Headers already present on the request are left alone, and GET requests
/// are never touched.
#[derive(Debug, Clone)]
pub struct CsrfInterceptor {
    token: HeaderValue,
}

impl CsrfInterceptor {
    pub fn new(token: &str) -> Result<Self, ClientError> {
        let mut token = HeaderValue::from_str(token)?;
        token.set_sensitive(true);
        Ok(Self { token })
    }
}

impl RequestInterceptor for CsrfInterceptor {
    fn intercept(&self, method: &Method, headers: &mut HeaderMap) {
        if *method == Method::GET {
            return;
        }
        headers
            .entry(CSRF_HEADER)
            .or_insert_with(|| self.token.clone());
        headers
            .entry(CONTENT_TYPE)
            .or_insert_with(|| HeaderValue::from_static("application/json"));
    }
}
