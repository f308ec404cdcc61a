//! HTTP access to the restaurant management server

use crate::ClientError;
use crate::interceptor::RequestInterceptor;
use reqwest::Method;
use reqwest::blocking::{Client, Response};
use reqwest::header::HeaderMap;
use rms_search::{EndpointMap, SearchResult, SearchTransport, SearchType, decode_results};
use serde::de::DeserializeOwned;
use std::time::Duration;
use url::Url;

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Blocking client rooted at the server's base URL.
///
/// Every request runs through the installed interceptors in the order they
/// were added.
pub struct ApiClient {
    http: Client,
    base_url: Url,
    interceptors: Vec<Box<dyn RequestInterceptor>>,
}

impl ApiClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ClientError> {
        let http = Client::builder()
            .user_agent(format!("rms/{}", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()?;
        Ok(Self {
            http,
            base_url: Url::parse(base_url)?,
            interceptors: Vec::new(),
        })
    }

    pub fn with_interceptor(mut self, interceptor: impl RequestInterceptor + 'static) -> Self {
        self.interceptors.push(Box::new(interceptor));
        self
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Resolve `path_and_query` against the base URL
    pub fn url(&self, path_and_query: &str) -> Result<Url, ClientError> {
        Ok(self.base_url.join(path_and_query)?)
    }

    pub(crate) fn send(
        &self,
        method: Method,
        path_and_query: &str,
        mut headers: HeaderMap,
        body: Option<String>,
    ) -> Result<Response, ClientError> {
        let url = self.url(path_and_query)?;
        for interceptor in &self.interceptors {
            interceptor.intercept(&method, &mut headers);
        }

        log::debug!("{method} {url}");
        let mut request = self.http.request(method, url).headers(headers);
        if let Some(body) = body {
            request = request.body(body);
        }
        let response = request.send()?;

        if !response.status().is_success() {
            return Err(ClientError::Status {
                status: response.status(),
                path: path_and_query.to_string(),
            });
        }
        Ok(response)
    }

    /// GET a path and return the raw body
    pub fn get_bytes(&self, path_and_query: &str) -> Result<Vec<u8>, ClientError> {
        let response = self.send(Method::GET, path_and_query, HeaderMap::new(), None)?;
        Ok(response.bytes()?.to_vec())
    }

    pub fn get_json<T: DeserializeOwned>(&self, path_and_query: &str) -> Result<T, ClientError> {
        let body = self.get_bytes(path_and_query)?;
        Ok(serde_json::from_slice(&body)?)
    }

    /// Run one search immediately, reporting every failure to the caller
    pub fn search(
        &self,
        endpoints: &EndpointMap,
        search_type: SearchType,
        text: &str,
    ) -> Result<Vec<SearchResult>, ClientError> {
        let path = endpoints
            .request_path(search_type, text)
            .ok_or(ClientError::Unmapped(search_type))?;
        let body = self.get_bytes(&path)?;
        Ok(decode_results(search_type, &body)?)
    }
}

impl SearchTransport for ApiClient {
    fn get(&self, path_and_query: &str) -> anyhow::Result<Vec<u8>> {
        Ok(self.get_bytes(path_and_query)?)
    }
}
