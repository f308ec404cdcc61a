//! Search dispatch: endpoint lookup and fire-and-forget requests

use crate::decode::decode_results;
use crate::types::{SearchQuery, SearchResult, SearchType};
use anyhow::Result;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender, TryRecvError};
use std::thread;
use std::time::Duration;

pub const DEFAULT_MIN_QUERY_CHARS: usize = 2;

/// Transport used to reach the search endpoints
pub trait SearchTransport: Send + Sync {
    /// GET `path_and_query` relative to the server root and return the body
    fn get(&self, path_and_query: &str) -> Result<Vec<u8>>;
}

/// Monotonic identifier of an issued request
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestToken(u64);

impl RequestToken {
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for RequestToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Fixed mapping from search type to endpoint path
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndpointMap {
    endpoints: BTreeMap<SearchType, String>,
}

impl Default for EndpointMap {
    fn default() -> Self {
        let endpoints = SearchType::ALL
            .iter()
            .map(|ty| (*ty, ty.default_endpoint().to_string()))
            .collect();
        Self { endpoints }
    }
}

impl EndpointMap {
    pub fn empty() -> Self {
        Self {
            endpoints: BTreeMap::new(),
        }
    }

    pub fn with(mut self, search_type: SearchType, path: impl Into<String>) -> Self {
        self.endpoints.insert(search_type, path.into());
        self
    }

    pub fn without(mut self, search_type: SearchType) -> Self {
        self.endpoints.remove(&search_type);
        self
    }

    pub fn endpoint(&self, search_type: SearchType) -> Option<&str> {
        self.endpoints.get(&search_type).map(String::as_str)
    }

    /// `{endpoint}?q={escaped}`, escaped the same way as `encodeURIComponent`
    pub fn request_path(&self, search_type: SearchType, text: &str) -> Option<String> {
        let endpoint = self.endpoint(search_type)?;
        Some(format!("{endpoint}?q={}", urlencoding::encode(text)))
    }

    pub fn iter(&self) -> impl Iterator<Item = (SearchType, &str)> {
        self.endpoints.iter().map(|(ty, path)| (*ty, path.as_str()))
    }
}

/// What a worker got for its request
#[derive(Debug, Clone, PartialEq)]
pub enum SearchOutcome {
    Results(Vec<SearchResult>),
    /// Transport or decode failure, already logged by the worker
    Failed(String),
}

/// Report sent back by a worker, once per dispatched request
#[derive(Debug, Clone)]
pub struct SearchResponse {
    pub token: RequestToken,
    pub query: SearchQuery,
    pub outcome: SearchOutcome,
}

/// Issues one GET per dispatch on a worker thread.
///
/// Failed requests are logged and reported as [`SearchOutcome::Failed`] so
/// the caller can retire the token. They are never retried.
pub struct SearchDispatcher {
    transport: Arc<dyn SearchTransport>,
    endpoints: EndpointMap,
    min_query_chars: usize,
    next_token: u64,
    response_tx: Sender<SearchResponse>,
    response_rx: Receiver<SearchResponse>,
}

impl SearchDispatcher {
    pub fn new(transport: Arc<dyn SearchTransport>, endpoints: EndpointMap) -> Self {
        let (response_tx, response_rx) = mpsc::channel();
        Self {
            transport,
            endpoints,
            min_query_chars: DEFAULT_MIN_QUERY_CHARS,
            next_token: 0,
            response_tx,
            response_rx,
        }
    }

    pub fn with_min_query_chars(mut self, min: usize) -> Self {
        self.min_query_chars = min;
        self
    }

    pub fn min_query_chars(&self) -> usize {
        self.min_query_chars
    }

    pub fn endpoints(&self) -> &EndpointMap {
        &self.endpoints
    }

    /// Whether `text` is long enough to be sent
    pub fn accepts(&self, text: &str) -> bool {
        text.chars().count() >= self.min_query_chars
    }

    /// Send `text` to the endpoint for `search_type`.
    ///
    /// Returns `None` without touching the network when the text is too short
    /// or the type has no endpoint.
    pub fn dispatch(&mut self, text: &str, search_type: SearchType) -> Option<RequestToken> {
        if !self.accepts(text) {
            return None;
        }
        let path = self.endpoints.request_path(search_type, text)?;

        self.next_token += 1;
        let token = RequestToken(self.next_token);
        let transport = Arc::clone(&self.transport);
        let response_tx = self.response_tx.clone();
        let query = SearchQuery {
            text: text.to_string(),
            search_type,
        };

        log::debug!("dispatching {search_type} search {token}: {path}");

        thread::spawn(move || {
            let outcome = transport
                .get(&path)
                .and_then(|body| decode_results(search_type, &body).map_err(Into::into));
            let outcome = match outcome {
                Ok(results) => SearchOutcome::Results(results),
                Err(e) => {
                    log::error!("Search error ({search_type} {token}, {path}): {e:#}");
                    SearchOutcome::Failed(format!("{e:#}"))
                }
            };
            let _ = response_tx.send(SearchResponse {
                token,
                query,
                outcome,
            });
        });

        Some(token)
    }

    /// Next arrived response, if any (non-blocking)
    pub fn try_recv(&self) -> Option<SearchResponse> {
        match self.response_rx.try_recv() {
            Ok(response) => Some(response),
            Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => None,
        }
    }

    /// Wait up to `timeout` for the next response
    pub fn recv_timeout(&self, timeout: Duration) -> Option<SearchResponse> {
        match self.response_rx.recv_timeout(timeout) {
            Ok(response) => Some(response),
            Err(RecvTimeoutError::Timeout) | Err(RecvTimeoutError::Disconnected) => None,
        }
    }
}
