pub mod controller;
pub mod debounce;
pub mod decode;
pub mod dispatch;
pub mod error;
pub mod render;
pub mod select;
pub mod types;

#[cfg(test)]
mod testing;

pub use controller::{ControllerOptions, ResponseOrdering, SearchController, WidgetId};
pub use debounce::{DEFAULT_DEBOUNCE, DebounceGate};
pub use decode::decode_results;
pub use dispatch::{
    DEFAULT_MIN_QUERY_CHARS, EndpointMap, RequestToken, SearchDispatcher, SearchOutcome,
    SearchResponse,
    SearchTransport,
};
pub use error::SearchError;
pub use render::{
    ContainerContent, Leading, NO_RESULTS, ResultBoard, ResultContainer, ResultNode,
    ResultRenderer, ResultView,
};
pub use select::{ListenerId, SelectionBus};
pub use types::{
    BadgeColor, CustomerRecord, MenuItemRecord, OrderRecord, OrderStatus, SearchQuery,
    SearchResult, SearchType, SelectionEvent,
};
