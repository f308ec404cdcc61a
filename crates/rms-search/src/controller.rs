//! Ties search inputs, debounce gates, the dispatcher and the result board together

use crate::debounce::{DEFAULT_DEBOUNCE, DebounceGate};
use crate::dispatch::{RequestToken, SearchDispatcher, SearchOutcome, SearchResponse};
use crate::render::{ResultBoard, ResultRenderer};
use crate::select::SelectionBus;
use crate::types::SearchType;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::time::{Duration, Instant};

/// How responses that arrive out of order are applied
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ResponseOrdering {
    /// Only the most recent request of a widget may render
    #[default]
    LatestWins,
    /// Render every response as it arrives, even a stale one
    ArrivalOrder,
}

impl fmt::Display for ResponseOrdering {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResponseOrdering::LatestWins => f.write_str("latest-wins"),
            ResponseOrdering::ArrivalOrder => f.write_str("arrival-order"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControllerOptions {
    pub debounce: Duration,
    pub ordering: ResponseOrdering,
    /// Clear a widget's results when its fired query is too short to send
    pub clear_on_short_query: bool,
}

impl Default for ControllerOptions {
    fn default() -> Self {
        Self {
            debounce: DEFAULT_DEBOUNCE,
            ordering: ResponseOrdering::default(),
            clear_on_short_query: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WidgetId(usize);

/// One search input and its private timer
#[derive(Debug)]
struct SearchWidget {
    discriminator: String,
    search_type: Option<SearchType>,
    gate: DebounceGate,
    /// Current value of the input
    text: String,
    /// Last request issued for this widget
    latest: Option<RequestToken>,
}

pub struct SearchController {
    options: ControllerOptions,
    dispatcher: SearchDispatcher,
    board: ResultBoard,
    renderer: ResultRenderer,
    bus: SelectionBus,
    widgets: Vec<SearchWidget>,
    in_flight: HashMap<RequestToken, WidgetId>,
}

impl SearchController {
    pub fn new(options: ControllerOptions, dispatcher: SearchDispatcher, board: ResultBoard) -> Self {
        Self {
            options,
            dispatcher,
            board,
            renderer: ResultRenderer::new(),
            bus: SelectionBus::new(),
            widgets: Vec::new(),
            in_flight: HashMap::new(),
        }
    }

    pub fn options(&self) -> &ControllerOptions {
        &self.options
    }

    pub fn board(&self) -> &ResultBoard {
        &self.board
    }

    pub fn bus_mut(&mut self) -> &mut SelectionBus {
        &mut self.bus
    }

    /// Attach an input tagged with `discriminator`.
    ///
    /// Unknown discriminators are accepted; such a widget never searches.
    pub fn register_widget(&mut self, discriminator: &str) -> WidgetId {
        let search_type = SearchType::from_discriminator(discriminator);
        if search_type.is_none() {
            log::debug!("search input with unknown type '{discriminator}' will be ignored");
        }
        self.widgets.push(SearchWidget {
            discriminator: discriminator.to_string(),
            search_type,
            gate: DebounceGate::new(self.options.debounce),
            text: String::new(),
            latest: None,
        });
        WidgetId(self.widgets.len() - 1)
    }

    pub fn widget_type(&self, widget: WidgetId) -> Option<SearchType> {
        self.widgets.get(widget.0).and_then(|w| w.search_type)
    }

    pub fn widget_discriminator(&self, widget: WidgetId) -> Option<&str> {
        self.widgets.get(widget.0).map(|w| w.discriminator.as_str())
    }

    pub fn widget_text(&self, widget: WidgetId) -> Option<&str> {
        self.widgets.get(widget.0).map(|w| w.text.as_str())
    }

    /// The input's value changed
    pub fn on_input(&mut self, widget: WidgetId, text: &str, now: Instant) {
        if let Some(w) = self.widgets.get_mut(widget.0) {
            w.text = text.to_string();
            w.gate.keystroke(text, now);
        }
    }

    /// Fire every gate whose quiet period has elapsed. Returns the number of requests issued.
    pub fn tick(&mut self, now: Instant) -> usize {
        let mut issued = 0;
        for index in 0..self.widgets.len() {
            let Some(text) = self.widgets[index].gate.poll(now) else {
                continue;
            };
            if self.submit(WidgetId(index), &text).is_some() {
                issued += 1;
            }
        }
        issued
    }

    /// Dispatch the widget's current text right away, skipping the debounce window
    pub fn resubmit(&mut self, widget: WidgetId) -> Option<RequestToken> {
        let w = self.widgets.get_mut(widget.0)?;
        w.gate.cancel();
        let text = w.text.clone();
        self.submit(widget, &text)
    }

    /// Apply responses that have already arrived. Returns how many were rendered.
    pub fn pump(&mut self) -> usize {
        let mut rendered = 0;
        while let Some(response) = self.dispatcher.try_recv() {
            if self.apply(response) {
                rendered += 1;
            }
        }
        rendered
    }

    /// Wait up to `timeout` for a response, then apply everything that arrived
    pub fn pump_timeout(&mut self, timeout: Duration) -> usize {
        let Some(first) = self.dispatcher.recv_timeout(timeout) else {
            return 0;
        };
        let rendered = usize::from(self.apply(first));
        rendered + self.pump()
    }

    /// Activate the rendered node at `index` and emit its selection
    pub fn activate(&mut self, search_type: SearchType, index: usize) -> bool {
        let Some(event) = self
            .board
            .container(search_type)
            .and_then(|container| container.activate(index))
        else {
            return false;
        };
        self.bus.emit(&event);
        true
    }

    /// Earliest pending debounce deadline, if any gate is armed
    pub fn next_deadline(&self) -> Option<Instant> {
        self.widgets.iter().filter_map(|w| w.gate.deadline()).min()
    }

    pub fn in_flight(&self) -> usize {
        self.in_flight.len()
    }

    fn submit(&mut self, widget: WidgetId, text: &str) -> Option<RequestToken> {
        let search_type = self.widgets.get(widget.0)?.search_type?;

        if !self.dispatcher.accepts(text) {
            if self.options.clear_on_short_query {
                if let Some(container) = self.board.container_mut(search_type) {
                    container.clear();
                }
            }
            return None;
        }

        let token = self.dispatcher.dispatch(text, search_type)?;
        self.widgets[widget.0].latest = Some(token);
        self.in_flight.insert(token, widget);
        Some(token)
    }

    fn apply(&mut self, response: SearchResponse) -> bool {
        let owner = self.in_flight.remove(&response.token);
        let SearchResponse {
            token,
            query,
            outcome,
        } = response;
        let SearchOutcome::Results(results) = outcome else {
            return false;
        };

        if self.options.ordering == ResponseOrdering::LatestWins {
            let latest = owner.and_then(|id| self.widgets.get(id.0)).and_then(|w| w.latest);
            if latest != Some(token) {
                log::debug!(
                    "discarding stale {} response {} for '{}'",
                    query.search_type,
                    token,
                    query.text
                );
                return false;
            }
        }

        self.renderer
            .render(&mut self.board, results, query.search_type)
    }
}
