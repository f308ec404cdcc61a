//! Main application state and event loop

use super::input::TextInput;
use super::ui;
use crate::config::Config;
use anyhow::Result;
use chrono::{DateTime, Utc};
use crossterm::{
    cursor::SetCursorStyle,
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend, widgets::ListState};
use rms_client::{ActionResponse, ApiClient, ClientError};
use rms_search::{
    EndpointMap, OrderStatus, ResultNode, SearchController, SearchDispatcher, SearchResult,
    SearchType, SelectionEvent, WidgetId, ResultBoard,
};
use rms_ui::{Interval, RefreshPolicy, ToastKind, ToastQueue};
use std::io::{self, Stdout};
use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

const FRAME_TIME: Duration = Duration::from_millis(16);

/// Write operations the TUI can trigger on the selected record
pub trait ActionBackend: Send + Sync {
    fn update_order_status(
        &self,
        order_id: u64,
        status: OrderStatus,
    ) -> Result<ActionResponse, ClientError>;

    fn toggle_item_availability(&self, item_id: u64) -> Result<ActionResponse, ClientError>;
}

impl ActionBackend for ApiClient {
    fn update_order_status(
        &self,
        order_id: u64,
        status: OrderStatus,
    ) -> Result<ActionResponse, ClientError> {
        ApiClient::update_order_status(self, order_id, status)
    }

    fn toggle_item_availability(&self, item_id: u64) -> Result<ActionResponse, ClientError> {
        ApiClient::toggle_item_availability(self, item_id)
    }
}

/// A write queued for the action worker
#[derive(Debug, Clone, Copy)]
pub enum ActionRequest {
    AdvanceOrder { order_id: u64, status: OrderStatus },
    ToggleItem { item_id: u64 },
}

impl ActionRequest {
    fn describe(&self) -> String {
        match self {
            Self::AdvanceOrder { order_id, status } => {
                format!("order #{order_id} status update to {status}")
            }
            Self::ToggleItem { item_id } => format!("toggling menu item {item_id}"),
        }
    }

    fn fallback_message(&self) -> String {
        match self {
            Self::AdvanceOrder { order_id, status } => {
                format!("Order #{order_id} is now {}", status.label())
            }
            Self::ToggleItem { .. } => "Item updated".to_string(),
        }
    }
}

/// Outcome of a write, with the page to refresh on success
#[derive(Debug)]
pub struct ActionReply {
    pub widget: WidgetId,
    pub request: ActionRequest,
    pub result: Result<ActionResponse, String>,
}

/// Run queued writes one at a time until the request channel closes
pub fn spawn_action_worker(
    backend: Arc<dyn ActionBackend>,
    request_rx: Receiver<(WidgetId, ActionRequest)>,
    reply_tx: Sender<ActionReply>,
) -> JoinHandle<()> {
    thread::spawn(move || {
        while let Ok((widget, request)) = request_rx.recv() {
            let result = match request {
                ActionRequest::AdvanceOrder { order_id, status } => {
                    backend.update_order_status(order_id, status)
                }
                ActionRequest::ToggleItem { item_id } => backend.toggle_item_availability(item_id),
            };
            let result = result.map_err(|e| {
                log::error!("{} failed: {e}", request.describe());
                e.to_string()
            });
            if reply_tx
                .send(ActionReply {
                    widget,
                    request,
                    result,
                })
                .is_err()
            {
                break;
            }
        }
    })
}

/// One search page: its input and result list
pub struct Tab {
    pub search_type: SearchType,
    pub widget: WidgetId,
    pub input: TextInput,
    /// Highlighted row (handles selection + scroll)
    pub list_state: ListState,
    /// Set when this page refreshes itself
    refresh: Option<Interval>,
}

pub struct AppSettings {
    pub initial: SearchType,
    pub endpoints: EndpointMap,
    pub refresh: RefreshPolicy,
    pub toast_duration: Duration,
    pub min_query_chars: usize,
}

/// Application state
pub struct App {
    pub tabs: Vec<Tab>,
    /// Index of the visible tab
    pub active: usize,
    pub controller: SearchController,
    pub toasts: ToastQueue,
    pub should_quit: bool,
    /// Most recent selection, printed on exit
    pub last_selection: Option<SelectionEvent>,
    /// Wall-clock time of the last auto-refresh
    pub last_refresh: Option<DateTime<Utc>>,
    pub min_query_chars: usize,
    /// Writes sent to the worker that have not replied yet
    pub pending_actions: usize,
    selections: Receiver<SelectionEvent>,
    action_tx: Sender<(WidgetId, ActionRequest)>,
    action_rx: Receiver<ActionReply>,
}

impl App {
    pub fn new(
        mut controller: SearchController,
        actions: Arc<dyn ActionBackend>,
        settings: AppSettings,
        now: Instant,
    ) -> Self {
        let selections = controller.bus_mut().channel();
        let (action_tx, request_rx) = mpsc::channel();
        let (reply_tx, action_rx) = mpsc::channel();
        spawn_action_worker(actions, request_rx, reply_tx);
        let tabs: Vec<Tab> = SearchType::ALL
            .iter()
            .map(|ty| Tab {
                search_type: *ty,
                widget: controller.register_widget(ty.as_str()),
                input: TextInput::new(),
                list_state: ListState::default(),
                refresh: settings
                    .endpoints
                    .endpoint(*ty)
                    .and_then(|page| settings.refresh.interval_for(page, now)),
            })
            .collect();
        let active = tabs
            .iter()
            .position(|tab| tab.search_type == settings.initial)
            .unwrap_or(0);

        Self {
            tabs,
            active,
            controller,
            toasts: ToastQueue::new(settings.toast_duration),
            should_quit: false,
            last_selection: None,
            last_refresh: None,
            min_query_chars: settings.min_query_chars,
            pending_actions: 0,
            selections,
            action_tx,
            action_rx,
        }
    }

    pub fn active_tab(&self) -> &Tab {
        &self.tabs[self.active]
    }

    /// Rendered rows for `search_type`
    pub fn nodes(&self, search_type: SearchType) -> &[ResultNode] {
        self.controller
            .board()
            .container(search_type)
            .map(|container| container.nodes())
            .unwrap_or(&[])
    }

    pub fn selected_node(&self) -> Option<&ResultNode> {
        let tab = self.active_tab();
        let index = tab.list_state.selected()?;
        self.nodes(tab.search_type).get(index)
    }

    /// Advance timers and apply arrived responses
    pub fn tick(&mut self, now: Instant) {
        self.controller.tick(now);

        let tab = &mut self.tabs[self.active];
        if let Some(interval) = tab.refresh.as_mut() {
            if interval.poll(now) && self.controller.resubmit(tab.widget).is_some() {
                log::debug!("auto-refreshing {} results", tab.search_type);
                self.last_refresh = Some(Utc::now());
            }
        }

        if self.controller.pump() > 0 {
            self.sync_selection();
        }
        self.drain_selections();
        self.poll_action_replies(now);
        self.toasts.expire(now);
    }

    fn poll_action_replies(&mut self, now: Instant) {
        while let Ok(reply) = self.action_rx.try_recv() {
            self.pending_actions = self.pending_actions.saturating_sub(1);
            match reply.result {
                Ok(response) => {
                    let message = response
                        .message
                        .unwrap_or_else(|| reply.request.fallback_message());
                    self.toasts.push(message, ToastKind::Success, now);
                    self.controller.resubmit(reply.widget);
                }
                Err(message) => {
                    self.toasts.push(message, ToastKind::Error, now);
                }
            }
        }
    }

    fn queue_action(&mut self, request: ActionRequest) {
        let widget = self.active_tab().widget;
        if self.action_tx.send((widget, request)).is_ok() {
            self.pending_actions += 1;
        } else {
            log::error!("action worker is gone, dropping {}", request.describe());
        }
    }

    /// Keep each list's highlight on an existing row
    fn sync_selection(&mut self) {
        for index in 0..self.tabs.len() {
            let count = self.nodes(self.tabs[index].search_type).len();
            let state = &mut self.tabs[index].list_state;
            if count == 0 {
                state.select(None);
            } else {
                let current = state.selected().unwrap_or(0);
                state.select(Some(current.min(count - 1)));
            }
        }
    }

    fn drain_selections(&mut self) {
        while let Ok(event) = self.selections.try_recv() {
            let now = Instant::now();
            self.toasts
                .push(format!("Selected {}", event.item.name()), ToastKind::Success, now);
            self.last_selection = Some(event);
        }
    }

    fn select_prev(&mut self) {
        let state = &mut self.tabs[self.active].list_state;
        if let Some(current) = state.selected() {
            state.select(Some(current.saturating_sub(1)));
        }
    }

    fn select_next(&mut self) {
        let count = self.nodes(self.active_tab().search_type).len();
        let state = &mut self.tabs[self.active].list_state;
        match state.selected() {
            Some(current) if current + 1 < count => state.select(Some(current + 1)),
            None if count > 0 => state.select(Some(0)),
            _ => {}
        }
    }

    fn switch_tab(&mut self, forward: bool) {
        let n = self.tabs.len();
        self.active = if forward {
            (self.active + 1) % n
        } else {
            (self.active + n - 1) % n
        };
    }

    fn activate_selected(&mut self) {
        let tab = self.active_tab();
        if let Some(index) = tab.list_state.selected() {
            let search_type = tab.search_type;
            self.controller.activate(search_type, index);
            self.drain_selections();
        }
    }

    /// Move the highlighted order one step along its workflow
    fn advance_order_status(&mut self, now: Instant) {
        let Some(SearchResult::Order(order)) = self.selected_node().map(|node| node.item.clone())
        else {
            return;
        };
        let Some(next) = order.order_status().and_then(|status| status.next()) else {
            self.toasts.push(
                format!("Order #{} is already {}", order.id, order.status),
                ToastKind::Warning,
                now,
            );
            return;
        };

        self.queue_action(ActionRequest::AdvanceOrder {
            order_id: order.id,
            status: next,
        });
    }

    fn toggle_item(&mut self, now: Instant) {
        let Some(SearchResult::MenuItem(item)) = self.selected_node().map(|node| node.item.clone())
        else {
            return;
        };
        let Some(item_id) = item.id else {
            self.toasts
                .push(format!("{} has no id", item.name), ToastKind::Warning, now);
            return;
        };

        self.queue_action(ActionRequest::ToggleItem { item_id });
    }

    pub fn handle_event(&mut self, event: Event, now: Instant) {
        let Event::Key(key) = event else {
            return;
        };
        if key.kind != KeyEventKind::Press {
            return;
        }

        let has_ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Esc => self.should_quit = true,
            KeyCode::Char('c') if has_ctrl => self.should_quit = true,
            KeyCode::Tab => self.switch_tab(true),
            KeyCode::BackTab => self.switch_tab(false),
            KeyCode::Up => self.select_prev(),
            KeyCode::Down => self.select_next(),
            KeyCode::Enter => self.activate_selected(),
            KeyCode::Char('s') if has_ctrl => self.advance_order_status(now),
            KeyCode::Char('t') if has_ctrl => self.toggle_item(now),
            code => {
                let tab = &mut self.tabs[self.active];
                if tab.input.handle_key(code, key.modifiers) {
                    self.controller.on_input(tab.widget, &tab.input.text, now);
                }
            }
        }
    }

    /// How long the event loop may block before the next timer is due
    fn poll_timeout(&self, now: Instant) -> Duration {
        self.controller
            .next_deadline()
            .map(|deadline| deadline.saturating_duration_since(now))
            .unwrap_or(FRAME_TIME)
            .min(FRAME_TIME)
    }
}

/// Run the interactive search TUI. Returns the last selection, if any.
pub fn run(config: &Config, initial: SearchType) -> Result<Option<SelectionEvent>> {
    let client = Arc::new(config.client()?);
    let endpoints = config.endpoint_map();
    let dispatcher = SearchDispatcher::new(client.clone(), endpoints.clone())
        .with_min_query_chars(config.search.min_query_chars);
    let controller = SearchController::new(
        config.controller_options(),
        dispatcher,
        ResultBoard::with_types(SearchType::ALL),
    );
    let settings = AppSettings {
        initial,
        endpoints,
        refresh: config.refresh_policy(),
        toast_duration: config.toast_duration(),
        min_query_chars: config.search.min_query_chars,
    };
    let mut app = App::new(controller, client, settings, Instant::now());

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, SetCursorStyle::BlinkingBar)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_loop(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        SetCursorStyle::DefaultUserShape
    )?;
    terminal.show_cursor()?;

    result.map(|()| app.last_selection)
}

fn run_loop(terminal: &mut Terminal<CrosstermBackend<Stdout>>, app: &mut App) -> Result<()> {
    loop {
        app.tick(Instant::now());

        terminal.draw(|f| ui::render(f, app))?;

        if event::poll(app.poll_timeout(Instant::now()))? {
            let event = event::read()?;
            app.handle_event(event, Instant::now());
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crossterm::event::KeyEvent;
    use rms_search::{ControllerOptions, SearchTransport};
    use std::sync::Mutex;

    pub(crate) const WAIT: Duration = Duration::from_secs(2);

    /// Serves fixed bodies keyed by endpoint path, ignoring the query
    #[derive(Default)]
    pub(crate) struct StaticTransport {
        pub(crate) bodies: Vec<(&'static str, &'static str)>,
        pub(crate) requests: Mutex<Vec<String>>,
    }

    impl SearchTransport for StaticTransport {
        fn get(&self, path_and_query: &str) -> anyhow::Result<Vec<u8>> {
            self.requests.lock().unwrap().push(path_and_query.to_string());
            let body = self
                .bodies
                .iter()
                .find(|(path, _)| path_and_query.starts_with(path))
                .map(|(_, body)| *body)
                .unwrap_or("[]");
            Ok(body.as_bytes().to_vec())
        }
    }

    #[derive(Default)]
    pub(crate) struct RecordingActions {
        pub(crate) calls: Mutex<Vec<String>>,
        pub(crate) fail: bool,
        /// Blocks the next write until the paired sender fires or drops
        pub(crate) hold: Mutex<Option<Receiver<()>>>,
    }

    impl RecordingActions {
        fn record(&self, call: String) {
            self.calls.lock().unwrap().push(call);
            let hold = self.hold.lock().unwrap().take();
            if let Some(hold) = hold {
                let _ = hold.recv();
            }
        }
    }

    impl ActionBackend for RecordingActions {
        fn update_order_status(
            &self,
            order_id: u64,
            status: OrderStatus,
        ) -> Result<ActionResponse, ClientError> {
            self.record(format!("status {order_id} {status}"));
            if self.fail {
                return Err(ClientError::Rejected("Invalid request".into()));
            }
            Ok(ActionResponse {
                status: "success".into(),
                message: Some(format!("Order status updated to {}", status.label())),
                new_status: Some(status.to_string()),
                is_available: None,
            })
        }

        fn toggle_item_availability(&self, item_id: u64) -> Result<ActionResponse, ClientError> {
            self.record(format!("toggle {item_id}"));
            Ok(ActionResponse {
                status: "success".into(),
                message: Some("Item disabled successfully!".into()),
                new_status: None,
                is_available: Some(false),
            })
        }
    }

    pub(crate) fn app_with(
        transport: Arc<StaticTransport>,
        actions: Arc<RecordingActions>,
        initial: SearchType,
        t0: Instant,
    ) -> App {
        let dispatcher = SearchDispatcher::new(transport, EndpointMap::default());
        let controller = SearchController::new(
            ControllerOptions::default(),
            dispatcher,
            ResultBoard::with_types(SearchType::ALL),
        );
        let settings = AppSettings {
            initial,
            endpoints: EndpointMap::default(),
            refresh: RefreshPolicy::default(),
            toast_duration: rms_ui::DEFAULT_TOAST_DURATION,
            min_query_chars: 2,
        };
        App::new(controller, actions, settings, t0)
    }

    pub(crate) fn key(app: &mut App, code: KeyCode, modifiers: KeyModifiers, now: Instant) {
        app.handle_event(Event::Key(KeyEvent::new(code, modifiers)), now);
    }

    pub(crate) fn type_text(app: &mut App, text: &str, now: Instant) {
        for c in text.chars() {
            key(app, KeyCode::Char(c), KeyModifiers::NONE, now);
        }
    }

    /// Fire the debounce and wait for the response to render
    pub(crate) fn settle(app: &mut App, now: Instant) {
        app.tick(now);
        assert_eq!(app.controller.pump_timeout(WAIT), 1);
        app.tick(now);
    }

    /// Tick until every queued write has replied
    pub(crate) fn await_actions(app: &mut App, now: Instant) {
        let deadline = Instant::now() + WAIT;
        while app.pending_actions > 0 {
            assert!(Instant::now() < deadline, "write action never replied");
            thread::sleep(Duration::from_millis(5));
            app.tick(now);
        }
    }

    const ORDERS: &str = r#"[{"id": 31, "customer": "Ada", "status": "preparing", "total_price": "18.00"},
                             {"id": 32, "customer": "Adam", "status": "delivered"}]"#;

    #[test]
    fn typing_searches_active_tab_and_enter_selects() {
        let transport = Arc::new(StaticTransport {
            bodies: vec![(
                "/customers/ajax/search/",
                r#"{"customers": [{"id": 1, "name": "Ada", "phone": "555", "email": "ada@example.com"}]}"#,
            )],
            ..Default::default()
        });
        let t0 = Instant::now();
        let mut app = app_with(transport.clone(), Arc::default(), SearchType::Customers, t0);

        type_text(&mut app, "ada", t0);
        app.tick(t0 + Duration::from_millis(100));
        assert!(transport.requests.lock().unwrap().is_empty());

        settle(&mut app, t0 + Duration::from_millis(300));
        assert_eq!(app.active_tab().list_state.selected(), Some(0));

        key(&mut app, KeyCode::Enter, KeyModifiers::NONE, t0);
        let selection = app.last_selection.clone().expect("selection");
        assert_eq!(selection.search_type, SearchType::Customers);
        assert_eq!(selection.item.name(), "Ada");
        assert_eq!(app.toasts.latest().map(|t| t.kind), Some(ToastKind::Success));
    }

    #[test]
    fn tabs_cycle_both_ways() {
        let t0 = Instant::now();
        let mut app = app_with(Arc::default(), Arc::default(), SearchType::Menu, t0);
        assert_eq!(app.active_tab().search_type, SearchType::Menu);
        key(&mut app, KeyCode::Tab, KeyModifiers::NONE, t0);
        assert_eq!(app.active_tab().search_type, SearchType::Orders);
        key(&mut app, KeyCode::Tab, KeyModifiers::NONE, t0);
        assert_eq!(app.active_tab().search_type, SearchType::Customers);
        key(&mut app, KeyCode::BackTab, KeyModifiers::SHIFT, t0);
        assert_eq!(app.active_tab().search_type, SearchType::Orders);
        key(&mut app, KeyCode::Esc, KeyModifiers::NONE, t0);
        assert!(app.should_quit);
    }

    #[test]
    fn ctrl_s_advances_highlighted_order() {
        let transport = Arc::new(StaticTransport {
            bodies: vec![("/orders/ajax/search/", ORDERS)],
            ..Default::default()
        });
        let actions = Arc::new(RecordingActions::default());
        let t0 = Instant::now();
        let mut app = app_with(transport, actions.clone(), SearchType::Orders, t0);

        type_text(&mut app, "ad", t0);
        settle(&mut app, t0 + Duration::from_millis(300));

        key(&mut app, KeyCode::Char('s'), KeyModifiers::CONTROL, t0);
        await_actions(&mut app, t0);
        assert_eq!(*actions.calls.lock().unwrap(), vec!["status 31 ready"]);
        assert_eq!(
            app.toasts.latest().map(|t| t.message.as_str()),
            Some("Order status updated to Ready")
        );

        key(&mut app, KeyCode::Down, KeyModifiers::NONE, t0);
        key(&mut app, KeyCode::Char('s'), KeyModifiers::CONTROL, t0);
        assert_eq!(app.pending_actions, 0);
        assert_eq!(actions.calls.lock().unwrap().len(), 1);
        assert_eq!(app.toasts.latest().map(|t| t.kind), Some(ToastKind::Warning));
    }

    #[test]
    fn write_runs_off_the_ui_thread() {
        let transport = Arc::new(StaticTransport {
            bodies: vec![("/orders/ajax/search/", ORDERS)],
            ..Default::default()
        });
        let (release, hold) = mpsc::channel();
        let actions = Arc::new(RecordingActions {
            hold: Mutex::new(Some(hold)),
            ..Default::default()
        });
        let t0 = Instant::now();
        let mut app = app_with(transport.clone(), actions.clone(), SearchType::Orders, t0);

        type_text(&mut app, "ad", t0);
        settle(&mut app, t0 + Duration::from_millis(300));

        // The backend is stuck, yet the key returns and the UI keeps searching
        key(&mut app, KeyCode::Char('s'), KeyModifiers::CONTROL, t0);
        assert_eq!(app.pending_actions, 1);
        type_text(&mut app, "a", t0);
        settle(&mut app, t0 + Duration::from_millis(600));
        assert_eq!(app.pending_actions, 1);
        assert_eq!(transport.requests.lock().unwrap().len(), 2);
        assert_ne!(
            app.toasts.latest().map(|t| t.message.as_str()),
            Some("Order status updated to Ready")
        );

        release.send(()).unwrap();
        await_actions(&mut app, t0);
        assert_eq!(
            app.toasts.latest().map(|t| t.message.as_str()),
            Some("Order status updated to Ready")
        );
        assert_eq!(*actions.calls.lock().unwrap(), vec!["status 31 ready"]);
    }

    #[test]
    fn failed_action_shows_error_toast() {
        let transport = Arc::new(StaticTransport {
            bodies: vec![("/orders/ajax/search/", ORDERS)],
            ..Default::default()
        });
        let actions = Arc::new(RecordingActions {
            fail: true,
            ..Default::default()
        });
        let t0 = Instant::now();
        let mut app = app_with(transport, actions, SearchType::Orders, t0);

        type_text(&mut app, "ad", t0);
        settle(&mut app, t0 + Duration::from_millis(300));
        key(&mut app, KeyCode::Char('s'), KeyModifiers::CONTROL, t0);
        await_actions(&mut app, t0);

        let toast = app.toasts.latest().expect("toast");
        assert_eq!(toast.kind, ToastKind::Error);
        assert_eq!(toast.message, "Invalid request");
    }

    #[test]
    fn ctrl_t_toggles_menu_item() {
        let transport = Arc::new(StaticTransport {
            bodies: vec![(
                "/menu/ajax/search/",
                r#"{"items": [{"id": 5, "name": "Soup", "price": "4.50", "category": "Starters"}]}"#,
            )],
            ..Default::default()
        });
        let actions = Arc::new(RecordingActions::default());
        let t0 = Instant::now();
        let mut app = app_with(transport.clone(), actions.clone(), SearchType::Menu, t0);

        type_text(&mut app, "soup", t0);
        settle(&mut app, t0 + Duration::from_millis(300));
        key(&mut app, KeyCode::Char('t'), KeyModifiers::CONTROL, t0);
        await_actions(&mut app, t0);

        assert_eq!(*actions.calls.lock().unwrap(), vec!["toggle 5"]);
        assert_eq!(
            app.toasts.latest().map(|t| t.message.as_str()),
            Some("Item disabled successfully!")
        );
        // A successful write reloads the page
        app.controller.pump_timeout(WAIT);
        assert_eq!(transport.requests.lock().unwrap().len(), 2);
    }

    #[test]
    fn orders_tab_refreshes_on_interval() {
        let transport = Arc::new(StaticTransport {
            bodies: vec![("/orders/ajax/search/", ORDERS)],
            ..Default::default()
        });
        let t0 = Instant::now();
        let mut app = app_with(transport.clone(), Arc::default(), SearchType::Orders, t0);

        type_text(&mut app, "ad", t0);
        settle(&mut app, t0 + Duration::from_millis(300));
        assert!(app.last_refresh.is_none());

        app.tick(t0 + Duration::from_secs(120));
        assert!(app.last_refresh.is_some());
        app.controller.pump_timeout(WAIT);

        assert_eq!(
            *transport.requests.lock().unwrap(),
            vec!["/orders/ajax/search/?q=ad", "/orders/ajax/search/?q=ad"]
        );
    }

    #[test]
    fn customers_tab_does_not_auto_refresh() {
        let transport = Arc::new(StaticTransport::default());
        let t0 = Instant::now();
        let mut app = app_with(transport.clone(), Arc::default(), SearchType::Customers, t0);

        type_text(&mut app, "ad", t0);
        settle(&mut app, t0 + Duration::from_millis(300));
        app.tick(t0 + Duration::from_secs(240));
        assert!(app.last_refresh.is_none());
        assert_eq!(transport.requests.lock().unwrap().len(), 1);
    }
}
