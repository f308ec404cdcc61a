use rms_client::{ApiClient, ClientError, CsrfInterceptor, DEFAULT_TIMEOUT};
use rms_search::{
    ControllerOptions, EndpointMap, OrderStatus, ResultBoard, SearchController, SearchDispatcher,
    SearchResult, SearchType,
};
use rms_test_utils::serve;
use rust_decimal_macros::dec;
use std::sync::Arc;
use std::time::{Duration, Instant};

fn client(base_url: &str) -> ApiClient {
    ApiClient::new(base_url, DEFAULT_TIMEOUT)
        .unwrap()
        .with_interceptor(CsrfInterceptor::new("csrf-abc").unwrap())
}

#[test]
fn search_request_is_a_plain_get() {
    let (base_url, requests) = serve(vec![(
        200,
        r#"{"customers": [{"id": 1, "name": "Ada Lovelace", "phone": "555-0100", "email": "ada@example.com"}]}"#,
    )]);

    let results = client(&base_url)
        .search(&EndpointMap::default(), SearchType::Customers, "ada l")
        .unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].name(), "Ada Lovelace");

    let request = requests.recv().unwrap();
    assert_eq!(request.method, "GET");
    assert_eq!(request.path, "/customers/ajax/search/?q=ada%20l");
    assert!(!request.headers.contains_key("x-csrftoken"));
}

#[test]
fn order_status_update_posts_form_with_csrf() {
    let (base_url, requests) = serve(vec![(
        200,
        r#"{"status": "success", "new_status": "ready", "message": "Order status updated to Ready"}"#,
    )]);

    let reply = client(&base_url)
        .update_order_status(17, OrderStatus::Ready)
        .unwrap();
    assert_eq!(reply.new_status.as_deref(), Some("ready"));

    let request = requests.recv().unwrap();
    assert_eq!(request.method, "POST");
    assert_eq!(request.path, "/orders/ajax/17/status/");
    assert_eq!(request.body, "status=ready");
    assert_eq!(request.headers["x-csrftoken"], "csrf-abc");
    assert_eq!(
        request.headers["content-type"],
        "application/x-www-form-urlencoded"
    );
}

#[test]
fn toggle_gets_json_content_type_from_interceptor() {
    let (base_url, requests) = serve(vec![(
        200,
        r#"{"status": "success", "is_available": false, "message": "Item disabled successfully!"}"#,
    )]);

    let reply = client(&base_url).toggle_item_availability(4).unwrap();
    assert_eq!(reply.is_available, Some(false));

    let request = requests.recv().unwrap();
    assert_eq!(request.path, "/menu/ajax/item/4/toggle/");
    assert_eq!(request.headers["content-type"], "application/json");
    assert_eq!(request.headers["x-csrftoken"], "csrf-abc");
}

#[test]
fn rejected_action_is_an_error() {
    let (base_url, _requests) = serve(vec![(
        200,
        r#"{"status": "error", "message": "Invalid request"}"#,
    )]);

    let err = client(&base_url)
        .update_order_status(17, OrderStatus::Cancelled)
        .unwrap_err();
    assert!(matches!(err, ClientError::Rejected(ref m) if m == "Invalid request"));
}

#[test]
fn http_failure_status_is_reported() {
    let (base_url, _requests) = serve(vec![(403, r#"{"detail": "CSRF"}"#)]);

    let err = client(&base_url).toggle_item_availability(4).unwrap_err();
    match err {
        ClientError::Status { status, path } => {
            assert_eq!(status.as_u16(), 403);
            assert_eq!(path, "/menu/ajax/item/4/toggle/");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn detail_lookups_decode() {
    let (base_url, _requests) = serve(vec![
        (
            200,
            r#"{"total_orders": 3, "total_spent": 54.5, "name": "Ada", "phone": "1", "email": "a@b.c"}"#,
        ),
        (
            200,
            r#"{"items": [{"name": "Soup", "quantity": 2, "price": "4.50", "total": "9.00"}],
                "total_items": 2, "total_price": "9.00", "customer": "Ada", "status": "Preparing"}"#,
        ),
    ]);
    let api = client(&base_url);

    let stats = api.customer_stats(1).unwrap();
    assert_eq!(stats.total_orders, 3);
    assert_eq!(stats.total_spent, dec!(54.5));

    let summary = api.order_summary(8).unwrap();
    assert_eq!(summary.items[0].total, dec!(9.00));
    assert_eq!(summary.status, "Preparing");
}

#[test]
fn controller_renders_results_fetched_over_http() {
    let (base_url, requests) = serve(vec![(
        200,
        r#"{"items": [{"id": 2, "name": "Pumpkin Pie", "price": "6.25", "category": "Desserts"}]}"#,
    )]);
    let dispatcher = SearchDispatcher::new(Arc::new(client(&base_url)), EndpointMap::default());
    let mut controller = SearchController::new(
        ControllerOptions::default(),
        dispatcher,
        ResultBoard::with_types(SearchType::ALL),
    );
    let input = controller.register_widget("menu");
    let t0 = Instant::now();

    controller.on_input(input, "pie", t0);
    assert_eq!(controller.tick(t0 + Duration::from_millis(300)), 1);
    assert_eq!(controller.pump_timeout(Duration::from_secs(5)), 1);

    let container = controller.board().container(SearchType::Menu).unwrap();
    assert_eq!(container.nodes()[0].view.detail, "$6.25 • Desserts");
    assert!(matches!(container.nodes()[0].item, SearchResult::MenuItem(_)));
    assert_eq!(requests.recv().unwrap().path, "/menu/ajax/search/?q=pie");
}
