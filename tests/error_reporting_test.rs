//! End-to-end error reporting test
//!
//! Builds a chain across layers of a small service, ships it through JSON
//! and reports it to an in-memory monitoring client.

use async_trait::async_trait;
use faultline::prelude::*;
use std::sync::{Arc, Mutex};

define_errors! {
    ORDER_NOT_FOUND = not_found("ORDER_NOT_FOUND", "order not found");
    SHOW_ORDER_FAILED = internal("SHOW_ORDER_FAILED", "cannot show order");
}

#[derive(Default)]
struct RecordingClient {
    events: Mutex<Vec<Event>>,
}

#[async_trait]
impl ReportClient for RecordingClient {
    async fn send(&self, event: &Event) -> ReportResult<Option<String>> {
        self.events
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(event.clone());
        Ok(Some(format!("ack-{}", event.event_id)))
    }
}

#[inline(never)]
fn load_order(id: u64) -> AppResult<String> {
    let io = std::io::Error::new(std::io::ErrorKind::NotFound, "orders/42.json missing");
    Err(ORDER_NOT_FOUND
        .with_cause(io)
        .with_input(Input::new().with("order_id", id)))
}

#[inline(never)]
fn show_order(id: u64) -> AppResult<String> {
    load_order(id).map_err(|e| SHOW_ORDER_FAILED.with_cause(e).with_input(Input::new().with("path", "/orders/42")))
}

fn handler() -> anyhow::Result<String> {
    Ok(show_order(42)?)
}

#[test]
fn test_chain_survives_anyhow_boundary() {
    let err = handler().unwrap_err();
    let app = find_app_error(err.as_ref()).expect("handler returns an AppError");

    assert_eq!(app.code(), "SHOW_ORDER_FAILED");
    assert_eq!(app.depth(), 2);
    assert!(ORDER_NOT_FOUND.in_chain(app));
    assert!(app.is_type(Classification::NotFound));
    assert_eq!(app.root_error().message(), "orders/42.json missing");
    assert_eq!(
        app.error_with_cause(),
        "SHOW_ORDER_FAILED: cannot show order\nORDER_NOT_FOUND: order not found\norders/42.json missing"
    );
}

#[test]
fn test_chain_round_trips_through_json() {
    let err = show_order(42).unwrap_err();
    let json = err.to_json();
    let restored = AppError::from_json(&json).unwrap();

    assert_eq!(restored, err);
    assert_eq!(
        restored.cause().unwrap().stacktrace().unwrap().caller().function,
        "load_order"
    );
    assert_eq!(restored.all_inputs().len(), 2);
}

#[tokio::test]
async fn test_report_chain_end_to_end() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();

    let client = Arc::new(RecordingClient::default());
    let config = ReportConfig::new()
        .with_env("integration")
        .with_release("0.4.2")
        .with_logger("orders")
        .with_tag("service", "shop");
    let reporter = Reporter::new(client.clone(), config);

    let err = show_order(42).unwrap_err();
    let id = reporter.capture_and_wait(&err).await.unwrap().unwrap();

    let events = client.events.lock().unwrap();
    assert_eq!(events.len(), 1);
    let event = &events[0];
    assert_eq!(id, format!("ack-{}", event.event_id));

    let kinds: Vec<_> = event.exception.values.iter().map(|e| e.kind.as_str()).collect();
    assert_eq!(kinds, vec!["GenericError", "ORDER_NOT_FOUND", "SHOW_ORDER_FAILED"]);
    assert_eq!(
        event.fingerprint,
        vec!["orders", "SHOW_ORDER_FAILED", "ORDER_NOT_FOUND", "GenericError"]
    );
    assert_eq!(event.message, "cannot show order");
    assert_eq!(event.culprit, "orders/42.json missing");
    assert_eq!(event.tag("service"), Some("shop"));
    assert_eq!(event.tag("status_code"), Some("500"));
    assert_eq!(event.environment.as_deref(), Some("integration"));

    let keys: Vec<_> = event.input_annotations.iter().map(|a| a.key.as_str()).collect();
    assert_eq!(keys, vec!["SHOW_ORDER_FAILED_0", "ORDER_NOT_FOUND_1"]);
    assert_eq!(event.extra["ORDER_NOT_FOUND_1"]["order_id"], 42);
}

#[tokio::test]
async fn test_panic_link_reports_fatal() {
    let client = Arc::new(RecordingClient::default());
    let reporter = Reporter::new(client.clone(), ReportConfig::default());

    let err = AppError::internal("WORKER", "worker crashed")
        .with_cause(AppError::new("INDEX", "index out of bounds").with_panic());
    reporter.capture_and_wait(&err).await.unwrap();

    let events = client.events.lock().unwrap();
    assert!(events[0].is_fatal());
}
