#![forbid(unsafe_code)]
#![cfg(feature = "tracing")]

//! Structured log events emitted by the layout algebra and sessions.
//!
//! Every event must carry structured fields beyond its message, and the
//! fields must name the item or breakpoint being acted on.
//!
//! Run:
//!   cargo test -p tessera-layout --features tracing --test tracing_capture

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use tessera_layout::{
    Breakpoints, CompactionMode, GridConfig, GridInteraction, LayoutItem, MoveOptions, PixelPoint,
    ResponsiveGrid, compact, correct_bounds, move_element,
};
use tracing_subscriber::layer::SubscriberExt;

#[derive(Debug, Clone)]
struct CapturedEvent {
    level: tracing::Level,
    fields: HashMap<String, String>,
}

impl CapturedEvent {
    fn message(&self) -> &str {
        self.fields.get("message").map_or("", String::as_str)
    }

    fn field(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }
}

struct EventCapture {
    events: Arc<Mutex<Vec<CapturedEvent>>>,
}

struct FieldVisitor(Vec<(String, String)>);

impl tracing::field::Visit for FieldVisitor {
    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        self.0.push((field.name().to_string(), format!("{value:?}")));
    }

    fn record_u64(&mut self, field: &tracing::field::Field, value: u64) {
        self.0.push((field.name().to_string(), value.to_string()));
    }

    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        self.0.push((field.name().to_string(), value.to_string()));
    }

    fn record_bool(&mut self, field: &tracing::field::Field, value: bool) {
        self.0.push((field.name().to_string(), value.to_string()));
    }
}

impl<S: tracing::Subscriber> tracing_subscriber::Layer<S> for EventCapture {
    fn on_event(&self, event: &tracing::Event<'_>, _ctx: tracing_subscriber::layer::Context<'_, S>) {
        let mut visitor = FieldVisitor(Vec::new());
        event.record(&mut visitor);
        self.events.lock().unwrap().push(CapturedEvent {
            level: *event.metadata().level(),
            fields: visitor.0.into_iter().collect(),
        });
    }
}

fn with_captured_events<F: FnOnce()>(f: F) -> Vec<CapturedEvent> {
    let events = Arc::new(Mutex::new(Vec::new()));
    let subscriber = tracing_subscriber::registry()
        .with(tracing_subscriber::filter::LevelFilter::TRACE)
        .with(EventCapture {
            events: events.clone(),
        });
    tracing::subscriber::with_default(subscriber, f);
    let captured = events.lock().unwrap().clone();
    captured
}

fn find<'a>(events: &'a [CapturedEvent], message: &str) -> Vec<&'a CapturedEvent> {
    events.iter().filter(|e| e.message() == message).collect()
}

#[test]
fn every_event_has_structured_fields() {
    let events = with_captured_events(|| {
        let mut layout = vec![
            LayoutItem::fixed("s", 0, 0, 2, 1),
            LayoutItem::new("a", 0, 0, 2, 1),
            LayoutItem::new("b", 0, 4, 2, 1),
        ];
        correct_bounds(&mut layout, 4);
        let layout = compact(&layout, CompactionMode::Vertical, 4);
        let _ = move_element(
            &layout,
            "b",
            Some(0),
            Some(0),
            MoveOptions::user(CompactionMode::Vertical, 4),
        );
    });

    assert!(!events.is_empty());
    for event in &events {
        assert!(
            event.fields.keys().any(|k| k != "message"),
            "event '{}' has no structured fields",
            event.message()
        );
    }
}

#[test]
fn move_is_logged_at_debug_with_item_id() {
    let events = with_captured_events(|| {
        let layout = vec![LayoutItem::new("a", 0, 0, 1, 1), LayoutItem::new("b", 0, 1, 1, 1)];
        let _ = move_element(
            &layout,
            "b",
            Some(0),
            Some(0),
            MoveOptions::user(CompactionMode::Vertical, 4),
        );
    });

    let moves = find(&events, "moving item");
    assert_eq!(moves.len(), 2, "user move plus the nested push of `a`");
    assert_eq!(moves[0].level, tracing::Level::DEBUG);
    assert_eq!(moves[0].field("id"), Some("b"));
    assert_eq!(moves[0].field("from_y"), Some("1"));
    assert_eq!(moves[0].field("to_y"), Some("Some(0)"));
    assert_eq!(moves[1].field("id"), Some("a"));
}

#[test]
fn rejected_move_is_traced() {
    let events = with_captured_events(|| {
        let layout = vec![LayoutItem::new("a", 0, 0, 1, 1), LayoutItem::new("b", 0, 1, 1, 1)];
        let options = MoveOptions::user(CompactionMode::Vertical, 4).prevent_collision(true);
        let _ = move_element(&layout, "b", Some(0), Some(0), options);
    });

    let rejected = find(&events, "collision prevented, reverting move");
    assert_eq!(rejected.len(), 1);
    assert_eq!(rejected[0].level, tracing::Level::TRACE);
    assert_eq!(rejected[0].field("id"), Some("b"));
}

#[test]
fn drag_session_logs_start_and_stop() {
    let events = with_captured_events(|| {
        let config = GridConfig::default()
            .with_cols(4)
            .with_container_width(265.0)
            .with_row_height(60.0);
        let mut grid = GridInteraction::new(config, vec![LayoutItem::new("a", 0, 0, 1, 1)]);
        grid.drag_start("a", PixelPoint::new(5.0, 5.0)).unwrap();
        grid.drag("a", 65.0, 0.0).unwrap();
        grid.drag_stop("a").unwrap();
    });

    let start = find(&events, "drag start");
    assert_eq!(start.len(), 1);
    assert_eq!(start[0].field("id"), Some("a"));
    assert_eq!(start[0].field("x"), Some("0"));
    assert_eq!(find(&events, "drag").len(), 1);
    assert_eq!(find(&events, "drag stop").len(), 1);
}

#[test]
fn breakpoint_change_names_both_ends() {
    let events = with_captured_events(|| {
        let mut grid = ResponsiveGrid::new(
            Breakpoints::default_widths(),
            Breakpoints::default_columns(),
            Breakpoints::new(),
            CompactionMode::Vertical,
            1300.0,
        )
        .unwrap();
        grid.on_width_change(500.0).unwrap();
    });

    let change = find(&events, "breakpoint change");
    assert_eq!(change.len(), 1);
    assert_eq!(change[0].field("from"), Some("lg"));
    assert_eq!(change[0].field("to"), Some("xs"));
    assert_eq!(change[0].field("cols"), Some("4"));
}
