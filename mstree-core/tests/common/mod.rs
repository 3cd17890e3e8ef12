//! Shared fixtures and a tracing capture layer for integration tests.

use std::{
    collections::HashMap,
    fmt,
    sync::{Arc, Mutex},
};

use mstree_core::GraphInput;
use tracing::{
    Event, Level, Subscriber,
    field::{Field, Visit},
};
use tracing_subscriber::{Layer, layer::Context, registry::LookupSpan};

/// Four nodes in a square with a heavy `1-4` diagonal edge.
#[must_use]
pub fn square() -> GraphInput {
    GraphInput::new(
        ["1", "2", "3", "4"],
        ["A", "B", "C", "D"],
        vec![
            vec![1, 0, 0, 1],
            vec![1, 1, 0, 0],
            vec![0, 1, 1, 0],
            vec![0, 0, 1, 1],
        ],
        [("A", 1.0), ("B", 2.0), ("C", 3.0), ("D", 10.0)],
    )
}

/// Two disjoint pairs, `1-2` and `3-4`.
#[must_use]
pub fn two_pairs() -> GraphInput {
    GraphInput::new(
        ["1", "2", "3", "4"],
        ["A", "B"],
        vec![vec![1, 0], vec![1, 0], vec![0, 1], vec![0, 1]],
        [("A", 1.0), ("B", 2.0)],
    )
}

/// A closed span or an event, with its recorded fields.
#[derive(Clone, Debug)]
pub struct Record {
    pub name: String,
    pub level: Level,
    pub fields: HashMap<String, String>,
}

/// Collects closed spans and emitted events for assertions.
#[derive(Clone, Default)]
pub struct CaptureLayer {
    spans: Arc<Mutex<Vec<Record>>>,
    events: Arc<Mutex<Vec<Record>>>,
}

impl CaptureLayer {
    #[must_use]
    pub fn spans(&self) -> Vec<Record> {
        self.spans.lock().expect("lock poisoned").clone()
    }

    #[must_use]
    pub fn events(&self) -> Vec<Record> {
        self.events.lock().expect("lock poisoned").clone()
    }

    #[must_use]
    pub fn span(&self, name: &str) -> Option<Record> {
        self.spans().into_iter().find(|span| span.name == name)
    }
}

impl<S> Layer<S> for CaptureLayer
where
    S: Subscriber + for<'span> LookupSpan<'span>,
{
    fn on_new_span(
        &self,
        attrs: &tracing::span::Attributes<'_>,
        id: &tracing::span::Id,
        ctx: Context<'_, S>,
    ) {
        let Some(span) = ctx.span(id) else {
            return;
        };
        let mut record = Record {
            name: attrs.metadata().name().to_owned(),
            level: *attrs.metadata().level(),
            fields: HashMap::new(),
        };
        attrs.record(&mut FieldRecorder(&mut record.fields));
        span.extensions_mut().insert(record);
    }

    fn on_record(
        &self,
        id: &tracing::span::Id,
        values: &tracing::span::Record<'_>,
        ctx: Context<'_, S>,
    ) {
        let Some(span) = ctx.span(id) else {
            return;
        };
        if let Some(record) = span.extensions_mut().get_mut::<Record>() {
            values.record(&mut FieldRecorder(&mut record.fields));
        }
    }

    fn on_close(&self, id: tracing::span::Id, ctx: Context<'_, S>) {
        let Some(span) = ctx.span(&id) else {
            return;
        };
        if let Some(record) = span.extensions_mut().remove::<Record>() {
            self.spans.lock().expect("lock poisoned").push(record);
        }
    }

    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let mut fields = HashMap::new();
        event.record(&mut FieldRecorder(&mut fields));
        self.events.lock().expect("lock poisoned").push(Record {
            name: event.metadata().name().to_owned(),
            level: *event.metadata().level(),
            fields,
        });
    }
}

struct FieldRecorder<'a>(&'a mut HashMap<String, String>);

impl Visit for FieldRecorder<'_> {
    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        self.0.insert(field.name().to_owned(), format!("{value:?}"));
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        self.0.insert(field.name().to_owned(), value.to_owned());
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        self.0.insert(field.name().to_owned(), value.to_string());
    }

    fn record_bool(&mut self, field: &Field, value: bool) {
        self.0.insert(field.name().to_owned(), value.to_string());
    }
}
