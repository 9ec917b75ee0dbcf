//! Output targets for the event bus listener.

use std::io::{self, Result as IoResult, Stdout, Write};
use std::sync::{Arc, Mutex};

use super::event::Event;
use crate::telemetry::{PlainFormatter, TelemetryFormatter};

/// A destination the bus listener broadcasts each [`Event`] to.
///
/// Sinks receive the structured event and own its presentation; the bus
/// never formats on their behalf.
pub trait EventSink: Sync + Send {
    fn handle(&mut self, event: &Event) -> IoResult<()>;
}

/// Writes rendered events to the process's standard output.
///
/// The formatter is a type parameter so a run harness can swap the plain
/// line rendering for a structured one without a trait object.
pub struct StdOutSink<F: TelemetryFormatter = PlainFormatter> {
    stdout: Stdout,
    formatter: F,
}

impl<F: TelemetryFormatter> StdOutSink<F> {
    pub fn with_formatter(formatter: F) -> Self {
        Self {
            stdout: io::stdout(),
            formatter,
        }
    }
}

impl Default for StdOutSink {
    fn default() -> Self {
        Self::with_formatter(PlainFormatter)
    }
}

impl<F: TelemetryFormatter> EventSink for StdOutSink<F> {
    fn handle(&mut self, event: &Event) -> IoResult<()> {
        let rendered = self.formatter.render_event(event).join_lines();
        self.stdout.write_all(rendered.as_bytes())?;
        self.stdout.flush()
    }
}

/// Captures events in memory so a caller can assert on a run's output.
///
/// Clones share the same buffer: register one clone on the bus and keep
/// the other to [`snapshot`](Self::snapshot) after the listener stops.
#[derive(Clone, Default)]
pub struct MemorySink {
    captured: Arc<Mutex<Vec<Event>>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of every event captured so far, in arrival order.
    pub fn snapshot(&self) -> Vec<Event> {
        self.captured.lock().unwrap().clone()
    }

    /// Discard the captured events, e.g. between runs sharing one bus.
    pub fn clear(&self) {
        self.captured.lock().unwrap().clear();
    }
}

impl EventSink for MemorySink {
    fn handle(&mut self, event: &Event) -> IoResult<()> {
        self.captured.lock().unwrap().push(event.clone());
        Ok(())
    }
}
