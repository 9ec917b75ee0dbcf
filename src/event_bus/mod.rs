//! Event bus utilities providing fan-out to pluggable sinks.
//!
//! Tasks emit observability messages through a [`flume`] channel owned by an
//! [`EventBus`]; a background listener broadcasts them to every registered
//! [`EventSink`].

pub mod bus;
pub mod event;
pub mod sink;

pub use bus::EventBus;
pub use event::{DiagnosticEvent, Event, TaskEvent};
pub use sink::{EventSink, MemorySink, StdOutSink};
