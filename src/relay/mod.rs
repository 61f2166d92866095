//! n8n webhook relay adapter.
//!
//! Forwards the last inbound chat message to a workflow webhook and
//! relays the reply back, emitting rate-limited status events to a
//! caller-supplied sink. Embedded as a library by a chat host; every
//! failure is surfaced to the host as a plain reply string, never as a
//! panic or process exit.

pub mod client;
pub mod status;

pub use client::{ChatMessage, RelayClient, RelayConfig, RelayContext};
pub use status::{StatusData, StatusEmitter, StatusEvent, StatusSink};
