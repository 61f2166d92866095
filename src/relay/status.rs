//! Rate-limited status event emission.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Structured status payload delivered to the host's event sink.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusEvent {
    #[serde(rename = "type")]
    pub event_type: String,
    pub data: StatusData,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusData {
    /// `"complete"` when done, `"in_progress"` otherwise.
    pub status: String,
    pub level: String,
    pub description: String,
    pub done: bool,
}

impl StatusEvent {
    pub fn new(level: &str, description: &str, done: bool) -> Self {
        Self {
            event_type: "status".to_string(),
            data: StatusData {
                status: (if done { "complete" } else { "in_progress" }).to_string(),
                level: level.to_string(),
                description: description.to_string(),
                done,
            },
        }
    }
}

/// Host-provided destination for status events.
#[async_trait]
pub trait StatusSink: Send + Sync {
    async fn emit(&self, event: StatusEvent);
}

/// Rate-limited invoker of a [`StatusSink`].
///
/// At most one event per `interval` is delivered, except `done=true`
/// which always goes through and resets the limiter. The last-emit
/// timestamp lives on this instance: one emitter must not be shared
/// across concurrent requests, or their emissions will throttle each
/// other.
#[derive(Debug)]
pub struct StatusEmitter {
    interval: Duration,
    enabled: bool,
    last_emit: Option<Instant>,
}

impl StatusEmitter {
    pub fn new(interval: Duration, enabled: bool) -> Self {
        Self {
            interval,
            enabled,
            last_emit: None,
        }
    }

    /// Deliver a status event unless disabled or inside the rate window.
    pub async fn emit(
        &mut self,
        sink: Option<&dyn StatusSink>,
        level: &str,
        description: &str,
        done: bool,
    ) {
        let Some(sink) = sink else { return };
        if !self.enabled {
            return;
        }

        let due = done
            || self
                .last_emit
                .map_or(true, |last| last.elapsed() >= self.interval);
        if !due {
            return;
        }

        sink.emit(StatusEvent::new(level, description, done)).await;
        self.last_emit = Some(Instant::now());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::Mutex;

    #[derive(Default)]
    struct Recorder {
        events: Arc<Mutex<Vec<StatusEvent>>>,
    }

    #[async_trait]
    impl StatusSink for Recorder {
        async fn emit(&self, event: StatusEvent) {
            self.events.lock().unwrap().push(event);
        }
    }

    #[tokio::test]
    async fn test_first_emission_passes() {
        let sink = Recorder::default();
        let mut emitter = StatusEmitter::new(Duration::from_secs(60), true);

        emitter.emit(Some(&sink), "info", "starting", false).await;

        let events = sink.events.lock().unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].data.status, "in_progress");
        assert_eq!(events[0].event_type, "status");
    }

    #[tokio::test]
    async fn test_rate_limit_suppresses_within_interval() {
        let sink = Recorder::default();
        let mut emitter = StatusEmitter::new(Duration::from_secs(60), true);

        emitter.emit(Some(&sink), "info", "one", false).await;
        emitter.emit(Some(&sink), "info", "two", false).await;

        assert_eq!(sink.events.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_done_bypasses_rate_limit() {
        let sink = Recorder::default();
        let mut emitter = StatusEmitter::new(Duration::from_secs(60), true);

        emitter.emit(Some(&sink), "info", "working", false).await;
        emitter.emit(Some(&sink), "info", "finished", true).await;

        let events = sink.events.lock().unwrap();
        assert_eq!(events.len(), 2);
        assert_eq!(events[1].data.status, "complete");
        assert!(events[1].data.done);
    }

    #[tokio::test]
    async fn test_interval_elapses() {
        let sink = Recorder::default();
        let mut emitter = StatusEmitter::new(Duration::from_millis(20), true);

        emitter.emit(Some(&sink), "info", "one", false).await;
        tokio::time::sleep(Duration::from_millis(30)).await;
        emitter.emit(Some(&sink), "info", "two", false).await;

        assert_eq!(sink.events.lock().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_disabled_emits_nothing() {
        let sink = Recorder::default();
        let mut emitter = StatusEmitter::new(Duration::from_secs(0), false);

        emitter.emit(Some(&sink), "error", "failed", true).await;

        assert!(sink.events.lock().unwrap().is_empty());
    }

    #[test]
    fn test_event_wire_shape() {
        let event = StatusEvent::new("info", "Calling n8n workflow...", false);
        let json = serde_json::to_value(&event).unwrap();

        assert_eq!(json["type"], "status");
        assert_eq!(json["data"]["status"], "in_progress");
        assert_eq!(json["data"]["level"], "info");
        assert_eq!(json["data"]["description"], "Calling n8n workflow...");
        assert_eq!(json["data"]["done"], false);
    }
}
