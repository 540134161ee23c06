// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Event emission seam between the native side and the embedding host.
//
// The real bridging mechanism belongs to the host; this crate only needs
// "emit a named event with a JSON payload". Hosts plug in their own
// `EventEmitter`; the channel-backed implementation below covers embeddings
// that consume events from an async receiver, and the stub covers headless
// builds.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde_json::Value;
use tokio::sync::mpsc;
use tracing::warn;

use inappstories_core::error::{InappstoriesError, Result};

/// Emits named events across the host bridge.
pub trait EventEmitter: Send + Sync {
    /// Deliver one event to the host. Implementations must not block.
    fn emit(&self, event: &str, payload: Value) -> Result<()>;
}

/// An event as received by the host.
#[derive(Debug, Clone)]
pub struct EmittedEvent {
    pub name: String,
    pub payload: Value,
    pub emitted_at: DateTime<Utc>,
}

/// Emitter backed by an unbounded tokio channel.
///
/// The host keeps the receiver and drains events at its own pace; a dropped
/// receiver turns every subsequent emit into `EmitterClosed`.
pub struct ChannelEmitter {
    tx: mpsc::UnboundedSender<EmittedEvent>,
}

impl ChannelEmitter {
    pub fn new() -> (Arc<Self>, mpsc::UnboundedReceiver<EmittedEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Arc::new(Self { tx }), rx)
    }
}

impl EventEmitter for ChannelEmitter {
    fn emit(&self, event: &str, payload: Value) -> Result<()> {
        self.tx
            .send(EmittedEvent {
                name: event.to_string(),
                payload,
                emitted_at: Utc::now(),
            })
            .map_err(|_| InappstoriesError::EmitterClosed)
    }
}

/// No-op emitter for embeddings without an event channel.
pub struct StubEmitter;

impl EventEmitter for StubEmitter {
    fn emit(&self, event: &str, _payload: Value) -> Result<()> {
        warn!(event, "event dropped: stub emitter has no host channel");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn channel_emitter_delivers_events_in_order() {
        let (emitter, mut rx) = ChannelEmitter::new();
        emitter.emit("first", Value::Null).unwrap();
        emitter
            .emit("second", serde_json::json!({"k": 1}))
            .unwrap();

        assert_eq!(rx.try_recv().unwrap().name, "first");
        let second = rx.try_recv().unwrap();
        assert_eq!(second.name, "second");
        assert_eq!(second.payload, serde_json::json!({"k": 1}));
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn closed_receiver_surfaces_emitter_closed() {
        let (emitter, rx) = ChannelEmitter::new();
        drop(rx);
        let err = emitter.emit("orphaned", Value::Null).unwrap_err();
        assert!(matches!(err, InappstoriesError::EmitterClosed));
    }

    #[test]
    fn stub_emitter_swallows_events() {
        assert!(StubEmitter.emit("anything", Value::Null).is_ok());
    }
}
