// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// The bridge module the host invokes methods on.
//
// Construction registers the module as the engine's delegate; engine
// notifications come back through `EngineDelegate::action_completed` and are
// forwarded to the host as named events. The engine holds only a `Weak`
// reference, so a module torn down by the host unregisters itself simply by
// being dropped.

use std::sync::{Arc, Weak};

use serde::Serialize;
use tracing::{debug, instrument, warn};

use inappstories_core::SingletonEvent;
use inappstories_core::error::{InappstoriesError, Result};
use inappstories_native::{EngineDelegate, StoryEngine};

use crate::emitter::EventEmitter;

/// Event emitted after each completed engine action.
pub const ENGINE_ACTION_EVENT: &str = "engineActionCompleted";

/// Event emitted when a story view changes state.
pub const VIEW_STATE_EVENT: &str = "nativeViewStateChange";

/// The host-facing stories module.
pub struct StoriesModule {
    engine: Arc<StoryEngine>,
    emitter: Arc<dyn EventEmitter>,
}

impl StoriesModule {
    /// Module name the host addresses method calls to.
    pub const NAME: &'static str = "Inappstories";

    /// Create a module bound to the process-wide shared engine.
    pub fn new(emitter: Arc<dyn EventEmitter>) -> Arc<Self> {
        Self::with_engine(StoryEngine::shared(), emitter)
    }

    /// Create a module bound to a specific engine instance.
    ///
    /// Used by isolated embeddings and tests that must not share the
    /// process-wide delegate slot.
    pub fn with_engine(engine: Arc<StoryEngine>, emitter: Arc<dyn EventEmitter>) -> Arc<Self> {
        let module = Arc::new(Self { engine, emitter });
        let weak: Weak<dyn EngineDelegate> = Arc::<Self>::downgrade(&module);
        module.engine.set_delegate(weak);
        debug!(module = Self::NAME, "module registered as engine delegate");
        module
    }

    /// Event names this module may emit.
    pub fn supported_events() -> &'static [&'static str] {
        &[ENGINE_ACTION_EVENT, VIEW_STATE_EVENT]
    }

    /// The engine this module is bound to.
    pub fn engine(&self) -> &Arc<StoryEngine> {
        &self.engine
    }

    /// Trigger the engine action and resolve once its completion fires.
    ///
    /// Resolves `true` on completion, matching the promise contract of the
    /// reference module.
    #[instrument(skip(self), fields(module = Self::NAME))]
    pub async fn call_native_action(&self) -> Result<bool> {
        debug!("call_native_action invoked from host");

        let (tx, rx) = tokio::sync::oneshot::channel();
        self.engine.perform_action(move || {
            debug!(module = Self::NAME, "completion block called");
            let _ = tx.send(());
        });

        rx.await.map_err(|_| {
            InappstoriesError::NativeCall("engine dropped the completion".to_string())
        })?;
        Ok(true)
    }

    /// Serialize and emit one event to the host.
    ///
    /// Emission failures are logged, not propagated: a host that tore down
    /// its event channel should not fault the native side.
    pub fn send_event<P: Serialize>(&self, event: &str, payload: &P) {
        let value = match serde_json::to_value(payload) {
            Ok(value) => value,
            Err(error) => {
                warn!(module = Self::NAME, event, %error, "failed to serialize event payload");
                return;
            }
        };

        debug!(module = Self::NAME, event, %value, "sending event to host");
        if let Err(error) = self.emitter.emit(event, value) {
            warn!(module = Self::NAME, event, %error, "failed to emit event");
        }
    }
}

impl EngineDelegate for StoriesModule {
    fn action_completed(&self) {
        debug!(module = Self::NAME, "engine delegate notification received");
        let payload = SingletonEvent {
            event_type: ENGINE_ACTION_EVENT.to_string(),
        };
        self.send_event(ENGINE_ACTION_EVENT, &payload);
    }
}
