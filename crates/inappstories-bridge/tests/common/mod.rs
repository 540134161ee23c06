// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Shared test harness for bridge integration tests.

use std::sync::Arc;

use tokio::sync::mpsc::UnboundedReceiver;

use inappstories_bridge::{ChannelEmitter, EmittedEvent, StoriesModule};
use inappstories_core::StoriesConfig;
use inappstories_native::StoryEngine;

/// Initialise tracing once per test binary; repeated calls are no-ops.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("debug")),
        )
        .with_test_writer()
        .try_init();
}

/// Short delays so paused-clock tests advance quickly.
pub fn test_config() -> StoriesConfig {
    StoriesConfig {
        action_delay_ms: 100,
        view_load_delay_ms: 100,
        emit_initial_state: false,
    }
}

/// A module bound to a fresh (non-shared) engine and a channel emitter.
pub fn fresh_module() -> (
    Arc<StoryEngine>,
    Arc<StoriesModule>,
    UnboundedReceiver<EmittedEvent>,
) {
    init_tracing();
    let engine = StoryEngine::new(test_config());
    let (emitter, rx) = ChannelEmitter::new();
    let module = StoriesModule::with_engine(Arc::clone(&engine), emitter);
    (engine, module, rx)
}
