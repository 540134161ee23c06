// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// The process-wide story engine singleton.
//
// The engine exposes one asynchronous operation, `perform_action`, which in
// the reference SDK stands in for real background work (fetching a story
// feed, warming caches). The delegate slot is weakly held: registering never
// extends the delegate's lifetime, and a vanished delegate reads as empty.

use std::sync::{Arc, LazyLock, Mutex, MutexGuard, Weak};
use std::time::Duration;

use tokio::time::sleep;
use tracing::debug;

use inappstories_core::StoriesConfig;

/// Notification capability the engine requires of its observer.
///
/// The engine never learns the concrete delegate type; the bridge module
/// implements this to forward the notification across the host boundary.
pub trait EngineDelegate: Send + Sync {
    /// Called after each completed engine action, from the task context the
    /// internal completion fires on.
    fn action_completed(&self);
}

static SHARED: LazyLock<Arc<StoryEngine>> =
    LazyLock::new(|| StoryEngine::new(StoriesConfig::default()));

/// The native story engine.
///
/// One instance lives for the whole process (`StoryEngine::shared`).
/// Separate instances can be created for isolated embeddings and tests.
pub struct StoryEngine {
    config: StoriesConfig,
    delegate: Mutex<Option<Weak<dyn EngineDelegate>>>,
    weak_self: Weak<StoryEngine>,
}

impl StoryEngine {
    /// The process-wide engine instance, created lazily on first access.
    ///
    /// `LazyLock` guarantees a single instance even under concurrent first
    /// access from multiple threads.
    pub fn shared() -> Arc<StoryEngine> {
        Arc::clone(&SHARED)
    }

    /// Create an engine with its own configuration.
    pub fn new(config: StoriesConfig) -> Arc<Self> {
        Arc::new_cyclic(|weak_self| Self {
            config,
            delegate: Mutex::new(None),
            weak_self: weak_self.clone(),
        })
    }

    /// Register the delegate, replacing any previously registered one.
    ///
    /// The slot holds a `Weak`, so the engine never keeps the delegate
    /// alive; callers own the delegate's lifetime.
    pub fn set_delegate(&self, delegate: Weak<dyn EngineDelegate>) {
        *self.delegate_slot() = Some(delegate);
        debug!("engine delegate registered");
    }

    /// Empty the delegate slot.
    pub fn clear_delegate(&self) {
        *self.delegate_slot() = None;
        debug!("engine delegate cleared");
    }

    /// Whether a live delegate is currently registered.
    ///
    /// A delegate that was dropped since registration counts as absent.
    pub fn has_delegate(&self) -> bool {
        self.delegate_slot().as_ref().and_then(Weak::upgrade).is_some()
    }

    /// Run the engine action and invoke `completion` exactly once when it
    /// finishes.
    ///
    /// Returns immediately; the work is simulated by a `action_delay_ms`
    /// sleep on a spawned task, after which the completion runs and the
    /// delegate (if still alive) is notified. The completion fires whether
    /// or not a delegate is registered. Must be called from within a tokio
    /// runtime.
    pub fn perform_action(&self, completion: impl FnOnce() + Send + 'static) {
        let delay = Duration::from_millis(self.config.action_delay_ms);
        let engine = self.weak_self.clone();
        debug!(delay_ms = self.config.action_delay_ms, "engine action scheduled");

        tokio::spawn(async move {
            sleep(delay).await;

            completion();

            // The delegate hears about the action after the completion, the
            // same ordering the reference SDK guarantees.
            if let Some(engine) = engine.upgrade() {
                engine.notify_delegate();
            }
        });
    }

    /// Human-readable snapshot of the shared engine for diagnostics.
    pub fn debug_info() -> String {
        let shared = Self::shared();
        format!(
            "StoryEngine debug:\n  type: {}\n  delegate registered: {}\n  action delay: {} ms\n",
            std::any::type_name::<Self>(),
            shared.has_delegate(),
            shared.config.action_delay_ms,
        )
    }

    fn notify_delegate(&self) {
        // Upgrade while holding the lock, call without it: the delegate may
        // re-enter `set_delegate` from its notification handler.
        let delegate = self.delegate_slot().as_ref().and_then(Weak::upgrade);
        match delegate {
            Some(delegate) => delegate.action_completed(),
            None => debug!("engine action completed with no live delegate"),
        }
    }

    fn delegate_slot(&self) -> MutexGuard<'_, Option<Weak<dyn EngineDelegate>>> {
        self.delegate.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
