// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// View manager: creates story views on behalf of the host, routes host
// commands to them by tag, and forwards their state changes to the bridge
// module as events.
//
// The registry holds `Weak` view handles. The host owns view lifetimes; a
// view it has dropped upgrades to nothing and is pruned on the next lookup.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, Weak};

use tracing::{debug, instrument, warn};

use inappstories_core::error::{InappstoriesError, Result};
use inappstories_core::{Color, StateChangeEvent, StoriesConfig, ViewState, ViewTag};
use inappstories_native::{StoryView, StoryViewDelegate};

use crate::module::{StoriesModule, VIEW_STATE_EVENT};

/// Creates and addresses story views for the embedding host.
pub struct StoryViewManager {
    module: Arc<StoriesModule>,
    config: StoriesConfig,
    views: Mutex<HashMap<ViewTag, Weak<StoryView>>>,
    next_tag: AtomicU32,
    weak_self: Weak<StoryViewManager>,
}

impl StoryViewManager {
    pub fn new(module: Arc<StoriesModule>, config: StoriesConfig) -> Arc<Self> {
        Arc::new_cyclic(|weak_self| Self {
            module,
            config,
            views: Mutex::new(HashMap::new()),
            next_tag: AtomicU32::new(1),
            weak_self: weak_self.clone(),
        })
    }

    /// Create a view, register it, and hand ownership to the host.
    ///
    /// The manager keeps only a `Weak` handle, so dropping the returned
    /// `Arc` is all the host needs to do on teardown.
    pub fn create_view(&self) -> Arc<StoryView> {
        let tag = ViewTag(self.next_tag.fetch_add(1, Ordering::Relaxed));
        let view = StoryView::new(tag, &self.config);

        let weak: Weak<dyn StoryViewDelegate> = self.weak_self.clone();
        view.set_delegate(weak);

        let mut views = self.views_slot();
        views.retain(|_, view| view.strong_count() > 0);
        views.insert(tag, Arc::downgrade(&view));

        debug!(%tag, live_views = views.len(), "story view created");
        view
    }

    /// Host `load` command: begin loading the tagged view.
    ///
    /// An unparseable color string falls back to the default, like the
    /// reference view manager; an unknown or dropped view is an error.
    #[instrument(skip(self))]
    pub fn load(&self, tag: ViewTag, color: Option<&str>) -> Result<()> {
        let view = self.live_view(tag)?;

        let color = color.and_then(|s| match Color::parse_hex(s) {
            Ok(color) => Some(color),
            Err(error) => {
                warn!(%tag, %error, "falling back to default color");
                None
            }
        });

        view.load(color);
        Ok(())
    }

    /// Number of live registered views.
    pub fn view_count(&self) -> usize {
        let mut views = self.views_slot();
        views.retain(|_, view| view.strong_count() > 0);
        views.len()
    }

    fn live_view(&self, tag: ViewTag) -> Result<Arc<StoryView>> {
        let mut views = self.views_slot();
        match views.get(&tag).and_then(Weak::upgrade) {
            Some(view) => Ok(view),
            None => {
                views.remove(&tag);
                Err(InappstoriesError::ViewNotFound(tag))
            }
        }
    }

    fn views_slot(&self) -> MutexGuard<'_, HashMap<ViewTag, Weak<StoryView>>> {
        self.views.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl StoryViewDelegate for StoryViewManager {
    fn view_state_changed(&self, view: &StoryView, state: &ViewState) {
        // A freshly created view has no host-side counterpart yet, so the
        // initial notification is suppressed unless configured otherwise.
        if matches!(state, ViewState::Initial) && !self.config.emit_initial_state {
            debug!(tag = %view.tag(), "skipping initial state event");
            return;
        }

        let payload = StateChangeEvent::new(view.tag(), state);
        self.module.send_event(VIEW_STATE_EVENT, &payload);
    }
}
