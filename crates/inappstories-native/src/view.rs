// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// The story view state machine.
//
// A view moves `Initial -> Loading -> Loaded(color)`; the loading phase
// simulates the asynchronous fetch of the reference SDK. The view itself
// renders nothing — state changes are surfaced to a delegate, and the host
// shell decides how to draw them.

use std::sync::{Arc, Mutex, MutexGuard, Weak};
use std::time::Duration;

use tokio::time::sleep;
use tracing::debug;

use inappstories_core::{Color, StoriesConfig, ViewState, ViewTag};

/// Notification capability for view state changes.
pub trait StoryViewDelegate: Send + Sync {
    fn view_state_changed(&self, view: &StoryView, state: &ViewState);
}

/// A native story view instance.
///
/// Created through the bridge view manager, which assigns the tag and
/// registers itself as delegate. The load task holds only a `Weak` handle,
/// so a view dropped by the host mid-load simply never reaches `Loaded`.
pub struct StoryView {
    tag: ViewTag,
    load_delay: Duration,
    state: Mutex<ViewState>,
    delegate: Mutex<Option<Weak<dyn StoryViewDelegate>>>,
    weak_self: Weak<StoryView>,
}

impl StoryView {
    pub fn new(tag: ViewTag, config: &StoriesConfig) -> Arc<Self> {
        Arc::new_cyclic(|weak_self| Self {
            tag,
            load_delay: Duration::from_millis(config.view_load_delay_ms),
            state: Mutex::new(ViewState::Initial),
            delegate: Mutex::new(None),
            weak_self: weak_self.clone(),
        })
    }

    pub fn tag(&self) -> ViewTag {
        self.tag
    }

    /// Current state snapshot.
    pub fn state(&self) -> ViewState {
        *self.state_slot()
    }

    /// Register the state-change delegate, replacing any prior one.
    pub fn set_delegate(&self, delegate: Weak<dyn StoryViewDelegate>) {
        let mut slot = self.delegate.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        *slot = Some(delegate);
    }

    /// Begin loading, finishing with the given color (default blue).
    ///
    /// A load request while one is already in flight is ignored. Must be
    /// called from within a tokio runtime.
    pub fn load(&self, color: Option<Color>) {
        {
            let mut state = self.state_slot();
            if matches!(*state, ViewState::Loading) {
                debug!(tag = %self.tag, "load ignored: already loading");
                return;
            }
            *state = ViewState::Loading;
        }
        self.notify_delegate(&ViewState::Loading);

        let view = self.weak_self.clone();
        let delay = self.load_delay;
        tokio::spawn(async move {
            sleep(delay).await;

            if let Some(view) = view.upgrade() {
                view.set_state(ViewState::Loaded {
                    color: color.unwrap_or(Color::BLUE),
                });
            }
        });
    }

    fn set_state(&self, new_state: ViewState) {
        debug!(tag = %self.tag, state = new_state.label(), "view state changed");
        *self.state_slot() = new_state;
        self.notify_delegate(&new_state);
    }

    fn notify_delegate(&self, state: &ViewState) {
        let delegate = {
            let slot = self.delegate.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
            slot.as_ref().and_then(Weak::upgrade)
        };
        if let Some(delegate) = delegate {
            delegate.view_state_changed(self, state);
        }
    }

    fn state_slot(&self) -> MutexGuard<'_, ViewState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct RecordingDelegate {
        seen: Mutex<Vec<(ViewTag, ViewState)>>,
    }

    impl RecordingDelegate {
        fn states(&self) -> Vec<ViewState> {
            self.seen
                .lock()
                .unwrap()
                .iter()
                .map(|(_, state)| *state)
                .collect()
        }
    }

    impl StoryViewDelegate for RecordingDelegate {
        fn view_state_changed(&self, view: &StoryView, state: &ViewState) {
            self.seen.lock().unwrap().push((view.tag(), *state));
        }
    }

    fn view_under_test() -> (Arc<StoryView>, Arc<RecordingDelegate>) {
        let config = StoriesConfig {
            view_load_delay_ms: 100,
            ..StoriesConfig::default()
        };
        let view = StoryView::new(ViewTag(7), &config);
        let delegate = Arc::new(RecordingDelegate::default());
        let weak: Weak<dyn StoryViewDelegate> = Arc::<RecordingDelegate>::downgrade(&delegate);
        view.set_delegate(weak);
        (view, delegate)
    }

    #[tokio::test(start_paused = true)]
    async fn load_walks_through_loading_then_loaded() {
        let (view, delegate) = view_under_test();
        assert_eq!(view.state(), ViewState::Initial);

        view.load(Some(Color(0xFF8000)));
        assert_eq!(view.state(), ViewState::Loading);
        assert_eq!(delegate.states(), vec![ViewState::Loading]);

        sleep(Duration::from_millis(150)).await;
        let loaded = ViewState::Loaded {
            color: Color(0xFF8000),
        };
        assert_eq!(view.state(), loaded);
        assert_eq!(delegate.states(), vec![ViewState::Loading, loaded]);
    }

    #[tokio::test(start_paused = true)]
    async fn missing_color_defaults_to_blue() {
        let (view, _delegate) = view_under_test();
        view.load(None);
        sleep(Duration::from_millis(150)).await;
        assert_eq!(view.state(), ViewState::Loaded { color: Color::BLUE });
    }

    #[tokio::test(start_paused = true)]
    async fn load_while_loading_is_ignored() {
        let (view, delegate) = view_under_test();
        view.load(Some(Color(0x111111)));
        view.load(Some(Color(0x222222)));

        sleep(Duration::from_millis(300)).await;

        // Exactly one loading and one loaded event, with the first color.
        assert_eq!(
            delegate.states(),
            vec![
                ViewState::Loading,
                ViewState::Loaded {
                    color: Color(0x111111)
                }
            ]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn reload_after_loaded_is_allowed() {
        let (view, delegate) = view_under_test();
        view.load(Some(Color(0x111111)));
        sleep(Duration::from_millis(150)).await;

        view.load(Some(Color(0x222222)));
        sleep(Duration::from_millis(150)).await;

        assert_eq!(
            view.state(),
            ViewState::Loaded {
                color: Color(0x222222)
            }
        );
        assert_eq!(delegate.states().len(), 4);
    }

    #[tokio::test(start_paused = true)]
    async fn dropped_view_never_reaches_loaded() {
        let (view, delegate) = view_under_test();
        view.load(Some(Color(0xFF8000)));
        drop(view);

        sleep(Duration::from_millis(300)).await;
        assert_eq!(delegate.states(), vec![ViewState::Loading]);
    }

    #[tokio::test(start_paused = true)]
    async fn dropped_delegate_does_not_crash_notification() {
        let (view, delegate) = view_under_test();
        drop(delegate);

        view.load(None);
        sleep(Duration::from_millis(150)).await;
        assert_eq!(view.state(), ViewState::Loaded { color: Color::BLUE });
    }
}
