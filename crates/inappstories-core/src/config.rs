// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Module configuration.

use serde::{Deserialize, Serialize};

/// Tunables for the native story engine and views.
///
/// The defaults reproduce the reference behavior of the mobile SDK: both the
/// engine action and a view load simulate two seconds of background work.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoriesConfig {
    /// Delay before `perform_action` invokes its completion, in milliseconds.
    pub action_delay_ms: u64,
    /// Delay between a view entering `Loading` and reaching `Loaded`.
    pub view_load_delay_ms: u64,
    /// Forward `initial` view-state events to the host.
    ///
    /// Off by default: a freshly created view has no host-side tag yet, so
    /// the initial notification is useless to listeners.
    pub emit_initial_state: bool,
}

impl Default for StoriesConfig {
    fn default() -> Self {
        Self {
            action_delay_ms: 2000,
            view_load_delay_ms: 2000,
            emit_initial_state: false,
        }
    }
}
