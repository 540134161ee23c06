// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Inappstories — Native side of the module: the process-wide story engine
// and the story view state machine. Nothing in this crate knows about the
// host bridge; notifications flow out through weakly-held delegate traits.

pub mod engine;
pub mod view;

pub use engine::{EngineDelegate, StoryEngine};
pub use view::{StoryView, StoryViewDelegate};
